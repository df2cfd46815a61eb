use crate::application::dto::{LicenseOption, ModuleOption, OptionsResponse};
use crate::ports::inbound::CatalogRecord;
use crate::ports::outbound::BackupInfo;
use crate::quoting::domain::ProductCatalog;
use std::path::Path;

const UNBOUND: &str = "-";

/// CatalogTextFormatter rendering admin listings as plain text
///
/// Used by the `catalog` and `options` commands. Tables share the quote
/// table's ` | ` / `-+-` layout with every column left-aligned.
pub struct CatalogTextFormatter;

impl CatalogTextFormatter {
    /// Catalog metadata and record counts
    pub fn summary(catalog: &ProductCatalog, location: &Path) -> String {
        let stats = catalog.stats();
        let mut out = String::new();
        out.push_str(&format!("Catalog:      {}\n", location.display()));
        out.push_str(&format!("Version:      {}\n", catalog.metadata.version));
        out.push_str(&format!("Last updated: {}\n", catalog.metadata.last_updated));
        out.push_str(&format!(
            "Updated by:   {}\n",
            catalog.metadata.updated_by.as_deref().unwrap_or(UNBOUND)
        ));
        out.push_str(&format!("Models:       {}\n", stats.models));
        out.push_str(&format!("IO modules:   {}\n", stats.io_modules));
        out.push_str(&format!("Licenses:     {}\n", stats.licenses));
        out.push_str(&format!("SMS models:   {}\n", stats.sms_models));
        out
    }

    /// One row per record; columns depend on the record kind
    pub fn records(records: &[CatalogRecord]) -> String {
        let Some(first) = records.first() else {
            return "No matching records\n".to_string();
        };

        let headers: &[&str] = match first {
            CatalogRecord::Model(_) => &["ID", "SKU", "Name", "Tiers (Gbps)", "Slots"],
            CatalogRecord::IoModule(_) => &["SKU", "Name", "Ports", "Speed"],
            CatalogRecord::License(_) => &["SKU", "Group", "Max Gbps", "Model", "Name"],
            CatalogRecord::Sms(_) => &["SKU", "Name"],
        };

        let rows: Vec<Vec<String>> = records.iter().map(Self::record_row).collect();
        render_table(headers, &rows)
    }

    fn record_row(record: &CatalogRecord) -> Vec<String> {
        match record {
            CatalogRecord::Model(m) => vec![
                m.id.clone(),
                m.sku.clone().unwrap_or_else(|| UNBOUND.to_string()),
                m.name.clone(),
                m.tiers
                    .iter()
                    .map(|t| t.gbps.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                m.slots.to_string(),
            ],
            CatalogRecord::IoModule(m) => vec![
                m.sku.clone(),
                m.name.clone(),
                m.ports.clone(),
                m.port_speed.clone(),
            ],
            CatalogRecord::License(l) => vec![
                l.sku.clone(),
                l.group.map_or(UNBOUND, |g| g.as_str()).to_string(),
                l.applies_to_gbps_max.to_string(),
                l.model_id.clone().unwrap_or_else(|| UNBOUND.to_string()),
                l.name.clone(),
            ],
            CatalogRecord::Sms(s) => vec![s.sku.clone(), s.name.clone()],
        }
    }

    /// Stored backups, in the order given
    pub fn backups(backups: &[BackupInfo]) -> String {
        if backups.is_empty() {
            return "No backups found\n".to_string();
        }
        let rows: Vec<Vec<String>> = backups
            .iter()
            .map(|b| vec![b.filename.clone(), b.timestamp.clone(), b.size.to_string()])
            .collect();
        render_table(&["Filename", "Taken", "Bytes"], &rows)
    }

    /// Every picker list for one chassis selection
    pub fn options(response: &OptionsResponse) -> String {
        let mut out = format!("{} ({})\n", response.model_name, response.model_id);

        let tiers: Vec<String> = response
            .tiers
            .iter()
            .map(|t| {
                if Some(t.gbps) == response.throughput {
                    format!("[{}]", t.label)
                } else {
                    t.label.clone()
                }
            })
            .collect();
        out.push_str(&format!("Throughput tiers: {}\n", tiers.join(", ")));

        Self::push_modules(&mut out, "Bypass modules", &response.bypass_modules);
        Self::push_modules(&mut out, "Non-bypass modules", &response.non_bypass_modules);
        Self::push_licenses(&mut out, "Inspection licenses", &response.inspect_licenses);
        Self::push_licenses(&mut out, "ThreatDV licenses", &response.threatdv_licenses);
        out
    }

    fn push_modules(out: &mut String, title: &str, modules: &[ModuleOption]) {
        out.push_str(&format!("\n{}:\n", title));
        if modules.is_empty() {
            out.push_str("  (none)\n");
            return;
        }
        for module in modules {
            out.push_str(&format!(
                "  {}  {} ({})\n",
                module.sku, module.name, module.port_speed
            ));
        }
    }

    fn push_licenses(out: &mut String, title: &str, licenses: &[LicenseOption]) {
        out.push_str(&format!("\n{}:\n", title));
        if licenses.is_empty() {
            out.push_str("  (none)\n");
            return;
        }
        for license in licenses {
            out.push_str(&format!("  {}  {}\n", license.sku, license.name));
        }
    }
}

/// Left-aligned table with a `-+-` rule under the header row
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let render = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<w$}", cell, w = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render(headers.to_vec()));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    for row in rows {
        lines.push(render(row.iter().map(String::as_str).collect()));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}
