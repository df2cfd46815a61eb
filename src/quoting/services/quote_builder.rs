use crate::quoting::domain::{Configuration, LicenseGroup, ProductCatalog, QuoteLine};
use crate::quoting::policies::CompatibilityTable;

/// QuoteBuilder service flattening configurations into quote lines
///
/// Per configuration, in list order: hardware, Inspection license,
/// ThreatDV license, slot 1, slot 2. Those lines carry the 1-based
/// position as `configId`. SMS lines follow after every configuration
/// and carry no `configId`. Every line has quantity 1 and identical parts
/// are never merged. Selections absent from the catalog produce no line.
pub struct QuoteBuilder;

impl QuoteBuilder {
    /// Builds the ordered bill of materials
    ///
    /// # Arguments
    /// * `catalog` - Product catalog used to resolve selections
    /// * `table` - Source of bespoke hardware descriptions
    /// * `configurations` - Configurations in session order
    ///
    /// # Returns
    /// Quote lines; empty when nothing is selected
    pub fn build_quote_lines(
        catalog: &ProductCatalog,
        table: &CompatibilityTable,
        configurations: &[Configuration],
    ) -> Vec<QuoteLine> {
        let mut lines: Vec<QuoteLine> = configurations
            .iter()
            .enumerate()
            .flat_map(|(index, config)| Self::lines_for_configuration(catalog, table, config, index + 1))
            .collect();

        lines.extend(configurations.iter().filter_map(|config| {
            let sku = config.sms_sku.as_deref()?;
            let sms = catalog.find_sms(sku)?;
            Some(QuoteLine::new(&sms.sku, &sms.name, None))
        }));

        lines
    }

    fn lines_for_configuration(
        catalog: &ProductCatalog,
        table: &CompatibilityTable,
        config: &Configuration,
        config_id: usize,
    ) -> Vec<QuoteLine> {
        let mut lines = Vec::new();
        let model_id = config.model_id.as_deref();

        if let Some(model) = model_id.and_then(|id| catalog.find_model(id)) {
            let description = table
                .hardware_description(&model.id)
                .map(str::to_string)
                .unwrap_or_else(|| format!("{} + HW Support 1Yr", model.name));
            lines.push(QuoteLine::new(
                model.part_number(),
                description,
                Some(config_id),
            ));
        }

        for group in [LicenseGroup::Inspect, LicenseGroup::ThreatDv] {
            if let Some(license) = config
                .licenses
                .get(group)
                .and_then(|sku| catalog.find_license(sku, model_id))
            {
                lines.push(QuoteLine::new(&license.sku, &license.name, Some(config_id)));
            }
        }

        for slot in &config.slots {
            if let Some(module) = slot
                .module_sku
                .as_deref()
                .and_then(|sku| catalog.find_module(sku))
            {
                lines.push(QuoteLine::new(&module.sku, &module.name, Some(config_id)));
            }
        }

        lines
    }
}
