use crate::quoting::domain::{Configuration, IoModule, License, LicenseGroup, ProductCatalog};
use crate::quoting::policies::CompatibilityTable;
use std::collections::BTreeSet;

/// Modules offered for one chassis, split into the two picker groups
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleOptions<'c> {
    pub bypass: Vec<&'c IoModule>,
    pub non_bypass: Vec<&'c IoModule>,
}

impl ModuleOptions<'_> {
    pub fn contains(&self, sku: &str) -> bool {
        self.bypass
            .iter()
            .chain(self.non_bypass.iter())
            .any(|m| m.sku == sku)
    }

    pub fn len(&self) -> usize {
        self.bypass.len() + self.non_bypass.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// CompatibilityResolver service answering which parts fit a selection
///
/// Every query is total: unknown models, SKUs and throughputs yield empty
/// sets or `false`, never an error.
pub struct CompatibilityResolver<'t> {
    table: &'t CompatibilityTable,
}

impl<'t> CompatibilityResolver<'t> {
    pub fn new(table: &'t CompatibilityTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &'t CompatibilityTable {
        self.table
    }

    /// Module SKUs valid for a chassis: its bypass set plus the non-bypass pair
    ///
    /// # Arguments
    /// * `model_id` - Chassis id; unknown ids receive only the non-bypass pair
    pub fn compatible_modules(&self, model_id: &str) -> BTreeSet<String> {
        let mut skus = self.table.bypass_modules(model_id);
        skus.extend(self.table.non_bypass_modules().iter().cloned());
        skus
    }

    pub fn is_module_compatible(&self, sku: &str, model_id: &str) -> bool {
        self.table.non_bypass_modules().iter().any(|s| s == sku)
            || self.table.bypass_modules(model_id).contains(sku)
    }

    /// Catalog modules a slot picker offers, in catalog order
    ///
    /// Without a chassis only the non-bypass group is populated.
    pub fn module_options<'c>(
        &self,
        catalog: &'c ProductCatalog,
        model_id: Option<&str>,
    ) -> ModuleOptions<'c> {
        let bypass_skus = model_id
            .map(|id| self.table.bypass_modules(id))
            .unwrap_or_default();
        let non_bypass_skus = self.table.non_bypass_modules();

        ModuleOptions {
            bypass: catalog
                .io_modules
                .iter()
                .filter(|m| bypass_skus.contains(&m.sku))
                .collect(),
            non_bypass: catalog
                .io_modules
                .iter()
                .filter(|m| non_bypass_skus.contains(&m.sku))
                .collect(),
        }
    }

    /// Whether a license may be sold with a chassis at a throughput.
    ///
    /// Requires `throughput <= appliesToGbpsMax` (a missing throughput counts
    /// as zero) and a model match: an override entry for the SKU lists the
    /// allowed chassis, otherwise the license must be unbound or bound to
    /// `model_id`.
    pub fn is_license_admissible(
        &self,
        license: &License,
        model_id: Option<&str>,
        throughput: Option<f64>,
    ) -> bool {
        let gbps = throughput.unwrap_or(0.0);
        gbps <= license.applies_to_gbps_max && self.is_model_allowed(license, model_id)
    }

    fn is_model_allowed(&self, license: &License, model_id: Option<&str>) -> bool {
        match self.table.license_override(&license.sku) {
            Some(allowed) => model_id.is_some_and(|id| allowed.iter().any(|m| m == id)),
            None => match license.model_id.as_deref() {
                None => true,
                Some(bound) => model_id == Some(bound),
            },
        }
    }

    /// False only when the SKU has an override entry that omits `model_id`
    pub fn is_license_compatible(&self, sku: &str, model_id: &str) -> bool {
        match self.table.license_override(sku) {
            Some(allowed) => allowed.iter().any(|m| m == model_id),
            None => true,
        }
    }

    /// Chassis an override-listed SKU is shared between; empty when unrestricted
    pub fn compatible_models_for(&self, sku: &str) -> &'t [String] {
        self.table.license_override(sku).unwrap_or(&[])
    }

    pub fn license_display_order(&self, model_id: &str, group: LicenseGroup) -> &'t [String] {
        self.table.display_order(model_id, group)
    }

    /// Licenses a picker offers for the current selection
    ///
    /// # Arguments
    /// * `catalog` - Product catalog
    /// * `model_id` - Selected chassis
    /// * `throughput` - Selected tier in Gbps
    /// * `group` - Which of the two license pickers
    /// * `inspect_ceiling` - Ceiling of the chosen Inspection license; when
    ///   set, only licenses with exactly that ceiling are kept
    ///
    /// # Returns
    /// Admissible licenses of the group. Chassis with a curated order list the
    /// records bound to them in that order. Other chassis get their bound
    /// records in catalog order, or the unbound generic records when none
    /// are bound to them.
    pub fn license_options<'c>(
        &self,
        catalog: &'c ProductCatalog,
        model_id: Option<&str>,
        throughput: Option<f64>,
        group: LicenseGroup,
        inspect_ceiling: Option<f64>,
    ) -> Vec<&'c License> {
        let admissible: Vec<&'c License> = catalog
            .licenses
            .iter()
            .filter(|l| l.is_in_group(group))
            .filter(|l| self.is_license_admissible(l, model_id, throughput))
            .collect();

        let options: Vec<&'c License> = match model_id {
            Some(id) if self.table.is_curated(id) => self
                .table
                .display_order(id, group)
                .iter()
                .filter_map(|sku| {
                    admissible
                        .iter()
                        .copied()
                        .find(|l| &l.sku == sku && l.is_bound_to(id))
                })
                .collect(),
            _ => {
                let bound: Vec<&'c License> = admissible
                    .iter()
                    .copied()
                    .filter(|l| model_id.is_some_and(|id| l.is_bound_to(id)))
                    .collect();
                if bound.is_empty() {
                    admissible
                        .into_iter()
                        .filter(|l| l.model_id.is_none())
                        .collect()
                } else {
                    bound
                }
            }
        };

        match inspect_ceiling {
            Some(ceiling) => options
                .into_iter()
                .filter(|l| l.applies_to_gbps_max == ceiling)
                .collect(),
            None => options,
        }
    }

    /// Model binding a license record keeps after its SKU is edited.
    ///
    /// The binding is cleared when the new SKU is override-listed and the
    /// current model is not one of its chassis.
    pub fn license_model_after_sku_change(
        &self,
        sku: &str,
        current_model: Option<&str>,
    ) -> Option<String> {
        let current = current_model?;
        if self.is_license_compatible(sku, current) {
            Some(current.to_string())
        } else {
            None
        }
    }

    /// Human-readable problems with a configuration's current selections.
    ///
    /// Checks that every referenced record exists, modules fit the chassis,
    /// licenses are admissible, and the ThreatDV ceiling matches the
    /// Inspection ceiling. An empty list means the configuration is
    /// consistent.
    pub fn configuration_issues(
        &self,
        catalog: &ProductCatalog,
        config: &Configuration,
    ) -> Vec<String> {
        let mut issues = Vec::new();

        let model_id = config.model_id.as_deref();
        if let Some(id) = model_id {
            if catalog.find_model(id).is_none() {
                issues.push(format!("Model {} not found", id));
            }
        }

        for slot in &config.slots {
            let Some(sku) = slot.module_sku.as_deref() else {
                continue;
            };
            if catalog.find_module(sku).is_none() {
                issues.push(format!("Module {} not found", sku));
            } else if let Some(id) = model_id {
                if !self.is_module_compatible(sku, id) {
                    issues.push(format!(
                        "Module {} is not compatible with model {}",
                        sku, id
                    ));
                }
            }
        }

        let mut inspect_ceiling = None;
        for group in [LicenseGroup::Inspect, LicenseGroup::ThreatDv] {
            let Some(sku) = config.licenses.get(group) else {
                continue;
            };
            let Some(license) = catalog.find_license(sku, model_id) else {
                issues.push(format!("License {} not found", sku));
                continue;
            };
            if !self.is_license_admissible(license, model_id, config.throughput_gbps) {
                issues.push(match model_id {
                    Some(id) => format!(
                        "License {} is not valid for model {} at the selected throughput",
                        sku, id
                    ),
                    None => format!("License {} requires a model selection", sku),
                });
            }
            match group {
                LicenseGroup::Inspect => inspect_ceiling = Some(license.applies_to_gbps_max),
                LicenseGroup::ThreatDv => {
                    if let Some(ceiling) = inspect_ceiling {
                        if license.applies_to_gbps_max != ceiling {
                            issues.push(format!(
                                "ThreatDV license {} does not match the Inspection license bandwidth ({} Gbps)",
                                sku, ceiling
                            ));
                        }
                    }
                }
            }
        }

        if let Some(sku) = config.sms_sku.as_deref() {
            if catalog.find_sms(sku).is_none() {
                issues.push(format!("SMS {} not found", sku));
            }
        }

        issues
    }
}
