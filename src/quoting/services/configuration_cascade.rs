use crate::quoting::domain::{Configuration, License, LicenseGroup, ProductCatalog};

/// ConfigurationCascade service applying dependent selection rules
///
/// Changing one field of a configuration may auto-derive or clear others:
/// a new model resets the throughput to its first tier, and a new
/// throughput re-matches both license picks. Every function mutates only
/// the configuration passed in.
pub struct ConfigurationCascade;

impl ConfigurationCascade {
    /// Selects a chassis and resets throughput to its first tier
    ///
    /// # Arguments
    /// * `config` - Configuration to update
    /// * `catalog` - Product catalog
    /// * `model_id` - New chassis id, or `None` to clear
    ///
    /// # Returns
    /// `false` (configuration untouched) when the id is not in the catalog
    pub fn select_model(
        config: &mut Configuration,
        catalog: &ProductCatalog,
        model_id: Option<&str>,
    ) -> bool {
        let throughput = match model_id {
            Some(id) => match catalog.find_model(id) {
                Some(model) => model.first_tier().map(|t| t.gbps),
                None => return false,
            },
            None => None,
        };

        config.model_id = model_id.map(str::to_string);
        config.throughput_gbps = throughput;
        Self::rematch_licenses(config, catalog);
        true
    }

    /// Selects a throughput tier and re-matches both licenses exactly
    ///
    /// # Returns
    /// `false` (configuration untouched) when `gbps` is not one of the
    /// selected model's tier values
    pub fn select_throughput(
        config: &mut Configuration,
        catalog: &ProductCatalog,
        gbps: Option<f64>,
    ) -> bool {
        if let Some(value) = gbps {
            let on_tier = config
                .model_id
                .as_deref()
                .and_then(|id| catalog.find_model(id))
                .is_some_and(|model| model.has_tier(value));
            if !on_tier {
                return false;
            }
        }

        config.throughput_gbps = gbps;
        Self::rematch_licenses(config, catalog);
        true
    }

    /// The canonical license for a chassis tier: bound to the model with a
    /// ceiling exactly equal to the throughput
    pub fn exact_license<'c>(
        catalog: &'c ProductCatalog,
        model_id: &str,
        gbps: f64,
        group: LicenseGroup,
    ) -> Option<&'c License> {
        catalog.licenses.iter().find(|l| {
            l.is_in_group(group) && l.is_bound_to(model_id) && l.applies_to_gbps_max == gbps
        })
    }

    fn rematch_licenses(config: &mut Configuration, catalog: &ProductCatalog) {
        for group in [LicenseGroup::Inspect, LicenseGroup::ThreatDv] {
            let matched = match (config.model_id.as_deref(), config.throughput_gbps) {
                (Some(model_id), Some(gbps)) if gbps > 0.0 => {
                    Self::exact_license(catalog, model_id, gbps, group).map(|l| l.sku.clone())
                }
                _ => None,
            };
            config.licenses.set(group, matched);
        }
    }

    /// Sets the Inspection pick. The ThreatDV pick is left as is; callers
    /// re-filter its options with the new ceiling.
    pub fn select_inspect_license(config: &mut Configuration, sku: Option<String>) {
        config.licenses.inspect = sku;
    }

    pub fn select_threatdv_license(config: &mut Configuration, sku: Option<String>) {
        config.licenses.dv = sku;
    }

    /// Fills or empties a 1-based slot; `false` when the slot does not exist
    pub fn set_slot(config: &mut Configuration, slot: u8, sku: Option<String>) -> bool {
        match config.slots.iter_mut().find(|s| s.slot == slot) {
            Some(selection) => {
                selection.module_sku = sku;
                true
            }
            None => false,
        }
    }

    pub fn set_sms(config: &mut Configuration, sku: Option<String>) {
        config.sms_sku = sku;
    }

    /// Turns on SMS with the first catalog appliance unless one is chosen
    pub fn enable_sms(config: &mut Configuration, catalog: &ProductCatalog) {
        if config.sms_sku.is_none() {
            config.sms_sku = catalog.sms_models.first().map(|s| s.sku.clone());
        }
    }

    pub fn rename(config: &mut Configuration, name: impl Into<String>) {
        config.name = name.into();
    }
}
