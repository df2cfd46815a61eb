use crate::quoting::domain::LicenseGroup;
use crate::shared::Result;
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};

/// Bypass module SKUs accepted by one chassis.
///
/// `extends` names another chassis whose set is included as well.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleSet {
    #[serde(default)]
    pub extends: Option<String>,
    #[serde(default)]
    pub skus: Vec<String>,
}

/// Curated presentation order of a chassis' license pickers
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DisplayOrder {
    #[serde(default)]
    pub inspect: Vec<String>,
    #[serde(default)]
    pub threatdv: Vec<String>,
}

/// CompatibilityTable policy holding every fixed compatibility rule
///
/// Module membership per chassis, license SKUs shared across chassis,
/// curated license ordering and bespoke hardware line descriptions all
/// live here, so resolver and quote builder read one source.
///
/// The built-in table reproduces the TXE product data. A YAML document
/// with the same field names replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompatibilityTable {
    #[serde(default)]
    bypass_modules: BTreeMap<String, ModuleSet>,
    #[serde(default)]
    non_bypass_modules: Vec<String>,
    #[serde(default)]
    license_overrides: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    license_display_order: BTreeMap<String, DisplayOrder>,
    #[serde(default)]
    hardware_descriptions: BTreeMap<String, String>,
}

fn skus(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl CompatibilityTable {
    /// The TXE series rules
    pub fn builtin() -> Self {
        let bypass_modules = BTreeMap::from([
            (
                "txe-5600".to_string(),
                ModuleSet {
                    extends: None,
                    skus: skus(&["TPNN0410", "TPNN0411", "TPNN0412", "TPNN0413", "TPNN0414"]),
                },
            ),
            (
                "txe-8600".to_string(),
                ModuleSet {
                    extends: Some("txe-5600".to_string()),
                    skus: skus(&["TPNN0374", "TPNN0375", "TPNN0408", "TPNN0409"]),
                },
            ),
            (
                "txe-9200".to_string(),
                ModuleSet {
                    extends: None,
                    skus: skus(&["TPNN0408", "TPNN0409", "TPNN0372", "TPNN0373"]),
                },
            ),
        ]);

        let shared_low = skus(&["txe-5600", "txe-8600"]);
        let shared_high = skus(&["txe-8600", "txe-9200"]);
        let license_overrides = BTreeMap::from([
            ("TPNN0276".to_string(), shared_low.clone()),
            ("TPNN0277".to_string(), shared_low.clone()),
            ("TPNN0280".to_string(), shared_high.clone()),
            ("TPNN0286".to_string(), shared_low.clone()),
            ("TPNN0287".to_string(), shared_low),
            ("TPNN0290".to_string(), shared_high),
        ]);

        let license_display_order = BTreeMap::from([
            (
                "txe-5600".to_string(),
                DisplayOrder {
                    inspect: skus(&[
                        "TPNM0129", "TPNN0272", "TPNN0273", "TPNN0274", "TPNN0275", "TPNN0276",
                        "TPNN0277",
                    ]),
                    threatdv: skus(&[
                        "TPNN0281", "TPNN0282", "TPNN0283", "TPNN0284", "TPNN0285", "TPNN0286",
                        "TPNN0287",
                    ]),
                },
            ),
            (
                "txe-8600".to_string(),
                DisplayOrder {
                    inspect: skus(&[
                        "TPNN0276", "TPNN0277", "TPNN0278", "TPNN0279", "TPNN0296", "TPNN0280",
                    ]),
                    threatdv: skus(&[
                        "TPNN0286", "TPNN0287", "TPNN0288", "TPNN0289", "TPNN0297", "TPNN0290",
                    ]),
                },
            ),
            (
                "txe-9200".to_string(),
                DisplayOrder {
                    inspect: skus(&["TPNN0280", "TPNN0397", "TPNN0398", "TPNN0399"]),
                    threatdv: skus(&["TPNN0290", "TPNN0400", "TPNN0401", "TPNN0402"]),
                },
            ),
        ]);

        let hardware_descriptions = BTreeMap::from([
            (
                "txe-5600".to_string(),
                "TippingPoint 5600TXE HW + Support 1Yr".to_string(),
            ),
            (
                "txe-8600".to_string(),
                "TippingPoint 8600TXE HW + Support 1Yr".to_string(),
            ),
            (
                "txe-9200".to_string(),
                "TippingPoint 9200TXE HW + Support 1Yr".to_string(),
            ),
        ]);

        Self {
            bypass_modules,
            non_bypass_modules: skus(&["TPNN0370", "TPNN0371"]),
            license_overrides,
            license_display_order,
            hardware_descriptions,
        }
    }

    /// Parses a replacement table from YAML
    ///
    /// # Errors
    /// Returns an error if the document is malformed or a module set
    /// extends a chassis that has no set of its own.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let table: CompatibilityTable = serde_yaml_ng::from_str(content)?;
        for (model_id, set) in &table.bypass_modules {
            if let Some(parent) = &set.extends {
                if !table.bypass_modules.contains_key(parent) {
                    anyhow::bail!(
                        "Module set for '{}' extends '{}', which has no module set",
                        model_id,
                        parent
                    );
                }
            }
        }
        Ok(table)
    }

    /// Bypass module SKUs for a chassis, following `extends` links.
    ///
    /// Unknown chassis get an empty set. A cycle of `extends` links stops
    /// at the first chassis visited twice.
    pub fn bypass_modules(&self, model_id: &str) -> BTreeSet<String> {
        let mut result = BTreeSet::new();
        let mut visited = BTreeSet::new();
        let mut current = Some(model_id);

        while let Some(id) = current {
            if !visited.insert(id) {
                break;
            }
            match self.bypass_modules.get(id) {
                Some(set) => {
                    result.extend(set.skus.iter().cloned());
                    current = set.extends.as_deref();
                }
                None => break,
            }
        }
        result
    }

    /// Modules valid in every chassis
    pub fn non_bypass_modules(&self) -> &[String] {
        &self.non_bypass_modules
    }

    /// Chassis a shared license SKU may be sold with, if the SKU is restricted
    pub fn license_override(&self, sku: &str) -> Option<&[String]> {
        self.license_overrides.get(sku).map(Vec::as_slice)
    }

    /// Curated picker order for a chassis; empty when the chassis has none
    pub fn display_order(&self, model_id: &str, group: LicenseGroup) -> &[String] {
        match self.license_display_order.get(model_id) {
            Some(order) => match group {
                LicenseGroup::Inspect => &order.inspect,
                LicenseGroup::ThreatDv => &order.threatdv,
            },
            None => &[],
        }
    }

    pub fn is_curated(&self, model_id: &str) -> bool {
        self.license_display_order.contains_key(model_id)
    }

    pub fn hardware_description(&self, model_id: &str) -> Option<&str> {
        self.hardware_descriptions.get(model_id).map(String::as_str)
    }
}

impl Default for CompatibilityTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_8600_includes_5600_set() {
        let table = CompatibilityTable::builtin();
        let base = table.bypass_modules("txe-5600");
        let extended = table.bypass_modules("txe-8600");
        assert_eq!(base.len(), 5);
        assert_eq!(extended.len(), 9);
        assert!(base.is_subset(&extended));
    }

    #[test]
    fn test_9200_set_is_disjoint_from_5600() {
        let table = CompatibilityTable::builtin();
        let base = table.bypass_modules("txe-5600");
        let high = table.bypass_modules("txe-9200");
        assert!(base.is_disjoint(&high));
        assert!(high.contains("TPNN0372"));
    }

    #[test]
    fn test_unknown_model_has_no_bypass_modules() {
        let table = CompatibilityTable::builtin();
        assert!(table.bypass_modules("txe-1100").is_empty());
    }

    #[test]
    fn test_license_override_lookup() {
        let table = CompatibilityTable::builtin();
        assert_eq!(
            table.license_override("TPNN0280"),
            Some(&["txe-8600".to_string(), "txe-9200".to_string()][..])
        );
        assert!(table.license_override("TPNN0278").is_none());
    }

    #[test]
    fn test_display_order() {
        let table = CompatibilityTable::builtin();
        let order = table.display_order("txe-9200", LicenseGroup::ThreatDv);
        assert_eq!(order[0], "TPNN0290");
        assert_eq!(order.len(), 4);
        assert!(table
            .display_order("txe-1100", LicenseGroup::Inspect)
            .is_empty());
        assert!(table.is_curated("txe-8600"));
        assert!(!table.is_curated("txe-1100"));
    }

    #[test]
    fn test_hardware_description() {
        let table = CompatibilityTable::builtin();
        assert_eq!(
            table.hardware_description("txe-8600"),
            Some("TippingPoint 8600TXE HW + Support 1Yr")
        );
        assert_eq!(table.hardware_description("txe-1100"), None);
    }

    #[test]
    fn test_from_yaml_str() {
        let yaml = r#"
bypass_modules:
  small:
    skus: [TPNN0001]
  large:
    extends: small
    skus: [TPNN0002]
non_bypass_modules: [TPNN0003]
license_overrides:
  TPNN0100: [small, large]
hardware_descriptions:
  large: Large chassis
"#;
        let table = CompatibilityTable::from_yaml_str(yaml).unwrap();
        let large = table.bypass_modules("large");
        assert!(large.contains("TPNN0001"));
        assert!(large.contains("TPNN0002"));
        assert_eq!(table.non_bypass_modules(), &["TPNN0003".to_string()]);
        assert!(table.display_order("large", LicenseGroup::Inspect).is_empty());
    }

    #[test]
    fn test_from_yaml_str_rejects_dangling_extends() {
        let yaml = "bypass_modules:\n  large:\n    extends: missing\n    skus: []\n";
        let err = CompatibilityTable::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("extends 'missing'"));
    }

    #[test]
    fn test_from_yaml_str_rejects_unknown_fields() {
        assert!(CompatibilityTable::from_yaml_str("bypass: {}\n").is_err());
    }

    #[test]
    fn test_extends_cycle_terminates() {
        let yaml = r#"
bypass_modules:
  a:
    extends: b
    skus: [TPNN0001]
  b:
    extends: a
    skus: [TPNN0002]
"#;
        let table = CompatibilityTable::from_yaml_str(yaml).unwrap();
        assert_eq!(table.bypass_modules("a").len(), 2);
    }
}
