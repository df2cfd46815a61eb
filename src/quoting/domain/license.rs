use serde::{Deserialize, Serialize};
use std::fmt;

/// Category tag carried by every license record
pub const LICENSE_CATEGORY: &str = "License";

fn default_category() -> String {
    LICENSE_CATEGORY.to_string()
}

/// The two independent license slots of a configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LicenseGroup {
    #[serde(rename = "INSPECT")]
    Inspect,
    #[serde(rename = "THREATDV")]
    ThreatDv,
}

impl LicenseGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            LicenseGroup::Inspect => "INSPECT",
            LicenseGroup::ThreatDv => "THREATDV",
        }
    }
}

impl fmt::Display for LicenseGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for LicenseGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "INSPECT" | "INSPECTION" => Ok(LicenseGroup::Inspect),
            "THREATDV" | "DV" => Ok(LicenseGroup::ThreatDv),
            _ => Err(format!(
                "Invalid license group: {}. Please specify 'INSPECT' or 'THREATDV'",
                s
            )),
        }
    }
}

/// Identity of a license record.
///
/// The same SKU is deliberately listed once per chassis it is sold for,
/// so a record is identified by the SKU together with its bound model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LicenseKey<'a> {
    pub sku: &'a str,
    pub model_id: Option<&'a str>,
}

impl fmt::Display for LicenseKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.model_id {
            Some(model_id) => write!(f, "SKU {} (model {})", self.sku, model_id),
            None => write!(f, "SKU {}", self.sku),
        }
    }
}

/// Software entitlement for Inspection throughput or the ThreatDV feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub sku: String,
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    pub applies_to_gbps_max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<LicenseGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
}

impl License {
    pub fn key(&self) -> LicenseKey<'_> {
        LicenseKey {
            sku: &self.sku,
            model_id: self.model_id.as_deref(),
        }
    }

    pub fn is_in_group(&self, group: LicenseGroup) -> bool {
        self.group == Some(group)
    }

    pub fn is_bound_to(&self, model_id: &str) -> bool {
        self.model_id.as_deref() == Some(model_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_group_serde_names() {
        assert_eq!(
            serde_json::to_string(&LicenseGroup::ThreatDv).unwrap(),
            "\"THREATDV\""
        );
        let group: LicenseGroup = serde_json::from_str("\"INSPECT\"").unwrap();
        assert_eq!(group, LicenseGroup::Inspect);
    }

    #[test]
    fn test_group_from_str() {
        assert_eq!(LicenseGroup::from_str("dv").unwrap(), LicenseGroup::ThreatDv);
        assert_eq!(
            LicenseGroup::from_str("Inspect").unwrap(),
            LicenseGroup::Inspect
        );
        assert!(LicenseGroup::from_str("other").is_err());
    }

    #[test]
    fn test_deserialize_defaults_category() {
        let license: License = serde_json::from_str(
            r#"{"sku":"TPNN0276","name":"5Gbps","appliesToGbpsMax":5,"group":"INSPECT","modelId":"txe-5600"}"#,
        )
        .unwrap();
        assert_eq!(license.category, LICENSE_CATEGORY);
        assert!(license.is_bound_to("txe-5600"));
        assert!(license.is_in_group(LicenseGroup::Inspect));
    }

    #[test]
    fn test_key_display() {
        let license: License = serde_json::from_str(
            r#"{"sku":"TPNN0276","name":"5Gbps","appliesToGbpsMax":5,"modelId":"txe-8600"}"#,
        )
        .unwrap();
        assert_eq!(license.key().to_string(), "SKU TPNN0276 (model txe-8600)");
    }
}
