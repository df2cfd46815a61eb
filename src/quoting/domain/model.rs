use serde::{Deserialize, Serialize};

/// Family tag carried by every chassis in the catalog
pub const TXE_FAMILY: &str = "ds-tippingpoint-txe-series";

/// Number of expansion slots on every TXE chassis
pub const MODEL_SLOT_COUNT: u8 = 2;

/// One selectable throughput ceiling of a chassis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThroughputTier {
    pub label: String,
    pub gbps: f64,
}

impl ThroughputTier {
    pub fn new(label: impl Into<String>, gbps: f64) -> Self {
        Self {
            label: label.into(),
            gbps,
        }
    }
}

/// Hardware chassis with its licensable throughput tiers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: String,
    pub name: String,
    pub family: String,
    pub base_gbps: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub tiers: Vec<ThroughputTier>,
    pub slots: u8,
}

impl Model {
    /// The tier a fresh selection of this model starts on
    pub fn first_tier(&self) -> Option<&ThroughputTier> {
        self.tiers.first()
    }

    /// Whether `gbps` is exactly one of this model's tier values
    pub fn has_tier(&self, gbps: f64) -> bool {
        self.tiers.iter().any(|t| t.gbps == gbps)
    }

    /// Part number used on quote lines; models without a SKU fall back to their id
    pub fn part_number(&self) -> &str {
        self.sku.as_deref().unwrap_or(&self.id)
    }
}
