use serde::{Deserialize, Serialize};

/// Category tag carried by every IO module
pub const IO_MODULE_CATEGORY: &str = "Network IO Module";

fn default_category() -> String {
    IO_MODULE_CATEGORY.to_string()
}

/// Pluggable network interface card for one chassis slot.
///
/// Which chassis accept a module is not stored here; see
/// `CompatibilityTable` for the SKU membership lists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IoModule {
    pub sku: String,
    pub name: String,
    pub ports: String,
    pub port_speed: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}
