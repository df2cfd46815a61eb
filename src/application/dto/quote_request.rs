use serde::Deserialize;

/// QuoteRequest - Request DTO for the quote generation use case
///
/// Each entry describes one configuration as a sequence of picks that is
/// replayed through the selection cascade in field order.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct QuoteRequest {
    #[serde(default)]
    pub configurations: Vec<ConfigurationRequest>,
}

impl QuoteRequest {
    pub fn new(configurations: Vec<ConfigurationRequest>) -> Self {
        Self { configurations }
    }
}

/// One requested configuration; omitted fields keep the cascade's defaults
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigurationRequest {
    pub name: Option<String>,
    /// Chassis id, e.g. `txe-8600`
    pub model: Option<String>,
    /// Throughput tier in Gbps
    pub throughput: Option<f64>,
    /// Inspection license SKU; an empty string clears the automatic pick
    pub inspect: Option<String>,
    /// ThreatDV license SKU; an empty string clears the automatic pick
    pub threatdv: Option<String>,
    /// Module SKUs for slot 1 and slot 2
    #[serde(default)]
    pub slots: Vec<Option<String>>,
    pub sms: Option<SmsChoice>,
}

/// SMS pick: `true` takes the first appliance, `false` none, or a SKU
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum SmsChoice {
    Enabled(bool),
    Sku(String),
}
