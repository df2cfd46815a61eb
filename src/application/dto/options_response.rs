use crate::quoting::domain::{IoModule, License, ThroughputTier};
use serde::Serialize;

/// OptionsRequest - Request DTO for listing what a selection admits
#[derive(Debug, Clone, PartialEq)]
pub struct OptionsRequest {
    pub model_id: String,
    /// Tier to filter licenses by; defaults to the model's first tier
    pub throughput: Option<f64>,
    /// Inspection pick whose ceiling narrows the ThreatDV list
    pub inspect: Option<String>,
}

impl OptionsRequest {
    pub fn new(model_id: String, throughput: Option<f64>, inspect: Option<String>) -> Self {
        Self {
            model_id,
            throughput,
            inspect,
        }
    }
}

/// Picker entry for a slot module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOption {
    pub sku: String,
    pub name: String,
    pub port_speed: String,
}

impl From<&IoModule> for ModuleOption {
    fn from(module: &IoModule) -> Self {
        Self {
            sku: module.sku.clone(),
            name: module.name.clone(),
            port_speed: module.port_speed.clone(),
        }
    }
}

/// Picker entry for a license
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseOption {
    pub sku: String,
    pub name: String,
    pub applies_to_gbps_max: f64,
}

impl From<&License> for LicenseOption {
    fn from(license: &License) -> Self {
        Self {
            sku: license.sku.clone(),
            name: license.name.clone(),
            applies_to_gbps_max: license.applies_to_gbps_max,
        }
    }
}

/// OptionsResponse - every choice the pickers offer for one chassis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub model_id: String,
    pub model_name: String,
    pub tiers: Vec<ThroughputTier>,
    pub throughput: Option<f64>,
    pub bypass_modules: Vec<ModuleOption>,
    pub non_bypass_modules: Vec<ModuleOption>,
    pub inspect_licenses: Vec<LicenseOption>,
    pub threatdv_licenses: Vec<LicenseOption>,
}
