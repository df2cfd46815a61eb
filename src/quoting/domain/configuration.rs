use super::model::MODEL_SLOT_COUNT;
use super::LicenseGroup;
use serde::{Deserialize, Serialize};

/// Module choice for one numbered chassis slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotSelection {
    pub slot: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_sku: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseSelection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspect: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dv: Option<String>,
}

impl LicenseSelection {
    pub fn get(&self, group: LicenseGroup) -> Option<&str> {
        match group {
            LicenseGroup::Inspect => self.inspect.as_deref(),
            LicenseGroup::ThreatDv => self.dv.as_deref(),
        }
    }

    pub fn set(&mut self, group: LicenseGroup, sku: Option<String>) {
        match group {
            LicenseGroup::Inspect => self.inspect = sku,
            LicenseGroup::ThreatDv => self.dv = sku,
        }
    }
}

/// One user-assembled appliance build inside a quoting session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput_gbps: Option<f64>,
    pub slots: [SlotSelection; MODEL_SLOT_COUNT as usize],
    #[serde(default)]
    pub licenses: LicenseSelection,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sms_sku: Option<String>,
}

impl Configuration {
    /// A configuration with nothing selected
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            model_id: None,
            throughput_gbps: None,
            slots: [
                SlotSelection {
                    slot: 1,
                    module_sku: None,
                },
                SlotSelection {
                    slot: 2,
                    module_sku: None,
                },
            ],
            licenses: LicenseSelection::default(),
            sms_sku: None,
        }
    }

    /// Module in the 1-based `slot`, if that slot exists and is filled
    pub fn slot_module(&self, slot: u8) -> Option<&str> {
        self.slots
            .iter()
            .find(|s| s.slot == slot)
            .and_then(|s| s.module_sku.as_deref())
    }
}
