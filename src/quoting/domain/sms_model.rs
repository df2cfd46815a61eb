use serde::{Deserialize, Serialize};

/// Security Management System appliance; usable with any configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsModel {
    pub sku: String,
    pub name: String,
}
