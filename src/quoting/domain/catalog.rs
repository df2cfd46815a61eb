use super::{IoModule, License, Model, SmsModel};
use crate::shared::Result;
use anyhow::Context;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Version stamped on catalogs created by this tool
pub const CATALOG_VERSION: &str = "1.0.0";

/// Author recorded when a write does not name one
pub const DEFAULT_UPDATED_BY: &str = "system";

const BUILTIN_CATALOG: &str = include_str!("../../../assets/txe-catalog.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMetadata {
    pub last_updated: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// Record counts shown by `catalog show`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogStats {
    pub models: usize,
    pub io_modules: usize,
    pub licenses: usize,
    pub sms_models: usize,
}

/// The product catalog document: every orderable part plus bookkeeping metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCatalog {
    pub models: Vec<Model>,
    pub io_modules: Vec<IoModule>,
    pub licenses: Vec<License>,
    pub sms_models: Vec<SmsModel>,
    pub metadata: CatalogMetadata,
}

impl ProductCatalog {
    /// Catalog with no records, as returned when nothing has been stored yet
    pub fn empty() -> Self {
        Self {
            models: Vec::new(),
            io_modules: Vec::new(),
            licenses: Vec::new(),
            sms_models: Vec::new(),
            metadata: CatalogMetadata {
                last_updated: Utc::now().to_rfc3339(),
                version: CATALOG_VERSION.to_string(),
                updated_by: Some(DEFAULT_UPDATED_BY.to_string()),
            },
        }
    }

    /// The shipped TXE product data, used to seed an empty store
    pub fn builtin() -> Result<Self> {
        serde_json::from_str(BUILTIN_CATALOG).context("Built-in product catalog is malformed")
    }

    pub fn find_model(&self, model_id: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.id == model_id)
    }

    pub fn find_module(&self, sku: &str) -> Option<&IoModule> {
        self.io_modules.iter().find(|m| m.sku == sku)
    }

    pub fn find_sms(&self, sku: &str) -> Option<&SmsModel> {
        self.sms_models.iter().find(|s| s.sku == sku)
    }

    /// Finds the license record for `sku` as sold with `model_id`.
    ///
    /// Prefers the record bound to that model and falls back to the first
    /// record carrying the SKU, since shared SKUs are listed once per model.
    pub fn find_license(&self, sku: &str, model_id: Option<&str>) -> Option<&License> {
        model_id
            .and_then(|id| {
                self.licenses
                    .iter()
                    .find(|l| l.sku == sku && l.is_bound_to(id))
            })
            .or_else(|| self.licenses.iter().find(|l| l.sku == sku))
    }

    /// Every SKU in the shared namespace: model, module, license and SMS
    pub fn all_skus(&self) -> impl Iterator<Item = &str> {
        self.models
            .iter()
            .filter_map(|m| m.sku.as_deref())
            .chain(self.io_modules.iter().map(|m| m.sku.as_str()))
            .chain(self.licenses.iter().map(|l| l.sku.as_str()))
            .chain(self.sms_models.iter().map(|s| s.sku.as_str()))
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            models: self.models.len(),
            io_modules: self.io_modules.len(),
            licenses: self.licenses.len(),
            sms_models: self.sms_models.len(),
        }
    }
}
