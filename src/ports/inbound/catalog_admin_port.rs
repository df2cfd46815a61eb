use crate::ports::outbound::BackupInfo;
use crate::quoting::domain::{
    CatalogStats, IoModule, License, LicenseGroup, Model, ProductCatalog, SmsModel,
};
use crate::shared::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::fmt;

/// The four record collections of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Model,
    IoModule,
    License,
    Sms,
}

impl RecordKind {
    /// Label used in admin messages ("Model with ID ... not found")
    pub fn label(&self) -> &'static str {
        match self {
            RecordKind::Model => "Model",
            RecordKind::IoModule => "Module",
            RecordKind::License => "License",
            RecordKind::Sms => "SMS model",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "model" | "models" => Ok(RecordKind::Model),
            "module" | "modules" => Ok(RecordKind::IoModule),
            "license" | "licenses" => Ok(RecordKind::License),
            "sms" => Ok(RecordKind::Sms),
            _ => Err(format!(
                "Invalid record kind: {}. Please specify 'model', 'module', 'license' or 'sms'",
                s
            )),
        }
    }
}

/// A single catalog record of any kind
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CatalogRecord {
    Model(Model),
    IoModule(IoModule),
    License(License),
    Sms(SmsModel),
}

impl CatalogRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            CatalogRecord::Model(_) => RecordKind::Model,
            CatalogRecord::IoModule(_) => RecordKind::IoModule,
            CatalogRecord::License(_) => RecordKind::License,
            CatalogRecord::Sms(_) => RecordKind::Sms,
        }
    }

    /// Parses a record of the given kind from JSON
    ///
    /// # Errors
    /// Returns an error if the JSON does not match the record shape
    pub fn from_json(kind: RecordKind, content: &str) -> Result<Self> {
        Ok(match kind {
            RecordKind::Model => CatalogRecord::Model(serde_json::from_str(content)?),
            RecordKind::IoModule => CatalogRecord::IoModule(serde_json::from_str(content)?),
            RecordKind::License => CatalogRecord::License(serde_json::from_str(content)?),
            RecordKind::Sms => CatalogRecord::Sms(serde_json::from_str(content)?),
        })
    }

    /// Identifier shown to the user: model id, or SKU with its bound model
    pub fn display_key(&self) -> String {
        match self {
            CatalogRecord::Model(m) => m.id.clone(),
            CatalogRecord::IoModule(m) => m.sku.clone(),
            CatalogRecord::License(l) => l.key().to_string(),
            CatalogRecord::Sms(s) => s.sku.clone(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CatalogRecord::Model(m) => &m.name,
            CatalogRecord::IoModule(m) => &m.name,
            CatalogRecord::License(l) => &l.name,
            CatalogRecord::Sms(s) => &s.name,
        }
    }
}

/// License model-binding filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelFilter {
    /// Licenses bound to no model
    Unbound,
    /// Licenses bound to this model id
    Bound(String),
}

impl std::str::FromStr for ModelFilter {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("none") {
            Ok(ModelFilter::Unbound)
        } else if s.is_empty() {
            Err("Model filter cannot be empty".to_string())
        } else {
            Ok(ModelFilter::Bound(s.to_string()))
        }
    }
}

/// Criteria for `list_records`; unset criteria match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive substring of name or SKU (and port speed for modules)
    pub search: Option<String>,
    /// Licenses only
    pub group: Option<LicenseGroup>,
    /// Licenses only
    pub model: Option<ModelFilter>,
}

/// CatalogAdminPort - Inbound port for catalog administration
///
/// This port defines the interface the CLI uses to inspect and edit the
/// product catalog. Every mutation is a read-modify-write of the whole
/// document and leaves a backup behind.
#[async_trait]
pub trait CatalogAdminPort: Send + Sync {
    /// Returns the current catalog
    async fn catalog(&self) -> Result<ProductCatalog>;

    /// Lists records of one kind in catalog order
    async fn list_records(&self, kind: RecordKind, filter: &RecordFilter)
        -> Result<Vec<CatalogRecord>>;

    /// Adds a record
    ///
    /// # Errors
    /// Returns an error if the record is invalid, its SKU or model id is
    /// already taken, or a license binding is not allowed
    async fn add_record(&self, record: CatalogRecord) -> Result<()>;

    /// Replaces an existing record
    ///
    /// # Arguments
    /// * `record` - New contents; identified by model id or SKU
    /// * `license_model_id` - For licenses, the bound model of the record
    ///   being replaced when it differs from the new contents
    async fn update_record(
        &self,
        record: CatalogRecord,
        license_model_id: Option<&str>,
    ) -> Result<()>;

    /// Gives a license record a new SKU.
    ///
    /// The record's model binding is cleared when the new SKU is only sold
    /// with other chassis.
    ///
    /// # Returns
    /// The license as stored
    async fn change_license_sku(
        &self,
        sku: &str,
        license_model_id: Option<&str>,
        new_sku: &str,
    ) -> Result<License>;

    /// Removes a record and returns it
    ///
    /// # Arguments
    /// * `kind` - Collection to remove from
    /// * `key` - Model id or SKU
    /// * `license_model_id` - For licenses, selects the record bound to this model
    async fn remove_record(
        &self,
        kind: RecordKind,
        key: &str,
        license_model_id: Option<&str>,
    ) -> Result<CatalogRecord>;

    /// Replaces the catalog with the built-in TXE product data
    async fn seed(&self) -> Result<CatalogStats>;

    /// Current catalog as pretty-printed JSON
    async fn export(&self) -> Result<String>;

    /// Validates and stores a catalog document
    async fn import(&self, content: &str) -> Result<CatalogStats>;

    async fn backups(&self) -> Result<Vec<BackupInfo>>;

    async fn restore(&self, filename: &str) -> Result<()>;
}
