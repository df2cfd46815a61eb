use crate::quoting::domain::ProductCatalog;
use crate::quoting::services::CatalogValidator;
use crate::shared::error::QuoteError;
use crate::shared::Result;
use async_trait::async_trait;
use serde::Serialize;

/// One stored backup of the catalog document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupInfo {
    pub filename: String,
    /// When the backup was taken, `YYYY-MM-DD HH:MM:SS UTC`
    pub timestamp: String,
    /// Size in bytes
    pub size: u64,
}

/// CatalogRepository port for durable catalog storage
///
/// This port abstracts where the product catalog document lives and how
/// earlier revisions are kept. Every write replaces the whole document
/// after backing up the previous one.
///
/// # Async Support
/// All methods are async. Implementations must be `Send + Sync`.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Reads the current catalog
    ///
    /// # Returns
    /// The stored catalog, or an empty catalog when nothing has been stored yet
    ///
    /// # Errors
    /// Returns an error if the stored document cannot be read or parsed
    async fn read(&self) -> Result<ProductCatalog>;

    /// Replaces the stored catalog
    ///
    /// # Arguments
    /// * `catalog` - New catalog contents
    /// * `updated_by` - Author recorded in the metadata; defaults to `system`
    ///
    /// # Returns
    /// The catalog as stored, with refreshed metadata
    ///
    /// # Errors
    /// Returns an error if the catalog is invalid or cannot be written
    async fn write(&self, catalog: ProductCatalog, updated_by: Option<&str>)
        -> Result<ProductCatalog>;

    /// Lists stored backups, newest first
    async fn list_backups(&self) -> Result<Vec<BackupInfo>>;

    /// Replaces the current catalog with a stored backup
    ///
    /// # Errors
    /// Returns an error if the filename is not a plain backup name or the
    /// backup does not exist
    async fn restore(&self, filename: &str) -> Result<()>;

    /// Serializes the current catalog as pretty-printed JSON
    async fn export(&self) -> Result<String> {
        let catalog = self.read().await?;
        Ok(serde_json::to_string_pretty(&catalog)?)
    }

    /// Parses, validates and stores a catalog document
    ///
    /// # Errors
    /// Returns an error if the document is not valid JSON, fails catalog
    /// validation, or cannot be written
    async fn import(&self, content: &str, updated_by: Option<&str>) -> Result<ProductCatalog> {
        let catalog: ProductCatalog =
            serde_json::from_str(content).map_err(|e| QuoteError::Validation {
                message: format!("Invalid catalog document: {}", e),
            })?;
        CatalogValidator::validate_document(&catalog)?;
        self.write(catalog, updated_by).await
    }
}
