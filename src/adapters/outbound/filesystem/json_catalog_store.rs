use crate::ports::outbound::{BackupInfo, CatalogRepository};
use crate::quoting::domain::catalog::{CATALOG_VERSION, DEFAULT_UPDATED_BY};
use crate::quoting::domain::ProductCatalog;
use crate::quoting::services::CatalogValidator;
use crate::shared::error::QuoteError;
use crate::shared::security::{
    validate_backup_filename, validate_file_size, BACKUP_PREFIX, MAX_FILE_SIZE,
};
use crate::shared::Result;
use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDateTime, SecondsFormat, Utc};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Number of backups kept when none is configured
pub const DEFAULT_MAX_BACKUPS: usize = 10;

/// Author recorded when a backup is restored
const RESTORE_AUTHOR: &str = "restore";

/// Layout of the timestamp embedded in backup filenames
const BACKUP_STAMP_FORMAT: &str = "%Y-%m-%dT%H-%M-%S-%3fZ";

/// JsonCatalogStore adapter keeping the catalog as one JSON document
///
/// This adapter implements the CatalogRepository port on the local file
/// system. Before every write the current document is copied into the
/// backups directory as `catalog-<timestamp>.json`; only the newest
/// `max_backups` copies are kept. The new document goes to a temporary
/// file first and is renamed over the old one.
pub struct JsonCatalogStore {
    catalog_path: PathBuf,
    backups_dir: PathBuf,
    max_backups: usize,
}

impl JsonCatalogStore {
    pub fn new(catalog_path: PathBuf, backups_dir: PathBuf) -> Self {
        Self {
            catalog_path,
            backups_dir,
            max_backups: DEFAULT_MAX_BACKUPS,
        }
    }

    pub fn with_max_backups(mut self, max_backups: usize) -> Self {
        self.max_backups = max_backups;
        self
    }

    pub fn catalog_path(&self) -> &Path {
        &self.catalog_path
    }

    /// Reads a document with symlink and size checks.
    ///
    /// Returns `None` when the file does not exist.
    async fn read_checked(path: &Path, description: &str) -> Result<Option<String>> {
        let metadata = match fs::symlink_metadata(path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(QuoteError::FileReadError {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                }
                .into())
            }
        };

        if metadata.is_symlink() {
            return Err(QuoteError::SecurityError {
                path: path.to_path_buf(),
                reason: format!("{} is a symbolic link", description),
                hint: "Point the catalog options at the real file instead of a link".to_string(),
            }
            .into());
        }
        validate_file_size(metadata.len(), path, MAX_FILE_SIZE)?;

        fs::read_to_string(path)
            .await
            .map(Some)
            .map_err(|e| {
                QuoteError::FileReadError {
                    path: path.to_path_buf(),
                    details: e.to_string(),
                }
                .into()
            })
    }

    fn parse_document(path: &Path, content: &str) -> Result<ProductCatalog> {
        serde_json::from_str(content).map_err(|e| {
            QuoteError::CatalogParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }

    fn write_error(path: &Path, error: impl ToString) -> anyhow::Error {
        QuoteError::FileWriteError {
            path: path.to_path_buf(),
            details: error.to_string(),
        }
        .into()
    }

    fn backup_filename(at: DateTime<Utc>) -> String {
        let stamp = at
            .to_rfc3339_opts(SecondsFormat::Millis, true)
            .replace([':', '.'], "-");
        format!("{}{}.json", BACKUP_PREFIX, stamp)
    }

    /// Human-readable time encoded in a backup filename
    fn display_timestamp(filename: &str) -> String {
        let stamp = filename
            .strip_prefix(BACKUP_PREFIX)
            .and_then(|s| s.strip_suffix(".json"))
            .unwrap_or(filename);
        NaiveDateTime::parse_from_str(stamp, BACKUP_STAMP_FORMAT)
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|_| stamp.to_string())
    }

    fn is_backup_name(name: &str) -> bool {
        name.starts_with(BACKUP_PREFIX) && name.ends_with(".json")
    }

    /// Backup filenames, newest first
    async fn backup_names(&self) -> Result<Vec<String>> {
        let mut entries = match fs::read_dir(&self.backups_dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(QuoteError::FileReadError {
                    path: self.backups_dir.clone(),
                    details: e.to_string(),
                }
                .into())
            }
        };

        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            if let Some(name) = entry.file_name().to_str() {
                if Self::is_backup_name(name) {
                    names.push(name.to_string());
                }
            }
        }
        names.sort_unstable_by(|a, b| b.cmp(a));
        Ok(names)
    }

    /// Copies the current document into the backups directory, if there is one
    async fn backup_current(&self) -> Result<()> {
        if Self::read_checked(&self.catalog_path, "Product catalog")
            .await?
            .is_none()
        {
            return Ok(());
        }

        fs::create_dir_all(&self.backups_dir)
            .await
            .map_err(|e| Self::write_error(&self.backups_dir, e))?;

        // Same-millisecond writes move forward until the name is free
        let mut at = Utc::now();
        let mut backup_path = self.backups_dir.join(Self::backup_filename(at));
        while fs::try_exists(&backup_path).await.unwrap_or(false) {
            at += Duration::milliseconds(1);
            backup_path = self.backups_dir.join(Self::backup_filename(at));
        }

        fs::copy(&self.catalog_path, &backup_path)
            .await
            .map_err(|e| Self::write_error(&backup_path, e))?;

        self.prune_backups().await
    }

    async fn prune_backups(&self) -> Result<()> {
        let names = self.backup_names().await?;
        for name in names.iter().skip(self.max_backups) {
            let path = self.backups_dir.join(name);
            match fs::remove_file(&path).await {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(Self::write_error(&path, e)),
            }
        }
        Ok(())
    }

    async fn replace_document(&self, content: &str) -> Result<()> {
        if let Some(parent) = self.catalog_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| Self::write_error(parent, e))?;
        }

        if let Ok(metadata) = fs::symlink_metadata(&self.catalog_path).await {
            if metadata.is_symlink() {
                return Err(QuoteError::SecurityError {
                    path: self.catalog_path.clone(),
                    reason: "Product catalog is a symbolic link".to_string(),
                    hint: "Point the catalog options at the real file instead of a link"
                        .to_string(),
                }
                .into());
            }
        }

        let mut temp_path = self.catalog_path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        fs::write(&temp_path, content)
            .await
            .map_err(|e| Self::write_error(&temp_path, e))?;
        fs::rename(&temp_path, &self.catalog_path)
            .await
            .map_err(|e| Self::write_error(&self.catalog_path, e))
    }
}

#[async_trait]
impl CatalogRepository for JsonCatalogStore {
    async fn read(&self) -> Result<ProductCatalog> {
        match Self::read_checked(&self.catalog_path, "Product catalog").await? {
            Some(content) => Self::parse_document(&self.catalog_path, &content),
            None => Ok(ProductCatalog::empty()),
        }
    }

    async fn write(
        &self,
        catalog: ProductCatalog,
        updated_by: Option<&str>,
    ) -> Result<ProductCatalog> {
        let mut catalog = catalog;
        catalog.metadata.last_updated = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
        catalog.metadata.updated_by = Some(updated_by.unwrap_or(DEFAULT_UPDATED_BY).to_string());
        if catalog.metadata.version.trim().is_empty() {
            catalog.metadata.version = CATALOG_VERSION.to_string();
        }

        CatalogValidator::validate_document(&catalog)?;
        let mut content = serde_json::to_string_pretty(&catalog)?;
        content.push('\n');

        self.backup_current().await?;
        self.replace_document(&content).await?;
        Ok(catalog)
    }

    async fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        let mut backups = Vec::new();
        for filename in self.backup_names().await? {
            let metadata = fs::metadata(self.backups_dir.join(&filename)).await?;
            backups.push(BackupInfo {
                timestamp: Self::display_timestamp(&filename),
                size: metadata.len(),
                filename,
            });
        }
        Ok(backups)
    }

    async fn restore(&self, filename: &str) -> Result<()> {
        validate_backup_filename(filename)?;
        let path = self.backups_dir.join(filename);

        let content = Self::read_checked(&path, "Backup")
            .await?
            .ok_or_else(|| QuoteError::BackupNotFound {
                filename: filename.to_string(),
            })?;
        let catalog = Self::parse_document(&path, &content)?;
        self.write(catalog, Some(RESTORE_AUTHOR)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> JsonCatalogStore {
        JsonCatalogStore::new(
            dir.path().join("data").join("product-catalog.json"),
            dir.path().join("data").join("catalog-backups"),
        )
    }

    #[tokio::test]
    async fn test_read_missing_document_returns_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let catalog = store_in(&dir).read().await.unwrap();
        assert!(catalog.models.is_empty());
        assert_eq!(catalog.metadata.version, "1.0.0");
        assert_eq!(catalog.metadata.updated_by.as_deref(), Some("system"));
    }

    #[tokio::test]
    async fn test_read_corrupt_document_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::create_dir_all(dir.path().join("data")).unwrap();
        std::fs::write(store.catalog_path(), "{ not json").unwrap();

        let error = store.read().await.unwrap_err();
        assert!(error.to_string().contains("could not be parsed"));
    }

    #[tokio::test]
    async fn test_write_stamps_metadata_and_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let written = store
            .write(ProductCatalog::builtin().unwrap(), Some("alice"))
            .await
            .unwrap();
        assert_eq!(written.metadata.updated_by.as_deref(), Some("alice"));

        let read = store.read().await.unwrap();
        assert_eq!(read, written);
        assert!(!dir.path().join("data/product-catalog.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_defaults_author_to_system() {
        let dir = TempDir::new().unwrap();
        let written = store_in(&dir)
            .write(ProductCatalog::empty(), None)
            .await
            .unwrap();
        assert_eq!(written.metadata.updated_by.as_deref(), Some("system"));
    }

    #[tokio::test]
    async fn test_write_rejects_invalid_catalog() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut catalog = ProductCatalog::builtin().unwrap();
        catalog.sms_models[0].sku = catalog.io_modules[0].sku.clone();

        assert!(store.write(catalog, None).await.is_err());
        assert!(!store.catalog_path().exists());
    }

    #[tokio::test]
    async fn test_first_write_creates_no_backup() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store.write(ProductCatalog::empty(), None).await.unwrap();
        assert!(store.list_backups().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_backups_are_pruned_to_limit() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir).with_max_backups(2);

        for _ in 0..5 {
            store.write(ProductCatalog::empty(), None).await.unwrap();
        }

        let backups = store.list_backups().await.unwrap();
        assert_eq!(backups.len(), 2);
        assert!(backups[0].filename > backups[1].filename);
        assert!(backups.iter().all(|b| b.filename.starts_with("catalog-")));
        assert!(backups[0].timestamp.ends_with(" UTC"));
        assert!(backups[0].size > 0);
    }

    #[tokio::test]
    async fn test_restore_brings_back_previous_document() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .write(ProductCatalog::builtin().unwrap(), None)
            .await
            .unwrap();
        store.write(ProductCatalog::empty(), None).await.unwrap();
        assert!(store.read().await.unwrap().models.is_empty());

        let backups = store.list_backups().await.unwrap();
        store.restore(&backups[0].filename).await.unwrap();

        let restored = store.read().await.unwrap();
        assert_eq!(restored.models.len(), 3);
        assert_eq!(restored.metadata.updated_by.as_deref(), Some("restore"));
    }

    #[tokio::test]
    async fn test_restore_rejects_traversal_and_missing_files() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let error = store.restore("../product-catalog.json").await.unwrap_err();
        assert!(error.to_string().contains("Security violation"));

        let error = store
            .restore("catalog-2020-01-01T00-00-00-000Z.json")
            .await
            .unwrap_err();
        assert!(error.to_string().contains("Backup not found"));
    }

    #[tokio::test]
    async fn test_export_import_preserves_collections() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .write(ProductCatalog::builtin().unwrap(), None)
            .await
            .unwrap();

        let exported = store.export().await.unwrap();
        let imported = store.import(&exported, Some("bob")).await.unwrap();
        let original = ProductCatalog::builtin().unwrap();

        assert_eq!(imported.models, original.models);
        assert_eq!(imported.io_modules, original.io_modules);
        assert_eq!(imported.licenses, original.licenses);
        assert_eq!(imported.sms_models, original.sms_models);
    }

    #[test]
    fn test_backup_filename_format() {
        let at = DateTime::parse_from_rfc3339("2024-03-05T10:20:30.123Z")
            .unwrap()
            .with_timezone(&Utc);
        let name = JsonCatalogStore::backup_filename(at);
        assert_eq!(name, "catalog-2024-03-05T10-20-30-123Z.json");
        assert_eq!(
            JsonCatalogStore::display_timestamp(&name),
            "2024-03-05 10:20:30 UTC"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlinked_catalog_is_rejected() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("real.json");
        std::fs::write(&target, "{}").unwrap();
        let link = dir.path().join("product-catalog.json");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let store = JsonCatalogStore::new(link, dir.path().join("backups"));
        let error = store.read().await.unwrap_err();
        assert!(error.to_string().contains("symbolic link"));
    }
}
