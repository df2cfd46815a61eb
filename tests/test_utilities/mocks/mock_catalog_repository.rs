use std::sync::{Arc, Mutex};
use txe_quote::ports::outbound::BackupInfo;
use txe_quote::prelude::*;
use txe_quote::quoting::services::CatalogValidator;

/// Mock CatalogRepository keeping the document and its backups in memory
///
/// Clones share state, so a test can keep a handle for assertions after
/// moving the repository into a use case.
#[derive(Clone)]
pub struct MockCatalogRepository {
    catalog: Arc<Mutex<ProductCatalog>>,
    backups: Arc<Mutex<Vec<(String, ProductCatalog)>>>,
    pub should_fail: bool,
}

impl MockCatalogRepository {
    pub fn new(catalog: ProductCatalog) -> Self {
        Self {
            catalog: Arc::new(Mutex::new(catalog)),
            backups: Arc::new(Mutex::new(Vec::new())),
            should_fail: false,
        }
    }

    pub fn builtin() -> Self {
        Self::new(ProductCatalog::builtin().unwrap())
    }

    pub fn empty() -> Self {
        Self::new(ProductCatalog::empty())
    }

    pub fn with_failure() -> Self {
        Self {
            should_fail: true,
            ..Self::empty()
        }
    }

    pub fn current(&self) -> ProductCatalog {
        self.catalog.lock().unwrap().clone()
    }

    pub fn backup_count(&self) -> usize {
        self.backups.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl CatalogRepository for MockCatalogRepository {
    async fn read(&self) -> Result<ProductCatalog> {
        if self.should_fail {
            anyhow::bail!("Mock catalog read failure");
        }
        Ok(self.current())
    }

    async fn write(
        &self,
        catalog: ProductCatalog,
        updated_by: Option<&str>,
    ) -> Result<ProductCatalog> {
        if self.should_fail {
            anyhow::bail!("Mock catalog write failure");
        }
        CatalogValidator::validate_document(&catalog)?;

        let mut catalog = catalog;
        catalog.metadata.updated_by = Some(updated_by.unwrap_or("system").to_string());

        let mut backups = self.backups.lock().unwrap();
        let filename = format!("catalog-{:04}.json", backups.len());
        backups.insert(0, (filename, self.current()));
        *self.catalog.lock().unwrap() = catalog.clone();
        Ok(catalog)
    }

    async fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        Ok(self
            .backups
            .lock()
            .unwrap()
            .iter()
            .map(|(filename, _)| BackupInfo {
                filename: filename.clone(),
                timestamp: "2024-01-01 00:00:00 UTC".to_string(),
                size: 0,
            })
            .collect())
    }

    async fn restore(&self, filename: &str) -> Result<()> {
        let backup = self
            .backups
            .lock()
            .unwrap()
            .iter()
            .find(|(name, _)| name == filename)
            .map(|(_, catalog)| catalog.clone());
        match backup {
            Some(catalog) => {
                self.write(catalog, Some("restore")).await?;
                Ok(())
            }
            None => anyhow::bail!("Backup not found: {}", filename),
        }
    }
}
