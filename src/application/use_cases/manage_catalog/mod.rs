use crate::ports::inbound::{
    CatalogAdminPort, CatalogRecord, ModelFilter, RecordFilter, RecordKind,
};
use crate::ports::outbound::{BackupInfo, CatalogRepository, ProgressReporter};
use crate::quoting::domain::{CatalogStats, License, ProductCatalog};
use crate::quoting::policies::CompatibilityTable;
use crate::quoting::services::{CatalogValidator, CompatibilityResolver, RecordRef};
use crate::shared::error::{CatalogError, QuoteError};
use crate::shared::Result;
use async_trait::async_trait;

/// ManageCatalogUseCase - catalog administration behind the CLI
///
/// Each mutation reads the whole catalog, applies one validated change
/// and writes it back through the repository, which keeps a backup of
/// the previous document.
///
/// # Type Parameters
/// * `REPO` - CatalogRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct ManageCatalogUseCase<REPO, PR> {
    catalog_repository: REPO,
    progress_reporter: PR,
    table: CompatibilityTable,
    updated_by: Option<String>,
}

impl<REPO, PR> ManageCatalogUseCase<REPO, PR>
where
    REPO: CatalogRepository,
    PR: ProgressReporter + Send + Sync,
{
    /// Creates a new ManageCatalogUseCase
    ///
    /// # Arguments
    /// * `updated_by` - Author stamped on every write; `None` records `system`
    pub fn new(
        catalog_repository: REPO,
        progress_reporter: PR,
        table: CompatibilityTable,
        updated_by: Option<String>,
    ) -> Self {
        Self {
            catalog_repository,
            progress_reporter,
            table,
            updated_by,
        }
    }

    async fn store(&self, catalog: ProductCatalog) -> Result<ProductCatalog> {
        self.catalog_repository
            .write(catalog, self.updated_by.as_deref())
            .await
    }

    fn matches_search(record: &CatalogRecord, needle: &str) -> bool {
        let hit = |value: &str| value.to_lowercase().contains(needle);
        match record {
            CatalogRecord::Model(m) => hit(&m.name) || m.sku.as_deref().is_some_and(hit),
            CatalogRecord::IoModule(m) => hit(&m.name) || hit(&m.sku) || hit(&m.port_speed),
            CatalogRecord::License(l) => hit(&l.name) || hit(&l.sku),
            CatalogRecord::Sms(s) => hit(&s.name) || hit(&s.sku),
        }
    }

    fn matches_license_filter(record: &CatalogRecord, filter: &RecordFilter) -> bool {
        let CatalogRecord::License(license) = record else {
            return true;
        };
        let group_ok = filter.group.is_none_or(|g| license.is_in_group(g));
        let model_ok = match &filter.model {
            None => true,
            Some(ModelFilter::Unbound) => license.model_id.is_none(),
            Some(ModelFilter::Bound(id)) => license.is_bound_to(id),
        };
        group_ok && model_ok
    }

    fn records_of(catalog: ProductCatalog, kind: RecordKind) -> Vec<CatalogRecord> {
        match kind {
            RecordKind::Model => catalog.models.into_iter().map(CatalogRecord::Model).collect(),
            RecordKind::IoModule => catalog
                .io_modules
                .into_iter()
                .map(CatalogRecord::IoModule)
                .collect(),
            RecordKind::License => catalog
                .licenses
                .into_iter()
                .map(CatalogRecord::License)
                .collect(),
            RecordKind::Sms => catalog.sms_models.into_iter().map(CatalogRecord::Sms).collect(),
        }
    }

    fn not_found(kind: RecordKind, key: String) -> CatalogError {
        CatalogError::RecordNotFound {
            kind: kind.label(),
            key,
        }
    }

    fn model_index(
        catalog: &ProductCatalog,
        id: &str,
    ) -> std::result::Result<usize, CatalogError> {
        catalog
            .models
            .iter()
            .position(|m| m.id == id)
            .ok_or_else(|| Self::not_found(RecordKind::Model, format!("ID {}", id)))
    }

    fn module_index(
        catalog: &ProductCatalog,
        sku: &str,
    ) -> std::result::Result<usize, CatalogError> {
        catalog
            .io_modules
            .iter()
            .position(|m| m.sku == sku)
            .ok_or_else(|| Self::not_found(RecordKind::IoModule, format!("SKU {}", sku)))
    }

    fn sms_index(
        catalog: &ProductCatalog,
        sku: &str,
    ) -> std::result::Result<usize, CatalogError> {
        catalog
            .sms_models
            .iter()
            .position(|s| s.sku == sku)
            .ok_or_else(|| Self::not_found(RecordKind::Sms, format!("SKU {}", sku)))
    }

    /// Finds a license record by SKU and bound model.
    ///
    /// Without a model the SKU must identify a single record, or an
    /// unbound one when the SKU is listed several times.
    fn license_index(catalog: &ProductCatalog, sku: &str, model_id: Option<&str>) -> Result<usize> {
        if let Some(id) = model_id {
            return catalog
                .licenses
                .iter()
                .position(|l| l.sku == sku && l.is_bound_to(id))
                .ok_or_else(|| {
                    Self::not_found(RecordKind::License, format!("SKU {} (model {})", sku, id))
                        .into()
                });
        }

        let candidates: Vec<usize> = catalog
            .licenses
            .iter()
            .enumerate()
            .filter(|(_, l)| l.sku == sku)
            .map(|(i, _)| i)
            .collect();
        if let Some(&unbound) = candidates
            .iter()
            .find(|&&i| catalog.licenses[i].model_id.is_none())
        {
            return Ok(unbound);
        }
        match candidates.as_slice() {
            [] => Err(Self::not_found(RecordKind::License, format!("SKU {}", sku)).into()),
            [only] => Ok(*only),
            many => {
                let models: Vec<&str> = many
                    .iter()
                    .filter_map(|&i| catalog.licenses[i].model_id.as_deref())
                    .collect();
                Err(QuoteError::Validation {
                    message: format!(
                        "License SKU {} is listed for several models ({}). Pass --model-id to choose one",
                        sku,
                        models.join(", ")
                    ),
                }
                .into())
            }
        }
    }

    fn check_license(&self, catalog: &ProductCatalog, license: &License, replacing: Option<RecordRef<'_>>) -> Result<()> {
        CatalogValidator::validate_license(license)?;
        CatalogValidator::ensure_license_binding(catalog, &self.table, license)?;
        CatalogValidator::ensure_sku_available(
            catalog,
            RecordRef::License(license.key()),
            &license.sku,
            replacing,
        )?;
        Ok(())
    }
}

#[async_trait]
impl<REPO, PR> CatalogAdminPort for ManageCatalogUseCase<REPO, PR>
where
    REPO: CatalogRepository,
    PR: ProgressReporter + Send + Sync,
{
    async fn catalog(&self) -> Result<ProductCatalog> {
        self.catalog_repository.read().await
    }

    async fn list_records(
        &self,
        kind: RecordKind,
        filter: &RecordFilter,
    ) -> Result<Vec<CatalogRecord>> {
        let catalog = self.catalog_repository.read().await?;
        let needle = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);

        Ok(Self::records_of(catalog, kind)
            .into_iter()
            .filter(|r| needle.as_deref().is_none_or(|n| Self::matches_search(r, n)))
            .filter(|r| Self::matches_license_filter(r, filter))
            .collect())
    }

    async fn add_record(&self, record: CatalogRecord) -> Result<()> {
        let mut catalog = self.catalog_repository.read().await?;
        let label = format!("{} {}", record.kind(), record.display_key());

        match record {
            CatalogRecord::Model(model) => {
                CatalogValidator::validate_model(&model)?;
                if catalog.find_model(&model.id).is_some() {
                    return Err(CatalogError::DuplicateModelId { id: model.id }.into());
                }
                if let Some(sku) = model.sku.as_deref() {
                    CatalogValidator::ensure_sku_available(
                        &catalog,
                        RecordRef::Model(&model.id),
                        sku,
                        None,
                    )?;
                }
                catalog.models.push(model);
            }
            CatalogRecord::IoModule(module) => {
                CatalogValidator::validate_module(&module)?;
                CatalogValidator::ensure_sku_available(
                    &catalog,
                    RecordRef::IoModule(&module.sku),
                    &module.sku,
                    None,
                )?;
                catalog.io_modules.push(module);
            }
            CatalogRecord::License(license) => {
                self.check_license(&catalog, &license, None)?;
                catalog.licenses.push(license);
            }
            CatalogRecord::Sms(sms) => {
                CatalogValidator::validate_sms(&sms)?;
                CatalogValidator::ensure_sku_available(
                    &catalog,
                    RecordRef::Sms(&sms.sku),
                    &sms.sku,
                    None,
                )?;
                catalog.sms_models.push(sms);
            }
        }

        self.store(catalog).await?;
        self.progress_reporter
            .report_completion(&format!("✅ {} added", label));
        Ok(())
    }

    async fn update_record(
        &self,
        record: CatalogRecord,
        license_model_id: Option<&str>,
    ) -> Result<()> {
        let mut catalog = self.catalog_repository.read().await?;
        let label = format!("{} {}", record.kind(), record.display_key());

        match record {
            CatalogRecord::Model(model) => {
                let index = Self::model_index(&catalog, &model.id)?;
                CatalogValidator::validate_model(&model)?;
                if let Some(sku) = model.sku.as_deref() {
                    CatalogValidator::ensure_sku_available(
                        &catalog,
                        RecordRef::Model(&model.id),
                        sku,
                        Some(RecordRef::Model(&model.id)),
                    )?;
                }
                catalog.models[index] = model;
            }
            CatalogRecord::IoModule(module) => {
                let index = Self::module_index(&catalog, &module.sku)?;
                CatalogValidator::validate_module(&module)?;
                catalog.io_modules[index] = module;
            }
            CatalogRecord::License(license) => {
                let index = match license_model_id {
                    Some(id) => Self::license_index(&catalog, &license.sku, Some(id))?,
                    None => Self::license_index(&catalog, &license.sku, license.model_id.as_deref())
                        .or_else(|_| Self::license_index(&catalog, &license.sku, None))?,
                };
                let replacing = RecordRef::License(catalog.licenses[index].key());
                self.check_license(&catalog, &license, Some(replacing))?;
                catalog.licenses[index] = license;
            }
            CatalogRecord::Sms(sms) => {
                let index = Self::sms_index(&catalog, &sms.sku)?;
                CatalogValidator::validate_sms(&sms)?;
                catalog.sms_models[index] = sms;
            }
        }

        self.store(catalog).await?;
        self.progress_reporter
            .report_completion(&format!("✅ {} updated", label));
        Ok(())
    }

    async fn change_license_sku(
        &self,
        sku: &str,
        license_model_id: Option<&str>,
        new_sku: &str,
    ) -> Result<License> {
        let mut catalog = self.catalog_repository.read().await?;
        let index = Self::license_index(&catalog, sku, license_model_id)?;

        let mut license = catalog.licenses[index].clone();
        let previous_model = license.model_id.take();
        license.model_id = CompatibilityResolver::new(&self.table)
            .license_model_after_sku_change(new_sku, previous_model.as_deref());
        license.sku = new_sku.to_string();

        let replacing = RecordRef::License(catalog.licenses[index].key());
        self.check_license(&catalog, &license, Some(replacing))?;

        if let (Some(model_id), None) = (previous_model.as_deref(), license.model_id.as_deref()) {
            self.progress_reporter.report_error(&format!(
                "⚠️  Warning: License {} is not sold with model {}; model binding cleared",
                new_sku, model_id
            ));
        }

        catalog.licenses[index] = license.clone();
        self.store(catalog).await?;
        self.progress_reporter
            .report_completion(&format!("✅ License {} is now {}", sku, license.key()));
        Ok(license)
    }

    async fn remove_record(
        &self,
        kind: RecordKind,
        key: &str,
        license_model_id: Option<&str>,
    ) -> Result<CatalogRecord> {
        let mut catalog = self.catalog_repository.read().await?;

        let removed = match kind {
            RecordKind::Model => {
                let index = Self::model_index(&catalog, key)?;
                CatalogValidator::ensure_model_removable(&catalog, key)?;
                CatalogRecord::Model(catalog.models.remove(index))
            }
            RecordKind::IoModule => {
                let index = Self::module_index(&catalog, key)?;
                CatalogRecord::IoModule(catalog.io_modules.remove(index))
            }
            RecordKind::License => {
                let index = Self::license_index(&catalog, key, license_model_id)?;
                CatalogRecord::License(catalog.licenses.remove(index))
            }
            RecordKind::Sms => {
                let index = Self::sms_index(&catalog, key)?;
                CatalogRecord::Sms(catalog.sms_models.remove(index))
            }
        };

        self.store(catalog).await?;
        self.progress_reporter.report_completion(&format!(
            "🗑️  {} {} removed",
            removed.kind(),
            removed.display_key()
        ));
        Ok(removed)
    }

    async fn seed(&self) -> Result<CatalogStats> {
        self.progress_reporter
            .report("🌱 Seeding the catalog with the built-in TXE product data...");
        let stored = self.store(ProductCatalog::builtin()?).await?;
        Ok(stored.stats())
    }

    async fn export(&self) -> Result<String> {
        self.catalog_repository.export().await
    }

    async fn import(&self, content: &str) -> Result<CatalogStats> {
        self.progress_reporter.report("📥 Importing catalog document...");
        let stored = self
            .catalog_repository
            .import(content, self.updated_by.as_deref())
            .await?;
        Ok(stored.stats())
    }

    async fn backups(&self) -> Result<Vec<BackupInfo>> {
        self.catalog_repository.list_backups().await
    }

    async fn restore(&self, filename: &str) -> Result<()> {
        self.catalog_repository.restore(filename).await?;
        self.progress_reporter
            .report_completion(&format!("✅ Catalog restored from {}", filename));
        Ok(())
    }
}
