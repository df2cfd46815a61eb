use crate::application::dto::{LicenseOption, ModuleOption, OptionsRequest, OptionsResponse};
use crate::ports::outbound::CatalogRepository;
use crate::quoting::domain::LicenseGroup;
use crate::quoting::policies::CompatibilityTable;
use crate::quoting::services::CompatibilityResolver;
use crate::shared::error::{CatalogError, QuoteError};
use crate::shared::Result;

/// ListOptionsUseCase - what the pickers offer for one chassis selection
///
/// # Type Parameters
/// * `REPO` - CatalogRepository implementation
pub struct ListOptionsUseCase<REPO> {
    catalog_repository: REPO,
    table: CompatibilityTable,
}

impl<REPO: CatalogRepository> ListOptionsUseCase<REPO> {
    pub fn new(catalog_repository: REPO, table: CompatibilityTable) -> Self {
        Self {
            catalog_repository,
            table,
        }
    }

    /// Lists modules and licenses admissible for the requested selection
    ///
    /// # Errors
    /// Returns an error if the model is not in the catalog, the throughput
    /// is not one of its tiers, or the catalog cannot be read
    pub async fn execute(&self, request: OptionsRequest) -> Result<OptionsResponse> {
        let catalog = self.catalog_repository.read().await?;
        let model = catalog
            .find_model(&request.model_id)
            .ok_or_else(|| CatalogError::RecordNotFound {
                kind: "Model",
                key: format!("ID {}", request.model_id),
            })?;

        let throughput = match request.throughput {
            Some(gbps) if !model.has_tier(gbps) => {
                let tiers: Vec<String> = model.tiers.iter().map(|t| t.gbps.to_string()).collect();
                return Err(QuoteError::Validation {
                    message: format!(
                        "{} Gbps is not a tier of {}. Available tiers: {}",
                        gbps,
                        model.id,
                        tiers.join(", ")
                    ),
                }
                .into());
            }
            Some(gbps) => Some(gbps),
            None => model.first_tier().map(|t| t.gbps),
        };

        let resolver = CompatibilityResolver::new(&self.table);
        let modules = resolver.module_options(&catalog, Some(&model.id));
        let inspect = resolver.license_options(
            &catalog,
            Some(&model.id),
            throughput,
            LicenseGroup::Inspect,
            None,
        );

        let inspect_ceiling = match request.inspect.as_deref() {
            Some(sku) => Some(
                inspect
                    .iter()
                    .find(|l| l.sku == sku)
                    .map(|l| l.applies_to_gbps_max)
                    .ok_or_else(|| QuoteError::Validation {
                        message: format!(
                            "Inspection license {} is not offered for {} at this throughput",
                            sku, model.id
                        ),
                    })?,
            ),
            None => None,
        };
        let threatdv = resolver.license_options(
            &catalog,
            Some(&model.id),
            throughput,
            LicenseGroup::ThreatDv,
            inspect_ceiling,
        );

        Ok(OptionsResponse {
            model_id: model.id.clone(),
            model_name: model.name.clone(),
            tiers: model.tiers.clone(),
            throughput,
            bypass_modules: modules.bypass.into_iter().map(ModuleOption::from).collect(),
            non_bypass_modules: modules
                .non_bypass
                .into_iter()
                .map(ModuleOption::from)
                .collect(),
            inspect_licenses: inspect.into_iter().map(LicenseOption::from).collect(),
            threatdv_licenses: threatdv.into_iter().map(LicenseOption::from).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outbound::BackupInfo;
    use crate::quoting::domain::ProductCatalog;
    use async_trait::async_trait;

    struct BuiltinRepository;

    #[async_trait]
    impl CatalogRepository for BuiltinRepository {
        async fn read(&self) -> Result<ProductCatalog> {
            ProductCatalog::builtin()
        }

        async fn write(
            &self,
            catalog: ProductCatalog,
            _updated_by: Option<&str>,
        ) -> Result<ProductCatalog> {
            Ok(catalog)
        }

        async fn list_backups(&self) -> Result<Vec<BackupInfo>> {
            Ok(Vec::new())
        }

        async fn restore(&self, _filename: &str) -> Result<()> {
            Ok(())
        }
    }

    fn use_case() -> ListOptionsUseCase<BuiltinRepository> {
        ListOptionsUseCase::new(BuiltinRepository, CompatibilityTable::builtin())
    }

    fn skus(options: &[LicenseOption]) -> Vec<&str> {
        options.iter().map(|o| o.sku.as_str()).collect()
    }

    #[tokio::test]
    async fn test_options_default_to_first_tier() {
        let response = use_case()
            .execute(OptionsRequest::new("txe-9200".to_string(), None, None))
            .await
            .unwrap();

        assert_eq!(response.throughput, Some(40.0));
        assert_eq!(response.model_name, "9200 TXE 100Gbps");
        assert_eq!(
            skus(&response.inspect_licenses),
            vec!["TPNN0280", "TPNN0397", "TPNN0398", "TPNN0399"]
        );
        assert_eq!(response.non_bypass_modules.len(), 2);
        assert!(response.bypass_modules.iter().all(|m| m.sku != "TPNN0410"));
    }

    #[tokio::test]
    async fn test_options_filter_by_throughput_and_inspect_ceiling() {
        let response = use_case()
            .execute(OptionsRequest::new(
                "txe-5600".to_string(),
                Some(3.0),
                Some("TPNN0276".to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(
            skus(&response.inspect_licenses),
            vec!["TPNN0275", "TPNN0276", "TPNN0277"]
        );
        assert_eq!(skus(&response.threatdv_licenses), vec!["TPNN0286"]);
    }

    #[tokio::test]
    async fn test_options_unknown_model() {
        let result = use_case()
            .execute(OptionsRequest::new("txe-1100".to_string(), None, None))
            .await;
        assert_eq!(
            result.unwrap_err().to_string(),
            "Model with ID txe-1100 not found"
        );
    }

    #[tokio::test]
    async fn test_options_off_tier_throughput() {
        let result = use_case()
            .execute(OptionsRequest::new("txe-8600".to_string(), Some(7.0), None))
            .await;
        let message = result.unwrap_err().to_string();
        assert!(message.contains("7 Gbps is not a tier of txe-8600"));
        assert!(message.contains("5, 10, 15, 20, 30, 40"));
    }

    #[tokio::test]
    async fn test_options_inspect_not_offered() {
        let result = use_case()
            .execute(OptionsRequest::new(
                "txe-5600".to_string(),
                Some(5.0),
                Some("TPNN0273".to_string()),
            ))
            .await;
        assert!(result.unwrap_err().to_string().contains("TPNN0273"));
    }
}
