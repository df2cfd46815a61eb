//! Builder for constructing QuoteReadModel from a use case response

use super::quote_read_model::{ConfigurationView, QuoteMetadataView, QuoteReadModel};
use crate::application::dto::QuoteResponse;
use crate::quoting::domain::{Configuration, LicenseGroup, ProductCatalog, QuoteMetadata};

/// Builder for constructing QuoteReadModel from domain objects
pub struct QuoteReadModelBuilder;

impl QuoteReadModelBuilder {
    /// Builds a QuoteReadModel from a quote response
    ///
    /// # Arguments
    /// * `response` - Configurations, lines and the catalog they were built from
    ///
    /// # Returns
    /// A fully constructed QuoteReadModel
    pub fn build(response: &QuoteResponse) -> QuoteReadModel {
        QuoteReadModel {
            metadata: Self::build_metadata(&response.metadata),
            configurations: response
                .configurations
                .iter()
                .enumerate()
                .map(|(index, config)| Self::build_configuration(&response.catalog, config, index + 1))
                .collect(),
            lines: response.lines.clone(),
            warnings: response.warnings.clone(),
        }
    }

    fn build_metadata(metadata: &QuoteMetadata) -> QuoteMetadataView {
        QuoteMetadataView {
            timestamp: metadata.timestamp().to_string(),
            tool_name: metadata.tool_name().to_string(),
            tool_version: metadata.tool_version().to_string(),
            quote_id: metadata.quote_id().to_string(),
            catalog_version: metadata.catalog_version().to_string(),
        }
    }

    fn build_configuration(
        catalog: &ProductCatalog,
        config: &Configuration,
        config_id: usize,
    ) -> ConfigurationView {
        let model_id = config.model_id.as_deref();
        let model = model_id.and_then(|id| catalog.find_model(id));

        let throughput = config.throughput_gbps.map(|gbps| {
            model
                .and_then(|m| m.tiers.iter().find(|t| t.gbps == gbps))
                .map(|t| t.label.clone())
                .unwrap_or_else(|| format!("{} Gbps", gbps))
        });

        let license_name = |group: LicenseGroup| {
            config.licenses.get(group).map(|sku| {
                catalog
                    .find_license(sku, model_id)
                    .map_or_else(|| sku.to_string(), |l| l.name.clone())
            })
        };

        ConfigurationView {
            config_id,
            id: config.id.clone(),
            name: config.name.clone(),
            model: model_id.map(|id| model.map_or_else(|| id.to_string(), |m| m.name.clone())),
            throughput,
            inspect_license: license_name(LicenseGroup::Inspect),
            threatdv_license: license_name(LicenseGroup::ThreatDv),
            slots: config
                .slots
                .iter()
                .map(|slot| {
                    slot.module_sku.as_deref().map(|sku| {
                        catalog
                            .find_module(sku)
                            .map_or_else(|| sku.to_string(), |m| m.name.clone())
                    })
                })
                .collect(),
            sms: config.sms_sku.as_deref().map(|sku| {
                catalog
                    .find_sms(sku)
                    .map_or_else(|| sku.to_string(), |s| s.name.clone())
            }),
        }
    }
}
