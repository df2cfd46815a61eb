use crate::application::dto::{ConfigurationRequest, QuoteRequest, QuoteResponse, SmsChoice};
use crate::ports::outbound::{CatalogRepository, ProgressReporter};
use crate::quoting::domain::{Configuration, LicenseGroup, ProductCatalog};
use crate::quoting::policies::CompatibilityTable;
use crate::quoting::services::{
    CompatibilityResolver, ConfigurationCascade, ConfigurationSession, QuoteBuilder,
    QuoteMetadataGenerator,
};
use crate::shared::Result;

/// GenerateQuoteUseCase - Core use case for quote generation
///
/// Replays each requested configuration through the selection cascade the
/// same way an operator would pick it, then flattens the session into
/// quote lines.
///
/// # Type Parameters
/// * `REPO` - CatalogRepository implementation
/// * `PR` - ProgressReporter implementation
pub struct GenerateQuoteUseCase<REPO, PR> {
    catalog_repository: REPO,
    progress_reporter: PR,
    table: CompatibilityTable,
}

impl<REPO, PR> GenerateQuoteUseCase<REPO, PR>
where
    REPO: CatalogRepository,
    PR: ProgressReporter,
{
    /// Creates a new GenerateQuoteUseCase with injected dependencies
    pub fn new(catalog_repository: REPO, progress_reporter: PR, table: CompatibilityTable) -> Self {
        Self {
            catalog_repository,
            progress_reporter,
            table,
        }
    }

    /// Executes the quote generation use case
    ///
    /// # Arguments
    /// * `request` - Configurations to build, in quote order
    ///
    /// # Returns
    /// QuoteResponse with the resulting configurations, lines and metadata.
    /// Picks that do not fit a configuration are dropped and reported as
    /// warnings rather than failing the quote.
    ///
    /// # Errors
    /// Returns an error if the catalog cannot be read
    pub async fn execute(&self, request: QuoteRequest) -> Result<QuoteResponse> {
        self.progress_reporter.report("📖 Loading product catalog...");
        let catalog = self.catalog_repository.read().await?;

        let stats = catalog.stats();
        self.progress_reporter.report(&format!(
            "✅ Catalog {} loaded: {} model(s), {} module(s), {} license(s), {} SMS model(s)",
            catalog.metadata.version,
            stats.models,
            stats.io_modules,
            stats.licenses,
            stats.sms_models
        ));
        if catalog.models.is_empty() {
            self.progress_reporter.report_error(
                "⚠️  Warning: The catalog has no models. Run `txe-quote catalog seed` to load the TXE product data.",
            );
        }

        let resolver = CompatibilityResolver::new(&self.table);
        let mut session = ConfigurationSession::new();
        let mut warnings = Vec::new();
        let total = request.configurations.len();

        self.progress_reporter
            .report(&format!("🔧 Building {} configuration(s)...", total));

        for (index, entry) in request.configurations.iter().enumerate() {
            let config = session.add(&catalog);
            let dropped = Self::apply_request(&resolver, &catalog, config, entry);
            self.progress_reporter
                .report_progress(index + 1, total, Some(&config.name));
            warnings.extend(dropped.into_iter().map(|w| format!("{}: {}", config.name, w)));
        }

        for config in session.configurations() {
            warnings.extend(
                resolver
                    .configuration_issues(&catalog, config)
                    .into_iter()
                    .map(|issue| format!("{}: {}", config.name, issue)),
            );
        }
        for warning in &warnings {
            self.progress_reporter
                .report_error(&format!("⚠️  Warning: {}", warning));
        }

        let configurations = session.into_configurations();
        let lines = QuoteBuilder::build_quote_lines(&catalog, &self.table, &configurations);
        if lines.is_empty() {
            self.progress_reporter.report_error(
                "⚠️  Warning: The quote is empty. Request at least one configuration with a model.",
            );
        } else {
            self.progress_reporter
                .report(&format!("✅ Quote built with {} line(s)", lines.len()));
        }

        let metadata = QuoteMetadataGenerator::generate_default_metadata(&catalog.metadata.version);
        Ok(QuoteResponse::new(
            configurations,
            lines,
            metadata,
            catalog,
            warnings,
        ))
    }

    /// Applies one request entry in cascade order: name, model, throughput,
    /// licenses, slots, SMS. Returns the picks that were dropped.
    fn apply_request(
        resolver: &CompatibilityResolver<'_>,
        catalog: &ProductCatalog,
        config: &mut Configuration,
        entry: &ConfigurationRequest,
    ) -> Vec<String> {
        let mut dropped = Vec::new();

        if let Some(name) = entry.name.as_deref().filter(|n| !n.trim().is_empty()) {
            ConfigurationCascade::rename(config, name);
        }

        if let Some(model_id) = entry.model.as_deref() {
            if !ConfigurationCascade::select_model(config, catalog, Some(model_id)) {
                dropped.push(format!("unknown model {} ignored", model_id));
            }
        }

        if let Some(gbps) = entry.throughput {
            if !ConfigurationCascade::select_throughput(config, catalog, Some(gbps)) {
                dropped.push(format!(
                    "{} Gbps is not a throughput tier of {}; kept {}",
                    gbps,
                    config.model_id.as_deref().unwrap_or("the configuration"),
                    config
                        .throughput_gbps
                        .map_or_else(|| "none".to_string(), |g| format!("{} Gbps", g))
                ));
            }
        }

        if let Some(sku) = entry.inspect.as_deref() {
            Self::apply_license_pick(resolver, catalog, config, LicenseGroup::Inspect, sku, &mut dropped);
        }
        if let Some(sku) = entry.threatdv.as_deref() {
            Self::apply_license_pick(resolver, catalog, config, LicenseGroup::ThreatDv, sku, &mut dropped);
        }

        let modules = resolver.module_options(catalog, config.model_id.as_deref());
        for (index, pick) in entry.slots.iter().enumerate() {
            let Some(sku) = pick.as_deref() else {
                continue;
            };
            let slot = u8::try_from(index + 1).unwrap_or(u8::MAX);
            if !modules.contains(sku) {
                dropped.push(format!("module {} does not fit this chassis", sku));
            } else if !ConfigurationCascade::set_slot(config, slot, Some(sku.to_string())) {
                dropped.push(format!("slot {} does not exist; module {} ignored", slot, sku));
            }
        }

        match &entry.sms {
            Some(SmsChoice::Enabled(true)) => ConfigurationCascade::enable_sms(config, catalog),
            Some(SmsChoice::Enabled(false)) => ConfigurationCascade::set_sms(config, None),
            Some(SmsChoice::Sku(sku)) => match catalog.find_sms(sku) {
                Some(sms) => ConfigurationCascade::set_sms(config, Some(sms.sku.clone())),
                None => dropped.push(format!("unknown SMS model {} ignored", sku)),
            },
            None => {}
        }

        dropped
    }

    /// Applies a manual license pick if the picker would offer it.
    ///
    /// An empty SKU clears the pick. The ThreatDV list is narrowed to the
    /// ceiling of the chosen Inspection license.
    fn apply_license_pick(
        resolver: &CompatibilityResolver<'_>,
        catalog: &ProductCatalog,
        config: &mut Configuration,
        group: LicenseGroup,
        sku: &str,
        dropped: &mut Vec<String>,
    ) {
        if sku.is_empty() {
            config.licenses.set(group, None);
            return;
        }

        let model_id = config.model_id.as_deref();
        let inspect_ceiling = match group {
            LicenseGroup::Inspect => None,
            LicenseGroup::ThreatDv => config
                .licenses
                .inspect
                .as_deref()
                .and_then(|s| catalog.find_license(s, model_id))
                .map(|l| l.applies_to_gbps_max),
        };
        let offered = resolver
            .license_options(catalog, model_id, config.throughput_gbps, group, inspect_ceiling)
            .iter()
            .any(|l| l.sku == sku);

        if !offered {
            dropped.push(format!(
                "{} license {} is not offered for this selection",
                group, sku
            ));
            return;
        }

        match group {
            LicenseGroup::Inspect => {
                ConfigurationCascade::select_inspect_license(config, Some(sku.to_string()))
            }
            LicenseGroup::ThreatDv => {
                ConfigurationCascade::select_threatdv_license(config, Some(sku.to_string()))
            }
        }
    }
}
