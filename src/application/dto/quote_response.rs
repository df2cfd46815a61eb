use crate::quoting::domain::{Configuration, ProductCatalog, QuoteLine, QuoteMetadata};

/// QuoteResponse - Internal response DTO from the quote generation use case
///
/// Carries the configurations as they ended up after the cascade, the
/// flattened lines, and the catalog they were priced against so adapters
/// can resolve display names.
#[derive(Debug, Clone)]
pub struct QuoteResponse {
    pub configurations: Vec<Configuration>,
    pub lines: Vec<QuoteLine>,
    pub metadata: QuoteMetadata,
    pub catalog: ProductCatalog,
    /// Per-configuration compatibility findings, already reported as warnings
    pub warnings: Vec<String>,
}

impl QuoteResponse {
    pub fn new(
        configurations: Vec<Configuration>,
        lines: Vec<QuoteLine>,
        metadata: QuoteMetadata,
        catalog: ProductCatalog,
        warnings: Vec<String>,
    ) -> Self {
        Self {
            configurations,
            lines,
            metadata,
            catalog,
            warnings,
        }
    }
}
