use crate::quoting::domain::QuoteMetadata;
use chrono::Utc;
use uuid::Uuid;

/// Tool name stamped on generated quotes
pub const TOOL_NAME: &str = "txe-quote";

/// QuoteMetadataGenerator service for generating quote metadata
///
/// Produces the RFC 3339 generation time and a unique quote id.
pub struct QuoteMetadataGenerator;

impl QuoteMetadataGenerator {
    /// Generates quote metadata with current timestamp and unique quote id
    ///
    /// # Arguments
    /// * `tool_name` - Name of the tool generating the quote
    /// * `tool_version` - Version of the tool
    /// * `catalog_version` - Version field of the catalog the quote was priced from
    pub fn generate_metadata(
        tool_name: &str,
        tool_version: &str,
        catalog_version: &str,
    ) -> QuoteMetadata {
        let timestamp = Utc::now().to_rfc3339();
        let quote_id = format!("urn:uuid:{}", Uuid::new_v4());

        QuoteMetadata::new(
            timestamp,
            tool_name.to_string(),
            tool_version.to_string(),
            quote_id,
            catalog_version.to_string(),
        )
    }

    /// Generates quote metadata with this tool's name and compile-time version
    pub fn generate_default_metadata(catalog_version: &str) -> QuoteMetadata {
        Self::generate_metadata(TOOL_NAME, env!("CARGO_PKG_VERSION"), catalog_version)
    }
}
