use crate::application::dto::QuoteRequest;
use crate::shared::Result;
use std::path::Path;

/// QuoteRequestReader port for loading quote requests
///
/// This port abstracts where the list of requested configurations comes
/// from (a YAML or JSON file on disk in the CLI).
pub trait QuoteRequestReader {
    /// Reads and parses a quote request
    ///
    /// # Arguments
    /// * `path` - Location of the request document
    ///
    /// # Errors
    /// Returns an error if:
    /// - The file does not exist or cannot be read
    /// - The document is neither valid YAML nor JSON
    fn read_quote_request(&self, path: &Path) -> Result<QuoteRequest>;
}
