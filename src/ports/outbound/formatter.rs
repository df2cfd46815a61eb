use crate::application::read_models::QuoteReadModel;
use crate::shared::Result;

/// QuoteFormatter port for formatting quote output
///
/// This port abstracts the formatting logic for different quote layouts
/// (JSON, Markdown, plain-text table).
pub trait QuoteFormatter {
    /// Formats a quote using the read model
    ///
    /// # Arguments
    /// * `model` - The quote read model containing metadata, configuration
    ///   summaries and lines
    ///
    /// # Returns
    /// Formatted quote content as a string
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, model: &QuoteReadModel) -> Result<String>;
}
