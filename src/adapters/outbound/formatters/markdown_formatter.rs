use crate::application::read_models::{ConfigurationView, QuoteReadModel};
use crate::ports::outbound::QuoteFormatter;
use crate::quoting::domain::QuoteLine;
use crate::shared::Result;

/// Markdown table header for configuration summaries
const CONFIG_TABLE_HEADER: &str =
    "| # | Name | Model | Throughput | Inspection | ThreatDV | Slot 1 | Slot 2 | SMS |\n";

/// Markdown table separator line for configuration summaries
const CONFIG_TABLE_SEPARATOR: &str =
    "|---|------|-------|------------|------------|----------|--------|--------|-----|\n";

/// Markdown table header for quote lines
const LINE_TABLE_HEADER: &str = "| SKU | Description | Qty | Config ID |\n";

/// Markdown table separator line for quote lines
const LINE_TABLE_SEPARATOR: &str = "|-----|-------------|----:|----------:|\n";

/// MarkdownFormatter adapter for a human-readable quote
///
/// Renders quote metadata, one summary row per configuration and the
/// bill of materials.
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_markdown_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    fn cell(value: Option<&str>) -> String {
        value.map_or_else(|| "-".to_string(), Self::escape_markdown_table_cell)
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper methods for rendering sections
impl MarkdownFormatter {
    fn render_header(&self, output: &mut String, model: &QuoteReadModel) {
        let metadata = &model.metadata;
        output.push_str("# TippingPoint TXE Quote\n\n");
        output.push_str(&format!("- Quote ID: `{}`\n", metadata.quote_id));
        output.push_str(&format!("- Created: {}\n", metadata.timestamp));
        output.push_str(&format!("- Catalog version: {}\n", metadata.catalog_version));
        output.push_str(&format!(
            "- Generated by: {} {}\n\n",
            metadata.tool_name, metadata.tool_version
        ));
    }

    fn render_configurations(&self, output: &mut String, configurations: &[ConfigurationView]) {
        output.push_str("## Configurations\n\n");
        if configurations.is_empty() {
            output.push_str("No configurations requested.\n\n");
            return;
        }

        output.push_str(CONFIG_TABLE_HEADER);
        output.push_str(CONFIG_TABLE_SEPARATOR);
        for config in configurations {
            let slot = |index: usize| Self::cell(config.slots.get(index).and_then(|s| s.as_deref()));
            output.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} | {} | {} |\n",
                config.config_id,
                Self::escape_markdown_table_cell(&config.name),
                Self::cell(config.model.as_deref()),
                Self::cell(config.throughput.as_deref()),
                Self::cell(config.inspect_license.as_deref()),
                Self::cell(config.threatdv_license.as_deref()),
                slot(0),
                slot(1),
                Self::cell(config.sms.as_deref()),
            ));
        }
        output.push('\n');
    }

    fn render_lines(&self, output: &mut String, lines: &[QuoteLine]) {
        output.push_str("## Bill of Materials\n\n");
        if lines.is_empty() {
            output.push_str("The quote is empty.\n\n");
            return;
        }

        output.push_str(LINE_TABLE_HEADER);
        output.push_str(LINE_TABLE_SEPARATOR);
        for line in lines {
            output.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                Self::escape_markdown_table_cell(&line.part),
                Self::escape_markdown_table_cell(&line.description),
                line.qty,
                line.config_id.map_or_else(|| "—".to_string(), |id| id.to_string()),
            ));
        }
        output.push('\n');
    }

    fn render_warnings(&self, output: &mut String, warnings: &[String]) {
        output.push_str("## Warnings\n\n");
        for warning in warnings {
            output.push_str(&format!("- {}\n", Self::escape_markdown_table_cell(warning)));
        }
        output.push('\n');
    }
}

impl QuoteFormatter for MarkdownFormatter {
    fn format(&self, model: &QuoteReadModel) -> Result<String> {
        let mut output = String::new();

        self.render_header(&mut output, model);
        self.render_configurations(&mut output, &model.configurations);
        self.render_lines(&mut output, &model.lines);
        if !model.warnings.is_empty() {
            self.render_warnings(&mut output, &model.warnings);
        }

        Ok(output)
    }
}
