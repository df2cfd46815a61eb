/// Formatter adapters for the supported quote layouts and admin listings
mod catalog_text_formatter;
mod json_formatter;
mod markdown_formatter;
mod table_formatter;

pub use catalog_text_formatter::CatalogTextFormatter;
pub use json_formatter::JsonFormatter;
pub use markdown_formatter::MarkdownFormatter;
pub use table_formatter::TableFormatter;
