/// Outbound ports (Driven ports) - Infrastructure interfaces
///
/// These ports define the interfaces that the application core uses
/// to interact with external systems (file system, console, etc.).
pub mod catalog_repository;
pub mod formatter;
pub mod output_presenter;
pub mod progress_reporter;
pub mod quote_request_reader;

pub use catalog_repository::{BackupInfo, CatalogRepository};
pub use formatter::QuoteFormatter;
pub use output_presenter::OutputPresenter;
pub use progress_reporter::ProgressReporter;
pub use quote_request_reader::QuoteRequestReader;
