//! txe-quote - configurator and quote builder for TippingPoint TXE appliances
//!
//! This library resolves which I/O modules and licenses fit a chassis,
//! keeps the dependent selections of each configuration consistent and
//! flattens a set of configurations into an ordered bill of materials.
//! It follows hexagonal architecture and Domain-Driven Design principles.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`quoting`): Catalog entities, compatibility rules and the quote engine
//! - **Application Layer** (`application`): Use cases, DTOs and read models
//! - **Ports** (`ports`): Interface definitions for infrastructure
//! - **Adapters** (`adapters`): Concrete implementations of ports
//! - **Shared** (`shared`): Common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use txe_quote::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<()> {
//! // Create adapters
//! let store = JsonCatalogStore::new(
//!     PathBuf::from("data/product-catalog.json"),
//!     PathBuf::from("data/catalog-backups"),
//! );
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case =
//!     GenerateQuoteUseCase::new(store, progress_reporter, CompatibilityTable::builtin());
//!
//! // Execute
//! let request = QuoteRequest::new(vec![ConfigurationRequest {
//!     model: Some("txe-8600".to_string()),
//!     throughput: Some(20.0),
//!     ..Default::default()
//! }]);
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let model = QuoteReadModelBuilder::build(&response);
//! println!("{}", TableFormatter::new().format(&model)?);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod config;
pub mod ports;
pub mod quoting;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, JsonCatalogStore, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{
        JsonFormatter, MarkdownFormatter, TableFormatter,
    };
    pub use crate::application::dto::{
        ConfigurationRequest, OutputFormat, QuoteRequest, QuoteResponse,
    };
    pub use crate::application::read_models::{QuoteReadModel, QuoteReadModelBuilder};
    pub use crate::application::use_cases::{
        GenerateQuoteUseCase, ListOptionsUseCase, ManageCatalogUseCase,
    };
    pub use crate::ports::inbound::CatalogAdminPort;
    pub use crate::ports::outbound::{
        CatalogRepository, OutputPresenter, ProgressReporter, QuoteFormatter, QuoteRequestReader,
    };
    pub use crate::quoting::domain::{
        Configuration, IoModule, License, LicenseGroup, Model, ProductCatalog, QuoteLine,
        SmsModel,
    };
    pub use crate::quoting::policies::CompatibilityTable;
    pub use crate::quoting::services::{
        CompatibilityResolver, ConfigurationCascade, ConfigurationSession, QuoteBuilder,
    };
    pub use crate::shared::Result;
}
