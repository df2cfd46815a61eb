mod catalog_validator;
mod compatibility_resolver;
mod configuration_cascade;
mod configuration_session;
mod quote_builder;
mod quote_metadata_generator;

pub use catalog_validator::{CatalogValidator, RecordRef};
pub use compatibility_resolver::{CompatibilityResolver, ModuleOptions};
pub use configuration_cascade::ConfigurationCascade;
pub use configuration_session::ConfigurationSession;
pub use quote_builder::QuoteBuilder;
pub use quote_metadata_generator::{QuoteMetadataGenerator, TOOL_NAME};
