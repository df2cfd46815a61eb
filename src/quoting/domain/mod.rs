pub mod catalog;
pub mod configuration;
pub mod io_module;
pub mod license;
pub mod model;
pub mod quote_line;
pub mod quote_metadata;
pub mod sms_model;

pub use catalog::{CatalogMetadata, CatalogStats, ProductCatalog};
pub use configuration::{Configuration, LicenseSelection, SlotSelection};
pub use io_module::IoModule;
pub use license::{License, LicenseGroup, LicenseKey};
pub use model::{Model, ThroughputTier};
pub use quote_line::QuoteLine;
pub use quote_metadata::QuoteMetadata;
pub use sms_model::SmsModel;
