//! Read models for CQRS-lite pattern
//!
//! This module contains view-optimized structs that provide
//! a denormalized representation of a generated quote for the formatters.

pub mod quote_read_model;
pub mod quote_read_model_builder;

pub use quote_read_model::{ConfigurationView, QuoteMetadataView, QuoteReadModel};
pub use quote_read_model_builder::QuoteReadModelBuilder;
