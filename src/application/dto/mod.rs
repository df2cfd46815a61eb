/// Data Transfer Objects for application layer
///
/// DTOs are used to transfer data between the application layer
/// and adapters, keeping the quoting core isolated.
mod options_response;
mod output_format;
mod quote_request;
mod quote_response;

pub use options_response::{LicenseOption, ModuleOption, OptionsRequest, OptionsResponse};
pub use output_format::OutputFormat;
pub use quote_request::{ConfigurationRequest, QuoteRequest, SmsChoice};
pub use quote_response::QuoteResponse;
