/// Use cases module containing application business logic orchestration
mod generate_quote;
mod list_options;
mod manage_catalog;

pub use generate_quote::GenerateQuoteUseCase;
pub use list_options::ListOptionsUseCase;
pub use manage_catalog::ManageCatalogUseCase;
