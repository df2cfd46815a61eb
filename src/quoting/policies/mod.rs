mod compatibility_table;
mod sku_format;

pub use compatibility_table::{CompatibilityTable, DisplayOrder, ModuleSet};
pub use sku_format::SkuFormat;
