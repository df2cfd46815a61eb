/// Inbound ports (Driving ports) - Use case interfaces
///
/// These ports define the interfaces that external adapters (e.g., CLI)
/// use to interact with the application core.
pub mod catalog_admin_port;

pub use catalog_admin_port::{
    CatalogAdminPort, CatalogRecord, ModelFilter, RecordFilter, RecordKind,
};
