/// Quoting core: catalog entities, compatibility rules and the
/// configuration-to-quote engine. Free of I/O.
pub mod domain;
pub mod policies;
pub mod services;
