/// Result alias used across the crate; errors are `anyhow::Error` so typed
/// errors from `shared::error` can be downcast where callers need them.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
