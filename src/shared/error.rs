use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the CLI application.
///
/// These codes allow scripts to distinguish between argument problems
/// and failures that happened while running a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success - the command completed
    Success = 0,
    /// Invalid command-line arguments (clap parsing errors)
    InvalidArguments = 2,
    /// Application error (catalog I/O, validation, rejected admin change, etc.)
    ApplicationError = 3,
}

impl ExitCode {
    /// Convert to i32 for use with std::process::exit
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Success => write!(f, "Success (0)"),
            ExitCode::InvalidArguments => write!(f, "Invalid Arguments (2)"),
            ExitCode::ApplicationError => write!(f, "Application Error (3)"),
        }
    }
}

/// Application-specific errors for catalog storage and quote generation.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Product catalog could not be parsed: {path}\nDetails: {details}\n\n💡 Hint: Restore a backup with `txe-quote catalog restore <FILE>` or re-seed with `txe-quote catalog seed`")]
    CatalogParseError { path: PathBuf, details: String },

    #[error("Failed to read file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the file exists and you have read permissions")]
    FileReadError { path: PathBuf, details: String },

    #[error("Failed to write to file: {path}\nDetails: {details}\n\n💡 Hint: Please verify that the directory exists and you have write permissions")]
    FileWriteError { path: PathBuf, details: String },

    #[error("Failed to parse quote request: {path}\nDetails: {details}\n\n💡 Hint: The request must contain a `configurations` list (YAML or JSON)")]
    RequestParseError { path: PathBuf, details: String },

    #[error("Backup not found: {filename}\n\n💡 Hint: Run `txe-quote catalog backups` to list available backups")]
    BackupNotFound { filename: String },

    /// Validation error for catalog documents and request values
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Security violation: {path}\nReason: {reason}\n\n💡 Hint: {hint}")]
    SecurityError {
        path: PathBuf,
        reason: String,
        hint: String,
    },
}

/// Rejections raised by catalog administration (add/update/remove of records).
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("SKU {sku} already exists")]
    DuplicateSku { sku: String },

    #[error("Model with ID {id} already exists")]
    DuplicateModelId { id: String },

    #[error("{kind} with {key} not found")]
    RecordNotFound { kind: &'static str, key: String },

    #[error("Model {model_id} does not exist")]
    UnknownModel { model_id: String },

    #[error("License {sku} is only compatible with: {compatible}")]
    IncompatibleLicense { sku: String, compatible: String },

    #[error("Cannot delete model {model_id}. It is referenced by {} license(s): {}", .licenses.len(), .licenses.join(", "))]
    ModelInUse {
        model_id: String,
        licenses: Vec<String>,
    },

    #[error("Invalid {kind}: {field} {reason}")]
    InvalidRecord {
        kind: &'static str,
        field: &'static str,
        reason: String,
    },
}
