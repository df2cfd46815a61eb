use crate::application::dto::QuoteRequest;
use crate::ports::outbound::QuoteRequestReader;
use crate::shared::error::QuoteError;
use crate::shared::security::validate_regular_file;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// FileSystemReader adapter for reading input documents from disk
///
/// Implements the QuoteRequestReader port and also loads the raw
/// documents handed to `catalog import` and `catalog add/update`.
/// Every read rejects symbolic links and oversized files first.
pub struct FileSystemReader;

impl FileSystemReader {
    pub fn new() -> Self {
        Self
    }

    /// Reads a document after the security checks
    ///
    /// # Arguments
    /// * `path` - File to read
    /// * `file_description` - Label used in error messages
    pub fn read_document(&self, path: &Path, file_description: &str) -> Result<String> {
        if !path.exists() {
            return Err(QuoteError::FileReadError {
                path: path.to_path_buf(),
                details: format!("{} does not exist", file_description),
            }
            .into());
        }

        validate_regular_file(path, file_description)?;

        fs::read_to_string(path).map_err(|e| {
            QuoteError::FileReadError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

impl Default for FileSystemReader {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteRequestReader for FileSystemReader {
    fn read_quote_request(&self, path: &Path) -> Result<QuoteRequest> {
        let content = self.read_document(path, "Quote request")?;

        // JSON documents are valid YAML, so one parser covers both
        serde_yaml_ng::from_str(&content).map_err(|e| {
            QuoteError::RequestParseError {
                path: path.to_path_buf(),
                details: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::SmsChoice;
    use tempfile::TempDir;

    #[test]
    fn test_read_yaml_request() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quote.yml");
        fs::write(
            &path,
            "configurations:\n  - name: Core\n    model: txe-8600\n    throughput: 20\n    slots: [TPNN0410]\n    sms: true\n",
        )
        .unwrap();

        let request = FileSystemReader::new().read_quote_request(&path).unwrap();
        assert_eq!(request.configurations.len(), 1);
        let entry = &request.configurations[0];
        assert_eq!(entry.model.as_deref(), Some("txe-8600"));
        assert_eq!(entry.throughput, Some(20.0));
        assert_eq!(entry.slots, vec![Some("TPNN0410".to_string())]);
        assert_eq!(entry.sms, Some(SmsChoice::Enabled(true)));
    }

    #[test]
    fn test_read_json_request() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quote.json");
        fs::write(
            &path,
            r#"{"configurations":[{"model":"txe-5600","sms":"TPNN0431"}]}"#,
        )
        .unwrap();

        let request = FileSystemReader::new().read_quote_request(&path).unwrap();
        assert_eq!(
            request.configurations[0].sms,
            Some(SmsChoice::Sku("TPNN0431".to_string()))
        );
    }

    #[test]
    fn test_unknown_field_is_a_parse_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("quote.yml");
        fs::write(&path, "configurations:\n  - chassis: txe-8600\n").unwrap();

        let error = FileSystemReader::new().read_quote_request(&path).unwrap_err();
        assert!(error.to_string().contains("Failed to parse quote request"));
    }

    #[test]
    fn test_missing_request_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.yml");

        let error = FileSystemReader::new().read_quote_request(&path).unwrap_err();
        assert!(error.to_string().contains("Quote request does not exist"));
    }

    #[test]
    fn test_read_document_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        let result = FileSystemReader::new().read_document(temp_dir.path(), "Catalog document");
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_read_document_rejects_symlink() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("real.json");
        fs::write(&target, "{}").unwrap();
        let link = temp_dir.path().join("link.json");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let error = FileSystemReader::new()
            .read_document(&link, "Catalog document")
            .unwrap_err();
        assert!(error.to_string().contains("symbolic link"));
    }
}
