//! Quote read model for query operations
//!
//! This module provides the main read model struct that aggregates
//! all quote data in a presentation-friendly format.

use crate::quoting::domain::QuoteLine;
use serde::Serialize;

/// Main read model for a generated quote
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteReadModel {
    pub metadata: QuoteMetadataView,
    pub configurations: Vec<ConfigurationView>,
    pub lines: Vec<QuoteLine>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// View representation of quote metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteMetadataView {
    /// RFC 3339 creation time
    pub timestamp: String,
    pub tool_name: String,
    pub tool_version: String,
    /// `urn:uuid:` identifier of this quote
    pub quote_id: String,
    pub catalog_version: String,
}

/// Summary of one configuration with display names resolved
///
/// Names fall back to the raw SKU or id when the catalog no longer holds
/// the record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigurationView {
    /// 1-based position, matching `configId` on quote lines
    pub config_id: usize,
    pub id: String,
    pub name: String,
    pub model: Option<String>,
    pub throughput: Option<String>,
    pub inspect_license: Option<String>,
    pub threatdv_license: Option<String>,
    /// Module names for slot 1 and slot 2
    pub slots: Vec<Option<String>>,
    pub sms: Option<String>,
}
