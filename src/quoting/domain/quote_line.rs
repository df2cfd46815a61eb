use serde::{Deserialize, Serialize};

/// One row of the flattened bill of materials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLine {
    pub part: String,
    pub description: String,
    pub qty: u32,
    /// 1-based position of the source configuration; absent on SMS lines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_id: Option<usize>,
}

impl QuoteLine {
    pub fn new(part: impl Into<String>, description: impl Into<String>, config_id: Option<usize>) -> Self {
        Self {
            part: part.into(),
            description: description.into(),
            qty: 1,
            config_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_line_defaults_qty_one() {
        let line = QuoteLine::new("TPNN0424", "TippingPoint 5600TXE HW + Support 1Yr", Some(1));
        assert_eq!(line.qty, 1);
        assert_eq!(line.config_id, Some(1));
    }

    #[test]
    fn test_sms_line_omits_config_id() {
        let line = QuoteLine::new("TPNN0304", "vSMS", None);
        let json = serde_json::to_value(&line).unwrap();
        assert!(json.get("configId").is_none());
        assert_eq!(json["qty"], 1);
    }
}
