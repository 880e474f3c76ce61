//! Serializable result records for rendering layers.

use serde::{Deserialize, Serialize};

use crate::error::FormatResult;
use crate::normalize::Normalized;

/// Flat success/failure record for any formatting operation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatReport {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iterations: Option<usize>,
}

impl From<FormatResult<String>> for FormatReport {
    fn from(result: FormatResult<String>) -> Self {
        match result {
            Ok(formatted) => Self {
                success: true,
                formatted: Some(formatted),
                ..Default::default()
            },
            Err(e) => Self {
                error: Some(e.to_string()),
                ..Default::default()
            },
        }
    }
}

impl From<FormatResult<Normalized>> for FormatReport {
    fn from(result: FormatResult<Normalized>) -> Self {
        match result {
            Ok(n) => Self {
                success: true,
                formatted: Some(n.formatted),
                error: None,
                iterations: Some(n.iterations),
            },
            Err(e) => Self {
                error: Some(e.to_string()),
                ..Default::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{minify_json, parse_stringified};

    #[test]
    fn success_report() {
        let report = FormatReport::from(minify_json("[1, 2]"));
        assert!(report.success);
        assert_eq!(report.formatted.as_deref(), Some("[1,2]"));
        assert_eq!(report.iterations, None);
        assert_eq!(
            serde_json::to_string(&report).unwrap(),
            r#"{"success":true,"formatted":"[1,2]"}"#
        );
    }

    #[test]
    fn normalized_report_carries_iterations() {
        let report = FormatReport::from(parse_stringified(r#""{\"a\":1}""#));
        assert!(report.success);
        assert_eq!(report.iterations, Some(2));
    }

    #[test]
    fn failure_report() {
        let report = FormatReport::from(parse_stringified("{bad"));
        assert!(!report.success);
        assert!(report.formatted.is_none());
        assert!(report.error.unwrap().starts_with("Invalid JSON: "));
    }
}
