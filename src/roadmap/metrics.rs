//! Weekly target metrics

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Target metrics for a plan week
///
/// Resolved once when the plan is loaded; consumers never re-parse text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum KeyMetrics {
    /// Metric name to numeric target
    Structured(BTreeMap<String, f64>),
    /// Free text that is not a JSON object of numbers
    RawText(String),
}

impl KeyMetrics {
    /// Parse a metrics cell
    pub fn ingest(text: &str) -> Self {
        let trimmed = text.trim();
        match serde_json::from_str::<BTreeMap<String, f64>>(trimmed) {
            Ok(map) => KeyMetrics::Structured(map),
            Err(e) => {
                if trimmed.starts_with('{') {
                    log::warn!("Metrics kept as text ({}): {}", e, trimmed);
                }
                KeyMetrics::RawText(trimmed.to_string())
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        match self {
            KeyMetrics::Structured(map) => map.get(name).copied(),
            KeyMetrics::RawText(_) => None,
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, KeyMetrics::Structured(_))
    }

    /// Text form used in flat exports
    pub fn to_text(&self) -> String {
        match self {
            KeyMetrics::Structured(map) => map
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
            KeyMetrics::RawText(text) => text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_metrics() {
        let metrics = KeyMetrics::ingest(r#"{"signups": 30, "interviews": 5}"#);

        assert!(metrics.is_structured());
        assert_eq!(metrics.get("signups"), Some(30.0));
        assert_eq!(metrics.get("interviews"), Some(5.0));
        assert_eq!(metrics.get("nps"), None);
        assert_eq!(metrics.to_text(), "interviews=5; signups=30");
    }

    #[test]
    fn test_fractional_values() {
        let metrics = KeyMetrics::ingest(r#"{"activation_rate": 0.35}"#);

        assert_eq!(metrics.get("activation_rate"), Some(0.35));
    }

    #[test]
    fn test_raw_text_fallback() {
        let quoted = KeyMetrics::ingest("{'signups': 30}");
        assert_eq!(quoted, KeyMetrics::RawText("{'signups': 30}".to_string()));
        assert_eq!(quoted.get("signups"), None);

        let prose = KeyMetrics::ingest("  1000 visitors  ");
        assert_eq!(prose, KeyMetrics::RawText("1000 visitors".to_string()));
        assert_eq!(prose.to_text(), "1000 visitors");

        let non_numeric = KeyMetrics::ingest(r#"{"rank": "first"}"#);
        assert!(!non_numeric.is_structured());
    }

    #[test]
    fn test_empty_cell() {
        assert_eq!(KeyMetrics::ingest(""), KeyMetrics::RawText(String::new()));
    }
}
