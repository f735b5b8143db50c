//! Configuration structures for the receipt pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the rcpt pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RcptConfig {
    /// Line item extraction configuration.
    pub extraction: ExtractionConfig,

    /// Time-series sink configuration.
    pub sink: SinkConfig,
}

/// Line item extraction configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Item names containing any of these substrings are summary rows
    /// and never emitted. Matching is case-sensitive.
    pub summary_keywords: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            summary_keywords: vec![
                "TOTAL".to_string(),
                "SUBTOTAL".to_string(),
                "TAX".to_string(),
            ],
        }
    }
}

impl ExtractionConfig {
    /// Parse a comma-separated keyword list, as found in environment variables.
    pub fn from_keyword_list(list: &str) -> Self {
        Self {
            summary_keywords: list
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

/// Time-series sink configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkConfig {
    /// Target database name.
    pub database_name: String,

    /// Target table name.
    pub table_name: String,

    /// Measure name written on every record.
    pub measure_name: String,
}

impl Default for SinkConfig {
    fn default() -> Self {
        Self {
            database_name: "receipts".to_string(),
            table_name: "items".to_string(),
            measure_name: "price".to_string(),
        }
    }
}

impl RcptConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_summary_keywords() {
        let config = ExtractionConfig::default();
        assert_eq!(config.summary_keywords, vec!["TOTAL", "SUBTOTAL", "TAX"]);
    }

    #[test]
    fn test_keyword_list_parsing() {
        let config = ExtractionConfig::from_keyword_list(" TOTAL, TAX ,,BALANCE ");
        assert_eq!(config.summary_keywords, vec!["TOTAL", "TAX", "BALANCE"]);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RcptConfig =
            serde_json::from_str(r#"{"sink": {"table_name": "prices"}}"#).unwrap();
        assert_eq!(config.sink.table_name, "prices");
        assert_eq!(config.sink.measure_name, "price");
        assert_eq!(config.extraction, ExtractionConfig::default());
    }
}
