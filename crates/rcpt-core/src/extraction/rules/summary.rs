//! Summary row filtering.

use crate::models::config::ExtractionConfig;

/// Rejects item names that denote receipt summary rows.
#[derive(Debug, Clone)]
pub struct SummaryFilter {
    keywords: Vec<String>,
}

impl SummaryFilter {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new(config.summary_keywords.clone())
    }

    /// True if the name contains any keyword as a case-sensitive substring.
    pub fn is_summary(&self, item_name: &str) -> bool {
        self.keywords.iter().any(|k| item_name.contains(k.as_str()))
    }
}

impl Default for SummaryFilter {
    fn default() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }
}
