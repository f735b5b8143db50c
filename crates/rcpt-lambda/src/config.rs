//! Function configuration, read from the environment.

use envconfig::Envconfig;

use rcpt_core::models::config::{ExtractionConfig, RcptConfig, SinkConfig};

#[derive(Envconfig, Clone, Debug)]
pub struct Config {
    #[envconfig(from = "TIMESTREAM_DATABASE_NAME")]
    pub database_name: String,

    #[envconfig(from = "TIMESTREAM_TABLE_NAME")]
    pub table_name: String,

    #[envconfig(from = "MEASURE_NAME", default = "price")]
    pub measure_name: String,

    // Comma-separated, case-sensitive
    #[envconfig(from = "SUMMARY_KEYWORDS", default = "TOTAL,SUBTOTAL,TAX")]
    pub summary_keywords: String,
}

impl Config {
    pub fn to_rcpt_config(&self) -> RcptConfig {
        RcptConfig {
            extraction: ExtractionConfig::from_keyword_list(&self.summary_keywords),
            sink: SinkConfig {
                database_name: self.database_name.clone(),
                table_name: self.table_name.clone(),
                measure_name: self.measure_name.clone(),
            },
        }
    }
}
