/// Service configuration.
///
/// Loaded from a TOML file; every field has a default so a missing file or
/// an empty one still yields a working pipeline over the registry columns.
/// The document-store URL may instead come from the `DOCSTORE_URL`
/// environment variable (loaded via dotenv in `main`), keeping credentials
/// out of checked-in config.
///
/// ```toml
/// [source]
/// collection = "weatherdata"
///
/// [pipeline]
/// separator = "_"
/// timestamp_key = "ts"
/// smoothing_window = 6
/// start_date = "2024-01-01"
/// end_date = "2024-01-31"
///
/// [[columns]]
/// name = "airTemperature_value"
/// sentinels = [999.9, -999.9]
/// bound = { min = -80.0, max = 60.0 }
/// ```

use chrono::NaiveDate;
use serde::Deserialize;
use std::error::Error;

use crate::columns::{self, ColumnSpec};

// ---------------------------------------------------------------------------
// Source configuration
// ---------------------------------------------------------------------------

/// Where raw records come from. Opaque to the pipeline itself.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    /// Document-store data API base URL. Falls back to the `DOCSTORE_URL`
    /// environment variable when absent.
    pub url: Option<String>,
    /// Target collection name.
    #[serde(default = "default_collection")]
    pub collection: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            url: None,
            collection: default_collection(),
        }
    }
}

fn default_collection() -> String {
    "weatherdata".to_string()
}

// ---------------------------------------------------------------------------
// Pipeline configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct PipelineConfig {
    /// Separator joining nested keys during flattening.
    #[serde(default = "default_separator")]
    pub separator: String,
    /// Source key holding the observation timestamp.
    #[serde(default = "default_timestamp_key")]
    pub timestamp_key: String,
    /// Trailing moving-average window, in observations.
    #[serde(default = "default_window")]
    pub smoothing_window: usize,
    /// Selected date range, as quoted "YYYY-MM-DD" strings in the file;
    /// either end unset means the data's own span.
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            separator: default_separator(),
            timestamp_key: default_timestamp_key(),
            smoothing_window: default_window(),
            start_date: None,
            end_date: None,
        }
    }
}

fn default_separator() -> String {
    crate::flatten::DEFAULT_SEPARATOR.to_string()
}

fn default_timestamp_key() -> String {
    crate::schema::DEFAULT_TIMESTAMP_KEY.to_string()
}

fn default_window() -> usize {
    crate::smooth::DEFAULT_WINDOW
}

// ---------------------------------------------------------------------------
// Top-level configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    /// Tracked numeric columns. Defaults to the measurement column registry
    /// when the file defines none.
    #[serde(default = "columns::default_columns")]
    pub columns: Vec<ColumnSpec>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: SourceConfig::default(),
            pipeline: PipelineConfig::default(),
            columns: columns::default_columns(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Config, Box<dyn Error>> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&text)?;
        Ok(config)
    }

    /// Names of the tracked numeric columns, in config order.
    pub fn numeric_column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_full_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.pipeline.separator, "_");
        assert_eq!(config.pipeline.timestamp_key, "ts");
        assert_eq!(config.pipeline.smoothing_window, 6);
        assert_eq!(config.pipeline.start_date, None);
        assert_eq!(config.source.collection, "weatherdata");
        // Registry columns kick in.
        assert_eq!(config.columns.len(), 3);
        assert!(config
            .numeric_column_names()
            .contains(&"airTemperature_value".to_string()));
    }

    #[test]
    fn test_column_overrides_replace_registry() {
        let text = r#"
            [[columns]]
            name = "soil_moisture"
            sentinels = [-1.0]
            bound = { min = 0.0, max = 1.0, min_inclusive = true, max_inclusive = true }
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(config.columns.len(), 1);
        let col = &config.columns[0];
        assert_eq!(col.name, "soil_moisture");
        assert_eq!(col.sentinels, vec![-1.0]);
        let bound = col.bound.unwrap();
        assert!(bound.contains(0.0));
        assert!(bound.contains(1.0));
    }

    #[test]
    fn test_date_range_parses() {
        let text = r#"
            [pipeline]
            start_date = "2024-01-01"
            end_date = "2024-01-31"
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(
            config.pipeline.start_date,
            NaiveDate::from_ymd_opt(2024, 1, 1)
        );
        assert_eq!(
            config.pipeline.end_date,
            NaiveDate::from_ymd_opt(2024, 1, 31)
        );
    }

    #[test]
    fn test_source_url_optional() {
        let text = r#"
            [source]
            url = "https://store.example.net/api"
            collection = "obs"
        "#;
        let config: Config = toml::from_str(text).unwrap();
        assert_eq!(
            config.source.url.as_deref(),
            Some("https://store.example.net/api")
        );
        assert_eq!(config.source.collection, "obs");
    }
}
