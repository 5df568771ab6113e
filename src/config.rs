// ⚙️ Configuration - where the data lives and how loudly to log

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory the six data files live in when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Default tracing filter; `RUST_LOG` overrides it.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where `employees.json`, `events.json`, ... are read and written.
    pub data_dir: PathBuf,

    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::new();
        assert_eq!(config.data_dir(), Path::new("data"));
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_builders() {
        let config = Config::new()
            .with_data_dir("/tmp/office")
            .with_log_filter("debug");

        assert_eq!(config.data_dir(), Path::new("/tmp/office"));
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"data_dir": "records"}"#).unwrap();
        assert_eq!(config.data_dir(), Path::new("records"));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }
}
