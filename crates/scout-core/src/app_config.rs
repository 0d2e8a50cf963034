use std::path::PathBuf;

use crate::ConfigError;

/// Sample search terms used when no keyword list is configured.
pub const DEFAULT_KEYWORDS: [&str; 6] = [
    "wireless earbuds",
    "office chair",
    "gaming laptop",
    "blender",
    "running shoes",
    "coffee maker",
];

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Site origin, without a trailing slash (e.g. `https://www.amazon.in`).
    pub base_url: String,
    pub log_level: String,
    pub keywords: Vec<String>,
    pub output_path: PathBuf,
    /// Lower bound of the pause after each keyword, in seconds.
    pub min_delay_secs: f64,
    /// Upper bound of the pause after each keyword, in seconds.
    pub max_delay_secs: f64,
    /// Total attempts per fetch, including the first.
    pub max_retries: u32,
    pub request_timeout_secs: u64,
    pub dedupe_by_identifier: bool,
}

impl AppConfig {
    /// Checks the cross-field rules that individual env-var parsing cannot.
    ///
    /// Called after loading and again after CLI overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSettings`] describing the first violated rule.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.min_delay_secs.is_finite() || self.min_delay_secs < 0.0 {
            return Err(ConfigError::InvalidSettings(format!(
                "min delay must be a non-negative number of seconds, got {}",
                self.min_delay_secs
            )));
        }
        if !self.max_delay_secs.is_finite() || self.max_delay_secs < self.min_delay_secs {
            return Err(ConfigError::InvalidSettings(format!(
                "max delay ({}) must be >= min delay ({})",
                self.max_delay_secs, self.min_delay_secs
            )));
        }
        if self.max_retries == 0 {
            return Err(ConfigError::InvalidSettings(
                "max retries must be at least 1".to_string(),
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::InvalidSettings(
                "request timeout must be at least 1 second".to_string(),
            ));
        }
        if self.keywords.is_empty() {
            return Err(ConfigError::InvalidSettings(
                "keyword list is empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.amazon.in".to_string(),
            log_level: "info".to_string(),
            keywords: DEFAULT_KEYWORDS.iter().map(|k| (*k).to_string()).collect(),
            output_path: PathBuf::from("amazons_choice.csv"),
            min_delay_secs: 20.0,
            max_delay_secs: 40.0,
            max_retries: 6,
            request_timeout_secs: 15,
            dedupe_by_identifier: false,
        }
    }
}
