use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or the settings are
/// inconsistent.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value cannot be parsed or the settings are
/// inconsistent.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; [`AppConfig::default`] supplies the fallback.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = AppConfig::default();

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_f64 = |var: &str, default: f64| -> Result<f64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<f64>()
                .map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let parse_u32 = |var: &str, default: u32| -> Result<u32, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|e| invalid(var, e.to_string())),
            Err(_) => Ok(default),
        }
    };

    let base_url = lookup("SCOUT_BASE_URL")
        .map(|raw| raw.trim().trim_end_matches('/').to_string())
        .unwrap_or(defaults.base_url);
    let log_level = lookup("SCOUT_LOG_LEVEL").unwrap_or(defaults.log_level);
    let keywords = match lookup("SCOUT_KEYWORDS") {
        Ok(raw) => parse_keywords(&raw),
        Err(_) => defaults.keywords,
    };
    let output_path = lookup("SCOUT_OUTPUT_PATH")
        .map(PathBuf::from)
        .unwrap_or(defaults.output_path);

    let min_delay_secs = parse_f64("SCOUT_MIN_DELAY_SECS", defaults.min_delay_secs)?;
    let max_delay_secs = parse_f64("SCOUT_MAX_DELAY_SECS", defaults.max_delay_secs)?;
    let max_retries = parse_u32("SCOUT_MAX_RETRIES", defaults.max_retries)?;
    let request_timeout_secs =
        parse_u64("SCOUT_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?;
    let dedupe_by_identifier = match lookup("SCOUT_DEDUPE_BY_IDENTIFIER") {
        Ok(raw) => parse_bool(&raw)
            .ok_or_else(|| invalid("SCOUT_DEDUPE_BY_IDENTIFIER", format!("not a boolean: {raw}")))?,
        Err(_) => defaults.dedupe_by_identifier,
    };

    let config = AppConfig {
        base_url,
        log_level,
        keywords,
        output_path,
        min_delay_secs,
        max_delay_secs,
        max_retries,
        request_timeout_secs,
        dedupe_by_identifier,
    };
    config.validate()?;
    Ok(config)
}

/// Splits a comma-separated keyword list, dropping blank entries.
fn parse_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
