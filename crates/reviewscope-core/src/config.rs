use std::path::PathBuf;

use crate::app_config::{AppConfig, DEFAULT_USER_AGENT};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to an invalid value.
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
/// Returns `ConfigError` if a variable is set to an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; unset variables take the [`AppConfig`] defaults.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_positive_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let value = or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_positive_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let value = or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))?;
        if value == 0 {
            return Err(invalid(var, "must be at least 1".to_string()));
        }
        Ok(value)
    };

    let parse_bool = |var: &str, default: bool| -> Result<bool, ConfigError> {
        match lookup(var) {
            Err(_) => Ok(default),
            Ok(raw) => parse_flag(&raw).ok_or_else(|| {
                invalid(var, format!("expected true/false, got \"{raw}\""))
            }),
        }
    };

    let log_level = or_default("REVIEWSCOPE_LOG_LEVEL", "info");
    let request_timeout_secs = parse_positive_u64("REVIEWSCOPE_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("REVIEWSCOPE_USER_AGENT", DEFAULT_USER_AGENT);
    let max_pages = parse_positive_u32("REVIEWSCOPE_MAX_PAGES", "1")?;
    let max_concurrent_urls = parse_usize("REVIEWSCOPE_MAX_CONCURRENT_URLS", "1")?.max(1);
    let report_malformed = parse_bool("REVIEWSCOPE_REPORT_MALFORMED", true)?;
    let output_path = PathBuf::from(or_default("REVIEWSCOPE_OUTPUT_PATH", "reviews.csv"));
    let preview_rows = parse_usize("REVIEWSCOPE_PREVIEW_ROWS", "10")?;

    Ok(AppConfig {
        log_level,
        request_timeout_secs,
        user_agent,
        max_pages,
        max_concurrent_urls,
        report_malformed,
        output_path,
        preview_rows,
    })
}

/// Parse a boolean flag value. Accepts `true/false`, `1/0`, `yes/no`.
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
