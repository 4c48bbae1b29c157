use crate::app_config::{AppConfig, Language};
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://ksp.co.il/m_action/api/";
pub const DEFAULT_USER_AGENT: &str = "ksp-client/0.1";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
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
/// Returns `ConfigError` if a variable is set to a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; tests drive this with a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let base_url = or_default("KSP_BASE_URL", DEFAULT_BASE_URL);
    let language = parse_language(&or_default("KSP_LANGUAGE", "en"))?;
    let log_level = or_default("KSP_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("KSP_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("KSP_USER_AGENT", DEFAULT_USER_AGENT);
    let poll_interval_secs = parse_u64("KSP_POLL_INTERVAL_SECS", "2")?;

    if poll_interval_secs == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "KSP_POLL_INTERVAL_SECS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        base_url,
        language,
        log_level,
        request_timeout_secs,
        user_agent,
        poll_interval_secs,
    })
}

fn parse_language(s: &str) -> Result<Language, ConfigError> {
    s.parse::<Language>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "KSP_LANGUAGE".to_string(),
            reason,
        })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
