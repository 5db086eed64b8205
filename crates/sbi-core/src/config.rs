use crate::app_config::{AppConfig, Environment};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can drive it from a
/// plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let env = parse_environment(&or_default("SBI_ENV", "development"))?;
    let log_level = or_default("SBI_LOG_LEVEL", "info");
    let reconcile_config_path = PathBuf::from(or_default(
        "SBI_RECONCILE_CONFIG",
        "./config/reconcile.yaml",
    ));
    let default_countries = parse_country_list(
        "SBI_DEFAULT_COUNTRIES",
        &or_default("SBI_DEFAULT_COUNTRIES", "SE,NO,DK,FI"),
    )?;

    Ok(AppConfig {
        env,
        log_level,
        reconcile_config_path,
        default_countries,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "SBI_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Parse a comma-separated list of country codes, upper-casing each entry.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` if the list is empty or contains
/// a duplicate code.
pub fn parse_country_list(var: &str, raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut countries: Vec<String> = Vec::new();
    for code in raw.split(',').map(str::trim).filter(|c| !c.is_empty()) {
        let code = code.to_uppercase();
        if countries.contains(&code) {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("duplicate country '{code}'"),
            });
        }
        countries.push(code);
    }

    if countries.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: "at least one country is required".to_string(),
        });
    }

    Ok(countries)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
