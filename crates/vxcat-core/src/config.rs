use std::str::FromStr;

use rust_decimal::Decimal;

use crate::app_config::AppConfig;
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
/// Decoupled from the process environment so tests can feed a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let log_level = or_default("VXCAT_LOG_LEVEL", "info");
    let brands_path = lookup("VXCAT_BRANDS_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let raw_vat = or_default("VXCAT_VAT_RATE", "0.20");
    let vat_rate = Decimal::from_str(raw_vat.trim())
        .map_err(|e| invalid("VXCAT_VAT_RATE", e.to_string()))?;
    if vat_rate.is_sign_negative() || vat_rate >= Decimal::ONE {
        return Err(invalid(
            "VXCAT_VAT_RATE",
            format!("{vat_rate} is outside [0, 1)"),
        ));
    }

    let vendor = or_default("VXCAT_VENDOR", "Vaonix");
    if vendor.trim().is_empty() {
        return Err(invalid("VXCAT_VENDOR", "must be non-empty".to_string()));
    }

    let placeholder_prices = parse_bool(&or_default("VXCAT_PLACEHOLDER_PRICES", "true"))
        .ok_or_else(|| {
            invalid(
                "VXCAT_PLACEHOLDER_PRICES",
                "expected true/false/1/0/yes/no".to_string(),
            )
        })?;

    Ok(AppConfig {
        log_level,
        brands_path,
        vat_rate,
        vendor,
        placeholder_prices,
    })
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
