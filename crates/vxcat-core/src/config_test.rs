use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).expect("defaults should be valid");
    assert_eq!(cfg.log_level, "info");
    assert!(cfg.brands_path.is_none());
    assert_eq!(cfg.vat_rate, Decimal::new(20, 2));
    assert_eq!(cfg.vendor, "Vaonix");
    assert!(cfg.placeholder_prices);
}

#[test]
fn ttc_multiplier_adds_vat() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.ttc_multiplier(), Decimal::new(120, 2));
}

#[test]
fn log_level_override() {
    let mut map = HashMap::new();
    map.insert("VXCAT_LOG_LEVEL", "debug");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
}

#[test]
fn brands_path_set() {
    let mut map = HashMap::new();
    map.insert("VXCAT_BRANDS_PATH", "./config/brands.yaml");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.brands_path.as_deref(),
        Some(std::path::Path::new("./config/brands.yaml"))
    );
}

#[test]
fn brands_path_blank_is_none() {
    let mut map = HashMap::new();
    map.insert("VXCAT_BRANDS_PATH", "   ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.brands_path.is_none());
}

#[test]
fn vat_rate_override() {
    let mut map = HashMap::new();
    map.insert("VXCAT_VAT_RATE", "0.055");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.vat_rate, Decimal::new(55, 3));
}

#[test]
fn vat_rate_invalid() {
    let mut map = HashMap::new();
    map.insert("VXCAT_VAT_RATE", "twenty");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VXCAT_VAT_RATE"),
        "expected InvalidEnvVar(VXCAT_VAT_RATE), got: {result:?}"
    );
}

#[test]
fn vat_rate_out_of_range() {
    let mut map = HashMap::new();
    map.insert("VXCAT_VAT_RATE", "1.5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VXCAT_VAT_RATE"),
        "expected InvalidEnvVar(VXCAT_VAT_RATE), got: {result:?}"
    );
}

#[test]
fn vendor_blank_rejected() {
    let mut map = HashMap::new();
    map.insert("VXCAT_VENDOR", " ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VXCAT_VENDOR"),
        "expected InvalidEnvVar(VXCAT_VENDOR), got: {result:?}"
    );
}

#[test]
fn placeholder_prices_disabled() {
    let mut map = HashMap::new();
    map.insert("VXCAT_PLACEHOLDER_PRICES", "no");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(!cfg.placeholder_prices);
}

#[test]
fn placeholder_prices_invalid() {
    let mut map = HashMap::new();
    map.insert("VXCAT_PLACEHOLDER_PRICES", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "VXCAT_PLACEHOLDER_PRICES"),
        "expected InvalidEnvVar(VXCAT_PLACEHOLDER_PRICES), got: {result:?}"
    );
}

#[test]
fn parse_bool_accepts_common_spellings() {
    assert_eq!(parse_bool("TRUE"), Some(true));
    assert_eq!(parse_bool(" 1 "), Some(true));
    assert_eq!(parse_bool("off"), Some(false));
    assert_eq!(parse_bool(""), None);
}
