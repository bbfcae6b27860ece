use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A compatibility brand and the title tokens that identify it.
///
/// Aliases are tried in order, so more specific tokens (`"HP HW"`) must be
/// listed before the shorter ones they contain (`"HP"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompatBrand {
    pub name: String,
    pub aliases: Vec<String>,
}

impl CompatBrand {
    #[must_use]
    pub fn new(name: &str, aliases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BrandsFile {
    pub brands: Vec<CompatBrand>,
}

/// The built-in brand list, in match priority order.
#[must_use]
pub fn default_brands() -> Vec<CompatBrand> {
    vec![
        CompatBrand::new("HP", &["HP HW", "HP"]),
        CompatBrand::new("Cisco", &["Cisco"]),
        // "HW" is the Huawei shorthand used in supplier part names.
        CompatBrand::new("Huawei", &["Huawei", "HW"]),
        CompatBrand::new("Juniper", &["Juniper"]),
        CompatBrand::new("Arista", &["Arista"]),
        CompatBrand::new("Dell", &["Dell"]),
        CompatBrand::new("Intel", &["Intel"]),
    ]
}

/// Load and validate a compatibility brand list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brands(path: &Path) -> Result<BrandsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BrandsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_brands(&content)
}

/// Parse and validate a compatibility brand list from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text cannot be parsed or fails validation.
pub fn parse_brands(content: &str) -> Result<BrandsFile, ConfigError> {
    let brands_file: BrandsFile =
        serde_yaml::from_str(content).map_err(ConfigError::BrandsFileParse)?;

    validate_brands(&brands_file)?;

    Ok(brands_file)
}

fn validate_brands(brands_file: &BrandsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();
    let mut seen_aliases = HashSet::new();

    for brand in &brands_file.brands {
        if brand.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "brand name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(brand.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand name: '{}'",
                brand.name
            )));
        }

        if brand.aliases.is_empty() {
            return Err(ConfigError::Validation(format!(
                "brand '{}' has no aliases",
                brand.name
            )));
        }

        for alias in &brand.aliases {
            if alias.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "brand '{}' has an empty alias",
                    brand.name
                )));
            }
            if !seen_aliases.insert(alias.to_lowercase()) {
                return Err(ConfigError::Validation(format!(
                    "alias '{alias}' is listed more than once"
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "brands_test.rs"]
mod tests;
