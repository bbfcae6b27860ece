//! Master product family definitions for catalog generation.
//!
//! A family is one Shopify product whose variants are enumerated from a
//! grid (ITU DWDM channels, CWDM wavelengths) or a fixed list (cable
//! lengths, custom values). The YAML shape:
//!
//! ```yaml
//! families:
//!   - handle: dwdm-sfp-plus-10g-40km
//!     title: Module SFP+ 10G DWDM 40km
//!     sku_prefix: VAO-SFP10G-DWDM40
//!     price: "290.00"
//!     options:
//!       kind: dwdm
//!       from: 18
//!       to: 61
//! ```

use std::collections::HashSet;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::ConfigError;

/// First and last wavelengths of the 20 nm CWDM grid.
pub const CWDM_FIRST_NM: u16 = 1270;
pub const CWDM_LAST_NM: u16 = 1610;
pub const CWDM_STEP_NM: u16 = 20;

/// Highest channel number addressable by a two-digit `CHnn` token.
pub const DWDM_MAX_CHANNEL: u8 = 99;

#[derive(Debug, Clone, Deserialize)]
pub struct FamiliesFile {
    /// Overrides the configured vendor for every family in this file.
    #[serde(default)]
    pub vendor: Option<String>,
    pub families: Vec<FamilyConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FamilyConfig {
    pub handle: String,
    pub title: String,
    /// Product description HTML, written on the first variant row only.
    #[serde(default)]
    pub body: String,
    pub sku_prefix: String,
    pub price: Decimal,
    #[serde(default = "default_inventory_policy")]
    pub inventory_policy: String,
    #[serde(default = "default_status")]
    pub status: String,
    pub options: FamilyOptions,
}

/// Where a family's variant values come from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FamilyOptions {
    /// ITU 100 GHz grid channels, inclusive range.
    Dwdm { from: u8, to: u8 },
    /// CWDM grid wavelengths in nanometres, inclusive range.
    Cwdm { from_nm: u16, to_nm: u16 },
    /// Cable lengths such as `"3m"`.
    Cable {
        #[serde(default = "default_cable_lengths")]
        lengths: Vec<String>,
    },
    Custom { name: String, values: Vec<String> },
}

fn default_inventory_policy() -> String {
    "deny".to_string()
}

fn default_status() -> String {
    "active".to_string()
}

/// Standard DAC/AOC lengths stocked when a family does not list its own.
#[must_use]
pub fn default_cable_lengths() -> Vec<String> {
    ["1m", "2m", "3m", "5m", "7m", "10m", "15m"]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
}

/// Load and validate product families from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_families(path: &Path) -> Result<FamiliesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FamiliesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_families(&content)
}

/// Parse and validate product families from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text cannot be parsed or fails validation.
pub fn parse_families(content: &str) -> Result<FamiliesFile, ConfigError> {
    let file: FamiliesFile =
        serde_yaml::from_str(content).map_err(ConfigError::FamiliesFileParse)?;
    validate_families(&file)?;
    Ok(file)
}

fn validate_families(file: &FamiliesFile) -> Result<(), ConfigError> {
    let mut seen_handles = HashSet::new();

    for family in &file.families {
        for (field, value) in [
            ("handle", &family.handle),
            ("title", &family.title),
            ("sku_prefix", &family.sku_prefix),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "family {field} must be non-empty (family '{}')",
                    family.title
                )));
            }
        }

        if !seen_handles.insert(family.handle.clone()) {
            return Err(ConfigError::Validation(format!(
                "duplicate family handle: '{}'",
                family.handle
            )));
        }

        if family.price.is_sign_negative() {
            return Err(ConfigError::Validation(format!(
                "family '{}' has a negative price",
                family.handle
            )));
        }

        validate_options(&family.handle, &family.options)?;
    }

    Ok(())
}

fn validate_options(handle: &str, options: &FamilyOptions) -> Result<(), ConfigError> {
    let fail = |reason: String| -> Result<(), ConfigError> {
        Err(ConfigError::Validation(format!(
            "family '{handle}': {reason}"
        )))
    };

    match options {
        FamilyOptions::Dwdm { from, to } => {
            if from > to {
                return fail(format!("dwdm range {from}..{to} is reversed"));
            }
            if *to > DWDM_MAX_CHANNEL {
                return fail(format!("dwdm channel {to} exceeds CH{DWDM_MAX_CHANNEL}"));
            }
        }
        FamilyOptions::Cwdm { from_nm, to_nm } => {
            if from_nm > to_nm {
                return fail(format!("cwdm range {from_nm}..{to_nm} is reversed"));
            }
            for nm in [from_nm, to_nm] {
                if !(CWDM_FIRST_NM..=CWDM_LAST_NM).contains(nm)
                    || (nm - CWDM_FIRST_NM) % CWDM_STEP_NM != 0
                {
                    return fail(format!("{nm}nm is not on the CWDM grid"));
                }
            }
        }
        FamilyOptions::Cable { lengths } => {
            if lengths.is_empty() || lengths.iter().any(|l| l.trim().is_empty()) {
                return fail("cable lengths must be non-empty".to_string());
            }
        }
        FamilyOptions::Custom { name, values } => {
            if name.trim().is_empty() {
                return fail("custom option name must be non-empty".to_string());
            }
            if values.is_empty() || values.iter().any(|v| v.trim().is_empty()) {
                return fail("custom option values must be non-empty".to_string());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DWDM_FAMILY: &str = r#"
families:
  - handle: dwdm-sfp-plus-10g-40km
    title: Module SFP+ 10G DWDM 40km
    sku_prefix: VAO-SFP10G-DWDM40
    price: "290.00"
    options:
      kind: dwdm
      from: 18
      to: 61
"#;

    #[test]
    fn parses_dwdm_family_with_defaults() {
        let file = parse_families(DWDM_FAMILY).expect("valid families");
        assert!(file.vendor.is_none());
        let family = &file.families[0];
        assert_eq!(family.price, Decimal::new(29000, 2));
        assert_eq!(family.inventory_policy, "deny");
        assert_eq!(family.status, "active");
        assert!(family.body.is_empty());
        assert_eq!(family.options, FamilyOptions::Dwdm { from: 18, to: 61 });
    }

    #[test]
    fn cable_family_defaults_lengths() {
        let yaml = r#"
vendor: Acme
families:
  - handle: dac-sfp-plus-10g
    title: Câble DAC SFP+ 10G Direct Attach
    sku_prefix: VAO-DAC10G
    price: "15.00"
    options:
      kind: cable
"#;
        let file = parse_families(yaml).unwrap();
        assert_eq!(file.vendor.as_deref(), Some("Acme"));
        assert_eq!(
            file.families[0].options,
            FamilyOptions::Cable {
                lengths: default_cable_lengths()
            }
        );
    }

    #[test]
    fn rejects_reversed_dwdm_range() {
        let yaml = DWDM_FAMILY.replace("from: 18", "from: 70");
        let err = parse_families(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("reversed")));
    }

    #[test]
    fn rejects_off_grid_cwdm_wavelength() {
        let yaml = r#"
families:
  - handle: cwdm
    title: Module SFP CWDM
    sku_prefix: VAO-CWDM
    price: "45.00"
    options:
      kind: cwdm
      from_nm: 1275
      to_nm: 1610
"#;
        let err = parse_families(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("CWDM grid")));
    }

    #[test]
    fn rejects_duplicate_handles() {
        let yaml = format!(
            "{DWDM_FAMILY}  - handle: dwdm-sfp-plus-10g-40km\n    title: Other\n    sku_prefix: X\n    price: \"1.00\"\n    options:\n      kind: custom\n      name: Couleur\n      values: [Rouge]\n"
        );
        let err = parse_families(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate family handle")));
    }

    #[test]
    fn rejects_empty_custom_values() {
        let yaml = r#"
families:
  - handle: custom
    title: Custom
    sku_prefix: C
    price: "1.00"
    options:
      kind: custom
      name: Couleur
      values: []
"#;
        let err = parse_families(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("values")));
    }

    #[test]
    fn rejects_unknown_option_kind() {
        let yaml = DWDM_FAMILY.replace("kind: dwdm", "kind: ribbon");
        let err = parse_families(&yaml).unwrap_err();
        assert!(matches!(err, ConfigError::FamiliesFileParse(_)));
    }
}
