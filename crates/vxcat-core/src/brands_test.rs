use std::path::Path;

use super::*;

#[test]
fn default_brands_put_hp_hw_before_hp() {
    let brands = default_brands();
    assert_eq!(brands[0].name, "HP");
    assert_eq!(brands[0].aliases, vec!["HP HW", "HP"]);
}

#[test]
fn default_brands_map_hw_to_huawei() {
    let brands = default_brands();
    let huawei = brands
        .iter()
        .find(|b| b.name == "Huawei")
        .expect("Huawei in defaults");
    assert!(huawei.aliases.iter().any(|a| a == "HW"));
}

#[test]
fn default_brands_pass_validation() {
    let file = BrandsFile {
        brands: default_brands(),
    };
    assert!(validate_brands(&file).is_ok());
}

#[test]
fn parse_brands_valid_yaml() {
    let yaml = "brands:\n  - name: Cisco\n    aliases: [Cisco]\n  - name: Mellanox\n    aliases: [Mellanox, NVIDIA]\n";
    let file = parse_brands(yaml).expect("valid yaml");
    assert_eq!(file.brands.len(), 2);
    assert_eq!(file.brands[1].aliases, vec!["Mellanox", "NVIDIA"]);
}

#[test]
fn parse_brands_rejects_empty_name() {
    let yaml = "brands:\n  - name: \"  \"\n    aliases: [X]\n";
    let err = parse_brands(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("non-empty")));
}

#[test]
fn parse_brands_rejects_duplicate_name_case_insensitive() {
    let yaml = "brands:\n  - name: Cisco\n    aliases: [Cisco]\n  - name: cisco\n    aliases: [CSCO]\n";
    let err = parse_brands(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("duplicate brand name")));
}

#[test]
fn parse_brands_rejects_missing_aliases() {
    let yaml = "brands:\n  - name: Cisco\n    aliases: []\n";
    let err = parse_brands(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("no aliases")));
}

#[test]
fn parse_brands_rejects_alias_shared_between_brands() {
    let yaml = "brands:\n  - name: HP\n    aliases: [HW]\n  - name: Huawei\n    aliases: [hw]\n";
    let err = parse_brands(yaml).unwrap_err();
    assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("more than once")));
}

#[test]
fn parse_brands_malformed_yaml() {
    let err = parse_brands("brands: [not: a: list").unwrap_err();
    assert!(matches!(err, ConfigError::BrandsFileParse(_)));
}

#[test]
fn load_brands_missing_file() {
    let err = load_brands(Path::new("/nonexistent/brands.yaml")).unwrap_err();
    assert!(
        matches!(err, ConfigError::BrandsFileIo { ref path, .. } if path.contains("nonexistent"))
    );
}
