use vxcat_core::parse_families;

use super::*;
use crate::table::parse_table;

const FAMILIES: &str = r#"
families:
  - handle: dwdm-sfp-plus-10g-40km
    title: Module SFP+ 10G DWDM 40km
    body: "<p>Module DWDM</p>"
    sku_prefix: VAO-SFP10G-DWDM40
    price: "290.00"
    options:
      kind: dwdm
      from: 17
      to: 20
  - handle: cwdm-sfp-1g-80km
    title: Module SFP 1G CWDM 80km
    sku_prefix: VAO-SFP1G-CWDM80
    price: "45.50"
    options:
      kind: cwdm
      from_nm: 1470
      to_nm: 1530
"#;

fn settings() -> GeneratorSettings {
    GeneratorSettings {
        vendor: "Vaonix".to_string(),
        ttc_multiplier: Decimal::new(120, 2),
    }
}

fn cell<'a>(row: &'a CsvRow, column: &str) -> &'a str {
    row.get(generator_header().require(column).unwrap())
}

// -----------------------------------------------------------------------
// grids
// -----------------------------------------------------------------------

#[test]
fn itu_grid_wavelengths() {
    assert_eq!(format!("{:.2}", itu_wavelength_nm(37)), "1547.72");
    assert_eq!(format!("{:.2}", itu_wavelength_nm(17)), "1563.86");
}

#[test]
fn dwdm_values_carry_channel_and_wavelength() {
    let (name, values) = option_values(&FamilyOptions::Dwdm { from: 37, to: 38 });
    assert_eq!(name, OPTION_CHANNEL);
    assert_eq!(values, ["CH37 (1547.72nm)", "CH38 (1546.92nm)"]);
}

#[test]
fn cwdm_values_step_twenty_nm() {
    let (name, values) = option_values(&FamilyOptions::Cwdm {
        from_nm: 1470,
        to_nm: 1530,
    });
    assert_eq!(name, OPTION_WAVELENGTH);
    assert_eq!(values, ["1470nm", "1490nm", "1510nm", "1530nm"]);
}

// -----------------------------------------------------------------------
// expand_family
// -----------------------------------------------------------------------

#[test]
fn first_row_carries_product_fields() {
    let file = parse_families(FAMILIES).unwrap();
    let rows = expand_family(&file.families[0], &settings()).unwrap();

    assert_eq!(rows.len(), 4);
    let first = &rows[0];
    assert_eq!(cell(first, "Title"), "Module SFP+ 10G DWDM 40km");
    assert_eq!(cell(first, "Body (HTML)"), "<p>Module DWDM</p>");
    assert_eq!(cell(first, "Vendor"), "Vaonix");
    assert_eq!(cell(first, "Published"), "true");
    assert_eq!(cell(first, "Status"), "active");
    assert_eq!(
        cell(first, "Tags"),
        "Speed_10G, FormFactor_SFP+, Distance_40km, Tech_DWDM"
    );
    assert_eq!(cell(first, COLUMN_SPEED), "10G");

    let second = &rows[1];
    assert_eq!(cell(second, "Title"), "");
    assert_eq!(cell(second, "Vendor"), "");
    assert_eq!(cell(second, "Handle"), "dwdm-sfp-plus-10g-40km");
}

#[test]
fn every_row_has_variant_defaults() {
    let file = parse_families(FAMILIES).unwrap();
    let rows = expand_family(&file.families[0], &settings()).unwrap();

    for row in &rows {
        assert_eq!(cell(row, "Option1 Name"), OPTION_CHANNEL);
        assert_eq!(cell(row, "Variant Price"), "290.00");
        assert_eq!(cell(row, COLUMN_PRICE_TTC), "348.00");
        assert_eq!(cell(row, "Variant Inventory Tracker"), "shopify");
        assert_eq!(cell(row, "Variant Inventory Qty"), "0");
        assert_eq!(cell(row, "Variant Inventory Policy"), "deny");
        assert_eq!(cell(row, "Variant Fulfillment Service"), "manual");
        assert_eq!(cell(row, "Variant Requires Shipping"), "true");
        assert_eq!(cell(row, "Variant Taxable"), "true");
        assert_eq!(cell(row, "Variant Weight Unit"), "kg");
    }
    assert_eq!(cell(&rows[0], "Variant SKU"), "VAO-SFP10G-DWDM40-CH17");
    assert_eq!(cell(&rows[0], "Option1 Value"), "CH17 (1563.86nm)");
}

#[test]
fn value_without_alphanumerics_is_invalid() {
    let family = FamilyConfig {
        handle: "custom".to_string(),
        title: "Custom".to_string(),
        body: String::new(),
        sku_prefix: "C".to_string(),
        price: Decimal::ONE,
        inventory_policy: "deny".to_string(),
        status: "active".to_string(),
        options: FamilyOptions::Custom {
            name: "Couleur".to_string(),
            values: vec!["--".to_string()],
        },
    };
    let err = expand_family(&family, &settings()).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidFamily { ref handle, .. } if handle == "custom"));
}

#[test]
fn colliding_skus_are_invalid() {
    let family = FamilyConfig {
        handle: "custom".to_string(),
        title: "Custom".to_string(),
        body: String::new(),
        sku_prefix: "C".to_string(),
        price: Decimal::ONE,
        inventory_policy: "deny".to_string(),
        status: "active".to_string(),
        options: FamilyOptions::Custom {
            name: "Couleur".to_string(),
            values: vec!["Rouge vif".to_string(), "Rouge sombre".to_string()],
        },
    };
    let err = expand_family(&family, &settings()).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidFamily { ref reason, .. } if reason.contains("duplicate SKU")));
}

// -----------------------------------------------------------------------
// generate_catalog
// -----------------------------------------------------------------------

#[test]
fn file_vendor_overrides_settings() {
    let yaml = format!("vendor: Acme\n{FAMILIES}");
    let file = parse_families(&yaml).unwrap();
    let catalog = generate_catalog(&file, &settings(), None).unwrap();

    assert_eq!(catalog.stats.families, 2);
    assert_eq!(catalog.stats.rows_generated, 8);
    assert_eq!(cell(&catalog.rows[0], "Vendor"), "Acme");
}

#[test]
fn base_rows_with_regenerated_handles_are_replaced() {
    let base = parse_table(
        "Handle,Title,Variant Price,Internal Note\n\
         dwdm-sfp-plus-10g-40km,Old DWDM,10,x\n\
         ,,11,y\n\
         keep-me,QSFP28 100G LR4,500,z\n",
    )
    .unwrap();
    let file = parse_families(FAMILIES).unwrap();
    let catalog = generate_catalog(&file, &settings(), Some(&base)).unwrap();

    assert_eq!(catalog.stats.base_rows_replaced, 2);
    assert_eq!(catalog.stats.base_rows_kept, 1);
    assert_eq!(catalog.rows.len(), 1 + 8);

    let handle = catalog.header.require("Handle").unwrap();
    let note = catalog.header.require("Internal Note").unwrap();
    let sku = catalog.header.require("Variant SKU").unwrap();
    assert_eq!(catalog.header.names()[..4], ["Handle", "Title", "Variant Price", "Internal Note"]);
    assert_eq!(catalog.rows[0].get(handle), "keep-me");
    assert_eq!(catalog.rows[0].get(note), "z");
    assert_eq!(catalog.rows[1].get(handle), "dwdm-sfp-plus-10g-40km");
    assert_eq!(catalog.rows[1].get(sku), "VAO-SFP10G-DWDM40-CH17");
    assert_eq!(catalog.rows[1].get(note), "");
}

#[test]
fn legacy_wdm_listings_are_replaced_with_their_continuation_rows() {
    let base = parse_table(
        "Handle,Title,Tags,Variant Price\n\
         dwdm-sfp-10g-40km-ch17,DWDM SFP+ 10G 40km CH17,,10\n\
         ,,,10\n\
         legacy-1470,Module SFP 1G 1470nm 80km,\"Speed_1G, Tech_CWDM\",40\n\
         dac-sfp-1m,Câble DAC SFP+ 10G 1m,,12\n\
         keep-me,QSFP28 100G LR4,,500\n",
    )
    .unwrap();
    let file = parse_families(FAMILIES).unwrap();
    let catalog = generate_catalog(&file, &settings(), Some(&base)).unwrap();

    assert_eq!(catalog.stats.base_rows_replaced, 3);
    assert_eq!(catalog.stats.base_rows_kept, 2);

    let handle = catalog.header.require("Handle").unwrap();
    let kept: Vec<&str> = catalog.rows[..2].iter().map(|r| r.get(handle)).collect();
    assert_eq!(kept, ["dac-sfp-1m", "keep-me"]);
}

#[test]
fn cable_family_replaces_only_the_cable_type_it_names() {
    let yaml = r"
families:
  - handle: dac-sfp-plus-10g
    title: Câble DAC SFP+ 10G
    sku_prefix: VAO-DAC10G
    price: '25.00'
    options:
      kind: cable
";
    let base = parse_table(
        "Handle,Title,Variant Price\n\
         dac-sfp-1m,Câble SFP+ 10G 1m,12\n\
         aoc-sfp-1m,Câble AOC SFP+ 10G 1m,30\n",
    )
    .unwrap();
    let file = parse_families(yaml).unwrap();
    let catalog = generate_catalog(&file, &settings(), Some(&base)).unwrap();

    assert_eq!(catalog.stats.base_rows_replaced, 1);
    let handle = catalog.header.require("Handle").unwrap();
    assert_eq!(catalog.rows[0].get(handle), "aoc-sfp-1m");
}
