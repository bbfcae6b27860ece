//! Expands master product families into Shopify variant rows.

use std::collections::HashSet;

use rust_decimal::Decimal;
use vxcat_core::families::CWDM_STEP_NM;
use vxcat_core::{
    FamiliesFile, FamilyConfig, FamilyOptions, FormFactor, Media, Speed, Technology,
};

use crate::consolidate::{
    COLUMN_FORM_FACTOR, COLUMN_HANDLE, COLUMN_MEDIA, COLUMN_PRICE, COLUMN_PRICE_TTC,
    COLUMN_RANGE, COLUMN_SPEED, COLUMN_TAGS, COLUMN_TITLE, OPTION_NAME_COLUMNS,
    OPTION_VALUE_COLUMNS,
};
use crate::error::CatalogError;
use crate::extract::extract_spec;
use crate::pricing::{format_price, price_ttc};
use crate::table::{CsvRow, CsvTable, HeaderIndex};
use crate::tags::{join_tags, split_tags, synthesize_tags};
use crate::variant::{OPTION_CHANNEL, OPTION_LENGTH, OPTION_WAVELENGTH};

/// Speed of light in vacuum, km/s; divided by a frequency in THz gives nm.
const SPEED_OF_LIGHT: f64 = 299_792.458;
/// ITU-T G.694.1 100 GHz grid: channel `n` sits at `190.0 + 0.1 * n` THz.
const ITU_GRID_BASE_THZ: f64 = 190.0;
const ITU_GRID_STEP_THZ: f64 = 0.1;

/// Standard Shopify product CSV columns written by the generator.
pub const SHOPIFY_COLUMNS: &[&str] = &[
    "Handle",
    "Title",
    "Body (HTML)",
    "Vendor",
    "Product Category",
    "Type",
    "Tags",
    "Published",
    "Option1 Name",
    "Option1 Value",
    "Option2 Name",
    "Option2 Value",
    "Option3 Name",
    "Option3 Value",
    "Variant SKU",
    "Variant Grams",
    "Variant Inventory Tracker",
    "Variant Inventory Qty",
    "Variant Inventory Policy",
    "Variant Fulfillment Service",
    "Variant Price",
    "Variant Compare At Price",
    "Variant Requires Shipping",
    "Variant Taxable",
    "Variant Barcode",
    "Image Src",
    "Image Position",
    "Image Alt Text",
    "Gift Card",
    "SEO Title",
    "SEO Description",
    "Variant Image",
    "Variant Weight Unit",
    "Variant Tax Code",
    "Cost per item",
    "Status",
    COLUMN_PRICE_TTC,
    COLUMN_RANGE,
    COLUMN_SPEED,
    COLUMN_FORM_FACTOR,
    COLUMN_MEDIA,
];

/// Header for generated catalogs.
#[must_use]
pub fn generator_header() -> HeaderIndex {
    HeaderIndex::new(SHOPIFY_COLUMNS.iter().map(|c| (*c).to_string()).collect())
}

/// Centre wavelength in nm of ITU 100 GHz grid channel `channel`.
#[must_use]
pub fn itu_wavelength_nm(channel: u8) -> f64 {
    SPEED_OF_LIGHT / (ITU_GRID_BASE_THZ + ITU_GRID_STEP_THZ * f64::from(channel))
}

/// Option name and ordered values for a family.
#[must_use]
pub fn option_values(options: &FamilyOptions) -> (String, Vec<String>) {
    match options {
        FamilyOptions::Dwdm { from, to } => (
            OPTION_CHANNEL.to_string(),
            (*from..=*to)
                .map(|ch| format!("CH{ch:02} ({:.2}nm)", itu_wavelength_nm(ch)))
                .collect(),
        ),
        FamilyOptions::Cwdm { from_nm, to_nm } => (
            OPTION_WAVELENGTH.to_string(),
            (*from_nm..=*to_nm)
                .step_by(usize::from(CWDM_STEP_NM))
                .map(|nm| format!("{nm}nm"))
                .collect(),
        ),
        FamilyOptions::Cable { lengths } => (OPTION_LENGTH.to_string(), lengths.clone()),
        FamilyOptions::Custom { name, values } => (name.clone(), values.clone()),
    }
}

/// SKU suffix for an option value: its first word, alphanumerics only.
fn sku_suffix(value: &str) -> String {
    value
        .split_whitespace()
        .next()
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

/// Per-catalog settings for [`expand_family`].
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub vendor: String,
    /// `1 + VAT rate`.
    pub ttc_multiplier: Decimal,
}

/// Expands one family into one row per option value, laid out on
/// [`generator_header`].
///
/// # Errors
///
/// Returns [`CatalogError::InvalidFamily`] if a value yields an empty SKU
/// suffix or two values yield the same SKU.
pub fn expand_family(
    family: &FamilyConfig,
    settings: &GeneratorSettings,
) -> Result<Vec<CsvRow>, CatalogError> {
    let header = generator_header();
    let col = |name: &str| header.require(name);
    let (option_name, values) = option_values(&family.options);

    let spec = extract_spec(&family.title);
    let tags = join_tags(&synthesize_tags(&spec, &[]));
    let price = format_price(family.price);
    let ttc = format_price(price_ttc(family.price, settings.ttc_multiplier));

    let mut skus = HashSet::new();
    let mut rows = Vec::with_capacity(values.len());

    for (position, value) in values.iter().enumerate() {
        let suffix = sku_suffix(value);
        if suffix.is_empty() {
            return Err(CatalogError::InvalidFamily {
                handle: family.handle.clone(),
                reason: format!("option value '{value}' has no alphanumeric SKU suffix"),
            });
        }
        let sku = format!("{}-{suffix}", family.sku_prefix);
        if !skus.insert(sku.clone()) {
            return Err(CatalogError::InvalidFamily {
                handle: family.handle.clone(),
                reason: format!("duplicate SKU '{sku}'"),
            });
        }

        let mut row = CsvRow::default()
            .padded(header.len())
            .with_cell(col(COLUMN_HANDLE)?, family.handle.as_str())
            .with_cell(col(OPTION_NAME_COLUMNS[0])?, option_name.as_str())
            .with_cell(col(OPTION_VALUE_COLUMNS[0])?, value.as_str())
            .with_cell(col("Variant SKU")?, sku)
            .with_cell(col("Variant Grams")?, "0")
            .with_cell(col("Variant Inventory Tracker")?, "shopify")
            .with_cell(col("Variant Inventory Qty")?, "0")
            .with_cell(col("Variant Inventory Policy")?, family.inventory_policy.as_str())
            .with_cell(col("Variant Fulfillment Service")?, "manual")
            .with_cell(col(COLUMN_PRICE)?, price.as_str())
            .with_cell(col("Variant Requires Shipping")?, "true")
            .with_cell(col("Variant Taxable")?, "true")
            .with_cell(col("Variant Weight Unit")?, "kg")
            .with_cell(col(COLUMN_PRICE_TTC)?, ttc.as_str());

        if position == 0 {
            row = row
                .with_cell(col(COLUMN_TITLE)?, family.title.as_str())
                .with_cell(col("Body (HTML)")?, family.body.as_str())
                .with_cell(col("Vendor")?, settings.vendor.as_str())
                .with_cell(col(COLUMN_TAGS)?, tags.as_str())
                .with_cell(col("Published")?, "true")
                .with_cell(col("Gift Card")?, "false")
                .with_cell(col("Status")?, family.status.as_str())
                .with_cell(col(COLUMN_RANGE)?, spec.distance.clone().unwrap_or_default())
                .with_cell(col(COLUMN_SPEED)?, spec.speed.map_or("", Speed::as_str))
                .with_cell(
                    col(COLUMN_FORM_FACTOR)?,
                    spec.form_factor.map_or("", FormFactor::as_str),
                )
                .with_cell(col(COLUMN_MEDIA)?, spec.media.map_or("", Media::as_str));
        }

        rows.push(row);
    }

    Ok(rows)
}

/// Technologies whose legacy per-variant listings a family supersedes.
///
/// Cable families supersede the cable technologies named in their title,
/// or both DAC and AOC when the title names neither.
fn superseded_technologies(family: &FamilyConfig) -> Vec<Technology> {
    match &family.options {
        FamilyOptions::Dwdm { .. } => vec![Technology::Dwdm],
        FamilyOptions::Cwdm { .. } => vec![Technology::Cwdm],
        FamilyOptions::Cable { .. } => {
            let named: Vec<Technology> = extract_spec(&family.title)
                .technology
                .into_iter()
                .filter(|t| matches!(t, Technology::Dac | Technology::Aoc))
                .collect();
            if named.is_empty() {
                vec![Technology::Dac, Technology::Aoc]
            } else {
                named
            }
        }
        FamilyOptions::Custom { .. } => Vec::new(),
    }
}

/// Whether a base row belongs to a listing of one of `technologies`: its
/// title names the technology, it carries the `Tech_` tag, or, for cables,
/// its handle contains the technology code.
fn is_legacy_listing(title: &str, tags: &str, handle: &str, technologies: &[Technology]) -> bool {
    let title = title.to_uppercase();
    let tags: Vec<String> = split_tags(tags).iter().map(|t| t.to_uppercase()).collect();
    let handle = handle.to_lowercase();

    technologies.iter().any(|tech| {
        let code = tech.as_str();
        title.contains(code)
            || tags.iter().any(|t| t.strip_prefix("TECH_") == Some(code))
            || (matches!(tech, Technology::Dac | Technology::Aoc)
                && handle.contains(&code.to_lowercase()))
    })
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateStats {
    pub families: usize,
    pub rows_generated: usize,
    /// Base rows dropped because a generated family reuses their handle.
    pub base_rows_replaced: usize,
    pub base_rows_kept: usize,
}

/// Generated catalog ready to be written.
#[derive(Debug, Clone)]
pub struct GeneratedCatalog {
    pub header: HeaderIndex,
    pub rows: Vec<CsvRow>,
    pub stats: GenerateStats,
}

/// Expands every family in `file`. When `base` is given, its rows come
/// first, minus the products a family supersedes: those whose handle a
/// family regenerates and the legacy DWDM, CWDM or cable listings of the
/// technologies the families cover. A product is dropped with all of its
/// rows. Generated rows are mapped onto the base header by column name,
/// appending missing columns.
///
/// The file's own `vendor` takes precedence over `settings.vendor`.
///
/// # Errors
///
/// Returns [`CatalogError::MissingColumn`] if `base` has no `Handle`
/// column, or any error from [`expand_family`].
pub fn generate_catalog(
    file: &FamiliesFile,
    settings: &GeneratorSettings,
    base: Option<&CsvTable>,
) -> Result<GeneratedCatalog, CatalogError> {
    let settings = GeneratorSettings {
        vendor: file.vendor.clone().unwrap_or_else(|| settings.vendor.clone()),
        ttc_multiplier: settings.ttc_multiplier,
    };

    let mut generated = Vec::new();
    for family in &file.families {
        let rows = expand_family(family, &settings)?;
        tracing::debug!(handle = %family.handle, variants = rows.len(), "expanded family");
        generated.extend(rows);
    }

    let mut stats = GenerateStats {
        families: file.families.len(),
        rows_generated: generated.len(),
        ..GenerateStats::default()
    };

    let Some(base) = base else {
        return Ok(GeneratedCatalog {
            header: generator_header(),
            rows: generated,
            stats,
        });
    };

    let handle_col = base.header.require(COLUMN_HANDLE)?;
    let title_col = base.header.get(COLUMN_TITLE);
    let tags_col = base.header.get(COLUMN_TAGS);
    fn cell(row: &CsvRow, col: Option<usize>) -> &str {
        col.map_or("", |idx| row.get(idx))
    }

    let mut technologies: Vec<Technology> = Vec::new();
    for tech in file.families.iter().flat_map(superseded_technologies) {
        if !technologies.contains(&tech) {
            technologies.push(tech);
        }
    }

    // Continuation rows have an empty handle and belong to the last named one.
    let effective_handles: Vec<String> = base
        .rows
        .iter()
        .scan(String::new(), |current, row| {
            let handle = row.get(handle_col).trim();
            if !handle.is_empty() {
                *current = handle.to_string();
            }
            Some(current.clone())
        })
        .collect();

    let mut superseded: HashSet<&str> = file.families.iter().map(|f| f.handle.as_str()).collect();
    for (row, handle) in base.rows.iter().zip(&effective_handles) {
        if is_legacy_listing(cell(row, title_col), cell(row, tags_col), handle, &technologies) {
            superseded.insert(handle.as_str());
        }
    }
    tracing::debug!(
        products = superseded.len(),
        technologies = ?technologies,
        "base products superseded by families"
    );

    let mut header = base.header.clone();
    let source = generator_header();
    let mapping: Vec<usize> = source.names().iter().map(|name| header.ensure(name)).collect();
    let width = header.len();

    let mut rows = Vec::with_capacity(base.rows.len() + generated.len());
    for (row, handle) in base.rows.iter().zip(&effective_handles) {
        if superseded.contains(handle.as_str()) {
            stats.base_rows_replaced += 1;
        } else {
            stats.base_rows_kept += 1;
            rows.push(row.clone().padded(width));
        }
    }

    rows.extend(generated.iter().map(|row| {
        mapping
            .iter()
            .enumerate()
            .fold(CsvRow::default().padded(width), |out, (src, &dst)| {
                out.with_cell(dst, row.get(src))
            })
    }));

    Ok(GeneratedCatalog {
        header,
        rows,
        stats,
    })
}

#[cfg(test)]
#[path = "families_test.rs"]
mod tests;
