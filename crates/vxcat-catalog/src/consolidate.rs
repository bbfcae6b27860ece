//! Groups Shopify rows that differ only by a variant attribute into one
//! product with up to three option dimensions.
//!
//! [`consolidate`] does the grouping and option normalisation;
//! [`render_products`] turns the groups back into rows with handles, option
//! columns, backfilled prices and the derived TTC/metafield columns.

use std::collections::{HashMap, HashSet};

use regex::Regex;
use rust_decimal::Decimal;
use vxcat_core::{FormFactor, Media, Speed, VariantOption};

use crate::error::CatalogError;
use crate::extract::extract_spec;
use crate::pricing::{format_price, parse_price, price_ttc, PriceStrategy};
use crate::table::{CsvRow, HeaderIndex};
use crate::tags::enrich_tag_cell;
use crate::variant::{
    default_option_value, split_variant, CompatRules, FillDown, SHOPIFY_DEFAULT_OPTION,
};

/// Shopify allows at most three option dimensions per product.
pub const MAX_OPTIONS: usize = 3;

pub const COLUMN_HANDLE: &str = "Handle";
pub const COLUMN_TITLE: &str = "Title";
pub const COLUMN_TAGS: &str = "Tags";
pub const COLUMN_PRICE: &str = "Variant Price";
pub const COLUMN_PRICE_TTC: &str = "Variant Price TTC";
pub const COLUMN_RANGE: &str = "Metafield: custom.range";
pub const COLUMN_SPEED: &str = "Metafield: custom.speed";
pub const COLUMN_FORM_FACTOR: &str = "Metafield: custom.form_factor";
pub const COLUMN_MEDIA: &str = "Metafield: custom.media";

pub const OPTION_NAME_COLUMNS: [&str; MAX_OPTIONS] =
    ["Option1 Name", "Option2 Name", "Option3 Name"];
pub const OPTION_VALUE_COLUMNS: [&str; MAX_OPTIONS] =
    ["Option1 Value", "Option2 Value", "Option3 Value"];

const SHOPIFY_DEFAULT_VALUE: &str = "Default Title";

#[derive(Debug, Clone, Copy)]
struct Columns {
    handle: usize,
    title: usize,
    tags: usize,
    price: usize,
    option_names: [usize; MAX_OPTIONS],
    option_values: [usize; MAX_OPTIONS],
}

impl Columns {
    fn require(index: &HeaderIndex) -> Result<Self, CatalogError> {
        let mut option_names = [0; MAX_OPTIONS];
        let mut option_values = [0; MAX_OPTIONS];
        for i in 0..MAX_OPTIONS {
            option_names[i] = index.require(OPTION_NAME_COLUMNS[i])?;
            option_values[i] = index.require(OPTION_VALUE_COLUMNS[i])?;
        }
        Ok(Self {
            handle: index.require(COLUMN_HANDLE)?,
            title: index.require(COLUMN_TITLE)?,
            tags: index.require(COLUMN_TAGS)?,
            price: index.require(COLUMN_PRICE)?,
            option_names,
            option_values,
        })
    }
}

/// Inputs to [`consolidate`] beyond the rows themselves.
#[derive(Debug, Clone)]
pub struct ConsolidateOptions {
    pub compat: CompatRules,
    /// Rows whose resolved title matches any of these are dropped.
    pub exclude: Vec<Regex>,
}

impl ConsolidateOptions {
    #[must_use]
    pub fn new(compat: CompatRules) -> Self {
        Self {
            compat,
            exclude: Vec::new(),
        }
    }

    /// Adds title exclusion patterns.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPattern`] for a pattern that does not compile.
    pub fn with_exclusions<S: AsRef<str>>(mut self, patterns: &[S]) -> Result<Self, CatalogError> {
        for pattern in patterns {
            let pattern = pattern.as_ref();
            let re = Regex::new(pattern).map_err(|source| CatalogError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
            self.exclude.push(re);
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedVariant {
    /// The input row with its `Tags` cell already enriched.
    pub row: CsvRow,
    pub options: Vec<VariantOption>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsolidatedProduct {
    pub base_title: String,
    /// Slug of the base title when consolidated, else the first row's handle.
    pub handle: String,
    /// `false` for singletons and groups that only carry implicit options;
    /// those rows are written back unchanged.
    pub consolidated: bool,
    pub variants: Vec<GroupedVariant>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsolidateStats {
    pub rows_read: usize,
    /// Rows with no title and no preceding product row.
    pub rows_skipped: usize,
    pub rows_excluded: usize,
    pub groups: usize,
    pub consolidated_groups: usize,
    /// Option dimensions dropped past [`MAX_OPTIONS`], summed over groups.
    pub options_dropped: usize,
    pub duplicate_combinations: usize,
}

#[derive(Debug, Clone)]
pub struct Consolidation {
    pub products: Vec<ConsolidatedProduct>,
    pub stats: ConsolidateStats,
}

/// Groups rows by base title and normalises each group's options.
///
/// Groups keep first-seen order. See the module docs for the full pipeline.
///
/// # Errors
///
/// Returns [`CatalogError::MissingColumn`] if any required Shopify column
/// is absent from `index`.
pub fn consolidate(
    rows: &[CsvRow],
    index: &HeaderIndex,
    options: &ConsolidateOptions,
) -> Result<Consolidation, CatalogError> {
    let cols = Columns::require(index)?;
    let mut stats = ConsolidateStats::default();
    let mut fill = FillDown::default();
    let mut groups: Vec<(String, Vec<GroupedVariant>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (line, row) in rows.iter().enumerate() {
        stats.rows_read += 1;

        let names = cols.option_names.map(|idx| row.get(idx));
        let Some(resolved) = fill.resolve(row.get(cols.title), names) else {
            stats.rows_skipped += 1;
            tracing::warn!(row = line + 1, "skipping row with no title and no product row above it");
            continue;
        };

        if options.exclude.iter().any(|re| re.is_match(&resolved.title)) {
            stats.rows_excluded += 1;
            tracing::debug!(row = line + 1, title = %resolved.title, "row excluded by pattern");
            continue;
        }

        let tags = enrich_tag_cell(&resolved.title, row.get(cols.tags));
        let row = row.clone().with_cell(cols.tags, tags);

        let existing = resolved
            .option_names
            .iter()
            .zip(cols.option_values)
            .filter_map(|(name, value_idx)| {
                let value = row.get(value_idx).trim();
                (!name.is_empty() && !value.is_empty())
                    .then(|| VariantOption::new(name.clone(), value))
            })
            .collect();

        let split = split_variant(&resolved.title, existing, &options.compat);
        let variant = GroupedVariant {
            row,
            options: split.options,
        };

        match positions.get(&split.base_title) {
            Some(&pos) => groups[pos].1.push(variant),
            None => {
                positions.insert(split.base_title.clone(), groups.len());
                groups.push((split.base_title, vec![variant]));
            }
        }
    }

    stats.groups = groups.len();
    let products = groups
        .into_iter()
        .map(|(base_title, variants)| unify_group(base_title, variants, cols.handle, &mut stats))
        .collect();

    Ok(Consolidation { products, stats })
}

fn unify_group(
    base_title: String,
    variants: Vec<GroupedVariant>,
    handle_col: usize,
    stats: &mut ConsolidateStats,
) -> ConsolidatedProduct {
    let has_explicit = variants
        .iter()
        .any(|v| v.options.iter().any(|o| !o.implicit));

    if variants.len() < 2 || !has_explicit {
        let handle = variants
            .first()
            .map(|v| v.row.get(handle_col).to_string())
            .unwrap_or_default();
        return ConsolidatedProduct {
            base_title,
            handle,
            consolidated: false,
            variants,
        };
    }

    let mut names = ordered_option_names(&variants);
    if names.len() > MAX_OPTIONS {
        let dropped = names.split_off(MAX_OPTIONS);
        stats.options_dropped += dropped.len();
        tracing::warn!(
            base_title = %base_title,
            dropped = ?dropped,
            "group has more than {MAX_OPTIONS} option dimensions; extra dimensions dropped"
        );
    }

    let mut combinations = HashSet::new();
    let variants: Vec<GroupedVariant> = variants
        .into_iter()
        .map(|variant| {
            let options: Vec<VariantOption> = names
                .iter()
                .map(|name| {
                    variant
                        .options
                        .iter()
                        .find(|o| &o.name == name)
                        .cloned()
                        .unwrap_or_else(|| {
                            VariantOption::implicit(name.clone(), default_option_value(name))
                        })
                })
                .collect();

            let values: Vec<String> = options.iter().map(|o| o.value.clone()).collect();
            if !combinations.insert(values.clone()) {
                stats.duplicate_combinations += 1;
                tracing::warn!(
                    base_title = %base_title,
                    values = ?values,
                    "duplicate option combination in group"
                );
            }

            GroupedVariant {
                row: variant.row,
                options,
            }
        })
        .collect();

    stats.consolidated_groups += 1;
    tracing::debug!(
        base_title = %base_title,
        variants = variants.len(),
        options = ?names,
        "consolidated group"
    );

    ConsolidatedProduct {
        handle: slugify(&base_title),
        base_title,
        consolidated: true,
        variants,
    }
}

/// Names with at least one explicit value first, then implicit-only names;
/// each in first-seen order.
fn ordered_option_names(variants: &[GroupedVariant]) -> Vec<String> {
    let mut explicit: Vec<String> = Vec::new();
    let mut implicit: Vec<String> = Vec::new();

    for option in variants.iter().flat_map(|v| &v.options) {
        if option.implicit {
            if !implicit.contains(&option.name) {
                implicit.push(option.name.clone());
            }
        } else if !explicit.contains(&option.name) {
            explicit.push(option.name.clone());
        }
    }

    implicit.retain(|name| !explicit.contains(name));
    explicit.extend(implicit);
    explicit
}

fn fold_accent(c: char) -> char {
    match c {
        'à' | 'â' | 'ä' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'î' | 'ï' => 'i',
        'ô' | 'ö' => 'o',
        'ù' | 'û' | 'ü' => 'u',
        'ç' => 'c',
        other => other,
    }
}

/// URL handle for a title: lower-case, French accents folded to ASCII,
/// every run of other characters collapsed to one `-`, no leading or
/// trailing `-`.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars().flat_map(char::to_lowercase).map(fold_accent) {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Output header: the input header plus any missing derived columns.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    pub header: HeaderIndex,
    price_ttc: usize,
    range: usize,
    speed: usize,
    form_factor: usize,
    media: usize,
}

impl OutputLayout {
    #[must_use]
    pub fn extend(input: &HeaderIndex) -> Self {
        let mut header = input.clone();
        let price_ttc = header.ensure(COLUMN_PRICE_TTC);
        let range = header.ensure(COLUMN_RANGE);
        let speed = header.ensure(COLUMN_SPEED);
        let form_factor = header.ensure(COLUMN_FORM_FACTOR);
        let media = header.ensure(COLUMN_MEDIA);
        Self {
            header,
            price_ttc,
            range,
            speed,
            form_factor,
            media,
        }
    }
}

/// Pricing inputs for [`render_products`].
pub struct RenderSettings<'a> {
    pub pricing: &'a dyn PriceStrategy,
    /// `1 + VAT rate`.
    pub ttc_multiplier: Decimal,
}

#[derive(Debug, Clone)]
pub struct Rendered {
    pub header: HeaderIndex,
    pub rows: Vec<CsvRow>,
    pub prices_backfilled: usize,
}

/// Writes groups back to rows.
///
/// Consolidated groups get the group handle, the base title and rewritten
/// option columns on every row. All rows get price backfill, the TTC price
/// and any empty metafield cells filled from the base title's spec.
///
/// # Errors
///
/// Returns [`CatalogError::MissingColumn`] if any required Shopify column
/// is absent from `index`.
pub fn render_products(
    products: &[ConsolidatedProduct],
    index: &HeaderIndex,
    settings: &RenderSettings<'_>,
) -> Result<Rendered, CatalogError> {
    let cols = Columns::require(index)?;
    let layout = OutputLayout::extend(index);
    let mut rows = Vec::with_capacity(products.iter().map(|p| p.variants.len()).sum());
    let mut prices_backfilled = 0usize;

    for product in products {
        let spec = extract_spec(&product.base_title);
        let metafields = [
            (layout.range, spec.distance.clone().unwrap_or_default()),
            (layout.speed, spec.speed.map_or("", Speed::as_str).to_string()),
            (
                layout.form_factor,
                spec.form_factor.map_or("", FormFactor::as_str).to_string(),
            ),
            (layout.media, spec.media.map_or("", Media::as_str).to_string()),
        ];

        for variant in &product.variants {
            let mut row = variant.row.clone().padded(layout.header.len());

            if product.consolidated {
                row = write_options(row, &cols, &variant.options)
                    .with_cell(cols.handle, product.handle.as_str())
                    .with_cell(cols.title, product.base_title.as_str());
            }

            let mut price = parse_price(row.get(cols.price));
            if price.is_zero() {
                let first_value = variant.options.first().map_or("", |o| o.value.as_str());
                if let Some(backfilled) = settings.pricing.backfill(&product.base_title, first_value)
                {
                    price = backfilled;
                    row = row.with_cell(cols.price, format_price(price));
                    prices_backfilled += 1;
                }
            }
            row = row.with_cell(
                layout.price_ttc,
                format_price(price_ttc(price, settings.ttc_multiplier)),
            );

            for (idx, value) in &metafields {
                if row.get(*idx).is_empty() {
                    row = row.with_cell(*idx, value.as_str());
                }
            }

            rows.push(row);
        }
    }

    Ok(Rendered {
        header: layout.header,
        rows,
        prices_backfilled,
    })
}

fn write_options(row: CsvRow, cols: &Columns, options: &[VariantOption]) -> CsvRow {
    let cleared = (0..MAX_OPTIONS).fold(row, |row, i| {
        row.with_cell(cols.option_names[i], "")
            .with_cell(cols.option_values[i], "")
    });

    if options.is_empty() {
        return cleared
            .with_cell(cols.option_names[0], SHOPIFY_DEFAULT_OPTION)
            .with_cell(cols.option_values[0], SHOPIFY_DEFAULT_VALUE);
    }

    options
        .iter()
        .take(MAX_OPTIONS)
        .enumerate()
        .fold(cleared, |row, (i, option)| {
            row.with_cell(cols.option_names[i], option.name.as_str())
                .with_cell(cols.option_values[i], option.value.as_str())
        })
}

#[cfg(test)]
#[path = "consolidate_test.rs"]
mod tests;
