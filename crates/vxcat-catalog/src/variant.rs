//! Per-row variant rules: split a title into a base title and the option
//! values it encodes (compatibility brand, temperature grade, BiDi
//! direction, WDM channel or wavelength, cable length).

use std::sync::LazyLock;

use regex::Regex;
use vxcat_core::{CompatBrand, VariantOption};

use crate::error::CatalogError;

pub const OPTION_COMPAT: &str = "Compatibilité";
pub const OPTION_TEMPERATURE: &str = "Température";
pub const OPTION_VERSION: &str = "Version";
pub const OPTION_CHANNEL: &str = "Canal (ITU)";
pub const OPTION_WAVELENGTH: &str = "Longueur d'onde";
pub const OPTION_DISTANCE: &str = "Distance";
pub const OPTION_LENGTH: &str = "Longueur";

pub const TEMPERATURE_INDUSTRIAL: &str = "Industriel (-40°C à +85°C)";
pub const TEMPERATURE_STANDARD: &str = "Standard (0°C à +70°C)";
pub const DEFAULT_OPTION_VALUE: &str = "Standard";

/// Shopify's placeholder option for products without variants.
pub const SHOPIFY_DEFAULT_OPTION: &str = "Title";

static TEMPERATURE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:-40\s*/\s*[+±]?85\s*°?\s*C?)|\bIndustriel\b|\bInd\b|-I\b")
        .expect("valid regex")
});
static BIDI_DIRECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(?:BX|BiDi)\d*-?([UD])\b").expect("valid regex"));
static BIDI_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bBiDi\b").expect("valid regex"));
static CHANNEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bCH\d{2}\b").expect("valid regex"));
static WDM_WAVELENGTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d{4}(?:\.\d+)?nm\b").expect("valid regex"));
static WDM_DISTANCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d+(?:\.\d+)?\s?km\b").expect("valid regex"));
static CABLE_LENGTH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d+(?:\.\d+)?\s?m\b").expect("valid regex"));
static WDM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)cwdm|dwdm").expect("valid regex"));
static TUNABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)tunable").expect("valid regex"));
static CABLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bdac\b|\baoc\b|cable|câble").expect("valid regex"));
static EMPTY_PARENS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\s*\)").expect("valid regex"));

/// Ordered compatibility brand matchers; the first matching alias wins.
#[derive(Debug, Clone)]
pub struct CompatRules {
    rules: Vec<(Regex, String)>,
}

impl CompatRules {
    /// Compiles one whole-word, case-insensitive matcher per alias, keeping
    /// brand order and alias order within a brand.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPattern`] if an alias cannot be compiled.
    pub fn from_brands(brands: &[CompatBrand]) -> Result<Self, CatalogError> {
        let mut rules = Vec::new();
        for brand in brands {
            for alias in &brand.aliases {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(alias.trim()));
                let re = Regex::new(&pattern)
                    .map_err(|source| CatalogError::InvalidPattern { pattern, source })?;
                rules.push((re, brand.name.clone()));
            }
        }
        Ok(Self { rules })
    }

    fn find(&self, title: &str) -> Option<&str> {
        self.rules
            .iter()
            .find(|(re, _)| re.is_match(title))
            .map(|(_, brand)| brand.as_str())
    }

    /// Removes every alias token of every brand from `title`.
    fn strip_all(&self, title: &str) -> String {
        self.rules.iter().fold(title.to_string(), |acc, (re, _)| {
            re.replace_all(&acc, " ").into_owned()
        })
    }
}

/// A title split into its shared base and per-variant options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantSplit {
    pub base_title: String,
    pub options: Vec<VariantOption>,
}

/// Title and option names resolved for one row after fill-down.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRow {
    pub title: String,
    pub option_names: [String; 3],
}

/// Carries the last non-empty title and option names down to continuation
/// rows, which Shopify exports with those cells blank.
#[derive(Debug, Clone, Default)]
pub struct FillDown {
    title: Option<String>,
    option_names: [String; 3],
}

impl FillDown {
    /// Advances the accumulator with one row's title and option names.
    ///
    /// Returns `None` when the row has no title and nothing precedes it.
    pub fn resolve(&mut self, title: &str, option_names: [&str; 3]) -> Option<ResolvedRow> {
        let title = title.trim();
        if title.is_empty() {
            // Continuation row: names it lacks come from the product row.
            let inherited = self.title.clone()?;
            let names = std::array::from_fn(|i| {
                let own = option_names[i].trim();
                if own.is_empty() {
                    self.option_names[i].clone()
                } else {
                    own.to_string()
                }
            });
            return Some(ResolvedRow {
                title: inherited,
                option_names: names,
            });
        }

        self.title = Some(title.to_string());
        self.option_names = option_names.map(|n| n.trim().to_string());
        Some(ResolvedRow {
            title: title.to_string(),
            option_names: self.option_names.clone(),
        })
    }
}

fn push_unique(options: &mut Vec<VariantOption>, option: VariantOption) {
    if !options.iter().any(|o| o.name == option.name) {
        options.push(option);
    }
}

fn strip(title: &mut String, range: std::ops::Range<usize>) {
    title.replace_range(range, " ");
}

/// Collapses whitespace, removes empty `()` and trailing `,`/`-`.
#[must_use]
pub fn clean_title(title: &str) -> String {
    let without_parens = EMPTY_PARENS_RE.replace_all(title, " ");
    let collapsed = without_parens.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .trim_end_matches(|c: char| c == ',' || c == '-' || c.is_whitespace())
        .to_string()
}

/// If `title` carries an industrial temperature token, returns the title
/// with every such token removed and cleaned.
#[must_use]
pub fn strip_industrial(title: &str) -> Option<String> {
    if !TEMPERATURE_RE.is_match(title) {
        return None;
    }
    Some(clean_title(&TEMPERATURE_RE.replace_all(title, " ")))
}

/// Splits `title` into a base title and variant options.
///
/// `existing` are the option pairs already on the row; `Title` placeholders
/// are dropped and the rest kept ahead of the options derived from the title.
/// A derived option whose name is already present is not added again.
#[must_use]
pub fn split_variant(title: &str, existing: Vec<VariantOption>, compat: &CompatRules) -> VariantSplit {
    let mut options: Vec<VariantOption> = existing
        .into_iter()
        .filter(|o| {
            !o.name.trim().is_empty()
                && !o.value.trim().is_empty()
                && o.name != SHOPIFY_DEFAULT_OPTION
        })
        .collect();
    let mut working = title.to_string();

    // The first brand is the option value; other brand tokens are dropped too.
    if let Some(brand) = compat.find(&working) {
        let brand = brand.to_string();
        working = compat.strip_all(&working);
        push_unique(&mut options, VariantOption::new(OPTION_COMPAT, brand));
    }

    if TEMPERATURE_RE.is_match(&working) {
        working = TEMPERATURE_RE.replace_all(&working, " ").into_owned();
        push_unique(
            &mut options,
            VariantOption::new(OPTION_TEMPERATURE, TEMPERATURE_INDUSTRIAL),
        );
    } else {
        push_unique(
            &mut options,
            VariantOption::implicit(OPTION_TEMPERATURE, TEMPERATURE_STANDARD),
        );
    }

    if let Some(caps) = BIDI_DIRECTION_RE.captures(&working) {
        let value = if caps[1].eq_ignore_ascii_case("u") {
            "BX-U (Upstream)"
        } else {
            "BX-D (Downstream)"
        };
        let range = caps.get(0).map_or(0..0, |m| m.range());
        strip(&mut working, range);
        working = BIDI_WORD_RE.replace_all(&working, " ").into_owned();
        push_unique(&mut options, VariantOption::new(OPTION_VERSION, value));
    }

    // Rows written by an earlier consolidation carry the channel as an
    // option and no longer in the title; they still take the channel branch.
    let has_channel = options.iter().any(|o| o.name == OPTION_CHANNEL);

    if let Some(m) = CHANNEL_RE.find(&working) {
        let value = m.as_str().to_uppercase();
        let range = m.range();
        strip(&mut working, range);
        push_unique(&mut options, VariantOption::new(OPTION_CHANNEL, value));
    } else if has_channel {
        // Already split; the remaining title is the base.
    } else if WDM_RE.is_match(title) && !TUNABLE_RE.is_match(title) {
        if let Some(m) = WDM_WAVELENGTH_RE.find(&working) {
            let value = m.as_str().to_lowercase();
            let range = m.range();
            strip(&mut working, range);
            push_unique(&mut options, VariantOption::new(OPTION_WAVELENGTH, value));
        }
        if let Some(m) = WDM_DISTANCE_RE.find(&working) {
            let value: String = m.as_str().to_lowercase().split_whitespace().collect();
            let range = m.range();
            strip(&mut working, range);
            push_unique(&mut options, VariantOption::new(OPTION_DISTANCE, value));
        }
    } else if CABLE_RE.is_match(title) {
        if let Some(m) = CABLE_LENGTH_RE.find(&working) {
            let value: String = m.as_str().to_lowercase().split_whitespace().collect();
            let range = m.range();
            strip(&mut working, range);
            push_unique(&mut options, VariantOption::new(OPTION_LENGTH, value));
        }
    }

    VariantSplit {
        base_title: clean_title(&working),
        options,
    }
}

/// Default value used when a consolidated group member lacks an option.
#[must_use]
pub fn default_option_value(name: &str) -> &'static str {
    match name {
        OPTION_TEMPERATURE => TEMPERATURE_STANDARD,
        _ => DEFAULT_OPTION_VALUE,
    }
}

#[cfg(test)]
#[path = "variant_test.rs"]
mod tests;
