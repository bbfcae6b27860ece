//! Title-driven spec extraction.
//!
//! Each attribute is read by an ordered `(pattern, value)` table applied to
//! the lower-cased title; the first matching row wins. Technology is the
//! exception and collects every matching row in table order.

use std::sync::LazyLock;

use regex::Regex;
use vxcat_core::{FormFactor, Media, SpecRecord, Speed, Technology};

type RuleTable<T> = Vec<(Regex, T)>;

fn rules<T: Copy>(table: &[(&str, T)]) -> RuleTable<T> {
    table
        .iter()
        .map(|(pattern, value)| (Regex::new(pattern).expect("valid regex"), *value))
        .collect()
}

fn first_match<T: Copy>(table: &[(Regex, T)], haystack: &str) -> Option<T> {
    table
        .iter()
        .find(|(re, _)| re.is_match(haystack))
        .map(|(_, value)| *value)
}

/// Bare `sfp` is last so every more specific SFP family is tried first.
static FORM_FACTOR_RULES: LazyLock<RuleTable<FormFactor>> = LazyLock::new(|| {
    rules(&[
        (r"qsfp-dd|qsfpdd", FormFactor::QsfpDd),
        (r"qsfp28", FormFactor::Qsfp28),
        (r"qsfp56", FormFactor::Qsfp56),
        (r"qsfp112", FormFactor::Qsfp112),
        (r"qsfp\+", FormFactor::QsfpPlus),
        (r"sfp-dd|sfpdd", FormFactor::SfpDd),
        (r"sfp28", FormFactor::Sfp28),
        (r"sfp56", FormFactor::Sfp56),
        (r"sfp\+", FormFactor::SfpPlus),
        (r"xfp", FormFactor::Xfp),
        (r"cfp2", FormFactor::Cfp2),
        (r"cfp4", FormFactor::Cfp4),
        (r"cfp", FormFactor::Cfp),
        (r"osfp", FormFactor::Osfp),
        (r"dsfp", FormFactor::Dsfp),
        (r"\bsfp\b", FormFactor::Sfp),
    ])
});

/// Highest rate first. Needles are written without the leading guard; see
/// [`speed_pattern`].
const SPEED_NEEDLES: &[(&[&str], Speed)] = &[
    (&["1.6t", "1600g"], Speed::T1_6),
    (&["800g"], Speed::G800),
    (&["400g"], Speed::G400),
    (&["200g"], Speed::G200),
    (&["100g"], Speed::G100),
    (&["56g"], Speed::G56),
    (&["50g"], Speed::G50),
    (&["40g"], Speed::G40),
    (&["32g"], Speed::G32),
    (&["25g"], Speed::G25),
    (&["16g"], Speed::G16),
    (&["10g"], Speed::G10),
    (&["8g"], Speed::G8),
    (&["2.5g", "2,5g"], Speed::G2_5),
    (&["1.25g", "1g", "1000base"], Speed::G1),
    (&["100base", "100m"], Speed::M100),
];

/// A needle must not follow a digit, `.` or `,`, so `1.25g` never reads as
/// 25G and `100g` never as 10G. The `regex` crate has no look-behind, hence
/// the explicit start-or-guard group.
fn speed_pattern(needles: &[&str]) -> String {
    let alternatives = needles
        .iter()
        .map(|n| {
            let escaped = regex::escape(n);
            // "100m" is a token, not the prefix of "100mw" or similar.
            if n.ends_with('m') {
                format!(r"{escaped}\b")
            } else {
                escaped
            }
        })
        .collect::<Vec<_>>()
        .join("|");
    format!(r"(?:^|[^0-9.,])(?:{alternatives})")
}

static SPEED_RULES: LazyLock<RuleTable<Speed>> = LazyLock::new(|| {
    SPEED_NEEDLES
        .iter()
        .map(|(needles, speed)| {
            (
                Regex::new(&speed_pattern(needles)).expect("valid regex"),
                *speed,
            )
        })
        .collect()
});

static DISTANCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?\s?(?:km|m))\b").expect("valid regex"));

static TECHNOLOGY_RULES: LazyLock<RuleTable<Technology>> = LazyLock::new(|| {
    rules(&[
        (r"dwdm", Technology::Dwdm),
        (r"cwdm", Technology::Cwdm),
        (r"bidi|\bbx", Technology::BiDi),
        (r"tunable", Technology::Tunable),
        (r"\bdac\b", Technology::Dac),
        (r"\baoc\b", Technology::Aoc),
        (r"\b(?:gpon|epon|xpon|xg-?pon|xgs-?pon|10g-?epon|pon)\b", Technology::Pon),
        (r"sr4|sr8|\bsr\b", Technology::Sr),
        (r"lr4|\blr\b", Technology::Lr),
        (r"er4|\ber\b", Technology::Er),
        (r"zr4|\bzr\b", Technology::Zr),
        (r"dr4|\bdr\b", Technology::Dr),
        (r"fr4|\bfr\b", Technology::Fr),
        (r"\blx\d*\b", Technology::Lx),
        (r"\bsx\d*\b", Technology::Sx),
        (r"\bex\d*\b", Technology::Ex),
        (r"\bzx\d*\b", Technology::Zx),
    ])
});

static MEDIA_RULES: LazyLock<RuleTable<Media>> = LazyLock::new(|| {
    rules(&[
        (
            r"singlemode|single-mode|single mode|\bsmf\b|9/125|9-125",
            Media::Singlemode,
        ),
        (
            r"multimode|multi-mode|multi mode|\bmmf\b|\bom[2-5]\b",
            Media::Multimode,
        ),
        (r"copper|\brj45\b|\bcat5|\bcat6", Media::Copper),
    ])
});

static WAVELENGTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{3,4}(?:\.\d+)?(?:/\d{3,4}(?:\.\d+)?)?nm").expect("valid regex")
});

/// Bare wavelengths without a unit, not embedded in a longer number.
static BARE_WAVELENGTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:^|[^0-9.,])(850|1310|1550)(?:[^0-9.,]|$)").expect("valid regex")
});

/// Extracts a [`SpecRecord`] from a free-text product title.
///
/// Never fails: anything unrecognized is left `None`, and an empty title
/// yields [`SpecRecord::default`].
#[must_use]
pub fn extract_spec(title: &str) -> SpecRecord {
    let lower = title.to_lowercase();
    if lower.trim().is_empty() {
        return SpecRecord::default();
    }

    let speed = first_match(&SPEED_RULES, &lower);
    let mut form_factor = first_match(&FORM_FACTOR_RULES, &lower);

    // Plain "SFP" at 8G/10G/16G is an SFP+ part mislabelled by the supplier.
    if form_factor == Some(FormFactor::Sfp)
        && matches!(speed, Some(Speed::G10 | Speed::G8 | Speed::G16))
    {
        form_factor = Some(FormFactor::SfpPlus);
    }

    SpecRecord {
        speed,
        form_factor,
        distance: extract_distance(&lower),
        technology: TECHNOLOGY_RULES
            .iter()
            .filter(|(re, _)| re.is_match(&lower))
            .map(|(_, tech)| *tech)
            .collect(),
        media: first_match(&MEDIA_RULES, &lower),
        wavelength: extract_wavelength(&lower),
    }
}

fn extract_distance(lower: &str) -> Option<String> {
    DISTANCE_RE
        .captures(lower)
        .map(|caps| caps[1].split_whitespace().collect())
}

fn extract_wavelength(lower: &str) -> Option<String> {
    if let Some(m) = WAVELENGTH_RE.find(lower) {
        return Some(m.as_str().to_uppercase());
    }
    BARE_WAVELENGTH_RE
        .captures(lower)
        .map(|caps| format!("{}NM", &caps[1]))
}

#[cfg(test)]
#[path = "extract_test.rs"]
mod tests;
