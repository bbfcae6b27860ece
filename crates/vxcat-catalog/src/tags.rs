//! Normalized `Prefix_Value` tags derived from a [`SpecRecord`].

use std::collections::HashSet;

use vxcat_core::SpecRecord;

/// Separator used when tags are written back to a CSV cell.
pub const TAG_SEPARATOR: &str = ", ";

/// Spec tag prefixes in output order.
const TAG_PREFIXES: [&str; 5] = ["Speed_", "FormFactor_", "Distance_", "Media_", "Tech_"];

fn prefix_rank(tag: &str) -> usize {
    TAG_PREFIXES
        .iter()
        .position(|prefix| tag.starts_with(prefix))
        .unwrap_or(TAG_PREFIXES.len())
}

/// Builds the tag list for a title's spec merged with the existing tags.
///
/// Order: `Speed_`, `FormFactor_`, `Distance_`, `Media_`, one `Tech_` per
/// technology, then the trimmed non-empty `existing` tags. An existing tag
/// with a spec prefix sorts into that prefix's slot, after the generated
/// ones, so re-deriving from a shorter title keeps the same order.
/// Duplicates are removed keeping the first occurrence.
#[must_use]
pub fn synthesize_tags(spec: &SpecRecord, existing: &[String]) -> Vec<String> {
    let mut generated = Vec::with_capacity(4 + spec.technology.len());
    if let Some(speed) = spec.speed {
        generated.push(format!("Speed_{speed}"));
    }
    if let Some(form_factor) = spec.form_factor {
        generated.push(format!("FormFactor_{form_factor}"));
    }
    if let Some(distance) = &spec.distance {
        generated.push(format!("Distance_{distance}"));
    }
    if let Some(media) = spec.media {
        generated.push(format!("Media_{media}"));
    }
    generated.extend(spec.technology.iter().map(|t| format!("Tech_{t}")));

    let existing = existing
        .iter()
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(str::to_string);

    let mut seen = HashSet::new();
    let mut tags: Vec<String> = generated
        .into_iter()
        .chain(existing)
        .filter(|tag| seen.insert(tag.clone()))
        .collect();
    tags.sort_by_key(|tag| prefix_rank(tag));
    tags
}

/// Splits a `Tags` cell on commas, trimming and dropping empty entries.
#[must_use]
pub fn split_tags(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[must_use]
pub fn join_tags(tags: &[String]) -> String {
    tags.join(TAG_SEPARATOR)
}

/// Rewrites a `Tags` cell value from a title: spec tags merged with the
/// cell's existing tags.
#[must_use]
pub fn enrich_tag_cell(title: &str, cell: &str) -> String {
    let spec = crate::extract::extract_spec(title);
    join_tags(&synthesize_tags(&spec, &split_tags(cell)))
}
