//! Report of industrial-temperature titles that have a standard sibling.

use std::collections::HashSet;

use serde::Serialize;

use crate::variant::strip_industrial;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemperaturePair {
    pub industrial: String,
    pub standard: String,
}

/// For every title carrying an industrial temperature token, looks for a
/// title equal to it with the token removed. Pairs are reported in input
/// order, once per distinct industrial title.
#[must_use]
pub fn find_temperature_pairs<S: AsRef<str>>(titles: &[S]) -> Vec<TemperaturePair> {
    let known: HashSet<&str> = titles.iter().map(|t| t.as_ref().trim()).collect();
    let mut reported = HashSet::new();

    titles
        .iter()
        .map(|t| t.as_ref().trim())
        .filter_map(|industrial| {
            let standard = strip_industrial(industrial)?;
            (standard != industrial
                && known.contains(standard.as_str())
                && reported.insert(industrial))
            .then(|| TemperaturePair {
                industrial: industrial.to_string(),
                standard,
            })
        })
        .collect()
}
