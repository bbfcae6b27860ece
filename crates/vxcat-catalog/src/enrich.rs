//! Tags-only pass: rewrites the `Tags` column from each row's title.

use crate::consolidate::{COLUMN_TAGS, COLUMN_TITLE};
use crate::error::CatalogError;
use crate::table::{CsvRow, HeaderIndex};
use crate::tags::enrich_tag_cell;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichStats {
    pub rows_read: usize,
    pub rows_enriched: usize,
}

/// Returns `rows` with every titled row's `Tags` cell rebuilt from the
/// title's spec plus its existing tags. Rows with an empty title are
/// returned untouched.
///
/// # Errors
///
/// Returns [`CatalogError::MissingColumn`] if `Title` or `Tags` is absent.
pub fn enrich_rows(
    rows: &[CsvRow],
    index: &HeaderIndex,
) -> Result<(Vec<CsvRow>, EnrichStats), CatalogError> {
    let title_col = index.require(COLUMN_TITLE)?;
    let tags_col = index.require(COLUMN_TAGS)?;
    let mut stats = EnrichStats::default();

    let enriched = rows
        .iter()
        .map(|row| {
            stats.rows_read += 1;
            let title = row.get(title_col).trim();
            if title.is_empty() {
                return row.clone();
            }
            stats.rows_enriched += 1;
            let tags = enrich_tag_cell(title, row.get(tags_col));
            row.clone().with_cell(tags_col, tags)
        })
        .collect();

    Ok((enriched, stats))
}
