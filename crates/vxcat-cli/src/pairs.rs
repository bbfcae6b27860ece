use std::path::Path;

use anyhow::Context;
use vxcat_catalog::{find_temperature_pairs, read_table};

pub(crate) fn run_pairs(input: &Path, limit: Option<usize>) -> anyhow::Result<()> {
    let table = read_table(input).with_context(|| format!("reading {}", input.display()))?;
    let title_col = table.header.require("Title")?;
    let titles: Vec<&str> = table
        .rows
        .iter()
        .map(|row| row.get(title_col))
        .filter(|t| !t.trim().is_empty())
        .collect();

    let pairs = find_temperature_pairs(&titles);
    if pairs.is_empty() {
        println!("no industrial/standard pairs found");
        return Ok(());
    }

    let shown = limit.unwrap_or(pairs.len()).min(pairs.len());
    for pair in &pairs[..shown] {
        println!("{}\n  -> {}", pair.industrial, pair.standard);
    }
    if shown < pairs.len() {
        println!("... {} more", pairs.len() - shown);
    }
    println!("{} pairs across {} titles", pairs.len(), titles.len());
    Ok(())
}
