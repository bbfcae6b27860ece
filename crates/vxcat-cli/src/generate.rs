use std::path::Path;

use anyhow::Context;
use vxcat_catalog::{generate_catalog, read_table, write_table, GeneratorSettings};
use vxcat_core::{load_families, AppConfig};

pub(crate) fn run_generate(
    config: &AppConfig,
    families: &Path,
    output: &Path,
    base: Option<&Path>,
) -> anyhow::Result<()> {
    let file = load_families(families)
        .with_context(|| format!("loading families from {}", families.display()))?;
    let base = base
        .map(|path| read_table(path).with_context(|| format!("reading {}", path.display())))
        .transpose()?;

    let settings = GeneratorSettings {
        vendor: config.vendor.clone(),
        ttc_multiplier: config.ttc_multiplier(),
    };
    let catalog = generate_catalog(&file, &settings, base.as_ref())?;
    write_table(output, &catalog.header, &catalog.rows)
        .with_context(|| format!("writing {}", output.display()))?;

    let stats = catalog.stats;
    tracing::info!(
        families = stats.families,
        rows = stats.rows_generated,
        replaced = stats.base_rows_replaced,
        "generation complete"
    );
    println!(
        "generated {} variant rows for {} families -> {}",
        stats.rows_generated,
        stats.families,
        output.display()
    );
    if base.is_some() {
        println!(
            "base rows kept: {}, replaced: {}",
            stats.base_rows_kept, stats.base_rows_replaced
        );
    }
    Ok(())
}
