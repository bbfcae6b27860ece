//! `enrich` and `consolidate` command handlers.

use std::path::{Path, PathBuf};

use anyhow::Context;
use vxcat_catalog::{
    consolidate, ConsolidateStats, enrich_rows, read_table, render_products, write_table, write_table_string,
    CompatRules, ConsolidateOptions, KeepPrice, PlaceholderPricing, PriceStrategy,
    RenderSettings,
};
use vxcat_core::{default_brands, load_brands, AppConfig};

/// Arguments of the `consolidate` subcommand.
#[derive(Debug, Clone)]
pub(crate) struct ConsolidateArgs {
    pub input: PathBuf,
    pub output: PathBuf,
    pub exclude: Vec<String>,
    pub keep_zero_prices: bool,
    pub dry_run: bool,
}

/// Compatibility rules from `VXCAT_BRANDS_PATH` when set, else the built-in list.
pub(crate) fn compat_rules(config: &AppConfig) -> anyhow::Result<CompatRules> {
    let brands = match &config.brands_path {
        Some(path) => {
            let file = load_brands(path)
                .with_context(|| format!("loading brands from {}", path.display()))?;
            tracing::info!(path = %path.display(), brands = file.brands.len(), "using brand list");
            file.brands
        }
        None => default_brands(),
    };
    Ok(CompatRules::from_brands(&brands)?)
}

pub(crate) fn run_enrich(input: &Path, output: &Path) -> anyhow::Result<()> {
    let table = read_table(input).with_context(|| format!("reading {}", input.display()))?;
    let (rows, stats) = enrich_rows(&table.rows, &table.header)?;
    write_table(output, &table.header, &rows)
        .with_context(|| format!("writing {}", output.display()))?;

    tracing::info!(
        rows = stats.rows_read,
        enriched = stats.rows_enriched,
        malformed = table.malformed,
        "enrich complete"
    );
    println!(
        "enriched {} of {} rows ({} malformed rows skipped) -> {}",
        stats.rows_enriched,
        stats.rows_read,
        table.malformed,
        output.display()
    );
    Ok(())
}

/// Consolidates `args.input` into `args.output`.
///
/// Zero prices receive a placeholder unless `--keep-zero-prices` is given or
/// `VXCAT_PLACEHOLDER_PRICES` is false. With `--dry-run` the consolidated
/// CSV is rendered and summarised but not written.
pub(crate) fn run_consolidate(config: &AppConfig, args: &ConsolidateArgs) -> anyhow::Result<()> {
    let table =
        read_table(&args.input).with_context(|| format!("reading {}", args.input.display()))?;
    let options = ConsolidateOptions::new(compat_rules(config)?).with_exclusions(&args.exclude)?;
    let consolidation = consolidate(&table.rows, &table.header, &options)?;

    let pricing: &dyn PriceStrategy = if args.keep_zero_prices || !config.placeholder_prices {
        &KeepPrice
    } else {
        &PlaceholderPricing
    };
    let settings = RenderSettings {
        pricing,
        ttc_multiplier: config.ttc_multiplier(),
    };
    let rendered = render_products(&consolidation.products, &table.header, &settings)?;

    let stats = consolidation.stats;
    tracing::info!(
        rows = stats.rows_read,
        groups = stats.groups,
        consolidated = stats.consolidated_groups,
        prices_backfilled = rendered.prices_backfilled,
        "consolidation complete"
    );

    if args.dry_run {
        let text = write_table_string(&rendered.header, &rendered.rows)?;
        println!(
            "dry-run: would write {} rows ({} bytes) to {}",
            rendered.rows.len(),
            text.len(),
            args.output.display()
        );
        for product in consolidation.products.iter().filter(|p| p.consolidated) {
            println!(
                "  {} ({} variants) <- {}",
                product.handle,
                product.variants.len(),
                product.base_title
            );
        }
    } else {
        write_table(&args.output, &rendered.header, &rendered.rows)
            .with_context(|| format!("writing {}", args.output.display()))?;
    }

    for (label, count) in summary(&stats, table.malformed, rendered.prices_backfilled) {
        println!("{label:<22}{count}");
    }
    Ok(())
}

/// Labelled counts printed after a consolidation run.
fn summary(
    stats: &ConsolidateStats,
    malformed: usize,
    prices_backfilled: usize,
) -> [(&'static str, usize); 10] {
    [
        ("rows read:", stats.rows_read),
        ("malformed rows:", malformed),
        ("rows skipped:", stats.rows_skipped),
        ("rows excluded:", stats.rows_excluded),
        ("groups formed:", stats.groups),
        ("consolidated groups:", stats.consolidated_groups),
        ("unconsolidated groups:", stats.groups - stats.consolidated_groups),
        ("prices backfilled:", prices_backfilled),
        ("options dropped:", stats.options_dropped),
        ("duplicate variants:", stats.duplicate_combinations),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_separates_consolidated_and_unconsolidated_groups() {
        let stats = ConsolidateStats {
            rows_read: 9,
            groups: 5,
            consolidated_groups: 2,
            ..ConsolidateStats::default()
        };
        let lines = summary(&stats, 1, 3);
        let count = |label: &str| lines.iter().find(|(l, _)| *l == label).map(|(_, c)| *c);

        assert_eq!(count("groups formed:"), Some(5));
        assert_eq!(count("consolidated groups:"), Some(2));
        assert_eq!(count("unconsolidated groups:"), Some(3));
        assert_eq!(count("malformed rows:"), Some(1));
        assert_eq!(count("prices backfilled:"), Some(3));
        assert_eq!(count("base products:"), None);
    }
}
