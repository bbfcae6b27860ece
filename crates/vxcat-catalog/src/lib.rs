pub mod consolidate;
pub mod enrich;
pub mod error;
pub mod extract;
pub mod families;
pub mod pairs;
pub mod pricing;
pub mod table;
pub mod tags;
pub mod variant;

pub use consolidate::{
    consolidate, render_products, slugify, ConsolidateOptions, ConsolidateStats,
    ConsolidatedProduct, Consolidation, GroupedVariant, OutputLayout, RenderSettings, Rendered,
};
pub use enrich::{enrich_rows, EnrichStats};
pub use error::CatalogError;
pub use extract::extract_spec;
pub use families::{
    expand_family, generate_catalog, itu_wavelength_nm, GenerateStats, GeneratedCatalog,
    GeneratorSettings,
};
pub use pairs::{find_temperature_pairs, TemperaturePair};
pub use pricing::{KeepPrice, PlaceholderPricing, PriceStrategy};
pub use table::{parse_table, read_table, write_table, write_table_string, CsvRow, CsvTable, HeaderIndex};
pub use tags::{join_tags, split_tags, synthesize_tags};
pub use variant::{split_variant, CompatRules, FillDown, VariantSplit};
