use std::path::PathBuf;

use rust_decimal::Decimal;

/// Runtime configuration for the catalog tools, read from `VXCAT_*`
/// environment variables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_level: String,
    /// Optional YAML override for the compatibility brand list.
    pub brands_path: Option<PathBuf>,
    /// VAT rate applied to `Variant Price` to produce `Variant Price TTC`
    /// (e.g. `0.20` for 20%).
    pub vat_rate: Decimal,
    /// Vendor written on generated family rows.
    pub vendor: String,
    /// When `false`, zero prices are left untouched instead of receiving a
    /// placeholder value.
    pub placeholder_prices: bool,
}

impl AppConfig {
    /// Multiplier turning a pre-tax price into a tax-inclusive one.
    #[must_use]
    pub fn ttc_multiplier(&self) -> Decimal {
        Decimal::ONE + self.vat_rate
    }
}
