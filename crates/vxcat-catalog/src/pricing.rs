//! Price backfill and tax-inclusive price formatting.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Chooses a price for a variant whose price is zero or unparseable.
pub trait PriceStrategy {
    /// Returns the price to write, or `None` to leave the cell untouched.
    fn backfill(&self, base_title: &str, first_option_value: &str) -> Option<Decimal>;
}

/// Deterministic placeholder: `50 + (seed * 13) mod 1950`, where the seed is
/// the character count of the base title plus that of the first option value.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlaceholderPricing;

impl PriceStrategy for PlaceholderPricing {
    fn backfill(&self, base_title: &str, first_option_value: &str) -> Option<Decimal> {
        let seed = base_title.chars().count() + first_option_value.chars().count();
        let amount = 50 + (seed * 13) % 1950;
        Some(Decimal::from(amount))
    }
}

/// Leaves zero prices as they are.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepPrice;

impl PriceStrategy for KeepPrice {
    fn backfill(&self, _base_title: &str, _first_option_value: &str) -> Option<Decimal> {
        None
    }
}

/// Parses a price cell; blank or unparseable input reads as zero.
#[must_use]
pub fn parse_price(cell: &str) -> Decimal {
    Decimal::from_str(cell.trim()).unwrap_or(Decimal::ZERO)
}

/// Formats a price with exactly two decimals.
#[must_use]
pub fn format_price(price: Decimal) -> String {
    format!("{:.2}", round_cents(price))
}

/// Tax-inclusive price, rounded to cents.
#[must_use]
pub fn price_ttc(price: Decimal, multiplier: Decimal) -> Decimal {
    round_cents(price * multiplier)
}

fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
