use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// ProductType — Listing exposure type derived from the raw type code
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    Advertised,
    Organic,
}

impl ProductType {
    /// Raw codes `2` and `3` are catalog/advertised placements; every other
    /// code (or a missing one) is an organic listing.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "2" | "3" => ProductType::Advertised,
            _ => ProductType::Organic,
        }
    }
}

// ---------------------------------------------------------------------------
// Backfilled — A value that may have been synthesized rather than observed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Backfilled<T> {
    pub value: T,
    pub simulated: bool,
}

impl<T> Backfilled<T> {
    pub fn observed(value: T) -> Self {
        Self {
            value,
            simulated: false,
        }
    }

    pub fn simulated(value: T) -> Self {
        Self {
            value,
            simulated: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Delivery fee
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeFlag {
    Paid,
    Free,
}

// ---------------------------------------------------------------------------
// PriceBand — Inclusive option-price display range
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBand {
    pub low: i64,
    pub high: i64,
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ~ {}",
            format_thousands(self.low),
            format_thousands(self.high)
        )
    }
}

/// Format an integer with `,` thousands separators (`1234567` -> `"1,234,567"`).
pub fn format_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ---------------------------------------------------------------------------
// ShoppingItem — Normalized shopping listing plus backfilled attributes
// ---------------------------------------------------------------------------

/// One shopping listing.
///
/// The observed fields come straight from the search API via the normalizer.
/// The `Backfilled` fields are `None` until the simulator runs; after that
/// each carries its own `simulated` flag so consumers can tell observed
/// values from synthesized ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub title: String,
    /// `None` when the upstream price was not numeric.
    pub low_price: Option<i64>,
    pub high_price: Option<i64>,
    pub mall_name: String,
    pub brand: Option<String>,
    pub category_path: [String; 4],
    pub product_type: ProductType,
    pub link: String,

    pub delivery_fee_flag: Option<Backfilled<FeeFlag>>,
    pub delivery_fee_amount: Option<Backfilled<i64>>,
    pub discount_rate: Option<Backfilled<u32>>,
    pub original_price: Option<Backfilled<i64>>,
    pub option_price_band: Option<Backfilled<PriceBand>>,
}

impl ShoppingItem {
    /// Third category level, used for the category summary.
    pub fn category3(&self) -> &str {
        &self.category_path[2]
    }

    /// Full category path joined for display (`"a > b > c > d"`).
    pub fn category_display(&self) -> String {
        self.category_path.join(" > ")
    }

    pub fn is_advertised(&self) -> bool {
        self.product_type == ProductType::Advertised
    }
}
