//! Price distribution reducers: fixed tiers, equal-width histogram, skewness.

use super::stats;
use crate::config::PRICE_TIER_BOUNDS;
use crate::models::{HistogramBin, PriceTier, ShoppingItem, SkewDirection, Skewness, TierCount};

fn observed_prices(items: &[ShoppingItem]) -> Vec<f64> {
    items.iter().filter_map(|i| i.low_price).map(|p| p as f64).collect()
}

pub fn tier_for(price: i64) -> PriceTier {
    match PRICE_TIER_BOUNDS.iter().position(|bound| price <= *bound) {
        Some(0) => PriceTier::UpTo10k,
        Some(1) => PriceTier::From10kTo30k,
        Some(2) => PriceTier::From30kTo50k,
        Some(3) => PriceTier::From50kTo100k,
        _ => PriceTier::Over100k,
    }
}

/// Membership count of every fixed tier, in ascending tier order. Tiers with
/// no listings are reported with a zero count.
pub fn price_tiers(items: &[ShoppingItem]) -> Vec<TierCount> {
    let mut counts = [0usize; 5];
    for price in items.iter().filter_map(|i| i.low_price) {
        counts[tier_for(price) as usize] += 1;
    }
    PriceTier::ALL
        .iter()
        .map(|&tier| TierCount {
            tier,
            count: counts[tier as usize],
        })
        .collect()
}

/// Equal-width histogram over the observed price range.
///
/// Bins are right-closed; the lowest edge is nudged down by 0.1% of the range
/// so the minimum falls inside the first bin. A degenerate range (all prices
/// equal) is instead widened by 0.1% on each side. No prices yields no bins.
pub fn price_histogram(items: &[ShoppingItem], bins: usize) -> Vec<HistogramBin> {
    let prices = observed_prices(items);
    if prices.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut lo = prices.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let degenerate = lo == hi;
    if degenerate {
        let pad = if lo == 0.0 { 0.001 } else { lo.abs() * 0.001 };
        lo -= pad;
        hi += pad;
    }
    let width = (hi - lo) / bins as f64;
    let mut edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    edges[bins] = hi;
    if !degenerate {
        edges[0] -= (hi - lo) * 0.001;
    }

    let mut out: Vec<HistogramBin> = edges
        .windows(2)
        .map(|w| HistogramBin {
            lower: w[0],
            upper: w[1],
            count: 0,
        })
        .collect();
    for p in prices {
        let idx = out.iter().position(|b| p <= b.upper).unwrap_or(bins - 1);
        out[idx].count += 1;
    }
    out
}

/// Sample skewness of `low_price` with its tail interpretation.
pub fn price_skewness(items: &[ShoppingItem]) -> Option<Skewness> {
    let value = stats::skewness(&observed_prices(items))?;
    let direction = if value > 0.0 {
        SkewDirection::RightTail
    } else if value < 0.0 {
        SkewDirection::LeftTail
    } else {
        SkewDirection::Symmetric
    };
    Some(Skewness { value, direction })
}
