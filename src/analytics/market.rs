//! Listing-level market structure: categories, brands, malls and KPIs.

use std::collections::HashMap;

use super::stats::{self, ranked_counts};
use crate::config::{HHI_COMPETITIVE, HHI_CONCENTRATED};
use crate::models::{
    BrandConcentration, BrandPricePosition, CategorySummary, Concentration, MallShare,
    PriceDiscountFit, ShoppingItem, ShoppingKpis,
};

/// Count/mean/max/min of `low_price` per third-level category, sorted by
/// descending count (ties in first-seen order).
///
/// Listings without a price or with a blank third category are left out.
pub fn category_summary(items: &[ShoppingItem]) -> Vec<CategorySummary> {
    let priced: Vec<(&str, i64)> = items
        .iter()
        .filter(|i| !i.category3().trim().is_empty())
        .filter_map(|i| i.low_price.map(|p| (i.category3(), p)))
        .collect();

    let mut prices: HashMap<&str, Vec<i64>> = HashMap::new();
    for &(category, price) in &priced {
        prices.entry(category).or_default().push(price);
    }

    ranked_counts(priced.iter().map(|(c, _)| *c))
        .into_iter()
        .filter_map(|(category, count)| {
            let group = prices.get(category)?;
            Some(CategorySummary {
                category: category.to_string(),
                count,
                mean_price: group.iter().sum::<i64>() as f64 / count as f64,
                max_price: *group.iter().max()?,
                min_price: *group.iter().min()?,
            })
        })
        .collect()
}

pub fn concentration_level(hhi: f64) -> Concentration {
    if hhi >= HHI_CONCENTRATED {
        Concentration::Concentrated
    } else if hhi < HHI_COMPETITIVE {
        Concentration::Competitive
    } else {
        Concentration::Moderate
    }
}

/// Herfindahl–Hirschman index of brand counts.
///
/// Each brand's share is its listing count over *all* listings (unbranded
/// listings included in the denominator). `None` when no listing has a brand.
pub fn brand_concentration(items: &[ShoppingItem]) -> Option<BrandConcentration> {
    let counts = ranked_counts(items.iter().filter_map(|i| i.brand.as_deref()));
    if counts.is_empty() {
        return None;
    }
    let total = items.len() as f64;
    let hhi = 10_000.0
        * counts
            .iter()
            .map(|(_, c)| (*c as f64 / total).powi(2))
            .sum::<f64>();
    Some(BrandConcentration {
        hhi,
        brands: counts.len(),
        level: concentration_level(hhi),
    })
}

/// Top `limit` malls by listing count with their percentage share.
pub fn mall_shares(items: &[ShoppingItem], limit: usize) -> Vec<MallShare> {
    let total = items.len() as f64;
    ranked_counts(
        items
            .iter()
            .map(|i| i.mall_name.as_str())
            .filter(|m| !m.trim().is_empty()),
    )
    .into_iter()
    .take(limit)
    .map(|(mall, count)| MallShare {
        mall: mall.to_string(),
        count,
        share: count as f64 / total * 100.0,
    })
    .collect()
}

/// Price spread of the `limit` most frequent brands.
pub fn brand_positions(items: &[ShoppingItem], limit: usize) -> Vec<BrandPricePosition> {
    ranked_counts(items.iter().filter_map(|i| i.brand.as_deref()))
        .into_iter()
        .take(limit)
        .filter_map(|(brand, count)| {
            let prices: Vec<f64> = items
                .iter()
                .filter(|i| i.brand.as_deref() == Some(brand))
                .filter_map(|i| i.low_price)
                .map(|p| p as f64)
                .collect();
            Some(BrandPricePosition {
                brand: brand.to_string(),
                count,
                prices: stats::five_number(&prices)?,
            })
        })
        .collect()
}

pub fn shopping_kpis(items: &[ShoppingItem]) -> ShoppingKpis {
    let prices: Vec<i64> = items.iter().filter_map(|i| i.low_price).collect();
    let price_values: Vec<f64> = prices.iter().map(|p| *p as f64).collect();
    let discounts: Vec<f64> = items
        .iter()
        .filter_map(|i| i.discount_rate)
        .map(|d| f64::from(d.value))
        .collect();
    let malls = ranked_counts(
        items
            .iter()
            .map(|i| i.mall_name.as_str())
            .filter(|m| !m.trim().is_empty()),
    )
    .len();
    let advertised = items.iter().filter(|i| i.is_advertised()).count();

    ShoppingKpis {
        listings: items.len(),
        malls,
        mean_low_price: stats::mean(&price_values),
        max_low_price: prices.iter().copied().max(),
        mean_discount_rate: stats::mean(&discounts),
        advertised_share: if items.is_empty() {
            None
        } else {
            Some(advertised as f64 / items.len() as f64 * 100.0)
        },
    }
}

/// Pearson correlation and least-squares line of discount rate on price.
///
/// Needs at least two listings with both values and non-zero variance in each.
pub fn price_discount_fit(items: &[ShoppingItem]) -> Option<PriceDiscountFit> {
    let pairs: Vec<(f64, f64)> = items
        .iter()
        .filter_map(|i| Some((i.low_price? as f64, f64::from(i.discount_rate?.value))))
        .collect();
    if pairs.len() < 2 {
        return None;
    }
    let n = pairs.len() as f64;
    let mx = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let my = pairs.iter().map(|p| p.1).sum::<f64>() / n;
    let sxx: f64 = pairs.iter().map(|p| (p.0 - mx).powi(2)).sum();
    let syy: f64 = pairs.iter().map(|p| (p.1 - my).powi(2)).sum();
    let sxy: f64 = pairs.iter().map(|p| (p.0 - mx) * (p.1 - my)).sum();
    if sxx == 0.0 || syy == 0.0 {
        return None;
    }
    let slope = sxy / sxx;
    Some(PriceDiscountFit {
        points: pairs.len(),
        correlation: sxy / (sxx * syy).sqrt(),
        slope,
        intercept: my - slope * mx,
    })
}
