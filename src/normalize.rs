//! Raw API payload -> typed record conversion.
//!
//! Every function here is pure. Fields that fail to parse are coerced to a
//! missing value instead of failing the record; only a payload that is not a
//! JSON object at all is rejected.

use chrono::NaiveDate;
use serde_json::Value;

use crate::error::{MarketError, Result};
use crate::models::{BlogPost, ProductType, ShoppingItem, TrendPoint};

/// Remove the `<b>`/`</b>` emphasis markup the search API wraps around
/// matched terms.
pub fn strip_markup(text: &str) -> String {
    text.replace("<b>", "").replace("</b>", "")
}

/// Permissive integer price parse. Accepts JSON numbers and numeric strings;
/// anything else (including negatives and empty strings) becomes `None`.
pub fn parse_price(value: &Value) -> Option<i64> {
    let parsed = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64)),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed.parse::<i64>().ok().or_else(|| {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(|f| f.round() as i64)
            })
        }
        _ => None,
    };
    parsed.filter(|p| *p >= 0)
}

/// Parse an 8-digit `YYYYMMDD` date.
pub fn parse_post_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.len() != 8 || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, "%Y%m%d").ok()
}

fn text_field(obj: &Value, key: &str) -> String {
    obj.get(key)
        .and_then(|v| v.as_str())
        .map(strip_markup)
        .unwrap_or_default()
}

fn require_object<'a>(raw: &'a Value, what: &str) -> Result<&'a serde_json::Map<String, Value>> {
    raw.as_object().ok_or_else(|| {
        MarketError::Normalization(format!("{} record is not a JSON object: {}", what, raw))
    })
}

// ---------------------------------------------------------------------------
// Shopping
// ---------------------------------------------------------------------------

/// Normalize one raw shopping listing.
///
/// The returned item has no backfilled attributes yet; see
/// [`Simulator::augment`](crate::simulator::Simulator::augment).
pub fn normalize_listing(raw: &Value) -> Result<ShoppingItem> {
    let obj = require_object(raw, "shopping")?;
    let price = |key: &str| obj.get(key).and_then(parse_price);

    let brand = text_field(raw, "brand");
    let product_code = match obj.get("productType") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    };

    Ok(ShoppingItem {
        title: text_field(raw, "title"),
        low_price: price("lprice"),
        high_price: price("hprice"),
        mall_name: text_field(raw, "mallName"),
        brand: if brand.trim().is_empty() { None } else { Some(brand) },
        category_path: [
            text_field(raw, "category1"),
            text_field(raw, "category2"),
            text_field(raw, "category3"),
            text_field(raw, "category4"),
        ],
        product_type: ProductType::from_code(&product_code),
        link: text_field(raw, "link"),
        delivery_fee_flag: None,
        delivery_fee_amount: None,
        discount_rate: None,
        original_price: None,
        option_price_band: None,
    })
}

/// Normalize a page of listings, dropping (and logging) records that are not
/// objects. Order is preserved.
pub fn normalize_listings(raw: &[Value]) -> Vec<ShoppingItem> {
    raw.iter()
        .filter_map(|r| match normalize_listing(r) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!("Dropping shopping record: {}", e);
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Blog
// ---------------------------------------------------------------------------

pub fn normalize_post(raw: &Value) -> Result<BlogPost> {
    let obj = require_object(raw, "blog")?;
    let post_date = obj
        .get("postdate")
        .and_then(|v| v.as_str())
        .and_then(parse_post_date);

    Ok(BlogPost {
        title: text_field(raw, "title"),
        description: text_field(raw, "description"),
        blogger_name: text_field(raw, "bloggername"),
        post_date,
        link: text_field(raw, "link"),
    })
}

pub fn normalize_posts(raw: &[Value]) -> Vec<BlogPost> {
    raw.iter()
        .filter_map(|r| match normalize_post(r) {
            Ok(post) => Some(post),
            Err(e) => {
                tracing::warn!("Dropping blog record: {}", e);
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Trend
// ---------------------------------------------------------------------------

/// Flatten a trend response body (`{results: [{title, data: [{period, ratio}]}]}`)
/// into one [`TrendPoint`] per keyword per date.
///
/// Data points whose period is not an ISO date or whose ratio is not numeric
/// are skipped. A body without a `results` array is an error.
pub fn normalize_trend(body: &Value) -> Result<Vec<TrendPoint>> {
    let results = body
        .get("results")
        .and_then(|r| r.as_array())
        .ok_or_else(|| {
            MarketError::Normalization("trend response has no 'results' array".to_string())
        })?;

    let mut points = Vec::new();
    for group in results {
        let keyword = text_field(group, "title");
        let data = match group.get("data").and_then(|d| d.as_array()) {
            Some(d) => d,
            None => continue,
        };
        for datum in data {
            let date = datum
                .get("period")
                .and_then(|p| p.as_str())
                .and_then(|p| NaiveDate::parse_from_str(p.trim(), "%Y-%m-%d").ok());
            let ratio = datum.get("ratio").and_then(|r| match r {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            });
            match (date, ratio) {
                (Some(date), Some(ratio)) if ratio.is_finite() => points.push(TrendPoint {
                    keyword: keyword.clone(),
                    date,
                    ratio,
                }),
                _ => tracing::warn!("Skipping malformed trend point for '{}': {}", keyword, datum),
            }
        }
    }
    Ok(points)
}
