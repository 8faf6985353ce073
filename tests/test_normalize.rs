//! Normalizer tests: markup stripping, permissive parsing, record dropping.

mod common;

use chrono::NaiveDate;
use market_signal_sdk::models::ProductType;
use market_signal_sdk::normalize::{
    normalize_listing, normalize_listings, normalize_post, normalize_posts, normalize_trend,
    parse_post_date, parse_price, strip_markup,
};
use market_signal_sdk::MarketError;
use serde_json::json;

#[test]
fn strip_markup_removes_bold_tags_only() {
    assert_eq!(strip_markup("<b>신동진</b>쌀 <b>10kg</b>"), "신동진쌀 10kg");
    assert_eq!(strip_markup("<i>kept</i>"), "<i>kept</i>");
}

#[test]
fn parse_price_is_permissive() {
    assert_eq!(parse_price(&json!("32900")), Some(32900));
    assert_eq!(parse_price(&json!(" 1500 ")), Some(1500));
    assert_eq!(parse_price(&json!(4200)), Some(4200));
    assert_eq!(parse_price(&json!("")), None);
    assert_eq!(parse_price(&json!("가격문의")), None);
    assert_eq!(parse_price(&json!("12,000")), None);
    assert_eq!(parse_price(&json!("-5")), None);
    assert_eq!(parse_price(&json!(null)), None);
}

#[test]
fn parse_post_date_requires_eight_digits() {
    assert_eq!(
        parse_post_date("20250315"),
        NaiveDate::from_ymd_opt(2025, 3, 15)
    );
    assert_eq!(parse_post_date("2025-03-15"), None);
    assert_eq!(parse_post_date("20251345"), None);
    assert_eq!(parse_post_date(""), None);
}

#[test]
fn listing_fields_are_normalized() {
    let raw = common::listing(4, "25000", "농협", "쌀", "네이버");
    let item = normalize_listing(&raw).unwrap();

    assert_eq!(item.title, "신동진쌀 10kg 상품 4");
    assert_eq!(item.low_price, Some(25000));
    assert_eq!(item.high_price, None);
    assert_eq!(item.mall_name, "네이버");
    assert_eq!(item.brand.as_deref(), Some("농협"));
    assert_eq!(item.category3(), "쌀");
    assert_eq!(item.category_display(), "식품 > 농산물 > 쌀 > 백미");
    assert_eq!(item.product_type, ProductType::Advertised);
    assert!(item.discount_rate.is_none());
    assert!(item.option_price_band.is_none());
}

#[test]
fn listing_with_bad_price_is_kept_with_missing_price() {
    let raw = common::listing(1, "품절", "", "쌀", "쿠팡");
    let item = normalize_listing(&raw).unwrap();
    assert_eq!(item.low_price, None);
    assert_eq!(item.brand, None);
    assert_eq!(item.product_type, ProductType::Organic);
}

#[test]
fn product_type_codes() {
    assert_eq!(ProductType::from_code("2"), ProductType::Advertised);
    assert_eq!(ProductType::from_code("3"), ProductType::Advertised);
    assert_eq!(ProductType::from_code("1"), ProductType::Organic);
    assert_eq!(ProductType::from_code("12"), ProductType::Organic);
    assert_eq!(ProductType::from_code(""), ProductType::Organic);
}

#[test]
fn non_object_records_are_dropped() {
    assert!(matches!(
        normalize_listing(&json!("garbage")),
        Err(MarketError::Normalization(_))
    ));

    let raw = vec![
        common::listing(1, "1000", "a", "쌀", "m"),
        json!(42),
        common::listing(2, "2000", "b", "쌀", "m"),
    ];
    let items = normalize_listings(&raw);
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].low_price, Some(2000));
}

#[test]
fn post_fields_are_normalized() {
    let raw = common::blog_item("<b>햅쌀</b> 후기", "정말 <b>맛있는</b> 쌀", "농부", "20250301");
    let post = normalize_post(&raw).unwrap();
    assert_eq!(post.title, "햅쌀 후기");
    assert_eq!(post.description, "정말 맛있는 쌀");
    assert_eq!(post.blogger_name, "농부");
    assert_eq!(post.post_date, NaiveDate::from_ymd_opt(2025, 3, 1));
}

#[test]
fn post_with_bad_date_keeps_record() {
    let posts = normalize_posts(common::blog_page()["items"].as_array().unwrap());
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[2].post_date, None);
    assert_eq!(posts[2].title, "햅쌀 도착");
}

#[test]
fn trend_points_flattened_and_malformed_skipped() {
    let body = json!({
        "results": [
            {
                "title": "신동진쌀",
                "data": [
                    { "period": "2025-03-01", "ratio": 12.5 },
                    { "period": "not-a-date", "ratio": 10.0 },
                    { "period": "2025-03-03", "ratio": "n/a" },
                    { "period": "2025-03-04", "ratio": "33.3" },
                ]
            },
            { "title": "삼광쌀" }
        ]
    });
    let points = normalize_trend(&body).unwrap();
    assert_eq!(points.len(), 2);
    assert_eq!(points[0].ratio, 12.5);
    assert_eq!(points[1].date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
    assert!((points[1].ratio - 33.3).abs() < 1e-9);
}

#[test]
fn trend_body_without_results_is_error() {
    assert!(matches!(
        normalize_trend(&json!({ "errorMessage": "bad" })),
        Err(MarketError::Normalization(_))
    ));
}
