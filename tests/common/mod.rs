//! Shared test fixtures for the market signal SDK integration tests.
//!
//! Provides `MockTransport`, a scripted [`Transport`] that records every
//! request it receives, plus JSON builders for the three upstream payloads.

#![allow(dead_code)]

use market_signal_sdk::models::ShoppingItem;
use market_signal_sdk::{normalize, Credentials, HttpRequest, HttpResponse, Result, Transport};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

type Responder = dyn Fn(usize, &HttpRequest) -> HttpResponse + Send + Sync;

/// Transport that answers from a closure and keeps a log of requests.
///
/// Cloning shares the log, so a test can box one clone into the client and
/// inspect the other afterwards. The responder receives the zero-based call
/// index and the request.
#[derive(Clone)]
pub struct MockTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    responder: Arc<Responder>,
}

impl MockTransport {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(usize, &HttpRequest) -> HttpResponse + Send + Sync + 'static,
    {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            responder: Arc::new(responder),
        }
    }

    /// Routes by endpoint: full shopping pages, a blog page, a trend body.
    pub fn market() -> Self {
        Self::new(|_, req| market_response(req))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn boxed(&self) -> Box<dyn Transport> {
        Box::new(self.clone())
    }
}

impl Transport for MockTransport {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let index = {
            let mut log = self.requests.lock().unwrap();
            log.push(request.clone());
            log.len() - 1
        };
        Ok((self.responder)(index, request))
    }
}

pub fn credentials() -> Credentials {
    Credentials::new("test-id", "test-secret")
}

pub fn ok(body: Value) -> HttpResponse {
    HttpResponse {
        status: 200,
        body: body.to_string(),
    }
}

pub fn status(code: u16) -> HttpResponse {
    HttpResponse {
        status: code,
        body: json!({ "errorMessage": "failure", "errorCode": code.to_string() }).to_string(),
    }
}

// ---------------------------------------------------------------------------
// Shopping fixtures
// ---------------------------------------------------------------------------

pub fn listing(index: usize, lprice: &str, brand: &str, category3: &str, mall: &str) -> Value {
    json!({
        "title": format!("<b>신동진쌀</b> 10kg 상품 {}", index),
        "link": format!("https://search.shopping.example/catalog/{}", index),
        "image": "https://shopping-phinf.example/main.jpg",
        "lprice": lprice,
        "hprice": "",
        "mallName": mall,
        "productId": format!("{}", 80000000 + index),
        "productType": if index % 4 == 0 { "2" } else { "1" },
        "brand": brand,
        "maker": "",
        "category1": "식품",
        "category2": "농산물",
        "category3": category3,
        "category4": "백미",
    })
}

/// A page of `display` distinct listings starting at the 1-based `start`.
pub fn shop_page(start: usize, display: usize) -> Value {
    let brands = ["농협", "", "햇살농부", "농협"];
    let categories = ["쌀", "쌀", "잡곡", "쌀"];
    let malls = ["네이버", "쿠팡", "농협몰"];
    let items: Vec<Value> = (start..start + display)
        .map(|i| {
            listing(
                i,
                &(15000 + (i % 17) * 2500).to_string(),
                brands[i % brands.len()],
                categories[i % categories.len()],
                malls[i % malls.len()],
            )
        })
        .collect();
    json!({
        "lastBuildDate": "Mon, 01 Sep 2025 10:00:00 +0900",
        "total": 5000,
        "start": start,
        "display": display,
        "items": items,
    })
}

pub fn paging(req: &HttpRequest) -> (usize, usize) {
    let start = req.query_param("start").unwrap().parse().unwrap();
    let display = req.query_param("display").unwrap().parse().unwrap();
    (start, display)
}

/// Normalized (not yet simulated) listings built from raw fixtures.
pub fn normalized_items(count: usize) -> Vec<ShoppingItem> {
    let page = shop_page(1, count);
    normalize::normalize_listings(page["items"].as_array().unwrap())
}

pub fn item_with(price: Option<i64>, brand: Option<&str>, category3: &str) -> ShoppingItem {
    ShoppingItem {
        title: "상품".to_string(),
        low_price: price,
        high_price: None,
        mall_name: "네이버".to_string(),
        brand: brand.map(|b| b.to_string()),
        category_path: [
            "식품".to_string(),
            "농산물".to_string(),
            category3.to_string(),
            "백미".to_string(),
        ],
        product_type: market_signal_sdk::models::ProductType::Organic,
        link: "https://example.com".to_string(),
        delivery_fee_flag: None,
        delivery_fee_amount: None,
        discount_rate: None,
        original_price: None,
        option_price_band: None,
    }
}

// ---------------------------------------------------------------------------
// Blog fixtures
// ---------------------------------------------------------------------------

pub fn blog_item(title: &str, description: &str, blogger: &str, postdate: &str) -> Value {
    json!({
        "title": title,
        "link": "https://blog.example.com/post",
        "description": description,
        "bloggername": blogger,
        "bloggerlink": "blog.example.com/user",
        "postdate": postdate,
    })
}

pub fn blog_page() -> Value {
    json!({
        "total": 3,
        "start": 1,
        "display": 3,
        "items": [
            blog_item("<b>신동진쌀</b> 후기 밥맛", "신동진쌀 <b>밥맛</b> 최고", "쌀집", "20250301"),
            blog_item("신동진쌀 가격 비교", "가격 정보 정리", "농부일기", "20250315"),
            blog_item("햅쌀 도착", "신동진쌀 햅쌀 개봉", "쌀집", "2025-03-20"),
        ],
    })
}

// ---------------------------------------------------------------------------
// Trend fixtures
// ---------------------------------------------------------------------------

pub fn trend_body(keywords: &[&str]) -> Value {
    let results: Vec<Value> = keywords
        .iter()
        .enumerate()
        .map(|(k, kw)| {
            json!({
                "title": kw,
                "keywords": [kw],
                "data": [
                    { "period": "2025-03-01", "ratio": 40.0 + k as f64 },
                    { "period": "2025-03-02", "ratio": 60.0 + k as f64 },
                    { "period": "2025-03-03", "ratio": 100.0 - k as f64 },
                ],
            })
        })
        .collect();
    json!({
        "startDate": "2025-03-01",
        "endDate": "2025-03-03",
        "timeUnit": "date",
        "results": results,
    })
}

pub fn market_response(req: &HttpRequest) -> HttpResponse {
    if req.url.contains("datalab") {
        let body = req.body.as_ref().unwrap();
        let names: Vec<String> = body["keywordGroups"]
            .as_array()
            .unwrap()
            .iter()
            .map(|g| g["groupName"].as_str().unwrap().to_string())
            .collect();
        let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        ok(trend_body(&refs))
    } else if req.url.contains("shop.json") {
        let (start, display) = paging(req);
        ok(shop_page(start, display))
    } else {
        ok(blog_page())
    }
}

/// Route library tracing output to the test writer. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
