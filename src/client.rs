//! Acquisition client for the trend, shopping search and blog search endpoints.
//!
//! Every call checks credentials first and fails with
//! [`MarketError::MissingCredentials`] without building a request when either
//! value is blank. There is no retry; failures are surfaced to the caller.

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::config::{self, Credentials};
use crate::error::{MarketError, Result};
use crate::models::TrendPoint;
use crate::normalize;
use crate::transport::{HttpRequest, HttpResponse, Transport};

/// Envelope shared by the two search endpoints.
#[derive(Debug, serde::Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<Value>,
}

/// Issues requests against the upstream API through a [`Transport`].
pub struct ApiClient {
    credentials: Credentials,
    transport: Box<dyn Transport>,
}

impl ApiClient {
    pub fn new(credentials: Credentials, transport: Box<dyn Transport>) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    fn ensure_credentials(&self, endpoint: &str) -> Result<()> {
        if self.credentials.is_complete() {
            Ok(())
        } else {
            tracing::warn!("Skipping {} request: credentials are not configured", endpoint);
            Err(MarketError::MissingCredentials)
        }
    }

    fn send(&self, endpoint: &'static str, request: HttpRequest) -> Result<HttpResponse> {
        let request = request.headers(self.credentials.headers());
        tracing::debug!(endpoint, url = %request.url, query = ?request.query, "sending request");
        let resp = self.transport.send(&request)?;
        if !resp.is_success() {
            return Err(MarketError::Upstream {
                endpoint,
                status: resp.status,
            });
        }
        Ok(resp)
    }

    /// Daily search-interest series for each keyword over `[start, end]`.
    ///
    /// Each keyword becomes its own keyword group named after itself. Any
    /// non-success status aborts the call.
    pub fn fetch_trend(
        &self,
        keywords: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TrendPoint>> {
        self.ensure_credentials("trend")?;
        if keywords.is_empty() {
            return Err(MarketError::InvalidArgument(
                "at least one keyword is required".to_string(),
            ));
        }
        if keywords.len() > config::MAX_KEYWORD_GROUPS {
            return Err(MarketError::InvalidArgument(format!(
                "at most {} keywords can be compared, got {}",
                config::MAX_KEYWORD_GROUPS,
                keywords.len()
            )));
        }
        if start > end {
            return Err(MarketError::InvalidArgument(format!(
                "start date {} is after end date {}",
                start, end
            )));
        }

        let groups: Vec<Value> = keywords
            .iter()
            .map(|k| json!({ "groupName": k, "keywords": [k] }))
            .collect();
        let body = json!({
            "startDate": start.format("%Y-%m-%d").to_string(),
            "endDate": end.format("%Y-%m-%d").to_string(),
            "timeUnit": "date",
            "keywordGroups": groups,
        });

        let resp = self.send("trend", HttpRequest::post_json(config::TREND_URL, body))?;
        let payload: Value = resp.json()?;
        normalize::normalize_trend(&payload)
    }

    /// Raw shopping listings for `keyword`, up to `requested_count` records.
    ///
    /// Pages of at most [`PAGE_SIZE`](config::PAGE_SIZE) are requested with
    /// the 1-based `start` offset advancing by 100. Pagination stops once
    /// enough records are collected, when a page comes back empty, or when a
    /// page fails. A failed page after at least one successful page returns
    /// the records already collected; a failure on the first page is an error.
    pub fn fetch_shopping(&self, keyword: &str, requested_count: usize) -> Result<Vec<Value>> {
        self.ensure_credentials("shopping")?;
        if requested_count == 0 {
            return Err(MarketError::InvalidArgument(
                "requested_count must be greater than zero".to_string(),
            ));
        }

        let mut collected: Vec<Value> = Vec::with_capacity(requested_count);
        let mut start = 1usize;

        while collected.len() < requested_count {
            let display = (requested_count - collected.len()).min(config::PAGE_SIZE);
            let request = HttpRequest::get(config::SHOP_URL)
                .query("query", keyword)
                .query("display", display)
                .query("start", start)
                .query("sort", "sim");

            let page = self
                .send("shopping", request)
                .and_then(|resp| resp.json::<SearchResponse>());

            match page {
                Ok(page) => {
                    if page.items.is_empty() {
                        break;
                    }
                    collected.extend(page.items);
                }
                Err(e) if collected.is_empty() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        "Shopping pagination for '{}' stopped at start={}: {}; keeping {} records",
                        keyword,
                        start,
                        e,
                        collected.len()
                    );
                    break;
                }
            }
            start += config::PAGE_SIZE;
        }

        collected.truncate(requested_count);
        Ok(collected)
    }

    /// Raw blog posts for `keyword` (single page of up to 100).
    pub fn fetch_blog(&self, keyword: &str) -> Result<Vec<Value>> {
        self.ensure_credentials("blog")?;
        let request = HttpRequest::get(config::BLOG_URL)
            .query("query", keyword)
            .query("display", config::BLOG_DISPLAY);
        let resp = self.send("blog", request)?;
        let page: SearchResponse = resp.json()?;
        Ok(page.items)
    }
}
