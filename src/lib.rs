//! Market signal SDK for Rust.
//!
//! Pulls keyword search-interest trends, shopping listings and blog posts
//! from the Naver Open API, normalizes them into typed records, backfills the
//! listing attributes the API does not expose with a seeded simulation, and
//! derives summary analytics (price tiers, brand concentration, skewness,
//! keyword frequency and more). Acquisition results are memoized per request
//! parameters for a fixed TTL.
//!
//! # Quick start
//!
//! ```no_run
//! use chrono::NaiveDate;
//! use market_signal_sdk::{Credentials, MarketRequest, MarketSdk};
//!
//! let sdk = MarketSdk::builder()
//!     .credentials(Credentials::from_env())
//!     .build()
//!     .unwrap();
//!
//! let request = MarketRequest::new(
//!     vec!["신동진쌀".to_string(), "삼광쌀".to_string()],
//!     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 3, 31).unwrap(),
//! )
//! .shopping_count(200);
//!
//! let report = sdk.analyze(&request).unwrap();
//! println!("HHI: {:?}", report.summary.brand_concentration);
//! ```

pub mod analytics;
#[cfg(feature = "async")]
pub mod async_client;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod simulator;
pub mod transport;

#[cfg(feature = "async")]
pub use async_client::AsyncMarketSdk;
pub use cache::{CacheKey, ResultCache};
pub use client::ApiClient;
pub use config::Credentials;
pub use error::{MarketError, Result};
pub use simulator::{SimulationPolicy, Simulator};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use models::{AnalyticsSummary, BlogPost, ShoppingItem, TrendPoint};

// ---------------------------------------------------------------------------
// MarketRequest / MarketReport
// ---------------------------------------------------------------------------

/// Parameters of one analysis: the compared keywords, the trend window and
/// how many shopping listings to pull for the main (first) keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketRequest {
    pub keywords: Vec<String>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub shopping_count: usize,
}

impl MarketRequest {
    pub fn new(keywords: Vec<String>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            keywords,
            start,
            end,
            shopping_count: config::PAGE_SIZE,
        }
    }

    pub fn shopping_count(mut self, count: usize) -> Self {
        self.shopping_count = count;
        self
    }

    /// The keyword shopping and blog data are fetched for.
    pub fn main_keyword(&self) -> Option<&str> {
        self.keywords.first().map(|k| k.as_str())
    }
}

/// Split a comma-separated keyword list, trimming and dropping blanks.
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| k.to_string())
        .collect()
}

/// The three corpora of one request plus everything derived from them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketReport {
    pub trend: Vec<TrendPoint>,
    pub shopping: Vec<ShoppingItem>,
    pub blog: Vec<BlogPost>,
    pub summary: AnalyticsSummary,
}

// ---------------------------------------------------------------------------
// MarketSdkBuilder
// ---------------------------------------------------------------------------

/// Builder for configuring and constructing a [`MarketSdk`] instance.
pub struct MarketSdkBuilder {
    credentials: Credentials,
    timeout: Duration,
    seed: u64,
    cache_ttl: Duration,
    policy: SimulationPolicy,
    transport: Option<Box<dyn Transport>>,
}

impl Default for MarketSdkBuilder {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            timeout: config::DEFAULT_TIMEOUT,
            seed: config::DEFAULT_SEED,
            cache_ttl: config::DEFAULT_CACHE_TTL,
            policy: SimulationPolicy::default(),
            transport: None,
        }
    }
}

impl MarketSdkBuilder {
    /// Set the API credentials. Defaults to empty credentials, which makes
    /// every acquisition call fail with [`MarketError::MissingCredentials`].
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = credentials;
        self
    }

    /// HTTP request timeout. Defaults to 30 seconds. Ignored when a custom
    /// transport is supplied.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Seed of the attribute simulator. Defaults to 42.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// How long acquisition results stay cached. Defaults to one hour.
    pub fn cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn simulation_policy(mut self, policy: SimulationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Send requests through a custom [`Transport`] instead of reqwest.
    pub fn transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> Result<MarketSdk> {
        let transport = match self.transport {
            Some(t) => t,
            None => Box::new(HttpTransport::new(self.timeout)?),
        };
        Ok(MarketSdk {
            client: ApiClient::new(self.credentials, transport),
            simulator: Simulator::new(self.seed).with_policy(self.policy),
            cache_ttl: self.cache_ttl,
            trend_cache: ResultCache::new(),
            shopping_cache: ResultCache::new(),
            blog_cache: ResultCache::new(),
        })
    }
}

// ---------------------------------------------------------------------------
// MarketSdk
// ---------------------------------------------------------------------------

/// The main entry point: acquisition, normalization, simulation and caching
/// behind one object, plus the full analysis in [`analyze`](Self::analyze).
///
/// Created via [`MarketSdk::builder()`].
pub struct MarketSdk {
    client: ApiClient,
    simulator: Simulator,
    cache_ttl: Duration,
    trend_cache: ResultCache<Vec<TrendPoint>>,
    shopping_cache: ResultCache<Vec<ShoppingItem>>,
    blog_cache: ResultCache<Vec<BlogPost>>,
}

impl MarketSdk {
    pub fn builder() -> MarketSdkBuilder {
        MarketSdkBuilder::default()
    }

    /// Daily search-interest points for each keyword, cached per
    /// (keywords, window).
    pub fn trend(
        &self,
        keywords: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<TrendPoint>> {
        let key = CacheKey::Trend {
            keywords: keywords.to_vec(),
            start,
            end,
        };
        self.trend_cache.get_or_compute(&key, self.cache_ttl, || {
            self.client.fetch_trend(keywords, start, end)
        })
    }

    /// Normalized and simulated shopping listings, cached per (keyword, count).
    pub fn shopping(&self, keyword: &str, count: usize) -> Result<Vec<ShoppingItem>> {
        let key = CacheKey::Shopping {
            keyword: keyword.to_string(),
            count,
        };
        self.shopping_cache.get_or_compute(&key, self.cache_ttl, || {
            let raw = self.client.fetch_shopping(keyword, count)?;
            let items = normalize::normalize_listings(&raw);
            Ok(self.simulator.augment(items))
        })
    }

    /// Normalized blog posts, cached per keyword.
    pub fn blog(&self, keyword: &str) -> Result<Vec<BlogPost>> {
        let key = CacheKey::Blog {
            keyword: keyword.to_string(),
        };
        self.blog_cache.get_or_compute(&key, self.cache_ttl, || {
            let raw = self.client.fetch_blog(keyword)?;
            Ok(normalize::normalize_posts(&raw))
        })
    }

    /// Fetch all three corpora for `request` and summarize them.
    ///
    /// Any acquisition failure aborts the whole analysis; analytics only
    /// ever run over complete corpora.
    pub fn analyze(&self, request: &MarketRequest) -> Result<MarketReport> {
        let main = request.main_keyword().ok_or_else(|| {
            MarketError::InvalidArgument("at least one keyword is required".to_string())
        })?;
        if !self.client.credentials().is_complete() {
            tracing::warn!("Credentials are not configured; skipping acquisition");
            return Err(MarketError::MissingCredentials);
        }

        let trend = self.trend(&request.keywords, request.start, request.end)?;
        let shopping = self.shopping(main, request.shopping_count)?;
        let blog = self.blog(main)?;
        Ok(build_report(trend, shopping, blog))
    }

    /// Drop every cached corpus.
    pub fn clear_cache(&self) {
        self.trend_cache.clear();
        self.shopping_cache.clear();
        self.blog_cache.clear();
    }

    /// Number of cached entries across all corpora.
    pub fn cached_entries(&self) -> usize {
        self.trend_cache.len() + self.shopping_cache.len() + self.blog_cache.len()
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn simulator(&self) -> &Simulator {
        &self.simulator
    }
}

pub(crate) fn build_report(
    trend: Vec<TrendPoint>,
    shopping: Vec<ShoppingItem>,
    blog: Vec<BlogPost>,
) -> MarketReport {
    let summary = analytics::summarize(&trend, &shopping, &blog);
    MarketReport {
        trend,
        shopping,
        blog,
        summary,
    }
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

impl fmt::Display for MarketSdk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MarketSdk(credentials={}, seed={}, cache_ttl={}s, cached={})",
            if self.client.credentials().is_complete() {
                "configured"
            } else {
                "missing"
            },
            self.simulator.seed(),
            self.cache_ttl.as_secs(),
            self.cached_entries()
        )
    }
}
