//! Async wrapper around [`MarketSdk`] for use in async runtimes (Tokio, etc.).
//!
//! Runs all SDK operations on a blocking thread pool via
//! [`tokio::task::spawn_blocking`], keeping the async event loop free. The
//! three acquisitions of [`analyze`](AsyncMarketSdk::analyze) are independent
//! and run concurrently.
//!
//! # Example
//!
//! ```no_run
//! use market_signal_sdk::{AsyncMarketSdk, Credentials, MarketSdk};
//!
//! #[tokio::main]
//! async fn main() {
//!     let sdk = MarketSdk::builder()
//!         .credentials(Credentials::from_env())
//!         .build()
//!         .unwrap();
//!     let sdk = AsyncMarketSdk::new(sdk);
//!
//!     let posts = sdk.run(|s| s.blog("신동진쌀")).await.unwrap();
//! }
//! ```

use std::sync::Arc;

use crate::error::{MarketError, Result};
use crate::models::{BlogPost, ShoppingItem, TrendPoint};
use crate::{build_report, MarketReport, MarketRequest, MarketSdk};

/// Async wrapper around [`MarketSdk`].
///
/// The SDK is shared behind an [`Arc`]; its caches are internally locked, so
/// no outer mutex is needed.
#[derive(Clone)]
pub struct AsyncMarketSdk {
    inner: Arc<MarketSdk>,
}

fn join_error(e: tokio::task::JoinError) -> MarketError {
    MarketError::InvalidArgument(format!("Task join error: {e}"))
}

impl AsyncMarketSdk {
    pub fn new(sdk: MarketSdk) -> Self {
        Self {
            inner: Arc::new(sdk),
        }
    }

    /// Run a sync SDK operation on the blocking thread pool.
    pub async fn run<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&MarketSdk) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let sdk = self.inner.clone();
        tokio::task::spawn_blocking(move || f(&sdk))
            .await
            .map_err(join_error)?
    }

    /// Fetch the three corpora concurrently, then summarize.
    pub async fn analyze(&self, request: &MarketRequest) -> Result<MarketReport> {
        let main = request
            .main_keyword()
            .ok_or_else(|| {
                MarketError::InvalidArgument("at least one keyword is required".to_string())
            })?
            .to_string();
        if !self.inner.client().credentials().is_complete() {
            return Err(MarketError::MissingCredentials);
        }

        let (keywords, start, end) = (request.keywords.clone(), request.start, request.end);
        let count = request.shopping_count;
        let shop_keyword = main.clone();

        let (trend, shopping, blog) = tokio::join!(
            self.run(move |s| -> Result<Vec<TrendPoint>> { s.trend(&keywords, start, end) }),
            self.run(move |s| -> Result<Vec<ShoppingItem>> { s.shopping(&shop_keyword, count) }),
            self.run(move |s| -> Result<Vec<BlogPost>> { s.blog(&main) }),
        );

        let (trend, shopping, blog) = (trend?, shopping?, blog?);
        self.run(move |_| Ok(build_report(trend, shopping, blog))).await
    }

    /// Borrow the wrapped sync SDK.
    pub fn inner(&self) -> &MarketSdk {
        &self.inner
    }
}
