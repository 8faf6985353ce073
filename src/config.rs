use std::fmt;
use std::time::Duration;

pub const TREND_URL: &str = "https://openapi.naver.com/v1/datalab/search";
pub const SHOP_URL: &str = "https://openapi.naver.com/v1/search/shop.json";
pub const BLOG_URL: &str = "https://openapi.naver.com/v1/search/blog.json";

pub const CLIENT_ID_HEADER: &str = "X-Naver-Client-Id";
pub const CLIENT_SECRET_HEADER: &str = "X-Naver-Client-Secret";

pub const CLIENT_ID_ENV: &str = "NAVER_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "NAVER_CLIENT_SECRET";

/// Upper bound on `display` for the search endpoints.
pub const PAGE_SIZE: usize = 100;
pub const BLOG_DISPLAY: usize = 100;
/// The trend endpoint accepts at most five keyword groups per request.
pub const MAX_KEYWORD_GROUPS: usize = 5;

pub const DEFAULT_SEED: u64 = 42;
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// Simulation model
pub const PAID_DELIVERY_FEE: i64 = 3000;
pub const PAID_DELIVERY_PROBABILITY: f64 = 0.7;
pub const MAX_DISCOUNT_RATE: u32 = 45;

// Analytics
pub const TOP_KEYWORDS: usize = 20;
pub const TOP_MALLS: usize = 10;
pub const TOP_BLOGGERS: usize = 12;
pub const TOP_BRANDS: usize = 10;
pub const RECENT_POSTS: usize = 30;
pub const HISTOGRAM_BINS: usize = 5;
pub const HHI_CONCENTRATED: f64 = 2500.0;
pub const HHI_COMPETITIVE: f64 = 1500.0;

/// Upper bounds (inclusive) of the fixed price tiers; anything above the
/// last bound lands in the open-ended top tier.
pub const PRICE_TIER_BOUNDS: [i64; 4] = [10_000, 30_000, 50_000, 100_000];

pub const STOP_WORDS: [&str; 14] = [
    "있는", "위한", "추천", "대한", "및", "방법", "하는", "통해", "정보", "관련", "오늘", "진짜",
    "후기", "소개",
];

/// The two static credential values sent as headers on every API call.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Resolve credentials from the process environment, loading a `.env`
    /// file first when one is present.
    ///
    /// Unset variables resolve to empty strings; completeness is checked by
    /// the API client on every acquisition call, not here.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            client_id: std::env::var(CLIENT_ID_ENV).unwrap_or_default(),
            client_secret: std::env::var(CLIENT_SECRET_ENV).unwrap_or_default(),
        }
    }

    /// Both values present and non-blank.
    pub fn is_complete(&self) -> bool {
        !self.client_id.trim().is_empty() && !self.client_secret.trim().is_empty()
    }

    pub(crate) fn headers(&self) -> Vec<(String, String)> {
        vec![
            (CLIENT_ID_HEADER.to_string(), self.client_id.clone()),
            (CLIENT_SECRET_HEADER.to_string(), self.client_secret.clone()),
        ]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |s: &str| if s.is_empty() { "<empty>" } else { "<redacted>" };
        f.debug_struct("Credentials")
            .field("client_id", &redact(&self.client_id))
            .field("client_secret", &redact(&self.client_secret))
            .finish()
    }
}
