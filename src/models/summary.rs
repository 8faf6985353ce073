use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::blog::BlogPost;
use super::shopping::format_thousands;

// ---------------------------------------------------------------------------
// TrendStats — Per-keyword search-interest statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendStats {
    pub keyword: String,
    pub points: usize,
    pub mean: Option<f64>,
    pub max: Option<f64>,
    /// Sample standard deviation; `None` with fewer than two points.
    pub std_dev: Option<f64>,
    /// Share of voice: this keyword's mean as a percentage of the sum of means.
    pub share_of_voice: Option<f64>,
}

// ---------------------------------------------------------------------------
// Price tiers and histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    UpTo10k,
    From10kTo30k,
    From30kTo50k,
    From50kTo100k,
    Over100k,
}

impl PriceTier {
    pub const ALL: [PriceTier; 5] = [
        PriceTier::UpTo10k,
        PriceTier::From10kTo30k,
        PriceTier::From30kTo50k,
        PriceTier::From50kTo100k,
        PriceTier::Over100k,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PriceTier::UpTo10k => "~ 10,000",
            PriceTier::From10kTo30k => "10,001 ~ 30,000",
            PriceTier::From30kTo50k => "30,001 ~ 50,000",
            PriceTier::From50kTo100k => "50,001 ~ 100,000",
            PriceTier::Over100k => "100,001 ~",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierCount {
    pub tier: PriceTier,
    pub count: usize,
}

/// One equal-width histogram bin, half-open `(lower, upper]` except the
/// first which also includes `lower`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn label(&self) -> String {
        format!(
            "({}, {}]",
            format_thousands(self.lower.round() as i64),
            format_thousands(self.upper.round() as i64)
        )
    }
}

// ---------------------------------------------------------------------------
// Category / brand / mall summaries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub category: String,
    pub count: usize,
    pub mean_price: f64,
    pub max_price: i64,
    pub min_price: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Concentration {
    /// HHI >= 2,500.
    Concentrated,
    Moderate,
    /// HHI < 1,500.
    Competitive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandConcentration {
    pub hhi: f64,
    pub brands: usize,
    pub level: Concentration,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MallShare {
    pub mall: String,
    pub count: usize,
    /// Percentage of all listings.
    pub share: f64,
}

/// Min, quartiles and max of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FiveNumber {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandPricePosition {
    pub brand: String,
    pub count: usize,
    pub prices: FiveNumber,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoppingKpis {
    pub listings: usize,
    pub malls: usize,
    pub mean_low_price: Option<f64>,
    pub max_low_price: Option<i64>,
    pub mean_discount_rate: Option<f64>,
    /// Percentage of listings that are advertised placements.
    pub advertised_share: Option<f64>,
}

/// Least-squares line of discount rate on price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceDiscountFit {
    pub points: usize,
    pub correlation: f64,
    pub slope: f64,
    pub intercept: f64,
}

// ---------------------------------------------------------------------------
// Skewness
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkewDirection {
    /// Long right tail: premium items present.
    RightTail,
    /// Long left tail: budget-dominated.
    LeftTail,
    Symmetric,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skewness {
    pub value: f64,
    pub direction: SkewDirection,
}

// ---------------------------------------------------------------------------
// Blog summaries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BloggerCount {
    pub blogger: String,
    pub posts: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub date: NaiveDate,
    pub posts: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogKpis {
    pub posts: usize,
    pub bloggers: usize,
    pub latest_post: Option<NaiveDate>,
}

// ---------------------------------------------------------------------------
// AnalyticsSummary — Everything derived for one request
// ---------------------------------------------------------------------------

/// Derived, non-persistent view over one request's corpora. Recomputed on
/// every call to [`summarize`](crate::analytics::summarize).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub trend: Vec<TrendStats>,

    pub shopping: ShoppingKpis,
    pub price_tiers: Vec<TierCount>,
    pub price_histogram: Vec<HistogramBin>,
    pub price_skewness: Option<Skewness>,
    pub categories: Vec<CategorySummary>,
    pub brand_concentration: Option<BrandConcentration>,
    pub brand_positions: Vec<BrandPricePosition>,
    pub malls: Vec<MallShare>,
    pub price_discount: Option<PriceDiscountFit>,

    pub blog: BlogKpis,
    pub keywords: Vec<KeywordCount>,
    pub top_bloggers: Vec<BloggerCount>,
    pub posting_timeline: Vec<TimelinePoint>,
    pub title_lengths: Option<FiveNumber>,
    pub recent_posts: Vec<BlogPost>,
}
