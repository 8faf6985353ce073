//! Stateless reducers over normalized and simulated corpora.
//!
//! Every function takes a slice and returns a fully materialized summary.
//! Empty input never panics: scalar statistics come back as `None` and
//! tables come back empty.

pub mod market;
pub mod price;
pub mod stats;
pub mod text;
pub mod trend;

pub use market::{
    brand_concentration, brand_positions, category_summary, mall_shares, price_discount_fit,
    shopping_kpis,
};
pub use price::{price_histogram, price_skewness, price_tiers};
pub use text::{
    blog_kpis, keyword_frequency, keyword_frequency_in, posting_timeline, recent_posts,
    title_lengths, top_bloggers,
};
pub use trend::trend_summary;

use crate::config::{
    HISTOGRAM_BINS, RECENT_POSTS, STOP_WORDS, TOP_BLOGGERS, TOP_BRANDS, TOP_KEYWORDS, TOP_MALLS,
};
use crate::models::{AnalyticsSummary, BlogPost, ShoppingItem, TrendPoint};

/// Run every reducer with the default limits.
pub fn summarize(
    trend: &[TrendPoint],
    items: &[ShoppingItem],
    posts: &[BlogPost],
) -> AnalyticsSummary {
    AnalyticsSummary {
        trend: trend_summary(trend),

        shopping: shopping_kpis(items),
        price_tiers: price_tiers(items),
        price_histogram: price_histogram(items, HISTOGRAM_BINS),
        price_skewness: price_skewness(items),
        categories: category_summary(items),
        brand_concentration: brand_concentration(items),
        brand_positions: brand_positions(items, TOP_BRANDS),
        malls: mall_shares(items, TOP_MALLS),
        price_discount: price_discount_fit(items),

        blog: blog_kpis(posts),
        keywords: keyword_frequency(posts, &STOP_WORDS, TOP_KEYWORDS),
        top_bloggers: top_bloggers(posts, TOP_BLOGGERS),
        posting_timeline: posting_timeline(posts),
        title_lengths: title_lengths(posts),
        recent_posts: recent_posts(posts, RECENT_POSTS),
    }
}
