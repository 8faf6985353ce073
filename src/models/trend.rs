use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// TrendPoint — One search-interest observation for a keyword on a date
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub keyword: String,
    pub date: NaiveDate,
    /// Relative search interest in `[0, 100]`.
    pub ratio: f64,
}
