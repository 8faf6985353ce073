use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// BlogPost — Normalized blog search result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub description: String,
    pub blogger_name: String,
    /// `None` when the upstream `postdate` was not a valid `YYYYMMDD` date.
    pub post_date: Option<NaiveDate>,
    pub link: String,
}
