//! Search-interest aggregates per keyword.

use std::collections::HashMap;

use super::stats::{mean, sample_std};
use crate::models::{TrendPoint, TrendStats};

/// Mean, max and sample standard deviation of `ratio` per keyword, plus
/// each keyword's share of voice. Keywords appear in first-seen order.
pub fn trend_summary(points: &[TrendPoint]) -> Vec<TrendStats> {
    let mut order: Vec<&str> = Vec::new();
    let mut series: HashMap<&str, Vec<f64>> = HashMap::new();
    for p in points {
        let entry = series.entry(p.keyword.as_str()).or_insert_with(|| {
            order.push(p.keyword.as_str());
            Vec::new()
        });
        entry.push(p.ratio);
    }

    let mut stats: Vec<TrendStats> = order
        .into_iter()
        .map(|keyword| {
            let ratios = &series[keyword];
            TrendStats {
                keyword: keyword.to_string(),
                points: ratios.len(),
                mean: mean(ratios),
                max: ratios.iter().copied().reduce(f64::max),
                std_dev: sample_std(ratios),
                share_of_voice: None,
            }
        })
        .collect();

    let total: f64 = stats.iter().filter_map(|s| s.mean).sum();
    if total > 0.0 {
        for s in &mut stats {
            s.share_of_voice = s.mean.map(|m| m / total * 100.0);
        }
    }
    stats
}
