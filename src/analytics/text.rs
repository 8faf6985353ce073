//! Blog corpus reducers: keyword frequency and posting activity.

use chrono::NaiveDate;
use std::cmp::Reverse;

use super::stats::{self, ranked_counts};
use crate::models::{BlogKpis, BlogPost, BloggerCount, FiveNumber, KeywordCount, TimelinePoint};

/// Whitespace-tokenize `text`, drop single-character tokens and stop words,
/// and return the `limit` most frequent tokens.
pub fn keyword_frequency_in(text: &str, stop_words: &[&str], limit: usize) -> Vec<KeywordCount> {
    ranked_counts(
        text.split_whitespace()
            .filter(|w| w.chars().count() > 1 && !stop_words.contains(w)),
    )
    .into_iter()
    .take(limit)
    .map(|(keyword, count)| KeywordCount {
        keyword: keyword.to_string(),
        count,
    })
    .collect()
}

/// Keyword frequency over the title and description of every post.
pub fn keyword_frequency(posts: &[BlogPost], stop_words: &[&str], limit: usize) -> Vec<KeywordCount> {
    let corpus = posts
        .iter()
        .map(|p| format!("{} {}", p.title, p.description))
        .collect::<Vec<_>>()
        .join(" ");
    keyword_frequency_in(&corpus, stop_words, limit)
}

pub fn blog_kpis(posts: &[BlogPost]) -> BlogKpis {
    BlogKpis {
        posts: posts.len(),
        bloggers: ranked_counts(
            posts
                .iter()
                .map(|p| p.blogger_name.as_str())
                .filter(|b| !b.trim().is_empty()),
        )
        .len(),
        latest_post: posts.iter().filter_map(|p| p.post_date).max(),
    }
}

/// Number of posts per date, ascending. Undated posts are skipped.
pub fn posting_timeline(posts: &[BlogPost]) -> Vec<TimelinePoint> {
    let mut dates: Vec<NaiveDate> = posts.iter().filter_map(|p| p.post_date).collect();
    dates.sort();
    let mut timeline: Vec<TimelinePoint> = Vec::new();
    for date in dates {
        match timeline.last_mut() {
            Some(last) if last.date == date => last.posts += 1,
            _ => timeline.push(TimelinePoint { date, posts: 1 }),
        }
    }
    timeline
}

pub fn top_bloggers(posts: &[BlogPost], limit: usize) -> Vec<BloggerCount> {
    ranked_counts(
        posts
            .iter()
            .map(|p| p.blogger_name.as_str())
            .filter(|b| !b.trim().is_empty()),
    )
    .into_iter()
    .take(limit)
    .map(|(blogger, posts)| BloggerCount {
        blogger: blogger.to_string(),
        posts,
    })
    .collect()
}

/// Distribution of title lengths in characters.
pub fn title_lengths(posts: &[BlogPost]) -> Option<FiveNumber> {
    let lengths: Vec<f64> = posts
        .iter()
        .map(|p| p.title.chars().count() as f64)
        .collect();
    stats::five_number(&lengths)
}

/// Newest posts first; undated posts go last in their original order.
pub fn recent_posts(posts: &[BlogPost], limit: usize) -> Vec<BlogPost> {
    let mut sorted = posts.to_vec();
    sorted.sort_by_key(|p| (p.post_date.is_none(), Reverse(p.post_date)));
    sorted.truncate(limit);
    sorted
}
