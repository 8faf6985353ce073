//! Result cache tests: hits within TTL, expiry, failure handling, concurrency.

use chrono::NaiveDate;
use market_signal_sdk::{CacheKey, MarketError, ResultCache};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

const HOUR: Duration = Duration::from_secs(3600);

fn shopping_key(keyword: &str, count: usize) -> CacheKey {
    CacheKey::Shopping {
        keyword: keyword.to_string(),
        count,
    }
}

#[test]
fn value_is_computed_once_within_ttl() {
    let cache: ResultCache<Vec<i64>> = ResultCache::new();
    let calls = AtomicUsize::new(0);
    let key = shopping_key("쌀", 100);

    for _ in 0..3 {
        let value = cache
            .get_or_compute(&key, HOUR, || {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(vec![1, 2, 3])
            })
            .unwrap();
        assert_eq!(value, vec![1, 2, 3]);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn expired_entry_is_recomputed() {
    let cache: ResultCache<usize> = ResultCache::new();
    let calls = AtomicUsize::new(0);
    let key = CacheKey::Blog {
        keyword: "쌀".to_string(),
    };
    let produce = || Ok(calls.fetch_add(1, Ordering::SeqCst) + 1);

    assert_eq!(cache.get_or_compute(&key, Duration::ZERO, produce).unwrap(), 1);
    assert_eq!(cache.get_or_compute(&key, Duration::ZERO, produce).unwrap(), 2);
    assert!(cache.get(&key).is_none());
    assert_eq!(cache.purge_expired(), 1);
    assert!(cache.is_empty());
}

#[test]
fn failures_are_not_cached() {
    let cache: ResultCache<String> = ResultCache::new();
    let key = shopping_key("쌀", 100);

    let err = cache
        .get_or_compute(&key, HOUR, || {
            Err(MarketError::Upstream {
                endpoint: "shopping",
                status: 500,
            })
        })
        .unwrap_err();
    assert!(matches!(err, MarketError::Upstream { status: 500, .. }));
    assert!(cache.is_empty());

    let value = cache
        .get_or_compute(&key, HOUR, || Ok("fresh".to_string()))
        .unwrap();
    assert_eq!(value, "fresh");
}

#[test]
fn keys_distinguish_every_parameter() {
    let cache: ResultCache<&'static str> = ResultCache::new();
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let end = NaiveDate::from_ymd_opt(2025, 3, 31).unwrap();
    let trend = |keywords: &[&str], end: NaiveDate| CacheKey::Trend {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        start,
        end,
    };

    cache.get_or_compute(&shopping_key("쌀", 100), HOUR, || Ok("a")).unwrap();
    cache.get_or_compute(&shopping_key("쌀", 200), HOUR, || Ok("b")).unwrap();
    cache.get_or_compute(&trend(&["쌀"], end), HOUR, || Ok("c")).unwrap();
    cache.get_or_compute(&trend(&["쌀", "현미"], end), HOUR, || Ok("d")).unwrap();
    cache.get_or_compute(&trend(&["쌀"], start), HOUR, || Ok("e")).unwrap();

    assert_eq!(cache.len(), 5);
    assert_eq!(cache.get(&shopping_key("쌀", 100)), Some("a"));
    assert_eq!(cache.get(&trend(&["쌀", "현미"], end)), Some("d"));
}

#[test]
fn invalidate_and_clear() {
    let cache: ResultCache<u8> = ResultCache::new();
    let key = shopping_key("쌀", 100);
    cache.get_or_compute(&key, HOUR, || Ok(1)).unwrap();

    assert!(cache.invalidate(&key));
    assert!(!cache.invalidate(&key));

    cache.get_or_compute(&key, HOUR, || Ok(2)).unwrap();
    cache.clear();
    assert!(cache.is_empty());
}

#[test]
fn concurrent_readers_see_complete_values() {
    let cache: ResultCache<Vec<u32>> = ResultCache::new();
    let key = shopping_key("쌀", 100);
    cache
        .get_or_compute(&key, HOUR, || Ok((0..100).collect()))
        .unwrap();

    std::thread::scope(|s| {
        for _ in 0..8 {
            s.spawn(|| {
                let value = cache
                    .get_or_compute(&key, HOUR, || Ok(Vec::new()))
                    .unwrap();
                assert_eq!(value.len(), 100);
            });
        }
    });
}

#[test]
fn concurrent_misses_share_one_producer_call() {
    let cache: ResultCache<String> = ResultCache::new();
    let calls = AtomicUsize::new(0);
    let key = CacheKey::Blog {
        keyword: "쌀".to_string(),
    };

    std::thread::scope(|s| {
        for _ in 0..4 {
            s.spawn(|| {
                let value = cache
                    .get_or_compute(&key, HOUR, || {
                        calls.fetch_add(1, Ordering::SeqCst);
                        std::thread::sleep(Duration::from_millis(200));
                        Ok("posts".to_string())
                    })
                    .unwrap();
                assert_eq!(value, "posts");
            });
        }
    });

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn waiter_behind_a_failure_produces_itself() {
    let cache: ResultCache<u32> = ResultCache::new();
    let calls = AtomicUsize::new(0);
    let key = shopping_key("쌀", 100);

    std::thread::scope(|s| {
        for _ in 0..2 {
            s.spawn(|| {
                let _ = cache.get_or_compute(&key, HOUR, || {
                    let n = calls.fetch_add(1, Ordering::SeqCst);
                    std::thread::sleep(Duration::from_millis(100));
                    if n == 0 {
                        Err(MarketError::Upstream {
                            endpoint: "shopping",
                            status: 503,
                        })
                    } else {
                        Ok(7)
                    }
                });
            });
        }
    });

    // either the second caller waited and retried, or it ran after the failure
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(cache.get(&key), Some(7));
}

#[test]
fn expired_entries_are_evicted_on_the_next_store() {
    let cache: ResultCache<u8> = ResultCache::new();
    let stale = shopping_key("쌀", 100);
    cache.get_or_compute(&stale, Duration::ZERO, || Ok(1)).unwrap();
    assert_eq!(cache.len(), 1);

    cache
        .get_or_compute(&shopping_key("현미", 100), HOUR, || Ok(2))
        .unwrap();
    assert_eq!(cache.len(), 1);
    assert!(cache.get(&stale).is_none());
}
