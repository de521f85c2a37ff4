//! Tests for the popularity tracker and its stores
//!
//! Each test uses an isolated store (temp directory or no-op) so tests
//! can run in parallel without sharing state.

use mycosoft_search::tracker::{
    HISTORY_KEY, JsonFileStore, MetricStore, NoopStore, POPULAR_KEY, SearchTracker,
};
use tempfile::TempDir;

fn file_tracker(dir: &TempDir) -> SearchTracker {
    let store = JsonFileStore::create(dir.path().to_path_buf()).expect("store dir");
    SearchTracker::new(Box::new(store))
}

#[test]
fn search_adds_one_click_adds_two() {
    let mut tracker = SearchTracker::new(Box::new(NoopStore));

    tracker.track_search("reishi");
    tracker.track_result_click("reishi", None);

    let top = tracker.top_searches(10);
    assert_eq!(top, vec![("reishi".to_string(), 3)]);
}

#[test]
fn top_searches_sorted_descending_and_capped() {
    let mut tracker = SearchTracker::new(Box::new(NoopStore));

    tracker.track_search("chaga");
    for _ in 0..3 {
        tracker.track_search("reishi");
    }
    tracker.track_search("cordyceps");
    tracker.track_result_click("cordyceps", None);

    let top = tracker.top_searches(2);
    assert_eq!(top.len(), 2);
    assert_eq!(top[0], ("cordyceps".to_string(), 3));
    assert_eq!(top[1], ("reishi".to_string(), 3));

    let weights: Vec<u32> = tracker.top_searches(10).iter().map(|(_, w)| *w).collect();
    let mut sorted = weights.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(weights, sorted);
}

#[test]
fn normalization_folds_case_and_whitespace() {
    let mut tracker = SearchTracker::new(Box::new(NoopStore));

    tracker.track_search("  Lion's Mane  ");
    tracker.track_search("lion's mane");

    let top = tracker.top_searches(10);
    assert_eq!(top, vec![("lion's mane".to_string(), 2)]);
}

#[test]
fn blank_queries_are_ignored() {
    let mut tracker = SearchTracker::new(Box::new(NoopStore));

    tracker.track_search("   ");
    tracker.track_result_click("", None);

    assert!(tracker.top_searches(10).is_empty());
    assert_eq!(tracker.metric_count(), 0);
}

#[test]
fn related_searches_exclude_self_and_respect_limit() {
    let mut tracker = SearchTracker::new(Box::new(NoopStore));

    tracker.track_search("reishi");
    tracker.track_search("reishi tea");
    tracker.track_search("reishi extract");
    tracker.track_search("reishi powder");
    tracker.track_search("chaga");

    let related = tracker.related_searches("reishi", 2);
    assert_eq!(related.len(), 2);
    assert!(!related.contains(&"reishi".to_string()));
    assert!(related.iter().all(|q| q.contains("reishi")));
}

#[test]
fn related_searches_match_on_shared_token() {
    let mut tracker = SearchTracker::new(Box::new(NoopStore));

    tracker.track_search("mushroom tea");
    tracker.track_search("chaga");

    let related = tracker.related_searches("tea recipes", 5);
    assert_eq!(related, vec!["mushroom tea".to_string()]);
}

#[test]
fn state_persists_across_tracker_instances() {
    let dir = TempDir::new().expect("temp dir");

    {
        let mut tracker = file_tracker(&dir);
        tracker.track_search("turkey tail");
        tracker.track_result_click("turkey tail", None);
    }

    let tracker = file_tracker(&dir);
    assert_eq!(
        tracker.top_searches(10),
        vec![("turkey tail".to_string(), 3)]
    );
    assert_eq!(tracker.metric_count(), 2);
}

#[test]
fn persisted_popularity_uses_pair_format() {
    let dir = TempDir::new().expect("temp dir");
    let mut tracker = file_tracker(&dir);
    tracker.track_search("shiitake");

    let store = JsonFileStore::create(dir.path().to_path_buf()).expect("store dir");
    let payload = store.read(POPULAR_KEY).expect("read").expect("payload");
    let pairs: Vec<(String, u32)> = serde_json::from_str(&payload).expect("pair format");
    assert_eq!(pairs, vec![("shiitake".to_string(), 1)]);

    let history = store.read(HISTORY_KEY).expect("read").expect("payload");
    assert!(history.contains("shiitake"));
}

#[test]
fn malformed_persisted_state_is_ignored() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonFileStore::create(dir.path().to_path_buf()).expect("store dir");
    store.write(HISTORY_KEY, "not json").expect("write");
    store.write(POPULAR_KEY, "[1, 2").expect("write");

    let tracker = file_tracker(&dir);
    assert_eq!(tracker.metric_count(), 0);
    assert!(tracker.top_searches(10).is_empty());
}

#[test]
fn cleanup_drops_expired_metrics() {
    let dir = TempDir::new().expect("temp dir");
    let store = JsonFileStore::create(dir.path().to_path_buf()).expect("store dir");

    // One 31-day-old metric, one fresh
    let now = chrono::Utc::now().timestamp_millis();
    let stale = now - 31 * 24 * 60 * 60 * 1000;
    store
        .write(
            HISTORY_KEY,
            &format!(
                r#"[{{"timestamp":{stale},"query":"old query"}},{{"timestamp":{now},"query":"new query"}}]"#
            ),
        )
        .expect("write");

    let mut tracker = file_tracker(&dir);
    assert_eq!(tracker.metric_count(), 2);

    tracker.cleanup();
    assert_eq!(tracker.metric_count(), 1);

    // Rewritten state no longer carries the expired entry
    let payload = store.read(HISTORY_KEY).expect("read").expect("payload");
    assert!(!payload.contains("old query"));
    assert!(payload.contains("new query"));
}

#[test]
fn noop_store_degrades_to_session_memory() {
    let mut tracker = SearchTracker::new(Box::new(NoopStore));
    tracker.track_search("maitake");
    assert_eq!(tracker.top_searches(10), vec![("maitake".to_string(), 1)]);

    // A fresh tracker over the same store sees nothing
    let fresh = SearchTracker::new(Box::new(NoopStore));
    assert!(fresh.top_searches(10).is_empty());
}
