//! Behavior tests for the response cache as a write-side consistency tool:
//! patch after PUT, append after POST-create, invalidation, logout clearing.

use std::sync::Arc;

use serde_json::json;
use time::macros::date;
use tokio_util::sync::CancellationToken;
use worklog_tests::*;

#[tokio::test]
async fn after_update_entry_the_cache_serves_the_edit_unchanged() {
    // Given: a cached entry from an earlier GET
    let cache = ResponseCache::new();
    cache
        .update_entry("/api/v1/partes/7", json!({"id": 7, "client": "Acme"}))
        .await;

    // When: a PUT succeeds and the caller patches the cache
    let updated = json!({"id": 7, "client": "Acme", "status": "closed"});
    cache.update_entry("/api/v1/partes/7", updated.clone()).await;

    // Then: the cache returns the edit without a round trip
    assert_eq!(cache.get("/api/v1/partes/7").await, Some(updated));
}

#[tokio::test]
async fn created_entries_appear_in_cached_range_queries_immediately() {
    // Given: a server accepting a create, and a cached day list
    let transport = Arc::new(ScriptedTransport::new().fallback(Scripted::ok("")));
    let session = Arc::new(Session::new());
    let client = test_client_with_session(transport, Arc::clone(&session));

    let day_path = day_entries_path(date!(2026 - 08 - 25));
    session
        .cache()
        .update_entry(&day_path, json!([{"id": 1, "client": "Acme"}]))
        .await;

    // When: a new entry is POSTed and the caller appends it to the day list
    let mut entry = WorkEntry::for_date(date!(2026 - 08 - 25));
    entry.client = Some("Globex".to_owned());
    let _: Option<WorkEntry> = client
        .post(ENTRIES_PATH, &entry, &CancellationToken::new())
        .await
        .expect("create succeeds");
    session
        .cache()
        .add_item_to_list_entry(&day_path, serde_json::to_value(&entry).expect("serializes"))
        .await;

    // Then: the cached range shows both records
    let cached = session.cache().get(&day_path).await.expect("entry exists");
    let items = cached.as_array().expect("list entry");
    assert_eq!(items.len(), 2);
}

#[tokio::test]
async fn failed_gets_never_touch_an_existing_entry() {
    // Given: a cached value and a server that now rejects the path
    let transport = Arc::new(
        ScriptedTransport::new().route("/api/v1/partes/7", Scripted::status(500, "boom")),
    );
    let session = Arc::new(Session::new());
    let client = test_client_with_session(transport, Arc::clone(&session));

    let before = json!({"id": 7, "client": "Acme"});
    session.cache().update_entry("/api/v1/partes/7", before.clone()).await;

    // When: the GET fails
    let result = client
        .get::<WorkEntry>("/api/v1/partes/7", &CancellationToken::new())
        .await;

    // Then: the error never corrupts the cached entry
    assert!(result.is_err());
    assert_eq!(session.cache().get("/api/v1/partes/7").await, Some(before));
}

#[tokio::test]
async fn invalidating_one_entry_leaves_the_rest() {
    let cache = ResponseCache::new();
    cache.update_entry("/api/v1/partes/7", json!({"id": 7})).await;
    cache.update_entry("/api/v1/partes/8", json!({"id": 8})).await;

    cache.invalidate_entry("/api/v1/partes/7").await;

    assert!(cache.get("/api/v1/partes/7").await.is_none());
    assert!(cache.get("/api/v1/partes/8").await.is_some());
}

#[tokio::test]
async fn cache_lookups_are_literal_string_keyed() {
    let cache = ResponseCache::new();
    cache
        .update_entry("/api/v1/partes?fecha=2026-08-25&site=hq", json!([1]))
        .await;

    // Same logical query, different parameter order: not the same entry.
    assert!(cache
        .get("/api/v1/partes?site=hq&fecha=2026-08-25")
        .await
        .is_none());
}
