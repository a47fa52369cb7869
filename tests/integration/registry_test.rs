//! Integration tests for the refresh registry over the configured cache.

mod helpers;

use std::time::Duration;

use mingle_auth::RefreshRegistry;

#[tokio::test]
async fn test_store_overwrites_previous_entry() {
    let app = helpers::TestApp::new().await;
    let registry = RefreshRegistry::new(app.cache.clone());

    registry
        .store("b@x.com", "first", Duration::from_secs(60))
        .await
        .unwrap();
    registry
        .store("b@x.com", "second", Duration::from_secs(60))
        .await
        .unwrap();

    assert_eq!(
        registry.current("b@x.com").await.unwrap().as_deref(),
        Some("second")
    );
    assert!(!registry.take_if_current("b@x.com", "first").await.unwrap());
    assert!(registry.take_if_current("b@x.com", "second").await.unwrap());
    assert!(registry.current("b@x.com").await.unwrap().is_none());
}

#[tokio::test]
async fn test_entry_expires_with_ttl() {
    let app = helpers::TestApp::new().await;
    let registry = RefreshRegistry::new(app.cache.clone());

    registry
        .store("c@x.com", "token", Duration::from_millis(100))
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(300)).await;

    assert!(registry.current("c@x.com").await.unwrap().is_none());
    assert!(registry.remaining_ttl("c@x.com").await.unwrap().is_none());
    assert!(!registry.take_if_current("c@x.com", "token").await.unwrap());
}

#[tokio::test]
async fn test_revoke_missing_is_noop() {
    let app = helpers::TestApp::new().await;
    let registry = RefreshRegistry::new(app.cache.clone());
    registry.revoke("nobody@x.com").await.unwrap();
    assert!(registry.current("nobody@x.com").await.unwrap().is_none());
}
