//! Integration tests for the session token lifecycle.

mod helpers;

use std::time::Duration;

use chrono::{TimeDelta, Utc};

use mingle_auth::session::{AccessTokenResponse, bearer_token};
use mingle_auth::{RefreshCookie, SessionError, TokenType};
use mingle_core::error::{AppError, ErrorKind};

const EMAIL: &str = "a@x.com";

async fn app_with_employee() -> helpers::TestApp {
    let app = helpers::TestApp::new().await;
    app.create_employee(42, "Seo Jiwoo", EMAIL, "ROLE_MANAGER");
    app
}

#[tokio::test]
async fn test_issue_scenario() {
    let app = app_with_employee().await;
    let pair = app.manager.issue(EMAIL).await.unwrap();

    let stored = app.manager.registry().current(EMAIL).await.unwrap();
    assert_eq!(stored.as_deref(), Some(pair.refresh_token.as_str()));

    let ttl = app
        .manager
        .registry()
        .remaining_ttl(EMAIL)
        .await
        .unwrap()
        .unwrap();
    let refresh_lifetime = Duration::from_secs(24 * 3600);
    assert!(ttl <= refresh_lifetime);
    assert!(ttl >= refresh_lifetime - Duration::from_secs(5));

    let access_span = pair.access_expires_at - Utc::now();
    assert!((access_span - TimeDelta::minutes(15)).num_seconds().abs() <= 2);
}

#[tokio::test]
async fn test_pair_subjects_share_snapshot() {
    let app = app_with_employee().await;
    let pair = app.manager.issue(EMAIL).await.unwrap();

    let access = app.manager.verify(&pair.access_token).unwrap();
    let refresh = app.manager.verify(&pair.refresh_token).unwrap();

    assert_eq!(access.token_type, TokenType::Access);
    assert_eq!(refresh.token_type, TokenType::Refresh);
    assert_eq!(access.id, 42);
    assert_eq!(access.id, refresh.id);
    assert_eq!(access.name, refresh.name);
    assert_eq!(access.authority, refresh.authority);
    assert!(pair.access_expires_at < pair.refresh_expires_at);
}

#[tokio::test]
async fn test_unknown_employee_is_client_error() {
    let app = helpers::TestApp::new().await;
    let err = app.manager.issue("nobody@x.com").await.unwrap_err();
    assert!(matches!(err, SessionError::PrincipalNotFound { .. }));

    let app_err: AppError = err.into();
    assert_eq!(app_err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_full_lifecycle() {
    let app = app_with_employee().await;

    // sign-in
    let signed_in = app.manager.issue(EMAIL).await.unwrap();
    assert!(app.manager.registry_status(EMAIL).await.unwrap().active);

    // renew twice, each token single use
    let renewed = app.manager.renew(&signed_in.refresh_token).await.unwrap();
    let renewed_again = app.manager.renew(&renewed.refresh_token).await.unwrap();
    for stale in [&signed_in.refresh_token, &renewed.refresh_token] {
        assert!(matches!(
            app.manager.renew(stale).await,
            Err(SessionError::StaleOrUnknownToken)
        ));
    }

    // logout with the current access token
    let header = format!("Bearer {}", renewed_again.access_token);
    let access_token = bearer_token(&header).unwrap();
    app.manager.invalidate(access_token).await.unwrap();

    assert!(!app.manager.registry_status(EMAIL).await.unwrap().active);
    assert!(matches!(
        app.manager.renew(&renewed_again.refresh_token).await,
        Err(SessionError::StaleOrUnknownToken)
    ));
}

#[tokio::test]
async fn test_renewal_ignores_principal_changes() {
    let app = app_with_employee().await;
    let pair = app.manager.issue(EMAIL).await.unwrap();

    app.principals.remove(EMAIL);
    app.create_employee(42, "Seo Jiwoo", "renamed@x.com", "ROLE_ADMIN");

    let renewed = app.manager.renew(&pair.refresh_token).await.unwrap();
    let subject = app.manager.verify(&renewed.access_token).unwrap();
    assert_eq!(subject.email, EMAIL);
    assert_eq!(subject.authority, "ROLE_MANAGER");
}

#[tokio::test]
async fn test_access_token_cannot_renew() {
    let app = app_with_employee().await;
    let pair = app.manager.issue(EMAIL).await.unwrap();

    let err = app.manager.renew(&pair.access_token).await.unwrap_err();
    assert!(matches!(err, SessionError::StaleOrUnknownToken));

    let app_err: AppError = err.into();
    assert_eq!(app_err.kind.http_status(), 401);
}

#[tokio::test]
async fn test_concurrent_renewals() {
    let app = app_with_employee().await;
    let pair = app.manager.issue(EMAIL).await.unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let manager = app.manager.clone();
            let token = pair.refresh_token.clone();
            tokio::spawn(async move { manager.renew(&token).await })
        })
        .collect();

    let mut winners = Vec::new();
    for handle in handles {
        match handle.await.unwrap() {
            Ok(tokens) => winners.push(tokens),
            Err(err) => assert!(matches!(err, SessionError::StaleOrUnknownToken)),
        }
    }

    assert_eq!(winners.len(), 1);
    let stored = app.manager.registry().current(EMAIL).await.unwrap();
    assert_eq!(stored.as_deref(), Some(winners[0].refresh_token.as_str()));
}

#[tokio::test]
async fn test_refresh_cookie_from_fixture() {
    let app = app_with_employee().await;
    let pair = app.manager.issue(EMAIL).await.unwrap();

    let now = Utc::now();
    let cookie = RefreshCookie::from_pair(&pair, &app.config.auth.refresh_cookie, now);
    assert_eq!(cookie.name, "rtk");
    assert_eq!(cookie.value, pair.refresh_token);
    assert!((cookie.max_age_seconds - 24 * 3600).abs() <= 2);

    let header = cookie.to_string();
    assert!(header.contains("Path=/api/v1/auth"));
    assert!(header.contains("HttpOnly"));
    assert!(header.ends_with("Secure"));

    let body = AccessTokenResponse::from(&pair);
    assert_eq!(body.atk, pair.access_token);
}
