use super::*;

use axum::body::Body;
use axum::http::{Request, header};
use tower::ServiceExt;

use crate::routes::api_routes;
use crate::state::test_helpers;

// =============================================================================
// cookies
// =============================================================================

#[test]
fn session_cookie_is_http_only_lax() {
    let cookie = build_cookie(COOKIE_NAME, "tok".into(), true);
    assert_eq!(cookie.name(), "session_token");
    assert_eq!(cookie.value(), "tok");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.secure(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
    assert_eq!(cookie.path(), Some("/"));
}

#[test]
fn expired_cookie_has_zero_max_age() {
    let cookie = expired_cookie(COOKIE_NAME, false);
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
    assert!(cookie.value().is_empty());
}

#[test]
fn cookie_secure_https_inference_logic() {
    // Inference mirrors `starts_with("https://")` on the redirect URI.
    assert!("https://myapp.com/callback".starts_with("https://"));
    assert!(!"http://localhost/callback".starts_with("https://"));
}

// =============================================================================
// handlers
// =============================================================================

#[tokio::test]
async fn me_without_cookie_is_unauthorized() {
    let app = api_routes(test_helpers::test_app_state());
    let resp = app
        .oneshot(Request::get("/api/auth/me").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_cookie_is_unauthorized() {
    let app = api_routes(test_helpers::test_app_state());
    let resp = app
        .oneshot(Request::post("/api/auth/logout").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn github_redirect_unconfigured_is_503() {
    let app = api_routes(test_helpers::test_app_state());
    let resp = app
        .oneshot(Request::get("/auth/github").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn github_redirect_sets_state_cookie_and_redirects() {
    let state = test_helpers::test_app_state().with_github(Some(auth_svc::GitHubConfig {
        client_id: "cid".into(),
        client_secret: "secret".into(),
        redirect_uri: "http://localhost:3000/auth/github/callback".into(),
    }));
    let resp = api_routes(state)
        .oneshot(Request::get("/auth/github").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);

    let location = resp.headers()[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("https://github.com/login/oauth/authorize?"));
    let set_cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(set_cookie.starts_with("oauth_state="));
    let state_value = set_cookie
        .trim_start_matches("oauth_state=")
        .split(';')
        .next()
        .unwrap();
    assert!(location.contains(&format!("state={state_value}")));
}

#[tokio::test]
async fn callback_with_mismatched_state_is_unauthorized() {
    let state = test_helpers::test_app_state().with_github(Some(auth_svc::GitHubConfig {
        client_id: "cid".into(),
        client_secret: "secret".into(),
        redirect_uri: "http://localhost/cb".into(),
    }));
    let req = Request::get("/auth/github/callback?code=abc&state=attacker")
        .header(header::COOKIE, "oauth_state=expected")
        .body(Body::empty())
        .unwrap();
    let resp = api_routes(state).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn callback_without_state_is_bad_request() {
    let state = test_helpers::test_app_state().with_github(Some(auth_svc::GitHubConfig {
        client_id: "cid".into(),
        client_secret: "secret".into(),
        redirect_uri: "http://localhost/cb".into(),
    }));
    let resp = api_routes(state)
        .oneshot(Request::get("/auth/github/callback?code=abc").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
