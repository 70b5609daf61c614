use super::*;
use crate::rate_limit::RateLimitConfig;

#[tokio::test]
async fn new_state_has_no_integrations() {
    let state = test_helpers::test_app_state();
    assert!(state.github.is_none());
    assert!(state.llm.is_none());
    assert!(state.billing.is_none());
    assert!(state.webhook_secret.is_none());
}

#[tokio::test]
async fn with_github_sets_config() {
    let state = test_helpers::test_app_state().with_github(Some(GitHubConfig {
        client_id: "cid".into(),
        client_secret: "secret".into(),
        redirect_uri: "http://localhost/cb".into(),
    }));
    assert_eq!(state.github.map(|g| g.client_id).as_deref(), Some("cid"));
}

#[tokio::test]
async fn with_billing_sets_client_and_secret() {
    let state = test_helpers::test_app_state_with_billing(Arc::new(test_helpers::MockBilling::new()), "whsec_x");
    assert!(state.billing.is_some());
    assert_eq!(state.webhook_secret.as_deref(), Some("whsec_x"));
}

#[tokio::test]
async fn clones_share_rate_limiter() {
    let state = test_helpers::test_app_state().with_rate_limiter(RateLimiter::with_config(RateLimitConfig {
        per_user_limit: 1,
        global_limit: 10,
        window: std::time::Duration::from_secs(10),
    }));
    let clone = state.clone();
    let user = uuid::Uuid::new_v4();
    assert!(state.rate_limiter.check_and_record(user).is_ok());
    assert!(clone.rate_limiter.check_and_record(user).is_err());
}
