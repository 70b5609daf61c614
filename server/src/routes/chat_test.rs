use super::*;

use axum::body::Body;
use axum::http::{Request, header};
use tower::ServiceExt;

use crate::llm::LlmError;
use crate::rate_limit::RateLimitError;
use crate::routes::api_routes;
use crate::state::test_helpers;

#[test]
fn chat_error_status_mapping() {
    assert_eq!(chat_error_to_status(&ChatError::LlmNotConfigured), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(chat_error_to_status(&ChatError::NotFound(Uuid::nil())), StatusCode::NOT_FOUND);
    assert_eq!(chat_error_to_status(&ChatError::EmptyPrompt), StatusCode::BAD_REQUEST);
    assert_eq!(chat_error_to_status(&ChatError::PromptTooLong), StatusCode::BAD_REQUEST);
    assert_eq!(
        chat_error_to_status(&ChatError::RateLimited(RateLimitError::PerUserExceeded { limit: 10, window_secs: 10 })),
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(chat_error_to_status(&ChatError::EmptyReply), StatusCode::BAD_GATEWAY);
    assert_eq!(
        chat_error_to_status(&ChatError::Llm(LlmError::ApiRequest("timeout".into()))),
        StatusCode::BAD_GATEWAY
    );
}

#[tokio::test]
async fn get_chat_without_cookie_is_unauthorized() {
    let app = api_routes(test_helpers::test_app_state());
    let uri = format!("/api/chat/{}", Uuid::new_v4());
    let resp = app.oneshot(Request::get(uri).body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn send_prompt_without_cookie_is_unauthorized() {
    let app = api_routes(test_helpers::test_app_state());
    let req = Request::post(format!("/api/chat/{}", Uuid::new_v4()))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"prompt":"hi"}"#))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}
