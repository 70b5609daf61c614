use super::*;

// =============================================================================
// LlmError::retryable
// =============================================================================

#[test]
fn retryable_api_request() {
    assert!(LlmError::ApiRequest("conn refused".into()).retryable());
}

#[test]
fn retryable_rate_limit_and_server_errors() {
    assert!(LlmError::ApiResponse { status: 429, body: String::new() }.retryable());
    assert!(LlmError::ApiResponse { status: 503, body: String::new() }.retryable());
}

#[test]
fn not_retryable_client_errors() {
    assert!(!LlmError::ApiResponse { status: 400, body: "bad".into() }.retryable());
    assert!(!LlmError::ApiParse("json".into()).retryable());
    assert!(!LlmError::MissingApiKey { var: "KEY".into() }.retryable());
}

#[test]
fn error_display_names_env_var() {
    let err = LlmError::MissingApiKey { var: "ANTHROPIC_API_KEY".into() };
    assert_eq!(err.to_string(), "missing API key: env var ANTHROPIC_API_KEY not set");
}

// =============================================================================
// ContentBlock serde
// =============================================================================

#[test]
fn content_block_text_deserializes() {
    let block: ContentBlock = serde_json::from_str(r#"{"type":"text","text":"hi"}"#).unwrap();
    assert_eq!(block, ContentBlock::Text { text: "hi".into() });
}

#[test]
fn content_block_unknown_type_is_tolerated() {
    let block: ContentBlock = serde_json::from_str(r#"{"type":"tool_use","id":"t1"}"#).unwrap();
    assert_eq!(block, ContentBlock::Unknown);
}

// =============================================================================
// Message / ChatResponse
// =============================================================================

#[test]
fn message_serializes_lowercase_role() {
    let json = serde_json::to_value(Message::assistant("hello")).unwrap();
    assert_eq!(json, serde_json::json!({ "role": "assistant", "content": "hello" }));
}

#[test]
fn response_text_skips_thinking_and_trims() {
    let resp = ChatResponse {
        content: vec![
            ContentBlock::Thinking { thinking: "plan".into() },
            ContentBlock::Text { text: "  Hello".into() },
            ContentBlock::Text { text: "there  ".into() },
        ],
        model: "m".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 1,
        output_tokens: 1,
    };
    assert_eq!(resp.text(), "Hello\nthere");
}

#[test]
fn response_text_empty_when_no_text_blocks() {
    let resp = ChatResponse {
        content: vec![ContentBlock::Unknown],
        model: "m".into(),
        stop_reason: "end_turn".into(),
        input_tokens: 0,
        output_tokens: 0,
    };
    assert!(resp.text().is_empty());
}
