use super::*;

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_is_lowercase_hex() {
    let token = generate_token();
    assert!(hex::decode(&token).is_ok());
    assert_eq!(token, token.to_ascii_lowercase());
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// SessionUser
// =============================================================================

fn user(is_pro: bool) -> SessionUser {
    SessionUser {
        id: Uuid::nil(),
        name: "alice".into(),
        avatar_url: Some("https://example.com/avatar.png".into()),
        is_pro,
    }
}

#[test]
fn session_user_serializes_camel_case() {
    let json = serde_json::to_value(user(true)).unwrap();
    assert_eq!(json["name"], "alice");
    assert_eq!(json["avatarUrl"], "https://example.com/avatar.png");
    assert_eq!(json["isPro"], true);
    assert!(json.get("avatar_url").is_none());
}

#[test]
fn session_user_wire_matches_shared_user() {
    let wire = user(false).to_wire();
    assert_eq!(wire.id, Uuid::nil().to_string());
    assert_eq!(wire.name, "alice");
    assert!(!wire.is_pro);
}

#[test]
fn session_user_serialize_none_avatar() {
    let mut u = user(false);
    u.avatar_url = None;
    let json = serde_json::to_value(u).unwrap();
    assert!(json["avatarUrl"].is_null());
}
