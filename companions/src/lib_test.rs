use super::*;

fn companion(user_id: &str) -> Companion {
    Companion {
        id: "c-1".to_owned(),
        user_id: user_id.to_owned(),
        username: "ada".to_owned(),
        src: "https://images.example.com/ada.png".to_owned(),
        name: "Ada".to_owned(),
        description: "Mathematician".to_owned(),
        instructions: "i".repeat(200),
        seed: "s".repeat(200),
        category_id: "cat-1".to_owned(),
        created_at: 1_700_000_000_000,
        updated_at: 1_700_000_000_000,
        message_count: 3,
    }
}

#[test]
fn greeting_introduces_companion() {
    let mut c = companion("u-1");
    c.name = "Elon Musk".into();
    c.description = "CEO & Founder of Tesla, SpaceX".into();
    assert_eq!(c.greeting(), "Hello, I am Elon Musk, CEO & Founder of Tesla, SpaceX");
}

#[test]
fn owner_matches_only_same_user() {
    let c = companion("u-1");
    assert!(c.is_owned_by(Some("u-1")));
    assert!(!c.is_owned_by(Some("u-2")));
    assert!(!c.is_owned_by(None));
}

#[test]
fn empty_user_id_never_owns() {
    let c = companion("");
    assert!(!c.is_owned_by(Some("")));
}

#[test]
fn input_copies_form_fields() {
    let c = companion("u-1");
    let input = c.input();
    assert_eq!(input.name, "Ada");
    assert_eq!(input.category_id, "cat-1");
    assert_eq!(validate_companion(&input), Ok(()));
}

#[test]
fn companion_wire_keys_are_camel_case() {
    let json = serde_json::to_value(companion("u-1")).unwrap();
    assert_eq!(json["userId"], "u-1");
    assert_eq!(json["categoryId"], "cat-1");
    assert_eq!(json["messageCount"], 3);
    assert!(json.get("user_id").is_none());
}

#[test]
fn companion_message_count_defaults_to_zero() {
    let mut json = serde_json::to_value(companion("u-1")).unwrap();
    json.as_object_mut().unwrap().remove("messageCount");
    let c: Companion = serde_json::from_value(json).unwrap();
    assert_eq!(c.message_count, 0);
}

#[test]
fn role_parses_known_values() {
    assert_eq!(Role::parse("user"), Some(Role::User));
    assert_eq!(Role::parse("system"), Some(Role::System));
    assert_eq!(Role::parse("assistant"), None);
    assert_eq!(serde_json::to_value(Role::System).unwrap(), "system");
}

#[test]
fn companion_query_skips_absent_filters() {
    let q = CompanionQuery { category_id: Some("cat-1".to_owned()), name: None };
    assert_eq!(serde_json::to_value(&q).unwrap(), serde_json::json!({ "categoryId": "cat-1" }));
}

#[test]
fn user_is_pro_defaults_false() {
    let user: User = serde_json::from_str(r#"{"id":"u","name":"n","avatarUrl":null}"#).unwrap();
    assert!(!user.is_pro);
}
