use super::*;

fn complete_fields() -> CompanionFields {
    CompanionFields {
        name: Some("Ada Lovelace".into()),
        description: Some("Mathematician".into()),
        src: Some("https://img.example/ada.png".into()),
        category_id: Some(Uuid::new_v4().to_string()),
        instructions: Some("i".repeat(200)),
        seed: Some("s".repeat(200)),
    }
}

// =============================================================================
// api_url
// =============================================================================

#[test]
fn api_url_joins_without_double_slash() {
    assert_eq!(api_url("http://localhost:3000/", "/healthz"), "http://localhost:3000/healthz");
    assert_eq!(api_url("http://localhost:3000", "/api/category"), "http://localhost:3000/api/category");
}

// =============================================================================
// companion_list_params
// =============================================================================

#[test]
fn list_params_empty_query_has_no_pairs() {
    assert!(companion_list_params(&CompanionQuery::default()).is_empty());
}

#[test]
fn list_params_use_wire_names() {
    let query = CompanionQuery { category_id: Some("c1".into()), name: Some("ada".into()) };
    assert_eq!(
        companion_list_params(&query),
        vec![("categoryId", "c1".to_owned()), ("name", "ada".to_owned())]
    );
}

// =============================================================================
// CompanionFields::apply / checked_input
// =============================================================================

#[test]
fn apply_overwrites_only_given_fields() {
    let base = complete_fields().apply(CompanionInput::default());
    let fields = CompanionFields { name: Some("Grace Hopper".into()), ..CompanionFields::default() };
    let merged = fields.apply(base.clone());
    assert_eq!(merged.name, "Grace Hopper");
    assert_eq!(merged.description, base.description);
    assert_eq!(merged.seed, base.seed);
}

#[test]
fn checked_input_accepts_complete_companion() {
    let input = complete_fields().apply(CompanionInput::default());
    assert!(checked_input(input).is_ok());
}

#[test]
fn checked_input_lists_every_failed_field() {
    let fields = CompanionFields { name: Some("Al".into()), ..complete_fields() };
    let input = CompanionFields { seed: Some("short".into()), ..fields }.apply(CompanionInput::default());
    let err = checked_input(input).unwrap_err();
    let CliError::Invalid(message) = err else {
        panic!("expected Invalid, got {err:?}");
    };
    assert!(message.contains("Name is required"));
    assert!(message.contains("Seed require at least 200 characters"));
}

// =============================================================================
// clap
// =============================================================================

#[test]
fn cli_definition_is_valid() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}

#[test]
fn parses_companion_update_flags() {
    let id = Uuid::new_v4();
    let cli = Cli::try_parse_from([
        "companion-cli",
        "--session-token",
        "tok",
        "companion",
        "update",
        &id.to_string(),
        "--name",
        "Grace",
    ])
    .unwrap();
    assert_eq!(cli.session_token.as_deref(), Some("tok"));
    let Command::Companion(CompanionCommand { command: CompanionSubcommand::Update { companion_id, fields } }) =
        cli.command
    else {
        panic!("expected companion update");
    };
    assert_eq!(companion_id, id);
    assert_eq!(fields.name.as_deref(), Some("Grace"));
    assert_eq!(fields.seed, None);
}

#[tokio::test]
async fn api_request_without_token_fails_before_network() {
    let ctx = CliContext { base_url: "http://127.0.0.1:9".into(), session_token: None };
    let err = api_request(&ctx, reqwest::Method::GET, "/api/category", None::<&()>).await.unwrap_err();
    assert!(matches!(err, CliError::MissingSessionToken));
}
