use super::*;

fn valid_input() -> CompanionInput {
    CompanionInput {
        src: "https://img.example/ada.png".into(),
        name: "Ada Lovelace".into(),
        description: "First programmer".into(),
        instructions: "i".repeat(200),
        seed: "s".repeat(200),
        category_id: "cat-1".into(),
    }
}

fn companion() -> Companion {
    let input = valid_input();
    Companion {
        id: "c-1".into(),
        user_id: "u-1".into(),
        username: "ada".into(),
        src: input.src,
        name: input.name,
        description: input.description,
        instructions: input.instructions,
        seed: input.seed,
        category_id: input.category_id,
        created_at: 0,
        updated_at: 0,
        message_count: 0,
    }
}

fn fill(form: &mut CompanionFormState, input: CompanionInput) {
    for field in Field::ALL {
        form.set_field(field, input.get(field).to_owned());
    }
}

// =============================================================
// submit routing
// =============================================================

#[test]
fn new_form_submits_create() {
    let mut form = CompanionFormState::new(None);
    fill(&mut form, valid_input());
    assert_eq!(form.begin_submit(), Some(SubmitRequest::Create(valid_input())));
    assert!(form.loading);
}

#[test]
fn edit_form_submits_update_by_id() {
    let mut form = CompanionFormState::new(Some(&companion()));
    match form.begin_submit() {
        Some(SubmitRequest::Update { id, input }) => {
            assert_eq!(id, "c-1");
            assert_eq!(input, valid_input());
        }
        other => panic!("expected update, got {other:?}"),
    }
}

#[test]
fn labels_follow_mode() {
    assert_eq!(CompanionFormState::new(None).submit_label(), "Create your companion");
    assert_eq!(CompanionFormState::new(Some(&companion())).submit_label(), "Update your companion");
}

// =============================================================
// validation
// =============================================================

#[test]
fn invalid_form_blocks_submit_and_reports_fields() {
    let mut form = CompanionFormState::new(None);
    let mut input = valid_input();
    input.name = "Al".into();
    input.seed = "s".repeat(199);
    fill(&mut form, input);

    assert_eq!(form.begin_submit(), None);
    assert!(!form.loading);
    assert_eq!(form.error_for(Field::Name), Some("Name is required"));
    assert_eq!(form.error_for(Field::Seed), Some("Seed require at least 200 characters"));
    assert_eq!(form.error_for(Field::Src), None);
}

#[test]
fn errors_hidden_until_first_attempt() {
    let mut form = CompanionFormState::new(None);
    form.set_field(Field::Name, "x".into());
    assert!(form.errors.is_empty());
}

#[test]
fn editing_after_attempt_revalidates_field() {
    let mut form = CompanionFormState::new(None);
    assert_eq!(form.begin_submit(), None);
    assert_eq!(form.error_for(Field::Name), Some("Name is required"));

    form.set_field(Field::Name, "Ada".into());
    assert_eq!(form.error_for(Field::Name), None);
    assert_eq!(form.error_for(Field::Description), Some("Description is required"));

    form.set_field(Field::Name, "Ad".into());
    assert_eq!(form.error_for(Field::Name), Some("Name is required"));
    assert_eq!(form.errors[0].field, Field::Src);
}

// =============================================================
// in-flight handling
// =============================================================

#[test]
fn pending_request_blocks_second_submit() {
    let mut form = CompanionFormState::new(None);
    fill(&mut form, valid_input());
    assert!(form.begin_submit().is_some());
    assert_eq!(form.begin_submit(), None);
}

#[test]
fn failure_keeps_values_and_reenables() {
    let mut form = CompanionFormState::new(None);
    fill(&mut form, valid_input());
    form.begin_submit();
    form.fail();
    assert!(!form.loading);
    assert_eq!(form.values, valid_input());
    assert!(form.begin_submit().is_some());
}

#[test]
fn server_rejection_shows_field_errors() {
    let mut form = CompanionFormState::new(None);
    fill(&mut form, valid_input());
    form.begin_submit();
    form.reject(vec![FieldError::new(Field::CategoryId)]);
    assert!(!form.loading);
    assert_eq!(form.error_for(Field::CategoryId), Some("Category is required"));
}
