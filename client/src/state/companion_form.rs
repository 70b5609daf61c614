//! Companion create/edit form state.
//!
//! DESIGN
//! ======
//! Values, field errors and the in-flight flag live together so a submit can
//! be decided in one place: invalid input yields no request, a pending
//! request blocks a second one, and a failed request keeps the values.
//! Field messages appear only after the first submit attempt; from then on
//! each edit re-checks the edited field.

#[cfg(test)]
#[path = "companion_form_test.rs"]
mod companion_form_test;

use companions::{Companion, CompanionInput, Field, FieldError, validate_companion, validate_field};

/// Backend call chosen by a successful submit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitRequest {
    /// `POST /api/companion`
    Create(CompanionInput),
    /// `PATCH /api/companion/{id}`
    Update { id: String, input: CompanionInput },
}

#[derive(Clone, Debug, Default)]
pub struct CompanionFormState {
    /// Id of the record being edited; `None` creates a new companion.
    pub editing_id: Option<String>,
    pub values: CompanionInput,
    pub errors: Vec<FieldError>,
    /// Set by the first submit attempt.
    pub attempted: bool,
    /// A request is in flight; every control is disabled.
    pub loading: bool,
}

impl CompanionFormState {
    /// Form pre-filled from `initial`, or blank for a new companion.
    pub fn new(initial: Option<&Companion>) -> Self {
        match initial {
            Some(companion) => Self {
                editing_id: Some(companion.id.clone()),
                values: companion.input(),
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id.is_some()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() { "Update your companion" } else { "Create your companion" }
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    /// Store a typed value; after a submit attempt, re-check that field.
    pub fn set_field(&mut self, field: Field, value: String) {
        self.values.set(field, value);
        if !self.attempted {
            return;
        }
        self.errors.retain(|e| e.field != field);
        if let Some(err) = validate_field(&self.values, field) {
            self.errors.push(err);
            self.errors.sort_by_key(|e| Field::ALL.iter().position(|f| *f == e.field));
        }
    }

    /// Validate and, when valid and idle, mark the form loading and return
    /// the request to send.
    pub fn begin_submit(&mut self) -> Option<SubmitRequest> {
        if self.loading {
            return None;
        }
        self.attempted = true;
        if let Err(errors) = validate_companion(&self.values) {
            self.errors = errors;
            return None;
        }
        self.errors.clear();
        self.loading = true;

        let input = self.values.clone();
        Some(match &self.editing_id {
            Some(id) => SubmitRequest::Update { id: id.clone(), input },
            None => SubmitRequest::Create(input),
        })
    }

    /// Re-enable the form after a failed request. Values are kept.
    pub fn fail(&mut self) {
        self.loading = false;
    }

    /// Show server-side field errors from a `400` response.
    pub fn reject(&mut self, errors: Vec<FieldError>) {
        self.loading = false;
        self.errors = errors;
    }
}
