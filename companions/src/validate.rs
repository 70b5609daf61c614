//! Companion form rules.
//!
//! Every field is a string with a minimum length counted in Unicode scalar
//! values. Input is checked as typed (no trimming), so a single space is a
//! non-empty description. The same rules run in the browser before submit and
//! in the HTTP handlers before any write.

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};

/// A companion form field, named as on the wire.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Src,
    Name,
    Description,
    CategoryId,
    Instructions,
    Seed,
}

impl Field {
    /// All fields in form order.
    pub const ALL: [Self; 6] = [
        Self::Src,
        Self::Name,
        Self::Description,
        Self::CategoryId,
        Self::Instructions,
        Self::Seed,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Src => "src",
            Self::Name => "name",
            Self::Description => "description",
            Self::CategoryId => "categoryId",
            Self::Instructions => "instructions",
            Self::Seed => "seed",
        }
    }

    /// Minimum accepted length in characters.
    #[must_use]
    pub fn min_chars(self) -> usize {
        match self {
            Self::Name => 3,
            Self::Instructions | Self::Seed => 200,
            Self::Src | Self::Description | Self::CategoryId => 1,
        }
    }

    /// Message shown under the field when the rule fails.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Src => "Image is required",
            Self::Name => "Name is required",
            Self::Description => "Description is required",
            Self::CategoryId => "Category is required",
            Self::Instructions => "Instructions require at least 200 characters",
            Self::Seed => "Seed require at least 200 characters",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Values submitted by the companion form.
///
/// Missing keys deserialize as empty strings so that an incomplete body is
/// reported field by field instead of failing as malformed JSON.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanionInput {
    pub src: String,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub seed: String,
    pub category_id: String,
}

impl CompanionInput {
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Src => &self.src,
            Field::Name => &self.name,
            Field::Description => &self.description,
            Field::CategoryId => &self.category_id,
            Field::Instructions => &self.instructions,
            Field::Seed => &self.seed,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Src => &mut self.src,
            Field::Name => &mut self.name,
            Field::Description => &mut self.description,
            Field::CategoryId => &mut self.category_id,
            Field::Instructions => &mut self.instructions,
            Field::Seed => &mut self.seed,
        };
        *slot = value;
    }
}

/// A failed rule on one field.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    #[must_use]
    pub fn new(field: Field) -> Self {
        Self { field, message: field.message().to_owned() }
    }
}

/// Check a single field.
#[must_use]
pub fn validate_field(input: &CompanionInput, field: Field) -> Option<FieldError> {
    (input.get(field).chars().count() < field.min_chars()).then(|| FieldError::new(field))
}

/// Check every field, returning all failures in form order.
///
/// # Errors
///
/// Returns the list of failed fields when any rule fails.
pub fn validate_companion(input: &CompanionInput) -> Result<(), Vec<FieldError>> {
    let errors: Vec<FieldError> = Field::ALL
        .iter()
        .filter_map(|&field| validate_field(input, field))
        .collect();
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
