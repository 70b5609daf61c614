//! Shared companion domain model for `server`, `client` and `cli`.
//!
//! This crate owns the JSON wire representation of companions, categories,
//! chat messages and the signed-in user, plus the form rules that both the
//! browser form and the HTTP handlers enforce. Keys are camelCase on the wire,
//! ids are UUID strings and timestamps are milliseconds since the Unix epoch.

pub mod validate;

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

pub use validate::{CompanionInput, Field, FieldError, validate_companion, validate_field};

/// Query parameter holding the selected category on the home view.
pub const CATEGORY_PARAM: &str = "categoryId";
/// Query parameter holding the name search on the home view.
pub const NAME_PARAM: &str = "name";

/// Generic failure notice shown for any failed backend call.
pub const GENERIC_ERROR: &str = "Something went wrong";
/// Confirmation notice shown after a successful mutation.
pub const SUCCESS: &str = "Success";

// =============================================================================
// CATALOG
// =============================================================================

/// Read-only tag used to group and filter companions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// A user-authored AI persona.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Companion {
    pub id: String,
    /// Owning user id (UUID string).
    pub user_id: String,
    /// Creator handle shown as `@username`.
    pub username: String,
    /// Image URL.
    pub src: String,
    pub name: String,
    pub description: String,
    /// Persona prompt.
    pub instructions: String,
    /// Example dialogue used to prime the conversational style.
    pub seed: String,
    pub category_id: String,
    pub created_at: i64,
    pub updated_at: i64,
    /// Denormalized count of chat messages.
    #[serde(default)]
    pub message_count: i64,
}

impl Companion {
    /// Form values pre-filled from this record.
    #[must_use]
    pub fn input(&self) -> CompanionInput {
        CompanionInput {
            src: self.src.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            instructions: self.instructions.clone(),
            seed: self.seed.clone(),
            category_id: self.category_id.clone(),
        }
    }

    /// Opening line of every conversation. Rendered, never stored.
    #[must_use]
    pub fn greeting(&self) -> String {
        format!("Hello, I am {}, {}", self.name, self.description)
    }

    /// Whether `user_id` (the signed-in user, if any) owns this companion.
    #[must_use]
    pub fn is_owned_by(&self, user_id: Option<&str>) -> bool {
        user_id.is_some_and(|id| !id.is_empty() && id == self.user_id)
    }
}

/// Filter for `GET /api/companion`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanionQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

// =============================================================================
// CHAT
// =============================================================================

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The signed-in user.
    User,
    /// The companion's generated reply.
    System,
}

impl Role {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::System => "system",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "user" => Some(Self::User),
            "system" => Some(Self::System),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: i64,
}

/// Companion plus the caller's conversation with it, oldest message first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionChat {
    pub companion: Companion,
    pub messages: Vec<ChatMessage>,
}

/// Body of `POST /api/chat/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub prompt: String,
}

// =============================================================================
// ACCOUNT
// =============================================================================

/// The signed-in user as returned by `GET /api/auth/me`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub is_pro: bool,
}

/// Body of `GET /api/stripe`: where to send the browser next.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectUrl {
    pub url: String,
}

/// Body of a `400` response for a rejected companion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}
