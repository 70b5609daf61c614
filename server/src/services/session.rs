//! Session token management.
//!
//! ARCHITECTURE
//! ============
//! HTTP auth uses long-lived opaque session tokens stored in an `HttpOnly`
//! cookie. Validation joins the owning user and their subscription row so
//! every authenticated request knows whether the caller is pro.

use rand::Rng;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use super::subscription;

/// Generate a cryptographically random 32-byte hex token.
#[must_use]
pub fn generate_token() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    hex::encode(bytes)
}

/// User row returned from session validation.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Unique user identifier.
    pub id: Uuid,
    /// Display name (GitHub login).
    pub name: String,
    /// Avatar image URL, if available.
    pub avatar_url: Option<String>,
    /// Whether the user holds an active subscription.
    pub is_pro: bool,
}

impl SessionUser {
    /// Wire shape shared with the client.
    #[must_use]
    pub fn to_wire(&self) -> companions::User {
        companions::User {
            id: self.id.to_string(),
            name: self.name.clone(),
            avatar_url: self.avatar_url.clone(),
            is_pro: self.is_pro,
        }
    }
}

/// Create a session for the given user, returning the token.
pub async fn create_session(pool: &PgPool, user_id: Uuid) -> Result<String, sqlx::Error> {
    let token = generate_token();
    sqlx::query("INSERT INTO sessions (token, user_id) VALUES ($1, $2)")
        .bind(&token)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(token)
}

/// Validate a session token and return the associated user.
pub async fn validate_session(pool: &PgPool, token: &str) -> Result<Option<SessionUser>, sqlx::Error> {
    let row = sqlx::query(
        r"SELECT
              u.id,
              u.name,
              u.avatar_url,
              us.stripe_price_id,
              (EXTRACT(EPOCH FROM us.stripe_current_period_end) * 1000)::BIGINT AS period_end_ms
          FROM sessions s
          JOIN users u ON u.id = s.user_id
          LEFT JOIN user_subscriptions us ON us.user_id = u.id
          WHERE s.token = $1 AND s.expires_at > now()",
    )
    .bind(token)
    .fetch_optional(pool)
    .await?;

    let now = subscription::now_ms();
    Ok(row.map(|r| {
        let price_id: Option<String> = r.get("stripe_price_id");
        let period_end_ms: Option<i64> = r.get("period_end_ms");
        SessionUser {
            id: r.get("id"),
            name: r.get("name"),
            avatar_url: r.get("avatar_url"),
            is_pro: subscription::is_active(price_id.as_deref(), period_end_ms, now),
        }
    }))
}

/// Delete a session by token.
pub async fn delete_session(pool: &PgPool, token: &str) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
        .bind(token)
        .execute(pool)
        .await?;
    Ok(())
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
