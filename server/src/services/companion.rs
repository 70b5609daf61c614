//! Companion service: validated CRUD and filtered listing.
//!
//! DESIGN
//! ======
//! Every write re-runs the shared form validation from the `companions`
//! crate, so a request that bypasses the browser form still hits the same
//! rules and messages. Writes are scoped to the owner: an update or delete
//! that matches no `(id, user_id)` row reports `NotFound`, which keeps other
//! users' companions indistinguishable from missing ones.

use companions::{CompanionInput, CompanionQuery, Field, FieldError, validate_companion};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, QueryBuilder, Row};
use uuid::Uuid;

use crate::db::is_foreign_key_violation;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum CompanionError {
    #[error("companion not found: {0}")]
    NotFound(Uuid),
    #[error("invalid companion: {} field error(s)", .0.len())]
    Invalid(Vec<FieldError>),
    #[error("pro subscription required")]
    ProRequired,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Row returned from companion queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub src: String,
    pub name: String,
    pub description: String,
    pub instructions: String,
    pub seed: String,
    pub category_id: Uuid,
    pub created_at: i64,
    pub updated_at: i64,
    pub message_count: i64,
}

impl CompanionRow {
    #[must_use]
    pub fn to_wire(&self) -> companions::Companion {
        companions::Companion {
            id: self.id.to_string(),
            user_id: self.user_id.to_string(),
            username: self.username.clone(),
            src: self.src.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            instructions: self.instructions.clone(),
            seed: self.seed.clone(),
            category_id: self.category_id.to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
            message_count: self.message_count,
        }
    }
}

/// Parsed list filter. Blank query values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanionFilter {
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
}

impl CompanionFilter {
    /// Parse the raw query. Returns `None` when the category id is present
    /// but malformed, since no stored companion can match it.
    #[must_use]
    pub fn from_query(query: &CompanionQuery) -> Option<Self> {
        let category_id = match non_blank(query.category_id.as_deref()) {
            Some(raw) => Some(Uuid::parse_str(raw).ok()?),
            None => None,
        };
        let name = non_blank(query.name.as_deref()).map(str::to_owned);
        Some(Self { category_id, name })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Escape `LIKE` metacharacters so user search text matches literally.
pub(crate) fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Validate the form and parse its category id.
pub(crate) fn parse_input(input: &CompanionInput) -> Result<Uuid, CompanionError> {
    validate_companion(input).map_err(CompanionError::Invalid)?;
    Uuid::parse_str(input.category_id.trim()).map_err(|_| invalid_category())
}

fn invalid_category() -> CompanionError {
    CompanionError::Invalid(vec![FieldError::new(Field::CategoryId)])
}

fn map_write_error(err: sqlx::Error) -> CompanionError {
    if is_foreign_key_violation(&err) {
        invalid_category()
    } else {
        CompanionError::Database(err)
    }
}

// =============================================================================
// QUERIES
// =============================================================================

const SELECT_COMPANION: &str = r"SELECT
        c.id, c.user_id, c.username, c.src, c.name, c.description,
        c.instructions, c.seed, c.category_id,
        (EXTRACT(EPOCH FROM c.created_at) * 1000)::BIGINT AS created_at_ms,
        (EXTRACT(EPOCH FROM c.updated_at) * 1000)::BIGINT AS updated_at_ms,
        (SELECT COUNT(*) FROM messages m WHERE m.companion_id = c.id) AS message_count
    FROM companions c";

fn row_to_companion(r: &PgRow) -> CompanionRow {
    CompanionRow {
        id: r.get("id"),
        user_id: r.get("user_id"),
        username: r.get("username"),
        src: r.get("src"),
        name: r.get("name"),
        description: r.get("description"),
        instructions: r.get("instructions"),
        seed: r.get("seed"),
        category_id: r.get("category_id"),
        created_at: r.get("created_at_ms"),
        updated_at: r.get("updated_at_ms"),
        message_count: r.get("message_count"),
    }
}

/// Load one companion by id.
///
/// # Errors
///
/// Returns `NotFound` when no row matches.
pub async fn get_companion(pool: &PgPool, id: Uuid) -> Result<CompanionRow, CompanionError> {
    let row = sqlx::query(&format!("{SELECT_COMPANION} WHERE c.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or(CompanionError::NotFound(id))?;
    Ok(row_to_companion(&row))
}

/// List companions newest first, optionally filtered by category and name.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_companions(pool: &PgPool, filter: &CompanionFilter) -> Result<Vec<CompanionRow>, CompanionError> {
    let mut builder = QueryBuilder::new(SELECT_COMPANION);
    builder.push(" WHERE TRUE");
    if let Some(category_id) = filter.category_id {
        builder.push(" AND c.category_id = ").push_bind(category_id);
    }
    if let Some(name) = &filter.name {
        builder
            .push(" AND c.name ILIKE ")
            .push_bind(format!("%{}%", escape_like(name)));
    }
    builder.push(" ORDER BY c.created_at DESC");

    let rows = builder.build().fetch_all(pool).await?;
    Ok(rows.iter().map(row_to_companion).collect())
}

/// Create a companion owned by `user_id`.
///
/// # Errors
///
/// Returns `Invalid` for failed validation or an unknown category.
pub async fn create_companion(
    pool: &PgPool,
    user_id: Uuid,
    username: &str,
    input: &CompanionInput,
) -> Result<CompanionRow, CompanionError> {
    let category_id = parse_input(input)?;
    let id = Uuid::new_v4();
    sqlx::query(
        r"INSERT INTO companions (id, user_id, username, src, name, description, instructions, seed, category_id)
          VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
    )
    .bind(id)
    .bind(user_id)
    .bind(username)
    .bind(&input.src)
    .bind(&input.name)
    .bind(&input.description)
    .bind(&input.instructions)
    .bind(&input.seed)
    .bind(category_id)
    .execute(pool)
    .await
    .map_err(map_write_error)?;

    get_companion(pool, id).await
}

/// Overwrite every form field of a companion owned by `user_id`.
///
/// # Errors
///
/// Returns `NotFound` when the companion is missing or owned by someone else.
pub async fn update_companion(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
    input: &CompanionInput,
) -> Result<CompanionRow, CompanionError> {
    let category_id = parse_input(input)?;
    let result = sqlx::query(
        r"UPDATE companions
          SET src = $3, name = $4, description = $5, instructions = $6, seed = $7,
              category_id = $8, updated_at = now()
          WHERE id = $1 AND user_id = $2",
    )
    .bind(id)
    .bind(user_id)
    .bind(&input.src)
    .bind(&input.name)
    .bind(&input.description)
    .bind(&input.instructions)
    .bind(&input.seed)
    .bind(category_id)
    .execute(pool)
    .await
    .map_err(map_write_error)?;

    if result.rows_affected() == 0 {
        return Err(CompanionError::NotFound(id));
    }
    get_companion(pool, id).await
}

/// Delete a companion owned by `user_id`. Its messages cascade.
///
/// # Errors
///
/// Returns `NotFound` when the companion is missing or owned by someone else.
pub async fn delete_companion(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<(), CompanionError> {
    let result = sqlx::query("DELETE FROM companions WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(CompanionError::NotFound(id));
    }
    Ok(())
}

#[cfg(test)]
#[path = "companion_test.rs"]
mod tests;
