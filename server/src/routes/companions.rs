//! Companion CRUD routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use companions::{Companion, CompanionInput, CompanionQuery, ValidationErrors};
use uuid::Uuid;

use crate::routes::auth::AuthUser;
use crate::services::companion::{self, CompanionError, CompanionFilter};
use crate::state::AppState;

pub(crate) fn companion_error_to_status(err: &CompanionError) -> StatusCode {
    match err {
        CompanionError::NotFound(_) => StatusCode::NOT_FOUND,
        CompanionError::Invalid(_) => StatusCode::BAD_REQUEST,
        CompanionError::ProRequired => StatusCode::FORBIDDEN,
        CompanionError::Database(e) => {
            tracing::error!(error = %e, "companion query failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Field errors travel in the body so the form can show them inline.
fn companion_error_response(err: CompanionError) -> Response {
    let status = companion_error_to_status(&err);
    match err {
        CompanionError::Invalid(errors) => (status, Json(ValidationErrors { errors })).into_response(),
        _ => status.into_response(),
    }
}

/// `GET /api/companion?categoryId=&name=` — list companions, newest first.
pub async fn list_companions(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<CompanionQuery>,
) -> Result<Json<Vec<Companion>>, StatusCode> {
    let Some(filter) = CompanionFilter::from_query(&query) else {
        return Ok(Json(Vec::new()));
    };

    let rows = companion::list_companions(&state.pool, &filter)
        .await
        .map_err(|e| companion_error_to_status(&e))?;
    Ok(Json(rows.iter().map(companion::CompanionRow::to_wire).collect()))
}

/// `GET /api/companion/:id` — fetch a single companion.
pub async fn get_companion(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Companion>, StatusCode> {
    let row = companion::get_companion(&state.pool, id)
        .await
        .map_err(|e| companion_error_to_status(&e))?;
    Ok(Json(row.to_wire()))
}

/// `POST /api/companion` — create a companion. Requires an active subscription.
pub async fn create_companion(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CompanionInput>,
) -> Response {
    if !auth.user.is_pro {
        return companion_error_response(CompanionError::ProRequired);
    }

    match companion::create_companion(&state.pool, auth.user.id, &auth.user.name, &input).await {
        Ok(row) => {
            tracing::info!(companion_id = %row.id, user_id = %auth.user.id, "companion created");
            (StatusCode::CREATED, Json(row.to_wire())).into_response()
        }
        Err(e) => companion_error_response(e),
    }
}

/// `PATCH /api/companion/:id` — replace the form fields of an owned companion.
pub async fn update_companion(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(input): Json<CompanionInput>,
) -> Response {
    match companion::update_companion(&state.pool, id, auth.user.id, &input).await {
        Ok(row) => Json(row.to_wire()).into_response(),
        Err(e) => companion_error_response(e),
    }
}

/// `DELETE /api/companion/:id` — delete an owned companion.
pub async fn delete_companion(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    companion::delete_companion(&state.pool, id, auth.user.id)
        .await
        .map_err(|e| companion_error_to_status(&e))?;
    tracing::info!(companion_id = %id, user_id = %auth.user.id, "companion deleted");
    Ok(StatusCode::OK)
}

#[cfg(test)]
#[path = "companions_test.rs"]
mod tests;
