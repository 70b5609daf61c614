//! Category catalog route.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use companions::Category;

use crate::routes::auth::AuthUser;
use crate::services::category;
use crate::state::AppState;

/// `GET /api/category` — list all categories alphabetically.
pub async fn list_categories(State(state): State<AppState>, _auth: AuthUser) -> Result<Json<Vec<Category>>, StatusCode> {
    let categories = category::list_categories(&state.pool).await.map_err(|e| {
        tracing::error!(error = %e, "category list failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(categories))
}
