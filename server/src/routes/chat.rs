//! Chat routes: load a conversation and send a prompt.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use companions::{ChatMessage, ChatRequest, CompanionChat};
use uuid::Uuid;

use crate::routes::auth::AuthUser;
use crate::services::chat::{self, ChatError};
use crate::state::AppState;

pub(crate) fn chat_error_to_status(err: &ChatError) -> StatusCode {
    match err {
        ChatError::LlmNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
        ChatError::NotFound(_) => StatusCode::NOT_FOUND,
        ChatError::EmptyPrompt | ChatError::PromptTooLong => StatusCode::BAD_REQUEST,
        ChatError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
        ChatError::Llm(_) | ChatError::EmptyReply => StatusCode::BAD_GATEWAY,
        ChatError::Companion(_) | ChatError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn log_chat_error(err: &ChatError, companion_id: Uuid) -> StatusCode {
    let status = chat_error_to_status(err);
    if status.is_server_error() {
        tracing::error!(error = %err, %companion_id, "chat failed");
    }
    status
}

/// `GET /api/chat/:id` — companion plus the caller's messages.
pub async fn get_chat(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(companion_id): Path<Uuid>,
) -> Result<Json<CompanionChat>, StatusCode> {
    let chat = chat::load_chat(&state.pool, companion_id, auth.user.id)
        .await
        .map_err(|e| log_chat_error(&e, companion_id))?;
    Ok(Json(chat))
}

/// `POST /api/chat/:id` — send a prompt, returns the companion's reply.
pub async fn send_prompt(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(companion_id): Path<Uuid>,
    Json(body): Json<ChatRequest>,
) -> Result<Json<ChatMessage>, StatusCode> {
    let Some(llm) = state.llm.clone() else {
        return Err(chat_error_to_status(&ChatError::LlmNotConfigured));
    };

    let reply = chat::send_prompt(&state, &llm, companion_id, auth.user.id, &body.prompt)
        .await
        .map_err(|e| log_chat_error(&e, companion_id))?;
    Ok(Json(reply))
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
