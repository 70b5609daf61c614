//! Chat service: persona prompt, history, and LLM round-trip.
//!
//! DESIGN
//! ======
//! A conversation is scoped to `(companion, user)`. Each prompt is stored
//! as a `user` message before the LLM call and the reply as a `system`
//! message after it, so a failed call still leaves the prompt in history.
//! The model sees the persona (instructions plus seed conversation) as the
//! system prompt and the most recent turns as chat messages.

use std::fmt::Write;
use std::sync::{Arc, OnceLock};

use companions::{ChatMessage, CompanionChat, Role};
use sqlx::{PgConnection, PgPool, Row};
use tracing::info;
use uuid::Uuid;

use super::companion::{self, CompanionError, CompanionRow};
use crate::config::env_parse;
use crate::llm::{LlmChat, LlmError, Message};
use crate::rate_limit::RateLimitError;
use crate::state::AppState;

/// Number of stored turns sent back to the model.
pub const HISTORY_LIMIT: i64 = 30;
/// Longest prompt accepted from the chat box.
pub const MAX_PROMPT_CHARS: usize = 4000;
const DEFAULT_CHAT_MAX_TOKENS: u32 = 1024;

fn chat_max_tokens() -> u32 {
    static VALUE: OnceLock<u32> = OnceLock::new();
    *VALUE.get_or_init(|| env_parse("CHAT_MAX_TOKENS", DEFAULT_CHAT_MAX_TOKENS))
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("LLM not configured")]
    LlmNotConfigured,
    #[error("companion not found: {0}")]
    NotFound(Uuid),
    #[error("prompt is empty")]
    EmptyPrompt,
    #[error("prompt exceeds {} characters", MAX_PROMPT_CHARS)]
    PromptTooLong,
    #[error("rate limited: {0}")]
    RateLimited(#[from] RateLimitError),
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("LLM returned no text")]
    EmptyReply,
    #[error("companion lookup failed: {0}")]
    Companion(CompanionError),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl From<CompanionError> for ChatError {
    fn from(e: CompanionError) -> Self {
        match e {
            CompanionError::NotFound(id) => Self::NotFound(id),
            other => Self::Companion(other),
        }
    }
}

// =============================================================================
// PROMPT ASSEMBLY
// =============================================================================

pub(crate) fn build_system_prompt(companion: &CompanionRow) -> String {
    let name = &companion.name;
    let mut prompt = String::new();
    let _ = writeln!(
        prompt,
        "ONLY generate plain sentences without prefix of who is speaking. DO NOT use {name}: prefix."
    );
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "{}", companion.instructions.trim());
    let _ = writeln!(prompt);
    let _ = writeln!(
        prompt,
        "Below are relevant details about {name}'s past and the conversation you are in."
    );
    let _ = write!(prompt, "{}", companion.seed.trim());
    prompt
}

/// Map stored turns plus the new prompt to provider messages.
///
/// Providers expect the conversation to open with a user turn and to
/// alternate, so leading replies are dropped and consecutive same-role
/// turns are merged.
pub(crate) fn to_llm_messages(history: &[ChatMessage], prompt: &str) -> Vec<Message> {
    let mut out: Vec<Message> = Vec::with_capacity(history.len() + 1);
    let turns = history
        .iter()
        .map(|m| (m.role, m.content.as_str()))
        .chain(std::iter::once((Role::User, prompt)));

    for (role, content) in turns {
        let msg = match role {
            Role::User => Message::user(content),
            Role::System => Message::assistant(content),
        };
        match out.last_mut() {
            None if role == Role::System => {}
            Some(last) if last.role == msg.role => {
                last.content.push_str("\n\n");
                last.content.push_str(content);
            }
            _ => out.push(msg),
        }
    }
    out
}

/// Validate raw prompt text and return it trimmed.
pub(crate) fn clean_prompt(raw: &str) -> Result<&str, ChatError> {
    let prompt = raw.trim();
    if prompt.is_empty() {
        return Err(ChatError::EmptyPrompt);
    }
    if prompt.chars().count() > MAX_PROMPT_CHARS {
        return Err(ChatError::PromptTooLong);
    }
    Ok(prompt)
}

// =============================================================================
// PERSISTENCE
// =============================================================================

fn row_to_message(r: &sqlx::postgres::PgRow) -> ChatMessage {
    let id: Uuid = r.get("id");
    let role: String = r.get("role");
    ChatMessage {
        id: id.to_string(),
        role: Role::parse(&role).unwrap_or(Role::System),
        content: r.get("content"),
        created_at: r.get("created_at_ms"),
    }
}

/// Load up to `limit` most recent messages, oldest first.
async fn recent_messages(
    pool: &PgPool,
    companion_id: Uuid,
    user_id: Uuid,
    limit: Option<i64>,
) -> Result<Vec<ChatMessage>, sqlx::Error> {
    let rows = sqlx::query(
        r"SELECT id, role, content, created_at_ms FROM (
              SELECT id, role, content, created_at,
                     (EXTRACT(EPOCH FROM created_at) * 1000)::BIGINT AS created_at_ms
              FROM messages
              WHERE companion_id = $1 AND user_id = $2
              ORDER BY created_at DESC, id DESC
              LIMIT $3
          ) recent
          ORDER BY created_at ASC, id ASC",
    )
    .bind(companion_id)
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(row_to_message).collect())
}

async fn insert_message(
    conn: &mut PgConnection,
    companion_id: Uuid,
    user_id: Uuid,
    role: Role,
    content: &str,
) -> Result<ChatMessage, sqlx::Error> {
    let row = sqlx::query(
        r"INSERT INTO messages (companion_id, user_id, role, content, created_at)
          VALUES ($1, $2, $3, $4, clock_timestamp())
          RETURNING id, role, content, (EXTRACT(EPOCH FROM created_at) * 1000)::BIGINT AS created_at_ms",
    )
    .bind(companion_id)
    .bind(user_id)
    .bind(role.as_str())
    .bind(content)
    .fetch_one(conn)
    .await?;
    Ok(row_to_message(&row))
}

// =============================================================================
// ENTRY POINTS
// =============================================================================

/// Load a companion with the caller's full conversation.
///
/// # Errors
///
/// Returns `NotFound` for an unknown companion.
pub async fn load_chat(pool: &PgPool, companion_id: Uuid, user_id: Uuid) -> Result<CompanionChat, ChatError> {
    let companion = companion::get_companion(pool, companion_id).await?;
    let messages = recent_messages(pool, companion_id, user_id, None).await?;
    Ok(CompanionChat { companion: companion.to_wire(), messages })
}

/// Ask the model in character, then store `prompt` and the reply together.
/// A failed or empty reply stores nothing, so the caller can resend.
///
/// # Errors
///
/// Returns `RateLimited` before any work when the caller is over quota.
pub async fn send_prompt(
    state: &AppState,
    llm: &Arc<dyn LlmChat>,
    companion_id: Uuid,
    user_id: Uuid,
    raw_prompt: &str,
) -> Result<ChatMessage, ChatError> {
    let prompt = clean_prompt(raw_prompt)?;
    state.rate_limiter.check_and_record(user_id)?;

    let companion = companion::get_companion(&state.pool, companion_id).await?;
    let history = recent_messages(&state.pool, companion_id, user_id, Some(HISTORY_LIMIT)).await?;

    let system = build_system_prompt(&companion);
    let messages = to_llm_messages(&history, prompt);
    let response = llm.chat(chat_max_tokens(), &system, &messages).await?;
    info!(
        %companion_id,
        %user_id,
        stop_reason = %response.stop_reason,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "chat: LLM response"
    );

    let reply = response.text();
    if reply.is_empty() {
        return Err(ChatError::EmptyReply);
    }

    let mut tx = state.pool.begin().await?;
    insert_message(&mut tx, companion_id, user_id, Role::User, prompt).await?;
    let stored = insert_message(&mut tx, companion_id, user_id, Role::System, &reply).await?;
    tx.commit().await?;
    Ok(stored)
}

#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;
