//! Conversation state for the chat page.
//!
//! The user's prompt is appended optimistically when sent. A failed send
//! removes it again and puts its text back in the input; the server stores
//! a prompt only together with its reply, so nothing is left behind.

#[cfg(test)]
#[path = "chat_test.rs"]
mod chat_test;

use companions::{ChatMessage, Role};

#[derive(Clone, Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    /// Current text of the prompt input.
    pub prompt: String,
    /// A prompt is awaiting its reply; the input is disabled.
    pub pending: bool,
    /// Messages stored for the companion across all users, kept current
    /// as replies arrive.
    pub message_count: i64,
    pending_id: Option<String>,
}

impl ChatState {
    pub fn with_history(messages: Vec<ChatMessage>, message_count: i64) -> Self {
        Self { messages, message_count, ..Self::default() }
    }

    /// Take the prompt for sending. Returns `None` for a blank prompt or
    /// while a previous send is pending.
    pub fn begin_send(&mut self, now_ms: i64) -> Option<String> {
        if self.pending || self.prompt.trim().is_empty() {
            return None;
        }
        let prompt = std::mem::take(&mut self.prompt);
        let id = format!("pending-{}", uuid::Uuid::new_v4());
        self.messages.push(ChatMessage {
            id: id.clone(),
            role: Role::User,
            content: prompt.clone(),
            created_at: now_ms,
        });
        self.pending_id = Some(id);
        self.pending = true;
        Some(prompt)
    }

    /// The prompt and its reply were stored together.
    pub fn finish_ok(&mut self, reply: ChatMessage) {
        self.pending = false;
        self.pending_id = None;
        self.messages.push(reply);
        self.message_count += 2;
    }

    pub fn finish_err(&mut self, prompt: String) {
        self.pending = false;
        if let Some(id) = self.pending_id.take() {
            self.messages.retain(|m| m.id != id);
        }
        self.prompt = prompt;
    }
}
