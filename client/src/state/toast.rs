//! Single-slot notice shown after an action completes or fails.
//!
//! Only one notice is visible at a time: showing a new one replaces the
//! current one. `seq` lets the auto-dismiss timer of a replaced notice tell
//! that it no longer owns the slot.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use companions::{GENERIC_ERROR, SUCCESS};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
    pub seq: u64,
}

#[derive(Clone, Debug, Default)]
pub struct ToastState {
    pub current: Option<Toast>,
    next_seq: u64,
}

impl ToastState {
    /// Replace the visible notice. Returns its sequence number.
    pub fn show(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        self.next_seq += 1;
        self.current = Some(Toast { kind, message: message.into(), seq: self.next_seq });
        self.next_seq
    }

    pub fn success(&mut self) -> u64 {
        self.show(ToastKind::Success, SUCCESS)
    }

    pub fn error(&mut self) -> u64 {
        self.show(ToastKind::Error, GENERIC_ERROR)
    }

    /// Hide the notice if it is still the one numbered `seq`.
    pub fn dismiss(&mut self, seq: u64) {
        if self.current.as_ref().is_some_and(|t| t.seq == seq) {
            self.current = None;
        }
    }
}
