//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Used by route guards and user-aware components to coordinate login redirects,
//! ownership checks and pro-only affordances.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use companions::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, loading: true }
    }
}

impl AuthState {
    /// Id of the signed-in user, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    /// Whether the signed-in user holds an active subscription.
    pub fn is_pro(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_pro)
    }
}
