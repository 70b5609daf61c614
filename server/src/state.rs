//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the database pool, the optional third-party integrations, and
//! the in-memory chat rate limiter. Integrations are `None` when their env
//! vars are missing; the matching routes then answer `503`.

use std::sync::Arc;

use sqlx::PgPool;

use crate::llm::LlmChat;
use crate::rate_limit::RateLimiter;
use crate::services::auth::GitHubConfig;
use crate::services::billing::Billing;

// =============================================================================
// APP STATE
// =============================================================================

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// GitHub OAuth settings. `None` disables sign-in.
    pub github: Option<GitHubConfig>,
    /// Optional LLM client. `None` if LLM env vars are not configured.
    pub llm: Option<Arc<dyn LlmChat>>,
    /// Optional Stripe client. `None` if `STRIPE_API_KEY` is not set.
    pub billing: Option<Arc<dyn Billing>>,
    /// Secret for `Stripe-Signature` verification.
    pub webhook_secret: Option<String>,
    /// In-memory rate limiter for chat prompts.
    pub rate_limiter: RateLimiter,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool, llm: Option<Arc<dyn LlmChat>>) -> Self {
        Self { pool, github: None, llm, billing: None, webhook_secret: None, rate_limiter: RateLimiter::new() }
    }

    #[must_use]
    pub fn with_github(mut self, github: Option<GitHubConfig>) -> Self {
        self.github = github;
        self
    }

    #[must_use]
    pub fn with_billing(mut self, billing: Option<Arc<dyn Billing>>, webhook_secret: Option<String>) -> Self {
        self.billing = billing;
        self.webhook_secret = webhook_secret;
        self
    }

    #[must_use]
    pub fn with_rate_limiter(mut self, rate_limiter: RateLimiter) -> Self {
        self.rate_limiter = rate_limiter;
        self
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
