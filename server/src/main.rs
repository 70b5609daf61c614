#![recursion_limit = "256"]

mod config;
mod db;
mod llm;
mod rate_limit;
mod routes;
mod services;
mod state;

use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use crate::llm::LlmChat;
use crate::services::billing::{Billing, StripeClient, StripeConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let port: u16 = config::env_parse("PORT", config::DEFAULT_PORT);
    let app_url = config::app_url();

    let pool = db::init_pool(&database_url)
        .await
        .expect("database init failed");

    // Initialize LLM client (non-fatal: chat disabled if config missing).
    let llm: Option<Arc<dyn LlmChat>> = match llm::LlmClient::from_env() {
        Ok(client) => {
            tracing::info!(model = client.model(), "LLM client initialized");
            Some(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(error = %e, "LLM client not configured, chat disabled");
            None
        }
    };

    let github = services::auth::GitHubConfig::from_env();
    if github.is_none() {
        tracing::warn!("GitHub OAuth not configured, sign-in disabled");
    }

    let billing: Option<Arc<dyn Billing>> = StripeConfig::from_env(&app_url).map(|config| {
        tracing::info!(api_base = %config.api_base, "Stripe client initialized");
        Arc::new(StripeClient::new(config)) as Arc<dyn Billing>
    });
    if billing.is_none() {
        tracing::warn!("STRIPE_API_KEY not set, subscriptions disabled");
    }
    let webhook_secret = config::env_nonempty("STRIPE_WEBHOOK_SECRET");

    let state = state::AppState::new(pool, llm)
        .with_github(github)
        .with_billing(billing, webhook_secret);

    let app = routes::leptos_app(state).expect("router init failed");
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, %app_url, "companion-ai listening");
    axum::serve(listener, app).await.expect("server failed");
}
