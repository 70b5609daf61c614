//! Stripe billing: checkout, customer portal and webhook handling.
//!
//! ARCHITECTURE
//! ============
//! `GET /api/stripe` asks [`billing_url`] where to send the browser. A user
//! with a stored Stripe customer goes to the billing portal; everyone else
//! gets a fresh subscription checkout for the monthly pro plan. Completed
//! checkouts and renewals arrive later through the webhook, which is the
//! only writer of `user_subscriptions`.
//!
//! The Stripe HTTP surface sits behind the [`Billing`] trait so routes and
//! tests can run without network access.

use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;
use sqlx::PgPool;
use uuid::Uuid;

use super::subscription::{self, SubscriptionUpdate};
use crate::config::{absolute_url, env_nonempty};

type HmacSha256 = Hmac<Sha256>;

pub const PRODUCT_NAME: &str = "Companion Pro";
pub const PRODUCT_DESCRIPTION: &str = "Create Custom AI Companions";
pub const CURRENCY: &str = "inr";
/// Monthly price in the smallest currency unit (₹49.99).
pub const UNIT_AMOUNT: i64 = 4999;
/// Maximum age of a webhook signature timestamp.
pub const SIGNATURE_TOLERANCE_SECS: i64 = 300;

const DEFAULT_STRIPE_API_BASE: &str = "https://api.stripe.com";
const SETTINGS_PATH: &str = "/settings";

// =============================================================================
// CONFIG
// =============================================================================

#[derive(Debug, Clone)]
pub struct StripeConfig {
    pub api_key: String,
    pub api_base: String,
    /// Where Stripe sends the browser after checkout or the portal.
    pub settings_url: String,
}

impl StripeConfig {
    /// Load from `STRIPE_API_KEY` and optional `STRIPE_API_BASE`.
    /// Returns `None` when no key is set (billing disabled).
    #[must_use]
    pub fn from_env(app_url: &str) -> Option<Self> {
        let api_key = env_nonempty("STRIPE_API_KEY")?;
        let api_base = env_nonempty("STRIPE_API_BASE")
            .unwrap_or_else(|| DEFAULT_STRIPE_API_BASE.to_owned())
            .trim_end_matches('/')
            .to_owned();
        Some(Self { api_key, api_base, settings_url: absolute_url(app_url, SETTINGS_PATH) })
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BillingError {
    #[error("stripe request failed: {0}")]
    Request(String),
    #[error("stripe returned status {status}")]
    Api { status: u16, body: String },
    #[error("stripe response parse failed: {0}")]
    Parse(String),
    #[error("missing Stripe-Signature header")]
    MissingSignature,
    #[error("invalid webhook signature")]
    InvalidSignature,
    #[error("User id is required")]
    MissingUserId,
    #[error("event is missing {0}")]
    MissingField(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

// =============================================================================
// BILLING TRAIT
// =============================================================================

/// Stripe operations used by the routes. Mocked in tests.
#[async_trait::async_trait]
pub trait Billing: Send + Sync {
    /// Create a subscription checkout for `user_id` and return its URL.
    async fn create_checkout_session(&self, user_id: Uuid) -> Result<String, BillingError>;

    /// Create a billing-portal session for an existing customer and return its URL.
    async fn create_portal_session(&self, customer_id: &str) -> Result<String, BillingError>;

    /// Fetch the fields of a subscription that we persist.
    async fn retrieve_subscription(&self, subscription_id: &str) -> Result<SubscriptionUpdate, BillingError>;
}

pub struct StripeClient {
    http: reqwest::Client,
    config: StripeConfig,
}

impl StripeClient {
    #[must_use]
    pub fn new(config: StripeConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(20))
            .build()
            .unwrap_or_default();
        Self { http, config }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String, BillingError> {
        let response = request
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| BillingError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| BillingError::Request(e.to_string()))?;
        if !(200..300).contains(&status) {
            return Err(BillingError::Api { status, body: text });
        }
        Ok(text)
    }

    async fn post_form(&self, path: &str, form: &[(&'static str, String)]) -> Result<String, BillingError> {
        let url = format!("{}{path}", self.config.api_base);
        self.send(self.http.post(url).form(form)).await
    }
}

#[async_trait::async_trait]
impl Billing for StripeClient {
    async fn create_checkout_session(&self, user_id: Uuid) -> Result<String, BillingError> {
        let form = checkout_form(&self.config.settings_url, user_id);
        let body = self.post_form("/v1/checkout/sessions", &form).await?;
        parse_session_url(&body)
    }

    async fn create_portal_session(&self, customer_id: &str) -> Result<String, BillingError> {
        let form = portal_form(&self.config.settings_url, customer_id);
        let body = self.post_form("/v1/billing_portal/sessions", &form).await?;
        parse_session_url(&body)
    }

    async fn retrieve_subscription(&self, subscription_id: &str) -> Result<SubscriptionUpdate, BillingError> {
        let url = format!("{}/v1/subscriptions/{subscription_id}", self.config.api_base);
        let body = self.send(self.http.get(url)).await?;
        parse_subscription(&body)
    }
}

// =============================================================================
// REQUEST BODIES
// =============================================================================

/// Form body for a monthly subscription checkout tagged with `userId`.
#[must_use]
pub fn checkout_form(settings_url: &str, user_id: Uuid) -> Vec<(&'static str, String)> {
    vec![
        ("success_url", settings_url.to_owned()),
        ("cancel_url", settings_url.to_owned()),
        ("payment_method_types[0]", "card".to_owned()),
        ("mode", "subscription".to_owned()),
        ("billing_address_collection", "auto".to_owned()),
        ("line_items[0][price_data][currency]", CURRENCY.to_owned()),
        ("line_items[0][price_data][product_data][name]", PRODUCT_NAME.to_owned()),
        ("line_items[0][price_data][product_data][description]", PRODUCT_DESCRIPTION.to_owned()),
        ("line_items[0][price_data][unit_amount]", UNIT_AMOUNT.to_string()),
        ("line_items[0][price_data][recurring][interval]", "month".to_owned()),
        ("line_items[0][quantity]", "1".to_owned()),
        ("metadata[userId]", user_id.to_string()),
    ]
}

#[must_use]
pub fn portal_form(settings_url: &str, customer_id: &str) -> Vec<(&'static str, String)> {
    vec![("customer", customer_id.to_owned()), ("return_url", settings_url.to_owned())]
}

// =============================================================================
// RESPONSE PARSING
// =============================================================================

fn parse_json(body: &str) -> Result<Value, BillingError> {
    serde_json::from_str(body).map_err(|e| BillingError::Parse(e.to_string()))
}

pub(crate) fn parse_session_url(body: &str) -> Result<String, BillingError> {
    parse_json(body)?
        .get("url")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| BillingError::Parse("session response has no url".to_owned()))
}

/// Stripe ids may arrive as a bare string or as an expanded object.
fn id_of(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("id").and_then(Value::as_str).map(str::to_owned),
        _ => None,
    }
}

pub(crate) fn parse_subscription(body: &str) -> Result<SubscriptionUpdate, BillingError> {
    let root = parse_json(body)?;
    let subscription_id = id_of(Some(&root)).ok_or(BillingError::MissingField("subscription id"))?;
    let first_item = root.pointer("/items/data/0");
    let price_id = first_item.and_then(|item| id_of(item.get("price")));
    // Newer API versions report the period on the item instead of the subscription.
    let current_period_end = root
        .get("current_period_end")
        .and_then(Value::as_i64)
        .or_else(|| first_item.and_then(|item| item.get("current_period_end")).and_then(Value::as_i64));

    Ok(SubscriptionUpdate { subscription_id, customer_id: id_of(root.get("customer")), price_id, current_period_end })
}

// =============================================================================
// WEBHOOK
// =============================================================================

/// Webhook events we act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    /// `checkout.session.completed`
    CheckoutCompleted { subscription_id: Option<String>, user_id: Option<String> },
    /// `invoice.payment_succeeded`
    InvoicePaid { subscription_id: Option<String> },
    /// Any other event type, acknowledged and dropped.
    Ignored(String),
}

/// Verify a `Stripe-Signature` header (`t=...,v1=...`) over the raw body.
///
/// # Errors
///
/// Returns `InvalidSignature` for a malformed header, a stale timestamp, or
/// no matching `v1` signature.
pub fn verify_signature(header: &str, payload: &[u8], secret: &str, now_secs: i64) -> Result<(), BillingError> {
    let mut timestamp: Option<&str> = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = Some(value),
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(BillingError::InvalidSignature)?;
    let issued: i64 = timestamp.parse().map_err(|_| BillingError::InvalidSignature)?;
    let age = now_secs.checked_sub(issued).map(i64::unsigned_abs).ok_or(BillingError::InvalidSignature)?;
    if age > SIGNATURE_TOLERANCE_SECS.unsigned_abs() {
        return Err(BillingError::InvalidSignature);
    }

    for signature in signatures {
        let Ok(expected) = hex::decode(signature) else {
            continue;
        };
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).map_err(|_| BillingError::InvalidSignature)?;
        mac.update(timestamp.as_bytes());
        mac.update(b".");
        mac.update(payload);
        if mac.verify_slice(&expected).is_ok() {
            return Ok(());
        }
    }
    Err(BillingError::InvalidSignature)
}

/// Parse the event envelope into the cases we handle.
///
/// # Errors
///
/// Returns `Parse` for a body that is not a Stripe event.
pub fn parse_event(payload: &[u8]) -> Result<WebhookEvent, BillingError> {
    let root: Value = serde_json::from_slice(payload).map_err(|e| BillingError::Parse(e.to_string()))?;
    let kind = root
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| BillingError::Parse("event has no type".to_owned()))?;
    let object = root.pointer("/data/object").unwrap_or(&Value::Null);

    Ok(match kind {
        "checkout.session.completed" => WebhookEvent::CheckoutCompleted {
            subscription_id: id_of(object.get("subscription")),
            user_id: object
                .pointer("/metadata/userId")
                .and_then(Value::as_str)
                .map(str::to_owned),
        },
        "invoice.payment_succeeded" => WebhookEvent::InvoicePaid {
            subscription_id: id_of(object.get("subscription"))
                .or_else(|| id_of(object.pointer("/parent/subscription_details/subscription"))),
        },
        other => WebhookEvent::Ignored(other.to_owned()),
    })
}

/// Persist the subscription state carried by `event`.
///
/// # Errors
///
/// Returns `MissingUserId` for a checkout without a usable `userId`.
pub async fn apply_event(pool: &PgPool, billing: &dyn Billing, event: WebhookEvent) -> Result<(), BillingError> {
    match event {
        WebhookEvent::CheckoutCompleted { subscription_id, user_id } => {
            let user_id = user_id
                .as_deref()
                .and_then(|id| Uuid::parse_str(id).ok())
                .ok_or(BillingError::MissingUserId)?;
            let subscription_id = subscription_id.ok_or(BillingError::MissingField("subscription"))?;
            let update = billing.retrieve_subscription(&subscription_id).await?;
            subscription::upsert_for_user(pool, user_id, &update).await?;
            tracing::info!(%user_id, subscription_id = %update.subscription_id, "subscription started");
        }
        WebhookEvent::InvoicePaid { subscription_id } => {
            let subscription_id = subscription_id.ok_or(BillingError::MissingField("subscription"))?;
            let update = billing.retrieve_subscription(&subscription_id).await?;
            if !subscription::refresh_period(pool, &update).await? {
                tracing::warn!(%subscription_id, "renewal for unknown subscription");
            }
        }
        WebhookEvent::Ignored(kind) => {
            tracing::debug!(%kind, "ignoring stripe event");
        }
    }
    Ok(())
}

/// Where to send `user_id` from the subscription button.
///
/// # Errors
///
/// Propagates Stripe and database failures.
pub async fn billing_url(pool: &PgPool, billing: &dyn Billing, user_id: Uuid) -> Result<String, BillingError> {
    let existing = subscription::find_by_user(pool, user_id).await?;
    match existing.and_then(|row| row.stripe_customer_id) {
        Some(customer_id) => billing.create_portal_session(&customer_id).await,
        None => billing.create_checkout_session(user_id).await,
    }
}

#[cfg(test)]
#[path = "billing_test.rs"]
mod tests;
