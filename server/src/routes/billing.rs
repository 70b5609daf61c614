//! Subscription routes: the upsell redirect and the Stripe webhook.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use companions::RedirectUrl;

use crate::routes::auth::AuthUser;
use crate::services::billing::{self, BillingError};
use crate::state::AppState;

const SIGNATURE_HEADER: &str = "stripe-signature";

pub(crate) fn billing_error_to_status(err: &BillingError) -> StatusCode {
    match err {
        BillingError::MissingSignature
        | BillingError::InvalidSignature
        | BillingError::MissingUserId
        | BillingError::MissingField(_)
        | BillingError::Parse(_) => StatusCode::BAD_REQUEST,
        BillingError::Request(_) | BillingError::Api { .. } => StatusCode::BAD_GATEWAY,
        BillingError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// `GET /api/stripe` — checkout for new subscribers, billing portal for existing ones.
pub async fn billing_redirect(State(state): State<AppState>, auth: AuthUser) -> Result<Json<RedirectUrl>, StatusCode> {
    let Some(client) = state.billing.as_deref() else {
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    };

    let url = billing::billing_url(&state.pool, client, auth.user.id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id = %auth.user.id, "billing url failed");
            billing_error_to_status(&e)
        })?;
    Ok(Json(RedirectUrl { url }))
}

/// `POST /api/webhook` — verify and apply a Stripe event.
pub async fn webhook(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let (Some(client), Some(secret)) = (state.billing.as_deref(), state.webhook_secret.as_deref()) else {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    };

    let now = time::OffsetDateTime::now_utc().unix_timestamp();
    let result = handle_webhook(&state, client, secret, &headers, &body, now).await;

    match result {
        Ok(()) => StatusCode::OK.into_response(),
        Err(e) => {
            let status = billing_error_to_status(&e);
            if status.is_server_error() {
                tracing::error!(error = %e, "webhook failed");
            } else {
                tracing::warn!(error = %e, "webhook rejected");
            }
            (status, format!("Webhook Error: {e}")).into_response()
        }
    }
}

async fn handle_webhook(
    state: &AppState,
    client: &dyn billing::Billing,
    secret: &str,
    headers: &HeaderMap,
    body: &[u8],
    now_secs: i64,
) -> Result<(), BillingError> {
    let header = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(BillingError::MissingSignature)?;
    billing::verify_signature(header, body, secret, now_secs)?;
    let event = billing::parse_event(body)?;
    billing::apply_event(&state.pool, client, event).await
}

#[cfg(test)]
#[path = "billing_test.rs"]
mod tests;
