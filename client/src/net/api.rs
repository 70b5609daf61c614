//! REST API helpers for communicating with the server.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning `None`/error since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Option`/`Result` outputs instead of panics. Components turn
//! any failure into the single generic notice; only a `400` on a companion
//! save carries detail (field errors) back to the form.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use companions::{Category, ChatMessage, Companion, CompanionChat, CompanionInput, CompanionQuery, FieldError, User};

#[cfg(any(test, feature = "hydrate"))]
use companions::{CATEGORY_PARAM, NAME_PARAM};

/// Failure of a companion create/update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SaveError {
    /// The server rejected these fields.
    Rejected(Vec<FieldError>),
    /// Transport failure or any other status.
    Failed(String),
}

#[cfg(any(test, feature = "hydrate"))]
fn companion_endpoint(id: &str) -> String {
    format!("/api/companion/{id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn chat_endpoint(companion_id: &str) -> String {
    format!("/api/chat/{companion_id}")
}

#[cfg(any(test, feature = "hydrate"))]
fn companions_list_endpoint(query: &CompanionQuery) -> String {
    let mut search = String::new();
    for (key, value) in [(CATEGORY_PARAM, &query.category_id), (NAME_PARAM, &query.name)] {
        search = crate::util::query::with_query_param("", &search, key, value.as_deref());
    }
    format!("/api/companion{search}")
}

#[cfg(any(test, feature = "hydrate"))]
fn request_failed_message(what: &str, status: u16) -> String {
    format!("{what} failed: {status}")
}

#[cfg(feature = "hydrate")]
async fn get_json<T: serde::de::DeserializeOwned>(url: &str, what: &str) -> Result<T, String> {
    let resp = gloo_net::http::Request::get(url)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !resp.ok() {
        return Err(request_failed_message(what, resp.status()));
    }
    resp.json::<T>().await.map_err(|e| e.to_string())
}

/// Fetch the currently authenticated user from `/api/auth/me`.
/// Returns `None` if not authenticated or on the server.
pub async fn fetch_current_user() -> Option<User> {
    #[cfg(feature = "hydrate")]
    {
        get_json::<User>("/api/auth/me", "current user").await.ok()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}

/// Log out the current user by calling `POST /api/auth/logout`.
pub async fn logout() {
    #[cfg(feature = "hydrate")]
    {
        let _ = gloo_net::http::Request::post("/api/auth/logout")
            .send()
            .await;
    }
}

/// Fetch all categories from `/api/category`.
///
/// # Errors
///
/// Returns an error string if the request fails or the status is not OK.
pub async fn fetch_categories() -> Result<Vec<Category>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json("/api/category", "category list").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}

/// Fetch companions matching `query` from `/api/companion`.
///
/// # Errors
///
/// Returns an error string if the request fails or the status is not OK.
pub async fn fetch_companions(query: &CompanionQuery) -> Result<Vec<Companion>, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(&companions_list_endpoint(query), "companion list").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = query;
        Err("not available on server".to_owned())
    }
}

/// Fetch one companion from `/api/companion/{id}`.
///
/// # Errors
///
/// Returns an error string if the request fails or the status is not OK.
pub async fn fetch_companion(id: &str) -> Result<Companion, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(&companion_endpoint(id), "companion").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err("not available on server".to_owned())
    }
}

#[cfg(feature = "hydrate")]
async fn save_response(resp: gloo_net::http::Response) -> Result<Companion, SaveError> {
    if resp.status() == 400 {
        let body: companions::ValidationErrors = resp.json().await.map_err(|e| SaveError::Failed(e.to_string()))?;
        return Err(SaveError::Rejected(body.errors));
    }
    if !resp.ok() {
        return Err(SaveError::Failed(request_failed_message("companion save", resp.status())));
    }
    resp.json::<Companion>().await.map_err(|e| SaveError::Failed(e.to_string()))
}

/// Create a companion via `POST /api/companion`.
///
/// # Errors
///
/// Returns `Rejected` with field errors on `400`, `Failed` otherwise.
pub async fn create_companion(input: &CompanionInput) -> Result<Companion, SaveError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::post("/api/companion")
            .json(input)
            .map_err(|e| SaveError::Failed(e.to_string()))?
            .send()
            .await
            .map_err(|e| SaveError::Failed(e.to_string()))?;
        save_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = input;
        Err(SaveError::Failed("not available on server".to_owned()))
    }
}

/// Update a companion via `PATCH /api/companion/{id}`.
///
/// # Errors
///
/// Returns `Rejected` with field errors on `400`, `Failed` otherwise.
pub async fn update_companion(id: &str, input: &CompanionInput) -> Result<Companion, SaveError> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::patch(&companion_endpoint(id))
            .json(input)
            .map_err(|e| SaveError::Failed(e.to_string()))?
            .send()
            .await
            .map_err(|e| SaveError::Failed(e.to_string()))?;
        save_response(resp).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (id, input);
        Err(SaveError::Failed("not available on server".to_owned()))
    }
}

/// Delete a companion via `DELETE /api/companion/{id}`.
///
/// # Errors
///
/// Returns an error string if the request fails or the status is not OK.
pub async fn delete_companion(id: &str) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        let resp = gloo_net::http::Request::delete(&companion_endpoint(id))
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("companion delete", resp.status()));
        }
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = id;
        Err("not available on server".to_owned())
    }
}

/// Load a companion and the caller's messages from `/api/chat/{id}`.
///
/// # Errors
///
/// Returns an error string if the request fails or the status is not OK.
pub async fn fetch_chat(companion_id: &str) -> Result<CompanionChat, String> {
    #[cfg(feature = "hydrate")]
    {
        get_json(&chat_endpoint(companion_id), "chat").await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = companion_id;
        Err("not available on server".to_owned())
    }
}

/// Send a prompt via `POST /api/chat/{id}`; returns the companion's reply.
///
/// # Errors
///
/// Returns an error string if the request fails or the status is not OK.
pub async fn send_prompt(companion_id: &str, prompt: &str) -> Result<ChatMessage, String> {
    #[cfg(feature = "hydrate")]
    {
        let body = companions::ChatRequest { prompt: prompt.to_owned() };
        let resp = gloo_net::http::Request::post(&chat_endpoint(companion_id))
            .json(&body)
            .map_err(|e| e.to_string())?
            .send()
            .await
            .map_err(|e| e.to_string())?;
        if !resp.ok() {
            return Err(request_failed_message("prompt", resp.status()));
        }
        resp.json::<ChatMessage>().await.map_err(|e| e.to_string())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (companion_id, prompt);
        Err("not available on server".to_owned())
    }
}

/// Ask `/api/stripe` where to send the browser for checkout or billing.
///
/// # Errors
///
/// Returns an error string if the request fails or the status is not OK.
pub async fn fetch_billing_url() -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let body: companions::RedirectUrl = get_json("/api/stripe", "billing").await?;
        Ok(body.url)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        Err("not available on server".to_owned())
    }
}
