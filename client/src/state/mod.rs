//! Client-side state provided through Leptos context.
//!
//! DESIGN
//! ======
//! Each module holds a plain data struct wrapped in an `RwSignal` by `App`
//! or by the owning page. State transitions are methods on the struct so the
//! rules can be tested without a browser.

pub mod auth;
pub mod chat;
pub mod companion_form;
pub mod toast;
pub mod ui;
