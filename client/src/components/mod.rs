//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the app chrome, the companion list and form, and the
//! chat surfaces while reading/writing shared state from Leptos context
//! providers.

pub mod avatar;
pub mod categories;
pub mod chat_form;
pub mod chat_header;
pub mod chat_messages;
pub mod companion_form;
pub mod companions;
pub mod image_upload;
pub mod layout;
pub mod navbar;
pub mod pro_modal;
pub mod search_input;
pub mod sidebar;
pub mod subscription_button;
pub mod toaster;
