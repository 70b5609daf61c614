//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence concerns so route
//! handlers can stay focused on protocol translation and auth plumbing.

pub mod auth;
pub mod billing;
pub mod category;
pub mod chat;
pub mod companion;
pub mod session;
pub mod subscription;
