//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration (auth guard, data loading,
//! navigation after an action) and delegates rendering to `components`.

pub mod chat;
pub mod companion;
pub mod home;
pub mod login;
pub mod settings;
