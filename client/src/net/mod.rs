//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` wraps every REST call the UI makes. Wire types come from the shared
//! `companions` crate.

pub mod api;
