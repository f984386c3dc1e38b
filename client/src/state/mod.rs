//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! State is split by concern (`auth`, `catalog`, `toast`) so pages and
//! modals depend on small focused models provided through Leptos context.

pub mod auth;
pub mod catalog;
pub mod toast;
