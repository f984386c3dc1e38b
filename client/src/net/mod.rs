//! Networking modules for the portal REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` performs the HTTP calls, `form` assembles multipart bodies, `error`
//! classifies failures, and `types` defines the wire schema.

pub mod api;
pub mod error;
pub mod form;
pub mod types;
