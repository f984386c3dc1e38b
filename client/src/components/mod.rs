//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render route gates, modals, and toasts while reading/writing
//! shared state from Leptos context providers.

pub mod app_form_modal;
pub mod claim_modal;
pub mod gates;
pub mod loader;
pub mod profile_modal;
pub mod screenshot_approval_modal;
pub mod toaster;
