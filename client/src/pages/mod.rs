//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`. Gating is applied by the router, not by the pages.

pub mod admin_home;
pub mod dashboard;
pub mod login;
pub mod register;
