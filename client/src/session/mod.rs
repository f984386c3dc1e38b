//! Client-side session: token storage, claim decoding, and the guard that
//! combines them.
//!
//! SYSTEM CONTEXT
//! ==============
//! Route gates and pages depend only on [`PortalSession`] from Leptos
//! context. The backend stays the authority; everything here is advisory
//! state used for routing and display.

pub mod codec;
pub mod guard;
pub mod store;

use crate::net::api::{ApiConfig, HttpApi};
use guard::{SessionManager, SystemClock};
use store::BrowserStorage;

/// Session manager wired to browser storage and the HTTP backend.
pub type PortalSession = SessionManager<BrowserStorage, HttpApi, SystemClock>;

/// Build the browser session manager for `config`.
#[must_use]
pub fn browser_session(config: ApiConfig) -> PortalSession {
    SessionManager::new(BrowserStorage, HttpApi::new(config), SystemClock)
}
