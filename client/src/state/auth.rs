//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Written by the private gate after each session check and read by the
//! dashboard header and profile modal. Route decisions never read it; they
//! re-run the session check instead.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::session::guard::{AuthStatus, Session};

/// Latest session seen by a gate, plus whether a check is in flight.
#[derive(Clone, Debug, Default)]
pub struct AuthState {
    pub session: Option<Session>,
    pub loading: bool,
}

impl AuthState {
    /// State after a check resolved to `status`.
    #[must_use]
    pub fn from_status(status: &AuthStatus) -> Self {
        Self { session: status.session().cloned(), loading: false }
    }

    /// "First Last" from the claims, falling back to the email.
    #[must_use]
    pub fn display_name(&self) -> String {
        let Some(session) = &self.session else {
            return String::new();
        };
        let name = [session.first_name.as_deref(), session.last_name.as_deref()]
            .into_iter()
            .flatten()
            .filter(|part| !part.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if name.is_empty() {
            session.email.clone().unwrap_or_default()
        } else {
            name
        }
    }

    #[must_use]
    pub fn email(&self) -> String {
        self.session
            .as_ref()
            .and_then(|s| s.email.clone())
            .unwrap_or_default()
    }
}
