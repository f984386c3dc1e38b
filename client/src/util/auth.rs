//! Shared route-gate decisions.
//!
//! SYSTEM CONTEXT
//! ==============
//! Private and public gates run the same session check and differ only in
//! how they read the outcome. The decision is kept here as plain data so the
//! components stay thin and the routing rules stay testable.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::session::guard::{AuthApi, AuthStatus, Clock, SessionManager};
use crate::session::store::Storage;

pub const LOGIN_ROUTE: &str = "/login";
pub const REGISTER_ROUTE: &str = "/register";
pub const DASHBOARD_ROUTE: &str = "/dashboard";
pub const ADMIN_HOME_ROUTE: &str = "/admin/home";

/// How long the loader stays up after a check resolves, in milliseconds.
pub const LOADER_HOLD_MS: u32 = 1000;

/// What a gate does once its check has resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateVerdict {
    Render,
    Redirect { to: &'static str, replace: bool },
}

/// A gate is either still checking or resolved; never both.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GatePhase {
    #[default]
    Loading,
    Resolved(GateVerdict),
}

impl GatePhase {
    /// Whether the wrapped view is shown. Loading and redirecting phases
    /// show the loader instead.
    #[must_use]
    pub fn shows_children(self) -> bool {
        matches!(self, Self::Resolved(GateVerdict::Render))
    }
}

/// Landing route for a signed-in user.
#[must_use]
pub fn home_route(is_admin: bool) -> &'static str {
    if is_admin { ADMIN_HOME_ROUTE } else { DASHBOARD_ROUTE }
}

/// Protected views render for any session; otherwise replace history with login.
#[must_use]
pub fn private_verdict(status: &AuthStatus) -> GateVerdict {
    if status.is_authenticated() {
        GateVerdict::Render
    } else {
        GateVerdict::Redirect { to: LOGIN_ROUTE, replace: true }
    }
}

/// Login/registration render for visitors; signed-in users go home.
///
/// The role comes from the login payload persisted at sign-in, not from the
/// claims just decoded.
#[must_use]
pub fn public_verdict(status: &AuthStatus, stored_is_admin: bool) -> GateVerdict {
    if status.is_authenticated() {
        GateVerdict::Redirect { to: home_route(stored_is_admin), replace: false }
    } else {
        GateVerdict::Render
    }
}

/// Run one session check for a private gate.
pub async fn resolve_private<S, A, C>(session: &SessionManager<S, A, C>) -> (AuthStatus, GateVerdict)
where
    S: Storage,
    A: AuthApi,
    C: Clock,
{
    let status = session.get_session().await;
    let verdict = private_verdict(&status);
    (status, verdict)
}

/// Run one session check for a public gate.
pub async fn resolve_public<S, A, C>(session: &SessionManager<S, A, C>) -> (AuthStatus, GateVerdict)
where
    S: Storage,
    A: AuthApi,
    C: Clock,
{
    let status = session.get_session().await;
    let verdict = public_verdict(&status, session.stored_is_admin());
    (status, verdict)
}

/// Navigate whenever `phase` resolves to a redirect.
pub fn install_gate_redirect<F>(phase: RwSignal<GatePhase>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if let GatePhase::Resolved(GateVerdict::Redirect { to, replace }) = phase.get() {
            navigate(to, NavigateOptions { replace, ..NavigateOptions::default() });
        }
    });
}
