//! Route gates wrapping protected and public views.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every mount runs its own session check; there is no shared in-flight
//! check and no cached result. The loader stays up for
//! [`LOADER_HOLD_MS`] after the check resolves so fast checks do not flash.
//!
//! DESIGN
//! ======
//! Signals are written with `try_set` after the await. A gate unmounted
//! mid-check has disposed signals, so the late result is dropped silently.

use leptos::prelude::*;
use leptos_router::hooks::use_navigate;

use crate::components::loader::Loader;
use crate::session::PortalSession;
use crate::state::auth::AuthState;
use crate::util::auth::{GatePhase, install_gate_redirect};
#[cfg(feature = "hydrate")]
use crate::util::auth::{LOADER_HOLD_MS, resolve_private, resolve_public};

/// Renders `children` only for an authenticated session; otherwise
/// replaces the history entry with `/login`.
#[component]
pub fn PrivateGate(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<PortalSession>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let phase = RwSignal::new(GatePhase::Loading);
    install_gate_redirect(phase, use_navigate());

    auth.update(|a| a.loading = true);

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let (status, verdict) = resolve_private(&session).await;
        auth.try_set(AuthState::from_status(&status));
        hold_loader().await;
        phase.try_set(GatePhase::Resolved(verdict));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = session;

    view! { {move || gate_view(phase.get(), &children)} }
}

/// Renders `children` (login/registration) only for visitors; signed-in
/// users are pushed to their home route.
#[component]
pub fn PublicGate(children: ChildrenFn) -> impl IntoView {
    let session = expect_context::<PortalSession>();
    let phase = RwSignal::new(GatePhase::Loading);
    install_gate_redirect(phase, use_navigate());

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        let (_, verdict) = resolve_public(&session).await;
        hold_loader().await;
        phase.try_set(GatePhase::Resolved(verdict));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = session;

    view! { {move || gate_view(phase.get(), &children)} }
}

fn gate_view(phase: GatePhase, children: &ChildrenFn) -> AnyView {
    if phase.shows_children() { children().into_any() } else { view! { <Loader/> }.into_any() }
}

#[cfg(feature = "hydrate")]
async fn hold_loader() {
    gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(LOADER_HOLD_MS))).await;
}
