//! Modal displaying the current user's profile and earned points.

#[cfg(test)]
#[path = "profile_modal_test.rs"]
mod profile_modal_test;

use leptos::prelude::*;

use crate::net::types::AcceptedApp;
use crate::session::PortalSession;
use crate::state::auth::AuthState;

pub const FETCH_FAILED: &str = "Failed to fetch accepted apps";

/// Sum of `points_earned` across approved tasks.
#[must_use]
pub fn total_points(apps: &[AcceptedApp]) -> i64 {
    apps.iter().map(|a| a.points_earned).sum()
}

#[derive(Clone, Debug, Default)]
struct History {
    apps: Vec<AcceptedApp>,
    loading: bool,
    error: Option<String>,
}

/// User profile modal with name, email, total points and point history.
#[component]
pub fn ProfileModal(auth: RwSignal<AuthState>, on_close: Callback<()>) -> impl IntoView {
    let session = expect_context::<PortalSession>();
    let history = RwSignal::new(History { loading: true, ..History::default() });

    // Fetch accepted apps on mount.
    #[cfg(feature = "hydrate")]
    {
        use crate::net::api::PortalApi;

        leptos::task::spawn_local(async move {
            let result = session.api().accepted_apps().await;
            history.try_update(|h| {
                h.loading = false;
                match result {
                    Ok(apps) => h.apps = apps,
                    Err(err) => {
                        leptos::logging::warn!("accepted apps fetch failed: {err}");
                        h.error = Some(FETCH_FAILED.to_owned());
                    }
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    let _ = session;

    let on_keydown = Callback::new(move |ev: leptos::ev::KeyboardEvent| {
        if ev.key() == "Escape" {
            ev.prevent_default();
            on_close.run(());
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div
                class="dialog dialog--profile"
                on:click=move |ev| ev.stop_propagation()
                on:keydown=move |ev| on_keydown.run(ev)
                tabindex="0"
            >
                <h2>"Your Profile"</h2>

                <div class="dialog__profile-row">
                    <span class="dialog__profile-label">"Name"</span>
                    <span class="dialog__profile-value">{move || auth.get().display_name()}</span>
                </div>
                <div class="dialog__profile-row">
                    <span class="dialog__profile-label">"Email"</span>
                    <span class="dialog__profile-value">{move || auth.get().email()}</span>
                </div>

                <div class="dialog__section">
                    <h3>"Total Earned Points"</h3>
                    <p class="dialog__points">
                        {move || format!("{} Points", history.with(|h| total_points(&h.apps)))}
                    </p>
                </div>

                <div class="dialog__section">
                    <h3>"Earned Points History"</h3>
                    {move || {
                        let h = history.get();
                        if h.loading {
                            return view! { <p class="dialog__empty">"Loading..."</p> }.into_any();
                        }
                        if let Some(err) = h.error {
                            return view! { <p class="dialog__error">{err}</p> }.into_any();
                        }
                        if h.apps.is_empty() {
                            return view! { <p class="dialog__empty">"No apps completed yet"</p> }.into_any();
                        }
                        view! {
                            <ul class="dialog__history">
                                {h
                                    .apps
                                    .into_iter()
                                    .map(|a| {
                                        view! {
                                            <li class="dialog__history-row">
                                                {a.app.app_icon.map(|src| view! { <img class="dialog__history-icon" src=src alt=a.app.name.clone()/> })}
                                                <span>{a.app.name.clone()}</span>
                                                <span class="dialog__history-points">{format!("+{} Points", a.points_earned)}</span>
                                            </li>
                                        }
                                    })
                                    .collect::<Vec<_>>()}
                            </ul>
                        }
                            .into_any()
                    }}
                </div>

                <div class="dialog__actions">
                    <button class="btn btn--primary" on:click=move |_| on_close.run(())>"Close"</button>
                </div>
            </div>
        </div>
    }
}
