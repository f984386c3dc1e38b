//! User dashboard listing claimable apps.
//!
//! SYSTEM CONTEXT
//! ==============
//! The authenticated landing route for non-admin users. Fetches
//! `/apps/available/` once on mount and hosts the claim and profile modals.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::claim_modal::ClaimModal;
use crate::components::profile_modal::ProfileModal;
use crate::net::types::CatalogApp;
use crate::session::PortalSession;
use crate::state::auth::AuthState;
use crate::state::catalog::CatalogState;
use crate::util::auth::LOGIN_ROUTE;
use crate::util::browser::open_in_new_tab;

pub const FETCH_FAILED: &str = "Failed to fetch data";

/// How long the missing-link notice stays visible, in seconds.
pub const NOTICE_SECS: u64 = 3;

/// What the Download button does for an app.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DownloadTarget {
    Open(String),
    Unavailable(String),
}

#[must_use]
pub fn download_target(app: &CatalogApp) -> DownloadTarget {
    match app.playstore_link.as_deref().map(str::trim) {
        Some(link) if !link.is_empty() => DownloadTarget::Open(link.to_owned()),
        _ => DownloadTarget::Unavailable(format!("Playstore link for {} is not available", app.name)),
    }
}

/// Dashboard page: available apps with download, claim, and profile actions.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<PortalSession>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let navigate = use_navigate();

    let catalog = RwSignal::new(CatalogState { loading: true, ..CatalogState::default() });
    let notice = RwSignal::new(None::<String>);
    let show_claim = RwSignal::new(false);
    let show_profile = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        use crate::net::api::PortalApi;

        let session = session.clone();
        leptos::task::spawn_local(async move {
            let result = session.api().available_apps().await;
            if let Err(err) = &result {
                leptos::logging::warn!("available apps fetch failed: {err}");
            }
            catalog.try_update(|c| c.apply(result, FETCH_FAILED));
        });
    }

    let on_download = move |app: &CatalogApp| match download_target(app) {
        DownloadTarget::Open(link) => open_in_new_tab(&link),
        DownloadTarget::Unavailable(msg) => {
            notice.set(Some(msg));
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                gloo_timers::future::sleep(std::time::Duration::from_secs(NOTICE_SECS)).await;
                notice.try_set(None);
            });
        }
    };

    let on_logout = move |_| {
        session.logout();
        auth.set(AuthState::default());
        navigate(LOGIN_ROUTE, NavigateOptions::default());
    };

    let banner = move || notice.get().or_else(|| catalog.with(|c| c.error.clone()));

    view! {
        <div class="dashboard-page">
            <header class="dashboard-page__header toolbar">
                <span class="toolbar__title">"Android App Download Portal"</span>
                <span class="toolbar__spacer"></span>
                <span class="toolbar__self">{move || auth.get().display_name()}</span>
                <button class="btn toolbar__claim" on:click=move |_| show_claim.set(true)>
                    "Claim Points"
                </button>
                <button class="btn toolbar__profile" on:click=move |_| show_profile.set(true)>
                    "Profile"
                </button>
                <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </header>

            <main class="dashboard-page__body">
                <h2>"Available Apps"</h2>
                <Show when=move || banner().is_some()>
                    <p class="dashboard-page__error">{move || banner().unwrap_or_default()}</p>
                </Show>
                <Show
                    when=move || !catalog.get().loading
                    fallback=move || view! { <p>"Loading..."</p> }
                >
                    <div class="dashboard-page__cards">
                        {move || {
                            catalog
                                .get()
                                .apps
                                .into_iter()
                                .map(|app| {
                                    let has_link = matches!(download_target(&app), DownloadTarget::Open(_));
                                    let name = app.name.clone();
                                    let icon = app.app_icon.clone().map(|src| {
                                        view! { <img class="app-card__icon" src=src alt=name.clone()/> }
                                    });
                                    let description = app.description.clone().unwrap_or_default();
                                    let points = format!("{} Points", app.points_value);
                                    view! {
                                        <div class="app-card">
                                            {icon}
                                            <h3 class="app-card__name">{name}</h3>
                                            <p class="app-card__description">{description}</p>
                                            <div class="app-card__footer">
                                                <span class="app-card__points">{points}</span>
                                                <button
                                                    class="btn"
                                                    class=("btn--primary", has_link)
                                                    on:click=move |_| on_download(&app)
                                                >
                                                    "Download"
                                                </button>
                                            </div>
                                        </div>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </div>
                </Show>
            </main>

            <Show when=move || show_claim.get()>
                <ClaimModal on_close=Callback::new(move |()| show_claim.set(false))/>
            </Show>
            <Show when=move || show_profile.get()>
                <ProfileModal auth=auth on_close=Callback::new(move |()| show_profile.set(false))/>
            </Show>
        </div>
    }
}
