//! Admin home: catalog management and screenshot review.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every catalog mutation is followed by a re-fetch of `/apps/`, so the
//! table always mirrors the backend rather than local edits.

#[cfg(test)]
#[path = "admin_home_test.rs"]
mod admin_home_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;

use crate::components::app_form_modal::AppFormModal;
use crate::components::screenshot_approval_modal::ScreenshotApprovalModal;
#[cfg(feature = "hydrate")]
use crate::components::toaster::notify;
use crate::net::types::CatalogApp;
use crate::session::PortalSession;
use crate::state::auth::AuthState;
use crate::state::catalog::CatalogState;
use crate::state::toast::ToastState;
#[cfg(feature = "hydrate")]
use crate::state::toast::ToastKind;
use crate::util::auth::LOGIN_ROUTE;
use crate::util::browser::confirm;

pub const FETCH_FAILED: &str = "Failed to fetch apps";
pub const DELETE_CONFIRM: &str = "Are you sure you want to delete this app?";
pub const DELETED: &str = "App deleted successfully";
pub const DELETE_FAILED: &str = "Failed to delete app";

/// Which form dialog is open, if any.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum FormDialog {
    #[default]
    Closed,
    Add,
    Edit(CatalogApp),
}

impl FormDialog {
    #[must_use]
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Prefill for the form, `None` when adding.
    #[must_use]
    pub fn initial(&self) -> Option<CatalogApp> {
        match self {
            Self::Edit(app) => Some(app.clone()),
            Self::Closed | Self::Add => None,
        }
    }
}

#[component]
pub fn AdminHomePage() -> impl IntoView {
    let session = expect_context::<PortalSession>();
    let auth = expect_context::<RwSignal<AuthState>>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = use_navigate();

    let catalog = RwSignal::new(CatalogState { loading: true, ..CatalogState::default() });
    let dialog = RwSignal::new(FormDialog::Closed);
    let show_approvals = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        use crate::net::api::PortalApi;

        let session = session.clone();
        leptos::task::spawn_local(async move {
            let result = session.api().list_catalog().await;
            if let Err(err) = &result {
                leptos::logging::warn!("catalog fetch failed: {err}");
                notify(toasts, ToastKind::Error, FETCH_FAILED);
            }
            catalog.try_update(|c| c.apply(result, FETCH_FAILED));
        });
    }

    let delete_session = session.clone();
    let on_delete = Callback::new(move |id: i64| {
        if !confirm(DELETE_CONFIRM) {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            let session = delete_session.clone();
            leptos::task::spawn_local(async move {
                match crate::state::catalog::delete_and_reload(session.api(), id).await {
                    Ok(apps) => {
                        notify(toasts, ToastKind::Success, DELETED);
                        catalog.try_update(|c| c.apply(Ok(apps), FETCH_FAILED));
                    }
                    Err(err) => {
                        leptos::logging::warn!("delete of app {id} failed: {err}");
                        notify(toasts, ToastKind::Error, DELETE_FAILED);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&delete_session, id, toasts);
        }
    });

    let on_saved = Callback::new(move |apps: Vec<CatalogApp>| catalog.update(|c| c.apply(Ok(apps), FETCH_FAILED)));
    let on_form_close = Callback::new(move |()| dialog.set(FormDialog::Closed));

    let on_logout = move |_| {
        session.logout();
        auth.set(AuthState::default());
        navigate(LOGIN_ROUTE, NavigateOptions::default());
    };

    view! {
        <div class="admin-page">
            <header class="admin-page__header toolbar">
                <span class="toolbar__title">"Android App Management Portal"</span>
                <span class="toolbar__spacer"></span>
                <button class="btn toolbar__logout" on:click=on_logout title="Logout">
                    "Logout"
                </button>
            </header>

            <main class="admin-page__body">
                <div class="admin-page__actions">
                    <button class="btn" on:click=move |_| show_approvals.set(true)>
                        "Screenshot Approvals"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| dialog.set(FormDialog::Add)>
                        "Add New App"
                    </button>
                </div>

                <Show when=move || catalog.with(|c| c.error.is_some())>
                    <p class="admin-page__error">{move || catalog.with(|c| c.error.clone().unwrap_or_default())}</p>
                </Show>

                <table class="catalog-table">
                    <thead>
                        <tr>
                            <th>"App Name"</th>
                            <th>"Category"</th>
                            <th>"Points"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || catalog.get().apps
                            key=|app| (app.id, app.name.clone(), app.points_value, app.category.as_str())
                            children=move |app| {
                                let id = app.id;
                                let name = app.name.clone();
                                let category = app.category.label();
                                let points = app.points_value;
                                view! {
                                    <tr>
                                        <td>{name}</td>
                                        <td>{category}</td>
                                        <td>{points}</td>
                                        <td class="catalog-table__actions">
                                            <button
                                                class="btn"
                                                title="Edit"
                                                on:click=move |_| dialog.set(FormDialog::Edit(app.clone()))
                                            >
                                                "Edit"
                                            </button>
                                            <button class="btn btn--danger" title="Delete" on:click=move |_| on_delete.run(id)>
                                                "Delete"
                                            </button>
                                        </td>
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </main>

            {move || {
                let current = dialog.get();
                current.is_open().then(|| {
                    view! { <AppFormModal initial=current.initial() on_close=on_form_close on_saved=on_saved/> }
                })
            }}
            <Show when=move || show_approvals.get()>
                <ScreenshotApprovalModal on_close=Callback::new(move |()| show_approvals.set(false))/>
            </Show>
        </div>
    }
}
