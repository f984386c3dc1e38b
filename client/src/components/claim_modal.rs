//! Modal for claiming points by uploading proof-of-install screenshots.
//!
//! SYSTEM CONTEXT
//! ==============
//! Opened from the user dashboard. Fetches its own claimable list on mount
//! and drops an app locally once its screenshot is accepted for review.

#[cfg(test)]
#[path = "claim_modal_test.rs"]
mod claim_modal_test;

use leptos::prelude::*;

use crate::net::form::Upload;
use crate::session::PortalSession;
use crate::state::catalog::CatalogState;
use crate::util::browser::selected_file;

/// Largest accepted screenshot, in bytes.
pub const MAX_SCREENSHOT_BYTES: u64 = 5 * 1024 * 1024;

pub const FETCH_FAILED: &str = "Failed to fetch pending tasks";
pub const SUBMIT_FAILED: &str = "Failed to submit task. Please try again.";
pub const SUBMITTED: &str = "Task submitted successfully!";

/// Reject screenshots over [`MAX_SCREENSHOT_BYTES`].
///
/// # Errors
///
/// Returns the user-facing size message.
pub fn validate_screenshot(size: u64) -> Result<(), &'static str> {
    if size > MAX_SCREENSHOT_BYTES {
        return Err("Screenshot size should be less than 5MB");
    }
    Ok(())
}

/// Both an app and a screenshot must be chosen before submitting.
///
/// # Errors
///
/// Returns the user-facing message when either is missing.
pub fn validate_claim(app_id: Option<i64>, screenshot: Option<Upload>) -> Result<(i64, Upload), &'static str> {
    match (app_id, screenshot) {
        (Some(id), Some(upload)) => Ok((id, upload)),
        _ => Err("Please select a task and upload a screenshot"),
    }
}

#[component]
pub fn ClaimModal(on_close: Callback<()>) -> impl IntoView {
    let session = expect_context::<PortalSession>();
    let catalog = RwSignal::new(CatalogState { loading: true, ..CatalogState::default() });
    let selected = RwSignal::new(None::<i64>);
    let screenshot = RwSignal::new_local(None::<Upload>);
    let message = RwSignal::new(None::<String>);
    let submitting = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        use crate::net::api::PortalApi;

        let session = session.clone();
        leptos::task::spawn_local(async move {
            let result = session.api().available_apps().await;
            catalog.try_update(|c| c.apply(result, FETCH_FAILED));
        });
    }

    let on_select = move |id: i64| {
        selected.set(Some(id));
        screenshot.set(None);
        message.set(None);
    };

    let on_file = move |ev: leptos::ev::Event| {
        let Some(upload) = selected_file(&ev) else {
            return;
        };
        match validate_screenshot(upload.size) {
            Ok(()) => {
                screenshot.set(Some(upload));
                message.set(None);
            }
            Err(msg) => message.set(Some(msg.to_owned())),
        }
    };

    let on_submit = Callback::new(move |()| {
        if submitting.get_untracked() {
            return;
        }
        let (app_id, upload) = match validate_claim(selected.get_untracked(), screenshot.get_untracked()) {
            Ok(claim) => claim,
            Err(msg) => {
                message.set(Some(msg.to_owned()));
                return;
            }
        };
        submitting.set(true);

        #[cfg(feature = "hydrate")]
        {
            use crate::net::api::PortalApi;

            let session = session.clone();
            leptos::task::spawn_local(async move {
                match session.api().submit_task(app_id, &upload).await {
                    Ok(()) => {
                        catalog.try_update(|c| c.remove(app_id));
                        selected.try_set(None);
                        screenshot.try_set(None);
                        message.try_set(Some(SUBMITTED.to_owned()));
                        gloo_timers::future::sleep(std::time::Duration::from_secs(3)).await;
                        message.try_set(None);
                    }
                    Err(err) => {
                        leptos::logging::warn!("task submission failed: {err}");
                        message.try_set(Some(SUBMIT_FAILED.to_owned()));
                    }
                }
                submitting.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, app_id, upload);
            submitting.set(false);
        }
    });

    let selected_name = move || {
        selected
            .get()
            .and_then(|id| catalog.with(|c| c.find(id).map(|a| a.name.clone())))
            .unwrap_or_default()
    };
    let can_submit = move || !submitting.get() && screenshot.with(Option::is_some);

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog--claim" on:click=move |ev| ev.stop_propagation()>
                <button class="dialog__close" on:click=move |_| on_close.run(()) title="Close">"×"</button>
                <h2>"Select the App and upload screenshot to Claim Your Points"</h2>

                <Show when=move || message.get().is_some()>
                    <p class="dialog__message">{move || message.get().unwrap_or_default()}</p>
                </Show>

                {move || {
                    let state = catalog.get();
                    if state.loading {
                        return view! { <p class="dialog__empty">"Loading tasks..."</p> }.into_any();
                    }
                    if let Some(err) = state.error {
                        return view! { <p class="dialog__error">{err}</p> }.into_any();
                    }
                    if state.apps.is_empty() {
                        return view! { <p class="dialog__empty">"No pending tasks available."</p> }.into_any();
                    }
                    state
                        .apps
                        .into_iter()
                        .map(|app| {
                            let id = app.id;
                            view! {
                                <div
                                    class="claim-card"
                                    class=("claim-card--selected", move || selected.get() == Some(id))
                                    on:click=move |_| on_select(id)
                                >
                                    {app.app_icon.map(|src| view! { <img class="claim-card__icon" src=src alt=app.name.clone()/> })}
                                    <p class="claim-card__name">{app.name.clone()}</p>
                                    <p class="claim-card__points">{format!("{} Points", app.points_value)}</p>
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}

                <Show when=move || selected.get().is_some()>
                    <div class="dialog__section">
                        <p>"Selected: " {selected_name}</p>
                        <label class="dialog__label">
                            "Upload Screenshot"
                            <input class="dialog__input" type="file" accept="image/*" on:change=on_file/>
                        </label>
                        <button
                            class="btn btn--primary"
                            disabled=move || !can_submit()
                            on:click=move |_| on_submit.run(())
                        >
                            {move || if submitting.get() { "Submitting..." } else { "Submit Task" }}
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}
