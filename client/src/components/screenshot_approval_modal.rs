//! Admin review queue for submitted screenshots.

#[cfg(test)]
#[path = "screenshot_approval_modal_test.rs"]
mod screenshot_approval_modal_test;

use leptos::prelude::*;

use crate::components::toaster::notify;
use crate::net::api::PortalApi;
use crate::net::error::ApiError;
use crate::net::types::{SubmittedTask, TaskStatus};
use crate::session::PortalSession;
use crate::state::toast::{ToastKind, ToastState};

pub const FETCH_FAILED: &str = "Failed to fetch submitted tasks";
pub const UPDATE_FAILED: &str = "Failed to update task status";

/// Toast text after a successful review, e.g. "Task approved successfully".
#[must_use]
pub fn status_toast(status: TaskStatus) -> String {
    format!("Task {} successfully", status.as_str().to_lowercase())
}

/// Submission time in the browser's locale. Off the browser the timestamp
/// is shown as received.
#[must_use]
pub fn submitted_label(raw: &str) -> String {
    #[cfg(feature = "hydrate")]
    {
        let date = js_sys::Date::new(&wasm_bindgen::JsValue::from_str(raw));
        if date.get_time().is_nan() {
            return raw.to_owned();
        }
        String::from(date.to_locale_string("default", &wasm_bindgen::JsValue::UNDEFINED))
    }
    #[cfg(not(feature = "hydrate"))]
    {
        raw.to_owned()
    }
}

/// Record a decision for `task_id` and return the re-fetched queue.
///
/// # Errors
///
/// Returns the first failing call's [`ApiError`].
pub async fn review_and_reload<A: PortalApi + ?Sized>(
    api: &A,
    task_id: i64,
    status: TaskStatus,
) -> Result<Vec<SubmittedTask>, ApiError> {
    api.update_task_status(task_id, status).await?;
    api.submitted_tasks().await
}

#[component]
pub fn ScreenshotApprovalModal(on_close: Callback<()>) -> impl IntoView {
    let session = expect_context::<PortalSession>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let tasks = RwSignal::new(Vec::<SubmittedTask>::new());
    let loading = RwSignal::new(true);

    #[cfg(feature = "hydrate")]
    {
        let session = session.clone();
        leptos::task::spawn_local(async move {
            match session.api().submitted_tasks().await {
                Ok(list) => {
                    tasks.try_set(list);
                }
                Err(err) => {
                    leptos::logging::warn!("submitted tasks fetch failed: {err}");
                    notify(toasts, ToastKind::Error, FETCH_FAILED);
                }
            }
            loading.try_set(false);
        });
    }

    let review = move |task_id: i64, status: TaskStatus| {
        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            leptos::task::spawn_local(async move {
                match review_and_reload(session.api(), task_id, status).await {
                    Ok(list) => {
                        notify(toasts, ToastKind::Success, status_toast(status));
                        tasks.try_set(list);
                    }
                    Err(err) => {
                        leptos::logging::warn!("task {task_id} review failed: {err}");
                        notify(toasts, ToastKind::Error, UPDATE_FAILED);
                    }
                }
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, task_id, status, toasts);
        }
    };
    let review = Callback::new(move |(task_id, status): (i64, TaskStatus)| review(task_id, status));

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog--approvals" on:click=move |ev| ev.stop_propagation()>
                <div class="dialog__header">
                    <h2>"Screenshot Approvals"</h2>
                    <button class="dialog__close" on:click=move |_| on_close.run(()) title="Close">"×"</button>
                </div>
                {move || {
                    if loading.get() {
                        return view! { <p class="dialog__empty">"Loading..."</p> }.into_any();
                    }
                    let list = tasks.get();
                    if list.is_empty() {
                        return view! { <p class="dialog__empty">"No pending screenshots"</p> }.into_any();
                    }
                    list.into_iter()
                        .map(|task| {
                            let id = task.id;
                            view! {
                                <div class="approval">
                                    <div class="approval__row">
                                        <div>
                                            <p class="approval__app">{task.app.name.clone()}</p>
                                            <p class="approval__user">
                                                "Submitted by: " {task.user_first_name.clone().unwrap_or_default()}
                                            </p>
                                            {task.submitted_at.as_deref().map(|at| view! {
                                                <p class="approval__time">"Submitted: " {submitted_label(at)}</p>
                                            })}
                                        </div>
                                        <div class="approval__actions">
                                            <button
                                                class="btn btn--primary"
                                                on:click=move |_| review.run((id, TaskStatus::Approved))
                                            >
                                                "Accept"
                                            </button>
                                            <button
                                                class="btn btn--danger"
                                                on:click=move |_| review.run((id, TaskStatus::Rejected))
                                            >
                                                "Reject"
                                            </button>
                                        </div>
                                    </div>
                                    {task.screenshot.map(|src| view! { <img class="approval__screenshot" src=src alt="Task Screenshot"/> })}
                                </div>
                            }
                        })
                        .collect::<Vec<_>>()
                        .into_any()
                }}
            </div>
        </div>
    }
}
