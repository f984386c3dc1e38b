//! Add/edit dialog for catalog apps.
//!
//! DESIGN
//! ======
//! The form lives in a local (non-`Send`) signal because a chosen icon holds
//! a browser `File`. Saving re-fetches the catalog and hands the fresh list
//! to the parent.

#[cfg(test)]
#[path = "app_form_modal_test.rs"]
mod app_form_modal_test;

use leptos::prelude::*;

use crate::components::toaster::notify;
use crate::net::form::AppForm;
use crate::net::types::{AppCategory, CatalogApp};
use crate::session::PortalSession;
use crate::state::toast::{ToastKind, ToastState};
use crate::util::browser::selected_file;

pub const SAVE_FAILED: &str = "Submission failed";

#[must_use]
pub fn save_toast(editing: bool) -> &'static str {
    if editing { "App updated successfully" } else { "App added successfully" }
}

/// Points input value; anything unparsable becomes 0 and fails validation.
#[must_use]
pub fn parse_points(raw: &str) -> i64 {
    raw.trim().parse().unwrap_or(0)
}

#[component]
pub fn AppFormModal(
    initial: Option<CatalogApp>,
    on_close: Callback<()>,
    on_saved: Callback<Vec<CatalogApp>>,
) -> impl IntoView {
    let session = expect_context::<PortalSession>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let form = RwSignal::new_local(initial.as_ref().map_or_else(AppForm::default, AppForm::from_app));
    let editing = form.with_untracked(AppForm::is_editing);
    let busy = RwSignal::new(false);

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        if let Err(msg) = current.validate() {
            notify(toasts, ToastKind::Error, msg);
            return;
        }
        busy.set(true);

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            leptos::task::spawn_local(async move {
                match crate::state::catalog::save_and_reload(session.api(), &current).await {
                    Ok(apps) => {
                        notify(toasts, ToastKind::Success, save_toast(current.is_editing()));
                        on_saved.run(apps);
                        on_close.run(());
                    }
                    Err(err) => {
                        leptos::logging::warn!("app save failed: {err}");
                        notify(toasts, ToastKind::Error, err.user_message(SAVE_FAILED));
                    }
                }
                busy.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, current, on_saved);
            busy.set(false);
        }
    };

    let on_icon = move |ev: leptos::ev::Event| {
        if let Some(upload) = selected_file(&ev) {
            form.update(|f| f.icon = Some(upload));
        }
    };

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog--app-form" on:click=move |ev| ev.stop_propagation()>
                <h2>{if editing { "Edit App" } else { "Add New App" }}</h2>
                <form class="dialog__form" on:submit=submit>
                    <label class="dialog__label">
                        "Name"
                        <input
                            class="dialog__input"
                            type="text"
                            required
                            prop:value=move || form.with(|f| f.name.clone())
                            on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                        />
                    </label>
                    <label class="dialog__label">
                        "Description"
                        <textarea
                            class="dialog__input"
                            rows="3"
                            prop:value=move || form.with(|f| f.description.clone())
                            on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                        ></textarea>
                    </label>
                    <label class="dialog__label">
                        "Package Name"
                        <input
                            class="dialog__input"
                            type="text"
                            required
                            prop:value=move || form.with(|f| f.package_name.clone())
                            on:input=move |ev| form.update(|f| f.package_name = event_target_value(&ev))
                        />
                    </label>
                    <label class="dialog__label">
                        "Points"
                        <input
                            class="dialog__input"
                            type="number"
                            min="1"
                            prop:value=move || form.with(|f| f.points_value.to_string())
                            on:input=move |ev| form.update(|f| f.points_value = parse_points(&event_target_value(&ev)))
                        />
                    </label>
                    <label class="dialog__label">
                        "Category"
                        <select
                            class="dialog__input"
                            prop:value=move || form.with(|f| f.category.as_str())
                            on:change=move |ev| {
                                form.update(|f| f.category = AppCategory::from_wire(&event_target_value(&ev)));
                            }
                        >
                            {AppCategory::ALL
                                .into_iter()
                                .map(|c| view! { <option value=c.as_str()>{c.label()}</option> })
                                .collect::<Vec<_>>()}
                        </select>
                    </label>
                    <label class="dialog__label">
                        "App Icon"
                        <input class="dialog__input" type="file" accept="image/*" on:change=on_icon/>
                    </label>
                    <Show when=move || form.with(|f| f.icon.is_some())>
                        <p class="dialog__hint">
                            "Selected: "
                            {move || form.with(|f| f.icon.as_ref().map(|i| i.name.clone()).unwrap_or_default())}
                        </p>
                    </Show>
                    <label class="dialog__label">
                        "Play Store Link"
                        <input
                            class="dialog__input"
                            type="url"
                            placeholder="https://play.google.com/store/apps/details?id=..."
                            prop:value=move || form.with(|f| f.playstore_link.clone())
                            on:input=move |ev| form.update(|f| f.playstore_link = event_target_value(&ev))
                        />
                    </label>
                    <label class="dialog__checkbox">
                        <input
                            type="checkbox"
                            prop:checked=move || form.with(|f| f.is_active)
                            on:change=move |ev| form.update(|f| f.is_active = event_target_checked(&ev))
                        />
                        "Active App"
                    </label>
                    <div class="dialog__actions">
                        <button class="btn btn--primary" type="submit" disabled=move || busy.get()>
                            {if editing { "Update App" } else { "Add App" }}
                        </button>
                        <button class="btn" type="button" on:click=move |_| on_close.run(())>"Cancel"</button>
                    </div>
                </form>
            </div>
        </div>
    }
}
