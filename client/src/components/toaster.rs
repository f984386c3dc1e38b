//! Top-centre toast stack and the helper that feeds it.

use leptos::prelude::*;

use crate::state::toast::{ToastKind, ToastState};
#[cfg(feature = "hydrate")]
use crate::state::toast::TOAST_MS;

/// Show `message` and schedule its dismissal.
pub fn notify(toasts: RwSignal<ToastState>, kind: ToastKind, message: impl Into<String>) {
    let message = message.into();
    let Some(id) = toasts.try_update(|t| t.push(kind, message)) else {
        return;
    };

    #[cfg(feature = "hydrate")]
    leptos::task::spawn_local(async move {
        gloo_timers::future::sleep(std::time::Duration::from_millis(u64::from(TOAST_MS))).await;
        toasts.try_update(|t| t.dismiss(id));
    });
    #[cfg(not(feature = "hydrate"))]
    let _ = id;
}

#[component]
pub fn Toaster() -> impl IntoView {
    let toasts = expect_context::<RwSignal<ToastState>>();

    view! {
        <div class="toaster" aria-live="polite">
            <For
                each=move || toasts.get().items
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    view! {
                        <div class=toast.kind.class() on:click=move |_| toasts.update(|t| t.dismiss(id))>
                            {toast.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
