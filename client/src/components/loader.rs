//! Full-page spinner shown while a route gate checks the session.

use leptos::prelude::*;

#[component]
pub fn Loader() -> impl IntoView {
    view! {
        <div class="loader" role="status" aria-live="polite">
            <div class="loader__spinner"></div>
            <span class="loader__label">"Loading..."</span>
        </div>
    }
}
