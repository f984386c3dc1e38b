//! Browser glue for dialogs, new tabs, and file inputs.
//!
//! SYSTEM CONTEXT
//! ==============
//! These helpers centralize hydrate-only `web-sys` calls so pages and modals
//! stay free of JS interop. SSR paths no-op.

use crate::net::form::Upload;

/// Ask the user to confirm `message` with the native dialog.
///
/// Returns `false` when no window is available.
pub fn confirm(message: &str) -> bool {
    #[cfg(feature = "hydrate")]
    {
        web_sys::window()
            .and_then(|w| w.confirm_with_message(message).ok())
            .unwrap_or(false)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = message;
        false
    }
}

/// Open `url` in a new tab.
pub fn open_in_new_tab(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.open_with_url_and_target(url, "_blank");
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
    }
}

/// First file chosen in the `<input type="file">` that fired `ev`.
pub fn selected_file(ev: &leptos::ev::Event) -> Option<Upload> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast;

        let input = ev.target()?.dyn_into::<web_sys::HtmlInputElement>().ok()?;
        input.files()?.get(0).map(Upload::from_file)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = ev;
        None
    }
}
