//! Login page: email + password sign-in.
//!
//! SYSTEM CONTEXT
//! ==============
//! Mounted behind the public gate. A successful login persists the payload
//! through the session manager and navigates by the returned `is_admin`.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::net::types::Credentials;
#[cfg(feature = "hydrate")]
use crate::components::toaster::notify;
use crate::session::PortalSession;
use crate::state::toast::ToastState;
#[cfg(feature = "hydrate")]
use crate::state::toast::ToastKind;

pub const LOGIN_OK: &str = "Login successful! Redirecting...";
pub const LOGIN_FAILED: &str = "Invalid email or password";
pub const LOGIN_FAILED_TOAST: &str = "Invalid login credentials";

/// Trim the email and require both fields.
///
/// # Errors
///
/// Returns the inline message when either field is blank.
pub fn validate_login_input(email: &str, password: &str) -> Result<Credentials, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err("Enter both email and password.");
    }
    Ok(Credentials { email: email.to_owned(), password: password.to_owned() })
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<PortalSession>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = leptos_router::hooks::use_navigate();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let credentials = match validate_login_input(&email.get(), &password.get()) {
            Ok(c) => c,
            Err(msg) => {
                error.set(msg.to_owned());
                return;
            }
        };
        busy.set(true);
        error.set(String::new());

        #[cfg(feature = "hydrate")]
        {
            let session = session.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match session.login(&credentials).await {
                    Ok(login) => {
                        notify(toasts, ToastKind::Success, LOGIN_OK);
                        let to = crate::util::auth::home_route(login.is_admin);
                        navigate(to, leptos_router::NavigateOptions::default());
                    }
                    Err(err) => {
                        leptos::logging::warn!("login failed: {err}");
                        error.try_set(LOGIN_FAILED.to_owned());
                        notify(toasts, ToastKind::Error, LOGIN_FAILED_TOAST);
                    }
                }
                busy.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, &navigate, credentials, toasts);
            busy.set(false);
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Android App Download Portal"</h1>
                <p class="login-card__subtitle">"Sign in"</p>
                <Show when=move || !error.get().is_empty()>
                    <p class="login-message login-message--error">{move || error.get()}</p>
                </Show>
                <form class="login-form" on:submit=on_submit>
                    <label class="login-label">
                        "Email address"
                        <input
                            class="login-input"
                            type="email"
                            autocomplete="email"
                            required
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </label>
                    <label class="login-label">
                        "Password"
                        <input
                            class="login-input"
                            type="password"
                            autocomplete="current-password"
                            required
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                    </label>
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign in"
                    </button>
                </form>
                <p class="login-card__footer">
                    "Don't have an account? "
                    <A href="/register">"Sign up"</A>
                </p>
            </div>
        </div>
    }
}
