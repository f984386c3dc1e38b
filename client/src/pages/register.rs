//! Registration page.
//!
//! ERROR HANDLING
//! ==============
//! Client-side checks run first and block submission. Server rejections are
//! mapped back onto the form per field, with a toast per message.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use std::collections::BTreeMap;

use leptos::prelude::*;
use leptos_router::components::A;

use crate::components::toaster::notify;
use crate::net::error::{ApiError, ErrorBody};
use crate::net::types::Registration;
use crate::session::PortalSession;
use crate::state::toast::{ToastKind, ToastState};

pub const REGISTERED: &str = "Registration successful! Redirecting to login...";
pub const FIX_ERRORS: &str = "Please fix the form errors";
pub const NETWORK_TOAST: &str = "Unable to connect to the server. Please try again.";
pub const NETWORK_DETAIL: &str = "Network error: Unable to connect to the server";
pub const UNEXPECTED: &str = "An unexpected error occurred";

/// Delay before leaving for `/login` after a successful sign-up, in milliseconds.
pub const REDIRECT_DELAY_MS: u64 = 2000;

/// Field name to message. `detail` carries errors not tied to a field.
pub type FieldErrors = BTreeMap<String, String>;

/// Pre-submit checks; an empty map means the form may be sent.
#[must_use]
pub fn validate_registration(form: &Registration) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.password != form.password2 {
        errors.insert("password2".into(), "Passwords do not match".into());
    }
    if form.password.chars().count() < 8 {
        errors.insert("password".into(), "Password must be at least 8 characters long".into());
    }
    if !form.email.contains('@') {
        errors.insert("email".into(), "Please enter a valid email address".into());
    }
    if form.first_name.trim().is_empty() {
        errors.insert("first_name".into(), "First name is required".into());
    }
    if form.last_name.trim().is_empty() {
        errors.insert("last_name".into(), "Last name is required".into());
    }
    errors
}

/// Email trimmed and lowercased, names trimmed, passwords untouched.
#[must_use]
pub fn normalize_registration(form: &Registration) -> Registration {
    Registration {
        email: form.email.trim().to_lowercase(),
        first_name: form.first_name.trim().to_owned(),
        last_name: form.last_name.trim().to_owned(),
        password: form.password.clone(),
        password2: form.password2.clone(),
    }
}

/// Inline errors and toast lines for a failed sign-up.
#[must_use]
pub fn server_errors(err: &ApiError) -> (FieldErrors, Vec<String>) {
    match err {
        ApiError::Rejected { body, .. } => match body {
            ErrorBody::Fields(fields) => {
                let inline = fields
                    .iter()
                    .filter_map(|(key, msgs)| msgs.first().map(|m| (key.clone(), m.clone())))
                    .collect();
                (inline, body.messages())
            }
            ErrorBody::Detail(detail) if !detail.is_empty() => {
                let inline = FieldErrors::from([("detail".to_owned(), detail.clone())]);
                (inline, vec![detail.clone()])
            }
            ErrorBody::Detail(_) => unexpected(),
        },
        ApiError::Network(_) => {
            let inline = FieldErrors::from([("detail".to_owned(), NETWORK_DETAIL.to_owned())]);
            (inline, vec![NETWORK_TOAST.to_owned()])
        }
        ApiError::Decode(_) | ApiError::Request(_) | ApiError::Unavailable => unexpected(),
    }
}

fn unexpected() -> (FieldErrors, Vec<String>) {
    let inline = FieldErrors::from([("detail".to_owned(), UNEXPECTED.to_owned())]);
    (inline, vec![UNEXPECTED.to_owned()])
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    let session = expect_context::<PortalSession>();
    let toasts = expect_context::<RwSignal<ToastState>>();
    let navigate = leptos_router::hooks::use_navigate();

    let form = RwSignal::new(Registration::default());
    let errors = RwSignal::new(FieldErrors::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let current = form.get_untracked();
        let invalid = validate_registration(&current);
        if !invalid.is_empty() {
            errors.set(invalid);
            notify(toasts, ToastKind::Error, FIX_ERRORS);
            return;
        }
        errors.set(FieldErrors::new());
        busy.set(true);
        let submission = normalize_registration(&current);

        #[cfg(feature = "hydrate")]
        {
            use crate::net::api::PortalApi;

            let session = session.clone();
            let navigate = navigate.clone();
            leptos::task::spawn_local(async move {
                match session.api().register(&submission).await {
                    Ok(()) => {
                        notify(toasts, ToastKind::Success, REGISTERED);
                        gloo_timers::future::sleep(std::time::Duration::from_millis(REDIRECT_DELAY_MS)).await;
                        navigate(crate::util::auth::LOGIN_ROUTE, leptos_router::NavigateOptions::default());
                    }
                    Err(err) => {
                        leptos::logging::warn!("registration failed: {err}");
                        let (inline, lines) = server_errors(&err);
                        errors.try_set(inline);
                        for line in lines {
                            notify(toasts, ToastKind::Error, line);
                        }
                    }
                }
                busy.try_set(false);
            });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (&session, &navigate, submission);
            busy.set(false);
        }
    };

    let field_error = move |name: &'static str| move || errors.with(|e| e.get(name).cloned());

    let input = move |label: &'static str, name: &'static str, kind: &'static str, autocomplete: &'static str| {
        let error = field_error(name);
        view! {
            <label class="login-label">
                {label}
                <input
                    class="login-input"
                    class=("login-input--invalid", move || error().is_some())
                    type=kind
                    name=name
                    autocomplete=autocomplete
                    required
                    prop:value=move || form.with(|f| field_value(f, name).to_owned())
                    on:input=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|f| set_field(f, name, value));
                        errors.update(|e| {
                            e.remove(name);
                        });
                    }
                />
                {move || error().map(|msg| view! { <p class="login-message login-message--error">{msg}</p> })}
            </label>
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Android App Download Portal"</h1>
                <p class="login-card__subtitle">"Sign Up"</p>
                {move || field_error("detail")().map(|msg| view! { <p class="login-message login-message--error">{msg}</p> })}
                <form class="login-form" on:submit=on_submit>
                    {input("First Name", "first_name", "text", "given-name")}
                    {input("Last Name", "last_name", "text", "family-name")}
                    {input("Email address", "email", "email", "email")}
                    {input("Password", "password", "password", "new-password")}
                    {input("Confirm Password", "password2", "password", "new-password")}
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign Up"
                    </button>
                </form>
                <p class="login-card__footer">
                    "Already have an account? "
                    <A href="/login">"Sign in"</A>
                </p>
            </div>
        </div>
    }
}

fn field_value<'a>(form: &'a Registration, name: &str) -> &'a str {
    match name {
        "email" => &form.email,
        "first_name" => &form.first_name,
        "last_name" => &form.last_name,
        "password" => &form.password,
        "password2" => &form.password2,
        _ => "",
    }
}

fn set_field(form: &mut Registration, name: &str, value: String) {
    match name {
        "email" => form.email = value,
        "first_name" => form.first_name = value,
        "last_name" => form.last_name = value,
        "password" => form.password = value,
        "password2" => form.password2 = value,
        _ => {}
    }
}
