//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Redirect, Route, Router, Routes},
};

use crate::components::gates::{PrivateGate, PublicGate};
use crate::components::toaster::Toaster;
use crate::net::api::{API_ORIGIN_META, ApiConfig};
use crate::pages::{admin_home::AdminHomePage, dashboard::DashboardPage, login::LoginPage, register::RegisterPage};
use crate::session::browser_session;
use crate::state::{auth::AuthState, toast::ToastState};
use crate::util::auth::LOGIN_ROUTE;

/// HTML shell rendered on the server for SSR + hydration.
///
/// `api_origin` is published as a meta tag so the browser build can find
/// the backend without a rebuild.
pub fn shell(options: LeptosOptions, api_origin: String) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=API_ORIGIN_META content=api_origin/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the session manager and shared state, then routes each path
/// through its gate.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    provide_context(browser_session(ApiConfig::from_document()));
    provide_context(RwSignal::new(AuthState::default()));
    provide_context(RwSignal::new(ToastState::default()));

    view! {
        <Stylesheet id="leptos" href="/pkg/portal.css"/>
        <Title text="Appdownload"/>

        <Router>
            <Toaster/>
            <Routes fallback=|| view! { <Redirect path=LOGIN_ROUTE/> }>
                <Route path=StaticSegment("login") view=|| view! { <PublicGate><LoginPage/></PublicGate> }/>
                <Route path=StaticSegment("register") view=|| view! { <PublicGate><RegisterPage/></PublicGate> }/>
                <Route path=StaticSegment("dashboard") view=|| view! { <PrivateGate><DashboardPage/></PrivateGate> }/>
                <Route
                    path=(StaticSegment("admin"), StaticSegment("home"))
                    view=|| view! { <PrivateGate><AdminHomePage/></PrivateGate> }
                />
            </Routes>
        </Router>
    }
}
