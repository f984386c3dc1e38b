//! REST client for the portal backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): every call returns [`ApiError::Unavailable`] since
//! these endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics so fetch failures degrade
//! to a toast or inline message without crashing hydration.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::error::ApiError;
#[cfg(feature = "hydrate")]
use super::error::ErrorBody;
use super::form::{AppForm, Multipart, Upload, task_submission};
use super::types::{
    AcceptedApp, CatalogApp, Credentials, LoginResponse, Registration, SubmittedTask, TaskStatus, TokenPair,
};
use crate::session::guard::AuthApi;
use crate::session::store::{BrowserStorage, TokenStore};

pub const DEFAULT_API_ORIGIN: &str = "http://127.0.0.1:8000";
pub const API_ORIGIN_META: &str = "api-origin";

pub(crate) const LOGIN_PATH: &str = "/api/login/";
pub(crate) const REGISTER_PATH: &str = "/api/register/";
pub(crate) const REFRESH_PATH: &str = "/api/token/refresh/";
pub(crate) const CATALOG_PATH: &str = "/apps/";
pub(crate) const UPLOAD_PATH: &str = "/apps/upload/";
pub(crate) const AVAILABLE_PATH: &str = "/apps/available/";
pub(crate) const SUBMIT_TASK_PATH: &str = "/apps/tasks/submit/";
pub(crate) const SUBMITTED_TASKS_PATH: &str = "/apps/tasks/submitted/";
pub(crate) const ACCEPTED_PATH: &str = "/apps/user/apps/accepted/";

pub(crate) fn app_update_path(id: i64) -> String {
    format!("/apps/{id}/update/")
}

pub(crate) fn app_delete_path(id: i64) -> String {
    format!("/apps/{id}/delete/")
}

pub(crate) fn task_status_path(id: i64) -> String {
    format!("/apps/tasks/{id}/update-status/")
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(access: &str) -> String {
    format!("Bearer {access}")
}

fn decode<T: DeserializeOwned>(raw: &str) -> Result<T, ApiError> {
    serde_json::from_str(raw).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Backend location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    origin: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_ORIGIN)
    }
}

impl ApiConfig {
    #[must_use]
    pub fn new(origin: &str) -> Self {
        let origin = origin.trim().trim_end_matches('/');
        if origin.is_empty() {
            return Self { origin: DEFAULT_API_ORIGIN.to_owned() };
        }
        Self { origin: origin.to_owned() }
    }

    /// Read the origin from the `<meta name="api-origin">` tag the host
    /// renders into the shell, falling back to the default.
    #[must_use]
    pub fn from_document() -> Self {
        #[cfg(feature = "hydrate")]
        {
            let origin = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|doc| doc.query_selector(&format!("meta[name=\"{API_ORIGIN_META}\"]")).ok().flatten())
                .and_then(|el| el.get_attribute("content"));
            origin.map_or_else(Self::default, |o| Self::new(&o))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Self::default()
        }
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.origin)
    }
}

/// Operations behind the app catalog, task, and registration views.
#[async_trait::async_trait(?Send)]
pub trait PortalApi {
    /// # Errors
    /// Field-level rejections come back as [`ApiError::Rejected`].
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;
    /// # Errors
    /// Returns [`ApiError`] on transport failure or rejection.
    async fn list_catalog(&self) -> Result<Vec<CatalogApp>, ApiError>;
    /// # Errors
    /// Returns [`ApiError`] on transport failure or rejection.
    async fn upload_app(&self, form: &AppForm) -> Result<(), ApiError>;
    /// # Errors
    /// Returns [`ApiError`] on transport failure or rejection.
    async fn update_app(&self, id: i64, form: &AppForm) -> Result<(), ApiError>;
    /// # Errors
    /// Returns [`ApiError`] on transport failure or rejection.
    async fn delete_app(&self, id: i64) -> Result<(), ApiError>;
    /// # Errors
    /// Returns [`ApiError`] on transport failure or rejection.
    async fn available_apps(&self) -> Result<Vec<CatalogApp>, ApiError>;
    /// # Errors
    /// Returns [`ApiError`] on transport failure or rejection.
    async fn submit_task(&self, app_id: i64, screenshot: &Upload) -> Result<(), ApiError>;
    /// # Errors
    /// Returns [`ApiError`] on transport failure or rejection.
    async fn submitted_tasks(&self) -> Result<Vec<SubmittedTask>, ApiError>;
    /// # Errors
    /// Returns [`ApiError`] on transport failure or rejection.
    async fn update_task_status(&self, task_id: i64, status: TaskStatus) -> Result<(), ApiError>;
    /// # Errors
    /// Returns [`ApiError`] on transport failure or rejection.
    async fn accepted_apps(&self) -> Result<Vec<AcceptedApp>, ApiError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

#[cfg_attr(not(feature = "hydrate"), allow(dead_code))]
enum Body<'a> {
    Empty,
    Json(serde_json::Value),
    Multipart(Multipart<'a>),
}

fn json_body<T: Serialize>(value: &T) -> Result<Body<'static>, ApiError> {
    serde_json::to_value(value)
        .map(Body::Json)
        .map_err(|e| ApiError::Request(e.to_string()))
}

/// `gloo-net` implementation of [`AuthApi`] and [`PortalApi`].
#[derive(Clone, Debug, Default)]
pub struct HttpApi {
    config: ApiConfig,
    tokens: TokenStore<BrowserStorage>,
}

impl HttpApi {
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self { config, tokens: TokenStore::new(BrowserStorage) }
    }

    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Perform one request and return the raw success body.
    ///
    /// `authorized` attaches the stored access token; auth endpoints skip it
    /// so a stale token cannot poison a fresh login.
    async fn call(&self, method: Method, path: &str, body: Body<'_>, authorized: bool) -> Result<String, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            use gloo_net::http::Request;

            let url = self.config.url(path);
            let mut builder = match method {
                Method::Get => Request::get(&url),
                Method::Post => Request::post(&url),
                Method::Put => Request::put(&url),
                Method::Patch => Request::patch(&url),
                Method::Delete => Request::delete(&url),
            };
            if authorized {
                if let Some(access) = self.tokens.access() {
                    builder = builder.header("Authorization", &bearer(&access));
                }
            }
            let request = match body {
                Body::Empty => builder.build(),
                Body::Json(value) => builder.json(&value),
                Body::Multipart(parts) => builder.body(form_data(&parts)?),
            }
            .map_err(|e| ApiError::Request(e.to_string()))?;

            let resp = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            if !resp.ok() {
                return Err(ApiError::Rejected { status, body: ErrorBody::parse(&text) });
            }
            Ok(text)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (method, path, body, authorized, &self.tokens);
            Err(ApiError::Unavailable)
        }
    }
}

#[cfg(feature = "hydrate")]
fn form_data(parts: &Multipart<'_>) -> Result<web_sys::FormData, ApiError> {
    let to_err = |e: wasm_bindgen::JsValue| ApiError::Request(format!("{e:?}"));
    let data = web_sys::FormData::new().map_err(to_err)?;
    for (name, value) in &parts.fields {
        data.append_with_str(name, value).map_err(to_err)?;
    }
    for (name, upload) in &parts.files {
        data.append_with_blob_and_filename(name, &upload.file, &upload.name)
            .map_err(to_err)?;
    }
    Ok(data)
}

#[async_trait::async_trait(?Send)]
impl AuthApi for HttpApi {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let raw = self.call(Method::Post, LOGIN_PATH, json_body(credentials)?, false).await?;
        LoginResponse::from_body(&raw).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let body = Body::Json(serde_json::json!({ "refresh": refresh_token }));
        let raw = self.call(Method::Post, REFRESH_PATH, body, false).await?;
        decode(&raw)
    }
}

#[async_trait::async_trait(?Send)]
impl PortalApi for HttpApi {
    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.call(Method::Post, REGISTER_PATH, json_body(registration)?, false).await?;
        Ok(())
    }

    async fn list_catalog(&self) -> Result<Vec<CatalogApp>, ApiError> {
        decode(&self.call(Method::Get, CATALOG_PATH, Body::Empty, true).await?)
    }

    async fn upload_app(&self, form: &AppForm) -> Result<(), ApiError> {
        self.call(Method::Post, UPLOAD_PATH, Body::Multipart(form.multipart()), true).await?;
        Ok(())
    }

    async fn update_app(&self, id: i64, form: &AppForm) -> Result<(), ApiError> {
        self.call(Method::Put, &app_update_path(id), Body::Multipart(form.multipart()), true)
            .await?;
        Ok(())
    }

    async fn delete_app(&self, id: i64) -> Result<(), ApiError> {
        self.call(Method::Delete, &app_delete_path(id), Body::Empty, true).await?;
        Ok(())
    }

    async fn available_apps(&self) -> Result<Vec<CatalogApp>, ApiError> {
        decode(&self.call(Method::Get, AVAILABLE_PATH, Body::Empty, true).await?)
    }

    async fn submit_task(&self, app_id: i64, screenshot: &Upload) -> Result<(), ApiError> {
        let body = Body::Multipart(task_submission(app_id, screenshot));
        self.call(Method::Post, SUBMIT_TASK_PATH, body, true).await?;
        Ok(())
    }

    async fn submitted_tasks(&self) -> Result<Vec<SubmittedTask>, ApiError> {
        decode(&self.call(Method::Get, SUBMITTED_TASKS_PATH, Body::Empty, true).await?)
    }

    async fn update_task_status(&self, task_id: i64, status: TaskStatus) -> Result<(), ApiError> {
        let body = Body::Json(serde_json::json!({ "status": status.as_str() }));
        self.call(Method::Patch, &task_status_path(task_id), body, true).await?;
        Ok(())
    }

    async fn accepted_apps(&self) -> Result<Vec<AcceptedApp>, ApiError> {
        decode(&self.call(Method::Get, ACCEPTED_PATH, Body::Empty, true).await?)
    }
}
