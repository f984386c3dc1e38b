//! Shared fixtures for unit tests: token builders, a fixed clock, and an
//! in-memory backend implementing both API traits.

use std::cell::{Cell, RefCell};

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::net::api::PortalApi;
use crate::net::error::{ApiError, ErrorBody};
use crate::net::form::{AppForm, Upload};
use crate::net::types::{
    AcceptedApp, AppCategory, CatalogApp, Credentials, LoginResponse, Registration, SubmittedTask, TaskStatus,
    TokenPair,
};
use crate::session::guard::{AuthApi, Clock, SessionManager};
use crate::session::store::MemoryStorage;

pub const NOW: f64 = 1_700_000_000.0;

/// Unsigned token with `claims` as its payload.
pub fn make_token(claims: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    format!("{header}.{payload}.signature")
}

pub fn user_claims(exp: f64, is_admin: bool) -> serde_json::Value {
    serde_json::json!({
        "user_id": 5,
        "email": "ann@example.com",
        "first_name": "Ann",
        "last_name": "Lee",
        "is_admin": is_admin,
        "is_active": true,
        "is_staff": false,
        "date_joined": "2024-01-02T03:04:05Z",
        "exp": exp
    })
}

pub fn login_response(access: &str, refresh: &str, is_admin: bool) -> LoginResponse {
    LoginResponse {
        access: access.to_owned(),
        refresh: refresh.to_owned(),
        user_id: "5".to_owned(),
        email: Some("ann@example.com".to_owned()),
        first_name: Some("Ann".to_owned()),
        last_name: Some("Lee".to_owned()),
        is_admin,
        raw: None,
    }
}

pub fn catalog_app(id: i64, name: &str) -> CatalogApp {
    CatalogApp {
        id,
        name: name.to_owned(),
        description: None,
        package_name: Some(format!("com.example.{id}")),
        points_value: 10,
        category: AppCategory::Other,
        app_icon: None,
        playstore_link: None,
        is_active: true,
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn now_secs(&self) -> f64 {
        self.0
    }
}

/// In-memory stand-in for the backend.
#[derive(Default)]
pub struct MockBackend {
    pub calls: Cell<usize>,
    pub refresh_calls: RefCell<Vec<String>>,
    pub refresh_result: RefCell<Option<Result<TokenPair, ApiError>>>,
    pub login_result: RefCell<Option<Result<LoginResponse, ApiError>>>,
    pub catalog: RefCell<Vec<CatalogApp>>,
    pub tasks: RefCell<Vec<SubmittedTask>>,
    pub status_updates: RefCell<Vec<(i64, TaskStatus)>>,
    pub submissions: RefCell<Vec<(i64, String)>>,
    pub accepted: RefCell<Vec<AcceptedApp>>,
    pub fail_with: RefCell<Option<ApiError>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_refresh(result: Result<TokenPair, ApiError>) -> Self {
        let backend = Self::new();
        *backend.refresh_result.borrow_mut() = Some(result);
        backend
    }

    pub fn with_login(result: Result<LoginResponse, ApiError>) -> Self {
        let backend = Self::new();
        *backend.login_result.borrow_mut() = Some(result);
        backend
    }

    pub fn with_catalog(apps: Vec<CatalogApp>) -> Self {
        let backend = Self::new();
        *backend.catalog.borrow_mut() = apps;
        backend
    }

    fn hit(&self) -> Result<(), ApiError> {
        self.calls.set(self.calls.get() + 1);
        match self.fail_with.borrow().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

pub fn network_error() -> ApiError {
    ApiError::Network("connection refused".to_owned())
}

pub fn rejected(status: u16, body: &str) -> ApiError {
    ApiError::Rejected { status, body: ErrorBody::parse(body) }
}

#[async_trait::async_trait(?Send)]
impl AuthApi for MockBackend {
    async fn login(&self, _credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        self.calls.set(self.calls.get() + 1);
        self.login_result
            .borrow()
            .clone()
            .unwrap_or_else(|| Err(rejected(401, r#"{"detail": "No active account"}"#)))
    }

    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        self.calls.set(self.calls.get() + 1);
        self.refresh_calls.borrow_mut().push(refresh_token.to_owned());
        self.refresh_result
            .borrow()
            .clone()
            .unwrap_or_else(|| Err(network_error()))
    }
}

#[async_trait::async_trait(?Send)]
impl PortalApi for MockBackend {
    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.hit()?;
        if registration.email.ends_with("@taken.com") {
            return Err(rejected(400, r#"{"email": ["user with this email already exists."]}"#));
        }
        Ok(())
    }

    async fn list_catalog(&self) -> Result<Vec<CatalogApp>, ApiError> {
        self.hit()?;
        Ok(self.catalog.borrow().clone())
    }

    async fn upload_app(&self, form: &AppForm) -> Result<(), ApiError> {
        self.hit()?;
        let mut catalog = self.catalog.borrow_mut();
        let id = catalog.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        let mut app = catalog_app(id, &form.name);
        app.points_value = form.points_value;
        app.category = form.category;
        catalog.push(app);
        Ok(())
    }

    async fn update_app(&self, id: i64, form: &AppForm) -> Result<(), ApiError> {
        self.hit()?;
        let mut catalog = self.catalog.borrow_mut();
        let Some(app) = catalog.iter_mut().find(|a| a.id == id) else {
            return Err(rejected(404, r#"{"detail": "Not found."}"#));
        };
        app.name.clone_from(&form.name);
        app.points_value = form.points_value;
        Ok(())
    }

    async fn delete_app(&self, id: i64) -> Result<(), ApiError> {
        self.hit()?;
        let mut catalog = self.catalog.borrow_mut();
        let before = catalog.len();
        catalog.retain(|a| a.id != id);
        if catalog.len() == before {
            return Err(rejected(404, r#"{"detail": "Not found."}"#));
        }
        Ok(())
    }

    async fn available_apps(&self) -> Result<Vec<CatalogApp>, ApiError> {
        self.hit()?;
        Ok(self.catalog.borrow().iter().filter(|a| a.is_active).cloned().collect())
    }

    async fn submit_task(&self, app_id: i64, screenshot: &Upload) -> Result<(), ApiError> {
        self.hit()?;
        self.submissions.borrow_mut().push((app_id, screenshot.name.clone()));
        Ok(())
    }

    async fn submitted_tasks(&self) -> Result<Vec<SubmittedTask>, ApiError> {
        self.hit()?;
        Ok(self.tasks.borrow().clone())
    }

    async fn update_task_status(&self, task_id: i64, status: TaskStatus) -> Result<(), ApiError> {
        self.hit()?;
        self.status_updates.borrow_mut().push((task_id, status));
        self.tasks.borrow_mut().retain(|t| t.id != task_id);
        Ok(())
    }

    async fn accepted_apps(&self) -> Result<Vec<AcceptedApp>, ApiError> {
        self.hit()?;
        Ok(self.accepted.borrow().clone())
    }
}

pub type TestSession = SessionManager<MemoryStorage, MockBackend, FixedClock>;

/// Session over `storage` and `backend` with the clock frozen at [`NOW`].
pub fn test_session(storage: MemoryStorage, backend: MockBackend) -> TestSession {
    SessionManager::new(storage, backend, FixedClock(NOW))
}
