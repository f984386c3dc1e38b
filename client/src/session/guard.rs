//! Session guard: decides whether the stored tokens describe a live session.
//!
//! ARCHITECTURE
//! ============
//! `SessionManager` owns the token store, the auth transport, and a clock.
//! Gates receive it through Leptos context instead of touching browser
//! storage directly, which keeps the decision tree testable off-browser.
//!
//! ```text
//! access token? --no--> Unauthenticated
//!      | yes
//! decode claims --err--> SessionError::Decode
//!      |
//! exp > now? --yes--> Authenticated(claims)
//!      | no
//! refresh token? --no--> Unauthenticated
//!      | yes
//! POST refresh --ok--> store pair, Authenticated(new claims)
//!      | err
//! clear storage, Unauthenticated
//! ```
//!
//! Each check is independent: no caching between checks, no de-duplication
//! of concurrent checks, and exactly one refresh attempt.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use leptos::logging::{log, warn};

use super::codec::{Claims, DecodeError, decode_claims};
use super::store::{Storage, TokenStore};
use crate::net::error::ApiError;
use crate::net::types::{Credentials, LoginResponse, TokenPair};

/// Token-exchange operations the guard depends on.
///
/// Futures are not `Send` because browser fetch futures are not.
#[async_trait::async_trait(?Send)]
pub trait AuthApi {
    /// Exchange credentials for a login payload.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network failure or rejection.
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError>;

    /// Exchange a refresh token for a new access/refresh pair.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on network failure or rejection.
    async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, ApiError>;
}

/// Wall-clock source in seconds since the Unix epoch.
pub trait Clock {
    fn now_secs(&self) -> f64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> f64 {
        #[cfg(feature = "hydrate")]
        {
            js_sys::Date::now() / 1000.0
        }
        #[cfg(not(feature = "hydrate"))]
        {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0.0, |d| d.as_secs_f64())
        }
    }
}

/// Identity derived from access-token claims. Advisory only.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub is_admin: bool,
    pub is_active: bool,
    pub is_staff: bool,
    pub date_joined: Option<String>,
    pub is_authenticated: bool,
}

impl From<Claims> for Session {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            first_name: claims.first_name,
            last_name: claims.last_name,
            is_admin: claims.is_admin,
            is_active: claims.is_active,
            is_staff: claims.is_staff,
            date_joined: claims.date_joined,
            is_authenticated: true,
        }
    }
}

/// Outcome of one session check.
#[derive(Clone, Debug, PartialEq)]
pub enum AuthStatus {
    Authenticated(Session),
    Unauthenticated,
}

impl AuthStatus {
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Unauthenticated => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("stored access token is unreadable: {0}")]
    Decode(#[from] DecodeError),
}

/// Owner of session token state.
#[derive(Clone, Debug)]
pub struct SessionManager<S, A, C = SystemClock> {
    store: TokenStore<S>,
    api: A,
    clock: C,
}

impl<S: Storage, A: AuthApi, C: Clock> SessionManager<S, A, C> {
    pub fn new(storage: S, api: A, clock: C) -> Self {
        Self { store: TokenStore::new(storage), api, clock }
    }

    pub fn store(&self) -> &TokenStore<S> {
        &self.store
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run the full check, refreshing once if the access token has expired.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Decode`] if the stored access token cannot be
    /// decoded. Callers treat that as unauthenticated.
    pub async fn check_session(&self) -> Result<AuthStatus, SessionError> {
        let Some(access) = self.store.access() else {
            return Ok(AuthStatus::Unauthenticated);
        };
        let claims = decode_claims(&access)?;
        if !claims.is_expired(self.clock.now_secs()) {
            return Ok(AuthStatus::Authenticated(claims.into()));
        }
        Ok(self.refresh().await)
    }

    /// [`Self::check_session`] with decode errors folded into `Unauthenticated`.
    pub async fn get_session(&self) -> AuthStatus {
        match self.check_session().await {
            Ok(status) => status,
            Err(e) => {
                warn!("session check failed: {e}");
                AuthStatus::Unauthenticated
            }
        }
    }

    /// Exchange the stored refresh token for a new pair.
    ///
    /// Any failure clears all stored session data.
    pub async fn refresh(&self) -> AuthStatus {
        let Some(refresh_token) = self.store.refresh() else {
            return AuthStatus::Unauthenticated;
        };
        let pair = match self.api.refresh(&refresh_token).await {
            Ok(pair) => pair,
            Err(e) => {
                warn!("token refresh failed: {e}");
                self.store.clear();
                return AuthStatus::Unauthenticated;
            }
        };
        match decode_claims(&pair.access) {
            Ok(claims) => {
                self.store.store_pair(&pair);
                log!("access token refreshed for user {}", claims.user_id);
                AuthStatus::Authenticated(claims.into())
            }
            Err(e) => {
                warn!("refreshed access token unreadable: {e}");
                self.store.clear();
                AuthStatus::Unauthenticated
            }
        }
    }

    /// Log in and persist the full payload plus both tokens.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged; storage is untouched on failure.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let login = self.api.login(credentials).await?;
        self.store.store_login(&login);
        Ok(login)
    }

    pub fn logout(&self) {
        self.store.clear();
    }

    /// `is_admin` as recorded at login time, not re-derived from claims.
    pub fn stored_is_admin(&self) -> bool {
        self.store.login_payload().is_some_and(|login| login.is_admin)
    }
}
