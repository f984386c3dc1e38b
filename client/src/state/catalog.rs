//! App catalog state for the admin home and user dashboard.
//!
//! SYSTEM CONTEXT
//! ==============
//! The backend owns the catalog. Every mutation is followed by a re-fetch
//! rather than a local patch, except task claims, which only hide the app
//! from the local list.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use crate::net::api::PortalApi;
use crate::net::error::ApiError;
use crate::net::form::AppForm;
use crate::net::types::CatalogApp;

#[derive(Clone, Debug, Default)]
pub struct CatalogState {
    pub apps: Vec<CatalogApp>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CatalogState {
    /// Apply a fetch outcome.
    pub fn apply(&mut self, result: Result<Vec<CatalogApp>, ApiError>, fallback: &str) {
        self.loading = false;
        match result {
            Ok(apps) => {
                self.apps = apps;
                self.error = None;
            }
            Err(err) => self.error = Some(err.user_message(fallback)),
        }
    }

    /// Drop a claimed app from the local list.
    pub fn remove(&mut self, id: i64) {
        self.apps.retain(|a| a.id != id);
    }

    #[must_use]
    pub fn find(&self, id: i64) -> Option<&CatalogApp> {
        self.apps.iter().find(|a| a.id == id)
    }
}

/// Delete app `id` and return the re-fetched catalog.
///
/// # Errors
///
/// Returns the first failing call's [`ApiError`].
pub async fn delete_and_reload<A: PortalApi + ?Sized>(api: &A, id: i64) -> Result<Vec<CatalogApp>, ApiError> {
    api.delete_app(id).await?;
    api.list_catalog().await
}

/// Create or update from `form` (PUT when editing), then re-fetch.
///
/// # Errors
///
/// Returns the first failing call's [`ApiError`].
pub async fn save_and_reload<A: PortalApi + ?Sized>(api: &A, form: &AppForm) -> Result<Vec<CatalogApp>, ApiError> {
    match form.id {
        Some(id) => api.update_app(id, form).await?,
        None => api.upload_app(form).await?,
    }
    api.list_catalog().await
}
