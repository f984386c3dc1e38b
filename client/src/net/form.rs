//! Multipart request bodies: catalog app form and file uploads.
//!
//! DESIGN
//! ======
//! Forms are assembled into a transport-neutral [`Multipart`] so the field
//! selection rules (skip blanks, only send a newly chosen icon) are testable
//! without a browser `FormData`.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use super::types::{AppCategory, CatalogApp};

pub const DEFAULT_POINTS: i64 = 10;

/// A user-selected file.
#[derive(Clone, Debug)]
pub struct Upload {
    pub name: String,
    pub size: u64,
    #[cfg(feature = "hydrate")]
    pub file: web_sys::File,
}

impl Upload {
    #[cfg(feature = "hydrate")]
    #[must_use]
    pub fn from_file(file: web_sys::File) -> Self {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let size = file.size() as u64;
        Self { name: file.name(), size, file }
    }

    /// Metadata-only upload for server rendering and tests.
    #[cfg(not(feature = "hydrate"))]
    #[must_use]
    pub fn named(name: impl Into<String>, size: u64) -> Self {
        Self { name: name.into(), size }
    }
}

/// Text and file parts of a multipart body, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct Multipart<'a> {
    pub fields: Vec<(&'static str, String)>,
    pub files: Vec<(&'static str, &'a Upload)>,
}

impl<'a> Multipart<'a> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a text part unless `value` is blank.
    #[must_use]
    pub fn text(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        if !value.trim().is_empty() {
            self.fields.push((name, value));
        }
        self
    }

    #[must_use]
    pub fn file(mut self, name: &'static str, upload: &'a Upload) -> Self {
        self.files.push((name, upload));
        self
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.iter().find(|(n, _)| *n == name).map(|(_, v)| v.as_str())
    }
}

/// Add/edit form for a catalog app.
#[derive(Clone, Debug)]
pub struct AppForm {
    /// Set when editing an existing app.
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    pub package_name: String,
    pub points_value: i64,
    pub category: AppCategory,
    pub playstore_link: String,
    pub is_active: bool,
    /// Newly chosen icon. The existing icon is kept when `None`.
    pub icon: Option<Upload>,
}

impl Default for AppForm {
    fn default() -> Self {
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            package_name: String::new(),
            points_value: DEFAULT_POINTS,
            category: AppCategory::Other,
            playstore_link: String::new(),
            is_active: true,
            icon: None,
        }
    }
}

impl AppForm {
    /// Prefill from an existing catalog entry for editing.
    #[must_use]
    pub fn from_app(app: &CatalogApp) -> Self {
        Self {
            id: Some(app.id),
            name: app.name.clone(),
            description: app.description.clone().unwrap_or_default(),
            package_name: app.package_name.clone().unwrap_or_default(),
            points_value: app.points_value,
            category: app.category,
            playstore_link: app.playstore_link.clone().unwrap_or_default(),
            is_active: app.is_active,
            icon: None,
        }
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.id.is_some()
    }

    /// Pre-submit checks mirroring the form's `required`/`min` attributes.
    ///
    /// # Errors
    ///
    /// Returns the first user-facing validation message.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Name is required");
        }
        if self.package_name.trim().is_empty() {
            return Err("Package name is required");
        }
        if self.points_value < 1 {
            return Err("Points must be at least 1");
        }
        Ok(())
    }

    #[must_use]
    pub fn multipart(&self) -> Multipart<'_> {
        let mut body = Multipart::new()
            .text("name", self.name.as_str())
            .text("description", self.description.as_str())
            .text("package_name", self.package_name.as_str())
            .text("points_value", self.points_value.to_string())
            .text("category", self.category.as_str())
            .text("playstore_link", self.playstore_link.as_str())
            .text("is_active", if self.is_active { "true" } else { "false" });
        if let Some(icon) = &self.icon {
            body = body.file("app_icon", icon);
        }
        body
    }
}

/// Body for `POST /apps/tasks/submit/`.
#[must_use]
pub fn task_submission(app_id: i64, screenshot: &Upload) -> Multipart<'_> {
    Multipart::new()
        .text("app", app_id.to_string())
        .file("screenshot", screenshot)
}
