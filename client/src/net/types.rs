//! Wire DTOs for the portal backend REST API.
//!
//! DESIGN
//! ======
//! These types mirror the backend's JSON payloads so serde round-trips stay
//! lossless. Numeric identifiers are accepted as either JSON numbers or
//! strings because the backend is not consistent about it across endpoints.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/login/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Body of `POST /api/register/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
    pub password2: String,
}

/// Successful login payload. Persisted verbatim under the `tokens` key.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Short-lived access token.
    pub access: String,
    /// Longer-lived refresh token.
    pub refresh: String,
    #[serde(deserialize_with = "deserialize_id_string")]
    pub user_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    /// Response body exactly as received. Stored under `tokens` when present
    /// so fields the struct does not model survive.
    #[serde(skip)]
    pub raw: Option<String>,
}

impl LoginResponse {
    /// Parse a login response body, keeping the body itself.
    ///
    /// # Errors
    /// Returns the serde error when the body is not a login payload.
    pub fn from_body(body: &str) -> Result<Self, serde_json::Error> {
        let mut login: Self = serde_json::from_str(body)?;
        login.raw = Some(body.to_owned());
        Ok(login)
    }
}

/// Access/refresh pair returned by `POST /api/token/refresh/`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Catalog category choices accepted by the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppCategory {
    Games,
    Productivity,
    Social,
    Utility,
    #[default]
    Other,
}

impl AppCategory {
    pub const ALL: [AppCategory; 5] = [Self::Games, Self::Productivity, Self::Social, Self::Utility, Self::Other];

    /// Wire value (e.g. `"GAMES"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Games => "GAMES",
            Self::Productivity => "PRODUCTIVITY",
            Self::Social => "SOCIAL",
            Self::Utility => "UTILITY",
            Self::Other => "OTHER",
        }
    }

    /// Human-readable label for selects and tables.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Games => "Games",
            Self::Productivity => "Productivity",
            Self::Social => "Social Media",
            Self::Utility => "Utility",
            Self::Other => "Other",
        }
    }

    /// Parse a wire value, falling back to `Other` for anything unknown.
    #[must_use]
    pub fn from_wire(raw: &str) -> Self {
        Self::ALL.into_iter().find(|c| c.as_str() == raw).unwrap_or_default()
    }
}

/// An app in the catalog (admin view) or the claimable list (user view).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CatalogApp {
    #[serde(deserialize_with = "deserialize_id_i64")]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(deserialize_with = "deserialize_id_i64")]
    pub points_value: i64,
    #[serde(default)]
    pub category: AppCategory,
    /// Absolute URL of the uploaded icon, if any.
    #[serde(default)]
    pub app_icon: Option<String>,
    #[serde(default)]
    pub playstore_link: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Review state of a screenshot submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Pending,
    Approved,
    Rejected,
}

impl TaskStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
        }
    }
}

/// A submitted screenshot awaiting admin review.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SubmittedTask {
    #[serde(deserialize_with = "deserialize_id_i64")]
    pub id: i64,
    pub app: TaskApp,
    #[serde(default)]
    pub user_first_name: Option<String>,
    /// Absolute URL of the uploaded screenshot.
    #[serde(default)]
    pub screenshot: Option<String>,
    #[serde(default)]
    pub status: Option<TaskStatus>,
    /// ISO-8601 submission time.
    #[serde(default)]
    pub submitted_at: Option<String>,
}

/// Nested app summary inside task and accepted-app payloads.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskApp {
    pub name: String,
    #[serde(default)]
    pub app_icon: Option<String>,
}

/// An approved task and the points it earned.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AcceptedApp {
    #[serde(deserialize_with = "deserialize_id_i64")]
    pub id: i64,
    pub app: TaskApp,
    #[serde(deserialize_with = "deserialize_id_i64")]
    pub points_earned: i64,
}

/// Accept either a JSON string or an integer and normalize to `String`.
pub(crate) fn deserialize_id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Err(D::Error::custom("expected string or number id")),
    }
}

/// Accept either an integer or a numeric string and normalize to `i64`.
fn deserialize_id_i64<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => n.as_i64().ok_or_else(|| D::Error::custom("expected integer")),
        serde_json::Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| D::Error::custom(format!("expected integer string, got {s:?}"))),
        _ => Err(D::Error::custom("expected integer")),
    }
}
