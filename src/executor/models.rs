// SPDX-License-Identifier: GPL-3.0-only
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single row as returned by the platform, keyed by field name
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Session descriptor forwarded to every remote call
#[derive(Clone, PartialEq, Eq)]
pub struct UserContext {
    /// Username (or alias) the session belongs to
    pub username: String,

    /// Base URL of the org instance, e.g. "https://acme.my.salesforce.com"
    pub instance_url: String,

    /// OAuth access token for the session
    pub access_token: String,
}

impl UserContext {
    pub fn new(username: String, instance_url: String, access_token: String) -> Self {
        Self {
            username,
            instance_url,
            access_token,
        }
    }
}

// Keep the token out of logs.
impl fmt::Debug for UserContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserContext")
            .field("username", &self.username)
            .field("instance_url", &self.instance_url)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Route the call through the tooling API instead of the data API
    pub tooling_api: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult {
    /// Total number of matches, which may exceed `records.len()` when paginated
    pub total_size: u64,

    #[serde(default)]
    pub done: bool,

    #[serde(default)]
    pub records: Vec<Record>,
}

impl QueryResult {
    #[cfg(test)]
    pub fn from_records(records: Vec<Record>) -> Self {
        Self {
            total_size: records.len() as u64,
            done: true,
            records,
        }
    }

    pub fn has_matches(&self) -> bool {
        self.total_size > 0
    }

    /// String value of `field` on the first record, if present
    pub fn first_str(&self, field: &str) -> Option<&str> {
        self.records
            .first()
            .and_then(|record| record.get(field))
            .and_then(|value| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub error_code: String,

    #[serde(default)]
    pub message: String,

    #[serde(default)]
    pub fields: Vec<String>,
}

impl fmt::Display for ApiErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_code, self.message)?;
        if !self.fields.is_empty() {
            write!(f, " [{}]", self.fields.join(", "))?;
        }
        Ok(())
    }
}

/// Outcome of a single-row insert
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertResult {
    #[serde(default)]
    pub id: Option<String>,

    pub success: bool,

    #[serde(default)]
    pub errors: Vec<ApiErrorDetail>,
}

impl InsertResult {
    #[cfg(test)]
    pub fn created(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            success: true,
            errors: Vec::new(),
        }
    }

    pub fn rejected(errors: Vec<ApiErrorDetail>) -> Self {
        Self {
            id: None,
            success: false,
            errors,
        }
    }

    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return "insert was not acknowledged by the platform".to_string();
        }
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
