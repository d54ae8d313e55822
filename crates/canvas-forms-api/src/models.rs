//! API Models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Key the form identifier travels under in a submission body
pub const FORM_IDENTIFIER_KEY: &str = "formIdentifier";

/// Submission as received, before it is stored
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub form_identifier: String,
    pub form_data: serde_json::Map<String, serde_json::Value>,
}

/// Stored submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSubmission {
    pub id: Uuid,
    pub form_identifier: String,
    pub form_data: serde_json::Map<String, serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl StoredSubmission {
    pub fn create(submission: NewSubmission) -> Self {
        Self {
            id: Uuid::new_v4(),
            form_identifier: submission.form_identifier,
            form_data: submission.form_data,
            created_at: Utc::now(),
        }
    }
}

/// `{ "message", "data"?, "error"? }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MessageResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            error: None,
        }
    }

    pub fn with_data(message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn with_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            error: Some(error.into()),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when the repository cannot be read
    pub status: String,
    pub version: String,
    /// Stored submissions across all forms, absent when degraded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submissions: Option<usize>,
    pub checked_at: DateTime<Utc>,
}
