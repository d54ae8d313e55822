//! Error types for the form engine

use thiserror::Error;

/// Form engine error type
#[derive(Error, Debug)]
pub enum FormError {
    /// A required field is empty
    #[error("validation failed for {field}: {reason}")]
    Validation { field: String, reason: String },

    /// The submission endpoint answered with a non-success status
    #[error("submission rejected ({status}): {message}")]
    SubmissionRejected { status: u16, message: String },

    /// The request never produced a response (connect failure, timeout, ...)
    #[error("transport error: {0}")]
    Transport(String),

    /// A configured post-submit action could not be applied
    #[error("post-submit action failed: {0}")]
    PostSubmitAction(String),

    /// Another submission of this form has not completed yet
    #[error("a submission is already in flight")]
    SubmissionInFlight,

    /// No mounted field has this identifier
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A CMS element could not be turned into a form element
    #[error("invalid form element: {0}")]
    InvalidElement(String),

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl FormError {
    /// Message suitable for showing to the person filling in the form.
    pub fn user_message(&self) -> String {
        match self {
            FormError::SubmissionRejected { message, .. } => {
                format!("Failed to submit the form: {}", message)
            }
            FormError::Validation { field, .. } => format!("Please fill in {}", field),
            FormError::SubmissionInFlight => "The form is already being submitted.".into(),
            _ => "Error submitting form. Please try again.".into(),
        }
    }
}

/// Result type for the form engine
pub type Result<T> = std::result::Result<T, FormError>;
