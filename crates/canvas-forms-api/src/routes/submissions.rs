//! Form submission endpoints

use crate::models::{MessageResponse, NewSubmission, FORM_IDENTIFIER_KEY};
use crate::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use tracing::{error, info, warn};

type ApiResult = (StatusCode, Json<MessageResponse>);

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/form-submit", post(submit_form).fallback(method_not_allowed))
        .route("/form-submissions/:form_identifier", get(list_submissions))
}

fn reply(status: StatusCode, body: MessageResponse) -> ApiResult {
    (status, Json(body))
}

/// Any method but POST on the submit path
pub async fn method_not_allowed() -> ApiResult {
    reply(
        StatusCode::METHOD_NOT_ALLOWED,
        MessageResponse::message("Only POST requests allowed"),
    )
}

/// Store one submission. The body is the form identifier merged with the
/// form's field states; everything but `formIdentifier` is kept as form data.
pub async fn submit_form(
    State(state): State<Arc<AppState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> ApiResult {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected malformed submission");
            return reply(StatusCode::BAD_REQUEST, MessageResponse::message(rejection.body_text()));
        }
    };

    let serde_json::Value::Object(mut form_data) = body else {
        return reply(
            StatusCode::BAD_REQUEST,
            MessageResponse::message("Submission must be a JSON object"),
        );
    };

    let form_identifier = match form_data.remove(FORM_IDENTIFIER_KEY) {
        Some(serde_json::Value::String(id)) if !id.is_empty() => id,
        _ => {
            return reply(
                StatusCode::BAD_REQUEST,
                MessageResponse::message("Form identifier is missing"),
            )
        }
    };

    let submission = NewSubmission {
        form_identifier,
        form_data,
    };

    match state.repository.insert(submission).await {
        Ok(stored) => {
            info!(form = %stored.form_identifier, id = %stored.id, "Stored form submission");
            let data = serde_json::to_value(&stored).unwrap_or(serde_json::Value::Null);
            reply(
                StatusCode::OK,
                MessageResponse::with_data("Form submitted successfully.", data),
            )
        }
        Err(e) => {
            error!(error = %e, "Error submitting form");
            reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                MessageResponse::with_error("Error submitting form.", e.to_string()),
            )
        }
    }
}

/// Stored submissions of one form
pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
    Path(form_identifier): Path<String>,
) -> ApiResult {
    match state.repository.list(&form_identifier).await {
        Ok(submissions) => {
            let data = serde_json::to_value(&submissions).unwrap_or(serde_json::Value::Null);
            reply(
                StatusCode::OK,
                MessageResponse::with_data(format!("{} submissions", submissions.len()), data),
            )
        }
        Err(e) => {
            error!(error = %e, form = %form_identifier, "Error listing submissions");
            reply(
                StatusCode::INTERNAL_SERVER_ERROR,
                MessageResponse::with_error("Error listing submissions.", e.to_string()),
            )
        }
    }
}
