//! Newsletter subscription route handler.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::services::NewsletterError;
use crate::services::newsletter::{self, SUBSCRIBED_MESSAGE};
use crate::state::AppState;

const INVALID_EMAIL: &str = "Invalid email address";

/// Successful subscription response.
#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    pub success: bool,
    pub message: &'static str,
}

/// `POST /api/newsletter/subscribe`
///
/// The body is read as loose JSON so a missing, non-string, or unparsable
/// `email` is reported as a validation failure on that field.
#[instrument(skip_all)]
pub async fn subscribe(
    State(state): State<AppState>,
    body: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<SubscribeResponse>> {
    let raw = match &body {
        Ok(Json(value)) => match value.get("email") {
            Some(Value::String(email)) => email.as_str(),
            Some(_) => return Err(invalid_email("email must be a string")),
            None => return Err(invalid_email("email is required")),
        },
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Rejected newsletter body");
            return Err(invalid_email("email is required"));
        }
    };

    match newsletter::subscribe(state.mailing_list(), raw).await {
        Ok(_) => Ok(Json(SubscribeResponse {
            success: true,
            message: SUBSCRIBED_MESSAGE,
        })),
        Err(NewsletterError::InvalidEmail(e)) => Err(invalid_email(e.to_string())),
        Err(e @ NewsletterError::MailingList(_)) => Err(AppError::Internal(e.to_string())),
    }
}

fn invalid_email(reason: impl Into<String>) -> AppError {
    AppError::invalid_field("email", INVALID_EMAIL, reason)
}
