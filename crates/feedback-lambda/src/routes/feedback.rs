use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};

use feedback_core::models::submission::FeedbackSubmission;
use feedback_core::validate::validate;
use feedback_mail::dispatch::DispatchOutcome;

use crate::error::ApiError;
use crate::state::AppState;

const SENT_MESSAGE: &str = "Feedback submitted and emailed";
const RECORDED_MESSAGE: &str =
    "Feedback recorded in the service log; email delivery is temporarily unavailable";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackResponse {
    pub success: bool,
    pub message: &'static str,
    pub tracking_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resend_message_id: Option<String>,
    pub sent: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub attachments_count: usize,
    pub supports_image_preview: bool,
    pub service: String,
}

/// Accept a feedback submission and email it.
///
/// `OPTIONS` answers 200 with an empty body, any other non-POST method is
/// 405. A provider failure still answers 200, with `sent: false`, after the
/// full email has been written to the log.
pub async fn submit_feedback(
    State(state): State<AppState>,
    method: Method,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    if method == Method::OPTIONS {
        return Ok(StatusCode::OK.into_response());
    }
    if method != Method::POST {
        return Err(ApiError::MethodNotAllowed);
    }

    let submission: FeedbackSubmission = serde_json::from_slice(&body?)?;
    let feedback = validate(submission)?.into_feedback();
    let email = state.renderer.render(&feedback)?;

    let category = feedback
        .type_value
        .as_deref()
        .or(feedback.display_type.as_deref());
    let outcome = state.dispatcher.dispatch(&email, category).await;

    let attachments_count = feedback.attachments.len();
    let supports_image_preview = feedback.has_attachments();
    let service = state.dispatcher.provider_name().to_string();

    let response = match outcome {
        DispatchOutcome::Sent { id } => {
            info!(
                tracking_id = %feedback.tracking_id,
                message_id = id.as_deref().unwrap_or(""),
                attachments = attachments_count,
                "feedback delivered"
            );
            FeedbackResponse {
                success: true,
                message: SENT_MESSAGE,
                tracking_id: feedback.tracking_id,
                resend_message_id: id,
                sent: true,
                error: None,
                attachments_count,
                supports_image_preview,
                service,
            }
        }
        DispatchOutcome::Failed { error } => {
            warn!(
                tracking_id = %feedback.tracking_id,
                recipients = ?state.dispatcher.recipients(),
                subject = %email.subject,
                text = %email.text,
                attachments = attachments_count,
                error = %error,
                "feedback email not sent, recorded here instead"
            );
            FeedbackResponse {
                success: true,
                message: RECORDED_MESSAGE,
                tracking_id: feedback.tracking_id,
                resend_message_id: None,
                sent: false,
                error: Some(error),
                attachments_count,
                supports_image_preview,
                service,
            }
        }
    };

    Ok(Json(response).into_response())
}
