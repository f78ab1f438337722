use crate::error::ValidationError;
use crate::models::attachment::{normalize_attachments, Attachment};
use crate::models::submission::{non_empty, or_unknown, Feedback, FeedbackSubmission};

/// The requirement list reported back to the client on a missing field.
pub const REQUIRED_FIELDS: [&str; 3] = ["type/typeValue", "message", "id"];

/// Minimum message length, in characters, after trimming whitespace.
pub const MIN_MESSAGE_CHARS: usize = 10;

/// A submission whose required fields are present, with the attachment
/// list still in its raw form.
#[derive(Debug, Clone)]
pub struct ValidSubmission {
    feedback: Feedback,
    raw_attachments: Vec<serde_json::Value>,
}

impl ValidSubmission {
    pub fn tracking_id(&self) -> &str {
        &self.feedback.tracking_id
    }

    /// Normalize the attachments and produce the record the renderer consumes.
    pub fn into_feedback(self) -> Feedback {
        let attachments: Vec<Attachment> = normalize_attachments(self.raw_attachments);
        Feedback {
            attachments,
            ..self.feedback
        }
    }
}

/// Check the required fields and the minimum message length.
///
/// Missing fields are reported before the length check, so a submission
/// with no `id` and a short message yields [`ValidationError::MissingFields`].
pub fn validate(submission: FeedbackSubmission) -> Result<ValidSubmission, ValidationError> {
    let display_type = non_empty(submission.display_type);
    let type_value = non_empty(submission.type_value);
    let message = non_empty(submission.message);
    let id = non_empty(submission.id);

    let mut missing = Vec::new();
    if display_type.is_none() && type_value.is_none() {
        missing.push(REQUIRED_FIELDS[0]);
    }
    if message.is_none() {
        missing.push(REQUIRED_FIELDS[1]);
    }
    if id.is_none() {
        missing.push(REQUIRED_FIELDS[2]);
    }

    let (Some(message), Some(tracking_id)) = (message, id) else {
        return Err(ValidationError::MissingFields { missing });
    };
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields { missing });
    }

    let actual = message.trim().chars().count();
    if actual < MIN_MESSAGE_CHARS {
        return Err(ValidationError::MessageTooShort {
            min: MIN_MESSAGE_CHARS,
            actual,
        });
    }

    Ok(ValidSubmission {
        feedback: Feedback {
            display_type,
            type_value,
            message,
            email: non_empty(submission.email),
            device_info: or_unknown(submission.device_info),
            app_version: or_unknown(submission.app_version),
            os_version: or_unknown(submission.os_version),
            language: or_unknown(submission.language),
            timestamp: submission.timestamp,
            tracking_id,
            attachments: Vec::new(),
        },
        raw_attachments: submission.attachments.unwrap_or_default(),
    })
}
