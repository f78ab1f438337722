use serde::{Deserialize, Deserializer, Serialize};

use super::attachment::Attachment;

/// Placeholder for optional descriptive fields the client did not send.
pub const UNKNOWN: &str = "unknown";

/// A feedback submission exactly as the mobile client posts it.
///
/// Every field is optional at this stage; [`crate::validate::validate`]
/// decides which ones are required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackSubmission {
    /// Localized display label for the feedback category.
    #[serde(rename = "type")]
    pub display_type: Option<String>,
    /// Raw category value (e.g. `bug`, `feature`).
    pub type_value: Option<String>,
    pub message: Option<String>,
    pub email: Option<String>,
    pub device_info: Option<String>,
    pub app_version: Option<String>,
    pub os_version: Option<String>,
    pub language: Option<String>,
    /// String or number; parsed leniently by the renderer.
    pub timestamp: Option<serde_json::Value>,
    /// Tracking identifier. Numbers are accepted and kept as their decimal text.
    #[serde(default, deserialize_with = "opaque_id")]
    pub id: Option<String>,
    /// Left untyped so a malformed entry drops that entry, not the request.
    pub attachments: Option<Vec<serde_json::Value>>,
}

/// A submission that passed validation, with defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feedback {
    pub display_type: Option<String>,
    pub type_value: Option<String>,
    pub message: String,
    pub email: Option<String>,
    pub device_info: String,
    pub app_version: String,
    pub os_version: String,
    pub language: String,
    pub timestamp: Option<serde_json::Value>,
    pub tracking_id: String,
    pub attachments: Vec<Attachment>,
}

impl Feedback {
    /// The category label to show a human: the display label if present,
    /// otherwise the raw value.
    pub fn category(&self) -> Option<&str> {
        self.display_type
            .as_deref()
            .or(self.type_value.as_deref())
    }

    /// Whether the email carries anything a reader could preview.
    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }
}

/// Treat `""` the same as an absent field, the way the client's JSON
/// encoder produces empty optionals.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

pub(crate) fn or_unknown(value: Option<String>) -> String {
    non_empty(value).unwrap_or_else(|| UNKNOWN.to_string())
}

fn opaque_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        String(String),
        Number(serde_json::Number),
    }

    Ok(
        Option::<StringOrNumber>::deserialize(deserializer)?.map(|id| match id {
            StringOrNumber::String(s) => s,
            StringOrNumber::Number(n) => n.to_string(),
        }),
    )
}
