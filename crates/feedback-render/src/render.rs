use jiff::Timestamp;
use serde::Serialize;
use tera::{Context, Tera};

use feedback_core::models::submission::Feedback;

use crate::error::{describe, RenderError};
use crate::format::{format_file_size, format_submitted_at};
use crate::preview::image_src;

/// Category label used when the client sent neither `type` nor `typeValue`.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Contact line for submissions without an email address.
pub const ANONYMOUS: &str = "Anonymous";

/// Template names. The `.html` suffix turns on Tera's HTML autoescaping.
pub const HTML_TEMPLATE_NAME: &str = "feedback.html";
pub const TEXT_TEMPLATE_NAME: &str = "feedback.txt";

const HTML_TEMPLATE: &str = include_str!("../templates/feedback.html");
const TEXT_TEMPLATE: &str = include_str!("../templates/feedback.txt");

/// The three parts of an outgoing feedback email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedEmail {
    pub subject: String,
    pub html: String,
    pub text: String,
}

#[derive(Serialize)]
struct EmailContext<'a> {
    category: &'a str,
    tracking_id: &'a str,
    /// Built by `format_submitted_at`; only digits, `/`, `:` and a space.
    submitted_at: String,
    contact: &'a str,
    message: &'a str,
    app_version: &'a str,
    device_info: &'a str,
    os_version: &'a str,
    language: &'a str,
    attachments: Vec<AttachmentView<'a>>,
}

#[derive(Serialize)]
struct AttachmentView<'a> {
    file_name: &'a str,
    size: String,
    /// Pre-validated `data:` URI; emitted with `| safe`.
    image_src: Option<String>,
}

/// Renders feedback emails from a pair of compiled templates.
pub struct FeedbackRenderer {
    tera: Tera,
}

impl FeedbackRenderer {
    /// Renderer using the built-in templates.
    pub fn new() -> Result<Self, RenderError> {
        Self::with_templates(HTML_TEMPLATE, TEXT_TEMPLATE)
    }

    /// Renderer using caller-supplied HTML and text templates.
    pub fn with_templates(html: &str, text: &str) -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![(HTML_TEMPLATE_NAME, html), (TEXT_TEMPLATE_NAME, text)])
            .map_err(|e| RenderError::TemplateParse(describe(&e)))?;
        Ok(Self { tera })
    }

    pub fn render(&self, feedback: &Feedback) -> Result<RenderedEmail, RenderError> {
        self.render_at(feedback, Timestamp::now())
    }

    /// Render with an explicit "now", used when the submission timestamp is
    /// missing or unparseable.
    pub fn render_at(
        &self,
        feedback: &Feedback,
        now: Timestamp,
    ) -> Result<RenderedEmail, RenderError> {
        let category = feedback.category().unwrap_or(DEFAULT_CATEGORY);

        let ctx = EmailContext {
            category,
            tracking_id: &feedback.tracking_id,
            submitted_at: format_submitted_at(feedback.timestamp.as_ref(), now),
            contact: feedback.email.as_deref().unwrap_or(ANONYMOUS),
            message: &feedback.message,
            app_version: &feedback.app_version,
            device_info: &feedback.device_info,
            os_version: &feedback.os_version,
            language: &feedback.language,
            attachments: feedback
                .attachments
                .iter()
                .map(|a| AttachmentView {
                    file_name: &a.file_name,
                    size: format_file_size(a.file_size),
                    image_src: image_src(a),
                })
                .collect(),
        };
        let context = Context::from_serialize(&ctx)?;

        Ok(RenderedEmail {
            subject: subject_line(category, &feedback.tracking_id),
            html: self.tera.render(HTML_TEMPLATE_NAME, &context)?,
            text: self.tera.render(TEXT_TEMPLATE_NAME, &context)?,
        })
    }
}

/// `App Feedback - {category} [ID: {tracking id}]`, with control characters
/// replaced so the value stays a single header line.
pub fn subject_line(category: &str, tracking_id: &str) -> String {
    format!("App Feedback - {category} [ID: {tracking_id}]")
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}
