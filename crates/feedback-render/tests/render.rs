use feedback_core::models::attachment::Attachment;
use feedback_core::models::submission::Feedback;
use feedback_render::error::RenderError;
use feedback_render::render::{subject_line, FeedbackRenderer, ANONYMOUS, DEFAULT_CATEGORY};
use jiff::Timestamp;
use serde_json::json;

fn feedback() -> Feedback {
    Feedback {
        display_type: Some("Bug report".to_string()),
        type_value: Some("bug".to_string()),
        message: "The export button does nothing.".to_string(),
        email: Some("someone@example.com".to_string()),
        device_info: "Pixel 8".to_string(),
        app_version: "2.3.1".to_string(),
        os_version: "Android 15".to_string(),
        language: "zh-TW".to_string(),
        timestamp: Some(json!("2024-01-15T10:30:00Z")),
        tracking_id: "fb-1001".to_string(),
        attachments: Vec::new(),
    }
}

fn now() -> Timestamp {
    "2025-03-01T00:00:00Z".parse().unwrap()
}

fn image(name: &str) -> Attachment {
    Attachment {
        file_name: name.to_string(),
        file_size: 1536,
        mime_type: "image/png".to_string(),
        file_data: Some("iVBORw0KGgo=".to_string()),
    }
}

fn document(name: &str) -> Attachment {
    Attachment {
        file_name: name.to_string(),
        file_size: 1_048_576,
        mime_type: "application/pdf".to_string(),
        file_data: Some("JVBERi0=".to_string()),
    }
}

#[test]
fn subject_prefers_display_label() {
    let renderer = FeedbackRenderer::new().unwrap();
    let email = renderer.render_at(&feedback(), now()).unwrap();
    assert_eq!(email.subject, "App Feedback - Bug report [ID: fb-1001]");
}

#[test]
fn subject_falls_back_to_raw_value_then_generic_label() {
    let renderer = FeedbackRenderer::new().unwrap();

    let mut raw_only = feedback();
    raw_only.display_type = None;
    let email = renderer.render_at(&raw_only, now()).unwrap();
    assert_eq!(email.subject, "App Feedback - bug [ID: fb-1001]");

    raw_only.type_value = None;
    let email = renderer.render_at(&raw_only, now()).unwrap();
    assert_eq!(
        email.subject,
        format!("App Feedback - {DEFAULT_CATEGORY} [ID: fb-1001]")
    );
}

#[test]
fn subject_cannot_be_split_across_header_lines() {
    assert_eq!(
        subject_line("Bug\r\nBcc: victim@example.com", "x"),
        "App Feedback - Bug  Bcc: victim@example.com [ID: x]"
    );
}

#[test]
fn both_bodies_carry_the_details() {
    let renderer = FeedbackRenderer::new().unwrap();
    let email = renderer.render_at(&feedback(), now()).unwrap();

    for body in [&email.html, &email.text] {
        assert!(body.contains("Bug report"));
        assert!(body.contains("fb-1001"));
        assert!(body.contains("2024/01/15 18:30:00"));
        assert!(body.contains("someone@example.com"));
        assert!(body.contains("The export button does nothing."));
        assert!(body.contains("Pixel 8"));
        assert!(body.contains("2.3.1"));
        assert!(body.contains("Android 15"));
        assert!(body.contains("zh-TW"));
    }
    assert!(!email.html.contains("Attachments"));
    assert!(!email.text.contains("Attachments"));
}

#[test]
fn html_timestamp_is_not_entity_encoded() {
    let renderer = FeedbackRenderer::new().unwrap();
    let email = renderer.render_at(&feedback(), now()).unwrap();

    assert!(email.html.contains("2024/01/15 18:30:00 (UTC+8)"));
    assert!(!email.html.contains("&#x2F;"));
}

#[test]
fn missing_email_is_anonymous_and_bad_timestamp_uses_now() {
    let renderer = FeedbackRenderer::new().unwrap();
    let mut fb = feedback();
    fb.email = None;
    fb.timestamp = Some(json!("sometime last week"));

    let email = renderer.render_at(&fb, now()).unwrap();
    assert!(email.text.contains(&format!("- Contact: {ANONYMOUS}")));
    assert!(email.text.contains("2025/03/01 08:00:00"));
}

#[test]
fn image_attachments_are_previewed_inline() {
    let renderer = FeedbackRenderer::new().unwrap();
    let mut fb = feedback();
    fb.attachments = vec![image("screen.png")];

    let email = renderer.render_at(&fb, now()).unwrap();
    assert!(email.html.contains("<img src=\"data:image/png;base64,iVBORw0KGgo=\""));
    assert!(email.html.contains("screen.png"));
    assert!(email.html.contains("1.5 KB"));
    assert!(!email.html.contains("📄"));
}

#[test]
fn other_attachments_get_a_placeholder_and_no_image() {
    let renderer = FeedbackRenderer::new().unwrap();
    let mut fb = feedback();
    fb.attachments = vec![document("report.pdf")];

    let email = renderer.render_at(&fb, now()).unwrap();
    assert!(email.html.contains("📄"));
    assert!(email.html.contains("report.pdf"));
    assert!(email.html.contains("1.0 MB"));
    assert!(!email.html.contains("<img"));
}

#[test]
fn image_without_payload_gets_a_placeholder() {
    let renderer = FeedbackRenderer::new().unwrap();
    let mut fb = feedback();
    let mut shot = image("empty.png");
    shot.file_data = None;
    fb.attachments = vec![shot];

    let email = renderer.render_at(&fb, now()).unwrap();
    assert!(email.html.contains("attachment-file"));
    assert!(!email.html.contains("<img"));
}

#[test]
fn mixed_attachments_render_one_block_each() {
    let renderer = FeedbackRenderer::new().unwrap();
    let mut fb = feedback();
    fb.attachments = vec![image("a.png"), document("b.pdf"), image("c.png")];

    let email = renderer.render_at(&fb, now()).unwrap();
    assert_eq!(email.html.matches("<img ").count(), 2);
    assert_eq!(email.html.matches("attachment-file").count(), 1);
    assert!(email.html.contains("Attachments (3)"));

    assert!(email.text.contains("Attachments (3):"));
    assert!(email.text.contains("  1. a.png (1.5 KB)\n"));
    assert!(email.text.contains("  2. b.pdf (1.0 MB)\n"));
    assert!(email.text.contains("  3. c.png (1.5 KB)\n"));
}

#[test]
fn user_text_is_escaped_in_html_only() {
    let renderer = FeedbackRenderer::new().unwrap();
    let mut fb = feedback();
    fb.message = "<script>alert('hi')</script> please fix".to_string();
    fb.attachments = vec![document("\"><b>x</b>.pdf")];

    let email = renderer.render_at(&fb, now()).unwrap();
    assert!(!email.html.contains("<script>"));
    assert!(email.html.contains("&lt;script&gt;"));
    assert!(!email.html.contains("<b>x</b>"));
    assert!(email.text.contains("<script>alert('hi')</script> please fix"));
}

#[test]
fn broken_template_is_a_parse_error() {
    let err = FeedbackRenderer::with_templates("{% if %}", "ok").err().unwrap();
    assert!(matches!(err, RenderError::TemplateParse(_)));
}

#[test]
fn unknown_variable_is_a_render_error() {
    let renderer = FeedbackRenderer::with_templates("{{ no_such.field }}", "ok").unwrap();
    let err = renderer.render_at(&feedback(), now()).unwrap_err();
    assert!(matches!(err, RenderError::TemplateRender(_)));
}
