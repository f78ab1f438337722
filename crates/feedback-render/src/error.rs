use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("template rendering failed: {0}")]
    TemplateRender(String),
}

impl From<tera::Error> for RenderError {
    fn from(e: tera::Error) -> Self {
        RenderError::TemplateRender(describe(&e))
    }
}

/// Tera keeps the useful part of a failure (the missing variable, the bad
/// filter) in the source chain rather than the top-level message.
pub(crate) fn describe(e: &tera::Error) -> String {
    let mut message = e.to_string();
    let mut source = std::error::Error::source(e);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
