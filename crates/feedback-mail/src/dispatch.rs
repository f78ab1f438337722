use std::sync::Arc;

use tracing::{info, warn};

use feedback_render::render::RenderedEmail;

use crate::provider::{EmailProvider, OutgoingEmail, Tag};

/// Result of one dispatch attempt. Provider failures are data here, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Sent { id: Option<String> },
    Failed { error: String },
}

/// Sends rendered feedback to the fixed recipient from the fixed sender.
#[derive(Clone)]
pub struct Dispatcher {
    provider: Arc<dyn EmailProvider>,
    from: String,
    to: Vec<String>,
}

impl Dispatcher {
    pub fn new(provider: Arc<dyn EmailProvider>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            provider,
            from: from.into(),
            to: vec![to.into()],
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn sender(&self) -> &str {
        &self.from
    }

    pub fn recipients(&self) -> &[String] {
        &self.to
    }

    /// Send one email. `category` becomes a provider tag when it survives
    /// tag sanitization.
    pub async fn dispatch(&self, email: &RenderedEmail, category: Option<&str>) -> DispatchOutcome {
        let outgoing = OutgoingEmail {
            from: &self.from,
            to: &self.to,
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
            tags: category
                .and_then(|c| Tag::sanitized("category", c))
                .into_iter()
                .collect(),
        };

        match self.provider.send(outgoing).await {
            Ok(sent) => {
                info!(
                    provider = self.provider.name(),
                    message_id = sent.id.as_deref().unwrap_or(""),
                    "feedback email sent"
                );
                DispatchOutcome::Sent { id: sent.id }
            }
            Err(e) => {
                warn!(provider = self.provider.name(), error = %e, "feedback email send failed");
                DispatchOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}
