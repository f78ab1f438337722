use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::ProviderError;
use crate::provider::{BoxFuture, EmailProvider, OutgoingEmail, SentEmail};

pub const DEFAULT_API_BASE: &str = "https://api.resend.com";

/// Resend REST client.
///
/// Uses a blocking `ureq` agent; each send runs on Tokio's blocking pool.
#[derive(Clone)]
pub struct ResendClient {
    agent: ureq::Agent,
    emails_url: String,
    authorization: String,
}

#[derive(Deserialize)]
struct SendResponse {
    id: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    name: Option<String>,
    message: Option<String>,
}

impl ResendClient {
    /// Build a client. Fails when the API key is empty or the base URL is
    /// not an http(s) URL.
    pub fn new(api_key: &str, api_base: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(ProviderError::MissingApiKey);
        }
        let api_base = api_base.trim_end_matches('/');
        if !(api_base.starts_with("https://") || api_base.starts_with("http://")) {
            return Err(ProviderError::InvalidUrl(api_base.to_string()));
        }

        let agent: ureq::Agent = ureq::Agent::config_builder()
            .timeout_global(Some(timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self {
            agent,
            emails_url: format!("{api_base}/emails"),
            authorization: format!("Bearer {api_key}"),
        })
    }

    pub fn emails_url(&self) -> &str {
        &self.emails_url
    }
}

impl EmailProvider for ResendClient {
    fn name(&self) -> &str {
        "Resend"
    }

    fn send<'a>(&'a self, email: OutgoingEmail<'a>) -> BoxFuture<'a, Result<SentEmail, ProviderError>> {
        Box::pin(async move {
            let body = serde_json::to_vec(&email)?;
            let agent = self.agent.clone();
            let url = self.emails_url.clone();
            let authorization = self.authorization.clone();

            debug!(url = %url, bytes = body.len(), "sending email via Resend");

            let (status, text) = tokio::task::spawn_blocking(move || {
                let mut response = agent
                    .post(url.as_str())
                    .header("Authorization", authorization)
                    .header("Content-Type", "application/json")
                    .send(&body[..])
                    .map_err(|e| ProviderError::Transport(e.to_string()))?;
                let status = response.status().as_u16();
                let text = response
                    .body_mut()
                    .read_to_string()
                    .map_err(|e| ProviderError::Transport(e.to_string()))?;
                Ok::<_, ProviderError>((status, text))
            })
            .await
            .map_err(|e| ProviderError::Join(e.to_string()))??;

            parse_response(status, &text)
        })
    }
}

/// Interpret a Resend `/emails` response.
///
/// A 2xx is a send even when the body carries no id. Anything else is an
/// [`ProviderError::Api`] using Resend's `{name, message}` error body when
/// present, or the raw body otherwise.
pub fn parse_response(status: u16, body: &str) -> Result<SentEmail, ProviderError> {
    if (200..300).contains(&status) {
        let id = serde_json::from_str::<SendResponse>(body)
            .ok()
            .and_then(|r| r.id);
        return Ok(SentEmail { id });
    }

    let (name, message) = match serde_json::from_str::<ErrorResponse>(body) {
        Ok(err) => (err.name, err.message),
        Err(_) => (None, None),
    };
    let message = message.unwrap_or_else(|| {
        let raw = body.trim();
        if raw.is_empty() {
            format!("HTTP {status}")
        } else {
            raw.to_string()
        }
    });

    Err(ProviderError::Api {
        status,
        name,
        message,
    })
}
