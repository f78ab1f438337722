use std::future::Future;
use std::pin::Pin;

use serde::Serialize;

use crate::error::ProviderError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Longest tag name or value providers accept.
const MAX_TAG_LEN: usize = 256;

/// One email, borrowed from the rendered content. Serializes to the
/// `{from, to, subject, html, text, tags?}` shape transactional email APIs take.
#[derive(Debug, Clone, Serialize)]
pub struct OutgoingEmail<'a> {
    pub from: &'a str,
    pub to: &'a [String],
    pub subject: &'a str,
    pub html: &'a str,
    pub text: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

/// Provider-side metadata attached to a send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    pub value: String,
}

impl Tag {
    /// Build a tag whose value only uses ASCII letters, digits, `_` and `-`.
    /// Other characters become `_`. Returns `None` for an empty value.
    pub fn sanitized(name: &str, value: &str) -> Option<Self> {
        let value: String = value
            .chars()
            .take(MAX_TAG_LEN)
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if value.is_empty() {
            return None;
        }
        Some(Self {
            name: name.to_string(),
            value,
        })
    }
}

/// What the provider hands back for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// Provider-assigned message id, when the provider returned one.
    pub id: Option<String>,
}

/// A transactional email backend.
pub trait EmailProvider: Send + Sync {
    /// Name reported to clients in the response `service` field.
    fn name(&self) -> &str;

    fn send<'a>(&'a self, email: OutgoingEmail<'a>) -> BoxFuture<'a, Result<SentEmail, ProviderError>>;
}
