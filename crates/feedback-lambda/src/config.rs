use std::env;
use std::fmt;
use std::time::Duration;

use feedback_mail::resend::DEFAULT_API_BASE;

pub const DEFAULT_SENDER: &str = "Prompt Forge <noreply@resend.dev>";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Large enough for a handful of base64-encoded screenshots.
pub const DEFAULT_MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Runtime configuration, read once at cold start.
#[derive(Clone)]
pub struct Config {
    pub resend_api_key: String,
    pub recipient: String,
    pub sender: String,
    pub resend_api_base: String,
    pub resend_timeout: Duration,
    pub max_body_bytes: usize,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let require = |key: &str| get(key).ok_or_else(|| eyre::eyre!("{key} must be set"));

        let resend_timeout = match get("RESEND_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|e| eyre::eyre!("RESEND_TIMEOUT_SECS is not a number of seconds: {e}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        let max_body_bytes = match get("FEEDBACK_MAX_BODY_BYTES") {
            Some(raw) => raw
                .parse::<usize>()
                .map_err(|e| eyre::eyre!("FEEDBACK_MAX_BODY_BYTES is not a byte count: {e}"))?,
            None => DEFAULT_MAX_BODY_BYTES,
        };

        Ok(Self {
            resend_api_key: require("RESEND_API_KEY")?,
            recipient: require("FEEDBACK_RECIPIENT")?,
            sender: get("FEEDBACK_SENDER").unwrap_or_else(|| DEFAULT_SENDER.to_string()),
            resend_api_base: get("RESEND_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            resend_timeout: Duration::from_secs(resend_timeout),
            max_body_bytes,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("resend_api_key", &"<redacted>")
            .field("recipient", &self.recipient)
            .field("sender", &self.sender)
            .field("resend_api_base", &self.resend_api_base)
            .field("resend_timeout", &self.resend_timeout)
            .field("max_body_bytes", &self.max_body_bytes)
            .finish()
    }
}
