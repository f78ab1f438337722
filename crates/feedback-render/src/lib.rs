//! feedback-render
//!
//! Turns a validated feedback record into an email: subject line, HTML body
//! and plain-text body, rendered through Tera templates compiled into the
//! binary.

pub mod error;
pub mod format;
pub mod preview;
pub mod render;
