//! feedback-mail
//!
//! Outbound email: the provider seam, the Resend HTTP client and the
//! dispatcher that turns provider failures into a value instead of an error.

pub mod dispatch;
pub mod error;
pub mod provider;
pub mod resend;
