//! feedback-core
//!
//! Domain types for feedback submissions, request validation and
//! attachment normalization. No I/O; shared by the renderer, the mailer
//! and the Lambda handler.

pub mod error;
pub mod models;
pub mod validate;
