use thiserror::Error;

/// Why a submission was rejected before any rendering or sending happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing required feedback fields: {}", missing.join(", "))]
    MissingFields { missing: Vec<&'static str> },

    #[error("feedback message must be at least {min} characters (got {actual})")]
    MessageTooShort { min: usize, actual: usize },
}
