use thiserror::Error;

/// Failures surfaced by the company repository. The terminal setup
/// transaction classifies these into user-facing messages.
#[derive(Debug, Clone, Error)]
pub enum CompanyRepositoryError {
    #[error("permission denied")]
    PermissionDenied,

    #[error("company already exists for this owner")]
    AlreadyExists,

    #[error("network error: {0}")]
    Unavailable(String),

    #[error("storage error: {0}")]
    Storage(String),
}
