use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CoreError {
    #[error("Missing profile field: {0}")]
    MissingField(&'static str),

    #[error("Local storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Remote sync failed: {0}")]
    RemoteSyncFailed(String),

    #[error("Entry not found")]
    EntryNotFound,

    #[error("Not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("An active subscription is required")]
    PaymentRequired,

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Internal server error")]
    InternalServerError,
}
