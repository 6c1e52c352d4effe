//! Error types for contact-desk.
//!
//! This module defines custom error types using `thiserror` for precise error handling.

use thiserror::Error;

/// Errors that can occur when talking to the hosted table and storage APIs.
#[derive(Error, Debug)]
pub enum StoreApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Authentication failed
    #[error("Authentication failed")]
    Unauthorized,
}

/// Operation-fatal repository errors.
///
/// Each variant names the step that failed; the transport detail rides along
/// as the source. Best-effort blob cleanup deliberately has no variant here,
/// see [`CleanupError`].
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Reading the contact list failed
    #[error("failed to fetch contacts: {0}")]
    Fetch(#[source] StoreApiError),

    /// Writing the image blob failed, before any row mutation
    #[error("failed to upload image: {0}")]
    Upload(#[source] StoreApiError),

    /// Row insert/update/delete failed
    #[error("failed to persist contact: {0}")]
    Persist(#[source] StoreApiError),
}

/// Best-effort blob removal failed.
///
/// A distinct type so it cannot be confused with (or converted into) an
/// operation-fatal [`RepositoryError`]: callers log it and continue, leaving
/// an orphaned blob behind.
#[derive(Error, Debug)]
#[error("failed to remove stored image {key}: {source}")]
pub struct CleanupError {
    /// Bucket-relative key of the blob that could not be removed
    pub key: String,
    #[source]
    pub source: StoreApiError,
}

/// A single failing form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// Name is empty after trimming
    EmptyName,

    /// No last-contact date was provided
    MissingDate,

    /// Last-contact date lies in the future
    FutureDate,
}

impl FieldError {
    /// Human-readable reason for the failure.
    pub fn message(&self) -> &'static str {
        match self {
            Self::EmptyName => "name must not be empty",
            Self::MissingDate => "last contact date is required",
            Self::FutureDate => "last contact date must not be in the future",
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Accumulated form-validation failures.
///
/// Every rule is evaluated in one pass, so `fields` carries the full set of
/// violations rather than just the first one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The failing-field tags, in form order
    pub fields: Vec<FieldError>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reasons: Vec<&str> = self.fields.iter().map(|e| e.message()).collect();
        write!(f, "validation failed: {}", reasons.join(", "))
    }
}

impl std::error::Error for ValidationError {}

impl ValidationError {
    /// Whether a particular field tag is present.
    pub fn contains(&self, field: FieldError) -> bool {
        self.fields.contains(&field)
    }
}

/// Errors surfaced by the contact workflow.
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// Form input failed validation; no side effect was performed
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The repository operation failed
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// An operation is already in flight for this session
    #[error("an operation is already in progress")]
    Busy,

    /// The operation requires an open editing session
    #[error("no editing session is open")]
    ClosedSession,
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StoreApiError
pub type StoreApiResult<T> = Result<T, StoreApiError>;

/// Convenience type alias for Results with RepositoryError
pub type RepoResult<T> = Result<T, RepositoryError>;

/// Convenience type alias for Results with WorkflowError
pub type WorkflowResult<T> = Result<T, WorkflowError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
