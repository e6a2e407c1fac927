//! Error types for the portal services.

use thiserror::Error;

/// Errors a portal operation can surface to the caller.
///
/// Remote unavailability is deliberately absent: it is handled inside the
/// services by falling back to the local store and never escapes.
#[derive(Debug, Error)]
pub enum PortalError {
    /// No account matches the supplied email and password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// An account already exists under this email.
    #[error("Email exists")]
    DuplicateEmail,

    /// A form field failed validation.
    #[error(transparent)]
    Validation(#[from] domain::FieldError),

    /// The fallback store could not be written.
    #[error(transparent)]
    Store(#[from] local_store::StoreError),
}

pub type Result<T> = std::result::Result<T, PortalError>;
