//! Error types for the console core.
//!
//! Strongly-typed errors for each boundary: local validation, the credential
//! store contract, authentication outcomes, and access control.

use std::{fmt, time::Duration};

use thiserror::Error;

/// A required authentication field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// User identifier (email).
    Identifier,
    /// User secret (password).
    Secret,
    /// Requested role.
    Role,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Identifier => "email",
            Self::Secret => "password",
            Self::Role => "role",
        })
    }
}

/// Input rejected locally, before any credential store round trip.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is empty.
    #[error("{0} is required")]
    MissingField(Field),

    /// The role is not one of the known roles.
    #[error("role must be one of operator, supervisor, admin (got {0:?})")]
    UnrecognizedRole(String),
}

/// Errors reported by a credential store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Creation rejected because the identifier is taken.
    #[error("identifier already registered: {0}")]
    Duplicate(String),

    /// Transport or backend failure. Opaque to the core.
    #[error("credential store unavailable: {0}")]
    Unavailable(String),

    /// The store did not answer within the request timeout.
    #[error("credential store did not respond within {0:?}")]
    Timeout(Duration),
}

/// Errors from login and registration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Missing or malformed field, detected before contacting the store.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No stored credential matches identifier, secret and role.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The store refused to create a second credential for the identifier.
    #[error("identifier already registered: {0}")]
    DuplicateIdentifier(String),

    /// Store or transport failure.
    #[error("credential store error: {0}")]
    Store(StoreError),
}

/// User-visible failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Missing or malformed input.
    Validation,
    /// Login rejected.
    InvalidCredentials,
    /// Registration rejected.
    DuplicateIdentifier,
    /// Backend failure.
    Store,
}

impl AuthError {
    /// Category shown to the user.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) => ErrorCategory::Validation,
            Self::InvalidCredentials => ErrorCategory::InvalidCredentials,
            Self::DuplicateIdentifier(_) => ErrorCategory::DuplicateIdentifier,
            Self::Store(_) => ErrorCategory::Store,
        }
    }

    /// Returns true if retrying the same request may succeed.
    ///
    /// Only store unavailability and timeouts are transient. Retrying is a
    /// caller decision; the session manager never retries on its own.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Store(StoreError::Unavailable(_) | StoreError::Timeout(_)))
    }
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(identifier) => Self::DuplicateIdentifier(identifier),
            other => Self::Store(other),
        }
    }
}

/// Errors from menu resolution and view selection.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// The role value is not recognised. Unreachable for a role produced by a
    /// successful login; callers fail closed.
    #[error("unknown role: {0:?}")]
    UnknownRole(String),

    /// The view is not in the resolved capability set of the active role, or
    /// there is no active role.
    #[error("view not permitted: {view}")]
    ViewNotPermitted {
        /// Requested view id.
        view: String,
    },
}
