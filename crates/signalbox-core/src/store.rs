//! Credential store contract.
//!
//! The store persists user records and answers whether an exact
//! (identifier, secret, role) tuple exists. Identifier uniqueness is the
//! store's invariant; the core treats it as opaque. Persistence, transport
//! and hashing policy all live behind this trait.

use std::{fmt, sync::Arc};

use async_trait::async_trait;

use crate::{error::StoreError, role::Role};

/// A stored user record.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    /// Unique user identifier (email).
    pub identifier: String,
    /// User secret.
    pub secret: String,
    /// Role granted to this identifier.
    pub role: Role,
}

impl Credential {
    /// Create a credential record.
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>, role: Role) -> Self {
        Self { identifier: identifier.into(), secret: secret.into(), role }
    }

    /// Whether this record matches all three fields exactly.
    pub fn matches(&self, identifier: &str, secret: &str, role: Role) -> bool {
        self.identifier == identifier && self.secret == secret && self.role == role
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Persistent credential storage consumed by the session manager.
///
/// Calls may suspend (network or disk round trip). The session manager bounds
/// each call with its request timeout, so implementations need not.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create a credential.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Duplicate`] if the identifier is already registered
    /// - [`StoreError::Unavailable`] on any backend or transport failure
    async fn create(&self, credential: &Credential) -> Result<(), StoreError>;

    /// Find the credential matching all three fields exactly.
    ///
    /// Returns `None` if no record matches.
    async fn find(
        &self,
        identifier: &str,
        secret: &str,
        role: Role,
    ) -> Result<Option<Credential>, StoreError>;
}

#[async_trait]
impl<S: CredentialStore + ?Sized> CredentialStore for Arc<S> {
    async fn create(&self, credential: &Credential) -> Result<(), StoreError> {
        (**self).create(credential).await
    }

    async fn find(
        &self,
        identifier: &str,
        secret: &str,
        role: Role,
    ) -> Result<Option<Credential>, StoreError> {
        (**self).find(identifier, secret, role).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_secret() {
        let credential = Credential::new("op1@rail.test", "pw1", Role::Operator);
        let rendered = format!("{credential:?}");

        assert!(rendered.contains("op1@rail.test"));
        assert!(!rendered.contains("pw1"));
    }

    #[test]
    fn matches_requires_every_field() {
        let credential = Credential::new("op1@rail.test", "pw1", Role::Operator);

        assert!(credential.matches("op1@rail.test", "pw1", Role::Operator));
        assert!(!credential.matches("op1@rail.test", "pw1", Role::Admin));
        assert!(!credential.matches("op1@rail.test", "pw2", Role::Operator));
        assert!(!credential.matches("op2@rail.test", "pw1", Role::Operator));
    }
}
