//! `--seed-user` values.

use std::str::FromStr;

use signalbox_core::{Credential, Role};
use thiserror::Error;

/// Errors from parsing `email:password:role`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SeedUserError {
    /// Not three colon-separated fields.
    #[error("expected email:password:role, got {0:?}")]
    Shape(String),

    /// A field is empty.
    #[error("empty field in {0:?}")]
    Empty(String),

    /// Unknown role name.
    #[error("unknown role {0:?} (operator, supervisor, admin)")]
    Role(String),
}

/// A credential created at startup.
#[derive(Clone, PartialEq, Eq)]
pub struct SeedUser(pub Credential);

impl std::fmt::Debug for SeedUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SeedUser").field(&self.0).finish()
    }
}

impl FromStr for SeedUser {
    type Err = SeedUserError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Passwords may contain colons; email and role may not.
        let (identifier, rest) = s.split_once(':').ok_or_else(|| SeedUserError::Shape(s.into()))?;
        let (secret, role) = rest.rsplit_once(':').ok_or_else(|| SeedUserError::Shape(s.into()))?;

        if identifier.is_empty() || secret.is_empty() || role.is_empty() {
            return Err(SeedUserError::Empty(s.into()));
        }
        let role: Role = role.parse().map_err(|_| SeedUserError::Role(role.to_string()))?;
        Ok(Self(Credential::new(identifier, secret, role)))
    }
}
