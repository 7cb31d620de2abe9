//! Access roles.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::AccessError;

/// Enumerated access level of an authenticated user.
///
/// Roles are NOT a hierarchy. What a role may see is decided per capability
/// by set membership (see [`crate::access`]), never by comparing roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Control-room operator.
    Operator,
    /// Shift supervisor.
    Supervisor,
    /// System administrator.
    Admin,
}

impl Role {
    /// Every role, in presentation order.
    pub const ALL: [Role; 3] = [Role::Operator, Role::Supervisor, Role::Admin];

    /// Wire name (`operator`, `supervisor`, `admin`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Supervisor => "supervisor",
            Self::Admin => "admin",
        }
    }

    /// Human-readable label for badges and role pickers.
    pub fn label(self) -> &'static str {
        match self {
            Self::Operator => "Operator",
            Self::Supervisor => "Supervisor",
            Self::Admin => "Administrator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operator" => Ok(Self::Operator),
            "supervisor" => Ok(Self::Supervisor),
            "admin" => Ok(Self::Admin),
            other => Err(AccessError::UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_wire_names_only() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }

        assert_eq!("Admin".parse::<Role>(), Err(AccessError::UnknownRole("Admin".into())));
        assert_eq!("".parse::<Role>(), Err(AccessError::UnknownRole(String::new())));
    }

    #[test]
    fn admin_label_is_spelled_out() {
        assert_eq!(Role::Admin.label(), "Administrator");
        assert_eq!(Role::Admin.to_string(), "admin");
    }
}
