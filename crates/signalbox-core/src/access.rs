//! Access control resolver.
//!
//! The capability table is the ONLY place that maps roles to views. Each
//! capability carries its own role set; resolution is a filter over the table
//! that preserves table order. There is no role hierarchy: an admin sees a
//! capability because the capability lists admin, not because admin outranks
//! anyone.

use crate::{error::AccessError, role::Role};

/// View id of the operational dashboard. The default view for every role.
pub const DASHBOARD: &str = "dashboard";

const EVERY_ROLE: &[Role] = &[Role::Operator, Role::Supervisor, Role::Admin];
const OVERSIGHT: &[Role] = &[Role::Supervisor, Role::Admin];
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// A named operational panel gated by role membership.
///
/// Defined at process start, never created or destroyed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuCapability {
    /// Stable view id.
    pub id: &'static str,
    /// Navigation label.
    pub label: &'static str,
    /// Roles permitted to open this view.
    pub allowed_roles: &'static [Role],
    /// Count shown next to the label. `None` hides the badge.
    pub badge_count: Option<u32>,
}

impl MenuCapability {
    /// Whether `role` is a member of this capability's role set.
    pub fn permits(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }
}

/// The ordered capability table.
pub static CAPABILITIES: [MenuCapability; 11] = [
    MenuCapability {
        id: DASHBOARD,
        label: "Dashboard",
        allowed_roles: EVERY_ROLE,
        badge_count: None,
    },
    MenuCapability {
        id: "trains",
        label: "Train Details",
        allowed_roles: EVERY_ROLE,
        badge_count: None,
    },
    MenuCapability {
        id: "scheduling",
        label: "AI Scheduling",
        allowed_roles: EVERY_ROLE,
        badge_count: None,
    },
    MenuCapability {
        id: "conflicts",
        label: "Conflict Resolution",
        allowed_roles: EVERY_ROLE,
        badge_count: Some(2),
    },
    MenuCapability {
        id: "simulation",
        label: "What-If Simulation",
        allowed_roles: EVERY_ROLE,
        badge_count: None,
    },
    MenuCapability {
        id: "analytics",
        label: "Predictive Analytics",
        allowed_roles: OVERSIGHT,
        badge_count: None,
    },
    MenuCapability {
        id: "incidents",
        label: "Incident Management",
        allowed_roles: EVERY_ROLE,
        badge_count: None,
    },
    MenuCapability {
        id: "history",
        label: "Historical Replay",
        allowed_roles: OVERSIGHT,
        badge_count: None,
    },
    MenuCapability {
        id: "reports",
        label: "Reports & Logs",
        allowed_roles: OVERSIGHT,
        badge_count: None,
    },
    MenuCapability {
        id: "users",
        label: "User Management",
        allowed_roles: ADMIN_ONLY,
        badge_count: None,
    },
    MenuCapability { id: "settings", label: "Settings", allowed_roles: ADMIN_ONLY, badge_count: None },
];

/// Capabilities permitted for `role`, in table order.
///
/// Pure function of the role and the static table.
pub fn resolve_menu(role: Role) -> Vec<&'static MenuCapability> {
    CAPABILITIES.iter().filter(|capability| capability.permits(role)).collect()
}

/// Resolve the menu for a role given by its wire name.
///
/// Fails closed with [`AccessError::UnknownRole`] rather than guessing.
pub fn resolve_menu_for(role: &str) -> Result<Vec<&'static MenuCapability>, AccessError> {
    let role = role.parse::<Role>()?;
    Ok(resolve_menu(role))
}

/// Look up a capability by view id.
pub fn find_capability(id: &str) -> Option<&'static MenuCapability> {
    CAPABILITIES.iter().find(|capability| capability.id == id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn ids(role: Role) -> String {
        resolve_menu(role).iter().map(|c| c.id).collect::<Vec<_>>().join(",")
    }

    #[test]
    fn menu_per_role() {
        insta::assert_snapshot!(
            ids(Role::Operator),
            @"dashboard,trains,scheduling,conflicts,simulation,incidents"
        );
        insta::assert_snapshot!(
            ids(Role::Supervisor),
            @"dashboard,trains,scheduling,conflicts,simulation,analytics,incidents,history,reports"
        );
        insta::assert_snapshot!(
            ids(Role::Admin),
            @"dashboard,trains,scheduling,conflicts,simulation,analytics,incidents,history,reports,users,settings"
        );
    }

    #[test]
    fn table_ids_are_unique() {
        let unique: HashSet<_> = CAPABILITIES.iter().map(|c| c.id).collect();
        assert_eq!(unique.len(), CAPABILITIES.len());
    }

    #[test]
    fn every_role_starts_on_dashboard() {
        for role in Role::ALL {
            assert_eq!(resolve_menu(role).first().map(|c| c.id), Some(DASHBOARD));
        }
    }

    #[test]
    fn unknown_role_fails_closed() {
        assert_eq!(
            resolve_menu_for("dispatcher"),
            Err(AccessError::UnknownRole("dispatcher".into()))
        );
        assert_eq!(resolve_menu_for("admin").map(|m| m.len()), Ok(CAPABILITIES.len()));
    }

    #[test]
    fn conflicts_carries_badge() {
        assert_eq!(find_capability("conflicts").and_then(|c| c.badge_count), Some(2));
        assert!(find_capability("timetable").is_none());
    }
}
