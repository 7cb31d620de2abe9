//! Standard invariant checks.
//!
//! These invariants capture behavioral properties that must always hold.
//! They verify WHAT must be true, not specific test scenarios.

use signalbox_core::resolve_menu;

use super::{ConsoleSnapshot, Invariant, InvariantKind, InvariantResult, Violation};

/// Active view must be in the menu.
///
/// If `active_view` is `Some(id)`, the resolved menu must contain `id`.
pub struct ActiveViewInMenu;

impl Invariant for ActiveViewInMenu {
    fn kind(&self) -> InvariantKind {
        InvariantKind::ActiveViewInMenu
    }

    fn check(&self, state: &ConsoleSnapshot) -> InvariantResult {
        if let Some(active) = state.active_view
            && !state.menu.contains(&active)
        {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("active view {active} not in menu {:?}", state.menu),
            });
        }
        Ok(())
    }
}

/// Menu must be exactly the role's resolution of the capability table.
pub struct MenuMatchesRole;

impl Invariant for MenuMatchesRole {
    fn kind(&self) -> InvariantKind {
        InvariantKind::MenuMatchesRole
    }

    fn check(&self, state: &ConsoleSnapshot) -> InvariantResult {
        let Some(role) = state.role else {
            return Ok(());
        };

        let expected: Vec<_> = resolve_menu(role).iter().map(|capability| capability.id).collect();
        if state.menu != expected {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("{role} menu {:?}, expected {expected:?}", state.menu),
            });
        }
        Ok(())
    }
}

/// Signed out means no view, no menu and no operational picture.
pub struct SignedOutHasNoView;

impl Invariant for SignedOutHasNoView {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SignedOutHasNoView
    }

    fn check(&self, state: &ConsoleSnapshot) -> InvariantResult {
        if state.role.is_none()
            && (state.active_view.is_some() || !state.menu.is_empty() || state.total_trains.is_some())
        {
            return Err(Violation {
                invariant: self.kind(),
                message: format!(
                    "signed out but view {:?}, menu {:?}, trains {:?}",
                    state.active_view, state.menu, state.total_trains
                ),
            });
        }
        Ok(())
    }
}

/// Alert feed never exceeds its capacity.
pub struct AlertFeedBounded;

impl Invariant for AlertFeedBounded {
    fn kind(&self) -> InvariantKind {
        InvariantKind::AlertFeedBounded
    }

    fn check(&self, state: &ConsoleSnapshot) -> InvariantResult {
        if state.alert_count > state.alert_capacity {
            return Err(Violation {
                invariant: self.kind(),
                message: format!("{} alerts, capacity {}", state.alert_count, state.alert_capacity),
            });
        }
        Ok(())
    }
}

/// Console and session manager agree on who is signed in.
///
/// Only checked when the snapshot carries the manager's role.
pub struct SessionAgreement;

impl Invariant for SessionAgreement {
    fn kind(&self) -> InvariantKind {
        InvariantKind::SessionAgreement
    }

    fn check(&self, state: &ConsoleSnapshot) -> InvariantResult {
        match state.manager_role {
            Some(manager) if manager != state.role => Err(Violation {
                invariant: self.kind(),
                message: format!("console role {:?}, session manager role {manager:?}", state.role),
            }),
            _ => Ok(()),
        }
    }
}
