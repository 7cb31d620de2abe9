//! Invariant checking for deterministic simulation testing.
//!
//! Invariants are properties that must always hold during execution. Unlike
//! example-based tests that check specific scenarios, invariants verify
//! behavioral properties across all execution paths.
//!
//! # Architecture
//!
//! Observable console state is extracted into a [`ConsoleSnapshot`], then
//! every registered [`Invariant`] is checked against it. Violations carry
//! enough context to debug the failing sequence.

mod checks;
mod snapshot;

use std::fmt;

pub use checks::{
    ActiveViewInMenu, AlertFeedBounded, MenuMatchesRole, SessionAgreement, SignedOutHasNoView,
};
pub use snapshot::ConsoleSnapshot;

/// Invariant check result.
pub type InvariantResult = Result<(), Violation>;

/// Which invariant was checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantKind {
    /// Active view is in the role's menu.
    ActiveViewInMenu,
    /// Menu equals the role's resolution of the capability table.
    MenuMatchesRole,
    /// No view, menu or operational picture while signed out.
    SignedOutHasNoView,
    /// Alert feed within capacity.
    AlertFeedBounded,
    /// Console and session manager agree on the signed-in role.
    SessionAgreement,
}

impl fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ActiveViewInMenu => "active_view_in_menu",
            Self::MenuMatchesRole => "menu_matches_role",
            Self::SignedOutHasNoView => "signed_out_has_no_view",
            Self::AlertFeedBounded => "alert_feed_bounded",
            Self::SessionAgreement => "session_agreement",
        };
        f.write_str(name)
    }
}

/// Invariant violation with context.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Which invariant was violated.
    pub invariant: InvariantKind,
    /// Description of what went wrong.
    pub message: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.invariant, self.message)
    }
}

impl std::error::Error for Violation {}

/// An invariant that can be checked against console state.
pub trait Invariant: Send + Sync {
    /// Which invariant this is.
    fn kind(&self) -> InvariantKind;

    /// Check the invariant against a snapshot.
    ///
    /// Returns `Ok(())` if the invariant holds, or a [`Violation`]
    /// describing what went wrong.
    fn check(&self, state: &ConsoleSnapshot) -> InvariantResult;
}

/// Registry of invariants to check.
///
/// Use [`InvariantRegistry::standard()`] for every console invariant.
pub struct InvariantRegistry {
    invariants: Vec<Box<dyn Invariant>>,
}

impl Default for InvariantRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl InvariantRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { invariants: Vec::new() }
    }

    /// Create a registry with the standard console invariants.
    ///
    /// Includes:
    /// - [`ActiveViewInMenu`]: active view is in the menu
    /// - [`MenuMatchesRole`]: menu is exactly the role's resolution
    /// - [`SignedOutHasNoView`]: nothing is reachable while signed out
    /// - [`AlertFeedBounded`]: feed never exceeds capacity
    /// - [`SessionAgreement`]: console and session manager agree
    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.add(ActiveViewInMenu);
        registry.add(MenuMatchesRole);
        registry.add(SignedOutHasNoView);
        registry.add(AlertFeedBounded);
        registry.add(SessionAgreement);
        registry
    }

    /// Add an invariant to the registry.
    pub fn add<I: Invariant + 'static>(&mut self, invariant: I) {
        self.invariants.push(Box::new(invariant));
    }

    /// Check all invariants against the given state.
    ///
    /// Returns `Ok(())` if all invariants hold, or all violations found.
    pub fn check_all(&self, state: &ConsoleSnapshot) -> Result<(), Vec<Violation>> {
        let violations: Vec<_> =
            self.invariants.iter().filter_map(|inv| inv.check(state).err()).collect();

        if violations.is_empty() { Ok(()) } else { Err(violations) }
    }

    /// Check all invariants, panicking with every violation found.
    ///
    /// Use this in tests where you want immediate failure with context.
    pub fn assert_all(&self, state: &ConsoleSnapshot, context: &str) {
        if let Err(violations) = self.check_all(state) {
            let messages: Vec<_> = violations.iter().map(ToString::to_string).collect();
            panic!("Invariant violation {context}:\n  {}", messages.join("\n  "));
        }
    }

    /// Number of registered invariants.
    pub fn len(&self) -> usize {
        self.invariants.len()
    }

    /// Check if registry is empty.
    pub fn is_empty(&self) -> bool {
        self.invariants.is_empty()
    }
}
