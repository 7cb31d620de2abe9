//! Frontend-agnostic user intents.

use crate::AuthForm;

/// What the user asked for.
///
/// Decouples the console from any particular frontend (terminal commands,
/// scripted simulation) so both drive the same state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    /// Submit the auth form in the current mode.
    Submit(AuthForm),
    /// Switch the auth form between login and registration.
    ToggleMode,
    /// Open a view from the menu.
    SelectView(String),
    /// End the session.
    Logout,
    /// Leave the console.
    Quit,
}
