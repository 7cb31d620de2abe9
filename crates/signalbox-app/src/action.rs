//! Console side-effects and intents.
//!
//! This module defines the [`ConsoleAction`] enum, instructions produced by
//! the [`crate::Console`] state machine for the runtime to execute.

use std::time::Duration;

use crate::AuthForm;

/// Actions produced by the Console state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleAction {
    /// Render the console.
    Render,

    /// Quit the console.
    Quit,

    /// Authenticate with the submitted form.
    Login(AuthForm),

    /// Create a credential from the submitted form.
    Register(AuthForm),

    /// Tear down the session.
    Logout,

    /// Begin periodic refresh.
    StartTicker {
        /// Interval between ticks.
        period: Duration,
    },

    /// Stop periodic refresh.
    StopTicker,
}
