//! Console input events.
//!
//! This module defines [`ConsoleEvent`], everything that drives the
//! [`crate::Console`] state machine.
//!
//! Events originate from three sources:
//! - User intents from the driver.
//! - Refresh ticks from the session ticker.
//! - Outcomes of credential requests reported by the [`crate::Gateway`].

use signalbox_core::{Alert, AuthError, Session};

use crate::ConsoleInput;

/// Events processed by the Console state machine.
#[derive(Debug, Clone)]
pub enum ConsoleEvent {
    /// User intent.
    Input(ConsoleInput),

    /// Periodic refresh.
    Tick {
        /// Perturbation applied to the train count, in `{-1, 0, +1}`.
        delta: i64,
    },

    /// Credentials matched; a session is now active.
    LoginSucceeded {
        /// The new session.
        session: Session,
    },

    /// Login was rejected or could not complete.
    LoginFailed {
        /// Cause.
        error: AuthError,
    },

    /// A credential was created.
    RegisterSucceeded {
        /// Identifier that was registered.
        identifier: String,
    },

    /// Registration was rejected or could not complete.
    RegisterFailed {
        /// Cause.
        error: AuthError,
    },

    /// A new alert for the feed.
    AlertRaised(Alert),
}
