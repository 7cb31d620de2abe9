//! Credential gateway.
//!
//! The [`Gateway`] wraps the [`SessionManager`] and executes the credential
//! actions the console emits, converting each outcome back into a
//! [`crate::ConsoleEvent`]. It is the only part of the application layer that
//! suspends.

use signalbox_core::{CredentialStore, Environment, SessionManager};

use crate::{ConsoleAction, ConsoleEvent};

/// Bridge between Console actions and the session manager.
pub struct Gateway<S, E> {
    sessions: SessionManager<S, E>,
}

impl<S, E> Gateway<S, E>
where
    S: CredentialStore,
    E: Environment,
{
    /// Create a gateway over an existing session manager.
    pub fn new(sessions: SessionManager<S, E>) -> Self {
        Self { sessions }
    }

    /// Execute a Console action and return the resulting Console events.
    ///
    /// Non-credential actions produce no events.
    pub async fn process_action(&mut self, action: ConsoleAction) -> Vec<ConsoleEvent> {
        match action {
            ConsoleAction::Login(form) => {
                match self.sessions.login(&form.identifier, &form.secret, &form.role).await {
                    Ok(_) => match self.sessions.session() {
                        Some(session) => vec![ConsoleEvent::LoginSucceeded { session }],
                        None => vec![],
                    },
                    Err(error) => vec![ConsoleEvent::LoginFailed { error }],
                }
            },
            ConsoleAction::Register(form) => {
                match self.sessions.register(&form.identifier, &form.secret, &form.role).await {
                    Ok(()) => vec![ConsoleEvent::RegisterSucceeded { identifier: form.identifier }],
                    Err(error) => vec![ConsoleEvent::RegisterFailed { error }],
                }
            },
            ConsoleAction::Logout => {
                self.sessions.logout();
                vec![]
            },
            ConsoleAction::Render
            | ConsoleAction::Quit
            | ConsoleAction::StartTicker { .. }
            | ConsoleAction::StopTicker => vec![],
        }
    }

    /// Underlying session manager.
    pub fn sessions(&self) -> &SessionManager<S, E> {
        &self.sessions
    }
}
