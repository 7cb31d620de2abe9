//! Session manager.
//!
//! Owns the single authenticated session of the process. Two states,
//! [`SessionState::Unauthenticated`] and [`SessionState::Authenticated`]:
//!
//! - `login` success: Unauthenticated -> Authenticated(role)
//! - `login` failure: no state change, error returned to the caller
//! - `logout`: Authenticated -> Unauthenticated (no-op when already signed out)
//! - `register`: never changes state, whatever the outcome
//!
//! Field validation happens locally, before the credential store is
//! contacted. Every store round trip is bounded by the request timeout, so an
//! unresponsive store surfaces as [`StoreError::Timeout`] instead of leaving a
//! request in flight forever. Callers track the in-flight request themselves
//! as a [`PendingRequest`].

use std::{future::Future, time::Duration};

use crate::{
    env::Environment,
    error::{AuthError, Field, StoreError, ValidationError},
    role::Role,
    store::{Credential, CredentialStore},
};

/// Default bound on a credential store round trip.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The single authenticated context of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// Role granted at login.
    pub role: Role,
    /// Wall-clock seconds when the session was established.
    pub started_at_secs: u64,
}

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No session.
    Unauthenticated,
    /// Signed in.
    Authenticated(Session),
}

/// Credential request awaiting the store, as tracked by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingRequest {
    /// Login lookup in flight.
    Login,
    /// Registration in flight.
    Register,
}

/// Owns the session lifecycle over a credential store.
///
/// Generic over the store and the environment so simulation can substitute
/// both. `&mut self` on the async operations guarantees at most one
/// credential request in flight.
pub struct SessionManager<S, E> {
    store: S,
    env: E,
    state: SessionState,
    request_timeout: Duration,
}

impl<S, E> SessionManager<S, E>
where
    S: CredentialStore,
    E: Environment,
{
    /// Create a signed-out manager with the default request timeout.
    pub fn new(store: S, env: E) -> Self {
        Self {
            store,
            env,
            state: SessionState::Unauthenticated,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Override the bound on each credential store round trip.
    #[must_use]
    pub fn with_request_timeout(mut self, request_timeout: Duration) -> Self {
        self.request_timeout = request_timeout;
        self
    }

    /// Authenticate and establish a session with the given role.
    ///
    /// Succeeds only if the store holds an exact match of all three fields.
    /// A successful login while already signed in replaces the session.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] if a field is empty or the role is unknown;
    ///   the store is not contacted
    /// - [`AuthError::InvalidCredentials`] if no record matches
    /// - [`AuthError::Store`] on store failure or timeout
    pub async fn login(
        &mut self,
        identifier: &str,
        secret: &str,
        role: &str,
    ) -> Result<Role, AuthError> {
        let role = validate(identifier, secret, role)?;

        let found =
            bounded(self.request_timeout, self.store.find(identifier, secret, role)).await;

        match found? {
            Some(_) => {
                let session = Session { role, started_at_secs: self.env.wall_clock_secs() };
                if let SessionState::Authenticated(previous) = self.state {
                    tracing::debug!(previous = %previous.role, "replacing active session");
                }
                self.state = SessionState::Authenticated(session);
                tracing::info!(%role, "session established");
                Ok(role)
            },
            None => {
                tracing::warn!(%role, "login rejected: no matching credential");
                Err(AuthError::InvalidCredentials)
            },
        }
    }

    /// Create a credential. Does not sign in.
    ///
    /// # Errors
    ///
    /// - [`AuthError::Validation`] if a field is empty or the role is unknown
    /// - [`AuthError::DuplicateIdentifier`] if the identifier is taken
    /// - [`AuthError::Store`] on store failure or timeout
    pub async fn register(
        &mut self,
        identifier: &str,
        secret: &str,
        role: &str,
    ) -> Result<(), AuthError> {
        let role = validate(identifier, secret, role)?;
        let credential = Credential::new(identifier, secret, role);

        let created = bounded(self.request_timeout, self.store.create(&credential)).await;

        if let Err(err) = created {
            tracing::warn!(%role, error = %err, "registration rejected");
            return Err(err.into());
        }

        tracing::info!(%role, "credential registered");
        Ok(())
    }

    /// Destroy the current session. Idempotent.
    ///
    /// Returns the session that was torn down, `None` if already signed out.
    pub fn logout(&mut self) -> Option<Session> {
        match std::mem::replace(&mut self.state, SessionState::Unauthenticated) {
            SessionState::Authenticated(session) => {
                tracing::info!(role = %session.role, "session closed");
                Some(session)
            },
            SessionState::Unauthenticated => None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Active session. `None` when signed out.
    pub fn session(&self) -> Option<Session> {
        match self.state {
            SessionState::Authenticated(session) => Some(session),
            SessionState::Unauthenticated => None,
        }
    }

    /// Role of the active session. `None` when signed out.
    pub fn role(&self) -> Option<Role> {
        self.session().map(|session| session.role)
    }

    /// Bound applied to each credential store round trip.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Underlying credential store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Check every field locally. Order: identifier, secret, role.
fn validate(identifier: &str, secret: &str, role: &str) -> Result<Role, ValidationError> {
    let fields = [(Field::Identifier, identifier), (Field::Secret, secret), (Field::Role, role)];
    if let Some((field, _)) = fields.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ValidationError::MissingField(*field));
    }

    role.parse::<Role>().map_err(|_| ValidationError::UnrecognizedRole(role.to_string()))
}

async fn bounded<T>(
    timeout: Duration,
    request: impl Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    match tokio::time::timeout(timeout, request).await {
        Ok(result) => result,
        Err(_) => Err(StoreError::Timeout(timeout)),
    }
}
