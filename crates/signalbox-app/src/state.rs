//! Observable console state types.
//!
//! The view model: what the auth form is doing, the last notice shown to the
//! user, and the signed-in [`Workspace`].

use std::fmt;

use signalbox_core::{AuthError, OperationalState, Session, ValidationError, ViewRouter};

/// Which request the auth form submits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Sign in with an existing credential.
    #[default]
    Login,
    /// Create a new credential.
    Register,
}

impl AuthMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

/// Contents of the auth form as entered.
///
/// Fields are raw text; validation happens in the session manager.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct AuthForm {
    /// User identifier (email).
    pub identifier: String,
    /// User secret.
    pub secret: String,
    /// Requested role, as typed.
    pub role: String,
}

impl AuthForm {
    /// Create a form.
    pub fn new(
        identifier: impl Into<String>,
        secret: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self { identifier: identifier.into(), secret: secret.into(), role: role.into() }
    }
}

impl fmt::Debug for AuthForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthForm")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTone {
    /// Something went right.
    Success,
    /// Neutral information.
    Info,
    /// Something was refused or failed.
    Error,
}

/// Transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Severity.
    pub tone: NoticeTone,
    /// Short heading.
    pub title: &'static str,
    /// Body text.
    pub detail: String,
}

impl Notice {
    fn new(tone: NoticeTone, title: &'static str, detail: impl Into<String>) -> Self {
        Self { tone, title, detail: detail.into() }
    }

    pub(crate) fn login_succeeded(session: &Session) -> Self {
        Self::new(NoticeTone::Success, "Login Successful", format!("Welcome back, {}!", session.role))
    }

    pub(crate) fn registered() -> Self {
        Self::new(
            NoticeTone::Success,
            "Registration Successful",
            "User registered successfully. You can now log in.",
        )
    }

    pub(crate) fn signed_out() -> Self {
        Self::new(NoticeTone::Info, "Signed Out", "Your session has ended.")
    }

    pub(crate) fn access_denied(view: &str) -> Self {
        Self::new(NoticeTone::Error, "Access Denied", format!("You cannot open {view:?}."))
    }

    /// Notice for a failed credential request in `mode`.
    pub(crate) fn auth_failed(mode: AuthMode, error: &AuthError) -> Self {
        let rejected = match mode {
            AuthMode::Login => "Login Failed",
            AuthMode::Register => "Registration Failed",
        };

        match error {
            AuthError::Validation(ValidationError::MissingField(_)) => Self::new(
                NoticeTone::Error,
                "Missing Information",
                "Please fill in all fields and select a role.",
            ),
            AuthError::Validation(err) => {
                Self::new(NoticeTone::Error, "Missing Information", err.to_string())
            },
            AuthError::InvalidCredentials => {
                Self::new(NoticeTone::Error, rejected, "Invalid credentials")
            },
            AuthError::DuplicateIdentifier(_) => {
                Self::new(NoticeTone::Error, rejected, "User already exists")
            },
            AuthError::Store(err) => Self::new(NoticeTone::Error, "Error", err.to_string()),
        }
    }
}

/// Everything that exists only while signed in.
///
/// Created on login, dropped on logout. Its absence is what makes every view
/// unreachable while signed out.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// The active session.
    pub session: Session,
    /// Menu and active view for the session's role.
    pub router: ViewRouter,
    /// Live operational picture.
    pub operations: OperationalState,
}
