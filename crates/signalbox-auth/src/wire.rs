//! Wire shapes for the auth exchange.
//!
//! Requests carry `{email, password, role}` for both login and registration.
//! Successful responses carry `{msg, user?}`; failures carry `{msg?, error?}`
//! together with a non-2xx status. Bodies are JSON.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use signalbox_core::{Credential, Role};
use thiserror::Error;

/// Success.
pub const STATUS_OK: u16 = 200;
/// Missing fields or invalid credentials.
pub const STATUS_BAD_REQUEST: u16 = 400;
/// Identifier already registered.
pub const STATUS_CONFLICT: u16 = 409;
/// Store failure.
pub const STATUS_INTERNAL: u16 = 500;

const FALLBACK_BODY: &[u8] = br#"{"error":"response encoding failed"}"#;

/// Errors decoding or encoding wire bodies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WireError {
    /// Body is not valid JSON of the expected shape.
    #[error("malformed body: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for WireError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Auth route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Credential lookup.
    Login,
    /// Credential creation.
    Register,
}

impl Endpoint {
    /// Request path.
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/api/auth/login",
            Self::Register => "/api/auth/register",
        }
    }
}

/// Request body for both routes.
///
/// Absent and `null` fields decode as empty strings so the receiver can
/// report them as missing rather than as malformed JSON.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthRequest {
    /// User identifier.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    /// User secret.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub password: String,
    /// Requested role (wire name).
    #[serde(default, deserialize_with = "null_as_empty")]
    pub role: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl AuthRequest {
    /// Create a request body.
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self { email: email.into(), password: password.into(), role: role.into() }
    }

    /// Request body carrying a credential.
    pub fn from_credential(credential: &Credential) -> Self {
        Self::new(&credential.identifier, &credential.secret, credential.role.as_str())
    }

    /// Decode from JSON.
    pub fn from_json(body: &[u8]) -> Result<Self, WireError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Encode as JSON.
    pub fn to_json(&self) -> Result<Vec<u8>, WireError> {
        Ok(serde_json::to_vec(self)?)
    }
}

impl fmt::Debug for AuthRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("role", &self.role)
            .finish()
    }
}

/// Public view of a stored user. Never includes the secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserView {
    /// User identifier.
    pub email: String,
    /// Granted role.
    pub role: Role,
}

impl From<&Credential> for UserView {
    fn from(credential: &Credential) -> Self {
        Self { email: credential.identifier.clone(), role: credential.role }
    }
}

/// Response body for both routes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuthReply {
    /// Human-readable outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg: Option<String>,
    /// Backend error text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The user concerned, on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserView>,
}

impl AuthReply {
    /// Success body.
    pub fn success(msg: impl Into<String>, user: UserView) -> Self {
        Self { msg: Some(msg.into()), error: None, user: Some(user) }
    }

    /// Rejection body (`msg` only).
    pub fn rejected(msg: impl Into<String>) -> Self {
        Self { msg: Some(msg.into()), ..Self::default() }
    }

    /// Backend failure body (`error` only).
    pub fn fault(error: impl Into<String>) -> Self {
        Self { error: Some(error.into()), ..Self::default() }
    }

    /// Best message for display: `msg`, else `error`, else a generic line.
    pub fn message(&self) -> &str {
        self.msg.as_deref().or(self.error.as_deref()).unwrap_or("Something went wrong")
    }

    /// Decode from JSON.
    pub fn from_json(body: &[u8]) -> Result<Self, WireError> {
        Ok(serde_json::from_slice(body)?)
    }
}

/// Typed response: status plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// Decoded body.
    pub body: AuthReply,
}

impl WireResponse {
    /// Create a response.
    pub fn new(status: u16, body: AuthReply) -> Self {
        Self { status, body }
    }

    /// Whether the status is in the 2xx class.
    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }

    /// Encode the body. An encoding failure becomes a 500 with a fixed body.
    pub fn into_raw(self) -> RawResponse {
        match serde_json::to_vec(&self.body) {
            Ok(body) => RawResponse { status: self.status, body },
            Err(err) => {
                tracing::error!(error = %err, "failed to encode auth reply");
                RawResponse { status: STATUS_INTERNAL, body: FALLBACK_BODY.to_vec() }
            },
        }
    }
}

/// Undecoded response as carried by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP-style status code.
    pub status: u16,
    /// JSON body bytes.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is in the 2xx class.
    pub fn is_success(&self) -> bool {
        is_success(self.status)
    }

    /// Decode the body.
    pub fn reply(&self) -> Result<AuthReply, WireError> {
        AuthReply::from_json(&self.body)
    }
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}
