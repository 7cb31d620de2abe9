//! Server side of the auth routes.
//!
//! # Responses
//!
//! | Route    | Outcome                       | Status | Body                                |
//! |----------|-------------------------------|--------|-------------------------------------|
//! | register | empty or null field           | 400    | `msg: All fields are required`      |
//! | register | unknown role                  | 400    | `msg: Invalid role`                 |
//! | register | identifier taken              | 409    | `msg: User already exists`          |
//! | register | created                       | 200    | `msg: User registered successfully` |
//! | login    | no match (any field)          | 400    | `msg: Invalid credentials`          |
//! | login    | match                         | 200    | `msg: Login successful`             |
//! | both     | store failure                 | 500    | `error: <store error>`              |
//! | both     | body is not a JSON object     | 400    | `msg: Malformed request body`       |

use signalbox_core::{Credential, CredentialStore, Role, StoreError};

use crate::wire::{
    AuthReply, AuthRequest, Endpoint, STATUS_BAD_REQUEST, STATUS_CONFLICT, STATUS_INTERNAL,
    STATUS_OK, UserView, WireResponse,
};

const MISSING_FIELDS: &str = "All fields are required";
const INVALID_ROLE: &str = "Invalid role";
const USER_EXISTS: &str = "User already exists";
const REGISTERED: &str = "User registered successfully";
const INVALID_CREDENTIALS: &str = "Invalid credentials";
const LOGGED_IN: &str = "Login successful";
const MALFORMED: &str = "Malformed request body";

/// Handles auth requests against a credential store.
#[derive(Debug, Clone)]
pub struct AuthService<S> {
    store: S,
}

impl<S: CredentialStore> AuthService<S> {
    /// Serve requests from `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Decode `body` and dispatch to the route handler.
    pub async fn handle(&self, endpoint: Endpoint, body: &[u8]) -> WireResponse {
        let request = match AuthRequest::from_json(body) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(path = endpoint.path(), error = %err, "rejecting malformed body");
                return WireResponse::new(STATUS_BAD_REQUEST, AuthReply::rejected(MALFORMED));
            },
        };

        let response = match endpoint {
            Endpoint::Register => self.register(request).await,
            Endpoint::Login => self.login(request).await,
        };
        tracing::debug!(path = endpoint.path(), status = response.status, "auth request handled");
        response
    }

    async fn register(&self, request: AuthRequest) -> WireResponse {
        if [&request.email, &request.password, &request.role].iter().any(|f| f.is_empty()) {
            return WireResponse::new(STATUS_BAD_REQUEST, AuthReply::rejected(MISSING_FIELDS));
        }
        let Ok(role) = request.role.parse::<Role>() else {
            return WireResponse::new(STATUS_BAD_REQUEST, AuthReply::rejected(INVALID_ROLE));
        };

        let credential = Credential::new(request.email, request.password, role);
        match self.store.create(&credential).await {
            Ok(()) => WireResponse::new(
                STATUS_OK,
                AuthReply::success(REGISTERED, UserView::from(&credential)),
            ),
            Err(StoreError::Duplicate(_)) => {
                WireResponse::new(STATUS_CONFLICT, AuthReply::rejected(USER_EXISTS))
            },
            Err(err) => internal(&err),
        }
    }

    async fn login(&self, request: AuthRequest) -> WireResponse {
        let Ok(role) = request.role.parse::<Role>() else {
            return WireResponse::new(STATUS_BAD_REQUEST, AuthReply::rejected(INVALID_CREDENTIALS));
        };

        match self.store.find(&request.email, &request.password, role).await {
            Ok(Some(credential)) => {
                WireResponse::new(STATUS_OK, AuthReply::success(LOGGED_IN, (&credential).into()))
            },
            Ok(None) => {
                WireResponse::new(STATUS_BAD_REQUEST, AuthReply::rejected(INVALID_CREDENTIALS))
            },
            Err(err) => internal(&err),
        }
    }
}

fn internal(err: &StoreError) -> WireResponse {
    tracing::error!(error = %err, "credential store failed");
    WireResponse::new(STATUS_INTERNAL, AuthReply::fault(err.to_string()))
}
