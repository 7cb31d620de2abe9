//! Client side of the auth exchange.
//!
//! [`RemoteCredentialStore`] implements the credential store contract by
//! sending the JSON wire shape through an [`AuthTransport`].
//!
//! # Status mapping
//!
//! - 2xx: success (`find` returns the matched record)
//! - 409 on register: [`StoreError::Duplicate`]
//! - 400, 401 or 404 on login: no matching record
//! - anything else, or a transport failure: [`StoreError::Unavailable`]

use async_trait::async_trait;
use signalbox_core::{Credential, CredentialStore, Role, StoreError};

use crate::{
    service::AuthService,
    wire::{AuthRequest, Endpoint, RawResponse, STATUS_CONFLICT},
};

/// Carries one request body to an auth endpoint and returns the response.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    /// Send `body` to `endpoint`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Unavailable`] if the exchange could not complete. A
    /// non-2xx response is not an error at this layer.
    async fn exchange(&self, endpoint: Endpoint, body: Vec<u8>) -> Result<RawResponse, StoreError>;
}

/// In-process transport that hands bodies straight to an [`AuthService`].
#[derive(Debug, Clone)]
pub struct LocalTransport<S> {
    service: AuthService<S>,
}

impl<S: CredentialStore> LocalTransport<S> {
    /// Transport into `service`.
    pub fn new(service: AuthService<S>) -> Self {
        Self { service }
    }

    /// Receiving service.
    pub fn service(&self) -> &AuthService<S> {
        &self.service
    }
}

#[async_trait]
impl<S: CredentialStore> AuthTransport for LocalTransport<S> {
    async fn exchange(&self, endpoint: Endpoint, body: Vec<u8>) -> Result<RawResponse, StoreError> {
        Ok(self.service.handle(endpoint, &body).await.into_raw())
    }
}

/// Credential store backed by the auth routes.
#[derive(Debug, Clone)]
pub struct RemoteCredentialStore<T> {
    transport: T,
}

impl<T: AuthTransport> RemoteCredentialStore<T> {
    /// Store speaking through `transport`.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    async fn send(&self, endpoint: Endpoint, request: &AuthRequest) -> Result<RawResponse, StoreError> {
        let body = request
            .to_json()
            .map_err(|err| StoreError::Unavailable(format!("request encoding failed: {err}")))?;
        let response = self.transport.exchange(endpoint, body).await?;
        tracing::trace!(path = endpoint.path(), status = response.status, "auth exchange");
        Ok(response)
    }
}

#[async_trait]
impl<T: AuthTransport> CredentialStore for RemoteCredentialStore<T> {
    async fn create(&self, credential: &Credential) -> Result<(), StoreError> {
        let response = self.send(Endpoint::Register, &AuthRequest::from_credential(credential)).await?;

        match response.status {
            status if response.is_success() => {
                tracing::trace!(status, "credential created remotely");
                Ok(())
            },
            STATUS_CONFLICT => Err(StoreError::Duplicate(credential.identifier.clone())),
            _ => Err(unavailable(&response)),
        }
    }

    async fn find(
        &self,
        identifier: &str,
        secret: &str,
        role: Role,
    ) -> Result<Option<Credential>, StoreError> {
        let request = AuthRequest::new(identifier, secret, role.as_str());
        let response = self.send(Endpoint::Login, &request).await?;

        if response.is_success() {
            let user = response.reply().ok().and_then(|reply| reply.user);
            let credential = match user {
                Some(user) => Credential::new(user.email, secret, user.role),
                None => Credential::new(identifier, secret, role),
            };
            return Ok(Some(credential));
        }

        match response.status {
            400 | 401 | 404 => Ok(None),
            _ => Err(unavailable(&response)),
        }
    }
}

fn unavailable(response: &RawResponse) -> StoreError {
    let detail = response
        .reply()
        .map(|reply| reply.message().to_string())
        .unwrap_or_else(|_| String::from_utf8_lossy(&response.body).into_owned());
    StoreError::Unavailable(format!("status {}: {detail}", response.status))
}
