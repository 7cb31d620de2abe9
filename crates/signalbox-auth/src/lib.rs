//! Credential storage and the auth wire protocol.
//!
//! Implementations of [`signalbox_core::CredentialStore`] plus both sides of
//! the JSON request/response exchange used for login and registration.
//!
//! # Components
//!
//! - [`MemoryCredentialStore`]: in-process store for tests, simulation and demos
//! - [`ChaoticCredentialStore`]: fault-injecting wrapper for chaos testing
//! - [`AuthService`]: server side of `/api/auth/register` and `/api/auth/login`
//! - [`RemoteCredentialStore`]: client side, speaks the wire shape through an
//!   [`AuthTransport`]
//! - [`LocalTransport`]: in-process transport straight into an [`AuthService`]
//!
//! The HTTP layer itself is not part of this crate. Anything that can carry a
//! JSON body and a status code can implement [`AuthTransport`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chaotic;
mod memory;
mod remote;
mod service;
pub mod wire;

pub use chaotic::ChaoticCredentialStore;
pub use memory::MemoryCredentialStore;
pub use remote::{AuthTransport, LocalTransport, RemoteCredentialStore};
pub use service::AuthService;
pub use wire::{AuthReply, AuthRequest, Endpoint, RawResponse, UserView, WireError, WireResponse};
