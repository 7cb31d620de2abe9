//! Ready-made stacks for end-to-end scenarios.
//!
//! The full credential path used by simulation: a memory store behind the
//! auth service, reached through the local transport by the remote store
//! that the session manager talks to.

use signalbox_app::{ConsoleConfig, Runtime};
use signalbox_auth::{AuthService, LocalTransport, MemoryCredentialStore, RemoteCredentialStore};
use signalbox_core::Credential;

use crate::{SimDriver, SimEnv};

/// Credential store speaking the wire protocol to an in-process service.
pub type WireStore = RemoteCredentialStore<LocalTransport<MemoryCredentialStore>>;

/// Runtime wired for simulation.
pub type SimRuntime = Runtime<SimDriver, WireStore, SimEnv>;

/// Wire store whose backing records start as `credentials`.
pub fn wire_store(credentials: impl IntoIterator<Item = Credential>) -> WireStore {
    let backing = MemoryCredentialStore::with_credentials(credentials);
    RemoteCredentialStore::new(LocalTransport::new(AuthService::new(backing)))
}

/// Records behind a wire store.
pub fn backing(store: &WireStore) -> &MemoryCredentialStore {
    store.transport().service().store()
}

/// Simulation runtime over an empty wire store.
pub fn sim_runtime(driver: SimDriver, env: SimEnv, config: ConsoleConfig) -> SimRuntime {
    Runtime::new(driver, wire_store(Vec::new()), env, config)
}
