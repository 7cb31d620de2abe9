#![allow(clippy::disallowed_types, reason = "Synchronous in-memory operations only")]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use signalbox_core::{Credential, CredentialStore, Role, StoreError};

/// In-memory credential store for tests, simulation and demos
///
/// Records are keyed by identifier, which makes uniqueness a map lookup.
/// Clones share the same records. Uses `lock().expect()`, which panics if the
/// mutex is poisoned; acceptable outside production.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    records: Arc<Mutex<HashMap<String, Credential>>>,
}

impl MemoryCredentialStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `credentials`. Later duplicates are dropped.
    pub fn with_credentials(credentials: impl IntoIterator<Item = Credential>) -> Self {
        let mut records = HashMap::new();
        for credential in credentials {
            records.entry(credential.identifier.clone()).or_insert(credential);
        }
        Self { records: Arc::new(Mutex::new(records)) }
    }

    /// Number of registered identifiers.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn len(&self) -> usize {
        self.records.lock().expect("Mutex poisoned").len()
    }

    /// Whether no identifiers are registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `identifier` is registered.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[allow(clippy::expect_used)]
    pub fn contains(&self, identifier: &str) -> bool {
        self.records.lock().expect("Mutex poisoned").contains_key(identifier)
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    #[allow(clippy::expect_used)]
    async fn create(&self, credential: &Credential) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("Mutex poisoned");
        if records.contains_key(&credential.identifier) {
            return Err(StoreError::Duplicate(credential.identifier.clone()));
        }
        records.insert(credential.identifier.clone(), credential.clone());
        Ok(())
    }

    #[allow(clippy::expect_used)]
    async fn find(
        &self,
        identifier: &str,
        secret: &str,
        role: Role,
    ) -> Result<Option<Credential>, StoreError> {
        let records = self.records.lock().expect("Mutex poisoned");
        Ok(records.get(identifier).filter(|record| record.matches(identifier, secret, role)).cloned())
    }
}
