//! Chaotic credential store for fault injection testing
//!
//! Wraps another store and randomly fails calls with
//! [`StoreError::Unavailable`], so callers can be checked for clean recovery
//! from backend outages.

#![allow(clippy::disallowed_types, reason = "Locking simple RNG state")]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use signalbox_core::{Credential, CredentialStore, Role, StoreError};

const DEFAULT_SEED: u64 = 0x1234_5678_9ABC_DEF0;

/// Message carried by injected failures.
pub(crate) const INJECTED_FAULT: &str = "injected fault";

/// Store wrapper that fails a configured fraction of calls.
///
/// The RNG is a seeded LCG, so the same seed and call sequence reproduce the
/// same failures. Clones share RNG state and the operation counter.
#[derive(Clone)]
pub struct ChaoticCredentialStore<S> {
    inner: S,
    /// Failure rate (0.0 = never fail, 1.0 = always fail)
    failure_rate: f64,
    rng: Arc<Mutex<Lcg>>,
    operations: Arc<AtomicUsize>,
    injected: Arc<AtomicUsize>,
}

struct Lcg {
    state: u64,
}

impl Lcg {
    /// Next value in [0.0, 1.0)
    fn next(&mut self) -> f64 {
        const A: u64 = 1_664_525;
        const C: u64 = 1_013_904_223;
        const M: u64 = 1u64 << 32;

        self.state = (A.wrapping_mul(self.state).wrapping_add(C)) % M;
        (self.state as f64) / (M as f64)
    }
}

impl<S: CredentialStore> ChaoticCredentialStore<S> {
    /// Wrap `inner` with the default seed.
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    pub fn new(inner: S, failure_rate: f64) -> Self {
        Self::with_seed(inner, failure_rate, DEFAULT_SEED)
    }

    /// Wrap `inner` with an explicit seed.
    ///
    /// # Panics
    ///
    /// Panics if `failure_rate` is not in [0.0, 1.0]
    pub fn with_seed(inner: S, failure_rate: f64, seed: u64) -> Self {
        assert!(
            (0.0..=1.0).contains(&failure_rate),
            "failure_rate must be between 0.0 and 1.0, got {failure_rate}"
        );

        Self {
            inner,
            failure_rate,
            rng: Arc::new(Mutex::new(Lcg { state: seed })),
            operations: Arc::new(AtomicUsize::new(0)),
            injected: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Calls attempted through this wrapper.
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    /// Calls that failed by injection.
    pub fn injected_count(&self) -> usize {
        self.injected.load(Ordering::SeqCst)
    }

    fn roll(&self) -> Result<(), StoreError> {
        self.operations.fetch_add(1, Ordering::SeqCst);

        #[allow(clippy::expect_used)]
        let fail = self.rng.lock().expect("Lcg mutex poisoned").next() < self.failure_rate;
        if fail {
            self.injected.fetch_add(1, Ordering::SeqCst);
            tracing::warn!("injecting credential store failure");
            return Err(StoreError::Unavailable(INJECTED_FAULT.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<S: CredentialStore> CredentialStore for ChaoticCredentialStore<S> {
    async fn create(&self, credential: &Credential) -> Result<(), StoreError> {
        self.roll()?;
        self.inner.create(credential).await
    }

    async fn find(
        &self,
        identifier: &str,
        secret: &str,
        role: Role,
    ) -> Result<Option<Credential>, StoreError> {
        self.roll()?;
        self.inner.find(identifier, secret, role).await
    }
}
