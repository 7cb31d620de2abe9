//! Simulated environment.
//!
//! Seeded ChaCha8 randomness and a manually advanced wall clock. Clones share
//! both, so the session manager and the runtime draw from one stream.

#![allow(clippy::disallowed_types, reason = "Locking simple RNG state")]

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicU64, Ordering},
};

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use signalbox_core::Environment;

/// Default seed used when no explicit seed is provided.
const DEFAULT_SEED: u64 = 42;

/// Default wall clock at creation (2023-11-14T22:13:20Z).
pub const DEFAULT_START_SECS: u64 = 1_700_000_000;

/// Deterministic environment for simulation.
#[derive(Clone)]
pub struct SimEnv {
    seed: u64,
    rng: Arc<Mutex<ChaCha8Rng>>,
    clock_secs: Arc<AtomicU64>,
}

impl Default for SimEnv {
    fn default() -> Self {
        Self::with_seed(DEFAULT_SEED)
    }
}

impl SimEnv {
    /// Environment with the default seed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment with an explicit seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            rng: Arc::new(Mutex::new(ChaCha8Rng::seed_from_u64(seed))),
            clock_secs: Arc::new(AtomicU64::new(DEFAULT_START_SECS)),
        }
    }

    /// Seed this environment was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Move the wall clock forward.
    pub fn advance_secs(&self, secs: u64) {
        self.clock_secs.fetch_add(secs, Ordering::SeqCst);
    }

    /// Set the wall clock. Never moves it backwards.
    pub fn set_clock_secs(&self, secs: u64) {
        self.clock_secs.fetch_max(secs, Ordering::SeqCst);
    }
}

impl Environment for SimEnv {
    fn wall_clock_secs(&self) -> u64 {
        self.clock_secs.load(Ordering::SeqCst)
    }

    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        self.rng.lock().expect("SimEnv RNG mutex poisoned").fill_bytes(buffer);
    }
}
