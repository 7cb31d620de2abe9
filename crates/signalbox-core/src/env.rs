//! Environment abstraction for deterministic testing.
//!
//! Decouples console logic from system resources (wall clock, randomness).
//! Production uses the real clock and OS entropy; simulation uses a seeded
//! RNG and a virtual clock so every tick perturbation is reproducible.

/// Abstract environment providing wall-clock time and randomness.
///
/// Implementations MUST guarantee:
///
/// - `wall_clock_secs()` never goes backwards within one execution
/// - Given the same seed, a simulated environment yields the same bytes
pub trait Environment: Clone + Send + Sync + 'static {
    /// Seconds since the Unix epoch.
    ///
    /// Used to stamp sessions and alerts.
    fn wall_clock_secs(&self) -> u64;

    /// Fills the provided buffer with random bytes.
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }
}
