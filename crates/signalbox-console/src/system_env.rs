//! Production environment using the system clock and OS randomness.
//!
//! Non-deterministic by nature: tick perturbations come from getrandom and
//! timestamps from the real wall clock.

use signalbox_core::Environment;

/// Production environment.
///
/// # Panics
///
/// Panics if the OS RNG fails or the clock reads before the Unix epoch.
/// Neither is recoverable for a process stamping sessions and alerts.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer).expect("invariant: OS RNG failure is unrecoverable");
    }

    #[allow(clippy::disallowed_methods)]
    #[allow(clippy::expect_used)]
    fn wall_clock_secs(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("invariant: system clock is after Unix epoch (1970-01-01)")
            .as_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_bytes_differ() {
        let env = SystemEnv::new();

        let mut first = [0u8; 32];
        let mut second = [0u8; 32];
        env.random_bytes(&mut first);
        env.random_bytes(&mut second);

        assert_ne!(first, second);
    }

    #[test]
    fn wall_clock_is_after_2023() {
        assert!(SystemEnv::new().wall_clock_secs() > 1_700_000_000);
    }
}
