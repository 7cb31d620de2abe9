//! Driver trait for abstracting I/O operations.
//!
//! The [`Driver`] trait decouples the runtime from any particular frontend.
//! Each frontend implements the trait to supply user input and present the
//! console, while the generic [`crate::Runtime`] handles all orchestration.

use std::future::Future;

use crate::{Console, ConsoleInput};

/// Abstracts I/O operations for the console runtime.
///
/// # Implementations
///
/// - **Terminal**: line commands on stdin, text rendering to stdout
/// - **Simulation**: scripted inputs and captured frames under virtual time
pub trait Driver: Send {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + 'static;

    /// Wait for the next user input.
    ///
    /// Returns `None` once the input source is exhausted. Must be cancel
    /// safe: the runtime drops this future whenever a tick wins the race.
    fn poll_input(
        &mut self,
    ) -> impl Future<Output = Result<Option<ConsoleInput>, Self::Error>> + Send;

    /// Present the console state.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    fn render(&mut self, console: &Console) -> Result<(), Self::Error>;

    /// Release frontend resources.
    fn stop(&mut self);
}
