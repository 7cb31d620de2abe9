//! Simulation driver implementing the Driver trait.
//!
//! `SimDriver` plays a script of user inputs and virtual-time waits, and
//! captures a [`ConsoleSnapshot`] on every render. It implements [`Driver`] so
//! the same [`signalbox_app::Runtime`] orchestration runs in both the terminal
//! binary and simulation.

use std::{collections::VecDeque, time::Duration};

use signalbox_app::{AuthForm, Console, ConsoleInput, Driver};
use tokio::time::Instant;

use crate::invariants::{ConsoleSnapshot, InvariantRegistry};

/// Error type for simulation driver.
#[derive(Debug, Clone)]
pub struct SimDriverError(pub String);

impl std::fmt::Display for SimDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SimDriverError: {}", self.0)
    }
}

impl std::error::Error for SimDriverError {}

/// One scripted step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Deliver a user input.
    Input(ConsoleInput),
    /// Let virtual time pass with no input.
    Wait(Duration),
}

/// Simulation driver for deterministic testing.
pub struct SimDriver {
    script: VecDeque<Step>,
    /// Deadline of the wait in progress, kept across cancelled polls.
    wake_at: Option<Instant>,
    frames: Vec<ConsoleSnapshot>,
    invariants: Option<InvariantRegistry>,
    fail_renders_after: Option<usize>,
    stopped: bool,
}

impl Default for SimDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl SimDriver {
    /// Create a driver with an empty script.
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            wake_at: None,
            frames: Vec::new(),
            invariants: None,
            fail_renders_after: None,
            stopped: false,
        }
    }

    /// Enable invariant checking on every render.
    #[must_use]
    pub fn with_invariants(mut self, registry: InvariantRegistry) -> Self {
        self.invariants = Some(registry);
        self
    }

    /// Fail every render after the first `renders` succeed.
    #[must_use]
    pub fn failing_after(mut self, renders: usize) -> Self {
        self.fail_renders_after = Some(renders);
        self
    }

    /// Append a step.
    pub fn push(&mut self, step: Step) -> &mut Self {
        self.script.push_back(step);
        self
    }

    /// Append a user input.
    pub fn input(&mut self, input: ConsoleInput) -> &mut Self {
        self.push(Step::Input(input))
    }

    /// Append a wait.
    pub fn wait(&mut self, duration: Duration) -> &mut Self {
        self.push(Step::Wait(duration))
    }

    /// Append a form submission.
    pub fn submit(&mut self, identifier: &str, secret: &str, role: &str) -> &mut Self {
        self.input(ConsoleInput::Submit(AuthForm::new(identifier, secret, role)))
    }

    /// Append a view selection.
    pub fn select(&mut self, view: &str) -> &mut Self {
        self.input(ConsoleInput::SelectView(view.to_string()))
    }

    /// Steps not yet played.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Every captured frame, oldest first.
    pub fn frames(&self) -> &[ConsoleSnapshot] {
        &self.frames
    }

    /// Most recent frame.
    pub fn last_frame(&self) -> Option<&ConsoleSnapshot> {
        self.frames.last()
    }

    /// Whether the runtime has stopped the driver.
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}

impl Driver for SimDriver {
    type Error = SimDriverError;

    async fn poll_input(&mut self) -> Result<Option<ConsoleInput>, Self::Error> {
        loop {
            match self.script.front() {
                None => return Ok(None),
                Some(&Step::Wait(duration)) => {
                    let deadline = *self.wake_at.get_or_insert_with(|| {
                        tracing::trace!(?duration, "scripted wait");
                        Instant::now() + duration
                    });
                    tokio::time::sleep_until(deadline).await;
                    self.wake_at = None;
                    self.script.pop_front();
                },
                Some(Step::Input(_)) => {
                    if let Some(Step::Input(input)) = self.script.pop_front() {
                        return Ok(Some(input));
                    }
                },
            }
        }
    }

    fn render(&mut self, console: &Console) -> Result<(), Self::Error> {
        if let Some(limit) = self.fail_renders_after
            && self.frames.len() >= limit
        {
            tracing::debug!(limit, "injecting render failure");
            return Err(SimDriverError(format!("render failed after {limit} frames")));
        }

        let frame = ConsoleSnapshot::capture(console);
        if let Some(registry) = &self.invariants {
            registry.assert_all(&frame, &format!("at frame {}", self.frames.len()));
        }
        self.frames.push(frame);
        Ok(())
    }

    fn stop(&mut self) {
        self.stopped = true;
    }
}

#[cfg(test)]
mod tests {
    use signalbox_app::ConsoleConfig;

    use super::*;

    #[tokio::test]
    async fn inputs_play_in_order_then_end() {
        let mut driver = SimDriver::new();
        driver.input(ConsoleInput::ToggleMode).input(ConsoleInput::Quit);

        assert_eq!(driver.poll_input().await.unwrap(), Some(ConsoleInput::ToggleMode));
        assert_eq!(driver.poll_input().await.unwrap(), Some(ConsoleInput::Quit));
        assert_eq!(driver.poll_input().await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn wait_survives_cancellation() {
        let start = Instant::now();
        let mut driver = SimDriver::new();
        driver.wait(Duration::from_secs(10)).input(ConsoleInput::Logout);

        let raced = tokio::time::timeout(Duration::from_secs(3), driver.poll_input()).await;
        assert!(raced.is_err());

        assert_eq!(driver.poll_input().await.unwrap(), Some(ConsoleInput::Logout));
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[test]
    fn render_captures_and_can_fail() {
        let console = Console::new(ConsoleConfig::default());
        let mut driver = SimDriver::new().failing_after(1);

        driver.render(&console).unwrap();
        assert!(driver.render(&console).is_err());
        assert_eq!(driver.frames().len(), 1);
        assert_eq!(driver.last_frame().and_then(|f| f.role), None);
    }
}
