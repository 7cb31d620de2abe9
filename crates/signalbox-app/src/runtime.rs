//! Generic runtime for console orchestration.
//!
//! The Runtime drives the console event loop, coordinating between:
//! - [`Console`]: console state machine
//! - [`Gateway`]: credential requests through the session manager
//! - [`Ticker`]: periodic operational refresh while signed in
//! - [`Driver`]: platform-specific input and rendering

use signalbox_core::{Alert, CredentialStore, Environment, SessionManager, draw_perturbation};

use crate::{Console, ConsoleAction, ConsoleConfig, ConsoleEvent, Driver, Gateway, Ticker};

/// What woke the loop.
enum Wake {
    Input(Option<crate::ConsoleInput>),
    Tick,
}

/// Generic runtime that orchestrates Console, Gateway and Driver.
///
/// # Type Parameters
///
/// - `D`: Platform-specific I/O driver
/// - `S`: Credential store
/// - `E`: Environment for wall clock and tick perturbations
pub struct Runtime<D, S, E>
where
    D: Driver,
    S: CredentialStore,
    E: Environment,
{
    driver: D,
    console: Console,
    gateway: Gateway<S, E>,
    env: E,
    ticker: Option<Ticker>,
}

impl<D, S, E> Runtime<D, S, E>
where
    D: Driver,
    S: CredentialStore,
    E: Environment,
{
    /// Create a runtime over `store`, signed out.
    pub fn new(driver: D, store: S, env: E, config: ConsoleConfig) -> Self {
        let sessions = SessionManager::new(store, env.clone())
            .with_request_timeout(config.request_timeout);
        Self {
            driver,
            console: Console::new(config),
            gateway: Gateway::new(sessions),
            env,
            ticker: None,
        }
    }

    /// Run the main event loop until the user quits or input ends.
    ///
    /// Each cycle waits for whichever comes first, user input or a refresh
    /// tick, feeds it to the console and executes the resulting actions.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver encounters an I/O error.
    pub async fn run(&mut self) -> Result<(), D::Error> {
        self.driver.render(&self.console)?;

        loop {
            let should_quit = self.process_cycle().await?;
            if should_quit {
                break;
            }
        }

        self.ticker = None;
        self.driver.stop();
        Ok(())
    }

    /// Process one cycle of the event loop.
    ///
    /// Returns `true` if the runtime should stop.
    async fn process_cycle(&mut self) -> Result<bool, D::Error> {
        let wake = {
            let Self { driver, ticker, .. } = self;
            tokio::select! {
                input = driver.poll_input() => Wake::Input(input?),
                () = next_tick(ticker) => Wake::Tick,
            }
        };

        let event = match wake {
            Wake::Input(Some(input)) => ConsoleEvent::Input(input),
            Wake::Input(None) => {
                tracing::debug!("input closed");
                return Ok(true);
            },
            Wake::Tick => {
                let delta = draw_perturbation(&self.env);
                tracing::trace!(delta, "refresh tick");
                ConsoleEvent::Tick { delta }
            },
        };

        let actions = self.console.handle(event);
        self.process_actions(actions).await
    }

    /// Feed an externally raised alert into the console.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails.
    pub async fn raise_alert(&mut self, alert: Alert) -> Result<(), D::Error> {
        let actions = self.console.handle(ConsoleEvent::AlertRaised(alert));
        self.process_actions(actions).await.map(|_| ())
    }

    /// Process actions returned by the Console.
    ///
    /// Returns `true` if should quit.
    async fn process_actions(
        &mut self,
        initial_actions: Vec<ConsoleAction>,
    ) -> Result<bool, D::Error> {
        let mut pending_actions = initial_actions;

        while !pending_actions.is_empty() {
            let actions = std::mem::take(&mut pending_actions);

            for action in actions {
                match action {
                    ConsoleAction::Render => self.driver.render(&self.console)?,
                    ConsoleAction::Quit => return Ok(true),
                    ConsoleAction::StartTicker { period } => {
                        tracing::debug!(?period, "ticker started");
                        self.ticker = Some(Ticker::new(period));
                    },
                    ConsoleAction::StopTicker => {
                        if self.ticker.take().is_some() {
                            tracing::debug!("ticker stopped");
                        }
                    },

                    // Credential operations go through the gateway
                    ConsoleAction::Login(_) | ConsoleAction::Register(_) | ConsoleAction::Logout => {
                        let events = self.gateway.process_action(action).await;
                        for event in events {
                            pending_actions.extend(self.console.handle(event));
                        }
                    },
                }
            }
        }
        Ok(false)
    }

    /// Whether the refresh ticker is running.
    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    /// Get a reference to the Console
    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Get a reference to the Gateway
    pub fn gateway(&self) -> &Gateway<S, E> {
        &self.gateway
    }

    /// Get a reference to the Driver
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Get a mutable reference to the Driver
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }
}

/// Resolve on the next tick, or never if no ticker is running.
async fn next_tick(ticker: &mut Option<Ticker>) {
    match ticker {
        Some(ticker) => ticker.tick().await,
        None => std::future::pending().await,
    }
}
