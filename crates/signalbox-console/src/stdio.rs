//! Line-oriented driver.
//!
//! Implements [`Driver`] over any async line source and any blocking writer.
//! Production wires it to stdin and stdout; tests use in-memory buffers.

use std::{collections::VecDeque, io};

use signalbox_app::{AuthForm, AuthMode, Console, ConsoleInput, Driver};
use signalbox_core::Environment;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::{
    command::{self, Command, HELP},
    render::Screen,
};

/// Line driver errors.
#[derive(Debug, Error)]
pub enum StdioError {
    /// I/O error reading input or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Driver reading commands line by line and writing text frames.
///
/// Remembers the auth mode of the last rendered frame so `login` and
/// `register` can switch modes before submitting.
pub struct StdioDriver<R, W, E> {
    lines: Lines<R>,
    out: W,
    env: E,
    queued: VecDeque<ConsoleInput>,
    mode: AuthMode,
}

impl<R, W, E> StdioDriver<R, W, E>
where
    R: AsyncBufRead + Unpin + Send,
    W: io::Write + Send,
    E: Environment,
{
    /// Create a driver over `input` and `out`, reading the clock from `env`.
    pub fn new(input: R, out: W, env: E) -> Self {
        Self { lines: input.lines(), out, env, queued: VecDeque::new(), mode: AuthMode::default() }
    }

    /// The output sink.
    pub fn output(&self) -> &W {
        &self.out
    }

    fn enqueue(&mut self, command: Command) -> io::Result<()> {
        match command {
            Command::Login { identifier, secret, role } => {
                self.submit(AuthMode::Login, AuthForm::new(identifier, secret, role));
            },
            Command::Register { identifier, secret, role } => {
                self.submit(AuthMode::Register, AuthForm::new(identifier, secret, role));
            },
            Command::Mode => self.queued.push_back(ConsoleInput::ToggleMode),
            Command::View { id } => self.queued.push_back(ConsoleInput::SelectView(id)),
            Command::Logout => self.queued.push_back(ConsoleInput::Logout),
            Command::Quit => self.queued.push_back(ConsoleInput::Quit),
            Command::Help => writeln!(self.out, "{HELP}")?,
        }
        Ok(())
    }

    fn submit(&mut self, mode: AuthMode, form: AuthForm) {
        if self.mode != mode {
            self.queued.push_back(ConsoleInput::ToggleMode);
        }
        self.queued.push_back(ConsoleInput::Submit(form));
    }
}

impl<R, W, E> Driver for StdioDriver<R, W, E>
where
    R: AsyncBufRead + Unpin + Send,
    W: io::Write + Send,
    E: Environment,
{
    type Error = StdioError;

    async fn poll_input(&mut self) -> Result<Option<ConsoleInput>, Self::Error> {
        loop {
            if let Some(input) = self.queued.pop_front() {
                return Ok(Some(input));
            }

            // `next_line` is cancel safe, so a tick may interrupt this freely
            let Some(line) = self.lines.next_line().await? else {
                return Ok(None);
            };

            match command::parse(&line) {
                Ok(Some(command)) => self.enqueue(command)?,
                Ok(None) => {},
                Err(err) => writeln!(self.out, "{err}")?,
            }
        }
    }

    fn render(&mut self, console: &Console) -> Result<(), Self::Error> {
        self.mode = console.mode();
        write!(self.out, "{}", Screen::new(console, self.env.wall_clock_secs()))?;
        self.out.flush()?;
        Ok(())
    }

    fn stop(&mut self) {
        if let Err(err) = self.out.flush() {
            tracing::warn!(error = %err, "flush on stop failed");
        }
    }
}
