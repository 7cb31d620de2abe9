//! Application layer for the Signalbox console
//!
//! Pure console state machine and a generic runtime, so deterministic
//! simulation runs the same code as the interactive binary.
//!
//! # Components
//!
//! - [`Console`]: console state machine (auth form, notices, signed-in workspace)
//! - [`Gateway`]: executes credential actions through the session manager
//! - [`Driver`]: trait for platform-specific input and rendering
//! - [`Ticker`]: periodic refresh of the operational picture
//! - [`Runtime`]: generic orchestration loop over a [`Driver`]

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod action;
mod config;
mod console;
mod driver;
mod event;
mod gateway;
mod input;
mod runtime;
mod state;
mod ticker;

pub use action::ConsoleAction;
pub use config::{ConfigError, ConsoleConfig, DEFAULT_TICK_PERIOD};
pub use console::Console;
pub use driver::Driver;
pub use event::ConsoleEvent;
pub use gateway::Gateway;
pub use input::ConsoleInput;
pub use runtime::Runtime;
pub use state::{AuthForm, AuthMode, Notice, NoticeTone, Workspace};
pub use ticker::Ticker;
