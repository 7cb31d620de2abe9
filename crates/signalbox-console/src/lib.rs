//! Terminal front end for the Signalbox console.
//!
//! A thin shell over [`signalbox_app::Driver`]: commands come in one line at a
//! time and every render writes a text frame. All orchestration lives in the
//! generic [`signalbox_app::Runtime`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod command;
pub mod render;
pub mod seed;
pub mod stdio;
pub mod system_env;

pub use command::{Command, CommandError};
pub use render::Screen;
pub use seed::{SeedUser, SeedUserError};
pub use stdio::{StdioDriver, StdioError};
pub use system_env::SystemEnv;
