//! Command parsing.
//!
//! One command per line. Credential commands take up to three positional
//! arguments; missing ones are sent empty so the session manager reports them.

use thiserror::Error;

/// Usage text shown by `help`.
pub const HELP: &str = "\
commands:
  login <email> <password> <role>     sign in (roles: operator, supervisor, admin)
  register <email> <password> <role>  create an account
  mode                                switch between login and register
  view <id>                           open a view from the menu
  logout                              end the session
  help                                show this text
  quit                                leave the console";

/// A parsed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Sign in.
    Login {
        /// Email.
        identifier: String,
        /// Password.
        secret: String,
        /// Role wire name.
        role: String,
    },
    /// Create an account.
    Register {
        /// Email.
        identifier: String,
        /// Password.
        secret: String,
        /// Role wire name.
        role: String,
    },
    /// Toggle the auth form mode.
    Mode,
    /// Open a view.
    View {
        /// View id.
        id: String,
    },
    /// End the session.
    Logout,
    /// Show usage.
    Help,
    /// Leave the console.
    Quit,
}

/// Errors from parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The first word is not a command.
    #[error("unknown command: {0} (try `help`)")]
    Unknown(String),

    /// Wrong number of arguments.
    #[error("usage: {0}")]
    Usage(&'static str),
}

/// Parse one input line. Blank lines parse to `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match name.to_ascii_lowercase().as_str() {
        "login" => {
            let (identifier, secret, role) = credentials(&args, "login <email> <password> <role>")?;
            Command::Login { identifier, secret, role }
        },
        "register" => {
            let (identifier, secret, role) =
                credentials(&args, "register <email> <password> <role>")?;
            Command::Register { identifier, secret, role }
        },
        "mode" => bare(&args, Command::Mode, "mode")?,
        "view" => match args.as_slice() {
            [id] => Command::View { id: (*id).to_string() },
            _ => return Err(CommandError::Usage("view <id>")),
        },
        "logout" => bare(&args, Command::Logout, "logout")?,
        "help" | "?" => Command::Help,
        "quit" | "exit" => bare(&args, Command::Quit, "quit")?,
        _ => return Err(CommandError::Unknown(name.to_string())),
    };
    Ok(Some(command))
}

fn credentials(
    args: &[&str],
    usage: &'static str,
) -> Result<(String, String, String), CommandError> {
    if args.len() > 3 {
        return Err(CommandError::Usage(usage));
    }
    let field = |i: usize| args.get(i).map_or_else(String::new, |s| (*s).to_string());
    Ok((field(0), field(1), field(2)))
}

fn bare(args: &[&str], command: Command, usage: &'static str) -> Result<Command, CommandError> {
    if args.is_empty() { Ok(command) } else { Err(CommandError::Usage(usage)) }
}
