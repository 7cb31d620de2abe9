//! Signalbox console entry point.
//!
//! # Usage
//!
//! ```bash
//! # Start with two accounts ready to sign in
//! signalbox-console --seed-user op1@rail.test:pw1:operator --seed-user root@rail.test:pw:admin
//!
//! # Faster refresh, chatty logs on stderr
//! signalbox-console --tick-secs 1 --log-level debug
//! ```

use std::time::Duration;

use clap::Parser;
use signalbox_app::{ConsoleConfig, Runtime};
use signalbox_auth::{AuthService, LocalTransport, MemoryCredentialStore, RemoteCredentialStore};
use signalbox_console::{SeedUser, StdioDriver, SystemEnv};
use tokio::io::BufReader;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Rail operations console
#[derive(Parser, Debug)]
#[command(name = "signalbox-console")]
#[command(about = "Role-based rail operations console")]
#[command(version)]
struct Args {
    /// Seconds between dashboard refreshes while signed in
    #[arg(long, default_value = "5")]
    tick_secs: u64,

    /// Seconds before a credential request is abandoned
    #[arg(long, default_value = "10")]
    request_timeout_secs: u64,

    /// Maximum alerts kept in the feed
    #[arg(long, default_value = "10")]
    alert_capacity: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,

    /// Account to create at startup, as email:password:role (repeatable)
    #[arg(long = "seed-user", value_name = "EMAIL:PASSWORD:ROLE")]
    seed_users: Vec<SeedUser>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = ConsoleConfig {
        tick_period: Duration::from_secs(args.tick_secs),
        request_timeout: Duration::from_secs(args.request_timeout_secs),
        alert_capacity: args.alert_capacity,
    }
    .validate()?;

    let seeded = args.seed_users.len();
    let records = MemoryCredentialStore::with_credentials(args.seed_users.into_iter().map(|s| s.0));
    let store = RemoteCredentialStore::new(LocalTransport::new(AuthService::new(records)));
    tracing::info!(seeded, ?config, "Signalbox console starting");

    let env = SystemEnv::new();
    let driver = StdioDriver::new(BufReader::new(tokio::io::stdin()), std::io::stdout(), env);
    let mut runtime = Runtime::new(driver, store, env, config);

    runtime.run().await?;
    tracing::info!("Signalbox console stopped");
    Ok(())
}
