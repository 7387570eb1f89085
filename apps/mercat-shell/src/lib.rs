//! # Mercat Shell
//!
//! Console front-end for the Mercat point-of-sale simulator.
//!
//! ## Startup Sequence
//! 1. Load configuration from the environment
//! 2. Initialize tracing (logging to stderr)
//! 3. Run the menu on stdin/stdout until exit or end of input
//!
//! All pricing, validation and cart rules live in `mercat-core`; this crate
//! only turns typed lines into typed values and prints results.

pub mod config;
pub mod error;
pub mod menu;

use std::io;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{ShellConfig, DEFAULT_LOG_FILTER};
use crate::menu::Shell;

/// Runs the interactive shell on the process's stdin and stdout.
pub fn run() -> anyhow::Result<()> {
    let config = ShellConfig::from_env()?;
    init_tracing(&config);

    info!(
        store = %config.store_name,
        receipt_format = ?config.receipt_format,
        "starting mercat shell"
    );

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), config);
    shell.run()?;

    info!("mercat shell stopped");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages (takes precedence when non-blank)
/// - `MERCAT_LOG=mercat=debug` - Same, through the shell's own variable
/// - Default: `warn,mercat=info`
///
/// Unparseable directives fall back to the next source.
/// Logs go to stderr so they never mix with receipts on stdout.
fn init_tracing(config: &ShellConfig) {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directives = config.effective_log_filter(rust_log.as_deref());
    let filter = EnvFilter::try_new(directives)
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}
