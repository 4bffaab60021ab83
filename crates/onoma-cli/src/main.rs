//! Onoma memory CLI
//!
//! Talks to the Onoma memory service directly, outside any host runtime.
//!
//! ```bash
//! ONOMA_API_TOKEN=onm_... onoma search "what do I like to eat"
//! onoma --config onoma.json spaces
//! onoma stats
//! ```
//!
//! Set `RUST_LOG` to override the log filter; `--verbose` raises the default
//! from `warn` to `debug`.

mod args;
mod console;
mod router;

use clap::Parser;
use console::CliConsole;
use std::io::IsTerminal;
use tracing_subscriber::EnvFilter;

use args::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let console = CliConsole::new(cli.verbose);
    let code = match router::route(cli).await {
        Ok(code) => code,
        Err(err) => {
            console.error(&format!("{:#}", err));
            router::EXIT_FAILURE
        }
    };
    std::process::exit(code);
}
