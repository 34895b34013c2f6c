//! # CLI Layer
//!
//! One client of `pokedexapp`, alongside the HTTP server it can start.
//!
//! The CLI layer is the only place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Owns the async runtime and the tracing subscriber
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap, in `setup.rs`
//! 2. **Context Setup**: load `PokedexConfig`, apply flag overrides, open a
//!    store or an HTTP client
//! 3. **Dispatch**: route to the handlers in `commands.rs`
//! 4. **Output Formatting**: `render.rs`
//!
//! Errors propagate as `anyhow::Error` up to `main`, which prints them and
//! exits non-zero.

mod browse;
mod commands;
mod render;
mod setup;

use anyhow::Context;
use clap::Parser;
use pokedexapp::config::PokedexConfig;
use setup::Cli;
use tracing_subscriber::EnvFilter;

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let mut config = PokedexConfig::load(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(commands::dispatch(cli, config))
}

/// `RUST_LOG` wins unless `-v` is given. Without either, the server logs
/// at info and every other command at warn.
fn init_tracing(cli: &Cli) {
    let default_level = if cli.command.is_server() { "info" } else { "warn" };
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    // A subscriber may already be installed when embedded; keep it.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn apply_overrides(config: &mut PokedexConfig, cli: &Cli) {
    if let Some(server) = &cli.server {
        config.server_url = server.clone();
    }
    if let Some(data) = &cli.data {
        config.data_file = Some(data.clone());
    }
    if let setup::Commands::Serve { bind: Some(bind) } = &cli.command {
        config.bind = bind.clone();
    }
}
