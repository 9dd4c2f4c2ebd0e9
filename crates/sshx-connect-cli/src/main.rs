//! Interactive connection manager for sshx sessions.
//!
//! Saved sessions live in `~/.sshx/config.json`; connecting launches the
//! external `sshx` join tool through WSL or Git Bash, or opens the session
//! in the default browser.

mod menu;
mod setup;

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use sshx_connect_launch::Dispatcher;
use sshx_connect_store::SessionStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Interactive connection manager for sshx sessions.
#[derive(Parser, Debug)]
#[command(name = "sshx-connect")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding config.json (defaults to ~/.sshx)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Logs stay quiet by default so they do not interleave with the menu.
    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let config_dir = match args.config_dir {
        Some(dir) => dir,
        None => SessionStore::default_dir().context("cannot determine the home directory")?,
    };
    let store = SessionStore::new(config_dir);
    tracing::debug!(config = %store.config_file().display(), "using config file");

    menu::run(store, Dispatcher::new()).await
}
