//! tkt - in-memory ticket store demo driver
//!
//! The store lives in process memory, so this binary seeds one and
//! exercises the service interface end to end.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tkt_core::{Config, TicketService};

mod commands;

#[derive(Parser)]
#[command(name = "tkt")]
#[command(about = "In-memory support ticket store with threaded replies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Optional config file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a store and walk through every service operation
    Demo,

    /// Hammer one store from many threads and verify the final state
    Stress {
        /// Number of writer threads
        #[arg(short, long, default_value = "8")]
        threads: usize,

        /// Replies added per thread
        #[arg(short, long, default_value = "50")]
        replies: usize,
    },
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = match cli.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };
    let service = TicketService::with_config(config);

    match cli.command {
        Commands::Demo => commands::demo(&service, cli.json),
        Commands::Stress { threads, replies } => {
            commands::stress(&service, threads, replies, cli.json)
        }
    }
}
