//! limit-book console.
//!
//! Reads order commands from stdin, one per line, and prints book and trade
//! reports on request. Logs go to stderr.

use std::io;

use clap::Parser;
use tracing::Level;

use limit_book::console::{self, HELP};
use limit_book::{EngineConfig, MatchingEngine};

#[derive(Parser)]
#[command(name = "limit-book")]
#[command(about = "Single-instrument limit order book")]
struct Cli {
    /// Resting orders and trades to pre-allocate
    #[arg(short, long, default_value_t = EngineConfig::DEFAULT_ORDER_CAPACITY)]
    capacity: usize,

    /// Log level written to stderr (error, warn, info, debug, trace)
    #[arg(short, long, default_value = "warn")]
    log_level: Level,

    /// Do not print the banner
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .init();

    tracing::info!(capacity = cli.capacity, "starting limit-book");

    if !cli.quiet {
        println!("Simple Limit Order Book");
        println!("{HELP}");
    }

    let mut engine = MatchingEngine::with_config(EngineConfig::with_capacity(cli.capacity));
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    console::run(&mut engine, stdin.lock(), &mut stdout)
}
