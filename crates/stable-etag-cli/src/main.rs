//! stable-etag CLI - canonical JSON text and weak entity tags from the command line.

use clap::{ArgAction, Parser, Subcommand};
use tracing::Level;

mod commands;
mod input;
mod output;

use commands::{canonicalize, etag, verify};

#[derive(Parser)]
#[command(name = "stable-etag")]
#[command(about = "Canonicalize JSON and derive weak entity tags")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show canonical text for input JSON
    Canonicalize {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Compute the weak entity tag for input JSON
    Etag {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check that a weak entity tag matches input JSON
    Verify {
        /// Expected tag, e.g. W/"RBNvo1WzZ4oRRq0W9+hknpT7T8If536DEMBg9hyq/4o="
        etag: String,
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Canonicalize { input } => canonicalize::run(input),
        Commands::Etag { input, json } => etag::run(input, json),
        Commands::Verify { etag, input, json } => verify::run(etag, input, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
