// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "bodyshape")]
#[command(about = "Body measurements and shape features from depth captures")]
#[command(version = env!("GIT_VERSION"))]
struct Cli {
    /// Configuration file (default: <config dir>/bodyshape/config.json)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a dataset directory (depth/, color/, raw_depth/)
    Extract {
        /// Dataset root directory
        root: PathBuf,

        /// Feature-vector output file (default: features.txt)
        #[arg(short, long)]
        features: Option<PathBuf>,

        /// Measurement diagnostics output file (default: heightwidth.txt)
        #[arg(short, long)]
        measurements: Option<PathBuf>,
    },

    /// Analyze a single depth frame and raw depth grid, printing JSON
    Measure {
        /// 8-bit depth image
        depth: PathBuf,

        /// Raw depth text grid
        raw_depth: PathBuf,
    },

    /// Print the effective configuration as JSON
    Config,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set RUST_LOG to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=bodyshape=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();
    let config = bodyshape::Config::load_or_default(cli.config.as_deref())?;

    match cli.command {
        Commands::Extract {
            root,
            features,
            measurements,
        } => cli::extract(config, root, features, measurements),
        Commands::Measure { depth, raw_depth } => cli::measure(config, depth, raw_depth),
        Commands::Config => cli::print_config(&config),
    }
}
