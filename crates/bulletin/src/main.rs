//! Bulletin CLI - announcement banners for recently changed documentation.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "bulletin")]
#[command(about = "Announcement banners for recently changed documentation pages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to bulletin.toml config file
    #[arg(short, long, default_value = "bulletin.toml", global = true)]
    config: PathBuf,

    /// Repository root
    #[arg(short, long, default_value = ".", global = true)]
    repo: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default bulletin.toml
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        yes: bool,
    },

    /// Generate the banner fragment
    Build {
        #[command(flatten)]
        window: WindowArgs,

        /// Output file (defaults to config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Banner style: marquee or list
        #[arg(long)]
        style: Option<bulletin_banner::RenderStyle>,

        /// Maximum entries per group
        #[arg(long)]
        max_items: Option<usize>,
    },

    /// Print the entries that would be announced, as JSON
    Preview {
        #[command(flatten)]
        window: WindowArgs,
    },
}

/// Lookback window overrides.
#[derive(Args, Debug, Default)]
pub struct WindowArgs {
    /// Scan commits from the last N days
    #[arg(long, env = "ANNOUNCE_LOOKBACK_DAYS")]
    pub days: Option<u32>,

    /// Scan the last N commits instead of a number of days
    #[arg(long)]
    pub commits: Option<u32>,

    /// Revision before the change (e.g. a push's previous head).
    /// Without a matching --after the day window is used.
    #[arg(long, env = "ANNOUNCE_BEFORE")]
    pub before: Option<String>,

    /// Revision after the change
    #[arg(long, env = "ANNOUNCE_AFTER")]
    pub after: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.repo.join(&cli.config), yes)?;
        }
        Commands::Build {
            window,
            output,
            style,
            max_items,
        } => {
            let overrides = commands::config::Overrides {
                window,
                output,
                style,
                max_items,
            };
            commands::build::run(&cli.config, &cli.repo, overrides)?;
        }
        Commands::Preview { window } => {
            let overrides = commands::config::Overrides {
                window,
                ..Default::default()
            };
            commands::preview::run(&cli.config, &cli.repo, overrides)?;
        }
    }

    Ok(())
}
