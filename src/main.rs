#![forbid(unsafe_code)]
//! Slide timing command line interface

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::EnvFilter;

use slidetime::commands::{
    execute_allocate, execute_init, execute_tables, AllocateOptions, InitOptions, TablesOptions,
};
use slidetime::config::{Overrides, DEFAULT_CONFIG_FILE};
use slidetime::{Audience, Config, InteractionLevel, PlanStrategy};

#[derive(Parser)]
#[command(name = "slidetime")]
#[command(about = "Per-slide speaking time allocation for presentations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Allocate speaking time across the slides of a deck file
    Allocate {
        /// Deck file (.json, .yaml, .yml)
        deck: PathBuf,

        /// Total talk length in minutes, Q&A included
        #[arg(short, long)]
        duration: f64,

        #[command(flatten)]
        context: ContextArgs,

        /// Minutes reserved for Q&A
        #[arg(long)]
        qa: Option<f64>,

        /// Fraction of content time held back as buffer (0.0-0.99)
        #[arg(long)]
        buffer: Option<f64>,

        /// Distribution strategy (weighted, equal)
        #[arg(long)]
        strategy: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show base times and bounds for a context
    Tables {
        #[command(flatten)]
        context: ContextArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(clap::Args)]
struct ContextArgs {
    /// Target audience (technical, business, mixed, executive)
    #[arg(short, long, env = "SLIDETIME_AUDIENCE")]
    audience: Option<String>,

    /// Interaction level (minimal, moderate, high)
    #[arg(short, long, env = "SLIDETIME_INTERACTION")]
    interaction: Option<String>,
}

impl ContextArgs {
    fn overrides(&self) -> anyhow::Result<Overrides> {
        Ok(Overrides {
            audience: self
                .audience
                .as_deref()
                .map(str::parse::<Audience>)
                .transpose()?,
            interaction: self
                .interaction
                .as_deref()
                .map(str::parse::<InteractionLevel>)
                .transpose()?,
            ..Default::default()
        })
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Init skips this so it can overwrite a broken file
fn load_config(path: &Path) -> anyhow::Result<Config> {
    Config::load_or_default(path)
        .with_context(|| format!("Failed to load config from {:?}", path))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { force } => {
            let options = InitOptions {
                path: cli.config,
                force,
            };
            execute_init(options)?;
        }

        Commands::Allocate {
            deck,
            duration,
            context,
            qa,
            buffer,
            strategy,
            json,
        } => {
            let config = load_config(&cli.config)?;
            let overrides = Overrides {
                qa_minutes: qa,
                buffer_fraction: buffer,
                strategy: strategy
                    .as_deref()
                    .map(str::parse::<PlanStrategy>)
                    .transpose()?,
                ..context.overrides()?
            };
            let options = AllocateOptions {
                deck,
                duration,
                overrides,
                json,
            };
            if let Err(e) = execute_allocate(options, config) {
                eprintln!("{} {:#}", style("✗").red(), e);
                std::process::exit(1);
            }
        }

        Commands::Tables { context, json } => {
            let options = TablesOptions {
                overrides: context.overrides()?,
                json,
            };
            execute_tables(options, load_config(&cli.config)?)?;
        }
    }

    Ok(())
}
