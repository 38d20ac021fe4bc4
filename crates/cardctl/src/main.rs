//! cardctl - Person Card lookup harness
//!
//! Runs the person lookup chain and its backend probes from the terminal.

use anyhow::Result;
use cardctl::{commands, errors, logging, output};
use clap::{Parser, Subcommand};
use person_card::CardConfig;
use std::path::PathBuf;

// Version is embedded at build time
const VERSION: &str = env!("CARDCTL_VERSION");

#[derive(Parser)]
#[command(name = "cardctl")]
#[command(about = "Person Card - look up people with a fallback card", long_about = None)]
#[command(version = VERSION)]
struct Cli {
    /// Config file (default: user, then system, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the SearXNG search endpoint
    #[arg(long, global = true)]
    endpoint: Option<String>,

    /// Skip the search backend entirely
    #[arg(long, global = true)]
    offline: bool,

    /// Debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a person and print the card as JSON
    Lookup {
        /// Full name, e.g. "Steve Jobs"
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show what the search backend returns for a query
    Search {
        #[arg(required = true)]
        query: Vec<String>,

        /// Restrict to engines (e.g. "wikipedia"); clears categories
        #[arg(long)]
        engines: Option<String>,

        /// Search categories (e.g. "general")
        #[arg(long)]
        categories: Option<String>,
    },

    /// Download an image and check it decodes
    Image {
        url: String,

        /// Skip TLS certificate verification
        #[arg(long)]
        insecure: bool,
    },

    /// Print the effective configuration
    Config,
}

fn load_config(cli: &Cli) -> Result<CardConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let mut config = CardConfig::load_from(path)?;
            config.apply_env();
            config
        }
        None => CardConfig::load()?,
    };

    if let Some(endpoint) = &cli.endpoint {
        config.search.endpoint = endpoint.clone();
    }
    if cli.offline {
        config.search.enabled = false;
    }

    Ok(config)
}

fn run(cli: Cli) -> Result<i32> {
    let mut config = load_config(&cli)?;
    logging::init(&config.log.level, cli.verbose);

    let color = output::should_use_color();
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();
    let mut out = stdout.lock();
    let mut err = stderr.lock();

    match cli.command {
        Commands::Lookup { query } => commands::lookup(&config, &query.join(" "), &mut out, &mut err),
        Commands::Search {
            query,
            engines,
            categories,
        } => {
            if engines.is_some() {
                config.search.engines = engines;
                config.search.categories = None;
            }
            if categories.is_some() {
                config.search.categories = categories;
            }
            commands::search(&config, &query.join(" "), color, &mut out, &mut err)
        }
        Commands::Image { url, insecure } => {
            config.image.accept_invalid_certs |= insecure;
            commands::image(&config, &url, color, &mut out, &mut err)
        }
        Commands::Config => commands::show_config(&config, &mut out),
    }
}

fn main() {
    let cli = Cli::parse();

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            errors::EXIT_GENERAL_ERROR
        }
    };

    std::process::exit(code);
}
