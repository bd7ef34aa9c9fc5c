//! deeplink-router CLI.
//!
//! Loads a route table, opens deep links against an in-memory back stack
//! and prints the result as JSON.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;

use deeplink_router::config::{load_config, RouterConfig};
use deeplink_router::observability::{logging, metrics};
use deeplink_router::{MemorySink, Navigator, OpenOutcome};

#[derive(Parser)]
#[command(name = "deeplink-router")]
#[command(about = "Match deep links against a route table and compose back stacks", long_about = None)]
struct Cli {
    /// Route table (TOML). Without one only the home destination is known.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Overrides the configured log level.
    #[arg(short, long)]
    log_level: Option<String>,

    /// Print Prometheus metrics to stderr on exit.
    #[arg(long)]
    metrics: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open URIs in order and print the final back stack
    Open {
        #[arg(required = true)]
        uris: Vec<String>,
    },
    /// Show which pattern a URI matches and its bindings
    Resolve { uri: String },
    /// List registered patterns in precedence order
    Routes,
    /// Validate the route table
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        None => RouterConfig::default(),
    };

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.observability.log_level.clone());
    if !logging::init(&level) {
        eprintln!("Warning: logging was already initialized, --log-level ignored");
    }

    let metrics_handle = if cli.metrics || config.observability.metrics_enabled {
        metrics::init_metrics()
    } else {
        None
    };

    let code = match run(cli.command, &config) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    };

    if let Some(handle) = metrics_handle {
        eprint!("{}", handle.render());
    }
    code
}

fn run(command: Commands, config: &RouterConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let sink = Arc::new(MemorySink::new());
    let mut navigator = Navigator::from_config(config, sink.clone())?;

    match command {
        Commands::Open { uris } => {
            for uri in &uris {
                match navigator.open(uri)? {
                    OpenOutcome::Routed { pattern } => {
                        tracing::info!(uri = %uri, pattern = %pattern, "Opened")
                    }
                    OpenOutcome::Fallback => tracing::info!(uri = %uri, "No match, rooted at home"),
                    OpenOutcome::Ignored => tracing::warn!(uri = %uri, "No match, stack unchanged"),
                }
            }
            println!("{}", serde_json::to_string_pretty(&sink.current())?);
        }
        Commands::Resolve { uri } => match navigator.resolve(&uri) {
            Some(m) => {
                let out = json!({
                    "pattern": m.pattern.raw(),
                    "bindings": m.bindings,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            }
            None => {
                eprintln!("No pattern matches {}", uri);
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Routes => {
            for (precedence, pattern) in navigator.registry().patterns().enumerate() {
                println!("{:>3}  {}", precedence, pattern);
            }
        }
        Commands::Check => {
            println!(
                "OK: {} links, home {:?}",
                navigator.registry().len(),
                config.home.id
            );
        }
    }

    Ok(ExitCode::SUCCESS)
}
