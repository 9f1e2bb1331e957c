//! nav - shortest routes over a stored weighted map
//!
//! One-shot subcommands and an interactive shell share the same command
//! implementations. The graph lives in a DuckDB file; all-pairs shortest
//! paths are recomputed whenever it is (re)loaded.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod output;

use commands::{Action, Session, WriteOp};
use config::NavConfig;
use output::{OutputConfig, OutputFormat};

/// Shortest routes over a stored weighted map.
#[derive(Parser)]
#[command(name = "nav")]
#[command(author, version)]
#[command(about = "Shortest routes over a stored weighted map")]
#[command(propagate_version = true)]
#[command(after_help = "Quick Start:
  nav init --seed   Create the database with a small demo map
  nav route A C     Shortest route from A to C
  nav nodes         List all nodes
  nav               Start the interactive shell")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to the DuckDB database (overrides config)
    #[arg(long, global = true, env = "NAV_DB")]
    db: Option<PathBuf>,

    /// Output format (overrides config default)
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Number of pooled database connections (overrides config)
    #[arg(long, global = true)]
    pool_size: Option<usize>,

    /// Longest wait for a pooled connection, in milliseconds (overrides config)
    #[arg(long, global = true)]
    acquire_timeout_ms: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Shortest route between two named nodes
    #[command(visible_alias = "r")]
    Route {
        /// Start node name (case-insensitive)
        start: String,
        /// End node name (case-insensitive)
        end: String,
    },

    /// List all nodes
    #[command(visible_alias = "list-nodes")]
    Nodes,

    /// List all edges
    #[command(visible_alias = "list-edges")]
    Edges,

    /// Add a node (not supported)
    AddNode {
        name: String,
        #[arg(allow_negative_numbers = true)]
        x: f64,
        #[arg(allow_negative_numbers = true)]
        y: f64,
    },

    /// Add an edge (not supported)
    AddEdge {
        from: String,
        to: String,
        weight: f64,
    },

    /// Remove a node (not supported)
    RemoveNode { name: String },

    /// Remove an edge (not supported)
    RemoveEdge { from: String, to: String },

    /// Reload the graph from the database and recompute routes
    Reload,

    /// Show database and navigator status
    #[command(visible_alias = "st")]
    Status,

    /// Create the database schema
    Init {
        /// Replace any existing data with the demo map
        #[arg(long)]
        seed: bool,
    },

    /// Interactive shell (default when no command is given)
    Shell,
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Load configuration from .navrc.toml
    let config = NavConfig::load(Path::new("."));

    // Resolve output format: CLI flag > config default > Table
    let format = cli.format.unwrap_or_else(|| {
        config
            .default_format()
            .and_then(|f| f.parse().ok())
            .unwrap_or(OutputFormat::Table)
    });

    // Apply color override from config if set
    if let Some(use_color) = config.use_color() {
        colored::control::set_override(use_color);
    }
    let output = OutputConfig::auto_detect(format, config.use_color());

    let db_path = cli.db.unwrap_or_else(|| config.database_path());
    let mut pool = config.pool_config();
    if let Some(size) = cli.pool_size {
        pool.size = size;
    }
    if let Some(ms) = cli.acquire_timeout_ms {
        pool.acquire_timeout = Duration::from_millis(ms);
    }

    let action = match cli.command.unwrap_or(Commands::Shell) {
        Commands::Init { seed } => {
            return commands::init::run(db_path, pool, seed, &output).await;
        }
        Commands::Shell => {
            let session = Session::open(db_path, pool, output)?;
            return commands::shell::run(&session).await;
        }
        Commands::Route { start, end } => Action::Route { start, end },
        Commands::Nodes => Action::ListNodes,
        Commands::Edges => Action::ListEdges,
        Commands::AddNode { name, x, y } => Action::Write(WriteOp::AddNode { name, x, y }),
        Commands::AddEdge { from, to, weight } => {
            Action::Write(WriteOp::AddEdge { from, to, weight })
        }
        Commands::RemoveNode { name } => Action::Write(WriteOp::RemoveNode { name }),
        Commands::RemoveEdge { from, to } => Action::Write(WriteOp::RemoveEdge { from, to }),
        Commands::Reload => Action::Reload,
        Commands::Status => Action::Status,
    };

    let session = Session::open(db_path, pool, output)?;
    commands::execute(&session, action).await.map(|_| ())
}
