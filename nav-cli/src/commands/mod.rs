//! Command implementations for the nav CLI
//!
//! One-shot subcommands and shell lines are both turned into an [`Action`]
//! and run through [`execute`], so they behave identically.

use anyhow::{Context, Result};
use nav_core::Navigator;
use nav_store::{NavStore, PoolConfig};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::output::OutputConfig;

pub mod init;
pub mod list;
pub mod reload;
pub mod route;
pub mod shell;
pub mod status;
pub mod write;

/// A command, independent of where it was typed.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Help,
    Exit,
    Route { start: String, end: String },
    ListNodes,
    ListEdges,
    Write(WriteOp),
    Reload,
    Status,
}

/// Write commands; the navigator rejects all of them.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    AddNode { name: String, x: f64, y: f64 },
    AddEdge { from: String, to: String, weight: f64 },
    RemoveNode { name: String },
    RemoveEdge { from: String, to: String },
}

/// What the shell should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// An opened database plus the navigator serving it.
pub struct Session {
    navigator: Arc<Navigator<NavStore>>,
    db_path: PathBuf,
    output: OutputConfig,
}

impl Session {
    /// Open an existing database. Loading the graph is deferred to the first query.
    pub fn open(db_path: PathBuf, pool: PoolConfig, output: OutputConfig) -> Result<Self> {
        if !db_path.exists() {
            anyhow::bail!(
                "No navigator database at {}. Run 'nav init --seed' first.",
                db_path.display()
            );
        }

        let store = NavStore::open(&db_path, pool)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

        Ok(Self {
            navigator: Arc::new(Navigator::new(store)),
            db_path,
            output,
        })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    pub fn navigator(&self) -> &Navigator<NavStore> {
        &self.navigator
    }

    /// Run a navigator call on the blocking pool; DuckDB and the
    /// all-pairs computation are both synchronous.
    pub async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Navigator<NavStore>) -> nav_core::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let navigator = Arc::clone(&self.navigator);
        let result = tokio::task::spawn_blocking(move || f(&navigator))
            .await
            .context("Navigator task panicked")?;
        Ok(result?)
    }
}

/// Run one action against the session.
pub async fn execute(session: &Session, action: Action) -> Result<Flow> {
    match action {
        Action::Help => {
            println!("{}", shell::HELP);
        }
        Action::Exit => return Ok(Flow::Exit),
        Action::Route { start, end } => route::run(session, start, end).await?,
        Action::ListNodes => list::run_nodes(session).await?,
        Action::ListEdges => list::run_edges(session).await?,
        Action::Write(op) => write::run(session, op).await?,
        Action::Reload => reload::run(session).await?,
        Action::Status => status::run(session).await?,
    }
    Ok(Flow::Continue)
}
