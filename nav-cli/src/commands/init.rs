//! Init command - create the database and optionally load the demo map

use anyhow::{Context, Result};
use nav_store::{seed, NavStore, PoolConfig};
use serde::Serialize;
use std::path::PathBuf;

use crate::output::{Output, OutputConfig, Outputter, SuccessMessage};

#[derive(Debug, Serialize)]
pub struct InitReport {
    pub database: String,
    pub seeded: bool,
    pub node_count: usize,
    pub edge_count: usize,
}

impl Outputter for InitReport {
    fn to_table(&self, config: &OutputConfig) -> String {
        let message = if self.seeded {
            format!(
                "Seeded {} with the demo map ({} nodes, {} edges)",
                self.database, self.node_count, self.edge_count
            )
        } else {
            format!(
                "Initialized {} ({} nodes, {} edges)",
                self.database, self.node_count, self.edge_count
            )
        };
        SuccessMessage::new(message).to_table(config)
    }
}

pub async fn run(db_path: PathBuf, pool: PoolConfig, seed: bool, output: &OutputConfig) -> Result<()> {
    let path = db_path.clone();
    let stats = tokio::task::spawn_blocking(move || {
        let store = NavStore::open(&path, pool)?;
        if seed {
            seed::load_demo(&store)
        } else {
            store.stats()
        }
    })
    .await
    .context("Init task panicked")?
    .with_context(|| format!("Failed to initialize database: {}", db_path.display()))?;

    let report = InitReport {
        database: db_path.display().to_string(),
        seeded: seed,
        node_count: stats.node_count,
        edge_count: stats.edge_count,
    };
    Output::new(report, output).render()
}
