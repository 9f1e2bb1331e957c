//! Status command - database location, row counts, pool and generation

use anyhow::{Context, Result};
use colored::Colorize;
use serde::Serialize;
use std::sync::Arc;

use super::Session;
use crate::output::{Output, OutputConfig, Outputter, TableOutput};

#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    pub database: String,
    pub schema_version: Option<String>,
    pub node_count: usize,
    pub edge_count: usize,
    pub pool_size: usize,
    pub pool_available: usize,
    /// Loaded generation; `None` until the first query or reload
    pub generation: Option<u64>,
}

impl Outputter for StatusReport {
    fn to_table(&self, config: &OutputConfig) -> String {
        let title = if config.use_colors() {
            "Navigator Status".green().bold().to_string()
        } else {
            "Navigator Status".to_string()
        };

        let pairs = [
            ("Database", self.database.clone()),
            (
                "Schema",
                self.schema_version.clone().unwrap_or_else(|| "-".to_string()),
            ),
            ("Nodes", self.node_count.to_string()),
            ("Edges", self.edge_count.to_string()),
            (
                "Pool",
                format!("{} of {} idle", self.pool_available, self.pool_size),
            ),
            (
                "Generation",
                self.generation
                    .map(|g| g.to_string())
                    .unwrap_or_else(|| "not loaded".to_string()),
            ),
        ];
        format!("{}\n{}", title, TableOutput::format_key_value(&pairs, config))
    }
}

pub async fn run(session: &Session) -> Result<()> {
    let navigator = Arc::clone(&session.navigator);
    let (stats, schema_version, generation) = tokio::task::spawn_blocking(move || {
        let store = navigator.source();
        let stats = store.stats()?;
        let version = store.schema_version()?;
        Ok::<_, nav_store::StoreError>((stats, version, navigator.current_generation()))
    })
    .await
    .context("Status task panicked")?
    .context("Failed to read database statistics")?;

    let pool = session.navigator().source().pool();
    let report = StatusReport {
        database: session.db_path().display().to_string(),
        schema_version,
        node_count: stats.node_count,
        edge_count: stats.edge_count,
        pool_size: pool.size(),
        pool_available: pool.available(),
        generation,
    };
    Output::new(report, session.output()).render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;

    #[test]
    fn test_status_table_lists_fields() {
        let report = StatusReport {
            database: "nav.duckdb".to_string(),
            schema_version: Some("1.0.0".to_string()),
            node_count: 6,
            edge_count: 9,
            pool_size: 10,
            pool_available: 10,
            generation: None,
        };
        let config = OutputConfig::new(OutputFormat::Table)
            .without_colors()
            .without_truncation();
        let text = report.to_table(&config);
        assert!(text.starts_with("Navigator Status"));
        assert!(text.contains("nav.duckdb"));
        assert!(text.contains("not loaded"));
        assert!(text.contains("10 of 10 idle"));
    }
}
