//! Reload command - refetch the graph and recompute all routes

use anyhow::Result;
use serde::Serialize;

use super::Session;
use crate::output::{Output, OutputConfig, Outputter, SuccessMessage};

#[derive(Debug, Serialize)]
pub struct ReloadReport {
    pub generation: u64,
    pub node_count: usize,
    pub edge_count: usize,
    pub compute_ms: f64,
}

impl Outputter for ReloadReport {
    fn to_table(&self, config: &OutputConfig) -> String {
        SuccessMessage::new(format!(
            "Loaded generation {}: {} nodes, {} edges (routes computed in {:.2} ms)",
            self.generation, self.node_count, self.edge_count, self.compute_ms
        ))
        .to_table(config)
    }
}

pub async fn run(session: &Session) -> Result<()> {
    let generation = session.blocking(|nav| nav.reload()).await?;
    let report = ReloadReport {
        generation: generation.number(),
        node_count: generation.graph().node_count(),
        edge_count: generation.graph().edge_count(),
        compute_ms: generation.compute_time().as_secs_f64() * 1000.0,
    };
    Output::new(report, session.output()).render()
}
