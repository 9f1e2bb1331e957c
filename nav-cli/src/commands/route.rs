//! Route command - shortest path between two named nodes

use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::time::Instant;

use super::Session;
use crate::output::{Output, OutputConfig, Outputter};

/// A route answer plus how long the query took.
#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub start: String,
    pub end: String,
    pub total_distance: f64,
    pub path: Vec<String>,
    pub hops: usize,
    pub elapsed_ms: u128,
}

impl Outputter for RouteReport {
    fn to_table(&self, config: &OutputConfig) -> String {
        let arrow = if config.use_colors() {
            format!(" {} ", "->".dimmed())
        } else {
            " -> ".to_string()
        };
        format!(
            "Distance: {:.4} (in {} ms)\nPath: {}",
            self.total_distance,
            self.elapsed_ms,
            self.path.join(&arrow)
        )
    }
}

pub async fn run(session: &Session, start: String, end: String) -> Result<()> {
    let started = Instant::now();
    let (s, e) = (start.clone(), end.clone());
    let route = session
        .blocking(move |nav| nav.shortest_path(&s, &e))
        .await?;

    let report = RouteReport {
        start,
        end,
        hops: route.hops(),
        total_distance: route.total_distance,
        path: route.path,
        elapsed_ms: started.elapsed().as_millis(),
    };
    Output::new(report, session.output()).render()
}
