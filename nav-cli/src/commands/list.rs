//! Node and edge listings

use anyhow::Result;
use nav_core::{Edge, Node};
use serde::Serialize;

use super::Session;
use crate::output::{Alignment, Column, Output, OutputConfig, Outputter, TableOutput};

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct NodeList(pub Vec<Node>);

impl Outputter for NodeList {
    fn to_table(&self, config: &OutputConfig) -> String {
        let columns = [
            Column::new("ID", "id").with_alignment(Alignment::Right),
            Column::new("NAME", "name"),
            Column::new("X", "x").with_alignment(Alignment::Right),
            Column::new("Y", "y").with_alignment(Alignment::Right),
        ];
        TableOutput::format_with_columns(&self.0, &columns, "No nodes.", config)
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct EdgeList(pub Vec<Edge>);

impl Outputter for EdgeList {
    fn to_table(&self, config: &OutputConfig) -> String {
        let columns = [
            Column::new("FROM", "from_id").with_alignment(Alignment::Right),
            Column::new("TO", "to_id").with_alignment(Alignment::Right),
            Column::new("WEIGHT", "weight").with_alignment(Alignment::Right),
        ];
        TableOutput::format_with_columns(&self.0, &columns, "No edges.", config)
    }
}

pub async fn run_nodes(session: &Session) -> Result<()> {
    let nodes = session.blocking(|nav| nav.nodes()).await?;
    Output::new(NodeList(nodes.to_vec()), session.output()).render()
}

pub async fn run_edges(session: &Session) -> Result<()> {
    let edges = session.blocking(|nav| nav.edges()).await?;
    Output::new(EdgeList(edges.to_vec()), session.output()).render()
}
