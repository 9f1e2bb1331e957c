//! Write commands. The navigator does not expose storage writes, so each of
//! these reaches the service and reports its rejection as an error.

use anyhow::{Context, Result};

use super::{Session, WriteOp};

pub async fn run(session: &Session, op: WriteOp) -> Result<()> {
    session
        .blocking(move |nav| match op {
            WriteOp::AddNode { name, x, y } => nav.add_node(&name, x, y),
            WriteOp::AddEdge { from, to, weight } => nav.add_edge(&from, &to, weight),
            WriteOp::RemoveNode { name } => nav.remove_node(&name),
            WriteOp::RemoveEdge { from, to } => nav.remove_edge(&from, &to),
        })
        .await
        .context("Write operations are not available; edit the database directly")
}
