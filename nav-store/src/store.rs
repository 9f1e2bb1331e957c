//! NavStore - DuckDB-backed storage for the navigator graph.

use std::path::{Path, PathBuf};

use duckdb::{params, Connection};
use nav_core::{Edge, GraphSource, Node, SourceError};
use serde::Serialize;

use crate::error::Result;
use crate::pool::{ConnectionPool, PoolConfig, PooledConnection};
use crate::schema::{SCHEMA_SQL, SCHEMA_VERSION, SELECT_EDGES, SELECT_NODES};

/// Row counts reported by [`NavStore::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub node_count: usize,
    pub edge_count: usize,
}

/// Graph storage reached through a bounded connection pool.
#[derive(Debug)]
pub struct NavStore {
    pool: ConnectionPool,
    path: Option<PathBuf>,
}

impl NavStore {
    /// Open or create a database file and make sure the schema exists.
    pub fn open(path: impl AsRef<Path>, config: PoolConfig) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let store = Self {
            pool: ConnectionPool::new(conn, config)?,
            path: Some(path.to_path_buf()),
        };
        store.init_schema()?;
        tracing::debug!("Opened navigator database at {:?}", path);
        Ok(store)
    }

    /// Private in-memory database, mostly for tests.
    pub fn open_in_memory(config: PoolConfig) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            pool: ConnectionPool::new(conn, config)?,
            path: None,
        };
        store.init_schema()?;
        Ok(store)
    }

    /// Database file, or `None` when in memory.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    fn conn(&self) -> Result<PooledConnection<'_>> {
        self.pool.get()
    }

    fn init_schema(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch(SCHEMA_SQL)?;
        conn.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?)",
            params![SCHEMA_VERSION],
        )?;
        Ok(())
    }

    /// Stored schema version, if the metadata row exists.
    pub fn schema_version(&self) -> Result<Option<String>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare("SELECT value FROM metadata WHERE key = 'schema_version'")?;
        let mut rows = stmt.query([])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    /// All nodes, ascending by id.
    pub fn fetch_nodes(&self) -> Result<Vec<Node>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(SELECT_NODES)?;
        let nodes = stmt
            .query_map([], |row| {
                Ok(Node::new(
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get(2)?,
                    row.get(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!("fetch_nodes: {} rows", nodes.len());
        Ok(nodes)
    }

    /// All edges, in storage order.
    pub fn fetch_edges(&self) -> Result<Vec<Edge>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(SELECT_EDGES)?;
        let edges = stmt
            .query_map([], |row| Ok(Edge::new(row.get(0)?, row.get(1)?, row.get(2)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        tracing::debug!("fetch_edges: {} rows", edges.len());
        Ok(edges)
    }

    /// Bulk-append nodes. Fails if an id is already present.
    pub fn insert_nodes(&self, nodes: &[Node]) -> Result<usize> {
        let conn = self.conn()?;
        {
            let mut appender = conn.appender("nodes")?;
            for node in nodes {
                appender.append_row(params![node.id, node.name, node.x, node.y])?;
            }
            appender.flush()?;
        }

        let count: usize = conn.query_row("SELECT COUNT(*) FROM nodes", [], |row| row.get(0))?;
        tracing::info!(
            "insert_nodes: appended {}, DB has {} nodes",
            nodes.len(),
            count
        );
        Ok(nodes.len())
    }

    /// Bulk-append edges. Endpoints are not checked against `nodes`.
    pub fn insert_edges(&self, edges: &[Edge]) -> Result<usize> {
        let conn = self.conn()?;
        {
            let mut appender = conn.appender("edges")?;
            for edge in edges {
                appender.append_row(params![edge.from_id, edge.to_id, edge.weight])?;
            }
            appender.flush()?;
        }

        let count: usize = conn.query_row("SELECT COUNT(*) FROM edges", [], |row| row.get(0))?;
        tracing::info!(
            "insert_edges: appended {}, DB has {} edges",
            edges.len(),
            count
        );
        Ok(edges.len())
    }

    /// Delete every node and edge. The schema and metadata stay.
    pub fn clear(&self) -> Result<()> {
        let conn = self.conn()?;
        conn.execute_batch("DELETE FROM edges; DELETE FROM nodes;")?;
        Ok(())
    }

    pub fn stats(&self) -> Result<StoreStats> {
        let conn = self.conn()?;
        let node_count: usize =
            conn.query_row("SELECT COUNT(*) FROM nodes", [], |row| row.get(0))?;
        let edge_count: usize =
            conn.query_row("SELECT COUNT(*) FROM edges", [], |row| row.get(0))?;
        Ok(StoreStats {
            node_count,
            edge_count,
        })
    }
}

impl GraphSource for NavStore {
    fn fetch_nodes(&self) -> std::result::Result<Vec<Node>, SourceError> {
        NavStore::fetch_nodes(self).map_err(SourceError::from)
    }

    fn fetch_edges(&self) -> std::result::Result<Vec<Edge>, SourceError> {
        NavStore::fetch_edges(self).map_err(SourceError::from)
    }
}
