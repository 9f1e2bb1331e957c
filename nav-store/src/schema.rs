//! Database schema for the navigator graph.

/// DuckDB schema. Edges carry no foreign keys, so an edge may name a node id
/// that does not exist; the graph model drops such edges when routing.
pub const SCHEMA_SQL: &str = r#"
-- Nodes table: named locations
CREATE TABLE IF NOT EXISTS nodes (
    id BIGINT PRIMARY KEY,
    name VARCHAR NOT NULL,
    x DOUBLE NOT NULL DEFAULT 0,
    y DOUBLE NOT NULL DEFAULT 0
);

-- Edges table: directed weighted connections, parallel edges allowed
CREATE TABLE IF NOT EXISTS edges (
    from_id BIGINT NOT NULL,
    to_id BIGINT NOT NULL,
    weight DOUBLE NOT NULL
);

-- Metadata table: schema version
CREATE TABLE IF NOT EXISTS metadata (
    key VARCHAR PRIMARY KEY,
    value VARCHAR
);

CREATE INDEX IF NOT EXISTS idx_edges_from ON edges(from_id);
"#;

/// Current schema version.
pub const SCHEMA_VERSION: &str = "1.0.0";

pub const SELECT_NODES: &str = "SELECT id, name, x, y FROM nodes ORDER BY id";
pub const SELECT_EDGES: &str = "SELECT from_id, to_id, weight FROM edges";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_declares_all_tables() {
        for table in ["nodes", "edges", "metadata"] {
            assert!(
                SCHEMA_SQL.contains(&format!("CREATE TABLE IF NOT EXISTS {} (", table)),
                "missing table {}",
                table
            );
        }
    }

    #[test]
    fn test_nodes_are_selected_in_id_order() {
        assert!(SELECT_NODES.ends_with("ORDER BY id"));
    }
}
