//! JSON output formatting for machine-readable output.

use super::OutputConfig;
use serde::Serialize;

/// JSON output formatter
pub struct JsonOutput;

impl JsonOutput {
    /// Format data as JSON string
    ///
    /// Uses pretty-printing by default. When `config.compact` is true,
    /// outputs minified JSON on a single line.
    pub fn format<T: Serialize + ?Sized>(data: &T, config: &OutputConfig) -> String {
        if config.compact {
            serde_json::to_string(data).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
        } else {
            serde_json::to_string_pretty(data)
                .unwrap_or_else(|e| format!("{{\n  \"error\": \"{}\"\n}}", e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use nav_core::PathResult;

    #[test]
    fn test_format_pretty() {
        let route = PathResult {
            total_distance: 3.0,
            path: vec!["A".to_string(), "C".to_string()],
        };
        let config = OutputConfig::new(OutputFormat::Json);
        let output = JsonOutput::format(&route, &config);

        assert!(output.contains("\"total_distance\": 3.0"));
        assert!(output.contains("\"path\""));
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_format_compact() {
        let nodes = vec![nav_core::Node::new(1, "A", 0.0, 0.0)];
        let config = OutputConfig::new(OutputFormat::Json).compact();
        let output = JsonOutput::format(&nodes, &config);

        assert_eq!(output, r#"[{"id":1,"name":"A","x":0.0,"y":0.0}]"#);
    }
}
