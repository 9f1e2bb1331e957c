//! Table output formatting using the `tabled` crate

use super::{truncate, Alignment, Column, OutputConfig};
use serde::Serialize;
use tabled::{
    builder::Builder,
    settings::{object::Columns, style::Style, Alignment as TabledAlignment, Modify, Width},
};

/// Widest a single cell may grow on a terminal before it is cut with `...`
const MAX_CELL_WIDTH: usize = 48;

/// Table output formatter
pub struct TableOutput;

impl TableOutput {
    /// Format rows as a table, one column per serialized field in `columns`.
    ///
    /// Returns `empty` verbatim when there are no rows.
    pub fn format_with_columns<T: Serialize>(
        data: &[T],
        columns: &[Column],
        empty: &str,
        config: &OutputConfig,
    ) -> String {
        if data.is_empty() {
            return empty.to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(columns.iter().map(|c| c.name.as_str()));

        for item in data {
            let json = serde_json::to_value(item).unwrap_or_default();
            let row: Vec<String> = columns
                .iter()
                .map(|col| {
                    let cell = Self::value_to_string(json.get(&col.key));
                    if config.should_truncate() {
                        truncate(&cell, MAX_CELL_WIDTH)
                    } else {
                        cell
                    }
                })
                .collect();
            builder.push_record(row);
        }

        let mut table = builder.build();
        Self::apply_style(&mut table, config);

        for (i, col) in columns.iter().enumerate() {
            let alignment = match col.align {
                Alignment::Left => TabledAlignment::left(),
                Alignment::Right => TabledAlignment::right(),
            };
            table.with(Modify::new(Columns::single(i)).with(alignment));
        }

        if config.should_truncate() {
            table.with(Width::wrap(config.effective_width()));
        }

        table.to_string()
    }

    /// Format a simple key-value table
    pub fn format_key_value(pairs: &[(&str, String)], config: &OutputConfig) -> String {
        let mut builder = Builder::default();
        for (key, value) in pairs {
            builder.push_record([*key, value.as_str()]);
        }

        let mut table = builder.build();
        Self::apply_style(&mut table, config);
        table.with(Modify::new(Columns::first()).with(TabledAlignment::right()));

        if config.should_truncate() {
            table.with(Width::wrap(config.effective_width()));
        }

        table.to_string()
    }

    fn apply_style(table: &mut tabled::Table, config: &OutputConfig) {
        if config.compact {
            table.with(Style::blank());
        } else {
            table.with(Style::rounded());
        }
    }

    fn value_to_string(value: Option<&serde_json::Value>) -> String {
        match value {
            None | Some(serde_json::Value::Null) => "-".to_string(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::OutputFormat;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestItem {
        name: String,
        value: f64,
    }

    fn plain() -> OutputConfig {
        OutputConfig::new(OutputFormat::Table)
            .without_colors()
            .without_truncation()
    }

    #[test]
    fn test_format_with_columns() {
        let data = vec![
            TestItem {
                name: "foo".to_string(),
                value: 4.5,
            },
            TestItem {
                name: "bar".to_string(),
                value: 100.0,
            },
        ];
        let columns = vec![
            Column::new("NAME", "name"),
            Column::new("VALUE", "value").with_alignment(Alignment::Right),
        ];

        let output = TableOutput::format_with_columns(&data, &columns, "No items.", &plain());
        assert!(output.contains("NAME"));
        assert!(output.contains("VALUE"));
        assert!(output.contains("foo"));
        assert!(output.contains("4.5"));
    }

    #[test]
    fn test_empty_data() {
        let data: Vec<TestItem> = vec![];
        let columns = vec![Column::new("NAME", "name")];
        let output = TableOutput::format_with_columns(&data, &columns, "No items.", &plain());
        assert_eq!(output, "No items.");
    }

    #[test]
    fn test_missing_field_renders_dash() {
        let data = vec![TestItem {
            name: "x".to_string(),
            value: 1.0,
        }];
        let columns = vec![Column::new("OTHER", "other")];
        let output = TableOutput::format_with_columns(&data, &columns, "", &plain());
        assert!(output.contains('-'));
    }

    #[test]
    fn test_key_value_table() {
        let pairs = vec![("Database", "nav.duckdb".to_string()), ("Nodes", "6".to_string())];
        let output = TableOutput::format_key_value(&pairs, &plain());
        assert!(output.contains("Database"));
        assert!(output.contains("nav.duckdb"));
    }
}
