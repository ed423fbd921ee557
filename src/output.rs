//! Output formatting and persistence for report rows and run summaries.
//!
//! Supports pretty-printing, JSON serialization, and CSV writing.

use anyhow::{Context, Result};
use csv::WriterBuilder;
use serde::Serialize;
use std::fmt::Debug;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Renders a summary's fields as `(property, value)` pairs in declaration order.
///
/// Missing values are shown as `N/A`; numbers keep their JSON rendering.
pub fn table_rows<T: Serialize>(value: &T) -> Result<Vec<(String, String)>> {
    let serde_json::Value::Object(fields) = serde_json::to_value(value)? else {
        return Ok(Vec::new());
    };
    Ok(fields
        .into_iter()
        .map(|(property, v)| {
            let rendered = match v {
                serde_json::Value::Null => "N/A".to_string(),
                serde_json::Value::String(s) => s,
                serde_json::Value::Array(items) => items
                    .iter()
                    .map(|i| i.as_str().map(str::to_string).unwrap_or_else(|| i.to_string()))
                    .collect::<Vec<_>>()
                    .join(", "),
                other => other.to_string(),
            };
            (property, rendered)
        })
        .collect())
}

/// Logs a summary as `property = value` lines under a title.
pub fn print_table<T: Serialize>(title: &str, value: &T) -> Result<()> {
    info!("{}", title);
    for (property, rendered) in table_rows(value)? {
        info!("  {:<24} {}", property, rendered);
    }
    Ok(())
}

/// Logs a run summary either as JSON or as a property table.
pub fn print_summary<T: Serialize + Debug>(title: &str, value: &T, json: bool) -> Result<()> {
    print_pretty(value);
    if json {
        print_json(value)
    } else {
        print_table(title, value)
    }
}

/// Writes `records` to a CSV file with a header row, replacing any existing file.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = records.len(), "Writing CSV");

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(file);

    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[derive(Debug, Serialize)]
    struct Row {
        name: String,
        value: Option<u64>,
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(name)
    }

    fn rows() -> Vec<Row> {
        vec![
            Row {
                name: "alabama".into(),
                value: Some(1),
            },
            Row {
                name: "ohio".into(),
                value: None,
            },
        ]
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&rows());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&rows()).unwrap();
    }

    #[test]
    fn test_print_summary_table() {
        print_summary("Summary", &rows()[0], false).unwrap();
        print_summary("Summary", &rows()[1], true).unwrap();
    }

    #[test]
    fn test_table_rows_keep_field_order() {
        #[derive(Serialize)]
        struct Summary {
            output_file: String,
            total_rows: usize,
            data_date: Option<String>,
            charts: Vec<String>,
        }

        let rows = table_rows(&Summary {
            output_file: "out/output.csv".into(),
            total_rows: 7,
            data_date: None,
            charts: vec!["a.png".into(), "b.png".into()],
        })
        .unwrap();

        assert_eq!(
            rows,
            vec![
                ("output_file".to_string(), "out/output.csv".to_string()),
                ("total_rows".to_string(), "7".to_string()),
                ("data_date".to_string(), "N/A".to_string()),
                ("charts".to_string(), "a.png, b.png".to_string()),
            ]
        );
    }

    #[test]
    fn test_write_records_header_and_empty_cells() {
        let path = temp_path("data_analyzer_test_write.csv");
        let _ = fs::remove_file(&path);

        write_records(&path, &rows()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines, vec!["name,value", "alabama,1", "ohio,"]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_records_replaces_existing_file() {
        let path = temp_path("data_analyzer_test_replace.csv");
        let _ = fs::remove_file(&path);

        write_records(&path, &rows()).unwrap();
        write_records(&path, &rows()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        // Header line should appear exactly once
        let header_count = content.lines().filter(|l| l.starts_with("name")).count();
        assert_eq!(header_count, 1);
        assert_eq!(content.lines().count(), 3);

        fs::remove_file(&path).unwrap();
    }
}
