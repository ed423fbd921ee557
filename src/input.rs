//! Delimited text reader for the source files in the input directory.

use anyhow::{Context, Result, bail};
use csv::ReaderBuilder;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// An in-memory delimited table. The first record is the header row.
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Index of the column whose header equals `name`.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell at `row`/`name`, or `None` if the column is absent or the row is short.
    pub fn value(&self, row: usize, name: &str) -> Option<&str> {
        let col = self.column(name)?;
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// Drops the current header and promotes the first data row in its place.
    pub fn promote_first_row(mut self) -> Self {
        if !self.rows.is_empty() {
            self.headers = self.rows.remove(0);
        }
        self
    }
}

/// Lists every `.csv` and `.tsv` file in `dir`, sorted by file name.
///
/// # Errors
///
/// Fails if `dir` does not exist or contains no delimited files.
pub fn discover(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Directory {} does not exist", dir.display());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("csv") | Some("tsv")
        ) {
            files.push(path);
        }
    }

    if files.is_empty() {
        bail!("No CSV/TSV files found in {}", dir.display());
    }

    files.sort();
    debug!(dir = %dir.display(), count = files.len(), "Discovered input files");
    Ok(files)
}

/// Returns the first file whose name contains `marker`.
pub fn find_source<'a>(files: &'a [PathBuf], marker: &str) -> Option<&'a Path> {
    files
        .iter()
        .find(|p| {
            p.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.contains(marker))
        })
        .map(PathBuf::as_path)
}

/// Like [`find_source`], but a missing file is an error naming the marker.
pub fn require_source<'a>(files: &'a [PathBuf], marker: &str, dir: &Path) -> Result<&'a Path> {
    find_source(files, marker).with_context(|| {
        format!(
            "No input file containing {} found in {}",
            marker,
            dir.display()
        )
    })
}

/// Reads a delimited file: tab-separated for `.tsv`, comma-separated otherwise.
pub fn read_table(path: &Path) -> Result<Table> {
    let delimiter = match path.extension().and_then(|e| e.to_str()) {
        Some("tsv") => b'\t',
        _ => b',',
    };

    let file = File::open(path).with_context(|| format!("File {} does not exist", path.display()))?;
    let table = parse_table(file, delimiter)
        .with_context(|| format!("Error reading {}", path.display()))?;

    info!(
        file = %path.file_name().and_then(|n| n.to_str()).unwrap_or_default(),
        rows = table.rows.len(),
        "Successfully read input file"
    );
    Ok(table)
}

/// Parses delimited records from any reader. Rows may have differing widths.
pub fn parse_table<R: std::io::Read>(reader: R, delimiter: u8) -> Result<Table> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    if records.is_empty() {
        bail!("file is empty");
    }

    let mut headers = records.remove(0);
    if let Some(first) = headers.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_string();
        }
    }

    Ok(Table {
        headers,
        rows: records,
    })
}
