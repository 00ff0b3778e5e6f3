//! Table sources for `load` statements.

use std::{
    collections::HashMap,
    fs::File,
    path::{Path, PathBuf},
};

use csv::{ReaderBuilder, Trim};
use tracing::debug;

use crate::table::{Table, TableError};

/// Resolves the path of a `load` statement to a table.
pub trait TableLoader {
    fn load(&self, path: &str) -> Result<Table, TableError>;
}

impl<T: TableLoader + ?Sized> TableLoader for &T {
    fn load(&self, path: &str) -> Result<Table, TableError> {
        (**self).load(path)
    }
}

/// Reads headered CSV files from disk.
///
/// Relative paths resolve against `base_dir` when one is set, otherwise
/// against the process working directory.
#[derive(Debug, Clone, Default)]
pub struct CsvLoader {
    base_dir: Option<PathBuf>,
}

impl CsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        CsvLoader {
            base_dir: Some(base_dir.into()),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl TableLoader for CsvLoader {
    fn load(&self, path: &str) -> Result<Table, TableError> {
        let resolved = self.resolve(path);
        debug!(path = %resolved.display(), "reading CSV");

        let file = File::open(&resolved).map_err(|source| TableError::Io {
            path: path.to_string(),
            source,
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(file);

        let csv_error = |source| TableError::Csv {
            path: path.to_string(),
            source,
        };

        let headers: Vec<String> = reader
            .headers()
            .map_err(csv_error)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut records = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            records.push(record.iter().map(str::to_string).collect());
        }

        Table::from_records(headers, records)
    }
}

/// Serves pre-built tables by path. Useful for tests and for embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    tables: HashMap<String, Table>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, path: impl Into<String>, table: Table) -> Self {
        self.insert(path, table);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, table: Table) {
        self.tables.insert(path.into(), table);
    }
}

impl TableLoader for MemoryLoader {
    fn load(&self, path: &str) -> Result<Table, TableError> {
        self.tables
            .get(path)
            .cloned()
            .ok_or_else(|| TableError::NotFound(path.to_string()))
    }
}
