//! Typed tables backed by a [`pandrs::DataFrame`].
//!
//! A [`Table`] is what `load` produces and what `print` queries. Each column
//! lives in the frame as a `Series<Option<f64>>` or `Series<Option<String>>`,
//! `None` standing for an empty field. Tables are never modified in place:
//! [`Table::filter`] and [`Table::sort`] pick row indices and build a new
//! frame from them.

pub mod cell;
pub mod loader;

use std::{cmp::Ordering, fmt, io};

use pandrs::{DataFrame, Series};
use thiserror::Error;

pub use cell::Cell;
pub use loader::{CsvLoader, MemoryLoader, TableLoader};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("table not found: \"{0}\"")]
    NotFound(String),

    #[error("I/O error reading \"{path}\": {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV in \"{path}\": {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("row {row} has {found} fields, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("duplicate column name \"{0}\"")]
    DuplicateColumn(String),

    #[error("column \"{column}\" mixes numbers and text")]
    MixedColumn { column: String },

    #[error("dataframe error: {0}")]
    Frame(#[from] pandrs::Error),
}

/// The type shared by every non-null cell of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Number,
    Text,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Number => f.write_str("numeric"),
            ColumnKind::Text => f.write_str("text"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
}

/// Cells of one row, in column order.
pub type Row = Vec<Cell>;

/// Values of one column, in the element type the frame stores them as.
enum Values {
    Number(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

impl Values {
    /// Numeric when every non-empty field is a finite number, text otherwise.
    fn from_fields(fields: Vec<String>) -> Values {
        let numbers = fields
            .iter()
            .map(|field| match Cell::infer(field) {
                Cell::Null => Some(None),
                Cell::Number(n) => Some(Some(n)),
                Cell::Text(_) => None,
            })
            .collect::<Option<Vec<_>>>();

        match numbers {
            Some(numbers) => Values::Number(numbers),
            None => Values::Text(
                fields
                    .into_iter()
                    .map(|field| (!field.is_empty()).then_some(field))
                    .collect(),
            ),
        }
    }

    fn from_cells(kind: ColumnKind, cells: impl IntoIterator<Item = Cell>) -> Values {
        let cells = cells.into_iter();
        match kind {
            ColumnKind::Number => Values::Number(cells.map(|cell| cell.as_number()).collect()),
            ColumnKind::Text => Values::Text(
                cells
                    .map(|cell| match cell {
                        Cell::Text(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            ),
        }
    }

    fn kind(&self) -> ColumnKind {
        match self {
            Values::Number(_) => ColumnKind::Number,
            Values::Text(_) => ColumnKind::Text,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    frame: DataFrame,
    columns: Vec<Column>,
}

impl Table {
    /// Build a table from raw string records, one typed series per column.
    pub fn from_records(headers: Vec<String>, records: Vec<Vec<String>>) -> Result<Self, TableError> {
        check_width(headers.len(), records.iter().map(Vec::len))?;

        let mut fields: Vec<Vec<String>> = vec![Vec::with_capacity(records.len()); headers.len()];
        for record in records {
            for (column, field) in fields.iter_mut().zip(record) {
                column.push(field);
            }
        }

        let values = fields.into_iter().map(Values::from_fields).collect();
        Table::build(headers, values)
    }

    /// Build a table from already-typed cells.
    ///
    /// An all-null column is numeric.
    pub fn from_cells<S: Into<String>>(
        names: impl IntoIterator<Item = S>,
        rows: Vec<Row>,
    ) -> Result<Self, TableError> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        check_width(names.len(), rows.iter().map(Vec::len))?;

        let mut cells: Vec<Vec<Cell>> = vec![Vec::with_capacity(rows.len()); names.len()];
        for row in rows {
            for (column, cell) in cells.iter_mut().zip(row) {
                column.push(cell);
            }
        }

        let mut values = Vec::with_capacity(names.len());
        for (name, column) in names.iter().zip(cells) {
            let has_number = column.iter().any(|c| matches!(c, Cell::Number(_)));
            let has_text = column.iter().any(|c| matches!(c, Cell::Text(_)));
            let kind = match (has_number, has_text) {
                (true, true) => return Err(TableError::MixedColumn { column: name.clone() }),
                (false, true) => ColumnKind::Text,
                _ => ColumnKind::Number,
            };
            values.push(Values::from_cells(kind, column));
        }

        Table::build(names, values)
    }

    fn build(names: Vec<String>, values: Vec<Values>) -> Result<Self, TableError> {
        let mut frame = DataFrame::new();
        let mut columns = Vec::with_capacity(names.len());

        for (name, values) in names.into_iter().zip(values) {
            if frame.contains_column(&name) {
                return Err(TableError::DuplicateColumn(name));
            }
            let kind = values.kind();
            match values {
                Values::Number(v) => frame.add_column(name.clone(), Series::new(v, Some(name.clone()))?)?,
                Values::Text(v) => frame.add_column(name.clone(), Series::new(v, Some(name.clone()))?)?,
            }
            columns.push(Column { name, kind });
        }

        Ok(Table { frame, columns })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn row_count(&self) -> usize {
        self.frame.row_count()
    }

    /// Every row, top to bottom.
    pub fn rows(&self) -> Vec<Row> {
        let mut columns: Vec<_> = self
            .columns
            .iter()
            .map(|column| self.cells(column).into_iter())
            .collect();

        (0..self.row_count())
            .map(|_| {
                columns
                    .iter_mut()
                    .map(|cells| cells.next().unwrap_or(Cell::Null))
                    .collect()
            })
            .collect()
    }

    /// Every cell of the named column, top to bottom.
    pub fn column_values(&self, name: &str) -> Option<Vec<Cell>> {
        self.column(name).map(|column| self.cells(column))
    }

    /// A new table holding the rows for which `keep` returns true.
    pub fn filter(&self, mut keep: impl FnMut(&Row) -> bool) -> Result<Table, TableError> {
        let indices: Vec<usize> = self
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| keep(row))
            .map(|(i, _)| i)
            .collect();
        self.take(&indices)
    }

    /// A new table stably sorted by the column at `index`.
    ///
    /// Nulls go last in both directions.
    pub fn sort(&self, index: usize, ascending: bool) -> Result<Table, TableError> {
        let Some(column) = self.columns.get(index) else {
            return Ok(self.clone());
        };
        let cells = self.cells(column);

        let mut order: Vec<usize> = (0..cells.len()).collect();
        order.sort_by(|&a, &b| {
            let (a, b) = (&cells[a], &cells[b]);
            match (a.is_null(), b.is_null()) {
                (false, false) if ascending => a.sort_cmp(b),
                (false, false) => b.sort_cmp(a),
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
            }
        });
        self.take(&order)
    }

    /// A new table made of the rows at `indices`, in that order.
    fn take(&self, indices: &[usize]) -> Result<Table, TableError> {
        let names = self.columns.iter().map(|c| c.name.clone()).collect();
        let values = self
            .columns
            .iter()
            .map(|column| {
                let cells = self.cells(column);
                let picked = indices
                    .iter()
                    .map(|&i| cells.get(i).cloned().unwrap_or(Cell::Null));
                Values::from_cells(column.kind, picked)
            })
            .collect();
        Table::build(names, values)
    }

    fn cells(&self, column: &Column) -> Vec<Cell> {
        let cells = match column.kind {
            ColumnKind::Number => self
                .frame
                .get_column::<Option<f64>>(&column.name)
                .map(|series| {
                    series
                        .values()
                        .iter()
                        .copied()
                        .map(|v| v.map_or(Cell::Null, Cell::Number))
                        .collect()
                }),
            ColumnKind::Text => self
                .frame
                .get_column::<Option<String>>(&column.name)
                .map(|series| {
                    series
                        .values()
                        .iter()
                        .map(|v| v.clone().map_or(Cell::Null, Cell::Text))
                        .collect()
                }),
        };
        // `build` stores every column as the series type its kind names.
        cells.unwrap_or_else(|_| vec![Cell::Null; self.row_count()])
    }
}

fn check_width(expected: usize, widths: impl Iterator<Item = usize>) -> Result<(), TableError> {
    for (i, found) in widths.enumerate() {
        if found != expected {
            return Err(TableError::Ragged {
                row: i + 1,
                found,
                expected,
            });
        }
    }
    Ok(())
}
