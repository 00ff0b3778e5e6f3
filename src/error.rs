use thiserror::Error;

use crate::{
    ast::{CompareOp, Value},
    table::{ColumnKind, TableError},
};

/// Errors raised while running statements against a session.
#[derive(Debug, Error)]
pub enum ExecError {
    /// A statement other than `load` ran before any table was loaded.
    #[error("no table loaded; run `load \"<file>\";` first")]
    NoTableLoaded,

    #[error("unknown column \"{column}\"")]
    UnknownColumn { column: String },

    /// Operator and value do not fit each other, e.g. `>` with a range or
    /// `between` without one.
    #[error("operator `{op}` cannot take value {value} (column \"{column}\")")]
    OperatorMismatch {
        column: String,
        op: CompareOp,
        value: Value,
    },

    /// The value's type does not match the column's type.
    #[error("cannot compare {kind} column \"{column}\" with {value}")]
    ColumnMismatch {
        column: String,
        kind: ColumnKind,
        value: Value,
    },

    #[error("cannot {function} {kind} column \"{column}\"")]
    NonNumericAggregate {
        function: &'static str,
        column: String,
        kind: ColumnKind,
    },

    #[error("average of column \"{column}\" is undefined: no values")]
    EmptyAggregate { column: String },

    #[error("failed to load \"{path}\": {source}")]
    Load {
        path: String,
        #[source]
        source: TableError,
    },

    /// Rebuilding the filtered or sorted table failed.
    #[error(transparent)]
    Table(#[from] TableError),
}

impl ExecError {
    /// Error taxonomy name, for reporting.
    pub fn category(&self) -> &'static str {
        match self {
            ExecError::NoTableLoaded => "StateError",
            ExecError::UnknownColumn { .. } => "ColumnError",
            ExecError::OperatorMismatch { .. }
            | ExecError::ColumnMismatch { .. }
            | ExecError::NonNumericAggregate { .. } => "TypeError",
            ExecError::EmptyAggregate { .. } => "EmptyAggregateError",
            ExecError::Load { .. } => "LoadError",
            ExecError::Table(_) => "TableError",
        }
    }
}

/// An [`ExecError`] tagged with the statement that raised it.
#[derive(Debug, Error)]
#[error("statement {} (`{keyword}`): {source}", .index + 1)]
pub struct StatementError {
    /// 0-based position of the statement in its program
    pub index: usize,
    pub keyword: &'static str,
    #[source]
    pub source: ExecError,
}
