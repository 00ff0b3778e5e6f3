use std::fmt;

use crate::ast::FilterExpr;

/// Aggregate functions accepted by `aggregate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFn {
    /// Number of rows
    Count,
    /// Sum of the column's numbers
    Sum,
    /// Arithmetic mean of the column's numbers
    Average,
}

impl AggregateFn {
    pub fn name(self) -> &'static str {
        match self {
            AggregateFn::Count => "count",
            AggregateFn::Sum => "sum",
            AggregateFn::Average => "average",
        }
    }
}

impl fmt::Display for AggregateFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Script statement.
///
/// Statements run in source order against one session.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// Load a CSV table, replacing any loaded one
    ///
    /// # Example
    /// ```text
    /// load "employees.csv";
    /// ```
    Load { path: String },

    /// Add filter predicates to the session
    ///
    /// # Example
    /// ```text
    /// filter column "age" > 25 and column "salary" < 4000;
    /// ```
    Filter(FilterExpr),

    /// Request an aggregate, reported as `{function}_{column}`
    ///
    /// # Example
    /// ```text
    /// aggregate average column "salary";
    /// ```
    Aggregate { function: AggregateFn, column: String },

    /// Set the sort order, replacing any earlier one
    ///
    /// # Example
    /// ```text
    /// sort column "salary" desc;
    /// ```
    Sort { column: String, ascending: bool },

    /// Execute the accumulated query
    Print,
}

impl Statement {
    /// The leading keyword, for diagnostics.
    pub fn keyword(&self) -> &'static str {
        match self {
            Statement::Load { .. } => "load",
            Statement::Filter(_) => "filter",
            Statement::Aggregate { .. } => "aggregate",
            Statement::Sort { .. } => "sort",
            Statement::Print => "print",
        }
    }
}
