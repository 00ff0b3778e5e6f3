//! Interpreter configuration.

use crate::predicate::FilterMode;

/// What a second `load` does to the query state accumulated so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReloadPolicy {
    /// Keep filters, aggregations and sort; they apply to the new table.
    #[default]
    Keep,
    /// Start the new table with an empty query.
    Reset,
}

/// Result of `average` over a column with no values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyAverage {
    /// Report NaN (printed as `null` in JSON).
    #[default]
    NaN,
    /// Fail the `print` with `ExecError::EmptyAggregate`.
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InterpreterConfig {
    pub reload: ReloadPolicy,
    pub filter_mode: FilterMode,
    pub empty_average: EmptyAverage,
}

impl InterpreterConfig {
    pub fn with_reload(mut self, reload: ReloadPolicy) -> Self {
        self.reload = reload;
        self
    }

    pub fn with_filter_mode(mut self, filter_mode: FilterMode) -> Self {
        self.filter_mode = filter_mode;
        self
    }

    pub fn with_empty_average(mut self, empty_average: EmptyAverage) -> Self {
        self.empty_average = empty_average;
        self
    }
}
