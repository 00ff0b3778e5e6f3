//! Query execution: filter, sort, aggregate.
//!
//! Everything is resolved against the table before any row is touched, so an
//! unknown column or a type mismatch fails the whole `print` up front.

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use tracing::debug;

use crate::{
    ast::AggregateFn,
    config::{EmptyAverage, InterpreterConfig},
    error::ExecError,
    predicate::{BoundCondition, Condition},
    table::{Cell, ColumnKind, Row, Table},
};

/// An `aggregate` request: one output field named `{function}_{column}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateRequest {
    pub function: AggregateFn,
    pub column: String,
}

impl AggregateRequest {
    pub fn output_name(&self) -> String {
        format!("{}_{}", self.function.name(), self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRequest {
    pub column: String,
    pub ascending: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AggregateValue {
    pub name: String,
    pub value: f64,
}

/// Output of one `print`.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    /// Column names, in table order
    pub columns: Vec<String>,
    pub row_count: usize,
    /// Filtered rows, in sort order
    pub rows: Vec<Row>,
    /// One entry per aggregate request, in request order. Duplicate requests
    /// give duplicate entries.
    pub aggregates: Vec<AggregateValue>,
}

impl QueryResult {
    /// The value of an aggregate by output name. When the same name was
    /// requested more than once, the last request wins.
    pub fn aggregate(&self, name: &str) -> Option<f64> {
        self.aggregates
            .iter()
            .rev()
            .find(|a| a.name == name)
            .map(|a| a.value)
    }

    /// Cells of one column across the result rows.
    pub fn column_values(&self, name: &str) -> Option<Vec<&Cell>> {
        let index = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }
}

/// Run the accumulated query against `table`.
pub fn execute(
    table: &Table,
    conditions: &[Condition],
    sort: Option<&SortRequest>,
    aggregations: &[AggregateRequest],
    config: &InterpreterConfig,
) -> Result<QueryResult, ExecError> {
    let bound = conditions
        .iter()
        .map(|c| c.bind(table))
        .collect::<Result<Vec<BoundCondition<'_>>, _>>()?;

    let sort_index = sort
        .map(|s| column_index(table, &s.column).map(|index| (index, s.ascending)))
        .transpose()?;

    let aggregate_columns = aggregations
        .iter()
        .map(|a| column_index(table, &a.column))
        .collect::<Result<Vec<_>, _>>()?;

    let filtered = table.filter(|row| bound.iter().all(|c| c.matches(row)))?;
    debug!(
        rows = table.row_count(),
        kept = filtered.row_count(),
        conditions = bound.len(),
        "filtered"
    );

    let mut aggregates = Vec::with_capacity(aggregations.len());
    for (request, &index) in aggregations.iter().zip(&aggregate_columns) {
        let value = aggregate(&filtered, request, index, config.empty_average)?;
        aggregates.push(AggregateValue {
            name: request.output_name(),
            value,
        });
    }

    let sorted = match sort_index {
        Some((index, ascending)) => filtered.sort(index, ascending)?,
        None => filtered,
    };

    Ok(QueryResult {
        columns: table.column_names().into_iter().map(str::to_string).collect(),
        row_count: sorted.row_count(),
        rows: sorted.rows(),
        aggregates,
    })
}

fn column_index(table: &Table, name: &str) -> Result<usize, ExecError> {
    table
        .column_index(name)
        .ok_or_else(|| ExecError::UnknownColumn {
            column: name.to_string(),
        })
}

fn aggregate(
    rows: &Table,
    request: &AggregateRequest,
    index: usize,
    empty_average: EmptyAverage,
) -> Result<f64, ExecError> {
    match request.function {
        AggregateFn::Count => Ok(rows.row_count() as f64),
        AggregateFn::Sum => Ok(sum(&numeric_values(rows, request, index)?)),
        AggregateFn::Average => {
            let values = numeric_values(rows, request, index)?;
            if !values.is_empty() {
                return Ok(mean(&values));
            }
            match empty_average {
                EmptyAverage::NaN => Ok(f64::NAN),
                EmptyAverage::Error => Err(ExecError::EmptyAggregate {
                    column: request.column.clone(),
                }),
            }
        }
    }
}

/// Non-null numbers of a numeric column.
fn numeric_values(
    rows: &Table,
    request: &AggregateRequest,
    index: usize,
) -> Result<Vec<f64>, ExecError> {
    let column = &rows.columns()[index];
    if column.kind != ColumnKind::Number {
        return Err(ExecError::NonNumericAggregate {
            function: request.function.name(),
            column: request.column.clone(),
            kind: column.kind,
        });
    }

    Ok(rows
        .column_values(&column.name)
        .unwrap_or_default()
        .iter()
        .filter_map(Cell::as_number)
        .collect())
}

/// Exact decimal sum, if every value converts and nothing overflows.
fn decimal_sum(values: &[f64]) -> Option<Decimal> {
    values.iter().try_fold(Decimal::ZERO, |acc, &v| {
        acc.checked_add(Decimal::from_f64(v)?)
    })
}

fn sum(values: &[f64]) -> f64 {
    decimal_sum(values)
        .and_then(|d| d.to_f64())
        .unwrap_or_else(|| values.iter().sum())
}

fn mean(values: &[f64]) -> f64 {
    let count = values.len();
    if let Some(total) = decimal_sum(values)
        && let Some(mean) = total.checked_div(Decimal::from(count))
        && let Some(mean) = mean.to_f64()
    {
        return mean;
    }
    values.iter().sum::<f64>() / count as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_sum_is_exact() {
        assert_eq!(sum(&[0.1, 0.2]), 0.3);
        assert_eq!(sum(&[]), 0.0);
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[30.0, 40.0]), 35.0);
        assert!((mean(&[1.0, 2.0, 2.0]) - 5.0 / 3.0).abs() < 1e-12);
    }
}
