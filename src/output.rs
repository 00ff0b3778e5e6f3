//! Rendering of query results.
//!
//! - **JSON** via [`to_json()`] / [`to_json_pretty()`], shaped
//!   `{"record_count": .., "filtered_data": [..], "aggregations": {..}}`
//! - **Report** via [`render_report()`], a short human-readable summary
//!
//! Whole numbers are written as JSON integers, and NaN (an average over no
//! values) as `null`.
//!
//! # Examples
//!
//! ```
//! use staffql::{Interpreter, MemoryLoader, Table, Cell, InterpreterConfig, parse, to_json};
//!
//! let table = Table::from_cells(["id", "age"], vec![
//!     vec![Cell::from(1i64), Cell::from(30i64)],
//! ]).unwrap();
//! let loader = MemoryLoader::new().with_table("staff.csv", table);
//! let mut interpreter = Interpreter::with_loader(loader, InterpreterConfig::default());
//!
//! let program = parse(r#"load "staff.csv"; aggregate count column "id"; print;"#).unwrap();
//! let result = interpreter.execute(&program).unwrap().unwrap();
//!
//! assert_eq!(
//!     to_json(&result),
//!     r#"{"record_count":1,"filtered_data":[{"id":1,"age":30}],"aggregations":{"count_id":1}}"#
//! );
//! ```

use serde_json::{Map, Number, Value as Json, json};

use crate::{engine::QueryResult, table::Cell};

/// Rows shown by a report when no preview size is given.
pub const DEFAULT_PREVIEW: usize = 5;

fn number(n: f64) -> Json {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        Json::Number((n as i64).into())
    } else {
        Number::from_f64(n).map(Json::Number).unwrap_or(Json::Null)
    }
}

fn cell_to_json(cell: &Cell) -> Json {
    match cell {
        Cell::Null => Json::Null,
        Cell::Number(n) => number(*n),
        Cell::Text(s) => Json::String(s.clone()),
    }
}

fn row_to_json(columns: &[String], row: &[Cell]) -> Json {
    let object: Map<String, Json> = columns
        .iter()
        .zip(row)
        .map(|(name, cell)| (name.clone(), cell_to_json(cell)))
        .collect();
    Json::Object(object)
}

/// Convert a result to a JSON value. Repeated aggregate names keep the last
/// value.
pub fn to_json_value(result: &QueryResult) -> Json {
    let rows: Vec<Json> = result
        .rows
        .iter()
        .map(|row| row_to_json(&result.columns, row))
        .collect();

    let mut aggregations = Map::new();
    for aggregate in &result.aggregates {
        aggregations.insert(aggregate.name.clone(), number(aggregate.value));
    }

    json!({
        "record_count": result.row_count,
        "filtered_data": rows,
        "aggregations": aggregations,
    })
}

pub fn to_json(result: &QueryResult) -> String {
    to_json_value(result).to_string()
}

pub fn to_json_pretty(result: &QueryResult) -> String {
    // Serializing a serde_json::Value cannot fail.
    serde_json::to_string_pretty(&to_json_value(result)).unwrap_or_default()
}

fn format_aggregate(name: &str, value: f64) -> String {
    let (function, column) = name.split_once('_').unwrap_or((name, ""));
    let formatted = match function {
        "count" => format!("{value}"),
        _ if value.is_nan() => "NaN".to_string(),
        _ => format!("{value:.2}"),
    };

    let mut label = function.to_string();
    if let Some(first) = label.get_mut(0..1) {
        first.make_ascii_uppercase();
    }
    format!("{label} of {column}: {formatted}")
}

/// Human-readable summary: record count, aggregates, and the first
/// `preview` rows as compact JSON.
pub fn render_report(result: &QueryResult, title: &str, preview: usize) -> String {
    let rule = "=".repeat(50);
    let mut out = String::new();

    out.push_str(&format!("\n{rule}\nRunning: {title}\n{rule}\n"));
    out.push_str(&format!("Records found: {}\n", result.row_count));

    if !result.aggregates.is_empty() {
        out.push_str("\nAggregations:\n");
        for aggregate in &result.aggregates {
            out.push_str(&format_aggregate(&aggregate.name, aggregate.value));
            out.push('\n');
        }
    }

    if result.row_count > 0 && preview > 0 {
        out.push_str(&format!("\nFirst {preview} records:\n"));
        for (i, row) in result.rows.iter().take(preview).enumerate() {
            out.push_str(&format!("{}. {}\n", i + 1, row_to_json(&result.columns, row)));
        }
    }

    if result.row_count > preview {
        out.push_str(&format!("... and {} more records.\n", result.row_count - preview));
    }

    out.push_str(&rule);
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AggregateValue;

    fn result() -> QueryResult {
        QueryResult {
            columns: vec!["id".into(), "name".into(), "salary".into()],
            row_count: 2,
            rows: vec![
                vec![Cell::Number(1.0), Cell::Text("Ana".into()), Cell::Number(2500.5)],
                vec![Cell::Number(2.0), Cell::Null, Cell::Number(3000.0)],
            ],
            aggregates: vec![
                AggregateValue {
                    name: "count_id".into(),
                    value: 2.0,
                },
                AggregateValue {
                    name: "average_salary".into(),
                    value: 2750.25,
                },
            ],
        }
    }

    #[test]
    fn test_json_shape() {
        let json = to_json_value(&result());
        assert_eq!(json["record_count"], 2);
        assert_eq!(json["filtered_data"][0]["name"], "Ana");
        assert_eq!(json["filtered_data"][0]["salary"], 2500.5);
        assert_eq!(json["filtered_data"][1]["id"], 2);
        assert!(json["filtered_data"][1]["name"].is_null());
        assert_eq!(json["aggregations"]["average_salary"], 2750.25);
    }

    #[test]
    fn test_nan_is_null() {
        let mut r = result();
        r.aggregates[1].value = f64::NAN;
        assert!(to_json_value(&r)["aggregations"]["average_salary"].is_null());
    }

    #[test]
    fn test_report() {
        let report = render_report(&result(), "demo.dsl", 1);
        assert!(report.contains("Running: demo.dsl"));
        assert!(report.contains("Records found: 2"));
        assert!(report.contains("Count of id: 2\n"));
        assert!(report.contains("Average of salary: 2750.25\n"));
        assert!(report.contains(r#"1. {"id":1,"name":"Ana","salary":2500.5}"#));
        assert!(report.contains("... and 1 more records."));
    }
}
