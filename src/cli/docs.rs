//! Documentation content for the staffql CLI

use super::CliError;

/// Available documentation topics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocTopic {
    Syntax,
    Filters,
    Aggregates,
    Errors,
}

impl DocTopic {
    /// Parse topic name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "syntax" | "statements" => Some(Self::Syntax),
            "filters" | "filter" | "operators" | "ops" => Some(Self::Filters),
            "aggregates" | "aggregate" | "sort" => Some(Self::Aggregates),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (topic listing)
pub fn get_docs_overview() -> &'static str {
    r#"STAFFQL DOCUMENTATION

staffql is a small statement language for querying a table of employee
records. A script loads a CSV file, accumulates filters, aggregates and a sort
order, and prints the result.

DOCUMENTATION TOPICS

  syntax            Statements, literals, comments
  filters           Comparison operators, ranges, and/or
  aggregates        count / sum / average, and sorting
  errors            What can go wrong and when

QUICK REFERENCE

  load "file.csv";                               Load a table
  filter column "age" > 25;                      Keep matching rows
  filter column "age" between 30 and 40;         Inclusive range
  aggregate average column "salary";             Adds average_salary
  sort column "salary" desc;                     Order rows
  print;                                         Run and show the query

Run 'staffql doc <topic>' for detailed documentation.
"#
}

/// Get documentation for a specific topic
pub fn get_doc_topic(name: &str) -> Result<&'static str, CliError> {
    match DocTopic::from_name(name) {
        Some(DocTopic::Syntax) => Ok(SYNTAX_DOC),
        Some(DocTopic::Filters) => Ok(FILTERS_DOC),
        Some(DocTopic::Aggregates) => Ok(AGGREGATES_DOC),
        Some(DocTopic::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownTopic(name.to_string())),
    }
}

const SYNTAX_DOC: &str = r#"SYNTAX - Statements

Every statement ends with ';'. Keywords are lowercase.

  load "<path>";
  filter column "<name>" <op> <value> [(and|or) [filter] column ... ];
  aggregate (count|sum|average) column "<name>";
  sort column "<name>" (asc|desc);
  print;

LITERALS
  "text"      Double-quoted; no escape sequences
  42, 2500.5  Unsigned integer or decimal numbers

COMMENTS
  // to the end of the line

EXECUTION
  Statements run in order. filter, aggregate and sort add to the session's
  query; print runs it without clearing anything, so a later print sees
  everything accumulated before it.
"#;

const FILTERS_DOC: &str = r#"FILTERS - Comparisons and Connectives

COMPARISON OPERATORS
  >  <  >=  <=  ==  !=
    Compare a column with a number or a string. The value must match the
    column's type: numeric columns take numbers, text columns take strings.

  between MIN and MAX
    Inclusive numeric range: keeps MIN <= value <= MAX.

  Examples:
    filter column "age" >= 25;
    filter column "department" == "Legal";
    filter column "salary" between 2500 and 4000;

EMPTY FIELDS
  An empty CSV field never matches, except with !=.

CONNECTIVES
  and binds tighter than or; both group left to right.

    a and b or c      is  (a and b) or c

  By default every comparison in a filter must hold, whichever connective
  joins them: or behaves like and. Run with --boolean-filters to evaluate
  and/or as written.
"#;

const AGGREGATES_DOC: &str = r#"AGGREGATES AND SORTING

AGGREGATES
  aggregate count column "id";        count_id: rows left after filtering
  aggregate sum column "salary";      sum_salary: total, 0 when no rows
  aggregate average column "salary";  average_salary: mean, NaN when no rows

  Aggregates are computed over filtered rows; sorting does not affect them.
  sum and average need a numeric column and skip empty fields. Requesting
  the same aggregate twice lists it twice; the JSON output keeps the last.

SORTING
  sort column "salary" desc;

  Only the latest sort applies. Sorting is stable and puts empty fields last.
"#;

const ERRORS_DOC: &str = r#"ERRORS

LexError      A character or word the language does not know
ParseError    A statement that does not follow the grammar
StateError    filter, aggregate, sort or print before any load
ColumnError   A column the loaded table does not have (reported at print)
TypeError     between without a range, a range without between, a string
              against a numeric column, or sum/average of a text column
EmptyAggregateError
              average over no values, with --strict-average

A failed print leaves the session untouched: fix the script and print again
without reloading.
"#;
