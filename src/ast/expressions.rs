use std::fmt;

use crate::ast::CompareOp;

/// Literal on the right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Bare number
    ///
    /// # Example
    /// ```text
    /// 2500
    /// ```
    Number(f64),

    /// Double-quoted string, quotes stripped
    ///
    /// # Example
    /// ```text
    /// "Marketing"
    /// ```
    Text(String),

    /// Inclusive numeric range, written `NUMBER and NUMBER`
    ///
    /// # Example
    /// ```text
    /// 30 and 40
    /// ```
    Range { min: f64, max: f64 },
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "\"{s}\""),
            Value::Range { min, max } => write!(f, "{min} and {max}"),
        }
    }
}

/// A single `column "<name>" <op> <value>` test.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub column: String,
    pub op: CompareOp,
    pub value: Value,
}

impl Comparison {
    pub fn new(column: impl Into<String>, op: CompareOp, value: Value) -> Self {
        Comparison {
            column: column.into(),
            op,
            value,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "column \"{}\" {} {}", self.column, self.op, self.value)
    }
}

/// Filter expression tree built from one `filter` statement.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpr {
    /// Leaf comparison
    Comparison(Comparison),

    /// Both sides must hold
    And(Box<FilterExpr>, Box<FilterExpr>),

    /// Either side may hold
    Or(Box<FilterExpr>, Box<FilterExpr>),
}

impl FilterExpr {
    /// Every leaf comparison, in left-to-right order.
    ///
    /// Walks with an explicit stack; long `and`/`or` chains nest on the left
    /// and would otherwise recurse once per leaf.
    pub fn leaves(&self) -> Vec<&Comparison> {
        let mut leaves = Vec::new();
        let mut stack = vec![self];

        while let Some(node) = stack.pop() {
            match node {
                FilterExpr::Comparison(cmp) => leaves.push(cmp),
                FilterExpr::And(left, right) | FilterExpr::Or(left, right) => {
                    stack.push(right);
                    stack.push(left);
                }
            }
        }
        leaves
    }
}

impl From<Comparison> for FilterExpr {
    fn from(cmp: Comparison) -> Self {
        FilterExpr::Comparison(cmp)
    }
}
