//! Resolved filter predicates and the rule for combining them.
//!
//! A `filter` statement's expression tree is resolved once, when the
//! statement runs: each leaf comparison is checked for operator/value
//! compatibility and turned into a [`Predicate`]. How the tree's connectives
//! are kept is decided by [`FilterMode`].

use crate::{
    ast::{CompareOp, Comparison, FilterExpr, Value},
    error::ExecError,
    table::{Cell, ColumnKind, Row, Table},
};

/// Ordering relations usable with a single value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    GreaterThan,
    LessThan,
    GreaterEqual,
    LessEqual,
    Equal,
    NotEqual,
}

impl Relation {
    fn holds<T: PartialOrd + ?Sized>(self, left: &T, right: &T) -> bool {
        match self {
            Relation::GreaterThan => left > right,
            Relation::LessThan => left < right,
            Relation::GreaterEqual => left >= right,
            Relation::LessEqual => left <= right,
            Relation::Equal => left == right,
            Relation::NotEqual => left != right,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Number(f64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Test {
    Compare { relation: Relation, operand: Operand },
    /// Inclusive on both ends
    Between { min: f64, max: f64 },
}

impl Test {
    /// The literal this test was written with.
    pub fn value(&self) -> Value {
        match self {
            Test::Compare {
                operand: Operand::Number(n),
                ..
            } => Value::Number(*n),
            Test::Compare {
                operand: Operand::Text(s),
                ..
            } => Value::Text(s.clone()),
            Test::Between { min, max } => Value::Range {
                min: *min,
                max: *max,
            },
        }
    }

    /// Whether a cell passes. Nulls fail everything except `!=`.
    pub fn matches(&self, cell: &Cell) -> bool {
        match (self, cell) {
            (
                Test::Compare {
                    relation,
                    operand: Operand::Number(value),
                },
                Cell::Number(n),
            ) => relation.holds(n, value),
            (
                Test::Compare {
                    relation,
                    operand: Operand::Text(value),
                },
                Cell::Text(s),
            ) => relation.holds(s.as_str(), value.as_str()),
            (Test::Between { min, max }, Cell::Number(n)) => *min <= *n && *n <= *max,
            (
                Test::Compare {
                    relation: Relation::NotEqual,
                    ..
                },
                Cell::Null,
            ) => true,
            _ => false,
        }
    }

    fn accepts(&self, kind: ColumnKind) -> bool {
        matches!(
            (self, kind),
            (
                Test::Compare {
                    operand: Operand::Number(_),
                    ..
                },
                ColumnKind::Number
            ) | (
                Test::Compare {
                    operand: Operand::Text(_),
                    ..
                },
                ColumnKind::Text
            ) | (Test::Between { .. }, ColumnKind::Number)
        )
    }
}

/// One leaf comparison, checked and ready to apply.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub test: Test,
}

impl Predicate {
    /// Check that the operator fits the value: `between` takes a range and
    /// nothing else does.
    pub fn resolve(comparison: &Comparison) -> Result<Self, ExecError> {
        let relation = match comparison.op {
            CompareOp::GreaterThan => Some(Relation::GreaterThan),
            CompareOp::LessThan => Some(Relation::LessThan),
            CompareOp::GreaterEqual => Some(Relation::GreaterEqual),
            CompareOp::LessEqual => Some(Relation::LessEqual),
            CompareOp::Equal => Some(Relation::Equal),
            CompareOp::NotEqual => Some(Relation::NotEqual),
            CompareOp::Between => None,
        };

        let test = match (relation, &comparison.value) {
            (Some(relation), Value::Number(n)) => Test::Compare {
                relation,
                operand: Operand::Number(*n),
            },
            (Some(relation), Value::Text(s)) => Test::Compare {
                relation,
                operand: Operand::Text(s.clone()),
            },
            (None, Value::Range { min, max }) => Test::Between {
                min: *min,
                max: *max,
            },
            (Some(_), Value::Range { .. }) | (None, Value::Number(_) | Value::Text(_)) => {
                return Err(ExecError::OperatorMismatch {
                    column: comparison.column.clone(),
                    op: comparison.op,
                    value: comparison.value.clone(),
                });
            }
        };

        Ok(Predicate {
            column: comparison.column.clone(),
            test,
        })
    }

    fn bind<'a>(&'a self, table: &Table) -> Result<BoundPredicate<'a>, ExecError> {
        let index = table
            .column_index(&self.column)
            .ok_or_else(|| ExecError::UnknownColumn {
                column: self.column.clone(),
            })?;
        let kind = table.columns()[index].kind;

        if !self.test.accepts(kind) {
            return Err(ExecError::ColumnMismatch {
                column: self.column.clone(),
                kind,
                value: self.test.value(),
            });
        }
        Ok(BoundPredicate {
            index,
            test: &self.test,
        })
    }
}

/// A filter condition held by the session.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Leaf(Predicate),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

impl Condition {
    /// Resolve columns against `table` and check column types.
    pub fn bind<'a>(&'a self, table: &Table) -> Result<BoundCondition<'a>, ExecError> {
        Ok(match self {
            Condition::Leaf(p) => BoundCondition::Leaf(p.bind(table)?),
            Condition::And(left, right) => BoundCondition::And(
                Box::new(left.bind(table)?),
                Box::new(right.bind(table)?),
            ),
            Condition::Or(left, right) => BoundCondition::Or(
                Box::new(left.bind(table)?),
                Box::new(right.bind(table)?),
            ),
        })
    }

    fn from_expr(expr: &FilterExpr) -> Result<Self, ExecError> {
        Ok(match expr {
            FilterExpr::Comparison(cmp) => Condition::Leaf(Predicate::resolve(cmp)?),
            FilterExpr::And(left, right) => Condition::And(
                Box::new(Self::from_expr(left)?),
                Box::new(Self::from_expr(right)?),
            ),
            FilterExpr::Or(left, right) => Condition::Or(
                Box::new(Self::from_expr(left)?),
                Box::new(Self::from_expr(right)?),
            ),
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct BoundPredicate<'a> {
    index: usize,
    test: &'a Test,
}

#[derive(Debug)]
pub enum BoundCondition<'a> {
    Leaf(BoundPredicate<'a>),
    And(Box<BoundCondition<'a>>, Box<BoundCondition<'a>>),
    Or(Box<BoundCondition<'a>>, Box<BoundCondition<'a>>),
}

impl BoundCondition<'_> {
    pub fn matches(&self, row: &Row) -> bool {
        match self {
            BoundCondition::Leaf(p) => p.test.matches(&row[p.index]),
            BoundCondition::And(left, right) => left.matches(row) && right.matches(row),
            BoundCondition::Or(left, right) => left.matches(row) || right.matches(row),
        }
    }
}

/// How a `filter` statement's connectives reach execution.
///
/// The session's conditions are always applied as a conjunction; this only
/// decides what one `filter` statement contributes to that list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMode {
    /// Every leaf comparison becomes its own condition and the connectives
    /// are dropped, so `or` behaves like `and`. This is the language's
    /// established behavior.
    #[default]
    Conjunctive,
    /// The statement contributes one condition that keeps its `and`/`or`
    /// tree.
    Boolean,
}

impl FilterMode {
    /// Resolve `expr` into the conditions to append. Nothing is returned if
    /// any leaf fails to resolve.
    pub fn combine(self, expr: &FilterExpr) -> Result<Vec<Condition>, ExecError> {
        match self {
            FilterMode::Conjunctive => expr
                .leaves()
                .into_iter()
                .map(|cmp| Predicate::resolve(cmp).map(Condition::Leaf))
                .collect(),
            FilterMode::Boolean => Ok(vec![Condition::from_expr(expr)?]),
        }
    }
}
