use std::fmt;

use crate::ast::{FilterExpr, Token};

/// Comparison operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Greater than (`>`)
    GreaterThan,
    /// Less than (`<`)
    LessThan,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Equal (`==`)
    Equal,
    /// Not equal (`!=`)
    NotEqual,
    /// Inclusive range test (`between`), the only operator taking a range
    Between,
}

impl CompareOp {
    pub fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::Gt => Some(CompareOp::GreaterThan),
            Token::Lt => Some(CompareOp::LessThan),
            Token::GtEq => Some(CompareOp::GreaterEqual),
            Token::LtEq => Some(CompareOp::LessEqual),
            Token::EqEq => Some(CompareOp::Equal),
            Token::NotEq => Some(CompareOp::NotEqual),
            Token::Between => Some(CompareOp::Between),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::GreaterThan => ">",
            CompareOp::LessThan => "<",
            CompareOp::GreaterEqual => ">=",
            CompareOp::LessEqual => "<=",
            CompareOp::Equal => "==",
            CompareOp::NotEqual => "!=",
            CompareOp::Between => "between",
        }
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Boolean connectives joining comparisons inside one `filter` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connective {
    /// Logical AND (`and`)
    And,
    /// Logical OR (`or`)
    Or,
}

impl Connective {
    pub fn from_token(token: &Token) -> Option<Self> {
        match token {
            Token::And => Some(Connective::And),
            Token::Or => Some(Connective::Or),
            _ => None,
        }
    }

    /// Binding power for precedence climbing. Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Connective::And => 2,
            Connective::Or => 1,
        }
    }

    /// Join two operands under this connective.
    pub fn join(self, left: FilterExpr, right: FilterExpr) -> FilterExpr {
        match self {
            Connective::And => FilterExpr::And(Box::new(left), Box::new(right)),
            Connective::Or => FilterExpr::Or(Box::new(left), Box::new(right)),
        }
    }
}
