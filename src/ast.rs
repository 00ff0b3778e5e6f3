//! # Staffql - Abstract Syntax Tree
//!
//! This module defines the Abstract Syntax Tree (AST) for the staffql query
//! language, a small statement language for loading a table of employee
//! records, narrowing it with filters, and printing sorted rows and aggregates.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Filter expressions and literal values
//! - **[operators]** - Comparison operators and the boolean connectives
//! - **[statements]** - The five statement kinds
//! - **[program]** - A complete script
//!
//! ## Quick Start
//!
//! ```text
//! load "employees.csv";
//! filter column "age" >= 25 and column "department" == "Sales";
//! aggregate average column "salary";
//! sort column "salary" desc;
//! print;
//! ```
//!
//! ## Core Concepts
//!
//! ### Accumulating statements
//!
//! Statements run in source order. `filter`, `aggregate` and `sort` do not
//! produce output on their own; they add to the session's query state, which
//! `print` executes against the loaded table without clearing it.
//!
//! ### Connective precedence
//!
//! Inside one `filter` statement, `and` binds tighter than `or` and both are
//! left-associative:
//!
//! ```text
//! a and b or c      =>  Or(And(a, b), c)
//! a or b and c      =>  Or(a, And(b, c))
//! a or b or c       =>  Or(Or(a, b), c)
//! ```
//!
//! ### Values
//!
//! A comparison value is a bare number, a double-quoted string, or a
//! `NUMBER and NUMBER` range. Ranges are only meaningful with `between`; the
//! pairing is checked when the filter is applied, not while parsing.
pub mod expressions;
pub mod operators;
pub mod program;
pub mod statements;
pub mod tokens;

pub use expressions::{Comparison, FilterExpr, Value};
pub use operators::{CompareOp, Connective};
pub use program::Program;
pub use statements::{AggregateFn, Statement};
pub use tokens::{Token, TokenKind};
