pub mod ast;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod output;
pub mod parser;
pub mod predicate;
pub mod table;

pub use ast::{AggregateFn, CompareOp, Comparison, FilterExpr, Program, Statement, Token, Value};
pub use config::{EmptyAverage, InterpreterConfig, ReloadPolicy};
pub use engine::{AggregateValue, QueryResult};
pub use error::{ExecError, StatementError};
pub use interpreter::{Interpreter, Session};
pub use lexer::{LexError, Lexer, Position};
pub use output::{render_report, to_json, to_json_pretty};
pub use parser::{ParseError, Parser, parse};
pub use predicate::FilterMode;
pub use table::{Cell, CsvLoader, MemoryLoader, Table, TableError, TableLoader};
