//! Validate and run staffql scripts

use super::CliError;
use crate::{Interpreter, QueryResult, parse, table::TableLoader};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The script text
    pub script: String,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// Script ran; one result per `print`, in order
    Success(Vec<QueryResult>),
}

/// Parse the script and, unless `syntax_only`, run it in `interpreter`.
pub fn execute_check<L: TableLoader>(
    options: &CheckOptions,
    interpreter: &mut Interpreter<L>,
) -> Result<CheckResult, CliError> {
    let program = parse(&options.script)?;

    if options.syntax_only {
        return Ok(CheckResult::SyntaxValid);
    }

    let mut results = Vec::new();
    interpreter.execute_each(&program, |result| results.push(result.clone()))?;
    Ok(CheckResult::Success(results))
}
