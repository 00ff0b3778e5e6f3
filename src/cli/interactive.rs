//! Line-by-line interactive session.

use std::io::{self, BufRead, Write};

use crate::{Interpreter, output::render_report, parse, table::TableLoader};

/// What the REPL did with one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplStep {
    /// Line buffered, waiting for a `print;`
    Continue,
    /// Query ran; text to show
    Output(String),
    /// Query failed; message to show
    Error(String),
    /// User asked to leave
    Exit,
}

/// Buffers statements until a `print;` line, then runs the buffer in a
/// session that persists for the whole REPL.
pub struct Repl<L> {
    interpreter: Interpreter<L>,
    buffer: String,
    preview: usize,
}

impl<L: TableLoader> Repl<L> {
    pub fn new(interpreter: Interpreter<L>, preview: usize) -> Self {
        Repl {
            interpreter,
            buffer: String::new(),
            preview,
        }
    }

    pub fn interpreter(&self) -> &Interpreter<L> {
        &self.interpreter
    }

    pub fn feed_line(&mut self, line: &str) -> ReplStep {
        let trimmed = line.trim();
        if trimmed.eq_ignore_ascii_case("exit") {
            return ReplStep::Exit;
        }

        self.buffer.push_str(line);
        self.buffer.push('\n');

        if !(trimmed.ends_with(';') && trimmed.starts_with("print")) {
            return ReplStep::Continue;
        }

        let script = std::mem::take(&mut self.buffer);
        let program = match parse(&script) {
            Ok(program) => program,
            Err(e) => return ReplStep::Error(format!("Error: {e}")),
        };

        let preview = self.preview;
        let mut text = String::new();
        match self.interpreter.execute_each(&program, |result| {
            text.push_str(&render_report(result, "interactive query", preview));
        }) {
            Ok(_) => ReplStep::Output(text),
            Err(e) => ReplStep::Error(format!("Error: {e}")),
        }
    }
}

/// Drive a [`Repl`] from `input` until `exit` or end of input.
pub fn run_interactive<L, R, W>(
    repl: &mut Repl<L>,
    input: R,
    output: &mut W,
    show_prompt: bool,
) -> io::Result<()>
where
    L: TableLoader,
    R: BufRead,
    W: Write,
{
    if show_prompt {
        writeln!(output, "staffql interactive mode")?;
        writeln!(output, "Enter statements line by line; `print;` runs them. Type 'exit' to quit.")?;
    }

    let mut lines = input.lines();
    loop {
        if show_prompt {
            write!(output, ">> ")?;
            output.flush()?;
        }

        let Some(line) = lines.next() else { break };
        match repl.feed_line(&line?) {
            ReplStep::Continue => {}
            ReplStep::Output(text) | ReplStep::Error(text) => writeln!(output, "{text}")?,
            ReplStep::Exit => break,
        }
    }

    if show_prompt {
        writeln!(output, "Leaving interactive mode.")?;
    }
    Ok(())
}
