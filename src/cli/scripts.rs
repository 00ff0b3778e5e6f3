//! Script files: splitting a combined example file, and batch runs.

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use tracing::warn;

use super::CliError;
use crate::{Interpreter, InterpreterConfig, output::render_report, parse, table::TableLoader};

/// `// Script 3: description` header lines in a combined example file.
static SCRIPT_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*//[ \t]*Script[ \t]+(\d+)[ \t]*:.*$").expect("valid header pattern")
});

/// Split a combined example file into `(number, script)` pairs.
///
/// Each script runs from the line after its header to the next header. The
/// rest of a header line is a description and is dropped, as is any text
/// before the first header.
pub fn extract_scripts(content: &str) -> Vec<(String, String)> {
    let headers: Vec<_> = SCRIPT_HEADER.captures_iter(content).collect();

    headers
        .iter()
        .enumerate()
        .map(|(i, captures)| {
            let start = captures.get(0).map_or(0, |m| m.end());
            let end = headers
                .get(i + 1)
                .and_then(|next| next.get(0))
                .map_or(content.len(), |m| m.start());
            let number = captures[1].to_string();
            (number, content[start..end].trim().to_string())
        })
        .collect()
}

/// `script_03.dsl` for script number `3`.
pub fn script_file_name(number: &str) -> String {
    format!("script_{number:0>2}.dsl")
}

/// Write every script of `content` into `out_dir`, creating it if needed.
pub fn write_extracted(content: &str, out_dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    fs::create_dir_all(out_dir).map_err(CliError::io(out_dir))?;

    let mut written = Vec::new();
    for (number, script) in extract_scripts(content) {
        let path = out_dir.join(script_file_name(&number));
        fs::write(&path, script).map_err(CliError::io(&path))?;
        written.push(path);
    }
    Ok(written)
}

/// `*.dsl` files directly inside `dir`, sorted by name.
pub fn list_scripts(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let mut scripts = Vec::new();
    for entry in fs::read_dir(dir).map_err(CliError::io(dir))? {
        let path = entry.map_err(CliError::io(dir))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "dsl") {
            scripts.push(path);
        }
    }
    scripts.sort();
    Ok(scripts)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub total: usize,
}

/// Run every script in `dir`, each in a fresh session, writing reports and
/// errors to `out`. A failing script does not stop the batch.
pub fn run_all<L: TableLoader, W: Write>(
    dir: &Path,
    loader: &L,
    config: InterpreterConfig,
    preview: usize,
    out: &mut W,
) -> Result<BatchSummary, CliError> {
    let scripts = list_scripts(dir)?;
    let mut summary = BatchSummary {
        succeeded: 0,
        total: scripts.len(),
    };
    let write_err = CliError::io("<output>");

    let mut report = String::new();
    for path in &scripts {
        let name = path.display().to_string();
        match run_script_file(path, loader, config, preview) {
            Ok(text) => {
                report.push_str(&text);
                summary.succeeded += 1;
            }
            Err(e) => {
                warn!(script = %name, error = %e, "script failed");
                report.push_str(&format!("Error running script {name}: {e}\n"));
            }
        }
    }

    report.push_str(&format!(
        "\nCompleted: {} of {} scripts ran successfully.\n",
        summary.succeeded, summary.total
    ));
    out.write_all(report.as_bytes()).map_err(write_err)?;
    Ok(summary)
}

fn run_script_file<L: TableLoader>(
    path: &Path,
    loader: &L,
    config: InterpreterConfig,
    preview: usize,
) -> Result<String, CliError> {
    let script = fs::read_to_string(path).map_err(CliError::io(path))?;
    let program = parse(&script)?;

    let title = path.display().to_string();
    let mut interpreter = Interpreter::with_loader(loader, config);
    let mut text = String::new();
    interpreter.execute_each(&program, |result| {
        text.push_str(&render_report(result, &title, preview));
    })?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_splits_on_headers() {
        let content = "Examples\n// Script 1: everyone\nload \"a.csv\";\nprint;\n\n// Script 12:\nprint;\n";
        let scripts = extract_scripts(content);
        assert_eq!(scripts.len(), 2);
        assert_eq!(scripts[0], ("1".to_string(), "load \"a.csv\";\nprint;".to_string()));
        assert_eq!(scripts[1], ("12".to_string(), "print;".to_string()));
    }

    #[test]
    fn test_script_file_name_pads() {
        assert_eq!(script_file_name("3"), "script_03.dsl");
        assert_eq!(script_file_name("12"), "script_12.dsl");
    }
}
