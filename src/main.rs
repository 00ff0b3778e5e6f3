use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use clap::{Args, Parser as ClapParser, Subcommand};
use staffql::{
    CsvLoader, EmptyAverage, FilterMode, Interpreter, InterpreterConfig, ReloadPolicy,
    cli::{self, CheckOptions, CheckResult, CliError, Repl},
    output::{DEFAULT_PREVIEW, render_report, to_json, to_json_pretty},
};
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "staffql")]
#[command(about = "staffql - query CSV tables of employee records with a tiny statement language")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    session: SessionArgs,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SessionArgs {
    /// Directory that relative `load` paths resolve against
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Clear filters, aggregates and sort when a new table is loaded
    #[arg(long, global = true)]
    reset_on_load: bool,

    /// Evaluate `and`/`or` as written instead of requiring every comparison
    #[arg(long, global = true)]
    boolean_filters: bool,

    /// Fail when averaging a column with no values instead of reporting NaN
    #[arg(long, global = true)]
    strict_average: bool,

    /// Rows shown per report
    #[arg(long, global = true, default_value_t = DEFAULT_PREVIEW)]
    preview: usize,
}

impl SessionArgs {
    fn config(&self) -> InterpreterConfig {
        let mut config = InterpreterConfig::default();
        if self.reset_on_load {
            config = config.with_reload(ReloadPolicy::Reset);
        }
        if self.boolean_filters {
            config = config.with_filter_mode(FilterMode::Boolean);
        }
        if self.strict_average {
            config = config.with_empty_average(EmptyAverage::Error);
        }
        config
    }

    fn loader(&self) -> CsvLoader {
        match &self.data_dir {
            Some(dir) => CsvLoader::with_base_dir(dir),
            None => CsvLoader::new(),
        }
    }

    fn interpreter(&self) -> Interpreter<CsvLoader> {
        Interpreter::with_loader(self.loader(), self.config())
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a script file (reads stdin if no file is given)
    Run {
        /// Script to run
        file: Option<PathBuf>,

        /// Print results as JSON instead of a report
        #[arg(long)]
        json: bool,

        /// Pretty-print JSON output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Only validate a script's syntax
    Check {
        /// Script to check (reads stdin if not provided)
        file: Option<PathBuf>,
    },

    /// Run every .dsl script in a directory
    RunAll {
        #[arg(default_value = "scripts")]
        dir: PathBuf,
    },

    /// Split a combined example file on `// Script N:` headers
    Extract {
        #[arg(default_value = "example_scripts.txt")]
        file: PathBuf,

        /// Directory to write script_NN.dsl files into
        #[arg(short, long, default_value = "scripts")]
        out: PathBuf,
    },

    /// Enter statements interactively
    Interactive,

    /// List documentation topics
    Docs,

    /// Show documentation for a topic
    Doc {
        /// Topic name (use 'staffql docs' to list topics)
        topic: String,
    },
}

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise `debug` with `--verbose` and `warn`
/// without.
fn init_tracing(verbose: bool) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = if verbose { "debug" } else { "warn" };
        EnvFilter::try_new(level).with_context(|| format!("invalid log level filter: {level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let result = init_tracing(cli.verbose).and_then(|()| dispatch(cli));

    if let Err(e) = result {
        eprintln!("{e:#}");
        std::process::exit(1);
    }
}

fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run { file, json, pretty } => run(&cli.session, file.as_deref(), json, pretty),
        Commands::Check { file } => check(file.as_deref()),
        Commands::RunAll { dir } => {
            cli::run_all(
                &dir,
                &cli.session.loader(),
                cli.session.config(),
                cli.session.preview,
                &mut io::stdout(),
            )?;
            Ok(())
        }
        Commands::Extract { file, out } => extract(&file, &out),
        Commands::Interactive => {
            let mut repl = Repl::new(cli.session.interpreter(), cli.session.preview);
            let stdin = io::stdin();
            let show_prompt = atty::is(atty::Stream::Stdin);
            cli::run_interactive(&mut repl, stdin.lock(), &mut io::stdout(), show_prompt)
                .context("interactive session failed")
        }
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { topic } => {
            print!("{}", cli::get_doc_topic(&topic)?);
            Ok(())
        }
    }
}

/// Script text from `file`, or from stdin when it is piped.
fn read_script(file: Option<&Path>) -> Result<(String, String)> {
    match file {
        Some(path) => {
            let script = fs::read_to_string(path)
                .with_context(|| format!("failed to read script {}", path.display()))?;
            Ok((script, path.display().to_string()))
        }
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read script from stdin")?;
            Ok((buffer, "<stdin>".to_string()))
        }
        None => Err(CliError::NoInput.into()),
    }
}

fn run(session: &SessionArgs, file: Option<&Path>, json: bool, pretty: bool) -> Result<()> {
    let (script, title) = read_script(file)?;
    let options = CheckOptions {
        script,
        syntax_only: false,
    };

    let mut interpreter = session.interpreter();
    if let CheckResult::Success(results) = cli::execute_check(&options, &mut interpreter)? {
        for result in &results {
            if json || pretty {
                let text = if pretty {
                    to_json_pretty(result)
                } else {
                    to_json(result)
                };
                println!("{text}");
            } else {
                print!("{}", render_report(result, &title, session.preview));
            }
        }
    }
    Ok(())
}

fn check(file: Option<&Path>) -> Result<()> {
    let (script, _) = read_script(file)?;
    let options = CheckOptions {
        script,
        syntax_only: true,
    };

    // Syntax-only checks never touch the loader.
    let mut interpreter = Interpreter::new();
    if let CheckResult::SyntaxValid = cli::execute_check(&options, &mut interpreter)? {
        println!("Syntax is valid");
    }
    Ok(())
}

fn extract(file: &Path, out: &Path) -> Result<()> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("failed to read example file {}", file.display()))?;

    let written = cli::write_extracted(&content, out)?;
    for path in &written {
        println!("Extracted {}", path.display());
    }
    if written.is_empty() {
        println!("No `// Script N:` headers found in {}", file.display());
    }
    Ok(())
}
