use clap::{ArgAction, Parser, ValueEnum};
use smsl_compiler::logging::{self, LogLevel};
use smsl_compiler::optimizer::OptimizerPolicy;
use smsl_compiler::report::ConsoleSink;
use smsl_compiler::semantic_analysis::{AttributionPolicy, SemanticInput};
use smsl_compiler::{CompilationStatus, Compiler, CompilerPreferences, FileSource, MemorySink};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "smslc", version, about = "Compile SMSL state-machine programs to quadruples")]
struct Cli {
    /// SMSL source file
    file: String,

    /// Which states an action gives content to
    #[arg(long, value_enum)]
    attribution: Option<AttributionArg>,

    /// Run semantic analysis over source lines or the token stream
    #[arg(long, value_enum)]
    semantic_input: Option<InputArg>,

    #[arg(long, value_enum)]
    optimizer: Option<OptimizerArg>,

    /// Run every stage even after diagnostics
    #[arg(long)]
    keep_going: bool,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Print the token table
    #[arg(long)]
    show_tokens: bool,

    /// Print a parse tree per source line
    #[arg(long)]
    show_parse_trees: bool,

    /// Preferences file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AttributionArg {
    Adjacent,
    AnyAction,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum InputArg {
    Lines,
    Tokens,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OptimizerArg {
    Dedup,
    Merge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

const EXIT_DIAGNOSTICS: u8 = 1;
const EXIT_UNREADABLE: u8 = 2;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            logging::safe_log_error(logging::codes::system::INTERNAL_ERROR, &error.to_string());
            eprintln!("smslc: {}", error);
            ExitCode::from(EXIT_UNREADABLE)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let preferences = preferences(cli)?;

    if let Err(message) = logging::config::init_runtime_preferences(preferences.logging.clone())
        .and_then(|()| logging::init_global_logging())
    {
        logging::safe_log_error(logging::codes::system::INITIALIZATION_FAILURE, &message);
    }
    if cli.verbose > 0 {
        eprintln!("Logging: {}", logging::config::get_config_summary());
    }

    let source = FileSource::with_preferences(cli.file.as_str(), preferences.source.clone());
    let compiler = Compiler::new(preferences);

    let report = match cli.format {
        Format::Table => {
            let stdout = io::stdout();
            let mut sink = ConsoleSink::new(stdout.lock())
                .with_tokens(cli.show_tokens)
                .with_parse_trees(cli.show_parse_trees);
            compiler.compile(&source, &mut sink)?
        }
        Format::Json => {
            let report = compiler.compile(&source, &mut MemorySink::new())?;
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", report.to_json()?)?;
            report
        }
    };

    Ok(match report.status {
        CompilationStatus::Compiled => ExitCode::SUCCESS,
        CompilationStatus::Diagnostics => ExitCode::from(EXIT_DIAGNOSTICS),
        CompilationStatus::SourceUnreadable => ExitCode::from(EXIT_UNREADABLE),
    })
}

/// Defaults, then the preferences file, then command-line flags
fn preferences(cli: &Cli) -> Result<CompilerPreferences, Box<dyn std::error::Error>> {
    let mut preferences = match &cli.config {
        Some(path) => CompilerPreferences::from_toml_file(path)?,
        None => CompilerPreferences::default(),
    };

    if let Some(attribution) = cli.attribution {
        preferences.semantic.attribution = match attribution {
            AttributionArg::Adjacent => AttributionPolicy::AdjacentDeclaration,
            AttributionArg::AnyAction => AttributionPolicy::AnyAction,
        };
    }
    if let Some(input) = cli.semantic_input {
        preferences.semantic.input = match input {
            InputArg::Lines => SemanticInput::Lines,
            InputArg::Tokens => SemanticInput::Tokens,
        };
    }
    if let Some(optimizer) = cli.optimizer {
        preferences.optimizer.policy = match optimizer {
            OptimizerArg::Dedup => OptimizerPolicy::Deduplicate,
            OptimizerArg::Merge => OptimizerPolicy::DeduplicateAndMerge,
        };
    }
    if cli.keep_going {
        preferences.pipeline.stop_on_errors = false;
    }

    preferences.logging.min_log_level = match cli.verbose {
        0 => preferences.logging.min_log_level,
        1 => LogLevel::Info,
        _ => LogLevel::Debug,
    };

    Ok(preferences)
}
