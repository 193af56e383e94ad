//! # FA Lexer CLI
//!
//! `fa-lexer scan` runs the scanner over a program and writes `PIF.out` and
//! `ST.out`. `fa-lexer automaton` loads a rule file, shows its parts and
//! checks sequences against it.

use clap::{Args, Parser, Subcommand, ValueEnum};
use fa_lexer::config::runtime::{LoggingPreferences, RuntimeConfig};
use fa_lexer::log_success;
use fa_lexer::logging::{self, codes, LogEvent, Logger, LoggingService};
use fa_lexer::pipeline::{self, ScanRequest};
use fa_lexer::FiniteAutomaton;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "fa-lexer", version, about = "Finite-automaton driven lexical scanner")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan a source program and write the PIF and symbol table
    Scan(ScanArgs),

    /// Inspect a finite automaton rule file and test sequences against it
    Automaton(AutomatonArgs),
}

#[derive(Debug, Args)]
struct ScanArgs {
    /// Source program to scan
    program: PathBuf,

    /// Token vocabulary file
    #[arg(long)]
    tokens: Option<PathBuf>,

    /// Rule file of the identifier automaton
    #[arg(long = "identifier-fa")]
    identifier_fa: Option<PathBuf>,

    /// Rule file of the integer constant automaton
    #[arg(long = "integer-fa")]
    integer_fa: Option<PathBuf>,

    /// Directory receiving PIF.out and ST.out
    #[arg(long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Print the scan report as JSON
    #[arg(long)]
    json: bool,

    /// Runtime configuration file (TOML)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct AutomatonArgs {
    /// Automaton rule file
    rule_file: PathBuf,

    /// Part of the automaton to display
    #[arg(long, value_enum)]
    show: Option<Section>,

    /// Report structural inconsistencies in the rule file
    #[arg(long)]
    check: bool,

    /// Sequences to test for acceptance
    sequences: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Section {
    States,
    Alphabet,
    Transitions,
    Initial,
    Final,
    All,
}

/// Forwards coded lexer events into the `log` facade
struct LogBridge {
    structured: bool,
}

impl LogBridge {
    fn new(structured: bool) -> Self {
        Self { structured }
    }

    /// One JSON object per event when structured, plain text otherwise
    fn render(&self, event: &LogEvent) -> String {
        if self.structured {
            event.format_json().unwrap_or_else(|_| event.format())
        } else {
            event.format()
        }
    }
}

impl Logger for LogBridge {
    fn log(&self, event: &LogEvent) {
        let level = match event.level {
            logging::LogLevel::Error => log::Level::Error,
            logging::LogLevel::Warning => log::Level::Warn,
            logging::LogLevel::Info => log::Level::Info,
            logging::LogLevel::Debug => log::Level::Debug,
        };
        log::log!(target: "fa_lexer", level, "{}", self.render(event));
    }
}

fn init_logging(preferences: &LoggingPreferences) -> Result<(), String> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    logging::config::init_runtime_preferences(preferences.clone())?;
    let bridge = LogBridge::new(logging::config::use_structured_logging());
    logging::init_global_logging_with_service(Arc::new(LoggingService::with_config(Arc::new(
        bridge,
    ))))?;

    log_success!(codes::success::SYSTEM_INITIALIZATION_COMPLETED, "Logging initialized",
        "structured" => logging::config::use_structured_logging(),
        "min_level" => logging::config::get_min_log_level().as_str());
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<RuntimeConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(RuntimeConfig::from_toml_file(path)?),
        None => Ok(RuntimeConfig::default()),
    }
}

fn build_request(args: &ScanArgs, config: RuntimeConfig) -> ScanRequest {
    let mut scanner = config.scanner;
    if let Some(tokens) = &args.tokens {
        scanner.token_file = tokens.clone();
    }
    if let Some(identifier_fa) = &args.identifier_fa {
        scanner.identifier_automaton = identifier_fa.clone();
    }
    if let Some(integer_fa) = &args.integer_fa {
        scanner.integer_automaton = integer_fa.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        scanner.output_dir = output_dir.clone();
    }

    ScanRequest::new(args.program.clone())
        .with_scanner_preferences(scanner)
        .with_file_processor_preferences(config.file_processor)
}

fn run_scan(args: &ScanArgs, config: RuntimeConfig) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let request = build_request(args, config);

    let output = match pipeline::scan_program(&request) {
        Ok(output) => output,
        Err(error) => {
            eprintln!("Error: {}", error);
            return Ok(ExitCode::FAILURE);
        }
    };

    output.write_to(&request.scanner.output_dir)?;

    if args.json {
        println!("{}", output.to_json()?);
    } else {
        println!("Lexically correct");
    }

    Ok(ExitCode::SUCCESS)
}

fn render_section(automaton: &FiniteAutomaton, section: Section) -> String {
    match section {
        Section::States => automaton.describe_states(),
        Section::Alphabet => automaton.describe_alphabet(),
        Section::Transitions => automaton.describe_transitions(),
        Section::Initial => automaton.describe_initial_state(),
        Section::Final => automaton.describe_final_states(),
        Section::All => automaton.to_string(),
    }
}

fn run_automaton(args: &AutomatonArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let automaton = FiniteAutomaton::from_file(&args.rule_file)?;

    // Show everything when nothing else was asked for
    let show = match args.show {
        Some(section) => Some(section),
        None if !args.check && args.sequences.is_empty() => Some(Section::All),
        None => None,
    };
    if let Some(section) = show {
        println!("{}", render_section(&automaton, section));
    }

    let mut exit = ExitCode::SUCCESS;

    if args.check {
        let issues = automaton.consistency_report();
        if issues.is_empty() {
            println!("Automaton is consistent");
        } else {
            for issue in &issues {
                println!("Inconsistent: {}", issue);
            }
            exit = ExitCode::FAILURE;
        }
    }

    for sequence in &args.sequences {
        println!("{}: {}", sequence, acceptance_label(automaton.accepts(sequence)));
    }

    Ok(exit)
}

fn acceptance_label(accepted: bool) -> &'static str {
    if accepted {
        "accepted"
    } else {
        "not accepted"
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config_path = match &cli.command {
        Command::Scan(args) => args.config.as_ref(),
        Command::Automaton(_) => None,
    };
    let config = load_config(config_path)?;
    init_logging(&config.logging)?;

    match &cli.command {
        Command::Scan(args) => run_scan(args, config),
        Command::Automaton(args) => run_automaton(args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {}", error);
            ExitCode::FAILURE
        }
    }
}
