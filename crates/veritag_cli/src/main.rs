//! Veritag CLI: inspect the tagging layers of a Verilog file.
//!
//! `veritag tokens` prints the tokens of one perspective, and `veritag parse`
//! runs the structural parser and prints every completed match per pass.

#![warn(missing_docs)]

mod input;
mod logging;
mod parse;
mod report;
mod tokens;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Veritag: layered tagging and structural matching for Verilog.
#[derive(Parser, Debug)]
#[command(name = "veritag", version, about = "Layered Verilog tagging")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `veritag.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the token stream of one perspective.
    Tokens(TokensArgs),
    /// Run the structural parser and print every match.
    Parse(ParseArgs),
}

/// Arguments for `veritag tokens`.
#[derive(Parser, Debug)]
pub struct TokensArgs {
    /// The source file.
    pub file: PathBuf,

    /// The perspective to print (e.g. `keywords`, `layer1`).
    #[arg(short, long, default_value = veritag_engine::tokenizer::KEYWORDS)]
    pub perspective: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Print one token per line instead of the colored source.
    #[arg(short, long)]
    pub list: bool,
}

/// Arguments for `veritag parse`.
#[derive(Parser, Debug)]
pub struct ParseArgs {
    /// The Verilog source file.
    pub file: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Run the automata of each pass in parallel.
    #[arg(long)]
    pub parallel: bool,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stdout().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    logging::init(&global);

    let result = match cli.command {
        Command::Tokens(ref args) => tokens::run(args, &global),
        Command::Parse(ref args) => parse::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
