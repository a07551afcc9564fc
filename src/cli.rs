use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(
    name = "citecheck",
    version,
    about = "Reconcile in-text citations with a document's reference list"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Report citations without entries and entries without citations.
    Check(CheckArgs),
    /// Rebuild the references section, then report on the rebuilt text.
    Format(FormatArgs),
}

impl Commands {
    pub fn source(&self) -> &SourceArgs {
        match self {
            Self::Check(args) => &args.source,
            Self::Format(args) => &args.source,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum KeyStrategy {
    Heuristic,
    Strict,
}

impl KeyStrategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Heuristic => "heuristic",
            Self::Strict => "strict",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Plain-text document, one paragraph per line. Reads stdin when omitted.
    #[arg(long)]
    pub input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = KeyStrategy::Heuristic)]
    pub key_strategy: KeyStrategy,

    #[arg(long, default_value_t = false)]
    pub require_references: bool,

    #[arg(long)]
    pub report_path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Exit with status 2 when the report is not consistent.
    #[arg(long, default_value_t = false)]
    pub fail_on_mismatch: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(Args, Debug, Clone)]
pub struct FormatArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long)]
    pub output: PathBuf,

    #[arg(long, default_value_t = false)]
    pub no_alphabetize: bool,
}
