//! Command-line argument parsing.

use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};

/// Generate mutants from Rust source and see if your tests catch them.
#[derive(Parser, Debug)]
#[command(version, about, wrap_help = true)]
pub struct Args {
    /// Project directory to scan for source files.
    #[arg(long, default_value = ".")]
    pub dir: Utf8PathBuf,

    /// Name of the external build/test tool binary.
    #[arg(long, default_value = "mutagen-tool")]
    pub tool_binary: String,

    /// Number of mutants to run concurrently.
    #[arg(short = 'j', long, default_value_t = 4)]
    pub workers: usize,

    /// Per-mutant test timeout, in seconds. `0` behaves as an immediate timeout.
    #[arg(long, default_value_t = 300)]
    pub timeout: u64,

    /// Stop generating mutants for a file after this many.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Only check that each mutant builds; skip running tests.
    #[arg(long)]
    pub check_only: bool,

    /// List the mutants that would be generated, without running anything.
    #[arg(long)]
    pub list: bool,

    /// With `--list`, print mutants as JSON instead of one line each.
    #[arg(long, requires = "list")]
    pub json: bool,

    /// With `--list`, print a unified diff for each mutant instead of a description.
    #[arg(long, requires = "list")]
    pub diff: bool,

    /// Fail with a non-zero exit code when the mutation score is below `--min-score`.
    #[arg(long)]
    pub quality_gate: bool,

    /// Minimum mutation score required to pass the quality gate.
    #[arg(long, default_value_t = 80.0)]
    pub min_score: f64,

    /// Path to the incremental-analysis history file.
    #[arg(long, default_value = ".mutagen-history.json")]
    pub history: Utf8PathBuf,

    /// Directory to write per-mutant logs into.
    #[arg(long, default_value = "mutagen.out")]
    pub output_dir: Utf8PathBuf,

    /// Extra ignore-file (`.gitignore` syntax) to respect when listing source files.
    #[arg(long)]
    pub ignore_file: Option<Utf8PathBuf>,

    /// How to emit CI annotations for surviving mutants.
    #[arg(long, value_enum, default_value_t = CiAnnotations::Auto)]
    pub ci_annotations: CiAnnotations,

    /// Show more output.
    #[arg(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Show less output.
    #[arg(short = 'q', long)]
    pub quiet: bool,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "lower")]
pub enum CiAnnotations {
    None,
    #[default]
    Auto,
    Github,
}
