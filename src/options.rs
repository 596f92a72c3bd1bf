//! Resolved run configuration: the merge of `mutagen.toml` ([`crate::config::Config`])
//! and CLI flags ([`crate::cli::Args`]), with the CLI always winning.

use std::time::Duration;

use camino::Utf8PathBuf;

use crate::cli::Args;
use crate::config::Config;

/// The 30-second hard timeout on the compilation check (§4.6); fixed, not a CLI knob.
const BUILD_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct QualityGateOptions {
    pub enabled: bool,
    pub min_score: f64,
}

/// Resolved run configuration: see SPEC_FULL.md §3's `Options` entry.
#[derive(Debug, Clone)]
pub struct Options {
    pub dir: Utf8PathBuf,
    pub tool_binary: String,
    pub workers: usize,
    pub test_timeout: Duration,
    pub build_timeout: Duration,
    pub limit: Option<usize>,
    pub quality_gate: QualityGateOptions,
    pub history_path: Utf8PathBuf,
    pub output_dir: Utf8PathBuf,
    pub check_only: bool,
    pub examine_globs: Vec<String>,
    pub exclude_globs: Vec<String>,
    pub operators: Vec<String>,
    pub ignore_file: Option<Utf8PathBuf>,
}

impl Options {
    /// Merge a parsed config file with the CLI arguments; the CLI always wins for
    /// any knob it exposes directly. Config-only knobs (the glob lists, the
    /// enabled-operator list) pass through unchanged.
    pub fn new(args: &Args, config: &Config) -> Options {
        Options {
            dir: args.dir.clone(),
            tool_binary: args.tool_binary.clone(),
            workers: args.workers.max(1),
            test_timeout: Duration::from_secs(args.timeout),
            build_timeout: BUILD_TIMEOUT,
            limit: args.limit,
            quality_gate: QualityGateOptions {
                enabled: args.quality_gate,
                min_score: args.min_score,
            },
            history_path: args.history.clone(),
            output_dir: args.output_dir.clone(),
            check_only: args.check_only,
            examine_globs: config.examine_globs.clone(),
            exclude_globs: config.exclude_globs.clone(),
            operators: config.operators.clone(),
            ignore_file: args.ignore_file.clone(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use clap::Parser;

    #[test]
    fn cli_flags_populate_options() {
        let args = Args::parse_from(["mutagen", "--dir", "proj", "-j", "8", "--timeout", "60"]);
        let options = Options::new(&args, &Config::default());
        assert_eq!(options.dir, Utf8PathBuf::from("proj"));
        assert_eq!(options.workers, 8);
        assert_eq!(options.test_timeout, Duration::from_secs(60));
        assert_eq!(options.build_timeout, Duration::from_secs(30));
    }

    #[test]
    fn config_globs_pass_through_untouched_by_cli() {
        let args = Args::parse_from(["mutagen"]);
        let config = Config {
            examine_globs: vec!["src/**/*.rs".to_owned()],
            exclude_globs: vec![],
            operators: vec!["arithmetic_binary".to_owned()],
        };
        let options = Options::new(&args, &config);
        assert_eq!(options.examine_globs, vec!["src/**/*.rs"]);
        assert_eq!(options.operators, vec!["arithmetic_binary"]);
    }

    #[test]
    fn zero_workers_is_floored_to_one() {
        let args = Args::parse_from(["mutagen", "-j", "0"]);
        let options = Options::new(&args, &Config::default());
        assert_eq!(options.workers, 1);
    }
}
