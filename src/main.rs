//! `mutagen`: generate mutants from Rust source and see if your tests catch them.

mod aggregate;
mod attrs;
mod ci;
mod cli;
mod config;
mod exit_code;
mod files;
mod generate;
mod history;
mod incremental;
mod interrupt;
mod kind;
mod log_file;
mod mutant;
mod operators;
mod options;
mod overlay;
mod process;
mod report;
mod result;
mod scheduler;
mod source;
mod span;
mod status;
#[cfg(test)]
mod test_util;
mod tool;
mod type_info;
mod type_validator;

use std::collections::{HashMap, HashSet};
use std::io;
use std::process::exit;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use aggregate::{aggregate_file, evaluate_quality_gate, FileReport};
use cli::Args;
use config::Config;
use generate::generate_file;
use history::{content_hash, History, HistoryEntry};
use incremental::{files_needing_tests, test_module_source};
use kind::Kind;
use log_file::LogFile;
use mutant::Mutant;
use options::Options;
use overlay::OverlayMutator;
use process::ProcessStatus;
use report::build_summary;
use result::MutantResult;
use scheduler::{run_mutants, run_phase, SchedulerConfig};
use source::SourceFile;
use status::Status;

/// Shared result alias: every fallible function in this crate returns this.
pub type Result<T> = anyhow::Result<T>;

fn main() {
    install_tracing();
    interrupt::install_handler();
    let args = Args::parse();
    match run(&args) {
        Ok(code) => exit(code),
        Err(e) => {
            eprintln!("error: {e:?}");
            exit(exit_code::SOFTWARE);
        }
    }
}

fn install_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn run(args: &Args) -> Result<i32> {
    let run_start = std::time::Instant::now();
    let config = Config::read_tree_config(&args.dir).context("read project config")?;
    let options = Options::new(args, &config);

    let enabled_kinds = resolve_enabled_kinds(&options.operators);
    let examine_globset = files::build_globset(&options.examine_globs).context("compile examine_globs")?;
    let exclude_globset = files::build_globset(&options.exclude_globs).context("compile exclude_globs")?;
    let paths = files::list_source_files(
        &options.dir,
        options.ignore_file.as_deref(),
        examine_globset.as_ref(),
        exclude_globset.as_ref(),
    )
    .context("list source files")?;

    let mut loaded = Vec::new();
    for path in &paths {
        match SourceFile::load(path) {
            Ok(source) => loaded.push(source),
            Err(e) => tracing::warn!("skipping {path}: {e}"),
        }
    }

    if args.list {
        return list_mutants(args, &loaded, &enabled_kinds, options.limit);
    }

    if let Some(first) = loaded.first() {
        if !run_baseline(&options, first.path())? {
            eprintln!("baseline tests failed on unmutated source; no mutant result would be trustworthy");
            return Ok(exit_code::BASELINE_FAILED);
        }
    }

    let mut history = History::load(options.history_path.clone()).context("load history")?;

    let mut candidates = Vec::new();
    let mut asts = HashMap::new();
    for source in &loaded {
        let Ok((ast, _types)) = source.parse() else {
            tracing::warn!("skipping unparseable file {}", source.path());
            continue;
        };
        let test_source = test_module_source(&ast);
        candidates.push((source.path().to_path_buf(), source.code.clone(), test_source));
        asts.insert(source.path().to_path_buf(), ast);
    }
    let pending: HashSet<Utf8PathBuf> =
        files_needing_tests(&candidates, &history).into_iter().map(|p| p.path).collect();

    let mut all_mutants = Vec::new();
    let mut sources = HashMap::new();
    for source in &loaded {
        if !pending.contains(source.path()) {
            continue;
        }
        let Some(ast) = asts.get(source.path()) else { continue };
        let mutants = generate_file(source.path(), &source.code, ast, &enabled_kinds, options.limit);
        sources.insert(source.path().to_owned(), source.code.clone());
        all_mutants.extend(mutants);
    }

    std::fs::create_dir_all(&options.output_dir).context("create output directory")?;
    let overlay = OverlayMutator::new(options.output_dir.join("scratch")).context("create scratch directory")?;
    let scheduler_config = SchedulerConfig {
        workers: options.workers,
        tool_binary: options.tool_binary.clone(),
        build_timeout: options.build_timeout,
        test_timeout: options.test_timeout,
        log_dir: options.output_dir.clone(),
        check_only: options.check_only,
    };
    let results = run_mutants(&all_mutants, &sources, &overlay, &scheduler_config);
    let _ = overlay.dispose();

    let mut file_reports: HashMap<Utf8PathBuf, FileReport> = HashMap::new();
    for path in sources.keys() {
        let file_results: Vec<MutantResult> =
            results.iter().filter(|r| &r.mutant.file_path == path).cloned().collect();
        file_reports.insert(path.clone(), aggregate_file(path.clone(), &file_results));
    }

    let timestamp = current_timestamp();
    for (path, report) in &file_reports {
        let Some(test_source) = candidates.iter().find(|(p, _, _)| p == path).map(|(_, _, t)| t.clone()) else {
            continue;
        };
        history.update(
            path,
            HistoryEntry {
                file_hash: content_hash(&sources[path]),
                test_hash: content_hash(&test_source),
                mutation_score: report.mutation_score,
                timestamp: timestamp.clone(),
            },
        );
    }
    if let Err(e) = history.save() {
        tracing::warn!("failed to save history: {e}");
    }

    let duration_ms = run_start.elapsed().as_millis() as u64;
    let summary = build_summary(&results, file_reports, paths.len(), sources.len(), duration_ms, timestamp);
    print_summary(&summary);

    let annotation = args.ci_annotations.resolve();
    for result in results.iter().filter(|r| r.status == Status::Survived) {
        print!("{}", annotation.format_survived(&result.mutant));
    }

    let gate = evaluate_quality_gate(
        Some(summary.total_mutants),
        summary.statistics.mutation_score,
        options.quality_gate.enabled,
        options.quality_gate.min_score,
    );
    println!("quality gate: {} ({})", if gate.pass { "pass" } else { "fail" }, gate.reason);

    if options.quality_gate.enabled && !gate.pass {
        Ok(exit_code::QUALITY_GATE_FAILED)
    } else if summary.statistics.timed_out > 0 {
        Ok(exit_code::TIMEOUT)
    } else {
        Ok(exit_code::SUCCESS)
    }
}

/// An empty `operators` list in config means "every kind not suppressed by default".
fn resolve_enabled_kinds(configured: &[String]) -> Vec<Kind> {
    if configured.is_empty() {
        return Kind::ALL.iter().copied().filter(|k| *k != Kind::LogicalNotRemoval).collect();
    }
    configured.iter().filter_map(|name| name.parse().ok()).collect()
}

fn list_mutants(args: &Args, loaded: &[SourceFile], enabled: &[Kind], limit: Option<usize>) -> Result<i32> {
    let mut all_mutants: Vec<(Mutant, String)> = Vec::new();
    for source in loaded {
        let Ok((ast, _types)) = source.parse() else { continue };
        for mutant in generate_file(source.path(), &source.code, &ast, enabled, limit) {
            all_mutants.push((mutant, source.code.clone()));
        }
    }

    if args.json {
        let mutants: Vec<&Mutant> = all_mutants.iter().map(|(m, _)| m).collect();
        serde_json::to_writer_pretty(io::BufWriter::new(io::stdout()), &mutants).context("write mutants as json")?;
        println!();
    } else if args.diff {
        for (mutant, source) in &all_mutants {
            let mutated = operators::apply(mutant.kind, source, &mutant.position, &mutant.mutated);
            print!("{}", mutant.diff(source, &mutated));
        }
    } else {
        for (mutant, _) in &all_mutants {
            println!("{}", mutant.styled_description());
        }
    }
    Ok(exit_code::SUCCESS)
}

fn print_summary(summary: &report::Summary) {
    let s = &summary.statistics;
    println!(
        "{} mutants: {} killed, {} survived, {} timed out, {} not viable, {} errors",
        summary.total_mutants, s.killed, s.survived, s.timed_out, s.not_viable, s.error,
    );
    println!("mutation score: {:.1}%", s.mutation_score);
}

fn current_timestamp() -> String {
    let secs = SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0);
    secs.to_string()
}

/// Sanity-check that the unmutated tree itself builds and passes, through the same
/// overlay-shaped invocation as every mutant (an identity overlay mapping the file
/// to itself), so a broken project never produces misleadingly-confident results.
fn run_baseline(options: &Options, file: &Utf8Path) -> Result<bool> {
    let baseline_dir = options.output_dir.join("baseline");
    std::fs::create_dir_all(&baseline_dir).context("create baseline directory")?;
    let overlay_path = baseline_dir.join("identity-overlay.json");
    let manifest = serde_json::json!({ "Replace": { file.as_str(): file.as_str() } });
    std::fs::write(&overlay_path, serde_json::to_vec_pretty(&manifest)?).context("write baseline overlay")?;

    let mut log_file = LogFile::create_in(&baseline_dir, "baseline")?;
    let cwd = tool::working_dir(file);

    let build_argv = tool::compose_argv(&options.tool_binary, tool::Phase::Build, &overlay_path, file);
    if run_phase(&build_argv, cwd, options.build_timeout, &mut log_file)? != ProcessStatus::Success {
        return Ok(false);
    }

    if options.check_only {
        return Ok(true);
    }

    let test_argv = tool::compose_argv(&options.tool_binary, tool::Phase::Test, &overlay_path, file);
    Ok(run_phase(&test_argv, cwd, options.test_timeout, &mut log_file)? == ProcessStatus::Success)
}
