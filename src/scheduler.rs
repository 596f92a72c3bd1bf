//! Execution scheduler (C6): a fixed-width worker pool that drives every mutant
//! through the overlay mutator, the external build/test tool, and classification.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use camino::{Utf8Path, Utf8PathBuf};

use crate::interrupt::check_interrupted;
use crate::log_file::LogFile;
use crate::mutant::Mutant;
use crate::overlay::OverlayMutator;
use crate::process::{Process, ProcessStatus};
use crate::result::MutantResult;
use crate::status::Status;
use crate::tool::{self, Phase};
use crate::Result;

/// Run configuration consumed by the scheduler; the rest of [`crate::options::Options`]
/// (history path, quality gate, ...) is not this component's concern.
pub struct SchedulerConfig {
    pub workers: usize,
    pub tool_binary: String,
    pub build_timeout: Duration,
    /// `T` in §5: the per-mutant test timeout. `T <= 0` behaves as an immediate
    /// timeout rather than starting the test subprocess at all.
    pub test_timeout: Duration,
    pub log_dir: Utf8PathBuf,
    /// `--check-only`: stop once a mutant builds, without running its tests.
    /// There is no dedicated status for "untested"; a mutant that only builds is
    /// reported `Survived`, the conservative assumption that it went undetected.
    pub check_only: bool,
}

/// Run every mutant through the compile+test pipeline, using up to `config.workers`
/// OS threads, and return results in the same order as `mutants`.
///
/// `sources` supplies each mutant's original file content, keyed by `file_path`,
/// so the overlay mutator never has to re-read a file it already holds in memory.
pub fn run_mutants(
    mutants: &[Mutant],
    sources: &HashMap<Utf8PathBuf, String>,
    overlay: &OverlayMutator,
    config: &SchedulerConfig,
) -> Vec<MutantResult> {
    let total = mutants.len();
    let next_index = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel::<(usize, MutantResult)>();

    thread::scope(|scope| {
        for _ in 0..config.workers.max(1) {
            let tx = tx.clone();
            let next_index = &next_index;
            scope.spawn(move || loop {
                if check_interrupted().is_err() {
                    return;
                }
                let i = next_index.fetch_add(1, Ordering::SeqCst);
                if i >= total {
                    return;
                }
                let mutant = &mutants[i];
                let empty = String::new();
                let source = sources.get(&mutant.file_path).unwrap_or(&empty);
                let result = run_one_mutant(mutant, source, overlay, config);
                if tx.send((i, result)).is_err() {
                    return;
                }
            });
        }
        drop(tx);

        let mut ordered: Vec<Option<MutantResult>> = (0..total).map(|_| None).collect();
        for (i, result) in rx {
            ordered[i] = Some(result);
        }
        ordered.into_iter().flatten().collect()
    })
}

fn run_one_mutant(mutant: &Mutant, source: &str, overlay: &OverlayMutator, config: &SchedulerConfig) -> MutantResult {
    let start = Instant::now();

    let context = match overlay.prepare(mutant, source) {
        Ok(context) => context,
        Err(e) => return MutantResult::with_error(mutant.clone(), Status::Error, e.to_string()),
    };

    let mut log_file = match LogFile::create_in(&config.log_dir, &mutant.log_file_name_base()) {
        Ok(f) => f,
        Err(e) => return MutantResult::with_error(mutant.clone(), Status::Error, e.to_string()),
    };
    let cwd = tool::working_dir(&mutant.file_path);

    let build_argv = tool::compose_argv(&config.tool_binary, Phase::Build, &context.overlay_path, &mutant.file_path);
    match run_phase(&build_argv, cwd, config.build_timeout, &mut log_file) {
        Ok(ProcessStatus::Success) => {}
        Ok(ProcessStatus::Failure) | Ok(ProcessStatus::Timeout) => {
            let output = log_file.get_log_content().unwrap_or_default();
            return MutantResult::new(mutant.clone(), Status::NotViable, output, elapsed_ms(start));
        }
        Err(e) => return MutantResult::with_error(mutant.clone(), Status::Error, e.to_string()),
    }

    if config.check_only {
        return MutantResult::new(mutant.clone(), Status::Survived, String::new(), elapsed_ms(start));
    }

    if config.test_timeout.is_zero() {
        return MutantResult::new(mutant.clone(), Status::TimedOut, String::new(), elapsed_ms(start));
    }

    let test_argv = tool::compose_argv(&config.tool_binary, Phase::Test, &context.overlay_path, &mutant.file_path);
    match run_phase(&test_argv, cwd, config.test_timeout, &mut log_file) {
        Ok(ProcessStatus::Success) => {
            MutantResult::new(mutant.clone(), Status::Survived, log_file.get_log_content().unwrap_or_default(), elapsed_ms(start))
        }
        Ok(ProcessStatus::Failure) => {
            MutantResult::new(mutant.clone(), Status::Killed, log_file.get_log_content().unwrap_or_default(), elapsed_ms(start))
        }
        Ok(ProcessStatus::Timeout) => {
            MutantResult::new(mutant.clone(), Status::TimedOut, log_file.get_log_content().unwrap_or_default(), elapsed_ms(start))
        }
        Err(e) => MutantResult::with_error(mutant.clone(), Status::Error, e.to_string()),
    }
    // `context` drops here on every path above, cleaning up its scratch directory
    // whether this mutant succeeded, failed, or errored.
}

/// Run one subprocess to completion, polling until it exits or its timeout fires.
/// Shared with the one-off baseline check in `main`.
pub(crate) fn run_phase(argv: &[String], cwd: &Utf8Path, timeout: Duration, log_file: &mut LogFile) -> Result<ProcessStatus> {
    let mut process = Process::start(argv, &[], cwd, timeout, log_file)?;
    loop {
        if let Some(status) = process.poll()? {
            return Ok(status);
        }
        thread::sleep(Duration::from_millis(20));
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
