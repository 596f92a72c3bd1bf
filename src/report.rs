//! Report summary builder (C10): assembles the final, deterministic [`Summary`]
//! handed to external reporters (terminal output, CI annotations, JSON).

use std::collections::HashMap;

use camino::Utf8PathBuf;
use serde::Serialize;

use crate::aggregate::{aggregate_statistics, FileReport, Statistics};
use crate::result::MutantResult;

/// The crate's own version, embedded in every summary for reproducibility.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run-level aggregation: see §3 "Summary" in SPEC_FULL.md.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    pub total_files: usize,
    pub processed_files: usize,
    pub total_mutants: usize,
    pub killed_mutants: usize,
    pub duration_ms: u64,
    pub statistics: Statistics,
    pub timestamp: String,
    pub version: String,
    pub file_reports: HashMap<Utf8PathBuf, FileReport>,
}

/// Assemble a [`Summary`] from every result produced by this run.
///
/// `timestamp` is supplied by the caller (the moment of emission) rather than
/// read from the clock here, keeping this function a pure, deterministic
/// reduction of its inputs.
pub fn build_summary(
    results: &[MutantResult],
    file_reports: HashMap<Utf8PathBuf, FileReport>,
    total_files: usize,
    processed_files: usize,
    duration_ms: u64,
    timestamp: String,
) -> Summary {
    let statistics = aggregate_statistics(results);
    let total_mutants = results.len();
    let killed_mutants = statistics.killed;
    Summary {
        total_files,
        processed_files,
        total_mutants,
        killed_mutants,
        duration_ms,
        statistics,
        timestamp,
        version: VERSION.to_owned(),
        file_reports,
    }
}
