//! Aggregator & quality gate (C9): reduce per-mutant results to per-file and
//! overall mutation scores, and apply the CI threshold policy.

use std::collections::HashMap;

use camino::Utf8PathBuf;
use serde::Serialize;

use crate::kind::Kind;
use crate::result::MutantResult;
use crate::status::Status;

/// Per-file aggregation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FileReport {
    pub file_path: Utf8PathBuf,
    pub total: usize,
    pub killed: usize,
    pub mutation_score: f64,
}

/// Counts for one [`Kind`] across a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct KindStats {
    pub total: usize,
    pub killed: usize,
    pub survived: usize,
}

/// Run-wide counts by status, plus the overall score and per-kind breakdown.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Statistics {
    pub killed: usize,
    pub survived: usize,
    pub timed_out: usize,
    pub error: usize,
    pub not_viable: usize,
    pub mutation_score: f64,
    pub by_kind: HashMap<Kind, KindStats>,
}

/// Aggregate one file's results into a [`FileReport`].
///
/// `mutation_score` here follows the same not-viable-excluded formula as the
/// overall score (§4.9): `killed / (total - not_viable) * 100`, `0` when that
/// denominator is `0`.
pub fn aggregate_file(file_path: Utf8PathBuf, results: &[MutantResult]) -> FileReport {
    let total = results.len();
    let killed = results.iter().filter(|r| r.status.is_killed()).count();
    let not_viable = results.iter().filter(|r| r.status.is_not_viable()).count();
    let denominator = total - not_viable;
    let mutation_score = if denominator == 0 { 0.0 } else { (killed as f64 / denominator as f64) * 100.0 };
    FileReport {
        file_path,
        total,
        killed,
        mutation_score,
    }
}

/// Aggregate every result across the whole run into run-wide [`Statistics`].
///
/// Initialises `by_kind` with every [`Kind`] present, even at zero, so the map is
/// always populated rather than absent for kinds that didn't fire.
pub fn aggregate_statistics(results: &[MutantResult]) -> Statistics {
    let mut by_kind: HashMap<Kind, KindStats> = Kind::ALL.iter().map(|&k| (k, KindStats::default())).collect();
    let (mut killed, mut survived, mut timed_out, mut error, mut not_viable) = (0, 0, 0, 0, 0);
    for result in results {
        let stats = by_kind.entry(result.mutant.kind).or_default();
        stats.total += 1;
        match result.status {
            Status::Killed => {
                killed += 1;
                stats.killed += 1;
            }
            Status::Survived => {
                survived += 1;
                stats.survived += 1;
            }
            Status::TimedOut => timed_out += 1,
            Status::Error => error += 1,
            Status::NotViable => not_viable += 1,
        }
    }
    let total = results.len();
    let denominator = total - not_viable;
    let mutation_score = if denominator == 0 { 0.0 } else { (killed as f64 / denominator as f64) * 100.0 };
    Statistics {
        killed,
        survived,
        timed_out,
        error,
        not_viable,
        mutation_score,
        by_kind,
    }
}

/// The outcome of evaluating the quality gate against a summary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QualityGateResult {
    pub pass: bool,
    pub score: f64,
    pub reason: String,
}

/// Evaluate the quality gate per §4.9. `total` is the run's total mutant count
/// (`0`/absent summary is treated the same as `total == 0`).
pub fn evaluate_quality_gate(total: Option<usize>, score: f64, enabled: bool, min_score: f64) -> QualityGateResult {
    match total {
        None | Some(0) => QualityGateResult {
            pass: false,
            score,
            reason: "No mutants generated".to_owned(),
        },
        Some(_) if !enabled => QualityGateResult {
            pass: true,
            score,
            reason: "Quality gate disabled".to_owned(),
        },
        Some(_) if score >= min_score => QualityGateResult {
            pass: true,
            score,
            reason: "Mutation score meets minimum threshold".to_owned(),
        },
        Some(_) => QualityGateResult {
            pass: false,
            score,
            reason: format!("Mutation score {score:.1}% is below the required minimum of {min_score:.1}%"),
        },
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::mutant::Mutant;
    use crate::span::Span;

    fn result(kind: Kind, status: Status) -> MutantResult {
        let mutant = Mutant::new(Utf8PathBuf::from("src/lib.rs"), 0, Span::quad(1, 1, 1, 2), kind, "+", "-", None, None);
        MutantResult::new(mutant, status, String::new(), 10)
    }

    #[test]
    fn file_score_excludes_not_viable_from_denominator() {
        let results = vec![
            result(Kind::ArithmeticBinary, Status::Killed),
            result(Kind::ArithmeticBinary, Status::Survived),
            result(Kind::ArithmeticBinary, Status::NotViable),
        ];
        let report = aggregate_file(Utf8PathBuf::from("src/lib.rs"), &results);
        assert_eq!(report.total, 3);
        assert_eq!(report.killed, 1);
        assert_eq!(report.mutation_score, 50.0);
    }

    #[test]
    fn empty_denominator_scores_zero_not_nan() {
        let results = vec![result(Kind::ArithmeticBinary, Status::NotViable)];
        let report = aggregate_file(Utf8PathBuf::from("src/lib.rs"), &results);
        assert_eq!(report.mutation_score, 0.0);
    }

    #[test]
    fn by_kind_map_is_populated_for_every_kind() {
        let results = vec![result(Kind::ArithmeticBinary, Status::Killed)];
        let stats = aggregate_statistics(&results);
        assert_eq!(stats.by_kind.len(), Kind::ALL.len());
        assert_eq!(stats.by_kind[&Kind::ArithmeticBinary].killed, 1);
        assert_eq!(stats.by_kind[&Kind::LogicalBinary].total, 0);
    }

    #[test]
    fn quality_gate_boundary_is_inclusive() {
        let gate = evaluate_quality_gate(Some(10), 80.0, true, 80.0);
        assert!(gate.pass);
        assert_eq!(gate.reason, "Mutation score meets minimum threshold");
    }

    #[test]
    fn quality_gate_disabled_always_passes() {
        let gate = evaluate_quality_gate(Some(10), 10.0, false, 90.0);
        assert!(gate.pass);
        assert_eq!(gate.reason, "Quality gate disabled");
    }

    #[test]
    fn no_mutants_fails_regardless_of_enabled() {
        let gate = evaluate_quality_gate(Some(0), 0.0, false, 50.0);
        assert!(!gate.pass);
        assert_eq!(gate.reason, "No mutants generated");
        let gate = evaluate_quality_gate(None, 0.0, true, 50.0);
        assert!(!gate.pass);
    }

    #[test]
    fn below_threshold_reports_both_scores() {
        let gate = evaluate_quality_gate(Some(100), 70.0, true, 80.0);
        assert!(!gate.pass);
        assert!(gate.reason.contains("70.0%"));
        assert!(gate.reason.contains("80.0%"));
    }
}
