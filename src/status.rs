//! Classification of the outcome of testing one mutant.

use serde::Serialize;
use strum::Display;

/// The classification of one mutant's test run, per the state machine in SPEC_FULL.md §4.6.
///
/// Deliberately five variants only: the distilled spec's `NOT_COVERED` status is
/// declared in one place but never produced, and this implementation does not expose
/// it (see the resolved open question in DESIGN.md).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// The test run exceeded its deadline and was killed.
    TimedOut,
    /// The test run exited non-zero: the mutant was detected.
    Killed,
    /// The test run exited zero: the mutant went undetected.
    Survived,
    /// The pipeline itself failed: the subprocess could not be started, or failed in
    /// an unexpected way unrelated to test outcome.
    Error,
    /// The mutated program did not compile.
    NotViable,
}

impl Status {
    /// True for outcomes that count as "killed" for scoring purposes.
    pub fn is_killed(self) -> bool {
        matches!(self, Status::Killed)
    }

    /// True for outcomes excluded from the scoring denominator.
    pub fn is_not_viable(self) -> bool {
        matches!(self, Status::NotViable)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn exactly_five_variants_are_reachable() {
        let all = [
            Status::TimedOut,
            Status::Killed,
            Status::Survived,
            Status::Error,
            Status::NotViable,
        ];
        assert_eq!(all.len(), 5);
        assert!(Status::Killed.is_killed());
        assert!(!Status::Survived.is_killed());
        assert!(Status::NotViable.is_not_viable());
    }

    #[test]
    fn display_is_screaming_snake_case() {
        assert_eq!(Status::TimedOut.to_string(), "TIMED_OUT");
        assert_eq!(Status::NotViable.to_string(), "NOT_VIABLE");
    }
}
