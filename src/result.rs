//! The outcome of testing one mutant.

use serde::Serialize;

use crate::mutant::Mutant;
use crate::status::Status;

/// Per-test telemetry, when the test runner's output can be parsed for it.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct TestInfo {
    pub name: String,
    pub passed: bool,
}

/// The result of testing a single mutant.
#[derive(Clone, Debug, Serialize)]
pub struct MutantResult {
    pub mutant: Mutant,
    pub status: Status,
    /// Combined stdout+stderr from the compile and/or test invocation.
    pub output: String,
    /// Set when the pipeline itself failed (not a normal test failure).
    pub error: Option<String>,
    pub execution_time_ms: u64,
    pub tests_run: Option<u32>,
    pub tests_failed: Option<u32>,
    pub tests: Vec<TestInfo>,
}

impl MutantResult {
    pub fn new(mutant: Mutant, status: Status, output: String, execution_time_ms: u64) -> Self {
        MutantResult {
            mutant,
            status,
            output,
            error: None,
            execution_time_ms,
            tests_run: None,
            tests_failed: None,
            tests: Vec::new(),
        }
    }

    pub fn with_error(mutant: Mutant, status: Status, error: impl Into<String>) -> Self {
        MutantResult {
            mutant,
            status,
            output: String::new(),
            error: Some(error.into()),
            execution_time_ms: 0,
            tests_run: None,
            tests_failed: None,
            tests: Vec::new(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::kind::Kind;
    use crate::span::Span;
    use camino::Utf8PathBuf;

    fn sample_mutant() -> Mutant {
        Mutant::new(
            Utf8PathBuf::from("src/lib.rs"),
            0,
            Span::quad(1, 1, 1, 2),
            Kind::ArithmeticBinary,
            "+",
            "-",
            None,
            None,
        )
    }

    #[test]
    fn error_result_has_no_timing() {
        let r = MutantResult::with_error(sample_mutant(), Status::Error, "overlay prepare failed");
        assert_eq!(r.execution_time_ms, 0);
        assert_eq!(r.error.as_deref(), Some("overlay prepare failed"));
    }
}
