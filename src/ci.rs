//! CI environment detection and GitHub Actions annotation formatting (§6).

use std::env;

use crate::cli::CiAnnotations;
use crate::mutant::Mutant;

/// The fixed set of CI environment variables this system understands, each with a
/// documented default used when the variable is absent or fails to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CiEnv {
    pub ci_mode: String,
    pub pr_number: u64,
    pub base_ref: String,
    pub head_ref: String,
    pub repository: String,
    pub actor: String,
    pub event_name: String,
    pub workspace: String,
}

impl CiEnv {
    pub fn from_environment() -> CiEnv {
        CiEnv {
            ci_mode: env_or("CI_MODE", "pr"),
            pr_number: env_parse_or("GITHUB_PR_NUMBER", 0),
            base_ref: env_or("GITHUB_BASE_REF", "main"),
            head_ref: env_or("GITHUB_HEAD_REF", ""),
            repository: env_or("GITHUB_REPOSITORY", ""),
            actor: env_or("GITHUB_ACTOR", ""),
            event_name: env_or("GITHUB_EVENT_NAME", ""),
            workspace: env_or("GITHUB_WORKSPACE", "."),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}

/// Parse failures yield `default` silently (§6): a malformed `GITHUB_PR_NUMBER` is
/// not worth aborting a run over.
fn env_parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    env::var(name).ok().and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// A CI boolean flag is any case-insensitive match of `true`, `1`, `on`, `yes`.
pub fn parse_ci_bool(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "on" | "yes")
}

/// The annotation renderer actually in effect, once `--ci-annotations auto` has
/// been resolved against the environment.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Annotation {
    None,
    GitHub,
}

impl CiAnnotations {
    pub fn resolve(self) -> Annotation {
        match self {
            CiAnnotations::None => Annotation::None,
            CiAnnotations::Github => Annotation::GitHub,
            CiAnnotations::Auto => {
                if env::var("GITHUB_ACTION").is_ok() {
                    Annotation::GitHub
                } else {
                    Annotation::None
                }
            }
        }
    }
}

impl Annotation {
    /// Format a message about a surviving mutant. Empty string when annotations
    /// are off, so callers can unconditionally print the result.
    pub fn format_survived(self, mutant: &Mutant) -> String {
        match self {
            Annotation::None => String::new(),
            Annotation::GitHub => format!(
                "::warning file={file},line={line},col={col},endLine={endline},endCol={endcol},title={title}:: {message}\n",
                file = mutant.file_path,
                line = mutant.position.start.line,
                col = mutant.position.start.column,
                endline = mutant.position.end.line,
                endcol = mutant.position.end.column,
                message = mutant.description,
                title = "Missed mutant",
            ),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::kind::Kind;
    use crate::span::Span;
    use crate::test_util::{single_threaded_remove_env_var, single_threaded_set_env_var};
    use camino::Utf8PathBuf;
    use pretty_assertions::assert_eq;
    use rusty_fork::rusty_fork_test;

    fn sample_mutant() -> Mutant {
        Mutant::new(
            Utf8PathBuf::from("src/main.rs"),
            0,
            Span::quad(1, 12, 1, 18),
            Kind::ArithmeticBinary,
            "+",
            "-",
            None,
            None,
        )
    }

    rusty_fork_test! {
        #[test]
        fn resolve_auto_not_on_github() {
            single_threaded_remove_env_var("GITHUB_ACTION");
            assert_eq!(CiAnnotations::Auto.resolve(), Annotation::None);
        }

        #[test]
        fn resolve_auto_github_detected() {
            single_threaded_set_env_var("GITHUB_ACTION", "something");
            assert_eq!(CiAnnotations::Auto.resolve(), Annotation::GitHub);
        }
    }

    #[test]
    fn explicit_settings_are_not_overridden_by_auto_detection() {
        assert_eq!(CiAnnotations::None.resolve(), Annotation::None);
        assert_eq!(CiAnnotations::Github.resolve(), Annotation::GitHub);
    }

    #[test]
    fn github_annotation_matches_the_documented_format() {
        let formatted = Annotation::GitHub.format_survived(&sample_mutant());
        assert_eq!(
            formatted,
            "::warning file=src/main.rs,line=1,col=12,endLine=1,endCol=18,title=Missed mutant:: replace + with - (arithmetic_binary) at src/main.rs:1:12\n"
        );
    }

    #[test]
    fn none_annotation_is_empty() {
        assert_eq!(Annotation::None.format_survived(&sample_mutant()), "");
    }

    #[test]
    fn ci_bool_parsing_is_case_insensitive() {
        for truthy in ["true", "TRUE", "1", "On", "yes", "YES"] {
            assert!(parse_ci_bool(truthy), "{truthy} should parse as true");
        }
        for falsy in ["false", "0", "off", "no", ""] {
            assert!(!parse_ci_bool(falsy), "{falsy} should parse as false");
        }
    }

    #[test]
    fn defaults_apply_when_vars_are_absent() {
        let env = CiEnv {
            ci_mode: "pr".to_owned(),
            pr_number: 0,
            base_ref: "main".to_owned(),
            head_ref: String::new(),
            repository: String::new(),
            actor: String::new(),
            event_name: String::new(),
            workspace: ".".to_owned(),
        };
        assert_eq!(env.base_ref, "main");
        assert_eq!(env.pr_number, 0);
    }
}
