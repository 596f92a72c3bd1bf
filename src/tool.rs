//! Composes the command line for the external build/test tool.
//!
//! The contract (SPEC_FULL.md §6) is fixed: one external binary accepting
//! `build --overlay=<path> <file>` and `test --overlay=<path> ./...`, both run with
//! the current directory set to the original source file's own directory.

use camino::Utf8Path;

/// Which half of the compile+test cycle to run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Phase {
    Build,
    Test,
}

/// Build the argv for one phase, given the configured tool binary, the mutated
/// file's original path, and this mutant's overlay manifest path.
pub fn compose_argv(tool_binary: &str, phase: Phase, overlay_path: &Utf8Path, file: &Utf8Path) -> Vec<String> {
    let overlay_flag = format!("--overlay={overlay_path}");
    match phase {
        Phase::Build => vec![tool_binary.to_owned(), "build".to_owned(), overlay_flag, file.to_string()],
        Phase::Test => vec![tool_binary.to_owned(), "test".to_owned(), overlay_flag, "./...".to_owned()],
    }
}

/// Both phases run with the current directory set to the original file's directory.
pub fn working_dir(file: &Utf8Path) -> &Utf8Path {
    file.parent().unwrap_or(Utf8Path::new("."))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn build_argv_matches_the_external_tool_contract() {
        let argv = compose_argv(
            "mutagen-go",
            Phase::Build,
            Utf8Path::new("/tmp/ov/overlay.json"),
            Utf8Path::new("src/calc.rs"),
        );
        assert_eq!(argv, vec!["mutagen-go", "build", "--overlay=/tmp/ov/overlay.json", "src/calc.rs"]);
    }

    #[test]
    fn test_argv_targets_the_whole_subtree() {
        let argv = compose_argv(
            "mutagen-go",
            Phase::Test,
            Utf8Path::new("/tmp/ov/overlay.json"),
            Utf8Path::new("src/calc.rs"),
        );
        assert_eq!(argv, vec!["mutagen-go", "test", "--overlay=/tmp/ov/overlay.json", "./..."]);
    }

    #[test]
    fn working_dir_is_the_files_parent() {
        assert_eq!(working_dir(Utf8Path::new("src/calc.rs")), Utf8Path::new("src"));
        assert_eq!(working_dir(Utf8Path::new("calc.rs")), Utf8Path::new("."));
    }
}
