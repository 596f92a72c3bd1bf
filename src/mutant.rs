//! The [`Mutant`] data model: a single candidate program change.

use camino::Utf8PathBuf;
use console::style;
use serde::Serialize;
use similar::TextDiff;

use crate::kind::Kind;
use crate::span::Span;

/// A description of a single candidate program change.
///
/// Mutants are produced by [`crate::generate::generate_file`] and consumed by the
/// scheduler, which drives each one through [`crate::overlay`] and classifies the
/// result.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Mutant {
    /// Stable string, unique within one generation run: `"<file_path>_<index>"`.
    pub id: String,

    /// Absolute path of the original source file.
    pub file_path: Utf8PathBuf,

    /// Location of the mutation site in the original source.
    pub position: Span,

    /// Which operator family produced this mutant.
    pub kind: Kind,

    /// The operator token at `position` before mutation, e.g. `"+"`.
    pub original: String,

    /// The replacement token, e.g. `"-"`. Empty for removal mutations.
    pub mutated: String,

    /// A human-readable one-line description, e.g. `replace + with - at src/calc.rs:3:12`.
    pub description: String,

    /// Name of the enclosing function, if any, for reporting only.
    pub function: Option<String>,

    /// A short source excerpt around the mutation site, for reporting only.
    pub context: Option<String>,

    /// Set for mutants whose `apply` is a no-op (see the logical-NOT removal note in
    /// DESIGN.md). Configuration may use this to drop them from generation by default.
    pub suppressed_by_default: bool,
}

impl Mutant {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        file_path: Utf8PathBuf,
        index: usize,
        position: Span,
        kind: Kind,
        original: &str,
        mutated: &str,
        function: Option<String>,
        context: Option<String>,
    ) -> Mutant {
        let id = format!("{file_path}_{index}");
        let description = describe_change(&file_path, &position, kind, original, mutated);
        let suppressed_by_default = kind == Kind::LogicalNotRemoval;
        Mutant {
            id,
            file_path,
            position,
            kind,
            original: original.to_owned(),
            mutated: mutated.to_owned(),
            description,
            function,
            context,
            suppressed_by_default,
        }
    }

    /// The log-file-safe basename used by the scheduler to name this mutant's log.
    pub fn log_file_name_base(&self) -> String {
        self.id.replace(['/', '\\'], "__")
    }

    /// A unified diff between the original and mutated source, for `--diff` output.
    pub fn diff(&self, original_source: &str, mutated_source: &str) -> String {
        TextDiff::from_lines(original_source, mutated_source)
            .unified_diff()
            .context_radius(2)
            .header(self.file_path.as_str(), self.file_path.as_str())
            .to_string()
    }

    /// A colourized one-line rendering for `--list`.
    pub fn styled_description(&self) -> String {
        format!(
            "{} {} {} {}",
            style(&self.file_path).cyan(),
            style(format!("{}:{}", self.position.start.line, self.position.start.column)).dim(),
            style(self.kind.to_string()).yellow(),
            self.description,
        )
    }
}

fn describe_change(
    file_path: &Utf8PathBuf,
    position: &Span,
    kind: Kind,
    original: &str,
    mutated: &str,
) -> String {
    if mutated.is_empty() {
        format!(
            "delete {original} ({kind}) at {file_path}:{}:{}",
            position.start.line, position.start.column
        )
    } else {
        format!(
            "replace {original} with {mutated} ({kind}) at {file_path}:{}:{}",
            position.start.line, position.start.column
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_mutant() -> Mutant {
        Mutant::new(
            Utf8PathBuf::from("src/calc.rs"),
            0,
            Span::quad(3, 12, 3, 13),
            Kind::ArithmeticBinary,
            "+",
            "-",
            Some("add".to_owned()),
            Some("a + b".to_owned()),
        )
    }

    #[test]
    fn id_embeds_file_and_index() {
        let m = sample_mutant();
        assert_eq!(m.id, "src/calc.rs_0");
    }

    #[test]
    fn description_mentions_both_operators() {
        let m = sample_mutant();
        assert!(m.description.contains('+'));
        assert!(m.description.contains('-'));
        assert!(m.description.contains("3:12"));
    }

    #[test]
    fn logical_not_removal_is_suppressed_by_default() {
        let m = Mutant::new(
            Utf8PathBuf::from("src/lib.rs"),
            0,
            Span::quad(1, 1, 1, 2),
            Kind::LogicalNotRemoval,
            "!",
            "",
            None,
            None,
        );
        assert!(m.suppressed_by_default);
        assert!(m.description.starts_with("delete"));
    }
}
