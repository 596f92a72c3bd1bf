//! Generation engine (C4): walk a parsed file in source order, asking every
//! enabled operator whether each expression node is a candidate mutation site.

use camino::Utf8Path;
use syn::visit::{self, Visit};
use syn::{Expr, ItemFn, ItemMod};

use crate::attrs::attrs_excluded;
use crate::kind::Kind;
use crate::mutant::Mutant;
use crate::operators::{self, Candidate, Operator};
use crate::type_info::TypeInfo;

/// Generate every mutant in `file`, in the order its expressions appear in `source`.
///
/// `limit`, if set, caps the number of mutants returned; generation stops walking
/// the file as soon as it is reached, so later sites in a large file are simply
/// never visited rather than generated and discarded.
pub fn generate_file(
    path: &Utf8Path,
    source: &str,
    file: &syn::File,
    enabled: &[Kind],
    limit: Option<usize>,
) -> Vec<Mutant> {
    let types = TypeInfo::collect(file);
    let operators: Vec<Box<dyn Operator>> = operators::registry()
        .into_iter()
        .filter(|op| enabled.contains(&op.kind()))
        .collect();
    let mut visitor = GenerateVisitor {
        path,
        source,
        types: &types,
        operators: &operators,
        function_stack: Vec::new(),
        limit,
        mutants: Vec::new(),
    };
    visitor.visit_file(file);
    visitor.mutants
}

struct GenerateVisitor<'a> {
    path: &'a Utf8Path,
    source: &'a str,
    types: &'a TypeInfo,
    operators: &'a [Box<dyn Operator>],
    function_stack: Vec<String>,
    limit: Option<usize>,
    mutants: Vec<Mutant>,
}

impl GenerateVisitor<'_> {
    fn at_limit(&self) -> bool {
        matches!(self.limit, Some(n) if self.mutants.len() >= n)
    }

    fn record(&mut self, candidates: Vec<Candidate>) {
        let function = self.function_stack.last().cloned();
        for c in candidates {
            if self.at_limit() {
                return;
            }
            let index = self.mutants.len();
            let context = context_line(self.source, c.span.start.line);
            let mutant = Mutant::new(
                self.path.to_owned(),
                index,
                c.span,
                c.kind,
                &c.original,
                &c.mutated,
                function.clone(),
                context,
            );
            self.mutants.push(mutant);
        }
    }
}

impl<'ast> Visit<'ast> for GenerateVisitor<'_> {
    fn visit_item_mod(&mut self, item_mod: &'ast ItemMod) {
        if self.at_limit() || attrs_excluded(&item_mod.attrs) {
            return;
        }
        visit::visit_item_mod(self, item_mod);
    }

    fn visit_item_fn(&mut self, item_fn: &'ast ItemFn) {
        if self.at_limit() || attrs_excluded(&item_fn.attrs) {
            return;
        }
        self.function_stack.push(item_fn.sig.ident.to_string());
        visit::visit_item_fn(self, item_fn);
        self.function_stack.pop();
    }

    fn visit_expr(&mut self, expr: &'ast Expr) {
        if self.at_limit() {
            return;
        }
        let types = self.types;
        let operators = self.operators;
        let mut found = Vec::new();
        for op in operators {
            found.extend(op.candidates(expr, types));
        }
        if !found.is_empty() {
            self.record(found);
        }
        visit::visit_expr(self, expr);
    }
}

fn context_line(source: &str, line: usize) -> Option<String> {
    let text = source.lines().nth(line.checked_sub(1)?)?.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_owned())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use camino::Utf8PathBuf;

    fn all_kinds() -> Vec<Kind> {
        Kind::ALL.to_vec()
    }

    #[test]
    fn generates_arithmetic_mutants_for_a_simple_function() {
        let source = "fn add(a: i64, b: i64) -> i64 {\n    a + b\n}\n";
        let file: syn::File = syn::parse_str(source).unwrap();
        let path = Utf8PathBuf::from("src/calc.rs");
        let mutants = generate_file(&path, source, &file, &all_kinds(), None);
        assert!(mutants.iter().any(|m| m.kind == Kind::ArithmeticBinary && m.original == "+"));
        assert!(mutants.iter().all(|m| m.function.as_deref() == Some("add")));
    }

    #[test]
    fn limit_stops_generation_early() {
        let source = "fn f(a: i64, b: i64) -> i64 {\n    a + b - a * b\n}\n";
        let file: syn::File = syn::parse_str(source).unwrap();
        let path = Utf8PathBuf::from("src/lib.rs");
        let mutants = generate_file(&path, source, &file, &all_kinds(), Some(2));
        assert_eq!(mutants.len(), 2);
    }

    #[test]
    fn disabling_a_kind_removes_it_from_generation() {
        let source = "fn f(a: bool) -> bool {\n    !a\n}\n";
        let file: syn::File = syn::parse_str(source).unwrap();
        let path = Utf8PathBuf::from("src/lib.rs");
        let enabled: Vec<Kind> = Kind::ALL
            .iter()
            .copied()
            .filter(|k| *k != Kind::LogicalNotRemoval)
            .collect();
        let mutants = generate_file(&path, source, &file, &enabled, None);
        assert!(mutants.is_empty());
    }

    #[test]
    fn skips_cfg_test_modules_and_skip_marked_functions() {
        let source = "fn f(a: i64, b: i64) -> i64 { a + b }\n\
                       #[mutagen::skip]\n\
                       fn unmutated(a: i64, b: i64) -> i64 { a - b }\n\
                       #[cfg(test)]\n\
                       mod test {\n    fn it_works() { let _ = 1 + 2; }\n}\n";
        let file: syn::File = syn::parse_str(source).unwrap();
        let path = Utf8PathBuf::from("src/lib.rs");
        let mutants = generate_file(&path, source, &file, &all_kinds(), None);
        assert!(mutants.iter().all(|m| m.function.as_deref() != Some("unmutated")));
        assert!(mutants.iter().all(|m| m.function.as_deref() != Some("it_works")));
    }

    #[test]
    fn ids_are_stable_and_indexed_per_file() {
        let source = "fn f(a: i64, b: i64) -> i64 {\n    a + b\n}\n";
        let file: syn::File = syn::parse_str(source).unwrap();
        let path = Utf8PathBuf::from("src/lib.rs");
        let mutants = generate_file(&path, source, &file, &all_kinds(), None);
        assert_eq!(mutants[0].id, "src/lib.rs_0");
    }
}
