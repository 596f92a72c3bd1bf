//! Incremental analyser (C8): given the project file lister, a file hasher (the
//! same algorithm as C7), and the history store, return the subset of candidate
//! source files that actually need (re)testing this run.

use camino::Utf8PathBuf;
use quote::ToTokens;
use syn::Item;

use crate::attrs::attr_is_cfg_test;
use crate::history::{content_hash, History};

/// A candidate source file due for testing: either it's new/changed, or its
/// same-file tests have changed since the last recorded run.
#[derive(Clone, Debug, PartialEq)]
pub struct PendingFile {
    pub path: Utf8PathBuf,
    pub file_hash: String,
    pub test_hash: String,
}

/// The text whose hash is this file's `test_hash`: the concatenated source of every
/// `#[cfg(test)] mod ...` item in the file, in declaration order.
///
/// Rust keeps unit tests in the same file as the code they cover, unlike the
/// separate-file convention this was adapted from, so "have the tests changed" is
/// answered by hashing those modules' own content rather than a second file.
pub fn test_module_source(file: &syn::File) -> String {
    file.items
        .iter()
        .filter_map(|item| match item {
            Item::Mod(item_mod) if item_mod.attrs.iter().any(attr_is_cfg_test) => {
                Some(item_mod.to_token_stream().to_string())
            }
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Filter candidates down to the files that need (re)testing this run.
///
/// A file is skipped only when *both* its source hash and its test hash match the
/// recorded history entry; either one changing forces a re-test, since a test-only
/// edit can flip a previously-survived mutant to killed or vice versa.
pub fn files_needing_tests(
    candidates: &[(Utf8PathBuf, String, String)],
    history: &History,
) -> Vec<PendingFile> {
    candidates
        .iter()
        .filter_map(|(path, source, test_source)| {
            let file_hash = content_hash(source);
            let test_hash = content_hash(test_source);
            let changed = match history.get(path) {
                Some(entry) => entry.file_hash != file_hash || entry.test_hash != test_hash,
                None => true,
            };
            changed.then(|| PendingFile {
                path: path.clone(),
                file_hash,
                test_hash,
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::history::HistoryEntry;
    use tempfile::tempdir;

    #[test]
    fn file_with_no_test_module_hashes_the_empty_string() {
        let file: syn::File = syn::parse_str("fn f() {}").unwrap();
        assert_eq!(test_module_source(&file), "");
        assert_eq!(content_hash(&test_module_source(&file)), content_hash(""));
    }

    #[test]
    fn file_with_a_test_module_hashes_its_content() {
        let file: syn::File = syn::parse_str(
            "fn f() {}\n#[cfg(test)]\nmod test {\n    #[test]\n    fn it_works() {}\n}\n",
        )
        .unwrap();
        assert!(test_module_source(&file).contains("it_works"));
    }

    #[test]
    fn unchanged_file_and_tests_are_skipped() {
        let dir = tempdir().unwrap();
        let history_path = camino::Utf8Path::from_path(dir.path()).unwrap().join("history.json");
        let mut history = History::load(&history_path).unwrap();
        let path = Utf8PathBuf::from("src/lib.rs");
        history.update(
            &path,
            HistoryEntry {
                file_hash: content_hash("fn f() {}"),
                test_hash: content_hash(""),
                mutation_score: 100.0,
                timestamp: "2026-01-01T00:00:00Z".to_owned(),
            },
        );

        let candidates = vec![(path.clone(), "fn f() {}".to_owned(), String::new())];
        assert!(files_needing_tests(&candidates, &history).is_empty());

        let changed = vec![(path, "fn f() { 1 + 1; }".to_owned(), String::new())];
        assert_eq!(files_needing_tests(&changed, &history).len(), 1);
    }

    #[test]
    fn test_only_change_still_forces_a_retest() {
        let dir = tempdir().unwrap();
        let history_path = camino::Utf8Path::from_path(dir.path()).unwrap().join("history.json");
        let mut history = History::load(&history_path).unwrap();
        let path = Utf8PathBuf::from("src/lib.rs");
        history.update(
            &path,
            HistoryEntry {
                file_hash: content_hash("fn f() {}"),
                test_hash: content_hash("old tests"),
                mutation_score: 100.0,
                timestamp: "2026-01-01T00:00:00Z".to_owned(),
            },
        );
        let candidates = vec![(path, "fn f() {}".to_owned(), "new tests".to_owned())];
        assert_eq!(files_needing_tests(&candidates, &history).len(), 1);
    }
}
