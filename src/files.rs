//! Project file lister: enumerate candidate source files under a project directory,
//! respecting ignore-file rules and the `examine_globs`/`exclude_globs` config.
//!
//! Unlike the teacher's `find_files.rs`, this does not follow `mod` statements to
//! discover files reachable from a set of build-tool-known roots: every `.rs` file
//! not excluded by the walker or the glob config is a candidate, which is the
//! simpler and sufficient model for this system's file-based (not target-based)
//! generation.

use camino::{Utf8Path, Utf8PathBuf};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::Result;

/// Build a [`GlobSet`] from a list of glob patterns; `None` if the list is empty,
/// matching the "no filter configured" case.
pub fn build_globset(patterns: &[String]) -> Result<Option<GlobSet>> {
    if patterns.is_empty() {
        return Ok(None);
    }
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(Some(builder.build()?))
}

/// List every `.rs` file under `project_dir`, honouring `.gitignore`/`.ignore`/a
/// custom ignore file, then `examine_globset` (keep only matches, if set) and
/// `exclude_globset` (drop matches, if set).
pub fn list_source_files(
    project_dir: &Utf8Path,
    custom_ignore_file: Option<&Utf8Path>,
    examine_globset: Option<&GlobSet>,
    exclude_globset: Option<&GlobSet>,
) -> Result<Vec<Utf8PathBuf>> {
    let mut builder = WalkBuilder::new(project_dir);
    builder.hidden(false).git_ignore(true).git_exclude(true);
    if let Some(ignore_file) = custom_ignore_file {
        builder.add_ignore(ignore_file);
    }

    let mut files = Vec::new();
    for entry in builder.build() {
        let entry = entry?;
        if !entry.file_type().is_some_and(|ft| ft.is_file()) {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("rs") {
            continue;
        }
        let Ok(utf8_path) = Utf8PathBuf::from_path_buf(path.to_path_buf()) else {
            continue;
        };
        let relative = utf8_path.strip_prefix(project_dir).unwrap_or(&utf8_path);
        if let Some(examine) = examine_globset {
            if !examine.is_match(relative) {
                continue;
            }
        }
        if let Some(exclude) = exclude_globset {
            if exclude.is_match(relative) {
                continue;
            }
        }
        files.push(utf8_path);
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn lists_rust_files_and_skips_others() {
        let dir = tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/lib.rs"), "fn f() {}").unwrap();
        fs::write(root.join("README.md"), "hello").unwrap();

        let files = list_source_files(root, None, None, None).unwrap();
        assert_eq!(files, vec![root.join("src/lib.rs")]);
    }

    #[test]
    fn exclude_globset_drops_matching_files() {
        let dir = tempdir().unwrap();
        let root = Utf8Path::from_path(dir.path()).unwrap();
        fs::create_dir_all(root.join("src/generated")).unwrap();
        fs::write(root.join("src/lib.rs"), "fn f() {}").unwrap();
        fs::write(root.join("src/generated/codegen.rs"), "fn g() {}").unwrap();

        let exclude = build_globset(&["src/generated/**".to_owned()]).unwrap();
        let files = list_source_files(root, None, None, exclude.as_ref()).unwrap();
        assert_eq!(files, vec![root.join("src/lib.rs")]);
    }

    #[test]
    fn empty_pattern_list_yields_no_globset() {
        assert!(build_globset(&[]).unwrap().is_none());
    }
}
