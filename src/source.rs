//! Source analyser (C1): read and parse one source file.
//!
//! Code is normalized to Unix line endings as it's read in, matching the
//! convention `Span`'s line/column arithmetic assumes.

use std::fmt;
use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::type_info::TypeInfo;

/// A source file, loaded and ready to be parsed and walked for mutants.
#[derive(Clone, Debug)]
pub struct SourceFile {
    pub path: Utf8PathBuf,
    pub code: String,
}

/// C1's two failure modes: everything else (a real compiler's "declared and not
/// used"-style diagnostics) is suppressed, since there is no embedded type-checker
/// here to produce them in the first place.
#[derive(Debug)]
pub enum SourceError {
    ParseError(syn::Error),
    IoError(std::io::Error),
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::ParseError(e) => write!(f, "parse error: {e}"),
            SourceError::IoError(e) => write!(f, "read error: {e}"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::ParseError(e) => Some(e),
            SourceError::IoError(e) => Some(e),
        }
    }
}

impl SourceFile {
    /// Load `path`, eagerly reading its full text.
    pub fn load(path: impl Into<Utf8PathBuf>) -> Result<SourceFile, SourceError> {
        let path = path.into();
        let code = fs::read_to_string(&path).map_err(SourceError::IoError)?.replace("\r\n", "\n");
        Ok(SourceFile { path, code })
    }

    /// Parse this file's AST, the `(ast_root, type_info)` half of C1's output; the
    /// third element, `file_set`, is simply `Span`, derived from the AST's own
    /// `proc_macro2` spans rather than tracked separately.
    pub fn parse(&self) -> Result<(syn::File, TypeInfo), SourceError> {
        let ast_root = syn::parse_file(&self.code).map_err(SourceError::ParseError)?;
        let type_info = TypeInfo::collect(&ast_root);
        Ok((ast_root, type_info))
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn loads_and_parses_a_valid_file() {
        let dir = tempdir().unwrap();
        let path = Utf8Path::from_path(dir.path()).unwrap().join("lib.rs");
        fs::write(&path, "fn add(a: i64, b: i64) -> i64 { a + b }\n").unwrap();

        let source = SourceFile::load(&path).unwrap();
        let (ast, types) = source.parse().unwrap();
        assert_eq!(ast.items.len(), 1);
        assert!(!types.is_empty());
    }

    #[test]
    fn unparseable_file_fails_with_parse_error() {
        let dir = tempdir().unwrap();
        let path = Utf8Path::from_path(dir.path()).unwrap().join("broken.rs");
        fs::write(&path, "fn add(a: i64 -> i64 {\n").unwrap();

        let source = SourceFile::load(&path).unwrap();
        assert!(matches!(source.parse(), Err(SourceError::ParseError(_))));
    }

    #[test]
    fn missing_file_fails_with_io_error() {
        let err = SourceFile::load(Utf8PathBuf::from("/nonexistent/path/lib.rs")).unwrap_err();
        assert!(matches!(err, SourceError::IoError(_)));
    }

    #[test]
    fn crlf_is_normalized_to_lf() {
        let dir = tempdir().unwrap();
        let path = Utf8Path::from_path(dir.path()).unwrap().join("lib.rs");
        fs::write(&path, "fn f() {\r\n}\r\n").unwrap();
        let source = SourceFile::load(&path).unwrap();
        assert!(!source.code.contains('\r'));
    }
}
