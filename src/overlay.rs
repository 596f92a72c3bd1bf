//! Overlay mutator (C5): the isolation mechanism that lets many mutants of one file
//! be compiled and tested concurrently without ever touching the original tree.
//!
//! Classic mutation testers copy the whole source tree per mutant; this system
//! instead writes one mutated file per mutant into its own scratch directory and
//! hands the external tool an overlay manifest mapping the original path to it.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;

use camino::{Utf8Path, Utf8PathBuf};
use serde::Serialize;

use crate::mutant::Mutant;
use crate::operators;

/// Failure modes specific to preparing one mutant's overlay.
///
/// These are distinct from `ParseError`/`IOError` (C1) because the scheduler (C6)
/// classifies them as `Status::Error` rather than aborting the whole file.
#[derive(Debug)]
pub enum OverlayError {
    /// The text at `mutant.position` no longer matches `mutant.original`: the node
    /// this mutant was generated against can no longer be located.
    TargetNotFound,
    /// Applying the mutation produced no change to the source.
    InvalidMutation,
    Io(io::Error),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::TargetNotFound => write!(f, "mutation site no longer matches the source"),
            OverlayError::InvalidMutation => write!(f, "applying the mutation had no effect"),
            OverlayError::Io(e) => write!(f, "overlay preparation failed: {e}"),
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OverlayError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for OverlayError {
    fn from(e: io::Error) -> Self {
        OverlayError::Io(e)
    }
}

/// Transient record for one mutant's compile+test cycle.
///
/// Cleanup is tied to the value's lifetime: dropping a `MutationContext` removes
/// its scratch directory, so cleanup runs on every exit path from the scheduler's
/// per-mutant worker, including a panic unwind.
pub struct MutationContext {
    pub original_path: Utf8PathBuf,
    pub mutated_path: Utf8PathBuf,
    pub overlay_path: Utf8PathBuf,
    pub scratch_dir: Utf8PathBuf,
    cleaned: bool,
}

impl MutationContext {
    /// Remove the scratch directory. Safe to call more than once.
    pub fn cleanup(&mut self) {
        if !self.cleaned {
            let _ = fs::remove_dir_all(&self.scratch_dir);
            self.cleaned = true;
        }
    }
}

impl Drop for MutationContext {
    fn drop(&mut self) {
        self.cleanup();
    }
}

#[derive(Serialize)]
struct OverlayManifest<'a> {
    #[serde(rename = "Replace")]
    replace: BTreeMap<&'a str, &'a str>,
}

/// Owns the base scratch directory that every mutant's own scratch directory is
/// created under.
pub struct OverlayMutator {
    base_dir: Utf8PathBuf,
}

impl OverlayMutator {
    pub fn new(base_dir: impl Into<Utf8PathBuf>) -> io::Result<Self> {
        let base_dir = base_dir.into();
        fs::create_dir_all(&base_dir)?;
        Ok(OverlayMutator { base_dir })
    }

    /// Prepare one mutant: fresh scratch directory, mutated source, overlay manifest.
    pub fn prepare(&self, mutant: &Mutant, original_source: &str) -> Result<MutationContext, OverlayError> {
        let extracted = mutant.position.extract(original_source);
        if extracted != mutant.original {
            return Err(OverlayError::TargetNotFound);
        }

        let mutated_source = operators::apply(mutant.kind, original_source, &mutant.position, &mutant.mutated);
        if mutated_source == original_source && !mutant.suppressed_by_default {
            return Err(OverlayError::InvalidMutation);
        }

        let scratch_dir = self.base_dir.join(format!("{}-{:x}", mutant.log_file_name_base(), fastrand::u64(..)));
        fs::create_dir_all(&scratch_dir)?;

        let mutated_path = scratch_dir.join("mutated_source.rs");
        write_atomically(&mutated_path, mutated_source.as_bytes())?;

        let overlay_path = scratch_dir.join("overlay.json");
        let manifest = OverlayManifest {
            replace: BTreeMap::from([(mutant.file_path.as_str(), mutated_path.as_str())]),
        };
        let manifest_bytes = serde_json::to_vec_pretty(&manifest).map_err(io::Error::from)?;
        write_atomically(&overlay_path, &manifest_bytes)?;

        Ok(MutationContext {
            original_path: mutant.file_path.clone(),
            mutated_path,
            overlay_path,
            scratch_dir,
            cleaned: false,
        })
    }

    /// Remove the base directory and every scratch directory still under it.
    pub fn dispose(self) -> io::Result<()> {
        fs::remove_dir_all(&self.base_dir)
    }
}

fn write_atomically(path: &Utf8Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
