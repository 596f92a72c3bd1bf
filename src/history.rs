//! History store (C7): a persistent, keyed map from file path to the last recorded
//! mutation result for that file, used by the incremental analyser (C8).

use std::collections::HashMap;
use std::fs;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::Result;

/// One file's last recorded run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub file_hash: String,
    pub test_hash: String,
    pub mutation_score: f64,
    pub timestamp: String,
}

/// SHA-256 of `content`, as a lowercase hex string.
///
/// This is the one hashing algorithm shared by C7 and C8; both the source file and
/// its same-file test modules are hashed this way.
pub fn content_hash(content: &str) -> String {
    let digest = Sha256::digest(content.as_bytes());
    hex::encode(digest)
}

#[derive(Default, Serialize, Deserialize)]
struct Document {
    entries: HashMap<String, HistoryEntry>,
}

/// In-memory view of the history document, backed by a single on-disk file.
pub struct History {
    path: Utf8PathBuf,
    document: Document,
}

impl History {
    /// Load the history document at `path`, or start an empty one if it doesn't exist yet.
    pub fn load(path: impl Into<Utf8PathBuf>) -> Result<History> {
        let path = path.into();
        let document = if path.exists() {
            let text = fs::read_to_string(&path).with_context(|| format!("read history {path}"))?;
            serde_json::from_str(&text).with_context(|| format!("parse history {path}"))?
        } else {
            Document::default()
        };
        Ok(History { path, document })
    }

    /// Look up the recorded entry for `file_path`, if any.
    pub fn get(&self, file_path: &Utf8Path) -> Option<&HistoryEntry> {
        self.document.entries.get(file_path.as_str())
    }

    /// True if there is no entry for `file_path`, or its recorded `file_hash` differs
    /// from `current_hash`.
    pub fn has_changed(&self, file_path: &Utf8Path, current_hash: &str) -> bool {
        match self.get(file_path) {
            Some(entry) => entry.file_hash != current_hash,
            None => true,
        }
    }

    pub fn update(&mut self, file_path: &Utf8Path, entry: HistoryEntry) {
        self.document.entries.insert(file_path.as_str().to_owned(), entry);
    }

    /// Write the document to disk: serialise to a temp file, then atomically rename
    /// over the target path. A crash mid-save leaves either the previous complete
    /// document or the new one, never a half-written file.
    pub fn save(&self) -> Result<()> {
        let text = serde_json::to_string_pretty(&self.document).context("serialize history")?;
        let tmp = self.path.with_extension("json.tmp");
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create history directory {parent}"))?;
        }
        fs::write(&tmp, text).with_context(|| format!("write history temp file {tmp}"))?;
        fs::rename(&tmp, &self.path).with_context(|| format!("rename history into place at {}", self.path))?;
        Ok(())
    }
}
