//! Source tree revision identification
//!
//! A revision names the exact state of the DSDL source tree and keys the
//! metadata cache. Inside a clean git work tree the HEAD commit is used;
//! otherwise the revision is a digest of every file under the root.

use std::fmt;
use std::fs;
use std::path::Path;

use git2::{Repository, StatusOptions};
use sha2::{Digest, Sha256};
use tracing::debug;
use walkdir::WalkDir;

use crate::checksum::Checksum;
use crate::error::Result;

/// Identity of a source tree state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Revision {
    /// Git commit id of a clean work tree
    Commit(String),
    /// Digest over relative paths and file contents
    Content(Checksum),
}

impl Revision {
    /// Resolve the revision of the tree rooted at `root`
    pub fn resolve(root: &Path) -> Result<Self> {
        if let Some(commit) = clean_head_commit(root) {
            debug!(?root, %commit, "using git revision");
            return Ok(Revision::Commit(commit));
        }
        let digest = content_digest(root)?;
        debug!(?root, %digest, "using content revision");
        Ok(Revision::Content(digest))
    }

    /// Stable string form used as the cache key
    pub fn key(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Revision::Commit(oid) => write!(f, "git:{}", oid),
            Revision::Content(checksum) => write!(f, "sha256:{}", checksum),
        }
    }
}

/// HEAD commit id if `root` lies in a git work tree with no changes
fn clean_head_commit(root: &Path) -> Option<String> {
    let repo = Repository::discover(root).ok()?;
    if repo.is_bare() {
        return None;
    }
    let head = repo.head().ok()?.peel_to_commit().ok()?;

    let mut options = StatusOptions::new();
    options.include_untracked(true).include_ignored(false);
    let statuses = repo.statuses(Some(&mut options)).ok()?;
    if !statuses.is_empty() {
        debug!(changes = statuses.len(), "work tree is dirty");
        return None;
    }

    Some(head.id().to_string())
}

/// Digest over every regular file under `root`, in path order
pub fn content_digest(root: &Path) -> Result<Checksum> {
    let mut hasher = Sha256::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git");

    for entry in walker {
        let entry = entry.map_err(|e| {
            e.into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory loop"))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        hasher.update(relative.to_string_lossy().as_bytes());
        hasher.update([0]);
        hasher.update(fs::read(entry.path())?);
        hasher.update([0]);
    }

    Ok(Checksum::from_hasher(hasher))
}
