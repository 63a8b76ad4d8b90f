//! Metadata providers
//!
//! DSDL parsing is done by an external parser. Providers obtain its output,
//! a [`MetadataSnapshot`], either from a file or by running the parser.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{debug, info};

use crate::cache::{CacheKey, SnapshotCache};
use crate::error::{DocsError, Result};
use crate::revision::Revision;
use crate::schema::{DsdlType, MetadataSnapshot};

/// Source of parsed data type metadata
pub trait MetadataProvider {
    /// Load every type of every root namespace
    fn load(&self) -> Result<Vec<DsdlType>>;

    /// Stable description of the input `load` reads, for cache keys
    fn input_id(&self) -> Result<String>;
}

fn canonical(path: &Path) -> Result<String> {
    Ok(fs::canonicalize(path)?.to_string_lossy().into_owned())
}

/// Reads a snapshot previously written by the parser
#[derive(Debug, Clone)]
pub struct SnapshotFileProvider {
    path: PathBuf,
}

impl SnapshotFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl MetadataProvider for SnapshotFileProvider {
    fn load(&self) -> Result<Vec<DsdlType>> {
        debug!(path = ?self.path, "reading metadata snapshot");
        let content = fs::read_to_string(&self.path)?;
        let snapshot: MetadataSnapshot = serde_json::from_str(&content)?;
        Ok(snapshot.types)
    }

    fn input_id(&self) -> Result<String> {
        Ok(format!("snapshot:{}", canonical(&self.path)?))
    }
}

/// Immediate subdirectories of `superdirectory`, sorted by name
pub fn root_namespaces(superdirectory: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(superdirectory)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    if dirs.is_empty() {
        return Err(DocsError::NoRootNamespaces(superdirectory.to_path_buf()));
    }
    dirs.sort();
    Ok(dirs)
}

/// Runs the external parser over all root namespaces under a directory
///
/// The parser receives the root namespace directories as arguments and must
/// print a snapshot as JSON on stdout.
#[derive(Debug, Clone)]
pub struct CommandProvider {
    command: Vec<String>,
    root: PathBuf,
}

impl CommandProvider {
    pub fn new(command: Vec<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            command,
            root: root.into(),
        }
    }
}

impl MetadataProvider for CommandProvider {
    fn load(&self) -> Result<Vec<DsdlType>> {
        let (program, args) = self
            .command
            .split_first()
            .ok_or_else(|| DocsError::InvalidFormat("empty parser command".to_string()))?;
        let namespaces = root_namespaces(&self.root)?;

        info!(%program, namespaces = namespaces.len(), "parsing DSDL namespaces");
        let output = Command::new(program).args(args).args(&namespaces).output()?;

        if !output.status.success() {
            return Err(DocsError::Parser {
                command: self.command.join(" "),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let snapshot: MetadataSnapshot = serde_json::from_slice(&output.stdout)?;
        debug!(types = snapshot.types.len(), "parser finished");
        Ok(snapshot.types)
    }

    fn input_id(&self) -> Result<String> {
        Ok(format!(
            "command:{}\nroot:{}",
            self.command.join("\0"),
            canonical(&self.root)?
        ))
    }
}

/// Memoizes another provider in a [`SnapshotCache`] keyed by the revision
/// of the source tree at `root` and the provider's input
pub struct CachedProvider<P> {
    inner: P,
    cache: SnapshotCache,
    root: PathBuf,
}

impl<P: MetadataProvider> CachedProvider<P> {
    pub fn new(inner: P, cache: SnapshotCache, root: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            cache,
            root: root.into(),
        }
    }
}

impl<P: MetadataProvider> MetadataProvider for CachedProvider<P> {
    fn load(&self) -> Result<Vec<DsdlType>> {
        let revision = Revision::resolve(&self.root)?;
        let key = CacheKey::new(revision, &self.input_id()?);
        if let Some(types) = self.cache.load(&key)? {
            return Ok(types);
        }

        debug!(revision = %key.revision(), "parsing on cache miss");
        let types = self.inner.load()?;
        self.cache.store(&key, &types)?;
        Ok(types)
    }

    fn input_id(&self) -> Result<String> {
        Ok(format!("cached:{}\n{}", canonical(&self.root)?, self.inner.input_id()?))
    }
}
