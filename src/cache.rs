//! Parsed metadata cache
//!
//! Parsing a full set of root namespaces is slow, so parsed types are cached
//! under a [`CacheKey`]: the source tree [`Revision`] plus a digest of the
//! parse input (source root and parser command). Each input gets its own
//! entry file; an entry whose revision no longer matches is removed on lookup.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::checksum::Checksum;
use crate::error::Result;
use crate::revision::Revision;
use crate::schema::DsdlType;

const ENTRY_PREFIX: &str = "snapshot-";
const ENTRY_EXTENSION: &str = "json";

/// Hex digits of the input digest used in entry file names
const ENTRY_ID_LENGTH: usize = 16;

/// Identity of one parse: what was parsed, and at which revision
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    revision: Revision,
    input: Checksum,
}

impl CacheKey {
    /// `input` describes everything besides the tree contents that affects
    /// the parse result
    pub fn new(revision: Revision, input: &str) -> Self {
        Self {
            revision,
            input: Checksum::from_bytes(input.as_bytes()),
        }
    }

    pub fn revision(&self) -> &Revision {
        &self.revision
    }

    fn entry_file_name(&self) -> String {
        let id = &self.input.as_str()[..ENTRY_ID_LENGTH];
        format!("{}{}.{}", ENTRY_PREFIX, id, ENTRY_EXTENSION)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}+input:{}", self.revision, self.input)
    }
}

/// On-disk cache entry
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// Full key the types were parsed under
    key: String,
    /// When the entry was written
    created_at: DateTime<Utc>,
    /// Checksum of the serialized types
    checksum: Checksum,
    types: Vec<DsdlType>,
}

/// Key-addressed store for parsed metadata
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
}

impl SnapshotCache {
    /// Use `dir` as cache directory; it is created on first store
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.entry_file_name())
    }

    /// Look up the types parsed under `key`
    pub fn load(&self, key: &CacheKey) -> Result<Option<Vec<DsdlType>>> {
        let path = self.entry_path(key);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(?path, "no cache entry");
                return Ok(None);
            }
            Err(e) => {
                warn!(?path, error = %e, "cache entry unreadable, ignoring");
                return Ok(None);
            }
        };

        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(?path, error = %e, "cache entry corrupt, invalidating");
                self.invalidate(key)?;
                return Ok(None);
            }
        };

        let key = key.to_string();
        if entry.key != key {
            info!(cached = %entry.key, current = %key, "cache entry stale, invalidating");
            remove_entry(&path)?;
            return Ok(None);
        }

        if !entry.checksum.verify_json(&entry.types) {
            warn!(?path, "cache entry checksum mismatch, invalidating");
            remove_entry(&path)?;
            return Ok(None);
        }

        debug!(%key, types = entry.types.len(), "cache hit");
        Ok(Some(entry.types))
    }

    /// Replace the entry for `key` with `types`
    pub fn store(&self, key: &CacheKey, types: &[DsdlType]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        let entry = CacheEntry {
            key: key.to_string(),
            created_at: Utc::now(),
            checksum: Checksum::from_json(types)?,
            types: types.to_vec(),
        };

        let path = self.entry_path(key);
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, serde_json::to_vec(&entry)?)?;
        fs::rename(&temp_path, &path)?;

        debug!(key = %entry.key, ?path, "cache entry written");
        Ok(())
    }

    /// Remove the entry for `key`, if any
    pub fn invalidate(&self, key: &CacheKey) -> Result<()> {
        remove_entry(&self.entry_path(key))
    }

    /// Remove every entry in the cache directory
    pub fn clear(&self) -> Result<()> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let path = entry?.path();
            if is_entry_file(&path) {
                remove_entry(&path)?;
            }
        }
        debug!(dir = ?self.dir, "cache cleared");
        Ok(())
    }
}

fn is_entry_file(path: &Path) -> bool {
    let has_prefix = path
        .file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with(ENTRY_PREFIX));
    has_prefix && path.extension().is_some_and(|ext| ext == ENTRY_EXTENSION)
}

fn remove_entry(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::Span;
    use crate::version::TypeVersion;
    use tempfile::tempdir;

    fn sample_types() -> Vec<DsdlType> {
        vec![DsdlType::message(
            "uavcan.node.Heartbeat",
            TypeVersion::new(1, 0),
            Span::fixed(56),
            "uavcan/node/7509.Heartbeat.1.0.dsdl",
        )
        .with_fixed_port_id(7509)]
    }

    fn key(revision: &str, input: &str) -> CacheKey {
        CacheKey::new(Revision::Content(Checksum::from_bytes(revision.as_bytes())), input)
    }

    fn entry_files(dir: &Path) -> usize {
        fs::read_dir(dir)
            .unwrap()
            .filter(|e| is_entry_file(&e.as_ref().unwrap().path()))
            .count()
    }

    #[test]
    fn test_miss_on_empty_cache() {
        let dir = tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path().join("cache"));
        assert!(cache.load(&key("a", "root")).unwrap().is_none());
    }

    #[test]
    fn test_hit_after_store() {
        let dir = tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.store(&key("a", "root"), &sample_types()).unwrap();
        assert_eq!(cache.load(&key("a", "root")).unwrap(), Some(sample_types()));
    }

    #[test]
    fn test_inputs_have_separate_entries() {
        let dir = tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.store(&key("a", "public"), &sample_types()).unwrap();

        assert!(cache.load(&key("a", "private")).unwrap().is_none());
        cache.store(&key("a", "private"), &[]).unwrap();
        assert_eq!(cache.load(&key("a", "public")).unwrap(), Some(sample_types()));
        assert_eq!(cache.load(&key("a", "private")).unwrap(), Some(vec![]));
        assert_eq!(entry_files(dir.path()), 2);
    }

    #[test]
    fn test_stale_entry_is_removed() {
        let dir = tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.store(&key("a", "root"), &sample_types()).unwrap();

        assert!(cache.load(&key("b", "root")).unwrap().is_none());
        assert_eq!(entry_files(dir.path()), 0);
        assert!(cache.load(&key("a", "root")).unwrap().is_none());
    }

    #[test]
    fn test_corrupt_entry_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        let key = key("a", "root");
        fs::write(dir.path().join(key.entry_file_name()), "not json").unwrap();
        assert!(cache.load(&key).unwrap().is_none());
        assert_eq!(entry_files(dir.path()), 0);
    }

    #[test]
    fn test_tampered_entry_is_a_miss() {
        let dir = tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        let key = key("a", "root");
        cache.store(&key, &sample_types()).unwrap();

        let path = dir.path().join(key.entry_file_name());
        let tampered = fs::read_to_string(&path).unwrap().replace("7509", "7510");
        fs::write(&path, tampered).unwrap();
        assert!(cache.load(&key).unwrap().is_none());
    }

    #[test]
    fn test_invalidate_is_idempotent() {
        let dir = tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        let key = key("a", "root");
        cache.store(&key, &sample_types()).unwrap();
        cache.invalidate(&key).unwrap();
        cache.invalidate(&key).unwrap();
        assert!(cache.load(&key).unwrap().is_none());
    }

    #[test]
    fn test_clear_removes_only_entries() {
        let dir = tempdir().unwrap();
        let cache = SnapshotCache::new(dir.path());
        cache.store(&key("a", "public"), &sample_types()).unwrap();
        cache.store(&key("a", "private"), &sample_types()).unwrap();
        fs::write(dir.path().join("notes.txt"), "keep").unwrap();

        cache.clear().unwrap();
        assert_eq!(entry_files(dir.path()), 0);
        assert!(dir.path().join("notes.txt").exists());
        SnapshotCache::new(dir.path().join("missing")).clear().unwrap();
    }

    #[test]
    fn test_key_display() {
        let key = CacheKey::new(Revision::Commit("abc123".to_string()), "root");
        assert!(key.to_string().starts_with("git:abc123+input:"));
        assert_eq!(key.revision(), &Revision::Commit("abc123".to_string()));
    }
}
