//! LaTeX rendering
//!
//! Turns a selection of data types into LaTeX fragments:
//! - a pattern naming one type renders an abridged listing of its latest
//!   non-deprecated version
//! - a wildcard pattern renders a namespace index table followed (unless
//!   index-only) by one section per namespace with length tables and listings
//!
//! Output goes into a `String`; errors are returned, never written into it.

pub mod index;
pub mod latex;
pub mod length;
pub mod listing;
pub mod primitives;
pub mod sections;
pub mod summary;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{DocsError, Result};
use crate::schema::DsdlType;
use crate::select::{group_by_namespace, latest_non_deprecated, select, TypePattern};

pub use primitives::render_primitive_types;

/// Rendering options
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Emit only the index table for wildcard patterns
    pub index_only: bool,
    /// Options passed to the minted environment
    pub minted_options: String,
    /// Pygments lexer name for listings
    pub listing_language: String,
    /// Base directory for relative source paths
    pub source_root: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            index_only: false,
            minted_options: listing::DEFAULT_MINTED_OPTIONS.to_string(),
            listing_language: listing::DEFAULT_LISTING_LANGUAGE.to_string(),
            source_root: None,
        }
    }
}

/// Document renderer
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render the types selected by `pattern`
    pub fn render(&self, pattern: &TypePattern, types: &[DsdlType]) -> Result<String> {
        let matching = select(pattern, types)?;
        debug!(pattern = pattern.as_str(), matching = matching.len(), "types selected");

        if !pattern.is_wildcard() {
            let latest = latest_non_deprecated(pattern, &matching)?;
            return summary::render_summary(self, latest, matching.len());
        }

        let groups = group_by_namespace(&matching);
        let mut output = index::render_index(pattern, &groups);
        if !self.options.index_only {
            output.push_str(&sections::render_sections(self, &groups)?);
        }
        Ok(output)
    }

    /// Source listing block for one type
    pub fn listing(&self, t: &DsdlType) -> Result<String> {
        let source = self.read_source(t)?;
        Ok(listing::render_listing(&self.options, &source))
    }

    fn source_path(&self, t: &DsdlType) -> PathBuf {
        match &self.options.source_root {
            Some(root) if t.source_file_path.is_relative() => root.join(&t.source_file_path),
            _ => t.source_file_path.clone(),
        }
    }

    fn read_source(&self, t: &DsdlType) -> Result<String> {
        let path = self.source_path(t);
        read_source_file(&path)
    }
}

fn read_source_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| DocsError::Source {
        path: path.to_path_buf(),
        source,
    })
}
