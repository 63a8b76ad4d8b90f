//! DSDL Documentation Renderer
//!
//! Renders LaTeX documentation for versioned, namespaced DSDL data types:
//! namespace index tables, per-version length tables and source listings.
//!
//! ## Features
//!
//! - **Length Tables**: Bit and byte sizes plus worst-case CAN frame counts
//! - **Namespace Index**: Indented namespace tree with all type versions
//! - **Metadata Cache**: Parser output cached per source tree revision
//! - **Glob Selection**: Shell-style patterns with natural ordering
//!
//! ## Pipeline
//!
//! ```text
//! dsdl/                    external parser          render
//! ├── uavcan/   ─────────► MetadataSnapshot ──────► LaTeX
//! └── reg/                 (cached by revision)
//! ```

pub mod cache;
pub mod checksum;
pub mod config;
pub mod error;
pub mod provider;
pub mod render;
pub mod revision;
pub mod schema;
pub mod select;
pub mod size;
pub mod version;

pub use cache::{CacheKey, SnapshotCache};
pub use checksum::Checksum;
pub use config::DocsConfig;
pub use error::{DocsError, Result};
pub use provider::{CachedProvider, CommandProvider, MetadataProvider, SnapshotFileProvider};
pub use render::{render_primitive_types, RenderOptions, Renderer};
pub use revision::Revision;
pub use schema::{DsdlType, MetadataSnapshot, TypeShape};
pub use select::TypePattern;
pub use size::{bits_to_bytes, bytes_to_frame_count, BitLengthRange, LengthSummary, Span};
pub use version::TypeVersion;
