//! Configuration management for the documentation renderer
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (dsdl-docs.toml)
//! - Environment variables (DSDL_DOCS__*)
//!
//! ## Example config file (dsdl-docs.toml):
//! ```toml
//! [source]
//! root = "./dsdl"
//!
//! [parser]
//! command = ["python3", "tools/dump_dsdl_metadata.py"]
//!
//! [cache]
//! enabled = true
//!
//! [render]
//! index_only = false
//! listing_language = "python"
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::render::{listing, RenderOptions};

/// Main configuration for the renderer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocsConfig {
    /// Where type definitions come from
    #[serde(default)]
    pub source: SourceConfig,

    /// External DSDL parser
    #[serde(default)]
    pub parser: ParserConfig,

    /// Parsed metadata cache
    #[serde(default)]
    pub cache: CacheConfig,

    /// Output settings
    #[serde(default)]
    pub render: RenderConfig,
}

/// Source configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Directory containing one subdirectory per root namespace
    #[serde(default = "default_source_root")]
    pub root: PathBuf,

    /// Pre-parsed metadata snapshot; skips the parser when set
    #[serde(default)]
    pub snapshot: Option<PathBuf>,
}

/// Parser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    /// Program and leading arguments; root namespace directories are appended
    #[serde(default = "default_parser_command")]
    pub command: Vec<String>,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether parser output is cached
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Cache directory (defaults to the platform cache directory)
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

/// Render configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Emit only the index table, no definitions
    #[serde(default)]
    pub index_only: bool,

    /// Options passed to the minted environment
    #[serde(default = "default_minted_options")]
    pub minted_options: String,

    /// Pygments lexer for source listings
    #[serde(default = "default_listing_language")]
    pub listing_language: String,
}

// Default value functions
fn default_source_root() -> PathBuf {
    PathBuf::from("dsdl")
}

fn default_parser_command() -> Vec<String> {
    vec!["dsdl-metadata".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_minted_options() -> String {
    listing::DEFAULT_MINTED_OPTIONS.to_string()
}

fn default_listing_language() -> String {
    listing::DEFAULT_LISTING_LANGUAGE.to_string()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: default_source_root(),
            snapshot: None,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            command: default_parser_command(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            index_only: false,
            minted_options: default_minted_options(),
            listing_language: default_listing_language(),
        }
    }
}

impl DocsConfig {
    /// Load configuration from the default locations, with `config_path`
    /// layered on top when given
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = ["dsdl-docs.toml", ".dsdl-docs.toml", "config/dsdl-docs.toml"];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        if let Some(dirs) = project_dirs() {
            let xdg_config = dirs.config_dir().join("dsdl-docs.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("DSDL_DOCS")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Cache directory, falling back to the platform cache directory
    pub fn cache_dir(&self) -> Option<PathBuf> {
        self.cache
            .dir
            .clone()
            .or_else(|| project_dirs().map(|dirs| dirs.cache_dir().to_path_buf()))
    }

    /// Rendering options, with the source root for relative listing paths
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            index_only: self.render.index_only,
            minted_options: self.render.minted_options.clone(),
            listing_language: self.render.listing_language.clone(),
            source_root: Some(self.source.root.clone()),
        }
    }
}

fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("org", "dsdl-docs", "dsdl-docs")
}
