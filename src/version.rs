//! Data type versioning

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DocsError;

/// Major/minor version of a data type definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeVersion {
    pub major: u8,
    pub minor: u8,
}

impl TypeVersion {
    /// Create a new version
    pub fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }

    /// Parse from a version string (e.g., "1.0")
    pub fn parse(version_str: &str) -> Result<Self, DocsError> {
        let invalid = || DocsError::InvalidVersion(version_str.to_string());
        let (major, minor) = version_str.split_once('.').ok_or_else(invalid)?;
        Ok(Self {
            major: major.parse().map_err(|_| invalid())?,
            minor: minor.parse().map_err(|_| invalid())?,
        })
    }
}

impl FromStr for TypeVersion {
    type Err = DocsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TypeVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}
