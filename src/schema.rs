//! Data type metadata and structures

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::size::{bits_to_bytes, BitLengthRange};
use crate::version::TypeVersion;

/// Separator between the components of a full type name
pub const NAME_COMPONENT_SEPARATOR: char = '.';

/// Serialized layout of a data type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeShape {
    /// Message type published on a subject
    Message { bit_length_range: BitLengthRange },
    /// Service type with separate request and response layouts
    Service {
        request: BitLengthRange,
        response: BitLengthRange,
    },
}

/// Largest serialized size of a type, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaxBytes {
    Message(u64),
    Service { request: u64, response: u64 },
}

/// One version of a data type definition, as reported by the DSDL parser
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DsdlType {
    /// Full name including namespaces (e.g., "uavcan.node.Heartbeat")
    pub full_name: String,
    /// Version of this definition
    pub version: TypeVersion,
    /// Fixed subject or service ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_port_id: Option<u32>,
    /// Whether this version is marked deprecated
    #[serde(default)]
    pub deprecated: bool,
    /// Path to the definition source text
    pub source_file_path: PathBuf,
    #[serde(flatten)]
    pub shape: TypeShape,
}

impl DsdlType {
    /// Create a message type
    pub fn message(
        full_name: impl Into<String>,
        version: TypeVersion,
        bit_length_range: BitLengthRange,
        source_file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            version,
            fixed_port_id: None,
            deprecated: false,
            source_file_path: source_file_path.into(),
            shape: TypeShape::Message { bit_length_range },
        }
    }

    /// Create a service type
    pub fn service(
        full_name: impl Into<String>,
        version: TypeVersion,
        request: BitLengthRange,
        response: BitLengthRange,
        source_file_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            version,
            fixed_port_id: None,
            deprecated: false,
            source_file_path: source_file_path.into(),
            shape: TypeShape::Service { request, response },
        }
    }

    /// Set the fixed port ID
    pub fn with_fixed_port_id(mut self, port_id: u32) -> Self {
        self.fixed_port_id = Some(port_id);
        self
    }

    /// Mark as deprecated
    pub fn deprecated(mut self) -> Self {
        self.deprecated = true;
        self
    }

    /// Last component of the full name (e.g., "Heartbeat")
    pub fn short_name(&self) -> &str {
        self.full_name
            .rsplit(NAME_COMPONENT_SEPARATOR)
            .next()
            .unwrap_or(&self.full_name)
    }

    /// Enclosing namespace (e.g., "uavcan.node")
    pub fn namespace(&self) -> &str {
        self.full_name
            .rsplit_once(NAME_COMPONENT_SEPARATOR)
            .map(|(namespace, _)| namespace)
            .unwrap_or("")
    }

    /// First component of the full name (e.g., "uavcan")
    pub fn root_namespace(&self) -> &str {
        self.full_name
            .split(NAME_COMPONENT_SEPARATOR)
            .next()
            .unwrap_or(&self.full_name)
    }

    pub fn is_service(&self) -> bool {
        matches!(self.shape, TypeShape::Service { .. })
    }

    pub fn has_fixed_port_id(&self) -> bool {
        self.fixed_port_id.is_some()
    }

    /// "service" for services, "subject" for messages
    pub fn port_kind(&self) -> &'static str {
        if self.is_service() {
            "service"
        } else {
            "subject"
        }
    }

    /// "service" for services, "message" for messages
    pub fn kind_name(&self) -> &'static str {
        if self.is_service() {
            "service"
        } else {
            "message"
        }
    }

    /// Byte size of the largest serialized instance
    pub fn max_bytes(&self) -> MaxBytes {
        match self.shape {
            TypeShape::Message { bit_length_range } => {
                MaxBytes::Message(bits_to_bytes(bit_length_range.max))
            }
            TypeShape::Service { request, response } => MaxBytes::Service {
                request: bits_to_bytes(request.max),
                response: bits_to_bytes(response.max),
            },
        }
    }
}

/// Parsed metadata for a whole set of root namespaces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    /// Revision of the source tree the snapshot was produced from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    /// When the snapshot was produced
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// All parsed types
    pub types: Vec<DsdlType>,
}

impl MetadataSnapshot {
    /// Create a snapshot stamped with the current time
    pub fn new(revision: Option<String>, types: Vec<DsdlType>) -> Self {
        Self {
            revision,
            created_at: Some(Utc::now()),
            types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::size::Span;

    #[test]
    fn test_name_components() {
        let t = DsdlType::message(
            "uavcan.node.port.List",
            TypeVersion::new(0, 1),
            Span::new(8, 1024).unwrap(),
            "List.0.1.dsdl",
        );
        assert_eq!(t.short_name(), "List");
        assert_eq!(t.namespace(), "uavcan.node.port");
        assert_eq!(t.root_namespace(), "uavcan");
        assert_eq!(t.port_kind(), "subject");
    }

    #[test]
    fn test_max_bytes() {
        let t = DsdlType::service(
            "uavcan.node.GetInfo",
            TypeVersion::new(1, 0),
            Span::fixed(0),
            Span::new(264, 2512).unwrap(),
            "430.GetInfo.1.0.dsdl",
        );
        assert_eq!(t.max_bytes(), MaxBytes::Service { request: 0, response: 314 });
        assert_eq!(t.port_kind(), "service");
    }

    #[test]
    fn test_deserialize_message() {
        let json = r#"{
            "full_name": "uavcan.node.Heartbeat",
            "version": {"major": 1, "minor": 0},
            "fixed_port_id": 7509,
            "source_file_path": "uavcan/node/7509.Heartbeat.1.0.dsdl",
            "kind": "message",
            "bit_length_range": [56, 56]
        }"#;
        let t: DsdlType = serde_json::from_str(json).unwrap();
        assert_eq!(t.fixed_port_id, Some(7509));
        assert!(!t.deprecated);
        assert_eq!(t.max_bytes(), MaxBytes::Message(7));
    }

    #[test]
    fn test_deserialize_rejects_inverted_range() {
        let json = r#"{
            "full_name": "a.B",
            "version": {"major": 1, "minor": 0},
            "source_file_path": "B.1.0.dsdl",
            "kind": "service",
            "request": [16, 8],
            "response": [0, 0]
        }"#;
        assert!(serde_json::from_str::<DsdlType>(json).is_err());
    }
}
