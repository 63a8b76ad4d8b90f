//! Size and frame count calculation
//!
//! Converts the bit length range of a serialized type into byte sizes and the
//! number of CAN frames needed to carry one transfer of that size.
//!
//! Each frame reserves one tail byte for segmentation metadata. Transfers that
//! do not fit into a single frame additionally carry a two byte transfer CRC,
//! which is spread over the generated frames together with the payload. A
//! payload that fits into one frame carries no CRC at all, so the frame count
//! jumps from 1 to 2 right at the MTU boundary.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DocsError;

/// Bytes reserved in every frame for segmentation metadata
pub const TAIL_BYTE_OVERHEAD: u64 = 1;

/// Bytes appended once to a multi-frame transfer
pub const TRANSFER_CRC_OVERHEAD: u64 = 2;

/// Classic CAN frame size
pub const CLASSIC_CAN_MTU: u64 = 8;

/// CAN FD frame size
pub const CAN_FD_MTU: u64 = 64;

/// Minimum number of whole bytes that hold `bits` bits.
pub fn bits_to_bytes(bits: u64) -> u64 {
    bits.div_ceil(8)
}

/// Number of frames needed to transfer `byte_length` bytes at the given MTU.
///
/// `mtu` must be at least 2.
pub fn bytes_to_frame_count(byte_length: u64, mtu: u64) -> u64 {
    debug_assert!(mtu > TAIL_BYTE_OVERHEAD, "MTU must leave room for payload");
    let payload_capacity = mtu - TAIL_BYTE_OVERHEAD;
    if byte_length <= payload_capacity {
        1
    } else {
        (byte_length + TRANSFER_CRC_OVERHEAD).div_ceil(payload_capacity)
    }
}

/// An inclusive `[min, max]` range of sizes.
///
/// Deserializes from a `[min, max]` pair and rejects inverted ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "(u64, u64)", into = "(u64, u64)")]
pub struct Span {
    pub min: u64,
    pub max: u64,
}

/// Bit length range of one serialized type
pub type BitLengthRange = Span;

impl Span {
    /// Create a span, checking that `min <= max`
    pub fn new(min: u64, max: u64) -> Result<Self, DocsError> {
        if min > max {
            return Err(DocsError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// A span of one value
    pub fn fixed(value: u64) -> Self {
        Self { min: value, max: value }
    }

    /// Whether both endpoints are equal
    pub fn is_scalar(&self) -> bool {
        self.min == self.max
    }

    /// Apply a monotonic function to both endpoints
    pub fn map(self, f: impl Fn(u64) -> u64) -> Self {
        Self {
            min: f(self.min),
            max: f(self.max),
        }
    }
}

impl TryFrom<(u64, u64)> for Span {
    type Error = DocsError;

    fn try_from((min, max): (u64, u64)) -> Result<Self, Self::Error> {
        Self::new(min, max)
    }
}

impl From<Span> for (u64, u64) {
    fn from(span: Span) -> Self {
        (span.min, span.max)
    }
}

/// Scalar when degenerate, `[min, max]` otherwise
impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_scalar() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "[{}, {}]", self.min, self.max)
        }
    }
}

/// All sizes derived from one bit length range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthSummary {
    pub bits: Span,
    pub bytes: Span,
    pub frames_classic: Span,
    pub frames_fd: Span,
}

impl LengthSummary {
    pub fn from_bits(bits: BitLengthRange) -> Self {
        let bytes = bits.map(bits_to_bytes);
        Self {
            bits,
            bytes,
            frames_classic: frame_counts(bytes, CLASSIC_CAN_MTU),
            frames_fd: frame_counts(bytes, CAN_FD_MTU),
        }
    }

    /// The four spans in table column order
    pub fn columns(&self) -> [Span; 4] {
        [self.bits, self.bytes, self.frames_classic, self.frames_fd]
    }
}

/// Frame counts for both ends of a byte range
pub fn frame_counts(bytes: Span, mtu: u64) -> Span {
    bytes.map(|b| bytes_to_frame_count(b, mtu))
}
