//! Version envelope framing.
//!
//! Every payload written by this crate is prefixed with a five byte header
//! so that a reader can tell which record version produced it.
//!
//! # Wire Format
//!
//! ```text
//! +---------+---------+---------+---------+--------+-------------------+
//! | Ver[0]  | Ver[1]  | Ver[2]  | Ver[3]  | Marker | payload ...       |
//! | u32 big-endian                        | 0xAA   | opaque document   |
//! +---------+---------+---------+---------+--------+-------------------+
//! ```
//!
//! Data without a valid header is legacy (unversioned) and reports version 0.
//! Detection only looks at the marker byte, so a legacy payload whose fifth
//! byte happens to be `0xAA` is read as versioned. Already persisted legacy
//! data depends on exactly this rule.
//!
//! # Example
//!
//! ```
//! use versioned_codec::envelope::EnvelopeHeader;
//!
//! let framed = EnvelopeHeader::encode(b"payload", 3);
//! assert_eq!(framed.len(), b"payload".len() + EnvelopeHeader::SIZE);
//!
//! let header = EnvelopeHeader::decode(&framed);
//! assert_eq!(header.version, 3);
//! assert_eq!(&framed[header.payload_offset..], b"payload");
//!
//! // Too short to carry a header: legacy.
//! let legacy = EnvelopeHeader::decode(&[1, 2, 3]);
//! assert!(legacy.is_legacy());
//! ```

use log::trace;

/// Version read from (or written to) the front of a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeHeader {
    /// Version number; 0 for legacy data.
    pub version: u32,
    /// Where the payload starts inside the decoded buffer.
    pub payload_offset: usize,
}

impl EnvelopeHeader {
    /// Marker byte that follows the version.
    pub const MARKER: u8 = 0xAA;

    /// Size of the header in bytes.
    pub const SIZE: usize = 5; // 4 (version) + 1 (marker)

    /// Version reported for header-less data.
    pub const LEGACY_VERSION: u32 = 0;

    /// Header describing unversioned data.
    pub const fn legacy() -> Self {
        Self {
            version: Self::LEGACY_VERSION,
            payload_offset: 0,
        }
    }

    /// Check whether the data is framed by the legacy rule.
    pub fn is_legacy(&self) -> bool {
        self.version == Self::LEGACY_VERSION && self.payload_offset == 0
    }

    /// Serialize the header to bytes.
    pub fn to_bytes(version: u32) -> [u8; Self::SIZE] {
        let [a, b, c, d] = version.to_be_bytes();
        [a, b, c, d, Self::MARKER]
    }

    /// Prepend the header for `version` to `payload`.
    pub fn encode(payload: &[u8], version: u32) -> Vec<u8> {
        let mut framed = Vec::with_capacity(payload.len() + Self::SIZE);
        framed.extend_from_slice(&Self::to_bytes(version));
        framed.extend_from_slice(payload);
        framed
    }

    /// Read the header, falling back to legacy when none is present.
    pub fn decode(data: &[u8]) -> Self {
        if data.len() < Self::SIZE {
            trace!("envelope: {} bytes is too short for a header, treating as legacy", data.len());
            return Self::legacy();
        }
        if data[4] != Self::MARKER {
            trace!("envelope: marker byte is {:#04x}, treating as legacy", data[4]);
            return Self::legacy();
        }
        let version = u32::from_be_bytes([data[0], data[1], data[2], data[3]]);
        Self {
            version,
            payload_offset: Self::SIZE,
        }
    }

    /// Split `data` into its header and payload slice.
    pub fn split(data: &[u8]) -> (Self, &[u8]) {
        let header = Self::decode(data);
        (header, &data[header.payload_offset..])
    }
}
