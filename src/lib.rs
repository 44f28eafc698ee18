//! # unicode-util - Unicode Transcoding Library
//!
//! A small transcoding library converting between UTF-8, UCS-2, UCS-4, and
//! (decode-only) UTF-16 code unit sequences.
//!
//! The core is the [`codec`] module: pure, allocation-free functions that
//! translate one unit at a time with strict bounds checking and a uniform
//! failure signal. On top of it sits [`Converter`], a bulk driver that runs
//! the per-unit loop over whole buffers and attaches byte offsets to
//! failures, and [`self_test`], which verifies the UTF-8 round-trip law over
//! the full supported scalar range.
//!
//! ## Quick Start
//!
//! ```rust
//! use unicode_util::{Converter, Encoding};
//!
//! let converter = Converter::new(Encoding::Utf8, Encoding::Ucs4).unwrap();
//! let words = converter.convert("hi".as_bytes()).unwrap();
//! assert_eq!(words.len(), 8); // two native-endian 32-bit words
//! ```

#![deny(missing_docs)]

use std::fmt;

use serde::Serialize;

pub mod codec;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the conversion layer
///
/// The codec itself reports failure without classification; these variants
/// are reconstructed from the conversion loop's own bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Encoding name did not match any known encoding
    UnknownEncoding(String),
    /// The requested source/target pair has no conversion path
    UnsupportedConversion {
        /// Source encoding
        from: Encoding,
        /// Target encoding
        to: Encoding,
    },
    /// A unit at the given byte offset could not be converted
    ConversionFailed {
        /// Byte offset of the unit that failed
        offset: usize,
    },
    /// Self-test could not encode or decode the given scalar value
    SelfTestFailed {
        /// The scalar value that failed
        value: u32,
    },
    /// Self-test decoded a different value than it encoded
    RoundTripMismatch {
        /// The scalar value that was encoded
        value: u32,
        /// The scalar value that came back out
        decoded: u32,
    },
    /// Input exceeded the configured single-shot size limit
    InputTooLarge {
        /// The limit in bytes
        limit: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownEncoding(name) => write!(f, "Unknown encoding: {}", name),
            Error::UnsupportedConversion { from, to } => {
                write!(
                    f,
                    "Unsupported conversion from {} to {}",
                    from.name(),
                    to.name()
                )
            }
            Error::ConversionFailed { offset } => {
                write!(f, "Conversion failed at offset {}", offset)
            }
            Error::SelfTestFailed { value } => {
                write!(f, "Conversion of scalar value 0x{:08X} failed", value)
            }
            Error::RoundTripMismatch { value, decoded } => {
                write!(
                    f,
                    "Round-trip mismatch: 0x{:08X} decoded as 0x{:08X}",
                    value, decoded
                )
            }
            Error::InputTooLarge { limit } => {
                write!(f, "Input data too large (> {} bytes)", limit)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Code unit encodings the conversion layer knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// UTF-8 (variable length, 1-4 bytes per scalar value)
    Utf8,
    /// UTF-16 (one unit, or a surrogate pair; decode only)
    Utf16,
    /// UCS-2 (fixed 16-bit, Basic Multilingual Plane only)
    Ucs2,
    /// UCS-4 (fixed 32-bit scalar values, native endian on the wire)
    Ucs4,
}

impl Encoding {
    /// The selection name of this encoding, as accepted by [`FromStr`]
    ///
    /// [`FromStr`]: std::str::FromStr
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf16 => "utf16",
            Encoding::Ucs2 => "ucs2",
            Encoding::Ucs4 => "ucs4",
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Encoding {
    type Err = Error;

    // Selection names are exact and case-sensitive.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "utf8" => Ok(Encoding::Utf8),
            "utf16" => Ok(Encoding::Utf16),
            "ucs2" => Ok(Encoding::Ucs2),
            "ucs4" => Ok(Encoding::Ucs4),
            _ => Err(Error::UnknownEncoding(s.to_string())),
        }
    }
}

/// Bulk converter driving the codec once per unit over a whole buffer
///
/// Supports the UTF-8 ⇄ UCS-4 paths. UCS-4 words are read and written in
/// native byte order. Failures carry the byte offset at which the loop
/// stopped; the returned error discards any partial output.
pub struct Converter {
    from: Encoding,
    to: Encoding,
}

impl Converter {
    /// Create a converter for the given pair, or fail if no path exists
    pub fn new(from: Encoding, to: Encoding) -> Result<Self> {
        match (from, to) {
            (Encoding::Utf8, Encoding::Ucs4) | (Encoding::Ucs4, Encoding::Utf8) => {
                Ok(Self { from, to })
            }
            _ => Err(Error::UnsupportedConversion { from, to }),
        }
    }

    /// Get source encoding
    pub fn from_encoding(&self) -> Encoding {
        self.from
    }

    /// Get target encoding
    pub fn to_encoding(&self) -> Encoding {
        self.to
    }

    /// Convert the full input buffer
    pub fn convert(&self, input: &[u8]) -> Result<Vec<u8>> {
        match (self.from, self.to) {
            (Encoding::Utf8, Encoding::Ucs4) => utf8_to_ucs4_buffer(input),
            (Encoding::Ucs4, Encoding::Utf8) => ucs4_to_utf8_buffer(input),
            (from, to) => Err(Error::UnsupportedConversion { from, to }),
        }
    }
}

fn utf8_to_ucs4_buffer(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(input.len() * 4);
    let mut offset = 0;
    while offset < input.len() {
        let (scalar, consumed) =
            codec::utf8_to_ucs4(&input[offset..]).ok_or(Error::ConversionFailed { offset })?;
        output.extend_from_slice(&scalar.to_ne_bytes());
        offset += consumed;
    }
    Ok(output)
}

fn ucs4_to_utf8_buffer(input: &[u8]) -> Result<Vec<u8>> {
    let mut output = Vec::with_capacity(input.len());
    let mut chunks = input.chunks_exact(4);
    let mut offset = 0;
    let mut encoded = [0u8; 4];
    for chunk in &mut chunks {
        let scalar = u32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        let written =
            codec::ucs4_to_utf8(scalar, &mut encoded).ok_or(Error::ConversionFailed { offset })?;
        output.extend_from_slice(&encoded[..written]);
        offset += 4;
    }
    if !chunks.remainder().is_empty() {
        // Trailing bytes that do not form a whole 32-bit word.
        return Err(Error::ConversionFailed { offset });
    }
    Ok(output)
}

/// Scalar values covered by [`self_test`]: `[0, 0x1FFFFF)`, stopping one
/// short of the 4-byte encoding ceiling
pub const SELF_TEST_RANGE: std::ops::Range<u32> = 0..0x1F_FFFF;

/// Verify the UTF-8 round-trip law over [`SELF_TEST_RANGE`]
///
/// Encodes every scalar value in the range, decodes it back, and reports
/// the first failure: an encode or decode that produced nothing is an
/// [`Error::SelfTestFailed`], a decode that produced a different value is an
/// [`Error::RoundTripMismatch`].
pub fn self_test() -> Result<()> {
    let mut buf = [0u8; 4];
    for value in SELF_TEST_RANGE {
        let len =
            codec::ucs4_to_utf8(value, &mut buf).ok_or(Error::SelfTestFailed { value })?;
        let (decoded, _) =
            codec::utf8_to_ucs4(&buf[..len]).ok_or(Error::SelfTestFailed { value })?;
        if decoded != value {
            return Err(Error::RoundTripMismatch { value, decoded });
        }
    }
    Ok(())
}
