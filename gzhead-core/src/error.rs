//! Error types for gzhead operations.
//!
//! Every failure in the header codec is reported through [`GzheadError`].
//! Nothing is recovered locally: a decode, encode or construction that hits
//! one of these aborts as a whole.

use std::io;
use thiserror::Error;

/// The main error type for gzhead operations.
#[derive(Debug, Error)]
pub enum GzheadError {
    /// I/O error from underlying reader/writer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Invalid magic number at the start of the stream.
    #[error("Invalid magic number: expected {expected:02x?}, found {found:02x?}")]
    InvalidMagic {
        /// Expected magic bytes.
        expected: Vec<u8>,
        /// Actual magic bytes found.
        found: Vec<u8>,
    },

    /// The source ran dry before a read could be satisfied.
    #[error("Unexpected end of stream: expected {expected} bytes, got {found}")]
    UnexpectedEof {
        /// Number of bytes requested.
        expected: usize,
        /// Number of bytes the source actually produced.
        found: usize,
    },

    /// Stored FHCRC value does not match the header bytes.
    #[error("Header CRC mismatch: expected {expected:#06x}, computed {computed:#06x}")]
    HeaderCrcMismatch {
        /// CRC16 stored in the stream.
        expected: u16,
        /// Low 16 bits of the CRC-32 over the header bytes.
        computed: u16,
    },

    /// Extra subfield identifier is not exactly two bytes.
    #[error("Invalid extra field ids: expected 2 bytes, got {len}")]
    InvalidFieldIds {
        /// Length of the rejected identifier.
        len: usize,
    },

    /// A subfield runs past the declared FEXTRA length.
    #[error("Malformed extra field: subfield at offset {offset} overruns declared length {declared}")]
    MalformedExtra {
        /// XLEN as declared in the stream.
        declared: u16,
        /// Offset of the offending subfield within the FEXTRA section.
        offset: usize,
    },

    /// A length does not fit its 16-bit wire slot.
    #[error("Field too long: {len} bytes exceeds maximum {max}")]
    FieldTooLong {
        /// Length that was requested.
        len: usize,
        /// Largest length the format can carry.
        max: usize,
    },

    /// Text cannot be stored as a latin-1 C string.
    #[error("Unencodable text: character {ch:?} cannot be stored in a gzip header")]
    UnencodableText {
        /// The offending character.
        ch: char,
    },
}

/// Result type alias for gzhead operations.
pub type Result<T> = std::result::Result<T, GzheadError>;

impl GzheadError {
    /// Create an invalid magic error.
    pub fn invalid_magic(expected: impl Into<Vec<u8>>, found: impl Into<Vec<u8>>) -> Self {
        Self::InvalidMagic {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an unexpected EOF error.
    pub fn unexpected_eof(expected: usize, found: usize) -> Self {
        Self::UnexpectedEof { expected, found }
    }

    /// Create a header CRC mismatch error.
    pub fn header_crc_mismatch(expected: u16, computed: u16) -> Self {
        Self::HeaderCrcMismatch { expected, computed }
    }

    /// Create an invalid field ids error.
    pub fn invalid_field_ids(len: usize) -> Self {
        Self::InvalidFieldIds { len }
    }

    /// Create a malformed extra field error.
    pub fn malformed_extra(declared: u16, offset: usize) -> Self {
        Self::MalformedExtra { declared, offset }
    }

    /// Create a field too long error.
    pub fn field_too_long(len: usize, max: usize) -> Self {
        Self::FieldTooLong { len, max }
    }

    /// Create an unencodable text error.
    pub fn unencodable_text(ch: char) -> Self {
        Self::UnencodableText { ch }
    }
}
