//! # gzhead
//!
//! GZIP member header codec (RFC 1952).
//!
//! Decodes the header at the start of a gzip stream into a [`GzipHeader`],
//! including the optional FEXTRA subfields, original filename, comment and
//! FHCRC header checksum, and encodes it back byte for byte. The compressed
//! payload that follows is never touched.
//!
//! ```text
//! +---+---+----+-----+---+---+---+---+-----+----+
//! |ID1|ID2| CM | FLG |     MTIME     | XFL | OS |
//! +---+---+----+-----+---+---+---+---+-----+----+
//!  [XLEN | subfields...]   if FEXTRA
//!  [file name ... \0]      if FNAME
//!  [comment ... \0]        if FCOMMENT
//!  [CRC16]                 if FHCRC
//! ```
//!
//! ## Example
//!
//! ```rust
//! use gzhead::{Field, GzipHeader};
//! use std::io::Cursor;
//!
//! let mut header = GzipHeader::new();
//! header.set_comment(Some("built nightly".into())).unwrap();
//! header
//!     .set_extra_fields(Some(vec![Field::new(b"AP", b"v1".to_vec()).unwrap()]))
//!     .unwrap();
//! header.set_checksum_flag(true);
//!
//! let mut stream = Cursor::new(header.to_bytes());
//! let decoded = GzipHeader::read(&mut stream).unwrap();
//! assert_eq!(decoded.comment(), Some("built nightly"));
//! assert_eq!(decoded, header);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod field;
pub mod header;
pub mod os;

// Re-exports
pub use field::Field;
pub use gzhead_core::error::{GzheadError, Result};
pub use header::{CM_DEFLATE, FIXED_HEADER_LEN, GZIP_MAGIC, GzipHeader, OS_UNKNOWN, flags};
pub use os::os_name;
