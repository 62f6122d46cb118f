//! # gzhead Core
//!
//! Core components for the gzhead header codec.
//!
//! - [`reader`]: Exact-length byte reader that records what it consumes
//! - [`crc`]: CRC-32 and the truncated gzip header CRC
//! - [`text`]: Latin-1 conversion for header strings
//! - [`error`]: Error types
//!
//! ## Example
//!
//! ```rust
//! use gzhead_core::crc::{Crc32, header_crc16};
//! use gzhead_core::reader::ByteReader;
//!
//! let mut reader = ByteReader::new(&b"\x1f\x8b\x08"[..]);
//! let magic = reader.read(2).unwrap();
//! assert_eq!(magic, &[0x1F, 0x8B]);
//!
//! assert_eq!(Crc32::compute(b"Hello, World!"), 0xEC4AC3D0);
//! assert_eq!(header_crc16(b"Hello, World!"), 0xC3D0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod crc;
pub mod error;
pub mod reader;
pub mod text;

// Re-exports for convenience
pub use crc::{Crc32, header_crc16};
pub use error::{GzheadError, Result};
pub use reader::ByteReader;
