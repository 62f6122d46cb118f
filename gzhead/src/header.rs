//! GZIP header parsing and writing.

use crate::field::{self, Field};
use gzhead_core::crc::header_crc16;
use gzhead_core::error::{GzheadError, Result};
use gzhead_core::reader::ByteReader;
use gzhead_core::text;
use std::io::{Read, Write};
use std::time::{SystemTime, UNIX_EPOCH};

/// GZIP magic bytes.
pub const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];

/// GZIP compression method: DEFLATE.
pub const CM_DEFLATE: u8 = 8;

/// Operating system code for "unknown".
pub const OS_UNKNOWN: u8 = 255;

/// Size of the fixed part of the header, magic included.
pub const FIXED_HEADER_LEN: usize = 10;

/// GZIP header flags.
pub mod flags {
    /// Text file.
    pub const FTEXT: u8 = 0x01;
    /// Header CRC present.
    pub const FHCRC: u8 = 0x02;
    /// Extra field present.
    pub const FEXTRA: u8 = 0x04;
    /// Original filename present.
    pub const FNAME: u8 = 0x08;
    /// Comment present.
    pub const FCOMMENT: u8 = 0x10;
}

/// GZIP member header.
///
/// The flag byte is private: FEXTRA, FNAME and FCOMMENT follow the presence
/// of their fields and only change through the matching setters, and FHCRC
/// and FTEXT have their own setters. Other bits read from a stream are kept
/// as they are.
///
/// # Example
///
/// ```
/// use gzhead::{GzipHeader, flags};
///
/// let mut header = GzipHeader::new();
/// header.set_filename(Some("test_filename".into())).unwrap();
/// assert_ne!(header.flags() & flags::FNAME, 0);
///
/// let bytes = header.to_bytes();
/// let decoded = GzipHeader::from_bytes(&bytes).unwrap();
/// assert_eq!(decoded, header);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GzipHeader {
    /// Compression method (8 for DEFLATE).
    pub compression_method: u8,
    /// Modification time (Unix timestamp, 0 if unavailable).
    pub modification_time: u32,
    /// Extra flags (compression level hint).
    pub extra_flags: u8,
    /// Operating system.
    pub operating_system: u8,
    flags: u8,
    extra_fields: Option<Vec<Field>>,
    filename: Option<String>,
    comment: Option<String>,
}

impl Default for GzipHeader {
    fn default() -> Self {
        Self {
            compression_method: CM_DEFLATE,
            modification_time: 0,
            extra_flags: 0,
            operating_system: OS_UNKNOWN,
            flags: 0,
            extra_fields: None,
            filename: None,
            comment: None,
        }
    }
}

impl GzipHeader {
    /// Create a new GZIP header with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a header with filename.
    pub fn with_filename(filename: &str) -> Result<Self> {
        let mut header = Self::default();
        header.set_filename(Some(filename.to_string()))?;
        Ok(header)
    }

    /// Set the modification time to now.
    pub fn with_mtime_now(mut self) -> Self {
        self.modification_time = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as u32)
            .unwrap_or(0);
        self
    }

    /// Raw flag byte.
    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Whether an FHCRC checksum is written after the header.
    pub fn has_checksum(&self) -> bool {
        self.flags & flags::FHCRC != 0
    }

    /// Whether the FTEXT hint is set.
    pub fn is_text(&self) -> bool {
        self.flags & flags::FTEXT != 0
    }

    /// Extra subfields (if FEXTRA flag set).
    pub fn extra_fields(&self) -> Option<&[Field]> {
        self.extra_fields.as_deref()
    }

    /// Original filename (if FNAME flag set).
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Comment (if FCOMMENT flag set).
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Replace the extra subfields, keeping FEXTRA in step.
    ///
    /// Fails if the subfields do not fit in a 16-bit XLEN; the header is left
    /// unchanged in that case.
    pub fn set_extra_fields(&mut self, fields: Option<Vec<Field>>) -> Result<()> {
        if let Some(fields) = &fields {
            field::extra_len(fields)?;
        }
        self.set_flag(flags::FEXTRA, fields.is_some());
        self.extra_fields = fields;
        Ok(())
    }

    /// Replace the filename, keeping FNAME in step.
    ///
    /// The name must be latin-1 without NUL characters.
    pub fn set_filename(&mut self, filename: Option<String>) -> Result<()> {
        if let Some(name) = &filename {
            text::check_cstr(name)?;
        }
        self.set_flag(flags::FNAME, filename.is_some());
        self.filename = filename;
        Ok(())
    }

    /// Replace the comment, keeping FCOMMENT in step.
    ///
    /// The comment must be latin-1 without NUL characters.
    pub fn set_comment(&mut self, comment: Option<String>) -> Result<()> {
        if let Some(comment) = &comment {
            text::check_cstr(comment)?;
        }
        self.set_flag(flags::FCOMMENT, comment.is_some());
        self.comment = comment;
        Ok(())
    }

    /// Turn the FHCRC header checksum on or off.
    pub fn set_checksum_flag(&mut self, enabled: bool) {
        self.set_flag(flags::FHCRC, enabled);
    }

    /// Turn the FTEXT hint on or off.
    pub fn set_text_flag(&mut self, enabled: bool) {
        self.set_flag(flags::FTEXT, enabled);
    }

    fn set_flag(&mut self, flag: u8, on: bool) {
        if on {
            self.flags |= flag;
        } else {
            self.flags &= !flag;
        }
    }

    /// The FHCRC value that [`to_bytes`](Self::to_bytes) would append, if enabled.
    pub fn header_crc(&self) -> Option<u16> {
        self.has_checksum()
            .then(|| header_crc16(&self.encode_without_crc()))
    }

    /// Number of bytes the encoded header occupies.
    pub fn encoded_len(&self) -> usize {
        let mut len = FIXED_HEADER_LEN;
        if let Some(fields) = &self.extra_fields {
            len += 2 + fields.iter().map(Field::encoded_len).sum::<usize>();
        }
        // Latin-1 invariant: one byte per char
        if let Some(name) = &self.filename {
            len += name.chars().count() + 1;
        }
        if let Some(comment) = &self.comment {
            len += comment.chars().count() + 1;
        }
        if self.has_checksum() {
            len += 2;
        }
        len
    }

    /// Encode the header.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = self.encode_without_crc();
        if self.has_checksum() {
            let crc = header_crc16(&out);
            out.extend_from_slice(&crc.to_le_bytes());
        }
        out
    }

    /// Write the header to a writer.
    pub fn write<W: Write>(&self, writer: &mut W) -> Result<()> {
        writer.write_all(&self.to_bytes())?;
        Ok(())
    }

    fn encode_without_crc(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());

        out.extend_from_slice(&GZIP_MAGIC);
        out.push(self.compression_method);
        out.push(self.flags);
        out.extend_from_slice(&self.modification_time.to_le_bytes());
        out.push(self.extra_flags);
        out.push(self.operating_system);

        if let Some(fields) = &self.extra_fields {
            // XLEN fits in u16, checked by set_extra_fields and read_extra
            let xlen: usize = fields.iter().map(Field::encoded_len).sum();
            out.extend_from_slice(&(xlen as u16).to_le_bytes());
            for field in fields {
                field.encode_into(&mut out);
            }
        }

        if let Some(name) = &self.filename {
            push_cstr(&mut out, name);
        }

        if let Some(comment) = &self.comment {
            push_cstr(&mut out, comment);
        }

        out
    }

    /// Read a GZIP header from a reader.
    ///
    /// On success the reader is left on the first byte after the header. Any
    /// failure discards everything parsed so far.
    pub fn read<R: Read>(reader: &mut R) -> Result<Self> {
        let mut reader = ByteReader::new(reader);

        let magic = reader.read_array::<2>()?;
        if magic != GZIP_MAGIC {
            return Err(GzheadError::invalid_magic(GZIP_MAGIC.to_vec(), magic.to_vec()));
        }

        let buf = reader.read_array::<8>()?;
        let compression_method = buf[0];
        let flags = buf[1];
        let modification_time = u32::from_le_bytes([buf[2], buf[3], buf[4], buf[5]]);
        let extra_flags = buf[6];
        let operating_system = buf[7];

        let extra_fields = if flags & flags::FEXTRA != 0 {
            Some(field::read_extra(&mut reader)?)
        } else {
            None
        };

        let filename = if flags & flags::FNAME != 0 {
            Some(text::decode_latin1(&reader.read_until_nul()?))
        } else {
            None
        };

        let comment = if flags & flags::FCOMMENT != 0 {
            Some(text::decode_latin1(&reader.read_until_nul()?))
        } else {
            None
        };

        if flags & flags::FHCRC != 0 {
            let computed = header_crc16(reader.buffer());
            let expected = reader.read_u16_le()?;
            if expected != computed {
                return Err(GzheadError::header_crc_mismatch(expected, computed));
            }
        }

        Ok(Self {
            compression_method,
            modification_time,
            extra_flags,
            operating_system,
            flags,
            extra_fields,
            filename,
            comment,
        })
    }

    /// Decode a header from the start of `data`.
    ///
    /// Bytes after the header are ignored.
    pub fn from_bytes(mut data: &[u8]) -> Result<Self> {
        Self::read(&mut data)
    }
}

/// Append a latin-1 string and its terminator.
fn push_cstr(out: &mut Vec<u8>, text: &str) {
    // Every char is <= U+00FF, checked by the setters or produced by decode
    out.extend(text.chars().map(|ch| ch as u8));
    out.push(0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn sample_field() -> Field {
        Field::new(&GZIP_MAGIC, b"extra data".to_vec()).unwrap()
    }

    #[test]
    fn test_gzip_magic() {
        assert_eq!(GZIP_MAGIC, [0x1F, 0x8B]);
    }

    #[test]
    fn test_gzip_header_default() {
        let header = GzipHeader::new();
        assert_eq!(header.compression_method, CM_DEFLATE);
        assert_eq!(header.flags(), 0);
        assert_eq!(header.modification_time, 0);
        assert_eq!(header.extra_flags, 0);
        assert_eq!(header.operating_system, OS_UNKNOWN);
        assert!(header.extra_fields().is_none());
        assert!(header.filename().is_none());
        assert!(header.comment().is_none());
        assert_eq!(
            header.to_bytes(),
            vec![0x1F, 0x8B, 8, 0, 0, 0, 0, 0, 0, 0xFF]
        );
    }

    #[test]
    fn test_gzip_header_with_filename() {
        let header = GzipHeader::with_filename("test.txt").unwrap();
        assert_eq!(header.flags() & flags::FNAME, flags::FNAME);
        assert_eq!(header.filename(), Some("test.txt"));
    }

    #[test]
    fn test_filename_roundtrip() {
        let mut header = GzipHeader::new();
        header.set_filename(Some("test_filename".into())).unwrap();

        let decoded = GzipHeader::from_bytes(&header.to_bytes()).unwrap();
        assert_eq!(decoded.filename(), Some("test_filename"));
        assert_ne!(decoded.flags() & flags::FNAME, 0);
        assert_eq!(decoded.compression_method, CM_DEFLATE);
        assert_eq!(decoded.modification_time, 0);
        assert_eq!(decoded.extra_flags, 0);
        assert_eq!(decoded.operating_system, OS_UNKNOWN);
        assert!(decoded.extra_fields().is_none());
        assert!(decoded.comment().is_none());
        assert!(!decoded.has_checksum());
    }

    #[test]
    fn test_extra_field_roundtrip() {
        let mut header = GzipHeader::new();
        header.set_extra_fields(Some(vec![sample_field()])).unwrap();

        let decoded = GzipHeader::from_bytes(&header.to_bytes()).unwrap();
        let fields = decoded.extra_fields().unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].ids(), [0x1F, 0x8B]);
        assert_eq!(fields[0].data(), b"extra data");
        assert_ne!(decoded.flags() & flags::FEXTRA, 0);
        assert_eq!(decoded, header);
    }

    #[test]
    fn test_setters_track_flags() {
        let mut header = GzipHeader::new();

        header.set_extra_fields(Some(Vec::new())).unwrap();
        header.set_filename(Some("a".into())).unwrap();
        header.set_comment(Some("b".into())).unwrap();
        assert_eq!(
            header.flags(),
            flags::FEXTRA | flags::FNAME | flags::FCOMMENT
        );

        header.set_filename(None).unwrap();
        assert_eq!(header.flags(), flags::FEXTRA | flags::FCOMMENT);
        assert!(header.filename().is_none());

        header.set_extra_fields(None).unwrap();
        header.set_comment(None).unwrap();
        assert_eq!(header.flags(), 0);
    }

    #[test]
    fn test_comment_getter_returns_value() {
        let mut header = GzipHeader::new();
        header.set_comment(Some("hello".into())).unwrap();
        assert_eq!(header.comment(), Some("hello"));
    }

    #[test]
    fn test_rejected_setter_leaves_header_unchanged() {
        let mut header = GzipHeader::with_filename("keep").unwrap();
        let before = header.clone();

        assert!(matches!(
            header.set_filename(Some("\u{20AC}".into())),
            Err(GzheadError::UnencodableText { .. })
        ));
        assert!(header.set_comment(Some("a\0b".into())).is_err());

        let big = Field::new(b"AB", vec![0; field::MAX_FIELD_DATA_LEN]).unwrap();
        let tiny = Field::new(b"CD", Vec::new()).unwrap();
        assert!(matches!(
            header.set_extra_fields(Some(vec![big, tiny])),
            Err(GzheadError::FieldTooLong { .. })
        ));

        assert_eq!(header, before);
    }

    #[test]
    fn test_checksum_toggle() {
        let mut header = GzipHeader::with_filename("data.txt").unwrap();
        let original = header.to_bytes();

        header.set_checksum_flag(true);
        let with_crc = header.to_bytes();
        assert_ne!(with_crc, original);
        assert_eq!(with_crc.len(), original.len() + 2);
        assert_eq!(with_crc[3], original[3] | flags::FHCRC);

        let crc = header.header_crc().unwrap();
        assert_eq!(&with_crc[with_crc.len() - 2..], &crc.to_le_bytes());
        assert_eq!(GzipHeader::from_bytes(&with_crc).unwrap(), header);

        header.set_checksum_flag(false);
        assert_eq!(header.to_bytes(), original);
        assert!(header.header_crc().is_none());
    }

    #[test]
    fn test_header_crc_known_value() {
        let mut header = GzipHeader::new();
        header.set_checksum_flag(true);
        let bytes = header.to_bytes();
        let expected = header_crc16(&[0x1F, 0x8B, 8, 2, 0, 0, 0, 0, 0, 0xFF]);
        assert_eq!(&bytes[10..], &expected.to_le_bytes());
    }

    #[test]
    fn test_checksum_mismatch() {
        let mut header = GzipHeader::with_filename("x").unwrap();
        header.set_checksum_flag(true);
        let mut bytes = header.to_bytes();
        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;

        let err = GzipHeader::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, GzheadError::HeaderCrcMismatch { .. }));
    }

    #[test]
    fn test_invalid_magic() {
        let mut bytes = GzipHeader::new().to_bytes();
        bytes[0] = 0x50;
        bytes[1] = 0x4B;
        let err = GzipHeader::from_bytes(&bytes).unwrap_err();
        assert!(matches!(err, GzheadError::InvalidMagic { .. }));

        // Only two bytes are needed to reject
        assert!(matches!(
            GzipHeader::from_bytes(&[0x00, 0x00]),
            Err(GzheadError::InvalidMagic { .. })
        ));
    }

    #[test]
    fn test_truncated_fixed_header() {
        let bytes = GzipHeader::new().to_bytes();
        for len in 0..FIXED_HEADER_LEN {
            let err = GzipHeader::from_bytes(&bytes[..len]).unwrap_err();
            assert!(
                matches!(err, GzheadError::UnexpectedEof { .. }),
                "len {}",
                len
            );
        }
    }

    #[test]
    fn test_unterminated_filename() {
        let bytes = GzipHeader::with_filename("name").unwrap().to_bytes();
        let err = GzipHeader::from_bytes(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, GzheadError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_latin1_text_roundtrip() {
        let mut header = GzipHeader::new();
        header.set_filename(Some("caf\u{e9}.txt".into())).unwrap();
        header.set_comment(Some("\u{ff}\u{80}".into())).unwrap();

        let bytes = header.to_bytes();
        assert_eq!(&bytes[10..19], b"caf\xe9.txt\0");
        assert_eq!(&bytes[19..], b"\xff\x80\0");
        assert_eq!(GzipHeader::from_bytes(&bytes).unwrap(), header);
    }

    #[test]
    fn test_all_sections_roundtrip() {
        let mut header = GzipHeader::new();
        header.modification_time = 0x5F5E_1000;
        header.extra_flags = 2;
        header.operating_system = 3;
        header.set_text_flag(true);
        header
            .set_extra_fields(Some(vec![
                sample_field(),
                Field::new(b"RA", vec![1, 0, 0x10, 0, 0xAA, 0xBB]).unwrap(),
            ]))
            .unwrap();
        header.set_filename(Some("archive.tar".into())).unwrap();
        header.set_comment(Some("nightly build".into())).unwrap();
        header.set_checksum_flag(true);

        let bytes = header.to_bytes();
        assert_eq!(bytes.len(), header.encoded_len());

        let decoded = GzipHeader::from_bytes(&bytes).unwrap();
        assert_eq!(decoded, header);
        assert!(decoded.is_text());
        assert_eq!(decoded.to_bytes(), bytes);
    }

    #[test]
    fn test_reserved_flag_bits_preserved() {
        let bytes = [0x1F, 0x8B, 8, 0xE0, 0, 0, 0, 0, 0, 0xFF];
        let header = GzipHeader::from_bytes(&bytes).unwrap();
        assert_eq!(header.flags(), 0xE0);
        assert_eq!(header.to_bytes(), bytes);
    }

    #[test]
    fn test_read_stops_at_payload() {
        let mut data = GzipHeader::with_filename("f").unwrap().to_bytes();
        let header_len = data.len();
        data.extend_from_slice(b"PAYLOAD");

        let mut cursor = Cursor::new(data);
        GzipHeader::read(&mut cursor).unwrap();
        assert_eq!(cursor.position() as usize, header_len);
    }

    #[test]
    fn test_write_matches_to_bytes() {
        let mut header = GzipHeader::with_filename("w").unwrap();
        header.set_checksum_flag(true);
        let mut out = Vec::new();
        header.write(&mut out).unwrap();
        assert_eq!(out, header.to_bytes());
    }
}
