//! FEXTRA subfields.

use gzhead_core::error::{GzheadError, Result};
use gzhead_core::reader::ByteReader;
use std::io::Read;

/// Length of a subfield identifier.
pub const FIELD_IDS_LEN: usize = 2;

/// Bytes a subfield spends on its identifier and length.
pub const FIELD_HEADER_LEN: usize = FIELD_IDS_LEN + 2;

/// Largest encoded FEXTRA section (XLEN is a u16).
pub const MAX_EXTRA_LEN: usize = u16::MAX as usize;

/// Largest payload a single subfield can carry and still fit in FEXTRA.
pub const MAX_FIELD_DATA_LEN: usize = MAX_EXTRA_LEN - FIELD_HEADER_LEN;

/// One FEXTRA subfield: a two-byte identifier (SI1, SI2) and its payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Field {
    ids: [u8; FIELD_IDS_LEN],
    data: Vec<u8>,
}

impl Field {
    /// Create a subfield.
    ///
    /// `ids` must be exactly two bytes and `data` must fit in a 16-bit length.
    ///
    /// ```
    /// use gzhead::Field;
    ///
    /// let field = Field::new(b"AP", b"payload".to_vec()).unwrap();
    /// assert_eq!(field.ids(), *b"AP");
    /// assert!(Field::new(b"APX", Vec::new()).is_err());
    /// ```
    pub fn new(ids: &[u8], data: Vec<u8>) -> Result<Self> {
        let ids: [u8; FIELD_IDS_LEN] = ids
            .try_into()
            .map_err(|_| GzheadError::invalid_field_ids(ids.len()))?;
        Self::from_parts(ids, data)
    }

    /// Create a subfield from an identifier that is already two bytes.
    pub fn from_parts(ids: [u8; FIELD_IDS_LEN], data: Vec<u8>) -> Result<Self> {
        if data.len() > MAX_FIELD_DATA_LEN {
            return Err(GzheadError::field_too_long(data.len(), MAX_FIELD_DATA_LEN));
        }
        Ok(Self { ids, data })
    }

    /// Subfield identifier.
    pub fn ids(&self) -> [u8; FIELD_IDS_LEN] {
        self.ids
    }

    /// Subfield payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the subfield, returning its payload.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Bytes this subfield occupies on the wire.
    pub fn encoded_len(&self) -> usize {
        FIELD_HEADER_LEN + self.data.len()
    }

    /// Append the wire form to `out`.
    pub(crate) fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.ids);
        // Bounded by MAX_FIELD_DATA_LEN at construction
        out.extend_from_slice(&(self.data.len() as u16).to_le_bytes());
        out.extend_from_slice(&self.data);
    }
}

/// Total encoded length of a subfield sequence, checked against XLEN.
pub(crate) fn extra_len(fields: &[Field]) -> Result<u16> {
    let total: usize = fields.iter().map(Field::encoded_len).sum();
    u16::try_from(total).map_err(|_| GzheadError::field_too_long(total, MAX_EXTRA_LEN))
}

/// Parse an FEXTRA section: XLEN followed by subfields.
///
/// A subfield whose header or payload would run past XLEN is rejected before
/// its payload is read.
pub(crate) fn read_extra<R: Read>(reader: &mut ByteReader<R>) -> Result<Vec<Field>> {
    let xlen = reader.read_u16_le()?;
    let mut remaining = xlen as usize;
    let mut fields = Vec::new();

    while remaining > 0 {
        let offset = xlen as usize - remaining;
        if remaining < FIELD_HEADER_LEN {
            return Err(GzheadError::malformed_extra(xlen, offset));
        }

        let ids = reader.read_array::<FIELD_IDS_LEN>()?;
        let len = reader.read_u16_le()? as usize;
        if FIELD_HEADER_LEN + len > remaining {
            return Err(GzheadError::malformed_extra(xlen, offset));
        }

        let data = reader.read(len)?.to_vec();
        fields.push(Field::from_parts(ids, data)?);
        remaining -= FIELD_HEADER_LEN + len;
    }

    Ok(fields)
}
