//! CRC-32 as used by gzip.
//!
//! - **CRC-32 (ISO 3309)**: the checksum gzip uses for its trailer and, truncated
//!   to 16 bits, for the optional FHCRC header checksum.
//!
//! Inputs of 16 bytes or more go through a slicing-by-8 loop that consumes
//! eight bytes per step from eight pre-computed tables; shorter inputs use the
//! classic single-table loop.

/// Reflected CRC-32 polynomial.
const POLY: u32 = 0xEDB88320;

/// CRC-32 slicing-by-8 lookup tables. `CRC32_TABLES[0]` is the classic table.
const CRC32_TABLES: [[u32; 256]; 8] = {
    let mut tables = [[0u32; 256]; 8];

    let mut i = 0usize;
    while i < 256 {
        let mut crc = i as u32;
        let mut j = 0;
        while j < 8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
            j += 1;
        }
        tables[0][i] = crc;
        i += 1;
    }

    let mut t = 1;
    while t < 8 {
        let mut i = 0usize;
        while i < 256 {
            let prev = tables[t - 1][i];
            tables[t][i] = tables[0][(prev & 0xFF) as usize] ^ (prev >> 8);
            i += 1;
        }
        t += 1;
    }

    tables
};

/// CRC-32 calculator (ISO 3309).
///
/// - Polynomial: 0x04C11DB7 (reflected: 0xEDB88320)
/// - Initial value: 0xFFFFFFFF
/// - Final XOR: 0xFFFFFFFF
///
/// # Example
///
/// ```
/// use gzhead_core::crc::Crc32;
///
/// let mut crc = Crc32::new();
/// crc.update(b"Hello, World!");
/// assert_eq!(crc.finalize(), 0xEC4AC3D0);
/// ```
#[derive(Debug, Clone)]
pub struct Crc32 {
    crc: u32,
}

impl Crc32 {
    /// Create a new CRC-32 calculator.
    pub fn new() -> Self {
        Self { crc: 0xFFFFFFFF }
    }

    /// Reset the CRC to its initial state.
    pub fn reset(&mut self) {
        self.crc = 0xFFFFFFFF;
    }

    /// Update the CRC with more data.
    #[inline]
    pub fn update(&mut self, data: &[u8]) {
        if data.len() >= 16 {
            crc32_slice8(&mut self.crc, data);
        } else {
            crc32_sw(&mut self.crc, data);
        }
    }

    /// Get the current CRC value (without finalizing).
    #[inline(always)]
    pub fn value(&self) -> u32 {
        self.crc ^ 0xFFFFFFFF
    }

    /// Finalize and return the CRC value.
    #[inline(always)]
    pub fn finalize(self) -> u32 {
        self.crc ^ 0xFFFFFFFF
    }

    /// Compute CRC-32 for a slice in one call.
    #[inline]
    pub fn compute(data: &[u8]) -> u32 {
        let mut crc = Self::new();
        crc.update(data);
        crc.finalize()
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute the gzip FHCRC value: the low 16 bits of the CRC-32 of `data`.
#[inline]
pub fn header_crc16(data: &[u8]) -> u16 {
    (Crc32::compute(data) & 0xFFFF) as u16
}

#[inline]
fn crc32_sw(crc: &mut u32, data: &[u8]) {
    for &byte in data {
        let index = ((*crc ^ byte as u32) & 0xFF) as usize;
        *crc = CRC32_TABLES[0][index] ^ (*crc >> 8);
    }
}

#[inline]
fn crc32_slice8(crc: &mut u32, data: &[u8]) {
    let mut c = *crc;
    let mut chunks = data.chunks_exact(8);

    for bytes in &mut chunks {
        let crc_xor = c ^ u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);

        c = CRC32_TABLES[7][(crc_xor & 0xFF) as usize]
            ^ CRC32_TABLES[6][((crc_xor >> 8) & 0xFF) as usize]
            ^ CRC32_TABLES[5][((crc_xor >> 16) & 0xFF) as usize]
            ^ CRC32_TABLES[4][(crc_xor >> 24) as usize]
            ^ CRC32_TABLES[3][bytes[4] as usize]
            ^ CRC32_TABLES[2][bytes[5] as usize]
            ^ CRC32_TABLES[1][bytes[6] as usize]
            ^ CRC32_TABLES[0][bytes[7] as usize];
    }

    *crc = c;
    crc32_sw(crc, chunks.remainder());
}
