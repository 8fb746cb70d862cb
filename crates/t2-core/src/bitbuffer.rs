use std::fmt;

/// MSB-first bit cursor over a byte vector.
///
/// Signaling records are packed field by field through `write_bits`; the
/// cursor position doubles as the running bit offset, so a caller can assert
/// that a fully packed record has exactly its declared width.
pub struct BitBuffer {
    buffer: Vec<u8>,
    pos: usize, // next bit offset for read/write
    len: usize, // bits at or after this are out of bounds
}

impl BitBuffer {
    /// Create a zeroed buffer capable of holding exactly `len_bits` bits.
    pub fn new(len_bits: usize) -> Self {
        BitBuffer {
            buffer: vec![0; len_bits.div_ceil(8)],
            pos: 0,
            len: len_bits,
        }
    }

    /// Construct a BitBuffer from a slice with one bit value (0 or 1) per byte.
    pub fn from_bitarr(bits: &[u8]) -> Self {
        let mut buf = BitBuffer::new(bits.len());
        for &b in bits {
            buf.write_bit(b);
        }
        buf.pos = 0;
        buf
    }

    /// Construct a BitBuffer directly from a string of '0'/'1' characters.
    /// Panics if any other character is encountered.
    pub fn from_bitstr(bitstr: &str) -> Self {
        let mut buf = BitBuffer::new(bitstr.len());
        for c in bitstr.chars() {
            match c {
                '0' => buf.write_bit(0),
                '1' => buf.write_bit(1),
                other => panic!("from_bitstr: invalid character `{}`; only '0' or '1' allowed", other),
            }
        }
        buf.pos = 0;
        buf
    }

    /// Write a single bit at pos, advancing the cursor.
    pub fn write_bit(&mut self, value: u8) {
        assert!(value == 0 || value == 1, "write_bit: value must be 0 or 1");
        assert!(self.pos < self.len, "write_bit would exceed buffer end");

        let index = self.pos / 8;
        let shift = 7 - (self.pos % 8);
        self.buffer[index] &= !(1 << shift);
        self.buffer[index] |= value << shift;
        self.pos += 1;
    }

    /// Write up to 64 bits MSB-first, advancing pos. Panics if the value does
    /// not fit in `num_bits` or the write would exceed the buffer end.
    pub fn write_bits(&mut self, value: u64, num_bits: usize) {
        assert!(num_bits <= 64, "can only write up to 64 bits");
        assert!(
            num_bits == 64 || value >> num_bits == 0,
            "value exceeds num_bits {} {}",
            value,
            num_bits
        );
        assert!(self.pos + num_bits <= self.len, "write would exceed buffer end");

        for n in (0..num_bits).rev() {
            self.write_bit(((value >> n) & 1) as u8);
        }
    }

    /// Write an arbitrary amount of zero-bits.
    pub fn write_zeroes(&mut self, num_bits: usize) {
        for _ in 0..num_bits {
            self.write_bit(0);
        }
    }

    /// Read one bit at pos, advancing on success.
    pub fn read_bit(&mut self) -> Option<u8> {
        if self.pos >= self.len {
            return None;
        }
        let bit = (self.buffer[self.pos / 8] >> (7 - (self.pos % 8))) & 1;
        self.pos += 1;
        Some(bit)
    }

    /// Read `num_bits` (up to 64) at pos MSB-first, advancing on success.
    pub fn read_bits(&mut self, num_bits: usize) -> Option<u64> {
        if num_bits > 64 || self.pos + num_bits > self.len {
            return None;
        }
        let mut v = 0u64;
        for _ in 0..num_bits {
            v = (v << 1) | self.read_bit()? as u64;
        }
        Some(v)
    }

    /// Copy the whole buffer content into `out` as one bit value per byte.
    /// `out` must hold exactly `get_len()` entries. Does not move the cursor.
    pub fn to_bitarr(&self, out: &mut [u8]) {
        assert!(out.len() == self.len, "to_bitarr: output slice length mismatch");
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = (self.buffer[i / 8] >> (7 - (i % 8))) & 1;
        }
    }

    /// Render the whole buffer as a String of '0'/'1' characters.
    pub fn to_bitstr(&self) -> String {
        let mut s = String::with_capacity(self.len);
        for i in 0..self.len {
            let bit = (self.buffer[i / 8] >> (7 - (i % 8))) & 1;
            s.push(if bit == 1 { '1' } else { '0' });
        }
        s
    }

    /// Total buffer length in bits.
    pub fn get_len(&self) -> usize {
        self.len
    }

    /// Number of bits left between pos and the end.
    pub fn get_len_remaining(&self) -> usize {
        self.len - self.pos
    }

    /// Current cursor position in bits.
    pub fn get_pos(&self) -> usize {
        self.pos
    }

    /// Move the cursor to an absolute bit offset.
    pub fn seek(&mut self, offset: usize) {
        assert!(offset <= self.len, "seek out of bounds: got {}, len {}", offset, self.len);
        self.pos = offset;
    }
}

impl fmt::Debug for BitBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitBuffer {{ ^{} of {} {} }}", self.pos, self.len, self.to_bitstr())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_byte_read_write() {
        let mut bb = BitBuffer::new(16);
        bb.write_bits(0xAB, 8);
        bb.write_bits(0xCD, 8);
        bb.seek(0);
        assert_eq!(bb.read_bits(8).unwrap(), 0xAB);
        assert_eq!(bb.read_bits(8).unwrap(), 0xCD);
    }

    #[test]
    fn test_partial_boundary_read_write() {
        let mut bb = BitBuffer::new(16);
        bb.write_bits(0xA, 4);
        bb.write_bits(0x5, 4);
        bb.write_bits(0xFF, 8);
        bb.seek(0);
        assert_eq!(bb.read_bits(4).unwrap(), 0xA);
        assert_eq!(bb.read_bits(4).unwrap(), 0x5);
        assert_eq!(bb.read_bits(8).unwrap(), 0xFF);
    }

    #[test]
    fn test_read_overflow() {
        let mut bb = BitBuffer::new(10);
        assert!(bb.read_bits(11).is_none());
        assert_eq!(bb.read_bits(0).unwrap(), 0);
    }

    #[test]
    #[should_panic(expected = "write would exceed buffer end")]
    fn test_write_overflow() {
        let mut bb = BitBuffer::new(10);
        bb.write_bits(1, 11);
    }

    #[test]
    #[should_panic(expected = "value exceeds num_bits")]
    fn test_value_above_num_bits() {
        let mut bb = BitBuffer::new(4);
        bb.write_bits(0b11111, 4);
    }

    #[test]
    fn test_unaligned_write_across_bytes() {
        let mut bb = BitBuffer::new(48);
        bb.seek(5);
        let pattern: u64 = 0b10_1010_1111_0001_0010;
        bb.write_bits(pattern, 20);
        bb.seek(5);
        assert_eq!(bb.read_bits(20).unwrap(), pattern);
    }

    #[test]
    fn test_bitstr_roundtrip() {
        let s = "101100111000101";
        let bb = BitBuffer::from_bitstr(s);
        assert_eq!(bb.to_bitstr(), s);
        assert_eq!(bb.get_len(), 15);
    }

    #[test]
    fn test_to_bitarr() {
        let bb = BitBuffer::from_bitstr("10110011");
        let mut arr = vec![0u8; 8];
        bb.to_bitarr(&mut arr);
        assert_eq!(arr, vec![1, 0, 1, 1, 0, 0, 1, 1]);
    }

    #[test]
    fn test_bitarr_roundtrip() {
        let bits = [1u8, 0, 0, 1, 1, 1, 0, 1, 0, 1, 1];
        let bb = BitBuffer::from_bitarr(&bits);
        let mut out = vec![0u8; bits.len()];
        bb.to_bitarr(&mut out);
        assert_eq!(out, bits);
    }

    #[test]
    fn test_pos_tracks_field_widths() {
        let mut bb = BitBuffer::new(64);
        bb.write_bits(3, 8);
        bb.write_bits(1, 1);
        bb.write_bits(0x7FFF, 18);
        assert_eq!(bb.get_pos(), 27);
        assert_eq!(bb.get_len_remaining(), 37);
    }
}
