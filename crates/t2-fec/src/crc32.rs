//! CRC-32 over unpacked bit arrays
//!
//! Polynomial 0x04C11DB7, all-ones initial state, no reflection, no final
//! XOR. Bits are processed MSB-first, matching the order in which signaling
//! fields are packed.

const CRC_POLY: u32 = 0x04C11DB7;

/// Compute the CRC over `bits`, one bit value per entry.
pub fn crc32_bits(bits: &[u8]) -> u32 {
    let mut crc: u32 = 0xffff_ffff;
    for &bit in bits {
        let b = bit ^ ((crc >> 31) as u8 & 0x01);
        crc <<= 1;
        if b != 0 {
            crc ^= CRC_POLY;
        }
    }
    crc
}

/// Compute the CRC over the current contents of `bits` and append it as
/// 32 bit entries, MSB first.
pub fn append_crc32(bits: &mut Vec<u8>) {
    let crc = crc32_bits(bits);
    for n in (0..32).rev() {
        bits.push(((crc >> n) & 1) as u8);
    }
}
