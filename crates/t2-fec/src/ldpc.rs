//! Shortened LDPC inner code for L1 signaling
//!
//! The encoder expands a parity address table into a flat schedule of
//! (parity address, data index) pairs at construction time. Encoding is
//! then a pass of XOR accumulations followed by the ascending prefix XOR
//! that turns the accumulator contents into the final parity bits.

use tracing::trace;

pub struct LdpcEncoder {
    nbch: usize,
    nldpc: usize,
    // One entry per schedule step: parity address and data bit index
    p: Vec<u32>,
    d: Vec<u32>,
}

impl LdpcEncoder {
    /// Expand `table` for a code with `nbch` information bits and `nldpc`
    /// total bits, where each table row covers a group of 360 data bits
    /// shifted by `q`.
    pub fn new(table: &[&[u16]], q: usize, nbch: usize, nldpc: usize) -> Self {
        assert!(table.len() * 360 == nbch, "table rows do not cover nbch");
        let pbits = nldpc - nbch;

        let mut p = Vec::new();
        let mut d = Vec::new();
        let mut im = 0u32;
        for row in table {
            for n in 0..360 {
                for &addr in row.iter() {
                    p.push(((addr as usize + n * q) % pbits) as u32);
                    d.push(im);
                }
                im += 1;
            }
        }
        trace!("ldpc schedule: {} steps, {} parity bits", p.len(), pbits);

        LdpcEncoder { nbch, nldpc, p, d }
    }

    /// Number of (parity, data) steps in the expanded schedule.
    pub fn schedule_len(&self) -> usize {
        self.p.len()
    }

    /// Append the `nldpc - nbch` parity bits for the `nbch` message bits in
    /// `bits`.
    pub fn encode(&self, bits: &mut Vec<u8>) {
        assert!(bits.len() == self.nbch, "message length mismatch");
        bits.resize(self.nldpc, 0);

        let (data, parity) = bits.split_at_mut(self.nbch);
        for (&p, &d) in self.p.iter().zip(self.d.iter()) {
            parity[p as usize] ^= data[d as usize];
        }
        for j in 1..parity.len() {
            parity[j] ^= parity[j - 1];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ldpc_tables::{LDPC_TAB_1_2S, LDPC_TAB_1_4S};
    use rand::Rng;

    #[test]
    fn test_schedule_lengths() {
        let pre = LdpcEncoder::new(&LDPC_TAB_1_4S, 36, 3240, 16200);
        // 4 rows of weight 12 plus 5 rows of weight 3, times 360
        assert_eq!(pre.schedule_len(), 22680);

        let post = LdpcEncoder::new(&LDPC_TAB_1_2S, 25, 7200, 16200);
        // 5 rows of weight 8 plus 15 rows of weight 3, times 360
        assert_eq!(post.schedule_len(), 30600);
    }

    #[test]
    fn test_schedule_in_bounds() {
        let enc = LdpcEncoder::new(&LDPC_TAB_1_4S, 36, 3240, 16200);
        assert!(enc.p.iter().all(|&p| (p as usize) < 16200 - 3240));
        assert!(enc.d.iter().all(|&d| (d as usize) < 3240));
    }

    #[test]
    fn test_zero_message_zero_parity() {
        let enc = LdpcEncoder::new(&LDPC_TAB_1_2S, 25, 7200, 16200);
        let mut bits = vec![0u8; 7200];
        enc.encode(&mut bits);
        assert_eq!(bits.len(), 16200);
        assert!(bits.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_known_message_parity_1_2s() {
        // Pinned parity of the 7200-bit message with ones at multiples of 97
        let enc = LdpcEncoder::new(&LDPC_TAB_1_2S, 25, 7200, 16200);
        let mut bits: Vec<u8> = (0..7200).map(|n| (n % 97 == 0) as u8).collect();
        enc.encode(&mut bits);
        let parity = &bits[7200..];

        let prefix: String = parity[..64].iter().map(|&b| char::from(b'0' + b)).collect();
        assert_eq!(prefix, "0100000000000000000011111111111111111110000001111111000000000000");
        assert_eq!(parity.iter().map(|&b| b as usize).sum::<usize>(), 4612);
        assert_eq!((parity[1000], parity[4999], parity[8999]), (1, 1, 0));
    }

    #[test]
    fn test_known_message_parity_1_4s() {
        // Pinned parity of the 3240-bit message with ones at multiples of 83
        let enc = LdpcEncoder::new(&LDPC_TAB_1_4S, 36, 3240, 16200);
        let mut bits: Vec<u8> = (0..3240).map(|n| (n % 83 == 0) as u8).collect();
        enc.encode(&mut bits);
        let parity = &bits[3240..];

        let window: String = parity[6400..6464].iter().map(|&b| char::from(b'0' + b)).collect();
        assert_eq!(window, "0000000000000000000000000000011111111111111111111111111111111111");
        assert_eq!(parity.iter().map(|&b| b as usize).sum::<usize>(), 6498);
        assert_eq!((parity[1000], parity[6479], parity[12959]), (0, 1, 0));
    }

    #[test]
    fn test_parity_is_linear() {
        let enc = LdpcEncoder::new(&LDPC_TAB_1_4S, 36, 3240, 16200);
        let mut rng = rand::rng();
        let a: Vec<u8> = (0..3240).map(|_| rng.random_range(0..2u8)).collect();
        let b: Vec<u8> = (0..3240).map(|_| rng.random_range(0..2u8)).collect();

        let mut ea = a.clone();
        enc.encode(&mut ea);
        let mut eb = b.clone();
        enc.encode(&mut eb);
        let mut exab: Vec<u8> = a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect();
        enc.encode(&mut exab);

        for n in 3240..16200 {
            assert_eq!(exab[n], ea[n] ^ eb[n]);
        }
    }

    #[test]
    fn test_single_bit_parity_weight() {
        // A single set data bit toggles exactly its scheduled accumulators;
        // the prefix XOR then makes the parity a union of address ranges,
        // so the result must be nonzero for every data bit position.
        let enc = LdpcEncoder::new(&LDPC_TAB_1_2S, 25, 7200, 16200);
        for pos in [0usize, 359, 360, 7199] {
            let mut bits = vec![0u8; 7200];
            bits[pos] = 1;
            enc.encode(&mut bits);
            assert!(bits[7200..].iter().any(|&b| b == 1), "no parity for bit {}", pos);
        }
    }

    #[test]
    #[should_panic(expected = "message length mismatch")]
    fn test_wrong_message_length() {
        let enc = LdpcEncoder::new(&LDPC_TAB_1_4S, 36, 3240, 16200);
        let mut bits = vec![0u8; 100];
        enc.encode(&mut bits);
    }
}
