//! Shortened BCH outer code for L1 signaling
//!
//! Both L1-pre and L1-post use the 12-error-correcting BCH code of the
//! 16200-bit frame class, which appends 168 parity bits. The generator
//! polynomial is the product of twelve degree-14 irreducible polynomials
//! over GF(2), kept packed in six 32-bit words for the shift register.

/// Parity bits appended by the outer code.
pub const BCH_PARITY_BITS: usize = 168;

// Minimal polynomials of the code, coefficient of x^0 first.
const POLYS: [[u8; 15]; 12] = [
    [1, 1, 0, 1, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 0, 0, 0, 0, 1, 0, 1, 0, 0, 1, 0, 0, 1],
    [1, 1, 1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 0, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 1, 1, 0, 1, 0, 1, 0, 1],
    [1, 0, 1, 0, 1, 0, 1, 0, 1, 1, 0, 1, 0, 1, 1],
    [1, 0, 0, 1, 0, 0, 0, 1, 1, 1, 0, 0, 0, 1, 1],
    [1, 0, 1, 0, 0, 1, 1, 1, 0, 0, 1, 1, 0, 1, 1],
    [1, 0, 0, 0, 0, 1, 0, 0, 1, 1, 1, 1, 0, 0, 1],
    [1, 1, 1, 1, 0, 0, 0, 0, 0, 1, 1, 0, 0, 0, 1],
    [1, 0, 0, 1, 0, 0, 1, 0, 0, 1, 0, 1, 1, 0, 1],
    [1, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 1, 0, 1],
    [1, 1, 1, 1, 0, 1, 1, 1, 1, 0, 1, 0, 0, 1, 1],
];

/// Multiply two GF(2) polynomials given as coefficient arrays, x^0 first.
fn poly_mult(a: &[u8], b: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; a.len() + b.len()];
    for (i, &ca) in a.iter().enumerate() {
        if ca == 0 {
            continue;
        }
        for (j, &cb) in b.iter().enumerate() {
            out[i + j] ^= ca & cb;
        }
    }
    while out.len() > 1 && *out.last().unwrap() == 0 {
        out.pop();
    }
    out
}

/// Pack the low 168 coefficients into six words, coefficient of x^0 at the
/// top bit of word 0. The leading x^168 term is implicit in the register.
fn poly_pack(coeffs: &[u8]) -> [u32; 6] {
    let mut packed = [0u32; 6];
    for n in 0..BCH_PARITY_BITS {
        if coeffs[n] != 0 {
            packed[n / 32] |= 0x8000_0000 >> (n % 32);
        }
    }
    packed
}

fn reg_6_shift(sr: &mut [u32; 6]) {
    sr[5] = (sr[5] >> 1) | (sr[4] << 31);
    sr[4] = (sr[4] >> 1) | (sr[3] << 31);
    sr[3] = (sr[3] >> 1) | (sr[2] << 31);
    sr[2] = (sr[2] >> 1) | (sr[1] << 31);
    sr[1] = (sr[1] >> 1) | (sr[0] << 31);
    sr[0] >>= 1;
}

pub struct BchEncoder {
    poly: [u32; 6],
}

impl BchEncoder {
    /// Build the degree-168 generator from its twelve factors.
    pub fn new() -> Self {
        let mut generator: Vec<u8> = vec![1];
        for poly in &POLYS {
            generator = poly_mult(poly, &generator);
        }
        BchEncoder { poly: poly_pack(&generator) }
    }

    /// Append the 168 parity bits for the message currently in `bits`.
    pub fn encode(&self, bits: &mut Vec<u8>) {
        let mut shift = [0u32; 6];
        for n in 0..bits.len() {
            let b = bits[n] ^ ((shift[5] >> 24) as u8 & 0x01);
            reg_6_shift(&mut shift);
            if b != 0 {
                for (s, p) in shift.iter_mut().zip(self.poly.iter()) {
                    *s ^= p;
                }
            }
        }
        for _ in 0..BCH_PARITY_BITS {
            bits.push(((shift[5] >> 24) & 1) as u8);
            reg_6_shift(&mut shift);
        }
    }
}

impl Default for BchEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_poly_mult_small() {
        // (x + 1)(x + 1) = x^2 + 1 over GF(2)
        assert_eq!(poly_mult(&[1, 1], &[1, 1]), vec![1, 0, 1]);
        // (x + 1)(x^2 + x + 1) = x^3 + 1
        assert_eq!(poly_mult(&[1, 1], &[1, 1, 1]), vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_generator_constant_term() {
        // Every factor has a constant term, so the product must as well
        let enc = BchEncoder::new();
        assert_ne!(enc.poly[0] & 0x8000_0000, 0);
        // 168 = 5 * 32 + 8: word 5 only uses its top 8 bits
        assert_eq!(enc.poly[5] & 0x00ff_ffff, 0);
    }

    #[test]
    fn test_generator_words() {
        let enc = BchEncoder::new();
        assert_eq!(
            enc.poly,
            [0xa5a0988b, 0xebe7f14a, 0x9609c5c4, 0xb3464d96, 0x1957db46, 0x0200_0000]
        );
    }

    #[test]
    fn test_known_message_parity() {
        // Pinned parity of the 3072-bit message with ones at multiples of 89
        let enc = BchEncoder::new();
        let mut bits: Vec<u8> = (0..3072).map(|n| (n % 89 == 0) as u8).collect();
        enc.encode(&mut bits);
        let parity: String = bits[3072..].iter().map(|&b| char::from(b'0' + b)).collect();
        assert_eq!(
            parity,
            concat!(
                "00011111011001001010011011110000101000001101000111100011",
                "10101100001101101100010110000000100010100110011000111111",
                "11010100000100100101000110011010110111011111101011110111",
            )
        );
    }

    #[test]
    fn test_zero_message_zero_parity() {
        let enc = BchEncoder::new();
        let mut bits = vec![0u8; 3072];
        enc.encode(&mut bits);
        assert_eq!(bits.len(), 3072 + BCH_PARITY_BITS);
        assert!(bits.iter().all(|&b| b == 0));
    }

    #[test]
    fn test_parity_is_linear() {
        // The code is linear: parity(a ^ b) == parity(a) ^ parity(b)
        let enc = BchEncoder::new();
        let mut rng = rand::rng();
        let a: Vec<u8> = (0..3072).map(|_| rng.random_range(0..2u8)).collect();
        let b: Vec<u8> = (0..3072).map(|_| rng.random_range(0..2u8)).collect();

        let mut ea = a.clone();
        enc.encode(&mut ea);
        let mut eb = b.clone();
        enc.encode(&mut eb);
        let mut exab: Vec<u8> = a.iter().zip(b.iter()).map(|(x, y)| x ^ y).collect();
        enc.encode(&mut exab);

        for n in 3072..exab.len() {
            assert_eq!(exab[n], ea[n] ^ eb[n]);
        }
    }

    #[test]
    fn test_encode_deterministic() {
        let enc = BchEncoder::new();
        let mut rng = rand::rng();
        let msg: Vec<u8> = (0..7032).map(|_| rng.random_range(0..2u8)).collect();
        let mut first = msg.clone();
        enc.encode(&mut first);
        let mut second = msg.clone();
        enc.encode(&mut second);
        assert_eq!(first, second);
    }
}
