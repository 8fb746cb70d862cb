//! LDPC parity puncturing for L1 signaling
//!
//! Punctured parity bits are marked in place with a sentinel so the mapper
//! can skip them while flattening the frame. Puncturing proceeds in groups
//! of 360 parity bits; within a group, bit c2 sits at parity address
//! c2 * q + g for group index g.

/// Marker value for a punctured parity bit. Never a valid bit value.
pub const PUNCTURED: u8 = 0x55;

/// Parity group puncturing order for L1-pre.
pub const L1_PRE_PUNCTURE: [usize; 36] = [
    27, 13, 29, 32, 5, 0, 11, 21, 33, 20, 25, 28, 18, 35, 8, 3, 9, 31, 22, 24, 7, 14, 17, 4, 2,
    26, 16, 34, 19, 10, 12, 23, 1, 6, 30, 15,
];

/// Number of L1-pre parity bits punctured. Fixed: 31 whole groups plus 328
/// bits of the 32nd.
pub const L1_PRE_N_PUNC: usize = 11488;

/// Parity group puncturing order for L1-post with BPSK or QPSK cells.
pub const L1_POST_PUNCTURE_BQPSK: [usize; 25] = [
    6, 4, 18, 9, 13, 8, 15, 20, 5, 17, 2, 24, 10, 22, 12, 3, 16, 23, 1, 14, 0, 21, 19, 7, 11,
];

/// Parity group puncturing order for L1-post with 16QAM cells.
pub const L1_POST_PUNCTURE_16QAM: [usize; 25] = [
    6, 4, 13, 9, 18, 8, 15, 20, 5, 17, 2, 22, 24, 7, 12, 1, 16, 23, 14, 0, 21, 10, 19, 11, 3,
];

/// Parity group puncturing order for L1-post with 64QAM cells.
pub const L1_POST_PUNCTURE_64QAM: [usize; 25] = [
    6, 15, 13, 10, 3, 17, 21, 8, 5, 19, 2, 23, 16, 24, 7, 18, 1, 12, 20, 0, 4, 14, 9, 11, 22,
];

/// Mark `n_punc` parity bits of the codeword in `frame` as punctured.
/// `frame` holds the full codeword; parity starts at `nbch`.
pub fn puncture(frame: &mut [u8], nbch: usize, q: usize, order: &[usize], n_punc: usize) {
    let whole_groups = n_punc / 360;
    assert!(whole_groups < order.len(), "puncture order table exhausted");

    for &g in &order[..whole_groups] {
        for c2 in 0..360 {
            frame[nbch + c2 * q + g] = PUNCTURED;
        }
    }
    let g = order[whole_groups];
    for c2 in 0..(n_punc - whole_groups * 360) {
        frame[nbch + c2 * q + g] = PUNCTURED;
    }
}

/// Lengths of the punctured L1-post block: (n_post, n_punc).
///
/// `eta` is the bits per L1 cell and `n_p2` the number of P2 symbols.
/// n_post is rounded up so the block fills the P2 symbols evenly (or an
/// even number of cells when there is a single P2 symbol).
pub fn l1post_lengths(kbch: usize, ksig: usize, parity_bits: usize, eta: usize, n_p2: usize) -> (usize, usize) {
    let pbits = 9000; // 16200 - NBCH for rate 1/2 short
    let n_punc_temp = 6 * (kbch - ksig) / 5;
    let n_post_temp = ksig + parity_bits + pbits - n_punc_temp;

    let n_post = if n_p2 == 1 {
        n_post_temp.div_ceil(2 * eta) * 2 * eta
    } else {
        n_post_temp.div_ceil(eta * n_p2) * eta * n_p2
    };
    let n_punc = n_punc_temp - (n_post - n_post_temp);
    (n_post, n_punc)
}
