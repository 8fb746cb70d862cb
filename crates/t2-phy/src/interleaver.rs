//! Payload FEC frame bit interleaver
//!
//! Sits between the LDPC encoder and the cell mapper. Three stages:
//! parity interleave, column twist, and the demultiplexer that forms cell
//! word bits. All three are composed into a single bit permutation at
//! construction time; a frame is then interleaved in one pass.
//!
//! QPSK frames skip the column stages. The parity interleave applies to
//! all QAM frames, but to QPSK only for the short-frame rates 1/3 and 2/5.

use t2_core::{CodeRate, ConfigErr, FecFrameSize, Modulation};
use t2_fec::get_code_params;
use tracing::debug;

use crate::bit_tables::get_tables;

#[derive(Debug)]
pub struct BitInterleaver {
    frame_bits: usize,
    bits_per_cell: usize,
    // Output bit k reads input bit perm[k]
    perm: Vec<u32>,
}

impl BitInterleaver {
    pub fn new(
        framesize: FecFrameSize,
        rate: CodeRate,
        modulation: Modulation,
    ) -> Result<Self, ConfigErr> {
        let params = get_code_params(framesize, rate)?;
        let (nbch, q) = (params.nbch, params.q);
        let frame_bits = framesize.frame_bits();
        let bits_per_cell = modulation.bits_per_cell();

        // Parity interleave: coded bit nbch + q*s + t moves to nbch + 360*t + s
        let parity = |u: usize| -> usize {
            if u < nbch {
                u
            } else {
                let off = u - nbch;
                nbch + q * (off % 360) + off / 360
            }
        };

        let perm: Vec<u32> = match modulation {
            Modulation::Qpsk => {
                let with_parity = framesize == FecFrameSize::Short
                    && matches!(rate, CodeRate::R1_3 | CodeRate::R2_5);
                (0..frame_bits)
                    .map(|k| if with_parity { parity(k) as u32 } else { k as u32 })
                    .collect()
            }
            _ => {
                let (twist, mux) = get_tables(framesize, rate, modulation)?;
                let cols = twist.len();
                let rows = frame_bits / cols;
                (0..frame_bits)
                    .map(|k| {
                        // Demux slot k % cols reads column mux[k % cols] of
                        // grid row k / cols; undo the twist to find which
                        // sequential bit was written there.
                        let c = mux[k % cols];
                        let row = k / cols;
                        let r = (row + rows - twist[c]) % rows;
                        parity(c * rows + r) as u32
                    })
                    .collect()
            }
        };

        debug!(
            "bit interleaver: {} bits, {} bits/cell, nbch {}, q {}",
            frame_bits, bits_per_cell, nbch, q
        );

        Ok(BitInterleaver { frame_bits, bits_per_cell, perm })
    }

    /// Coded bits per FEC frame.
    pub fn frame_bits(&self) -> usize {
        self.frame_bits
    }

    /// Cell words produced per FEC frame.
    pub fn cells_per_frame(&self) -> usize {
        self.frame_bits / self.bits_per_cell
    }

    /// Interleave one FEC frame of bits (one bit per entry) into cell
    /// words (one cell value per entry, bits packed MSB first).
    pub fn interleave(&self, input: &[u8], output: &mut [u8]) {
        assert!(input.len() == self.frame_bits, "input is not one FEC frame");
        assert!(output.len() == self.cells_per_frame(), "output length mismatch");

        let mut perm = self.perm.iter();
        for cell in output.iter_mut() {
            let mut word = 0u8;
            for _ in 0..self.bits_per_cell {
                word = (word << 1) | input[*perm.next().unwrap() as usize];
            }
            *cell = word;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_frame(bits: usize) -> Vec<u8> {
        let mut rng = rand::rng();
        (0..bits).map(|_| rng.random_range(0..2u8)).collect()
    }

    #[test]
    fn test_permutation_is_bijective() {
        for (framesize, rate, modulation) in [
            (FecFrameSize::Short, CodeRate::R1_3, Modulation::Qpsk),
            (FecFrameSize::Short, CodeRate::R1_2, Modulation::Qam16),
            (FecFrameSize::Short, CodeRate::R2_5, Modulation::Qam256),
            (FecFrameSize::Normal, CodeRate::R3_5, Modulation::Qam64),
            (FecFrameSize::Normal, CodeRate::R2_3, Modulation::Qam256),
        ] {
            let il = BitInterleaver::new(framesize, rate, modulation).unwrap();
            let mut seen = vec![false; il.frame_bits()];
            for &p in &il.perm {
                assert!(!seen[p as usize], "duplicate source index {}", p);
                seen[p as usize] = true;
            }
        }
    }

    #[test]
    fn test_qpsk_passthrough() {
        // Rates other than 1/3 and 2/5 pack QPSK cells straight through
        let il = BitInterleaver::new(FecFrameSize::Short, CodeRate::R1_2, Modulation::Qpsk).unwrap();
        let input = random_frame(16200);
        let mut output = vec![0u8; 8100];
        il.interleave(&input, &mut output);
        for j in 0..8100 {
            assert_eq!(output[j], (input[2 * j] << 1) | input[2 * j + 1]);
        }
    }

    #[test]
    fn test_qpsk_low_rate_parity_interleave() {
        let il = BitInterleaver::new(FecFrameSize::Short, CodeRate::R1_3, Modulation::Qpsk).unwrap();
        let (nbch, q) = (5400, 30);
        let input = random_frame(16200);
        let mut output = vec![0u8; 8100];
        il.interleave(&input, &mut output);

        // Message bits are unchanged
        for k in 0..nbch / 2 {
            assert_eq!(output[k], (input[2 * k] << 1) | input[2 * k + 1]);
        }
        // Interleaved bit nbch + 360t + s comes from parity bit nbch + q*s + t
        for (t, s) in [(0, 0), (0, 1), (1, 0), (5, 77), (29, 359)] {
            let dst = nbch + 360 * t + s;
            let src = nbch + q * s + t;
            let cell = output[dst / 2];
            let bit = (cell >> (1 - dst % 2)) & 1;
            assert_eq!(bit, input[src]);
        }
    }

    #[test]
    fn test_qam16_short_matches_staged_loops() {
        t2_core::debug::setup_logging_verbose();
        // Run the three stages as separate loops and compare
        let il = BitInterleaver::new(FecFrameSize::Short, CodeRate::R2_3, Modulation::Qam16).unwrap();
        let (nbch, q) = (10800, 15);
        let (cols, rows) = (8, 16200 / 8);
        let twist = [0usize, 0, 0, 1, 7, 20, 20, 21];
        let mux = [7usize, 1, 3, 5, 2, 4, 6, 0];

        let input = random_frame(16200);

        let mut tempu = vec![0u8; 16200];
        tempu[..nbch].copy_from_slice(&input[..nbch]);
        for t in 0..q {
            for s in 0..360 {
                tempu[nbch + 360 * t + s] = input[nbch + q * s + t];
            }
        }
        let mut tempv = vec![0u8; 16200];
        let mut index = 0;
        for col in 0..cols {
            let mut offset = twist[col];
            for _ in 0..rows {
                tempv[offset + rows * col] = tempu[index];
                index += 1;
                offset = (offset + 1) % rows;
            }
        }
        let mut expected = vec![0u8; 16200 / 4];
        let mut produced = 0;
        for d in 0..rows {
            let mut pack = 0u16;
            for e in 0..cols {
                pack = (pack << 1) | tempv[mux[e] * rows + d] as u16;
            }
            expected[produced] = (pack >> 4) as u8;
            expected[produced + 1] = (pack & 0xf) as u8;
            produced += 2;
        }

        let mut output = vec![0u8; 16200 / 4];
        il.interleave(&input, &mut output);
        assert_eq!(output, expected);
    }

    #[test]
    fn test_cell_counts() {
        let il = BitInterleaver::new(FecFrameSize::Normal, CodeRate::R1_2, Modulation::Qam256).unwrap();
        assert_eq!(il.cells_per_frame(), 8100);
        let il = BitInterleaver::new(FecFrameSize::Short, CodeRate::R3_5, Modulation::Qam64).unwrap();
        assert_eq!(il.cells_per_frame(), 2700);
    }

    #[test]
    fn test_normal_frame_low_rate_rejected() {
        let err = BitInterleaver::new(FecFrameSize::Normal, CodeRate::R2_5, Modulation::Qam16).unwrap_err();
        assert!(matches!(err, ConfigErr::UnsupportedRate { .. }));
    }

    #[test]
    #[should_panic(expected = "input is not one FEC frame")]
    fn test_wrong_input_length() {
        let il = BitInterleaver::new(FecFrameSize::Short, CodeRate::R1_2, Modulation::Qam16).unwrap();
        let input = vec![0u8; 100];
        let mut output = vec![0u8; il.cells_per_frame()];
        il.interleave(&input, &mut output);
    }
}
