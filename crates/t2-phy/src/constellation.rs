//! Gray-coded square constellations
//!
//! Cell values index a lookup table built at construction. For the QAM
//! constellations the even bit positions (MSB first) select the I branch
//! and the odd positions the Q branch; within a branch the first bit is
//! the sign and the rest a Gray-coded amplitude. Tables are normalized to
//! unit mean power.

use t2_core::{L1Modulation, Modulation};

use crate::dsp_types::{ComplexSample, RealSample};

/// Cell-value-to-point lookup for one constellation.
pub struct ConstellationMap {
    points: Vec<ComplexSample>,
    bits: usize,
}

fn gray_decode(mut g: u32) -> u32 {
    let mut b = 0;
    while g != 0 {
        b ^= g;
        g >>= 1;
    }
    b
}

/// Amplitude of one branch from its bits: a sign bit followed by
/// `amp_bits` Gray-coded bits selecting 2^amp_bits odd levels.
fn branch_level(bits: u32, amp_bits: usize) -> RealSample {
    let sign = if bits >> amp_bits != 0 { -1.0 } else { 1.0 };
    let max = (2u32 << amp_bits) - 1;
    let amp = max - 2 * gray_decode(bits & ((1 << amp_bits) - 1));
    sign * amp as RealSample
}

impl ConstellationMap {
    /// BPSK: cell 0 maps to +1, cell 1 to -1.
    pub fn bpsk() -> Self {
        ConstellationMap {
            points: vec![ComplexSample::new(1.0, 0.0), ComplexSample::new(-1.0, 0.0)],
            bits: 1,
        }
    }

    /// Square QAM with `bits` bits per cell (2, 4, 6 or 8).
    pub fn new(bits: usize) -> Self {
        assert!(bits % 2 == 0 && (2..=8).contains(&bits), "unsupported cell width");
        let amp_bits = bits / 2 - 1;

        // Mean power of the unnormalized grid: sqrt(2 * (M - 1) / 3)
        let m = 1u32 << bits;
        let normalization = ((2 * (m - 1)) as RealSample / 3.0).sqrt();

        let mut points = Vec::with_capacity(m as usize);
        for v in 0..m {
            // Even bit positions from the MSB form I, odd positions form Q
            let mut i_bits = 0u32;
            let mut q_bits = 0u32;
            for n in 0..bits {
                let bit = (v >> (bits - 1 - n)) & 1;
                if n % 2 == 0 {
                    i_bits = (i_bits << 1) | bit;
                } else {
                    q_bits = (q_bits << 1) | bit;
                }
            }
            points.push(ComplexSample::new(
                branch_level(i_bits, amp_bits) / normalization,
                branch_level(q_bits, amp_bits) / normalization,
            ));
        }
        ConstellationMap { points, bits }
    }

    /// Table for a payload constellation.
    pub fn for_modulation(modulation: Modulation) -> Self {
        Self::new(modulation.bits_per_cell())
    }

    /// Table for an L1-post constellation.
    pub fn for_l1(l1_mod: L1Modulation) -> Self {
        match l1_mod {
            L1Modulation::Bpsk => Self::bpsk(),
            other => Self::new(other.bits_per_cell()),
        }
    }

    pub fn bits_per_cell(&self) -> usize {
        self.bits
    }

    /// Map one cell value to its point.
    pub fn map(&self, cell: u8) -> ComplexSample {
        self.points[cell as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bpsk() {
        let c = ConstellationMap::bpsk();
        assert_eq!(c.map(0), ComplexSample::new(1.0, 0.0));
        assert_eq!(c.map(1), ComplexSample::new(-1.0, 0.0));
    }

    #[test]
    fn test_qpsk() {
        let c = ConstellationMap::new(2);
        let a = 1.0 / 2.0_f32.sqrt();
        assert_eq!(c.map(0), ComplexSample::new(a, a));
        assert_eq!(c.map(1), ComplexSample::new(a, -a));
        assert_eq!(c.map(2), ComplexSample::new(-a, a));
        assert_eq!(c.map(3), ComplexSample::new(-a, -a));
    }

    #[test]
    fn test_16qam_anchor_points() {
        let c = ConstellationMap::new(4);
        let n = 10.0_f32.sqrt();
        assert_eq!(c.map(0), ComplexSample::new(3.0 / n, 3.0 / n));
        assert_eq!(c.map(1), ComplexSample::new(3.0 / n, 1.0 / n));
        assert_eq!(c.map(2), ComplexSample::new(1.0 / n, 3.0 / n));
        assert_eq!(c.map(7), ComplexSample::new(1.0 / n, -1.0 / n));
        assert_eq!(c.map(8), ComplexSample::new(-3.0 / n, 3.0 / n));
        assert_eq!(c.map(15), ComplexSample::new(-1.0 / n, -1.0 / n));
    }

    #[test]
    fn test_64qam_gray_amplitudes() {
        let c = ConstellationMap::new(6);
        let n = 42.0_f32.sqrt();
        assert_eq!(c.map(0), ComplexSample::new(7.0 / n, 7.0 / n));
        assert_eq!(c.map(1), ComplexSample::new(7.0 / n, 5.0 / n));
        assert_eq!(c.map(4), ComplexSample::new(7.0 / n, 1.0 / n));
        assert_eq!(c.map(5), ComplexSample::new(7.0 / n, 3.0 / n));
        assert_eq!(c.map(63), ComplexSample::new(-3.0 / n, -3.0 / n));
    }

    #[test]
    fn test_unit_mean_power() {
        for bits in [2, 4, 6, 8] {
            let c = ConstellationMap::new(bits);
            let power: f64 = c
                .points
                .iter()
                .map(|p| (p.re as f64).powi(2) + (p.im as f64).powi(2))
                .sum::<f64>()
                / c.points.len() as f64;
            assert!((power - 1.0).abs() < 1e-5, "{}-bit power {}", bits, power);
        }
    }

    #[test]
    fn test_gray_neighbours_differ_in_one_bit() {
        // Adjacent I levels for fixed Q differ in exactly one cell bit
        let c = ConstellationMap::new(4);
        for v in 0..16u8 {
            for w in 0..16u8 {
                let (pv, pw) = (c.map(v), c.map(w));
                let di = (pv.re - pw.re).abs();
                let dq = (pv.im - pw.im).abs();
                if (di * 10.0_f32.sqrt() - 2.0).abs() < 1e-4 && dq < 1e-6 {
                    assert_eq!((v ^ w).count_ones(), 1, "cells {} {}", v, w);
                }
            }
        }
    }
}
