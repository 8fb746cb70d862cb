//! Column twist and demux tables for the payload bit interleaver
//!
//! Twist tables give the per-column write offset of the column-twist
//! interleaver; demux tables give, for each output slot, the position
//! within a row tuple it is read from. Rate-specific demux variants exist
//! for a handful of combinations; everything else uses the base table.

use t2_core::{CodeRate, ConfigErr, FecFrameSize, Modulation};

pub const TWIST_16N: [usize; 8] = [0, 0, 2, 4, 4, 5, 7, 7];
pub const TWIST_64N: [usize; 12] = [0, 0, 2, 2, 3, 4, 4, 5, 5, 7, 8, 9];
pub const TWIST_256N: [usize; 16] = [0, 2, 2, 2, 2, 3, 7, 15, 16, 20, 22, 22, 27, 27, 28, 32];

pub const TWIST_16S: [usize; 8] = [0, 0, 0, 1, 7, 20, 20, 21];
pub const TWIST_64S: [usize; 12] = [0, 0, 0, 2, 2, 2, 3, 3, 3, 6, 7, 7];
pub const TWIST_256S: [usize; 8] = [0, 0, 0, 1, 7, 20, 20, 21];

pub const MUX_16: [usize; 8] = [7, 1, 3, 5, 2, 4, 6, 0];
pub const MUX_64: [usize; 12] = [11, 8, 5, 2, 10, 7, 4, 1, 9, 6, 3, 0];
pub const MUX_256: [usize; 16] = [15, 1, 13, 3, 10, 7, 9, 11, 4, 6, 8, 5, 12, 2, 14, 0];

pub const MUX_16_35: [usize; 8] = [0, 2, 3, 6, 4, 1, 7, 5];
pub const MUX_16_13: [usize; 8] = [1, 6, 5, 2, 3, 4, 0, 7];
pub const MUX_16_25: [usize; 8] = [3, 5, 6, 4, 2, 1, 7, 0];

pub const MUX_64_35: [usize; 12] = [4, 6, 0, 5, 8, 10, 2, 1, 7, 3, 11, 9];
pub const MUX_64_13: [usize; 12] = [2, 5, 1, 6, 0, 3, 4, 7, 8, 9, 10, 11];
pub const MUX_64_25: [usize; 12] = [1, 2, 4, 5, 0, 6, 3, 8, 7, 10, 9, 11];

pub const MUX_256_35: [usize; 16] = [4, 6, 0, 2, 3, 14, 12, 10, 7, 5, 8, 1, 15, 9, 11, 13];
pub const MUX_256_23: [usize; 16] = [3, 15, 1, 7, 4, 11, 5, 0, 12, 2, 9, 14, 13, 6, 8, 10];

pub const MUX_256S: [usize; 8] = [7, 2, 4, 1, 6, 3, 5, 0];
pub const MUX_256S_13: [usize; 8] = [1, 2, 3, 5, 0, 4, 6, 7];
pub const MUX_256S_25: [usize; 8] = [1, 3, 4, 5, 0, 2, 6, 7];

/// Twist and demux tables plus column count for one configuration.
/// QPSK has no column grid and is rejected here.
pub fn get_tables(
    framesize: FecFrameSize,
    rate: CodeRate,
    modulation: Modulation,
) -> Result<(&'static [usize], &'static [usize]), ConfigErr> {
    let tables: (&[usize], &[usize]) = match (framesize, modulation) {
        (_, Modulation::Qpsk) => {
            return Err(ConfigErr::UnsupportedInterleave {
                framesize: match framesize {
                    FecFrameSize::Normal => "normal",
                    FecFrameSize::Short => "short",
                },
                constellation: "QPSK",
            });
        }
        (FecFrameSize::Normal, Modulation::Qam16) => match rate {
            CodeRate::R3_5 => (&TWIST_16N, &MUX_16_35),
            _ => (&TWIST_16N, &MUX_16),
        },
        (FecFrameSize::Short, Modulation::Qam16) => match rate {
            CodeRate::R1_3 => (&TWIST_16S, &MUX_16_13),
            CodeRate::R2_5 => (&TWIST_16S, &MUX_16_25),
            _ => (&TWIST_16S, &MUX_16),
        },
        (FecFrameSize::Normal, Modulation::Qam64) => match rate {
            CodeRate::R3_5 => (&TWIST_64N, &MUX_64_35),
            _ => (&TWIST_64N, &MUX_64),
        },
        (FecFrameSize::Short, Modulation::Qam64) => match rate {
            CodeRate::R1_3 => (&TWIST_64S, &MUX_64_13),
            CodeRate::R2_5 => (&TWIST_64S, &MUX_64_25),
            _ => (&TWIST_64S, &MUX_64),
        },
        (FecFrameSize::Normal, Modulation::Qam256) => match rate {
            CodeRate::R3_5 => (&TWIST_256N, &MUX_256_35),
            CodeRate::R2_3 => (&TWIST_256N, &MUX_256_23),
            _ => (&TWIST_256N, &MUX_256),
        },
        (FecFrameSize::Short, Modulation::Qam256) => match rate {
            CodeRate::R1_3 => (&TWIST_256S, &MUX_256S_13),
            CodeRate::R2_5 => (&TWIST_256S, &MUX_256S_25),
            _ => (&TWIST_256S, &MUX_256S),
        },
    };
    Ok(tables)
}
