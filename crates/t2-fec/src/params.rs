//! Code parameter lookup
//!
//! Maps (frame size, code rate) to the BCH/LDPC split used by the payload
//! interleaver, and carries the fixed parameter sets of the two L1 codes.
//! Combinations without a defined parameter set are rejected.

use t2_core::{CodeRate, ConfigErr, FecFrameSize};

/// Payload code split: `nbch` information bits and LDPC shift factor `q`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeParams {
    pub nbch: usize,
    pub q: usize,
}

/// Fixed parameters of a shortened L1 signaling code.
#[derive(Debug, Clone, Copy)]
pub struct L1Params {
    /// Signaling bits per block, CRC included
    pub ksig: usize,
    /// BCH message length the block is padded to
    pub kbch: usize,
    /// LDPC information length (kbch plus BCH parity)
    pub nbch: usize,
    /// LDPC shift factor
    pub q: usize,
}

/// L1-pre: rate 1/4 short code.
pub const L1_PRE_PARAMS: L1Params = L1Params { ksig: 200, kbch: 3072, nbch: 3240, q: 36 };

/// L1-post: rate 1/2 short code.
pub const L1_POST_PARAMS: L1Params = L1Params { ksig: 350, kbch: 7032, nbch: 7200, q: 25 };

fn framesize_name(framesize: FecFrameSize) -> &'static str {
    match framesize {
        FecFrameSize::Normal => "normal",
        FecFrameSize::Short => "short",
    }
}

fn rate_name(rate: CodeRate) -> &'static str {
    match rate {
        CodeRate::R1_3 => "1/3",
        CodeRate::R2_5 => "2/5",
        CodeRate::R1_2 => "1/2",
        CodeRate::R3_5 => "3/5",
        CodeRate::R2_3 => "2/3",
        CodeRate::R3_4 => "3/4",
        CodeRate::R4_5 => "4/5",
        CodeRate::R5_6 => "5/6",
    }
}

/// Look up the payload code split for a frame size and rate.
///
/// Rates 1/3 and 2/5 exist only for short frames; requesting them on
/// normal frames is an error.
pub fn get_code_params(framesize: FecFrameSize, rate: CodeRate) -> Result<CodeParams, ConfigErr> {
    let params = match framesize {
        FecFrameSize::Normal => match rate {
            CodeRate::R1_3 | CodeRate::R2_5 => {
                return Err(ConfigErr::UnsupportedRate {
                    framesize: framesize_name(framesize),
                    rate: rate_name(rate),
                });
            }
            CodeRate::R1_2 => CodeParams { nbch: 32400, q: 90 },
            CodeRate::R3_5 => CodeParams { nbch: 38880, q: 72 },
            CodeRate::R2_3 => CodeParams { nbch: 43200, q: 60 },
            CodeRate::R3_4 => CodeParams { nbch: 48600, q: 45 },
            CodeRate::R4_5 => CodeParams { nbch: 51840, q: 36 },
            CodeRate::R5_6 => CodeParams { nbch: 54000, q: 30 },
        },
        FecFrameSize::Short => match rate {
            CodeRate::R1_3 => CodeParams { nbch: 5400, q: 30 },
            CodeRate::R2_5 => CodeParams { nbch: 6480, q: 27 },
            CodeRate::R1_2 => CodeParams { nbch: 7200, q: 25 },
            CodeRate::R3_5 => CodeParams { nbch: 9720, q: 18 },
            CodeRate::R2_3 => CodeParams { nbch: 10800, q: 15 },
            CodeRate::R3_4 => CodeParams { nbch: 11880, q: 12 },
            CodeRate::R4_5 => CodeParams { nbch: 12600, q: 10 },
            CodeRate::R5_6 => CodeParams { nbch: 13320, q: 8 },
        },
    };
    Ok(params)
}
