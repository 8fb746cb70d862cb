//! PHY-layer types shared across the modulator stack
//!
//! Each enum carries the raw value used when the field is signalled in L1,
//! via `into_raw()`. The enums are closed: configuration combinations without
//! defined parameter tables are rejected at construction time, never defaulted.

use serde::Deserialize;

/// FEC frame size class (LDPC codeword length).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum FecFrameSize {
    /// 64800-bit codewords
    Normal,
    /// 16200-bit codewords
    Short,
}

impl FecFrameSize {
    /// Coded FEC frame length in bits.
    pub fn frame_bits(self) -> usize {
        match self {
            FecFrameSize::Normal => 64800,
            FecFrameSize::Short => 16200,
        }
    }

    /// Raw value of the PLP_FEC_TYPE field (2 bits).
    pub fn into_raw(self) -> u64 {
        match self {
            FecFrameSize::Normal => 0,
            FecFrameSize::Short => 1,
        }
    }
}

/// LDPC code rate of the payload PLP.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum CodeRate {
    #[serde(rename = "1/3")]
    R1_3,
    #[serde(rename = "2/5")]
    R2_5,
    #[serde(rename = "1/2")]
    R1_2,
    #[serde(rename = "3/5")]
    R3_5,
    #[serde(rename = "2/3")]
    R2_3,
    #[serde(rename = "3/4")]
    R3_4,
    #[serde(rename = "4/5")]
    R4_5,
    #[serde(rename = "5/6")]
    R5_6,
}

impl CodeRate {
    /// Raw value of the PLP_COD field (3 bits).
    pub fn into_raw(self) -> u64 {
        match self {
            CodeRate::R1_2 => 0,
            CodeRate::R3_5 => 1,
            CodeRate::R2_3 => 2,
            CodeRate::R3_4 => 3,
            CodeRate::R4_5 => 4,
            CodeRate::R5_6 => 5,
            CodeRate::R1_3 => 6,
            CodeRate::R2_5 => 7,
        }
    }
}

/// Payload cell constellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Modulation {
    #[serde(rename = "QPSK")]
    Qpsk,
    #[serde(rename = "16QAM")]
    Qam16,
    #[serde(rename = "64QAM")]
    Qam64,
    #[serde(rename = "256QAM")]
    Qam256,
}

impl Modulation {
    /// Bits carried per constellation cell.
    pub fn bits_per_cell(self) -> usize {
        match self {
            Modulation::Qpsk => 2,
            Modulation::Qam16 => 4,
            Modulation::Qam64 => 6,
            Modulation::Qam256 => 8,
        }
    }

    /// Raw value of the PLP_MOD field (3 bits).
    pub fn into_raw(self) -> u64 {
        match self {
            Modulation::Qpsk => 0,
            Modulation::Qam16 => 1,
            Modulation::Qam64 => 2,
            Modulation::Qam256 => 3,
        }
    }
}

/// L1-post signaling constellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum L1Modulation {
    #[serde(rename = "BPSK")]
    Bpsk,
    #[serde(rename = "QPSK")]
    Qpsk,
    #[serde(rename = "16QAM")]
    Qam16,
    #[serde(rename = "64QAM")]
    Qam64,
}

impl L1Modulation {
    /// Bits carried per L1-post cell.
    pub fn bits_per_cell(self) -> usize {
        match self {
            L1Modulation::Bpsk => 1,
            L1Modulation::Qpsk => 2,
            L1Modulation::Qam16 => 4,
            L1Modulation::Qam64 => 6,
        }
    }

    /// Raw value of the L1_MOD field (4 bits).
    pub fn into_raw(self) -> u64 {
        match self {
            L1Modulation::Bpsk => 0,
            L1Modulation::Qpsk => 1,
            L1Modulation::Qam16 => 2,
            L1Modulation::Qam64 => 3,
        }
    }
}

/// OFDM FFT size. Only the P2 symbol count matters to this stack: it drives
/// the L1-post transmission length rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum FftSize {
    #[serde(rename = "1K")]
    Fft1k,
    #[serde(rename = "2K")]
    Fft2k,
    #[serde(rename = "4K")]
    Fft4k,
    #[serde(rename = "8K")]
    Fft8k,
    #[serde(rename = "8K_EXT")]
    Fft8kExt,
    #[serde(rename = "16K")]
    Fft16k,
    #[serde(rename = "32K")]
    Fft32k,
    #[serde(rename = "32K_EXT")]
    Fft32kExt,
}

impl FftSize {
    /// Raw value of the S2 field (3 bits once the extension bit is split off).
    pub fn into_raw(self) -> u64 {
        match self {
            FftSize::Fft1k => 0,
            FftSize::Fft2k => 1,
            FftSize::Fft4k => 2,
            FftSize::Fft8k => 3,
            FftSize::Fft8kExt => 4,
            FftSize::Fft16k => 5,
            FftSize::Fft32k => 6,
            FftSize::Fft32kExt => 7,
        }
    }

    /// Number of P2 symbols per T2 frame for this FFT size.
    pub fn p2_symbols(self) -> usize {
        match self {
            FftSize::Fft1k => 16,
            FftSize::Fft2k => 8,
            FftSize::Fft4k => 4,
            FftSize::Fft8k | FftSize::Fft8kExt => 2,
            FftSize::Fft16k => 1,
            FftSize::Fft32k | FftSize::Fft32kExt => 1,
        }
    }
}

/// Guard interval fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum GuardInterval {
    #[serde(rename = "1/32")]
    Gi1_32,
    #[serde(rename = "1/16")]
    Gi1_16,
    #[serde(rename = "1/8")]
    Gi1_8,
    #[serde(rename = "1/4")]
    Gi1_4,
    #[serde(rename = "1/128")]
    Gi1_128,
    #[serde(rename = "19/128")]
    Gi19_128,
    #[serde(rename = "19/256")]
    Gi19_256,
}

impl GuardInterval {
    /// Raw value of the GUARD_INTERVAL field (3 bits).
    pub fn into_raw(self) -> u64 {
        match self {
            GuardInterval::Gi1_32 => 0,
            GuardInterval::Gi1_16 => 1,
            GuardInterval::Gi1_8 => 2,
            GuardInterval::Gi1_4 => 3,
            GuardInterval::Gi1_128 => 4,
            GuardInterval::Gi19_128 => 5,
            GuardInterval::Gi19_256 => 6,
        }
    }
}

/// Scattered pilot pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PilotPattern {
    Pp1,
    Pp2,
    Pp3,
    Pp4,
    Pp5,
    Pp6,
    Pp7,
    Pp8,
}

impl PilotPattern {
    /// Raw value of the PILOT_PATTERN field (4 bits).
    pub fn into_raw(self) -> u64 {
        match self {
            PilotPattern::Pp1 => 0,
            PilotPattern::Pp2 => 1,
            PilotPattern::Pp3 => 2,
            PilotPattern::Pp4 => 3,
            PilotPattern::Pp5 => 4,
            PilotPattern::Pp6 => 5,
            PilotPattern::Pp7 => 6,
            PilotPattern::Pp8 => 7,
        }
    }
}

/// Peak-to-average power reduction mode (pass-through signaling field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum PaprMode {
    Off,
    Ace,
    Tr,
    AceTr,
}

impl PaprMode {
    /// Raw value of the PAPR field (4 bits).
    pub fn into_raw(self) -> u64 {
        match self {
            PaprMode::Off => 0,
            PaprMode::Ace => 1,
            PaprMode::Tr => 2,
            PaprMode::AceTr => 3,
        }
    }
}

/// P1 preamble format (S1 field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Preamble {
    T2Siso,
    T2Miso,
}

impl Preamble {
    /// Raw value of the S1 field (3 bits).
    pub fn into_raw(self) -> u64 {
        match self {
            Preamble::T2Siso => 0,
            Preamble::T2Miso => 1,
        }
    }
}

/// Input stream format signalled in the TYPE field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StreamType {
    Ts,
    Gs,
    Both,
}

impl StreamType {
    /// Raw value of the TYPE field (8 bits).
    pub fn into_raw(self) -> u64 {
        match self {
            StreamType::Ts => 0,
            StreamType::Gs => 1,
            StreamType::Both => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_bits() {
        assert_eq!(FecFrameSize::Normal.frame_bits(), 64800);
        assert_eq!(FecFrameSize::Short.frame_bits(), 16200);
    }

    #[test]
    fn test_rate_raw_values() {
        // Signalled PLP_COD values are not in rate order
        assert_eq!(CodeRate::R1_2.into_raw(), 0);
        assert_eq!(CodeRate::R5_6.into_raw(), 5);
        assert_eq!(CodeRate::R1_3.into_raw(), 6);
        assert_eq!(CodeRate::R2_5.into_raw(), 7);
    }

    #[test]
    fn test_p2_symbols() {
        assert_eq!(FftSize::Fft1k.p2_symbols(), 16);
        assert_eq!(FftSize::Fft8k.p2_symbols(), 2);
        assert_eq!(FftSize::Fft8kExt.p2_symbols(), 2);
        assert_eq!(FftSize::Fft32k.p2_symbols(), 1);
    }
}
