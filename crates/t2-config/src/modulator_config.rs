use t2_core::{
    CodeRate, FecFrameSize, FftSize, GuardInterval, L1Modulation, Modulation, PaprMode,
    PilotPattern, Preamble, StreamType,
};

/// Network-level signaling values passed through into the L1 blocks.
#[derive(Debug, Clone)]
pub struct CfgNetInfo {
    /// Center frequency in Hz, signalled in L1-post FREQUENCY
    pub frequency: u32,
    /// 16 bits, NETWORK_ID
    pub network_id: u16,
    /// 16 bits, T2_SYSTEM_ID
    pub t2_system_id: u16,
    /// 16 bits, CELL_ID
    pub cell_id: u16,
    /// 8 bits, T2 frames per superframe
    pub num_t2_frames: u8,
    /// 12 bits, data OFDM symbols per T2 frame
    pub num_data_symbols: u16,
}

impl Default for CfgNetInfo {
    fn default() -> Self {
        Self {
            frequency: 729_833_333,
            network_id: 0x3085,
            t2_system_id: 0x8001,
            cell_id: 0,
            num_t2_frames: 2,
            num_data_symbols: 100,
        }
    }
}

/// Complete modulator configuration. Built once by the TOML loader and
/// treated as immutable afterwards; every derived object (interleaver,
/// frame mapper) is constructed from it and validates its own combination.
#[derive(Debug, Clone)]
pub struct ModulatorConfig {
    /// Payload FEC frame size
    pub frame_size: FecFrameSize,
    /// Payload LDPC code rate
    pub code_rate: CodeRate,
    /// Payload cell constellation
    pub constellation: Modulation,
    /// Constellation rotation flag (signalled, not applied here)
    pub rotation: bool,
    /// FEC blocks per interleaving frame, 10 bits
    pub fec_blocks: u16,
    /// Time interleaver length field, 8 bits
    pub time_il_length: u8,
    /// Extended carrier mode
    pub extended_carrier: bool,
    pub fft_size: FftSize,
    pub guard_interval: GuardInterval,
    /// L1-post constellation
    pub l1_constellation: L1Modulation,
    pub pilot_pattern: PilotPattern,
    pub papr: PaprMode,
    pub preamble: Preamble,
    pub stream_type: StreamType,
    pub net: CfgNetInfo,
    /// Verbose log file path, if any
    pub debug_log: Option<String>,
}
