//! L1 signaling records
//!
//! Field-for-field representations of the L1-pre and L1-post signaling
//! blocks carried in the P2 symbols. `pack()` serializes the fields
//! MSB-first in transmission order; the CRC-32 is appended by the frame
//! mapper after packing.

use t2_core::{
    BitBuffer, CodeRate, FecFrameSize, FftSize, GuardInterval, L1Modulation, Modulation,
    PaprMode, PilotPattern, Preamble, StreamType,
};

/// Field bits of the L1-pre block, CRC excluded.
pub const L1_PRE_FIELD_BITS: usize = 168;

/// Field bits of the L1-post block, CRC excluded.
pub const L1_POST_FIELD_BITS: usize = 318;

/// L1-pre signaling. Protects the L1-post block and carries the
/// transmission parameters a receiver needs before decoding it.
#[derive(Debug)]
pub struct L1PreSignalling {
    /// 8 bits, input stream TYPE
    pub stream_type: StreamType,
    /// 1 bit, extended carrier mode
    pub bwt_ext: bool,
    /// 3 bits, S1 preamble format
    pub s1: Preamble,
    /// 3 bits, S2 FFT size (followed by one reserved zero bit)
    pub s2: FftSize,
    /// 1 bit, L1 repetition flag
    pub l1_repetition_flag: bool,
    /// 3 bits
    pub guard_interval: GuardInterval,
    /// 4 bits
    pub papr: PaprMode,
    /// 4 bits, L1-post constellation
    pub l1_mod: L1Modulation,
    /// 2 bits, L1-post code rate (always 0: rate 1/2)
    pub l1_cod: u8,
    /// 2 bits, L1-post FEC type (always 0: 16K LDPC)
    pub l1_fec_type: u8,
    /// 18 bits, L1-post block length in cells
    pub l1_post_size: u32,
    /// 18 bits, L1-post information length in bits
    pub l1_post_info_size: u32,
    /// 4 bits
    pub pilot_pattern: PilotPattern,
    /// 8 bits
    pub tx_id_availability: u8,
    /// 16 bits
    pub cell_id: u16,
    /// 16 bits
    pub network_id: u16,
    /// 16 bits
    pub t2_system_id: u16,
    /// 8 bits, T2 frames per superframe
    pub num_t2_frames: u8,
    /// 12 bits, data symbols per T2 frame
    pub num_data_symbols: u16,
    /// 3 bits
    pub regen_flag: u8,
    /// 1 bit
    pub l1_post_extension: bool,
    /// 3 bits
    pub num_rf: u8,
    /// 3 bits
    pub current_rf_index: u8,
    /// 4 bits
    pub t2_version: u8,
    /// 1 bit
    pub l1_post_scrambled: bool,
    /// 1 bit
    pub t2_base_lite: bool,
    // 4 reserved zero bits close the block
}

impl L1PreSignalling {
    /// Serialize the 168 field bits MSB-first.
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = BitBuffer::new(L1_PRE_FIELD_BITS);
        buf.write_bits(self.stream_type.into_raw(), 8);
        buf.write_bits(self.bwt_ext as u64, 1);
        buf.write_bits(self.s1.into_raw(), 3);
        buf.write_bits(self.s2.into_raw(), 3);
        buf.write_zeroes(1);
        buf.write_bits(self.l1_repetition_flag as u64, 1);
        buf.write_bits(self.guard_interval.into_raw(), 3);
        buf.write_bits(self.papr.into_raw(), 4);
        buf.write_bits(self.l1_mod.into_raw(), 4);
        buf.write_bits(self.l1_cod as u64, 2);
        buf.write_bits(self.l1_fec_type as u64, 2);
        buf.write_bits(self.l1_post_size as u64, 18);
        buf.write_bits(self.l1_post_info_size as u64, 18);
        buf.write_bits(self.pilot_pattern.into_raw(), 4);
        buf.write_bits(self.tx_id_availability as u64, 8);
        buf.write_bits(self.cell_id as u64, 16);
        buf.write_bits(self.network_id as u64, 16);
        buf.write_bits(self.t2_system_id as u64, 16);
        buf.write_bits(self.num_t2_frames as u64, 8);
        buf.write_bits(self.num_data_symbols as u64, 12);
        buf.write_bits(self.regen_flag as u64, 3);
        buf.write_bits(self.l1_post_extension as u64, 1);
        buf.write_bits(self.num_rf as u64, 3);
        buf.write_bits(self.current_rf_index as u64, 3);
        buf.write_bits(self.t2_version as u64, 4);
        buf.write_bits(self.l1_post_scrambled as u64, 1);
        buf.write_bits(self.t2_base_lite as u64, 1);
        buf.write_zeroes(4);
        assert!(buf.get_pos() == L1_PRE_FIELD_BITS, "L1-pre field width drift");

        let mut bits = vec![0u8; L1_PRE_FIELD_BITS];
        buf.to_bitarr(&mut bits);
        bits
    }
}

/// L1-post signaling, configurable and dynamic parts of the single-PLP
/// block. The dynamic fields (`frame_idx`, `plp_start`, `plp_num_blocks`)
/// change between T2 frames; everything else is set once.
#[derive(Debug)]
pub struct L1PostSignalling {
    /// 15 bits
    pub sub_slices_per_frame: u16,
    /// 8 bits
    pub num_plp: u8,
    /// 4 bits
    pub num_aux: u8,
    /// 8 bits
    pub aux_config_rfu: u8,
    /// 3 bits
    pub rf_idx: u8,
    /// 32 bits, center frequency in Hz
    pub frequency: u32,
    /// 8 bits
    pub plp_id: u8,
    /// 3 bits
    pub plp_type: u8,
    /// 5 bits
    pub plp_payload_type: u8,
    /// 1 bit
    pub ff_flag: bool,
    /// 3 bits
    pub first_rf_idx: u8,
    /// 8 bits
    pub first_frame_idx: u8,
    /// 8 bits
    pub plp_group_id: u8,
    /// 3 bits, payload code rate
    pub plp_cod: CodeRate,
    /// 3 bits, payload constellation
    pub plp_mod: Modulation,
    /// 1 bit
    pub plp_rotation: bool,
    /// 2 bits, payload FEC frame size
    pub plp_fec_type: FecFrameSize,
    /// 10 bits
    pub plp_num_blocks_max: u16,
    /// 8 bits
    pub frame_interval: u8,
    /// 8 bits
    pub time_il_length: u8,
    /// 1 bit
    pub time_il_type: bool,
    /// 1 bit
    pub in_band_a_flag: bool,
    /// 1 bit
    pub in_band_b_flag: bool,
    /// 11 bits
    pub reserved_1: u16,
    /// 2 bits
    pub plp_mode: u8,
    /// 1 bit
    pub static_flag: bool,
    /// 1 bit
    pub static_padding_flag: bool,
    /// 2 bits
    pub fef_length_msb: u8,
    // 30 reserved zero bits
    /// 8 bits, dynamic: index of this frame in the superframe
    pub frame_idx: u8,
    /// 22 bits
    pub sub_slice_interval: u32,
    /// 22 bits
    pub type_2_start: u32,
    /// 8 bits
    pub l1_change_counter: u8,
    /// 3 bits
    pub start_rf_idx: u8,
    /// 8 bits
    pub reserved_3: u8,
    /// 8 bits, dynamic
    pub plp_id_dynamic: u8,
    /// 22 bits, dynamic: start address of the PLP
    pub plp_start: u32,
    /// 10 bits, dynamic: FEC blocks in this interleaving frame
    pub plp_num_blocks: u16,
    /// 8 bits
    pub reserved_4: u8,
    /// 8 bits
    pub reserved_5: u8,
}

impl L1PostSignalling {
    /// Serialize the 318 field bits MSB-first.
    pub fn pack(&self) -> Vec<u8> {
        let mut buf = BitBuffer::new(L1_POST_FIELD_BITS);
        buf.write_bits(self.sub_slices_per_frame as u64, 15);
        buf.write_bits(self.num_plp as u64, 8);
        buf.write_bits(self.num_aux as u64, 4);
        buf.write_bits(self.aux_config_rfu as u64, 8);
        buf.write_bits(self.rf_idx as u64, 3);
        buf.write_bits(self.frequency as u64, 32);
        buf.write_bits(self.plp_id as u64, 8);
        buf.write_bits(self.plp_type as u64, 3);
        buf.write_bits(self.plp_payload_type as u64, 5);
        buf.write_bits(self.ff_flag as u64, 1);
        buf.write_bits(self.first_rf_idx as u64, 3);
        buf.write_bits(self.first_frame_idx as u64, 8);
        buf.write_bits(self.plp_group_id as u64, 8);
        buf.write_bits(self.plp_cod.into_raw(), 3);
        buf.write_bits(self.plp_mod.into_raw(), 3);
        buf.write_bits(self.plp_rotation as u64, 1);
        buf.write_bits(self.plp_fec_type.into_raw(), 2);
        buf.write_bits(self.plp_num_blocks_max as u64, 10);
        buf.write_bits(self.frame_interval as u64, 8);
        buf.write_bits(self.time_il_length as u64, 8);
        buf.write_bits(self.time_il_type as u64, 1);
        buf.write_bits(self.in_band_a_flag as u64, 1);
        buf.write_bits(self.in_band_b_flag as u64, 1);
        buf.write_bits(self.reserved_1 as u64, 11);
        buf.write_bits(self.plp_mode as u64, 2);
        buf.write_bits(self.static_flag as u64, 1);
        buf.write_bits(self.static_padding_flag as u64, 1);
        buf.write_bits(self.fef_length_msb as u64, 2);
        buf.write_zeroes(30);
        buf.write_bits(self.frame_idx as u64, 8);
        buf.write_bits(self.sub_slice_interval as u64, 22);
        buf.write_bits(self.type_2_start as u64, 22);
        buf.write_bits(self.l1_change_counter as u64, 8);
        buf.write_bits(self.start_rf_idx as u64, 3);
        buf.write_bits(self.reserved_3 as u64, 8);
        buf.write_bits(self.plp_id_dynamic as u64, 8);
        buf.write_bits(self.plp_start as u64, 22);
        buf.write_bits(self.plp_num_blocks as u64, 10);
        buf.write_bits(self.reserved_4 as u64, 8);
        buf.write_bits(self.reserved_5 as u64, 8);
        assert!(buf.get_pos() == L1_POST_FIELD_BITS, "L1-post field width drift");

        let mut bits = vec![0u8; L1_POST_FIELD_BITS];
        buf.to_bitarr(&mut bits);
        bits
    }
}
