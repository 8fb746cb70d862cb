//! L1 signaling frame mapper
//!
//! Runs the full signaling pipeline for both P2 blocks:
//! pack, CRC, zero padding to the BCH message length, BCH, LDPC,
//! puncturing, extraction, column interleave (16/64QAM L1-post only) and
//! constellation mapping. Everything table-driven is resolved once at
//! construction; per-frame calls only touch fresh frame buffers.

use t2_config::ModulatorConfig;
use t2_core::{ConfigErr, L1Modulation};
use t2_fec::ldpc_tables::{LDPC_TAB_1_2S, LDPC_TAB_1_4S};
use t2_fec::puncture::{
    l1post_lengths, puncture, L1_POST_PUNCTURE_16QAM, L1_POST_PUNCTURE_64QAM,
    L1_POST_PUNCTURE_BQPSK, L1_PRE_N_PUNC, L1_PRE_PUNCTURE, PUNCTURED,
};
use t2_fec::{
    append_crc32, get_code_params, BchEncoder, L1Params, LdpcEncoder, BCH_PARITY_BITS,
    L1_POST_PARAMS, L1_PRE_PARAMS,
};
use tracing::trace;

use crate::bit_tables::{MUX_16, MUX_64};
use crate::constellation::ConstellationMap;
use crate::dsp_types::ComplexSample;
use crate::l1_signalling::{L1PostSignalling, L1PreSignalling};

const FRAME_SIZE_SHORT: usize = 16200;

pub struct L1FrameMapper {
    pre: L1PreSignalling,
    post: L1PostSignalling,
    bch: BchEncoder,
    ldpc_pre: LdpcEncoder,
    ldpc_post: LdpcEncoder,
    l1_constellation: L1Modulation,
    bpsk: ConstellationMap,
    l1_map: ConstellationMap,
    post_puncture: &'static [usize; 25],
    n_post: usize,
    n_punc: usize,
}

impl L1FrameMapper {
    pub fn new(cfg: &ModulatorConfig) -> Result<Self, ConfigErr> {
        // Surface invalid payload combinations at construction
        get_code_params(cfg.frame_size, cfg.code_rate)?;

        let eta = cfg.l1_constellation.bits_per_cell();
        let n_p2 = cfg.fft_size.p2_symbols();
        let (n_post, n_punc) = l1post_lengths(
            L1_POST_PARAMS.kbch,
            L1_POST_PARAMS.ksig,
            BCH_PARITY_BITS,
            eta,
            n_p2,
        );
        let post_puncture = match cfg.l1_constellation {
            L1Modulation::Bpsk | L1Modulation::Qpsk => &L1_POST_PUNCTURE_BQPSK,
            L1Modulation::Qam16 => &L1_POST_PUNCTURE_16QAM,
            L1Modulation::Qam64 => &L1_POST_PUNCTURE_64QAM,
        };

        let pre = L1PreSignalling {
            stream_type: cfg.stream_type,
            bwt_ext: cfg.extended_carrier,
            s1: cfg.preamble,
            s2: cfg.fft_size,
            l1_repetition_flag: false,
            guard_interval: cfg.guard_interval,
            papr: cfg.papr,
            l1_mod: cfg.l1_constellation,
            l1_cod: 0,
            l1_fec_type: 0,
            l1_post_size: (n_post / eta) as u32,
            l1_post_info_size: (L1_POST_PARAMS.ksig - 32) as u32,
            pilot_pattern: cfg.pilot_pattern,
            tx_id_availability: 0,
            cell_id: cfg.net.cell_id,
            network_id: cfg.net.network_id,
            t2_system_id: cfg.net.t2_system_id,
            num_t2_frames: cfg.net.num_t2_frames,
            num_data_symbols: cfg.net.num_data_symbols,
            regen_flag: 0,
            l1_post_extension: false,
            num_rf: 1,
            current_rf_index: 0,
            t2_version: 0,
            l1_post_scrambled: false,
            t2_base_lite: false,
        };

        let post = L1PostSignalling {
            sub_slices_per_frame: 1,
            num_plp: 1,
            num_aux: 0,
            aux_config_rfu: 0,
            rf_idx: 0,
            frequency: cfg.net.frequency,
            plp_id: 0,
            plp_type: 1,
            plp_payload_type: 3,
            ff_flag: false,
            first_rf_idx: 0,
            first_frame_idx: 0,
            plp_group_id: 1,
            plp_cod: cfg.code_rate,
            plp_mod: cfg.constellation,
            plp_rotation: cfg.rotation,
            plp_fec_type: cfg.frame_size,
            plp_num_blocks_max: cfg.fec_blocks,
            frame_interval: 1,
            time_il_length: cfg.time_il_length,
            time_il_type: false,
            in_band_a_flag: false,
            in_band_b_flag: false,
            reserved_1: 0,
            plp_mode: 0,
            static_flag: false,
            static_padding_flag: false,
            fef_length_msb: 0,
            frame_idx: 0,
            sub_slice_interval: 0,
            type_2_start: 0,
            l1_change_counter: 0,
            start_rf_idx: 0,
            reserved_3: 0,
            plp_id_dynamic: 0,
            plp_start: 0,
            plp_num_blocks: cfg.fec_blocks,
            reserved_4: 0,
            reserved_5: 0,
        };

        Ok(L1FrameMapper {
            pre,
            post,
            bch: BchEncoder::new(),
            ldpc_pre: LdpcEncoder::new(
                &LDPC_TAB_1_4S,
                L1_PRE_PARAMS.q,
                L1_PRE_PARAMS.nbch,
                FRAME_SIZE_SHORT,
            ),
            ldpc_post: LdpcEncoder::new(
                &LDPC_TAB_1_2S,
                L1_POST_PARAMS.q,
                L1_POST_PARAMS.nbch,
                FRAME_SIZE_SHORT,
            ),
            l1_constellation: cfg.l1_constellation,
            bpsk: ConstellationMap::bpsk(),
            l1_map: ConstellationMap::for_l1(cfg.l1_constellation),
            post_puncture,
            n_post,
            n_punc,
        })
    }

    /// L1-pre signaling record, dynamic between frames only via rebuild.
    pub fn pre(&self) -> &L1PreSignalling {
        &self.pre
    }

    /// L1-post signaling record; dynamic fields are mutated between frames.
    pub fn post_mut(&mut self) -> &mut L1PostSignalling {
        &mut self.post
    }

    /// Cells of the L1-post block per T2 frame.
    pub fn l1post_cells(&self) -> usize {
        self.n_post / self.l1_constellation.bits_per_cell()
    }

    /// CRC, zero padding to the BCH message length, BCH and LDPC.
    fn fec_encode(&self, mut bits: Vec<u8>, params: &L1Params, ldpc: &LdpcEncoder) -> Vec<u8> {
        append_crc32(&mut bits);
        assert!(bits.len() == params.ksig, "signaling block width mismatch");
        bits.resize(params.kbch, 0);
        self.bch.encode(&mut bits);
        ldpc.encode(&mut bits);
        bits
    }

    /// Flatten a punctured codeword: signaling bits, BCH parity, then the
    /// surviving LDPC parity in original order.
    fn extract(frame: &[u8], params: &L1Params) -> Vec<u8> {
        let mut out = Vec::with_capacity(params.ksig + BCH_PARITY_BITS + 1024);
        out.extend_from_slice(&frame[..params.ksig]);
        out.extend_from_slice(&frame[params.kbch..params.nbch]);
        out.extend(frame[params.nbch..].iter().filter(|&&b| b != PUNCTURED));
        out
    }

    /// Encode and map the L1-pre block. Always exactly 1840 BPSK symbols.
    pub fn l1pre_symbols(&self) -> Vec<ComplexSample> {
        let bits = self.pre.pack();
        trace!("l1pre: packed {} field bits", bits.len());

        let mut frame = self.fec_encode(bits, &L1_PRE_PARAMS, &self.ldpc_pre);
        puncture(
            &mut frame,
            L1_PRE_PARAMS.nbch,
            L1_PRE_PARAMS.q,
            &L1_PRE_PUNCTURE,
            L1_PRE_N_PUNC,
        );
        let block = Self::extract(&frame, &L1_PRE_PARAMS);
        trace!("l1pre: {} coded bits after puncturing", block.len());

        let symbols: Vec<ComplexSample> = block.iter().map(|&b| self.bpsk.map(b)).collect();
        assert!(symbols.len() == 1840, "L1-pre symbol count drift");
        symbols
    }

    /// Encode and map the L1-post block. Exactly `n_post / eta` symbols.
    pub fn l1post_symbols(&self) -> Vec<ComplexSample> {
        let bits = self.post.pack();
        trace!("l1post: packed {} field bits, frame_idx {}", bits.len(), self.post.frame_idx);

        // TODO: segmented padding when the signaling spans multiple L1-post
        // blocks; with one block per frame the pad region is all zeros
        let mut frame = self.fec_encode(bits, &L1_POST_PARAMS, &self.ldpc_post);
        puncture(
            &mut frame,
            L1_POST_PARAMS.nbch,
            L1_POST_PARAMS.q,
            self.post_puncture,
            self.n_punc,
        );
        let block = Self::extract(&frame, &L1_POST_PARAMS);
        assert!(block.len() == self.n_post, "L1-post block length drift");
        trace!("l1post: {} coded bits, {} punctured", block.len(), self.n_punc);

        let eta = self.l1_constellation.bits_per_cell();
        let symbols = match self.l1_constellation {
            L1Modulation::Bpsk => block.iter().map(|&b| self.l1_map.map(b)).collect(),
            L1Modulation::Qpsk => block
                .chunks_exact(2)
                .map(|pair| self.l1_map.map((pair[0] << 1) | pair[1]))
                .collect(),
            L1Modulation::Qam16 | L1Modulation::Qam64 => {
                // Column interleave (zero twist), then demux two cells per
                // row tuple
                let cols = eta * 2;
                let rows = self.n_post / cols;
                let mux: &[usize] = if cols == 8 { &MUX_16 } else { &MUX_64 };

                let mut symbols = Vec::with_capacity(self.n_post / eta);
                for row in 0..rows {
                    let mut pack = 0u16;
                    for &m in mux {
                        pack = (pack << 1) | block[m * rows + row] as u16;
                    }
                    symbols.push(self.l1_map.map((pack >> eta) as u8));
                    symbols.push(self.l1_map.map((pack & ((1 << eta) - 1)) as u8));
                }
                symbols
            }
        };
        assert!(symbols.len() == self.n_post / eta, "L1-post symbol count drift");
        symbols
    }
}
