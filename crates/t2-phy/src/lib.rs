//! Physical layer bit processing for the t2cast modulator
//!
//! Covers the two P2-symbol signaling blocks (L1-pre and L1-post) from
//! field packing through FEC to constellation cells, and the payload
//! FEC frame bit interleaver that sits between the LDPC encoder and the
//! cell mapper.

pub mod bit_tables;
pub mod constellation;
pub mod dsp_types;
pub mod interleaver;
pub mod l1_mapper;
pub mod l1_signalling;

pub use constellation::ConstellationMap;
pub use dsp_types::{ComplexSample, RealSample};
pub use interleaver::BitInterleaver;
pub use l1_mapper::L1FrameMapper;
pub use l1_signalling::{L1PostSignalling, L1PreSignalling};
