//! Forward error correction for L1 signaling
//!
//! The L1-pre and L1-post signaling blocks are protected by a shortened BCH
//! outer code followed by a shortened and punctured LDPC inner code, both
//! derived from the 16200-bit short FEC frame. This crate provides the
//! encoders plus the code parameter tables shared with the payload
//! interleaver.
//!
//! All bit sequences are carried as one bit value (0 or 1) per `u8` entry.

pub mod bch;
pub mod crc32;
pub mod ldpc;
pub mod ldpc_tables;
pub mod params;
pub mod puncture;

pub use bch::{BchEncoder, BCH_PARITY_BITS};
pub use crc32::{append_crc32, crc32_bits};
pub use ldpc::LdpcEncoder;
pub use params::{get_code_params, CodeParams, L1Params, L1_POST_PARAMS, L1_PRE_PARAMS};
