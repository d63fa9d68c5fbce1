//! AX.25 UI-frame construction and line coding.
//!
//! Covers `spec.md` §4.1–§4.3: address/frame encoding with CRC-16 FCS, LSB-
//! first bit serialization with bit-stuffing, and NRZI line coding.

pub mod address;
pub mod bitstream;
pub mod crc;
pub mod frame;

pub use address::{Address, DigiPath};
pub use frame::Frame;
