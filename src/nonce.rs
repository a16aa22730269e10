//! The 16-byte CCM* nonce and the blocks derived from it.
//!
//! ```text
//! offset  size  field
//!      0     1  flags
//!      1     8  source identifier
//!      9     4  frame counter
//!     13     1  security control
//!     14     2  variable field (big-endian)
//! ```
//!
//! Bytes 1 to 13 are opaque here. Every derived block starts from a copy of
//! the nonce, masks the flags and overwrites the variable field, so the
//! caller's nonce is never touched.

use crate::cipher::{Block, BlockCipher, BLOCK_SIZE};

/// Size of a nonce in bytes.
pub const NONCE_LEN: usize = BLOCK_SIZE;

/// Flags mask for the MIC seed block, every flag bit is kept.
pub const MIC_SEED_MASK: u8 = 0xFF;

/// Flags mask for keystream counter blocks.
///
/// Only the length-field width survives, the Adata and MIC-length bits are
/// meaningful for the seed block alone.
pub const COUNTER_MASK: u8 = 0x03;

const SOURCE: core::ops::Range<usize> = 1..9;
const FRAME_COUNTER: core::ops::Range<usize> = 9..13;
const SECURITY_CONTROL: usize = 13;
const VARIABLE_HI: usize = 14;
const VARIABLE_LO: usize = 15;

/// A CCM* nonce template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Nonce([u8; NONCE_LEN]);

impl Nonce {
    /// Lays out a nonce from its fields, leaving the variable field zeroed.
    pub fn new(
        flags: u8,
        source: [u8; 8],
        frame_counter: [u8; 4],
        security_control: u8,
    ) -> Self {
        let mut bytes = [0u8; NONCE_LEN];
        bytes[0] = flags;
        bytes[SOURCE].copy_from_slice(&source);
        bytes[FRAME_COUNTER].copy_from_slice(&frame_counter);
        bytes[SECURITY_CONTROL] = security_control;
        Nonce(bytes)
    }

    pub fn flags(&self) -> u8 {
        self.0[0]
    }

    pub fn source(&self) -> &[u8] {
        &self.0[SOURCE]
    }

    pub fn frame_counter(&self) -> &[u8] {
        &self.0[FRAME_COUNTER]
    }

    pub fn security_control(&self) -> u8 {
        self.0[SECURITY_CONTROL]
    }

    pub fn as_bytes(&self) -> &[u8; NONCE_LEN] {
        &self.0
    }
}

impl From<[u8; NONCE_LEN]> for Nonce {
    fn from(bytes: [u8; NONCE_LEN]) -> Self {
        Nonce(bytes)
    }
}

impl AsRef<[u8]> for Nonce {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Derives one block from `nonce` and returns it already encrypted.
///
/// The flags byte is ANDed with `mask` and `variable` lands big-endian in
/// the last two bytes before the block goes through `cipher`.
pub fn derive_block<C: BlockCipher + ?Sized>(
    cipher: &C,
    nonce: &Nonce,
    mask: u8,
    variable: u16,
) -> Block {
    let mut block = nonce.0;
    block[0] &= mask;
    block[VARIABLE_HI] = (variable >> 8) as u8;
    block[VARIABLE_LO] = variable as u8;
    cipher.encrypt_block(&mut block);
    block
}
