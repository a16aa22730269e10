//! The single-block primitive every CCM* step is built from.

use aes::cipher::generic_array::GenericArray;
use aes::cipher::BlockEncrypt;
use aes::Aes128;

/// Size of an AES block in bytes.
pub const BLOCK_SIZE: usize = 16;

/// One AES block.
pub type Block = [u8; BLOCK_SIZE];

/// A block cipher bound to a fixed 128-bit key.
///
/// Only the forward direction is needed: CCM* derives both its keystream and
/// its MIC from encryptions. Implementations may be software AES or a
/// hardware engine, but must be infallible for a full block.
#[cfg_attr(test, mockall::automock)]
pub trait BlockCipher {
    /// Encrypts `block` in place.
    fn encrypt_block(&self, block: &mut Block);
}

impl BlockCipher for Aes128 {
    fn encrypt_block(&self, block: &mut Block) {
        BlockEncrypt::encrypt_block(self, GenericArray::from_mut_slice(block));
    }
}

impl<C: BlockCipher + ?Sized> BlockCipher for &C {
    fn encrypt_block(&self, block: &mut Block) {
        (**self).encrypt_block(block);
    }
}
