//! CBC-MAC of CCM*.
//!
//! The chain is seeded with the encrypted nonce block carrying the payload
//! length, then absorbs the big-endian header length followed by the header
//! and payload bytes as one continuous stream. Unlike RFC 3610 no padding
//! separates the header from the payload.

use crate::cipher::{Block, BlockCipher, BLOCK_SIZE};
use crate::nonce::{derive_block, Nonce, MIC_SEED_MASK};

/// Largest MIC this implementation produces, in bytes.
pub const MAX_MIC_LEN: usize = 4;

/// Streaming CBC-MAC state: the chaining block and how much of it is filled.
pub(crate) struct MicAccumulator<'c, C: ?Sized> {
    cipher: &'c C,
    block: Block,
    cursor: usize,
}

impl<'c, C: BlockCipher + ?Sized> MicAccumulator<'c, C> {
    /// Seeds the chain for a header of `auth_len` and a payload of
    /// `payload_len` bytes.
    pub(crate) fn new(
        cipher: &'c C,
        nonce: &Nonce,
        auth_len: u16,
        payload_len: u16,
    ) -> Self {
        let mut block = derive_block(cipher, nonce, MIC_SEED_MASK, payload_len);
        // The header length takes the first two bytes of the chain
        block[0] ^= (auth_len >> 8) as u8;
        block[1] ^= auth_len as u8;

        MicAccumulator {
            cipher,
            block,
            cursor: 2,
        }
    }

    pub(crate) fn feed(&mut self, data: &[u8]) {
        for byte in data {
            self.block[self.cursor] ^= byte;
            self.cursor += 1;
            if self.cursor == BLOCK_SIZE {
                self.cipher.encrypt_block(&mut self.block);
                self.cursor = 0;
            }
        }
    }

    /// Closes a partial final block and returns the untruncated tag.
    pub(crate) fn finish(mut self) -> [u8; MAX_MIC_LEN] {
        if self.cursor != 0 {
            self.cipher.encrypt_block(&mut self.block);
        }
        let mut mic = [0u8; MAX_MIC_LEN];
        mic.copy_from_slice(&self.block[..MAX_MIC_LEN]);
        mic
    }
}

/// Computes the plaintext MIC over `auth` followed by `payload`.
///
/// Both lengths must already be known to fit in 16 bits. The caller keeps
/// the first `mic_len` bytes of the result.
pub(crate) fn compute_mic<C: BlockCipher + ?Sized>(
    cipher: &C,
    nonce: &Nonce,
    auth: &[u8],
    payload: &[u8],
) -> [u8; MAX_MIC_LEN] {
    let auth_len = auth.len() as u16;
    let payload_len = payload.len() as u16;

    let mut acc = MicAccumulator::new(cipher, nonce, auth_len, payload_len);
    acc.feed(auth);
    acc.feed(payload);
    acc.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::MockBlockCipher;
    use aes::cipher::generic_array::GenericArray;
    use aes::cipher::KeyInit;
    use aes::Aes128;

    fn cipher() -> Aes128 {
        let key = hex!("C0C1C2C3C4C5C6C7C8C9CACBCCCDCECF");
        Aes128::new(GenericArray::from_slice(&key))
    }

    fn nonce() -> Nonce {
        Nonce::from(hex!("59 00000003020100A0A1A2A3A4A5 0000"))
    }

    #[test]
    fn split_feed_matches_single_feed() {
        let auth = hex!("202122232425262728292A2B2C2D");
        let payload = hex!("404142434445464748494A4B4C4D4E4F50515253");
        let cipher = cipher();

        let mut split = MicAccumulator::new(&cipher, &nonce(), 14, 20);
        split.feed(&auth);
        split.feed(&payload);

        let mut joined = MicAccumulator::new(&cipher, &nonce(), 14, 20);
        let mut stream = [0u8; 34];
        stream[..14].copy_from_slice(&auth);
        stream[14..].copy_from_slice(&payload);
        joined.feed(&stream);

        assert_eq!(split.finish(), joined.finish());
    }

    #[test]
    fn header_and_payload_form_one_stream() {
        let data = hex!("000102030405060708090A0B0C0D0E0F1011121314");
        let cipher = cipher();

        // Same bytes, boundary moved: only the length fields tell them apart
        let a = compute_mic(&cipher, &nonce(), &data[..5], &data[5..]);
        let mut acc = MicAccumulator::new(&cipher, &nonce(), 5, 16);
        for byte in data.iter() {
            acc.feed(core::slice::from_ref(byte));
        }
        assert_eq!(a, acc.finish());

        let b = compute_mic(&cipher, &nonce(), &data[..9], &data[9..]);
        assert_ne!(a, b);
    }

    #[test]
    fn seed_length_is_bound() {
        let payload = hex!("0102030405");
        let cipher = cipher();

        let mut honest = MicAccumulator::new(&cipher, &nonce(), 0, 5);
        honest.feed(&payload);
        let mut lying = MicAccumulator::new(&cipher, &nonce(), 0, 6);
        lying.feed(&payload);
        assert_ne!(honest.finish(), lying.finish());
    }

    #[test]
    fn empty_regions() {
        let cipher = cipher();
        let empty = compute_mic(&cipher, &nonce(), &[], &[]);
        let header_only = compute_mic(&cipher, &nonce(), &[0x00], &[]);
        let payload_only = compute_mic(&cipher, &nonce(), &[], &[0x00]);
        assert_ne!(empty, header_only);
        assert_ne!(header_only, payload_only);
    }

    #[test]
    fn full_final_block_needs_no_extra_pass() {
        // Seed, then one compression when 2 + 14 bytes fill the block
        let mut cipher = MockBlockCipher::new();
        cipher.expect_encrypt_block().times(2).return_const(());
        compute_mic(&cipher, &Nonce::default(), &[0u8; 6], &[0u8; 8]);
    }

    #[test]
    fn partial_final_block_is_closed() {
        // Seed, one full block and the partial remainder
        let mut cipher = MockBlockCipher::new();
        cipher.expect_encrypt_block().times(3).return_const(());
        compute_mic(&cipher, &Nonce::default(), &[0u8; 3], &[0u8; 20]);
    }

    #[test]
    fn empty_regions_still_close_the_seed() {
        // The length prefix leaves the cursor at 2
        let mut cipher = MockBlockCipher::new();
        cipher.expect_encrypt_block().times(2).return_const(());
        compute_mic(&cipher, &Nonce::default(), &[], &[]);
    }
}
