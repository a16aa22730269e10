//! Counter-mode keystream of CCM*.
//!
//! Counter block `i` is the nonce with its flags masked by [`COUNTER_MASK`]
//! and `i` in the variable field. Counter 0 protects the MIC and the payload
//! starts at counter 1, so for a fixed nonce the two never share keystream.

use crate::cipher::{BlockCipher, BLOCK_SIZE};
use crate::nonce::{derive_block, Nonce, COUNTER_MASK};

/// First counter, reserved for the MIC.
pub const MIC_COUNTER: u16 = 0;

/// First counter of the payload keystream.
pub const PAYLOAD_COUNTER: u16 = 1;

/// XORs `data` with the keystream starting at counter `start`.
///
/// Applying it twice with the same `start` and nonce is the identity.
/// `data` must not need more than `u16::MAX - start + 1` blocks, which holds
/// for any region whose length fits the 16-bit length field.
pub(crate) fn apply_keystream<C: BlockCipher + ?Sized>(
    cipher: &C,
    nonce: &Nonce,
    start: u16,
    data: &mut [u8],
) {
    let mut counter = start;
    for chunk in data.chunks_mut(BLOCK_SIZE) {
        let block = derive_block(cipher, nonce, COUNTER_MASK, counter);
        for (byte, key) in chunk.iter_mut().zip(block.iter()) {
            *byte ^= key;
        }
        counter = counter.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::MockBlockCipher;
    use aes::cipher::generic_array::GenericArray;
    use aes::cipher::KeyInit;
    use aes::Aes128;

    fn rfc3610_cipher() -> Aes128 {
        let key = hex!("C0C1C2C3C4C5C6C7C8C9CACBCCCDCECF");
        Aes128::new(GenericArray::from_slice(&key))
    }

    // RFC 3610 packet vector 1, whose B0 flags 0x59 reduce to the standard
    // counter flags 0x01 under the counter mask.
    #[test]
    fn rfc3610_payload_keystream() {
        let cipher = rfc3610_cipher();
        let nonce = Nonce::from(hex!("59 00000003020100A0A1A2A3A4A5 0000"));
        let mut data =
            hex!("08090A0B0C0D0E0F101112131415161718191A1B1C1D1E");

        apply_keystream(&cipher, &nonce, PAYLOAD_COUNTER, &mut data);
        assert_eq!(
            hex!("588C979A61C663D2F066D0C2C0F989806D5F6B61DAC384"),
            data
        );
    }

    #[test]
    fn self_inverse() {
        let cipher = rfc3610_cipher();
        let nonce = Nonce::from(hex!("01 0102030405060708 0A0B0C0D 05 0000"));
        let original = [0x42u8; 37];

        let mut data = original;
        apply_keystream(&cipher, &nonce, PAYLOAD_COUNTER, &mut data);
        assert_ne!(original, data);
        apply_keystream(&cipher, &nonce, PAYLOAD_COUNTER, &mut data);
        assert_eq!(original, data);
    }

    #[test]
    fn counter_domains_differ() {
        let cipher = rfc3610_cipher();
        let nonce = Nonce::from(hex!("01 0102030405060708 0A0B0C0D 05 0000"));

        let mut mic = [0u8; 4];
        let mut payload = [0u8; 4];
        apply_keystream(&cipher, &nonce, MIC_COUNTER, &mut mic);
        apply_keystream(&cipher, &nonce, PAYLOAD_COUNTER, &mut payload);
        assert_ne!(mic, payload);
    }

    #[test]
    fn continues_across_blocks() {
        let cipher = rfc3610_cipher();
        let nonce = Nonce::from(hex!("01 0102030405060708 0A0B0C0D 05 0000"));

        let mut whole = [0u8; 32];
        apply_keystream(&cipher, &nonce, PAYLOAD_COUNTER, &mut whole);
        let mut second = [0u8; 16];
        apply_keystream(&cipher, &nonce, PAYLOAD_COUNTER + 1, &mut second);
        assert_eq!(&whole[16..], &second[..]);
    }

    #[test]
    fn empty_region_is_noop() {
        let mut cipher = MockBlockCipher::new();
        cipher.expect_encrypt_block().never();
        apply_keystream(&cipher, &Nonce::default(), PAYLOAD_COUNTER, &mut []);
    }

    #[test]
    fn one_block_per_sixteen_bytes() {
        let mut cipher = MockBlockCipher::new();
        cipher.expect_encrypt_block().times(3).return_const(());
        let mut data = [0u8; 33];
        apply_keystream(&cipher, &Nonce::default(), PAYLOAD_COUNTER, &mut data);
    }
}
