//! [`aead`] trait implementations for AES-128 CCM*.

use core::marker::PhantomData;

use aead::consts::{U0, U16, U4};
use aead::generic_array::ArrayLength;
use aead::{AeadCore, AeadInPlace, Key, KeyInit, KeySizeUser, Tag};
use aes::Aes128;

use crate::ccm::CcmStar;
use crate::keystream::{apply_keystream, PAYLOAD_COUNTER};
use crate::nonce::{Nonce, NONCE_LEN};

mod private {
    pub trait Sealed {}
}

/// MIC sizes usable as an [`AeadCore::TagSize`].
///
/// Implemented for `U0` (encryption only) and `U4` (32-bit MIC).
pub trait MicSize: ArrayLength<u8> + private::Sealed + 'static {}

impl private::Sealed for U0 {}
impl MicSize for U0 {}

impl private::Sealed for U4 {}
impl MicSize for U4 {}

/// AES-128 CCM* behind the RustCrypto [`AeadInPlace`] interface.
///
/// The [`AeadCore::NonceSize`] is a full 16-byte CCM* nonce and `M` selects
/// the MIC length. Decryption failures restore the buffer to ciphertext, so
/// unlike [`CcmStar::decrypt_packet`] no unauthenticated plaintext is left
/// behind.
#[derive(Clone)]
pub struct Aes128CcmStar<M: MicSize> {
    ccm: CcmStar<Aes128>,
    mic_size: PhantomData<M>,
}

impl<M: MicSize> Aes128CcmStar<M> {
    /// The underlying [`CcmStar`] instance.
    pub fn ccm(&self) -> &CcmStar<Aes128> {
        &self.ccm
    }
}

impl<M: MicSize> From<Aes128> for Aes128CcmStar<M> {
    fn from(cipher: Aes128) -> Self {
        Aes128CcmStar {
            ccm: CcmStar::new(cipher),
            mic_size: PhantomData,
        }
    }
}

impl<M: MicSize> KeySizeUser for Aes128CcmStar<M> {
    type KeySize = U16;
}

impl<M: MicSize> KeyInit for Aes128CcmStar<M> {
    fn new(key: &Key<Self>) -> Self {
        Aes128::new(key).into()
    }
}

impl<M: MicSize> AeadCore for Aes128CcmStar<M> {
    type NonceSize = U16;
    type TagSize = M;
    type CiphertextOverhead = U0;
}

impl<M: MicSize> AeadInPlace for Aes128CcmStar<M> {
    fn encrypt_in_place_detached(
        &self,
        nonce: &aead::Nonce<Self>,
        associated_data: &[u8],
        buffer: &mut [u8],
    ) -> aead::Result<Tag<Self>> {
        let nonce = ccm_nonce(nonce);
        let mut tag = Tag::<Self>::default();
        self.ccm
            .encrypt(&nonce, associated_data, buffer, tag.as_mut_slice())
            .map_err(|_| aead::Error)?;
        Ok(tag)
    }

    fn decrypt_in_place_detached(
        &self,
        nonce: &aead::Nonce<Self>,
        associated_data: &[u8],
        buffer: &mut [u8],
        tag: &Tag<Self>,
    ) -> aead::Result<()> {
        let nonce = ccm_nonce(nonce);
        let mut received = tag.clone();
        let verified = self
            .ccm
            .decrypt_detached(
                &nonce,
                associated_data,
                buffer,
                received.as_mut_slice(),
            )
            .map_err(|_| aead::Error)?;

        if !verified {
            apply_keystream(self.ccm.cipher(), &nonce, PAYLOAD_COUNTER, buffer);
            return Err(aead::Error);
        }
        Ok(())
    }
}

fn ccm_nonce(bytes: &[u8]) -> Nonce {
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(bytes);
    Nonce::from(nonce)
}
