//! CCM* implementation.

use crate::cipher::BlockCipher;
use crate::error::Error;
use crate::keystream::{apply_keystream, MIC_COUNTER, PAYLOAD_COUNTER};
use crate::level::SecurityLevel;
use crate::mic::{compute_mic, MAX_MIC_LEN};
use crate::nonce::Nonce;

// Both region lengths travel in 16-bit fields
const CCM_REGION_MAX_BYTES: usize = u16::MAX as usize;

/// The CCM* instance.
///
/// Owns the keyed block cipher. Nonces are supplied per call and only read.
#[derive(Debug, Clone)]
pub struct CcmStar<C> {
    cipher: C,
}

impl<C: BlockCipher> CcmStar<C> {
    /// Creates a new `CcmStar` around a keyed block cipher.
    pub fn new(cipher: C) -> Self {
        CcmStar { cipher }
    }

    /// The block cipher in use.
    pub fn cipher(&self) -> &C {
        &self.cipher
    }

    /// CCM* tag generation and encryption procedure.
    ///
    /// Encrypts `payload` in place and writes the encrypted MIC into
    /// `mic_out`, whose length (0 to 4) selects the MIC length. An empty
    /// `mic_out` disables authentication altogether.
    ///
    /// # Details
    /// The MIC is computed over the plaintext before the payload is
    /// encrypted:
    /// ```text
    /// X0 = E(seed block with variable field = payload length)
    /// X0[0..2] ^= length(auth)
    /// chain auth || payload into X0 from offset 2, no padding in between
    /// MIC = first mic_len bytes of the final chain
    /// ```
    /// The MIC is then XORed with the counter 0 keystream and the payload
    /// with the keystream starting at counter 1. Counter blocks keep only
    /// the two low flags bits:
    /// ```text
    /// A_i = [FLAGS & 0x03 | nonce[1..14] | i (2 bytes, big-endian)]
    /// ```
    pub fn encrypt(
        &self,
        nonce: &Nonce,
        auth: &[u8],
        payload: &mut [u8],
        mic_out: &mut [u8],
    ) -> Result<(), Error> {
        let mic_len = mic_out.len();
        check_mic_len(mic_len)?;
        check_region(auth.len())?;
        check_region(payload.len())?;

        log::trace!(
            "CCM* encrypt: {} byte header, {} byte payload, {} byte MIC",
            auth.len(),
            payload.len(),
            mic_len
        );

        // Authentication ----------------------------------------------------

        if mic_len > 0 {
            let mic = compute_mic(&self.cipher, nonce, auth, payload);
            mic_out.copy_from_slice(&mic[..mic_len]);
            apply_keystream(&self.cipher, nonce, MIC_COUNTER, mic_out);
        }

        // Encryption --------------------------------------------------------

        apply_keystream(&self.cipher, nonce, PAYLOAD_COUNTER, payload);

        Ok(())
    }

    /// Encrypts a packet laid out contiguously as
    /// `[auth (auth_len) | payload (encrypt_len) | MIC (mic_len)]`.
    ///
    /// The MIC slot is overwritten. Bytes past the MIC are left alone.
    pub fn encrypt_packet(
        &self,
        nonce: &Nonce,
        packet: &mut [u8],
        auth_len: usize,
        encrypt_len: usize,
        mic_len: u8,
    ) -> Result<(), Error> {
        let mic_len = usize::from(mic_len);
        check_mic_len(mic_len)?;
        let needed =
            auth_len.saturating_add(encrypt_len).saturating_add(mic_len);
        if packet.len() < needed {
            log::debug!(
                "packet of {} bytes too short for {} bytes",
                packet.len(),
                needed
            );
            return Err(Error::InvalidPacketLen {
                len: packet.len(),
                needed,
            });
        }

        let (auth, rest) = packet.split_at_mut(auth_len);
        let (payload, rest) = rest.split_at_mut(encrypt_len);
        self.encrypt(nonce, auth, payload, &mut rest[..mic_len])
    }

    /// CCM* decryption and tag verification procedure.
    ///
    /// `payload` holds the ciphertext followed by the `mic_len`-byte MIC.
    /// Returns `Ok(true)` when the MIC verifies, or unconditionally when
    /// `mic_len` is 0.
    ///
    /// The ciphertext is decrypted in place *before* the MIC is checked, and
    /// the MIC bytes are left decrypted as well. On `Ok(false)` the buffer
    /// holds unauthenticated plaintext that must be discarded.
    pub fn decrypt_packet(
        &self,
        nonce: &Nonce,
        auth: &[u8],
        payload: &mut [u8],
        mic_len: u8,
    ) -> Result<bool, Error> {
        let mic_len = usize::from(mic_len);
        check_mic_len(mic_len)?;
        if payload.len() < mic_len {
            return Err(Error::InvalidPacketLen {
                len: payload.len(),
                needed: mic_len,
            });
        }

        let plen = payload.len() - mic_len;
        let (data, received) = payload.split_at_mut(plen);
        self.decrypt_detached(nonce, auth, data, received)
    }

    /// Decrypts `data` in place and verifies the encrypted MIC `received`,
    /// which is decrypted in place too.
    pub(crate) fn decrypt_detached(
        &self,
        nonce: &Nonce,
        auth: &[u8],
        data: &mut [u8],
        received: &mut [u8],
    ) -> Result<bool, Error> {
        let mic_len = received.len();
        check_mic_len(mic_len)?;
        check_region(auth.len())?;
        check_region(data.len())?;

        log::trace!(
            "CCM* decrypt: {} byte header, {} byte payload, {} byte MIC",
            auth.len(),
            data.len(),
            mic_len
        );

        // Decryption --------------------------------------------------------

        apply_keystream(&self.cipher, nonce, PAYLOAD_COUNTER, data);

        if mic_len == 0 {
            return Ok(true);
        }

        // Verification ------------------------------------------------------

        apply_keystream(&self.cipher, nonce, MIC_COUNTER, received);
        let expected = compute_mic(&self.cipher, nonce, auth, data);

        // Every byte is compared
        let diff = received
            .iter()
            .zip(&expected[..mic_len])
            .fold(0u8, |acc, (a, b)| acc | (a ^ b));
        if diff != 0 {
            log::debug!("CCM* MIC mismatch on {} byte payload", data.len());
            return Ok(false);
        }

        Ok(true)
    }

    /// Secures an 802.15.4 frame laid out as
    /// `[header (header_len) | payload | MIC (level.mic_len())]`.
    ///
    /// Encrypting levels encrypt the payload and authenticate the header.
    /// MIC-only levels authenticate header and payload together and leave
    /// both readable. [`SecurityLevel::None`] changes nothing.
    pub fn seal_frame(
        &self,
        nonce: &Nonce,
        frame: &mut [u8],
        header_len: usize,
        level: SecurityLevel,
    ) -> Result<(), Error> {
        let mic_len = level.mic_len();
        let body_len = body_len(frame.len(), header_len, mic_len)?;

        let (auth_len, encrypt_len) = if level.encrypts() {
            (header_len, body_len)
        } else {
            (header_len + body_len, 0)
        };
        self.encrypt_packet(nonce, frame, auth_len, encrypt_len, mic_len)
    }

    /// Reverses [`seal_frame`](Self::seal_frame).
    ///
    /// Like [`decrypt_packet`](Self::decrypt_packet), the payload is
    /// decrypted in place even when `Ok(false)` is returned.
    pub fn open_frame(
        &self,
        nonce: &Nonce,
        frame: &mut [u8],
        header_len: usize,
        level: SecurityLevel,
    ) -> Result<bool, Error> {
        let mic_len = level.mic_len();
        let body_len = body_len(frame.len(), header_len, mic_len)?;

        let split = if level.encrypts() {
            header_len
        } else {
            header_len + body_len
        };
        let (auth, rest) = frame.split_at_mut(split);
        self.decrypt_packet(nonce, auth, rest, mic_len)
    }
}

fn check_mic_len(mic_len: usize) -> Result<(), Error> {
    if mic_len > MAX_MIC_LEN {
        log::debug!("rejected MIC length {}", mic_len);
        return Err(Error::InvalidMicLen(mic_len));
    }
    Ok(())
}

fn check_region(len: usize) -> Result<(), Error> {
    if len > CCM_REGION_MAX_BYTES {
        log::debug!("rejected {} byte region", len);
        return Err(Error::UnsupportedSize(len));
    }
    Ok(())
}

fn body_len(
    frame_len: usize,
    header_len: usize,
    mic_len: u8,
) -> Result<usize, Error> {
    let needed = header_len.saturating_add(usize::from(mic_len));
    if frame_len < needed {
        return Err(Error::InvalidPacketLen {
            len: frame_len,
            needed,
        });
    }
    Ok(frame_len - needed)
}
