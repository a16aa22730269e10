//! A pure-Rust, `#![no_std]`, zero-allocation implementation of CCM*, the
//! authenticated encryption mode of IEEE 802.15.4 and Zigbee link-layer
//! security, built on [RustCrypto's AES].
//!
//! ## Overview
//! CCM* extends CCM (for "Counter with CBC-MAC", [RFC 3610]) so that
//! integrity can be switched off. One AES-128 key provides both:
//! - confidentiality, by XORing the payload with a counter-mode keystream,
//! - integrity, with a CBC-MAC based MIC carried after the payload.
//!
//! This implementation accepts:
//! 1. Both non-empty header and payload (it encrypts the payload and
//!    authenticates both).
//! 2. Empty header (it encrypts and authenticates the payload).
//! 3. Empty payload (it degenerates to authenticating the header).
//! 4. A MIC length of 0 (it only encrypts).
//!
//! Header and payload may each be up to 2^16 - 1 bytes and the MIC up to 4
//! bytes long. The nonce is a ready-made 16-byte block: flags, source
//! address, frame counter, security control and a 2-byte field that CCM*
//! overwrites for every block it derives.
//!
//! The header length is chained straight into the seed block and the header
//! and payload bytes follow without padding between them. For headers of
//! 14 bytes this coincides with RFC 3610, other lengths differ.
//!
//! ## Usage
//! ```rust
//! use aes::cipher::{generic_array::GenericArray, KeyInit};
//! use aes::Aes128;
//! use ccm_star::{CcmStar, Nonce, SecurityLevel};
//!
//! let key = [
//!     0x5A, 0x69, 0x67, 0x42, 0x65, 0x65, 0x41, 0x6C, 0x6C, 0x69, 0x61,
//!     0x6E, 0x63, 0x65, 0x30, 0x39,
//! ];
//! let ccm = CcmStar::new(Aes128::new(GenericArray::from_slice(&key)));
//!
//! let level = SecurityLevel::EncMic32;
//! let nonce = Nonce::new(
//!     level.nonce_flags(true),
//!     [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08],
//!     [0x00, 0x00, 0x00, 0x01],
//!     0x05,
//! );
//!
//! // [header (4) | payload (5) | MIC (4)]
//! let mut packet = [
//!     0x41, 0x88, 0xAB, 0x34, 0x10, 0x20, 0x30, 0x40, 0x50, 0, 0, 0, 0,
//! ];
//! let plaintext = packet;
//!
//! ccm.encrypt_packet(&nonce, &mut packet, 4, 5, level.mic_len())
//!     .unwrap();
//! assert_eq!(&packet[..4], &plaintext[..4]);
//! assert_ne!(&packet[4..9], &plaintext[4..9]);
//!
//! let (header, rest) = packet.split_at_mut(4);
//! let authentic = ccm
//!     .decrypt_packet(&nonce, header, rest, level.mic_len())
//!     .unwrap();
//! assert!(authentic);
//! assert_eq!(&rest[..5], &plaintext[4..9]);
//! ```
//!
//! Frames can also be handled by security level with
//! [`CcmStar::seal_frame`] and [`CcmStar::open_frame`].
//!
//! ## Unauthenticated plaintext
//! [`CcmStar::decrypt_packet`] decrypts the payload before it checks the
//! MIC, so a `false` result leaves unauthenticated plaintext in the buffer
//! which must be thrown away. The [`aead`] interface of [`Aes128CcmStar`]
//! restores the ciphertext instead:
//!
//! ```rust
//! use ccm_star::{
//!     aead::{consts::U4, generic_array::GenericArray, AeadInPlace, KeyInit},
//!     Aes128CcmStar,
//! };
//!
//! let ccm = Aes128CcmStar::<U4>::new(&GenericArray::from([0u8; 16]));
//! let nonce = GenericArray::from([0u8; 16]);
//!
//! let mut buffer = [0x01, 0x02, 0x03];
//! let tag = ccm
//!     .encrypt_in_place_detached(&nonce, b"header", &mut buffer)
//!     .unwrap();
//! let ciphertext = buffer;
//!
//! assert!(ccm
//!     .decrypt_in_place_detached(&nonce, b"tampered", &mut buffer, &tag)
//!     .is_err());
//! assert_eq!(buffer, ciphertext);
//! ```
//!
//! ## Security
//! This hasn't been audited in any way, and the code makes no attempt at
//! being constant-time beyond the MIC comparison.
//!
//! A 32-bit MIC is short: it bounds the forgery probability per attempt to
//! 2^-32 at best. As with any counter mode, reusing a nonce with the same
//! key destroys confidentiality, and the nonce frame counter is what keeps
//! nonces unique.
//!
//! [RustCrypto's AES]: https://github.com/RustCrypto/block-ciphers
//! [RFC 3610]: https://tools.ietf.org/html/rfc3610

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(test)]
#[macro_use]
extern crate hex_literal;

mod ccm;
mod cipher;
mod error;
mod keystream;
mod level;
mod mic;
mod mode;
mod nonce;

pub use aead;
pub use ccm::CcmStar;
pub use cipher::{Block, BlockCipher, BLOCK_SIZE};
pub use error::Error;
pub use level::SecurityLevel;
pub use mic::MAX_MIC_LEN;
pub use mode::{Aes128CcmStar, MicSize};
pub use nonce::{
    derive_block, Nonce, COUNTER_MASK, MIC_SEED_MASK, NONCE_LEN,
};
