//! IEEE 802.15.4 security levels.

use crate::error::Error;

// L = 2: the variable field is two bytes wide
const LENGTH_FIELD_FLAGS: u8 = 0x01;
const ADATA_FLAG: u8 = 0x40;

/// The security levels this implementation can serve.
///
/// The low two bits of the level select the MIC size (0, 4, 8 or 16 bytes)
/// and bit 2 turns on encryption. Only MICs of up to 4 bytes are produced,
/// so levels 2, 3, 6 and 7 are refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum SecurityLevel {
    /// No security.
    None = 0,
    /// Authentication with a 32-bit MIC.
    Mic32 = 1,
    /// Encryption only.
    Enc = 4,
    /// Encryption and a 32-bit MIC.
    EncMic32 = 5,
}

impl SecurityLevel {
    /// MIC length in bytes.
    pub fn mic_len(self) -> u8 {
        match self {
            SecurityLevel::None | SecurityLevel::Enc => 0,
            SecurityLevel::Mic32 | SecurityLevel::EncMic32 => 4,
        }
    }

    /// Whether the payload is encrypted.
    pub fn encrypts(self) -> bool {
        self as u8 & 0x04 != 0
    }

    /// The CCM* flags byte for a nonce used at this level.
    ///
    /// ```text
    ///   0-2 bits: L - 1, always 1 here
    ///   3-5 bits: MIC length, encoded as (mlen - 2) / 2, or 0 without MIC
    ///   6: Adata (whether any bytes are authenticated)
    ///   7: always 0
    /// ```
    pub fn nonce_flags(self, adata: bool) -> u8 {
        let mlen = self.mic_len();
        let m = if mlen > 0 { (mlen - 2) / 2 } else { 0 };
        let a = if adata { ADATA_FLAG } else { 0 };
        a | m << 3 | LENGTH_FIELD_FLAGS
    }
}

impl TryFrom<u8> for SecurityLevel {
    type Error = Error;

    fn try_from(level: u8) -> Result<Self, Error> {
        match level {
            0 => Ok(SecurityLevel::None),
            1 => Ok(SecurityLevel::Mic32),
            4 => Ok(SecurityLevel::Enc),
            5 => Ok(SecurityLevel::EncMic32),
            _ => Err(Error::UnsupportedSecurityLevel(level)),
        }
    }
}

impl From<SecurityLevel> for u8 {
    fn from(level: SecurityLevel) -> u8 {
        level as u8
    }
}
