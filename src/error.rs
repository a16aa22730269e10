//! CCM* errors.

/// The error type for CCM*.
///
/// Every variant describes a malformed request. A MIC that fails to verify
/// is not an error, see [`CcmStar::decrypt_packet`].
///
/// [`CcmStar::decrypt_packet`]: crate::CcmStar::decrypt_packet
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Wrong MIC length.
    #[error("bad MIC length {0}, allowed sizes are 0 to 4")]
    InvalidMicLen(usize),
    /// A region does not fit the 16-bit length field.
    #[error("region of {0} bytes exceeds the 16-bit length field")]
    UnsupportedSize(usize),
    /// The packet is shorter than the regions it should contain.
    #[error("packet of {len} bytes cannot hold the {needed} bytes requested")]
    InvalidPacketLen {
        /// Actual packet length.
        len: usize,
        /// Header, payload and MIC lengths combined.
        needed: usize,
    },
    /// The security level needs a MIC this implementation doesn't produce.
    #[error("security level {0} is not supported")]
    UnsupportedSecurityLevel(u8),
}
