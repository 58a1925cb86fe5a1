use motionlink_opcodes::OpcodeError;

/// Errors that can occur while encoding, verifying or exchanging packets.
#[derive(Debug, thiserror::Error)]
pub enum PacketError {
    /// A checksum byte carries the wrong block sequence number.
    #[error("sequence mismatch in block {block} (expected {expected}, found {found})")]
    SequenceMismatch { block: usize, expected: u8, found: u8 },

    /// A recomputed parity bit differs from the transmitted one.
    #[error("checksum mismatch in block {block} (parity bit {bit})")]
    ChecksumMismatch { block: usize, bit: u8 },

    /// The framed packet would not fit in a length byte.
    #[error("packet too large ({size} bytes, max {max})")]
    PacketTooLarge { size: usize, max: usize },

    /// Identifier bytes do not match the configured `ID` length.
    #[error("identifier length {len} does not match link id length {expected}")]
    IdLength { len: usize, expected: usize },

    /// A received length byte cannot start a packet.
    #[error("invalid packet length byte {0}")]
    InvalidLength(u8),

    /// A received byte with the control bit set is not a control code.
    #[error("control error: {0}")]
    Control(#[from] OpcodeError),

    /// An I/O error occurred while reading or writing the link.
    #[error("link I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The link was closed before a complete message was received.
    #[error("connection closed (incomplete message)")]
    ConnectionClosed,
}

impl PacketError {
    /// Returns true if the error means the received bytes were corrupt and
    /// the peer should be asked to resend.
    pub fn is_corruption(&self) -> bool {
        matches!(
            self,
            PacketError::SequenceMismatch { .. }
                | PacketError::ChecksumMismatch { .. }
                | PacketError::InvalidLength(_)
                | PacketError::Control(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PacketError>;
