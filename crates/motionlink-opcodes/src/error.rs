/// Errors that can occur when translating between opcode names and values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OpcodeError {
    /// The name is not present in the table.
    #[error("unknown opcode name {name:?} in {table} table")]
    UnknownName { table: &'static str, name: String },

    /// The numeric code is not present in the table.
    #[error("unknown opcode value 0x{value:02x} in {table} table")]
    UnknownValue { table: &'static str, value: u8 },

    /// A received byte is not one of the link-control codes.
    #[error("unknown control byte 0x{0:02x}")]
    UnknownControlByte(u8),

    /// The sequence number does not exist for this control family.
    #[error("invalid sequence {seq} for control family {family}")]
    InvalidSequence { family: &'static str, seq: u8 },
}

pub type Result<T> = std::result::Result<T, OpcodeError>;
