use std::fmt;

use motionlink_ident::IdentError;
use motionlink_opcodes::OpcodeError;
use motionlink_packet::PacketError;

// Exit code constants.
pub const SUCCESS: i32 = 0;
pub const FAILURE: i32 = 1;
pub const DATA_INVALID: i32 = 60;
pub const USAGE: i32 = 64;
pub const INTERNAL: i32 = 125;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub struct CliError {
    pub code: i32,
    pub message: String,
}

impl CliError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

pub fn opcode_error(context: &str, err: OpcodeError) -> CliError {
    match err {
        OpcodeError::InvalidSequence { .. } => CliError::new(USAGE, format!("{context}: {err}")),
        other => CliError::new(DATA_INVALID, format!("{context}: {other}")),
    }
}

pub fn ident_error(context: &str, err: IdentError) -> CliError {
    CliError::new(USAGE, format!("{context}: {err}"))
}

pub fn packet_error(context: &str, err: PacketError) -> CliError {
    match err {
        err if err.is_corruption() => CliError::new(DATA_INVALID, format!("{context}: {err}")),
        PacketError::PacketTooLarge { .. } | PacketError::IdLength { .. } => {
            CliError::new(USAGE, format!("{context}: {err}"))
        }
        PacketError::ConnectionClosed => CliError::new(FAILURE, format!("{context}: {err}")),
        other => CliError::new(INTERNAL, format!("{context}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corruption_maps_to_data_invalid() {
        let err = packet_error(
            "verify",
            PacketError::ChecksumMismatch { block: 0, bit: 1 },
        );
        assert_eq!(err.code, DATA_INVALID);
        assert!(err.message.starts_with("verify: checksum mismatch"));
    }

    #[test]
    fn oversized_packet_is_usage() {
        let err = packet_error("encode", PacketError::PacketTooLarge { size: 200, max: 127 });
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn unknown_name_is_data_invalid() {
        let err = opcode_error(
            "lookup",
            OpcodeError::UnknownName {
                table: "command",
                name: "FLY".to_string(),
            },
        );
        assert_eq!(err.code, DATA_INVALID);
    }
}
