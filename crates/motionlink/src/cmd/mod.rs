use clap::{Args, Subcommand, ValueEnum};

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod control;
pub mod encode;
pub mod lookup;
pub mod opcodes;
pub mod uuid;
pub mod verify;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Append block checksums to a hex payload.
    Encode(EncodeArgs),
    /// Check the block checksums of a hex packet.
    Verify(VerifyArgs),
    /// List opcode tables.
    Opcodes(OpcodesArgs),
    /// Resolve one opcode by name or value.
    Lookup(LookupArgs),
    /// Decode or encode a link-control byte.
    Control(ControlArgs),
    /// Generate or re-serialize a device identifier.
    Uuid(UuidArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Verify(args) => verify::run(args, format),
        Command::Opcodes(args) => opcodes::run(args, format),
        Command::Lookup(args) => lookup::run(args, format),
        Command::Control(args) => control::run(args, format),
        Command::Uuid(args) => uuid::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

/// Opcode namespace selector.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum TableName {
    /// Single-byte link-control codes.
    Single,
    /// Host → device commands.
    Command,
    /// Device → host replies.
    #[value(alias = "rcommand")]
    Reply,
    /// Internal line/segment types.
    Parsed,
}

impl TableName {
    pub const ALL: [TableName; 4] = [
        TableName::Single,
        TableName::Command,
        TableName::Reply,
        TableName::Parsed,
    ];

    pub fn table(self) -> &'static motionlink_opcodes::OpcodeTable {
        match self {
            TableName::Single => &*motionlink_opcodes::SINGLE,
            TableName::Command => &*motionlink_opcodes::COMMANDS,
            TableName::Reply => &*motionlink_opcodes::REPLIES,
            TableName::Parsed => &*motionlink_opcodes::PARSED,
        }
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Payload bytes in hex (e.g. "1b 07").
    pub payload: String,
    /// Prefix the length byte used on the serial link.
    #[arg(long)]
    pub framed: bool,
}

#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Packet bytes in hex, checksum bytes included.
    pub packet: String,
}

#[derive(Args, Debug)]
pub struct OpcodesArgs {
    /// Only list one table.
    #[arg(long, short = 't')]
    pub table: Option<TableName>,
}

#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Table to search.
    pub table: TableName,
    /// Opcode name (e.g. HOME) or value (e.g. 0x1b).
    pub key: String,
}

#[derive(Args, Debug)]
pub struct ControlArgs {
    /// Control byte (e.g. 0x96) or code name (e.g. ACK2).
    #[arg(required_unless_present = "family", conflicts_with = "family")]
    pub value: Option<String>,
    /// Control family to encode (NACK, ACK, STALL, STALLACK, ID, DEBUG, STARTUP).
    #[arg(long)]
    pub family: Option<String>,
    /// Sequence slot for --family.
    #[arg(long, default_value = "0", requires = "family")]
    pub seq: u8,
}

#[derive(Args, Debug)]
pub struct UuidArgs {
    /// Re-serialize these 16 hex bytes instead of generating.
    #[arg(long)]
    pub seed: Option<String>,
    /// Emit the 16 raw bytes instead of the hyphenated text form.
    #[arg(long)]
    pub binary: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}
