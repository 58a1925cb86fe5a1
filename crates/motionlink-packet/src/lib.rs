//! Packet integrity layer of the motionlink serial protocol.
//!
//! Every multi-byte packet exchanged between host and device carries one
//! checksum byte per 3-byte block:
//! - Bits 0-2: block index modulo 8, catching lost or reordered blocks
//! - Bits 3-7: five parity bits over a fixed mask matrix
//!
//! Corruption is detected, never repaired. Deciding to NACK and resend is
//! left to the session layer; this crate only reports the verdict, plus a
//! message for the operator through a [`DiagnosticSink`].

pub mod codec;
pub mod diag;
pub mod error;
pub mod link;
pub mod port;
pub mod reader;
pub mod writer;

pub use codec::{
    block_checksum, build, check, checksum_len, corruption_message, decode_packet,
    encode_packet, packet_len, payload_len, verify, BLOCK_SIZE, PARITY_MATRIX,
};
pub use diag::{DiagnosticSink, NullSink, TracingSink};
pub use error::{PacketError, Result};
pub use link::{
    build_framed, decode_incoming, encode_framed, framed_len, max_length_byte, wire_len,
    Incoming, LinkConfig, MAX_PACKET_LEN,
};
pub use port::PortTimeouts;
pub use reader::LinkReader;
pub use writer::LinkWriter;
