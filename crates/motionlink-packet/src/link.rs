//! Serial link message framing.
//!
//! One byte stream carries four kinds of message:
//!
//! ```text
//! ┌──────────────┬────────────────────────────────────────────────────┐
//! │ first byte   │ message                                            │
//! ├──────────────┼────────────────────────────────────────────────────┤
//! │ 0x01..=0x5f  │ packet: [len, body..., pad, checksums...]          │
//! │ DEBUG (0xdd) │ NUL-terminated debug text, no checksum             │
//! │ ID (0xbc)    │ followed by `id_len` raw identifier bytes          │
//! │ other ≥ 0x80 │ single link-control code (ACK/NACK/STALL/...)      │
//! └──────────────┴────────────────────────────────────────────────────┘
//! ```
//!
//! `len` counts the length byte and the body. Bodies shorter than two bytes
//! are zero-padded so every packet holds at least one full block, and the
//! length byte always sits in block 0 under its checksum. A flip of the
//! length byte that keeps the wire size fails block 0's parity; one that
//! changes it misframes the packet, which then has to pass every block
//! check it now contains to be accepted. Lengths never have the high bit
//! set, which keeps them apart from the control codes.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use motionlink_opcodes::ControlCode;
use tracing::debug;

use crate::codec::{corruption_message, encode_packet, packet_len, verify, BLOCK_SIZE};
use crate::diag::DiagnosticSink;
use crate::error::{PacketError, Result};

/// Largest framed packet a length byte can describe.
pub const MAX_PACKET_LEN: usize = 0x7f;

/// Set on every control byte, clear on every length byte.
pub const CONTROL_BIT: u8 = 0x80;

/// Identifier bytes following an `ID` reply.
pub const DEFAULT_ID_LEN: usize = 8;

/// Default cap on debug message length.
pub const DEFAULT_MAX_DEBUG_LEN: usize = 256;

/// A message received from the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Incoming {
    /// A single link-control byte.
    Control(ControlCode),
    /// The body of a verified packet (length byte and checksums removed).
    Packet(Bytes),
    /// Debug text sent by the device.
    Debug(String),
    /// Identifier bytes following an `ID` code.
    Id(Bytes),
}

/// Configuration for link framing.
#[derive(Debug, Clone)]
pub struct LinkConfig {
    /// Largest framed packet accepted or sent. Default: 127.
    pub max_packet_len: usize,
    /// Bytes following an `ID` code. Zero treats `ID` as a bare request.
    pub id_len: usize,
    /// Debug messages longer than this are cut off. Default: 256.
    pub max_debug_len: usize,
    /// Read timeout for blocking operations.
    pub read_timeout: Option<std::time::Duration>,
    /// Write timeout for blocking operations.
    pub write_timeout: Option<std::time::Duration>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            max_packet_len: MAX_PACKET_LEN,
            id_len: DEFAULT_ID_LEN,
            max_debug_len: DEFAULT_MAX_DEBUG_LEN,
            read_timeout: None,
            write_timeout: None,
        }
    }
}

/// Returns true if `byte` starts a control message rather than a packet.
pub fn is_control_byte(byte: u8) -> bool {
    byte & CONTROL_BIT != 0
}

/// Wire size of a packet carrying `body_len` body bytes.
pub fn framed_len(body_len: usize) -> usize {
    wire_len(body_len + 1)
}

/// Wire size of a packet whose length byte is `len`.
pub fn wire_len(len: usize) -> usize {
    packet_len(len.max(BLOCK_SIZE))
}

/// Largest length byte whose packet fits in `max_packet_len` wire bytes.
pub fn max_length_byte(max_packet_len: usize) -> usize {
    let max = max_packet_len.min(MAX_PACKET_LEN);
    (1..=max).rev().find(|&len| wire_len(len) <= max).unwrap_or(0)
}

/// Frame `body` as a length-prefixed, checksummed packet.
pub fn encode_framed(body: &[u8], max_packet_len: usize, dst: &mut BytesMut) -> Result<()> {
    let max = max_packet_len.min(MAX_PACKET_LEN);
    let total = framed_len(body.len());
    if total > max {
        return Err(PacketError::PacketTooLarge { size: total, max });
    }

    let len = body.len() + 1;
    let mut plain = BytesMut::with_capacity(len.max(BLOCK_SIZE));
    plain.put_u8(len as u8);
    plain.put_slice(body);
    plain.resize(len.max(BLOCK_SIZE), 0);
    encode_packet(&plain, dst);
    Ok(())
}

/// Frame `body` into a new buffer.
pub fn build_framed(body: &[u8], max_packet_len: usize) -> Result<Bytes> {
    let mut dst = BytesMut::with_capacity(framed_len(body.len()));
    encode_framed(body, max_packet_len, &mut dst)?;
    Ok(dst.freeze())
}

/// Decode one message from the front of `src`.
///
/// Returns `Ok(None)` if the buffer doesn't contain a complete message yet.
/// On success or on a corruption error, consumes the offending bytes so the
/// next call starts at the following message. Corrupt packets are reported
/// to `sink` before the error is returned.
pub fn decode_incoming(
    src: &mut BytesMut,
    config: &LinkConfig,
    sink: &dyn DiagnosticSink,
) -> Result<Option<Incoming>> {
    let Some(&first) = src.first() else {
        return Ok(None); // Need more data
    };

    if is_control_byte(first) {
        return decode_control(src, config);
    }

    // Zero and lengths no packet within max_packet_len can carry.
    let len = first as usize;
    if len == 0 || len > max_length_byte(config.max_packet_len) {
        src.advance(1);
        let err = PacketError::InvalidLength(first);
        sink.emit(&err.to_string());
        return Err(err);
    }
    let total = wire_len(len);
    if src.len() < total {
        return Ok(None); // Need more data
    }

    let packet = src.split_to(total).freeze();
    if let Err(err) = verify(&packet) {
        sink.emit(&corruption_message(&err, total));
        return Err(err);
    }

    debug!(len, total, "received packet");
    Ok(Some(Incoming::Packet(packet.slice(1..len))))
}

fn decode_control(src: &mut BytesMut, config: &LinkConfig) -> Result<Option<Incoming>> {
    let code = match ControlCode::from_byte(src[0]) {
        Ok(code) => code,
        Err(err) => {
            src.advance(1);
            return Err(err.into());
        }
    };

    match code {
        ControlCode::Debug => {
            let window = &src[1..src.len().min(1 + config.max_debug_len)];
            let (text_len, consumed) = match window.iter().position(|&b| b == 0) {
                Some(nul) => (nul, nul + 1),
                None if window.len() == config.max_debug_len => (window.len(), window.len()),
                None => return Ok(None), // Need more data
            };
            let text = String::from_utf8_lossy(&window[..text_len]).into_owned();
            src.advance(1 + consumed);
            Ok(Some(Incoming::Debug(text)))
        }
        ControlCode::Id => {
            if src.len() < 1 + config.id_len {
                return Ok(None); // Need more data
            }
            src.advance(1);
            Ok(Some(Incoming::Id(src.split_to(config.id_len).freeze())))
        }
        code => {
            src.advance(1);
            Ok(Some(Incoming::Control(code)))
        }
    }
}
