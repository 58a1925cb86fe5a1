//! Block checksum code for command and reply packets.
//!
//! The payload is cut into 3-byte blocks. Each block gets one checksum byte,
//! appended after the payload in block order:
//!
//! ```text
//!  bit   7    6    5    4    3    2   1   0
//!      ┌────┬────┬────┬────┬────┬───────────┐
//!      │ p4 │ p3 │ p2 │ p1 │ p0 │ block % 8 │
//!      └────┴────┴────┴────┴────┴───────────┘
//! ```
//!
//! Parity bit `i` is the even parity of the block bytes and the sequence
//! number, each masked by row `i` of [`PARITY_MATRIX`]. Every payload bit
//! feeds at least one parity bit, so any single flipped bit is detected.
//! Errors are only detected, never corrected.
//!
//! A payload of `3n + r` bytes (`r < 3`) encodes to `4n + r` bytes. The
//! trailing `r` bytes are not covered by any checksum. Because `r < 4`, a
//! receiver recovers the split from the total length alone:
//! `n = total / 4`.

use bytes::{BufMut, Bytes, BytesMut};

use crate::diag::DiagnosticSink;
use crate::error::{PacketError, Result};

/// Payload bytes covered by one checksum byte.
pub const BLOCK_SIZE: usize = 3;

/// Parity masks, one row per parity bit. Columns 0-2 apply to the block
/// bytes, column 3 to the block sequence number.
pub const PARITY_MATRIX: [[u8; 4]; 5] = [
    [0xc0, 0xc3, 0xff, 0x09],
    [0x38, 0x3a, 0x7e, 0x13],
    [0x26, 0xb5, 0xb9, 0x23],
    [0x95, 0x6c, 0xd5, 0x43],
    [0x4b, 0xdc, 0xe2, 0x83],
];

/// Bits of a checksum byte holding the block sequence number.
pub const SEQ_MASK: u8 = 0x07;

/// Bit position of parity bit 0 in a checksum byte.
const PARITY_SHIFT: u8 = 3;

/// Number of checksum bytes for a payload of `payload_len` bytes.
pub fn checksum_len(payload_len: usize) -> usize {
    payload_len / BLOCK_SIZE
}

/// Encoded size of a payload of `payload_len` bytes.
pub fn packet_len(payload_len: usize) -> usize {
    payload_len + checksum_len(payload_len)
}

/// Payload size of an encoded packet of `packet_len` bytes.
pub fn payload_len(packet_len: usize) -> usize {
    packet_len - packet_len / (BLOCK_SIZE + 1)
}

fn fold_parity(mut acc: u8) -> u8 {
    acc ^= acc >> 4;
    acc ^= acc >> 2;
    acc ^= acc >> 1;
    acc & 1
}

/// The five parity bits of one block, in checksum-byte position.
fn parity_bits(block: [u8; BLOCK_SIZE], seq: u8) -> u8 {
    PARITY_MATRIX.iter().enumerate().fold(0, |bits, (i, row)| {
        let acc = (block[0] & row[0])
            ^ (block[1] & row[1])
            ^ (block[2] & row[2])
            ^ (seq & row[3]);
        bits | fold_parity(acc) << (PARITY_SHIFT + i as u8)
    })
}

/// Checksum byte of the block at position `index`.
pub fn block_checksum(block: [u8; BLOCK_SIZE], index: usize) -> u8 {
    let seq = (index as u8) & SEQ_MASK;
    parity_bits(block, seq) | seq
}

/// Append `payload` followed by its checksum bytes to `dst`.
pub fn encode_packet(payload: &[u8], dst: &mut BytesMut) {
    dst.reserve(packet_len(payload.len()));
    dst.put_slice(payload);
    for (index, chunk) in payload.chunks_exact(BLOCK_SIZE).enumerate() {
        dst.put_u8(block_checksum([chunk[0], chunk[1], chunk[2]], index));
    }
}

/// Encode `payload` into a new packet.
pub fn build(payload: &[u8]) -> Bytes {
    let mut dst = BytesMut::with_capacity(packet_len(payload.len()));
    encode_packet(payload, &mut dst);
    dst.freeze()
}

/// Verify every block checksum of an encoded packet.
pub fn verify(packet: &[u8]) -> Result<()> {
    let num = packet.len() / (BLOCK_SIZE + 1);
    let len = packet.len() - num;
    let (payload, checksums) = packet.split_at(len);
    let byte_at = |i: usize| payload.get(i).copied().unwrap_or(0);

    for (block, &sum) in checksums.iter().enumerate() {
        let expected = (block as u8) & SEQ_MASK;
        let found = sum & SEQ_MASK;
        if found != expected {
            return Err(PacketError::SequenceMismatch {
                block,
                expected,
                found,
            });
        }

        let base = block * BLOCK_SIZE;
        let bits = parity_bits([byte_at(base), byte_at(base + 1), byte_at(base + 2)], expected);
        let diff = (bits ^ sum) >> PARITY_SHIFT;
        if diff != 0 {
            return Err(PacketError::ChecksumMismatch {
                block,
                bit: diff.trailing_zeros() as u8,
            });
        }
    }

    Ok(())
}

/// Verify a packet, reporting any corruption to `sink`.
///
/// Returns true when the packet is intact.
pub fn check(packet: &[u8], sink: &dyn DiagnosticSink) -> bool {
    match verify(packet) {
        Ok(()) => true,
        Err(err) => {
            sink.emit(&corruption_message(&err, packet.len()));
            false
        }
    }
}

/// Diagnostic text reported for a packet of `packet_len` bytes that failed
/// verification.
pub fn corruption_message(err: &PacketError, packet_len: usize) -> String {
    format!("{err} ({packet_len} byte packet)")
}

/// Verify a packet and return its payload region.
pub fn decode_packet(packet: &[u8]) -> Result<&[u8]> {
    verify(packet)?;
    Ok(&packet[..payload_len(packet.len())])
}
