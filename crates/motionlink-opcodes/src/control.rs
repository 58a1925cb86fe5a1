//! Single-byte link-control codes.
//!
//! These bytes travel without a checksum of their own, so the values are
//! picked to sit far apart in Hamming distance: any one- or two-bit
//! corruption of a control byte never turns it into another control byte.
//!
//! `NACK`, `ACK` and `STALL` exist in four variants each. The variant is a
//! modulo-4 sequence number the session layer rolls forward to spot
//! duplicated or dropped control bytes in the half-duplex handshake.

use std::fmt;
use std::str::FromStr;

use crate::error::{OpcodeError, Result};

opcode_table! {
    SINGLE, "single" {
        /// Incorrect packet; please resend.
        NACK0 = 0xf0,
        NACK1 = 0x91,
        NACK2 = 0xa2,
        NACK3 = 0xc3,
        /// Packet received and accepted; ready for the next command.
        ACK0 = 0xc4,
        ACK1 = 0xa5,
        ACK2 = 0x96,
        ACK3 = 0xf7,
        /// Packet received but not accepted; do not resend it unmodified.
        STALL0 = 0x88,
        STALL1 = 0xe9,
        STALL2 = 0xda,
        STALL3 = 0xbb,
        /// Request or reply with the device ID code.
        ID = 0xbc,
        /// A NUL-terminated debug message follows (no checksum, no resend).
        DEBUG = 0xdd,
        /// The device is starting up.
        STARTUP = 0xee,
        /// Clear stall.
        STALLACK = 0x8f,
    }
}

const NACKS: [u8; 4] = [NACK0, NACK1, NACK2, NACK3];
const ACKS: [u8; 4] = [ACK0, ACK1, ACK2, ACK3];
const STALLS: [u8; 4] = [STALL0, STALL1, STALL2, STALL3];

/// Position in the modulo-4 control sequence window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Seq(u8);

impl Seq {
    pub const ZERO: Seq = Seq(0);

    /// Number of slots in the window.
    pub const WINDOW: u8 = 4;

    /// Create a sequence number, rejecting values outside `0..4`.
    pub fn new(value: u8) -> Option<Self> {
        (value < Self::WINDOW).then_some(Self(value))
    }

    /// Create a sequence number from the low two bits of `value`.
    pub fn wrapping(value: u8) -> Self {
        Self(value & (Self::WINDOW - 1))
    }

    /// The following slot, wrapping from 3 back to 0.
    pub fn next(self) -> Self {
        Self::wrapping(self.0 + 1)
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A control code family, with or without a sequence window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlFamily {
    Nack,
    Ack,
    Stall,
    StallAck,
    Id,
    Debug,
    Startup,
}

impl ControlFamily {
    pub const ALL: [ControlFamily; 7] = [
        ControlFamily::Nack,
        ControlFamily::Ack,
        ControlFamily::Stall,
        ControlFamily::StallAck,
        ControlFamily::Id,
        ControlFamily::Debug,
        ControlFamily::Startup,
    ];

    /// Protocol name of the family.
    pub fn name(self) -> &'static str {
        match self {
            ControlFamily::Nack => "NACK",
            ControlFamily::Ack => "ACK",
            ControlFamily::Stall => "STALL",
            ControlFamily::StallAck => "STALLACK",
            ControlFamily::Id => "ID",
            ControlFamily::Debug => "DEBUG",
            ControlFamily::Startup => "STARTUP",
        }
    }

    /// Returns true for the families replicated across the sequence window.
    pub fn is_sequenced(self) -> bool {
        matches!(
            self,
            ControlFamily::Nack | ControlFamily::Ack | ControlFamily::Stall
        )
    }

    /// Control byte for this family at sequence `seq`.
    ///
    /// Singletons only accept `seq == 0`.
    pub fn code(self, seq: u8) -> Result<u8> {
        let invalid = OpcodeError::InvalidSequence {
            family: self.name(),
            seq,
        };
        let code = if self.is_sequenced() {
            let seq = Seq::new(seq).ok_or(invalid)?;
            ControlCode::sequenced(self, seq)
        } else if seq == 0 {
            ControlCode::sequenced(self, Seq::ZERO)
        } else {
            return Err(invalid);
        };
        Ok(code.to_byte())
    }
}

impl fmt::Display for ControlFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ControlFamily {
    type Err = OpcodeError;

    fn from_str(s: &str) -> Result<Self> {
        ControlFamily::ALL
            .into_iter()
            .find(|family| family.name() == s)
            .ok_or_else(|| OpcodeError::UnknownName {
                table: "control family",
                name: s.to_string(),
            })
    }
}

/// A decoded link-control byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlCode {
    Nack(Seq),
    Ack(Seq),
    Stall(Seq),
    StallAck,
    Id,
    Debug,
    Startup,
}

impl ControlCode {
    /// Build a code from its family; `seq` is ignored for singletons.
    pub fn sequenced(family: ControlFamily, seq: Seq) -> Self {
        match family {
            ControlFamily::Nack => ControlCode::Nack(seq),
            ControlFamily::Ack => ControlCode::Ack(seq),
            ControlFamily::Stall => ControlCode::Stall(seq),
            ControlFamily::StallAck => ControlCode::StallAck,
            ControlFamily::Id => ControlCode::Id,
            ControlFamily::Debug => ControlCode::Debug,
            ControlFamily::Startup => ControlCode::Startup,
        }
    }

    pub fn family(self) -> ControlFamily {
        match self {
            ControlCode::Nack(_) => ControlFamily::Nack,
            ControlCode::Ack(_) => ControlFamily::Ack,
            ControlCode::Stall(_) => ControlFamily::Stall,
            ControlCode::StallAck => ControlFamily::StallAck,
            ControlCode::Id => ControlFamily::Id,
            ControlCode::Debug => ControlFamily::Debug,
            ControlCode::Startup => ControlFamily::Startup,
        }
    }

    /// Sequence slot, `None` for singletons.
    pub fn seq(self) -> Option<Seq> {
        match self {
            ControlCode::Nack(seq) | ControlCode::Ack(seq) | ControlCode::Stall(seq) => Some(seq),
            _ => None,
        }
    }

    /// `(family, seq)` pair; singletons report sequence 0.
    pub fn parts(self) -> (ControlFamily, u8) {
        (self.family(), self.seq().map_or(0, Seq::get))
    }

    pub fn to_byte(self) -> u8 {
        match self {
            ControlCode::Nack(seq) => NACKS[seq.get() as usize],
            ControlCode::Ack(seq) => ACKS[seq.get() as usize],
            ControlCode::Stall(seq) => STALLS[seq.get() as usize],
            ControlCode::StallAck => STALLACK,
            ControlCode::Id => ID,
            ControlCode::Debug => DEBUG,
            ControlCode::Startup => STARTUP,
        }
    }

    /// Decode a received byte.
    pub fn from_byte(byte: u8) -> Result<Self> {
        let slot = |codes: &[u8; 4]| codes.iter().position(|&c| c == byte);

        if let Some(i) = slot(&NACKS) {
            return Ok(ControlCode::Nack(Seq::wrapping(i as u8)));
        }
        if let Some(i) = slot(&ACKS) {
            return Ok(ControlCode::Ack(Seq::wrapping(i as u8)));
        }
        if let Some(i) = slot(&STALLS) {
            return Ok(ControlCode::Stall(Seq::wrapping(i as u8)));
        }
        match byte {
            STALLACK => Ok(ControlCode::StallAck),
            ID => Ok(ControlCode::Id),
            DEBUG => Ok(ControlCode::Debug),
            STARTUP => Ok(ControlCode::Startup),
            other => Err(OpcodeError::UnknownControlByte(other)),
        }
    }

    /// Table name of the code, e.g. `"ACK2"`.
    pub fn name(self) -> &'static str {
        // Every variant maps to an entry of SINGLE.
        SINGLE.name_of(self.to_byte()).unwrap_or("?")
    }
}

impl fmt::Display for ControlCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for ControlCode {
    type Error = OpcodeError;

    fn try_from(byte: u8) -> Result<Self> {
        ControlCode::from_byte(byte)
    }
}

impl From<ControlCode> for u8 {
    fn from(code: ControlCode) -> u8 {
        code.to_byte()
    }
}

/// Control byte for `family` at sequence `seq`.
pub fn encode(family: ControlFamily, seq: u8) -> Result<u8> {
    family.code(seq)
}

/// `(family, seq)` pair for a received control byte.
pub fn decode(byte: u8) -> Result<(ControlFamily, u8)> {
    ControlCode::from_byte(byte).map(ControlCode::parts)
}

/// Smallest pairwise Hamming distance across the whole control set.
pub fn min_distance() -> u32 {
    let codes = SINGLE.entries();
    codes
        .iter()
        .enumerate()
        .flat_map(|(i, &(_, a))| codes[i + 1..].iter().map(move |&(_, b)| (a ^ b).count_ones()))
        .min()
        .unwrap_or(u8::BITS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack2_is_0x96() {
        assert_eq!(SINGLE.code("ACK2").unwrap(), 0x96);
        assert_eq!(encode(ControlFamily::Ack, 2).unwrap(), 0x96);
    }

    #[test]
    fn decode_every_table_entry() {
        for &(name, byte) in SINGLE.entries() {
            let code = ControlCode::from_byte(byte).unwrap();
            assert_eq!(code.name(), name);
            assert_eq!(code.to_byte(), byte);

            let (family, seq) = code.parts();
            assert_eq!(encode(family, seq).unwrap(), byte);
        }
    }

    #[test]
    fn sequenced_families_cover_the_window() {
        for family in [ControlFamily::Nack, ControlFamily::Ack, ControlFamily::Stall] {
            let bytes: Vec<u8> = (0..4).map(|seq| family.code(seq).unwrap()).collect();
            for (seq, byte) in bytes.iter().enumerate() {
                assert_eq!(decode(*byte).unwrap(), (family, seq as u8));
            }
            assert!(matches!(
                family.code(4),
                Err(OpcodeError::InvalidSequence { seq: 4, .. })
            ));
        }
    }

    #[test]
    fn singletons_reject_nonzero_sequence() {
        assert_eq!(ControlFamily::StallAck.code(0).unwrap(), 0x8f);
        assert_eq!(ControlFamily::Debug.code(0).unwrap(), 0xdd);
        assert_eq!(ControlFamily::Startup.code(0).unwrap(), 0xee);
        assert_eq!(ControlFamily::Id.code(0).unwrap(), 0xbc);

        let err = ControlFamily::Startup.code(1).unwrap_err();
        assert_eq!(
            err,
            OpcodeError::InvalidSequence {
                family: "STARTUP",
                seq: 1
            }
        );
    }

    #[test]
    fn unknown_byte_is_rejected() {
        assert_eq!(
            ControlCode::from_byte(0x00),
            Err(OpcodeError::UnknownControlByte(0x00))
        );
        assert!(decode(0xff).is_err());
    }

    #[test]
    fn family_names_parse() {
        for family in ControlFamily::ALL {
            assert_eq!(family.name().parse::<ControlFamily>().unwrap(), family);
        }
        assert!(matches!(
            "ACK0".parse::<ControlFamily>(),
            Err(OpcodeError::UnknownName { .. })
        ));
    }

    #[test]
    fn seq_wraps_modulo_four() {
        let mut seq = Seq::ZERO;
        let mut seen = Vec::new();
        for _ in 0..6 {
            seen.push(seq.get());
            seq = seq.next();
        }
        assert_eq!(seen, vec![0, 1, 2, 3, 0, 1]);
        assert_eq!(Seq::new(4), None);
        assert_eq!(Seq::wrapping(7).get(), 3);
    }

    #[test]
    fn codes_survive_double_bit_flips() {
        assert_eq!(min_distance(), 3);

        // A one- or two-bit error never lands on another valid code.
        for &(_, byte) in SINGLE.entries() {
            for a in 0..8 {
                for b in a..8 {
                    let mask: u8 = (1 << a) | (1 << b);
                    let flipped = byte ^ mask;
                    assert!(!SINGLE.contains_code(flipped), "{byte:#04x} -> {flipped:#04x}");
                }
            }
        }
    }

    #[test]
    fn all_codes_have_high_bit() {
        assert!(SINGLE.entries().iter().all(|&(_, byte)| byte & 0x80 != 0));
    }
}
