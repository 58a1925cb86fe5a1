//! Host ↔ device protocol for serial motion controllers.
//!
//! motionlink gives every command and reply packet a compact block checksum
//! and fixes the vocabularies that give packet contents their meaning.
//!
//! # Crate Structure
//!
//! - [`opcodes`] — Link-control codes and command/reply/line-type tables
//! - [`packet`] — Block checksum codec and serial link framing
//! - [`ident`] — Random version-4 device identifiers

/// Re-export opcode tables.
pub mod opcodes {
    pub use motionlink_opcodes::*;
}

/// Re-export packet codec and link framing.
pub mod packet {
    pub use motionlink_packet::*;
}

/// Re-export device identifiers.
pub mod ident {
    pub use motionlink_ident::*;
}
