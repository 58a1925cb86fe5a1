//! Opcode vocabularies of the motionlink host ↔ device protocol.
//!
//! Four independent namespaces share nothing but their shape:
//! - [`control::SINGLE`] — unchecksummed single-byte link-control codes
//! - [`command::COMMANDS`] — host → device commands
//! - [`reply::REPLIES`] — device → host replies
//! - [`parsed::PARSED`] — internal line/segment types
//!
//! Codes may repeat across namespaces; the direction of travel tells them
//! apart. Each table is exposed as named constants plus a lazily built
//! [`OpcodeTable`] for name ↔ code lookups.

/// Declares one `pub const` per opcode plus a static [`OpcodeTable`]
/// listing them in order.
macro_rules! opcode_table {
    ($table:ident, $label:literal { $($(#[$doc:meta])* $name:ident = $value:expr,)* }) => {
        $(
            $(#[$doc])*
            pub const $name: u8 = $value;
        )*

        #[doc = concat!("Name ↔ code table of the `", $label, "` namespace.")]
        pub static $table: std::sync::LazyLock<crate::table::OpcodeTable> =
            std::sync::LazyLock::new(|| {
                crate::table::OpcodeTable::new($label, &[$((stringify!($name), $name),)*])
            });
    };
}

pub mod command;
pub mod control;
pub mod error;
pub mod parsed;
pub mod reply;
pub mod table;

pub use command::COMMANDS;
pub use control::{ControlCode, ControlFamily, Seq, SINGLE};
pub use error::{OpcodeError, Result};
pub use parsed::PARSED;
pub use reply::REPLIES;
pub use table::OpcodeTable;

/// Look up one of the four tables by its protocol name.
///
/// Accepts `single`, `command`, `rcommand`/`reply` and `parsed`.
pub fn table_by_name(name: &str) -> Option<&'static OpcodeTable> {
    match name {
        "single" | "control" => Some(&*SINGLE),
        "command" => Some(&*COMMANDS),
        "rcommand" | "reply" => Some(&*REPLIES),
        "parsed" => Some(&*PARSED),
        _ => None,
    }
}

/// All tables in protocol order.
pub fn tables() -> [&'static OpcodeTable; 4] {
    [&*SINGLE, &*COMMANDS, &*REPLIES, &*PARSED]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_every_table() {
        for table in tables() {
            for &(name, code) in table.entries() {
                assert_eq!(table.code(table.name_of(code).unwrap()).unwrap(), code);
                assert_eq!(table.name_of(table.code(name).unwrap()).unwrap(), name);
            }
        }
    }

    #[test]
    fn table_lookup_by_protocol_name() {
        assert_eq!(table_by_name("rcommand").unwrap().name(), "reply");
        assert_eq!(table_by_name("single").unwrap().code("ACK2").unwrap(), 0x96);
        assert!(table_by_name("bogus").is_none());
    }

    #[test]
    fn tables_are_shared_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|_| std::thread::spawn(|| COMMANDS.code("HOME").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 0x1b);
        }
    }
}
