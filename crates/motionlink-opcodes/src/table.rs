use std::collections::HashMap;

use crate::error::{OpcodeError, Result};

/// A fixed, bidirectional name ↔ code mapping for one opcode namespace.
///
/// Tables are built once from a static entry list and never mutated, so a
/// shared reference can be read from any number of threads.
#[derive(Debug)]
pub struct OpcodeTable {
    name: &'static str,
    entries: &'static [(&'static str, u8)],
    by_name: HashMap<&'static str, u8>,
    by_code: HashMap<u8, &'static str>,
}

impl OpcodeTable {
    /// Build a table from its entries.
    ///
    /// Entries must be a bijection: duplicated names or codes are a
    /// programming error in the constant list.
    pub fn new(name: &'static str, entries: &'static [(&'static str, u8)]) -> Self {
        let by_name: HashMap<_, _> = entries.iter().copied().collect();
        let by_code: HashMap<_, _> = entries.iter().map(|&(n, c)| (c, n)).collect();
        debug_assert_eq!(by_name.len(), entries.len(), "duplicate name in {name}");
        debug_assert_eq!(by_code.len(), entries.len(), "duplicate code in {name}");

        Self {
            name,
            entries,
            by_name,
            by_code,
        }
    }

    /// Namespace name, used in error messages.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Resolve a symbolic name to its code.
    pub fn code(&self, name: &str) -> Result<u8> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| OpcodeError::UnknownName {
                table: self.name,
                name: name.to_string(),
            })
    }

    /// Resolve a code back to its symbolic name.
    pub fn name_of(&self, code: u8) -> Result<&'static str> {
        self.by_code
            .get(&code)
            .copied()
            .ok_or(OpcodeError::UnknownValue {
                table: self.name,
                value: code,
            })
    }

    /// Returns true if the code belongs to this table.
    pub fn contains_code(&self, code: u8) -> bool {
        self.by_code.contains_key(&code)
    }

    /// Entries in protocol order.
    pub fn entries(&self) -> &'static [(&'static str, u8)] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
