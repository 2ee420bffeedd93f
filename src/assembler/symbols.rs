//! The symbol table maps symbolic names to addresses for a single assembly run.
//!
//! It starts out holding the architecture's reserved names. Pass one adds
//! labels and pass two adds variables as they are first referenced.
use std::collections::HashMap;

/// Highest address an address instruction can carry. The top bit of a word
/// marks a compute instruction.
pub const MAX_ADDRESS: u16 = 0x7FFF;

/// Address handed to the first variable. Everything below it is `R0`..`R15`.
pub const VARIABLE_BASE: u16 = 16;

const PREDEFINED: [(&str, u16); 23] = [
    ("SP",     0x0000),
    ("LCL",    0x0001),
    ("ARG",    0x0002),
    ("THIS",   0x0003),
    ("THAT",   0x0004),
    ("R0",     0x0000),
    ("R1",     0x0001),
    ("R2",     0x0002),
    ("R3",     0x0003),
    ("R4",     0x0004),
    ("R5",     0x0005),
    ("R6",     0x0006),
    ("R7",     0x0007),
    ("R8",     0x0008),
    ("R9",     0x0009),
    ("R10",    0x000A),
    ("R11",    0x000B),
    ("R12",    0x000C),
    ("R13",    0x000D),
    ("R14",    0x000E),
    ("R15",    0x000F),
    ("SCREEN", 0x4000),
    ("KBD",    0x6000),
];

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SymbolTable {
    symbols: HashMap<String, u16>,
}

impl SymbolTable {
    /// Creates a table holding only the reserved names.
    pub fn new() -> Self {
        let mut symbols = HashMap::with_capacity(64);
        for (name, address) in PREDEFINED.iter() {
            symbols.insert(name.to_string(), *address);
        }
        SymbolTable { symbols }
    }

    pub fn lookup(&self, name: &str) -> Option<u16> {
        self.symbols.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.symbols.contains_key(name)
    }

    /// Binds `name` to `address`.
    ///
    /// Binding a name to the address it already holds is a no-op. If the name
    /// already holds a different address the table is left untouched and the
    /// existing address is returned as the error.
    pub fn bind(&mut self, name: &str, address: u16) -> Result<(), u16> {
        match self.symbols.get(name) {
            Some(&prev) if prev != address => Err(prev),
            Some(_) => Ok(()),
            None => {
                self.symbols.insert(name.to_owned(), address);
                Ok(())
            }
        }
    }

    /// Replaces the binding of `name` and returns the address it held before.
    /// Callers must have seen `bind` refuse first.
    pub fn rebind(&mut self, name: &str, address: u16) -> Option<u16> {
        self.symbols.insert(name.to_owned(), address)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        SymbolTable::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predefined() {
        let table = SymbolTable::new();
        assert_eq!(table.len(), 23);

        for i in 0..=15u16 {
            assert_eq!(table.lookup(&format!("R{}", i)), Some(i));
        }
        assert_eq!(table.lookup("SP"), Some(0));
        assert_eq!(table.lookup("LCL"), Some(1));
        assert_eq!(table.lookup("ARG"), Some(2));
        assert_eq!(table.lookup("THIS"), Some(3));
        assert_eq!(table.lookup("THAT"), Some(4));
        assert_eq!(table.lookup("SCREEN"), Some(16384));
        assert_eq!(table.lookup("KBD"), Some(24576));

        // Names are case-sensitive.
        assert_eq!(table.lookup("sp"), None);
        assert_eq!(table.lookup("r0"), None);
        assert_eq!(table.lookup("R16"), None);
    }

    #[test]
    fn test_bind() {
        let mut table = SymbolTable::new();
        assert_eq!(table.bind("LOOP", 4), Ok(()));
        assert_eq!(table.lookup("LOOP"), Some(4));

        // Same address again is fine.
        assert_eq!(table.bind("LOOP", 4), Ok(()));

        // A different address is refused and the old binding survives.
        assert_eq!(table.bind("LOOP", 9), Err(4));
        assert_eq!(table.lookup("LOOP"), Some(4));

        assert_eq!(table.bind("SCREEN", 1), Err(16384));
        assert_eq!(table.lookup("SCREEN"), Some(16384));
    }

    #[test]
    fn test_rebind() {
        let mut table = SymbolTable::new();
        assert_eq!(table.rebind("END", 2), None);
        assert_eq!(table.rebind("END", 7), Some(2));
        assert_eq!(table.lookup("END"), Some(7));
        assert!(table.contains("END"));
        assert_eq!(table.len(), 24);
    }
}
