//! This AST describes a resolved Hack program: every symbol has been replaced
//! by an address and every compute mnemonic by its field bits.
//!
//! Execution begins with the first instruction in the file.
//! Comments are prefixed with `//` and are single-line only.
//! Instructions are delimited by newlines.
//!
//! ```nasm
//! @value       // A <= value, a decimal literal or a symbol
//! dest=comp;jump // dest <= comp, then jump if comp satisfies the condition
//! (LABEL)      // names the address of the next instruction
//! ```
//!
//! Example source file:
//!
//! ```nasm
//! @i
//! M=1          // i = 1
//! (LOOP)
//! @i
//! D=M
//! @100
//! D=D-A
//! @END
//! D;JGT        // if i > 100 goto END
//! @i
//! M=M+1
//! @LOOP
//! 0;JMP
//! (END)
//! ```
use std::fmt;

use super::code::COMPUTE_PREFIX;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Instruction {
    Address(u16),
    Compute { dest: u16, comp: u16, jump: u16 },
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:016b}", self.assemble())
    }
}

impl Instruction {
    /// Assembles the given instruction to a binary machine word.
    pub fn assemble(&self) -> u16 {
        use Instruction::*;
        match self {
            Address(value)             => *value,
            Compute { dest, comp, jump } => (COMPUTE_PREFIX << 13)
                | ((comp & 0b111_1111) << 6)
                | ((dest & 0b111) << 3)
                | (jump & 0b111),
        }
    }
}

/// One assembled instruction alongside the source it came from.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Entry {
    pub address: usize,
    pub line: usize,
    pub source: String,
    pub instruction: Instruction,
}

/// The encoded program, in instruction-address order.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Listing {
    pub entries: Vec<Entry>,
}

impl Listing {
    /// The program as 16-character binary strings, one per instruction.
    pub fn words(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.instruction.to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
