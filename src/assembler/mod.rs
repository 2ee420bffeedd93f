//! The Assembler module is in charge of taking a
//! Hack assembly file and producing its machine words.
//!
//! It does this with a line classifier, a symbol table
//! and a two-pass resolver over the classified lines.

pub mod ast;
pub mod code;
pub mod error;
pub mod lexer;
pub mod resolver;
pub mod symbols;

pub use self::error::AssembleError;
pub use self::resolver::Assembler;

use self::ast::Listing;

/// How the assembler treats input the reference assembler silently accepts:
/// unknown mnemonics, malformed or duplicate labels, and oversized literals.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Substitute the default bit pattern, let the last label win and
    /// truncate literals, logging a warning each time.
    Fidelity,
    /// Fail on the first such line.
    Strict,
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Fidelity
    }
}

#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Options {
    pub mode: Mode,
}

/// Assembles `source` into a listing of every instruction with its source.
pub fn assemble_listing(source: &str, options: Options) -> Result<Listing, AssembleError> {
    Assembler::new(options).run(source)
}

/// Assembles `source` into 16-character binary words, one per instruction.
pub fn assemble(source: &str, options: Options) -> Result<Vec<String>, AssembleError> {
    assemble_listing(source, options).map(|listing| listing.words())
}
