//! The resolver takes a token stream from the lexer and turns it into a
//! [`Listing`] in two passes.
//!
//! Pass one walks the tokens once, binding each label to the address of the
//! instruction that follows it and collecting the real instructions. Pass two
//! walks those instructions, resolving every symbol (allocating variables from
//! address 16 upwards on first sight) and encoding each one.
use std::collections::VecDeque;

use super::ast::{Entry, Instruction, Listing};
use super::code::Field;
use super::error::AssembleError;
use super::lexer::{self, Lexer, Token};
use super::symbols::{SymbolTable, MAX_ADDRESS, VARIABLE_BASE};
use super::{Mode, Options};

/// An instruction collected by pass one, waiting for resolution.
#[derive(Clone, PartialEq, Eq, Debug)]
enum Pending {
    Address(String, usize),
    Compute(String, usize),
}

pub struct Assembler {
    lexer:         Lexer,
    symbols:       SymbolTable,
    options:       Options,
    next_variable: u16,
}

impl Assembler {
    pub fn new(options: Options) -> Self {
        Assembler {
            lexer: Lexer::new(),
            symbols: SymbolTable::new(),
            options,
            next_variable: VARIABLE_BASE,
        }
    }

    /// Run both passes over `source`, consuming the assembler.
    pub fn run(mut self, source: &str) -> Result<Listing, AssembleError> {
        let tokens = self.lexer.tokenize(source);
        let stream = self.first_pass(tokens)?;
        debug!("pass one: {} instruction(s), {} symbol(s)", stream.len(), self.symbols.len());
        let listing = self.second_pass(stream)?;
        debug!("pass two: {} variable(s) allocated", self.next_variable.wrapping_sub(VARIABLE_BASE));
        Ok(listing)
    }

    fn first_pass(&mut self, mut tokens: VecDeque<Token>) -> Result<Vec<Pending>, AssembleError> {
        let mut stream = Vec::with_capacity(tokens.len());

        while let Some(tok) = self.consume(&mut tokens) {
            match tok {
                Token::Label(name, line) => {
                    if self.strict() && !self.lexer.is_plain_name(&name) {
                        return Err(AssembleError::MalformedLabel { line, text: format!("({})", name) });
                    }
                    self.declare_label(&name, stream.len(), line)?
                }
                Token::Address(value, line) => stream.push(Pending::Address(value, line)),
                Token::Compute(text, line) => {
                    if self.strict() && lexer::looks_like_label(&text) {
                        return Err(AssembleError::MalformedLabel { line, text });
                    }
                    stream.push(Pending::Compute(text, line));
                }
            }
        }

        Ok(stream)
    }

    /// Binds `name` to the address of the next real instruction.
    fn declare_label(&mut self, name: &str, address: usize, line: usize) -> Result<(), AssembleError> {
        if address > MAX_ADDRESS as usize {
            if self.strict() {
                return Err(AssembleError::AddressOutOfRange { line, value: address.to_string() });
            }
            warn!("line {}: label `{}` at instruction {} is past the end of addressable ROM", line, name, address);
        }
        let address = address as u16;

        if self.strict() {
            if let Some(previous) = self.symbols.lookup(name) {
                return Err(AssembleError::DuplicateLabel { line, name: name.to_owned(), previous });
            }
        }

        match self.symbols.bind(name, address) {
            Ok(()) => debug!("label `{}` => 0x{:04X}", name, address),
            Err(previous) => {
                warn!("line {}: label `{}` redeclared, moving it from 0x{:04X} to 0x{:04X}",
                    line, name, previous, address);
                self.symbols.rebind(name, address);
            }
        }
        Ok(())
    }

    fn second_pass(&mut self, stream: Vec<Pending>) -> Result<Listing, AssembleError> {
        let mut listing = Listing { entries: Vec::with_capacity(stream.len()) };

        for (address, pending) in stream.into_iter().enumerate() {
            let entry = match pending {
                Pending::Address(value, line) => Entry {
                    address,
                    line,
                    instruction: self.address(&value, line)?,
                    source: format!("@{}", value),
                },
                Pending::Compute(text, line) => Entry {
                    address,
                    line,
                    instruction: self.compute(&text, line)?,
                    source: text,
                },
            };
            listing.entries.push(entry);
        }

        Ok(listing)
    }

    fn address(&mut self, value: &str, line: usize) -> Result<Instruction, AssembleError> {
        if value.is_empty() && self.strict() {
            return Err(AssembleError::MissingOperand { line });
        }

        if let Some((address, out_of_range)) = self.lexer.literal(value) {
            if out_of_range {
                if self.strict() {
                    return Err(AssembleError::AddressOutOfRange { line, value: value.to_owned() });
                }
                warn!("line {}: literal `{}` does not fit in 15 bits, encoding 0x{:04X}", line, value, address);
            }
            return Ok(Instruction::Address(address));
        }

        match self.symbols.lookup(value) {
            Some(address) => Ok(Instruction::Address(address)),
            None => Ok(Instruction::Address(self.allocate(value, line)?)),
        }
    }

    /// Gives `name` the next free variable address.
    fn allocate(&mut self, name: &str, line: usize) -> Result<u16, AssembleError> {
        let address = self.next_variable;
        if address > MAX_ADDRESS {
            if self.strict() {
                return Err(AssembleError::AddressOutOfRange { line, value: name.to_owned() });
            }
            warn!("line {}: variable `{}` allocated past the end of RAM", line, name);
        }

        if let Err(previous) = self.symbols.bind(name, address) {
            return Ok(previous);
        }
        self.next_variable = self.next_variable.wrapping_add(1);
        debug!("variable `{}` => 0x{:04X}", name, address);
        Ok(address)
    }

    fn compute(&self, text: &str, line: usize) -> Result<Instruction, AssembleError> {
        let (dest, comp, jump) = lexer::split_compute(text);
        Ok(Instruction::Compute {
            dest: self.field(Field::Dest, dest, line)?,
            comp: self.field(Field::Comp, comp, line)?,
            jump: self.field(Field::Jump, jump, line)?,
        })
    }

    fn field(&self, field: Field, mnemonic: &str, line: usize) -> Result<u16, AssembleError> {
        match field.lookup(mnemonic) {
            Some(bits) => Ok(bits),
            None if self.strict() => Err(AssembleError::UnknownMnemonic {
                line,
                field,
                mnemonic: mnemonic.to_owned(),
            }),
            None => {
                warn!("line {}: unknown {} mnemonic `{}`, encoding {:b}", line, field, mnemonic, field.none());
                Ok(field.none())
            }
        }
    }

    #[inline]
    fn strict(&self) -> bool {
        self.options.mode == Mode::Strict
    }

    /// Pops a token off the input stream and returns it.
    /// Returns None if no tokens are left.
    #[inline]
    fn consume(&self, tokens: &mut VecDeque<Token>) -> Option<Token> {
        tokens.pop_front()
    }
}
