//! Field tables for compute instructions.
//!
//! A compute instruction assembles to `111a cccc ccdd djjj`: the opcode prefix,
//! seven computation bits (`a` selects M over A), three destination bits and
//! three jump bits. Each lookup returns `None` for a mnemonic outside its
//! table; the resolver decides what that means.
use std::fmt;

/// Opcode prefix of every compute instruction.
pub const COMPUTE_PREFIX: u16 = 0b111;

pub const DEST_NONE: u16 = 0b000;
pub const COMP_NONE: u16 = 0b000_0000;
pub const JUMP_NONE: u16 = 0b000;

/// Names one of the three sub-fields of a compute instruction.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Field {
    Dest,
    Comp,
    Jump,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Field::Dest => write!(f, "dest"),
            Field::Comp => write!(f, "comp"),
            Field::Jump => write!(f, "jump"),
        }
    }
}

impl Field {
    /// Looks up `mnemonic` in this field's table.
    pub fn lookup(&self, mnemonic: &str) -> Option<u16> {
        match self {
            Field::Dest => dest(mnemonic),
            Field::Comp => comp(mnemonic),
            Field::Jump => jump(mnemonic),
        }
    }

    /// The bit pattern an absent mnemonic falls back to.
    pub fn none(&self) -> u16 {
        match self {
            Field::Dest => DEST_NONE,
            Field::Comp => COMP_NONE,
            Field::Jump => JUMP_NONE,
        }
    }
}

pub fn dest(mnemonic: &str) -> Option<u16> {
    match mnemonic {
        "null" => Some(0b000),
        "M"    => Some(0b001),
        "D"    => Some(0b010),
        "MD"   => Some(0b011),
        "A"    => Some(0b100),
        "AM"   => Some(0b101),
        "AD"   => Some(0b110),
        "AMD"  => Some(0b111),
        _ => None,
    }
}

pub fn comp(mnemonic: &str) -> Option<u16> {
    match mnemonic {
        "0"   => Some(0b0_101010),
        "1"   => Some(0b0_111111),
        "-1"  => Some(0b0_111010),
        "D"   => Some(0b0_001100),
        "A"   => Some(0b0_110000),
        "!D"  => Some(0b0_001101),
        "!A"  => Some(0b0_110001),
        "-D"  => Some(0b0_001111),
        "-A"  => Some(0b0_110011),
        "D+1" => Some(0b0_011111),
        "A+1" => Some(0b0_110111),
        "D-1" => Some(0b0_001110),
        "A-1" => Some(0b0_110010),
        "D+A" => Some(0b0_000010),
        "D-A" => Some(0b0_010011),
        "A-D" => Some(0b0_000111),
        "D&A" => Some(0b0_000000),
        "D|A" => Some(0b0_010101),

        "M"   => Some(0b1_110000),
        "!M"  => Some(0b1_110001),
        "-M"  => Some(0b1_110011),
        "M+1" => Some(0b1_110111),
        "M-1" => Some(0b1_110010),
        "D+M" => Some(0b1_000010),
        "D-M" => Some(0b1_010011),
        "M-D" => Some(0b1_000111),
        "D&M" => Some(0b1_000000),
        "D|M" => Some(0b1_010101),
        _ => None,
    }
}

pub fn jump(mnemonic: &str) -> Option<u16> {
    match mnemonic {
        "null" => Some(0b000),
        "JGT"  => Some(0b001),
        "JEQ"  => Some(0b010),
        "JGE"  => Some(0b011),
        "JLT"  => Some(0b100),
        "JNE"  => Some(0b101),
        "JLE"  => Some(0b110),
        "JMP"  => Some(0b111),
        _ => None,
    }
}
