use thiserror::Error;

use super::code::Field;

/// Errors raised by a strict assembly run. Lines are 1-based.
#[derive(Error, Clone, PartialEq, Eq, Debug)]
pub enum AssembleError {
    #[error("line {line}: unknown {field} mnemonic `{mnemonic}`")]
    UnknownMnemonic { line: usize, field: Field, mnemonic: String },

    #[error("line {line}: malformed label declaration `{text}`")]
    MalformedLabel { line: usize, text: String },

    #[error("line {line}: label `{name}` is already bound to address {previous}")]
    DuplicateLabel { line: usize, name: String, previous: u16 },

    #[error("line {line}: address `{value}` does not fit in 15 bits (max 32767)")]
    AddressOutOfRange { line: usize, value: String },

    #[error("line {line}: `@` is missing its operand")]
    MissingOperand { line: usize },
}

impl AssembleError {
    pub fn line(&self) -> usize {
        use AssembleError::*;
        match self {
            UnknownMnemonic { line, .. }
            | MalformedLabel { line, .. }
            | DuplicateLabel { line, .. }
            | AddressOutOfRange { line, .. }
            | MissingOperand { line } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AssembleError::UnknownMnemonic { line: 3, field: Field::Comp, mnemonic: "FOO".to_owned() };
        assert_eq!(err.to_string(), "line 3: unknown comp mnemonic `FOO`");
        assert_eq!(err.line(), 3);

        let err = AssembleError::DuplicateLabel { line: 9, name: "LOOP".to_owned(), previous: 2 };
        assert_eq!(err.to_string(), "line 9: label `LOOP` is already bound to address 2");

        let err = AssembleError::MalformedLabel { line: 4, text: "(END".to_owned() };
        assert_eq!(err.to_string(), "line 4: malformed label declaration `(END`");
        assert_eq!(err.line(), 4);

        let err = AssembleError::MissingOperand { line: 12 };
        assert_eq!(err.to_string(), "line 12: `@` is missing its operand");
        assert_eq!(err.line(), 12);
    }
}
