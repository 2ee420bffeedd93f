//! This lexer classifies Hack assembly source, one line at a time.
use std::collections::VecDeque;

use regex::Regex;

// Tokens are tuples of the token text and the line they appear on.
// Line numbers are 1-based.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Token {
    /// `(NAME)`, carrying the name without its parentheses.
    Label(String, usize),
    /// `@value`, carrying the text after the `@`.
    Address(String, usize),
    /// Anything else, carrying the whole `dest=comp;jump` text.
    Compute(String, usize),
}

impl Token {
    pub fn line(&self) -> usize {
        match self {
            Token::Label(_, line) | Token::Address(_, line) | Token::Compute(_, line) => *line,
        }
    }
}

pub struct Lexer {
    label: Regex,
    literal: Regex,
    name: Regex,
}

impl Lexer {
    pub fn new() -> Self {
        Lexer {
            label: Regex::new(r"^\((.+)\)$").expect("label pattern is valid"),
            literal: Regex::new(r"^[0-9]+$").expect("literal pattern is valid"),
            name: Regex::new(r"^[^()\s]+$").expect("name pattern is valid"),
        }
    }

    /// Hack supports a single instruction per line.
    /// Blank lines and comment-only lines produce no token.
    pub fn tokenize(&self, source: &str) -> VecDeque<Token> {
        let mut tokens: VecDeque<Token> = VecDeque::with_capacity(256);
        for (index, line) in source.lines().enumerate() {
            if let Some(tok) = self.tokenize_line(line, index + 1) {
                tokens.push_back(tok);
            }
        }
        tokens
    }

    pub fn tokenize_line(&self, line: &str, line_num: usize) -> Option<Token> {
        let text = strip_comment(line);
        if text.is_empty() {
            return None;
        }

        if let Some(caps) = self.label.captures(text) {
            return Some(Token::Label(caps[1].to_owned(), line_num));
        }

        if let Some(rest) = text.strip_prefix('@') {
            return Some(Token::Address(rest.to_owned(), line_num));
        }

        Some(Token::Compute(text.to_owned(), line_num))
    }

    /// Whether an address operand is a decimal literal rather than a symbol.
    pub fn is_literal(&self, value: &str) -> bool {
        self.literal.is_match(value)
    }

    /// Decodes a decimal literal to its low 16 bits. The flag is set when the
    /// value does not fit in a valid address. Returns None for a symbol.
    pub fn literal(&self, value: &str) -> Option<(u16, bool)> {
        if !self.is_literal(value) {
            return None;
        }
        let mut result: u16 = 0;
        let mut overflow = false;
        for d in value.bytes() {
            let digit = u16::from(d - b'0');
            if result.checked_mul(10).and_then(|v| v.checked_add(digit)).is_none() {
                overflow = true;
            }
            result = result.wrapping_mul(10).wrapping_add(digit);
        }
        Some((result, overflow || result > super::symbols::MAX_ADDRESS))
    }

    /// A symbol name with no whitespace or parentheses in it.
    pub fn is_plain_name(&self, name: &str) -> bool {
        self.name.is_match(name)
    }
}

impl Default for Lexer {
    fn default() -> Self {
        Lexer::new()
    }
}

/// Drops a trailing `//` comment and the surrounding whitespace.
pub fn strip_comment(line: &str) -> &str {
    match line.find("//") {
        Some(idx) => line[..idx].trim(),
        None => line.trim(),
    }
}

/// A compute-classified line that was probably meant as a label:
/// it opens or closes with a parenthesis but isn't a well-formed `(NAME)`.
pub fn looks_like_label(text: &str) -> bool {
    text.starts_with('(') || text.ends_with(')')
}

/// Splits compute instruction text into its `dest`, `comp` and `jump` parts.
/// Missing `dest` and `jump` parts come back as `"null"`.
pub fn split_compute(text: &str) -> (&str, &str, &str) {
    let (dest, rest) = match text.find('=') {
        Some(idx) => (&text[..idx], &text[idx + 1..]),
        None => ("null", text),
    };
    let (comp, jump) = match rest.find(';') {
        Some(idx) => (&rest[..idx], &rest[idx + 1..]),
        None => (rest, "null"),
    };
    (dest, comp, jump)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comment() {
        assert_eq!(strip_comment("   D=M   "), "D=M");
        assert_eq!(strip_comment("D=M // load"), "D=M");
        assert_eq!(strip_comment("// whole line"), "");
        assert_eq!(strip_comment("\t\r"), "");
        assert_eq!(strip_comment("@i//no space"), "@i");
    }

    #[test]
    fn test_tokenize_line() {
        let lexer = Lexer::new();
        assert_eq!(lexer.tokenize_line("(LOOP)", 3), Some(Token::Label("LOOP".to_owned(), 3)));
        assert_eq!(lexer.tokenize_line("  (END) // done", 1), Some(Token::Label("END".to_owned(), 1)));
        assert_eq!(lexer.tokenize_line("@17", 2), Some(Token::Address("17".to_owned(), 2)));
        assert_eq!(lexer.tokenize_line("@sum", 2), Some(Token::Address("sum".to_owned(), 2)));
        assert_eq!(lexer.tokenize_line("AM=M-1", 4), Some(Token::Compute("AM=M-1".to_owned(), 4)));
        assert_eq!(lexer.tokenize_line("0;JMP", 4), Some(Token::Compute("0;JMP".to_owned(), 4)));
        assert_eq!(lexer.tokenize_line("   ", 5), None);
        assert_eq!(lexer.tokenize_line("// (LOOP)", 5), None);
    }

    #[test]
    fn test_malformed_labels() {
        let lexer = Lexer::new();
        // None of these are labels; they fall through to compute instructions.
        for text in ["(LOOP", "LOOP)", "()"].iter() {
            assert_eq!(lexer.tokenize_line(text, 1), Some(Token::Compute(text.to_string(), 1)));
            assert!(looks_like_label(text));
        }
        assert!(!looks_like_label("D=M"));
    }

    #[test]
    fn test_tokenize() {
        let lexer = Lexer::new();
        let asm_input = "
        // Adds 1 + 2
        @1
        D=A   // D = 1
        (ADD)
        @2

        D=D+A
        ";
        let v: VecDeque<Token> = VecDeque::from(vec![
            Token::Address("1".to_owned(), 3),
            Token::Compute("D=A".to_owned(), 4),
            Token::Label("ADD".to_owned(), 5),
            Token::Address("2".to_owned(), 6),
            Token::Compute("D=D+A".to_owned(), 8),
        ]);
        assert_eq!(lexer.tokenize(asm_input), v);
        assert_eq!(v[2].line(), 5);
    }

    #[test]
    fn test_split_compute() {
        assert_eq!(split_compute("D=A"), ("D", "A", "null"));
        assert_eq!(split_compute("0;JMP"), ("null", "0", "JMP"));
        assert_eq!(split_compute("AMD=D|M;JNE"), ("AMD", "D|M", "JNE"));
        assert_eq!(split_compute("M+1"), ("null", "M+1", "null"));
        // Only the first separator splits.
        assert_eq!(split_compute("D=M=1"), ("D", "M=1", "null"));
        assert_eq!(split_compute("D;JGT;JMP"), ("null", "D", "JGT;JMP"));
        assert_eq!(split_compute("D="), ("D", "", "null"));
    }

    #[test]
    fn test_literals() {
        let lexer = Lexer::new();
        assert!(lexer.is_literal("0"));
        assert!(lexer.is_literal("32767"));
        assert!(!lexer.is_literal("R0"));
        assert!(!lexer.is_literal("-1"));
        assert!(!lexer.is_literal("1a"));
        assert!(!lexer.is_literal(""));

        assert_eq!(lexer.literal("0"), Some((0, false)));
        assert_eq!(lexer.literal("007"), Some((7, false)));
        assert_eq!(lexer.literal("32767"), Some((32767, false)));
        assert_eq!(lexer.literal("32768"), Some((32768, true)));
        assert_eq!(lexer.literal("65535"), Some((65535, true)));
        assert_eq!(lexer.literal("65536"), Some((0, true)));
        assert_eq!(lexer.literal("65538"), Some((2, true)));

        // Symbols are not literals, whatever bytes they hold.
        assert_eq!(lexer.literal("LOOP"), None);
        assert_eq!(lexer.literal("1a"), None);
        assert_eq!(lexer.literal("/"), None);
        assert_eq!(lexer.literal(""), None);
    }

    #[test]
    fn test_plain_names() {
        let lexer = Lexer::new();
        assert!(lexer.is_plain_name("LOOP"));
        assert!(lexer.is_plain_name("ponggame.0$if_end"));
        assert!(!lexer.is_plain_name(""));
        assert!(!lexer.is_plain_name(" A "));
        assert!(!lexer.is_plain_name("A)(B"));
        assert!(!lexer.is_plain_name("A B"));
    }
}
