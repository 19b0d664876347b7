//! Swift 2.1 Lexical Layer
//!
//! A source cursor plus the token-level scanners the grammar layer builds on:
//! whitespace and nested comments, identifiers and the reserved-word table,
//! operator character classes (including the Unicode operator ranges),
//! numeric literals in four radices, escape sequences, and balanced-token
//! capture for attribute arguments.
//!
//! Tokens are recognized on demand at the cursor rather than in a separate
//! pass: string interpolations re-enter the expression grammar and `<` is
//! both an operator head and a generic-clause opener, so the parser must be
//! able to checkpoint, speculate and restore at character granularity.

use lazy_static::lazy_static;
use rustc_hash::FxHashSet;
use smol_str::SmolStr;
use std::fmt;
use thiserror::Error;

// ============================================================================
// Positions
// ============================================================================

/// A location in the input: byte offset plus 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<stdin>:{}:{}", self.line, self.column)
    }
}

impl Default for Position {
    fn default() -> Self {
        Position {
            offset: 0,
            line: 1,
            column: 1,
        }
    }
}

/// An opaque cursor checkpoint. `restore(save())` is a no-op; both are O(1).
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint {
    offset: usize,
    line: u32,
    column: u32,
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, Error, PartialEq)]
pub enum LexError {
    #[error("{position}: unterminated string literal")]
    UnterminatedString { position: Position },

    #[error("{position}: unterminated block comment")]
    UnterminatedBlockComment { position: Position },

    #[error("{position}: invalid escape sequence")]
    InvalidEscape { position: Position },

    #[error("{position}: invalid unicode scalar escape")]
    InvalidUnicodeEscape { position: Position },

    #[error("{position}: {radix} literal requires at least one digit")]
    EmptyDigits {
        radix: &'static str,
        position: Position,
    },

    #[error("{position}: reserved word `{word}` cannot be used as an identifier")]
    ReservedWord { word: SmolStr, position: Position },

    #[error("{position}: expected {expected}")]
    Expected {
        expected: &'static str,
        position: Position,
    },

    #[error("{position}: unexpected end of input")]
    UnexpectedEof { position: Position },
}

impl LexError {
    /// The position the error is tagged with.
    pub fn position(&self) -> Position {
        match *self {
            LexError::UnterminatedString { position }
            | LexError::UnterminatedBlockComment { position }
            | LexError::InvalidEscape { position }
            | LexError::InvalidUnicodeEscape { position }
            | LexError::EmptyDigits { position, .. }
            | LexError::ReservedWord { position, .. }
            | LexError::Expected { position, .. }
            | LexError::UnexpectedEof { position } => position,
        }
    }
}

pub type LexResult<T> = Result<T, LexError>;

// ============================================================================
// Reserved words
// ============================================================================

/// Keywords used in declarations.
pub const DECLARATION_KEYWORDS: &[&str] = &[
    "class",
    "deinit",
    "enum",
    "extension",
    "func",
    "import",
    "init",
    "inout",
    "internal",
    "let",
    "operator",
    "private",
    "protocol",
    "public",
    "static",
    "struct",
    "subscript",
    "typealias",
    "var",
];

/// Keywords used in statements.
pub const STATEMENT_KEYWORDS: &[&str] = &[
    "break",
    "case",
    "continue",
    "default",
    "defer",
    "do",
    "else",
    "fallthrough",
    "for",
    "guard",
    "if",
    "in",
    "repeat",
    "return",
    "switch",
    "where",
    "while",
];

/// Keywords used in expressions and types.
pub const EXPRESSION_KEYWORDS: &[&str] = &[
    "as",
    "catch",
    "dynamicType",
    "false",
    "is",
    "nil",
    "rethrows",
    "self",
    "Self",
    "super",
    "throw",
    "throws",
    "true",
    "try",
    "__COLUMN__",
    "__FILE__",
    "__FUNCTION__",
    "__LINE__",
];

/// Contextual keywords, reserved at the lexical level here.
pub const CONTEXTUAL_KEYWORDS: &[&str] = &[
    "associativity",
    "convenience",
    "didSet",
    "dynamic",
    "final",
    "get",
    "indirect",
    "infix",
    "lazy",
    "left",
    "mutating",
    "none",
    "nonmutating",
    "optional",
    "override",
    "postfix",
    "precedence",
    "prefix",
    "Protocol",
    "required",
    "right",
    "set",
    "Type",
    "unowned",
    "weak",
    "willSet",
];

lazy_static! {
    static ref RESERVED_WORDS: FxHashSet<&'static str> = {
        let mut set = FxHashSet::default();
        set.extend(DECLARATION_KEYWORDS);
        set.extend(STATEMENT_KEYWORDS);
        set.extend(EXPRESSION_KEYWORDS);
        set.extend(CONTEXTUAL_KEYWORDS);
        set.insert("_");
        set
    };
}

/// True when `word` may appear only where the grammar names it explicitly.
pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS.contains(word)
}

// ============================================================================
// Character classes
// ============================================================================

pub fn is_identifier_head(c: char) -> bool {
    c == '_' || c.is_alphabetic()
}

pub fn is_identifier_character(c: char) -> bool {
    c == '_' || c.is_alphanumeric()
}

/// Operator head characters: ASCII operator characters plus the Unicode
/// operator ranges of the Swift grammar.
pub fn is_operator_head(c: char) -> bool {
    matches!(
        c,
        '=' | '/' | '-' | '+' | '!' | '*' | '%' | '<' | '>' | '&' | '|' | '^' | '~' | '?'
    ) || matches!(c as u32,
        0x00A1..=0x00A7
        | 0x00A9
        | 0x00AB
        | 0x00AC
        | 0x00AE
        | 0x00B0..=0x00B1
        | 0x00B6
        | 0x00BB
        | 0x00BF
        | 0x00D7
        | 0x00F7
        | 0x2016..=0x2017
        | 0x2020..=0x2027
        | 0x2030..=0x203E
        | 0x2041..=0x2053
        | 0x2055..=0x205E
        | 0x2190..=0x23FF
        | 0x2500..=0x2775
        | 0x2794..=0x2BFF
        | 0x2E00..=0x2E7F
        | 0x3001..=0x3003
        | 0x3008..=0x3030
    )
}

/// Operator continuation characters: the head set plus combining marks.
pub fn is_operator_character(c: char) -> bool {
    is_operator_head(c)
        || matches!(c as u32,
            0x0300..=0x036F
            | 0x1DC0..=0x1DFF
            | 0x20D0..=0x20FF
            | 0xFE00..=0xFE0F
            | 0xFE20..=0xFE2F
            | 0xE0100..=0xE01FF
        )
}

fn is_hex_digit(c: char) -> bool {
    c.is_ascii_hexdigit()
}

// ============================================================================
// Cursor
// ============================================================================

/// Wraps the input text and tracks the current position. The only mutable
/// state of a parse; the input buffer itself is never mutated.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    src: &'src str,
    offset: usize,
    line: u32,
    column: u32,
}

impl<'src> Cursor<'src> {
    pub fn new(src: &'src str) -> Self {
        Cursor {
            src,
            offset: 0,
            line: 1,
            column: 1,
        }
    }

    /// The character at the cursor, or `None` at end of input.
    pub fn peek(&self) -> Option<char> {
        self.src[self.offset..].chars().next()
    }

    /// The character one code point past the cursor.
    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.src[self.offset..].chars();
        chars.next();
        chars.next()
    }

    /// Consume one code point.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.offset += c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Consume `c` if it is next.
    pub fn bump_if(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// True when the remaining input begins with `s`.
    pub fn starts_with(&self, s: &str) -> bool {
        self.src[self.offset..].starts_with(s)
    }

    /// Consume the literal `s`, which must be next.
    pub fn advance_str(&mut self, s: &str) {
        debug_assert!(self.starts_with(s));
        for _ in s.chars() {
            self.advance();
        }
    }

    pub fn is_eof(&self) -> bool {
        self.offset >= self.src.len()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The input from the cursor to the end.
    pub fn rest(&self) -> &'src str {
        &self.src[self.offset..]
    }

    pub fn slice(&self, from: usize) -> &'src str {
        &self.src[from..self.offset]
    }

    pub fn position(&self) -> Position {
        Position {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    pub fn save(&self) -> Checkpoint {
        Checkpoint {
            offset: self.offset,
            line: self.line,
            column: self.column,
        }
    }

    pub fn restore(&mut self, checkpoint: Checkpoint) {
        self.offset = checkpoint.offset;
        self.line = checkpoint.line;
        self.column = checkpoint.column;
    }

    fn expected(&self, expected: &'static str) -> LexError {
        if self.is_eof() {
            LexError::UnexpectedEof {
                position: self.position(),
            }
        } else {
            LexError::Expected {
                expected,
                position: self.position(),
            }
        }
    }

    // ========================================================================
    // Whitespace and comments
    // ========================================================================

    /// Skip whitespace, `// …` comments and arbitrarily nested `/* … */`
    /// comments. An unterminated block comment is a lexical error.
    pub fn skip_whitespace_and_comments(&mut self) -> LexResult<()> {
        loop {
            match self.peek() {
                Some(c) if c.is_whitespace() => {
                    self.advance();
                }
                Some('/') if self.peek_second() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                Some('/') if self.peek_second() == Some('*') => {
                    let start = self.position();
                    self.advance_str("/*");
                    let mut depth = 1u32;
                    while depth > 0 {
                        if self.starts_with("/*") {
                            self.advance_str("/*");
                            depth += 1;
                        } else if self.starts_with("*/") {
                            self.advance_str("*/");
                            depth -= 1;
                        } else if self.advance().is_none() {
                            return Err(LexError::UnterminatedBlockComment { position: start });
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    // ========================================================================
    // Identifiers and words
    // ========================================================================

    /// Scan a raw identifier-shaped word with no reserved-word check.
    /// The grammar's `keyword(…)` matching is built on this.
    pub fn scan_word(&mut self) -> LexResult<&'src str> {
        let start = self.offset;
        match self.peek() {
            Some(c) if is_identifier_head(c) => {
                self.advance();
            }
            _ => return Err(self.expected("identifier")),
        }
        while let Some(c) = self.peek() {
            if is_identifier_character(c) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(self.slice(start))
    }

    /// Scan an identifier, rejecting reserved words. Backtick-quoted forms
    /// are accepted and may spell any word.
    pub fn scan_identifier(&mut self) -> LexResult<SmolStr> {
        if self.peek() == Some('`') {
            self.advance();
            let word = self.scan_word()?;
            if !self.bump_if('`') {
                return Err(self.expected("closing backtick"));
            }
            return Ok(SmolStr::new(word));
        }
        let position = self.position();
        let word = self.scan_word()?;
        if is_reserved(word) {
            return Err(LexError::ReservedWord {
                word: SmolStr::new(word),
                position,
            });
        }
        Ok(SmolStr::new(word))
    }

    // ========================================================================
    // Operators
    // ========================================================================

    /// Scan an operator: a maximal run over the operator character classes,
    /// or a backtick-quoted run.
    pub fn scan_operator(&mut self) -> LexResult<SmolStr> {
        if self.peek() == Some('`') {
            let cp = self.save();
            self.advance();
            let start = self.offset;
            while let Some(c) = self.peek() {
                if is_operator_character(c) {
                    self.advance();
                } else {
                    break;
                }
            }
            if self.offset > start && self.peek() == Some('`') {
                let text = SmolStr::new(self.slice(start));
                self.advance();
                return Ok(text);
            }
            self.restore(cp);
            return Err(self.expected("operator"));
        }
        match self.peek() {
            Some(c) if is_operator_head(c) => {}
            _ => return Err(self.expected("operator")),
        }
        let start = self.offset;
        self.advance();
        while let Some(c) = self.peek() {
            if is_operator_character(c) {
                self.advance();
            } else {
                break;
            }
        }
        Ok(SmolStr::new(self.slice(start)))
    }

    // ========================================================================
    // Numeric literals
    // ========================================================================

    /// Scan a run over `class` plus `_`, requiring at least one character.
    fn scan_digit_run(&mut self, radix: &'static str, class: fn(char) -> bool) -> LexResult<()> {
        let start = self.offset;
        while let Some(c) = self.peek() {
            if c == '_' || class(c) {
                self.advance();
            } else {
                break;
            }
        }
        if self.offset == start {
            return Err(LexError::EmptyDigits {
                radix,
                position: self.position(),
            });
        }
        Ok(())
    }

    /// A run of plain decimal digits, underscores excluded.
    pub fn scan_decimal_digits(&mut self) -> LexResult<&'src str> {
        let start = self.offset;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
        if self.offset == start {
            return Err(self.expected("decimal digits"));
        }
        Ok(self.slice(start))
    }

    /// Scan a numeric literal in any of the four radices, with optional
    /// fraction and exponent in the decimal and hexadecimal float forms.
    /// Returns the verbatim source text, including a leading `-` when the
    /// literal position allows one.
    pub fn scan_numeric_literal(&mut self) -> LexResult<SmolStr> {
        let start = self.offset;
        if self.peek() == Some('-') {
            match self.peek_second() {
                Some(c) if c.is_ascii_digit() => {
                    self.advance();
                }
                _ => return Err(self.expected("numeric literal")),
            }
        }
        match self.peek() {
            Some(c) if c.is_ascii_digit() => {}
            _ => return Err(self.expected("numeric literal")),
        }

        if self.starts_with("0b") {
            self.advance_str("0b");
            self.scan_digit_run("binary", |c| c == '0' || c == '1')?;
        } else if self.starts_with("0o") {
            self.advance_str("0o");
            self.scan_digit_run("octal", |c| ('0'..='7').contains(&c))?;
        } else if self.starts_with("0x") {
            self.advance_str("0x");
            self.scan_digit_run("hexadecimal", is_hex_digit)?;
            self.scan_hex_float_tail()?;
        } else {
            self.scan_digit_run("decimal", |c| c.is_ascii_digit())?;
            self.scan_decimal_float_tail()?;
        }
        Ok(SmolStr::new(self.slice(start)))
    }

    /// Optional `.dec+` fraction and `[eE][+-]?dec+` exponent. A dot not
    /// followed by a digit is left for the postfix grammar; an `e` without
    /// digits is not an exponent.
    fn scan_decimal_float_tail(&mut self) -> LexResult<()> {
        if self.peek() == Some('.') {
            if let Some(c) = self.peek_second() {
                if c.is_ascii_digit() {
                    self.advance();
                    self.scan_digit_run("decimal", |c| c.is_ascii_digit())?;
                }
            }
        }
        if matches!(self.peek(), Some('e') | Some('E')) {
            let cp = self.save();
            self.advance();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    self.scan_digit_run("decimal", |c| c.is_ascii_digit())?;
                }
                _ => self.restore(cp),
            }
        }
        Ok(())
    }

    /// Optional `.hex+` fraction with mandatory `[pP][+-]?dec+` exponent.
    /// Without the exponent the fraction is rewound, leaving a plain hex
    /// integer followed by a member access.
    fn scan_hex_float_tail(&mut self) -> LexResult<()> {
        let cp = self.save();
        let mut has_fraction = false;
        if self.peek() == Some('.') {
            match self.peek_second() {
                Some(c) if is_hex_digit(c) => {
                    self.advance();
                    self.scan_digit_run("hexadecimal", is_hex_digit)?;
                    has_fraction = true;
                }
                _ => return Ok(()),
            }
        }
        if matches!(self.peek(), Some('p') | Some('P')) {
            let exp_cp = self.save();
            self.advance();
            if matches!(self.peek(), Some('+') | Some('-')) {
                self.advance();
            }
            match self.peek() {
                Some(c) if c.is_ascii_digit() => {
                    self.scan_digit_run("decimal", |c| c.is_ascii_digit())?;
                    return Ok(());
                }
                _ => self.restore(exp_cp),
            }
        }
        if has_fraction {
            self.restore(cp);
        }
        Ok(())
    }

    // ========================================================================
    // Escape sequences
    // ========================================================================

    /// Decode the body of an escape sequence, with the cursor positioned
    /// just past the backslash. Interpolation (`\(`) is handled by the
    /// grammar layer before this is called.
    pub fn scan_escape_body(&mut self) -> LexResult<char> {
        let position = self.position();
        match self.advance() {
            Some('0') => Ok('\0'),
            Some('\\') => Ok('\\'),
            Some('t') => Ok('\t'),
            Some('n') => Ok('\n'),
            Some('r') => Ok('\r'),
            Some('"') => Ok('"'),
            Some('\'') => Ok('\''),
            Some('u') => {
                if !self.bump_if('{') {
                    return Err(LexError::InvalidUnicodeEscape { position });
                }
                let start = self.offset;
                while let Some(c) = self.peek() {
                    if is_hex_digit(c) {
                        self.advance();
                    } else {
                        break;
                    }
                }
                let digits = self.slice(start);
                if digits.is_empty() || digits.len() > 8 || !self.bump_if('}') {
                    return Err(LexError::InvalidUnicodeEscape { position });
                }
                let value = u32::from_str_radix(digits, 16)
                    .map_err(|_| LexError::InvalidUnicodeEscape { position })?;
                char::from_u32(value).ok_or(LexError::InvalidUnicodeEscape { position })
            }
            Some(_) => Err(LexError::InvalidEscape { position }),
            None => Err(LexError::UnexpectedEof { position }),
        }
    }

    // ========================================================================
    // Balanced tokens
    // ========================================================================

    /// Capture the balanced-token text of an attribute argument. The cursor
    /// must be at the opening `(`; the returned string is the verbatim
    /// interior, with `()`, `[]` and `{}` nesting honored.
    pub fn scan_balanced_tokens(&mut self) -> LexResult<String> {
        if !self.bump_if('(') {
            return Err(self.expected("'('"));
        }
        let start = self.offset;
        let mut stack: Vec<char> = Vec::new();
        loop {
            match self.peek() {
                Some(c @ ('(' | '[' | '{')) => {
                    stack.push(c);
                    self.advance();
                }
                Some(')') if stack.is_empty() => {
                    let text = self.slice(start).to_owned();
                    self.advance();
                    return Ok(text);
                }
                Some(c @ (')' | ']' | '}')) => {
                    let open = match c {
                        ')' => '(',
                        ']' => '[',
                        _ => '{',
                    };
                    if stack.pop() != Some(open) {
                        return Err(self.expected("balanced tokens"));
                    }
                    self.advance();
                }
                Some(_) => {
                    self.advance();
                }
                None => {
                    return Err(LexError::UnexpectedEof {
                        position: self.position(),
                    })
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(src: &str) -> Cursor<'_> {
        Cursor::new(src)
    }

    #[test]
    fn test_position_tracking() {
        let mut c = cursor("ab\ncd");
        c.advance();
        c.advance();
        c.advance();
        let pos = c.position();
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 1);
        assert_eq!(pos.offset, 3);
    }

    #[test]
    fn test_restore_is_inverse_of_save() {
        let mut c = cursor("hello");
        let cp = c.save();
        c.advance();
        c.advance();
        c.restore(cp);
        assert_eq!(c.offset(), 0);
        assert_eq!(c.peek(), Some('h'));
    }

    #[test]
    fn test_nested_block_comments() {
        let mut c = cursor("/* /* x */ */y");
        c.skip_whitespace_and_comments().unwrap();
        assert_eq!(c.peek(), Some('y'));
    }

    #[test]
    fn test_unterminated_block_comment() {
        let mut c = cursor("/* /* x */");
        let err = c.skip_whitespace_and_comments().unwrap_err();
        assert!(matches!(err, LexError::UnterminatedBlockComment { .. }));
    }

    #[test]
    fn test_line_comment_runs_to_eol() {
        let mut c = cursor("// comment\nx");
        c.skip_whitespace_and_comments().unwrap();
        assert_eq!(c.peek(), Some('x'));
    }

    #[test]
    fn test_identifier_rejects_reserved() {
        let mut c = cursor("func");
        let err = c.scan_identifier().unwrap_err();
        assert!(matches!(err, LexError::ReservedWord { .. }));
    }

    #[test]
    fn test_backtick_identifier_allows_reserved() {
        let mut c = cursor("`func`");
        assert_eq!(c.scan_identifier().unwrap(), "func");
    }

    #[test]
    fn test_contextual_keywords_are_reserved() {
        for word in ["get", "set", "willSet", "precedence", "left"] {
            assert!(is_reserved(word), "{word} should be reserved");
        }
    }

    #[test]
    fn test_numeric_radices() {
        for (src, expected) in [
            ("0b1010_10", "0b1010_10"),
            ("0o7_55", "0o7_55"),
            ("0xDEAD_beef", "0xDEAD_beef"),
            ("1_000_000", "1_000_000"),
            ("-42", "-42"),
        ] {
            let mut c = cursor(src);
            assert_eq!(c.scan_numeric_literal().unwrap(), expected);
        }
    }

    #[test]
    fn test_decimal_float_forms() {
        for (src, expected) in [
            ("1.25", "1.25"),
            ("1.25e-3", "1.25e-3"),
            ("2E10", "2E10"),
            ("0x1p4", "0x1p4"),
            ("0x1.8p-2", "0x1.8p-2"),
        ] {
            let mut c = cursor(src);
            assert_eq!(c.scan_numeric_literal().unwrap(), expected, "input {src}");
        }
    }

    #[test]
    fn test_dot_without_digit_is_not_a_fraction() {
        let mut c = cursor("1.max");
        assert_eq!(c.scan_numeric_literal().unwrap(), "1");
        assert_eq!(c.peek(), Some('.'));
    }

    #[test]
    fn test_hex_fraction_without_exponent_rewinds() {
        // Not a hex float; `.self` must remain for the postfix grammar.
        let mut c = cursor("0x1F.self");
        assert_eq!(c.scan_numeric_literal().unwrap(), "0x1F");
        assert_eq!(c.peek(), Some('.'));
    }

    #[test]
    fn test_empty_radix_run_fails() {
        let mut c = cursor("0x");
        let err = c.scan_numeric_literal().unwrap_err();
        assert!(matches!(
            err,
            LexError::EmptyDigits {
                radix: "hexadecimal",
                ..
            }
        ));
    }

    #[test]
    fn test_operator_scanning() {
        let mut c = cursor("<*> x");
        assert_eq!(c.scan_operator().unwrap(), "<*>");
        let mut c = cursor("÷2");
        assert_eq!(c.scan_operator().unwrap(), "÷");
    }

    #[test]
    fn test_operator_excludes_dot() {
        let mut c = cursor("!.b");
        assert_eq!(c.scan_operator().unwrap(), "!");
        assert_eq!(c.peek(), Some('.'));
    }

    #[test]
    fn test_backtick_quoted_operator() {
        let mut c = cursor("`+++` x");
        assert_eq!(c.scan_operator().unwrap(), "+++");
        assert_eq!(c.peek(), Some(' '));
    }

    #[test]
    fn test_unterminated_backtick_operator_rewinds() {
        let mut c = cursor("`+++ x");
        assert!(c.scan_operator().is_err());
        assert_eq!(c.peek(), Some('`'));
    }

    #[test]
    fn test_backtick_without_operator_characters_fails() {
        let mut c = cursor("`abc`");
        assert!(c.scan_operator().is_err());
        assert_eq!(c.peek(), Some('`'));
    }

    #[test]
    fn test_unicode_operator_ranges() {
        assert!(is_operator_head('±'));
        assert!(is_operator_head('→'));
        assert!(!is_operator_head('a'));
        // Combining marks continue but cannot start an operator.
        assert!(is_operator_character('\u{0301}'));
        assert!(!is_operator_head('\u{0301}'));
    }

    #[test]
    fn test_escape_sequences() {
        for (src, expected) in [
            ("n", '\n'),
            ("t", '\t'),
            ("0", '\0'),
            ("\\", '\\'),
            ("\"", '"'),
            ("u{1F600}", '\u{1F600}'),
        ] {
            let mut c = cursor(src);
            assert_eq!(c.scan_escape_body().unwrap(), expected);
        }
    }

    #[test]
    fn test_invalid_escape() {
        let mut c = cursor("q");
        assert!(matches!(
            c.scan_escape_body().unwrap_err(),
            LexError::InvalidEscape { .. }
        ));
    }

    #[test]
    fn test_balanced_tokens() {
        let mut c = cursor("(a, [b {c}], (d))rest");
        assert_eq!(c.scan_balanced_tokens().unwrap(), "a, [b {c}], (d)");
        assert_eq!(c.peek(), Some('r'));
    }

    #[test]
    fn test_mismatched_balanced_tokens() {
        let mut c = cursor("(a[)");
        assert!(c.scan_balanced_tokens().is_err());
    }
}
