//! Swift 2.1 Parser
//!
//! Recursive descent over a character cursor, with Parsec-style speculative
//! alternatives: a failing alternative that consumed input commits the parse
//! to its error, unless the alternative ran under `attempt`. The grammar
//! productions live in the sibling modules (types, patterns, expressions,
//! declarations, statements); this module holds the parser state, the
//! token-level primitives and the five public entry points.
//!
//! The parser is a pure function of its input: single-threaded, synchronous,
//! and free of global state. Every parse owns its cursor and its AST.

mod combinators;
mod declarations;
mod expressions;
mod literals;
mod patterns;
mod statements;
mod types;

pub use swiftparse_ast as ast;
pub use swiftparse_lexer::{LexError, Position};

use swiftparse_ast::{Declaration, Expression, FunctionCall, Module, PostfixExpression, SmolStr};
use swiftparse_lexer::{is_identifier_character, Cursor};
use thiserror::Error;

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Lex(#[from] LexError),

    #[error("{position}: expected {expected}, found {found}")]
    Expected {
        expected: String,
        found: String,
        position: Position,
    },

    #[error("{position}: unexpected end of input, expected {expected}")]
    UnexpectedEndOfInput {
        expected: String,
        position: Position,
    },

    #[error("{position}: unexpected trailing input")]
    TrailingInput { position: Position },

    #[error("{position}: infix operator precedence must be between 0 and 255")]
    PrecedenceOutOfRange { position: Position },

    #[error("{position}: #line requires a line number greater than zero")]
    InvalidLineNumber { position: Position },
}

impl ParseError {
    /// The position the error is tagged with.
    pub fn position(&self) -> Position {
        match self {
            ParseError::Lex(e) => e.position(),
            ParseError::Expected { position, .. }
            | ParseError::UnexpectedEndOfInput { position, .. }
            | ParseError::TrailingInput { position }
            | ParseError::PrecedenceOutOfRange { position }
            | ParseError::InvalidLineNumber { position } => *position,
        }
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

// ============================================================================
// Parser state
// ============================================================================

pub struct Parser<'src> {
    pub(crate) cursor: Cursor<'src>,
    /// Deepest failure seen so far; reported when the whole parse dies.
    furthest: Option<ParseError>,
    /// False while parsing a position where `{` must belong to the enclosing
    /// statement (condition clauses, switch scrutinees, for headers, catch
    /// patterns). Re-enabled inside any bracketed subexpression.
    pub(crate) closures_allowed: bool,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Parser {
            cursor: Cursor::new(source),
            furthest: None,
            closures_allowed: true,
        }
    }

    // ========================================================================
    // Error plumbing
    // ========================================================================

    pub(crate) fn record(&mut self, err: ParseError) -> ParseError {
        let further = match &self.furthest {
            Some(best) => err.position().offset >= best.position().offset,
            None => true,
        };
        if further {
            self.furthest = Some(err.clone());
        }
        err
    }

    pub(crate) fn expected_err(&mut self, expected: &str) -> ParseError {
        let position = self.cursor.position();
        let err = if self.cursor.is_eof() {
            ParseError::UnexpectedEndOfInput {
                expected: expected.to_string(),
                position,
            }
        } else {
            ParseError::Expected {
                expected: expected.to_string(),
                found: found_snippet(self.cursor.rest()),
                position,
            }
        };
        self.record(err)
    }

    pub(crate) fn fail<T>(&mut self, expected: &str) -> ParseResult<T> {
        Err(self.expected_err(expected))
    }

    // ========================================================================
    // Token primitives
    //
    // Each skips leading whitespace/comments. A token that does not match
    // restores the cursor to before the skipped whitespace, so a token-level
    // failure never counts as consumption; only a whitespace-level lexical
    // error (an unterminated block comment) leaves the cursor advanced and
    // commits the surrounding alternation.
    // ========================================================================

    pub(crate) fn ws(&mut self) -> ParseResult<()> {
        match self.cursor.skip_whitespace_and_comments() {
            Ok(()) => Ok(()),
            Err(e) => Err(self.record(e.into())),
        }
    }

    /// Match the literal text `s`.
    pub(crate) fn punct(&mut self, s: &str) -> ParseResult<()> {
        let cp = self.cursor.save();
        self.ws()?;
        if self.cursor.starts_with(s) {
            self.cursor.advance_str(s);
            Ok(())
        } else {
            let err = self.expected_err(&format!("`{s}`"));
            self.cursor.restore(cp);
            Err(err)
        }
    }

    /// Match a whole word equal to `kw`. Reserved words are only ever
    /// consumed through this.
    pub(crate) fn keyword(&mut self, kw: &str) -> ParseResult<()> {
        let cp = self.cursor.save();
        self.ws()?;
        let token_start = self.cursor.save();
        if let Ok(word) = self.cursor.scan_word() {
            if word == kw {
                return Ok(());
            }
        }
        self.cursor.restore(token_start);
        let err = self.expected_err(&format!("`{kw}`"));
        self.cursor.restore(cp);
        Err(err)
    }

    /// Match `#` immediately followed by the word `kw`.
    pub(crate) fn hash_keyword(&mut self, kw: &str) -> ParseResult<()> {
        let cp = self.cursor.save();
        self.ws()?;
        let token_start = self.cursor.save();
        if self.cursor.bump_if('#') {
            if let Ok(word) = self.cursor.scan_word() {
                if word == kw {
                    return Ok(());
                }
            }
        }
        self.cursor.restore(token_start);
        let err = self.expected_err(&format!("`#{kw}`"));
        self.cursor.restore(cp);
        Err(err)
    }

    pub(crate) fn identifier(&mut self) -> ParseResult<SmolStr> {
        let cp = self.cursor.save();
        self.ws()?;
        match self.cursor.scan_identifier() {
            Ok(name) => Ok(name),
            Err(e) => {
                let err = self.record(e.into());
                self.cursor.restore(cp);
                Err(err)
            }
        }
    }

    pub(crate) fn any_operator(&mut self) -> ParseResult<SmolStr> {
        let cp = self.cursor.save();
        self.ws()?;
        match self.cursor.scan_operator() {
            Ok(op) => Ok(op),
            Err(e) => {
                let err = self.record(e.into());
                self.cursor.restore(cp);
                Err(err)
            }
        }
    }

    pub(crate) fn numeric_literal(&mut self) -> ParseResult<SmolStr> {
        let cp = self.cursor.save();
        self.ws()?;
        match self.cursor.scan_numeric_literal() {
            Ok(text) => Ok(text),
            Err(e) => {
                let err = self.record(e.into());
                self.cursor.restore(cp);
                Err(err)
            }
        }
    }

    pub(crate) fn decimal_digits(&mut self) -> ParseResult<SmolStr> {
        let cp = self.cursor.save();
        self.ws()?;
        match self.cursor.scan_decimal_digits() {
            Ok(digits) => Ok(SmolStr::new(digits)),
            Err(e) => {
                let err = self.record(e.into());
                self.cursor.restore(cp);
                Err(err)
            }
        }
    }

    /// A standalone `=`, rejected when it would be the head of a longer
    /// operator such as `==`.
    pub(crate) fn equals_sign(&mut self) -> ParseResult<()> {
        let cp = self.cursor.save();
        self.ws()?;
        if self.cursor.bump_if('=') {
            match self.cursor.peek() {
                Some(c) if swiftparse_lexer::is_operator_character(c) => {}
                _ => return Ok(()),
            }
        }
        let err = self.expected_err("`=`");
        self.cursor.restore(cp);
        Err(err)
    }

    // ========================================================================
    // Peeking
    // ========================================================================

    pub(crate) fn peek_punct(&mut self, s: &str) -> bool {
        let peeked = self.look_ahead(|p| {
            p.ws()?;
            Ok(p.cursor.starts_with(s))
        });
        matches!(peeked, Ok(true))
    }

    pub(crate) fn peek_keyword(&mut self, kw: &str) -> bool {
        let peeked = self.look_ahead(|p| {
            p.ws()?;
            Ok(matches!(p.cursor.scan_word(), Ok(word) if word == kw))
        });
        matches!(peeked, Ok(true))
    }

    // ========================================================================
    // Closure arbitration
    // ========================================================================

    pub(crate) fn with_closures_banned<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.closures_allowed;
        self.closures_allowed = false;
        let result = f(self);
        self.closures_allowed = saved;
        result
    }

    pub(crate) fn with_closures_allowed<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let saved = self.closures_allowed;
        self.closures_allowed = true;
        let result = f(self);
        self.closures_allowed = saved;
        result
    }
}

/// A short rendering of what sits at the failure position.
fn found_snippet(rest: &str) -> String {
    let mut chars = rest.chars();
    match chars.next() {
        None => "end of input".to_string(),
        Some(c) if is_identifier_character(c) => {
            let word: String = rest
                .chars()
                .take_while(|&c| is_identifier_character(c))
                .take(16)
                .collect();
            format!("`{word}`")
        }
        Some(c) => format!("`{c}`"),
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Run an entry production, then require end of input.
fn finish<T>(mut parser: Parser<'_>, result: ParseResult<T>) -> Result<T, ParseError> {
    match result {
        Ok(value) => {
            parser.ws()?;
            if parser.cursor.is_eof() {
                return Ok(value);
            }
            let trailing = ParseError::TrailingInput {
                position: parser.cursor.position(),
            };
            match parser.furthest.take() {
                Some(best) if best.position().offset >= trailing.position().offset => Err(best),
                _ => Err(trailing),
            }
        }
        Err(err) => match parser.furthest.take() {
            Some(best) if best.position().offset > err.position().offset => Err(best),
            _ => Err(err),
        },
    }
}

/// Parse a whole module. Trailing non-whitespace is an error.
pub fn parse_module(source: &str) -> Result<Module, ParseError> {
    let mut parser = Parser::new(source);
    let result = parser
        .parse_statements()
        .map(|statements| Module { statements });
    finish(parser, result)
}

/// Parse a single expression spanning the whole input.
pub fn parse_expression(source: &str) -> Result<Expression, ParseError> {
    let mut parser = Parser::new(source);
    let result = parser.parse_expression();
    finish(parser, result)
}

/// Parse a single declaration spanning the whole input.
pub fn parse_declaration(source: &str) -> Result<Declaration, ParseError> {
    let mut parser = Parser::new(source);
    let result = parser.parse_declaration();
    finish(parser, result)
}

/// Parse a postfix chain that culminates in a function call.
pub fn parse_function_call(source: &str) -> Result<FunctionCall, ParseError> {
    let mut parser = Parser::new(source);
    let result = match parser.parse_postfix_expression() {
        Ok(PostfixExpression::Call(call)) => Ok(call),
        Ok(_) => parser.fail("function call"),
        Err(e) => Err(e),
    };
    finish(parser, result)
}

/// Parse a postfix chain that ends in `.init`.
pub fn parse_initializer_expression(source: &str) -> Result<PostfixExpression, ParseError> {
    let mut parser = Parser::new(source);
    let result = match parser.parse_postfix_expression() {
        Ok(expr @ PostfixExpression::Initializer(_)) => Ok(expr),
        Ok(_) => parser.fail("initializer expression"),
        Err(e) => Err(e),
    };
    finish(parser, result)
}
