//! Literals.
//!
//! Numeric literals keep their verbatim source text. String literals are
//! driven from here because interpolation re-enters the expression grammar:
//! `\(` suspends text accumulation, parses a full expression, and requires
//! the closing `)`.

use crate::combinators::choice;
use crate::{ParseError, ParseResult, Parser};
use swiftparse_ast::{InterpolationSegment, Literal};
use swiftparse_lexer::LexError;

impl<'src> Parser<'src> {
    /// A literal in a position that takes one directly (raw-value enum
    /// cases, literal expressions).
    pub(crate) fn parse_literal(&mut self) -> ParseResult<Literal> {
        choice!(
            self,
            "literal",
            |p: &mut Self| p.numeric_literal().map(Literal::Numeric),
            Self::parse_boolean_literal,
            Self::parse_nil_literal,
            Self::parse_string_literal,
        )
    }

    fn parse_boolean_literal(&mut self) -> ParseResult<Literal> {
        if self.keyword("true").is_ok() {
            Ok(Literal::Boolean(true))
        } else if self.keyword("false").is_ok() {
            Ok(Literal::Boolean(false))
        } else {
            self.fail("boolean literal")
        }
    }

    fn parse_nil_literal(&mut self) -> ParseResult<Literal> {
        self.keyword("nil")?;
        Ok(Literal::Nil)
    }

    /// `"..."`, static or interpolated. Escape sequences are resolved into
    /// the text chunks; segments keep source order.
    pub(crate) fn parse_string_literal(&mut self) -> ParseResult<Literal> {
        let cp = self.cursor.save();
        self.ws()?;
        let open = self.cursor.position();
        if !self.cursor.bump_if('"') {
            let err = self.expected_err("string literal");
            self.cursor.restore(cp);
            return Err(err);
        }
        let mut segments: Vec<InterpolationSegment> = Vec::new();
        let mut text = String::new();
        loop {
            match self.cursor.peek() {
                None | Some('\n') => {
                    return Err(self.record(ParseError::Lex(LexError::UnterminatedString {
                        position: open,
                    })));
                }
                Some('"') => {
                    self.cursor.advance();
                    break;
                }
                Some('\\') => {
                    self.cursor.advance();
                    if self.cursor.bump_if('(') {
                        if !text.is_empty() {
                            segments.push(InterpolationSegment::Text(std::mem::take(&mut text)));
                        }
                        let expression =
                            self.with_closures_allowed(|p| p.parse_expression())?;
                        self.punct(")")?;
                        segments.push(InterpolationSegment::Expression(expression));
                    } else {
                        match self.cursor.scan_escape_body() {
                            Ok(c) => text.push(c),
                            Err(e) => return Err(self.record(e.into())),
                        }
                    }
                }
                Some(c) => {
                    text.push(c);
                    self.cursor.advance();
                }
            }
        }
        if segments.is_empty() {
            Ok(Literal::StaticString(text))
        } else {
            if !text.is_empty() {
                segments.push(InterpolationSegment::Text(text));
            }
            Ok(Literal::InterpolatedString(segments))
        }
    }

    /// A string literal that must not interpolate (`#line` file names).
    pub(crate) fn parse_static_string(&mut self) -> ParseResult<String> {
        match self.parse_string_literal()? {
            Literal::StaticString(text) => Ok(text),
            _ => self.fail("static string literal"),
        }
    }
}
