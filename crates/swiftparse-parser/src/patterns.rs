//! Pattern grammar.
//!
//! Ordered alternation: wildcard, value binding, `is`, speculative `id?`,
//! identifier, tuple, enum case, then the expression-pattern fallback. The
//! `as` cast pattern is a suffix wrap, since the published grammar writes it
//! left-recursively.

use crate::combinators::choice;
use crate::{ParseResult, Parser};
use swiftparse_ast::{BindingKind, Pattern};

impl<'src> Parser<'src> {
    pub(crate) fn parse_pattern(&mut self) -> ParseResult<Pattern> {
        let mut pattern = choice!(
            self,
            "pattern",
            Self::parse_wildcard_pattern,
            Self::parse_value_binding_pattern,
            Self::parse_is_pattern,
            |p: &mut Self| p.attempt(Self::parse_optional_identifier_pattern),
            |p: &mut Self| p.attempt(Self::parse_identifier_pattern),
            |p: &mut Self| p.attempt(Self::parse_tuple_pattern),
            |p: &mut Self| p.attempt(Self::parse_enum_case_pattern),
            |p: &mut Self| p
                .parse_expression()
                .map(|e| Pattern::Expression(Box::new(e))),
        )?;
        while let Ok(ty) = self.attempt(|p| {
            p.keyword("as")?;
            p.parse_type()
        }) {
            pattern = Pattern::As {
                pattern: Box::new(pattern),
                ty,
            };
        }
        Ok(pattern)
    }

    fn parse_wildcard_pattern(&mut self) -> ParseResult<Pattern> {
        self.keyword("_")?;
        let annotation = self.opt(Self::parse_type_annotation);
        Ok(Pattern::Wildcard(annotation))
    }

    fn parse_value_binding_pattern(&mut self) -> ParseResult<Pattern> {
        let kind = if self.keyword("let").is_ok() {
            BindingKind::Let
        } else if self.keyword("var").is_ok() {
            BindingKind::Var
        } else {
            return self.fail("`let` or `var`");
        };
        let pattern = self.parse_pattern()?;
        Ok(Pattern::ValueBinding {
            kind,
            pattern: Box::new(pattern),
        })
    }

    fn parse_is_pattern(&mut self) -> ParseResult<Pattern> {
        self.keyword("is")?;
        let ty = self.parse_type()?;
        Ok(Pattern::Is(ty))
    }

    /// `name?` with the question mark adjacent.
    fn parse_optional_identifier_pattern(&mut self) -> ParseResult<Pattern> {
        let name = self.identifier()?;
        if self.cursor.bump_if('?') {
            Ok(Pattern::OptionalIdentifier(name))
        } else {
            self.fail("`?`")
        }
    }

    fn parse_identifier_pattern(&mut self) -> ParseResult<Pattern> {
        let name = self.identifier()?;
        let annotation = self.opt(Self::parse_type_annotation);
        Ok(Pattern::Identifier { name, annotation })
    }

    fn parse_tuple_pattern(&mut self) -> ParseResult<Pattern> {
        self.punct("(")?;
        let elements = self.sep_by(",", Self::parse_pattern)?;
        self.punct(")")?;
        let annotation = self.opt(Self::parse_type_annotation);
        Ok(Pattern::Tuple {
            elements,
            annotation,
        })
    }

    /// `.name` or `.name(subpatterns)`.
    fn parse_enum_case_pattern(&mut self) -> ParseResult<Pattern> {
        self.punct(".")?;
        let name = self.identifier()?;
        let payload = self.opt(|p| {
            p.punct("(")?;
            let elements = p.sep_by(",", Self::parse_pattern)?;
            p.punct(")")?;
            Ok(elements)
        });
        Ok(Pattern::EnumCase { name, payload })
    }
}
