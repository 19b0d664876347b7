//! Type grammar.
//!
//! A type is a primary type with `?`, `!`, `.Type` and `.Protocol` suffixes,
//! optionally continued by a right-associative `throws? ->` function tail.
//! Generic-argument clauses are only ever parsed speculatively, because `<`
//! doubles as an operator head.

use crate::combinators::choice;
use crate::{ParseResult, Parser};
use swiftparse_ast::{
    FunctionType, MetatypeKind, ThrowsKind, TupleType, TupleTypeElement, Type, TypeAnnotation,
    TypeIdentifier, TypeIdentifierComponent,
};

impl<'src> Parser<'src> {
    pub(crate) fn parse_type(&mut self) -> ParseResult<Type> {
        let base = self.parse_suffixed_type()?;
        if let Some(throws) = self.opt(|p| {
            let throws = p.parse_throws_kind();
            p.punct("->")?;
            Ok(throws)
        }) {
            let result = self.parse_type()?;
            return Ok(Type::Function(FunctionType {
                parameter: Box::new(base),
                throws,
                result: Box::new(result),
            }));
        }
        Ok(base)
    }

    pub(crate) fn parse_throws_kind(&mut self) -> ThrowsKind {
        if self.keyword("throws").is_ok() {
            ThrowsKind::Throws
        } else if self.keyword("rethrows").is_ok() {
            ThrowsKind::Rethrows
        } else {
            ThrowsKind::None
        }
    }

    /// `?` and `!` suffixes bind only when adjacent to the type they wrap,
    /// which keeps `x as Int ?? y` out of the type grammar.
    fn parse_suffixed_type(&mut self) -> ParseResult<Type> {
        let mut ty = self.parse_primary_type()?;
        loop {
            if self.cursor.bump_if('?') {
                ty = Type::Optional(Box::new(ty));
                continue;
            }
            if self.cursor.bump_if('!') {
                ty = Type::ImplicitlyUnwrapped(Box::new(ty));
                continue;
            }
            if let Ok(kind) = self.attempt(|p| {
                p.punct(".")?;
                if p.keyword("Type").is_ok() {
                    Ok(MetatypeKind::Type)
                } else if p.keyword("Protocol").is_ok() {
                    Ok(MetatypeKind::Protocol)
                } else {
                    p.fail("`Type` or `Protocol`")
                }
            }) {
                ty = Type::Metatype {
                    base: Box::new(ty),
                    kind,
                };
                continue;
            }
            return Ok(ty);
        }
    }

    fn parse_primary_type(&mut self) -> ParseResult<Type> {
        choice!(
            self,
            "type",
            Self::parse_collection_type,
            Self::parse_protocol_composition_type,
            |p: &mut Self| p.parse_tuple_type().map(Type::Tuple),
            |p: &mut Self| p.parse_type_identifier().map(Type::Identifier),
        )
    }

    /// `[T]` or `[K: V]`.
    fn parse_collection_type(&mut self) -> ParseResult<Type> {
        self.punct("[")?;
        let first = self.parse_type()?;
        if self.punct(":").is_ok() {
            let value = self.parse_type()?;
            self.punct("]")?;
            Ok(Type::Dictionary(Box::new(first), Box::new(value)))
        } else {
            self.punct("]")?;
            Ok(Type::Array(Box::new(first)))
        }
    }

    fn parse_protocol_composition_type(&mut self) -> ParseResult<Type> {
        self.keyword("protocol")?;
        self.punct("<")?;
        let protocols = self.sep_by(",", Self::parse_type_identifier)?;
        self.punct(">")?;
        Ok(Type::ProtocolComposition(protocols))
    }

    pub(crate) fn parse_tuple_type(&mut self) -> ParseResult<TupleType> {
        self.punct("(")?;
        let elements = self.sep_by(",", Self::parse_tuple_type_element)?;
        let variadic = self.punct("...").is_ok();
        self.punct(")")?;
        Ok(TupleType { elements, variadic })
    }

    fn parse_tuple_type_element(&mut self) -> ParseResult<TupleTypeElement> {
        choice!(
            self,
            "tuple type element",
            |p: &mut Self| p.attempt(|p| {
                let inout = p.keyword("inout").is_ok();
                let name = p.identifier()?;
                let annotation = p.parse_type_annotation()?;
                Ok(TupleTypeElement::Named {
                    inout,
                    name,
                    annotation,
                })
            }),
            |p: &mut Self| {
                let attributes = p.parse_attributes()?;
                let inout = p.keyword("inout").is_ok();
                let ty = p.parse_type()?;
                Ok(TupleTypeElement::Anonymous {
                    attributes,
                    inout,
                    ty,
                })
            },
        )
    }

    pub(crate) fn parse_type_identifier(&mut self) -> ParseResult<TypeIdentifier> {
        let mut components = vec![self.parse_type_identifier_component()?];
        while let Ok(component) = self.attempt(|p| {
            p.punct(".")?;
            p.parse_type_identifier_component()
        }) {
            components.push(component);
        }
        Ok(TypeIdentifier { components })
    }

    fn parse_type_identifier_component(&mut self) -> ParseResult<TypeIdentifierComponent> {
        let name = self.identifier()?;
        let generic_args = self.opt(Self::parse_generic_argument_clause);
        Ok(TypeIdentifierComponent { name, generic_args })
    }

    /// Always called under `attempt`/`opt`: the clause is accepted only when
    /// the angle brackets enclose one or more types.
    pub(crate) fn parse_generic_argument_clause(&mut self) -> ParseResult<Vec<Type>> {
        self.punct("<")?;
        let args = self.sep_by1(",", Self::parse_type)?;
        self.punct(">")?;
        Ok(args)
    }

    pub(crate) fn parse_type_annotation(&mut self) -> ParseResult<TypeAnnotation> {
        self.punct(":")?;
        let attributes = self.parse_attributes()?;
        let ty = self.parse_type()?;
        Ok(TypeAnnotation { attributes, ty })
    }
}
