//! Expression grammar.
//!
//! expression = try-marker? prefix-expression binary-tail*
//!
//! Binary tails are collected as a flat list in source order; precedence is
//! deliberately not resolved here. The postfix chain is the canonical
//! seed-plus-suffix transformation of the left-recursive grammar, with
//! not-followed-by guards deciding whether an operator token belongs to the
//! chain or to the surrounding binary layer.

use crate::combinators::choice;
use crate::{ParseResult, Parser};
use swiftparse_ast::{
    BinaryTail, CaptureItem, CaptureSpecifier, Closure, ClosureParameters, ClosureSignature,
    ExplicitMember, Expression, ExpressionElement, FunctionCall, LiteralExpression,
    PostfixExpression, PrefixExpression, PrimaryExpression, SelfExpression, SmolStr,
    SuperclassExpression, TryOperator, TypeCast,
};

enum DotSuffix {
    DynamicType,
    Init,
    SelfSuffix,
    Member(ExplicitMember),
}

impl<'src> Parser<'src> {
    pub(crate) fn parse_expression(&mut self) -> ParseResult<Expression> {
        let try_op = self.parse_try_operator();
        let prefix = self.parse_prefix_expression()?;
        let binaries = self.many(Self::parse_binary_tail)?;
        Ok(Expression {
            try_op,
            prefix,
            binaries,
        })
    }

    /// `try`, `try?` or `try!`, the marker character adjacent to the word.
    pub(crate) fn parse_try_operator(&mut self) -> Option<TryOperator> {
        self.opt(|p| {
            p.keyword("try")?;
            if p.cursor.bump_if('?') {
                Ok(TryOperator::Optional)
            } else if p.cursor.bump_if('!') {
                Ok(TryOperator::Forced)
            } else {
                Ok(TryOperator::Try)
            }
        })
    }

    // ========================================================================
    // Binary tails
    // ========================================================================

    fn parse_binary_tail(&mut self) -> ParseResult<BinaryTail> {
        choice!(
            self,
            "binary expression",
            |p: &mut Self| p.attempt(Self::parse_conditional_tail),
            |p: &mut Self| p.attempt(Self::parse_assignment_tail),
            |p: &mut Self| p.attempt(Self::parse_cast_tail),
            Self::parse_operator_tail,
        )
    }

    /// `? try? then : rhs`
    fn parse_conditional_tail(&mut self) -> ParseResult<BinaryTail> {
        self.punct("?")?;
        let try_op = self.parse_try_operator();
        let then = self.parse_expression()?;
        self.punct(":")?;
        let rhs = self.parse_prefix_expression()?;
        Ok(BinaryTail::Conditional {
            try_op,
            then: Box::new(then),
            rhs,
        })
    }

    fn parse_assignment_tail(&mut self) -> ParseResult<BinaryTail> {
        self.equals_sign()?;
        let try_op = self.parse_try_operator();
        let rhs = self.parse_prefix_expression()?;
        Ok(BinaryTail::Assignment { try_op, rhs })
    }

    fn parse_cast_tail(&mut self) -> ParseResult<BinaryTail> {
        if self.keyword("is").is_ok() {
            let ty = self.parse_type()?;
            return Ok(BinaryTail::Cast(TypeCast::Is(ty)));
        }
        self.keyword("as")?;
        let cast = if self.cursor.bump_if('?') {
            TypeCast::AsOptional(self.parse_type()?)
        } else if self.cursor.bump_if('!') {
            TypeCast::AsForced(self.parse_type()?)
        } else {
            TypeCast::As(self.parse_type()?)
        };
        Ok(BinaryTail::Cast(cast))
    }

    fn parse_operator_tail(&mut self) -> ParseResult<BinaryTail> {
        let op = self.any_operator()?;
        let rhs = self.parse_prefix_expression()?;
        Ok(BinaryTail::Operator { op, rhs })
    }

    // ========================================================================
    // Prefix
    // ========================================================================

    pub(crate) fn parse_prefix_expression(&mut self) -> ParseResult<PrefixExpression> {
        if let Ok(name) = self.attempt(|p| {
            p.punct("&")?;
            p.identifier()
        }) {
            return Ok(PrefixExpression::InOut(name));
        }
        let operator = self.opt(|p| p.any_operator());
        let postfix = self.parse_postfix_expression()?;
        Ok(PrefixExpression::Operated { operator, postfix })
    }

    // ========================================================================
    // Postfix chain
    // ========================================================================

    pub(crate) fn parse_postfix_expression(&mut self) -> ParseResult<PostfixExpression> {
        let primary = self.parse_primary_expression()?;
        let mut node = PostfixExpression::Primary(primary);
        loop {
            if let Ok(op) = self.attempt(Self::parse_operator_suffix) {
                node = match op.as_str() {
                    "!" => PostfixExpression::ForcedValue(Box::new(node)),
                    "?" => PostfixExpression::OptionalChaining(Box::new(node)),
                    _ => PostfixExpression::PostfixOperator {
                        base: Box::new(node),
                        operator: op,
                    },
                };
                continue;
            }
            if let Ok(suffix) = self.attempt(Self::parse_dot_suffix) {
                node = match suffix {
                    DotSuffix::DynamicType => PostfixExpression::DynamicType(Box::new(node)),
                    DotSuffix::Init => PostfixExpression::Initializer(Box::new(node)),
                    DotSuffix::SelfSuffix => PostfixExpression::PostfixSelf(Box::new(node)),
                    DotSuffix::Member(member) => PostfixExpression::ExplicitMember {
                        base: Box::new(node),
                        member,
                    },
                };
                continue;
            }
            if let Ok((arguments, trailing_closure)) = self.attempt(Self::parse_call_suffix) {
                node = PostfixExpression::Call(FunctionCall {
                    callee: Box::new(node),
                    arguments,
                    trailing_closure,
                });
                continue;
            }
            if let Ok(arguments) = self.attempt(Self::parse_subscript_suffix) {
                node = PostfixExpression::Subscript {
                    base: Box::new(node),
                    arguments,
                };
                continue;
            }
            return Ok(node);
        }
    }

    /// An operator token that belongs to the postfix chain rather than the
    /// binary layer: it must not be followed by a primary, which the binary
    /// layer would need as its right operand.
    fn parse_operator_suffix(&mut self) -> ParseResult<SmolStr> {
        let op = self.any_operator()?;
        self.not_followed_by(Self::parse_primary_expression, "postfix operator")?;
        Ok(op)
    }

    fn parse_dot_suffix(&mut self) -> ParseResult<DotSuffix> {
        self.punct(".")?;
        if self.keyword("dynamicType").is_ok() {
            return Ok(DotSuffix::DynamicType);
        }
        if self.keyword("init").is_ok() {
            return Ok(DotSuffix::Init);
        }
        if self.keyword("self").is_ok() {
            return Ok(DotSuffix::SelfSuffix);
        }
        if let Ok(digits) = self.attempt(|p| p.decimal_digits()) {
            return Ok(DotSuffix::Member(ExplicitMember::TupleIndex(digits)));
        }
        let name = self.identifier()?;
        let generic_args = self.opt(Self::parse_generic_argument_clause);
        Ok(DotSuffix::Member(ExplicitMember::Field { name, generic_args }))
    }

    fn parse_call_suffix(
        &mut self,
    ) -> ParseResult<(Vec<ExpressionElement>, Option<Box<Closure>>)> {
        self.punct("(")?;
        let arguments = self.with_closures_allowed(|p| p.sep_by(",", Self::parse_expression_element))?;
        self.punct(")")?;
        let trailing_closure = if self.closures_allowed {
            self.opt(Self::parse_closure).map(Box::new)
        } else {
            None
        };
        Ok((arguments, trailing_closure))
    }

    fn parse_subscript_suffix(&mut self) -> ParseResult<Vec<Expression>> {
        self.punct("[")?;
        let arguments = self.with_closures_allowed(|p| p.sep_by1(",", Self::parse_expression))?;
        self.punct("]")?;
        Ok(arguments)
    }

    pub(crate) fn parse_expression_element(&mut self) -> ParseResult<ExpressionElement> {
        if let Ok(element) = self.attempt(|p| {
            let label = p.identifier()?;
            p.punct(":")?;
            let expression = p.parse_expression()?;
            Ok(ExpressionElement {
                label: Some(label),
                expression,
            })
        }) {
            return Ok(element);
        }
        let expression = self.parse_expression()?;
        Ok(ExpressionElement {
            label: None,
            expression,
        })
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    pub(crate) fn parse_primary_expression(&mut self) -> ParseResult<PrimaryExpression> {
        choice!(
            self,
            "expression",
            |p: &mut Self| p.parse_literal_expression().map(PrimaryExpression::Literal),
            Self::parse_self_primary,
            Self::parse_superclass_primary,
            Self::parse_closure_primary,
            Self::parse_parenthesized_primary,
            |p: &mut Self| p.attempt(Self::parse_implicit_member_primary),
            Self::parse_wildcard_primary,
            Self::parse_identifier_primary,
        )
    }

    pub(crate) fn parse_literal_expression(&mut self) -> ParseResult<LiteralExpression> {
        choice!(
            self,
            "literal",
            |p: &mut Self| p.parse_literal().map(LiteralExpression::Literal),
            Self::parse_array_or_dictionary_literal,
            Self::parse_magic_literal,
        )
    }

    fn parse_magic_literal(&mut self) -> ParseResult<LiteralExpression> {
        if self.keyword("__FILE__").is_ok() {
            Ok(LiteralExpression::File)
        } else if self.keyword("__LINE__").is_ok() {
            Ok(LiteralExpression::Line)
        } else if self.keyword("__COLUMN__").is_ok() {
            Ok(LiteralExpression::Column)
        } else if self.keyword("__FUNCTION__").is_ok() {
            Ok(LiteralExpression::Function)
        } else {
            self.fail("literal")
        }
    }

    /// `[a, b]`, `[k: v]`, `[]` or `[:]`, with a tolerated trailing comma.
    fn parse_array_or_dictionary_literal(&mut self) -> ParseResult<LiteralExpression> {
        self.punct("[")?;
        self.with_closures_allowed(|p| {
            if p.punct(":").is_ok() {
                p.punct("]")?;
                return Ok(LiteralExpression::Dictionary(Vec::new()));
            }
            if p.punct("]").is_ok() {
                return Ok(LiteralExpression::Array(Vec::new()));
            }
            let first = p.parse_expression()?;
            if p.punct(":").is_ok() {
                let value = p.parse_expression()?;
                let mut pairs = vec![(first, value)];
                while let Ok(pair) = p.attempt(|p| {
                    p.punct(",")?;
                    let key = p.parse_expression()?;
                    p.punct(":")?;
                    let value = p.parse_expression()?;
                    Ok((key, value))
                }) {
                    pairs.push(pair);
                }
                let _ = p.punct(",");
                p.punct("]")?;
                Ok(LiteralExpression::Dictionary(pairs))
            } else {
                let mut items = vec![first];
                while let Ok(item) = p.attempt(|p| {
                    p.punct(",")?;
                    p.parse_expression()
                }) {
                    items.push(item);
                }
                let _ = p.punct(",");
                p.punct("]")?;
                Ok(LiteralExpression::Array(items))
            }
        })
    }

    fn parse_self_primary(&mut self) -> ParseResult<PrimaryExpression> {
        self.keyword("self")?;
        let expr = if self
            .attempt(|p| {
                p.punct(".")?;
                p.keyword("init")
            })
            .is_ok()
        {
            SelfExpression::Initializer
        } else if let Ok(name) = self.attempt(|p| {
            p.punct(".")?;
            p.identifier()
        }) {
            SelfExpression::Member(name)
        } else if let Ok(arguments) = self.attempt(Self::parse_subscript_suffix) {
            SelfExpression::Subscript(arguments)
        } else {
            SelfExpression::Plain
        };
        Ok(PrimaryExpression::SelfExpression(expr))
    }

    fn parse_superclass_primary(&mut self) -> ParseResult<PrimaryExpression> {
        self.keyword("super")?;
        let expr = if self
            .attempt(|p| {
                p.punct(".")?;
                p.keyword("init")
            })
            .is_ok()
        {
            SuperclassExpression::Initializer
        } else if let Ok(name) = self.attempt(|p| {
            p.punct(".")?;
            p.identifier()
        }) {
            SuperclassExpression::Member(name)
        } else if let Ok(arguments) = self.attempt(Self::parse_subscript_suffix) {
            SuperclassExpression::Subscript(arguments)
        } else {
            return self.fail("superclass member, subscript or initializer");
        };
        Ok(PrimaryExpression::Superclass(expr))
    }

    fn parse_closure_primary(&mut self) -> ParseResult<PrimaryExpression> {
        if !self.closures_allowed {
            return self.fail("expression");
        }
        self.parse_closure().map(PrimaryExpression::Closure)
    }

    fn parse_parenthesized_primary(&mut self) -> ParseResult<PrimaryExpression> {
        self.punct("(")?;
        let elements =
            self.with_closures_allowed(|p| p.sep_by(",", Self::parse_expression_element))?;
        self.punct(")")?;
        Ok(PrimaryExpression::Parenthesized(elements))
    }

    fn parse_implicit_member_primary(&mut self) -> ParseResult<PrimaryExpression> {
        self.punct(".")?;
        let name = self.identifier()?;
        Ok(PrimaryExpression::ImplicitMember(name))
    }

    fn parse_wildcard_primary(&mut self) -> ParseResult<PrimaryExpression> {
        self.keyword("_")?;
        Ok(PrimaryExpression::Wildcard)
    }

    fn parse_identifier_primary(&mut self) -> ParseResult<PrimaryExpression> {
        let name = self.identifier()?;
        let generic_args = self.opt(Self::parse_generic_argument_clause);
        Ok(PrimaryExpression::Identifier { name, generic_args })
    }

    // ========================================================================
    // Closures
    // ========================================================================

    pub(crate) fn parse_closure(&mut self) -> ParseResult<Closure> {
        self.punct("{")?;
        let signature = self.opt(Self::parse_closure_signature);
        let statements = self.with_closures_allowed(Self::parse_statements)?;
        self.punct("}")?;
        Ok(Closure {
            signature,
            statements,
        })
    }

    /// Any of the signature shapes, always terminated by `in`. The `in`
    /// requirement is what lets a signature-less body like `{ x + 1 }`
    /// backtrack cleanly.
    fn parse_closure_signature(&mut self) -> ParseResult<ClosureSignature> {
        let capture_list = self.opt(Self::parse_capture_list);
        let parameters = self.opt(|p| {
            choice!(
                p,
                "closure parameters",
                |p: &mut Self| p.attempt(|p| p.parse_parameter_clause().map(ClosureParameters::Clause)),
                |p: &mut Self| p.attempt(|p| {
                    p.sep_by1(",", |p| p.identifier())
                        .map(ClosureParameters::Identifiers)
                }),
            )
        });
        let result = self.opt(|p| {
            p.punct("->")?;
            p.parse_type()
        });
        self.keyword("in")?;
        Ok(ClosureSignature {
            capture_list,
            parameters,
            result,
        })
    }

    fn parse_capture_list(&mut self) -> ParseResult<Vec<CaptureItem>> {
        self.punct("[")?;
        let items = self.sep_by1(",", Self::parse_capture_item)?;
        self.punct("]")?;
        Ok(items)
    }

    fn parse_capture_item(&mut self) -> ParseResult<CaptureItem> {
        let specifier = self.parse_capture_specifier();
        let expression = self.parse_expression()?;
        Ok(CaptureItem {
            specifier,
            expression,
        })
    }

    fn parse_capture_specifier(&mut self) -> Option<CaptureSpecifier> {
        if self.keyword("weak").is_ok() {
            return Some(CaptureSpecifier::Weak);
        }
        if self.keyword("unowned").is_ok() {
            if self
                .attempt(|p| {
                    p.punct("(")?;
                    p.keyword("safe")?;
                    p.punct(")")
                })
                .is_ok()
            {
                return Some(CaptureSpecifier::UnownedSafe);
            }
            if self
                .attempt(|p| {
                    p.punct("(")?;
                    p.keyword("unsafe")?;
                    p.punct(")")
                })
                .is_ok()
            {
                return Some(CaptureSpecifier::UnownedUnsafe);
            }
            return Some(CaptureSpecifier::Unowned);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use crate::{ParseResult, Parser};
    use swiftparse_ast::{
        BinaryTail, Expression, PostfixExpression, PrefixExpression, PrimaryExpression,
        TryOperator, TypeCast,
    };

    fn parse(src: &str) -> ParseResult<Expression> {
        let mut parser = Parser::new(src);
        parser.parse_expression()
    }

    fn postfix_of(expr: &Expression) -> &PostfixExpression {
        match &expr.prefix {
            PrefixExpression::Operated { postfix, .. } => postfix,
            other => panic!("expected operated prefix, got {other:?}"),
        }
    }

    #[test]
    fn test_binary_tails_stay_flat() {
        let expr = parse("a + b * c").unwrap();
        assert_eq!(expr.binaries.len(), 2);
        assert!(matches!(&expr.binaries[0], BinaryTail::Operator { op, .. } if op == "+"));
        assert!(matches!(&expr.binaries[1], BinaryTail::Operator { op, .. } if op == "*"));
    }

    #[test]
    fn test_postfix_call_left_associativity() {
        let expr = parse("f(a)(b)").unwrap();
        let PostfixExpression::Call(outer) = postfix_of(&expr) else {
            panic!("expected call");
        };
        assert!(matches!(&*outer.callee, PostfixExpression::Call(_)));
    }

    #[test]
    fn test_member_chain_left_associativity() {
        let expr = parse("a.b.c").unwrap();
        let PostfixExpression::ExplicitMember { base, .. } = postfix_of(&expr) else {
            panic!("expected member");
        };
        assert!(matches!(&**base, PostfixExpression::ExplicitMember { .. }));
    }

    #[test]
    fn test_optional_chaining_and_forced_value() {
        let expr = parse("items?").unwrap();
        assert!(matches!(
            postfix_of(&expr),
            PostfixExpression::OptionalChaining(_)
        ));
        let expr = parse("value!").unwrap();
        assert!(matches!(postfix_of(&expr), PostfixExpression::ForcedValue(_)));
    }

    #[test]
    fn test_forced_value_after_call() {
        let expr = parse("f()!").unwrap();
        let PostfixExpression::ForcedValue(base) = postfix_of(&expr) else {
            panic!("expected forced value");
        };
        assert!(matches!(&**base, PostfixExpression::Call(_)));
    }

    #[test]
    fn test_nil_coalescing_stays_binary() {
        let expr = parse("x ?? y").unwrap();
        assert_eq!(expr.binaries.len(), 1);
        assert!(matches!(&expr.binaries[0], BinaryTail::Operator { op, .. } if op == "??"));
    }

    #[test]
    fn test_conditional_tail() {
        let expr = parse("a ? b : c").unwrap();
        assert_eq!(expr.binaries.len(), 1);
        assert!(matches!(&expr.binaries[0], BinaryTail::Conditional { .. }));
    }

    #[test]
    fn test_assignment_is_not_equality() {
        let expr = parse("a = b").unwrap();
        assert!(matches!(&expr.binaries[0], BinaryTail::Assignment { .. }));
        let expr = parse("a == b").unwrap();
        assert!(matches!(&expr.binaries[0], BinaryTail::Operator { op, .. } if op == "=="));
    }

    #[test]
    fn test_try_markers() {
        assert_eq!(parse("try f()").unwrap().try_op, Some(TryOperator::Try));
        assert_eq!(
            parse("try? f()").unwrap().try_op,
            Some(TryOperator::Optional)
        );
        assert_eq!(parse("try! f()").unwrap().try_op, Some(TryOperator::Forced));
    }

    #[test]
    fn test_cast_tails() {
        let expr = parse("x as? Int").unwrap();
        assert!(matches!(
            &expr.binaries[0],
            BinaryTail::Cast(TypeCast::AsOptional(_))
        ));
    }

    #[test]
    fn test_in_out_expression() {
        let expr = parse("&buffer").unwrap();
        assert!(matches!(&expr.prefix, PrefixExpression::InOut(name) if name == "buffer"));
    }

    #[test]
    fn test_trailing_closure() {
        let expr = parse("map(xs) { x in x }").unwrap();
        let PostfixExpression::Call(call) = postfix_of(&expr) else {
            panic!("expected call");
        };
        assert!(call.trailing_closure.is_some());
    }

    #[test]
    fn test_implicit_member() {
        let expr = parse(".red").unwrap();
        assert!(matches!(
            postfix_of(&expr),
            PostfixExpression::Primary(PrimaryExpression::ImplicitMember(name)) if name == "red"
        ));
    }

    #[test]
    fn test_generic_call_is_speculative() {
        // `a < b` must stay a comparison even though `<` could open generics.
        let expr = parse("a < b").unwrap();
        assert!(matches!(&expr.binaries[0], BinaryTail::Operator { op, .. } if op == "<"));
        let expr = parse("f<Int>(x)").unwrap();
        let PostfixExpression::Call(call) = postfix_of(&expr) else {
            panic!("expected call");
        };
        let PostfixExpression::Primary(PrimaryExpression::Identifier { generic_args, .. }) =
            &*call.callee
        else {
            panic!("expected identifier callee");
        };
        assert!(generic_args.is_some());
    }
}
