//! The quantified properties: determinism, whitespace invariance, keyword
//! rejection, associativity, comment nesting, error reporting.

use swiftparse_ast::*;
use swiftparse_parser::{
    parse_expression, parse_function_call, parse_initializer_expression, parse_module,
    ParseError,
};

#[test]
fn parsing_is_deterministic() {
    let src = "func f(x: Int) -> Int { return x * 2 }\nlet y = f(x: 21)";
    assert_eq!(parse_module(src), parse_module(src));
    let bad = "let x: = 1";
    assert_eq!(parse_module(bad), parse_module(bad));
}

#[test]
fn whitespace_and_comments_do_not_change_the_ast() {
    let plain = parse_expression("a+b").unwrap();
    let spaced = parse_expression("  a /* inline */ + // tail\n b ").unwrap();
    assert_eq!(plain, spaced);

    let plain = parse_module("let x = [1, 2]").unwrap();
    let spaced = parse_module("let /*k*/ x = [ 1 , 2 ]").unwrap();
    assert_eq!(plain, spaced);
}

#[test]
fn reserved_words_are_not_identifiers() {
    for word in [
        "func", "let", "var", "class", "struct", "enum", "protocol", "import", "repeat",
        "guard", "defer", "catch", "get", "set", "willSet", "didSet", "weak", "indirect",
        "precedence", "associativity", "left", "right", "none", "mutating", "dynamicType",
    ] {
        assert!(
            parse_expression(word).is_err(),
            "`{word}` must not parse as an identifier expression"
        );
    }
}

#[test]
fn postfix_chains_are_left_associative() {
    let call = parse_function_call("f(a)(b)").unwrap();
    assert!(matches!(&*call.callee, PostfixExpression::Call(_)));

    let expr = parse_expression("a.b.c").unwrap();
    let PrefixExpression::Operated { postfix, .. } = &expr.prefix else {
        panic!("expected operated prefix");
    };
    let PostfixExpression::ExplicitMember { base, member } = postfix else {
        panic!("expected member access");
    };
    assert!(matches!(member, ExplicitMember::Field { name, .. } if name == "c"));
    let PostfixExpression::ExplicitMember { base, member } = &**base else {
        panic!("expected inner member access");
    };
    assert!(matches!(member, ExplicitMember::Field { name, .. } if name == "b"));
    assert!(matches!(
        &**base,
        PostfixExpression::Primary(PrimaryExpression::Identifier { name, .. }) if name == "a"
    ));
}

#[test]
fn initializer_expression_entry_point() {
    let expr = parse_initializer_expression("Foo.init").unwrap();
    let PostfixExpression::Initializer(base) = expr else {
        panic!("expected initializer expression");
    };
    assert!(matches!(
        *base,
        PostfixExpression::Primary(PrimaryExpression::Identifier { ref name, .. }) if name == "Foo"
    ));

    assert!(parse_initializer_expression("Foo.bar").is_err());
}

#[test]
fn comment_nesting() {
    let expr = parse_expression("/* /* x */ */y").unwrap();
    let PrefixExpression::Operated { postfix, .. } = &expr.prefix else {
        panic!("expected operated prefix");
    };
    assert!(matches!(
        postfix,
        PostfixExpression::Primary(PrimaryExpression::Identifier { name, .. }) if name == "y"
    ));

    let err = parse_expression("/* /* x */ y").unwrap_err();
    assert!(matches!(
        err,
        ParseError::Lex(swiftparse_parser::LexError::UnterminatedBlockComment { .. })
    ));
}

#[test]
fn interpolation_reconstructs_source_order() {
    let expr = parse_expression(r#""count: \(n), total: \(t)!""#).unwrap();
    let PrefixExpression::Operated { postfix, .. } = &expr.prefix else {
        panic!("expected operated prefix");
    };
    let PostfixExpression::Primary(PrimaryExpression::Literal(LiteralExpression::Literal(
        Literal::InterpolatedString(segments),
    ))) = postfix
    else {
        panic!("expected interpolated string");
    };
    let mut rendered = String::new();
    for segment in segments {
        match segment {
            InterpolationSegment::Text(text) => rendered.push_str(text),
            InterpolationSegment::Expression(_) => rendered.push('\u{FFFC}'),
        }
    }
    assert_eq!(rendered, "count: \u{FFFC}, total: \u{FFFC}!");
}

#[test]
fn build_configuration_operator_precedence() {
    let module = parse_module("#if a || b && c\n#endif").unwrap();
    let Statement::BuildConfiguration(config) = &module.statements[0] else {
        panic!("expected build configuration");
    };
    let BuildConfiguration::Or(lhs, rhs) = &config.condition else {
        panic!("|| must be the outermost operator");
    };
    assert_eq!(**lhs, BuildConfiguration::Identifier("a".into()));
    assert!(matches!(**rhs, BuildConfiguration::And(_, _)));

    // Left associativity on both levels.
    let module = parse_module("#if a || b || c\n#endif").unwrap();
    let Statement::BuildConfiguration(config) = &module.statements[0] else {
        panic!("expected build configuration");
    };
    let BuildConfiguration::Or(lhs, _) = &config.condition else {
        panic!("expected ||");
    };
    assert!(matches!(**lhs, BuildConfiguration::Or(_, _)));
}

#[test]
fn trailing_input_is_an_error() {
    assert!(parse_expression("a b").is_err());
    assert!(parse_module("let x = 1 }").is_err());
}

#[test]
fn errors_carry_stdin_positions() {
    let err = parse_module("let x: = 1").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("<stdin>:1:"), "got: {message}");
}

#[test]
fn line_control_requires_positive_line() {
    assert!(parse_module("#line 0 \"main.swift\"").is_err());
    let module = parse_module("#line 7 \"main.swift\"").unwrap();
    assert_eq!(
        module.statements[0],
        Statement::LineControl(LineControl::Numbered {
            line: 7,
            file: "main.swift".to_string()
        })
    );
    let module = parse_module("#line").unwrap();
    assert_eq!(module.statements[0], Statement::LineControl(LineControl::Bare));
}

#[test]
fn infix_precedence_range_is_enforced() {
    use swiftparse_parser::parse_declaration;
    assert!(matches!(
        parse_declaration("infix operator <*> { precedence 256 }"),
        Err(ParseError::PrecedenceOutOfRange { .. })
    ));
    let decl = parse_declaration("infix operator <*> { precedence 255 associativity left }");
    let Ok(Declaration::Operator(OperatorDeclaration::Infix {
        precedence,
        associativity,
        ..
    })) = decl
    else {
        panic!("expected infix operator declaration");
    };
    assert_eq!(precedence, Some(255));
    assert_eq!(associativity, Some(Associativity::Left));
}
