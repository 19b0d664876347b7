//! End-to-end checks: literal inputs against their expected top-level shape.

use swiftparse_ast::*;
use swiftparse_parser::{parse_declaration, parse_expression, parse_module};

fn only_statement(module: Module) -> Statement {
    assert_eq!(module.statements.len(), 1, "expected a single statement");
    module.statements.into_iter().next().unwrap()
}

#[test]
fn constant_with_annotation_and_initializer() {
    let decl = parse_declaration("let x: Int = 1").unwrap();
    let Declaration::Constant(constant) = decl else {
        panic!("expected constant declaration");
    };
    assert_eq!(constant.initializers.len(), 1);
    let init = &constant.initializers[0];
    let Pattern::Identifier { name, annotation } = &init.pattern else {
        panic!("expected identifier pattern");
    };
    assert_eq!(name, "x");
    let annotation = annotation.as_ref().unwrap();
    let Type::Identifier(ty) = &annotation.ty else {
        panic!("expected type identifier");
    };
    assert_eq!(ty.components[0].name, "Int");
    let value = init.initializer.as_ref().unwrap();
    let PrefixExpression::Operated { postfix, .. } = &value.prefix else {
        panic!("expected operated prefix");
    };
    assert_eq!(
        *postfix,
        PostfixExpression::Primary(PrimaryExpression::Literal(LiteralExpression::Literal(
            Literal::Numeric("1".into())
        )))
    );
}

#[test]
fn generic_throwing_function_with_default_argument() {
    let decl = parse_declaration("func f<T>(a: T, b: Int = 2) throws -> T { return a }").unwrap();
    let Declaration::Function(func) = decl else {
        panic!("expected function declaration");
    };
    assert_eq!(func.name, FunctionName::Identifier("f".into()));

    let generics = func.generic_params.as_ref().unwrap();
    assert_eq!(generics.params.len(), 1);
    assert!(matches!(&generics.params[0], GenericParameter::Plain(name) if name == "T"));

    assert_eq!(func.parameter_clauses.len(), 1);
    let clause = &func.parameter_clauses[0];
    assert_eq!(clause.len(), 2);
    let Parameter::Named(second) = &clause[1] else {
        panic!("expected named parameter");
    };
    assert_eq!(second.local_name, "b");
    assert!(second.default_value.is_some());

    assert_eq!(func.throws, ThrowsKind::Throws);
    assert!(func.result.is_some());

    let body = func.body.as_ref().unwrap();
    assert_eq!(body.len(), 1);
    let Statement::Return(Some(value)) = &body[0] else {
        panic!("expected return statement");
    };
    let PrefixExpression::Operated { postfix, .. } = &value.prefix else {
        panic!("expected operated prefix");
    };
    assert!(matches!(
        postfix,
        PostfixExpression::Primary(PrimaryExpression::Identifier { name, .. }) if name == "a"
    ));
}

#[test]
fn if_with_optional_bindings_where_and_else_if() {
    let module = parse_module("if let x = y, z = w where x > 0 { } else if true { }").unwrap();
    let Statement::If(if_stmt) = only_statement(module) else {
        panic!("expected if statement");
    };

    assert!(if_stmt.condition.expression.is_none());
    assert_eq!(if_stmt.condition.conditions.len(), 1);
    let Condition::OptionalBinding {
        bindings,
        where_clause,
    } = &if_stmt.condition.conditions[0]
    else {
        panic!("expected optional binding condition");
    };
    assert_eq!(bindings.len(), 2);
    assert_eq!(bindings[0].kind, Some(BindingKind::Let));
    assert!(matches!(&bindings[0].pattern, Pattern::Identifier { name, .. } if name == "x"));
    assert_eq!(bindings[1].kind, None);
    assert!(matches!(&bindings[1].pattern, Pattern::Identifier { name, .. } if name == "z"));
    let where_clause = where_clause.as_ref().unwrap();
    assert!(matches!(&where_clause.binaries[0], BinaryTail::Operator { op, .. } if op == ">"));

    assert!(if_stmt.body.is_empty());
    let Some(ElseBranch::If(inner)) = if_stmt.else_branch else {
        panic!("expected else-if branch");
    };
    let condition = inner.condition.expression.as_ref().unwrap();
    let PrefixExpression::Operated { postfix, .. } = &condition.prefix else {
        panic!("expected operated prefix");
    };
    assert_eq!(
        *postfix,
        PostfixExpression::Primary(PrimaryExpression::Literal(LiteralExpression::Literal(
            Literal::Boolean(true)
        )))
    );
}

#[test]
fn switch_with_multi_pattern_case_and_default() {
    let module = parse_module("switch p { case .a, .b where q: break; default: return 0 }").unwrap();
    let Statement::Switch(switch) = only_statement(module) else {
        panic!("expected switch statement");
    };
    assert_eq!(switch.cases.len(), 2);

    let SwitchCase::Case { items, statements } = &switch.cases[0] else {
        panic!("expected case clause");
    };
    assert_eq!(items.len(), 2);
    assert!(matches!(&items[0].pattern, Pattern::EnumCase { name, .. } if name == "a"));
    assert!(items[0].guard.is_none());
    assert!(matches!(&items[1].pattern, Pattern::EnumCase { name, .. } if name == "b"));
    assert!(items[1].guard.is_some());
    assert_eq!(statements.len(), 1);
    assert!(matches!(&statements[0], Statement::Break(None)));

    let SwitchCase::Default(statements) = &switch.cases[1] else {
        panic!("expected default clause");
    };
    assert_eq!(statements.len(), 1);
    assert!(matches!(&statements[0], Statement::Return(Some(_))));
}

#[test]
fn build_configuration_with_os_and_negation() {
    let module = parse_module("#if os(OSX) && !DEBUG\nlet x = 1\n#else\nlet x = 2\n#endif").unwrap();
    let Statement::BuildConfiguration(config) = only_statement(module) else {
        panic!("expected build configuration");
    };

    let BuildConfiguration::And(lhs, rhs) = &config.condition else {
        panic!("expected &&");
    };
    assert_eq!(**lhs, BuildConfiguration::Os("OSX".into()));
    let BuildConfiguration::Not(negated) = &**rhs else {
        panic!("expected !");
    };
    assert_eq!(**negated, BuildConfiguration::Identifier("DEBUG".into()));

    assert_eq!(config.statements.len(), 1);
    assert!(matches!(
        &config.statements[0],
        Statement::Declaration(Declaration::Constant(_))
    ));
    assert!(config.elseif_clauses.is_empty());
    let else_clause = config.else_clause.as_ref().unwrap();
    assert_eq!(else_clause.len(), 1);
    assert!(matches!(
        &else_clause[0],
        Statement::Declaration(Declaration::Constant(_))
    ));
}

#[test]
fn closure_with_capture_list_parameters_and_result() {
    let expr = parse_expression("{ [weak self] (x: Int) -> Int in x + 1 }").unwrap();
    let PrefixExpression::Operated { postfix, .. } = &expr.prefix else {
        panic!("expected operated prefix");
    };
    let PostfixExpression::Primary(PrimaryExpression::Closure(closure)) = postfix else {
        panic!("expected closure");
    };

    let signature = closure.signature.as_ref().unwrap();
    let captures = signature.capture_list.as_ref().unwrap();
    assert_eq!(captures.len(), 1);
    assert_eq!(captures[0].specifier, Some(CaptureSpecifier::Weak));
    let PrefixExpression::Operated { postfix, .. } = &captures[0].expression.prefix else {
        panic!("expected operated prefix");
    };
    assert_eq!(
        *postfix,
        PostfixExpression::Primary(PrimaryExpression::SelfExpression(SelfExpression::Plain))
    );

    let Some(ClosureParameters::Clause(params)) = &signature.parameters else {
        panic!("expected parameter clause");
    };
    assert_eq!(params.len(), 1);
    let Parameter::Named(param) = &params[0] else {
        panic!("expected named parameter");
    };
    assert_eq!(param.local_name, "x");

    let Some(Type::Identifier(result)) = &signature.result else {
        panic!("expected result type");
    };
    assert_eq!(result.components[0].name, "Int");

    assert_eq!(closure.statements.len(), 1);
    let Statement::Expression(body) = &closure.statements[0] else {
        panic!("expected expression statement");
    };
    assert_eq!(body.binaries.len(), 1);
    assert!(matches!(&body.binaries[0], BinaryTail::Operator { op, .. } if op == "+"));
}
