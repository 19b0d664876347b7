//! Declaration coverage: the var shapes, enums, nominal types, protocols,
//! initializers, subscripts, operators, imports and type aliases.

use swiftparse_ast::*;
use swiftparse_parser::parse_declaration;

fn variable_body(src: &str) -> VariableBody {
    match parse_declaration(src).unwrap() {
        Declaration::Variable(v) => v.body,
        other => panic!("expected variable declaration, got {other:?}"),
    }
}

#[test]
fn var_pattern_initializer_list() {
    let VariableBody::PatternInitializers(inits) = variable_body("var a = 1, b: Int") else {
        panic!("expected pattern initializers");
    };
    assert_eq!(inits.len(), 2);
    assert!(inits[0].initializer.is_some());
    assert!(inits[1].initializer.is_none());
}

#[test]
fn var_read_only_computed() {
    let VariableBody::Computed { name, block, .. } = variable_body("var x: Int { return y }")
    else {
        panic!("expected computed variable");
    };
    assert_eq!(name, "x");
    assert_eq!(block.len(), 1);
}

#[test]
fn var_getter_setter() {
    let body = variable_body("var x: Int { get { return s } set(v) { s = v } }");
    let VariableBody::GetterSetter { block, .. } = body else {
        panic!("expected getter/setter variable");
    };
    assert_eq!(block.setter.as_ref().unwrap().name.as_deref(), Some("v"));
}

#[test]
fn var_getter_setter_keyword_block() {
    let VariableBody::GetterSetterKeyword { block, .. } = variable_body("var x: Int { get set }")
    else {
        panic!("expected keyword block variable");
    };
    assert!(block.has_setter());

    let VariableBody::GetterSetterKeyword { block, .. } = variable_body("var x: Int { get }")
    else {
        panic!("expected keyword block variable");
    };
    assert!(!block.has_setter());
}

#[test]
fn var_stored_with_observers() {
    let body = variable_body("var x = 0 { willSet(next) { log(next) } didSet { sync() } }");
    let VariableBody::Observed {
        initializer, block, ..
    } = body
    else {
        panic!("expected observed variable");
    };
    assert!(initializer.is_some());
    assert_eq!(block.will_set.as_ref().unwrap().name.as_deref(), Some("next"));
    assert!(block.did_set.is_some());
}

#[test]
fn union_enum_with_payloads_and_indirect() {
    let decl = parse_declaration("indirect enum Tree { case leaf(Int) case node(Tree, Tree) }")
        .unwrap();
    let Declaration::Enum(EnumDeclaration::Union(union)) = decl else {
        panic!("expected union enum");
    };
    assert!(union.indirect);
    assert_eq!(union.members.len(), 2);
    let UnionEnumMember::Case(clause) = &union.members[0] else {
        panic!("expected case clause");
    };
    let payload = clause.cases[0].payload.as_ref().unwrap();
    assert_eq!(payload.elements.len(), 1);
}

#[test]
fn raw_value_enum_with_assignments() {
    let decl = parse_declaration("enum Planet: Int { case mercury = 1, venus, earth }").unwrap();
    let Declaration::Enum(EnumDeclaration::RawValue(raw)) = decl else {
        panic!("expected raw-value enum");
    };
    assert_eq!(raw.inheritance.types[0].components[0].name, "Int");
    let RawValueEnumMember::Case(clause) = &raw.members[0] else {
        panic!("expected case clause");
    };
    assert_eq!(clause.cases.len(), 3);
    assert_eq!(
        clause.cases[0].raw_value,
        Some(Literal::Numeric("1".into()))
    );
    assert_eq!(clause.cases[1].raw_value, None);
}

#[test]
fn struct_with_members_and_generics() {
    let decl = parse_declaration(
        "public struct Stack<Element> { var items: [Element] { return storage } func push(item: Element) { } }",
    )
    .unwrap();
    let Declaration::Struct(s) = decl else {
        panic!("expected struct");
    };
    assert!(matches!(
        s.modifiers[0],
        DeclarationModifier::Access(AccessLevelModifier {
            level: AccessLevel::Public,
            setter_only: false
        })
    ));
    assert!(s.generic_params.is_some());
    assert_eq!(s.body.len(), 2);
}

#[test]
fn class_with_inheritance_initializer_and_deinitializer() {
    let decl = parse_declaration(
        "class Connection: Base, Closable { init?(host: String) throws { } deinit { close() } }",
    )
    .unwrap();
    let Declaration::Class(class) = decl else {
        panic!("expected class");
    };
    let inheritance = class.inheritance.as_ref().unwrap();
    assert_eq!(inheritance.types.len(), 2);
    assert_eq!(class.body.len(), 2);
    let Declaration::Initializer(init) = &class.body[0] else {
        panic!("expected initializer");
    };
    assert_eq!(init.kind, InitializerKind::Failable);
    assert_eq!(init.throws, ThrowsKind::Throws);
    assert!(matches!(&class.body[1], Declaration::Deinitializer(_)));
}

#[test]
fn class_method_modifier_is_not_a_class_declaration() {
    let decl = parse_declaration("class Counter { class func shared() -> Counter { } }").unwrap();
    let Declaration::Class(class) = decl else {
        panic!("expected class");
    };
    let Declaration::Function(func) = &class.body[0] else {
        panic!("expected function member");
    };
    assert_eq!(func.modifiers, vec![DeclarationModifier::Class]);
}

#[test]
fn protocol_members() {
    let decl = parse_declaration(
        "protocol Collection: Sequence { var count: Int { get } func index(of: Int) -> Int init(capacity: Int) subscript(i: Int) -> Int { get set } typealias Element: Equatable }",
    )
    .unwrap();
    let Declaration::Protocol(protocol) = decl else {
        panic!("expected protocol");
    };
    assert_eq!(protocol.members.len(), 5);
    assert!(matches!(&protocol.members[0], ProtocolMember::Property(p) if !p.block.has_setter()));
    let ProtocolMember::Method(method) = &protocol.members[1] else {
        panic!("expected method requirement");
    };
    assert!(method.body.is_none());
    let ProtocolMember::Initializer(init) = &protocol.members[2] else {
        panic!("expected initializer requirement");
    };
    assert!(init.body.is_none());
    assert!(matches!(&protocol.members[3], ProtocolMember::Subscript(s) if s.block.has_setter()));
    let ProtocolMember::AssociatedType(assoc) = &protocol.members[4] else {
        panic!("expected associated type");
    };
    assert_eq!(assoc.name, "Element");
    assert!(assoc.inheritance.is_some());
}

#[test]
fn curried_function_and_operator_function() {
    let decl = parse_declaration("func adder(x: Int)(y: Int) -> Int { return x + y }").unwrap();
    let Declaration::Function(func) = decl else {
        panic!("expected function");
    };
    assert_eq!(func.parameter_clauses.len(), 2);

    let decl = parse_declaration("func == (lhs: Point, rhs: Point) -> Bool { return same }").unwrap();
    let Declaration::Function(func) = decl else {
        panic!("expected function");
    };
    assert_eq!(func.name, FunctionName::Operator("==".into()));
}

#[test]
fn variadic_and_inout_parameters() {
    let decl = parse_declaration("func sum(xs: Int...) -> Int { }").unwrap();
    let Declaration::Function(func) = decl else {
        panic!("expected function");
    };
    let Parameter::Named(param) = &func.parameter_clauses[0][0] else {
        panic!("expected named parameter");
    };
    assert!(param.variadic);

    let decl = parse_declaration("func swap(inout a: Int, inout b: Int) { }").unwrap();
    let Declaration::Function(func) = decl else {
        panic!("expected function");
    };
    let Parameter::Named(param) = &func.parameter_clauses[0][0] else {
        panic!("expected named parameter");
    };
    assert_eq!(param.modifier, Some(ParameterModifier::InOut));
}

#[test]
fn extension_with_conformance() {
    let decl = parse_declaration("extension Array: Container { func describe() { } }").unwrap();
    let Declaration::Extension(ext) = decl else {
        panic!("expected extension");
    };
    assert_eq!(ext.extended.components[0].name, "Array");
    assert!(ext.inheritance.is_some());
    assert_eq!(ext.body.len(), 1);
}

#[test]
fn subscript_declaration_bodies() {
    let decl =
        parse_declaration("subscript(index: Int) -> Element { return storage[index] }").unwrap();
    let Declaration::Subscript(sub) = decl else {
        panic!("expected subscript");
    };
    assert!(matches!(sub.body, SubscriptBody::CodeBlock(_)));

    let decl = parse_declaration(
        "subscript(index: Int) -> Element { get { return storage[index] } set { storage[index] = newValue } }",
    )
    .unwrap();
    let Declaration::Subscript(sub) = decl else {
        panic!("expected subscript");
    };
    assert!(matches!(sub.body, SubscriptBody::GetterSetter(_)));
}

#[test]
fn operator_declarations() {
    assert!(matches!(
        parse_declaration("prefix operator +++ { }").unwrap(),
        Declaration::Operator(OperatorDeclaration::Prefix { .. })
    ));
    assert!(matches!(
        parse_declaration("postfix operator --- { }").unwrap(),
        Declaration::Operator(OperatorDeclaration::Postfix { .. })
    ));
    let Declaration::Operator(OperatorDeclaration::Infix {
        name,
        precedence,
        associativity,
    }) = parse_declaration("infix operator |> { precedence 95 associativity right }").unwrap()
    else {
        panic!("expected infix operator");
    };
    assert_eq!(name, "|>");
    assert_eq!(precedence, Some(95));
    assert_eq!(associativity, Some(Associativity::Right));
}

#[test]
fn backtick_quoted_operator_name() {
    let Declaration::Operator(OperatorDeclaration::Prefix { name }) =
        parse_declaration("prefix operator `<*>` { }").unwrap()
    else {
        panic!("expected prefix operator");
    };
    assert_eq!(name, "<*>");
}

#[test]
fn import_forms() {
    let Declaration::Import(import) = parse_declaration("import Foundation").unwrap() else {
        panic!("expected import");
    };
    assert_eq!(import.kind, None);
    assert_eq!(import.path, vec![SmolStr::new("Foundation")]);

    let Declaration::Import(import) = parse_declaration("import func Darwin.sqrt").unwrap()
    else {
        panic!("expected import");
    };
    assert_eq!(import.kind.as_deref(), Some("func"));
    assert_eq!(import.path.len(), 2);
}

#[test]
fn typealias_declaration() {
    let Declaration::TypeAlias(alias) =
        parse_declaration("typealias Handler = (Int, String) -> Bool").unwrap()
    else {
        panic!("expected typealias");
    };
    assert_eq!(alias.name, "Handler");
    assert!(matches!(alias.ty, Type::Function(_)));
}

#[test]
fn attributes_with_balanced_arguments() {
    let decl =
        parse_declaration("@available(iOS 9.0, *) @objc func ping() { }").unwrap();
    let Declaration::Function(func) = decl else {
        panic!("expected function");
    };
    assert_eq!(func.attributes.len(), 2);
    assert_eq!(func.attributes[0].name, "available");
    assert_eq!(func.attributes[0].argument.as_deref(), Some("iOS 9.0, *"));
    assert_eq!(func.attributes[1].argument, None);
}

#[test]
fn generic_requirements() {
    let decl = parse_declaration(
        "func merge<S: Sequence, T where T: Comparable, S.Element == T>(xs: S) -> T { }",
    )
    .unwrap();
    let Declaration::Function(func) = decl else {
        panic!("expected function");
    };
    let generics = func.generic_params.unwrap();
    assert_eq!(generics.params.len(), 2);
    assert!(matches!(&generics.params[0], GenericParameter::Conformance(name, _) if name == "S"));
    assert_eq!(generics.requirements.len(), 2);
    assert!(matches!(
        &generics.requirements[1],
        GenericRequirement::SameType(subject, _) if subject.components.len() == 2
    ));
}
