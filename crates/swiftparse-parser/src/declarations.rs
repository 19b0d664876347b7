//! Declaration grammar.
//!
//! Every declaration form parses its own attributes and modifiers under a
//! speculative attempt, so a shared prefix (`@a public class …` versus
//! `@a public class func …`) never poisons the alternation. The `var`
//! classification and the union-versus-raw-value enum split follow the
//! ordered attempts described in the grammar summary.

use crate::combinators::choice;
use crate::{ParseError, ParseResult, Parser};
use swiftparse_ast::{
    AccessLevel, AccessLevelModifier, AssociatedType, Attribute, ClassDeclaration,
    ConstantDeclaration, Declaration, DeclarationModifier, DeinitializerDeclaration,
    EnumDeclaration, ExtensionDeclaration, FunctionDeclaration, FunctionName, FunctionResult,
    GenericParameter, GenericParameterClause, GenericRequirement, GetterClause,
    GetterSetterBlock, GetterSetterKeywordBlock, ImportDeclaration, InitializerDeclaration,
    InitializerKind, NamedParameter, ObservedBlock, ObserverClause, OperatorDeclaration,
    Parameter, ParameterClause, ParameterModifier, PatternInitializer, ProtocolDeclaration,
    ProtocolMember, ProtocolProperty, ProtocolSubscript, RawValueCase, RawValueCaseClause,
    RawValueEnum, RawValueEnumMember, SetterClause, SmolStr, StructDeclaration,
    SubscriptBody, SubscriptDeclaration, TypeAliasDeclaration, TypeInheritanceClause,
    UnionCase, UnionCaseClause, UnionEnum, UnionEnumMember, VariableBody, VariableDeclaration,
    Associativity,
};

impl<'src> Parser<'src> {
    pub(crate) fn parse_declaration(&mut self) -> ParseResult<Declaration> {
        choice!(
            self,
            "declaration",
            |p: &mut Self| p.attempt(Self::parse_import_declaration),
            |p: &mut Self| p.attempt(Self::parse_constant_declaration),
            |p: &mut Self| p.attempt(|p| p.parse_variable_declaration().map(Declaration::Variable)),
            |p: &mut Self| p.attempt(Self::parse_typealias_declaration),
            |p: &mut Self| p.attempt(|p| p.parse_function(true).map(Declaration::Function)),
            |p: &mut Self| p.attempt(Self::parse_enum_declaration),
            |p: &mut Self| p.attempt(Self::parse_struct_declaration),
            |p: &mut Self| p.attempt(Self::parse_class_declaration),
            |p: &mut Self| p.attempt(Self::parse_protocol_declaration),
            |p: &mut Self| p.attempt(|p| p.parse_initializer(true).map(Declaration::Initializer)),
            |p: &mut Self| p.attempt(Self::parse_deinitializer_declaration),
            |p: &mut Self| p.attempt(Self::parse_extension_declaration),
            |p: &mut Self| p.attempt(Self::parse_subscript_declaration),
            |p: &mut Self| p.attempt(Self::parse_operator_declaration),
        )
    }

    // ========================================================================
    // Attributes and modifiers
    // ========================================================================

    pub(crate) fn parse_attributes(&mut self) -> ParseResult<Vec<Attribute>> {
        self.many(|p| {
            p.punct("@")?;
            let name = p.identifier()?;
            // The argument clause attaches without intervening whitespace.
            let argument = if p.cursor.peek() == Some('(') {
                match p.cursor.scan_balanced_tokens() {
                    Ok(text) => Some(text),
                    Err(e) => return Err(p.record(e.into())),
                }
            } else {
                None
            };
            Ok(Attribute { name, argument })
        })
    }

    pub(crate) fn parse_declaration_modifiers(&mut self) -> ParseResult<Vec<DeclarationModifier>> {
        self.many(|p| p.attempt(Self::parse_declaration_modifier))
    }

    fn parse_declaration_modifier(&mut self) -> ParseResult<DeclarationModifier> {
        for (kw, level) in [
            ("internal", AccessLevel::Internal),
            ("private", AccessLevel::Private),
            ("public", AccessLevel::Public),
        ] {
            if self.keyword(kw).is_ok() {
                let setter_only = self
                    .attempt(|p| {
                        p.punct("(")?;
                        p.keyword("set")?;
                        p.punct(")")
                    })
                    .is_ok();
                return Ok(DeclarationModifier::Access(AccessLevelModifier {
                    level,
                    setter_only,
                }));
            }
        }
        // `class` is a modifier only when it does not introduce a class
        // declaration, i.e. when no type name follows.
        if self
            .attempt(|p| {
                p.keyword("class")?;
                p.not_followed_by(|p| p.identifier(), "modifier")
            })
            .is_ok()
        {
            return Ok(DeclarationModifier::Class);
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
                return Ok(DeclarationModifier::UnownedSafe);
            }
            if self
                .attempt(|p| {
                    p.punct("(")?;
                    p.keyword("unsafe")?;
                    p.punct(")")
                })
                .is_ok()
            {
                return Ok(DeclarationModifier::UnownedUnsafe);
            }
            return Ok(DeclarationModifier::Unowned);
        }
        for (kw, modifier) in [
            ("convenience", DeclarationModifier::Convenience),
            ("dynamic", DeclarationModifier::Dynamic),
            ("final", DeclarationModifier::Final),
            ("infix", DeclarationModifier::Infix),
            ("lazy", DeclarationModifier::Lazy),
            ("mutating", DeclarationModifier::Mutating),
            ("nonmutating", DeclarationModifier::Nonmutating),
            ("optional", DeclarationModifier::Optional),
            ("override", DeclarationModifier::Override),
            ("postfix", DeclarationModifier::Postfix),
            ("prefix", DeclarationModifier::Prefix),
            ("required", DeclarationModifier::Required),
            ("static", DeclarationModifier::Static),
            ("weak", DeclarationModifier::Weak),
        ] {
            if self.keyword(kw).is_ok() {
                return Ok(modifier);
            }
        }
        self.fail("declaration modifier")
    }

    // ========================================================================
    // Imports, constants, variables
    // ========================================================================

    fn parse_import_declaration(&mut self) -> ParseResult<Declaration> {
        let attributes = self.parse_attributes()?;
        self.keyword("import")?;
        let mut kind = None;
        for kw in ["typealias", "struct", "class", "enum", "protocol", "var", "func"] {
            if self.keyword(kw).is_ok() {
                kind = Some(SmolStr::new(kw));
                break;
            }
        }
        let path = self.sep_by1(".", |p| p.identifier())?;
        Ok(Declaration::Import(ImportDeclaration {
            attributes,
            kind,
            path,
        }))
    }

    fn parse_constant_declaration(&mut self) -> ParseResult<Declaration> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_declaration_modifiers()?;
        self.keyword("let")?;
        let initializers = self.sep_by1(",", Self::parse_pattern_initializer)?;
        Ok(Declaration::Constant(ConstantDeclaration {
            attributes,
            modifiers,
            initializers,
        }))
    }

    pub(crate) fn parse_pattern_initializer(&mut self) -> ParseResult<PatternInitializer> {
        let pattern = self.parse_pattern()?;
        let initializer = self.opt(|p| {
            p.equals_sign()?;
            p.parse_expression()
        });
        Ok(PatternInitializer {
            pattern,
            initializer,
        })
    }

    pub(crate) fn parse_variable_declaration(&mut self) -> ParseResult<VariableDeclaration> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_declaration_modifiers()?;
        self.keyword("var")?;
        let body = choice!(
            self,
            "variable declaration",
            |p: &mut Self| p.attempt(Self::parse_variable_pattern_initializers),
            |p: &mut Self| p.attempt(Self::parse_variable_block_form),
            |p: &mut Self| p.attempt(Self::parse_variable_stored_observed),
        )?;
        Ok(VariableDeclaration {
            attributes,
            modifiers,
            body,
        })
    }

    /// `var a = 1, b: Int` — only when no accessor brace follows.
    fn parse_variable_pattern_initializers(&mut self) -> ParseResult<VariableBody> {
        let initializers = self.sep_by1(",", Self::parse_pattern_initializer)?;
        self.not_followed_by(|p| p.punct("{"), "pattern initializer list")?;
        Ok(VariableBody::PatternInitializers(initializers))
    }

    /// `var name: Type { … }` — computed, accessor pair, or observers.
    fn parse_variable_block_form(&mut self) -> ParseResult<VariableBody> {
        let name = self.identifier()?;
        let annotation = self.parse_type_annotation()?;
        if let Ok(block) = self.attempt(Self::parse_getter_setter_block) {
            return Ok(VariableBody::GetterSetter {
                name,
                annotation,
                block,
            });
        }
        if let Ok(block) = self.attempt(Self::parse_getter_setter_keyword_block) {
            return Ok(VariableBody::GetterSetterKeyword {
                name,
                annotation,
                block,
            });
        }
        if let Ok(block) = self.attempt(Self::parse_observed_block) {
            return Ok(VariableBody::Observed {
                name,
                annotation: Some(annotation),
                initializer: None,
                block,
            });
        }
        let block = self.parse_code_block()?;
        Ok(VariableBody::Computed {
            name,
            annotation,
            block,
        })
    }

    /// `var name(: Type)? (= init)? { willSet/didSet }`.
    fn parse_variable_stored_observed(&mut self) -> ParseResult<VariableBody> {
        let name = self.identifier()?;
        let annotation = self.opt(Self::parse_type_annotation);
        let initializer = self.opt(|p| {
            p.equals_sign()?;
            p.parse_expression()
        });
        let block = self.parse_observed_block()?;
        Ok(VariableBody::Observed {
            name,
            annotation,
            initializer,
            block,
        })
    }

    pub(crate) fn parse_getter_setter_block(&mut self) -> ParseResult<GetterSetterBlock> {
        self.punct("{")?;
        if let Ok(getter) = self.attempt(Self::parse_getter_clause) {
            let setter = self.opt(Self::parse_setter_clause);
            self.punct("}")?;
            return Ok(GetterSetterBlock { getter, setter });
        }
        let setter = self.parse_setter_clause()?;
        let getter = self.parse_getter_clause()?;
        self.punct("}")?;
        Ok(GetterSetterBlock {
            getter,
            setter: Some(setter),
        })
    }

    fn parse_getter_clause(&mut self) -> ParseResult<GetterClause> {
        let attributes = self.parse_attributes()?;
        self.keyword("get")?;
        let body = self.parse_code_block()?;
        Ok(GetterClause { attributes, body })
    }

    fn parse_setter_clause(&mut self) -> ParseResult<SetterClause> {
        let attributes = self.parse_attributes()?;
        self.keyword("set")?;
        let name = self.opt(|p| {
            p.punct("(")?;
            let name = p.identifier()?;
            p.punct(")")?;
            Ok(name)
        });
        let body = self.parse_code_block()?;
        Ok(SetterClause {
            attributes,
            name,
            body,
        })
    }

    /// `{ get }`, `{ get set }` or `{ set get }` — accessor requirements
    /// without bodies.
    pub(crate) fn parse_getter_setter_keyword_block(
        &mut self,
    ) -> ParseResult<GetterSetterKeywordBlock> {
        self.punct("{")?;
        let block = if let Ok(getter_attributes) = self.attempt(|p| {
            let attrs = p.parse_attributes()?;
            p.keyword("get")?;
            Ok(attrs)
        }) {
            let setter_attributes = self.opt(|p| {
                let attrs = p.parse_attributes()?;
                p.keyword("set")?;
                Ok(attrs)
            });
            GetterSetterKeywordBlock {
                getter_attributes,
                setter_attributes,
            }
        } else {
            let setter_attributes = self.parse_attributes()?;
            self.keyword("set")?;
            let getter_attributes = self.parse_attributes()?;
            self.keyword("get")?;
            GetterSetterKeywordBlock {
                getter_attributes,
                setter_attributes: Some(setter_attributes),
            }
        };
        self.punct("}")?;
        Ok(block)
    }

    fn parse_observed_block(&mut self) -> ParseResult<ObservedBlock> {
        self.punct("{")?;
        let (will_set, did_set) =
            if let Ok(will) = self.attempt(|p| p.parse_observer_clause("willSet")) {
                let did = self.opt(|p| p.parse_observer_clause("didSet"));
                (Some(will), did)
            } else {
                let did = self.parse_observer_clause("didSet")?;
                let will = self.opt(|p| p.parse_observer_clause("willSet"));
                (will, Some(did))
            };
        self.punct("}")?;
        Ok(ObservedBlock { will_set, did_set })
    }

    fn parse_observer_clause(&mut self, kw: &str) -> ParseResult<ObserverClause> {
        let attributes = self.parse_attributes()?;
        self.keyword(kw)?;
        let name = self.opt(|p| {
            p.punct("(")?;
            let name = p.identifier()?;
            p.punct(")")?;
            Ok(name)
        });
        let body = self.parse_code_block()?;
        Ok(ObserverClause {
            attributes,
            name,
            body,
        })
    }

    // ========================================================================
    // Type aliases and functions
    // ========================================================================

    fn parse_typealias_declaration(&mut self) -> ParseResult<Declaration> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_declaration_modifiers()?;
        self.keyword("typealias")?;
        let name = self.identifier()?;
        self.equals_sign()?;
        let ty = self.parse_type()?;
        Ok(Declaration::TypeAlias(TypeAliasDeclaration {
            attributes,
            modifiers,
            name,
            ty,
        }))
    }

    pub(crate) fn parse_function(&mut self, allow_body: bool) -> ParseResult<FunctionDeclaration> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_declaration_modifiers()?;
        self.keyword("func")?;
        let name = if let Ok(id) = self.attempt(|p| p.identifier()) {
            FunctionName::Identifier(id)
        } else {
            FunctionName::Operator(self.any_operator()?)
        };
        let generic_params = self.opt(Self::parse_generic_parameter_clause);
        let parameter_clauses = self.many1(|p| p.attempt(Self::parse_parameter_clause))?;
        let throws = self.parse_throws_kind();
        let result = self.opt(Self::parse_function_result);
        let body = if allow_body {
            self.opt(Self::parse_code_block)
        } else {
            None
        };
        Ok(FunctionDeclaration {
            attributes,
            modifiers,
            name,
            generic_params,
            parameter_clauses,
            throws,
            result,
            body,
        })
    }

    pub(crate) fn parse_function_result(&mut self) -> ParseResult<FunctionResult> {
        self.punct("->")?;
        let attributes = self.parse_attributes()?;
        let ty = self.parse_type()?;
        Ok(FunctionResult { attributes, ty })
    }

    pub(crate) fn parse_parameter_clause(&mut self) -> ParseResult<ParameterClause> {
        self.punct("(")?;
        let params = self.sep_by(",", Self::parse_parameter)?;
        self.punct(")")?;
        Ok(params)
    }

    fn parse_parameter(&mut self) -> ParseResult<Parameter> {
        choice!(
            self,
            "parameter",
            |p: &mut Self| p.attempt(Self::parse_named_parameter),
            |p: &mut Self| {
                let attributes = p.parse_attributes()?;
                let ty = p.parse_type()?;
                Ok(Parameter::TypeOnly { attributes, ty })
            },
        )
    }

    fn parse_named_parameter(&mut self) -> ParseResult<Parameter> {
        let modifier = if self.keyword("inout").is_ok() {
            Some(ParameterModifier::InOut)
        } else if self.keyword("let").is_ok() {
            Some(ParameterModifier::Let)
        } else if self.keyword("var").is_ok() {
            Some(ParameterModifier::Var)
        } else {
            None
        };
        let first = self.parse_parameter_name()?;
        let second = self.opt(Self::parse_parameter_name);
        let (external_name, local_name) = match second {
            Some(local) => (Some(first), local),
            None => (None, first),
        };
        let annotation = self.parse_type_annotation()?;
        let default_value = self.opt(|p| {
            p.equals_sign()?;
            p.parse_expression()
        });
        let variadic = self.punct("...").is_ok();
        Ok(Parameter::Named(NamedParameter {
            modifier,
            external_name,
            local_name,
            annotation,
            default_value,
            variadic,
        }))
    }

    /// An external or local parameter name; `_` is a valid name.
    fn parse_parameter_name(&mut self) -> ParseResult<SmolStr> {
        if self.keyword("_").is_ok() {
            Ok(SmolStr::new("_"))
        } else {
            self.identifier()
        }
    }

    // ========================================================================
    // Generics
    // ========================================================================

    pub(crate) fn parse_generic_parameter_clause(
        &mut self,
    ) -> ParseResult<GenericParameterClause> {
        self.punct("<")?;
        let params = self.sep_by1(",", Self::parse_generic_parameter)?;
        let requirements = self
            .opt(|p| {
                p.keyword("where")?;
                p.sep_by1(",", Self::parse_generic_requirement)
            })
            .unwrap_or_default();
        self.punct(">")?;
        Ok(GenericParameterClause {
            params,
            requirements,
        })
    }

    fn parse_generic_parameter(&mut self) -> ParseResult<GenericParameter> {
        let name = self.identifier()?;
        if self.punct(":").is_ok() {
            if self.peek_keyword("protocol") {
                let composition = self.parse_type()?;
                return Ok(GenericParameter::Composition(name, composition));
            }
            let constraint = self.parse_type_identifier()?;
            return Ok(GenericParameter::Conformance(name, constraint));
        }
        Ok(GenericParameter::Plain(name))
    }

    fn parse_generic_requirement(&mut self) -> ParseResult<GenericRequirement> {
        let subject = self.parse_type_identifier()?;
        if self.punct(":").is_ok() {
            let constraint = self.parse_type()?;
            return Ok(GenericRequirement::Conformance(subject, constraint));
        }
        self.punct("==")?;
        let ty = self.parse_type()?;
        Ok(GenericRequirement::SameType(subject, ty))
    }

    // ========================================================================
    // Enums
    // ========================================================================

    fn parse_enum_declaration(&mut self) -> ParseResult<Declaration> {
        let decl = choice!(
            self,
            "enum declaration",
            |p: &mut Self| p.attempt(|p| p.parse_union_enum().map(EnumDeclaration::Union)),
            |p: &mut Self| p.attempt(|p| p.parse_raw_value_enum().map(EnumDeclaration::RawValue)),
        )?;
        Ok(Declaration::Enum(decl))
    }

    fn parse_union_enum(&mut self) -> ParseResult<UnionEnum> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_declaration_modifiers()?;
        let indirect = self.keyword("indirect").is_ok();
        self.keyword("enum")?;
        let name = self.identifier()?;
        let generic_params = self.opt(Self::parse_generic_parameter_clause);
        let inheritance = self.opt(Self::parse_type_inheritance_clause);
        self.punct("{")?;
        let members = self.many(Self::parse_union_enum_member)?;
        self.punct("}")?;
        Ok(UnionEnum {
            attributes,
            modifiers,
            indirect,
            name,
            generic_params,
            inheritance,
            members,
        })
    }

    fn parse_union_enum_member(&mut self) -> ParseResult<UnionEnumMember> {
        choice!(
            self,
            "enum member",
            |p: &mut Self| p.attempt(Self::parse_union_case_clause),
            |p: &mut Self| p
                .parse_declaration()
                .map(|d| UnionEnumMember::Declaration(Box::new(d))),
        )
    }

    fn parse_union_case_clause(&mut self) -> ParseResult<UnionEnumMember> {
        let attributes = self.parse_attributes()?;
        let indirect = self.keyword("indirect").is_ok();
        self.keyword("case")?;
        let cases = self.sep_by1(",", |p| {
            let name = p.identifier()?;
            let payload = p.opt(Self::parse_tuple_type);
            Ok(UnionCase { name, payload })
        })?;
        Ok(UnionEnumMember::Case(UnionCaseClause {
            attributes,
            indirect,
            cases,
        }))
    }

    fn parse_raw_value_enum(&mut self) -> ParseResult<RawValueEnum> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_declaration_modifiers()?;
        self.keyword("enum")?;
        let name = self.identifier()?;
        let generic_params = self.opt(Self::parse_generic_parameter_clause);
        let inheritance = self.parse_type_inheritance_clause()?;
        self.punct("{")?;
        let members = self.many(Self::parse_raw_value_enum_member)?;
        self.punct("}")?;
        Ok(RawValueEnum {
            attributes,
            modifiers,
            name,
            generic_params,
            inheritance,
            members,
        })
    }

    fn parse_raw_value_enum_member(&mut self) -> ParseResult<RawValueEnumMember> {
        choice!(
            self,
            "enum member",
            |p: &mut Self| p.attempt(Self::parse_raw_value_case_clause),
            |p: &mut Self| p
                .parse_declaration()
                .map(|d| RawValueEnumMember::Declaration(Box::new(d))),
        )
    }

    fn parse_raw_value_case_clause(&mut self) -> ParseResult<RawValueEnumMember> {
        let attributes = self.parse_attributes()?;
        self.keyword("case")?;
        let cases = self.sep_by1(",", |p| {
            let name = p.identifier()?;
            let raw_value = p.opt(|p| {
                p.equals_sign()?;
                p.parse_literal()
            });
            Ok(RawValueCase { name, raw_value })
        })?;
        Ok(RawValueEnumMember::Case(RawValueCaseClause {
            attributes,
            cases,
        }))
    }

    // ========================================================================
    // Structs, classes, protocols, extensions
    // ========================================================================

    fn parse_struct_declaration(&mut self) -> ParseResult<Declaration> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_declaration_modifiers()?;
        self.keyword("struct")?;
        let name = self.identifier()?;
        let generic_params = self.opt(Self::parse_generic_parameter_clause);
        let inheritance = self.opt(Self::parse_type_inheritance_clause);
        let body = self.parse_declaration_body()?;
        Ok(Declaration::Struct(StructDeclaration {
            attributes,
            modifiers,
            name,
            generic_params,
            inheritance,
            body,
        }))
    }

    fn parse_class_declaration(&mut self) -> ParseResult<Declaration> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_declaration_modifiers()?;
        self.keyword("class")?;
        let name = self.identifier()?;
        let generic_params = self.opt(Self::parse_generic_parameter_clause);
        let inheritance = self.opt(Self::parse_type_inheritance_clause);
        let body = self.parse_declaration_body()?;
        Ok(Declaration::Class(ClassDeclaration {
            attributes,
            modifiers,
            name,
            generic_params,
            inheritance,
            body,
        }))
    }

    fn parse_declaration_body(&mut self) -> ParseResult<Vec<Declaration>> {
        self.punct("{")?;
        let body = self.many(|p| {
            let decl = p.parse_declaration()?;
            let _ = p.punct(";");
            Ok(decl)
        })?;
        self.punct("}")?;
        Ok(body)
    }

    fn parse_protocol_declaration(&mut self) -> ParseResult<Declaration> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_declaration_modifiers()?;
        self.keyword("protocol")?;
        let name = self.identifier()?;
        let inheritance = self.opt(Self::parse_type_inheritance_clause);
        self.punct("{")?;
        let members = self.many(|p| {
            let member = p.parse_protocol_member()?;
            let _ = p.punct(";");
            Ok(member)
        })?;
        self.punct("}")?;
        Ok(Declaration::Protocol(ProtocolDeclaration {
            attributes,
            modifiers,
            name,
            inheritance,
            members,
        }))
    }

    fn parse_protocol_member(&mut self) -> ParseResult<ProtocolMember> {
        choice!(
            self,
            "protocol member",
            |p: &mut Self| p.attempt(Self::parse_protocol_property),
            |p: &mut Self| p.attempt(|p| p.parse_function(false).map(ProtocolMember::Method)),
            |p: &mut Self| p.attempt(|p| p
                .parse_initializer(false)
                .map(ProtocolMember::Initializer)),
            |p: &mut Self| p.attempt(Self::parse_protocol_subscript),
            |p: &mut Self| p.attempt(Self::parse_associated_type),
        )
    }

    fn parse_protocol_property(&mut self) -> ParseResult<ProtocolMember> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_declaration_modifiers()?;
        self.keyword("var")?;
        let name = self.identifier()?;
        let annotation = self.parse_type_annotation()?;
        let block = self.parse_getter_setter_keyword_block()?;
        Ok(ProtocolMember::Property(ProtocolProperty {
            attributes,
            modifiers,
            name,
            annotation,
            block,
        }))
    }

    fn parse_protocol_subscript(&mut self) -> ParseResult<ProtocolMember> {
        let (attributes, modifiers, parameters, result) = self.parse_subscript_head()?;
        let block = self.parse_getter_setter_keyword_block()?;
        Ok(ProtocolMember::Subscript(ProtocolSubscript {
            attributes,
            modifiers,
            parameters,
            result,
            block,
        }))
    }

    fn parse_associated_type(&mut self) -> ParseResult<ProtocolMember> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_declaration_modifiers()?;
        self.keyword("typealias")?;
        let name = self.identifier()?;
        let inheritance = self.opt(Self::parse_type_inheritance_clause);
        let default = self.opt(|p| {
            p.equals_sign()?;
            p.parse_type()
        });
        Ok(ProtocolMember::AssociatedType(AssociatedType {
            attributes,
            modifiers,
            name,
            inheritance,
            default,
        }))
    }

    // ========================================================================
    // Initializers, deinitializers, subscripts
    // ========================================================================

    pub(crate) fn parse_initializer(
        &mut self,
        require_body: bool,
    ) -> ParseResult<InitializerDeclaration> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_declaration_modifiers()?;
        self.keyword("init")?;
        let kind = if self.cursor.bump_if('?') {
            InitializerKind::Failable
        } else if self.cursor.bump_if('!') {
            InitializerKind::ImplicitlyUnwrappedFailable
        } else {
            InitializerKind::Plain
        };
        let generic_params = self.opt(Self::parse_generic_parameter_clause);
        let parameters = self.parse_parameter_clause()?;
        let throws = self.parse_throws_kind();
        let body = if require_body {
            Some(self.parse_code_block()?)
        } else {
            None
        };
        Ok(InitializerDeclaration {
            attributes,
            modifiers,
            kind,
            generic_params,
            parameters,
            throws,
            body,
        })
    }

    fn parse_deinitializer_declaration(&mut self) -> ParseResult<Declaration> {
        let attributes = self.parse_attributes()?;
        self.keyword("deinit")?;
        let body = self.parse_code_block()?;
        Ok(Declaration::Deinitializer(DeinitializerDeclaration {
            attributes,
            body,
        }))
    }

    fn parse_extension_declaration(&mut self) -> ParseResult<Declaration> {
        let modifiers = self.parse_declaration_modifiers()?;
        self.keyword("extension")?;
        let extended = self.parse_type_identifier()?;
        let inheritance = self.opt(Self::parse_type_inheritance_clause);
        let body = self.parse_declaration_body()?;
        Ok(Declaration::Extension(ExtensionDeclaration {
            modifiers,
            extended,
            inheritance,
            body,
        }))
    }

    fn parse_subscript_declaration(&mut self) -> ParseResult<Declaration> {
        let (attributes, modifiers, parameters, result) = self.parse_subscript_head()?;
        let body = if let Ok(block) = self.attempt(Self::parse_getter_setter_block) {
            SubscriptBody::GetterSetter(block)
        } else if let Ok(block) = self.attempt(Self::parse_getter_setter_keyword_block) {
            SubscriptBody::Keyword(block)
        } else {
            SubscriptBody::CodeBlock(self.parse_code_block()?)
        };
        Ok(Declaration::Subscript(SubscriptDeclaration {
            attributes,
            modifiers,
            parameters,
            result,
            body,
        }))
    }

    fn parse_subscript_head(
        &mut self,
    ) -> ParseResult<(
        Vec<Attribute>,
        Vec<DeclarationModifier>,
        ParameterClause,
        FunctionResult,
    )> {
        let attributes = self.parse_attributes()?;
        let modifiers = self.parse_declaration_modifiers()?;
        self.keyword("subscript")?;
        let parameters = self.parse_parameter_clause()?;
        let result = self.parse_function_result()?;
        Ok((attributes, modifiers, parameters, result))
    }

    // ========================================================================
    // Operator declarations
    // ========================================================================

    fn parse_operator_declaration(&mut self) -> ParseResult<Declaration> {
        let decl = choice!(
            self,
            "operator declaration",
            |p: &mut Self| p.attempt(|p| {
                p.keyword("prefix")?;
                p.keyword("operator")?;
                let name = p.any_operator()?;
                p.punct("{")?;
                p.punct("}")?;
                Ok(OperatorDeclaration::Prefix { name })
            }),
            |p: &mut Self| p.attempt(|p| {
                p.keyword("postfix")?;
                p.keyword("operator")?;
                let name = p.any_operator()?;
                p.punct("{")?;
                p.punct("}")?;
                Ok(OperatorDeclaration::Postfix { name })
            }),
            |p: &mut Self| p.attempt(Self::parse_infix_operator_declaration),
        )?;
        Ok(Declaration::Operator(decl))
    }

    fn parse_infix_operator_declaration(&mut self) -> ParseResult<OperatorDeclaration> {
        self.keyword("infix")?;
        self.keyword("operator")?;
        let name = self.any_operator()?;
        self.punct("{")?;
        let precedence = if self.keyword("precedence").is_ok() {
            self.ws()?;
            let position = self.cursor.position();
            let digits = self.decimal_digits()?;
            let value: u32 = digits
                .parse()
                .map_err(|_| ParseError::PrecedenceOutOfRange { position })
                .map_err(|e| self.record(e))?;
            if value > 255 {
                return Err(self.record(ParseError::PrecedenceOutOfRange { position }));
            }
            Some(value as u8)
        } else {
            None
        };
        let associativity = if self.keyword("associativity").is_ok() {
            if self.keyword("left").is_ok() {
                Some(Associativity::Left)
            } else if self.keyword("right").is_ok() {
                Some(Associativity::Right)
            } else if self.keyword("none").is_ok() {
                Some(Associativity::None)
            } else {
                return self.fail("`left`, `right` or `none`");
            }
        } else {
            None
        };
        self.punct("}")?;
        Ok(OperatorDeclaration::Infix {
            name,
            precedence,
            associativity,
        })
    }

    // ========================================================================
    // Inheritance clauses
    // ========================================================================

    pub(crate) fn parse_type_inheritance_clause(&mut self) -> ParseResult<TypeInheritanceClause> {
        self.punct(":")?;
        let class_requirement = self.keyword("class").is_ok();
        if class_requirement && self.punct(",").is_err() {
            return Ok(TypeInheritanceClause {
                class_requirement,
                types: Vec::new(),
            });
        }
        let types = self.sep_by1(",", Self::parse_type_identifier)?;
        Ok(TypeInheritanceClause {
            class_requirement,
            types,
        })
    }
}
