//! Swift 2.1 Abstract Syntax Tree
//!
//! Defines all AST node types produced by the parser. Nodes are pure data:
//! immutable after construction, tree-shaped (a parent exclusively owns its
//! children), and free of source positions. Binary expressions are kept as a
//! flat list of tails in source order; operator precedence is resolved by a
//! later pass, never here.

// Re-export for use by the parser and downstream consumers.
pub use smol_str::SmolStr;

// ============================================================================
// Module
// ============================================================================

/// A complete Swift source file: an ordered sequence of top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    pub statements: Vec<Statement>,
}

/// A brace-delimited statement sequence.
pub type CodeBlock = Vec<Statement>;

// ============================================================================
// Statements
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Expression(Expression),
    Declaration(Declaration),
    For(ForStatement),
    ForIn(ForInStatement),
    While(WhileStatement),
    RepeatWhile(RepeatWhileStatement),
    If(IfStatement),
    Guard(GuardStatement),
    Switch(SwitchStatement),
    Break(Option<SmolStr>),
    Continue(Option<SmolStr>),
    Fallthrough,
    Return(Option<Expression>),
    Throw(Expression),
    Defer(CodeBlock),
    Do(DoStatement),
    Labeled {
        label: SmolStr,
        statement: Box<Statement>,
    },
    BuildConfiguration(Box<BuildConfigurationStatement>),
    LineControl(LineControl),
}

/// C-style `for init?; condition?; increment? { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub init: Option<ForInit>,
    pub condition: Option<Expression>,
    pub increment: Option<Expression>,
    pub body: CodeBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Variable(VariableDeclaration),
    Expressions(Vec<Expression>),
}

/// `for case? pattern in sequence where? { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct ForInStatement {
    /// True when the pattern was introduced with the `case` marker.
    pub item_case: bool,
    pub pattern: Pattern,
    pub sequence: Expression,
    pub where_clause: Option<Expression>,
    pub body: CodeBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub condition: ConditionClause,
    pub body: CodeBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RepeatWhileStatement {
    pub body: CodeBlock,
    pub condition: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: ConditionClause,
    pub body: CodeBlock,
    pub else_branch: Option<ElseBranch>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    Block(CodeBlock),
    If(Box<IfStatement>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuardStatement {
    pub condition: ConditionClause,
    pub body: CodeBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchStatement {
    pub scrutinee: Expression,
    pub cases: Vec<SwitchCase>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SwitchCase {
    Case {
        items: Vec<CaseItem>,
        statements: Vec<Statement>,
    },
    Default(Vec<Statement>),
}

/// One pattern of a `case` label, with its optional `where` guard.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseItem {
    pub pattern: Pattern,
    pub guard: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DoStatement {
    pub body: CodeBlock,
    pub catches: Vec<CatchClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub pattern: Option<Pattern>,
    pub where_clause: Option<Expression>,
    pub body: CodeBlock,
}

// ============================================================================
// Compiler control
// ============================================================================

/// `#if` / `#elseif`* / `#else`? / `#endif`.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfigurationStatement {
    pub condition: BuildConfiguration,
    pub statements: Vec<Statement>,
    pub elseif_clauses: Vec<(BuildConfiguration, Vec<Statement>)>,
    pub else_clause: Option<Vec<Statement>>,
}

/// Boolean condition tree of a build configuration. `&&` binds tighter than
/// `||`; both are left-associative.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildConfiguration {
    Identifier(SmolStr),
    Boolean(bool),
    Os(SmolStr),
    Arch(SmolStr),
    Not(Box<BuildConfiguration>),
    And(Box<BuildConfiguration>, Box<BuildConfiguration>),
    Or(Box<BuildConfiguration>, Box<BuildConfiguration>),
}

/// `#line` (bare) or `#line N "file"` with N > 0.
#[derive(Debug, Clone, PartialEq)]
pub enum LineControl {
    Bare,
    Numbered { line: u64, file: String },
}

// ============================================================================
// Conditions
// ============================================================================

/// The predicate of `if`/`while`/`guard`: an optional leading expression plus
/// a comma-separated condition list.
#[derive(Debug, Clone, PartialEq)]
pub struct ConditionClause {
    pub expression: Option<Expression>,
    pub conditions: Vec<Condition>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// `#available(platform version, …, *)`
    Availability(Vec<AvailabilityArgument>),
    /// `case pattern = initializer where?`
    Case {
        pattern: Pattern,
        initializer: Expression,
        where_clause: Option<Expression>,
    },
    /// `let`/`var` binding head plus comma-separated continuations.
    OptionalBinding {
        bindings: Vec<OptionalBinding>,
        where_clause: Option<Expression>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum AvailabilityArgument {
    Platform { name: SmolStr, version: SmolStr },
    Star,
}

/// One binding of an optional-binding condition. The head carries its
/// `let`/`var` keyword; continuation entries may or may not restate one.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionalBinding {
    pub kind: Option<BindingKind>,
    pub pattern: Pattern,
    pub initializer: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    Let,
    Var,
}

// ============================================================================
// Declarations
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Import(ImportDeclaration),
    Constant(ConstantDeclaration),
    Variable(VariableDeclaration),
    TypeAlias(TypeAliasDeclaration),
    Function(FunctionDeclaration),
    Enum(EnumDeclaration),
    Struct(StructDeclaration),
    Class(ClassDeclaration),
    Protocol(ProtocolDeclaration),
    Initializer(InitializerDeclaration),
    Deinitializer(DeinitializerDeclaration),
    Extension(ExtensionDeclaration),
    Subscript(SubscriptDeclaration),
    Operator(OperatorDeclaration),
}

/// `import kind? path.path.path`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    pub attributes: Vec<Attribute>,
    pub kind: Option<SmolStr>,
    pub path: Vec<SmolStr>,
}

/// `let` with one or more pattern initializers.
#[derive(Debug, Clone, PartialEq)]
pub struct ConstantDeclaration {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<DeclarationModifier>,
    pub initializers: Vec<PatternInitializer>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatternInitializer {
    pub pattern: Pattern,
    pub initializer: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<DeclarationModifier>,
    pub body: VariableBody,
}

/// The shapes a `var` declaration can take.
#[derive(Debug, Clone, PartialEq)]
pub enum VariableBody {
    /// `var a = 1, b: Int`
    PatternInitializers(Vec<PatternInitializer>),
    /// Read-only computed: `var x: Int { return y }`
    Computed {
        name: SmolStr,
        annotation: TypeAnnotation,
        block: CodeBlock,
    },
    /// Computed with explicit accessors: `var x: Int { get { … } set { … } }`
    GetterSetter {
        name: SmolStr,
        annotation: TypeAnnotation,
        block: GetterSetterBlock,
    },
    /// Accessor requirements without bodies: `var x: Int { get set }`
    GetterSetterKeyword {
        name: SmolStr,
        annotation: TypeAnnotation,
        block: GetterSetterKeywordBlock,
    },
    /// Stored with observers: `var x = 0 { willSet { … } didSet { … } }`
    Observed {
        name: SmolStr,
        annotation: Option<TypeAnnotation>,
        initializer: Option<Expression>,
        block: ObservedBlock,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetterSetterBlock {
    pub getter: GetterClause,
    pub setter: Option<SetterClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetterClause {
    pub attributes: Vec<Attribute>,
    pub body: CodeBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetterClause {
    pub attributes: Vec<Attribute>,
    /// `set(newValue)` binds an explicit parameter name.
    pub name: Option<SmolStr>,
    pub body: CodeBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GetterSetterKeywordBlock {
    pub getter_attributes: Vec<Attribute>,
    pub setter_attributes: Option<Vec<Attribute>>,
}

impl GetterSetterKeywordBlock {
    pub fn has_setter(&self) -> bool {
        self.setter_attributes.is_some()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObservedBlock {
    pub will_set: Option<ObserverClause>,
    pub did_set: Option<ObserverClause>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObserverClause {
    pub attributes: Vec<Attribute>,
    pub name: Option<SmolStr>,
    pub body: CodeBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAliasDeclaration {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<DeclarationModifier>,
    pub name: SmolStr,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<DeclarationModifier>,
    pub name: FunctionName,
    pub generic_params: Option<GenericParameterClause>,
    /// Curried functions carry more than one clause.
    pub parameter_clauses: Vec<ParameterClause>,
    pub throws: ThrowsKind,
    pub result: Option<FunctionResult>,
    pub body: Option<CodeBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionName {
    Identifier(SmolStr),
    Operator(SmolStr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionResult {
    pub attributes: Vec<Attribute>,
    pub ty: Type,
}

pub type ParameterClause = Vec<Parameter>;

#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    Named(NamedParameter),
    /// Bare-type parameter of a function type position.
    TypeOnly { attributes: Vec<Attribute>, ty: Type },
}

/// A parameter with names. `_` appears verbatim as a name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedParameter {
    pub modifier: Option<ParameterModifier>,
    pub external_name: Option<SmolStr>,
    pub local_name: SmolStr,
    pub annotation: TypeAnnotation,
    pub default_value: Option<Expression>,
    pub variadic: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterModifier {
    InOut,
    Let,
    Var,
}

/// `throws` / `rethrows` marker on functions, initializers and function types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThrowsKind {
    #[default]
    None,
    Throws,
    Rethrows,
}

// ============================================================================
// Generics
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct GenericParameterClause {
    pub params: Vec<GenericParameter>,
    pub requirements: Vec<GenericRequirement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenericParameter {
    Plain(SmolStr),
    Conformance(SmolStr, TypeIdentifier),
    Composition(SmolStr, Type),
}

#[derive(Debug, Clone, PartialEq)]
pub enum GenericRequirement {
    Conformance(TypeIdentifier, Type),
    SameType(TypeIdentifier, Type),
}

// ============================================================================
// Nominal type declarations
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum EnumDeclaration {
    Union(UnionEnum),
    RawValue(RawValueEnum),
}

/// Enum whose cases carry optional tuple payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionEnum {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<DeclarationModifier>,
    pub indirect: bool,
    pub name: SmolStr,
    pub generic_params: Option<GenericParameterClause>,
    pub inheritance: Option<TypeInheritanceClause>,
    pub members: Vec<UnionEnumMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UnionEnumMember {
    Declaration(Box<Declaration>),
    Case(UnionCaseClause),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionCaseClause {
    pub attributes: Vec<Attribute>,
    pub indirect: bool,
    pub cases: Vec<UnionCase>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnionCase {
    pub name: SmolStr,
    pub payload: Option<TupleType>,
}

/// Enum whose cases optionally bind to a literal of the inherited raw type.
#[derive(Debug, Clone, PartialEq)]
pub struct RawValueEnum {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<DeclarationModifier>,
    pub name: SmolStr,
    pub generic_params: Option<GenericParameterClause>,
    pub inheritance: TypeInheritanceClause,
    pub members: Vec<RawValueEnumMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawValueEnumMember {
    Declaration(Box<Declaration>),
    Case(RawValueCaseClause),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawValueCaseClause {
    pub attributes: Vec<Attribute>,
    pub cases: Vec<RawValueCase>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawValueCase {
    pub name: SmolStr,
    pub raw_value: Option<Literal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructDeclaration {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<DeclarationModifier>,
    pub name: SmolStr,
    pub generic_params: Option<GenericParameterClause>,
    pub inheritance: Option<TypeInheritanceClause>,
    pub body: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDeclaration {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<DeclarationModifier>,
    pub name: SmolStr,
    pub generic_params: Option<GenericParameterClause>,
    pub inheritance: Option<TypeInheritanceClause>,
    pub body: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolDeclaration {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<DeclarationModifier>,
    pub name: SmolStr,
    pub inheritance: Option<TypeInheritanceClause>,
    pub members: Vec<ProtocolMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolMember {
    Property(ProtocolProperty),
    /// Method requirement: a function head without a body.
    Method(FunctionDeclaration),
    /// Initializer requirement: an initializer head without a body.
    Initializer(InitializerDeclaration),
    Subscript(ProtocolSubscript),
    AssociatedType(AssociatedType),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolProperty {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<DeclarationModifier>,
    pub name: SmolStr,
    pub annotation: TypeAnnotation,
    pub block: GetterSetterKeywordBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolSubscript {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<DeclarationModifier>,
    pub parameters: ParameterClause,
    pub result: FunctionResult,
    pub block: GetterSetterKeywordBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssociatedType {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<DeclarationModifier>,
    pub name: SmolStr,
    pub inheritance: Option<TypeInheritanceClause>,
    pub default: Option<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InitializerDeclaration {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<DeclarationModifier>,
    pub kind: InitializerKind,
    pub generic_params: Option<GenericParameterClause>,
    pub parameters: ParameterClause,
    pub throws: ThrowsKind,
    /// Absent only for protocol initializer requirements.
    pub body: Option<CodeBlock>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitializerKind {
    Plain,
    /// `init?`
    Failable,
    /// `init!`
    ImplicitlyUnwrappedFailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeinitializerDeclaration {
    pub attributes: Vec<Attribute>,
    pub body: CodeBlock,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionDeclaration {
    pub modifiers: Vec<DeclarationModifier>,
    pub extended: TypeIdentifier,
    pub inheritance: Option<TypeInheritanceClause>,
    pub body: Vec<Declaration>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptDeclaration {
    pub attributes: Vec<Attribute>,
    pub modifiers: Vec<DeclarationModifier>,
    pub parameters: ParameterClause,
    pub result: FunctionResult,
    pub body: SubscriptBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptBody {
    CodeBlock(CodeBlock),
    GetterSetter(GetterSetterBlock),
    Keyword(GetterSetterKeywordBlock),
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperatorDeclaration {
    Prefix {
        name: SmolStr,
    },
    Postfix {
        name: SmolStr,
    },
    Infix {
        name: SmolStr,
        /// 0..=255 when present.
        precedence: Option<u8>,
        associativity: Option<Associativity>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeInheritanceClause {
    pub class_requirement: bool,
    pub types: Vec<TypeIdentifier>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DeclarationModifier {
    Class,
    Convenience,
    Dynamic,
    Final,
    Infix,
    Lazy,
    Mutating,
    Nonmutating,
    Optional,
    Override,
    Postfix,
    Prefix,
    Required,
    Static,
    Unowned,
    UnownedSafe,
    UnownedUnsafe,
    Weak,
    Access(AccessLevelModifier),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessLevelModifier {
    pub level: AccessLevel,
    /// `private(set)` and friends.
    pub setter_only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Internal,
    Private,
    Public,
}

// ============================================================================
// Expressions
// ============================================================================

/// try-marker? prefix-expression binary-tail*
///
/// The tails preserve surface order and do not encode precedence.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub try_op: Option<TryOperator>,
    pub prefix: PrefixExpression,
    pub binaries: Vec<BinaryTail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryOperator {
    Try,
    /// `try?`
    Optional,
    /// `try!`
    Forced,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BinaryTail {
    /// `op rhs`
    Operator { op: SmolStr, rhs: PrefixExpression },
    /// `= try? rhs`
    Assignment {
        try_op: Option<TryOperator>,
        rhs: PrefixExpression,
    },
    /// `? try? then : rhs`
    Conditional {
        try_op: Option<TryOperator>,
        then: Box<Expression>,
        rhs: PrefixExpression,
    },
    /// `is T`, `as T`, `as? T`, `as! T`
    Cast(TypeCast),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeCast {
    Is(Type),
    As(Type),
    AsOptional(Type),
    AsForced(Type),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrefixExpression {
    Operated {
        operator: Option<SmolStr>,
        postfix: PostfixExpression,
    },
    /// `&identifier`
    InOut(SmolStr),
}

/// Left-associative spine: a primary followed by suffixes.
#[derive(Debug, Clone, PartialEq)]
pub enum PostfixExpression {
    Primary(PrimaryExpression),
    PostfixOperator {
        base: Box<PostfixExpression>,
        operator: SmolStr,
    },
    ExplicitMember {
        base: Box<PostfixExpression>,
        member: ExplicitMember,
    },
    Call(FunctionCall),
    Subscript {
        base: Box<PostfixExpression>,
        arguments: Vec<Expression>,
    },
    /// `base!`
    ForcedValue(Box<PostfixExpression>),
    /// `base?`
    OptionalChaining(Box<PostfixExpression>),
    /// `base.self`
    PostfixSelf(Box<PostfixExpression>),
    /// `base.dynamicType`
    DynamicType(Box<PostfixExpression>),
    /// `base.init`
    Initializer(Box<PostfixExpression>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExplicitMember {
    Field {
        name: SmolStr,
        generic_args: Option<Vec<Type>>,
    },
    /// `.0`, `.1`, … kept as source text.
    TupleIndex(SmolStr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub callee: Box<PostfixExpression>,
    pub arguments: Vec<ExpressionElement>,
    pub trailing_closure: Option<Box<Closure>>,
}

/// An optionally labeled expression of an argument list or parenthesized
/// expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionElement {
    pub label: Option<SmolStr>,
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrimaryExpression {
    Identifier {
        name: SmolStr,
        generic_args: Option<Vec<Type>>,
    },
    Literal(LiteralExpression),
    SelfExpression(SelfExpression),
    Superclass(SuperclassExpression),
    Closure(Closure),
    Parenthesized(Vec<ExpressionElement>),
    /// `.member` with the base type inferred from context.
    ImplicitMember(SmolStr),
    Wildcard,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelfExpression {
    Plain,
    Member(SmolStr),
    Subscript(Vec<Expression>),
    Initializer,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SuperclassExpression {
    Member(SmolStr),
    Subscript(Vec<Expression>),
    Initializer,
}

// ============================================================================
// Literals
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum LiteralExpression {
    Literal(Literal),
    Array(Vec<Expression>),
    Dictionary(Vec<(Expression, Expression)>),
    File,
    Line,
    Column,
    Function,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Verbatim source text: radix prefix, digit separators and any leading
    /// `-` are preserved exactly.
    Numeric(SmolStr),
    Boolean(bool),
    Nil,
    StaticString(String),
    /// Text chunks and embedded expressions in source order.
    InterpolatedString(Vec<InterpolationSegment>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterpolationSegment {
    Text(String),
    Expression(Expression),
}

// ============================================================================
// Closures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Closure {
    pub signature: Option<ClosureSignature>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClosureSignature {
    pub capture_list: Option<Vec<CaptureItem>>,
    pub parameters: Option<ClosureParameters>,
    pub result: Option<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClosureParameters {
    Clause(ParameterClause),
    Identifiers(Vec<SmolStr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaptureItem {
    pub specifier: Option<CaptureSpecifier>,
    pub expression: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureSpecifier {
    Weak,
    Unowned,
    UnownedSafe,
    UnownedUnsafe,
}

// ============================================================================
// Patterns
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    Wildcard(Option<TypeAnnotation>),
    Identifier {
        name: SmolStr,
        annotation: Option<TypeAnnotation>,
    },
    /// `name?`
    OptionalIdentifier(SmolStr),
    Tuple {
        elements: Vec<Pattern>,
        annotation: Option<TypeAnnotation>,
    },
    /// `.name` or `.name(subpatterns)`
    EnumCase {
        name: SmolStr,
        payload: Option<Vec<Pattern>>,
    },
    ValueBinding {
        kind: BindingKind,
        pattern: Box<Pattern>,
    },
    /// `is T`
    Is(Type),
    /// `pattern as T`
    As { pattern: Box<Pattern>, ty: Type },
    Expression(Box<Expression>),
}

// ============================================================================
// Types
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Identifier(TypeIdentifier),
    Tuple(TupleType),
    /// `[T]`
    Array(Box<Type>),
    /// `[K: V]`
    Dictionary(Box<Type>, Box<Type>),
    Function(FunctionType),
    /// `T?`
    Optional(Box<Type>),
    /// `T!`
    ImplicitlyUnwrapped(Box<Type>),
    /// `T.Type` / `T.Protocol`
    Metatype {
        base: Box<Type>,
        kind: MetatypeKind,
    },
    /// `protocol<P, Q>`
    ProtocolComposition(Vec<TypeIdentifier>),
}

/// `A throws? -> B`, right-associative.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub parameter: Box<Type>,
    pub throws: ThrowsKind,
    pub result: Box<Type>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetatypeKind {
    Type,
    Protocol,
}

/// Dotted path of components, each with optional generic arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeIdentifier {
    pub components: Vec<TypeIdentifierComponent>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeIdentifierComponent {
    pub name: SmolStr,
    pub generic_args: Option<Vec<Type>>,
}

impl TypeIdentifier {
    /// Convenience for the common single-component case.
    pub fn simple(name: impl Into<SmolStr>) -> Self {
        TypeIdentifier {
            components: vec![TypeIdentifierComponent {
                name: name.into(),
                generic_args: None,
            }],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TupleType {
    pub elements: Vec<TupleTypeElement>,
    /// Trailing `...`.
    pub variadic: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TupleTypeElement {
    Anonymous {
        attributes: Vec<Attribute>,
        inout: bool,
        ty: Type,
    },
    Named {
        inout: bool,
        name: SmolStr,
        annotation: TypeAnnotation,
    },
}

/// `: attributes? type`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    pub attributes: Vec<Attribute>,
    pub ty: Type,
}

impl TypeAnnotation {
    pub fn plain(ty: Type) -> Self {
        TypeAnnotation {
            attributes: Vec::new(),
            ty,
        }
    }
}

// ============================================================================
// Attributes
// ============================================================================

/// `@name` or `@name(balanced tokens)`. The argument preserves the exact
/// surface text between the outer parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: SmolStr,
    pub argument: Option<String>,
}
