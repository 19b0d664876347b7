//! Statement grammar: control flow, branching, switch, do/catch, labels,
//! compiler control, and condition clauses.
//!
//! Statement alternation is keyword-directed; the declaration and expression
//! fallbacks come last. Expressions parsed directly in front of a statement
//! body run with closures banned so that `if f(x) { }` keeps its body.

use crate::combinators::choice;
use crate::{ParseError, ParseResult, Parser};
use swiftparse_ast::{
    AvailabilityArgument, BindingKind, BuildConfiguration, BuildConfigurationStatement,
    CaseItem, CatchClause, CodeBlock, Condition, ConditionClause, DoStatement, ElseBranch,
    ForInStatement, ForInit, ForStatement, GuardStatement, IfStatement, LineControl,
    OptionalBinding, RepeatWhileStatement, SmolStr, Statement, SwitchCase, SwitchStatement,
    WhileStatement,
};

impl<'src> Parser<'src> {
    pub(crate) fn parse_statements(&mut self) -> ParseResult<Vec<Statement>> {
        self.many(|p| {
            let statement = p.parse_statement()?;
            let _ = p.punct(";");
            Ok(statement)
        })
    }

    pub(crate) fn parse_code_block(&mut self) -> ParseResult<CodeBlock> {
        self.punct("{")?;
        let statements = self.with_closures_allowed(Self::parse_statements)?;
        self.punct("}")?;
        Ok(statements)
    }

    pub(crate) fn parse_statement(&mut self) -> ParseResult<Statement> {
        choice!(
            self,
            "statement",
            Self::parse_for_statement,
            Self::parse_while_statement,
            Self::parse_repeat_while_statement,
            |p: &mut Self| p.parse_if_statement().map(Statement::If),
            Self::parse_guard_statement,
            Self::parse_switch_statement,
            Self::parse_break_statement,
            Self::parse_continue_statement,
            Self::parse_fallthrough_statement,
            Self::parse_return_statement,
            Self::parse_throw_statement,
            Self::parse_defer_statement,
            Self::parse_do_statement,
            Self::parse_build_configuration_statement,
            Self::parse_line_control_statement,
            |p: &mut Self| p.attempt(Self::parse_labeled_statement),
            |p: &mut Self| p.attempt(|p| p.parse_declaration().map(Statement::Declaration)),
            |p: &mut Self| p.parse_expression().map(Statement::Expression),
        )
    }

    // ========================================================================
    // Loops
    // ========================================================================

    fn parse_for_statement(&mut self) -> ParseResult<Statement> {
        self.keyword("for")?;
        if let Ok(statement) = self.attempt(Self::parse_for_in_tail) {
            return Ok(statement);
        }
        if let Ok(statement) = self.attempt(|p| p.parse_c_style_for_tail(true)) {
            return Ok(statement);
        }
        self.parse_c_style_for_tail(false)
    }

    fn parse_for_in_tail(&mut self) -> ParseResult<Statement> {
        let item_case = self.keyword("case").is_ok();
        let pattern = self.with_closures_banned(Self::parse_pattern)?;
        self.keyword("in")?;
        let sequence = self.with_closures_banned(Self::parse_expression)?;
        let where_clause = self.opt(|p| {
            p.keyword("where")?;
            p.with_closures_banned(Self::parse_expression)
        });
        let body = self.parse_code_block()?;
        Ok(Statement::ForIn(ForInStatement {
            item_case,
            pattern,
            sequence,
            where_clause,
            body,
        }))
    }

    fn parse_c_style_for_tail(&mut self, parenthesized: bool) -> ParseResult<Statement> {
        if parenthesized {
            self.punct("(")?;
        }
        let init = self.opt(Self::parse_for_init);
        self.punct(";")?;
        let condition = self.opt(|p| p.with_closures_banned(Self::parse_expression));
        self.punct(";")?;
        let increment = self.opt(|p| p.with_closures_banned(Self::parse_expression));
        if parenthesized {
            self.punct(")")?;
        }
        let body = self.parse_code_block()?;
        Ok(Statement::For(ForStatement {
            init,
            condition,
            increment,
            body,
        }))
    }

    fn parse_for_init(&mut self) -> ParseResult<ForInit> {
        choice!(
            self,
            "for initializer",
            |p: &mut Self| p.attempt(|p| p
                .with_closures_banned(Self::parse_variable_declaration)
                .map(ForInit::Variable)),
            |p: &mut Self| p
                .with_closures_banned(|p| p.sep_by1(",", Self::parse_expression))
                .map(ForInit::Expressions),
        )
    }

    fn parse_while_statement(&mut self) -> ParseResult<Statement> {
        self.keyword("while")?;
        let condition = self.parse_condition_clause()?;
        let body = self.parse_code_block()?;
        Ok(Statement::While(WhileStatement { condition, body }))
    }

    fn parse_repeat_while_statement(&mut self) -> ParseResult<Statement> {
        self.keyword("repeat")?;
        let body = self.parse_code_block()?;
        self.keyword("while")?;
        let condition = self.parse_expression()?;
        Ok(Statement::RepeatWhile(RepeatWhileStatement {
            body,
            condition,
        }))
    }

    // ========================================================================
    // Branches
    // ========================================================================

    pub(crate) fn parse_if_statement(&mut self) -> ParseResult<IfStatement> {
        self.keyword("if")?;
        let condition = self.parse_condition_clause()?;
        let body = self.parse_code_block()?;
        let else_branch = if self.keyword("else").is_ok() {
            if self.peek_keyword("if") {
                Some(ElseBranch::If(Box::new(self.parse_if_statement()?)))
            } else {
                Some(ElseBranch::Block(self.parse_code_block()?))
            }
        } else {
            None
        };
        Ok(IfStatement {
            condition,
            body,
            else_branch,
        })
    }

    fn parse_guard_statement(&mut self) -> ParseResult<Statement> {
        self.keyword("guard")?;
        let condition = self.parse_condition_clause()?;
        self.keyword("else")?;
        let body = self.parse_code_block()?;
        Ok(Statement::Guard(GuardStatement { condition, body }))
    }

    fn parse_switch_statement(&mut self) -> ParseResult<Statement> {
        self.keyword("switch")?;
        let scrutinee = self.with_closures_banned(Self::parse_expression)?;
        self.punct("{")?;
        let cases = self.many(Self::parse_switch_case)?;
        self.punct("}")?;
        Ok(Statement::Switch(SwitchStatement { scrutinee, cases }))
    }

    fn parse_switch_case(&mut self) -> ParseResult<SwitchCase> {
        if self.keyword("case").is_ok() {
            let items = self.sep_by1(",", |p| {
                let pattern = p.with_closures_banned(Self::parse_pattern)?;
                let guard = p.opt(|p| {
                    p.keyword("where")?;
                    p.with_closures_banned(Self::parse_expression)
                });
                Ok(CaseItem { pattern, guard })
            })?;
            self.punct(":")?;
            let statements = self.parse_statements()?;
            return Ok(SwitchCase::Case { items, statements });
        }
        self.keyword("default")?;
        self.punct(":")?;
        let statements = self.parse_statements()?;
        Ok(SwitchCase::Default(statements))
    }

    // ========================================================================
    // Transfer statements
    // ========================================================================

    fn parse_break_statement(&mut self) -> ParseResult<Statement> {
        self.keyword("break")?;
        Ok(Statement::Break(self.opt(|p| p.identifier())))
    }

    fn parse_continue_statement(&mut self) -> ParseResult<Statement> {
        self.keyword("continue")?;
        Ok(Statement::Continue(self.opt(|p| p.identifier())))
    }

    fn parse_fallthrough_statement(&mut self) -> ParseResult<Statement> {
        self.keyword("fallthrough")?;
        Ok(Statement::Fallthrough)
    }

    fn parse_return_statement(&mut self) -> ParseResult<Statement> {
        self.keyword("return")?;
        Ok(Statement::Return(self.opt(Self::parse_expression)))
    }

    fn parse_throw_statement(&mut self) -> ParseResult<Statement> {
        self.keyword("throw")?;
        let value = self.parse_expression()?;
        Ok(Statement::Throw(value))
    }

    fn parse_defer_statement(&mut self) -> ParseResult<Statement> {
        self.keyword("defer")?;
        let body = self.parse_code_block()?;
        Ok(Statement::Defer(body))
    }

    fn parse_do_statement(&mut self) -> ParseResult<Statement> {
        self.keyword("do")?;
        let body = self.parse_code_block()?;
        let catches = self.many(Self::parse_catch_clause)?;
        Ok(Statement::Do(DoStatement { body, catches }))
    }

    fn parse_catch_clause(&mut self) -> ParseResult<CatchClause> {
        self.keyword("catch")?;
        let pattern = self.with_closures_banned(|p| p.opt(Self::parse_pattern));
        let where_clause = self.with_closures_banned(|p| {
            p.opt(|p| {
                p.keyword("where")?;
                p.parse_expression()
            })
        });
        let body = self.parse_code_block()?;
        Ok(CatchClause {
            pattern,
            where_clause,
            body,
        })
    }

    fn parse_labeled_statement(&mut self) -> ParseResult<Statement> {
        let label = self.identifier()?;
        self.punct(":")?;
        let statement = choice!(
            self,
            "loop, if or switch statement",
            Self::parse_for_statement,
            Self::parse_while_statement,
            Self::parse_repeat_while_statement,
            |p: &mut Self| p.parse_if_statement().map(Statement::If),
            Self::parse_switch_statement,
        )?;
        Ok(Statement::Labeled {
            label,
            statement: Box::new(statement),
        })
    }

    // ========================================================================
    // Condition clauses
    // ========================================================================

    pub(crate) fn parse_condition_clause(&mut self) -> ParseResult<ConditionClause> {
        self.with_closures_banned(|p| {
            if p.peek_condition_start() {
                let conditions = p.parse_condition_list()?;
                return Ok(ConditionClause {
                    expression: None,
                    conditions,
                });
            }
            let expression = p.parse_expression()?;
            let conditions = if p.punct(",").is_ok() {
                p.parse_condition_list()?
            } else {
                Vec::new()
            };
            Ok(ConditionClause {
                expression: Some(expression),
                conditions,
            })
        })
    }

    fn peek_condition_start(&mut self) -> bool {
        self.peek_keyword("case")
            || self.peek_keyword("let")
            || self.peek_keyword("var")
            || self.peek_punct("#available")
    }

    fn parse_condition_list(&mut self) -> ParseResult<Vec<Condition>> {
        let mut conditions = vec![self.parse_condition()?];
        while let Ok(condition) = self.attempt(|p| {
            p.punct(",")?;
            p.parse_condition()
        }) {
            conditions.push(condition);
        }
        Ok(conditions)
    }

    fn parse_condition(&mut self) -> ParseResult<Condition> {
        choice!(
            self,
            "condition",
            Self::parse_availability_condition,
            Self::parse_case_condition,
            Self::parse_optional_binding_condition,
        )
    }

    fn parse_availability_condition(&mut self) -> ParseResult<Condition> {
        self.hash_keyword("available")?;
        self.punct("(")?;
        let arguments = self.sep_by1(",", Self::parse_availability_argument)?;
        self.punct(")")?;
        Ok(Condition::Availability(arguments))
    }

    /// `platform version` with a 1–3 component dotted version, or `*`.
    fn parse_availability_argument(&mut self) -> ParseResult<AvailabilityArgument> {
        if self.punct("*").is_ok() {
            return Ok(AvailabilityArgument::Star);
        }
        let name = self.identifier()?;
        let mut version = self.decimal_digits()?.to_string();
        for _ in 0..2 {
            match self.attempt(|p| {
                p.punct(".")?;
                p.decimal_digits()
            }) {
                Ok(component) => {
                    version.push('.');
                    version.push_str(&component);
                }
                Err(_) => break,
            }
        }
        Ok(AvailabilityArgument::Platform {
            name,
            version: SmolStr::new(version),
        })
    }

    fn parse_case_condition(&mut self) -> ParseResult<Condition> {
        self.keyword("case")?;
        let pattern = self.parse_pattern()?;
        self.equals_sign()?;
        let initializer = self.parse_expression()?;
        let where_clause = self.opt(|p| {
            p.keyword("where")?;
            p.parse_expression()
        });
        Ok(Condition::Case {
            pattern,
            initializer,
            where_clause,
        })
    }

    /// `let`/`var` head plus greedy comma-separated continuations, then an
    /// optional `where`.
    fn parse_optional_binding_condition(&mut self) -> ParseResult<Condition> {
        let kind = if self.keyword("let").is_ok() {
            BindingKind::Let
        } else if self.keyword("var").is_ok() {
            BindingKind::Var
        } else {
            return self.fail("`let` or `var`");
        };
        let mut bindings = vec![self.parse_optional_binding(Some(kind))?];
        while let Ok(binding) = self.attempt(|p| {
            p.punct(",")?;
            let kind = if p.keyword("let").is_ok() {
                Some(BindingKind::Let)
            } else if p.keyword("var").is_ok() {
                Some(BindingKind::Var)
            } else {
                None
            };
            p.parse_optional_binding(kind)
        }) {
            bindings.push(binding);
        }
        let where_clause = self.opt(|p| {
            p.keyword("where")?;
            p.parse_expression()
        });
        Ok(Condition::OptionalBinding {
            bindings,
            where_clause,
        })
    }

    fn parse_optional_binding(
        &mut self,
        kind: Option<BindingKind>,
    ) -> ParseResult<OptionalBinding> {
        let pattern = self.parse_pattern()?;
        self.equals_sign()?;
        let initializer = self.parse_expression()?;
        Ok(OptionalBinding {
            kind,
            pattern,
            initializer,
        })
    }

    // ========================================================================
    // Compiler control
    // ========================================================================

    fn parse_build_configuration_statement(&mut self) -> ParseResult<Statement> {
        self.hash_keyword("if")?;
        let condition = self.parse_build_configuration()?;
        let statements = self.parse_statements()?;
        let elseif_clauses = self.many(|p| {
            p.hash_keyword("elseif")?;
            let condition = p.parse_build_configuration()?;
            let statements = p.parse_statements()?;
            Ok((condition, statements))
        })?;
        let else_clause = self.opt(|p| {
            p.hash_keyword("else")?;
            p.parse_statements()
        });
        self.hash_keyword("endif")?;
        Ok(Statement::BuildConfiguration(Box::new(
            BuildConfigurationStatement {
                condition,
                statements,
                elseif_clauses,
                else_clause,
            },
        )))
    }

    /// `&&` binds tighter than `||`; both left-associative.
    fn parse_build_configuration(&mut self) -> ParseResult<BuildConfiguration> {
        let mut lhs = self.parse_build_configuration_and()?;
        while self.punct("||").is_ok() {
            let rhs = self.parse_build_configuration_and()?;
            lhs = BuildConfiguration::Or(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_build_configuration_and(&mut self) -> ParseResult<BuildConfiguration> {
        let mut lhs = self.parse_build_configuration_unary()?;
        while self.attempt(|p| {
            p.punct("&&")?;
            // reject `&&` inside a longer operator such as `&&&`
            match p.cursor.peek() {
                Some('&') => p.fail("build configuration"),
                _ => Ok(()),
            }
        })
        .is_ok()
        {
            let rhs = self.parse_build_configuration_unary()?;
            lhs = BuildConfiguration::And(Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn parse_build_configuration_unary(&mut self) -> ParseResult<BuildConfiguration> {
        if self.punct("!").is_ok() {
            let inner = self.parse_build_configuration_unary()?;
            return Ok(BuildConfiguration::Not(Box::new(inner)));
        }
        if self.punct("(").is_ok() {
            let inner = self.parse_build_configuration()?;
            self.punct(")")?;
            return Ok(inner);
        }
        if self.keyword("true").is_ok() {
            return Ok(BuildConfiguration::Boolean(true));
        }
        if self.keyword("false").is_ok() {
            return Ok(BuildConfiguration::Boolean(false));
        }
        let name = self.identifier()?;
        if name == "os" || name == "arch" {
            if let Ok(argument) = self.attempt(|p| {
                p.punct("(")?;
                let argument = p.identifier()?;
                p.punct(")")?;
                Ok(argument)
            }) {
                return Ok(if name == "os" {
                    BuildConfiguration::Os(argument)
                } else {
                    BuildConfiguration::Arch(argument)
                });
            }
        }
        Ok(BuildConfiguration::Identifier(name))
    }

    fn parse_line_control_statement(&mut self) -> ParseResult<Statement> {
        self.hash_keyword("line")?;
        self.ws()?;
        let control = match self.cursor.peek() {
            Some(c) if c.is_ascii_digit() => {
                let position = self.cursor.position();
                let digits = self.decimal_digits()?;
                let line: u64 = digits
                    .parse()
                    .map_err(|_| ParseError::InvalidLineNumber { position })
                    .map_err(|e| self.record(e))?;
                if line == 0 {
                    return Err(self.record(ParseError::InvalidLineNumber { position }));
                }
                let file = self.parse_static_string()?;
                LineControl::Numbered { line, file }
            }
            _ => LineControl::Bare,
        };
        Ok(Statement::LineControl(control))
    }
}
