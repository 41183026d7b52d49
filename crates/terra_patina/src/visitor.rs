//! Spec model built by a single walk over the OXC AST.
//!
//! Rules never walk the AST themselves. The walker records every Terra call
//! once, together with the facts rules need about its surroundings: the
//! expression statement it forms, the nearest describe-like block and how
//! deeply it sits inside other Terra describe helpers.

use oxc_ast::ast::{
    Argument, ArrayExpressionElement, BindingPattern, CallExpression, ChainElement, Class,
    ClassElement, Declaration, Expression, ExpressionStatement, ForStatementInit,
    ForStatementLeft, Function, ObjectPropertyKind, Program, Statement, VariableDeclaration,
    VariableDeclarationKind,
};
use oxc_span::{GetSpan, Span};
use terra_carton::{FxHashMap, SmallVec};

use crate::matcher::{callee_path, function_name_span, CallKind};

/// The expression statement a Terra call forms on its own, e.g.
/// `Terra.validates.element('name');`.
#[derive(Debug, Clone, Copy)]
pub struct StatementSite<'a> {
    /// Span of the whole statement
    pub span: Span,
    /// Whether the statement is directly in the program body
    pub top_level: bool,
    /// The closest preceding expression statement in the same statement list
    pub previous: Option<&'a ExpressionStatement<'a>>,
}

/// A located Terra call.
#[derive(Debug, Clone)]
pub struct TerraCall<'a> {
    pub kind: CallKind,
    /// Dotted callee text, e.g. `Terra.validates.element`
    pub path: String,
    pub call: &'a CallExpression<'a>,
    /// Present when the call is the expression of an expression statement
    pub statement: Option<StatementSite<'a>>,
    /// Nearest enclosing `describe` or `Terra.describeViewports` call
    pub describe: Option<&'a CallExpression<'a>>,
    /// Number of enclosing `Terra.describeViewports`/`Terra.describeTests` calls
    pub helper_depth: u32,
    /// Number of enclosing `Terra.describeViewports` calls
    pub viewports_depth: u32,
}

impl<'a> TerraCall<'a> {
    /// Span of the callee, e.g. `Terra.validates.element`.
    #[inline]
    pub fn method_span(&self) -> Span {
        self.call.callee.span()
    }

    /// Span of the called function's name, e.g. `element`.
    #[inline]
    pub fn function_name_span(&self) -> Span {
        function_name_span(&self.call.callee)
    }

    /// Whether the call is a statement of its own below the top level.
    #[inline]
    pub fn is_nested_statement(&self) -> bool {
        self.statement.is_some_and(|s| !s.top_level)
    }

    /// Whether the call is a statement directly in the program body.
    #[inline]
    pub fn is_top_level_statement(&self) -> bool {
        self.statement.is_some_and(|s| s.top_level)
    }
}

/// A variable declared somewhere in the file.
#[derive(Debug, Clone, Copy)]
pub struct Binding<'a> {
    pub kind: VariableDeclarationKind,
    /// Whether the declaration has this single declarator
    pub single_declarator: bool,
    pub init: Option<&'a Expression<'a>>,
}

/// Everything rules know about one spec file.
#[derive(Debug, Default)]
pub struct SpecModel<'a> {
    /// Terra calls in source order
    pub calls: Vec<TerraCall<'a>>,
    bindings: FxHashMap<&'a str, SmallVec<[Binding<'a>; 1]>>,
}

impl<'a> SpecModel<'a> {
    /// Walk `program` and collect its Terra calls.
    pub fn build(program: &'a Program<'a>) -> Self {
        let mut visitor = SpecVisitor::default();
        visitor.walk_statements(&program.body, true);
        tracing::debug!(
            "Found {} Terra calls and {} bindings",
            visitor.model.calls.len(),
            visitor.model.bindings.len()
        );
        visitor.model
    }

    /// Look up a variable by name.
    ///
    /// Scopes are not tracked, so only names declared exactly once in the
    /// file resolve.
    pub fn binding(&self, name: &str) -> Option<&Binding<'a>> {
        match self.bindings.get(name) {
            Some(bindings) if bindings.len() == 1 => bindings.first(),
            _ => None,
        }
    }

    /// Calls of one kind.
    pub fn calls_of(&self, kind: CallKind) -> impl Iterator<Item = &TerraCall<'a>> {
        self.calls.iter().filter(move |c| c.kind == kind)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

#[derive(Default)]
struct SpecVisitor<'a> {
    model: SpecModel<'a>,
    describes: Vec<&'a CallExpression<'a>>,
    helper_depth: u32,
    viewports_depth: u32,
}

impl<'a> SpecVisitor<'a> {
    fn walk_statements(&mut self, statements: &'a [Statement<'a>], top_level: bool) {
        let mut previous: Option<&'a ExpressionStatement<'a>> = None;
        for statement in statements {
            self.walk_statement(statement, top_level, previous);
            if let Statement::ExpressionStatement(expr_stmt) = statement {
                previous = Some(expr_stmt);
            }
        }
    }

    fn walk_statement(
        &mut self,
        statement: &'a Statement<'a>,
        top_level: bool,
        previous: Option<&'a ExpressionStatement<'a>>,
    ) {
        match statement {
            Statement::ExpressionStatement(expr_stmt) => {
                let site = StatementSite {
                    span: expr_stmt.span,
                    top_level,
                    previous,
                };
                self.walk_expression(&expr_stmt.expression, Some(site));
            }
            Statement::VariableDeclaration(decl) => self.walk_variable_declaration(decl),
            Statement::FunctionDeclaration(func) => self.walk_function(func),
            Statement::ClassDeclaration(class) => self.walk_class(class),
            Statement::ReturnStatement(ret) => {
                if let Some(argument) = &ret.argument {
                    self.walk_expression(argument, None);
                }
            }
            Statement::ThrowStatement(throw) => self.walk_expression(&throw.argument, None),
            Statement::BlockStatement(block) => self.walk_statements(&block.body, false),
            Statement::IfStatement(if_stmt) => {
                self.walk_expression(&if_stmt.test, None);
                self.walk_nested_statement(&if_stmt.consequent);
                if let Some(alternate) = &if_stmt.alternate {
                    self.walk_nested_statement(alternate);
                }
            }
            Statement::ForStatement(for_stmt) => {
                if let Some(init) = &for_stmt.init {
                    match init {
                        ForStatementInit::VariableDeclaration(decl) => {
                            self.walk_variable_declaration(decl)
                        }
                        _ => {
                            if let Some(expr) = init.as_expression() {
                                self.walk_expression(expr, None);
                            }
                        }
                    }
                }
                if let Some(test) = &for_stmt.test {
                    self.walk_expression(test, None);
                }
                if let Some(update) = &for_stmt.update {
                    self.walk_expression(update, None);
                }
                self.walk_nested_statement(&for_stmt.body);
            }
            Statement::ForInStatement(for_in) => {
                if let ForStatementLeft::VariableDeclaration(decl) = &for_in.left {
                    self.walk_variable_declaration(decl);
                }
                self.walk_expression(&for_in.right, None);
                self.walk_nested_statement(&for_in.body);
            }
            Statement::ForOfStatement(for_of) => {
                if let ForStatementLeft::VariableDeclaration(decl) = &for_of.left {
                    self.walk_variable_declaration(decl);
                }
                self.walk_expression(&for_of.right, None);
                self.walk_nested_statement(&for_of.body);
            }
            Statement::WhileStatement(while_stmt) => {
                self.walk_expression(&while_stmt.test, None);
                self.walk_nested_statement(&while_stmt.body);
            }
            Statement::DoWhileStatement(do_while) => {
                self.walk_nested_statement(&do_while.body);
                self.walk_expression(&do_while.test, None);
            }
            Statement::SwitchStatement(switch) => {
                self.walk_expression(&switch.discriminant, None);
                for case in switch.cases.iter() {
                    if let Some(test) = &case.test {
                        self.walk_expression(test, None);
                    }
                    self.walk_statements(&case.consequent, false);
                }
            }
            Statement::TryStatement(try_stmt) => {
                self.walk_statements(&try_stmt.block.body, false);
                if let Some(handler) = &try_stmt.handler {
                    self.walk_statements(&handler.body.body, false);
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    self.walk_statements(&finalizer.body, false);
                }
            }
            Statement::LabeledStatement(labeled) => self.walk_nested_statement(&labeled.body),
            Statement::ExportNamedDeclaration(export) => {
                if let Some(declaration) = &export.declaration {
                    match declaration {
                        Declaration::VariableDeclaration(decl) => {
                            self.walk_variable_declaration(decl)
                        }
                        Declaration::FunctionDeclaration(func) => self.walk_function(func),
                        Declaration::ClassDeclaration(class) => self.walk_class(class),
                        _ => {}
                    }
                }
            }
            Statement::ExportDefaultDeclaration(export) => {
                if let Some(expr) = export.declaration.as_expression() {
                    self.walk_expression(expr, None);
                }
            }
            _ => {}
        }
    }

    /// Statement in a single-statement position such as an `if` branch.
    #[inline]
    fn walk_nested_statement(&mut self, statement: &'a Statement<'a>) {
        self.walk_statement(statement, false, None);
    }

    fn walk_variable_declaration(&mut self, decl: &'a VariableDeclaration<'a>) {
        let single_declarator = decl.declarations.len() == 1;
        for declarator in decl.declarations.iter() {
            if let BindingPattern::BindingIdentifier(id) = &declarator.id {
                self.model
                    .bindings
                    .entry(id.name.as_str())
                    .or_default()
                    .push(Binding {
                        kind: decl.kind,
                        single_declarator,
                        init: declarator.init.as_ref(),
                    });
            }
            if let Some(init) = &declarator.init {
                self.walk_expression(init, None);
            }
        }
    }

    fn walk_function(&mut self, func: &'a Function<'a>) {
        if let Some(body) = &func.body {
            self.walk_statements(&body.statements, false);
        }
    }

    fn walk_class(&mut self, class: &'a Class<'a>) {
        for element in class.body.body.iter() {
            match element {
                ClassElement::MethodDefinition(method) => self.walk_function(&method.value),
                ClassElement::PropertyDefinition(prop) => {
                    if let Some(value) = &prop.value {
                        self.walk_expression(value, None);
                    }
                }
                ClassElement::StaticBlock(block) => self.walk_statements(&block.body, false),
                _ => {}
            }
        }
    }

    fn walk_expression(&mut self, expr: &'a Expression<'a>, site: Option<StatementSite<'a>>) {
        match expr {
            Expression::CallExpression(call) => self.walk_call(call, site),
            Expression::ArrowFunctionExpression(arrow) => {
                if arrow.expression {
                    // Concise body: the single statement wraps the returned expression
                    if let Some(Statement::ExpressionStatement(expr_stmt)) =
                        arrow.body.statements.first()
                    {
                        self.walk_expression(&expr_stmt.expression, None);
                    }
                } else {
                    self.walk_statements(&arrow.body.statements, false);
                }
            }
            Expression::FunctionExpression(func) => self.walk_function(func),
            Expression::ClassExpression(class) => self.walk_class(class),
            Expression::StaticMemberExpression(member) => {
                self.walk_expression(&member.object, None)
            }
            Expression::ComputedMemberExpression(member) => {
                self.walk_expression(&member.object, None);
                self.walk_expression(&member.expression, None);
            }
            Expression::ChainExpression(chain) => match &chain.expression {
                ChainElement::CallExpression(call) => self.walk_call(call, None),
                ChainElement::StaticMemberExpression(member) => {
                    self.walk_expression(&member.object, None)
                }
                ChainElement::ComputedMemberExpression(member) => {
                    self.walk_expression(&member.object, None);
                    self.walk_expression(&member.expression, None);
                }
                ChainElement::TSNonNullExpression(non_null) => {
                    self.walk_expression(&non_null.expression, None)
                }
                _ => {}
            },
            Expression::NewExpression(new) => {
                self.walk_expression(&new.callee, None);
                self.walk_arguments(&new.arguments);
            }
            Expression::ArrayExpression(array) => {
                for element in array.elements.iter() {
                    match element {
                        ArrayExpressionElement::SpreadElement(spread) => {
                            self.walk_expression(&spread.argument, None)
                        }
                        ArrayExpressionElement::Elision(_) => {}
                        _ => {
                            if let Some(expr) = element.as_expression() {
                                self.walk_expression(expr, None);
                            }
                        }
                    }
                }
            }
            Expression::ObjectExpression(object) => {
                for prop in object.properties.iter() {
                    match prop {
                        ObjectPropertyKind::ObjectProperty(p) => {
                            self.walk_expression(&p.value, None)
                        }
                        ObjectPropertyKind::SpreadProperty(spread) => {
                            self.walk_expression(&spread.argument, None)
                        }
                    }
                }
            }
            Expression::ConditionalExpression(cond) => {
                self.walk_expression(&cond.test, None);
                self.walk_expression(&cond.consequent, None);
                self.walk_expression(&cond.alternate, None);
            }
            Expression::LogicalExpression(logical) => {
                self.walk_expression(&logical.left, None);
                self.walk_expression(&logical.right, None);
            }
            Expression::BinaryExpression(binary) => {
                self.walk_expression(&binary.left, None);
                self.walk_expression(&binary.right, None);
            }
            Expression::AssignmentExpression(assign) => self.walk_expression(&assign.right, None),
            Expression::SequenceExpression(seq) => {
                for expr in seq.expressions.iter() {
                    self.walk_expression(expr, None);
                }
            }
            Expression::AwaitExpression(await_expr) => {
                self.walk_expression(&await_expr.argument, None)
            }
            Expression::UnaryExpression(unary) => self.walk_expression(&unary.argument, None),
            Expression::ParenthesizedExpression(paren) => {
                self.walk_expression(&paren.expression, None)
            }
            Expression::TemplateLiteral(template) => {
                for expr in template.expressions.iter() {
                    self.walk_expression(expr, None);
                }
            }
            Expression::TaggedTemplateExpression(tagged) => {
                self.walk_expression(&tagged.tag, None);
                for expr in tagged.quasi.expressions.iter() {
                    self.walk_expression(expr, None);
                }
            }
            Expression::TSAsExpression(ts_as) => self.walk_expression(&ts_as.expression, None),
            Expression::TSSatisfiesExpression(ts_satisfies) => {
                self.walk_expression(&ts_satisfies.expression, None)
            }
            Expression::TSNonNullExpression(non_null) => {
                self.walk_expression(&non_null.expression, None)
            }
            _ => {}
        }
    }

    fn walk_arguments(&mut self, arguments: &'a [Argument<'a>]) {
        for argument in arguments {
            match argument {
                Argument::SpreadElement(spread) => self.walk_expression(&spread.argument, None),
                _ => {
                    if let Some(expr) = argument.as_expression() {
                        self.walk_expression(expr, None);
                    }
                }
            }
        }
    }

    fn walk_call(&mut self, call: &'a CallExpression<'a>, site: Option<StatementSite<'a>>) {
        // Chained calls such as `foo().bar()` keep their inner calls in the callee
        self.walk_expression(&call.callee, None);

        let path = callee_path(&call.callee);
        let kind = path.as_deref().map_or(CallKind::Other, CallKind::classify);

        if kind != CallKind::Other {
            self.model.calls.push(TerraCall {
                kind,
                path: path.unwrap_or_default(),
                call,
                statement: site,
                describe: self.describes.last().copied(),
                helper_depth: self.helper_depth,
                viewports_depth: self.viewports_depth,
            });
        }

        let is_describe_like = kind.is_describe_like();
        let is_helper = kind.is_describe_helper();
        let is_viewports = kind == CallKind::DescribeViewports;

        if is_describe_like {
            self.describes.push(call);
        }
        if is_helper {
            self.helper_depth += 1;
        }
        if is_viewports {
            self.viewports_depth += 1;
        }

        self.walk_arguments(&call.arguments);

        if is_viewports {
            self.viewports_depth -= 1;
        }
        if is_helper {
            self.helper_depth -= 1;
        }
        if is_describe_like {
            self.describes.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::first_string_literal;
    use oxc_allocator::Allocator;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn with_model(source: &str, check: impl FnOnce(&SpecModel<'_>)) {
        let allocator = Allocator::default();
        let ret = Parser::new(&allocator, source, SourceType::mjs()).parse();
        assert!(!ret.panicked);
        let program = allocator.alloc(ret.program);
        let model = SpecModel::build(program);
        check(&model);
    }

    fn describe_name<'a>(call: &TerraCall<'a>) -> Option<&'a str> {
        call.describe
            .and_then(first_string_literal)
            .map(|lit| lit.value.as_str())
    }

    #[test]
    fn test_each_call_is_visited_once() {
        let source = r#"
Terra.describeViewports('Outer', ['tiny', 'huge'], () => {
  describe('Inner', () => {
    it('works', () => {
      Terra.validates.element('a');
      Terra.validates.screenshot('b', { selector: '#root' });
      [1, 2].forEach(() => Terra.validates.accessibility());
    });
  });
});
Terra.describeViewports('Other', ['tiny'], () => {});
"#;
        with_model(source, |model| {
            let paths: Vec<&str> = model.calls.iter().map(|c| c.path.as_str()).collect();
            assert_eq!(
                paths,
                vec![
                    "Terra.describeViewports",
                    "describe",
                    "Terra.validates.element",
                    "Terra.validates.screenshot",
                    "Terra.validates.accessibility",
                    "Terra.describeViewports",
                ]
            );
            for call in &model.calls {
                let occurrences = source.matches(call.path.as_str()).count();
                let recorded = model.calls.iter().filter(|c| c.path == call.path).count();
                // `describe` is also a substring of `describeViewports`
                if call.kind != CallKind::Describe {
                    assert_eq!(recorded, occurrences, "{}", call.path);
                }
            }
        });
    }

    #[test]
    fn test_statement_sites() {
        let source = r#"
Terra.describeViewports('Top', ['tiny'], () => {
  before(() => { setup(); });
  const x = 1;
  Terra.it.validatesElement();
  foo(Terra.validates.element());
});
"#;
        with_model(source, |model| {
            let top = &model.calls[0];
            assert!(top.is_top_level_statement());

            let it = model.calls_of(CallKind::ItValidatesElement).next().unwrap();
            let site = it.statement.unwrap();
            assert!(!site.top_level);
            let previous = site.previous.unwrap();
            assert_eq!(
                &source[previous.span.start as usize..previous.span.end as usize],
                "before(() => { setup(); });"
            );

            let argument = model.calls_of(CallKind::ValidatesElement).next().unwrap();
            assert!(argument.statement.is_none());
        });
    }

    #[test]
    fn test_nearest_describe_and_depths() {
        let source = r#"
describe('A', () => {
  Terra.describeViewports('B', ['tiny'], () => {
    Terra.describeTests('C', {}, () => {
      Terra.validates.element();
    });
  });
  Terra.validates.screenshot();
});
"#;
        with_model(source, |model| {
            let element = model.calls_of(CallKind::ValidatesElement).next().unwrap();
            assert_eq!(describe_name(element), Some("B"));
            assert_eq!(element.helper_depth, 2);
            assert_eq!(element.viewports_depth, 1);

            let screenshot = model.calls_of(CallKind::ValidatesScreenshot).next().unwrap();
            assert_eq!(describe_name(screenshot), Some("A"));
            assert_eq!(screenshot.helper_depth, 0);

            let tests = model.calls_of(CallKind::DescribeTests).next().unwrap();
            assert_eq!(tests.helper_depth, 1);
            assert_eq!(tests.viewports_depth, 1);
        });
    }

    #[test]
    fn test_bindings_resolve_unique_names_only() {
        let source = r#"
const viewports = 'tiny';
let other = ['huge'];
function f() { const dup = 1; }
function g() { const dup = 2; }
"#;
        with_model(source, |model| {
            let viewports = model.binding("viewports").unwrap();
            assert_eq!(viewports.kind, VariableDeclarationKind::Const);
            assert!(viewports.single_declarator);
            assert!(matches!(viewports.init, Some(Expression::StringLiteral(_))));

            assert_eq!(
                model.binding("other").map(|b| b.kind),
                Some(VariableDeclarationKind::Let)
            );
            assert!(model.binding("dup").is_none());
            assert!(model.binding("missing").is_none());
        });
    }
}
