//! terra/replace-terra-it
//!
//! `Terra.it.*` helpers create an `it` block of their own and are deprecated
//! in favor of `Terra.validates.*` calls placed inside a regular `it` block.
//!
//! The fix wraps the `Terra.validates.*` counterpart into a new
//! `it('INSERT TEST NAME', ...)` block, keeping the original arguments. When
//! the statement right before is a `before` hook, two alternatives are
//! offered: `merged` moves the hook's statements into the new block and
//! removes the hook, `unchanged` leaves the hook alone. Otherwise the only
//! fix is `simple`.
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! describe('Button', () => {
//!   Terra.it.validatesElement('default', { selector: '#root' });
//! });
//! ```
//!
//! ### Valid
//! ```js
//! describe('Button', () => {
//!   it('INSERT TEST NAME', () => {
//!     Terra.validates.element('default', { selector: '#root' });
//!   });
//! });
//! ```

use oxc_ast::ast::{Expression, ExpressionStatement, FunctionBody};
use oxc_span::{GetSpan, Span};
use terra_carton::LineIndex;

use crate::context::LintContext;
use crate::diagnostic::{Fix, LintDiagnostic, Severity, TextEdit};
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::visitor::{SpecModel, TerraCall};

static META: RuleMeta = RuleMeta {
    name: "terra/replace-terra-it",
    description: "Replace `Terra.it` helpers with `Terra.validates` calls",
    category: RuleCategory::Migration,
    fixable: true,
    default_severity: Severity::Warning,
};

const INDENT_UNIT: &str = "  ";

/// Replace Terra.it helpers with Terra.validates calls
pub struct ReplaceTerraIt;

/// A `before` hook with a callback, right before the `Terra.it` statement.
struct BeforeHook<'a> {
    statement: &'a ExpressionStatement<'a>,
    body: &'a FunctionBody<'a>,
    expression_body: bool,
}

impl<'a> BeforeHook<'a> {
    fn find(ctx: &LintContext<'_>, statement: Option<&'a ExpressionStatement<'a>>) -> Option<Self> {
        let statement = statement?;
        let Expression::CallExpression(call) = &statement.expression else {
            return None;
        };
        if ctx.text(call.callee.span()) != "before" {
            return None;
        }
        match call.arguments.last()?.as_expression()? {
            Expression::ArrowFunctionExpression(arrow) => Some(Self {
                statement,
                body: &arrow.body,
                expression_body: arrow.expression,
            }),
            Expression::FunctionExpression(func) => Some(Self {
                statement,
                body: func.body.as_deref()?,
                expression_body: false,
            }),
            _ => None,
        }
    }

    /// Source text of the hook's statements, one per line.
    fn statements(&self, source: &str) -> Vec<String> {
        self.body
            .statements
            .iter()
            .filter_map(|stmt| {
                let span = stmt.span();
                let text = source.get(span.start as usize..span.end as usize)?;
                Some(if self.expression_body {
                    format!("{text};")
                } else {
                    text.to_string()
                })
            })
            .collect()
    }

    /// Span removing the hook's lines when nothing else is on them.
    fn removal_span(&self, source: &str, lines: &LineIndex<'_>) -> Span {
        let span = self.statement.span;
        let mut start = span.start;
        let line_start = lines.line_start(span.start);
        let leading = &source[line_start as usize..span.start as usize];
        if leading.chars().all(|c| c == ' ' || c == '\t') {
            start = line_start;
        }

        let bytes = source.as_bytes();
        let mut end = span.end as usize;
        while end < bytes.len() && (bytes[end] == b' ' || bytes[end] == b'\t') {
            end += 1;
        }
        if end < bytes.len() && bytes[end] == b'\n' {
            end += 1;
        } else {
            end = span.end as usize;
        }
        Span::new(start, end as u32)
    }
}

/// Build the new `it` block replacing a `Terra.it` statement.
fn it_block(indent: &str, setup: &[String], validation: &str) -> String {
    let inner = format!("{indent}{INDENT_UNIT}");
    let mut block = String::from("it('INSERT TEST NAME', () => {\n");
    for line in setup.iter().map(String::as_str).chain(std::iter::once(validation)) {
        block.push_str(&inner);
        block.push_str(line);
        block.push('\n');
    }
    block.push_str(indent);
    block.push_str("});");
    block
}

impl Rule for ReplaceTerraIt {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_call<'a>(
        &self,
        ctx: &mut LintContext<'_>,
        _spec: &SpecModel<'a>,
        call: &TerraCall<'a>,
    ) {
        let Some(replacement) = call.kind.replacement() else {
            return;
        };
        let Some(site) = call.statement else {
            return;
        };

        let source = ctx.source;
        let arguments = if call.call.arguments.is_empty() {
            "()"
        } else {
            ctx.text(Span::new(call.call.callee.span().end, call.call.span.end))
        };
        let validation = format!("{replacement}{arguments};");

        let lines = LineIndex::new(source);
        let indent = lines.indentation(site.span.start);
        let replace = |setup: &[String]| {
            TextEdit::replace(site.span.start, site.span.end, it_block(indent, setup, &validation))
        };

        let mut diagnostic = LintDiagnostic::warn(
            ctx.current_rule,
            "Terra.it helpers can be replaced with their Terra.validates counterparts.",
            call.method_span().start,
            call.method_span().end,
        )
        .with_help(format!("Use `{replacement}` inside an `it` block"));

        match BeforeHook::find(ctx, site.previous) {
            Some(hook) => {
                let removal = hook.removal_span(source, &lines);
                diagnostic = diagnostic
                    .with_fix(Fix::with_edits(
                        "merged",
                        "Replace with Terra.validates and merge the before hook into the new it block",
                        vec![
                            TextEdit::delete(removal.start, removal.end),
                            replace(&hook.statements(source)),
                        ],
                    ))
                    .with_fix(Fix::new(
                        "unchanged",
                        "Replace with Terra.validates and leave the before hook unchanged",
                        replace(&[]),
                    ));
            }
            None => {
                diagnostic = diagnostic.with_fix(Fix::new(
                    "simple",
                    "Replace with Terra.validates",
                    replace(&[]),
                ));
            }
        }
        ctx.report(diagnostic);
    }
}
