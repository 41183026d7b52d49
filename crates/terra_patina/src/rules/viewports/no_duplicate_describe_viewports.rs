//! terra/no-duplicate-describe-viewports
//!
//! Detect top-level `Terra.describeViewports` blocks that run with the same
//! set of viewports. Order and repetition inside a list do not matter.
//! Only array literal arguments are compared.
//!
//! ## Examples
//!
//! ### Invalid
//! ```js
//! Terra.describeViewports('First', ['tiny', 'huge'], () => {});
//! Terra.describeViewports('Second', ['huge', 'tiny'], () => {});
//! ```
//!
//! ### Valid
//! ```js
//! Terra.describeViewports('Merged', ['tiny', 'huge'], () => {
//!   describe('First', () => {});
//!   describe('Second', () => {});
//! });
//! ```

use oxc_ast::ast::Expression;
use terra_carton::{FxHashMap, SmallVec};

use super::checks::{values, viewports_of};
use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::matcher::CallKind;
use crate::rule::{Rule, RuleCategory, RuleMeta};
use crate::visitor::SpecModel;

static META: RuleMeta = RuleMeta {
    name: "terra/no-duplicate-describe-viewports",
    description: "Detect `Terra.describeViewports` blocks that could be merged",
    category: RuleCategory::Viewports,
    fixable: false,
    default_severity: Severity::Warning,
};

const MESSAGE: &str = "Multiple Terra.describeViewports blocks with the same set of viewports are specified in this file. They can be merged into a single describeViewports block.";

/// Detect mergeable Terra.describeViewports blocks
pub struct NoDuplicateDescribeViewports;

type ViewportSet<'a> = SmallVec<[&'a str; 6]>;

impl Rule for NoDuplicateDescribeViewports {
    fn meta(&self) -> &'static RuleMeta {
        &META
    }

    fn check_spec(&self, ctx: &mut LintContext<'_>, spec: &SpecModel<'_>) {
        let mut groups: FxHashMap<ViewportSet<'_>, SmallVec<[usize; 2]>> = FxHashMap::default();
        let mut order: Vec<ViewportSet<'_>> = Vec::new();

        for (index, call) in spec.calls.iter().enumerate() {
            if call.kind != CallKind::DescribeViewports {
                continue;
            }
            let Some(Expression::ArrayExpression(array)) = viewports_of(call) else {
                continue;
            };
            let mut set: ViewportSet<'_> = values(array)
                .into_iter()
                .filter_map(|(_, value)| value)
                .collect();
            set.sort_unstable();
            set.dedup();

            let members = groups.entry(set.clone()).or_default();
            if members.is_empty() {
                order.push(set);
            }
            members.push(index);
        }

        for set in &order {
            let Some(members) = groups.get(set) else {
                continue;
            };
            if members.len() < 2 {
                continue;
            }
            for &index in members {
                ctx.warn(MESSAGE, spec.calls[index].method_span());
            }
        }
    }
}
