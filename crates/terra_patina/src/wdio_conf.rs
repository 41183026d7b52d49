//! Global Terra configuration in `wdio.conf.js`.

use std::path::Path;

use oxc_allocator::Allocator;
use oxc_ast::ast::{Expression, ObjectProperty};
use oxc_ast_visit::{walk, Visit};
use oxc_parser::Parser;
use oxc_span::{GetSpan, SourceType};

use crate::matcher::{properties, property_name, string_value};

/// Name of the WebdriverIO configuration file in the project root.
pub const WDIO_CONF_FILE_NAME: &str = "wdio.conf.js";

/// Find the `selector` of a `terra: { ... }` object in a wdio configuration.
///
/// When several are present, the last one wins, as it is the one applied last.
pub fn find_global_selector(source: &str) -> Option<String> {
    let allocator = Allocator::default();
    let ret = Parser::new(&allocator, source, SourceType::cjs()).parse();
    if ret.panicked {
        return None;
    }

    let mut collector = SelectorCollector {
        source,
        selector: None,
    };
    collector.visit_program(&ret.program);
    collector.selector
}

/// Read `wdio.conf.js` from the project root and find its global selector.
pub fn load_global_selector(project_root: &Path) -> Option<String> {
    let path = project_root.join(WDIO_CONF_FILE_NAME);
    let source = match std::fs::read_to_string(&path) {
        Ok(source) => source,
        Err(e) => {
            tracing::debug!("No global selector, cannot read {}: {}", path.display(), e);
            return None;
        }
    };
    let selector = find_global_selector(&source);
    tracing::debug!("Global Terra selector: {:?}", selector);
    selector
}

struct SelectorCollector<'s> {
    source: &'s str,
    selector: Option<String>,
}

impl SelectorCollector<'_> {
    fn value_text(&self, value: &Expression<'_>) -> String {
        if let Some(value) = string_value(value) {
            return value.to_string();
        }
        let span = value.span();
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or("")
            .trim_matches(|c| c == '\'' || c == '"' || c == '`')
            .to_string()
    }
}

impl<'a> Visit<'a> for SelectorCollector<'_> {
    fn visit_object_property(&mut self, prop: &ObjectProperty<'a>) {
        if property_name(prop).as_deref() == Some("terra") {
            if let Expression::ObjectExpression(terra) = &prop.value {
                for option in properties(terra) {
                    if property_name(option).as_deref() == Some("selector") {
                        self.selector = Some(self.value_text(&option.value));
                    }
                }
            }
        }
        walk::walk_object_property(self, prop);
    }
}
