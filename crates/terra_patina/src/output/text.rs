//! Terminal output rendered with oxc_diagnostics.

use std::sync::Arc;

use oxc_diagnostics::{GraphicalReportHandler, GraphicalTheme, NamedSource};
use terra_carton::FxHashMap;

use crate::linter::LintResult;

/// Format lint results as graphical reports with code snippets
pub fn format_text(results: &[LintResult], sources: &[(String, String)]) -> String {
    let mut output = String::new();
    let handler = GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor());

    let source_map: FxHashMap<&str, &str> = sources
        .iter()
        .map(|(f, s)| (f.as_str(), s.as_str()))
        .collect();

    for result in results.iter().filter(|r| r.has_diagnostics()) {
        let source = source_map
            .get(result.filename.as_str())
            .copied()
            .unwrap_or("");
        let named_source = Arc::new(NamedSource::new(&result.filename, source.to_string()));

        for diagnostic in &result.diagnostics {
            let rule_name = diagnostic.rule_name;
            let report = diagnostic
                .clone()
                .into_oxc_diagnostic()
                .with_source_code(Arc::clone(&named_source));

            let mut buf = String::new();
            if handler.render_report(&mut buf, report.as_ref()).is_ok() {
                output.push_str(rule_name);
                output.push('\n');
                output.push_str(&buf);
                output.push('\n');
            }
        }
    }

    output
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Format a summary line
pub fn format_summary(error_count: usize, warning_count: usize, file_count: usize) -> String {
    let mut parts = Vec::new();
    if error_count > 0 {
        parts.push(plural(error_count, "error"));
    }
    if warning_count > 0 {
        parts.push(plural(warning_count, "warning"));
    }

    if parts.is_empty() {
        format!("No problems found in {}", plural(file_count, "spec file"))
    } else {
        format!("{} in {}", parts.join(", "), plural(file_count, "spec file"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        insta::assert_snapshot!(format_summary(0, 0, 3), @"No problems found in 3 spec files");
        insta::assert_snapshot!(format_summary(1, 2, 1), @"1 error, 2 warnings in 1 spec file");
        insta::assert_snapshot!(format_summary(0, 1, 2), @"1 warning in 2 spec files");
    }

    #[test]
    fn test_text_contains_rule_and_message() {
        let source = "Terra.describeViewports('A', ['huge', 'tiny'], () => {});\n";
        let result = crate::linter::Linter::new().lint_spec(source, "a-spec.js");
        let sources = vec![("a-spec.js".to_string(), source.to_string())];
        let text = format_text(&[result], &sources);
        assert!(text.contains("terra/describe-viewports"));
        assert!(text.contains("Viewports are not in ascending order by their widths."));
        assert!(text.contains("a-spec.js"));
    }
}
