//! Diagnostic types for terra_patina.
//!
//! Uses `CompactString` for efficient small string storage.

use oxc_diagnostics::OxcDiagnostic;
use oxc_span::Span;
use serde::Serialize;
use terra_carton::CompactString;

/// Lint diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// A text edit for auto-fixing a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextEdit {
    /// Start byte offset
    pub start: u32,
    /// End byte offset
    pub end: u32,
    /// Replacement text
    pub new_text: String,
}

impl TextEdit {
    /// Create a new text edit
    #[inline]
    pub fn new(start: u32, end: u32, new_text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            new_text: new_text.into(),
        }
    }

    /// Create a deletion edit
    #[inline]
    pub fn delete(start: u32, end: u32) -> Self {
        Self::new(start, end, "")
    }

    /// Create a replacement edit
    #[inline]
    pub fn replace(start: u32, end: u32, text: impl Into<String>) -> Self {
        Self::new(start, end, text)
    }
}

/// A fix for a diagnostic, containing one or more text edits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fix {
    /// Short label to pick this fix among alternatives
    pub label: &'static str,
    /// Description of the fix
    pub message: String,
    /// Text edits to apply
    pub edits: Vec<TextEdit>,
}

impl Fix {
    /// Create a new fix with a single edit
    #[inline]
    pub fn new(label: &'static str, message: impl Into<String>, edit: TextEdit) -> Self {
        Self {
            label,
            message: message.into(),
            edits: vec![edit],
        }
    }

    /// Create a new fix with multiple edits
    #[inline]
    pub fn with_edits(label: &'static str, message: impl Into<String>, edits: Vec<TextEdit>) -> Self {
        Self {
            label,
            message: message.into(),
            edits,
        }
    }

    /// Apply the fix to a source string
    pub fn apply(&self, source: &str) -> String {
        apply_edits(source, self.edits.iter().collect())
    }
}

/// Apply non-overlapping edits, back to front so earlier offsets stay valid.
fn apply_edits(source: &str, mut edits: Vec<&TextEdit>) -> String {
    edits.sort_by(|a, b| b.start.cmp(&a.start));
    let mut result = source.to_string();
    for edit in edits {
        let (start, end) = (edit.start as usize, edit.end as usize);
        if start <= end && end <= result.len() {
            result.replace_range(start..end, &edit.new_text);
        }
    }
    result
}

/// A lint diagnostic with rich information for display.
#[derive(Debug, Clone)]
pub struct LintDiagnostic {
    /// Rule that triggered this diagnostic
    pub rule_name: &'static str,
    /// Severity level
    pub severity: Severity,
    /// Primary message
    pub message: CompactString,
    /// Start byte offset in source
    pub start: u32,
    /// End byte offset in source
    pub end: u32,
    /// Help message for fixing (optional)
    pub help: Option<CompactString>,
    /// Alternative fixes, in the order they are offered
    pub fixes: Vec<Fix>,
}

impl LintDiagnostic {
    /// Create a new diagnostic
    #[inline]
    pub fn new(
        rule_name: &'static str,
        severity: Severity,
        message: impl Into<CompactString>,
        start: u32,
        end: u32,
    ) -> Self {
        Self {
            rule_name,
            severity,
            message: message.into(),
            start,
            end,
            help: None,
            fixes: Vec::new(),
        }
    }

    /// Create a new error diagnostic
    #[inline]
    pub fn error(
        rule_name: &'static str,
        message: impl Into<CompactString>,
        start: u32,
        end: u32,
    ) -> Self {
        Self::new(rule_name, Severity::Error, message, start, end)
    }

    /// Create a new warning diagnostic
    #[inline]
    pub fn warn(
        rule_name: &'static str,
        message: impl Into<CompactString>,
        start: u32,
        end: u32,
    ) -> Self {
        Self::new(rule_name, Severity::Warning, message, start, end)
    }

    /// Add a help message
    #[inline]
    pub fn with_help(mut self, help: impl Into<CompactString>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Add an alternative fix for this diagnostic
    #[inline]
    pub fn with_fix(mut self, fix: Fix) -> Self {
        self.fixes.push(fix);
        self
    }

    /// Check if this diagnostic has a fix
    #[inline]
    pub fn has_fix(&self) -> bool {
        !self.fixes.is_empty()
    }

    /// Find a fix by label
    #[inline]
    pub fn fix(&self, label: &str) -> Option<&Fix> {
        self.fixes.iter().find(|f| f.label == label)
    }

    /// Convert to OxcDiagnostic for rich rendering
    pub fn into_oxc_diagnostic(self) -> OxcDiagnostic {
        let mut diag = match self.severity {
            Severity::Error => OxcDiagnostic::error(self.message.to_string()),
            Severity::Warning => OxcDiagnostic::warn(self.message.to_string()),
        };

        // Add primary label
        diag = diag.with_label(Span::new(self.start, self.end));

        if let Some(help) = self.help {
            diag = diag.with_help(help.to_string());
        } else if !self.fixes.is_empty() {
            let labels: Vec<&str> = self.fixes.iter().map(|f| f.label).collect();
            diag = diag.with_help(format!("Fixes available: {}", labels.join(", ")));
        }

        diag
    }
}

/// Apply one fix per diagnostic to `source`.
///
/// Picks the fix labelled `label` when given, the first fix otherwise. Fixes
/// whose edits overlap an already chosen one are skipped. Returns the new
/// source and the number of applied fixes.
pub fn apply_fixes(source: &str, diagnostics: &[LintDiagnostic], label: Option<&str>) -> (String, usize) {
    let mut chosen: Vec<&TextEdit> = Vec::new();
    let mut applied = 0;

    for diagnostic in diagnostics {
        let fix = match label {
            Some(label) => diagnostic.fix(label),
            None => diagnostic.fixes.first(),
        };
        let Some(fix) = fix else {
            continue;
        };
        let overlaps = fix.edits.iter().any(|edit| {
            chosen
                .iter()
                .any(|other| edit.start < other.end && other.start < edit.end)
        });
        if overlaps {
            continue;
        }
        chosen.extend(fix.edits.iter());
        applied += 1;
    }

    (apply_edits(source, chosen), applied)
}

/// Summary of lint results
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintSummary {
    pub error_count: usize,
    pub warning_count: usize,
    pub file_count: usize,
}

impl LintSummary {
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}
