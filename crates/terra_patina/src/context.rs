//! Lint context for rule execution.

use oxc_span::Span;
use terra_canon::ScreenshotIndex;
use terra_carton::{CompactString, Flavor, FxHashSet, InspectionToggles, Settings};

use crate::diagnostic::{LintDiagnostic, Severity};
use crate::resolver::ScreenshotNameResolver;

/// Screenshots available to the spec file being linted.
#[derive(Debug, Clone, Copy)]
pub struct ScreenshotScope<'a> {
    pub index: &'a ScreenshotIndex,
    /// Spec folder name the screenshots of this file live in, e.g. `Button-spec`
    pub spec_folder: &'a str,
}

/// Lint context provides utilities for rules during execution.
pub struct LintContext<'a> {
    /// Source code being linted
    pub source: &'a str,
    /// Filename for diagnostics
    pub filename: &'a str,
    /// Settings snapshot for this pass
    pub settings: &'a Settings,
    /// Terra library the project uses
    pub flavor: Flavor,
    /// Screenshots of this spec, when a wdio root was found
    pub screenshots: Option<ScreenshotScope<'a>>,
    /// `terra.selector` from the project's `wdio.conf.js`
    pub global_selector: Option<&'a str>,
    /// Collected diagnostics
    diagnostics: Vec<LintDiagnostic>,
    /// Current rule name (set by the linter before calling rule methods)
    pub current_rule: &'static str,
    /// Enabled rule names (None means all rules are enabled)
    enabled_rules: Option<FxHashSet<String>>,
    /// Cached error count for fast access
    error_count: usize,
    /// Cached warning count for fast access
    warning_count: usize,
}

impl<'a> LintContext<'a> {
    const INITIAL_DIAGNOSTICS_CAPACITY: usize = 16;

    #[inline]
    pub fn new(source: &'a str, filename: &'a str, settings: &'a Settings, flavor: Flavor) -> Self {
        Self {
            source,
            filename,
            settings,
            flavor,
            screenshots: None,
            global_selector: None,
            diagnostics: Vec::with_capacity(Self::INITIAL_DIAGNOSTICS_CAPACITY),
            current_rule: "",
            enabled_rules: None,
            error_count: 0,
            warning_count: 0,
        }
    }

    #[inline]
    pub fn with_screenshots(mut self, screenshots: Option<ScreenshotScope<'a>>) -> Self {
        self.screenshots = screenshots;
        self
    }

    #[inline]
    pub fn with_global_selector(mut self, selector: Option<&'a str>) -> Self {
        self.global_selector = selector;
        self
    }

    /// Set enabled rules (None means all rules are enabled)
    #[inline]
    pub fn set_enabled_rules(&mut self, rules: Option<FxHashSet<String>>) {
        self.enabled_rules = rules;
    }

    /// Check if a rule is enabled
    #[inline]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        match &self.enabled_rules {
            Some(set) => set.contains(rule_name),
            None => true,
        }
    }

    /// Per-check toggles from the settings.
    #[inline]
    pub fn inspections(&self) -> &'a InspectionToggles {
        &self.settings.inspections
    }

    /// Name resolver for this file.
    #[inline]
    pub fn resolver(&self) -> ScreenshotNameResolver<'a> {
        ScreenshotNameResolver::new(self.flavor, self.source)
    }

    /// Source text of a span.
    #[inline]
    pub fn text(&self, span: Span) -> &'a str {
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or("")
    }

    /// Report a lint diagnostic
    #[inline]
    pub fn report(&mut self, diagnostic: LintDiagnostic) {
        match diagnostic.severity {
            Severity::Error => self.error_count += 1,
            Severity::Warning => self.warning_count += 1,
        }
        self.diagnostics.push(diagnostic);
    }

    /// Report an error at a span
    #[inline]
    pub fn error(&mut self, message: impl Into<CompactString>, span: Span) {
        self.report(LintDiagnostic::error(
            self.current_rule,
            message,
            span.start,
            span.end,
        ));
    }

    /// Report a warning at a span
    #[inline]
    pub fn warn(&mut self, message: impl Into<CompactString>, span: Span) {
        self.report(LintDiagnostic::warn(
            self.current_rule,
            message,
            span.start,
            span.end,
        ));
    }

    /// Report at a span with the given severity
    #[inline]
    pub fn report_with_severity(
        &mut self,
        severity: Severity,
        message: impl Into<CompactString>,
        span: Span,
    ) {
        self.report(LintDiagnostic::new(
            self.current_rule,
            severity,
            message,
            span.start,
            span.end,
        ));
    }

    /// Get collected diagnostics
    #[inline]
    pub fn into_diagnostics(self) -> Vec<LintDiagnostic> {
        self.diagnostics
    }

    /// Get reference to collected diagnostics
    #[inline]
    pub fn diagnostics(&self) -> &[LintDiagnostic] {
        &self.diagnostics
    }

    #[inline]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    #[inline]
    pub fn warning_count(&self) -> usize {
        self.warning_count
    }
}
