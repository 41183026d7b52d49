//! Rule trait and registry for lint rules.

use crate::context::LintContext;
use crate::diagnostic::Severity;
use crate::visitor::{SpecModel, TerraCall};

/// Rule category for organization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleCategory {
    /// `Terra.describeViewports` argument checks
    Viewports,
    /// Structure of Terra describe helpers
    Helpers,
    /// Validation calls and their screenshots
    Screenshots,
    /// Migration away from deprecated helpers
    Migration,
}

/// Rule metadata
pub struct RuleMeta {
    /// Rule name (e.g., "terra/describe-viewports")
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Rule category
    pub category: RuleCategory,
    /// Whether rule is auto-fixable
    pub fixable: bool,
    /// Default severity
    pub default_severity: Severity,
}

/// Rule trait for implementing lint rules
///
/// The linter calls `check_call` once for every Terra call of the spec file in
/// source order, then `check_spec` once for checks spanning several calls.
pub trait Rule: Send + Sync {
    /// Get rule metadata
    fn meta(&self) -> &'static RuleMeta;

    /// Called for each Terra call
    #[allow(unused_variables)]
    fn check_call<'a>(
        &self,
        ctx: &mut LintContext<'_>,
        spec: &SpecModel<'a>,
        call: &TerraCall<'a>,
    ) {
    }

    /// Called once per spec file
    #[allow(unused_variables)]
    fn check_spec(&self, ctx: &mut LintContext<'_>, spec: &SpecModel<'_>) {}
}

/// Registry holding all enabled lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Register a rule
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Add a rule (alias for register)
    pub fn add(&mut self, rule: Box<dyn Rule>) {
        self.register(rule);
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }

    /// Find a registered rule by name
    pub fn get(&self, name: &str) -> Option<&dyn Rule> {
        self.rules
            .iter()
            .find(|r| r.meta().name == name)
            .map(|r| r.as_ref())
    }

    /// Create registry with the non-blocking rule set
    ///
    /// This includes:
    /// - **Viewport rules** - vocabulary, order and duplication of viewports
    /// - **Helper rules** - nesting of Terra describe helpers
    /// - **Screenshot rules** - validation properties and screenshot files
    /// - **Migration rules** - `Terra.it` replacement
    pub fn with_recommended() -> Self {
        let mut registry = Self::new();

        // ============================================
        // Viewport Rules
        // ============================================

        registry.register(Box::new(crate::rules::viewports::DescribeViewports));
        registry.register(Box::new(crate::rules::viewports::NoDuplicateDescribeViewports));
        registry.register(Box::new(crate::rules::viewports::NoNestedDescribeViewports));

        // ============================================
        // Helper Rules
        // ============================================

        registry.register(Box::new(crate::rules::helpers::NoNestedDescribeHelpers));

        // ============================================
        // Screenshot Rules
        // ============================================
        // Rules that need screenshot files are no-ops without a wdio root.

        registry.register(Box::new(crate::rules::screenshot::MismatchTolerance));
        registry.register(Box::new(crate::rules::screenshot::ValidValidationProperties));
        registry.register(Box::new(crate::rules::screenshot::NoGlobalSelector));
        registry.register(Box::new(crate::rules::screenshot::RequireScreenshotName));
        registry.register(Box::new(crate::rules::screenshot::MissingScreenshot));
        registry.register(Box::new(crate::rules::screenshot::DuplicateScreenshotName));
        registry.register(Box::new(crate::rules::screenshot::PreferElementValidation));

        // ============================================
        // Migration Rules
        // ============================================

        registry.register(Box::new(crate::rules::migration::ReplaceTerraIt));

        registry
    }

    /// Create registry with the checks that would fail test execution
    pub fn with_blocking() -> Self {
        let mut registry = Self::new();

        registry.register(Box::new(crate::rules::viewports::DescribeViewportsBlocking));
        registry.register(Box::new(crate::rules::screenshot::MismatchToleranceBlocking));

        registry
    }

    /// Create registry with all available rules
    pub fn with_all() -> Self {
        let mut registry = Self::with_recommended();
        for rule in Self::with_blocking().rules {
            registry.register(rule);
        }
        registry
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::with_recommended()
    }
}
