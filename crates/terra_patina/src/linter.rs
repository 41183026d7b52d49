//! Main linter entry point.
//!
//! Parses spec files with OXC, builds the spec model once and runs every
//! enabled rule over it.

use std::path::Path;
use std::sync::Arc;

use oxc_allocator::Allocator;
use oxc_parser::Parser;
use oxc_span::SourceType;
use terra_canon::ScreenshotIndex;
use terra_carton::naming::is_spec_file_name;
use terra_carton::{Flavor, FxHashSet, Settings};

use crate::context::{LintContext, ScreenshotScope};
use crate::diagnostic::{LintDiagnostic, LintSummary};
use crate::rule::RuleRegistry;
use crate::visitor::SpecModel;

/// Lint result for a single file
#[derive(Debug, Clone)]
pub struct LintResult {
    /// Filename that was linted
    pub filename: String,
    /// Collected diagnostics, ordered by position
    pub diagnostics: Vec<LintDiagnostic>,
    /// Number of errors
    pub error_count: usize,
    /// Number of warnings
    pub warning_count: usize,
}

impl LintResult {
    fn empty(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            diagnostics: Vec::new(),
            error_count: 0,
            warning_count: 0,
        }
    }

    /// Check if there are any errors
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if there are any diagnostics
    #[inline]
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}

/// Main linter struct.
///
/// A linter holds everything a pass reads but never changes: the rules, a
/// settings snapshot, the flavor, and optionally the screenshot index and the
/// global selector of the project.
pub struct Linter {
    registry: RuleRegistry,
    settings: Arc<Settings>,
    flavor: Flavor,
    screenshots: Option<Arc<ScreenshotIndex>>,
    global_selector: Option<String>,
    /// Estimated initial allocator capacity (in bytes)
    initial_capacity: usize,
    /// Optional set of enabled rule names (if None, all rules are enabled)
    enabled_rules: Option<FxHashSet<String>>,
}

impl Linter {
    /// Default initial capacity for the arena (64KB)
    const DEFAULT_INITIAL_CAPACITY: usize = 64 * 1024;

    /// Create a new linter with recommended rules
    #[inline]
    pub fn new() -> Self {
        Self::with_registry(RuleRegistry::with_recommended())
    }

    /// Create a linter with a custom rule registry
    #[inline]
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self {
            registry,
            settings: Arc::new(Settings::default()),
            flavor: Flavor::default(),
            screenshots: None,
            global_selector: None,
            initial_capacity: Self::DEFAULT_INITIAL_CAPACITY,
            enabled_rules: None,
        }
    }

    /// Set the settings snapshot
    #[inline]
    pub fn with_settings(mut self, settings: impl Into<Arc<Settings>>) -> Self {
        self.settings = settings.into();
        self
    }

    /// Set the Terra flavor used for naming and option checks
    #[inline]
    pub fn with_flavor(mut self, flavor: Flavor) -> Self {
        self.flavor = flavor;
        self
    }

    /// Set the screenshot index of the project
    #[inline]
    pub fn with_screenshots(mut self, index: Option<Arc<ScreenshotIndex>>) -> Self {
        self.screenshots = index;
        self
    }

    /// Set the global `terra.selector` of the project
    #[inline]
    pub fn with_global_selector(mut self, selector: Option<String>) -> Self {
        self.global_selector = selector;
        self
    }

    /// Set the initial allocator capacity
    #[inline]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Set enabled rules (if None, all rules are enabled)
    #[inline]
    pub fn with_enabled_rules(mut self, rules: Option<Vec<String>>) -> Self {
        self.enabled_rules = rules.map(|r| r.into_iter().collect());
        self
    }

    /// Check if a rule is enabled
    #[inline]
    pub fn is_rule_enabled(&self, rule_name: &str) -> bool {
        match &self.enabled_rules {
            Some(set) => set.contains(rule_name),
            None => true,
        }
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// Lint a spec file source
    ///
    /// Files whose name does not follow the spec file convention, and files
    /// that fail to parse, produce no diagnostics.
    #[inline]
    pub fn lint_spec(&self, source: &str, filename: &str) -> LintResult {
        let capacity = (source.len() * 4).max(self.initial_capacity);
        let allocator = Allocator::with_capacity(capacity);
        self.lint_spec_with_allocator(&allocator, source, filename)
    }

    /// Lint a spec file with a provided allocator (for reuse)
    pub fn lint_spec_with_allocator(
        &self,
        allocator: &Allocator,
        source: &str,
        filename: &str,
    ) -> LintResult {
        let path = Path::new(filename);
        let is_spec = path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(is_spec_file_name);
        if !is_spec {
            return LintResult::empty(filename);
        }

        // Every rule starts from a Terra call
        if memchr::memmem::find(source.as_bytes(), b"Terra").is_none() {
            return LintResult::empty(filename);
        }

        let source_type = SourceType::from_path(path).unwrap_or_default();
        let ret = Parser::new(allocator, source, source_type).parse();
        if ret.panicked || !ret.errors.is_empty() {
            tracing::debug!("Skipping {}: {} parse errors", filename, ret.errors.len());
            return LintResult::empty(filename);
        }
        let program = allocator.alloc(ret.program);
        let spec = SpecModel::build(program);

        let spec_folder = path.file_stem().and_then(|stem| stem.to_str());
        let scope = self
            .screenshots
            .as_deref()
            .zip(spec_folder)
            .map(|(index, spec_folder)| ScreenshotScope { index, spec_folder });

        let mut ctx = LintContext::new(source, filename, &self.settings, self.flavor)
            .with_screenshots(scope)
            .with_global_selector(self.global_selector.as_deref());
        ctx.set_enabled_rules(self.enabled_rules.clone());

        let rules = self.registry.rules();
        for call in &spec.calls {
            for rule in rules {
                let name = rule.meta().name;
                if ctx.is_rule_enabled(name) {
                    ctx.current_rule = name;
                    rule.check_call(&mut ctx, &spec, call);
                }
            }
        }
        for rule in rules {
            let name = rule.meta().name;
            if ctx.is_rule_enabled(name) {
                ctx.current_rule = name;
                rule.check_spec(&mut ctx, &spec);
            }
        }

        let error_count = ctx.error_count();
        let warning_count = ctx.warning_count();
        let mut diagnostics = ctx.into_diagnostics();
        diagnostics.sort_by_key(|d| (d.start, d.end));

        LintResult {
            filename: filename.to_string(),
            diagnostics,
            error_count,
            warning_count,
        }
    }

    /// Lint multiple files and aggregate results
    pub fn lint_files(&self, files: &[(String, String)]) -> (Vec<LintResult>, LintSummary) {
        let mut results = Vec::with_capacity(files.len());
        let mut summary = LintSummary::default();

        // Reuse allocator across files
        let mut allocator = Allocator::with_capacity(self.initial_capacity);

        for (filename, source) in files {
            let result = self.lint_spec_with_allocator(&allocator, source, filename);
            summary.error_count += result.error_count;
            summary.warning_count += result.warning_count;
            results.push(result);

            allocator.reset();
        }

        summary.file_count = files.len();
        (results, summary)
    }

    /// Get all registered rules
    #[inline]
    pub fn rules(&self) -> &[Box<dyn crate::rule::Rule>] {
        self.registry.rules()
    }
}

impl Default for Linter {
    fn default() -> Self {
        Self::new()
    }
}
