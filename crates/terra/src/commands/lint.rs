//! Lint command - Lint Terra spec files

use clap::Args;
use glob::glob;
use ignore::Walk;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;
use terra_canon::{locate_screenshot_root, spec_id_for, ScreenshotIndex};
use terra_carton::naming::is_spec_file_name;
use terra_carton::Flavor;
use terra_patina::{
    apply_fixes, format_results, format_summary, load_global_selector, LintResult, Linter,
    OutputFormat, RuleRegistry,
};

use crate::config::Project;

#[derive(Args)]
pub struct LintArgs {
    /// Glob pattern(s) or directories to search for spec files
    #[arg(default_value = ".")]
    pub patterns: Vec<String>,

    /// Automatically fix problems
    #[arg(long)]
    pub fix: bool,

    /// Fix variant to apply when several are offered (merged, unchanged)
    #[arg(long, requires = "fix")]
    pub fix_variant: Option<String>,

    /// Project directory containing terra.config.json
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Only run the checks that fail test execution
    #[arg(long, conflicts_with = "non_blocking")]
    pub blocking: bool,

    /// Only run the checks that do not fail test execution
    #[arg(long)]
    pub non_blocking: bool,

    /// Maximum number of warnings before failing
    #[arg(long)]
    pub max_warnings: Option<usize>,

    /// Quiet mode - only show summary
    #[arg(short, long)]
    pub quiet: bool,
}

fn is_spec_path(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(is_spec_file_name)
        && !path.components().any(|c| c.as_os_str() == "node_modules")
}

fn collect_files(patterns: &[String]) -> Vec<PathBuf> {
    patterns
        .iter()
        .flat_map(|pattern| {
            // Check if pattern contains glob characters
            if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
                glob(pattern)
                    .ok()
                    .into_iter()
                    .flatten()
                    .filter_map(|r| r.ok())
                    .filter(|p| is_spec_path(p))
                    .collect::<Vec<_>>()
            } else {
                // Use directory walking for paths (respects .gitignore)
                Walk::new(pattern)
                    .filter_map(|e| e.ok())
                    .map(|e| e.into_path())
                    .filter(|p| is_spec_path(p))
                    .collect::<Vec<_>>()
            }
        })
        .collect()
}

/// A spec file and the wdio root its screenshots live under.
struct LintTarget {
    path: PathBuf,
    wdio_root: Option<PathBuf>,
}

/// Find the wdio root of every spec file by searching upward from it.
fn lint_targets(files: Vec<PathBuf>, candidates: &[String]) -> Vec<LintTarget> {
    files
        .into_iter()
        .map(|path| {
            let absolute = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
            let wdio_root = locate_screenshot_root(&absolute, candidates);
            match wdio_root
                .as_deref()
                .and_then(|root| spec_id_for(root, &absolute).map(|id| (root, id)))
            {
                Some((root, spec_id)) => {
                    tracing::debug!("{} is spec {} of {}", path.display(), spec_id, root.display())
                }
                None => tracing::debug!("{} is outside of any wdio root", path.display()),
            }
            LintTarget { path, wdio_root }
        })
        .collect()
}

/// Scan every distinct wdio root once.
fn screenshot_indexes(
    targets: &[LintTarget],
    flavor: Flavor,
) -> BTreeMap<PathBuf, Arc<ScreenshotIndex>> {
    let mut indexes = BTreeMap::new();
    for root in targets.iter().filter_map(|t| t.wdio_root.as_ref()) {
        if !indexes.contains_key(root) {
            indexes.insert(root.clone(), Arc::new(ScreenshotIndex::scan(root, flavor)));
        }
    }
    indexes
}

fn registry(args: &LintArgs) -> RuleRegistry {
    if args.blocking {
        RuleRegistry::with_blocking()
    } else if args.non_blocking {
        RuleRegistry::with_recommended()
    } else {
        RuleRegistry::with_all()
    }
}

/// Apply fixes and write the file back, returning the fixed source.
fn fix_file(path: &Path, source: &str, result: &LintResult, label: Option<&str>) -> Option<String> {
    let (fixed, applied) = apply_fixes(source, &result.diagnostics, label);
    if applied == 0 {
        return None;
    }
    match fs::write(path, &fixed) {
        Ok(()) => {
            tracing::info!("Applied {} fixes to {}", applied, path.display());
            Some(fixed)
        }
        Err(e) => {
            eprintln!("Failed to write {}: {}", path.display(), e);
            None
        }
    }
}

pub fn run(args: LintArgs) {
    let start = Instant::now();

    let files = collect_files(&args.patterns);
    if files.is_empty() {
        eprintln!("No spec files found matching patterns: {:?}", args.patterns);
        return;
    }

    let project = Project::load(args.config.as_deref());
    let targets = lint_targets(files, &project.settings.wdio_root_paths);
    let global_selector = load_global_selector(&project.root);

    // One linter per wdio root, and one for specs outside of any
    let mut linters: BTreeMap<Option<PathBuf>, Linter> = BTreeMap::new();
    for (root, index) in std::iter::once((None, None)).chain(
        screenshot_indexes(&targets, project.flavor)
            .into_iter()
            .map(|(root, index)| (Some(root), Some(index))),
    ) {
        let linter = Linter::with_registry(registry(&args))
            .with_settings(Arc::clone(&project.settings))
            .with_flavor(project.flavor)
            .with_screenshots(index)
            .with_global_selector(global_selector.clone());
        linters.insert(root, linter);
    }

    let error_count = AtomicUsize::new(0);
    let warning_count = AtomicUsize::new(0);
    let fixed_count = AtomicUsize::new(0);

    // Lint all files in parallel and collect results
    let results: Vec<_> = targets
        .par_iter()
        .filter_map(|target| {
            let path = &target.path;
            let linter = &linters[&target.wdio_root];
            let mut source = match fs::read_to_string(path) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Failed to read {}: {}", path.display(), e);
                    return None;
                }
            };

            let filename = path.to_string_lossy().to_string();
            let mut result = linter.lint_spec(&source, &filename);

            if args.fix && result.diagnostics.iter().any(|d| d.has_fix()) {
                if let Some(fixed) = fix_file(path, &source, &result, args.fix_variant.as_deref()) {
                    fixed_count.fetch_add(1, Ordering::Relaxed);
                    source = fixed;
                    result = linter.lint_spec(&source, &filename);
                }
            }

            error_count.fetch_add(result.error_count, Ordering::Relaxed);
            warning_count.fetch_add(result.warning_count, Ordering::Relaxed);

            Some((filename, source, result))
        })
        .collect();

    let total_errors = error_count.load(Ordering::Relaxed);
    let total_warnings = warning_count.load(Ordering::Relaxed);

    // Determine output format
    let format = match args.format.as_str() {
        "json" => OutputFormat::Json,
        _ => OutputFormat::Text,
    };

    // Format and print results
    if !args.quiet || total_errors > 0 || total_warnings > 0 {
        let lint_results: Vec<_> = results.iter().map(|(_, _, r)| r).cloned().collect();
        let sources: Vec<_> = results
            .iter()
            .map(|(f, s, _)| (f.clone(), s.clone()))
            .collect();

        let output = format_results(&lint_results, &sources, format);
        if !output.trim().is_empty() {
            print!("{}", output);
        }
    }

    // Print summary
    let elapsed = start.elapsed();
    if format == OutputFormat::Text {
        println!(
            "\n{}",
            format_summary(total_errors, total_warnings, targets.len())
        );
        if args.fix {
            println!("Fixed {} files", fixed_count.load(Ordering::Relaxed));
        }
        println!("Linted {} files in {:.4?}", targets.len(), elapsed);
    }

    // Exit with appropriate code
    if total_errors > 0 {
        std::process::exit(1);
    }

    if let Some(max) = args.max_warnings {
        if total_warnings > max {
            eprintln!("\nToo many warnings ({} > max {})", total_warnings, max);
            std::process::exit(1);
        }
    }
}
