//! Screenshots command - List and manage reference screenshots

use clap::{Args, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use terra_canon::{
    delete_screenshots, rename_screenshots, replace_reference_with_latest, ActionReport,
    ScreenshotDiff, ScreenshotError, ScreenshotGroup, ScreenshotIndex,
};
use terra_carton::naming::SCREENSHOT_EXTENSION;
use terra_patina::{find_unused_screenshots, UnusedReason};

use crate::config::Project;

#[derive(Args)]
pub struct ScreenshotsArgs {
    /// Project directory containing terra.config.json
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: ScreenshotsCommand,
}

#[derive(Subcommand)]
pub enum ScreenshotsCommand {
    /// List screenshots per spec
    List {
        /// Only list the spec with this id (e.g. `nested/Button-spec`)
        #[arg(long)]
        spec: Option<String>,
    },

    /// Print screenshot counts
    Stats,

    /// List reference screenshots no validation uses
    Unused,

    /// Rename every reference image of a screenshot
    Rename {
        spec: String,
        name: String,
        new_name: String,
    },

    /// Delete every image of a screenshot
    Delete {
        spec: String,
        name: String,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Pair every reference image of a screenshot with its latest counterpart
    Diffs { spec: String, name: String },

    /// Replace the reference images of a screenshot with the latest ones
    Accept { spec: String, name: String },
}

pub fn run(args: ScreenshotsArgs) {
    let project = Project::load(args.config.as_deref());
    let Some(wdio_root) = project.wdio_root.as_deref() else {
        eprintln!(
            "No wdio root found in {} (looked for {:?})",
            project.root.display(),
            project.settings.wdio_root_paths
        );
        std::process::exit(1);
    };
    let index = ScreenshotIndex::scan(wdio_root, project.flavor);

    let outcome = match args.command {
        ScreenshotsCommand::List { spec } => {
            list(&index, spec.as_deref());
            Ok(())
        }
        ScreenshotsCommand::Stats => {
            stats(&index);
            Ok(())
        }
        ScreenshotsCommand::Unused => {
            unused(&index, &project);
            Ok(())
        }
        ScreenshotsCommand::Rename {
            spec,
            name,
            new_name,
        } => group(&index, &spec, &name)
            .and_then(|group| rename_screenshots(&group, &new_name))
            .map(|report| print_report("Renamed", &report, wdio_root)),
        ScreenshotsCommand::Delete { spec, name, yes } => group(&index, &spec, &name).map(|group| {
            let ask = project.settings.show_confirmation_before_screenshot_deletion && !yes;
            if ask && !confirm(&format!("Delete all images of {} in {}?", group.name, spec)) {
                println!("Nothing deleted");
                return;
            }
            print_report("Deleted", &delete_screenshots(&group), wdio_root);
        }),
        ScreenshotsCommand::Diffs { spec, name } => group(&index, &spec, &name).map(|group| {
            diffs(&index, &group, wdio_root);
        }),
        ScreenshotsCommand::Accept { spec, name } => group(&index, &spec, &name)
            .and_then(|group| replace_reference_with_latest(&group))
            .map(|report| print_report("Accepted", &report, wdio_root)),
    };

    if let Err(e) = outcome {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

/// Screenshot file name with the `.png` extension.
fn file_name(name: &str) -> String {
    if name.ends_with(SCREENSHOT_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{SCREENSHOT_EXTENSION}")
    }
}

fn group<'a>(
    index: &'a ScreenshotIndex,
    spec: &str,
    name: &str,
) -> Result<ScreenshotGroup<'a>, ScreenshotError> {
    let name = file_name(name);
    index
        .group(spec, &name)
        .ok_or(ScreenshotError::NothingToProcess {
            variant: "matching",
            name,
        })
}

fn confirm(question: &str) -> bool {
    print!("{} [y/N] ", question);
    let _ = std::io::stdout().flush();
    let mut answer = String::new();
    if std::io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

fn relative<'p>(path: &'p Path, root: &Path) -> std::path::Display<'p> {
    path.strip_prefix(root).unwrap_or(path).display()
}

fn print_report(action: &str, report: &ActionReport, root: &Path) {
    for path in &report.succeeded {
        println!("{} {}", action, relative(path, root));
    }
    for path in &report.failed {
        eprintln!("Failed: {}", relative(path, root));
    }
    if !report.is_complete() {
        std::process::exit(1);
    }
}

fn list(index: &ScreenshotIndex, only: Option<&str>) {
    for spec in index
        .specs()
        .into_iter()
        .filter(|spec| only.map_or(true, |id| spec.spec_id == id))
    {
        let marker = if spec.spec_file.is_some() { "" } else { " (no spec file)" };
        let references = index.references_for(spec.spec_id).count();
        println!("{}{}  ({} reference images)", spec.spec_id, marker, references);
        for group in &spec.screenshots {
            println!(
                "  {}  reference: {}, latest: {}, diff: {}",
                group.name,
                group.references.len(),
                group.latests.len(),
                group.diffs.len()
            );
        }
    }
}

fn diffs(index: &ScreenshotIndex, group: &ScreenshotGroup<'_>, root: &Path) {
    for diff in ScreenshotDiff::for_group(index, group) {
        match diff.latest {
            Some(latest) => println!(
                "{}  ->  {}",
                relative(&diff.original.path, root),
                relative(&latest.path, root)
            ),
            None => println!("{}  (no latest image)", relative(&diff.original.path, root)),
        }
    }
}

fn stats(index: &ScreenshotIndex) {
    let stats = index.statistics();
    println!("Specs:       {}", stats.spec_count);
    println!("Screenshots: {}", stats.screenshot_count);
    println!("Reference:   {}", stats.reference_count);
    println!("Latest:      {}", stats.latest_count);
    println!("Diff:        {}", stats.diff_count);
}

fn unused(index: &ScreenshotIndex, project: &Project) {
    let unused = find_unused_screenshots(index, &project.settings);
    for screenshot in &unused {
        let reason = match screenshot.reason {
            UnusedReason::NoSpecFile => "spec file does not exist",
            UnusedReason::NoLinkedValidation => "no validation uses it",
        };
        println!("{}/{}  ({})", screenshot.spec_id, screenshot.name, reason);
    }
    println!("\n{} unused screenshots", unused.len());
}
