//! Navigate command - Find the validation a screenshot belongs to

use clap::Args;
use std::path::PathBuf;
use terra_canon::{locate_screenshot_root, ScreenshotFile, ScreenshotIndex};
use terra_patina::navigate_to_usage;

use crate::config::Project;

#[derive(Args)]
pub struct NavigateArgs {
    /// Path of a screenshot image
    pub screenshot: PathBuf,

    /// Project directory containing terra.config.json
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: NavigateArgs) {
    let project = Project::load(args.config.as_deref());
    let path = if args.screenshot.is_absolute() {
        args.screenshot
    } else {
        std::env::current_dir().unwrap_or_default().join(&args.screenshot)
    };

    let screenshot = locate_screenshot_root(&path, &project.settings.wdio_root_paths)
        .and_then(|root| {
            ScreenshotFile::parse(&root, &path, project.flavor).map(|file| (root, file))
        });
    let Some((wdio_root, screenshot)) = screenshot else {
        eprintln!("{} is not a screenshot of a wdio root", path.display());
        std::process::exit(1);
    };

    // Navigation only needs the root and flavor
    let index = ScreenshotIndex::from_files(&wdio_root, project.flavor, Vec::new());
    match navigate_to_usage(&index, &screenshot) {
        Ok(target) => println!(
            "{}:{}:{}",
            target.spec_file.display(),
            target.line,
            target.column
        ),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
