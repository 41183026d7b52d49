//! Screenshot index: one scan of a wdio root, queried many times.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use terra_carton::Flavor;
use walkdir::WalkDir;

use crate::folders::{spec_file_for, Variant};
use crate::screenshot::ScreenshotFile;

/// Which variants [`ScreenshotIndex::collect`] returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectMode {
    /// Reference, latest and diff images
    AllVariants,
    /// Reference images only, sorted by context
    ReferenceOnly,
}

/// All screenshots found under a wdio root.
#[derive(Debug, Clone)]
pub struct ScreenshotIndex {
    wdio_root: PathBuf,
    flavor: Flavor,
    files: Vec<ScreenshotFile>,
}

/// Screenshots of one spec sharing a name.
#[derive(Debug, Clone)]
pub struct ScreenshotGroup<'a> {
    pub name: &'a str,
    pub references: Vec<&'a ScreenshotFile>,
    pub latests: Vec<&'a ScreenshotFile>,
    pub diffs: Vec<&'a ScreenshotFile>,
}

impl<'a> ScreenshotGroup<'a> {
    fn new(name: &'a str) -> Self {
        Self {
            name,
            references: Vec::new(),
            latests: Vec::new(),
            diffs: Vec::new(),
        }
    }

    fn push(&mut self, file: &'a ScreenshotFile) {
        match file.variant {
            Variant::Reference => self.references.push(file),
            Variant::Latest => self.latests.push(file),
            Variant::Diff => self.diffs.push(file),
        }
    }

    /// Files of one variant.
    pub fn files(&self, variant: Variant) -> &[&'a ScreenshotFile] {
        match variant {
            Variant::Reference => &self.references,
            Variant::Latest => &self.latests,
            Variant::Diff => &self.diffs,
        }
    }

    #[inline]
    pub fn has_latest(&self) -> bool {
        !self.latests.is_empty()
    }

    #[inline]
    pub fn has_diff(&self) -> bool {
        !self.diffs.is_empty()
    }
}

/// Screenshots of one spec file.
#[derive(Debug, Clone)]
pub struct SpecScreenshots<'a> {
    pub spec_id: &'a str,
    pub spec_folder: &'a str,
    /// The spec file, when it still exists
    pub spec_file: Option<PathBuf>,
    /// Screenshot groups sorted by name
    pub screenshots: Vec<ScreenshotGroup<'a>>,
}

/// Screenshot counts of an index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenshotStatistics {
    pub spec_count: usize,
    pub screenshot_count: usize,
    pub reference_count: usize,
    pub latest_count: usize,
    pub diff_count: usize,
}

impl ScreenshotIndex {
    /// Scan every screenshot under `wdio_root`.
    ///
    /// A missing root yields an empty index. Paths that do not fit the
    /// snapshot layout and unreadable directories are skipped.
    pub fn scan(wdio_root: &Path, flavor: Flavor) -> Self {
        let mut files = Vec::new();

        if !wdio_root.is_dir() {
            tracing::debug!("wdio root {} does not exist", wdio_root.display());
            return Self::from_files(wdio_root, flavor, files);
        }

        let walker = WalkDir::new(wdio_root).into_iter().filter_entry(|e| {
            if e.path() == wdio_root {
                return true;
            }
            let name = e.file_name().to_string_lossy();
            !name.starts_with('.') && name != "node_modules"
        });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().is_file()
                || entry.path().extension().and_then(|e| e.to_str()) != Some("png")
            {
                continue;
            }

            match ScreenshotFile::parse(wdio_root, entry.path(), flavor) {
                Some(file) => files.push(file),
                None => tracing::debug!(
                    "Skipping {}: not a screenshot path",
                    entry.path().display()
                ),
            }
        }

        tracing::debug!(
            "Indexed {} screenshots under {}",
            files.len(),
            wdio_root.display()
        );
        Self::from_files(wdio_root, flavor, files)
    }

    /// Build an index from already parsed files.
    pub fn from_files(wdio_root: &Path, flavor: Flavor, mut files: Vec<ScreenshotFile>) -> Self {
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Self {
            wdio_root: wdio_root.to_path_buf(),
            flavor,
            files,
        }
    }

    #[inline]
    pub fn wdio_root(&self) -> &Path {
        &self.wdio_root
    }

    #[inline]
    pub fn flavor(&self) -> Flavor {
        self.flavor
    }

    /// All indexed files, sorted by path.
    #[inline]
    pub fn files(&self) -> &[ScreenshotFile] {
        &self.files
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Find an indexed file by path.
    pub fn get(&self, path: &Path) -> Option<&ScreenshotFile> {
        self.files
            .binary_search_by(|f| f.path.as_path().cmp(path))
            .ok()
            .map(|i| &self.files[i])
    }

    /// Screenshots named `name` in spec folder `spec_folder`.
    ///
    /// Folders above `__snapshots__` do not take part in matching.
    pub fn collect(&self, spec_folder: &str, name: &str, mode: CollectMode) -> Vec<&ScreenshotFile> {
        let mut matches: Vec<&ScreenshotFile> = self
            .files
            .iter()
            .filter(|f| f.spec_folder == spec_folder && f.name == name)
            .filter(|f| mode == CollectMode::AllVariants || f.variant == Variant::Reference)
            .collect();

        match mode {
            CollectMode::ReferenceOnly => {
                matches.sort_by_cached_key(|f| f.context.to_string());
            }
            CollectMode::AllVariants => {
                matches.sort_by(|a, b| {
                    a.variant
                        .cmp(&b.variant)
                        .then_with(|| a.context.cmp(&b.context))
                });
            }
        }
        matches
    }

    /// Check whether at least one reference image named `name` exists for the spec folder.
    pub fn has_reference(&self, spec_folder: &str, name: &str) -> bool {
        self.files.iter().any(|f| {
            f.variant == Variant::Reference && f.spec_folder == spec_folder && f.name == name
        })
    }

    /// Reference images of the spec with id `spec_id`.
    pub fn references_for<'a>(
        &'a self,
        spec_id: &'a str,
    ) -> impl Iterator<Item = &'a ScreenshotFile> + 'a {
        self.files
            .iter()
            .filter(move |f| f.variant == Variant::Reference && f.spec_id == spec_id)
    }

    /// Group screenshots by spec and name, sorted alphabetically on both levels.
    pub fn specs(&self) -> Vec<SpecScreenshots<'_>> {
        let mut specs: BTreeMap<&str, BTreeMap<&str, ScreenshotGroup<'_>>> = BTreeMap::new();

        for file in &self.files {
            specs
                .entry(file.spec_id.as_str())
                .or_default()
                .entry(file.name.as_str())
                .or_insert_with(|| ScreenshotGroup::new(&file.name))
                .push(file);
        }

        specs
            .into_iter()
            .map(|(spec_id, groups)| {
                let spec_folder = spec_id.rsplit('/').next().unwrap_or(spec_id);
                SpecScreenshots {
                    spec_id,
                    spec_folder,
                    spec_file: spec_file_for(&self.wdio_root, spec_id),
                    screenshots: groups.into_values().collect(),
                }
            })
            .collect()
    }

    /// Screenshot group of one spec and name.
    pub fn group(&self, spec_id: &str, name: &str) -> Option<ScreenshotGroup<'_>> {
        let mut group: Option<ScreenshotGroup<'_>> = None;
        for file in self
            .files
            .iter()
            .filter(|f| f.spec_id == spec_id && f.name == name)
        {
            group
                .get_or_insert_with(|| ScreenshotGroup::new(&file.name))
                .push(file);
        }
        group
    }

    /// Count specs, screenshot groups and files per variant.
    pub fn statistics(&self) -> ScreenshotStatistics {
        let specs = self.specs();
        let mut stats = ScreenshotStatistics {
            spec_count: specs.len(),
            screenshot_count: specs.iter().map(|s| s.screenshots.len()).sum(),
            ..ScreenshotStatistics::default()
        };

        for file in &self.files {
            match file.variant {
                Variant::Reference => stats.reference_count += 1,
                Variant::Latest => stats.latest_count += 1,
                Variant::Diff => stats.diff_count += 1,
            }
        }
        stats
    }
}
