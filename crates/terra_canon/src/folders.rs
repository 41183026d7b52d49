//! Folder conventions of Terra wdio projects.

use std::path::{Path, PathBuf};

use terra_carton::Flavor;

/// Directory under which all screenshot variants live.
pub const SNAPSHOTS_DIR: &str = "__snapshots__";

/// Extensions a spec file may have, in lookup order.
pub const SPEC_FILE_EXTENSIONS: [&str; 3] = ["js", "jsx", "ts"];

/// Screenshot variant directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variant {
    /// Baseline images
    Reference,
    /// Images from the most recent run
    Latest,
    /// Computed differences between the two
    Diff,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Reference, Variant::Latest, Variant::Diff];

    /// Name of the variant directory.
    #[inline]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Variant::Reference => "reference",
            Variant::Latest => "latest",
            Variant::Diff => "diff",
        }
    }

    /// Parse a variant directory name.
    #[inline]
    pub fn from_dir_name(name: &str) -> Option<Self> {
        match name {
            "reference" => Some(Variant::Reference),
            "latest" => Some(Variant::Latest),
            "diff" => Some(Variant::Diff),
            _ => None,
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Find the wdio root of a project: the first configured candidate that exists.
pub fn locate_wdio_root(project_root: &Path, candidates: &[String]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(|candidate| project_root.join(candidate))
        .find(|path| path.is_dir())
}

/// Find the wdio root a spec file belongs to by searching upward from it.
///
/// A directory qualifies when its trailing path components equal one of the
/// configured candidates, e.g. `…/my-project/tests/wdio` for `tests/wdio`.
pub fn locate_screenshot_root(spec_file: &Path, candidates: &[String]) -> Option<PathBuf> {
    spec_file
        .ancestors()
        .skip(1)
        .find(|dir| {
            candidates
                .iter()
                .any(|candidate| !candidate.is_empty() && dir.ends_with(candidate))
                && dir.is_dir()
        })
        .map(Path::to_path_buf)
}

/// Identifier of a spec file relative to the wdio root: the relative path
/// without extension, `/`-separated (e.g. `nested/Button-spec`).
pub fn spec_id_for(wdio_root: &Path, spec_file: &Path) -> Option<String> {
    let relative = spec_file.strip_prefix(wdio_root).ok()?;
    let stem = relative.file_stem()?.to_str()?;

    let mut segments: Vec<&str> = Vec::new();
    if let Some(parent) = relative.parent() {
        for component in parent.components() {
            segments.push(component.as_os_str().to_str()?);
        }
    }
    segments.push(stem);
    Some(segments.join("/"))
}

/// Find the spec file with the given id, trying every supported extension.
pub fn spec_file_for(wdio_root: &Path, spec_id: &str) -> Option<PathBuf> {
    SPEC_FILE_EXTENSIONS
        .iter()
        .map(|ext| wdio_root.join(format!("{spec_id}.{ext}")))
        .find(|path| path.is_file())
}

/// Detect which Terra library a project uses from its root `package.json`.
///
/// Projects without a readable manifest are treated as terra-toolkit projects.
pub fn detect_flavor(project_root: &Path) -> Flavor {
    let manifest = project_root.join("package.json");
    let Ok(content) = std::fs::read_to_string(&manifest) else {
        return Flavor::Toolkit;
    };

    let json: serde_json::Value = match serde_json::from_str(&content) {
        Ok(json) => json,
        Err(e) => {
            tracing::warn!("Failed to parse {}: {}", manifest.display(), e);
            return Flavor::Toolkit;
        }
    };

    let depends_on_functional_testing = ["dependencies", "devDependencies"].iter().any(|key| {
        json.get(key)
            .and_then(|deps| deps.get(Flavor::FUNCTIONAL_TESTING_PACKAGE))
            .is_some()
    });

    if depends_on_functional_testing {
        Flavor::FunctionalTesting
    } else {
        Flavor::Toolkit
    }
}
