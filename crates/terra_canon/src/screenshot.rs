//! A single screenshot image on disk.

use std::path::{Component, Path, PathBuf};

use terra_carton::naming::SCREENSHOT_EXTENSION;
use terra_carton::Flavor;

use crate::context::ScreenshotContext;
use crate::folders::{Variant, SNAPSHOTS_DIR};

/// Suffix of spec folder names inside a context directory.
const SPEC_FOLDER_SUFFIX: &str = "-spec";

/// A screenshot file whose path fits the wdio snapshot layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotFile {
    /// Full path of the image
    pub path: PathBuf,
    pub variant: Variant,
    pub context: ScreenshotContext,
    /// Spec file id relative to the wdio root, e.g. `nested/Button-spec`
    pub spec_id: String,
    /// Spec folder name, e.g. `Button-spec`
    pub spec_folder: String,
    /// File name, e.g. `Button[default].png`
    pub name: String,
    /// The `__snapshots__` directory this file lives under
    snapshots_dir: PathBuf,
    /// Path below the variant directory
    variant_relative: PathBuf,
}

impl ScreenshotFile {
    /// Parse a screenshot path found under `wdio_root`.
    ///
    /// Returns `None` for anything that does not fit
    /// `<nested…>/__snapshots__/<variant>/<context…>/<spec>-spec/<name>.png`.
    pub fn parse(wdio_root: &Path, path: &Path, flavor: Flavor) -> Option<Self> {
        let relative = path.strip_prefix(wdio_root).ok()?;

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_str()?),
                _ => return None,
            }
        }

        let marker = segments.iter().position(|s| *s == SNAPSHOTS_DIR)?;
        let (nested, below) = (&segments[..marker], &segments[marker + 1..]);

        let context_len = ScreenshotContext::segment_count(flavor);
        if below.len() != context_len + 3 {
            return None;
        }

        let variant = Variant::from_dir_name(below[0])?;
        let context = ScreenshotContext::parse(&below[1..=context_len], flavor)?;
        let spec_folder = below[context_len + 1];
        let name = below[context_len + 2];

        if !spec_folder.ends_with(SPEC_FOLDER_SUFFIX) || !name.ends_with(SCREENSHOT_EXTENSION) {
            return None;
        }

        let spec_id = if nested.is_empty() {
            spec_folder.to_string()
        } else {
            format!("{}/{}", nested.join("/"), spec_folder)
        };

        let snapshots_dir = nested
            .iter()
            .fold(wdio_root.to_path_buf(), |dir, s| dir.join(s))
            .join(SNAPSHOTS_DIR);
        let variant_relative = below[1..].iter().collect::<PathBuf>();

        Some(Self {
            path: path.to_path_buf(),
            variant,
            context,
            spec_id,
            spec_folder: spec_folder.to_string(),
            name: name.to_string(),
            snapshots_dir,
            variant_relative,
        })
    }

    /// Path of the same screenshot in another variant directory.
    ///
    /// The returned file may not exist.
    pub fn counterpart_path(&self, variant: Variant) -> PathBuf {
        self.snapshots_dir
            .join(variant.dir_name())
            .join(&self.variant_relative)
    }

    /// Path relative to the variant directory.
    #[inline]
    pub fn variant_relative_path(&self) -> &Path {
        &self.variant_relative
    }

    /// Screenshot name without the `.png` extension.
    #[inline]
    pub fn display_name(&self) -> &str {
        self.name
            .strip_suffix(SCREENSHOT_EXTENSION)
            .unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toolkit_path() {
        let root = Path::new("/p/test/wdio");
        let path = root.join("__snapshots__/reference/en/chrome_huge/MySpec-spec/My_Spec[default].png");
        let file = ScreenshotFile::parse(root, &path, Flavor::Toolkit).unwrap();

        assert_eq!(file.variant, Variant::Reference);
        assert_eq!(file.context.to_string(), "en / chrome / huge");
        assert_eq!(file.spec_id, "MySpec-spec");
        assert_eq!(file.spec_folder, "MySpec-spec");
        assert_eq!(file.name, "My_Spec[default].png");
        assert_eq!(file.display_name(), "My_Spec[default]");
    }

    #[test]
    fn test_parse_nested_functional_testing_path() {
        let root = Path::new("/p/tests/wdio");
        let path = root.join(
            "components/button/__snapshots__/latest/terra-default-theme/en/firefox_tiny/Button-spec/primary.png",
        );
        let file = ScreenshotFile::parse(root, &path, Flavor::FunctionalTesting).unwrap();

        assert_eq!(file.variant, Variant::Latest);
        assert_eq!(file.spec_id, "components/button/Button-spec");
        assert_eq!(file.spec_folder, "Button-spec");
        assert_eq!(
            file.counterpart_path(Variant::Reference),
            root.join(
                "components/button/__snapshots__/reference/terra-default-theme/en/firefox_tiny/Button-spec/primary.png"
            )
        );
    }

    #[test]
    fn test_malformed_paths_are_rejected() {
        let root = Path::new("/p/test/wdio");
        for relative in [
            "__snapshots__/reference/en/MySpec-spec/a.png",
            "__snapshots__/expected/en/chrome_huge/MySpec-spec/a.png",
            "__snapshots__/reference/en/chrome_huge/MySpec/a.png",
            "__snapshots__/reference/en/chrome_huge/MySpec-spec/a.jpg",
            "screenshots/reference/en/chrome_huge/MySpec-spec/a.png",
        ] {
            assert_eq!(
                ScreenshotFile::parse(root, &root.join(relative), Flavor::Toolkit),
                None,
                "{relative}"
            );
        }
        assert_eq!(
            ScreenshotFile::parse(
                root,
                Path::new("/elsewhere/__snapshots__/reference/en/chrome_huge/A-spec/a.png"),
                Flavor::Toolkit
            ),
            None
        );
    }
}
