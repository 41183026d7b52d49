//! Reference/latest pairing for side-by-side review.

use crate::folders::Variant;
use crate::index::{ScreenshotGroup, ScreenshotIndex};
use crate::screenshot::ScreenshotFile;

/// An original screenshot and its counterpart from the latest run, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenshotDiff<'a> {
    pub original: &'a ScreenshotFile,
    pub latest: Option<&'a ScreenshotFile>,
}

impl<'a> ScreenshotDiff<'a> {
    /// Pair `original` with the latest image at the same relative path.
    pub fn for_file(index: &'a ScreenshotIndex, original: &'a ScreenshotFile) -> Self {
        let latest = index.get(&original.counterpart_path(Variant::Latest));
        Self { original, latest }
    }

    /// Pair every reference image of a group.
    pub fn for_group(index: &'a ScreenshotIndex, group: &ScreenshotGroup<'a>) -> Vec<Self> {
        group
            .references
            .iter()
            .map(|reference| Self::for_file(index, *reference))
            .collect()
    }

    /// Diff images of a group paired with their latest counterparts.
    pub fn for_diffs(index: &'a ScreenshotIndex, group: &ScreenshotGroup<'a>) -> Vec<Self> {
        group
            .diffs
            .iter()
            .map(|diff| Self::for_file(index, *diff))
            .collect()
    }

    #[inline]
    pub fn has_latest(&self) -> bool {
        self.latest.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;
    use terra_carton::Flavor;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"png").unwrap();
    }

    #[test]
    fn test_reference_to_latest_pairing() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "__snapshots__/reference/en/chrome_huge/A-spec/a.png");
        touch(dir.path(), "__snapshots__/reference/en/chrome_tiny/A-spec/a.png");
        touch(dir.path(), "__snapshots__/latest/en/chrome_huge/A-spec/a.png");
        touch(dir.path(), "__snapshots__/diff/en/chrome_huge/A-spec/a.png");

        let index = ScreenshotIndex::scan(dir.path(), Flavor::Toolkit);
        let group = index.group("A-spec", "a.png").unwrap();

        let pairs = ScreenshotDiff::for_group(&index, &group);
        assert_eq!(pairs.len(), 2);
        assert!(pairs[0].has_latest());
        assert_eq!(pairs[0].latest.unwrap().context.viewport, "huge");
        assert!(!pairs[1].has_latest());

        let diffs = ScreenshotDiff::for_diffs(&index, &group);
        assert_eq!(diffs.len(), 1);
        assert_eq!(diffs[0].original.variant, Variant::Diff);
        assert!(diffs[0].has_latest());
    }
}
