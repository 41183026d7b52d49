//! # terra_canon
//!
//! Canon - The screenshot filesystem model for Terra.
//!
//! ## Name Origin
//!
//! **Canon** (/ˈkænən/) in art refers to the set of reference proportions every
//! work is measured against. Reference screenshots play the same role for a
//! visual regression suite: each new run is compared against them.
//!
//! ## Layout
//!
//! ```text
//! <wdio root>/<nested…>/__snapshots__/<variant>/[<theme>/]<locale>/<browser>_<viewport>/<Spec>-spec/<name>.png
//!                                      |          |                                        |
//!                                      |          +-- ScreenshotContext                    +-- ScreenshotFile::name
//!                                      +-- reference | latest | diff
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +------------------------------------------------------+
//! |                     terra_canon                       |
//! +------------------------------------------------------+
//! |  folders  -> locate roots, detect flavor              |
//! |  context  -> [theme/]locale/browser_viewport          |
//! |  screenshot -> one parsed file path                   |
//! |  index    -> scan once, collect/group/statistics      |
//! |  diff     -> reference + latest pairing               |
//! |  actions  -> rename/delete/accept latest              |
//! +------------------------------------------------------+
//! ```

pub mod actions;
pub mod context;
pub mod diff;
mod error;
pub mod folders;
pub mod index;
pub mod screenshot;

pub use actions::{
    delete_screenshots, rename_screenshots, replace_reference_with_latest, ActionReport,
};
pub use context::ScreenshotContext;
pub use diff::ScreenshotDiff;
pub use error::{ScreenshotError, ScreenshotResult};
pub use folders::{
    detect_flavor, locate_screenshot_root, locate_wdio_root, spec_file_for, spec_id_for, Variant,
    SNAPSHOTS_DIR,
};
pub use index::{CollectMode, ScreenshotGroup, ScreenshotIndex, ScreenshotStatistics, SpecScreenshots};
pub use screenshot::ScreenshotFile;
