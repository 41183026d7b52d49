//! Carton - The toolbox for Terra.
//!
//! This crate holds the small, dependency-free building blocks every other
//! Terra crate reaches for: the viewport vocabulary, the screenshot naming
//! convention, the configuration snapshot and byte-offset to line/column
//! mapping.
//!
//! # Modules
//!
//! - **viewport**: Supported viewport names ordered by width
//! - **naming**: Screenshot name normalization, compatible with the Terra toolkit
//! - **settings**: Immutable configuration snapshots and the handle that swaps them
//! - **source_location**: Line/column lookup over source text
//!
//! # Example
//!
//! ```
//! use terra_carton::naming::toolkit_screenshot_name;
//!
//! assert_eq!(toolkit_screenshot_name("My Spec", "default"), "My_Spec[default].png");
//! ```

pub mod naming;
pub mod settings;
pub mod source_location;
pub mod viewport;

// Re-export compact_str::CompactString for convenience
pub use compact_str::CompactString;

// Re-export smallvec for stack-optimized collections
pub use smallvec::{smallvec, SmallVec};

// Re-export rustc-hash for fast hash maps/sets
pub use rustc_hash::{FxHashMap, FxHashSet};

// Re-export phf for compile-time perfect hash functions
pub use phf::{phf_map, phf_set, Map as PhfMap, Set as PhfSet};

pub use settings::{Flavor, InspectionToggles, Settings, SettingsHandle};
pub use source_location::LineIndex;
