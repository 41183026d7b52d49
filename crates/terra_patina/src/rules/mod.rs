//! Lint rules for Terra spec files.
//!
//! Rules are organized by category:
//! - `viewports`: `Terra.describeViewports` arguments and blocks
//! - `helpers`: nesting of Terra describe helpers
//! - `screenshot`: validation options, screenshot names and files
//! - `migration`: deprecated helper replacement

pub mod helpers;
pub mod migration;
pub mod screenshot;
pub mod viewports;
