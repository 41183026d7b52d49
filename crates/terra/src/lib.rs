//! # Terra
//!
//! Convention checks and screenshot management for Terra visual regression
//! suites, written in Rust.
//!
//! This crate re-exports all Terra sub-crates for unified documentation.
//!
//! ## Crates
//!
//! - [`carton`] - Viewports, screenshot naming and settings
//! - [`canon`] - Screenshot filesystem model and file actions
//! - [`patina`] - Spec file linter and screenshot reconciliation

/// Viewports, screenshot naming and settings.
pub use terra_carton as carton;

/// Screenshot filesystem model and file actions.
pub use terra_canon as canon;

/// Spec file linter and screenshot reconciliation.
pub use terra_patina as patina;
