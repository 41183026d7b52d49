//! CLI subcommands.

pub mod lint;
pub mod navigate;
pub mod screenshots;
