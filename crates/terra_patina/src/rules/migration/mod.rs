//! Rules that move specs off deprecated Terra helpers.

mod replace_terra_it;

pub use replace_terra_it::ReplaceTerraIt;
