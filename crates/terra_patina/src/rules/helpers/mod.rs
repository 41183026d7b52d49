//! Rules for the structure of Terra describe helpers.

mod no_nested_describe_helpers;

pub use no_nested_describe_helpers::NoNestedDescribeHelpers;
