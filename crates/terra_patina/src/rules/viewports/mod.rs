//! Rules for `Terra.describeViewports` blocks.
//!
//! The viewport argument checks come in two variants. The blocking rule
//! reports what makes Terra fail the test run; the non-blocking rule reports
//! style problems only.

mod checks;
mod describe_viewports;
mod describe_viewports_blocking;
mod no_duplicate_describe_viewports;
mod no_nested_describe_viewports;

pub use describe_viewports::DescribeViewports;
pub use describe_viewports_blocking::DescribeViewportsBlocking;
pub use no_duplicate_describe_viewports::NoDuplicateDescribeViewports;
pub use no_nested_describe_viewports::NoNestedDescribeViewports;
