//! Terra viewport vocabulary.
//!
//! The supported viewports, listed by ascending pixel width, happen to be in
//! reverse alphabetical order as well. Ordering checks rely on this: sorting a
//! list descending alphabetically yields its ascending-width order, so no
//! width table has to be maintained. Re-verify `reverse_alphabetical_is_width_order`
//! whenever the vocabulary changes.

use phf::phf_set;

/// Supported viewports, narrowest first.
pub const SUPPORTED_VIEWPORTS: [&str; 6] = ["tiny", "small", "medium", "large", "huge", "enormous"];

static SUPPORTED_VIEWPORT_SET: phf::Set<&'static str> = phf_set! {
    "tiny",
    "small",
    "medium",
    "large",
    "huge",
    "enormous",
};

/// Check whether `value` is a viewport Terra knows about.
#[inline]
pub fn is_supported_viewport(value: &str) -> bool {
    SUPPORTED_VIEWPORT_SET.contains(value)
}

/// Check whether `viewports` is in ascending order by width.
///
/// Only meaningful when every value is supported.
pub fn is_ascending_by_width(viewports: &[&str]) -> bool {
    let mut sorted = viewports.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    sorted == viewports
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_viewports() {
        for viewport in SUPPORTED_VIEWPORTS {
            assert!(is_supported_viewport(viewport));
        }
        assert!(!is_supported_viewport(""));
        assert!(!is_supported_viewport("Huge"));
        assert!(!is_supported_viewport("asd"));
    }

    #[test]
    fn reverse_alphabetical_is_width_order() {
        // Every subset of the vocabulary, in width order, must survive a
        // descending alphabetical sort unchanged.
        for mask in 0u32..(1 << SUPPORTED_VIEWPORTS.len()) {
            let by_width: Vec<&str> = SUPPORTED_VIEWPORTS
                .iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, v)| *v)
                .collect();

            let mut reverse_alpha = by_width.clone();
            reverse_alpha.sort_unstable_by(|a, b| b.cmp(a));
            assert_eq!(reverse_alpha, by_width, "subset mask {mask:#b}");
        }
    }

    #[test]
    fn test_ascending_order() {
        assert!(is_ascending_by_width(&["tiny", "small", "huge"]));
        assert!(is_ascending_by_width(&["medium"]));
        assert!(is_ascending_by_width(&[]));
        assert!(!is_ascending_by_width(&["huge", "small", "tiny"]));
        assert!(!is_ascending_by_width(&["small", "tiny"]));
    }
}
