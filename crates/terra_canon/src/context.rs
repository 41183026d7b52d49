//! Screenshot context: the locale, browser and viewport a screenshot was taken in.

use terra_carton::Flavor;

/// Context parsed from the directories between a variant root and the spec folder.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScreenshotContext {
    /// Theme directory (terra-functional-testing only)
    pub theme: Option<String>,
    pub locale: String,
    pub browser: String,
    pub viewport: String,
}

impl ScreenshotContext {
    /// Parse `[theme/]<locale>/<browser>_<viewport>` segments.
    ///
    /// Returns `None` when the segment count does not fit the flavor or the
    /// browser directory has no `_` separated viewport.
    pub fn parse(segments: &[&str], flavor: Flavor) -> Option<Self> {
        let (theme, locale, browser_viewport) = match (flavor.has_theme_segment(), segments) {
            (true, [theme, locale, browser_viewport]) => {
                (Some(theme.to_string()), *locale, *browser_viewport)
            }
            (false, [locale, browser_viewport]) => (None, *locale, *browser_viewport),
            _ => return None,
        };

        let (browser, viewport) = browser_viewport.rsplit_once('_')?;
        if locale.is_empty() || browser.is_empty() || viewport.is_empty() {
            return None;
        }

        Some(Self {
            theme,
            locale: locale.to_string(),
            browser: browser.to_string(),
            viewport: viewport.to_string(),
        })
    }

    /// Number of directories a context occupies for `flavor`.
    #[inline]
    pub const fn segment_count(flavor: Flavor) -> usize {
        if flavor.has_theme_segment() {
            3
        } else {
            2
        }
    }
}

impl std::fmt::Display for ScreenshotContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(theme) = &self.theme {
            write!(f, "{} / ", theme)?;
        }
        write!(f, "{} / {} / {}", self.locale, self.browser, self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_toolkit_context() {
        let context = ScreenshotContext::parse(&["en", "chrome_huge"], Flavor::Toolkit).unwrap();
        assert_eq!(context.theme, None);
        assert_eq!(context.locale, "en");
        assert_eq!(context.browser, "chrome");
        assert_eq!(context.viewport, "huge");
        assert_eq!(context.to_string(), "en / chrome / huge");
    }

    #[test]
    fn test_parse_functional_testing_context() {
        let context = ScreenshotContext::parse(
            &["terra-default-theme", "en", "chrome_huge"],
            Flavor::FunctionalTesting,
        )
        .unwrap();
        assert_eq!(context.theme.as_deref(), Some("terra-default-theme"));
        assert_eq!(context.to_string(), "terra-default-theme / en / chrome / huge");
    }

    #[test]
    fn test_browser_with_underscore_splits_at_last() {
        let context =
            ScreenshotContext::parse(&["fr", "internet_explorer_small"], Flavor::Toolkit).unwrap();
        assert_eq!(context.browser, "internet_explorer");
        assert_eq!(context.viewport, "small");
    }

    #[test]
    fn test_malformed_contexts() {
        assert_eq!(ScreenshotContext::parse(&["en", "chrome"], Flavor::Toolkit), None);
        assert_eq!(ScreenshotContext::parse(&["en", "chrome_"], Flavor::Toolkit), None);
        assert_eq!(ScreenshotContext::parse(&["chrome_huge"], Flavor::Toolkit), None);
        assert_eq!(
            ScreenshotContext::parse(&["en", "chrome_huge"], Flavor::FunctionalTesting),
            None
        );
    }
}
