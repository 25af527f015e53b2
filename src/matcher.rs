//! Product link recognition.
//!
//! A link is adopted when its `href` contains an optional `http:`/`https:`
//! scheme, `//`, one of the accepted host fragments, `/`, and a product slug.
//! The slug runs up to the first `?` or `/`.
//!
//! # Example
//!
//! ```
//! use product_overlay::LinkMatcher;
//!
//! let matcher = LinkMatcher::new(["gum.co"]).unwrap();
//! assert_eq!(
//!     matcher.extract_product_id(Some("https://gum.co/abc?x=1")).as_deref(),
//!     Some("abc"),
//! );
//! assert_eq!(matcher.extract_product_id(Some("https://example.com/abc")), None);
//! ```

// ============================================================================
// Imports
// ============================================================================

use regex::Regex;
use tracing::debug;

use crate::error::{Error, Result};

// ============================================================================
// LinkMatcher
// ============================================================================

/// Compiled link pattern for a fixed set of host fragments.
///
/// Fragments are trusted configuration and are inserted into the pattern
/// unescaped, so `gumroad.com/l` spans a path segment.
#[derive(Debug, Clone)]
pub struct LinkMatcher {
    fragments: Vec<String>,
    pattern: Regex,
}

impl LinkMatcher {
    /// Builds the pattern from the full fragment set.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if `fragments` is empty
    /// - [`Error::Pattern`] if a fragment breaks the regular expression
    pub fn new<I, S>(fragments: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fragments: Vec<String> = fragments.into_iter().map(Into::into).collect();

        if fragments.is_empty() {
            return Err(Error::config("at least one accepted host fragment is required"));
        }

        let source = format!(r"(https?:)?//({})/([^?/]+)", fragments.join("|"));
        let pattern = Regex::new(&source)?;

        debug!(pattern = %source, count = fragments.len(), "Link pattern built");

        Ok(Self { fragments, pattern })
    }

    /// Returns the product slug captured from `href`.
    ///
    /// Absent and non-matching hrefs both yield `None`.
    #[must_use]
    pub fn extract_product_id(&self, href: Option<&str>) -> Option<String> {
        let captures = self.pattern.captures(href?)?;
        captures
            .iter()
            .last()
            .flatten()
            .map(|m| m.as_str())
            .filter(|slug| !slug.is_empty())
            .map(str::to_string)
    }

    /// Returns `true` if `href` points at a supported product.
    #[inline]
    #[must_use]
    pub fn is_match(&self, href: &str) -> bool {
        self.pattern.is_match(href)
    }

    /// Returns the fragments the pattern was built from.
    #[inline]
    #[must_use]
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Returns the regular expression source.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.pattern.as_str()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> LinkMatcher {
        LinkMatcher::new(["gum.co", "gumroad.com/l"]).expect("valid fragments")
    }

    #[test]
    fn test_query_stops_slug() {
        let matcher = LinkMatcher::new(["gum.co"]).expect("valid fragments");
        assert_eq!(
            matcher.extract_product_id(Some("https://gum.co/abc?x=1")),
            Some("abc".to_string())
        );
    }

    #[test]
    fn test_foreign_host_is_rejected() {
        let matcher = LinkMatcher::new(["gum.co"]).expect("valid fragments");
        assert_eq!(matcher.extract_product_id(Some("https://example.com/abc")), None);
    }

    #[test]
    fn test_protocol_relative() {
        let matcher = LinkMatcher::new(["gum.co"]).expect("valid fragments");
        assert_eq!(
            matcher.extract_product_id(Some("//gum.co/xyz")),
            Some("xyz".to_string())
        );
    }

    #[test]
    fn test_path_fragment() {
        let matcher = defaults();
        assert_eq!(
            matcher.extract_product_id(Some("http://gumroad.com/l/demo/extra")),
            Some("demo".to_string())
        );
        assert_eq!(matcher.extract_product_id(Some("https://gumroad.com/demo")), None);
    }

    #[test]
    fn test_absent_or_empty_href() {
        let matcher = defaults();
        assert_eq!(matcher.extract_product_id(None), None);
        assert_eq!(matcher.extract_product_id(Some("")), None);
        assert_eq!(matcher.extract_product_id(Some("https://gum.co/")), None);
    }

    #[test]
    fn test_custom_fragments() {
        let matcher =
            LinkMatcher::new(["gum.co", "gumroad.com/l", "shop.gumroad.com", "books.example"])
                .expect("valid fragments");
        assert_eq!(
            matcher.extract_product_id(Some("https://shop.gumroad.com/pack")),
            Some("pack".to_string())
        );
        assert_eq!(
            matcher.extract_product_id(Some("https://books.example/novel?ref=home")),
            Some("novel".to_string())
        );
        assert!(matcher.is_match("//books.example/novel"));
        assert_eq!(matcher.fragments().len(), 4);
    }

    #[test]
    fn test_empty_fragments_rejected() {
        let err = LinkMatcher::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }

    #[test]
    fn test_broken_fragment_rejected() {
        let err = LinkMatcher::new(["gum.co", "bad(host"]).unwrap_err();
        assert!(matches!(err, Error::Pattern(_)));
    }
}
