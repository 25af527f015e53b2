//! Embedder-side widget options.
//!
//! Controls where the overlay frame points, which host fragments are accepted
//! before page configuration is applied, and the sentinel messages exchanged
//! with the frame.
//!
//! # Example
//!
//! ```
//! use product_overlay::WidgetOptions;
//!
//! let options = WidgetOptions::new();
//! assert_eq!(options.frame_url("demo"), "/overlay.html?productId=demo");
//! ```

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Error, Result};

use super::script::ScriptConfig;

// ============================================================================
// Constants
// ============================================================================

/// Host fragments accepted on every page.
pub const DEFAULT_FRAGMENTS: [&str; 2] = ["gum.co", "gumroad.com/l"];

/// Path of the document loaded into the overlay frame.
pub const DEFAULT_OVERLAY_PATH: &str = "/overlay.html";

/// Message from the frame that closes the overlay.
pub const CLOSE_MESSAGE: &str = "gumroad-close";

/// Message posted to the frame on every open.
pub const OPENED_MESSAGE: &str = "iframe-opened";

// ============================================================================
// WidgetOptions
// ============================================================================

/// Widget options, fixed for the lifetime of a controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WidgetOptions {
    /// Host fragments accepted before page configuration is applied.
    pub default_fragments: Vec<String>,

    /// Path of the overlay document.
    pub overlay_path: String,

    /// Origin the overlay path is resolved against. Relative when `None`.
    pub overlay_origin: Option<Url>,

    /// Frame message that closes the overlay.
    pub close_message: String,

    /// Message posted to the frame after opening.
    pub opened_message: String,
}

impl Default for WidgetOptions {
    fn default() -> Self {
        Self {
            default_fragments: DEFAULT_FRAGMENTS.iter().map(|f| f.to_string()).collect(),
            overlay_path: DEFAULT_OVERLAY_PATH.to_string(),
            overlay_origin: None,
            close_message: CLOSE_MESSAGE.to_string(),
            opened_message: OPENED_MESSAGE.to_string(),
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl WidgetOptions {
    /// Creates options with the default fragments and sentinels.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the overlay document path.
    #[inline]
    #[must_use]
    pub fn with_overlay_path(mut self, path: impl Into<String>) -> Self {
        self.overlay_path = path.into();
        self
    }

    /// Resolves the overlay path against an absolute origin.
    #[inline]
    #[must_use]
    pub fn with_overlay_origin(mut self, origin: Url) -> Self {
        self.overlay_origin = Some(origin);
        self
    }

    /// Adds a default host fragment.
    #[inline]
    #[must_use]
    pub fn with_fragment(mut self, fragment: impl Into<String>) -> Self {
        self.default_fragments.push(fragment.into());
        self
    }

    /// Replaces the default host fragments.
    #[inline]
    #[must_use]
    pub fn with_fragments(mut self, fragments: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.default_fragments = fragments.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the close sentinel.
    #[inline]
    #[must_use]
    pub fn with_close_message(mut self, message: impl Into<String>) -> Self {
        self.close_message = message.into();
        self
    }
}

// ============================================================================
// Derived Values
// ============================================================================

impl WidgetOptions {
    /// Returns the frame URL for a product.
    ///
    /// The product id is percent-encoded. Escapes it already carries, as in
    /// `caf%C3%A9`, are kept so the frame sees the id the link carried.
    #[must_use]
    pub fn frame_url(&self, product_id: &str) -> String {
        let query = format!("productId={}", encode_query_value(product_id));

        if let Some(origin) = &self.overlay_origin
            && let Ok(mut url) = origin.join(&self.overlay_path)
        {
            url.set_query(Some(&query));
            return url.into();
        }

        format!("{}?{}", self.overlay_path, query)
    }

    /// Returns the defaults followed by the page's extra fragments.
    ///
    /// Duplicates and empty fragments are dropped; order is preserved.
    #[must_use]
    pub fn accepted_fragments(&self, script: Option<&ScriptConfig>) -> Vec<String> {
        let extras = script.map(ScriptConfig::extra_fragments).unwrap_or_default();
        let mut seen = FxHashSet::default();

        self.default_fragments
            .iter()
            .cloned()
            .chain(extras)
            .filter(|fragment| !fragment.is_empty())
            .filter(|fragment| seen.insert(fragment.clone()))
            .collect()
    }

    /// Validates the options.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if the overlay path or close sentinel is empty
    /// - [`Error::Url`] if the path cannot be joined to the origin
    pub fn validate(&self) -> Result<()> {
        if self.overlay_path.is_empty() {
            return Err(Error::config("overlay path must not be empty"));
        }

        if self.close_message.is_empty() {
            return Err(Error::config("close message must not be empty"));
        }

        if let Some(origin) = &self.overlay_origin {
            origin.join(&self.overlay_path)?;
        }

        Ok(())
    }
}

/// Percent-encodes `value` for a query string, keeping valid `%XX` escapes.
fn encode_query_value(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(pos) = rest.find('%') {
        encoded.push_str(&urlencoding::encode(&rest[..pos]));
        let tail = &rest[pos..];
        if is_percent_escape(tail) {
            encoded.push_str(&tail[..3]);
            rest = &tail[3..];
        } else {
            encoded.push_str("%25");
            rest = &tail[1..];
        }
    }

    encoded.push_str(&urlencoding::encode(rest));
    encoded
}

/// Returns `true` when `s` starts with `%` and two hex digits.
#[inline]
fn is_percent_escape(s: &str) -> bool {
    matches!(s.as_bytes(), [b'%', hi, lo, ..] if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = WidgetOptions::new();
        assert_eq!(options.default_fragments, ["gum.co", "gumroad.com/l"]);
        assert_eq!(options.overlay_path, "/overlay.html");
        assert_eq!(options.close_message, "gumroad-close");
        assert_eq!(options.opened_message, "iframe-opened");
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_frame_url_relative() {
        let options = WidgetOptions::new();
        assert_eq!(options.frame_url("abc"), "/overlay.html?productId=abc");
    }

    #[test]
    fn test_frame_url_encodes_id() {
        let options = WidgetOptions::new();
        assert_eq!(
            options.frame_url("a b&c#d"),
            "/overlay.html?productId=a%20b%26c%23d"
        );
    }

    #[test]
    fn test_frame_url_keeps_existing_escapes() {
        let options = WidgetOptions::new();
        assert_eq!(
            options.frame_url("caf%C3%A9"),
            "/overlay.html?productId=caf%C3%A9"
        );
        assert_eq!(
            options.frame_url("50%off%2"),
            "/overlay.html?productId=50%25off%252"
        );
    }

    #[test]
    fn test_frame_url_with_origin_keeps_escapes() {
        let origin = Url::parse("https://checkout.example.com/").expect("valid url");
        let options = WidgetOptions::new().with_overlay_origin(origin);
        assert_eq!(
            options.frame_url("caf%C3%A9"),
            "https://checkout.example.com/overlay.html?productId=caf%C3%A9"
        );
    }

    #[test]
    fn test_frame_url_with_origin() {
        let origin = Url::parse("https://checkout.example.com/").expect("valid url");
        let options = WidgetOptions::new().with_overlay_origin(origin);
        assert_eq!(
            options.frame_url("abc"),
            "https://checkout.example.com/overlay.html?productId=abc"
        );
    }

    #[test]
    fn test_accepted_fragments_dedup() {
        let script = ScriptConfig::new()
            .with_subdomain("shop")
            .with_custom_domain("gum.co");
        let options = WidgetOptions::new();

        assert_eq!(
            options.accepted_fragments(Some(&script)),
            ["gum.co", "gumroad.com/l", "shop.gumroad.com"]
        );
        assert_eq!(options.accepted_fragments(None), ["gum.co", "gumroad.com/l"]);
    }

    #[test]
    fn test_validate_rejects_empty_path() {
        let options = WidgetOptions::new().with_overlay_path("");
        assert!(matches!(options.validate(), Err(Error::Config { .. })));
    }

    #[test]
    fn test_deserialize_partial() {
        let options: WidgetOptions =
            serde_json::from_str(r#"{ "overlayPath": "/o.html" }"#).expect("parse");
        assert_eq!(options.overlay_path, "/o.html");
        assert_eq!(options.default_fragments.len(), 2);
    }
}
