//! Inline style formatting and the widget stylesheet.
//!
//! # Example
//!
//! ```
//! use product_overlay::style::{StyleValue, Styles};
//!
//! let style = Styles::new()
//!     .set("width", StyleValue::Length(0))
//!     .set("height", "100%");
//!
//! assert_eq!(style.to_string(), "width:0;height:100%");
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

// ============================================================================
// Stylesheet
// ============================================================================

/// CSS injected before the host page's first `<script>` element.
pub const STYLESHEET: &str = r#"
.gumroad-overlay {
  position: fixed;
  left: 0;
  top: 0;
  z-index: 99999;
  overflow-y: auto;
}
.gumroad-overlay__iframe {
  position: absolute;
  min-width: 100%;
  min-height: 100%;
  border: none;
}
a.gumroad-button {
  background-color: white !important;
  background-image: url("https://gumroad.com/button/button_bar.jpg") !important;
  background-repeat: repeat-x !important;
  border-radius: 4px !important;
  box-shadow: rgba(0, 0, 0, 0.4) 0 0 2px !important;
  color: #999 !important;
  display: inline-block !important;
  font-family: -apple-system, ".SFNSDisplay-Regular", "Helvetica Neue", Helvetica, Arial, sans-serif !important;
  font-size: 16px !important;
  font-style: normal !important;
  font-weight: 500 !important;
  line-height: 50px !important;
  padding: 0 15px !important;
  text-shadow: none !important;
  text-decoration: none !important;
}
"#;

/// Class of the fixed-position overlay container.
pub const CONTAINER_CLASS: &str = "gumroad-overlay";

/// Class of the embedded frame.
pub const FRAME_CLASS: &str = "gumroad-overlay__iframe";

// ============================================================================
// StyleValue
// ============================================================================

/// Value of a single style property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleValue {
    /// Written verbatim (`100%`, `auto`, ...).
    Text(String),
    /// Pixel length. Zero is written unit-less.
    Length(u32),
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Length(0) => f.write_str("0"),
            Self::Length(px) => write!(f, "{px}px"),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<u32> for StyleValue {
    fn from(px: u32) -> Self {
        Self::Length(px)
    }
}

// ============================================================================
// Styles
// ============================================================================

/// Insertion-ordered property map rendered as an inline style string.
///
/// Setting a property twice keeps both entries; the browser applies the last.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Styles {
    entries: Vec<(String, StyleValue)>,
}

impl Styles {
    /// Creates an empty style map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a property.
    #[must_use]
    pub fn set(mut self, property: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.entries.push((property.into(), value.into()));
        self
    }

    /// Returns `true` if no property is set.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of properties.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for Styles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (property, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(";")?;
            }
            write!(f, "{property}:{value}")?;
        }
        Ok(())
    }
}

impl<K, V> FromIterator<(K, V)> for Styles
where
    K: Into<String>,
    V: Into<StyleValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Formats ordered `(property, value)` pairs as an inline style string.
pub fn convert_styles<K, V, I>(styles: I) -> String
where
    K: Into<String>,
    V: Into<StyleValue>,
    I: IntoIterator<Item = (K, V)>,
{
    styles.into_iter().collect::<Styles>().to_string()
}

// ============================================================================
// Tests
// ============================================================================
