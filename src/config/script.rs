//! Page-side configuration element.
//!
//! The page shim reads the data attributes of the element with id
//! [`SCRIPT_ELEMENT_ID`] and forwards them in the `page.load` event. A page
//! without that element simply sends no config.

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// Constants
// ============================================================================

/// Id of the configuration element on the host page.
pub const SCRIPT_ELEMENT_ID: &str = "data-gumroad-script";

/// Suffix appended to a configured subdomain.
const SUBDOMAIN_SUFFIX: &str = ".gumroad.com";

// ============================================================================
// ScriptConfig
// ============================================================================

/// Dataset of the configuration element.
///
/// Empty attribute values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScriptConfig {
    /// `data-gumroad-subdomain`: seller subdomain, accepted as `<sub>.gumroad.com`.
    pub gumroad_subdomain: Option<String>,

    /// `data-gumroad-custom-domain`: accepted verbatim.
    pub gumroad_custom_domain: Option<String>,
}

impl ScriptConfig {
    /// Creates an empty dataset, as for a page without the element.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the seller subdomain.
    #[inline]
    #[must_use]
    pub fn with_subdomain(mut self, subdomain: impl Into<String>) -> Self {
        self.gumroad_subdomain = Some(subdomain.into());
        self
    }

    /// Sets the custom domain.
    #[inline]
    #[must_use]
    pub fn with_custom_domain(mut self, domain: impl Into<String>) -> Self {
        self.gumroad_custom_domain = Some(domain.into());
        self
    }

    /// Returns the host fragments this page adds, subdomain first.
    #[must_use]
    pub fn extra_fragments(&self) -> Vec<String> {
        let subdomain = self
            .gumroad_subdomain
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("{s}{SUBDOMAIN_SUFFIX}"));

        let custom = self
            .gumroad_custom_domain
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        subdomain.into_iter().chain(custom).collect()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_attributes() {
        assert!(ScriptConfig::new().extra_fragments().is_empty());
    }

    #[test]
    fn test_both_attributes() {
        let config = ScriptConfig::new()
            .with_custom_domain("store.example")
            .with_subdomain("alice");
        assert_eq!(
            config.extra_fragments(),
            ["alice.gumroad.com", "store.example"]
        );
    }

    #[test]
    fn test_empty_values_ignored() {
        let config: ScriptConfig =
            serde_json::from_str(r#"{ "gumroadSubdomain": "", "gumroadCustomDomain": "x.io" }"#)
                .expect("parse");
        assert_eq!(config.extra_fragments(), ["x.io"]);
    }
}
