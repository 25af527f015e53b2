//! Widget configuration.
//!
//! | Type | Source | Description |
//! |------|--------|-------------|
//! | [`WidgetOptions`] | Embedder | Frame URL, sentinels, default host fragments |
//! | [`ScriptConfig`] | Page | Data attributes of the configuration element |
//!
//! # Example
//!
//! ```
//! use product_overlay::{ScriptConfig, WidgetOptions};
//!
//! let options = WidgetOptions::new().with_overlay_path("/checkout/overlay.html");
//! let script = ScriptConfig::new().with_subdomain("shop");
//!
//! let fragments = options.accepted_fragments(Some(&script));
//! assert_eq!(fragments, ["gum.co", "gumroad.com/l", "shop.gumroad.com"]);
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Embedder-side widget options.
pub mod options;

/// Page-side configuration element.
pub mod script;

// ============================================================================
// Re-exports
// ============================================================================

pub use options::WidgetOptions;
pub use script::{SCRIPT_ELEMENT_ID, ScriptConfig};
