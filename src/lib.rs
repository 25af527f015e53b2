//! Product overlay - link interception and checkout overlay core.
//!
//! This library decides which links on a host page open a product overlay
//! instead of navigating away, and drives the overlay frame through its
//! open/close lifecycle.
//!
//! # Architecture
//!
//! The widget follows a shim-core model:
//!
//! - **Page shim (JS)**: owns the DOM, forwards events, applies commands
//! - **Widget core (Rust)**: matches links, keeps selection state, emits commands
//!
//! Key design principles:
//!
//! - One [`OverlayController`] per page, created by a [`WidgetSlot`]
//! - Protocol uses `module.methodName` format in both directions
//! - Links are addressed by shim-assigned [`ElementId`]s, never owned
//! - Nothing that arrives from the page can fail a running widget
//!
//! # Quick Start
//!
//! ```
//! use product_overlay::{CommandQueue, Event, OverlayState, WidgetOptions, WidgetSlot};
//! use serde_json::json;
//!
//! let queue = CommandQueue::new();
//! let mut slot = WidgetSlot::new(WidgetOptions::new(), queue.clone());
//!
//! slot.handle_event(&Event::new("page.load", json!({
//!     "viewport": { "width": 1280, "height": 800 },
//!     "links": [{ "elementId": "buy", "tag": "A", "href": "https://gum.co/demo" }]
//! })))?;
//!
//! slot.handle_event(&Event::new("element.mouseenter", json!({ "elementId": "buy" })))?;
//! slot.handle_event(&Event::new("element.click", json!({ "elementId": "buy" })))?;
//!
//! let widget = slot.get().unwrap();
//! assert_eq!(widget.state(), OverlayState::Open);
//! assert_eq!(widget.frame_source(), Some("/overlay.html?productId=demo"));
//!
//! // Commands for the shim, in order.
//! for command in queue.drain() {
//!     println!("{}", serde_json::to_string(&command)?);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | [`WidgetOptions`] and page [`ScriptConfig`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`identifiers`] | Type-safe ID wrappers |
//! | [`matcher`] | Product link pattern |
//! | [`protocol`] | Event and command message types |
//! | [`style`] | Inline style formatting and stylesheet |
//! | [`transport`] | WebSocket transport to the page shim |
//! | [`widget`] | Controller, tracked links, bootstrap |

// ============================================================================
// Modules
// ============================================================================

/// Widget configuration.
pub mod config;

/// Error types and result aliases.
///
/// Only construction and transport can fail.
pub mod error;

/// Type-safe identifiers for page entities.
pub mod identifiers;

/// Product link recognition.
pub mod matcher;

/// Page protocol message types.
pub mod protocol;

/// Inline style formatting.
pub mod style;

/// WebSocket transport layer.
pub mod transport;

/// Widget core.
///
/// - [`WidgetSlot`] - create-once holder
/// - [`OverlayController`] - state machine
/// - [`TrackedLink`] - product link
pub mod widget;

// ============================================================================
// Re-exports
// ============================================================================

// Configuration
pub use config::{ScriptConfig, WidgetOptions};

// Error types
pub use error::{Error, Result};

// Identifier types
pub use identifiers::{ElementId, LinkId};

// Matching and styles
pub use matcher::LinkMatcher;
pub use style::{StyleValue, Styles, convert_styles};

// Protocol types
pub use protocol::{Command, ElementSnapshot, Event, Intent, ParsedEvent, Viewport};

// Transport types
pub use transport::{Connection, PendingServer};

// Widget types
pub use widget::{CommandQueue, Host, Key, OverlayController, OverlayState, TrackedLink, WidgetSlot};
