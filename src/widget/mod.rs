//! Widget core: tracked links, the overlay controller and its host seam.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`WidgetSlot`] | Create-once holder, routes page events |
//! | [`OverlayController`] | Link tracking and open/close state machine |
//! | [`TrackedLink`] | Product link with fixed intent bindings |
//! | [`Host`] | Command sink, usually a [`CommandQueue`] |
//!
//! # Data Flow
//!
//! ```text
//! page.load ──► WidgetSlot ──► OverlayController::new
//!                                  ├─ scan_existing   (links at load)
//!                                  └─ observe_insertions
//! element.added ───────────────────► handle_insertions (same matching path)
//! element.click / mouseenter ──────► set_active_link / prefetch_link
//! window.message / document.keyup ─► close_iframe
//! ```

// ============================================================================
// Submodules
// ============================================================================

/// Create-once widget slot.
pub mod bootstrap;

/// Overlay state machine.
pub mod controller;

/// Command sink abstraction.
pub mod host;

/// Keyboard key identification.
pub mod keyboard;

/// Tracked product links.
pub mod link;

// ============================================================================
// Re-exports
// ============================================================================

pub use bootstrap::WidgetSlot;
pub use controller::{OverlayController, OverlayState};
pub use host::{CommandQueue, Host};
pub use keyboard::Key;
pub use link::TrackedLink;
