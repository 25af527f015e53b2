//! Page protocol message types.
//!
//! This module defines the message format between the widget (Rust) and
//! the page shim running in the host document.
//!
//! # Protocol Overview
//!
//! | Message Type | Direction | Purpose |
//! |--------------|-----------|---------|
//! | `Event` | Page → Widget | DOM notification |
//! | `Command` | Widget → Page | DOM mutation or listener wiring |
//!
//! Both use `{ "method": "module.name", "params": { ... } }` framing and
//! carry no correlation id: commands are fire-and-forget.
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `command` | Command definitions by module |
//! | `event` | Event types and payloads |

// ============================================================================
// Submodules
// ============================================================================

/// Command definitions organized by module.
pub mod command;

/// Event message types.
pub mod event;

// ============================================================================
// Re-exports
// ============================================================================

pub use command::{
    Command, ElementCommand, Intent, IntentBinding, OverlayCommand, PageCommand, PageListener,
};
pub use event::{ElementSnapshot, Event, PageLoad, ParsedEvent, Viewport};
