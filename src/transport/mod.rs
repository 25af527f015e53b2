//! WebSocket transport layer.
//!
//! This module carries protocol messages between the widget (Rust) and the
//! page shim running in the host document.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐                              ┌─────────────────┐
//! │  Widget (Rust)  │                              │  Host page      │
//! │                 │         WebSocket            │                 │
//! │  PendingServer  │◄────────────────────────────►│  Page shim      │
//! │  → Connection   │      localhost:PORT          │  (DOM access)   │
//! │  → WidgetSlot   │                              │                 │
//! └─────────────────┘                              └─────────────────┘
//! ```
//!
//! # Connection Lifecycle
//!
//! 1. `PendingServer::bind` - Bind to localhost with random port
//! 2. `PendingServer::accept` - Wait for a page to connect
//! 3. `Connection::run` - Events in, commands out, until the page leaves
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `connection` | Per-page WebSocket event loop |
//! | `server` | WebSocket server binding and acceptance |

// ============================================================================
// Submodules
// ============================================================================

/// Per-page WebSocket event loop.
pub mod connection;

/// WebSocket server the page shim connects to.
pub mod server;

// ============================================================================
// Re-exports
// ============================================================================

pub use connection::Connection;
pub use server::PendingServer;
