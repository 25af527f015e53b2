//! Host seam: where widget commands go.
//!
//! The controller never touches the DOM itself. Every mutation is a
//! [`Command`] handed to a [`Host`], which in production is a
//! [`CommandQueue`] flushed to the page shim after each event.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use parking_lot::Mutex;

use crate::protocol::Command;

// ============================================================================
// Host
// ============================================================================

/// Receiver of widget commands.
///
/// Delivery is fire-and-forget; the widget never waits for the page.
pub trait Host {
    /// Hands a command to the page.
    fn send(&mut self, command: Command);
}

impl Host for Vec<Command> {
    fn send(&mut self, command: Command) {
        self.push(command);
    }
}

// ============================================================================
// CommandQueue
// ============================================================================

/// Shared FIFO of pending commands.
///
/// Clones share the same queue: the controller pushes through one handle
/// while the transport drains through another.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    inner: Arc<Mutex<Vec<Command>>>,
}

impl CommandQueue {
    /// Creates an empty queue.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all pending commands in send order.
    #[must_use]
    pub fn drain(&self) -> Vec<Command> {
        std::mem::take(&mut *self.inner.lock())
    }

    /// Returns the number of pending commands.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Returns `true` if nothing is pending.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Host for CommandQueue {
    fn send(&mut self, command: Command) {
        self.inner.lock().push(command);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use crate::protocol::OverlayCommand;

    fn source(url: &str) -> Command {
        OverlayCommand::SetFrameSource { url: url.into() }.into()
    }

    #[test]
    fn test_clones_share_queue() {
        let queue = CommandQueue::new();
        let mut writer = queue.clone();

        writer.send(source("/a"));
        writer.send(source("/b"));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain(), vec![source("/a"), source("/b")]);
        assert!(writer.is_empty());
    }
}
