//! Per-page WebSocket connection and event loop.
//!
//! # Event Loop
//!
//! One loop per page, on one task:
//!
//! - read a text frame and parse it as an [`Event`]
//! - apply it to the page's [`WidgetSlot`]
//! - flush every command the widget queued, in order
//!
//! Each event is fully handled before the next frame is read, so the
//! widget never sees interleaved events.

// ============================================================================
// Imports
// ============================================================================

use std::net::SocketAddr;

use futures_util::{SinkExt, StreamExt};
use serde_json::{from_str, to_string};
use tokio::net::TcpStream;
use tokio_tungstenite::WebSocketStream;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, trace, warn};

use crate::config::WidgetOptions;
use crate::error::Result;
use crate::protocol::Event;
use crate::widget::{CommandQueue, WidgetSlot};

// ============================================================================
// Connection
// ============================================================================

/// WebSocket connection to one page shim.
pub struct Connection {
    ws_stream: WebSocketStream<TcpStream>,
    peer: SocketAddr,
}

impl Connection {
    pub(crate) fn new(ws_stream: WebSocketStream<TcpStream>, peer: SocketAddr) -> Self {
        Self { ws_stream, peer }
    }

    /// Returns the page's socket address.
    #[inline]
    #[must_use]
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Serves the page until it disconnects.
    ///
    /// Malformed frames are logged and skipped. A widget that fails to build
    /// leaves the page untouched; later events are ignored.
    ///
    /// # Errors
    ///
    /// - [`Error::WebSocket`](crate::Error::WebSocket) on socket failure
    /// - [`Error::Json`](crate::Error::Json) if a command cannot be serialized
    pub async fn run(self, options: WidgetOptions) -> Result<()> {
        let queue = CommandQueue::new();
        let mut slot = WidgetSlot::new(options, queue.clone());
        let (mut ws_write, mut ws_read) = self.ws_stream.split();

        while let Some(message) = ws_read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    Self::handle_incoming_message(&text, &mut slot);

                    for command in queue.drain() {
                        let json = to_string(&command)?;
                        ws_write.send(Message::Text(json.into())).await?;
                        trace!(method = command.method(), "Command sent");
                    }
                }

                Ok(Message::Close(_)) => {
                    debug!(peer = %self.peer, "WebSocket closed by page");
                    break;
                }

                Err(e) => {
                    error!(peer = %self.peer, error = %e, "WebSocket error");
                    return Err(e.into());
                }

                // Ignore Binary, Ping, Pong
                _ => {}
            }
        }

        debug!(peer = %self.peer, "Event loop terminated");
        Ok(())
    }

    /// Handles an incoming text frame from the page.
    fn handle_incoming_message(text: &str, slot: &mut WidgetSlot<CommandQueue>) {
        let event = match from_str::<Event>(text) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, text = %text, "Failed to parse incoming message");
                return;
            }
        };

        if let Err(e) = slot.handle_event(&event) {
            warn!(method = %event.method, error = %e, "Widget could not be created");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
