//! Create-once widget slot.
//!
//! A page gets exactly one controller, built when `page.load` arrives.
//! Events that arrive before it are dropped; a second `page.load` finds the
//! existing controller and leaves it untouched.
//!
//! # Example
//!
//! ```
//! use product_overlay::{CommandQueue, Event, WidgetOptions, WidgetSlot};
//! use serde_json::json;
//!
//! let queue = CommandQueue::new();
//! let mut slot = WidgetSlot::new(WidgetOptions::new(), queue.clone());
//!
//! slot.handle_event(&Event::new("page.load", json!({
//!     "links": [{ "elementId": "el-1", "tag": "A", "href": "https://gum.co/demo" }]
//! })))
//! .unwrap();
//! slot.handle_event(&Event::new("element.click", json!({ "elementId": "el-1" })))
//!     .unwrap();
//!
//! assert!(slot.get().is_some_and(|widget| widget.is_open()));
//! ```

// ============================================================================
// Imports
// ============================================================================

use tracing::{debug, info, trace};

use crate::config::WidgetOptions;
use crate::error::Result;
use crate::protocol::{Event, PageLoad, ParsedEvent};

use super::controller::OverlayController;
use super::host::Host;

// ============================================================================
// WidgetSlot
// ============================================================================

/// Holds the page's single [`OverlayController`], created on first load.
pub struct WidgetSlot<H: Host + Clone> {
    options: WidgetOptions,
    host: H,
    widget: Option<OverlayController<H>>,
}

impl<H: Host + Clone> WidgetSlot<H> {
    /// Creates an empty slot. Each controller built from it gets a clone of
    /// `host`.
    #[must_use]
    pub fn new(options: WidgetOptions, host: H) -> Self {
        Self {
            options,
            host,
            widget: None,
        }
    }

    /// Returns the controller, building it from `load` if none exists yet.
    ///
    /// Building scans the links present in `load` and starts insertion
    /// observation.
    ///
    /// # Errors
    ///
    /// Returns configuration errors from [`OverlayController::new`]. The slot
    /// stays empty in that case.
    pub fn get_or_create(&mut self, load: &PageLoad) -> Result<&mut OverlayController<H>> {
        let widget = match self.widget.take() {
            Some(widget) => {
                trace!("Widget already exists");
                widget
            }
            None => {
                let mut widget = OverlayController::new(
                    self.options.clone(),
                    load.config.as_ref(),
                    load.viewport,
                    self.host.clone(),
                )?;
                widget.scan_existing(&load.links);
                widget.observe_insertions();

                info!(links = widget.links().len(), "Widget created");
                widget
            }
        };

        Ok(self.widget.insert(widget))
    }

    /// Routes a page event.
    ///
    /// # Errors
    ///
    /// Only widget construction on `page.load` can fail; every other event
    /// is applied or skipped silently.
    pub fn handle_event(&mut self, event: &Event) -> Result<()> {
        match event.parse() {
            ParsedEvent::PageLoad(load) => {
                self.get_or_create(&load)?;
            }
            parsed => match self.widget.as_mut() {
                Some(widget) => widget.handle(parsed),
                None => debug!(method = %event.method, "Event before page load, ignored"),
            },
        }
        Ok(())
    }

    /// Returns the controller if it has been created.
    #[inline]
    #[must_use]
    pub fn get(&self) -> Option<&OverlayController<H>> {
        self.widget.as_ref()
    }

    /// Returns the controller mutably if it has been created.
    #[inline]
    #[must_use]
    pub fn get_mut(&mut self) -> Option<&mut OverlayController<H>> {
        self.widget.as_mut()
    }

    /// Returns `true` once the controller exists.
    #[inline]
    #[must_use]
    pub fn is_created(&self) -> bool {
        self.widget.is_some()
    }
}

// ============================================================================
// Tests
// ============================================================================
