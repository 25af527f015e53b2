//! Tracked product links.

// ============================================================================
// Imports
// ============================================================================

use crate::identifiers::{ElementId, LinkId};
use crate::protocol::{Command, ElementCommand, Intent, IntentBinding};

// ============================================================================
// TrackedLink
// ============================================================================

/// A host-page link recognised as pointing at a supported product.
///
/// Holds no lifecycle of its own. If the element leaves the document the
/// link stays tracked but never receives another event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedLink {
    id: LinkId,
    element: ElementId,
    product_id: String,
}

impl TrackedLink {
    /// Wraps an element. `product_id` must be non-empty.
    pub(crate) fn new(id: LinkId, element: ElementId, product_id: String) -> Self {
        debug_assert!(!product_id.is_empty(), "product id must not be empty");
        Self {
            id,
            element,
            product_id,
        }
    }

    /// Returns the link's position in discovery order.
    #[inline]
    #[must_use]
    pub fn id(&self) -> LinkId {
        self.id
    }

    /// Returns the wrapped element.
    #[inline]
    #[must_use]
    pub fn element(&self) -> &ElementId {
        &self.element
    }

    /// Returns the product slug extracted from the link's href.
    #[inline]
    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product_id
    }

    /// Returns the fixed listener wiring every tracked link carries.
    ///
    /// Activation suppresses navigation and keeps ancestor handlers from
    /// seeing the click; the hover hint leaves the event alone.
    #[must_use]
    pub fn bindings() -> Vec<IntentBinding> {
        vec![
            IntentBinding {
                intent: Intent::Activate,
                event: "click".to_string(),
                prevent_default: true,
                stop_propagation: true,
            },
            IntentBinding {
                intent: Intent::PrefetchHint,
                event: "mouseenter".to_string(),
                prevent_default: false,
                stop_propagation: false,
            },
        ]
    }

    /// Builds the command that subscribes this link's intents.
    #[must_use]
    pub(crate) fn bind_command(&self) -> Command {
        ElementCommand::BindIntents {
            element_id: self.element.clone(),
            intents: Self::bindings(),
        }
        .into()
    }
}

// ============================================================================
// Tests
// ============================================================================
