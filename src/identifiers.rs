//! Type-safe identifiers.
//!
//! | Type | Origin | Description |
//! |------|--------|-------------|
//! | [`ElementId`] | Page shim | Handle of a host-page DOM element |
//! | [`LinkId`] | Controller | Index of a tracked link in discovery order |

// ============================================================================
// Imports
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// ElementId
// ============================================================================

/// Handle of a host-page element, assigned by the page shim.
///
/// The widget never owns the element; the id is only used to address it in
/// commands and to recognise it in events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Creates an element ID from a shim-provided string.
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

// ============================================================================
// LinkId
// ============================================================================

/// Position of a tracked link in the controller's discovery order.
///
/// Links are never removed, so an issued `LinkId` stays valid for the
/// lifetime of the controller that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(usize);

impl LinkId {
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the discovery index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for LinkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "link#{}", self.0)
    }
}

// ============================================================================
// Tests
// ============================================================================
