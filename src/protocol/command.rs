//! Command definitions organized by module.
//!
//! Commands travel from the widget to the page shim, which applies them to
//! the DOM. They follow `module.methodName` format.
//!
//! # Command Modules
//!
//! | Module | Commands |
//! |--------|----------|
//! | `page` | Style injection, listener subscription, insertion observation |
//! | `element` | Intent binding on tracked links |
//! | `overlay` | Container and frame creation, styling, source, messaging |

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};

use crate::identifiers::ElementId;

// ============================================================================
// Command Wrapper
// ============================================================================

/// All protocol commands organized by module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Command {
    /// Page module commands.
    Page(PageCommand),
    /// Element module commands.
    Element(ElementCommand),
    /// Overlay module commands.
    Overlay(OverlayCommand),
}

impl Command {
    /// Returns the `module.methodName` of this command.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            Self::Page(PageCommand::InjectStyles { .. }) => "page.injectStyles",
            Self::Page(PageCommand::Subscribe { .. }) => "page.subscribe",
            Self::Page(PageCommand::ObserveInsertions { .. }) => "page.observeInsertions",
            Self::Element(ElementCommand::BindIntents { .. }) => "element.bindIntents",
            Self::Overlay(OverlayCommand::Create { .. }) => "overlay.create",
            Self::Overlay(OverlayCommand::SetContainerStyle { .. }) => "overlay.setContainerStyle",
            Self::Overlay(OverlayCommand::SetFrameStyle { .. }) => "overlay.setFrameStyle",
            Self::Overlay(OverlayCommand::SetFrameSource { .. }) => "overlay.setFrameSource",
            Self::Overlay(OverlayCommand::PostMessage { .. }) => "overlay.postMessage",
        }
    }
}

impl From<PageCommand> for Command {
    fn from(command: PageCommand) -> Self {
        Self::Page(command)
    }
}

impl From<ElementCommand> for Command {
    fn from(command: ElementCommand) -> Self {
        Self::Element(command)
    }
}

impl From<OverlayCommand> for Command {
    fn from(command: OverlayCommand) -> Self {
        Self::Overlay(command)
    }
}

// ============================================================================
// Page Commands
// ============================================================================

/// Page-wide listeners the widget relies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageListener {
    /// `window` cross-document `message` events.
    Message,
    /// `document` `keyup` events.
    Keyup,
}

/// Page module commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum PageCommand {
    /// Insert a `<style>` block before the first element matching `before`.
    #[serde(rename = "page.injectStyles")]
    InjectStyles {
        /// Stylesheet text.
        css: String,
        /// Selector of the reference element.
        before: String,
    },

    /// Forward a page-wide event kind to the widget.
    #[serde(rename = "page.subscribe")]
    Subscribe {
        /// Listener to install.
        listener: PageListener,
    },

    /// Report inserted nodes under `target` as `element.added` batches.
    #[serde(rename = "page.observeInsertions")]
    ObserveInsertions {
        /// Selector of the observed root.
        target: String,
        /// Whether descendants of `target` are observed too.
        subtree: bool,
    },
}

// ============================================================================
// Element Commands
// ============================================================================

/// Named intents a tracked link reports back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Intent {
    /// Primary interaction: open the overlay for this link.
    Activate,
    /// Hover: load the frame speculatively.
    PrefetchHint,
}

/// DOM listener wiring for one intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentBinding {
    /// Intent reported when the listener fires.
    pub intent: Intent,
    /// DOM event type to listen for.
    pub event: String,
    /// Suppress the element's default action.
    pub prevent_default: bool,
    /// Stop propagation to ancestor handlers.
    pub stop_propagation: bool,
}

/// Element module commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum ElementCommand {
    /// Attach intent listeners to a tracked link.
    #[serde(rename = "element.bindIntents")]
    BindIntents {
        /// Target element.
        #[serde(rename = "elementId")]
        element_id: ElementId,
        /// Listener wiring.
        intents: Vec<IntentBinding>,
    },
}

// ============================================================================
// Overlay Commands
// ============================================================================

/// Overlay module commands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum OverlayCommand {
    /// Append the container to `<body>` and the frame to the container.
    #[serde(rename = "overlay.create")]
    Create {
        /// Container class.
        #[serde(rename = "containerClass")]
        container_class: String,
        /// Initial container inline style.
        #[serde(rename = "containerStyle")]
        container_style: String,
        /// Frame class.
        #[serde(rename = "frameClass")]
        frame_class: String,
        /// Initial frame inline style.
        #[serde(rename = "frameStyle")]
        frame_style: String,
        /// Additional frame attributes as `(name, value)` pairs.
        #[serde(rename = "frameAttributes")]
        frame_attributes: Vec<(String, String)>,
    },

    /// Replace the container's inline style.
    #[serde(rename = "overlay.setContainerStyle")]
    SetContainerStyle {
        /// Inline style string.
        style: String,
    },

    /// Replace the frame's inline style.
    #[serde(rename = "overlay.setFrameStyle")]
    SetFrameStyle {
        /// Inline style string.
        style: String,
    },

    /// Point the frame at a new document.
    #[serde(rename = "overlay.setFrameSource")]
    SetFrameSource {
        /// Frame URL.
        url: String,
    },

    /// `postMessage` to the frame's window. Fire-and-forget.
    #[serde(rename = "overlay.postMessage")]
    PostMessage {
        /// Payload.
        message: String,
        /// Target origin.
        #[serde(rename = "targetOrigin")]
        target_origin: String,
    },
}

// ============================================================================
// Tests
// ============================================================================
