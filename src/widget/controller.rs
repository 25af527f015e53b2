//! Overlay controller: link tracking and the open/close state machine.
//!
//! # States
//!
//! | State | Active link | Frame size |
//! |-------|-------------|------------|
//! | [`OverlayState::Closed`] | none | zero |
//! | [`OverlayState::Open`] | one tracked link | full viewport |
//!
//! Every transition runs to completion inside one event. Frame loads are
//! started but never awaited; a later open or close simply supersedes them.

// ============================================================================
// Imports
// ============================================================================

use rustc_hash::FxHashMap;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::{ScriptConfig, WidgetOptions};
use crate::error::Result;
use crate::identifiers::{ElementId, LinkId};
use crate::matcher::LinkMatcher;
use crate::protocol::{
    ElementSnapshot, Intent, OverlayCommand, PageCommand, PageListener, ParsedEvent, Viewport,
};
use crate::style::{CONTAINER_CLASS, FRAME_CLASS, STYLESHEET, StyleValue, Styles};

use super::host::Host;
use super::keyboard::Key;
use super::link::TrackedLink;

// ============================================================================
// Constants
// ============================================================================

/// Selector the stylesheet is inserted before.
const STYLE_ANCHOR: &str = "script";

/// Root of insertion observation.
const OBSERVED_ROOT: &str = "body";

/// Target origin for messages posted to the frame.
const FRAME_TARGET_ORIGIN: &str = "*";

// ============================================================================
// OverlayState
// ============================================================================

/// Visible state of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    /// No active link; container and frame collapsed.
    Closed,
    /// A link is active; frame covers the viewport.
    Open,
}

// ============================================================================
// OverlayController
// ============================================================================

/// Owns the tracked links, the selection state and the overlay frame.
///
/// One controller exists per page. It is the only writer of the overlay
/// container and frame; tracked links only report intents back to it.
pub struct OverlayController<H: Host> {
    host: H,
    options: WidgetOptions,
    viewport: Viewport,
    matcher: LinkMatcher,
    links: Vec<TrackedLink>,
    by_element: FxHashMap<ElementId, LinkId>,
    active: Option<LinkId>,
    prefetched: Option<String>,
    frame_source: Option<String>,
    scanned: bool,
    observing: bool,
}

impl<H: Host> std::fmt::Debug for OverlayController<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayController")
            .field("links", &self.links.len())
            .field("active", &self.active)
            .field("prefetched", &self.prefetched)
            .field("observing", &self.observing)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Construction
// ============================================================================

impl<H: Host> OverlayController<H> {
    /// Creates the controller and installs the overlay on the page.
    ///
    /// Accepted host fragments are the option defaults plus whatever the
    /// page's configuration element adds. They are fixed from here on.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`](crate::Error::Config) if the options are invalid
    /// - [`Error::Pattern`](crate::Error::Pattern) if a fragment breaks the link pattern
    pub fn new(
        options: WidgetOptions,
        script: Option<&ScriptConfig>,
        viewport: Viewport,
        host: H,
    ) -> Result<Self> {
        options.validate()?;
        let matcher = LinkMatcher::new(options.accepted_fragments(script))?;

        let mut controller = Self {
            host,
            options,
            viewport,
            matcher,
            links: Vec::new(),
            by_element: FxHashMap::default(),
            active: None,
            prefetched: None,
            frame_source: None,
            scanned: false,
            observing: false,
        };
        controller.install();

        debug!(
            fragments = ?controller.matcher.fragments(),
            width = viewport.width,
            height = viewport.height,
            "Overlay controller created"
        );

        Ok(controller)
    }

    /// Injects styles, creates the collapsed overlay and subscribes to
    /// page-wide messages and key releases.
    fn install(&mut self) {
        self.host.send(
            PageCommand::InjectStyles {
                css: STYLESHEET.to_string(),
                before: STYLE_ANCHOR.to_string(),
            }
            .into(),
        );

        let container_style = if self.viewport.width > 0 && self.viewport.height > 0 {
            Styles::new()
                .set("max-width", format!("{}px", self.viewport.width))
                .set("max-height", format!("{}px", self.viewport.height))
        } else {
            Styles::new()
        };

        self.host.send(
            OverlayCommand::Create {
                container_class: CONTAINER_CLASS.to_string(),
                container_style: container_style.to_string(),
                frame_class: FRAME_CLASS.to_string(),
                frame_style: Styles::new().set("width", 0u32).set("height", 0u32).to_string(),
                frame_attributes: vec![
                    ("allowfullscreen".into(), "allowfullscreen".into()),
                    ("scrolling".into(), "no".into()),
                    ("allowtransparency".into(), "true".into()),
                ],
            }
            .into(),
        );

        for listener in [PageListener::Message, PageListener::Keyup] {
            self.host.send(PageCommand::Subscribe { listener }.into());
        }
    }
}

// ============================================================================
// Link Discovery
// ============================================================================

impl<H: Host> OverlayController<H> {
    /// Tracks every matching link present at load time.
    ///
    /// Only the first call scans; later calls return 0.
    pub fn scan_existing(&mut self, elements: &[ElementSnapshot]) -> usize {
        if self.scanned {
            trace!("Initial scan already done");
            return 0;
        }
        self.scanned = true;

        let added = self.track_all(elements);
        debug!(scanned = elements.len(), tracked = added, "Initial link scan");
        added
    }

    /// Asks the page to report inserted nodes under `<body>`.
    pub fn observe_insertions(&mut self) {
        if self.observing {
            return;
        }
        self.observing = true;

        self.host.send(
            PageCommand::ObserveInsertions {
                target: OBSERVED_ROOT.to_string(),
                subtree: true,
            }
            .into(),
        );
    }

    /// Tracks matching links from one insertion batch, in delivery order.
    ///
    /// Batches arriving before [`observe_insertions`](Self::observe_insertions)
    /// are ignored.
    pub fn handle_insertions(&mut self, nodes: &[ElementSnapshot]) -> usize {
        if !self.observing {
            trace!(count = nodes.len(), "Insertion batch before observation, ignored");
            return 0;
        }

        let added = self.track_all(nodes);
        if added > 0 {
            debug!(inserted = nodes.len(), tracked = added, "Tracked inserted links");
        }
        added
    }

    fn track_all(&mut self, elements: &[ElementSnapshot]) -> usize {
        elements
            .iter()
            .filter(|element| self.track(element).is_some())
            .count()
    }

    /// Wraps `element` if it is an unseen anchor with a product href.
    fn track(&mut self, element: &ElementSnapshot) -> Option<LinkId> {
        if !element.is_anchor() {
            return None;
        }

        if self.by_element.contains_key(&element.element_id) {
            trace!(element_id = %element.element_id, "Element already tracked");
            return None;
        }

        let Some(product_id) = self.matcher.extract_product_id(element.href.as_deref()) else {
            trace!(element_id = %element.element_id, href = ?element.href, "Not a product link");
            return None;
        };

        let id = LinkId::new(self.links.len());
        let link = TrackedLink::new(id, element.element_id.clone(), product_id);

        self.host.send(link.bind_command());
        self.by_element.insert(element.element_id.clone(), id);

        debug!(%id, element_id = %link.element(), product_id = link.product_id(), "Link tracked");
        self.links.push(link);

        Some(id)
    }
}

// ============================================================================
// Transitions
// ============================================================================

impl<H: Host> OverlayController<H> {
    /// Routes an intent reported by a tracked element.
    ///
    /// Intents from untracked elements are ignored.
    pub fn dispatch(&mut self, intent: Intent, element: &ElementId) {
        let Some(&id) = self.by_element.get(element) else {
            trace!(element_id = %element, ?intent, "Intent from untracked element");
            return;
        };

        match intent {
            Intent::Activate => self.set_active_link(id),
            Intent::PrefetchHint => self.prefetch_link(id),
        }
    }

    /// Loads the link's product into the frame unless it is already there.
    ///
    /// Repeated hovers over the same product never reload the frame.
    pub fn prefetch_link(&mut self, id: LinkId) {
        let Some(product_id) = self.product_of(id) else {
            return;
        };

        if self.prefetched.as_deref() == Some(product_id.as_str()) {
            trace!(%id, %product_id, "Product already prefetched");
            return;
        }

        self.load_frame(product_id);
    }

    /// Makes `id` the active link and opens the overlay.
    ///
    /// Loads the frame first when the product was not prefetched, which
    /// covers clicks with no prior hover (touch, keyboard activation).
    pub fn set_active_link(&mut self, id: LinkId) {
        let Some(product_id) = self.product_of(id) else {
            return;
        };

        self.active = Some(id);

        if self.prefetched.as_deref() != Some(product_id.as_str()) {
            self.load_frame(product_id);
        }

        self.open_iframe();
    }

    /// Clears the selection and collapses the overlay.
    pub fn close_iframe(&mut self) {
        self.active = None;
        self.prefetched = None;

        self.host.send(
            OverlayCommand::SetContainerStyle {
                style: Styles::new().set("width", 0u32).set("height", 0u32).to_string(),
            }
            .into(),
        );
        self.host.send(
            OverlayCommand::SetFrameStyle {
                style: Styles::new()
                    .set("max-width", 0u32)
                    .set("max-height", 0u32)
                    .set("width", 0u32)
                    .set("height", 0u32)
                    .to_string(),
            }
            .into(),
        );

        debug!("Overlay closed");
    }

    /// Closes the overlay on Escape while it is open.
    pub fn handle_keyup(&mut self, key: &str, key_code: u32) {
        if Key::from_event(key, key_code) == Some(Key::Escape) && self.active.is_some() {
            self.close_iframe();
        }
    }

    /// Closes the overlay when `data` is exactly the close sentinel.
    ///
    /// Any other payload, string or not, is ignored.
    pub fn handle_message(&mut self, data: &Value) {
        match data.as_str() {
            Some(message) if message == self.options.close_message => self.close_iframe(),
            _ => trace!(?data, "Ignoring window message"),
        }
    }

    /// Applies a parsed page event.
    ///
    /// `page.load` is handled by the bootstrap slot and ignored here.
    pub fn handle(&mut self, event: ParsedEvent) {
        match event {
            ParsedEvent::ElementsAdded { nodes } => {
                self.handle_insertions(&nodes);
            }
            ParsedEvent::ElementClicked { element_id } => {
                self.dispatch(Intent::Activate, &element_id);
            }
            ParsedEvent::ElementHovered { element_id } => {
                self.dispatch(Intent::PrefetchHint, &element_id);
            }
            ParsedEvent::KeyUp { key, key_code } => self.handle_keyup(&key, key_code),
            ParsedEvent::WindowMessage { data } => self.handle_message(&data),
            ParsedEvent::PageLoad(_) => trace!("Page load after creation, ignored"),
            ParsedEvent::Unknown { method, .. } => trace!(%method, "Ignoring unknown event"),
        }
    }

    fn product_of(&self, id: LinkId) -> Option<String> {
        let link = self.links.get(id.index());
        if link.is_none() {
            trace!(%id, "Unknown link id");
        }
        link.map(|link| link.product_id().to_string())
    }

    fn load_frame(&mut self, product_id: String) {
        let url = self.options.frame_url(&product_id);
        debug!(%product_id, %url, "Loading frame");

        self.host
            .send(OverlayCommand::SetFrameSource { url: url.clone() }.into());
        self.frame_source = Some(url);
        self.prefetched = Some(product_id);
    }

    fn open_iframe(&mut self) {
        self.host.send(
            OverlayCommand::SetContainerStyle {
                style: Styles::new()
                    .set("width", "100%")
                    .set("height", "100%")
                    .to_string(),
            }
            .into(),
        );
        self.host.send(
            OverlayCommand::SetFrameStyle {
                style: Styles::new()
                    .set("width", viewport_length(self.viewport.width))
                    .set("height", viewport_length(self.viewport.height))
                    .to_string(),
            }
            .into(),
        );
        self.host.send(
            OverlayCommand::PostMessage {
                message: self.options.opened_message.clone(),
                target_origin: FRAME_TARGET_ORIGIN.to_string(),
            }
            .into(),
        );

        debug!(active = ?self.active, "Overlay opened");
    }
}

/// Full-screen length, or `100%` when the screen size is unknown.
fn viewport_length(px: u32) -> StyleValue {
    if px == 0 {
        StyleValue::from("100%")
    } else {
        StyleValue::Length(px)
    }
}

// ============================================================================
// Accessors
// ============================================================================

impl<H: Host> OverlayController<H> {
    /// Returns the current state.
    #[inline]
    #[must_use]
    pub fn state(&self) -> OverlayState {
        if self.active.is_some() {
            OverlayState::Open
        } else {
            OverlayState::Closed
        }
    }

    /// Returns `true` while the overlay is shown.
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.active.is_some()
    }

    /// Returns the link driving the visible overlay.
    #[must_use]
    pub fn active_link(&self) -> Option<&TrackedLink> {
        self.active.and_then(|id| self.links.get(id.index()))
    }

    /// Returns the product currently loaded into the frame.
    #[inline]
    #[must_use]
    pub fn prefetched_product_id(&self) -> Option<&str> {
        self.prefetched.as_deref()
    }

    /// Returns the last URL the frame was pointed at.
    #[inline]
    #[must_use]
    pub fn frame_source(&self) -> Option<&str> {
        self.frame_source.as_deref()
    }

    /// Returns all tracked links in discovery order.
    #[inline]
    #[must_use]
    pub fn links(&self) -> &[TrackedLink] {
        &self.links
    }

    /// Returns the link wrapping `element`, if tracked.
    #[must_use]
    pub fn link_for_element(&self, element: &ElementId) -> Option<&TrackedLink> {
        self.by_element
            .get(element)
            .and_then(|id| self.links.get(id.index()))
    }

    /// Returns the compiled link pattern.
    #[inline]
    #[must_use]
    pub fn matcher(&self) -> &LinkMatcher {
        &self.matcher
    }

    /// Returns the command sink.
    #[inline]
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }
}

// ============================================================================
// Tests
// ============================================================================
