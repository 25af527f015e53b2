//! Event message types.
//!
//! Events are notifications sent from the page shim to the widget when
//! something happens in the host document.
//!
//! # Event Types
//!
//! | Module | Events |
//! |--------|--------|
//! | `page` | `load` |
//! | `element` | `added`, `click`, `mouseenter` |
//! | `document` | `keyup` |
//! | `window` | `message` |
//!
//! Parsing never fails: missing fields fall back to defaults and unknown
//! methods become [`ParsedEvent::Unknown`].

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::trace;

use crate::config::ScriptConfig;
use crate::identifiers::ElementId;

// ============================================================================
// Event
// ============================================================================

/// An event notification from the page shim.
///
/// # Format
///
/// ```json
/// {
///   "method": "module.eventName",
///   "params": { ... }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Event name in `module.eventName` format.
    pub method: String,

    /// Event-specific data.
    #[serde(default)]
    pub params: Value,
}

impl Event {
    /// Creates an event.
    #[inline]
    #[must_use]
    pub fn new(method: impl Into<String>, params: Value) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }

    /// Parses the event into a typed variant.
    #[must_use]
    pub fn parse(&self) -> ParsedEvent {
        self.parse_internal()
    }
}

// ============================================================================
// Payload Types
// ============================================================================

/// Snapshot of a host-page element as reported by the shim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSnapshot {
    /// Shim-assigned handle.
    pub element_id: ElementId,

    /// Node name (`A`, `DIV`, ...).
    #[serde(default)]
    pub tag: String,

    /// Raw `href` attribute, if any.
    #[serde(default)]
    pub href: Option<String>,
}

impl ElementSnapshot {
    /// Creates an anchor snapshot.
    #[must_use]
    pub fn anchor(element_id: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            element_id: ElementId::new(element_id),
            tag: "A".to_string(),
            href: Some(href.into()),
        }
    }

    /// Returns `true` for `<a>` elements.
    #[inline]
    #[must_use]
    pub fn is_anchor(&self) -> bool {
        self.tag.eq_ignore_ascii_case("a")
    }
}

/// Screen size in CSS pixels. Zero means unknown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    #[serde(default)]
    pub width: u32,
    /// Height in pixels.
    #[serde(default)]
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport of `width` x `height` pixels.
    #[inline]
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Page state delivered once the host document has loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageLoad {
    /// Screen size.
    pub viewport: Viewport,
    /// Configuration element dataset; `None` when the element is absent.
    pub config: Option<ScriptConfig>,
    /// Every `<a>` element present at load time.
    pub links: Vec<ElementSnapshot>,
}

// ============================================================================
// ParsedEvent
// ============================================================================

/// Parsed event types for type-safe handling.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedEvent {
    /// Host document finished loading.
    PageLoad(PageLoad),

    /// One mutation batch of inserted nodes, in delivery order.
    ElementsAdded {
        /// Inserted nodes.
        nodes: Vec<ElementSnapshot>,
    },

    /// `click` on a bound element.
    ElementClicked {
        /// Element ID.
        element_id: ElementId,
    },

    /// `mouseenter` on a bound element.
    ElementHovered {
        /// Element ID.
        element_id: ElementId,
    },

    /// `keyup` on the document.
    KeyUp {
        /// `KeyboardEvent.key`.
        key: String,
        /// Legacy `KeyboardEvent.keyCode`.
        key_code: u32,
    },

    /// Cross-document message received by the window.
    WindowMessage {
        /// Message payload, any JSON shape.
        data: Value,
    },

    /// Unknown event type.
    Unknown {
        /// Event method.
        method: String,
        /// Event params.
        params: Value,
    },
}

// ============================================================================
// Event Parsing Implementation
// ============================================================================

impl Event {
    /// Internal parsing implementation.
    fn parse_internal(&self) -> ParsedEvent {
        match self.method.as_str() {
            "page.load" => ParsedEvent::PageLoad(PageLoad {
                viewport: self.get_as("viewport").unwrap_or_default(),
                config: self.get_as("config"),
                links: self.get_elements("links"),
            }),

            "element.added" => ParsedEvent::ElementsAdded {
                nodes: self.get_elements("nodes"),
            },

            "element.click" => ParsedEvent::ElementClicked {
                element_id: ElementId::new(self.get_string("elementId")),
            },

            "element.mouseenter" => ParsedEvent::ElementHovered {
                element_id: ElementId::new(self.get_string("elementId")),
            },

            "document.keyup" => ParsedEvent::KeyUp {
                key: self.get_string("key"),
                key_code: self.get_u32("keyCode"),
            },

            "window.message" => ParsedEvent::WindowMessage {
                data: self.params.get("data").cloned().unwrap_or(Value::Null),
            },

            _ => ParsedEvent::Unknown {
                method: self.method.clone(),
                params: self.params.clone(),
            },
        }
    }

    /// Gets a string from params.
    #[inline]
    fn get_string(&self, key: &str) -> String {
        self.params
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string()
    }

    /// Gets a u32 from params. Out-of-range values count as absent.
    #[inline]
    fn get_u32(&self, key: &str) -> u32 {
        self.params
            .get(key)
            .and_then(|v| v.as_u64())
            .and_then(|v| u32::try_from(v).ok())
            .unwrap_or_default()
    }

    /// Deserializes a param, treating `null` and malformed values as absent.
    fn get_as<T>(&self, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let value = self.params.get(key).filter(|v| !v.is_null())?;
        match T::deserialize(value) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                trace!(method = %self.method, key, error = %e, "Ignoring malformed param");
                None
            }
        }
    }

    /// Gets an element list, skipping entries that are not element snapshots.
    fn get_elements(&self, key: &str) -> Vec<ElementSnapshot> {
        self.params
            .get(key)
            .and_then(|v| v.as_array())
            .map(|arr| {
                arr.iter()
                    .filter_map(|v| ElementSnapshot::deserialize(v).ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_page_load_parsing() {
        let json_str = r#"{
            "method": "page.load",
            "params": {
                "viewport": { "width": 1440, "height": 900 },
                "config": { "gumroadSubdomain": "alice" },
                "links": [
                    { "elementId": "el-1", "tag": "A", "href": "https://gum.co/abc" },
                    { "elementId": "el-2", "tag": "A" },
                    { "bogus": true }
                ]
            }
        }"#;

        let event: Event = serde_json::from_str(json_str).expect("parse event");
        assert_eq!(event.method, "page.load");

        match event.parse() {
            ParsedEvent::PageLoad(load) => {
                assert_eq!(load.viewport, Viewport::new(1440, 900));
                assert_eq!(
                    load.config,
                    Some(ScriptConfig::new().with_subdomain("alice"))
                );
                assert_eq!(load.links.len(), 2);
                assert_eq!(load.links[0].href.as_deref(), Some("https://gum.co/abc"));
                assert_eq!(load.links[1].href, None);
            }
            other => panic!("unexpected parsed event: {other:?}"),
        }
    }

    #[test]
    fn test_page_load_without_params() {
        let event: Event = serde_json::from_str(r#"{ "method": "page.load" }"#).expect("parse");
        assert_eq!(event.parse(), ParsedEvent::PageLoad(PageLoad::default()));
    }

    #[test]
    fn test_click_parsing() {
        let event = Event::new("element.click", json!({ "elementId": "el-9" }));
        assert_eq!(
            event.parse(),
            ParsedEvent::ElementClicked {
                element_id: ElementId::new("el-9")
            }
        );
    }

    #[test]
    fn test_keyup_parsing() {
        let event = Event::new("document.keyup", json!({ "key": "Escape", "keyCode": 27 }));
        assert_eq!(
            event.parse(),
            ParsedEvent::KeyUp {
                key: "Escape".into(),
                key_code: 27
            }
        );
    }

    #[test]
    fn test_oversized_key_code_is_absent() {
        let event = Event::new(
            "document.keyup",
            json!({ "key": "", "keyCode": 4_294_967_323u64 }),
        );
        assert_eq!(
            event.parse(),
            ParsedEvent::KeyUp {
                key: String::new(),
                key_code: 0
            }
        );
    }

    #[test]
    fn test_message_keeps_any_payload() {
        let event = Event::new("window.message", json!({ "data": { "kind": "resize" } }));
        match event.parse() {
            ParsedEvent::WindowMessage { data } => assert_eq!(data["kind"], "resize"),
            other => panic!("unexpected parsed event: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_event() {
        let event = Event::new("custom.unknownEvent", json!({ "foo": "bar" }));
        match event.parse() {
            ParsedEvent::Unknown { method, .. } => assert_eq!(method, "custom.unknownEvent"),
            other => panic!("expected Unknown variant, got {other:?}"),
        }
    }

    #[test]
    fn test_anchor_detection() {
        assert!(ElementSnapshot::anchor("el-1", "https://gum.co/a").is_anchor());

        let div = ElementSnapshot {
            element_id: ElementId::new("el-2"),
            tag: "div".into(),
            href: None,
        };
        assert!(!div.is_anchor());
    }
}
