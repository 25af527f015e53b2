//! Keyboard key identification.
//!
//! Maps `keyup` payloads back to the keys the widget reacts to. Both the
//! modern `key` value and the legacy `keyCode` are accepted.

// ============================================================================
// Key Enum
// ============================================================================

/// Keys the widget reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape key, closes an open overlay.
    Escape,
}

const ALL_KEYS: [Key; 1] = [Key::Escape];

impl Key {
    /// Returns the key properties: (key, legacy alias, keyCode).
    #[must_use]
    pub fn properties(self) -> (&'static str, Option<&'static str>, u32) {
        match self {
            Key::Escape => ("Escape", Some("Esc"), 27),
        }
    }

    /// Returns the legacy keyCode.
    #[inline]
    #[must_use]
    pub fn key_code(self) -> u32 {
        self.properties().2
    }

    /// Identifies a key from a `keyup` payload.
    ///
    /// `key` is tried first. When it is empty or unrecognised (mobile
    /// browsers send `"Unidentified"`), `key_code` decides. Returns `None`
    /// for keys the widget ignores.
    #[must_use]
    pub fn from_event(key: &str, key_code: u32) -> Option<Self> {
        let by_name = ALL_KEYS.into_iter().find(|k| {
            let (name, alias, _) = k.properties();
            !key.is_empty() && (name == key || alias == Some(key))
        });

        by_name.or_else(|| ALL_KEYS.into_iter().find(|k| k.key_code() == key_code))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_properties() {
        let (key, alias, key_code) = Key::Escape.properties();
        assert_eq!(key, "Escape");
        assert_eq!(alias, Some("Esc"));
        assert_eq!(key_code, 27);
    }

    #[test]
    fn test_from_event() {
        assert_eq!(Key::from_event("Escape", 27), Some(Key::Escape));
        assert_eq!(Key::from_event("Esc", 0), Some(Key::Escape));
        assert_eq!(Key::from_event("", 27), Some(Key::Escape));
        assert_eq!(Key::from_event("Enter", 13), None);
        assert_eq!(Key::from_event("q", 81), None);
        assert_eq!(Key::from_event("", 0), None);
    }

    #[test]
    fn test_unidentified_key_falls_back_to_key_code() {
        assert_eq!(Key::from_event("Unidentified", 27), Some(Key::Escape));
        assert_eq!(Key::from_event("Unidentified", 13), None);
    }
}
