//! Platform-agnostic input event types.
//!
//! Every host adapter maps its native events (browser keyup, touch
//! gestures, anchor clicks, hashchange, popstate) to these enums. The
//! viewer core never sees raw platform input.

use serde::{Deserialize, Serialize};

/// A platform-agnostic input event delivered to the viewer.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// The URL fragment changed (`#3` -> `"3"`).
    HashChange { fragment: String },
    /// A key was released.
    KeyUp { key: Key, modifiers: Modifiers },
    /// A touch swipe gesture completed.
    Swipe {
        direction: SwipeDirection,
        pointer: PointerKind,
    },
    /// A pointer click landed on the document node with this id.
    Click { target: usize },
    /// Browser back/forward navigation. `state` is the serialized
    /// history record pushed earlier (if any); `fragment` is the URL
    /// fragment after the navigation.
    HistoryPop {
        state: Option<String>,
        fragment: String,
    },
}

/// Keys the viewer reacts to. Everything else maps to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Enter,
    Space,
    Other,
}

/// Modifier key state captured with a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    /// No modifier held.
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    /// Whether any modifier is held.
    pub fn any(&self) -> bool {
        self.ctrl || self.shift || self.alt || self.meta
    }
}

/// Horizontal swipe direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SwipeDirection {
    Left,
    Right,
}

/// What kind of pointer produced a gesture. Mouse "swipes" (drags) are
/// ignored so desktop text selection keeps working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerKind {
    Touch,
    Mouse,
    Pen,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_change_event() {
        let e = InputEvent::HashChange {
            fragment: "3".into(),
        };
        assert_eq!(
            e,
            InputEvent::HashChange {
                fragment: "3".into()
            }
        );
    }

    #[test]
    fn key_up_all_variants() {
        let keys = [
            Key::ArrowLeft,
            Key::ArrowRight,
            Key::Enter,
            Key::Space,
            Key::Other,
        ];
        for key in keys {
            let e = InputEvent::KeyUp {
                key,
                modifiers: Modifiers::NONE,
            };
            assert_eq!(
                e,
                InputEvent::KeyUp {
                    key,
                    modifiers: Modifiers::NONE,
                }
            );
        }
    }

    #[test]
    fn modifiers_none_is_default() {
        assert_eq!(Modifiers::NONE, Modifiers::default());
        assert!(!Modifiers::NONE.any());
    }

    #[test]
    fn modifiers_any_detects_each_flag() {
        let cases = [
            Modifiers {
                ctrl: true,
                ..Modifiers::NONE
            },
            Modifiers {
                shift: true,
                ..Modifiers::NONE
            },
            Modifiers {
                alt: true,
                ..Modifiers::NONE
            },
            Modifiers {
                meta: true,
                ..Modifiers::NONE
            },
        ];
        for m in cases {
            assert!(m.any());
        }
    }

    #[test]
    fn swipe_directions_distinct() {
        let left = InputEvent::Swipe {
            direction: SwipeDirection::Left,
            pointer: PointerKind::Touch,
        };
        let right = InputEvent::Swipe {
            direction: SwipeDirection::Right,
            pointer: PointerKind::Touch,
        };
        assert_ne!(left, right);
    }

    #[test]
    fn pointer_kinds_distinct() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(PointerKind::Touch);
        set.insert(PointerKind::Mouse);
        set.insert(PointerKind::Pen);
        set.insert(PointerKind::Touch);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn click_event_carries_target() {
        let e = InputEvent::Click { target: 7 };
        if let InputEvent::Click { target } = e {
            assert_eq!(target, 7);
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn history_pop_without_state() {
        let e = InputEvent::HistoryPop {
            state: None,
            fragment: "2".into(),
        };
        if let InputEvent::HistoryPop { state, fragment } = e {
            assert!(state.is_none());
            assert_eq!(fragment, "2");
        } else {
            panic!("wrong variant");
        }
    }

    #[test]
    fn key_serde_roundtrip() {
        let k = Key::ArrowRight;
        let json = serde_json::to_string(&k).unwrap();
        let k2: Key = serde_json::from_str(&json).unwrap();
        assert_eq!(k, k2);
    }

    #[test]
    fn swipe_direction_serde_roundtrip() {
        let d = SwipeDirection::Left;
        let json = serde_json::to_string(&d).unwrap();
        let d2: SwipeDirection = serde_json::from_str(&json).unwrap();
        assert_eq!(d, d2);
    }

    #[test]
    fn input_event_clone() {
        let e = InputEvent::Click { target: 42 };
        let e2 = e.clone();
        assert_eq!(e, e2);
    }
}
