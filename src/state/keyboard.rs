//! Keyboard Module - Keyboard event types and last-key state
//!
//! Keys are named the way the input bridge spells them: single characters
//! as themselves (`"a"`, `"+"`, `"/"`), everything else by name
//! (`"Enter"`, `"Escape"`, `"ArrowLeft"`, `"Tab"`, `"BackTab"`).
//!
//! The last key pressed is kept in a signal so the status line can show it.
//!
//! # Example
//!
//! ```ignore
//! use algovista::state::keyboard::{self, KeyboardEvent};
//!
//! keyboard::update_last_event(KeyboardEvent::new("p"));
//! assert_eq!(keyboard::last_key(), "p");
//! ```

use spark_signals::{Signal, signal};

// =============================================================================
// TYPES
// =============================================================================

/// Keyboard modifier state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
}

impl Modifiers {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn ctrl() -> Self {
        Self { ctrl: true, ..Self::default() }
    }
}

/// Key event state (press, repeat, release)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyState {
    #[default]
    Press,
    Repeat,
    Release,
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardEvent {
    /// The key that was pressed (e.g., "a", "Enter", "ArrowLeft")
    pub key: String,
    pub modifiers: Modifiers,
    pub state: KeyState,
}

impl KeyboardEvent {
    /// A plain key press
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            modifiers: Modifiers::default(),
            state: KeyState::Press,
        }
    }

    pub fn with_modifiers(key: impl Into<String>, modifiers: Modifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            state: KeyState::Press,
        }
    }

    /// Press and auto-repeat both count as presses.
    pub fn is_press(&self) -> bool {
        self.state != KeyState::Release
    }

    /// The character, when the key is a single printable one.
    pub fn char(&self) -> Option<char> {
        let mut chars = self.key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }

    /// Ctrl+C
    pub fn is_interrupt(&self) -> bool {
        self.modifiers.ctrl && self.key.eq_ignore_ascii_case("c")
    }
}

// =============================================================================
// STATE
// =============================================================================

thread_local! {
    static LAST_EVENT: Signal<Option<KeyboardEvent>> = signal(None);
}

pub fn last_event() -> Option<KeyboardEvent> {
    LAST_EVENT.with(|s| s.get())
}

/// The last key pressed, or an empty string.
pub fn last_key() -> String {
    last_event().map(|e| e.key).unwrap_or_default()
}

pub fn update_last_event(event: KeyboardEvent) {
    LAST_EVENT.with(|s| s.set(Some(event)));
}

/// Reset keyboard state (for testing)
pub fn reset_keyboard_state() {
    LAST_EVENT.with(|s| s.set(None));
}

// =============================================================================
// TESTS
// =============================================================================
