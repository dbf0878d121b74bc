//! Theme system for algovista.
//!
//! A theme is a set of semantic colour slots plus the six-colour palette used
//! for resting elements. Scenes never name colours directly: they carry a
//! [`Tone`] and the painter resolves it through the active theme, so
//! switching presets recolours every visualizer at once.
//!
//! # Color Types
//!
//! - `ThemeColor::Default` - Uses terminal's default color
//! - `ThemeColor::Ansi(n)` - ANSI palette index (0-255)
//! - `ThemeColor::Rgb(rgba)` - Explicit RGB color
//!
//! # Example
//!
//! ```rust
//! use algovista::theme::{get_preset, Tone};
//!
//! let nord = get_preset("nord").unwrap();
//! let found = nord.tone(Tone::Found);
//! assert_eq!(found, nord.success.resolve());
//! ```

use crate::types::Rgba;

pub mod presets;

pub use presets::*;

// =============================================================================
// ThemeColor
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeColor {
    /// Use terminal's default color.
    #[default]
    Default,
    /// ANSI palette index (0-255).
    /// - 0-7: Standard colors
    /// - 8-15: Bright colors
    /// - 16-255: extended palette
    Ansi(u8),
    /// Explicit RGB color.
    Rgb(Rgba),
}

impl ThemeColor {
    pub fn resolve(&self) -> Rgba {
        match self {
            Self::Default => Rgba::TERMINAL_DEFAULT,
            Self::Ansi(i) => Rgba::ansi(*i),
            Self::Rgb(c) => *c,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

/// `u8` is an ANSI index.
impl From<u8> for ThemeColor {
    fn from(index: u8) -> Self {
        Self::Ansi(index)
    }
}

/// `u32` is an RGB integer (0xRRGGBB).
impl From<u32> for ThemeColor {
    fn from(rgb: u32) -> Self {
        Self::Rgb(Rgba::from_rgb_int(rgb))
    }
}

// =============================================================================
// Tone - what a highlighted element means
// =============================================================================

/// Semantic highlight carried by scene shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Resting element; the index picks a palette slot (wrapping).
    Fill(usize),
    /// Being compared or about to be inserted.
    Pending,
    /// Swapped, deleted or mismatched.
    Removing,
    /// Currently inspected.
    Probing,
    /// Match, or the current traversal node.
    Found,
    /// Already visited during a traversal.
    Visited,
    /// TOP / HEAD / FRONT style labels.
    Pointer,
    Plain,
    Muted,
}

impl Tone {
    /// Resting tone for a value, stable across repaints.
    pub fn for_value(value: i64) -> Self {
        Tone::Fill(value.rem_euclid(PALETTE_SIZE as i64) as usize)
    }

    /// Whether this tone marks an element as highlighted.
    pub fn is_highlight(&self) -> bool {
        !matches!(self, Tone::Fill(_) | Tone::Plain | Tone::Muted)
    }
}

/// Number of colours in a theme palette.
pub const PALETTE_SIZE: usize = 6;

// =============================================================================
// Theme
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub description: &'static str,

    pub primary: ThemeColor,
    pub accent: ThemeColor,

    pub success: ThemeColor,
    pub warning: ThemeColor,
    pub error: ThemeColor,
    pub info: ThemeColor,

    pub text: ThemeColor,
    pub text_muted: ThemeColor,
    pub text_bright: ThemeColor,
    /// Text drawn on top of a filled element.
    pub on_fill: ThemeColor,

    pub background: ThemeColor,
    pub surface: ThemeColor,

    pub border: ThemeColor,
    pub border_focus: ThemeColor,

    /// Resting element colours.
    pub palette: [ThemeColor; PALETTE_SIZE],
}

impl Default for Theme {
    fn default() -> Self {
        terminal()
    }
}

impl Theme {
    /// Resolve a highlight tone to a colour.
    pub fn tone(&self, tone: Tone) -> Rgba {
        match tone {
            Tone::Fill(n) => self.palette[n % PALETTE_SIZE].resolve(),
            Tone::Pending => self.warning.resolve(),
            Tone::Removing => self.error.resolve(),
            Tone::Probing => self.info.resolve(),
            Tone::Found | Tone::Pointer => self.success.resolve(),
            Tone::Visited => self.primary.resolve(),
            Tone::Plain => self.text.resolve(),
            Tone::Muted => self.text_muted.resolve(),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_color_resolve() {
        assert!(ThemeColor::Default.resolve().is_terminal_default());
        assert_eq!(ThemeColor::Ansi(12).resolve().ansi_index(), 12);
        assert_eq!(ThemeColor::from(0xff0000u32).resolve(), Rgba::rgb(255, 0, 0));
    }

    #[test]
    fn test_tone_mapping() {
        let theme = Theme::default();
        assert_eq!(theme.tone(Tone::Pending), theme.warning.resolve());
        assert_eq!(theme.tone(Tone::Removing), theme.error.resolve());
        assert_eq!(theme.tone(Tone::Probing), theme.info.resolve());
        assert_eq!(theme.tone(Tone::Found), theme.success.resolve());
        assert_eq!(theme.tone(Tone::Visited), theme.primary.resolve());
        assert_eq!(theme.tone(Tone::Fill(7)), theme.palette[1].resolve());
    }

    #[test]
    fn test_tone_for_value_is_stable() {
        assert_eq!(Tone::for_value(42), Tone::for_value(42));
        assert_eq!(Tone::for_value(13), Tone::Fill(1));
        assert_eq!(Tone::for_value(-1), Tone::Fill(5));
        assert!(!Tone::for_value(3).is_highlight());
        assert!(Tone::Found.is_highlight());
    }
}
