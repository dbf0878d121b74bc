//! Core types for algovista.
//!
//! These types are what the renderer understands: colours, attributes, cells
//! and rectangles. Everything above the renderer eventually becomes these.

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Using integers for exact comparison - no floating point epsilon needed.
/// Special values: r=-1 means "terminal default", r=-2 means ANSI palette index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    /// Transparent color.
    pub const TRANSPARENT: Self = Self {
        r: 0,
        g: 0,
        b: 0,
        a: 0,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    pub const GRAY: Self = Self::rgb(128, 128, 128);

    /// Create an ANSI palette color (0-255).
    ///
    /// Uses special marker: r=-2, g=palette_index.
    pub const fn ansi(index: u8) -> Self {
        Self {
            r: -2,
            g: index as i16,
            b: 0,
            a: 255,
        }
    }

    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    #[inline]
    pub const fn is_ansi(&self) -> bool {
        self.r == -2
    }

    /// Get ANSI palette index (only valid if is_ansi() returns true).
    #[inline]
    pub const fn ansi_index(&self) -> u8 {
        self.g as u8
    }

    #[inline]
    pub const fn is_opaque(&self) -> bool {
        self.a == 255
    }

    #[inline]
    pub const fn is_transparent(&self) -> bool {
        self.a == 0
    }

    /// Alpha blend src over dst.
    ///
    /// Terminal default and ANSI colors are treated as opaque.
    pub fn blend(src: Self, dst: Self) -> Self {
        if src.is_opaque() || src.is_terminal_default() || src.is_ansi() {
            return src;
        }
        if src.is_transparent() {
            return dst;
        }
        // No channel data to mix against, keep the source hue.
        if dst.is_terminal_default() || dst.is_ansi() {
            return Self { a: 255, ..src };
        }

        let t = src.a as f32 / 255.0;
        Self {
            a: 255,
            ..Self::lerp(dst, src, t)
        }
    }

    /// Linear interpolation between two colors.
    #[inline]
    pub fn lerp(a: Self, b: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        Self {
            r: ((a.r as f32 * inv_t) + (b.r as f32 * t)) as i16,
            g: ((a.g as f32 * inv_t) + (b.g as f32 * t)) as i16,
            b: ((a.b as f32 * inv_t) + (b.b as f32 * t)) as i16,
            a: ((a.a as f32 * inv_t) + (b.a as f32 * t)) as i16,
        }
    }


    /// Create from 0xRRGGBB integer format.
    ///
    /// ```
    /// use algovista::types::Rgba;
    ///
    /// let bootstrap_blue = Rgba::from_rgb_int(0x007bff);
    /// assert_eq!(bootstrap_blue, Rgba::rgb(0, 123, 255));
    /// ```
    pub const fn from_rgb_int(rgb: u32) -> Self {
        Self::rgb(
            ((rgb >> 16) & 0xFF) as u8,
            ((rgb >> 8) & 0xFF) as u8,
            (rgb & 0xFF) as u8,
        )
    }

    /// Parse hex color string (#RGB, #RRGGBB).
    ///
    /// ```
    /// use algovista::types::Rgba;
    ///
    /// assert_eq!(Rgba::from_hex("#dc3545"), Some(Rgba::rgb(220, 53, 69)));
    /// assert_eq!(Rgba::from_hex("#fff"), Some(Rgba::WHITE));
    /// assert!(Rgba::from_hex("#gg0000").is_none());
    /// ```
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        match hex.len() {
            3 => {
                let mut channels = [0u8; 3];
                for (slot, ch) in channels.iter_mut().zip(hex.chars()) {
                    let digit = ch.to_digit(16)? as u8;
                    *slot = (digit << 4) | digit;
                }
                Some(Self::rgb(channels[0], channels[1], channels[2]))
            }
            6 => u32::from_str_radix(hex, 16).ok().map(Self::from_rgb_int),
            _ => None,
        }
    }
}

// =============================================================================
// Cell Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::UNDERLINE`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const INVERSE = 1 << 5;
    }
}

// =============================================================================
// Cell - The atomic unit of terminal rendering
// =============================================================================

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    /// Unicode codepoint (32 for space, 0 for a wide-char continuation).
    pub char: u32,
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: b' ' as u32,
            fg: Rgba::TERMINAL_DEFAULT,
            bg: Rgba::TERMINAL_DEFAULT,
            attrs: Attr::NONE,
        }
    }
}

// =============================================================================
// ClipRect
// =============================================================================

/// A rectangle in cell coordinates, used for panels and clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClipRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl ClipRect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Check if a point is inside this rect.
    #[inline]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x
            && x < self.x.saturating_add(self.width)
            && y >= self.y
            && y < self.y.saturating_add(self.height)
    }

    /// Compute intersection of two rects.
    pub fn intersect(&self, other: &ClipRect) -> Option<ClipRect> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.x.saturating_add(self.width).min(other.x.saturating_add(other.width));
        let y2 = self.y.saturating_add(self.height).min(other.y.saturating_add(other.height));

        if x2 > x1 && y2 > y1 {
            Some(ClipRect::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }

    /// Shrink by `n` cells on every side (the area inside a border).
    pub fn inset(&self, n: u16) -> ClipRect {
        ClipRect::new(
            self.x.saturating_add(n),
            self.y.saturating_add(n),
            self.width.saturating_sub(n * 2),
            self.height.saturating_sub(n * 2),
        )
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

// =============================================================================
// Border Styles
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum BorderStyle {
    #[default]
    None = 0,
    /// ─ │ ┌ ┐ └ ┘
    Single = 1,
    /// ═ ║ ╔ ╗ ╚ ╝
    Double = 2,
    /// ─ │ ╭ ╮ ╰ ╯
    Rounded = 3,
    /// ━ ┃ ┏ ┓ ┗ ┛
    Bold = 4,
    /// - | + + + +
    Ascii = 7,
}

impl BorderStyle {
    /// Returns: (horizontal, vertical, top_left, top_right, bottom_right, bottom_left)
    pub const fn chars(&self) -> (char, char, char, char, char, char) {
        match self {
            Self::None => (' ', ' ', ' ', ' ', ' ', ' '),
            Self::Single => ('─', '│', '┌', '┐', '┘', '└'),
            Self::Double => ('═', '║', '╔', '╗', '╝', '╚'),
            Self::Rounded => ('─', '│', '╭', '╮', '╯', '╰'),
            Self::Bold => ('━', '┃', '┏', '┓', '┛', '┗'),
            Self::Ascii => ('-', '|', '+', '+', '+', '+'),
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
    fn test_blend_opaque_source_wins() {
        assert_eq!(Rgba::blend(Rgba::RED, Rgba::BLUE), Rgba::RED);
        assert_eq!(Rgba::blend(Rgba::TRANSPARENT, Rgba::BLUE), Rgba::BLUE);
    }

    #[test]
    fn test_blend_half_alpha() {
        let half_white = Rgba::new(255, 255, 255, 128);
        let out = Rgba::blend(half_white, Rgba::BLACK);
        assert!(out.r > 120 && out.r < 135);
        assert_eq!(out.a, 255);
    }

    #[test]
    fn test_ansi_marker() {
        let c = Rgba::ansi(12);
        assert!(c.is_ansi());
        assert_eq!(c.ansi_index(), 12);
        assert!(!Rgba::WHITE.is_ansi());
    }

    #[test]
    fn test_clip_rect_inset() {
        let r = ClipRect::new(2, 3, 10, 6);
        assert_eq!(r.inset(1), ClipRect::new(3, 4, 8, 4));
        assert!(ClipRect::new(0, 0, 1, 1).inset(1).is_empty());
    }

    #[test]
    fn test_clip_rect_intersect() {
        let a = ClipRect::new(0, 0, 20, 20);
        let b = ClipRect::new(10, 10, 20, 20);
        assert_eq!(a.intersect(&b), Some(ClipRect::new(10, 10, 10, 10)));
        assert!(a.intersect(&ClipRect::new(100, 100, 5, 5)).is_none());
    }

    #[test]
    fn test_attr_combination() {
        let a = Attr::BOLD | Attr::UNDERLINE;
        assert!(a.contains(Attr::BOLD));
        assert!(!a.contains(Attr::DIM));
    }
}
