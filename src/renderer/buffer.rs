//! FrameBuffer and drawing primitives.
//!
//! The FrameBuffer is the drawing surface: a 2D grid of Cells that represents
//! what should be displayed on the terminal. Panels, scenes and widgets all
//! paint into it; the diff renderer turns it into escape sequences.
//!
//! - **Flat storage**: `Vec<Cell>` with row-major indexing.
//! - **Clipping**: drawing functions accept an optional `ClipRect`.
//! - **Wide characters**: CJK/emoji use a continuation cell (char = 0).

use crate::types::{Attr, BorderStyle, Cell, ClipRect, Rgba};

// =============================================================================
// FrameBuffer
// =============================================================================

/// A 2D buffer of terminal cells, `index = y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    /// Create a new buffer filled with default cells.
    pub fn new(width: u16, height: u16) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![Cell::default(); size],
        }
    }

    /// Create a new buffer with a specific background color.
    pub fn with_background(width: u16, height: u16, bg: Rgba) -> Self {
        let mut buffer = Self::new(width, height);
        for cell in &mut buffer.cells {
            cell.bg = bg;
        }
        buffer
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer bounds.
    #[inline]
    pub fn bounds(&self) -> ClipRect {
        ClipRect::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn in_bounds(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height
    }

    #[inline]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if self.in_bounds(x, y) {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    #[inline]
    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if self.in_bounds(x, y) {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Iterate over cells with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.width.max(1) as usize;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            ((i % width) as u16, (i / width) as u16, cell)
        })
    }

    /// The visible text of one row, continuation cells skipped.
    ///
    /// Handy for snapshot-style assertions.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| cell.char != 0)
            .filter_map(|cell| char::from_u32(cell.char))
            .collect()
    }

    /// All rows joined by newlines, trailing spaces trimmed.
    pub fn to_text(&self) -> String {
        (0..self.height)
            .map(|y| self.row_text(y).trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    // =========================================================================
    // Drawing Primitives
    // =========================================================================

    /// Set a single cell with optional clipping.
    ///
    /// Returns true if the cell was set.
    pub fn set_cell(
        &mut self,
        x: u16,
        y: u16,
        char: u32,
        fg: Rgba,
        bg: Rgba,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        if let Some(clip) = clip {
            if !clip.contains(x, y) {
                return false;
            }
        }

        let idx = self.index(x, y);
        let cell = &mut self.cells[idx];

        cell.bg = if bg.is_opaque() || bg.is_terminal_default() || bg.is_ansi() {
            bg
        } else {
            Rgba::blend(bg, cell.bg)
        };
        cell.char = char;
        cell.fg = fg;
        cell.attrs = attrs;

        true
    }

    /// Fill a rectangle with a background color.
    pub fn fill_rect(&mut self, rect: ClipRect, bg: Rgba, clip: Option<&ClipRect>) {
        let area = match clip {
            Some(clip) => rect.intersect(clip),
            None => Some(rect),
        };
        let Some(area) = area.and_then(|a| a.intersect(&self.bounds())) else {
            return;
        };

        let is_opaque = bg.is_opaque() || bg.is_terminal_default() || bg.is_ansi();

        for row in area.y..area.y + area.height {
            let start = self.index(area.x, row);
            let end = start + area.width as usize;
            for cell in &mut self.cells[start..end] {
                cell.bg = if is_opaque { bg } else { Rgba::blend(bg, cell.bg) };
                cell.char = b' ' as u32;
                cell.attrs = Attr::NONE;
            }
        }
    }

    /// Draw a single character; `None` background keeps what is underneath.
    pub fn draw_char(
        &mut self,
        x: u16,
        y: u16,
        char: char,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> bool {
        let bg = bg.unwrap_or(Rgba::TRANSPARENT);
        self.set_cell(x, y, char as u32, fg, bg, attrs, clip)
    }

    /// Draw text at a position.
    ///
    /// Returns the number of cells used (handles wide characters).
    pub fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> u16 {
        let bg = bg.unwrap_or(Rgba::TRANSPARENT);
        let mut col = x;

        for ch in text.chars() {
            if col >= self.width {
                break;
            }

            let width = char_width(ch) as u16;
            if width == 0 {
                continue;
            }

            if self.set_cell(col, y, ch as u32, fg, bg, attrs, clip) && width == 2 {
                let next_visible = clip.is_none_or(|c| c.contains(col + 1, y));
                if next_visible {
                    if let Some(next) = self.get_mut(col + 1, y) {
                        next.char = 0;
                        next.fg = fg;
                        next.attrs = attrs;
                    }
                }
            }

            col = col.saturating_add(width);
        }

        col.saturating_sub(x)
    }

    /// Draw text centered within a width.
    pub fn draw_text_centered(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        text: &str,
        fg: Rgba,
        bg: Option<Rgba>,
        attrs: Attr,
        clip: Option<&ClipRect>,
    ) -> u16 {
        let text_width = string_width(text);
        if text_width >= width as usize {
            return self.draw_text(x, y, text, fg, bg, attrs, clip);
        }
        let offset = ((width as usize - text_width) / 2) as u16;
        self.draw_text(x + offset, y, text, fg, bg, attrs, clip)
    }

    /// Draw a border around a rectangle.
    pub fn draw_border(
        &mut self,
        rect: ClipRect,
        style: BorderStyle,
        color: Rgba,
        bg: Option<Rgba>,
        clip: Option<&ClipRect>,
    ) {
        if rect.width < 2 || rect.height < 2 || style == BorderStyle::None {
            return;
        }

        let (horiz, vert, tl, tr, br, bl) = style.chars();
        let (x, y) = (rect.x, rect.y);
        let x2 = x + rect.width - 1;
        let y2 = y + rect.height - 1;

        self.draw_char(x, y, tl, color, bg, Attr::NONE, clip);
        self.draw_char(x2, y, tr, color, bg, Attr::NONE, clip);
        self.draw_char(x2, y2, br, color, bg, Attr::NONE, clip);
        self.draw_char(x, y2, bl, color, bg, Attr::NONE, clip);

        for col in (x + 1)..x2 {
            self.draw_char(col, y, horiz, color, bg, Attr::NONE, clip);
            self.draw_char(col, y2, horiz, color, bg, Attr::NONE, clip);
        }
        for row in (y + 1)..y2 {
            self.draw_char(x, row, vert, color, bg, Attr::NONE, clip);
            self.draw_char(x2, row, vert, color, bg, Attr::NONE, clip);
        }
    }

    /// Draw a straight line between two points (Bresenham).
    ///
    /// The glyph follows the overall slope, so tree and graph edges read as
    /// `│`, `─`, `╲` or `╱`. Endpoints are not drawn; nodes sit there.
    pub fn draw_line(
        &mut self,
        from: (i32, i32),
        to: (i32, i32),
        fg: Rgba,
        clip: Option<&ClipRect>,
    ) {
        let (x0, y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };

        let glyph = if dx == 0 {
            '│'
        } else if dy == 0 {
            '─'
        } else if dx > -dy * 3 {
            '─'
        } else if (x1 - x0).signum() == (y1 - y0).signum() {
            '╲'
        } else {
            '╱'
        };

        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        loop {
            let is_endpoint = (x, y) == from || (x, y) == to;
            if !is_endpoint && x >= 0 && y >= 0 && x <= u16::MAX as i32 && y <= u16::MAX as i32 {
                self.draw_char(x as u16, y as u16, glyph, fg, None, Attr::NONE, clip);
            }
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draw a progress bar.
    pub fn draw_progress(
        &mut self,
        x: u16,
        y: u16,
        width: u16,
        progress: f32,
        filled_fg: Rgba,
        empty_fg: Rgba,
        clip: Option<&ClipRect>,
    ) {
        let progress = progress.clamp(0.0, 1.0);
        let filled = (progress * width as f32).round() as u16;

        for col in 0..width {
            let (glyph, fg) = if col < filled {
                ('█', filled_fg)
            } else {
                ('░', empty_fg)
            };
            self.draw_char(x + col, y, glyph, fg, None, Attr::NONE, clip);
        }
    }
}

// =============================================================================
// Text Width Utilities
// =============================================================================

/// Get the display width of a character.
///
/// - ASCII printable: 1
/// - Control characters: 0
/// - Wide characters (CJK, emoji): 2
pub fn char_width(c: char) -> usize {
    let cp = c as u32;

    if cp < 32 || (0x7F..=0x9F).contains(&cp) {
        return 0;
    }
    if cp < 127 {
        return 1;
    }
    if is_wide_char(cp) {
        return 2;
    }
    1
}

fn is_wide_char(cp: u32) -> bool {
    (0x1100..=0x115F).contains(&cp)       // Hangul Jamo
        || (0x2E80..=0x9FFF).contains(&cp)   // CJK
        || (0xAC00..=0xD7A3).contains(&cp)   // Hangul Syllables
        || (0xF900..=0xFAFF).contains(&cp)   // CJK Compatibility Ideographs
        || (0xFF00..=0xFF60).contains(&cp)   // Fullwidth forms
        || (0x1F300..=0x1F9FF).contains(&cp) // Emoji
}

/// Calculate the display width of a string.
pub fn string_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

/// Cut a string to at most `max` display cells, appending `…` when cut.
pub fn truncate(s: &str, max: usize) -> String {
    if string_width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = char_width(ch);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Greedy word wrap to `width` display cells. Words longer than a line are
/// left whole.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && string_width(&line) + 1 + string_width(word) > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

// =============================================================================
// Tests
// =============================================================================
