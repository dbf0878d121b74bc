//! Batched terminal output.
//!
//! A frame is accumulated in an [`OutputBuffer`] and written with a single
//! syscall. [`StatefulCellRenderer`] remembers the cursor, colours and
//! attributes it last emitted so a frame only carries the escapes it needs.

use std::io::{self, Write};

use super::ansi;
use crate::types::{Attr, Cell, Rgba};

// =============================================================================
// OutputBuffer
// =============================================================================

#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(16 * 1024),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clear without deallocating.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Write a codepoint; invalid ones are dropped.
    #[inline]
    pub fn write_codepoint(&mut self, cp: u32) {
        if let Some(c) = char::from_u32(cp) {
            let mut buf = [0u8; 4];
            self.data.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
        }
    }

    /// Write everything to `writer` and empty the buffer.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        writer.flush()?;
        self.data.clear();
        Ok(())
    }

    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// StatefulCellRenderer
// =============================================================================

/// Emits cells while tracking the terminal's current pen.
#[derive(Debug)]
pub struct StatefulCellRenderer {
    last_x: i32,
    last_y: i32,
    last_fg: Option<Rgba>,
    last_bg: Option<Rgba>,
    last_attrs: Attr,
}

impl StatefulCellRenderer {
    pub fn new() -> Self {
        Self {
            last_x: -1,
            last_y: -1,
            last_fg: None,
            last_bg: None,
            last_attrs: Attr::NONE,
        }
    }

    /// Forget everything; the next cell re-emits position and colours.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Render one cell, emitting only what changed since the previous one.
    pub fn render_cell(
        &mut self,
        output: &mut OutputBuffer,
        x: u16,
        y: u16,
        cell: &Cell,
    ) -> io::Result<()> {
        // Continuation of a wide char: the terminal already advanced.
        if cell.char == 0 {
            self.last_x = x as i32;
            self.last_y = y as i32;
            return Ok(());
        }

        if y as i32 != self.last_y || x as i32 != self.last_x + 1 {
            ansi::cursor_to(output, x, y)?;
        }

        if cell.attrs != self.last_attrs {
            ansi::reset(output)?;
            ansi::attrs(output, cell.attrs)?;
            self.last_fg = None;
            self.last_bg = None;
            self.last_attrs = cell.attrs;
        }

        if self.last_fg != Some(cell.fg) {
            ansi::fg(output, cell.fg)?;
            self.last_fg = Some(cell.fg);
        }
        if self.last_bg != Some(cell.bg) {
            ansi::bg(output, cell.bg)?;
            self.last_bg = Some(cell.bg);
        }

        output.write_codepoint(cell.char);
        self.last_x = x as i32;
        self.last_y = y as i32;
        Ok(())
    }
}

impl Default for StatefulCellRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
