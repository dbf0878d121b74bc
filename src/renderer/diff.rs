//! Differential renderer.
//!
//! Compares each frame to the previous one and writes only the cells that
//! changed, wrapped in a synchronized-output block so the terminal swaps the
//! whole update at once. A size change or [`DiffRenderer::invalidate`]
//! forces a full repaint.

use std::io::{self, Stdout, Write};

use super::ansi;
use super::buffer::FrameBuffer;
use super::output::{OutputBuffer, StatefulCellRenderer};

/// Frame differ writing to `W` (stdout in the app, a `Vec<u8>` in tests).
pub struct DiffRenderer<W: Write = Stdout> {
    sink: W,
    output: OutputBuffer,
    cell_renderer: StatefulCellRenderer,
    previous: Option<FrameBuffer>,
}

impl DiffRenderer<Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for DiffRenderer<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> DiffRenderer<W> {
    pub fn with_writer(sink: W) -> Self {
        Self {
            sink,
            output: OutputBuffer::new(),
            cell_renderer: StatefulCellRenderer::new(),
            previous: None,
        }
    }

    /// Render a frame, writing only changed cells.
    ///
    /// Returns the number of cells written.
    pub fn render(&mut self, buffer: &FrameBuffer) -> io::Result<usize> {
        let comparable = self
            .previous
            .as_ref()
            .filter(|prev| prev.width() == buffer.width() && prev.height() == buffer.height());

        ansi::begin_sync(&mut self.output)?;
        self.cell_renderer.reset();

        let mut written = 0;
        for (x, y, cell) in buffer.iter() {
            let unchanged = comparable
                .and_then(|prev| prev.get(x, y))
                .is_some_and(|prev_cell| prev_cell == cell);
            if unchanged {
                continue;
            }
            self.cell_renderer.render_cell(&mut self.output, x, y, cell)?;
            written += 1;
        }

        ansi::end_sync(&mut self.output)?;
        self.output.flush_to(&mut self.sink)?;
        self.previous = Some(buffer.clone());

        Ok(written)
    }

    /// Repaint every cell, clearing the screen first.
    ///
    /// Used after a resize, when stale cells outside the new frame would
    /// otherwise survive.
    pub fn render_full(&mut self, buffer: &FrameBuffer) -> io::Result<usize> {
        self.invalidate();
        ansi::reset(&mut self.output)?;
        ansi::clear_screen(&mut self.output)?;
        self.render(buffer)
    }

    /// Forget the previous frame; the next render is a full one.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    /// Switch to the alternate screen and hide the cursor.
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        ansi::enter_alt_screen(&mut self.output)?;
        ansi::cursor_hide(&mut self.output)?;
        ansi::clear_screen(&mut self.output)?;
        self.output.flush_to(&mut self.sink)?;
        self.invalidate();
        Ok(())
    }

    /// Restore the primary screen and the cursor.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        ansi::reset(&mut self.output)?;
        ansi::cursor_show(&mut self.output)?;
        ansi::exit_alt_screen(&mut self.output)?;
        self.output.flush_to(&mut self.sink)
    }

    #[cfg(test)]
    fn sink(&self) -> &W {
        &self.sink
    }
}

// =============================================================================
// Tests
// =============================================================================
