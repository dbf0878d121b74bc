//! Scene painter.
//!
//! Draws a [`Scene`] into a panel of the frame buffer. The logical canvas is
//! centred in the panel and clipped to it, so shapes that glide past the
//! canvas edge (stack pops, queue dequeues) disappear cleanly.

use crate::renderer::{FrameBuffer, char_width, string_width};
use crate::scene::{CAPTION_ROW, SCENE_HEIGHT, SCENE_WIDTH, Scene, Shape};
use crate::theme::{Theme, Tone};
use crate::types::{Attr, BorderStyle, ClipRect, Rgba};

/// Maps scene coordinates to buffer cells and clips to the panel.
struct Canvas<'a> {
    buffer: &'a mut FrameBuffer,
    clip: ClipRect,
    origin: (i32, i32),
}

impl Canvas<'_> {
    fn put(&mut self, x: i32, y: i32, ch: char, fg: Rgba, bg: Option<Rgba>, attrs: Attr) {
        let (cx, cy) = (self.origin.0 + x, self.origin.1 + y);
        if cx < 0 || cy < 0 || cx > u16::MAX as i32 || cy > u16::MAX as i32 {
            return;
        }
        self.buffer
            .draw_char(cx as u16, cy as u16, ch, fg, bg, attrs, Some(&self.clip));
    }

    fn text(&mut self, x: i32, y: i32, text: &str, fg: Rgba, bg: Option<Rgba>, attrs: Attr) {
        let mut col = x;
        for ch in text.chars() {
            let width = char_width(ch) as i32;
            if width == 0 {
                continue;
            }
            self.put(col, y, ch, fg, bg, attrs);
            col += width;
        }
    }

    fn text_centred(&mut self, x: i32, y: i32, width: i32, text: &str, fg: Rgba, bg: Option<Rgba>, attrs: Attr) {
        let offset = ((width - string_width(text) as i32) / 2).max(0);
        self.text(x + offset, y, text, fg, bg, attrs);
    }

    fn border(&mut self, x: i32, y: i32, width: i32, height: i32, fg: Rgba) {
        if width < 2 || height < 2 {
            return;
        }
        let (h, v, tl, tr, br, bl) = BorderStyle::Rounded.chars();
        let (x2, y2) = (x + width - 1, y + height - 1);

        self.put(x, y, tl, fg, None, Attr::NONE);
        self.put(x2, y, tr, fg, None, Attr::NONE);
        self.put(x2, y2, br, fg, None, Attr::NONE);
        self.put(x, y2, bl, fg, None, Attr::NONE);
        for col in x + 1..x2 {
            self.put(col, y, h, fg, None, Attr::NONE);
            self.put(col, y2, h, fg, None, Attr::NONE);
        }
        for row in y + 1..y2 {
            self.put(x, row, v, fg, None, Attr::NONE);
            self.put(x2, row, v, fg, None, Attr::NONE);
        }
    }

    fn line(&mut self, from: (i32, i32), to: (i32, i32), fg: Rgba) {
        let at = |(x, y): (i32, i32)| (self.origin.0 + x, self.origin.1 + y);
        let (from, to) = (at(from), at(to));
        self.buffer.draw_line(from, to, fg, Some(&self.clip));
    }
}

/// Paint `scene` centred inside `area`.
pub fn paint_scene(buffer: &mut FrameBuffer, scene: &Scene, area: ClipRect, theme: &Theme) {
    let Some(clip) = area.intersect(&buffer.bounds()) else {
        return;
    };
    let origin = (
        area.x as i32 + (area.width as i32 - SCENE_WIDTH).max(0) / 2,
        area.y as i32 + (area.height as i32 - SCENE_HEIGHT).max(0) / 2,
    );
    let mut canvas = Canvas { buffer, clip, origin };

    let on_fill = theme.on_fill.resolve();

    // Edges go first so nodes sit on top of them.
    let (edges, rest): (Vec<&Shape>, Vec<&Shape>) =
        scene.shapes.iter().partition(|s| matches!(s, Shape::Edge { .. }));

    for shape in edges.into_iter().chain(rest) {
        let color = theme.tone(shape.tone());
        match shape {
            Shape::Edge { from, to, label, .. } => {
                canvas.line(*from, *to, color);
                if let Some(label) = label {
                    let mid = ((from.0 + to.0) / 2, (from.1 + to.1) / 2);
                    let x = mid.0 - string_width(label) as i32 / 2;
                    canvas.text(x, mid.1, label, theme.text_bright.resolve(), None, Attr::BOLD);
                }
            }
            Shape::Block { x, y, width, label, caption, .. } => {
                canvas.border(*x, *y, *width, 3, color);
                canvas.text_centred(*x + 1, *y + 1, width - 2, label, color, None, Attr::BOLD);
                if let Some(caption) = caption {
                    canvas.text_centred(*x, *y + 3, *width, caption, theme.text_muted.resolve(), None, Attr::NONE);
                }
            }
            Shape::Bar { x, y, width, label, tone } => {
                let fg = if matches!(tone, Tone::Plain | Tone::Muted) {
                    theme.text_bright.resolve()
                } else {
                    on_fill
                };
                let bg = if *tone == Tone::Plain {
                    theme.surface.resolve()
                } else {
                    color
                };
                for col in *x..*x + *width {
                    canvas.put(col, *y, ' ', fg, Some(bg), Attr::NONE);
                }
                canvas.text_centred(*x, *y, *width, label, fg, Some(bg), Attr::BOLD);
            }
            Shape::Node { x, y, label, .. } => {
                let padded = format!(" {label} ");
                let left = x - string_width(&padded) as i32 / 2;
                canvas.text(left, *y, &padded, on_fill, Some(color), Attr::BOLD);
            }
            Shape::Arrow { x, y, length, .. } => {
                for col in *x..*x + length - 1 {
                    canvas.put(col, *y, '─', color, None, Attr::NONE);
                }
                canvas.put(x + length - 1, *y, '►', color, None, Attr::NONE);
            }
            Shape::Text { x, y, text, tone } => {
                let attrs = if *tone == Tone::Pointer { Attr::BOLD } else { Attr::NONE };
                canvas.text(*x, *y, text, color, None, attrs);
            }
            Shape::Frame { x, y, width, height, .. } => {
                canvas.border(*x, *y, *width, *height, color);
            }
            Shape::Progress { x, y, width, ratio, .. } => {
                let filled = (ratio.clamp(0.0, 1.0) * *width as f32).round() as i32;
                for col in 0..*width {
                    let (glyph, fg) = if col < filled {
                        ('█', color)
                    } else {
                        ('░', theme.text_muted.resolve())
                    };
                    canvas.put(x + col, *y, glyph, fg, None, Attr::NONE);
                }
            }
        }
    }

    canvas.text_centred(0, 0, SCENE_WIDTH, &scene.title, theme.text_bright.resolve(), None, Attr::BOLD);
    canvas.text_centred(0, CAPTION_ROW, SCENE_WIDTH, &scene.caption, theme.text_muted.resolve(), None, Attr::NONE);
}
