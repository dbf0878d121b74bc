//! ANSI escape sequences for terminal control.
//!
//! Cursor movement, alternate screen, synchronized output, colours and
//! text attributes. Everything writes into any `io::Write`, normally an
//! [`OutputBuffer`](super::OutputBuffer).

use std::io::Write;

use crate::types::{Attr, Rgba};

// =============================================================================
// Cursor
// =============================================================================

/// Move cursor to absolute position (0-indexed input, 1-indexed on the wire).
#[inline]
pub fn cursor_to<W: Write>(w: &mut W, x: u16, y: u16) -> std::io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

#[inline]
pub fn cursor_hide<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25l")
}

#[inline]
pub fn cursor_show<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?25h")
}

// =============================================================================
// Screen
// =============================================================================

/// Clear screen and scrollback buffer, cursor home.
#[inline]
pub fn clear_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[2J\x1b[3J\x1b[H")
}

#[inline]
pub fn enter_alt_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?1049h")
}

#[inline]
pub fn exit_alt_screen<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?1049l")
}

/// Begin synchronized output (terminal buffers until end_sync).
#[inline]
pub fn begin_sync<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?2026h")
}

#[inline]
pub fn end_sync<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[?2026l")
}

// =============================================================================
// Colors
// =============================================================================

/// Reset all attributes and colors.
#[inline]
pub fn reset<W: Write>(w: &mut W) -> std::io::Result<()> {
    write!(w, "\x1b[0m")
}

/// Set foreground color.
pub fn fg<W: Write>(w: &mut W, color: Rgba) -> std::io::Result<()> {
    if color.is_terminal_default() {
        write!(w, "\x1b[39m")
    } else if color.is_ansi() {
        let index = color.ansi_index();
        if index < 8 {
            write!(w, "\x1b[{}m", 30 + index)
        } else if index < 16 {
            write!(w, "\x1b[{}m", 90 + index - 8)
        } else {
            write!(w, "\x1b[38;5;{}m", index)
        }
    } else {
        write!(w, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b)
    }
}

/// Set background color.
pub fn bg<W: Write>(w: &mut W, color: Rgba) -> std::io::Result<()> {
    if color.is_terminal_default() || color.is_transparent() {
        write!(w, "\x1b[49m")
    } else if color.is_ansi() {
        let index = color.ansi_index();
        if index < 8 {
            write!(w, "\x1b[{}m", 40 + index)
        } else if index < 16 {
            write!(w, "\x1b[{}m", 100 + index - 8)
        } else {
            write!(w, "\x1b[48;5;{}m", index)
        }
    } else {
        write!(w, "\x1b[48;2;{};{};{}m", color.r, color.g, color.b)
    }
}

// =============================================================================
// Text Attributes
// =============================================================================

/// Set text attributes from bitflags.
pub fn attrs<W: Write>(w: &mut W, attr: Attr) -> std::io::Result<()> {
    if attr.is_empty() {
        return Ok(());
    }

    let codes: Vec<&str> = [
        (Attr::BOLD, "1"),
        (Attr::DIM, "2"),
        (Attr::ITALIC, "3"),
        (Attr::UNDERLINE, "4"),
        (Attr::INVERSE, "7"),
    ]
    .iter()
    .filter(|(flag, _)| attr.contains(*flag))
    .map(|(_, code)| *code)
    .collect();

    write!(w, "\x1b[{}m", codes.join(";"))
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn emit(f: impl FnOnce(&mut Vec<u8>) -> std::io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_cursor_to_is_one_indexed() {
        assert_eq!(emit(|w| cursor_to(w, 0, 0)), "\x1b[1;1H");
        assert_eq!(emit(|w| cursor_to(w, 9, 4)), "\x1b[5;10H");
    }

    #[test]
    fn test_fg_palette_ranges() {
        assert_eq!(emit(|w| fg(w, Rgba::ansi(1))), "\x1b[31m");
        assert_eq!(emit(|w| fg(w, Rgba::ansi(12))), "\x1b[94m");
        assert_eq!(emit(|w| fg(w, Rgba::ansi(200))), "\x1b[38;5;200m");
        assert_eq!(emit(|w| fg(w, Rgba::rgb(1, 2, 3))), "\x1b[38;2;1;2;3m");
        assert_eq!(emit(|w| fg(w, Rgba::TERMINAL_DEFAULT)), "\x1b[39m");
    }

    #[test]
    fn test_bg_default_and_bright() {
        assert_eq!(emit(|w| bg(w, Rgba::TERMINAL_DEFAULT)), "\x1b[49m");
        assert_eq!(emit(|w| bg(w, Rgba::ansi(9))), "\x1b[101m");
    }

    #[test]
    fn test_attrs_joined() {
        assert_eq!(emit(|w| attrs(w, Attr::BOLD | Attr::UNDERLINE)), "\x1b[1;4m");
        assert_eq!(emit(|w| attrs(w, Attr::NONE)), "");
    }
}
