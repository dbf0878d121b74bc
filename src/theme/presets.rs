//! Built-in theme presets.
//!
//! - terminal (default - ANSI colors, follows the user's terminal scheme)
//! - classic (the flat web palette the visualizer was first drawn in)
//! - dracula
//! - nord

use super::{Theme, ThemeColor};

// =============================================================================
// Terminal Theme (Default)
// =============================================================================

/// Terminal theme - uses ANSI colors to respect the user's terminal theme.
pub fn terminal() -> Theme {
    Theme {
        name: "terminal",
        description: "Uses terminal default colors",
        primary: ThemeColor::Ansi(12), // bright blue
        accent: ThemeColor::Ansi(11),  // bright yellow
        success: ThemeColor::Ansi(2),
        warning: ThemeColor::Ansi(3),
        error: ThemeColor::Ansi(1),
        info: ThemeColor::Ansi(6),
        text: ThemeColor::Default,
        text_muted: ThemeColor::Ansi(8),
        text_bright: ThemeColor::Ansi(15),
        on_fill: ThemeColor::Ansi(0),
        background: ThemeColor::Default,
        surface: ThemeColor::Default,
        border: ThemeColor::Ansi(7),
        border_focus: ThemeColor::Ansi(12),
        palette: [
            ThemeColor::Ansi(12),
            ThemeColor::Ansi(10),
            ThemeColor::Ansi(9),
            ThemeColor::Ansi(11),
            ThemeColor::Ansi(14),
            ThemeColor::Ansi(13),
        ],
    }
}

// =============================================================================
// Classic Theme
// =============================================================================

/// Classic - blue, green, red, amber, teal and purple on charcoal.
pub fn classic() -> Theme {
    Theme {
        name: "classic",
        description: "Flat web palette",
        primary: 0x007bffu32.into(),
        accent: 0x6f42c1u32.into(),
        success: 0x28a745u32.into(),
        warning: 0xffc107u32.into(),
        error: 0xdc3545u32.into(),
        info: 0x17a2b8u32.into(),
        text: 0xf8f9fau32.into(),
        text_muted: 0x6c757du32.into(),
        text_bright: 0xffffffu32.into(),
        on_fill: 0xffffffu32.into(),
        background: 0x212529u32.into(),
        surface: 0x343a40u32.into(),
        border: 0x495057u32.into(),
        border_focus: 0x007bffu32.into(),
        palette: [
            0x007bffu32.into(),
            0x28a745u32.into(),
            0xdc3545u32.into(),
            0xffc107u32.into(),
            0x17a2b8u32.into(),
            0x6f42c1u32.into(),
        ],
    }
}

// =============================================================================
// Dracula Theme
// =============================================================================

/// Dracula - dark theme with vivid colors.
pub fn dracula() -> Theme {
    Theme {
        name: "dracula",
        description: "Dracula dark theme",
        primary: 0xbd93f9u32.into(),
        accent: 0xf1fa8cu32.into(),
        success: 0x50fa7bu32.into(),
        warning: 0xf1fa8cu32.into(),
        error: 0xff5555u32.into(),
        info: 0x8be9fdu32.into(),
        text: 0xf8f8f2u32.into(),
        text_muted: 0x6272a4u32.into(),
        text_bright: 0xffffffu32.into(),
        on_fill: 0x282a36u32.into(),
        background: 0x282a36u32.into(),
        surface: 0x44475au32.into(),
        border: 0x6272a4u32.into(),
        border_focus: 0xbd93f9u32.into(),
        palette: [
            0xbd93f9u32.into(),
            0x50fa7bu32.into(),
            0xff79c6u32.into(),
            0xffb86cu32.into(),
            0x8be9fdu32.into(),
            0xf1fa8cu32.into(),
        ],
    }
}

// =============================================================================
// Nord Theme
// =============================================================================

/// Nord - arctic, bluish colors.
pub fn nord() -> Theme {
    Theme {
        name: "nord",
        description: "Nord arctic theme",
        primary: 0x88c0d0u32.into(),
        accent: 0xd08770u32.into(),
        success: 0xa3be8cu32.into(),
        warning: 0xebcb8bu32.into(),
        error: 0xbf616au32.into(),
        info: 0x81a1c1u32.into(),
        text: 0xd8dee9u32.into(),
        text_muted: 0x4c566au32.into(),
        text_bright: 0xeceff4u32.into(),
        on_fill: 0x2e3440u32.into(),
        background: 0x2e3440u32.into(),
        surface: 0x434c5eu32.into(),
        border: 0x4c566au32.into(),
        border_focus: 0x88c0d0u32.into(),
        palette: [
            0x5e81acu32.into(),
            0xa3be8cu32.into(),
            0xbf616au32.into(),
            0xebcb8bu32.into(),
            0x8fbcbbu32.into(),
            0xb48eadu32.into(),
        ],
    }
}

// =============================================================================
// Lookup
// =============================================================================

/// Get a preset by name (case-insensitive).
///
/// ```rust
/// use algovista::theme::get_preset;
///
/// assert_eq!(get_preset("Dracula").unwrap().name, "dracula");
/// assert!(get_preset("solarized").is_none());
/// ```
pub fn get_preset(name: &str) -> Option<Theme> {
    match name.to_lowercase().as_str() {
        "terminal" => Some(terminal()),
        "classic" => Some(classic()),
        "dracula" => Some(dracula()),
        "nord" => Some(nord()),
        _ => None,
    }
}

pub fn preset_names() -> &'static [&'static str] {
    &["terminal", "classic", "dracula", "nord"]
}

/// The preset after `name`, wrapping around. Unknown names restart the cycle.
pub fn next_preset(name: &str) -> Theme {
    let names = preset_names();
    let next = names
        .iter()
        .position(|n| n.eq_ignore_ascii_case(name))
        .map_or(0, |i| (i + 1) % names.len());
    get_preset(names[next]).unwrap_or_default()
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rgba;

    #[test]
    fn test_terminal_preset() {
        let t = terminal();
        assert_eq!(t.name, "terminal");
        assert!(t.text.is_default());
        assert!(t.palette.iter().all(|c| matches!(c, ThemeColor::Ansi(_))));
    }

    #[test]
    fn test_classic_palette_order() {
        let t = classic();
        assert_eq!(t.palette[0].resolve(), Rgba::from_rgb_int(0x007bff));
        assert_eq!(t.palette[5].resolve(), Rgba::from_rgb_int(0x6f42c1));
        assert_eq!(t.error.resolve(), Rgba::from_rgb_int(0xdc3545));
    }

    #[test]
    fn test_all_presets_exist() {
        for name in preset_names() {
            let theme = get_preset(name).unwrap_or_else(|| panic!("missing preset {name}"));
            assert_eq!(&theme.name, name);
        }
        assert!(get_preset("").is_none());
    }

    #[test]
    fn test_next_preset_cycles() {
        assert_eq!(next_preset("terminal").name, "classic");
        assert_eq!(next_preset("nord").name, "terminal");
        assert_eq!(next_preset("bogus").name, "terminal");
    }
}
