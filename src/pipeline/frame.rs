//! Frame composition.
//!
//! [`compose_frame`] turns a snapshot of everything visible into a
//! [`FrameBuffer`]. It is pure, so the render effect can sit behind a
//! [`Derived`] that only recomputes when the snapshot signal changes.

use spark_signals::{Derived, Signal, derived};

use super::layout::{MIN_HEIGHT, MIN_WIDTH, Panels, compute_panels};
use super::paint::paint_scene;
use crate::components::Operation;
use crate::renderer::{FrameBuffer, string_width, truncate, wrap_text};
use crate::scene::Scene;
use crate::state::alerts::{AlertLevel, LogEntry};
use crate::theme::Theme;
use crate::types::{Attr, BorderStyle, ClipRect, Rgba};

/// Keys that work on every tab, shown after the component's operations.
pub const GLOBAL_KEYS: &[(&str, &str)] = &[
    ("←→", "switch"),
    ("/", "search"),
    ("space", "skip"),
    ("+/-", "speed"),
    ("T", "theme"),
    ("q", "quit"),
];

/// Everything the screen shows, captured once per change.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameInputs {
    pub width: u16,
    pub height: u16,
    pub theme: Theme,
    pub tabs: Vec<&'static str>,
    pub active: usize,
    pub scene: Scene,
    pub info: String,
    /// Active alerts, newest first.
    pub alerts: Vec<(AlertLevel, String)>,
    /// Activity log, newest first.
    pub log: Vec<LogEntry>,
    pub operations: Vec<Operation>,
    /// Query being typed, when the search prompt is open.
    pub search: Option<String>,
    pub speed_ms: u64,
    /// `(step, total)` while an animation plays.
    pub progress: Option<(usize, usize)>,
    pub last_key: String,
}

impl Default for FrameInputs {
    fn default() -> Self {
        Self {
            width: MIN_WIDTH,
            height: MIN_HEIGHT,
            theme: Theme::default(),
            tabs: Vec::new(),
            active: 0,
            scene: Scene::default(),
            info: String::new(),
            alerts: Vec::new(),
            log: Vec::new(),
            operations: Vec::new(),
            search: None,
            speed_ms: crate::state::animate::DEFAULT_SPEED_MS,
            progress: None,
            last_key: String::new(),
        }
    }
}

/// Derived frame buffer, recomputed whenever `inputs` changes.
pub fn create_frame_derived(inputs: Signal<FrameInputs>) -> Derived<FrameBuffer> {
    derived(move || compose_frame(&inputs.get()))
}

/// Colour of an alert level.
pub fn level_color(theme: &Theme, level: AlertLevel) -> Rgba {
    match level {
        AlertLevel::Success => theme.success.resolve(),
        AlertLevel::Danger => theme.error.resolve(),
        AlertLevel::Warning => theme.warning.resolve(),
        AlertLevel::Info => theme.info.resolve(),
    }
}

pub fn compose_frame(inputs: &FrameInputs) -> FrameBuffer {
    let theme = &inputs.theme;
    let mut buffer = FrameBuffer::with_background(inputs.width, inputs.height, theme.background.resolve());

    // A layout error only happens on absurd sizes; treat it as too small.
    let Some(panels) = compute_panels(inputs.width, inputs.height).ok().flatten() else {
        draw_too_small(&mut buffer, inputs);
        return buffer;
    };

    draw_header(&mut buffer, &panels, theme);
    draw_tabs(&mut buffer, panels.tabs, inputs);
    draw_canvas(&mut buffer, &panels, inputs);
    draw_info(&mut buffer, panels.info, inputs);
    draw_alerts(&mut buffer, panels.alerts, inputs);
    draw_log(&mut buffer, panels.log, inputs);
    draw_controls(&mut buffer, panels.controls, inputs);
    draw_status(&mut buffer, panels.status, inputs);
    buffer
}

fn draw_too_small(buffer: &mut FrameBuffer, inputs: &FrameInputs) {
    let theme = &inputs.theme;
    let lines = [
        "Terminal too small".to_string(),
        format!("need {MIN_WIDTH}×{MIN_HEIGHT}, have {}×{}", inputs.width, inputs.height),
    ];
    let top = inputs.height.saturating_sub(lines.len() as u16) / 2;
    for (i, line) in lines.iter().enumerate() {
        let line = truncate(line, inputs.width as usize);
        buffer.draw_text_centered(
            0,
            top + i as u16,
            inputs.width,
            &line,
            theme.warning.resolve(),
            None,
            Attr::BOLD,
            None,
        );
    }
}

/// Bordered panel with a title set into the top edge.
fn draw_panel(buffer: &mut FrameBuffer, rect: ClipRect, title: &str, color: Rgba, theme: &Theme) {
    buffer.draw_border(rect, BorderStyle::Rounded, color, None, None);
    if rect.width > 4 {
        let title = truncate(&format!(" {title} "), rect.width as usize - 4);
        buffer.draw_text(rect.x + 2, rect.y, &title, theme.text_bright.resolve(), None, Attr::BOLD, Some(&rect));
    }
}

fn draw_header(buffer: &mut FrameBuffer, panels: &Panels, theme: &Theme) {
    let rect = panels.header;
    buffer.fill_rect(rect, theme.surface.resolve(), None);
    buffer.draw_text(rect.x + 1, rect.y, "algovista", theme.primary.resolve(), None, Attr::BOLD, Some(&rect));
    buffer.draw_text(
        rect.x + 11,
        rect.y,
        "· data structures, step by step",
        theme.text_muted.resolve(),
        None,
        Attr::NONE,
        Some(&rect),
    );
}

/// First tab to draw so that `active` fits in `width` cells.
pub fn first_visible_tab(tabs: &[&str], active: usize, width: u16) -> usize {
    if tabs.is_empty() {
        return 0;
    }
    let active = active.min(tabs.len() - 1);
    let cell = |title: &&str| string_width(title) + 3;
    let mut start = 0;
    while start < active {
        let used: usize = tabs[start..=active].iter().map(cell).sum();
        if used <= width as usize {
            break;
        }
        start += 1;
    }
    start
}

fn draw_tabs(buffer: &mut FrameBuffer, rect: ClipRect, inputs: &FrameInputs) {
    let theme = &inputs.theme;
    let start = first_visible_tab(&inputs.tabs, inputs.active, rect.width);
    let mut x = rect.x;
    for (i, title) in inputs.tabs.iter().enumerate().skip(start) {
        let label = format!(" {title} ");
        let (fg, bg, attrs) = if i == inputs.active {
            (theme.on_fill.resolve(), Some(theme.primary.resolve()), Attr::BOLD)
        } else {
            (theme.text_muted.resolve(), None, Attr::NONE)
        };
        x += buffer.draw_text(x, rect.y, &label, fg, bg, attrs, Some(&rect));
        x += buffer.draw_text(x, rect.y, " ", fg, None, Attr::NONE, Some(&rect));
        if x >= rect.x + rect.width {
            break;
        }
    }
}

fn draw_canvas(buffer: &mut FrameBuffer, panels: &Panels, inputs: &FrameInputs) {
    let theme = &inputs.theme;
    let title = inputs.tabs.get(inputs.active).copied().unwrap_or("");
    draw_panel(buffer, panels.canvas, title, theme.border_focus.resolve(), theme);
    paint_scene(buffer, &inputs.scene, panels.canvas.inset(1), theme);
}

fn draw_info(buffer: &mut FrameBuffer, rect: ClipRect, inputs: &FrameInputs) {
    let theme = &inputs.theme;
    draw_panel(buffer, rect, "Info", theme.border.resolve(), theme);
    let inner = rect.inset(1);
    for (row, line) in wrap_text(&inputs.info, inner.width.saturating_sub(1) as usize)
        .iter()
        .take(inner.height as usize)
        .enumerate()
    {
        buffer.draw_text(inner.x + 1, inner.y + row as u16, line, theme.text.resolve(), None, Attr::NONE, Some(&inner));
    }
}

fn draw_alerts(buffer: &mut FrameBuffer, rect: ClipRect, inputs: &FrameInputs) {
    let theme = &inputs.theme;
    draw_panel(buffer, rect, "Alerts", theme.border.resolve(), theme);
    let inner = rect.inset(1);
    let room = inner.width.saturating_sub(1) as usize;
    for (row, (level, message)) in inputs.alerts.iter().take(inner.height as usize).enumerate() {
        let line = truncate(&format!("{} {message}", level.icon()), room);
        let attrs = if row == 0 { Attr::BOLD } else { Attr::NONE };
        buffer.draw_text(inner.x + 1, inner.y + row as u16, &line, level_color(theme, *level), None, attrs, Some(&inner));
    }
}

fn draw_log(buffer: &mut FrameBuffer, rect: ClipRect, inputs: &FrameInputs) {
    let theme = &inputs.theme;
    draw_panel(buffer, rect, "Activity", theme.border.resolve(), theme);
    let inner = rect.inset(1);
    let room = inner.width.saturating_sub(1) as usize;
    for (row, entry) in inputs.log.iter().take(inner.height as usize).enumerate() {
        let y = inner.y + row as u16;
        let seq = format!("{:>3} ", entry.seq);
        let mut x = inner.x + 1;
        x += buffer.draw_text(x, y, &seq, theme.text_muted.resolve(), None, Attr::DIM, Some(&inner));
        x += buffer.draw_text(x, y, &entry.level.icon().to_string(), level_color(theme, entry.level), None, Attr::NONE, Some(&inner));
        let message = truncate(&entry.message, room.saturating_sub(string_width(&seq) + 2));
        buffer.draw_text(x + 1, y, &message, theme.text.resolve(), None, Attr::NONE, Some(&inner));
    }
}

fn draw_controls(buffer: &mut FrameBuffer, rect: ClipRect, inputs: &FrameInputs) {
    let theme = &inputs.theme;
    let x = rect.x + 1;

    if let Some(query) = &inputs.search {
        let mut col = x;
        col += buffer.draw_text(col, rect.y, "Search: ", theme.accent.resolve(), None, Attr::BOLD, Some(&rect));
        col += buffer.draw_text(col, rect.y, query, theme.text_bright.resolve(), None, Attr::NONE, Some(&rect));
        col += buffer.draw_text(col, rect.y, "▏", theme.accent.resolve(), None, Attr::NONE, Some(&rect));
        buffer.draw_text(col + 2, rect.y, "enter go · esc cancel", theme.text_muted.resolve(), None, Attr::NONE, Some(&rect));
        return;
    }

    let mut col = x;
    let mut key_hint = |buffer: &mut FrameBuffer, key: &str, label: &str| {
        col += buffer.draw_text(col, rect.y, key, theme.accent.resolve(), None, Attr::BOLD, Some(&rect));
        col += buffer.draw_text(col, rect.y, &format!(" {label}  "), theme.text.resolve(), None, Attr::NONE, Some(&rect));
    };
    for op in &inputs.operations {
        key_hint(buffer, &op.key.to_string(), op.label);
    }
    for (key, label) in GLOBAL_KEYS {
        key_hint(buffer, *key, *label);
    }
}

fn draw_status(buffer: &mut FrameBuffer, rect: ClipRect, inputs: &FrameInputs) {
    let theme = &inputs.theme;
    buffer.fill_rect(rect, theme.surface.resolve(), None);

    let mut parts = vec![
        format!("speed {}ms", inputs.speed_ms),
        format!("theme {}", theme.name),
    ];
    if let Some((step, total)) = inputs.progress {
        parts.push(format!("step {step}/{total}"));
    }
    if !inputs.last_key.is_empty() {
        parts.push(format!("key {}", inputs.last_key));
    }
    let line = parts.join(" │ ");
    buffer.draw_text(rect.x + 1, rect.y, &line, theme.text_muted.resolve(), None, Attr::NONE, Some(&rect));

    let position = format!("{}/{}", inputs.active + 1, inputs.tabs.len());
    let right = (rect.x + rect.width).saturating_sub(string_width(&position) as u16 + 1);
    buffer.draw_text(right, rect.y, &position, theme.text_muted.resolve(), None, Attr::NONE, Some(&rect));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::catalog;

    fn inputs() -> FrameInputs {
        let components = catalog();
        let stack = &components[3];
        FrameInputs {
            width: 100,
            height: 32,
            tabs: components.iter().map(|c| c.title()).collect(),
            active: 3,
            scene: stack.scene(),
            info: "A stack is last in, first out.".into(),
            operations: stack.operations().to_vec(),
            ..FrameInputs::default()
        }
    }

    fn rows(buffer: &FrameBuffer) -> Vec<String> {
        (0..buffer.height()).map(|y| buffer.row_text(y)).collect()
    }

    #[test]
    fn test_too_small_shows_message() {
        let frame = compose_frame(&FrameInputs { width: 40, height: 10, ..inputs() });
        assert!(frame.to_text().contains("Terminal too small"));
        assert!(frame.to_text().contains("have 40×10"));
    }

    #[test]
    fn test_panels_are_titled() {
        let frame = compose_frame(&inputs());
        let text = frame.to_text();
        assert!(rows(&frame)[0].contains("algovista"));
        assert!(text.contains(" Stack "));
        assert!(text.contains(" Info "));
        assert!(text.contains(" Alerts "));
        assert!(text.contains(" Activity "));
        assert!(text.contains("A stack is last in"));
    }

    #[test]
    fn test_controls_list_operations_then_globals() {
        let frame = compose_frame(&inputs());
        let controls = &rows(&frame)[30];
        let push = controls.find("Push").unwrap();
        let quit = controls.find("quit").unwrap_or(usize::MAX);
        assert!(push < quit);
    }

    #[test]
    fn test_search_prompt_replaces_controls() {
        let frame = compose_frame(&FrameInputs {
            search: Some("gra".into()),
            ..inputs()
        });
        let controls = &rows(&frame)[30];
        assert!(controls.contains("Search: gra"));
        assert!(!controls.contains("Push"));
    }

    #[test]
    fn test_alerts_colour_by_level() {
        let theme = Theme::default();
        let frame = compose_frame(&FrameInputs {
            alerts: vec![
                (AlertLevel::Danger, "Stack overflow!".into()),
                (AlertLevel::Success, "Pushed 4 to stack".into()),
            ],
            ..inputs()
        });
        let panels = compute_panels(100, 32).unwrap().unwrap();
        let first = panels.alerts.inset(1);
        let icon = frame.get(first.x + 1, first.y).unwrap();
        assert_eq!(icon.char, '✗' as u32);
        assert_eq!(icon.fg, theme.error.resolve());
        assert!(frame.row_text(first.y + 1).contains("✓ Pushed 4 to stack"));
    }

    #[test]
    fn test_status_shows_progress_and_key() {
        let frame = compose_frame(&FrameInputs {
            progress: Some((3, 12)),
            last_key: "p".into(),
            ..inputs()
        });
        let status = &rows(&frame)[31];
        assert!(status.contains("speed 500ms"));
        assert!(status.contains("theme terminal"));
        assert!(status.contains("step 3/12"));
        assert!(status.contains("key p"));
        assert!(status.trim_end().ends_with("4/11"));
    }

    #[test]
    fn test_tabs_scroll_to_active() {
        let tabs = ["Array", "String", "Linked List", "Stack", "Quiz"];
        assert_eq!(first_visible_tab(&tabs, 1, 80), 0);
        // " Array " + " String " + ... each take title + 3 cells.
        assert_eq!(first_visible_tab(&tabs, 4, 20), 3);
        assert_eq!(first_visible_tab(&tabs, 4, 4), 4);
    }

    #[test]
    fn test_derived_follows_signal() {
        let inputs_signal = spark_signals::signal(inputs());
        let frame = create_frame_derived(inputs_signal.clone());
        // Row 2 is the canvas border, titled with the active tab.
        assert!(frame.get().row_text(2).contains("─ Stack "));

        inputs_signal.set(FrameInputs { active: 6, ..inputs() });
        assert!(frame.get().row_text(2).contains("─ Heap "));
    }
}
