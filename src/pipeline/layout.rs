//! Panel layout.
//!
//! The screen is one flexbox column computed with Taffy:
//!
//! ```text
//! header      1 row
//! tabs        1 row
//! canvas      grows (bordered; holds the scene)
//! bottom      info | alerts | activity log
//! controls    1 row
//! status      1 row
//! ```

use taffy::{AvailableSpace, Dimension, Display, FlexDirection, NodeId, Size, Style, TaffyTree};

use crate::scene::{SCENE_HEIGHT, SCENE_WIDTH};
use crate::types::ClipRect;

/// Rows of the bottom panel row, borders included.
pub const BOTTOM_HEIGHT: u16 = 7;

/// The canvas must fit the scene plus its border.
const CANVAS_MIN_WIDTH: u16 = SCENE_WIDTH as u16 + 2;
const CANVAS_MIN_HEIGHT: u16 = SCENE_HEIGHT as u16 + 2;

pub const MIN_WIDTH: u16 = CANVAS_MIN_WIDTH;
pub const MIN_HEIGHT: u16 = 4 + CANVAS_MIN_HEIGHT + BOTTOM_HEIGHT;

/// Screen rectangles of every panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panels {
    pub header: ClipRect,
    pub tabs: ClipRect,
    pub canvas: ClipRect,
    pub info: ClipRect,
    pub alerts: ClipRect,
    pub log: ClipRect,
    pub controls: ClipRect,
    pub status: ClipRect,
}

fn row(height: f32) -> Style {
    Style {
        size: Size {
            width: Dimension::Percent(1.0),
            height: Dimension::Length(height),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

fn column_share() -> Style {
    Style {
        size: Size {
            width: Dimension::Length(0.0),
            height: Dimension::Percent(1.0),
        },
        flex_grow: 1.0,
        ..Default::default()
    }
}

/// Lay out the panels for a `width` × `height` terminal.
///
/// Returns `None` when the terminal is smaller than [`MIN_WIDTH`] ×
/// [`MIN_HEIGHT`].
pub fn compute_panels(width: u16, height: u16) -> Result<Option<Panels>, taffy::TaffyError> {
    if width < MIN_WIDTH || height < MIN_HEIGHT {
        return Ok(None);
    }

    let mut tree: TaffyTree<()> = TaffyTree::new();

    let header = tree.new_leaf(row(1.0))?;
    let tabs = tree.new_leaf(row(1.0))?;
    let canvas = tree.new_leaf(Style {
        size: Size {
            width: Dimension::Percent(1.0),
            height: Dimension::Auto,
        },
        min_size: Size {
            width: Dimension::Auto,
            height: Dimension::Length(CANVAS_MIN_HEIGHT as f32),
        },
        flex_grow: 1.0,
        ..Default::default()
    })?;

    let info = tree.new_leaf(column_share())?;
    let alerts = tree.new_leaf(column_share())?;
    let log = tree.new_leaf(column_share())?;
    let bottom = tree.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Row,
            ..row(BOTTOM_HEIGHT as f32)
        },
        &[info, alerts, log],
    )?;

    let controls = tree.new_leaf(row(1.0))?;
    let status = tree.new_leaf(row(1.0))?;

    let root = tree.new_with_children(
        Style {
            display: Display::Flex,
            flex_direction: FlexDirection::Column,
            size: Size {
                width: Dimension::Length(width as f32),
                height: Dimension::Length(height as f32),
            },
            ..Default::default()
        },
        &[header, tabs, canvas, bottom, controls, status],
    )?;

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::Definite(width as f32),
            height: AvailableSpace::Definite(height as f32),
        },
    )?;

    let rect = |node: NodeId, origin: (f32, f32)| -> Result<ClipRect, taffy::TaffyError> {
        let layout = tree.layout(node)?;
        Ok(ClipRect::new(
            (origin.0 + layout.location.x).round() as u16,
            (origin.1 + layout.location.y).round() as u16,
            layout.size.width.round() as u16,
            layout.size.height.round() as u16,
        ))
    };

    let bottom_rect = rect(bottom, (0.0, 0.0))?;
    let bottom_origin = (bottom_rect.x as f32, bottom_rect.y as f32);

    Ok(Some(Panels {
        header: rect(header, (0.0, 0.0))?,
        tabs: rect(tabs, (0.0, 0.0))?,
        canvas: rect(canvas, (0.0, 0.0))?,
        info: rect(info, bottom_origin)?,
        alerts: rect(alerts, bottom_origin)?,
        log: rect(log, bottom_origin)?,
        controls: rect(controls, (0.0, 0.0))?,
        status: rect(status, (0.0, 0.0))?,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_too_small() {
        assert_eq!(compute_panels(MIN_WIDTH - 1, 40).unwrap(), None);
        assert_eq!(compute_panels(120, MIN_HEIGHT - 1).unwrap(), None);
    }

    #[test]
    fn test_rows_stack_and_canvas_grows() {
        let panels = compute_panels(100, 40).unwrap().unwrap();

        assert_eq!(panels.header, ClipRect::new(0, 0, 100, 1));
        assert_eq!(panels.tabs.y, 1);
        assert_eq!(panels.canvas.y, 2);
        assert_eq!(panels.status, ClipRect::new(0, 39, 100, 1));
        assert_eq!(panels.controls.y, 38);

        // Everything left over goes to the canvas.
        assert_eq!(panels.canvas.height, 40 - 4 - BOTTOM_HEIGHT);
        assert_eq!(panels.info.y, panels.canvas.y + panels.canvas.height);
    }

    #[test]
    fn test_bottom_row_splits_in_three() {
        let panels = compute_panels(90, MIN_HEIGHT).unwrap().unwrap();

        assert_eq!(panels.info.x, 0);
        assert_eq!(panels.alerts.x, panels.info.x + panels.info.width);
        assert_eq!(panels.log.x, panels.alerts.x + panels.alerts.width);
        assert_eq!(panels.info.width + panels.alerts.width + panels.log.width, 90);
        assert_eq!(panels.alerts.height, BOTTOM_HEIGHT);
        assert!(panels.canvas.height >= CANVAS_MIN_HEIGHT);
    }
}
