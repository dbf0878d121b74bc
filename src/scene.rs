//! Scenes: what a visualizer wants drawn.
//!
//! Components never touch the frame buffer. They describe one moment of an
//! animation as a [`Scene`], a display list of [`Shape`]s on a fixed logical
//! canvas of [`SCENE_WIDTH`] × [`SCENE_HEIGHT`] cells. The painter in
//! `pipeline::paint` centres that canvas in the available panel, clips it and
//! resolves each [`Tone`] through the active theme.
//!
//! Row 0 holds the title and the last row holds the caption; shapes normally
//! live on the rows in between.

use crate::theme::Tone;

pub const SCENE_WIDTH: i32 = 76;
pub const SCENE_HEIGHT: i32 = 13;

/// Row used for the caption line.
pub const CAPTION_ROW: i32 = SCENE_HEIGHT - 1;

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A boxed element, 3 rows tall, `width` including the border.
    /// The caption is drawn centred on the row below.
    Block {
        x: i32,
        y: i32,
        width: i32,
        label: String,
        caption: Option<String>,
        tone: Tone,
    },
    /// A one-row filled element.
    Bar {
        x: i32,
        y: i32,
        width: i32,
        label: String,
        tone: Tone,
    },
    /// A label on a filled background, centred on `x`.
    Node {
        x: i32,
        y: i32,
        label: String,
        tone: Tone,
    },
    /// A straight line between two points with an optional midpoint label.
    Edge {
        from: (i32, i32),
        to: (i32, i32),
        label: Option<String>,
        tone: Tone,
    },
    /// `──►` pointing right, `length` cells long including the head.
    Arrow {
        x: i32,
        y: i32,
        length: i32,
        tone: Tone,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        tone: Tone,
    },
    /// A container outline.
    Frame {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        tone: Tone,
    },
    Progress {
        x: i32,
        y: i32,
        width: i32,
        ratio: f32,
        tone: Tone,
    },
}

impl Shape {
    /// The element label, for shapes that represent a data element.
    pub fn label(&self) -> Option<&str> {
        match self {
            Shape::Block { label, .. } | Shape::Bar { label, .. } | Shape::Node { label, .. } => {
                Some(label)
            }
            _ => None,
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Shape::Block { tone, .. }
            | Shape::Bar { tone, .. }
            | Shape::Node { tone, .. }
            | Shape::Edge { tone, .. }
            | Shape::Arrow { tone, .. }
            | Shape::Text { tone, .. }
            | Shape::Frame { tone, .. }
            | Shape::Progress { tone, .. } => *tone,
        }
    }
}

/// One frame of a visualizer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub title: String,
    pub caption: String,
    pub shapes: Vec<Shape>,
}

impl Scene {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }

    pub fn push(&mut self, shape: Shape) -> &mut Self {
        self.shapes.push(shape);
        self
    }

    pub fn block(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        label: impl Into<String>,
        caption: Option<String>,
        tone: Tone,
    ) -> &mut Self {
        self.push(Shape::Block {
            x,
            y,
            width,
            label: label.into(),
            caption,
            tone,
        })
    }

    pub fn bar(&mut self, x: i32, y: i32, width: i32, label: impl Into<String>, tone: Tone) -> &mut Self {
        self.push(Shape::Bar {
            x,
            y,
            width,
            label: label.into(),
            tone,
        })
    }

    pub fn node(&mut self, x: i32, y: i32, label: impl Into<String>, tone: Tone) -> &mut Self {
        self.push(Shape::Node {
            x,
            y,
            label: label.into(),
            tone,
        })
    }

    pub fn edge(&mut self, from: (i32, i32), to: (i32, i32), label: Option<String>, tone: Tone) -> &mut Self {
        self.push(Shape::Edge { from, to, label, tone })
    }

    pub fn arrow(&mut self, x: i32, y: i32, length: i32, tone: Tone) -> &mut Self {
        self.push(Shape::Arrow { x, y, length, tone })
    }

    pub fn text(&mut self, x: i32, y: i32, text: impl Into<String>, tone: Tone) -> &mut Self {
        self.push(Shape::Text {
            x,
            y,
            text: text.into(),
            tone,
        })
    }

    pub fn frame(&mut self, x: i32, y: i32, width: i32, height: i32, tone: Tone) -> &mut Self {
        self.push(Shape::Frame {
            x,
            y,
            width,
            height,
            tone,
        })
    }

    pub fn progress(&mut self, x: i32, y: i32, width: i32, ratio: f32, tone: Tone) -> &mut Self {
        self.push(Shape::Progress {
            x,
            y,
            width,
            ratio,
            tone,
        })
    }

    /// Tone of the first element labelled `label`.
    pub fn find_tone(&self, label: &str) -> Option<Tone> {
        self.shapes
            .iter()
            .find(|shape| shape.label() == Some(label))
            .map(Shape::tone)
    }

    /// Element labels in drawing order.
    pub fn labels(&self) -> Vec<&str> {
        self.shapes.iter().filter_map(Shape::label).collect()
    }

    /// Labels of elements drawn with `tone`.
    pub fn labels_with(&self, tone: Tone) -> Vec<&str> {
        self.shapes
            .iter()
            .filter(|shape| shape.tone() == tone)
            .filter_map(Shape::label)
            .collect()
    }

    /// Whether any element carries a highlight tone.
    pub fn has_highlight(&self) -> bool {
        self.shapes
            .iter()
            .any(|shape| shape.label().is_some() && shape.tone().is_highlight())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_tone_and_labels() {
        let mut scene = Scene::new("Array");
        scene
            .block(0, 2, 7, "12", Some("[0]".into()), Tone::Fill(0))
            .block(8, 2, 7, "40", Some("[1]".into()), Tone::Probing)
            .text(0, 6, "note", Tone::Muted);

        assert_eq!(scene.labels(), ["12", "40"]);
        assert_eq!(scene.find_tone("40"), Some(Tone::Probing));
        assert_eq!(scene.find_tone("99"), None);
        assert_eq!(scene.labels_with(Tone::Probing), ["40"]);
        assert!(scene.has_highlight());
    }

    #[test]
    fn test_resting_scene_has_no_highlight() {
        let mut scene = Scene::new("Stack").with_caption("Size: 1/5");
        scene.node(10, 3, "5", Tone::Fill(5));
        assert!(!scene.has_highlight());
        assert_eq!(scene.caption, "Size: 1/5");
    }
}
