//! Bounded LIFO stack drawn as a vertical container.

use rand::rngs::StdRng;

use super::{Animation, Component, Operation, Pace, Section, glide_path, random_value};
use crate::error::VisualError;
use crate::scene::{SCENE_HEIGHT, Scene};
use crate::state::alerts::AlertLevel;
use crate::theme::Tone;

pub const STACK_CAPACITY: usize = 5;

const ITEM_X: i32 = 32;
const ITEM_WIDTH: i32 = 12;
/// Row of the bottom slot; each slot above is two rows higher.
const BOTTOM_ROW: i32 = 10;

const OPERATIONS: &[Operation] = &[
    Operation {
        key: 'p',
        label: "Push",
        info: "Push: Places a new element on top of the stack.",
    },
    Operation {
        key: 'o',
        label: "Pop",
        info: "Pop: Removes the element on top of the stack.",
    },
    Operation {
        key: 'k',
        label: "Peek",
        info: "Peek: Reads the top element without removing it.",
    },
    Operation {
        key: 'r',
        label: "Reset",
        info: "Reset: Empties the stack.",
    },
];

#[derive(Debug, Default)]
pub struct Stack {
    items: Vec<i64>,
}

impl Stack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items from bottom to top.
    pub fn items(&self) -> &[i64] {
        &self.items
    }

    pub fn push(&mut self, value: i64) -> Result<Animation, VisualError> {
        if self.items.len() >= STACK_CAPACITY {
            return Err(VisualError::StackOverflow);
        }

        let mut anim = Animation::new();
        let target = slot_row(self.items.len());
        for y in glide_path(SCENE_HEIGHT - 1, target) {
            let mut scene = self.render(self.items.len(), |_| None);
            scene.bar(ITEM_X, y, ITEM_WIDTH, value.to_string(), Tone::Pending);
            anim.step(scene, Pace::Glide);
        }

        self.items.push(value);
        Ok(anim.success(format!("Pushed {value} to stack")))
    }

    pub fn pop(&mut self) -> Result<Animation, VisualError> {
        let Some(&value) = self.items.last() else {
            return Err(VisualError::StackUnderflow);
        };
        let top = self.items.len() - 1;

        let mut anim = Animation::new();
        anim.step(self.render(self.items.len(), |i| (i == top).then_some(Tone::Removing)), Pace::Beat);

        // The popped item slides out through the bottom of the container.
        for y in glide_path(slot_row(top), SCENE_HEIGHT + 1) {
            let mut scene = self.render(top, |_| None);
            scene.bar(ITEM_X, y, ITEM_WIDTH, value.to_string(), Tone::Removing);
            anim.step(scene, Pace::Glide);
        }

        self.items.pop();
        Ok(anim.success(format!("Popped {value} from stack")))
    }

    pub fn peek(&self) -> Result<Animation, VisualError> {
        let Some(&value) = self.items.last() else {
            return Err(VisualError::Empty { structure: "Stack" });
        };
        let top = self.items.len() - 1;

        let mut anim = Animation::new();
        anim.step(self.render(self.items.len(), |i| (i == top).then_some(Tone::Probing)), Pace::Beat);
        Ok(anim.with_alert(AlertLevel::Info, format!("Peeked: {value}")))
    }

    pub fn reset(&mut self) -> Animation {
        self.items.clear();
        Animation::new()
    }

    /// Draw the bottom `count` items.
    fn render(&self, count: usize, highlight: impl Fn(usize) -> Option<Tone>) -> Scene {
        let mut scene =
            Scene::new("Stack").with_caption(format!("Size: {}/{}", self.items.len(), STACK_CAPACITY));
        scene.frame(ITEM_X - 2, slot_row(STACK_CAPACITY - 1) - 1, ITEM_WIDTH + 4, 11, Tone::Muted);

        for (i, &value) in self.items.iter().take(count).enumerate() {
            let tone = highlight(i).unwrap_or(Tone::for_value(value));
            scene.bar(ITEM_X, slot_row(i), ITEM_WIDTH, value.to_string(), tone);
        }
        if count > 0 {
            scene.text(ITEM_X + ITEM_WIDTH + 4, slot_row(count - 1), "◄ TOP", Tone::Pointer);
        }
        scene
    }
}

fn slot_row(index: usize) -> i32 {
    BOTTOM_ROW - 2 * index as i32
}

impl Component for Stack {
    fn id(&self) -> &'static str {
        "stack"
    }

    fn title(&self) -> &'static str {
        "Stack"
    }

    fn section(&self) -> Section {
        Section::Linear
    }

    fn operations(&self) -> &'static [Operation] {
        OPERATIONS
    }

    fn perform(&mut self, key: char, rng: &mut StdRng) -> Result<Animation, VisualError> {
        match key {
            'p' => {
                let value = random_value(rng);
                self.push(value)
            }
            'o' => self.pop(),
            'k' => self.peek(),
            'r' => Ok(self.reset()),
            _ => Err(VisualError::UnknownOperation { key }),
        }
    }

    fn scene(&self) -> Scene {
        self.render(self.items.len(), |_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_glides_into_top_slot() {
        let mut stack = Stack::new();
        let anim = stack.push(42).unwrap();

        assert!(anim.steps.iter().all(|s| s.pace == Pace::Glide));
        let last = &anim.steps.last().unwrap().scene;
        let landed = last.shapes.iter().any(|shape| {
            matches!(shape, crate::scene::Shape::Bar { y, label, .. } if *y == BOTTOM_ROW && label == "42")
        });
        assert!(landed);
        assert_eq!(stack.items(), [42]);
    }

    #[test]
    fn test_overflow_and_underflow() {
        let mut stack = Stack::new();
        assert_eq!(stack.pop(), Err(VisualError::StackUnderflow));
        for v in 0..STACK_CAPACITY as i64 {
            stack.push(v).unwrap();
        }
        assert_eq!(stack.push(99), Err(VisualError::StackOverflow));
        assert_eq!(VisualError::StackOverflow.to_string(), "Stack overflow!");
    }

    #[test]
    fn test_pop_highlights_then_removes_top() {
        let mut stack = Stack::new();
        stack.push(1).unwrap();
        stack.push(2).unwrap();

        let anim = stack.pop().unwrap();
        assert_eq!(anim.steps[0].pace, Pace::Beat);
        assert_eq!(anim.steps[0].scene.find_tone("2"), Some(Tone::Removing));
        assert_eq!(anim.alert.unwrap().1, "Popped 2 from stack");
        assert_eq!(stack.items(), [1]);
    }

    #[test]
    fn test_peek_is_info_and_non_destructive() {
        let mut stack = Stack::new();
        assert_eq!(stack.peek(), Err(VisualError::Empty { structure: "Stack" }));
        stack.push(8).unwrap();

        let anim = stack.peek().unwrap();
        assert_eq!(anim.alert, Some((AlertLevel::Info, "Peeked: 8".into())));
        assert_eq!(stack.items(), [8]);
    }
}
