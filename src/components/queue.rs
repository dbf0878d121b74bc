//! Bounded FIFO queue, front on the left and rear on the right.

use std::collections::VecDeque;

use rand::rngs::StdRng;

use super::{Animation, Component, Operation, Pace, Section, glide_path, random_value};
use crate::error::VisualError;
use crate::scene::{SCENE_WIDTH, Scene};
use crate::state::alerts::AlertLevel;
use crate::theme::Tone;

pub const QUEUE_CAPACITY: usize = 6;

const ITEM_WIDTH: i32 = 9;
const ITEM_GAP: i32 = 2;
const FIRST_X: i32 = 6;
const ITEM_ROW: i32 = 5;

const OPERATIONS: &[Operation] = &[
    Operation {
        key: 'e',
        label: "Enqueue",
        info: "Enqueue: Adds a new element to the rear of the queue.",
    },
    Operation {
        key: 'd',
        label: "Dequeue",
        info: "Dequeue: Removes the front element from the queue.",
    },
    Operation {
        key: 'f',
        label: "Front",
        info: "Front: Views the front element of the queue without removing it.",
    },
    Operation {
        key: 'r',
        label: "Reset",
        info: "Reset: Clears the queue.",
    },
];

#[derive(Debug, Default)]
pub struct Queue {
    items: VecDeque<i64>,
}

impl Queue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Items from front to rear.
    pub fn items(&self) -> Vec<i64> {
        self.items.iter().copied().collect()
    }

    pub fn enqueue(&mut self, value: i64) -> Result<Animation, VisualError> {
        if self.items.len() >= QUEUE_CAPACITY {
            return Err(VisualError::Full { structure: "Queue" });
        }

        let mut anim = Animation::new();
        for x in glide_path(SCENE_WIDTH + 1, slot_x(self.items.len())) {
            let mut scene = self.render(0, |_| None);
            scene.block(x, ITEM_ROW, ITEM_WIDTH, value.to_string(), None, Tone::Pending);
            anim.step(scene, Pace::Glide);
        }

        self.items.push_back(value);
        Ok(anim.success(format!("Enqueued {value}")))
    }

    pub fn dequeue(&mut self) -> Result<Animation, VisualError> {
        let Some(&value) = self.items.front() else {
            return Err(VisualError::Empty { structure: "Queue" });
        };

        let mut anim = Animation::new();
        anim.step(self.render(0, |i| (i == 0).then_some(Tone::Removing)), Pace::Beat);

        for x in glide_path(slot_x(0), -ITEM_WIDTH - 2) {
            let mut scene = self.render(1, |_| None);
            scene.block(x, ITEM_ROW, ITEM_WIDTH, value.to_string(), None, Tone::Removing);
            anim.step(scene, Pace::Glide);
        }

        self.items.pop_front();
        Ok(anim.success(format!("Dequeued {value}")))
    }

    pub fn front(&self) -> Result<Animation, VisualError> {
        let Some(&value) = self.items.front() else {
            return Err(VisualError::Empty { structure: "Queue" });
        };

        let mut anim = Animation::new();
        anim.step(self.render(0, |i| (i == 0).then_some(Tone::Probing)), Pace::Beat);
        Ok(anim.with_alert(AlertLevel::Info, format!("Front element: {value}")))
    }

    pub fn reset(&mut self) -> Animation {
        self.items.clear();
        Animation::new()
    }

    /// Draw the queue, leaving out the first `skip` items.
    fn render(&self, skip: usize, highlight: impl Fn(usize) -> Option<Tone>) -> Scene {
        let mut scene =
            Scene::new("Queue").with_caption(format!("Size: {}/{}", self.items.len(), QUEUE_CAPACITY));
        scene.frame(FIRST_X - 2, ITEM_ROW - 1, SCENE_WIDTH - 2 * (FIRST_X - 2), 5, Tone::Muted);

        for (i, &value) in self.items.iter().enumerate().skip(skip) {
            let tone = highlight(i).unwrap_or(Tone::for_value(value));
            scene.block(slot_x(i), ITEM_ROW, ITEM_WIDTH, value.to_string(), None, tone);
        }

        if self.items.len() > skip {
            scene.text(slot_x(skip) + 2, ITEM_ROW - 2, "FRONT", Tone::Pointer);
            scene.text(slot_x(self.items.len() - 1) + 2, ITEM_ROW + 4, "REAR", Tone::Pointer);
        }
        scene.text(FIRST_X - 4, ITEM_ROW + 1, "◄", Tone::Muted);
        scene.text(SCENE_WIDTH - FIRST_X + 3, ITEM_ROW + 1, "◄", Tone::Muted);
        scene
    }
}

fn slot_x(index: usize) -> i32 {
    FIRST_X + index as i32 * (ITEM_WIDTH + ITEM_GAP)
}

impl Component for Queue {
    fn id(&self) -> &'static str {
        "queue"
    }

    fn title(&self) -> &'static str {
        "Queue"
    }

    fn section(&self) -> Section {
        Section::Linear
    }

    fn operations(&self) -> &'static [Operation] {
        OPERATIONS
    }

    fn perform(&mut self, key: char, rng: &mut StdRng) -> Result<Animation, VisualError> {
        match key {
            'e' => {
                let value = random_value(rng);
                self.enqueue(value)
            }
            'd' => self.dequeue(),
            'f' => self.front(),
            'r' => Ok(self.reset()),
            _ => Err(VisualError::UnknownOperation { key }),
        }
    }

    fn scene(&self) -> Scene {
        self.render(0, |_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_order() {
        let mut queue = Queue::new();
        queue.enqueue(1).unwrap();
        queue.enqueue(2).unwrap();
        let anim = queue.dequeue().unwrap();
        assert_eq!(anim.alert.unwrap().1, "Dequeued 1");
        assert_eq!(queue.items(), [2]);
    }

    #[test]
    fn test_front_is_leftmost() {
        let mut queue = Queue::new();
        queue.enqueue(11).unwrap();
        queue.enqueue(22).unwrap();

        let anim = queue.front().unwrap();
        assert_eq!(anim.steps[0].scene.find_tone("11"), Some(Tone::Probing));
        assert_eq!(anim.alert, Some((AlertLevel::Info, "Front element: 11".into())));

        let scene = queue.scene();
        assert_eq!(scene.labels(), ["11", "22"]);
    }

    #[test]
    fn test_enqueue_glides_from_right() {
        let mut queue = Queue::new();
        let anim = queue.enqueue(5).unwrap();
        let xs: Vec<i32> = anim
            .scenes()
            .filter_map(|s| {
                s.shapes.iter().find_map(|shape| match shape {
                    crate::scene::Shape::Block { x, label, .. } if label == "5" => Some(*x),
                    _ => None,
                })
            })
            .collect();
        assert_eq!(xs.first(), Some(&(SCENE_WIDTH + 1)));
        assert_eq!(xs.last(), Some(&slot_x(0)));
    }

    #[test]
    fn test_bounds() {
        let mut queue = Queue::new();
        assert_eq!(queue.dequeue(), Err(VisualError::Empty { structure: "Queue" }));
        assert_eq!(queue.front(), Err(VisualError::Empty { structure: "Queue" }));
        for v in 0..QUEUE_CAPACITY as i64 {
            queue.enqueue(v).unwrap();
        }
        assert_eq!(queue.enqueue(7), Err(VisualError::Full { structure: "Queue" }));
    }
}
