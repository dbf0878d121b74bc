//! Array-backed max heap drawn as a complete binary tree.

use rand::rngs::StdRng;

use super::{Animation, Component, Operation, Pace, Section, random_value};
use crate::error::VisualError;
use crate::scene::{SCENE_WIDTH, Scene};
use crate::theme::Tone;

/// Five full levels.
pub const HEAP_CAPACITY: usize = 31;

const TOP_ROW: i32 = 2;
const LEVEL_HEIGHT: i32 = 2;

const OPERATIONS: &[Operation] = &[
    Operation {
        key: 'i',
        label: "Insert",
        info: "Insert: Adds a new element to the heap and maintains the heap property.",
    },
    Operation {
        key: 'x',
        label: "Extract Max",
        info: "Extract Max: Removes and returns the maximum element from the heap.",
    },
    Operation {
        key: 'h',
        label: "Heapify",
        info: "Heapify: Rearranges the heap to maintain the heap property.",
    },
    Operation {
        key: 'r',
        label: "Reset",
        info: "Reset: Clears the heap.",
    },
];

#[derive(Debug, Default)]
pub struct MaxHeap {
    items: Vec<i64>,
}

impl MaxHeap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap raw values without reordering them; `heapify` restores order.
    pub fn from_unordered(values: impl IntoIterator<Item = i64>) -> Self {
        let mut items: Vec<i64> = values.into_iter().collect();
        items.truncate(HEAP_CAPACITY);
        Self { items }
    }

    pub fn items(&self) -> &[i64] {
        &self.items
    }

    /// Every parent is at least as large as its children.
    pub fn is_valid(&self) -> bool {
        (1..self.items.len()).all(|i| self.items[(i - 1) / 2] >= self.items[i])
    }

    pub fn insert(&mut self, value: i64) -> Result<Animation, VisualError> {
        if self.items.len() >= HEAP_CAPACITY {
            return Err(VisualError::Full { structure: "Heap" });
        }

        self.items.push(value);
        let last = self.items.len() - 1;

        let mut anim = Animation::new();
        anim.step(self.render(|i| (i == last).then_some(Tone::Pending)), Pace::Beat);
        self.sift_up(last, &mut anim);

        Ok(anim.success(format!("Inserted {value}")))
    }

    pub fn extract_max(&mut self) -> Result<Animation, VisualError> {
        let Some(&max) = self.items.first() else {
            return Err(VisualError::Empty { structure: "Heap" });
        };

        let mut anim = Animation::new();
        anim.step(self.render(|i| (i == 0).then_some(Tone::Removing)), Pace::Beat);

        let last = self.items.len() - 1;
        self.items.swap(0, last);
        self.items.pop();
        if !self.items.is_empty() {
            anim.step(self.render(|i| (i == 0).then_some(Tone::Pending)), Pace::Settle);
            self.sift_down(0, &mut anim);
        }

        Ok(anim.success(format!("Extracted max: {max}")))
    }

    /// Bottom-up build-heap from the last internal node to the root.
    pub fn heapify(&mut self) -> Result<Animation, VisualError> {
        if self.items.is_empty() {
            return Err(VisualError::Empty { structure: "Heap" });
        }

        let mut anim = Animation::new();
        for i in (0..self.items.len() / 2).rev() {
            self.sift_down(i, &mut anim);
        }

        Ok(anim.success("Heapify completed"))
    }

    pub fn reset(&mut self) -> Animation {
        self.items.clear();
        Animation::new()
    }

    fn sift_up(&mut self, mut index: usize, anim: &mut Animation) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.items[index] <= self.items[parent] {
                break;
            }
            let pair = |i: usize| i == index || i == parent;
            anim.step(self.render(|i| pair(i).then_some(Tone::Pending)), Pace::Beat);
            self.items.swap(index, parent);
            anim.step(self.render(|_| None), Pace::Settle);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize, anim: &mut Animation) {
        let len = self.items.len();
        loop {
            let mut largest = index;
            for child in [2 * index + 1, 2 * index + 2] {
                if child < len && self.items[child] > self.items[largest] {
                    largest = child;
                }
            }
            if largest == index {
                break;
            }
            let pair = |i: usize| i == index || i == largest;
            anim.step(self.render(|i| pair(i).then_some(Tone::Pending)), Pace::Beat);
            self.items.swap(index, largest);
            anim.step(self.render(|_| None), Pace::Settle);
            index = largest;
        }
    }

    fn render(&self, highlight: impl Fn(usize) -> Option<Tone>) -> Scene {
        let mut scene = Scene::new("Max Heap")
            .with_caption(format!("Size: {}/{}", self.items.len(), HEAP_CAPACITY));

        for child in 1..self.items.len() {
            scene.edge(node_position((child - 1) / 2), node_position(child), None, Tone::Muted);
        }
        for (i, &value) in self.items.iter().enumerate() {
            let (x, y) = node_position(i);
            let tone = highlight(i).unwrap_or(Tone::for_value(value));
            scene.node(x, y, value.to_string(), tone);
        }

        if self.items.is_empty() {
            scene.text(31, TOP_ROW + 3, "(empty heap)", Tone::Muted);
        } else {
            let (x, y) = node_position(0);
            scene.text(x + 3, y, "ROOT", Tone::Pointer);
        }
        scene
    }
}

/// Canvas position of array slot `index`.
///
/// Level is `⌊log2(index + 1)⌋`; each level spreads its `2^level` slots
/// evenly across the width.
pub fn node_position(index: usize) -> (i32, i32) {
    let level = (index + 1).ilog2();
    let first = (1usize << level) - 1;
    let spacing = SCENE_WIDTH as f32 / ((1usize << level) + 1) as f32;
    let x = (spacing * (index - first + 1) as f32).round() as i32;
    (x, TOP_ROW + level as i32 * LEVEL_HEIGHT)
}

impl Component for MaxHeap {
    fn id(&self) -> &'static str {
        "heap"
    }

    fn title(&self) -> &'static str {
        "Heap"
    }

    fn section(&self) -> Section {
        Section::Tree
    }

    fn operations(&self) -> &'static [Operation] {
        OPERATIONS
    }

    fn perform(&mut self, key: char, rng: &mut StdRng) -> Result<Animation, VisualError> {
        match key {
            'i' => {
                let value = random_value(rng);
                self.insert(value)
            }
            'x' => self.extract_max(),
            'h' => self.heapify(),
            'r' => Ok(self.reset()),
            _ => Err(VisualError::UnknownOperation { key }),
        }
    }

    fn scene(&self) -> Scene {
        self.render(|_| None)
    }
}
