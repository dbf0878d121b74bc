//! Visualizers.
//!
//! Each visualizer owns a small textbook structure and a table of
//! operations. Performing an operation mutates the structure and records the
//! intermediate moments as an [`Animation`]: a list of scenes with how long
//! each one stays up. Bounds checks run first; a refused operation returns a
//! [`VisualError`] and leaves the structure untouched.
//!
//! # Example
//!
//! ```rust
//! use algovista::components::{Component, Stack};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut stack = Stack::new();
//! let pushed = stack.perform('p', &mut rng).unwrap();
//! assert!(!pushed.steps.is_empty());
//! assert_eq!(stack.items().len(), 1);
//! ```

use rand::Rng;
use rand::rngs::StdRng;

use crate::error::VisualError;
use crate::scene::{SCENE_WIDTH, Scene};
use crate::state::alerts::AlertLevel;

mod array;
mod binary_tree;
mod graph;
mod hash_table;
mod heap;
mod linked_list;
mod queue;
mod quiz;
mod stack;
mod string;
mod trie;

pub use array::{ARRAY_CAPACITY, ArrayVisualizer};
pub use binary_tree::{BinaryTree, MAX_LEVELS, Order};
pub use graph::{Edge, Graph, MAX_NODES};
pub use hash_table::{BUCKET_COUNT, Entry, HashTable, hash};
pub use heap::{HEAP_CAPACITY, MaxHeap};
pub use linked_list::{LIST_CAPACITY, LinkedList};
pub use queue::{QUEUE_CAPACITY, Queue};
pub use quiz::{QUESTIONS, Question, Quiz};
pub use stack::{STACK_CAPACITY, Stack};
pub use string::{MAX_LENGTH, StringVisualizer};
pub use trie::{Trie, WORDS};

// =============================================================================
// Animation
// =============================================================================

/// How long a step stays on screen, relative to the configured speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// One full animation beat.
    Beat,
    /// Half a beat.
    Half,
    /// A short pause between comparisons (200 ms at the default speed).
    Settle,
    /// One frame of a slide motion (a twentieth of a beat).
    Glide,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub scene: Scene,
    pub pace: Pace,
}

/// The recorded result of one operation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Animation {
    pub steps: Vec<Step>,
    /// Raised once the last step has played.
    pub alert: Option<(AlertLevel, String)>,
}

impl Animation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, scene: Scene, pace: Pace) {
        self.steps.push(Step { scene, pace });
    }

    pub fn with_alert(mut self, level: AlertLevel, message: impl Into<String>) -> Self {
        self.alert = Some((level, message.into()));
        self
    }

    pub fn success(self, message: impl Into<String>) -> Self {
        self.with_alert(AlertLevel::Success, message)
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Scenes in playing order.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.steps.iter().map(|step| &step.scene)
    }
}

// =============================================================================
// Component
// =============================================================================

/// Page section a component belongs to, used by search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Basic,
    Linear,
    Tree,
    Graph,
    Hash,
    Trie,
    Quiz,
}

impl Section {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Basic => "basic",
            Self::Linear => "linear",
            Self::Tree => "tree",
            Self::Graph => "graph",
            Self::Hash => "hash",
            Self::Trie => "trie",
            Self::Quiz => "quiz",
        }
    }
}

/// A key-bound operation with its description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    pub key: char,
    pub label: &'static str,
    /// Shown in the info box when the operation is invoked.
    pub info: &'static str,
}

pub trait Component {
    /// Stable identifier, used by `--start`.
    fn id(&self) -> &'static str;

    fn title(&self) -> &'static str;

    fn section(&self) -> Section;

    fn operations(&self) -> &'static [Operation];

    /// Run the operation bound to `key`.
    fn perform(&mut self, key: char, rng: &mut StdRng) -> Result<Animation, VisualError>;

    /// The resting scene.
    fn scene(&self) -> Scene;

    /// Info text of the operation bound to `key`.
    fn info(&self, key: char) -> Option<&'static str> {
        self.operations()
            .iter()
            .find(|op| op.key == key)
            .map(|op| op.info)
    }
}

/// Every component in tab order.
pub fn catalog() -> Vec<Box<dyn Component>> {
    vec![
        Box::new(ArrayVisualizer::new()),
        Box::new(StringVisualizer::new()),
        Box::new(LinkedList::new()),
        Box::new(Stack::new()),
        Box::new(Queue::new()),
        Box::new(BinaryTree::new()),
        Box::new(MaxHeap::new()),
        Box::new(Graph::new()),
        Box::new(HashTable::new()),
        Box::new(Trie::new()),
        Box::new(Quiz::new()),
    ]
}

// =============================================================================
// Shared helpers
// =============================================================================

/// A random element value, 1..=99.
pub(crate) fn random_value(rng: &mut StdRng) -> i64 {
    rng.gen_range(1..=99)
}

/// Frames in a slide motion, excluding the starting position.
pub(crate) const GLIDE_FRAMES: i32 = 20;

/// Positions of a slide from `from` to `to`, both ends included.
pub(crate) fn glide_path(from: i32, to: i32) -> Vec<i32> {
    (0..=GLIDE_FRAMES)
        .map(|i| from + ((to - from) as f32 * i as f32 / GLIDE_FRAMES as f32).round() as i32)
        .collect()
}

/// Left edges for `count` items of `width` separated by `gap`, centred.
pub(crate) fn centred_row(count: usize, width: i32, gap: i32) -> Vec<i32> {
    if count == 0 {
        return Vec::new();
    }
    let total = count as i32 * width + (count as i32 - 1) * gap;
    let start = ((SCENE_WIDTH - total) / 2).max(0);
    (0..count as i32).map(|i| start + i * (width + gap)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_ids_unique() {
        let components = catalog();
        let mut ids: Vec<_> = components.iter().map(|c| c.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), components.len());
    }

    #[test]
    fn test_operation_keys_unique_per_component() {
        for component in catalog() {
            let mut keys: Vec<_> = component.operations().iter().map(|op| op.key).collect();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), component.operations().len(), "{}", component.id());
        }
    }

    #[test]
    fn test_glide_path_ends() {
        let path = glide_path(12, 2);
        assert_eq!(path.len(), GLIDE_FRAMES as usize + 1);
        assert_eq!(path.first(), Some(&12));
        assert_eq!(path.last(), Some(&2));
        assert!(path.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn test_centred_row() {
        assert_eq!(centred_row(2, 6, 2), vec![31, 39]);
        assert!(centred_row(0, 6, 2).is_empty());
    }
}
