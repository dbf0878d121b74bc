//! Singly linked list with insertion and deletion at the head.

use rand::rngs::StdRng;

use super::{Animation, Component, Operation, Pace, Section, random_value};
use crate::error::VisualError;
use crate::scene::Scene;
use crate::state::alerts::AlertLevel;
use crate::theme::Tone;

pub const LIST_CAPACITY: usize = 5;

const NODE_WIDTH: i32 = 6;
const NODE_SPACING: i32 = 12;
const FIRST_NODE_X: i32 = 6;
const NODE_ROW: i32 = 4;

const OPERATIONS: &[Operation] = &[
    Operation {
        key: 'i',
        label: "Insert Head",
        info: "Insert: Creates a new node and links it in front of the current head.",
    },
    Operation {
        key: 'd',
        label: "Delete Head",
        info: "Delete: Unlinks the head node; its successor becomes the new head.",
    },
    Operation {
        key: 't',
        label: "Traverse",
        info: "Traverse: Follows next pointers from the head to the end of the list.",
    },
    Operation {
        key: 'r',
        label: "Reset",
        info: "Reset: Removes every node from the list.",
    },
];

#[derive(Debug)]
struct ListNode {
    value: i64,
    next: Option<Box<ListNode>>,
}

#[derive(Debug, Default)]
pub struct LinkedList {
    head: Option<Box<ListNode>>,
    len: usize,
}

impl LinkedList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Values from head to tail.
    pub fn values(&self) -> Vec<i64> {
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            out.push(node.value);
            cursor = node.next.as_deref();
        }
        out
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn insert_head(&mut self, value: i64) -> Result<Animation, VisualError> {
        if self.len >= LIST_CAPACITY {
            return Err(VisualError::Full { structure: "Linked List" });
        }

        // Preview: the new node at the head slot, the rest already shifted.
        let mut anim = Animation::new();
        let mut preview = vec![(String::new(), Tone::Pending)];
        preview.extend(self.values().into_iter().map(|v| (v.to_string(), Tone::for_value(v))));
        anim.step(self.render(&preview), Pace::Beat);

        let next = self.head.take();
        self.head = Some(Box::new(ListNode { value, next }));
        self.len += 1;
        Ok(anim.success(format!("Inserted {value} at the beginning")))
    }

    pub fn delete_head(&mut self) -> Result<Animation, VisualError> {
        let Some(value) = self.head.as_ref().map(|node| node.value) else {
            return Err(VisualError::Empty { structure: "List" });
        };

        let mut anim = Animation::new();
        anim.step(self.render_with(|i| (i == 0).then_some(Tone::Removing)), Pace::Beat);

        if let Some(node) = self.head.take() {
            self.head = node.next;
            self.len -= 1;
        }
        Ok(anim.success(format!("Deleted {value} from the beginning")))
    }

    pub fn traverse(&self) -> Result<Animation, VisualError> {
        if self.is_empty() {
            return Err(VisualError::Empty { structure: "List" });
        }

        let mut anim = Animation::new();
        let mut visited = 0;
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            let index = visited;
            anim.step(self.render_with(|i| (i == index).then_some(Tone::Probing)), Pace::Beat);
            anim.step(self.render_with(|_| None), Pace::Settle);
            visited += 1;
            cursor = node.next.as_deref();
        }

        Ok(anim.with_alert(AlertLevel::Info, format!("Traversed {visited} nodes")))
    }

    pub fn reset(&mut self) -> Animation {
        // Unlink iteratively so long chains never recurse in Drop.
        let mut cursor = self.head.take();
        while let Some(mut node) = cursor {
            cursor = node.next.take();
        }
        self.len = 0;
        Animation::new()
    }

    fn render_with(&self, highlight: impl Fn(usize) -> Option<Tone>) -> Scene {
        let nodes: Vec<_> = self
            .values()
            .into_iter()
            .enumerate()
            .map(|(i, v)| (v.to_string(), highlight(i).unwrap_or(Tone::for_value(v))))
            .collect();
        self.render(&nodes)
    }

    fn render(&self, nodes: &[(String, Tone)]) -> Scene {
        let mut scene =
            Scene::new("Linked List").with_caption(format!("Size: {}/{}", self.len, LIST_CAPACITY));

        for (i, (label, tone)) in nodes.iter().enumerate() {
            let x = FIRST_NODE_X + i as i32 * NODE_SPACING;
            scene.block(x, NODE_ROW, NODE_WIDTH, label.clone(), None, *tone);

            let arrow_x = x + NODE_WIDTH;
            let arrow_len = NODE_SPACING - NODE_WIDTH;
            if i + 1 < nodes.len() {
                scene.arrow(arrow_x, NODE_ROW + 1, arrow_len, Tone::Muted);
            } else {
                scene.arrow(arrow_x, NODE_ROW + 1, 3, Tone::Muted);
                scene.text(arrow_x + 4, NODE_ROW + 1, "NULL", Tone::Muted);
            }
        }

        if nodes.is_empty() {
            scene.text(FIRST_NODE_X, NODE_ROW + 1, "HEAD ──► NULL", Tone::Muted);
        } else {
            scene.text(FIRST_NODE_X + 1, NODE_ROW - 1, "HEAD", Tone::Pointer);
        }
        scene
    }
}

impl Component for LinkedList {
    fn id(&self) -> &'static str {
        "linked-list"
    }

    fn title(&self) -> &'static str {
        "Linked List"
    }

    fn section(&self) -> Section {
        Section::Linear
    }

    fn operations(&self) -> &'static [Operation] {
        OPERATIONS
    }

    fn perform(&mut self, key: char, rng: &mut StdRng) -> Result<Animation, VisualError> {
        match key {
            'i' => {
                let value = random_value(rng);
                self.insert_head(value)
            }
            'd' => self.delete_head(),
            't' => self.traverse(),
            'r' => Ok(self.reset()),
            _ => Err(VisualError::UnknownOperation { key }),
        }
    }

    fn scene(&self) -> Scene {
        self.render_with(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_at_head_order() {
        let mut list = LinkedList::new();
        list.insert_head(1).unwrap();
        list.insert_head(2).unwrap();
        list.insert_head(3).unwrap();
        assert_eq!(list.values(), [3, 2, 1]);
    }

    #[test]
    fn test_insert_preview_shows_pending_head() {
        let mut list = LinkedList::new();
        list.insert_head(10).unwrap();
        let anim = list.insert_head(20).unwrap();

        let preview = &anim.steps[0].scene;
        assert_eq!(preview.labels(), ["", "10"]);
        assert_eq!(preview.find_tone(""), Some(Tone::Pending));
        assert_eq!(anim.alert.unwrap().1, "Inserted 20 at the beginning");
    }

    #[test]
    fn test_capacity() {
        let mut list = LinkedList::new();
        for v in 0..LIST_CAPACITY as i64 {
            list.insert_head(v).unwrap();
        }
        assert_eq!(list.insert_head(9), Err(VisualError::Full { structure: "Linked List" }));
        assert_eq!(
            VisualError::Full { structure: "Linked List" }.to_string(),
            "Linked List is full!"
        );
    }

    #[test]
    fn test_delete_head() {
        let mut list = LinkedList::new();
        assert_eq!(list.delete_head(), Err(VisualError::Empty { structure: "List" }));

        list.insert_head(5).unwrap();
        list.insert_head(6).unwrap();
        let anim = list.delete_head().unwrap();
        assert_eq!(anim.steps[0].scene.find_tone("6"), Some(Tone::Removing));
        assert_eq!(list.values(), [5]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_traverse_visits_every_node() {
        let mut list = LinkedList::new();
        for v in [7, 8, 9] {
            list.insert_head(v).unwrap();
        }
        let anim = list.traverse().unwrap();
        let probed: Vec<_> = anim
            .scenes()
            .flat_map(|s| s.labels_with(Tone::Probing))
            .map(str::to_string)
            .collect();
        assert_eq!(probed, ["9", "8", "7"]);
        assert_eq!(anim.alert, Some((AlertLevel::Info, "Traversed 3 nodes".into())));
    }
}
