//! Binary search tree with depth-limited insertion and the three
//! depth-first traversals.
//!
//! Nodes live in an arena (`Vec<Option<TreeNode>>`) and refer to each other
//! by index, which lets a scene highlight "this node" without borrowing the
//! tree. Deleted slots are left empty until the next reset.

use std::collections::{BTreeMap, HashMap, VecDeque};

use rand::rngs::StdRng;

use super::{Animation, Component, Operation, Pace, Section, random_value};
use crate::error::VisualError;
use crate::scene::{SCENE_WIDTH, Scene};
use crate::state::alerts::AlertLevel;
use crate::theme::Tone;

/// Deepest level a node may occupy, counting the root as level 1.
pub const MAX_LEVELS: usize = 5;

const TOP_ROW: i32 = 2;
const LEVEL_HEIGHT: i32 = 2;

type NodeId = usize;

/// Depth-first visit orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Inorder,
    Preorder,
    Postorder,
}

impl Order {
    fn name(&self) -> &'static str {
        match self {
            Self::Inorder => "Inorder",
            Self::Preorder => "Preorder",
            Self::Postorder => "Postorder",
        }
    }
}

const OPERATIONS: &[Operation] = &[
    Operation {
        key: 'i',
        label: "Insert",
        info: "Insert: Adds a new node to the binary tree.",
    },
    Operation {
        key: 'd',
        label: "Delete",
        info: "Delete: Removes a node from the binary tree.",
    },
    Operation {
        key: 'n',
        label: "Inorder",
        info: "Inorder: Traverses the tree in left-root-right order.",
    },
    Operation {
        key: 'p',
        label: "Preorder",
        info: "Preorder: Traverses the tree in root-left-right order.",
    },
    Operation {
        key: 'o',
        label: "Postorder",
        info: "Postorder: Traverses the tree in left-right-root order.",
    },
    Operation {
        key: 'r',
        label: "Reset",
        info: "Reset: Clears the binary tree.",
    },
];

#[derive(Debug, Clone)]
struct TreeNode {
    value: i64,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

#[derive(Debug, Default)]
pub struct BinaryTree {
    nodes: Vec<Option<TreeNode>>,
    root: Option<NodeId>,
}

impl BinaryTree {
    pub fn new() -> Self {
        Self::default()
    }

    fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id).and_then(Option::as_ref)
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of levels, 0 for an empty tree.
    pub fn height(&self) -> usize {
        fn depth(tree: &BinaryTree, id: Option<NodeId>) -> usize {
            match id.and_then(|id| tree.node(id)) {
                Some(node) => 1 + depth(tree, node.left).max(depth(tree, node.right)),
                None => 0,
            }
        }
        depth(self, self.root)
    }

    /// Values in the given depth-first order.
    pub fn values(&self, order: Order) -> Vec<i64> {
        self.visit(order)
            .into_iter()
            .filter_map(|id| self.node(id).map(|n| n.value))
            .collect()
    }

    pub fn insert(&mut self, value: i64) -> Result<Animation, VisualError> {
        let mut anim = Animation::new();

        let Some(root) = self.root else {
            let id = self.alloc(value);
            self.root = Some(id);
            anim.step(self.render(&HashMap::from([(id, Tone::Found)])), Pace::Beat);
            return Ok(anim.success(format!("Inserted {value} as root")));
        };

        if self.height() >= MAX_LEVELS {
            return Err(VisualError::DepthExceeded { max: MAX_LEVELS });
        }

        let mut path = vec![root];
        let mut goes_left = false;
        let mut cursor = Some(root);
        while let Some(node) = cursor.and_then(|id| self.node(id)) {
            goes_left = value < node.value;
            cursor = if goes_left { node.left } else { node.right };
            if let Some(next) = cursor {
                path.push(next);
            }
        }
        for &id in &path {
            anim.step(self.render(&HashMap::from([(id, Tone::Probing)])), Pace::Beat);
        }

        let id = self.alloc(value);
        let parent = path[path.len() - 1];
        if let Some(Some(node)) = self.nodes.get_mut(parent) {
            if goes_left {
                node.left = Some(id);
            } else {
                node.right = Some(id);
            }
        }
        anim.step(self.render(&HashMap::from([(id, Tone::Found)])), Pace::Beat);

        Ok(anim.success(format!("Inserted {value}")))
    }

    /// Remove the leaf reached by preferring left children.
    pub fn delete(&mut self) -> Result<Animation, VisualError> {
        let Some(root) = self.root else {
            return Err(VisualError::Empty { structure: "Tree" });
        };

        let mut parent = None;
        let mut current = root;
        while let Some(node) = self.node(current) {
            match node.left.or(node.right) {
                Some(child) => {
                    parent = Some(current);
                    current = child;
                }
                None => break,
            }
        }
        let value = self.node(current).map_or(0, |n| n.value);

        let mut anim = Animation::new();
        anim.step(self.render(&HashMap::from([(current, Tone::Removing)])), Pace::Beat);

        match parent.and_then(|p| self.nodes.get_mut(p)).and_then(Option::as_mut) {
            Some(node) if node.left == Some(current) => node.left = None,
            Some(node) => node.right = None,
            None => self.root = None,
        }
        self.nodes[current] = None;

        Ok(anim.success(format!("Deleted {value}")))
    }

    pub fn traverse(&self, order: Order) -> Result<Animation, VisualError> {
        if self.is_empty() {
            return Err(VisualError::Empty { structure: "Tree" });
        }

        let mut anim = Animation::new();
        let mut marks = HashMap::new();
        for id in self.visit(order) {
            marks.insert(id, Tone::Probing);
            anim.step(self.render(&marks), Pace::Beat);
            marks.insert(id, Tone::Visited);
            anim.step(self.render(&marks), Pace::Settle);
        }

        Ok(anim.with_alert(AlertLevel::Info, format!("{} traversal completed", order.name())))
    }

    pub fn reset(&mut self) -> Animation {
        self.nodes.clear();
        self.root = None;
        Animation::new()
    }

    fn alloc(&mut self, value: i64) -> NodeId {
        self.nodes.push(Some(TreeNode {
            value,
            left: None,
            right: None,
        }));
        self.nodes.len() - 1
    }

    fn visit(&self, order: Order) -> Vec<NodeId> {
        fn walk(tree: &BinaryTree, id: Option<NodeId>, order: Order, out: &mut Vec<NodeId>) {
            let Some((id, node)) = id.and_then(|id| tree.node(id).map(|n| (id, n))) else {
                return;
            };
            if order == Order::Preorder {
                out.push(id);
            }
            walk(tree, node.left, order, out);
            if order == Order::Inorder {
                out.push(id);
            }
            walk(tree, node.right, order, out);
            if order == Order::Postorder {
                out.push(id);
            }
        }

        let mut out = Vec::new();
        walk(self, self.root, order, &mut out);
        out
    }

    /// Node ids grouped by level, left to right (BFS order).
    fn levels(&self) -> Vec<Vec<NodeId>> {
        let mut levels: Vec<Vec<NodeId>> = Vec::new();
        let mut queue: VecDeque<(NodeId, usize)> = self.root.map(|r| (r, 0)).into_iter().collect();

        while let Some((id, level)) = queue.pop_front() {
            let Some(node) = self.node(id) else { continue };
            if levels.len() <= level {
                levels.push(Vec::new());
            }
            levels[level].push(id);
            queue.extend(node.left.map(|l| (l, level + 1)));
            queue.extend(node.right.map(|r| (r, level + 1)));
        }
        levels
    }

    fn render(&self, marks: &HashMap<NodeId, Tone>) -> Scene {
        let mut scene = Scene::new("Binary Search Tree").with_caption(format!(
            "Nodes: {}  Height: {}/{}",
            self.len(),
            self.height(),
            MAX_LEVELS
        ));

        let mut positions: BTreeMap<NodeId, (i32, i32)> = BTreeMap::new();
        for (level, ids) in self.levels().iter().enumerate() {
            let spacing = SCENE_WIDTH as f32 / (ids.len() + 1) as f32;
            let y = TOP_ROW + level as i32 * LEVEL_HEIGHT;
            for (i, &id) in ids.iter().enumerate() {
                positions.insert(id, ((spacing * (i + 1) as f32).round() as i32, y));
            }
        }

        // Edges first so nodes draw over their ends.
        for (&id, &from) in &positions {
            let Some(node) = self.node(id) else { continue };
            for child in [node.left, node.right].into_iter().flatten() {
                if let Some(&to) = positions.get(&child) {
                    scene.edge(from, to, None, Tone::Muted);
                }
            }
        }
        for id in self.levels().into_iter().flatten() {
            let (Some(node), Some(&(x, y))) = (self.node(id), positions.get(&id)) else {
                continue;
            };
            let tone = marks.get(&id).copied().unwrap_or(Tone::for_value(node.value));
            scene.node(x, y, node.value.to_string(), tone);
        }

        if self.is_empty() {
            scene.text(30, TOP_ROW + 3, "(empty tree)", Tone::Muted);
        }
        scene
    }
}

impl Component for BinaryTree {
    fn id(&self) -> &'static str {
        "binary-tree"
    }

    fn title(&self) -> &'static str {
        "Binary Tree"
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
            'd' => self.delete(),
            'n' => self.traverse(Order::Inorder),
            'p' => self.traverse(Order::Preorder),
            'o' => self.traverse(Order::Postorder),
            'r' => Ok(self.reset()),
            _ => Err(VisualError::UnknownOperation { key }),
        }
    }

    fn scene(&self) -> Scene {
        self.render(&HashMap::new())
    }
}
