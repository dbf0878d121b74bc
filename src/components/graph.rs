//! Undirected weighted graph on an ellipse, with DFS and BFS from `A`.

use std::collections::{HashSet, VecDeque};
use std::f32::consts::TAU;

use rand::Rng;
use rand::rngs::StdRng;

use super::{Animation, Component, Operation, Pace, Section};
use crate::error::VisualError;
use crate::scene::Scene;
use crate::state::alerts::AlertLevel;
use crate::theme::Tone;

pub const MAX_NODES: usize = 8;

const CENTRE: (f32, f32) = (38.0, 6.0);
const RADIUS_X: f32 = 30.0;
const RADIUS_Y: f32 = 5.0;

const OPERATIONS: &[Operation] = &[
    Operation {
        key: 'n',
        label: "Add Node",
        info: "Add Node: Places a new vertex on the graph, labelled A to H.",
    },
    Operation {
        key: 'e',
        label: "Add Edge",
        info: "Add Edge: Connects two random vertices with a weighted, undirected edge.",
    },
    Operation {
        key: 'd',
        label: "DFS",
        info: "DFS: Explores as deep as possible along each branch before backtracking.",
    },
    Operation {
        key: 'b',
        label: "BFS",
        info: "BFS: Visits all neighbours of a vertex before moving one level further.",
    },
    Operation {
        key: 'r',
        label: "Reset",
        info: "Reset: Removes every vertex and edge.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: u8,
}

impl Edge {
    fn joins(&self, a: usize, b: usize) -> bool {
        (self.from == a && self.to == b) || (self.from == b && self.to == a)
    }
}

#[derive(Debug, Default)]
pub struct Graph {
    node_count: usize,
    edges: Vec<Edge>,
}

/// Vertex label: `A` for 0, `B` for 1, ...
pub fn node_label(id: usize) -> String {
    char::from(b'A' + id as u8).to_string()
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn add_node(&mut self) -> Result<Animation, VisualError> {
        if self.node_count >= MAX_NODES {
            return Err(VisualError::TooManyNodes { max: MAX_NODES });
        }
        let id = self.node_count;
        self.node_count += 1;

        let mut anim = Animation::new();
        anim.step(self.render(|n| (n == id).then_some(Tone::Pending), None), Pace::Settle);
        Ok(anim.success(format!("Added node {}", node_label(id))))
    }

    /// Connect `a` and `b`. The pair must be distinct and not yet joined.
    pub fn add_edge(&mut self, a: usize, b: usize, weight: u8) -> Result<Animation, VisualError> {
        if self.node_count < 2 {
            return Err(VisualError::TooFewNodes);
        }
        if a == b || a >= self.node_count || b >= self.node_count {
            return Err(VisualError::TooFewNodes);
        }
        if self.edges.iter().any(|e| e.joins(a, b)) {
            return Err(VisualError::DuplicateEdge);
        }

        self.edges.push(Edge { from: a, to: b, weight });
        let new_edge = self.edges.len() - 1;

        let mut anim = Animation::new();
        anim.step(self.render(|_| None, Some(new_edge)), Pace::Settle);
        Ok(anim.success(format!("Added edge {} - {}", node_label(a), node_label(b))))
    }

    /// Neighbours of `node` in edge insertion order.
    pub fn neighbours(&self, node: usize) -> Vec<usize> {
        self.edges
            .iter()
            .filter_map(|e| {
                if e.from == node {
                    Some(e.to)
                } else if e.to == node {
                    Some(e.from)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Recursive depth-first order from `A`.
    pub fn dfs_order(&self) -> Vec<usize> {
        fn visit(graph: &Graph, node: usize, seen: &mut HashSet<usize>, out: &mut Vec<usize>) {
            if !seen.insert(node) {
                return;
            }
            out.push(node);
            for next in graph.neighbours(node) {
                visit(graph, next, seen, out);
            }
        }

        let mut out = Vec::new();
        if self.node_count > 0 {
            visit(self, 0, &mut HashSet::new(), &mut out);
        }
        out
    }

    /// Breadth-first order from `A`; nodes are marked when enqueued.
    pub fn bfs_order(&self) -> Vec<usize> {
        let mut out = Vec::new();
        if self.node_count == 0 {
            return out;
        }

        let mut seen = HashSet::from([0]);
        let mut queue = VecDeque::from([0]);
        while let Some(node) = queue.pop_front() {
            out.push(node);
            for next in self.neighbours(node) {
                if seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        out
    }

    pub fn dfs(&self) -> Result<Animation, VisualError> {
        self.play_traversal(self.dfs_order(), "DFS")
    }

    pub fn bfs(&self) -> Result<Animation, VisualError> {
        self.play_traversal(self.bfs_order(), "BFS")
    }

    fn play_traversal(&self, order: Vec<usize>, name: &str) -> Result<Animation, VisualError> {
        if self.node_count == 0 {
            return Err(VisualError::Empty { structure: "Graph" });
        }

        let mut anim = Animation::new();
        let mut visited = HashSet::new();
        for node in order {
            let current = |n: usize| {
                if n == node {
                    Some(Tone::Found)
                } else {
                    visited.contains(&n).then_some(Tone::Visited)
                }
            };
            anim.step(self.render(current, None), Pace::Beat);
            visited.insert(node);
            anim.step(self.render(|n| visited.contains(&n).then_some(Tone::Visited), None), Pace::Settle);
        }

        Ok(anim.with_alert(AlertLevel::Info, format!("{name} traversal completed")))
    }

    pub fn reset(&mut self) -> Animation {
        self.node_count = 0;
        self.edges.clear();
        Animation::new()
    }

    fn render(&self, highlight: impl Fn(usize) -> Option<Tone>, new_edge: Option<usize>) -> Scene {
        let mut scene = Scene::new("Graph").with_caption(format!(
            "Nodes: {}/{}  Edges: {}",
            self.node_count,
            MAX_NODES,
            self.edges.len()
        ));

        for (i, edge) in self.edges.iter().enumerate() {
            let tone = if Some(i) == new_edge { Tone::Pending } else { Tone::Muted };
            scene.edge(
                node_position(edge.from),
                node_position(edge.to),
                Some(edge.weight.to_string()),
                tone,
            );
        }
        for id in 0..self.node_count {
            let (x, y) = node_position(id);
            let tone = highlight(id).unwrap_or(Tone::Fill(id));
            scene.node(x, y, node_label(id), tone);
        }

        if self.node_count == 0 {
            scene.text(31, 6, "(empty graph)", Tone::Muted);
        }
        scene
    }
}

/// Vertex `id` sits at angle `id · 2π/8` on the ellipse.
pub fn node_position(id: usize) -> (i32, i32) {
    let angle = id as f32 * TAU / MAX_NODES as f32;
    (
        (CENTRE.0 + RADIUS_X * angle.cos()).round() as i32,
        (CENTRE.1 + RADIUS_Y * angle.sin()).round() as i32,
    )
}

impl Component for Graph {
    fn id(&self) -> &'static str {
        "graph"
    }

    fn title(&self) -> &'static str {
        "Graph"
    }

    fn section(&self) -> Section {
        Section::Graph
    }

    fn operations(&self) -> &'static [Operation] {
        OPERATIONS
    }

    fn perform(&mut self, key: char, rng: &mut StdRng) -> Result<Animation, VisualError> {
        match key {
            'n' => self.add_node(),
            'e' => {
                if self.node_count < 2 {
                    return Err(VisualError::TooFewNodes);
                }
                let a = rng.gen_range(0..self.node_count);
                let mut b = rng.gen_range(0..self.node_count);
                while b == a {
                    b = rng.gen_range(0..self.node_count);
                }
                let weight = rng.gen_range(1..=10);
                self.add_edge(a, b, weight)
            }
            'd' => self.dfs(),
            'b' => self.bfs(),
            'r' => Ok(self.reset()),
            _ => Err(VisualError::UnknownOperation { key }),
        }
    }

    fn scene(&self) -> Scene {
        self.render(|_| None, None)
    }
}
