//! Prefix tree over a small fixed vocabulary.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{Animation, Component, Operation, Pace, Section};
use crate::error::VisualError;
use crate::scene::{SCENE_WIDTH, Scene};
use crate::state::alerts::AlertLevel;
use crate::theme::Tone;

pub const WORDS: [&str; 6] = ["cat", "car", "dog", "dot", "can", "cap"];

const TOP_ROW: i32 = 1;
const LEVEL_HEIGHT: i32 = 3;

const OPERATIONS: &[Operation] = &[
    Operation {
        key: 'i',
        label: "Insert Word",
        info: "Insert: Adds a word to the trie, creating a node for each new character.",
    },
    Operation {
        key: 's',
        label: "Search Word",
        info: "Search: Follows the characters of a word and checks the end-of-word mark.",
    },
    Operation {
        key: 'p',
        label: "Prefix Search",
        info: "Prefix Search: Finds all words that start with a given prefix.",
    },
    Operation {
        key: 'r',
        label: "Reset",
        info: "Reset: Clears the trie.",
    },
];

#[derive(Debug, Clone)]
struct TrieNode {
    ch: Option<char>,
    /// Child ids in insertion order.
    children: Vec<usize>,
    is_end: bool,
}

impl TrieNode {
    fn new(ch: Option<char>) -> Self {
        Self {
            ch,
            children: Vec::new(),
            is_end: false,
        }
    }
}

/// Arena-backed trie; node 0 is the root.
#[derive(Debug)]
pub struct Trie {
    nodes: Vec<TrieNode>,
}

impl Default for Trie {
    fn default() -> Self {
        Self {
            nodes: vec![TrieNode::new(None)],
        }
    }
}

const ROOT: usize = 0;

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes[ROOT].children.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len() - 1
    }

    fn child(&self, node: usize, ch: char) -> Option<usize> {
        self.nodes[node]
            .children
            .iter()
            .copied()
            .find(|&c| self.nodes[c].ch == Some(ch))
    }

    /// Walk `text` from the root, stopping at the first missing character.
    fn walk(&self, text: &str) -> (Vec<usize>, bool) {
        let mut path = Vec::new();
        let mut current = ROOT;
        for ch in text.chars() {
            match self.child(current, ch) {
                Some(next) => {
                    path.push(next);
                    current = next;
                }
                None => return (path, false),
            }
        }
        (path, true)
    }

    pub fn contains(&self, word: &str) -> bool {
        match self.walk(word) {
            (path, true) => path.last().is_some_and(|&n| self.nodes[n].is_end),
            _ => false,
        }
    }

    /// Stored words in depth-first order.
    pub fn words(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_words(ROOT, &mut String::new(), &mut out);
        out
    }

    fn collect_words(&self, node: usize, prefix: &mut String, out: &mut Vec<String>) {
        if self.nodes[node].is_end {
            out.push(prefix.clone());
        }
        for &child in &self.nodes[node].children {
            if let Some(ch) = self.nodes[child].ch {
                prefix.push(ch);
                self.collect_words(child, prefix, out);
                prefix.pop();
            }
        }
    }

    pub fn insert(&mut self, word: &str) -> Animation {
        let mut anim = Animation::new();
        let mut current = ROOT;

        for ch in word.chars() {
            current = match self.child(current, ch) {
                Some(next) => next,
                None => {
                    self.nodes.push(TrieNode::new(Some(ch)));
                    let id = self.nodes.len() - 1;
                    self.nodes[current].children.push(id);
                    id
                }
            };
            let cursor = current;
            anim.step(self.render(|n| (n == cursor).then_some(Tone::Pending)), Pace::Beat);
            anim.step(self.render(|_| None), Pace::Settle);
        }

        self.nodes[current].is_end = true;
        anim.step(self.render(|_| None), Pace::Settle);
        anim.success(format!("Inserted word: \"{word}\""))
    }

    pub fn search(&self, word: &str) -> Result<Animation, VisualError> {
        if self.is_empty() {
            return Err(VisualError::Empty { structure: "Trie" });
        }

        let (path, complete) = self.walk(word);
        let mut anim = Animation::new();
        for &node in &path {
            anim.step(self.render(|n| (n == node).then_some(Tone::Probing)), Pace::Beat);
            anim.step(self.render(|_| None), Pace::Settle);
        }

        let end = path.last().copied().filter(|&n| complete && self.nodes[n].is_end);
        Ok(match end {
            Some(end) => {
                anim.step(self.render(|n| (n == end).then_some(Tone::Found)), Pace::Beat);
                anim.success(format!("Found word: \"{word}\""))
            }
            None => anim.with_alert(AlertLevel::Danger, format!("Word \"{word}\" not found")),
        })
    }

    /// Walk `prefix`, then light every end-of-word node beneath it.
    pub fn prefix(&self, prefix: &str) -> Result<Animation, VisualError> {
        if self.is_empty() {
            return Err(VisualError::Empty { structure: "Trie" });
        }

        let (path, complete) = self.walk(prefix);
        let mut anim = Animation::new();
        for &node in &path {
            anim.step(self.render(|n| (n == node).then_some(Tone::Pending)), Pace::Beat);
            anim.step(self.render(|_| None), Pace::Settle);
        }

        let Some(&last) = path.last().filter(|_| complete) else {
            return Ok(anim.with_alert(
                AlertLevel::Danger,
                format!("No words found with prefix: \"{prefix}\""),
            ));
        };

        for end in self.word_ends(last) {
            anim.step(self.render(|n| (n == end).then_some(Tone::Found)), Pace::Beat);
            anim.step(self.render(|_| None), Pace::Settle);
        }
        Ok(anim.success(format!("Found words with prefix: \"{prefix}\"")))
    }

    /// End-of-word nodes in the subtree of `node`, depth first.
    fn word_ends(&self, node: usize) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(n) = stack.pop() {
            if self.nodes[n].is_end {
                out.push(n);
            }
            stack.extend(self.nodes[n].children.iter().rev());
        }
        out
    }

    pub fn reset(&mut self) -> Animation {
        self.nodes.truncate(1);
        self.nodes[ROOT].children.clear();
        Animation::new()
    }

    /// Node ids per level, breadth first.
    fn levels(&self) -> Vec<Vec<usize>> {
        let mut levels = vec![vec![ROOT]];
        loop {
            let next: Vec<usize> = levels[levels.len() - 1]
                .iter()
                .flat_map(|&n| self.nodes[n].children.iter().copied())
                .collect();
            if next.is_empty() {
                return levels;
            }
            levels.push(next);
        }
    }

    fn render(&self, highlight: impl Fn(usize) -> Option<Tone>) -> Scene {
        let mut scene = Scene::new("Trie").with_caption(format!(
            "Words: {}  Nodes: {}  (★ ends a word)",
            self.words().len(),
            self.node_count()
        ));
        if self.is_empty() {
            scene.text(31, 6, "(empty trie)", Tone::Muted);
            return scene;
        }

        let mut position = vec![(0, 0); self.nodes.len()];
        for (level, ids) in self.levels().iter().enumerate() {
            let spacing = SCENE_WIDTH as f32 / (ids.len() + 1) as f32;
            for (i, &id) in ids.iter().enumerate() {
                let x = (spacing * (i + 1) as f32).round() as i32;
                position[id] = (x, TOP_ROW + level as i32 * LEVEL_HEIGHT);
            }
        }

        for (id, node) in self.nodes.iter().enumerate() {
            for &child in &node.children {
                scene.edge(position[id], position[child], None, Tone::Muted);
            }
        }
        for (id, node) in self.nodes.iter().enumerate() {
            let (x, y) = position[id];
            let label = match node.ch {
                None => "•".to_string(),
                Some(ch) if node.is_end => format!("{ch}★"),
                Some(ch) => ch.to_string(),
            };
            let tone = highlight(id).unwrap_or(match node.ch {
                None => Tone::Plain,
                Some(ch) => Tone::for_value(ch as i64),
            });
            scene.node(x, y, label, tone);
        }
        scene
    }
}

impl Component for Trie {
    fn id(&self) -> &'static str {
        "trie"
    }

    fn title(&self) -> &'static str {
        "Trie"
    }

    fn section(&self) -> Section {
        Section::Trie
    }

    fn operations(&self) -> &'static [Operation] {
        OPERATIONS
    }

    fn perform(&mut self, key: char, rng: &mut StdRng) -> Result<Animation, VisualError> {
        let word = WORDS.choose(rng).copied().unwrap_or(WORDS[0]);
        match key {
            'i' => Ok(self.insert(word)),
            's' => self.search(word),
            'p' => {
                let prefix: String = word.chars().take(2).collect();
                self.prefix(&prefix)
            }
            'r' => Ok(self.reset()),
            _ => Err(VisualError::UnknownOperation { key }),
        }
    }

    fn scene(&self) -> Scene {
        self.render(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trie_with(words: &[&str]) -> Trie {
        let mut trie = Trie::new();
        for w in words {
            trie.insert(w);
        }
        trie
    }

    #[test]
    fn test_insert_shares_prefixes() {
        let trie = trie_with(&["cat", "car", "can"]);
        // c, a, t, r, n
        assert_eq!(trie.node_count(), 5);
        assert_eq!(trie.words(), ["cat", "car", "can"]);
        assert!(trie.contains("car"));
        assert!(!trie.contains("ca"));
    }

    #[test]
    fn test_insert_walks_with_pending_cursor() {
        let mut trie = Trie::new();
        let anim = trie.insert("dog");
        assert_eq!(anim.steps[0].scene.find_tone("d"), Some(Tone::Pending));
        assert_eq!(anim.alert, Some((AlertLevel::Success, "Inserted word: \"dog\"".into())));
        assert!(trie.scene().labels().contains(&"g★"));
    }

    #[test]
    fn test_search_hit_and_miss() {
        let trie = trie_with(&["dog", "dot"]);
        let hit = trie.search("dot").unwrap();
        assert_eq!(hit.steps.last().unwrap().scene.find_tone("t★"), Some(Tone::Found));
        assert_eq!(hit.alert.unwrap().1, "Found word: \"dot\"");

        let miss = trie.search("cat").unwrap();
        assert_eq!(miss.alert, Some((AlertLevel::Danger, "Word \"cat\" not found".into())));
        assert!(miss.steps.is_empty());
    }

    #[test]
    fn test_search_stops_short_of_unmarked_end() {
        let trie = trie_with(&["cat"]);
        assert!(!trie.contains("ca"));
        let anim = trie.search("ca").unwrap();
        assert_eq!(anim.alert.unwrap().0, AlertLevel::Danger);
    }

    #[test]
    fn test_prefix_lights_every_word_below() {
        let trie = trie_with(&["cat", "dog", "cap"]);
        let anim = trie.prefix("ca").unwrap();
        let found: Vec<&str> = anim
            .scenes()
            .flat_map(|s| s.labels_with(Tone::Found))
            .collect();
        assert_eq!(found, ["t★", "p★"]);
        assert_eq!(anim.alert.unwrap().1, "Found words with prefix: \"ca\"");

        let none = trie.prefix("co").unwrap();
        assert_eq!(none.alert.unwrap().1, "No words found with prefix: \"co\"");
    }

    #[test]
    fn test_empty_trie_refuses() {
        let mut trie = trie_with(&["can"]);
        trie.reset();
        assert_eq!(trie.search("can"), Err(VisualError::Empty { structure: "Trie" }));
        assert_eq!(trie.prefix("ca"), Err(VisualError::Empty { structure: "Trie" }));
        assert!(trie.words().is_empty());
    }
}
