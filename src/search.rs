//! Finding a component by name.

use crate::components::Component;

pub const NOT_FOUND: &str = "Data structure not found!";

/// Result of submitting a search query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Blank query; nothing happens.
    Ignored,
    Found(usize),
    NotFound,
}

/// First component whose title or section contains `query`, ignoring case.
pub fn find_component(query: &str, components: &[Box<dyn Component>]) -> Option<usize> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    components.iter().position(|c| {
        c.title().to_lowercase().contains(&needle) || c.section().name().contains(&needle)
    })
}

pub fn search(query: &str, components: &[Box<dyn Component>]) -> SearchOutcome {
    if query.trim().is_empty() {
        return SearchOutcome::Ignored;
    }
    match find_component(query, components) {
        Some(index) => SearchOutcome::Found(index),
        None => SearchOutcome::NotFound,
    }
}

/// The `/` prompt: a one-line input buffer.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SearchPrompt {
    query: String,
    open: bool,
}

impl SearchPrompt {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn open(&mut self) {
        self.open = true;
        self.query.clear();
    }

    pub fn push(&mut self, c: char) {
        if self.open && !c.is_control() {
            self.query.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.query.pop();
    }

    pub fn cancel(&mut self) {
        self.open = false;
        self.query.clear();
    }

    /// Close the prompt and hand back what was typed.
    pub fn submit(&mut self) -> String {
        self.open = false;
        std::mem::take(&mut self.query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::catalog;

    #[test]
    fn test_matches_title_case_insensitively() {
        let components = catalog();
        assert_eq!(find_component("HEAP", &components), Some(6));
        assert_eq!(find_component("hash", &components), Some(8));
        assert_eq!(find_component("list", &components), Some(2));
    }

    #[test]
    fn test_matches_section_and_first_wins() {
        let components = catalog();
        // "linear" only names a section; the linked list comes first in it.
        assert_eq!(find_component("linear", &components), Some(2));
        // "tree" is in the binary tree's title before the heap's section.
        assert_eq!(find_component("tree", &components), Some(5));
    }

    #[test]
    fn test_outcomes() {
        let components = catalog();
        assert_eq!(search("  ", &components), SearchOutcome::Ignored);
        assert_eq!(search("splay", &components), SearchOutcome::NotFound);
        assert_eq!(search("trie", &components), SearchOutcome::Found(9));
    }

    #[test]
    fn test_prompt_editing() {
        let mut prompt = SearchPrompt::default();
        prompt.push('x');
        assert_eq!(prompt.query(), "");

        prompt.open();
        for c in "grapz".chars() {
            prompt.push(c);
        }
        prompt.backspace();
        prompt.push('h');
        assert_eq!(prompt.submit(), "graph");
        assert!(!prompt.is_open());
    }
}
