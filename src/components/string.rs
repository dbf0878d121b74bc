//! Character string with reverse, substring, pattern and palindrome checks.

use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::{Animation, Component, Operation, Pace, Section, centred_row};
use crate::error::VisualError;
use crate::scene::{SCENE_WIDTH, Scene};
use crate::state::alerts::AlertLevel;
use crate::theme::Tone;

pub const MAX_LENGTH: usize = 11;

/// Words random characters are drawn from.
pub const SAMPLES: &[&str] = &["HELLO", "WORLD", "ALGORITHM", "DATA", "STRUCTURE"];

const CHAR_WIDTH: i32 = 5;
const CHAR_GAP: i32 = 1;
const CHAR_ROW: i32 = 3;

const OPERATIONS: &[Operation] = &[
    Operation {
        key: 'i',
        label: "Insert",
        info: "Insert: Appends a random character to the end of the string.",
    },
    Operation {
        key: 'd',
        label: "Delete",
        info: "Delete: Removes the last character of the string.",
    },
    Operation {
        key: 'v',
        label: "Reverse",
        info: "Reverse: Swaps characters from both ends moving towards the middle.",
    },
    Operation {
        key: 'u',
        label: "Substring",
        info: "Substring: Extracts a random contiguous range of characters.",
    },
    Operation {
        key: 'f',
        label: "Find Pattern",
        info: "Find Pattern: Slides a window over the string looking for a pattern.",
    },
    Operation {
        key: 'p',
        label: "Palindrome",
        info: "Palindrome: Compares characters from both ends to check symmetry.",
    },
    Operation {
        key: 'r',
        label: "Reset",
        info: "Reset: Clears the string.",
    },
];

#[derive(Debug, Default)]
pub struct StringVisualizer {
    text: Vec<char>,
}

impl StringVisualizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            text: text.chars().take(MAX_LENGTH).collect(),
        }
    }

    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    pub fn insert(&mut self, ch: char) -> Result<Animation, VisualError> {
        if self.text.len() >= MAX_LENGTH {
            return Err(VisualError::StringAtMaximum);
        }
        let position = self.text.len();

        let mut anim = Animation::new();
        let mut scene = self.render(|_| None);
        let slots = centred_row(MAX_LENGTH, CHAR_WIDTH, CHAR_GAP);
        scene.block(slots[position], CHAR_ROW, CHAR_WIDTH, "", Some(position.to_string()), Tone::Pending);
        anim.step(scene, Pace::Beat);

        self.text.push(ch);
        Ok(anim.success(format!("Inserted '{ch}' at position {position}")))
    }

    pub fn delete(&mut self) -> Result<Animation, VisualError> {
        let Some(&ch) = self.text.last() else {
            return Err(VisualError::Empty { structure: "String" });
        };
        let position = self.text.len() - 1;

        let mut anim = Animation::new();
        anim.step(self.render(|i| (i == position).then_some(Tone::Removing)), Pace::Beat);

        self.text.pop();
        Ok(anim.success(format!("Deleted '{ch}' from position {position}")))
    }

    /// Two-pointer in-place reversal.
    pub fn reverse(&mut self) -> Result<Animation, VisualError> {
        match self.text.len() {
            0 => return Err(VisualError::Empty { structure: "String" }),
            1 => return Err(VisualError::SingleCharacter),
            _ => {}
        }

        let n = self.text.len();
        let mut anim = Animation::new();
        for i in 0..n / 2 {
            let pair = |j: usize| j == i || j == n - 1 - i;
            anim.step(self.render(|j| pair(j).then_some(Tone::Pending)), Pace::Beat);
            self.text.swap(i, n - 1 - i);
            anim.step(self.render(|j| pair(j).then_some(Tone::Removing)), Pace::Beat);
            anim.step(self.render(|_| None), Pace::Settle);
        }

        Ok(anim.success("String reversed!"))
    }

    /// Highlight `[start, end)` one character at a time.
    pub fn substring(&self, start: usize, end: usize) -> Result<Animation, VisualError> {
        if self.text.len() < 2 {
            return Err(VisualError::StringTooShort);
        }
        let end = end.min(self.text.len());
        let start = start.min(end);

        let mut anim = Animation::new();
        for i in start..end {
            anim.step(self.render(|j| (start..=i).contains(&j).then_some(Tone::Probing)), Pace::Half);
        }
        anim.step(self.render(|_| None), Pace::Beat);

        let sub: String = self.text[start..end].iter().collect();
        Ok(anim.success(format!("Substring [{start}:{end}]: \"{sub}\"")))
    }

    /// Sliding-window search for the string's own leading pattern.
    pub fn find_pattern(&self) -> Result<Animation, VisualError> {
        if self.text.is_empty() {
            return Err(VisualError::Empty { structure: "String" });
        }
        let pattern: Vec<char> = self.text.iter().take(2).copied().collect();
        self.find(&pattern)
    }

    pub fn find(&self, pattern: &[char]) -> Result<Animation, VisualError> {
        if self.text.is_empty() {
            return Err(VisualError::Empty { structure: "String" });
        }
        let shown: String = pattern.iter().collect();
        let width = pattern.len();

        let mut anim = Animation::new();
        if width > 0 && width <= self.text.len() {
            for i in 0..=self.text.len() - width {
                let window = |j: usize| (i..i + width).contains(&j);
                anim.step(self.render(|j| window(j).then_some(Tone::Probing)), Pace::Beat);

                if self.text[i..i + width] == *pattern {
                    anim.step(self.render(|j| window(j).then_some(Tone::Found)), Pace::Beat);
                    return Ok(anim.success(format!("Pattern \"{shown}\" found at position {i}")));
                }
                anim.step(self.render(|_| None), Pace::Settle);
            }
        }

        Ok(anim.with_alert(AlertLevel::Danger, format!("Pattern \"{shown}\" not found")))
    }

    pub fn palindrome(&self) -> Result<Animation, VisualError> {
        if self.text.is_empty() {
            return Err(VisualError::Empty { structure: "String" });
        }

        let n = self.text.len();
        let mut anim = Animation::new();
        for i in 0..n / 2 {
            let pair = |j: usize| j == i || j == n - 1 - i;
            anim.step(self.render(|j| pair(j).then_some(Tone::Probing)), Pace::Beat);

            let (a, b) = (self.text[i], self.text[n - 1 - i]);
            if a != b {
                anim.step(self.render(|j| pair(j).then_some(Tone::Removing)), Pace::Beat);
                return Ok(anim.with_alert(AlertLevel::Danger, format!("Not a palindrome: '{a}' ≠ '{b}'")));
            }
            anim.step(self.render(|_| None), Pace::Settle);
        }

        Ok(anim.success(format!("\"{}\" is a palindrome!", self.text())))
    }

    pub fn reset(&mut self) -> Animation {
        self.text.clear();
        Animation::new()
    }

    fn render(&self, highlight: impl Fn(usize) -> Option<Tone>) -> Scene {
        let mut scene = Scene::new("String")
            .with_caption(format!("Length: {}/{}", self.text.len(), MAX_LENGTH));
        let slots = centred_row(MAX_LENGTH, CHAR_WIDTH, CHAR_GAP);

        for (i, &ch) in self.text.iter().enumerate() {
            let tone = highlight(i).unwrap_or(Tone::for_value(ch as i64));
            scene.block(slots[i], CHAR_ROW, CHAR_WIDTH, ch.to_string(), Some(i.to_string()), tone);
        }

        let quoted = format!("\"{}\"", self.text());
        let x = (SCENE_WIDTH - quoted.chars().count() as i32) / 2;
        scene.text(x, CHAR_ROW + 6, quoted, Tone::Plain);
        scene
    }
}

impl Component for StringVisualizer {
    fn id(&self) -> &'static str {
        "string"
    }

    fn title(&self) -> &'static str {
        "String"
    }

    fn section(&self) -> Section {
        Section::Basic
    }

    fn operations(&self) -> &'static [Operation] {
        OPERATIONS
    }

    fn perform(&mut self, key: char, rng: &mut StdRng) -> Result<Animation, VisualError> {
        match key {
            'i' => {
                if self.text.len() >= MAX_LENGTH {
                    return Err(VisualError::StringAtMaximum);
                }
                let sample = SAMPLES.choose(rng).copied().unwrap_or("A");
                let chars: Vec<char> = sample.chars().collect();
                let ch = chars.choose(rng).copied().unwrap_or('A');
                self.insert(ch)
            }
            'd' => self.delete(),
            'v' => self.reverse(),
            'u' => {
                let len = self.text.len();
                if len < 2 {
                    return Err(VisualError::StringTooShort);
                }
                let start = rng.gen_range(0..len - 1);
                let end = start + rng.gen_range(0..len - start) + 1;
                self.substring(start, end)
            }
            'f' => self.find_pattern(),
            'p' => self.palindrome(),
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
    use rand::SeedableRng;

    #[test]
    fn test_insert_draws_from_samples() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut s = StringVisualizer::new();
        for _ in 0..MAX_LENGTH {
            s.perform('i', &mut rng).unwrap();
        }
        assert!(s.text().chars().all(|c| SAMPLES.iter().any(|w| w.contains(c))));
        assert_eq!(s.perform('i', &mut rng), Err(VisualError::StringAtMaximum));
    }

    #[test]
    fn test_reverse() {
        let mut s = StringVisualizer::from_text("DATA");
        let anim = s.reverse().unwrap();
        assert_eq!(s.text(), "ATAD");
        assert_eq!(anim.steps.len(), 6);
        assert_eq!(anim.alert.unwrap().1, "String reversed!");
    }

    #[test]
    fn test_reverse_guards() {
        assert_eq!(StringVisualizer::new().reverse(), Err(VisualError::Empty { structure: "String" }));
        assert_eq!(StringVisualizer::from_text("A").reverse(), Err(VisualError::SingleCharacter));
    }

    #[test]
    fn test_substring_message_and_growth() {
        let s = StringVisualizer::from_text("HELLO");
        let anim = s.substring(1, 4).unwrap();
        let counts: Vec<_> = anim.scenes().map(|sc| sc.labels_with(Tone::Probing).len()).collect();
        assert_eq!(counts, [1, 2, 3, 0]);
        assert_eq!(anim.alert.unwrap().1, "Substring [1:4]: \"ELL\"");
        assert_eq!(StringVisualizer::from_text("H").substring(0, 1), Err(VisualError::StringTooShort));
    }

    #[test]
    fn test_find_pattern() {
        let s = StringVisualizer::from_text("WORLD");
        let anim = s.find_pattern().unwrap();
        assert_eq!(anim.alert.unwrap().1, "Pattern \"WO\" found at position 0");

        let anim = s.find(&['L', 'D']).unwrap();
        assert_eq!(anim.alert.unwrap().1, "Pattern \"LD\" found at position 3");

        let anim = s.find(&['Z']).unwrap();
        assert_eq!(anim.alert.unwrap(), (AlertLevel::Danger, "Pattern \"Z\" not found".into()));
    }

    #[test]
    fn test_palindrome() {
        let anim = StringVisualizer::from_text("LEVEL").palindrome().unwrap();
        assert_eq!(anim.alert.unwrap(), (AlertLevel::Success, "\"LEVEL\" is a palindrome!".into()));

        let anim = StringVisualizer::from_text("DATA").palindrome().unwrap();
        assert_eq!(anim.alert.unwrap(), (AlertLevel::Danger, "Not a palindrome: 'D' ≠ 'A'".into()));
    }

    #[test]
    fn test_delete() {
        let mut s = StringVisualizer::from_text("AB");
        let anim = s.delete().unwrap();
        assert_eq!(anim.alert.unwrap().1, "Deleted 'B' from position 1");
        assert_eq!(s.text(), "A");
    }
}
