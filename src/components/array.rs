//! Fixed-capacity array with linear search, bubble sort and binary search.

use rand::Rng;
use rand::rngs::StdRng;

use super::{Animation, Component, Operation, Pace, Section, centred_row, random_value};
use crate::error::VisualError;
use crate::scene::{CAPTION_ROW, Scene};
use crate::theme::Tone;

pub const ARRAY_CAPACITY: usize = 6;

const CELL_WIDTH: i32 = 7;
const CELL_GAP: i32 = 2;
const CELL_ROW: i32 = 4;

const OPERATIONS: &[Operation] = &[
    Operation {
        key: 'i',
        label: "Insert",
        info: "Insert: Adds a new element to the end of the array.",
    },
    Operation {
        key: 'd',
        label: "Delete",
        info: "Delete: Removes the last element from the array.",
    },
    Operation {
        key: 's',
        label: "Search",
        info: "Search: Finds an element in the array using linear search.",
    },
    Operation {
        key: 'o',
        label: "Sort",
        info: "Sort: Sorts the array using the Bubble Sort algorithm.",
    },
    Operation {
        key: 'b',
        label: "Binary Search",
        info: "Binary Search: Searches for an element in a sorted array using binary search.",
    },
    Operation {
        key: 'r',
        label: "Reset",
        info: "Reset: Clears the array and removes all elements.",
    },
];

#[derive(Debug, Default)]
pub struct ArrayVisualizer {
    elements: Vec<i64>,
}

impl ArrayVisualizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Self {
        let mut elements: Vec<i64> = values.into_iter().collect();
        elements.truncate(ARRAY_CAPACITY);
        Self { elements }
    }

    pub fn elements(&self) -> &[i64] {
        &self.elements
    }

    pub fn insert(&mut self, value: i64) -> Result<Animation, VisualError> {
        if self.elements.len() >= ARRAY_CAPACITY {
            return Err(VisualError::Full { structure: "Array" });
        }
        let index = self.elements.len();

        let mut anim = Animation::new();
        let mut scene = self.render(|_| None);
        let slots = centred_row(ARRAY_CAPACITY, CELL_WIDTH, CELL_GAP);
        scene.block(slots[index], CELL_ROW, CELL_WIDTH, "", Some(format!("[{index}]")), Tone::Pending);
        anim.step(scene, Pace::Beat);

        self.elements.push(value);
        Ok(anim.success(format!("Inserted {value} at index {index}")))
    }

    pub fn delete(&mut self) -> Result<Animation, VisualError> {
        let Some(&value) = self.elements.last() else {
            return Err(VisualError::Empty { structure: "Array" });
        };
        let index = self.elements.len() - 1;

        let mut anim = Animation::new();
        anim.step(self.render(|i| (i == index).then_some(Tone::Removing)), Pace::Beat);

        self.elements.pop();
        Ok(anim.success(format!("Deleted {value} from index {index}")))
    }

    /// Linear search for `target`, probing each cell in turn.
    pub fn search(&self, target: i64) -> Result<Animation, VisualError> {
        if self.elements.is_empty() {
            return Err(VisualError::Empty { structure: "Array" });
        }

        let mut anim = Animation::new();
        for (i, &value) in self.elements.iter().enumerate() {
            anim.step(self.render(|j| (j == i).then_some(Tone::Probing)), Pace::Beat);
            if value == target {
                anim.step(self.render(|j| (j == i).then_some(Tone::Found)), Pace::Beat);
                return Ok(anim.success(format!("Found {target} at index {i}")));
            }
            anim.step(self.render(|_| None), Pace::Settle);
        }

        Ok(anim.with_alert(
            crate::state::alerts::AlertLevel::Danger,
            format!("Value {target} not found"),
        ))
    }

    pub fn bubble_sort(&mut self) -> Result<Animation, VisualError> {
        let n = self.elements.len();
        if n < 2 {
            return Err(VisualError::TooFewToSort);
        }

        let mut anim = Animation::new();
        for pass in 0..n - 1 {
            for j in 0..n - pass - 1 {
                let pair = |i: usize| i == j || i == j + 1;
                anim.step(self.render(|i| pair(i).then_some(Tone::Pending)), Pace::Beat);

                if self.elements[j] > self.elements[j + 1] {
                    self.elements.swap(j, j + 1);
                    anim.step(self.render(|i| pair(i).then_some(Tone::Removing)), Pace::Beat);
                }
                anim.step(self.render(|_| None), Pace::Settle);
            }
        }

        Ok(anim.success("Array sorted using Bubble Sort!"))
    }

    /// Binary search for `target`; the array must already be ascending.
    pub fn binary_search(&self, target: i64) -> Result<Animation, VisualError> {
        if self.elements.is_empty() {
            return Err(VisualError::Empty { structure: "Array" });
        }
        if !self.is_sorted() {
            return Err(VisualError::NotSorted);
        }

        let mut anim = Animation::new();
        let (mut left, mut right) = (0i64, self.elements.len() as i64 - 1);
        while left <= right {
            let mid = ((left + right) / 2) as usize;
            anim.step(self.render(|j| (j == mid).then_some(Tone::Probing)), Pace::Beat);

            let value = self.elements[mid];
            if value == target {
                anim.step(self.render(|j| (j == mid).then_some(Tone::Found)), Pace::Beat);
                return Ok(anim.success(format!("Found {target} at index {mid}")));
            } else if value < target {
                left = mid as i64 + 1;
            } else {
                right = mid as i64 - 1;
            }
            anim.step(self.render(|_| None), Pace::Settle);
        }

        Ok(anim.with_alert(
            crate::state::alerts::AlertLevel::Danger,
            format!("Value {target} not found"),
        ))
    }

    pub fn reset(&mut self) -> Animation {
        self.elements.clear();
        Animation::new()
    }

    pub fn is_sorted(&self) -> bool {
        self.elements.windows(2).all(|w| w[0] <= w[1])
    }

    fn render(&self, highlight: impl Fn(usize) -> Option<Tone>) -> Scene {
        let mut scene = Scene::new("Array").with_caption(format!(
            "Size: {}/{}",
            self.elements.len(),
            ARRAY_CAPACITY
        ));
        let slots = centred_row(ARRAY_CAPACITY, CELL_WIDTH, CELL_GAP);

        for (i, &value) in self.elements.iter().enumerate() {
            let tone = highlight(i).unwrap_or(Tone::for_value(value));
            scene.block(slots[i], CELL_ROW, CELL_WIDTH, value.to_string(), Some(format!("[{i}]")), tone);
        }
        if self.elements.is_empty() {
            scene.text(31, CELL_ROW + 1, "(empty array)", Tone::Muted);
        }
        debug_assert!(CELL_ROW + 4 < CAPTION_ROW);
        scene
    }

    fn pick_existing(&self, rng: &mut StdRng) -> Option<i64> {
        if self.elements.is_empty() {
            return None;
        }
        Some(self.elements[rng.gen_range(0..self.elements.len())])
    }
}

impl Component for ArrayVisualizer {
    fn id(&self) -> &'static str {
        "array"
    }

    fn title(&self) -> &'static str {
        "Array"
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
                let value = random_value(rng);
                self.insert(value)
            }
            'd' => self.delete(),
            's' => match self.pick_existing(rng) {
                Some(target) => self.search(target),
                None => Err(VisualError::Empty { structure: "Array" }),
            },
            'o' => self.bubble_sort(),
            'b' => {
                // Order is checked before a target is drawn.
                if !self.elements.is_empty() && !self.is_sorted() {
                    return Err(VisualError::NotSorted);
                }
                match self.pick_existing(rng) {
                    Some(target) => self.binary_search(target),
                    None => Err(VisualError::Empty { structure: "Array" }),
                }
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
    use crate::state::alerts::AlertLevel;
    use rand::SeedableRng;

    #[test]
    fn test_insert_until_full() {
        let mut array = ArrayVisualizer::new();
        for v in 0..ARRAY_CAPACITY as i64 {
            let anim = array.insert(v * 10).unwrap();
            assert_eq!(anim.steps[0].scene.labels_with(Tone::Pending), [""]);
        }
        assert_eq!(array.insert(1), Err(VisualError::Full { structure: "Array" }));
        assert_eq!(array.elements().len(), ARRAY_CAPACITY);
    }

    #[test]
    fn test_delete_highlights_last() {
        let mut array = ArrayVisualizer::from_values([4, 8]);
        let anim = array.delete().unwrap();
        assert_eq!(anim.steps[0].scene.find_tone("8"), Some(Tone::Removing));
        assert_eq!(anim.alert, Some((AlertLevel::Success, "Deleted 8 from index 1".into())));
        assert_eq!(array.elements(), [4]);
    }

    #[test]
    fn test_linear_search_probes_in_order() {
        let array = ArrayVisualizer::from_values([5, 9, 2]);
        let anim = array.search(2).unwrap();

        let probed: Vec<_> = anim
            .scenes()
            .flat_map(|s| s.labels_with(Tone::Probing))
            .map(str::to_string)
            .collect();
        assert_eq!(probed, ["5", "9", "2"]);
        assert_eq!(anim.steps.last().unwrap().scene.find_tone("2"), Some(Tone::Found));
        assert_eq!(anim.alert.unwrap().1, "Found 2 at index 2");
    }

    #[test]
    fn test_bubble_sort_sorts_and_counts_steps() {
        let mut array = ArrayVisualizer::from_values([3, 1, 2]);
        let anim = array.bubble_sort().unwrap();
        assert_eq!(array.elements(), [1, 2, 3]);
        // 3 comparisons, 2 swaps, 3 settles
        assert_eq!(anim.steps.len(), 8);
        assert_eq!(anim.alert.unwrap().1, "Array sorted using Bubble Sort!");
    }

    #[test]
    fn test_sort_needs_two() {
        let mut array = ArrayVisualizer::from_values([3]);
        assert_eq!(array.bubble_sort(), Err(VisualError::TooFewToSort));
        assert_eq!(VisualError::TooFewToSort.level(), AlertLevel::Warning);
    }

    #[test]
    fn test_binary_search_requires_sorted() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut array = ArrayVisualizer::from_values([9, 1]);
        assert_eq!(array.perform('b', &mut rng), Err(VisualError::NotSorted));

        let sorted = ArrayVisualizer::from_values([1, 4, 7, 9, 12]);
        let anim = sorted.binary_search(12).unwrap();
        let probed: Vec<_> = anim
            .scenes()
            .flat_map(|s| s.labels_with(Tone::Probing))
            .map(str::to_string)
            .collect();
        assert_eq!(probed, ["7", "9", "12"]);
    }

    #[test]
    fn test_binary_search_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut array = ArrayVisualizer::new();
        assert_eq!(array.perform('b', &mut rng), Err(VisualError::Empty { structure: "Array" }));
    }

    #[test]
    fn test_resting_colour_is_stable() {
        let array = ArrayVisualizer::from_values([14]);
        assert_eq!(array.scene(), array.scene());
        assert_eq!(array.scene().find_tone("14"), Some(Tone::Fill(2)));
    }
}
