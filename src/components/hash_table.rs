//! Hash table with ten buckets and separate chaining.

use rand::Rng;
use rand::rngs::StdRng;

use super::{Animation, Component, Operation, Pace, Section};
use crate::error::VisualError;
use crate::scene::Scene;
use crate::state::alerts::AlertLevel;
use crate::theme::Tone;

pub const BUCKET_COUNT: usize = 10;

const BUCKETS_PER_ROW: usize = 5;
const BUCKET_WIDTH: i32 = 13;
const BUCKET_STRIDE: i32 = 15;
const ROW_HEIGHT: i32 = 6;
/// Chain entries drawn under a bucket before collapsing into `+n`.
const VISIBLE_CHAIN: usize = 3;

const OPERATIONS: &[Operation] = &[
    Operation {
        key: 'i',
        label: "Insert",
        info: "Insert: Adds a key-value pair to the hash table using the hash function.",
    },
    Operation {
        key: 'd',
        label: "Delete",
        info: "Delete: Removes a key-value pair from the hash table.",
    },
    Operation {
        key: 's',
        label: "Search",
        info: "Search: Finds a value by its key using the hash function.",
    },
    Operation {
        key: 'c',
        label: "Show Collision",
        info: "Show Collision: Demonstrates how collisions are handled using chaining.",
    },
    Operation {
        key: 'r',
        label: "Reset",
        info: "Reset: Clears the hash table.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Entry {
    pub key: i64,
    pub value: i64,
}

#[derive(Debug)]
pub struct HashTable {
    buckets: Vec<Vec<Entry>>,
}

impl Default for HashTable {
    fn default() -> Self {
        Self {
            buckets: vec![Vec::new(); BUCKET_COUNT],
        }
    }
}

/// Bucket index for `key`.
pub fn hash(key: i64) -> usize {
    key.rem_euclid(BUCKET_COUNT as i64) as usize
}

/// What to light up in one frame.
#[derive(Clone, Copy, Default)]
struct Marks {
    bucket: Option<(usize, Tone)>,
    entry: Option<(usize, usize, Tone)>,
}

impl HashTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buckets(&self) -> &[Vec<Entry>] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    pub fn get(&self, key: i64) -> Option<i64> {
        self.buckets[hash(key)]
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value)
    }

    /// Append `key:value` to its chain. An occupied bucket is a collision.
    pub fn insert(&mut self, key: i64, value: i64) -> Animation {
        let index = hash(key);
        let collision = !self.buckets[index].is_empty();
        let tone = if collision { Tone::Removing } else { Tone::Pending };

        let mut anim = Animation::new();
        anim.step(self.render(Marks { bucket: Some((index, tone)), entry: None }), Pace::Beat);

        self.buckets[index].push(Entry { key, value });
        let slot = self.buckets[index].len() - 1;
        anim.step(
            self.render(Marks { bucket: None, entry: Some((index, slot, Tone::Found)) }),
            Pace::Settle,
        );

        if collision {
            anim.with_alert(
                AlertLevel::Warning,
                format!("Inserted {key}:{value} with collision at index {index}"),
            )
        } else {
            anim.success(format!("Inserted {key}:{value} at index {index}"))
        }
    }

    /// Pop the last pair of the first non-empty bucket.
    pub fn delete(&mut self) -> Result<Animation, VisualError> {
        let index = self.first_occupied()?;
        let slot = self.buckets[index].len() - 1;
        let Entry { key, value } = self.buckets[index][slot];

        let mut anim = Animation::new();
        anim.step(
            self.render(Marks {
                bucket: Some((index, Tone::Removing)),
                entry: Some((index, slot, Tone::Removing)),
            }),
            Pace::Beat,
        );
        self.buckets[index].pop();

        Ok(anim.success(format!("Deleted {key}:{value} from index {index}")))
    }

    /// Look up the first key of the first non-empty bucket through the hash.
    pub fn search(&self) -> Result<Animation, VisualError> {
        let first = self.first_occupied()?;
        let key = self.buckets[first][0].key;
        Ok(self.search_key(key))
    }

    pub fn search_key(&self, key: i64) -> Animation {
        let index = hash(key);
        let mut anim = Animation::new();
        anim.step(self.render(Marks { bucket: Some((index, Tone::Probing)), entry: None }), Pace::Beat);

        match self.buckets[index].iter().position(|e| e.key == key) {
            Some(slot) => {
                let value = self.buckets[index][slot].value;
                anim.step(
                    self.render(Marks {
                        bucket: Some((index, Tone::Probing)),
                        entry: Some((index, slot, Tone::Found)),
                    }),
                    Pace::Beat,
                );
                anim.success(format!("Found {key}:{value} at index {index}"))
            }
            None => anim.with_alert(AlertLevel::Danger, format!("Key {key} not found")),
        }
    }

    /// Chain keys 5, 15 and 25 into bucket 5.
    pub fn show_collision(&mut self, values: [i64; 3]) -> Animation {
        const BUCKET: usize = 5;
        let mut anim = Animation::new();

        for (n, (key, value)) in [5, 15, 25].into_iter().zip(values).enumerate() {
            if n > 0 {
                anim.step(
                    self.render(Marks { bucket: Some((BUCKET, Tone::Removing)), entry: None }),
                    Pace::Beat,
                );
            }
            self.buckets[BUCKET].push(Entry { key, value });
            let slot = self.buckets[BUCKET].len() - 1;
            anim.step(
                self.render(Marks { bucket: None, entry: Some((BUCKET, slot, Tone::Pending)) }),
                Pace::Beat,
            );
        }

        anim.with_alert(AlertLevel::Info, "Demonstrated collision handling with chaining")
    }

    pub fn reset(&mut self) -> Animation {
        self.buckets.iter_mut().for_each(Vec::clear);
        Animation::new()
    }

    fn first_occupied(&self) -> Result<usize, VisualError> {
        self.buckets
            .iter()
            .position(|b| !b.is_empty())
            .ok_or(VisualError::Empty { structure: "Hash table" })
    }

    fn render(&self, marks: Marks) -> Scene {
        let mut scene = Scene::new("Hash Table").with_caption(format!(
            "Entries: {}  hash(key) = key % {}",
            self.len(),
            BUCKET_COUNT
        ));

        for (index, chain) in self.buckets.iter().enumerate() {
            let (x, top) = bucket_origin(index);
            let slot_tone = match marks.bucket {
                Some((i, tone)) if i == index => tone,
                _ => Tone::Plain,
            };
            scene.bar(x, top, BUCKET_WIDTH, format!("[{index}]"), slot_tone);

            if chain.is_empty() {
                scene.text(x + BUCKET_WIDTH / 2, top + 1, "∅", Tone::Muted);
                continue;
            }
            for (slot, entry) in chain.iter().enumerate().take(VISIBLE_CHAIN) {
                let tone = match marks.entry {
                    Some((i, s, tone)) if i == index && s == slot => tone,
                    _ => Tone::for_value(entry.key),
                };
                scene.bar(x, top + 1 + slot as i32, BUCKET_WIDTH, format!("{}:{}", entry.key, entry.value), tone);
            }
            if chain.len() > VISIBLE_CHAIN {
                let more = chain.len() - VISIBLE_CHAIN;
                scene.text(x + 4, top + 1 + VISIBLE_CHAIN as i32, format!("+{more}"), Tone::Muted);
            }
        }
        scene
    }
}

fn bucket_origin(index: usize) -> (i32, i32) {
    let col = (index % BUCKETS_PER_ROW) as i32;
    let row = (index / BUCKETS_PER_ROW) as i32;
    (2 + col * BUCKET_STRIDE, 1 + row * ROW_HEIGHT)
}

impl Component for HashTable {
    fn id(&self) -> &'static str {
        "hash-table"
    }

    fn title(&self) -> &'static str {
        "Hash Table"
    }

    fn section(&self) -> Section {
        Section::Hash
    }

    fn operations(&self) -> &'static [Operation] {
        OPERATIONS
    }

    fn perform(&mut self, key: char, rng: &mut StdRng) -> Result<Animation, VisualError> {
        match key {
            'i' => {
                let k = rng.gen_range(1..=99);
                let v = rng.gen_range(100..=999);
                Ok(self.insert(k, v))
            }
            'd' => self.delete(),
            's' => self.search(),
            'c' => {
                let values = [(); 3].map(|_| rng.gen_range(100..=999));
                Ok(self.show_collision(values))
            }
            'r' => Ok(self.reset()),
            _ => Err(VisualError::UnknownOperation { key }),
        }
    }

    fn scene(&self) -> Scene {
        self.render(Marks::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_collision_alerts() {
        let mut table = HashTable::new();
        let first = table.insert(42, 100);
        assert_eq!(first.alert, Some((AlertLevel::Success, "Inserted 42:100 at index 2".into())));
        assert_eq!(first.steps[0].scene.find_tone("[2]"), Some(Tone::Pending));

        let second = table.insert(12, 200);
        assert_eq!(
            second.alert,
            Some((AlertLevel::Warning, "Inserted 12:200 with collision at index 2".into()))
        );
        assert_eq!(second.steps[0].scene.find_tone("[2]"), Some(Tone::Removing));
        assert_eq!(table.buckets()[2], [Entry { key: 42, value: 100 }, Entry { key: 12, value: 200 }]);
    }

    #[test]
    fn test_delete_pops_chain_tail_of_first_bucket() {
        let mut table = HashTable::new();
        table.insert(7, 700);
        table.insert(3, 300);
        table.insert(13, 130);

        let anim = table.delete().unwrap();
        assert_eq!(anim.alert.unwrap().1, "Deleted 13:130 from index 3");
        assert_eq!(table.get(3), Some(300));
        assert_eq!(table.get(13), None);
    }

    #[test]
    fn test_search_first_key() {
        let mut table = HashTable::new();
        table.insert(58, 581);
        table.insert(21, 211);
        let anim = table.search().unwrap();
        assert_eq!(anim.alert.unwrap().1, "Found 21:211 at index 1");
        assert_eq!(anim.steps[1].scene.find_tone("21:211"), Some(Tone::Found));
    }

    #[test]
    fn test_empty_table() {
        let mut table = HashTable::new();
        assert_eq!(table.delete(), Err(VisualError::Empty { structure: "Hash table" }));
        assert_eq!(
            table.search().unwrap_err().to_string(),
            "Hash table is empty!"
        );
    }

    #[test]
    fn test_show_collision_chains_bucket_five() {
        let mut table = HashTable::new();
        let anim = table.show_collision([101, 202, 303]);
        let keys: Vec<i64> = table.buckets()[5].iter().map(|e| e.key).collect();
        assert_eq!(keys, [5, 15, 25]);
        assert_eq!(anim.alert.unwrap().0, AlertLevel::Info);
        assert_eq!(anim.steps.len(), 5);

        // The bucket flashes like a real collision before each chained push.
        let mut real = HashTable::new();
        real.insert(5, 1);
        let collided = real.insert(15, 2);
        let collision_tone = collided.steps[0].scene.find_tone("[5]");
        assert_eq!(collision_tone, Some(Tone::Removing));
        for step in [1, 3] {
            assert_eq!(anim.steps[step].scene.find_tone("[5]"), collision_tone);
        }
        assert_eq!(anim.steps[0].scene.find_tone("[5]"), Some(Tone::Plain));
    }

    #[test]
    fn test_long_chain_collapses() {
        let mut table = HashTable::new();
        for k in [4, 14, 24, 34, 44] {
            table.insert(k, 100);
        }
        let scene = table.scene();
        let texts: Vec<&str> = scene
            .shapes
            .iter()
            .filter_map(|s| match s {
                crate::scene::Shape::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"+2"));
    }
}
