//! End-to-end behaviour of the visualizers through the public API.

use std::time::{Duration, Instant};

use algovista::components::{
    ARRAY_CAPACITY, ArrayVisualizer, BinaryTree, Graph, HashTable, MaxHeap, Order, Queue, Stack, Trie,
};
use algovista::state::keyboard::KeyboardEvent;
use algovista::{AlertLevel, App, Component, Config, VisualError, catalog, compose_frame};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn rng() -> StdRng {
    StdRng::seed_from_u64(2024)
}

fn alert_of(anim: &algovista::Animation) -> (AlertLevel, &str) {
    let (level, message) = anim.alert.as_ref().expect("animation raises an alert");
    (*level, message.as_str())
}

#[test]
fn every_component_runs_every_operation() {
    let mut rng = rng();
    for mut component in catalog() {
        for op in component.operations() {
            // Failures are fine here; what matters is that refused operations
            // report a message and successful ones end on an alert or nothing.
            match component.perform(op.key, &mut rng) {
                Ok(anim) => {
                    for scene in anim.scenes() {
                        assert!(!scene.title.is_empty(), "{} '{}'", component.id(), op.key);
                    }
                }
                Err(err) => assert!(!err.to_string().is_empty()),
            }
        }
        let _ = component.scene();
    }
}

#[test]
fn unknown_keys_are_refused() {
    let mut rng = rng();
    for mut component in catalog() {
        assert_eq!(
            component.perform('Z', &mut rng).unwrap_err(),
            VisualError::UnknownOperation { key: 'Z' }
        );
    }
}

#[test]
fn array_fills_sorts_and_binary_searches() {
    let mut array = ArrayVisualizer::new();
    for v in [42, 7, 19, 3, 88, 56] {
        array.insert(v).unwrap();
    }
    assert_eq!(array.elements().len(), ARRAY_CAPACITY);
    assert_eq!(array.insert(1).unwrap_err(), VisualError::Full { structure: "Array" });

    assert_eq!(array.binary_search(19).unwrap_err(), VisualError::NotSorted);

    let sorted = array.bubble_sort().unwrap();
    assert_eq!(array.elements(), &[3, 7, 19, 42, 56, 88]);
    assert_eq!(alert_of(&sorted), (AlertLevel::Success, "Array sorted using Bubble Sort!"));

    assert!(array.binary_search(56).is_ok());
}

#[test]
fn stack_and_queue_orders() {
    let mut stack = Stack::new();
    let mut queue = Queue::new();
    for v in [1, 2, 3] {
        stack.push(v).unwrap();
        queue.enqueue(v).unwrap();
    }

    let popped = stack.pop().unwrap();
    assert_eq!(alert_of(&popped).1, "Popped 3 from stack");

    let dequeued = queue.dequeue().unwrap();
    assert_eq!(alert_of(&dequeued).1, "Dequeued 1");

    let front = queue.front().unwrap();
    assert_eq!(alert_of(&front), (AlertLevel::Info, "Front element: 2"));
}

#[test]
fn tree_keeps_search_order() {
    let mut tree = BinaryTree::new();
    for v in [50, 30, 70, 20, 40, 60, 80] {
        tree.insert(v).unwrap();
    }
    assert_eq!(tree.values(Order::Inorder), [20, 30, 40, 50, 60, 70, 80]);
    assert_eq!(tree.values(Order::Preorder), [50, 30, 20, 40, 70, 60, 80]);
    assert_eq!(tree.values(Order::Postorder), [20, 40, 30, 60, 80, 70, 50]);
    assert_eq!(tree.height(), 3);
}

#[test]
fn heap_extracts_in_descending_order() {
    let mut heap = MaxHeap::new();
    for v in [15, 40, 8, 99, 23] {
        heap.insert(v).unwrap();
    }
    let mut out = Vec::new();
    while let Some(&max) = heap.items().first() {
        heap.extract_max().unwrap();
        out.push(max);
        assert!(heap.is_valid());
    }
    assert_eq!(out, [99, 40, 23, 15, 8]);
}

#[test]
fn graph_traversals_follow_insertion_order() {
    let mut graph = Graph::new();
    for _ in 0..4 {
        graph.add_node().unwrap();
    }
    graph.add_edge(0, 1, 3).unwrap();
    graph.add_edge(0, 2, 5).unwrap();
    graph.add_edge(1, 3, 2).unwrap();

    assert_eq!(graph.dfs_order(), [0, 1, 3, 2]);
    assert_eq!(graph.bfs_order(), [0, 1, 2, 3]);

    let dfs = graph.dfs().unwrap();
    assert_eq!(alert_of(&dfs), (AlertLevel::Info, "DFS traversal completed"));
}

#[test]
fn hash_table_chains_collisions() {
    let mut table = HashTable::new();
    let first = table.insert(12, 100);
    assert_eq!(alert_of(&first), (AlertLevel::Success, "Inserted 12:100 at index 2"));

    let second = table.insert(22, 200);
    assert_eq!(
        alert_of(&second),
        (AlertLevel::Warning, "Inserted 22:200 with collision at index 2")
    );
    assert_eq!(table.buckets()[2].len(), 2);
    assert_eq!(table.get(22), Some(200));

    let miss = table.search_key(7);
    assert_eq!(alert_of(&miss), (AlertLevel::Danger, "Key 7 not found"));
}

#[test]
fn trie_finds_words_by_prefix() {
    let mut trie = Trie::new();
    for word in ["cat", "car", "dog"] {
        trie.insert(word);
    }
    assert!(trie.contains("car"));
    assert!(!trie.contains("ca"));

    let found = trie.prefix("ca").unwrap();
    assert_eq!(alert_of(&found), (AlertLevel::Success, "Found words with prefix: \"ca\""));

    let missing = trie.search("cow").unwrap();
    assert_eq!(alert_of(&missing), (AlertLevel::Danger, "Word \"cow\" not found"));
}

#[test]
fn app_session_renders_every_tab() {
    let config = Config {
        seed: Some(9),
        ..Config::default()
    };
    let mut app = App::new(config.validate(&catalog()).unwrap());
    app.resize(100, 34);

    let mut now = Instant::now();
    for _ in 0..catalog().len() {
        let key = app.component().operations()[0].key;
        app.handle_key(&KeyboardEvent::new(key.to_string()), now);
        while app.player().is_playing() {
            now += Duration::from_secs(1);
            app.tick(now);
        }

        let frame = compose_frame(&app.frame_inputs());
        let title = app.component().title();
        assert!(frame.to_text().contains(&format!(" {title} ")), "{title}");

        app.handle_key(&KeyboardEvent::new("ArrowRight"), now);
    }
    assert_eq!(app.active(), 0);
    assert!(app.alerts().log().count() >= 10);
}
