//! Integration tests for sharing trees across threads.
//!
//! These tests only build with the `arc` feature, which backs every tree with
//! `Arc` and makes it `Send + Sync` for `Send + Sync` elements.

#![cfg(feature = "arc")]

use rstest::rstest;
use std::sync::Arc;
use std::thread;
use weftree::{NaturalOrder, Tree};

#[rstest]
fn test_tree_cross_thread_structural_sharing() {
    let original = Arc::new(Tree::from_iter_with(0..1000, &NaturalOrder));

    let handles: Vec<_> = (0..4)
        .map(|index| {
            let shared = Arc::clone(&original);
            thread::spawn(move || {
                let extended = shared.insert(10_000 + index, &NaturalOrder);
                assert_eq!(extended.len(), 1001);
                assert_eq!(shared.len(), 1000);
                extended
            })
        })
        .collect();

    let results: Vec<Tree<i32>> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();

    for (index, tree) in (0..).zip(&results) {
        assert!(tree.contains(&(10_000 + index), &NaturalOrder));
        assert_eq!(tree.validate(&NaturalOrder), Ok(()));
    }
    assert_eq!(original.len(), 1000);
}

#[rstest]
fn test_tree_moved_into_thread() {
    let tree = Tree::from_iter_with(0..100, &NaturalOrder);
    let evens = Tree::from_iter_with((0..100).step_by(2), &NaturalOrder);

    let handle = thread::spawn(move || tree.difference(&evens, &NaturalOrder));
    let odds = handle.join().unwrap();

    assert!(odds.iter().all(|value| value % 2 == 1));
    assert_eq!(odds.len(), 50);
}

#[rstest]
fn test_parallel_set_algebra_on_shared_input() {
    let base = Tree::from_iter_with(0..5000, &NaturalOrder);

    let handles: Vec<_> = (1..=4)
        .map(|step| {
            let base = base.clone();
            thread::spawn(move || {
                let multiples = Tree::from_iter_with((0..5000).step_by(step), &NaturalOrder);
                base.intersection(&multiples, &NaturalOrder).len()
            })
        })
        .collect();

    let sizes: Vec<usize> = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .collect();
    assert_eq!(sizes, vec![5000, 2500, 1667, 1250]);
}
