//! Benchmark for Tree vs standard BTreeSet.
//!
//! Compares point edits, lookups and whole-set algebra. The set algebra cases
//! include a small operand against a large one, where the split-based
//! algorithms only touch O(m log(n/m)) nodes.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeSet;
use std::hint::black_box;
use weftree::{NaturalOrder, Tree};

// =============================================================================
// insert Benchmark
// =============================================================================

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in [100, 1000, 10000] {
        group.bench_with_input(BenchmarkId::new("Tree", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut tree = Tree::new();
                for index in 0..size {
                    tree = tree.insert(black_box(index), &NaturalOrder);
                }
                black_box(tree)
            });
        });

        group.bench_with_input(
            BenchmarkId::new("BTreeSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut set = BTreeSet::new();
                    for index in 0..size {
                        set.insert(black_box(index));
                    }
                    black_box(set)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// contains Benchmark
// =============================================================================

fn benchmark_contains(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("contains");

    for size in [100, 1000, 10000] {
        let tree = Tree::from_sorted_vec((0..size).collect());
        let standard_set: BTreeSet<i32> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("Tree", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut found = 0;
                for key in 0..size {
                    if tree.contains(&black_box(key), &NaturalOrder) {
                        found += 1;
                    }
                }
                black_box(found)
            });
        });

        group.bench_with_input(
            BenchmarkId::new("BTreeSet", size),
            &size,
            |bencher, &size| {
                bencher.iter(|| {
                    let mut found = 0;
                    for key in 0..size {
                        if standard_set.contains(&black_box(key)) {
                            found += 1;
                        }
                    }
                    black_box(found)
                });
            },
        );
    }

    group.finish();
}

// =============================================================================
// remove Benchmark
// =============================================================================

fn benchmark_remove(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("remove");

    for size in [100, 1000, 10000] {
        let tree = Tree::from_sorted_vec((0..size).collect());

        group.bench_with_input(BenchmarkId::new("Tree", size), &size, |bencher, &size| {
            bencher.iter(|| {
                let mut current = tree.clone();
                for key in (0..size).step_by(2) {
                    current = current.remove(&black_box(key), &NaturalOrder);
                }
                black_box(current)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Set Algebra Benchmarks
// =============================================================================

fn benchmark_union(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("union");

    for (small, large) in [(100, 100_000), (10_000, 10_000), (50_000, 100_000)] {
        let label = format!("{small}x{large}");
        let left = Tree::from_sorted_vec((0..small).map(|value| value * 7).collect());
        let right = Tree::from_sorted_vec((0..large).map(|value| value * 3).collect());
        let left_set: BTreeSet<i32> = left.iter().copied().collect();
        let right_set: BTreeSet<i32> = right.iter().copied().collect();

        group.bench_function(BenchmarkId::new("Tree", &label), |bencher| {
            bencher.iter(|| black_box(left.union(&right, &NaturalOrder)));
        });

        group.bench_function(BenchmarkId::new("BTreeSet", &label), |bencher| {
            bencher.iter(|| black_box(left_set.union(&right_set).copied().collect::<BTreeSet<_>>()));
        });
    }

    group.finish();
}

fn benchmark_intersection(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("intersection");

    for (small, large) in [(100, 100_000), (10_000, 10_000)] {
        let label = format!("{small}x{large}");
        let left = Tree::from_sorted_vec((0..small).map(|value| value * 7).collect());
        let right = Tree::from_sorted_vec((0..large).map(|value| value * 3).collect());
        let left_set: BTreeSet<i32> = left.iter().copied().collect();
        let right_set: BTreeSet<i32> = right.iter().copied().collect();

        group.bench_function(BenchmarkId::new("Tree", &label), |bencher| {
            bencher.iter(|| black_box(left.intersection(&right, &NaturalOrder)));
        });

        group.bench_function(BenchmarkId::new("BTreeSet", &label), |bencher| {
            bencher.iter(|| {
                black_box(
                    left_set
                        .intersection(&right_set)
                        .copied()
                        .collect::<BTreeSet<_>>(),
                )
            });
        });
    }

    group.finish();
}

fn benchmark_difference(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("difference");

    for (small, large) in [(100, 100_000), (10_000, 10_000)] {
        let label = format!("{small}x{large}");
        let left = Tree::from_sorted_vec((0..large).map(|value| value * 3).collect());
        let right = Tree::from_sorted_vec((0..small).map(|value| value * 7).collect());

        group.bench_function(BenchmarkId::new("Tree", &label), |bencher| {
            bencher.iter(|| black_box(left.difference(&right, &NaturalOrder)));
        });
    }

    group.finish();
}

// =============================================================================
// iteration Benchmark
// =============================================================================

fn benchmark_iteration(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("iteration");

    for size in [1000, 100_000] {
        let tree = Tree::from_sorted_vec((0..size).collect::<Vec<i64>>());
        let standard_set: BTreeSet<i64> = (0..size).collect();

        group.bench_with_input(BenchmarkId::new("Tree", size), &size, |bencher, _| {
            bencher.iter(|| black_box(tree.iter().sum::<i64>()));
        });

        group.bench_with_input(BenchmarkId::new("BTreeSet", size), &size, |bencher, _| {
            bencher.iter(|| black_box(standard_set.iter().sum::<i64>()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_contains,
    benchmark_remove,
    benchmark_union,
    benchmark_intersection,
    benchmark_difference,
    benchmark_iteration
);

criterion_main!(benches);
