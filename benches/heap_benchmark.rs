//! Criterion benchmarks for the Fibonacci heap
//!
//! ## Running
//!
//! ```bash
//! cargo bench --bench heap_benchmark
//!
//! # Only the shortest-path workload
//! cargo bench --bench heap_benchmark -- dijkstra
//! ```
//!
//! The graph workload compares `FibonacciHeap` (decrease_key in place) with
//! `std::collections::BinaryHeap` (lazy re-insertion of stale entries) on the
//! same synthetic sparse graph.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rust_fibonacci_heap::fibonacci::FibonacciHeap;
use rust_fibonacci_heap::pathfinding::shortest_distances;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hint::black_box;

/// Linear congruential generator for reproducible inputs
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0 >> 33
    }
}

fn random_keys(n: usize, seed: u64) -> Vec<u64> {
    let mut rng = Lcg(seed);
    (0..n).map(|_| rng.next() % 1_000_000).collect()
}

/// Sparse directed graph: a ring for connectivity plus `degree - 1` random arcs per node.
fn synthetic_sparse(nodes: usize, degree: usize, seed: u64) -> Vec<Vec<(usize, u64)>> {
    let mut rng = Lcg(seed);
    (0..nodes)
        .map(|v| {
            let mut edges = vec![((v + 1) % nodes, rng.next() % 100 + 1)];
            for _ in 1..degree {
                edges.push(((rng.next() as usize) % nodes, rng.next() % 100 + 1));
            }
            edges
        })
        .collect()
}

fn lazy_binary_heap_distances(graph: &[Vec<(usize, u64)>], source: usize) -> Vec<Option<u64>> {
    let mut dist = vec![None; graph.len()];
    let mut heap = BinaryHeap::new();
    dist[source] = Some(0);
    heap.push(Reverse((0u64, source)));

    while let Some(Reverse((d, v))) = heap.pop() {
        if dist[v].is_some_and(|best| d > best) {
            continue;
        }
        for &(u, w) in &graph[v] {
            let candidate = d + w;
            if dist[u].map_or(true, |best| candidate < best) {
                dist[u] = Some(candidate);
                heap.push(Reverse((candidate, u)));
            }
        }
    }
    dist
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");
    for &n in &[1_000usize, 100_000] {
        let keys = random_keys(n, 1);
        group.bench_with_input(BenchmarkId::from_parameter(n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = FibonacciHeap::with_capacity(keys.len());
                for &k in keys {
                    heap.insert(k, ());
                }
                black_box(heap.len())
            })
        });
    }
    group.finish();
}

fn bench_insert_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_extract_all");
    for &n in &[1_000usize, 100_000] {
        let keys = random_keys(n, 2);
        group.bench_with_input(BenchmarkId::from_parameter(n), &keys, |b, keys| {
            b.iter(|| {
                let mut heap = FibonacciHeap::with_capacity(keys.len());
                for &k in keys {
                    heap.insert(k, ());
                }
                let mut sum = 0u64;
                while let Ok((k, ())) = heap.extract_min() {
                    sum = sum.wrapping_add(k);
                }
                black_box(sum)
            })
        });
    }
    group.finish();
}

fn bench_decrease_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key");
    for &n in &[1_000usize, 100_000] {
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter_batched(
                || {
                    let mut heap = FibonacciHeap::with_capacity(n + 1);
                    let handles: Vec<_> = (0..n)
                        .map(|i| heap.insert(2_000_000 + i as u64, i))
                        .collect();
                    // One extraction turns the flat root ring into trees.
                    heap.insert(0, n);
                    let _ = heap.extract_min();
                    (heap, handles)
                },
                |(mut heap, handles)| {
                    for (i, handle) in handles.iter().enumerate().rev() {
                        let _ = heap.decrease_key(handle, i as u64);
                    }
                    black_box(heap.find_min().map(|(p, _)| *p))
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");
    group.sample_size(10);
    for &n in &[10_000usize, 200_000] {
        let graph = synthetic_sparse(n, 6, 12345);
        group.bench_with_input(BenchmarkId::new("fibonacci", n), &graph, |b, graph| {
            b.iter(|| black_box(shortest_distances::<u64, FibonacciHeap<_, _>>(graph, 0)))
        });
        group.bench_with_input(BenchmarkId::new("binary_lazy", n), &graph, |b, graph| {
            b.iter(|| black_box(lazy_binary_heap_distances(graph, 0)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_insert,
    bench_insert_extract,
    bench_decrease_key,
    bench_dijkstra
);
criterion_main!(benches);
