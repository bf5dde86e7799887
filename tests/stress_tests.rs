//! Stress tests that push the heap through large operation counts
//!
//! These tests perform large numbers of operations in various patterns
//! to catch edge cases and verify correctness under load.

use rust_fibonacci_heap::fibonacci::FibonacciHeap;
use rust_fibonacci_heap::HeapError;

/// Linear congruential generator for reproducible pseudo-random input
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Lcg { state: seed }
    }

    fn next(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state >> 33
    }
}

#[test]
fn test_massive_operations() {
    let mut heap = FibonacciHeap::new();
    for i in 0..10_000 {
        heap.insert(i, i);
    }
    assert_eq!(heap.len(), 10_000);

    for i in 0..10_000 {
        assert_eq!(heap.extract_min(), Ok((i, i)));
    }
    assert_eq!(heap.extract_min(), Err(HeapError::EmptyHeap));
    assert_eq!(heap.find_min(), Err(HeapError::EmptyHeap));
}

#[test]
fn test_many_decrease_keys() {
    let mut heap = FibonacciHeap::new();
    let handles: Vec<_> = (0..2000).map(|i| heap.insert(100_000 + i, i)).collect();

    // Build deep trees before cutting into them.
    assert_eq!(heap.extract_min(), Ok((100_000, 0)));

    for (i, handle) in handles.iter().enumerate().skip(1).rev() {
        heap.decrease_key(handle, i as i32).unwrap();
    }
    heap.verify_invariants().unwrap();

    for i in 1..2000 {
        assert_eq!(heap.extract_min(), Ok((i, i)));
    }
    assert!(heap.is_empty());
}

#[test]
fn test_interleaved_random_workload() {
    let mut rng = Lcg::new(42);
    let mut heap = FibonacciHeap::new();
    let mut live = Vec::new();

    for round in 0..5_000 {
        match rng.next() % 4 {
            0 | 1 => {
                let priority = (rng.next() % 1_000_000) as i64;
                live.push(heap.insert(priority, round));
            }
            2 => {
                let _ = heap.extract_min();
            }
            _ => {
                if live.is_empty() {
                    continue;
                }
                let handle = live[(rng.next() as usize) % live.len()];
                if let Some((&current, _)) = heap.get(&handle) {
                    let by = (rng.next() % 1000) as i64;
                    heap.decrease_key(&handle, current - by).unwrap();
                } else {
                    assert_eq!(
                        heap.decrease_key(&handle, 0),
                        Err(HeapError::InvalidHandle)
                    );
                }
            }
        }
        if round % 500 == 0 {
            heap.verify_invariants().unwrap();
        }
    }

    let mut last = i64::MIN;
    while let Ok((priority, _)) = heap.extract_min() {
        assert!(priority >= last);
        last = priority;
    }
}

#[test]
fn test_alternating_ops() {
    let mut heap = FibonacciHeap::new();
    for i in 0..500 {
        heap.insert(i * 2, i);
        heap.insert(i * 2 + 1, i + 1000);
        assert!(heap.extract_min().is_ok());
        heap.check_consolidated().unwrap();
    }
    assert_eq!(heap.len(), 500);
    heap.verify_invariants().unwrap();
}

#[test]
fn test_large_merge() {
    let mut heap1 = FibonacciHeap::new();
    let mut heap2 = FibonacciHeap::new();

    for i in 0..2000 {
        heap1.insert(i * 2, i);
        heap2.insert(i * 2 + 1, i);
    }
    heap1.extract_min().unwrap();
    heap2.extract_min().unwrap();

    heap1.merge(heap2);
    assert_eq!(heap1.len(), 3998);
    heap1.verify_invariants().unwrap();

    for expected in 2..4000 {
        let (priority, _) = heap1.extract_min().unwrap();
        assert_eq!(priority, expected);
    }
}

#[test]
fn test_handle_reuse_after_churn() {
    let mut heap = FibonacciHeap::new();
    let old: Vec<_> = (0..100).map(|i| heap.insert(i, ())).collect();
    for _ in 0..100 {
        heap.extract_min().unwrap();
    }
    let new: Vec<_> = (0..100).map(|i| heap.insert(i, ())).collect();

    assert!(old.iter().all(|h| !heap.contains(h)));
    assert!(new.iter().all(|h| heap.contains(h)));
}
