//! Determinism and golden-value tests for the shared PRNG, at the level a
//! graph-shuffling caller depends on: same seed draws the same sequence
//! regardless of how many other `JavaRandom` instances exist alongside it.

use trademax_core::JavaRandom;

#[test]
fn independent_streams_with_same_seed_match() {
    let mut a = JavaRandom::new(12345);
    let mut b = JavaRandom::new(12345);
    for _ in 0..500 {
        assert_eq!(a.next_int(1_000_000), b.next_int(1_000_000));
    }
}

#[test]
fn different_seeds_diverge() {
    let mut a = JavaRandom::new(1);
    let mut b = JavaRandom::new(2);
    let seq_a: Vec<u32> = (0..20).map(|_| a.next_int(1_000_000)).collect();
    let seq_b: Vec<u32> = (0..20).map(|_| b.next_int(1_000_000)).collect();
    assert_ne!(seq_a, seq_b);
}

#[test]
fn next_int_never_reaches_bound() {
    let mut rng = JavaRandom::new(999);
    for _ in 0..1000 {
        assert!(rng.next_int(7) < 7);
    }
}
