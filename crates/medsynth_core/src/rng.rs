//! Explicit random sources.
//!
//! Nothing in the generators touches a thread-local generator. A run owns one
//! master seed; each worker derives its own stream from it, so one patient's
//! artifacts never depend on how many draws another patient consumed.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

pub use rand::rngs::StdRng;

/// Deterministic generator for a seed.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Fresh master seed for runs that did not configure one.
pub fn entropy_seed() -> u64 {
    rand::random()
}

/// Derive an independent stream seed for worker `index` from the master seed.
/// The derivation is stable: adding workers never changes existing streams.
pub fn worker_seed(master: u64, index: u64) -> u64 {
    master ^ (index.wrapping_add(1)).wrapping_mul(0x9e37_79b9_7f4a_7c15)
}

/// Uniform pick from a constant table. Empty tables yield `T::default()`.
pub fn pick<T, R>(rng: &mut R, items: &[T]) -> T
where
    T: Copy + Default,
    R: Rng + ?Sized,
{
    items.choose(rng).copied().unwrap_or_default()
}

/// Bernoulli trial: true with probability `p`.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    rng.gen::<f64>() < p
}

/// Draw up to `attempts` picks from `pool`, keeping first occurrences only.
pub fn distinct_picks<R: Rng + ?Sized>(rng: &mut R, pool: &[&str], attempts: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for _ in 0..attempts {
        let item = pick(rng, pool);
        if !out.iter().any(|s| s == item) {
            out.push(item.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = seeded(11);
        let mut b = seeded(11);
        let xs: Vec<u32> = (0..16).map(|_| a.gen()).collect();
        let ys: Vec<u32> = (0..16).map(|_| b.gen()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn test_worker_seeds_differ() {
        let seeds: Vec<u64> = (0..8).map(|i| worker_seed(42, i)).collect();
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert_ne!(worker_seed(42, 0), 42);
    }

    #[test]
    fn test_pick_empty_is_default() {
        let mut rng = seeded(1);
        let empty: [&str; 0] = [];
        assert_eq!(pick(&mut rng, &empty), "");
    }

    #[test]
    fn test_distinct_picks_has_no_duplicates() {
        let mut rng = seeded(3);
        let pool = ["a", "b", "c"];
        for _ in 0..50 {
            let picks = distinct_picks(&mut rng, &pool, 6);
            let mut sorted = picks.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(sorted.len(), picks.len());
            assert!(picks.len() <= 3);
        }
    }
}
