//! Shared randomness helpers used by the generator and the draw pool.
//!
//! Both consumers take `&mut impl Rng` so a seeded [`StdRng`] reproduces the
//! exact same tickets and draw order, which the determinism tests rely on.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Seeded RNG when a seed is given, OS entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    }
}

/// Fisher-Yates shuffle.
pub fn shuffle<T, R: Rng>(rng: &mut R, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}

/// Pick `count` distinct items uniformly, without replacement.
///
/// Runs the first `count` steps of a forward Fisher-Yates pass, so the cost is
/// proportional to `count` rather than the pool size. Returned order is random.
pub fn sample_without_replacement<T: Copy, R: Rng>(
    rng: &mut R, pool: &[T], count: usize,
) -> Vec<T> {
    assert!(count <= pool.len(), "cannot sample {} from {}", count, pool.len());
    let mut scratch = pool.to_vec();
    for i in 0..count {
        let j = rng.gen_range(i..scratch.len());
        scratch.swap(i, j);
    }
    scratch.truncate(count);
    scratch
}

/// Pick one item uniformly. `None` for an empty slice.
pub fn pick<T: Copy, R: Rng>(rng: &mut R, items: &[T]) -> Option<T> {
    if items.is_empty() {
        return None;
    }
    Some(items[rng.gen_range(0..items.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_is_distinct_and_drawn_from_pool() {
        let mut rng = rng_from_seed(Some(3));
        let pool: Vec<u8> = (80..=90).collect();
        for count in 0..=pool.len() {
            let picked = sample_without_replacement(&mut rng, &pool, count);
            assert_eq!(picked.len(), count);
            let unique: HashSet<u8> = picked.iter().copied().collect();
            assert_eq!(unique.len(), count);
            assert!(picked.iter().all(|n| pool.contains(n)));
        }
    }

    #[test]
    fn sample_reaches_both_ends_of_the_pool() {
        // The 11-wide column must be able to yield 80 and 90 alike.
        let mut rng = rng_from_seed(Some(11));
        let pool: Vec<u8> = (80..=90).collect();
        let mut seen = HashSet::new();
        for _ in 0..500 {
            seen.extend(sample_without_replacement(&mut rng, &pool, 1));
        }
        assert_eq!(seen.len(), pool.len());
    }

    #[test]
    fn shuffle_keeps_every_item() {
        let mut rng = rng_from_seed(Some(5));
        let mut items: Vec<u8> = (1..=90).collect();
        shuffle(&mut rng, &mut items);
        let mut sorted = items.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=90).collect::<Vec<u8>>());
        assert_ne!(items, sorted, "90 items should not survive a shuffle in order");
    }

    #[test]
    fn pick_from_empty_is_none() {
        let mut rng = rng_from_seed(Some(1));
        assert_eq!(pick::<u8, _>(&mut rng, &[]), None);
        assert_eq!(pick(&mut rng, &[7u8]), Some(7));
    }
}
