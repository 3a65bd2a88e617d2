//! Shuffle algorithm for playlist randomization
//!
//! Produces a permutation of playlist indices instead of reordering tracks,
//! so the canonical order is never touched.

use rand::seq::SliceRandom;
use rand::Rng;

/// Uniform random permutation of `0..len` (Fisher-Yates)
///
/// Each index has equal probability of landing at any position.
pub fn shuffled_order<R: Rng + ?Sized>(len: usize, rng: &mut R) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    order.shuffle(rng);
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn permutation_preserves_all_indices() {
        let mut rng = StdRng::seed_from_u64(42);
        let order = shuffled_order(50, &mut rng);

        let unique: HashSet<usize> = order.iter().copied().collect();
        assert_eq!(order.len(), 50);
        assert_eq!(unique.len(), 50);
        assert!(order.iter().all(|&i| i < 50));
    }

    #[test]
    fn empty_and_single() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(shuffled_order(0, &mut rng).is_empty());
        assert_eq!(shuffled_order(1, &mut rng), vec![0]);
    }

    #[test]
    fn same_seed_same_order() {
        let a = shuffled_order(20, &mut StdRng::seed_from_u64(9));
        let b = shuffled_order(20, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn first_position_is_roughly_uniform() {
        // 3 tracks, 6000 shuffles: each index should lead ~2000 times
        let mut rng = StdRng::seed_from_u64(1234);
        let mut leads = [0usize; 3];
        for _ in 0..6000 {
            leads[shuffled_order(3, &mut rng)[0]] += 1;
        }

        for count in leads {
            assert!(
                (1700..=2300).contains(&count),
                "Skewed shuffle distribution: {:?}",
                leads
            );
        }
    }
}
