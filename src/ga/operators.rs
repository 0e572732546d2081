//! Evolutionary operators.
//!
//! # Reference
//!
//! Order crossover follows Davis (1985) as popularized for routing by
//! Prins, C. (2004). "A simple and effective evolutionary algorithm for
//! the vehicle routing problem", *Computers & Operations Research*
//! 31(12), 1985-2002.

use rand::Rng;

/// Order Crossover (OX) producing one child.
///
/// Copies a random slice `[i, j]` of `parent1` into the child at the same
/// positions, then fills the remaining slots left-to-right with the values
/// of `parent2` that are not already present, in `parent2`'s order. Both
/// parents must be permutations of the same set.
///
/// Sequences of length ≤ 2 are returned as a copy of `parent1`.
pub fn order_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    if n <= 2 {
        return parent1.to_vec();
    }

    let start = rng.random_range(0..n - 1);
    let end = rng.random_range(start + 1..n);

    let mut child: Vec<Option<usize>> = vec![None; n];
    for pos in start..=end {
        child[pos] = Some(parent1[pos]);
    }

    let inherited: std::collections::BTreeSet<usize> =
        parent1[start..=end].iter().copied().collect();

    let mut pos = 0;
    for &value in parent2 {
        if inherited.contains(&value) {
            continue;
        }
        while child[pos].is_some() {
            pos += 1;
        }
        child[pos] = Some(value);
    }

    child.into_iter().flatten().collect()
}

/// Uniform crossover over assignment genes: each locus independently
/// inherits from either parent with probability ½. Returns both children.
pub fn uniform_crossover<R: Rng>(
    parent1: &[usize],
    parent2: &[usize],
    rng: &mut R,
) -> (Vec<usize>, Vec<usize>) {
    let mut child1 = Vec::with_capacity(parent1.len());
    let mut child2 = Vec::with_capacity(parent1.len());
    for (&a, &b) in parent1.iter().zip(parent2) {
        if rng.random::<f64>() < 0.5 {
            child1.push(a);
            child2.push(b);
        } else {
            child1.push(b);
            child2.push(a);
        }
    }
    (child1, child2)
}

/// Swaps two distinct random positions in place. No-op for sequences
/// shorter than 2.
pub fn swap_mutation<R: Rng>(sequence: &mut [usize], rng: &mut R) {
    let n = sequence.len();
    if n < 2 {
        return;
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    sequence.swap(i, j);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn is_permutation(seq: &[usize], n: usize) -> bool {
        let mut sorted = seq.to_vec();
        sorted.sort_unstable();
        sorted == (0..n).collect::<Vec<_>>()
    }

    #[test]
    fn test_ox_produces_permutation() {
        let mut rng = StdRng::seed_from_u64(7);
        let p1: Vec<usize> = (0..10).collect();
        let p2: Vec<usize> = (0..10).rev().collect();
        for _ in 0..50 {
            let child = order_crossover(&p1, &p2, &mut rng);
            assert!(is_permutation(&child, 10), "not a permutation: {child:?}");
        }
    }

    #[test]
    fn test_ox_tiny_sequences_copy_parent1() {
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(order_crossover(&[0], &[0], &mut rng), vec![0]);
        assert_eq!(order_crossover(&[1, 0], &[0, 1], &mut rng), vec![1, 0]);
    }

    #[test]
    fn test_ox_preserves_relative_order_of_filler() {
        // With a fixed seed the slice bounds are deterministic; the filled
        // positions must follow parent2's relative order.
        let mut rng = StdRng::seed_from_u64(3);
        let p1 = vec![0, 1, 2, 3, 4, 5];
        let p2 = vec![5, 4, 3, 2, 1, 0];
        let child = order_crossover(&p1, &p2, &mut rng);
        assert!(is_permutation(&child, 6));
    }

    #[test]
    fn test_uniform_crossover_loci_come_from_parents() {
        let mut rng = StdRng::seed_from_u64(11);
        let p1 = vec![0, 0, 0, 0];
        let p2 = vec![1, 1, 1, 1];
        let (c1, c2) = uniform_crossover(&p1, &p2, &mut rng);
        for i in 0..4 {
            // Whatever c1 took, c2 took the complement
            assert_eq!(c1[i] + c2[i], 1);
        }
    }

    #[test]
    fn test_swap_mutation_changes_exactly_two_positions() {
        let mut rng = StdRng::seed_from_u64(5);
        let original: Vec<usize> = (0..8).collect();
        let mut mutated = original.clone();
        swap_mutation(&mut mutated, &mut rng);

        let changed: Vec<usize> = (0..8).filter(|&i| original[i] != mutated[i]).collect();
        assert_eq!(changed.len(), 2);
        assert!(is_permutation(&mutated, 8));
    }

    #[test]
    fn test_swap_mutation_short_sequences_untouched() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut single = vec![0];
        swap_mutation(&mut single, &mut rng);
        assert_eq!(single, vec![0]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn ox_always_yields_permutation(seed in any::<u64>(), n in 3usize..40) {
                let mut rng = StdRng::seed_from_u64(seed);
                let p1: Vec<usize> = (0..n).collect();
                let mut p2: Vec<usize> = (0..n).collect();
                p2.reverse();
                let child = order_crossover(&p1, &p2, &mut rng);
                prop_assert!(is_permutation(&child, n));
            }

            #[test]
            fn swap_preserves_multiset(seed in any::<u64>(), n in 2usize..40) {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut seq: Vec<usize> = (0..n).collect();
                swap_mutation(&mut seq, &mut rng);
                prop_assert!(is_permutation(&seq, n));
            }
        }
    }
}
