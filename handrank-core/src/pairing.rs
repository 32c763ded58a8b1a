//! Pair generation for a comparison session.
//!
//! Every unordered pair of items is asked about at most once. The order is a
//! uniform shuffle drawn from a caller-supplied RNG, so a seeded RNG gives a
//! reproducible session.
use rand::seq::SliceRandom;
use rand::Rng;

use crate::types::Pair;

/// Number of distinct unordered pairs among `num_items` items: n·(n−1)/2.
pub fn pair_count(num_items: usize) -> usize {
    num_items * num_items.saturating_sub(1) / 2
}

/// All pairs `(i, j)` with `0 <= i < j < num_items`, in lexicographic order.
pub fn all_pairs(num_items: usize) -> Vec<Pair> {
    let mut pairs = Vec::with_capacity(pair_count(num_items));
    for i in 0..num_items {
        for j in (i + 1)..num_items {
            pairs.push((i, j));
        }
    }
    pairs
}

/// All pairs for `num_items` items in a uniformly random order.
pub fn shuffled_pairs<R: Rng + ?Sized>(num_items: usize, rng: &mut R) -> Vec<Pair> {
    let mut pairs = all_pairs(num_items);
    pairs.shuffle(rng);
    pairs
}
