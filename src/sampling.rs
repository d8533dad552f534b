//! Stateless random choices used by ants.
//!
//! Both helpers only consume the generator they are handed, so a seeded
//! generator reproduces the same choices.

use rand::Rng;
use rand::prelude::IndexedRandom;

/// Uniformly picks one element, `None` for an empty slice.
pub fn choose_uniform<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    items.choose(rng)
}

/// Picks one element with probability proportional to its weight.
///
/// Weights are normalized into a probability vector and sampled through its
/// cumulative distribution. Returns `None` when the slices differ in length,
/// are empty, hold a negative weight, or the weights sum to zero or to a
/// non-finite value.
pub fn choose_weighted<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    items: &'a [T],
    weights: &[f64],
) -> Option<&'a T> {
    if items.is_empty() || items.len() != weights.len() {
        return None;
    }
    if weights.iter().any(|&w| w < 0.0) {
        return None;
    }
    let total: f64 = weights.iter().sum();
    if !total.is_finite() || total <= 0.0 {
        return None;
    }

    let target = rng.random::<f64>();
    let mut cumulative = 0.0;
    for (item, &weight) in items.iter().zip(weights) {
        cumulative += weight / total;
        if target < cumulative {
            return Some(item);
        }
    }

    // Rounding can leave the cumulative sum just below 1.0.
    items
        .iter()
        .zip(weights)
        .rev()
        .find(|(_, w)| **w > 0.0)
        .map(|(item, _)| item)
}
