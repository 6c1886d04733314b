//! In-place Fisher-Yates shuffle over an injected random source.

use crate::rng::IdRng;

/// Shuffle `items` in place.
///
/// Walks from the back, swapping each position with a uniformly chosen
/// earlier one (or itself). The slice is mutated directly; nothing is
/// allocated.
pub fn shuffle<T, R: IdRng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = (rng.next_u64() % (i as u64 + 1)) as usize;
        items.swap(i, j);
    }
}
