use rand::seq::IndexedRandom;
use rand::Rng;

use crate::model::{Record, RecordCollection};

/// Draw `count` records uniformly at random, with replacement.
///
/// Indices are drawn from the valid range only, so the result always has exactly `count`
/// elements unless `collection` is empty, in which case it is empty.
pub fn sample<R: Rng + ?Sized>(collection: &[Record], count: usize, rng: &mut R) -> RecordCollection {
    (0..count)
        .filter_map(|_| collection.choose(rng).cloned())
        .collect()
}
