//! Conversion between flat indices and `(slice, split position)` pairs.
//!
//! The split position varies fastest: consecutive flat indices visit every
//! split position of one slice before moving on to the next slice.

use crate::types::FlatIndex;

#[inline]
pub fn flat_to_pair(i: FlatIndex, num_splits: usize) -> (usize, usize) {
    (i / num_splits, i % num_splits)
}

#[inline]
pub fn pair_to_flat((slice, position): (usize, usize), num_splits: usize) -> FlatIndex {
    slice * num_splits + position
}
