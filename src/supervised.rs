//! Plain supervised pairs: the `i`th input slice goes with the `i`th target
//! slice.

use crate::error::{Error, Result};
use crate::splits::SliceSource;
use crate::types::{FlatIndex, Pair};

pub struct SupervisedPairs<I, T> {
    input: I,
    target: T,
}

impl<I: SliceSource, T: SliceSource> SupervisedPairs<I, T> {

    pub fn new(input: I, target: T) -> Result<Self> {
        if input.len() != target.len() {
            return Err(Error::configuration(format!(
                "input has {} slices but target has {}", input.len(), target.len())));
        }
        Ok(Self { input, target })
    }

    pub fn len(&self) -> usize { self.input.len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn get(&self, i: FlatIndex) -> Result<Pair> {
        let len = self.len();
        if i >= len { return Err(Error::Index { index: i, len }) }
        Ok((self.input.slice(i).into_owned(), self.target.slice(i).into_owned()))
    }
}
