pub use crate::error::{Error, Result};
pub use crate::strategy::Strategy;
pub use crate::combinations::SplitSet;
pub use crate::splits::{SliceSource, SplitPairs};
pub use crate::supervised::SupervisedPairs;
pub use crate::projector::Projector;

pub use crate::types::{Intensityf32, Pair, ProjectionStack, Slice, Volume};
