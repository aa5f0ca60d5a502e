//! Pairing independent splits of one acquisition into `(input, target)`
//! training examples.
//!
//! Every split is an independent reconstruction of the same object from a
//! disjoint subset of the measurements. For each slice and each split
//! position, the input is the mean of one subset of the splits and the target
//! is the mean of the complementary subset, so their noise is independent
//! while the underlying signal is the same.

use ndarray::{Array2, ArrayBase, ArrayView2, Axis, CowArray, Data, Ix2, Ix3};
use rayon::prelude::*;

use crate::combinations::{Combinations, SplitSet, MAX_SPLITS};
use crate::error::{Error, Result};
use crate::index::flat_to_pair;
use crate::strategy::Strategy;
use crate::types::{FlatIndex, Intensityf32, Pair, Slice};

/// Indexed sequence of 2-D slices: one split of a reconstructed volume.
pub trait SliceSource {
    fn len(&self) -> usize;

    fn slice(&self, index: usize) -> CowArray<'_, Intensityf32, Ix2>;

    fn is_empty(&self) -> bool { self.len() == 0 }
}

/// Axis 0 enumerates the slices
impl<S> SliceSource for ArrayBase<S, Ix3>
where
    S: Data<Elem = Intensityf32>,
{
    fn len(&self) -> usize { self.len_of(Axis(0)) }

    fn slice(&self, index: usize) -> CowArray<'_, Intensityf32, Ix2> {
        self.index_axis(Axis(0), index).into()
    }
}

impl SliceSource for Vec<Slice> {
    fn len(&self) -> usize { <[Slice]>::len(self) }

    fn slice(&self, index: usize) -> CowArray<'_, Intensityf32, Ix2> {
        self[index].view().into()
    }
}

impl<T: SliceSource + ?Sized> SliceSource for &T {
    fn len(&self) -> usize { (**self).len() }

    fn slice(&self, index: usize) -> CowArray<'_, Intensityf32, Ix2> { (**self).slice(index) }
}

impl<T: SliceSource + ?Sized> SliceSource for Box<T> {
    fn len(&self) -> usize { (**self).len() }

    fn slice(&self, index: usize) -> CowArray<'_, Intensityf32, Ix2> { (**self).slice(index) }
}

// --------------------------------------------------------------------------------

/// Flat, indexable collection of the `num_splits * num_slices` training pairs
/// that can be made from a set of splits.
pub struct SplitPairs<S> {
    splits: Vec<S>,
    strategy: Strategy,
    input_idxs: Vec<SplitSet>,
    target_idxs: Vec<SplitSet>,
}

impl<S: SliceSource> SplitPairs<S> {

    pub fn new(splits: Vec<S>, strategy: Strategy) -> Result<Self> {
        let num_splits = splits.len();
        if num_splits < 2 {
            return Err(Error::configuration(format!(
                "at least 2 splits are required, got {num_splits}")));
        }
        if num_splits > MAX_SPLITS {
            return Err(Error::configuration(format!(
                "at most {MAX_SPLITS} splits are supported, got {num_splits}")));
        }
        let lengths: Vec<_> = splits.iter().map(SliceSource::len).collect();
        if lengths.iter().any(|&l| l != lengths[0]) {
            return Err(Error::configuration(format!(
                "all splits must contain the same number of slices, got {lengths:?}")));
        }

        let (input_idxs, target_idxs) = split_combinations(num_splits, strategy);
        Ok(Self { splits, strategy, input_idxs, target_idxs })
    }

    pub fn num_splits(&self) -> usize { self.splits.len() }

    pub fn num_slices(&self) -> usize { self.splits[0].len() }

    pub fn len(&self) -> usize { self.num_splits() * self.num_slices() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn strategy(&self) -> Strategy { self.strategy }

    /// Splits averaged into the input, one entry per split position
    pub fn input_idxs(&self) -> &[SplitSet] { &self.input_idxs }

    /// Splits averaged into the target, one entry per split position
    pub fn target_idxs(&self) -> &[SplitSet] { &self.target_idxs }

    pub fn splits(&self) -> &[S] { &self.splits }

    /// The `(input, target)` pair at flat index `i`
    pub fn get(&self, i: FlatIndex) -> Result<Pair> {
        let len = self.len();
        if i >= len { return Err(Error::Index { index: i, len }) }
        let (slice_idx, position) = flat_to_pair(i, self.num_splits());

        let slices: Vec<_> = self.splits.iter().map(|s| s.slice(slice_idx)).collect();
        let input  = mean_of_subset(&slices, self. input_idxs[position])?;
        let target = mean_of_subset(&slices, self.target_idxs[position])?;
        Ok((input, target))
    }

    pub fn iter(&self) -> impl Iterator<Item = Result<Pair>> + '_ {
        (0..self.len()).map(|i| self.get(i))
    }
}

impl<S: SliceSource + Sync> SplitPairs<S> {
    /// Fetch a batch of pairs in parallel. Fails if any index is out of range.
    pub fn get_many(&self, indices: &[FlatIndex]) -> Result<Vec<Pair>> {
        indices.par_iter().map(|&i| self.get(i)).collect()
    }
}

/// Input and target subsets for each split position.
///
/// Inputs are the `k`-subsets of all splits in lexicographic order, `k` being
/// determined by the strategy. Each target is the complement of its input.
pub fn split_combinations(num_splits: usize, strategy: Strategy) -> (Vec<SplitSet>, Vec<SplitSet>) {
    let all = SplitSet::full(num_splits);
    let inputs: Vec<SplitSet> = Combinations::new(num_splits, strategy.input_size(num_splits))
        .map(|c| c.into_iter().collect())
        .collect();
    let targets = inputs.iter().map(|&i| all.difference(i)).collect();
    (inputs, targets)
}

fn mean_of_subset(slices: &[CowArray<'_, Intensityf32, Ix2>], subset: SplitSet) -> Result<Slice> {
    let chosen: Vec<ArrayView2<Intensityf32>> = subset.iter().map(|s| slices[s].view()).collect();
    mean_of_slices(&chosen)
}

/// Elementwise arithmetic mean of equally-shaped slices
pub fn mean_of_slices(slices: &[ArrayView2<'_, Intensityf32>]) -> Result<Slice> {
    let (first, rest) = slices.split_first()
        .ok_or_else(|| Error::configuration("cannot average an empty set of slices"))?;
    let mut sum: Array2<Intensityf32> = first.to_owned();
    for s in rest {
        if s.shape() != first.shape() {
            return Err(Error::shape(format!("slice of shape {:?}", first.shape()), s.shape()));
        }
        sum += s;
    }
    sum /= slices.len() as Intensityf32;
    Ok(sum)
}


#[cfg(test)]
mod test_split_pairs {
    use super::*;
    // Explicit import, so it wins over the `Strategy` trait in proptest's prelude
    use crate::strategy::Strategy;
    use ndarray::{Array3, array};
    use rstest::rstest;
    use float_eq::assert_float_eq;
    #[allow(unused)] use pretty_assertions::{assert_eq, assert_ne};

    /// `num_splits` volumes of `num_slices` 2x3 slices, every voxel of split
    /// `s` equal to `s`
    fn constant_splits(num_splits: usize, num_slices: usize) -> Vec<Array3<f32>> {
        (0..num_splits)
            .map(|s| Array3::from_elem((num_slices, 2, 3), s as f32))
            .collect()
    }

    fn ids(set: SplitSet) -> Vec<usize> { set.iter().collect() }

    #[test]
    fn one_to_many_combinations_for_4_splits() {
        let (inputs, targets) = split_combinations(4, Strategy::OneToMany);
        let inputs : Vec<_> = inputs .into_iter().map(ids).collect();
        let targets: Vec<_> = targets.into_iter().map(ids).collect();
        assert_eq!(inputs , vec![vec![0], vec![1], vec![2], vec![3]]);
        assert_eq!(targets, vec![vec![1,2,3], vec![0,2,3], vec![0,1,3], vec![0,1,2]]);
    }

    #[test]
    fn many_to_one_combinations_for_4_splits() {
        let (inputs, targets) = split_combinations(4, Strategy::ManyToOne);
        let inputs : Vec<_> = inputs .into_iter().map(ids).collect();
        let targets: Vec<_> = targets.into_iter().map(ids).collect();
        assert_eq!(inputs , vec![vec![0,1,2], vec![0,1,3], vec![0,2,3], vec![1,2,3]]);
        assert_eq!(targets, vec![vec![3], vec![2], vec![1], vec![0]]);
    }

    use proptest::prelude::*;

    fn any_strategy() -> impl proptest::strategy::Strategy<Value = Strategy> {
        prop_oneof![Just(Strategy::ManyToOne), Just(Strategy::OneToMany)]
    }

    proptest! {
        #[test]
        fn inputs_and_targets_partition_all_splits(n in 2..MAX_SPLITS, strategy in any_strategy()) {
            let all = SplitSet::full(n);
            let (inputs, targets) = split_combinations(n, strategy);
            assert_eq!(inputs .len(), n);
            assert_eq!(targets.len(), n);
            for (i, t) in inputs.into_iter().zip(targets) {
                assert!(i.is_disjoint(t));
                assert_eq!(i.union(t), all);
                let (ni, nt) = match strategy {
                    Strategy::ManyToOne => (n - 1, 1),
                    Strategy::OneToMany => (1, n - 1),
                };
                assert_eq!(i.len(), ni);
                assert_eq!(t.len(), nt);
            }
        }

        #[test]
        fn length_is_splits_times_slices(n in 2..8_usize, s in 0..20_usize, strategy in any_strategy()) {
            let pairs = SplitPairs::new(constant_splits(n, s), strategy).unwrap();
            assert_eq!(pairs.len(), n * s);
            assert_eq!(pairs.num_slices(), s);
        }

        #[test]
        fn mean_does_not_depend_on_order(
            values in proptest::collection::vec(-1e3_f32..1e3, 1..8),
            seed in any::<u64>(),
        ) {
            let slices: Vec<Slice> = values.iter().map(|&v| Array2::from_elem((2, 2), v)).collect();
            let views: Vec<_> = slices.iter().map(|s| s.view()).collect();
            let mut shuffled = views.clone();
            // Deterministic rotation + reversal driven by the seed
            let k = (seed as usize) % shuffled.len();
            shuffled.rotate_left(k);
            if seed % 2 == 1 { shuffled.reverse() }
            let a = mean_of_slices(&views).unwrap();
            let b = mean_of_slices(&shuffled).unwrap();
            for (x, y) in a.iter().zip(b.iter()) {
                assert_float_eq!(*x, *y, abs <= 1e-3);
            }
        }
    }

    // ----- End-to-end: constant slices -------------------------------------------
    #[rstest(/**/ strategy, position, expected_input, expected_target,
             case(Strategy::OneToMany, 0, 0.0, 2.0),
             case(Strategy::OneToMany, 1, 1.0, 5.0 / 3.0),
             case(Strategy::OneToMany, 3, 3.0, 1.0),
             case(Strategy::ManyToOne, 0, 1.0, 3.0),
             case(Strategy::ManyToOne, 3, 2.0, 0.0),
    )]
    fn constant_slices(strategy: Strategy, position: usize, expected_input: f32, expected_target: f32) {
        let pairs = SplitPairs::new(constant_splits(4, 2), strategy).unwrap();
        assert_eq!(pairs.len(), 8);
        for slice in 0..2 {
            let (input, target) = pairs.get(slice * 4 + position).unwrap();
            assert_eq!(input.shape(), &[2, 3]);
            for &v in input .iter() { assert_float_eq!(v, expected_input , abs <= 1e-6) }
            for &v in target.iter() { assert_float_eq!(v, expected_target, abs <= 1e-6) }
        }
    }

    #[test]
    fn slice_index_selects_the_right_slice() {
        // Split s, slice z: every voxel equal to 10 * z + s
        let splits: Vec<Vec<Slice>> = (0..3)
            .map(|s| (0..5).map(|z| Array2::from_elem((1, 1), (10 * z + s) as f32)).collect())
            .collect();
        let pairs = SplitPairs::new(splits, Strategy::OneToMany).unwrap();
        // slice 4, position 2
        let (input, target) = pairs.get(4 * 3 + 2).unwrap();
        assert_eq!(input , array![[42.0]]);
        assert_eq!(target, array![[40.5]]);
    }

    #[test]
    fn get_many_matches_get() {
        let pairs = SplitPairs::new(constant_splits(3, 4), Strategy::ManyToOne).unwrap();
        let indices: Vec<_> = (0..pairs.len()).rev().collect();
        let batch = pairs.get_many(&indices).unwrap();
        for (&i, pair) in indices.iter().zip(batch) {
            assert_eq!(pair, pairs.get(i).unwrap());
        }
    }

    // ----- Failures ---------------------------------------------------------------
    #[rstest(n, case(0), case(1))]
    fn too_few_splits(n: usize) {
        let result = SplitPairs::new(constant_splits(n, 3), Strategy::OneToMany);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[test]
    fn unequal_split_lengths() {
        let mut splits = constant_splits(3, 3);
        splits[1] = Array3::zeros((2, 2, 3));
        let result = SplitPairs::new(splits, Strategy::ManyToOne);
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[rstest(index, case(8), case(9), case(usize::MAX))]
    fn index_out_of_range(index: usize) {
        let pairs = SplitPairs::new(constant_splits(4, 2), Strategy::OneToMany).unwrap();
        assert!(matches!(pairs.get(index), Err(Error::Index { len: 8, .. })));
    }

    #[test]
    fn mismatched_slice_shapes() {
        let splits = vec![
            vec![Array2::<f32>::zeros((2, 2))],
            vec![Array2::<f32>::zeros((2, 3))],
        ];
        let pairs = SplitPairs::new(splits, Strategy::OneToMany).unwrap();
        // One-to-many with two splits averages a single slice on each side ...
        assert!(pairs.get(0).is_ok());
        // ... so mismatched shapes only show up when slices are combined
        let views = [pairs.splits()[0][0].view(), pairs.splits()[1][0].view()];
        assert!(matches!(mean_of_slices(&views), Err(Error::Shape { .. })));
    }
}
