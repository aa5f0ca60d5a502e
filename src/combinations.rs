//! Small sets of split indices, and k-subsets of `{0, ..., n-1}` generated in
//! lexicographic order.

use crate::types::SplitIndex;

/// Largest number of splits that fits in a `SplitSet`
pub const MAX_SPLITS: usize = u64::BITS as usize;

/// Set of split indices, stored as a bit mask. Iteration is always in
/// increasing index order.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SplitSet(u64);

impl SplitSet {

    pub fn empty() -> Self { Self(0) }

    /// `{0, 1, ..., n-1}`
    pub fn full(n: usize) -> Self {
        assert!(n <= MAX_SPLITS, "SplitSet holds at most {MAX_SPLITS} splits, not {n}");
        if n == MAX_SPLITS { Self(u64::MAX) }
        else               { Self((1 << n) - 1) }
    }

    pub fn insert(&mut self, i: SplitIndex) {
        assert!(i < MAX_SPLITS, "split index {i} does not fit in a SplitSet");
        self.0 |= 1 << i;
    }

    pub fn contains(&self, i: SplitIndex) -> bool {
        i < MAX_SPLITS && self.0 & (1 << i) != 0
    }

    pub fn len(&self) -> usize { self.0.count_ones() as usize }

    pub fn is_empty(&self) -> bool { self.0 == 0 }

    pub fn difference(self, other: Self) -> Self { Self(self.0 & !other.0) }

    pub fn is_disjoint(self, other: Self) -> bool { self.0 & other.0 == 0 }

    pub fn union(self, other: Self) -> Self { Self(self.0 | other.0) }

    pub fn iter(&self) -> impl Iterator<Item = SplitIndex> {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 { return None }
            let i = bits.trailing_zeros() as usize;
            bits &= bits - 1;
            Some(i)
        })
    }
}

impl FromIterator<SplitIndex> for SplitSet {
    fn from_iter<I: IntoIterator<Item = SplitIndex>>(iter: I) -> Self {
        let mut set = Self::empty();
        for i in iter { set.insert(i) }
        set
    }
}

impl std::fmt::Debug for SplitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// --------------------------------------------------------------------------------

/// All `k`-element subsets of `{0, ..., n-1}`, as increasing index tuples, in
/// lexicographic order: for `n = 4, k = 3` this yields `(0,1,2)`, `(0,1,3)`,
/// `(0,2,3)`, `(1,2,3)`.
pub struct Combinations {
    n: usize,
    current: Option<Vec<usize>>,
}

impl Combinations {
    pub fn new(n: usize, k: usize) -> Self {
        let current = if k <= n { Some((0..k).collect()) } else { None };
        Self { n, current }
    }
}

impl Iterator for Combinations {
    type Item = Vec<usize>;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.current.clone()?;
        self.current = next_combination(result.clone(), self.n);
        Some(result)
    }
}

/// Advance `c` to its lexicographic successor among the `c.len()`-subsets of
/// `{0, ..., n-1}`, or `None` if `c` is the last one.
fn next_combination(mut c: Vec<usize>, n: usize) -> Option<Vec<usize>> {
    let k = c.len();
    // Rightmost position which has not yet reached its maximum `n - k + i`
    let i = (0..k).rev().find(|&i| c[i] < n - k + i)?;
    c[i] += 1;
    for j in i+1..k {
        c[j] = c[j-1] + 1;
    }
    Some(c)
}
