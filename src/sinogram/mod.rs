//! Projection data: `(num_slices, num_angles, num_pixels)` stacks of 1-D
//! projections.

use ndarray::{s, ArrayBase, ArrayView3, Data, Dimension, Ix3};

use crate::error::{Error, Result};
use crate::types::{Intensityf32, ProjectionStack};

/// View arbitrary-rank data as a projection stack, failing unless it is 3-D
pub fn projection_stack<S, D>(data: &ArrayBase<S, D>) -> Result<ArrayView3<'_, Intensityf32>>
where
    S: Data<Elem = Intensityf32>,
    D: Dimension,
{
    data.view()
        .into_dimensionality::<Ix3>()
        .map_err(|_| Error::shape("3-D projection data (slices, angles, pixels)", data.shape()))
}

/// Partition the projection angles into `n` interleaved subsets: split `k`
/// receives angles `k, k+n, k+2n, ...`.
///
/// Reconstructing each split separately gives the independent noise
/// realizations consumed by [`SplitPairs`](crate::splits::SplitPairs).
pub fn split_angles<S, D>(sino: &ArrayBase<S, D>, n: usize) -> Result<Vec<ProjectionStack>>
where
    S: Data<Elem = Intensityf32>,
    D: Dimension,
{
    let sino = projection_stack(sino)?;
    let (_, num_angles, _) = sino.dim();
    if n < 2 || n > num_angles {
        return Err(Error::configuration(format!(
            "cannot split {num_angles} angles into {n} subsets")));
    }
    Ok((0..n)
       .map(|k| sino.slice(s![.., k..;n, ..]).to_owned())
       .collect())
}
