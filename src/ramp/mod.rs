//! Ram-Lak ramp filtering of projection data for filtered back-projection.
//!
//! The filter is defined by its discrete spatial-domain taps (Zeng, "Revisit
//! of the Ramp Filter", IEEE Trans Nucl Sci 62(1), 2015) and applied by
//! multiplication in the frequency domain, after zero-padding each projection.

pub mod fft;

use ndarray::{Array1, ArrayBase, Axis, Data, Dimension, Zip};

use crate::error::{Error, Result};
use crate::projector::Projector;
use crate::sinogram::{projection_stack, split_angles};
use crate::types::{Intensityf32, ProjectionStack, Volume, PI};

use fft::RealFft;

/// Spatial-domain Ram-Lak filter of length `n`.
///
/// - `[0]` is `1/4`
/// - even indices are zero
/// - odd `j` is `-1 / (π j')²`, where `j' = j` for `2j <= n` and `j' = n - j`
///   beyond the midpoint
pub fn build_kernel(n: usize) -> Array1<f64> {
    let mut kernel = Array1::zeros(n);
    if n == 0 { return kernel }
    kernel[0] = 0.25;
    for j in (1..n).step_by(2) {
        let folded = if 2 * j <= n { j } else { n - j };
        let d = PI * folded as f64;
        kernel[j] = -1.0 / (d * d);
    }
    kernel
}

/// Number of zeros added to a projection of `num_pixels` pixels before
/// transforming it. The padded length is always even.
pub fn pad_size(num_pixels: usize) -> usize {
    if num_pixels % 2 == 0 { num_pixels     }
    else                   { num_pixels + 2 }
}

/// Real per-frequency filter for padded length `m`: real part of the real FFT
/// of `build_kernel(m)`, one value per non-negative frequency bin.
pub fn frequency_response(m: usize) -> Vec<f32> {
    if m == 0 { return vec![] }
    response_for(&RealFft::new(m))
}

fn response_for(fft: &RealFft) -> Vec<f32> {
    let kernel: Vec<f32> = build_kernel(fft.len()).iter().map(|&x| x as f32).collect();
    // The kernel is symmetric, so its spectrum is real: drop the imaginary part
    fft.rfft(&kernel).into_iter().map(|c| c.re).collect()
}

/// Ramp-filter every projection in a `(num_slices, num_angles, num_pixels)`
/// stack. The result has the same shape as the input and includes the
/// `π / num_angles` angular weight of the back-projection integral.
///
/// Fails with `Error::Shape` unless `sino` is 3-dimensional.
pub fn apply<S, D>(sino: &ArrayBase<S, D>) -> Result<ProjectionStack>
where
    S: Data<Elem = Intensityf32>,
    D: Dimension,
{
    let sino = projection_stack(sino)?;
    let (_, num_angles, num_pixels) = sino.dim();
    let mut filtered = ProjectionStack::zeros(sino.raw_dim());
    if sino.is_empty() { return Ok(filtered) }

    // Centre the data in a zero-padded window of even length `m`
    let padding = pad_size(num_pixels);
    let lo = padding / 2;
    let hi = lo + num_pixels;
    let m  = num_pixels + padding;

    let fft = RealFft::new(m);
    let filter = response_for(&fft);
    let angular_norm = (num_angles as f64 / PI) as f32;

    Zip::from(filtered.lanes_mut(Axis(2)))
        .and(sino.lanes(Axis(2)))
        .par_for_each(|mut out, projection| {
            let mut padded = vec![0.0; m];
            padded[lo..hi].iter_mut().zip(projection).for_each(|(p, &x)| *p = x);

            let mut bins = fft.rfft(&padded);
            bins.iter_mut().zip(&filter).for_each(|(b, &h)| *b *= h);
            let full = fft.irfft(&bins);

            out.iter_mut().zip(&full[lo..hi]).for_each(|(o, &x)| *o = x / angular_norm);
        });
    Ok(filtered)
}

/// Filtered back-projection: ramp-filter `sino`, then apply the adjoint of
/// `projector` to the filtered data.
///
/// Errors raised by the projector are wrapped in `Error::Operator` unchanged.
pub fn reconstruct<P, S, D>(projector: &P, sino: &ArrayBase<S, D>) -> Result<Volume>
where
    P: Projector,
    S: Data<Elem = Intensityf32>,
    D: Dimension,
{
    let filtered = apply(sino)?;
    projector.back_project(filtered.view())
        .map_err(|e| Error::Operator(Box::new(e)))
}

/// Reconstruct one volume per interleaved angle subset of `sino` (see
/// [`split_angles`]). `projectors[k]` must describe the geometry of split `k`.
pub fn fbp_splits<P, S, D>(projectors: &[P], sino: &ArrayBase<S, D>) -> Result<Vec<Volume>>
where
    P: Projector,
    S: Data<Elem = Intensityf32>,
    D: Dimension,
{
    split_angles(sino, projectors.len())?
        .iter()
        .zip(projectors)
        .map(|(split, projector)| reconstruct(projector, split))
        .collect()
}
