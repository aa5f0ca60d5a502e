//! Real-input FFTs of even length, built on complex `rustfft` plans.
//!
//! `rfft` keeps the `m/2 + 1` non-negative frequency bins; `irfft` rebuilds
//! the Hermitian-symmetric spectrum from them. The forward transform is not
//! scaled; the inverse divides by `m`, so `irfft(rfft(x)) == x`.

use std::sync::Arc;
use rustfft::{Fft, FftPlanner, num_complex::Complex};

pub type Complex32 = Complex<f32>;

/// Forward and inverse plans for one transform length
#[derive(Clone)]
pub struct RealFft {
    m: usize,
    forward: Arc<dyn Fft<f32>>,
    inverse: Arc<dyn Fft<f32>>,
}

impl RealFft {

    pub fn new(m: usize) -> Self {
        debug_assert!(m % 2 == 0, "real FFT length must be even, got {m}");
        let mut planner = FftPlanner::<f32>::new();
        let forward = planner.plan_fft_forward(m);
        let inverse = planner.plan_fft_inverse(m);
        Self { m, forward, inverse }
    }

    pub fn len(&self) -> usize { self.m }

    pub fn is_empty(&self) -> bool { self.m == 0 }

    /// Number of bins produced by `rfft`
    pub fn n_bins(&self) -> usize { self.m / 2 + 1 }

    pub fn rfft(&self, x: &[f32]) -> Vec<Complex32> {
        assert_eq!(x.len(), self.m);
        let mut buffer: Vec<Complex32> = x.iter().map(|&re| Complex32::new(re, 0.0)).collect();
        self.forward.process(&mut buffer);
        buffer.truncate(self.n_bins());
        buffer
    }

    /// Imaginary parts of the DC and Nyquist bins are ignored, as they must be
    /// zero in the spectrum of any real signal.
    pub fn irfft(&self, bins: &[Complex32]) -> Vec<f32> {
        let m = self.m;
        assert_eq!(bins.len(), self.n_bins());
        let mut buffer = vec![Complex32::default(); m];
        buffer[..bins.len()].copy_from_slice(bins);
        buffer[0].im = 0.0;
        buffer[m / 2].im = 0.0;
        for k in m/2 + 1 .. m {
            buffer[k] = bins[m - k].conj();
        }
        self.inverse.process(&mut buffer);
        let scale = 1.0 / m as f32;
        buffer.into_iter().map(|c| c.re * scale).collect()
    }
}
