use ndarray::ArrayView3;

use crate::types::{Intensityf32, ProjectionStack, Volume};

/// Abstract interface to a linear tomographic operator `A` and its adjoint,
/// supplied by an external tomography library.
///
/// Implementations must be safe for whatever concurrent use the caller makes
/// of them; nothing here synchronizes access.
pub trait Projector {
    type Error: std::error::Error + Send + Sync + 'static;

    /// `A(volume) -> sinogram`
    fn project(&self, volume: ArrayView3<'_, Intensityf32>) -> Result<ProjectionStack, Self::Error>;

    /// `A.T(sinogram) -> volume`
    fn back_project(&self, sino: ArrayView3<'_, Intensityf32>) -> Result<Volume, Self::Error>;
}

impl<P: Projector + ?Sized> Projector for &P {
    type Error = P::Error;

    fn project(&self, volume: ArrayView3<'_, Intensityf32>) -> Result<ProjectionStack, Self::Error> {
        (**self).project(volume)
    }

    fn back_project(&self, sino: ArrayView3<'_, Intensityf32>) -> Result<Volume, Self::Error> {
        (**self).back_project(sino)
    }
}
