//! Self-supervised denoising of tomographic reconstructions: pairing
//! independent splits of an acquisition into training examples, and ramp
//! filtering projection data for filtered back-projection.

mod exports;
pub use exports::*;

pub mod error;
pub mod types;
pub mod index;
pub mod combinations;
pub mod strategy;
pub mod splits;
pub mod supervised;
pub mod sinogram;
pub mod ramp;
pub mod projector;
pub mod io;
pub mod config;
pub mod utils;
