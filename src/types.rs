use ndarray::{Array2, Array3};

pub type Intensityf32 = f32;

/// One reconstructed slice of one split
pub type Slice = Array2<Intensityf32>;

/// `(num_slices, num_angles, num_pixels)` projection data
pub type ProjectionStack = Array3<Intensityf32>;

/// `(num_slices, rows, columns)` reconstructed volume
pub type Volume = Array3<Intensityf32>;

/// An `(input, target)` training example
pub type Pair = (Slice, Slice);

/// Index of a split within an acquisition
pub type SplitIndex = usize;

/// Position in the flat `(slice, split)` index space
pub type FlatIndex = usize;

pub const PI: f64 = std::f64::consts::PI;
