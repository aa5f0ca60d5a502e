//! Python access to ramp filtering and split pairing, so that a Python
//! training loop can use the pairs as a dataset.
//!
//! Arrays cross the boundary as flat, C-ordered lists of floats plus a shape.

use ndarray::Array3;
use pyo3::prelude::*;
use pyo3::exceptions::{PyIndexError, PyValueError};
use pyo3::wrap_pyfunction;

use noise2inverse::{Error, Strategy, ramp};

fn to_py_err(e: Error) -> PyErr {
    match e {
        Error::Index { .. } => PyIndexError::new_err(e.to_string()),
        other               => PyValueError::new_err(other.to_string()),
    }
}

fn array3(data: Vec<f32>, shape: (usize, usize, usize)) -> PyResult<Array3<f32>> {
    let n = data.len();
    Array3::from_shape_vec(shape, data)
        .map_err(|_| PyValueError::new_err(format!("{n} values do not fit shape {shape:?}")))
}

#[pyfunction]
#[pyo3(text_signature = "(n, /)")]
/// Taps of the spatial Ram-Lak kernel of length n
fn ramp_kernel(n: usize) -> Vec<f64> {
    ramp::build_kernel(n).to_vec()
}

#[pyfunction]
#[pyo3(text_signature = "(num_pixels, /)")]
/// Zero padding added to projections of num_pixels pixels before filtering
fn pad_size(num_pixels: usize) -> usize {
    ramp::pad_size(num_pixels)
}

#[pyfunction]
#[pyo3(text_signature = "(data, shape, /)")]
/// Ramp-filter a flattened (slices, angles, pixels) sinogram
fn filter_sinogram(data: Vec<f32>, shape: (usize, usize, usize)) -> PyResult<Vec<f32>> {
    let sino = array3(data, shape)?;
    let filtered = ramp::apply(&sino).map_err(to_py_err)?;
    Ok(filtered.iter().copied().collect())
}

#[pyclass(name = "SplitPairs")]
/// Indexable (input, target) training pairs made from N reconstructed splits
struct SplitPairs {
    inner: noise2inverse::SplitPairs<Array3<f32>>,
    slice_len: usize,
}

#[pymethods]
impl SplitPairs {

    #[new]
    #[pyo3(signature = (splits, shape, strategy = "X:1"))]
    fn new(splits: Vec<Vec<f32>>, shape: (usize, usize, usize), strategy: &str) -> PyResult<Self> {
        let strategy: Strategy = strategy.parse().map_err(to_py_err)?;
        let volumes = splits.into_iter()
            .map(|data| array3(data, shape))
            .collect::<PyResult<Vec<_>>>()?;
        let inner = noise2inverse::SplitPairs::new(volumes, strategy).map_err(to_py_err)?;
        Ok(Self { inner, slice_len: shape.1 * shape.2 })
    }

    fn __len__(&self) -> usize { self.inner.len() }

    /// Flattened (input, target) slices; negative indices count from the end
    fn __getitem__(&self, i: isize) -> PyResult<(Vec<f32>, Vec<f32>)> {
        let len = self.inner.len();
        let index = if i < 0 { i + len as isize } else { i };
        if index < 0 {
            return Err(PyIndexError::new_err(format!("index {i} out of range for length {len}")));
        }
        let (input, target) = self.inner.get(index as usize).map_err(to_py_err)?;
        Ok((input.iter().copied().collect(), target.iter().copied().collect()))
    }

    #[getter]
    fn num_splits(&self) -> usize { self.inner.num_splits() }

    #[getter]
    fn num_slices(&self) -> usize { self.inner.num_slices() }

    /// Number of values in one flattened slice
    #[getter]
    fn slice_len(&self) -> usize { self.slice_len }

    #[getter]
    fn input_idxs(&self) -> Vec<Vec<usize>> {
        self.inner.input_idxs().iter().map(|s| s.iter().collect()).collect()
    }

    #[getter]
    fn target_idxs(&self) -> Vec<Vec<usize>> {
        self.inner.target_idxs().iter().map(|s| s.iter().collect()).collect()
    }
}

#[pymodule]
/// Noise2Inverse core: Ram-Lak filtering and split pairing
fn n2i(_py_gil: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ramp_kernel, m)?)?;
    m.add_function(wrap_pyfunction!(pad_size, m)?)?;
    m.add_function(wrap_pyfunction!(filter_sinogram, m)?)?;
    m.add_class::<SplitPairs>()?;
    Ok(())
}
