//! Read / write float arrays as raw little-endian binary

use std::fs::File;
use std::io::{Write, Read, BufWriter, BufReader};
use std::path::Path;

use ndarray::{ArrayBase, Array3, Data, Ix3};

use crate::error::{Error, Result};
use crate::types::Intensityf32;

pub fn write(data: impl Iterator<Item = f32>, path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut buf = BufWriter::new(file);
    for datum in data {
        buf.write_all(&datum.to_le_bytes())?;
    }
    buf.flush()
}

type IORes<T> = std::io::Result<T>;
pub fn read<'a>(path: &Path) -> IORes<impl Iterator<Item = IORes<f32>> + 'a> {
    let file = File::open(path)?;
    let mut buf = BufReader::new(file);
    let mut buffer = [0; 4];

    Ok(std::iter::from_fn(move || {
        use std::io::ErrorKind::UnexpectedEof;
        match buf.read_exact(&mut buffer) {
            Ok(()) => Some(Ok(f32::from_le_bytes(buffer))),
            Err(e) if e.kind() == UnexpectedEof => None,
            Err(e) => Some(Err(e)),
        }
    }))
}

/// Read a raw file holding a C-ordered array of the given shape. Fails with
/// `Error::Shape` if the number of values in the file does not match.
pub fn read_array3(path: &Path, shape: (usize, usize, usize)) -> Result<Array3<Intensityf32>> {
    let data: Vec<f32> = read(path)?.collect::<std::result::Result<_, _>>()?;
    let (a, b, c) = shape;
    let n = data.len();
    Array3::from_shape_vec(shape, data)
        .map_err(|_| Error::shape(format!("{} values for shape {shape:?}", a * b * c), &[n]))
}

/// Write the array in C (row-major) order, regardless of its memory layout
pub fn write_array3<S>(path: &Path, array: &ArrayBase<S, Ix3>) -> Result<()>
where
    S: Data<Elem = Intensityf32>,
{
    write(array.iter().copied(), path)?;
    Ok(())
}
