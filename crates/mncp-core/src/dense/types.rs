//! The `DenseND` array type
//!
//! Storage is always row-major, so a linear offset `i` into [`DenseND::to_vec`]
//! names the same entry as offset `i` into a [`Mask`](crate::Mask) of the same
//! shape. Decomposition code relies on that to address observed entries by
//! offset.

use scirs2_core::ndarray_ext::{Array, IxDyn};
use scirs2_core::numeric::Num;

/// Dense N-dimensional array of `f32`/`f64` values
///
/// # Examples
///
/// ```
/// use mncp_core::DenseND;
///
/// let x = DenseND::from_vec((0..24).map(|v| v as f64).collect(), &[2, 3, 4]).unwrap();
/// assert_eq!(x.rank(), 3);
/// assert_eq!(x[&[1, 2, 3]], 23.0);
/// ```
#[derive(Clone, PartialEq)]
pub struct DenseND<T> {
    pub(crate) data: Array<T, IxDyn>,
}

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Wrap row-major `values` with the given shape
    ///
    /// Fails when `values.len()` is not the product of `shape`.
    pub fn from_vec(values: Vec<T>, shape: &[usize]) -> anyhow::Result<Self> {
        let expected: usize = shape.iter().product();
        if values.len() != expected {
            anyhow::bail!(
                "{} values cannot fill shape {:?} ({} entries)",
                values.len(),
                shape,
                expected
            );
        }
        Ok(Self {
            data: Array::from_shape_vec(IxDyn(shape), values)?,
        })
    }

    /// Every entry set to `value`
    pub fn from_elem(shape: &[usize], value: T) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), value),
        }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self::from_elem(shape, T::zero())
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self::from_elem(shape, T::one())
    }

    /// Number of modes
    pub fn rank(&self) -> usize {
        self.data.ndim()
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn shape_vec(&self) -> Vec<usize> {
        self.data.shape().to_vec()
    }

    /// Total number of entries
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy of the entries in row-major order
    pub fn to_vec(&self) -> Vec<T> {
        self.data.iter().cloned().collect()
    }

    /// Entries in row-major order
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}
