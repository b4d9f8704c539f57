//! Core type aliases shared across the mncp crates.

use smallvec::SmallVec;

// Re-export the actual DenseND implementation
pub use crate::dense::DenseND;

/// Tensor axis (mode) index. Zero-indexed.
///
/// # Examples
///
/// ```
/// use mncp_core::{Axis, DenseND};
///
/// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
/// let mode: Axis = 1;
/// let unfolded = tensor.unfold(mode).unwrap();
/// assert_eq!(unfolded.shape(), &[3, 8]);
/// ```
pub type Axis = usize;

/// Number of dimensions of a tensor.
pub type Rank = usize;

/// Shape type using SmallVec to avoid heap allocation for common cases.
///
/// Optimized for tensors with up to 6 dimensions. Higher-order tensors
/// spill onto the heap.
///
/// # Examples
///
/// ```
/// use mncp_core::{Mask, Shape};
///
/// let mask = Mask::full(&[2, 3, 4]);
/// let shape: Shape = mask.shape().iter().copied().collect();
/// assert_eq!(&shape[..], &[2, 3, 4]);
/// ```
pub type Shape = SmallVec<[usize; 6]>;

/// Row-major strides for `shape`, in elements.
///
/// # Examples
///
/// ```
/// use mncp_core::types::row_major_strides;
///
/// assert_eq!(&row_major_strides(&[2, 3, 4])[..], &[12, 4, 1]);
/// ```
pub fn row_major_strides(shape: &[usize]) -> Shape {
    let mut strides: Shape = SmallVec::from_elem(1, shape.len());
    for d in (0..shape.len().saturating_sub(1)).rev() {
        strides[d] = strides[d + 1] * shape[d + 1];
    }
    strides
}
