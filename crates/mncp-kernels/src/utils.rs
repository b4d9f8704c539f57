//! Norm helpers shared by the optimizer and its tests
//!
//! The masked variants take row-major linear offsets, the same addressing
//! `Mask::observed_indices` in `mncp-core` produces.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::ArrayView2;
use scirs2_core::numeric::Float;

/// Compute the Frobenius norm of a matrix
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use mncp_kernels::frobenius_norm;
///
/// let m = array![[3.0, 0.0], [0.0, 4.0]];
/// assert_eq!(frobenius_norm(&m.view()), 5.0);
/// ```
pub fn frobenius_norm<T>(matrix: &ArrayView2<T>) -> T
where
    T: Float,
{
    let mut sum = T::zero();
    for val in matrix.iter() {
        sum = sum + *val * *val;
    }
    sum.sqrt()
}

/// Frobenius norm of `values` restricted to the given offsets
///
/// # Errors
///
/// [`KernelError::IndexOutOfBounds`] if an offset is past the end of `values`.
///
/// # Examples
///
/// ```
/// use mncp_kernels::frobenius_norm_at;
///
/// let values = [3.0, 100.0, 4.0];
/// assert_eq!(frobenius_norm_at(&values, &[0, 2]).unwrap(), 5.0);
/// ```
pub fn frobenius_norm_at<T>(values: &[T], indices: &[usize]) -> KernelResult<T>
where
    T: Float,
{
    let mut sum = T::zero();
    for &i in indices {
        let v = *values
            .get(i)
            .ok_or_else(|| KernelError::index_out_of_bounds("frobenius_norm_at", i, values.len()))?;
        sum = sum + v * v;
    }
    Ok(sum.sqrt())
}

/// Frobenius norm of `a - b` restricted to the given offsets
///
/// # Errors
///
/// - [`KernelError::DimensionMismatch`] if `a` and `b` differ in length
/// - [`KernelError::IndexOutOfBounds`] if an offset is past the end
pub fn residual_norm_at<T>(a: &[T], b: &[T], indices: &[usize]) -> KernelResult<T>
where
    T: Float,
{
    if a.len() != b.len() {
        return Err(KernelError::dimension_mismatch(
            "residual_norm_at",
            vec![a.len()],
            vec![b.len()],
            "Operands must hold the same number of entries",
        ));
    }

    let mut sum = T::zero();
    for &i in indices {
        if i >= a.len() {
            return Err(KernelError::index_out_of_bounds("residual_norm_at", i, a.len()));
        }
        let d = a[i] - b[i];
        sum = sum + d * d;
    }
    Ok(sum.sqrt())
}
