//! Khatri-Rao product (column-wise Kronecker product)
//!
//! For matrices A (I × K) and B (J × K), the Khatri-Rao product C = A ⊙ B has
//! size (I*J × K) where each column k of C is the Kronecker product of column
//! k of A and column k of B. Chains `A₁ ⊙ A₂ ⊙ … ⊙ Aₘ` associate left to
//! right, so the first matrix's row index varies slowest.
//!
//! # SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext`.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array2, ArrayView2};
use scirs2_core::numeric::Num;

/// Compute the Khatri-Rao product (column-wise Kronecker product) of two matrices
///
/// # Panics
///
/// Panics if the number of columns in A and B don't match
///
/// # Complexity
///
/// Time: O(I * J * K)
/// Space: O(I * J * K)
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use mncp_kernels::khatri_rao;
///
/// let a = array![[1.0, 2.0], [3.0, 4.0]];  // 2×2
/// let b = array![[5.0, 6.0], [7.0, 8.0]];  // 2×2
/// let c = khatri_rao(&a.view(), &b.view());  // 4×2
/// assert_eq!(c.shape(), &[4, 2]);
///
/// // First column: [1*5, 1*7, 3*5, 3*7] = [5, 7, 15, 21]
/// assert_eq!(c[[0, 0]], 5.0);
/// assert_eq!(c[[1, 0]], 7.0);
/// assert_eq!(c[[2, 0]], 15.0);
/// assert_eq!(c[[3, 0]], 21.0);
/// ```
pub fn khatri_rao<T>(a: &ArrayView2<T>, b: &ArrayView2<T>) -> Array2<T>
where
    T: Clone + Num,
{
    let (i, k1) = (a.shape()[0], a.shape()[1]);
    let (j, k2) = (b.shape()[0], b.shape()[1]);

    assert_eq!(
        k1, k2,
        "Number of columns must match: A has {} columns, B has {} columns",
        k1, k2
    );

    let k = k1;
    let mut result = Array2::<T>::zeros((i * j, k));

    for col_idx in 0..k {
        let a_col = a.column(col_idx);
        let b_col = b.column(col_idx);

        for (row_a_idx, a_val) in a_col.iter().enumerate() {
            for (row_b_idx, b_val) in b_col.iter().enumerate() {
                let result_row = row_a_idx * j + row_b_idx;
                result[[result_row, col_idx]] = a_val.clone() * b_val.clone();
            }
        }
    }

    result
}

/// Khatri-Rao product of a list of matrices, `M₀ ⊙ M₁ ⊙ … ⊙ Mₘ₋₁`
///
/// # Errors
///
/// - [`KernelError::EmptyInput`] if fewer than two matrices are given
/// - [`KernelError::RankMismatch`] if the column counts differ
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use mncp_kernels::{khatri_rao, khatri_rao_list};
///
/// let a = array![[1.0, 2.0], [3.0, 4.0]];
/// let b = array![[5.0, 6.0], [7.0, 8.0], [9.0, 10.0]];
/// let c = array![[0.5, 1.0], [2.0, 0.0]];
///
/// let kr = khatri_rao_list(&[a.view(), b.view(), c.view()]).unwrap();
/// assert_eq!(kr.shape(), &[12, 2]);
///
/// let pairwise = khatri_rao(&khatri_rao(&a.view(), &b.view()).view(), &c.view());
/// assert_eq!(kr, pairwise);
/// ```
pub fn khatri_rao_list<T>(matrices: &[ArrayView2<T>]) -> KernelResult<Array2<T>>
where
    T: Clone + Num,
{
    let (rows, rank) = check_khatri_rao_inputs("khatri_rao_list", matrices)?;
    let mut result = Array2::<T>::zeros((rows, rank));
    fill_khatri_rao(matrices, &mut result);
    Ok(result)
}

/// Khatri-Rao product of a list of matrices written into a pre-allocated buffer
///
/// `out` must have shape `(Π rows(Mᵢ), K)`. Every entry of `out` is overwritten.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::{array, Array2};
/// use mncp_kernels::{khatri_rao_list, khatri_rao_list_into};
///
/// let a = array![[1.0], [2.0]];
/// let b = array![[3.0], [4.0]];
/// let mut out = Array2::<f64>::zeros((4, 1));
/// khatri_rao_list_into(&[a.view(), b.view()], &mut out).unwrap();
/// assert_eq!(out, khatri_rao_list(&[a.view(), b.view()]).unwrap());
/// ```
pub fn khatri_rao_list_into<T>(matrices: &[ArrayView2<T>], out: &mut Array2<T>) -> KernelResult<()>
where
    T: Clone + Num,
{
    let (rows, rank) = check_khatri_rao_inputs("khatri_rao_list_into", matrices)?;
    if out.dim() != (rows, rank) {
        return Err(KernelError::dimension_mismatch(
            "khatri_rao_list_into",
            vec![rows, rank],
            out.shape().to_vec(),
            "Output buffer has the wrong shape",
        ));
    }
    fill_khatri_rao(matrices, out);
    Ok(())
}

fn check_khatri_rao_inputs<T>(
    operation: &str,
    matrices: &[ArrayView2<T>],
) -> KernelResult<(usize, usize)> {
    if matrices.len() < 2 {
        return Err(KernelError::empty_input(operation, "matrices (need at least 2)"));
    }

    let rank = matrices[0].ncols();
    for (idx, m) in matrices.iter().enumerate().skip(1) {
        if m.ncols() != rank {
            return Err(KernelError::rank_mismatch(operation, rank, m.ncols(), idx));
        }
    }

    let rows = matrices.iter().map(|m| m.nrows()).product();
    Ok((rows, rank))
}

/// Column-by-column expansion. After processing `Mⱼ`, the leading
/// `Π_{i≤j} rows(Mᵢ)` entries of the column hold `(M₀ ⊙ … ⊙ Mⱼ)[:, r]`.
fn fill_khatri_rao<T>(matrices: &[ArrayView2<T>], out: &mut Array2<T>)
where
    T: Clone + Num,
{
    let rank = out.ncols();
    for r in 0..rank {
        let mut col = out.column_mut(r);
        if col.is_empty() {
            continue;
        }
        col[0] = T::one();
        let mut len = 1;

        for m in matrices {
            let m_rows = m.nrows();
            // Walk backwards so unread prefix entries are never clobbered
            for a in (0..len).rev() {
                let v = col[a].clone();
                for b in 0..m_rows {
                    col[a * m_rows + b] = v.clone() * m[[b, r]].clone();
                }
            }
            len *= m_rows;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_khatri_rao_basic() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[5.0, 6.0], [7.0, 8.0]];
        let c = khatri_rao(&a.view(), &b.view());

        assert_eq!(c.shape(), &[4, 2]);

        // First column: [1*5, 1*7, 3*5, 3*7] = [5, 7, 15, 21]
        assert_eq!(c[[0, 0]], 5.0);
        assert_eq!(c[[1, 0]], 7.0);
        assert_eq!(c[[2, 0]], 15.0);
        assert_eq!(c[[3, 0]], 21.0);

        // Second column: [2*6, 2*8, 4*6, 4*8] = [12, 16, 24, 32]
        assert_eq!(c[[0, 1]], 12.0);
        assert_eq!(c[[1, 1]], 16.0);
        assert_eq!(c[[2, 1]], 24.0);
        assert_eq!(c[[3, 1]], 32.0);
    }

    #[test]
    fn test_khatri_rao_matches_reference_values() {
        // A 2×3, B 3×3
        let a = array![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let b = array![[1.0, 4.0, 7.0], [2.0, 5.0, 8.0], [3.0, 6.0, 9.0]];
        let c = khatri_rao(&a.view(), &b.view());

        let expected = array![
            [1.0, 8.0, 21.0],
            [2.0, 10.0, 24.0],
            [3.0, 12.0, 27.0],
            [4.0, 20.0, 42.0],
            [8.0, 25.0, 48.0],
            [12.0, 30.0, 54.0]
        ];
        assert_eq!(c, expected);
    }

    #[test]
    #[should_panic(expected = "Number of columns must match")]
    fn test_khatri_rao_mismatched_columns() {
        let a = array![[1.0, 2.0, 3.0]];
        let b = array![[4.0, 5.0]];
        khatri_rao(&a.view(), &b.view());
    }

    #[test]
    fn test_khatri_rao_list_three_factors() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[5.0, 6.0], [7.0, 8.0], [9.0, 10.0]];
        let c = array![[2.0, 1.0], [0.5, 3.0]];
        let kr = khatri_rao_list(&[a.view(), b.view(), c.view()]).unwrap();

        assert_eq!(kr.shape(), &[12, 2]);
        for ia in 0..2 {
            for ib in 0..3 {
                for ic in 0..2 {
                    let row = (ia * 3 + ib) * 2 + ic;
                    for r in 0..2 {
                        let expected = a[[ia, r]] * b[[ib, r]] * c[[ic, r]];
                        assert_eq!(kr[[row, r]], expected);
                    }
                }
            }
        }
    }

    #[test]
    fn test_khatri_rao_list_requires_two() {
        let a = array![[1.0, 2.0]];
        let err = khatri_rao_list(&[a.view()]).unwrap_err();
        assert!(matches!(err, KernelError::EmptyInput { .. }));

        let none: [ArrayView2<f64>; 0] = [];
        assert!(khatri_rao_list(&none).is_err());
    }

    #[test]
    fn test_khatri_rao_list_rank_mismatch() {
        let a = array![[1.0, 2.0]];
        let b = array![[1.0, 2.0]];
        let c = array![[1.0, 2.0, 3.0]];
        let err = khatri_rao_list(&[a.view(), b.view(), c.view()]).unwrap_err();
        assert_eq!(err, KernelError::rank_mismatch("khatri_rao_list", 2, 3, 2));
    }

    #[test]
    fn test_khatri_rao_list_into_overwrites_buffer() {
        let a = array![[1.0, 2.0], [3.0, 4.0]];
        let b = array![[5.0, 6.0], [7.0, 8.0]];
        let mut out = Array2::from_elem((4, 2), f64::NAN);
        khatri_rao_list_into(&[a.view(), b.view()], &mut out).unwrap();
        assert_eq!(out, khatri_rao(&a.view(), &b.view()));
    }

    #[test]
    fn test_khatri_rao_list_into_wrong_shape() {
        let a = array![[1.0], [2.0]];
        let b = array![[3.0], [4.0]];
        let mut out = Array2::<f64>::zeros((3, 1));
        let err = khatri_rao_list_into(&[a.view(), b.view()], &mut out).unwrap_err();
        assert!(matches!(err, KernelError::DimensionMismatch { .. }));
    }
}
