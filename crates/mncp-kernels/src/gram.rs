//! Gram matrices and their Hadamard products
//!
//! For a factor matrix `U` (I × R) the Gram matrix is `UᵀU` (R × R). CP
//! solvers need, for each mode `n`, the element-wise product of the Gram
//! matrices of every other factor:
//!
//! ```text
//! G⁽ⁿ⁾ = (U₀ᵀU₀) ⊙ … ⊙ (Uₙ₋₁ᵀUₙ₋₁) ⊙ (Uₙ₊₁ᵀUₙ₊₁) ⊙ … ⊙ (U_{N-1}ᵀU_{N-1})
//! ```
//!
//! which equals `KᵀK` for `K = ⊙_{j≠n} Uⱼ` without forming `K`.

use crate::error::{KernelError, KernelResult};
use scirs2_core::ndarray_ext::{Array2, ArrayView2, Zip};
use scirs2_core::numeric::Float;

/// Compute the Gram matrix `FᵀF`
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use mncp_kernels::gram;
///
/// let factor = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
/// let g = gram(&factor.view());
/// assert_eq!(g[[0, 0]], 35.0);
/// assert_eq!(g[[0, 1]], 44.0);
/// assert_eq!(g[[1, 1]], 56.0);
/// ```
pub fn gram<T>(factor: &ArrayView2<T>) -> Array2<T>
where
    T: Float + 'static,
{
    factor.t().dot(factor)
}

/// Hadamard product of the Gram matrices of every factor except `skip_mode`
///
/// Returns an all-ones `R × R` matrix when `factors` holds only the skipped
/// mode. Pass `skip_mode >= factors.len()` to skip nothing.
///
/// # Errors
///
/// [`KernelError::EmptyInput`] if `factors` is empty and
/// [`KernelError::RankMismatch`] if the column counts differ.
pub fn gram_hadamard<T>(factors: &[Array2<T>], skip_mode: usize) -> KernelResult<Array2<T>>
where
    T: Float + 'static,
{
    let first = factors
        .first()
        .ok_or_else(|| KernelError::empty_input("gram_hadamard", "factors"))?;
    let rank = first.ncols();
    let mut out = Array2::<T>::zeros((rank, rank));
    gram_hadamard_into(factors, skip_mode, &mut out)?;
    Ok(out)
}

/// [`gram_hadamard`] written into a caller-owned `R × R` buffer
///
/// # Errors
///
/// [`KernelError::RankMismatch`] if a factor's column count differs from the
/// side of `out`.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::{array, Array2};
/// use mncp_kernels::{gram, gram_hadamard_into};
///
/// let a = array![[1.0, 0.0], [1.0, 1.0]];
/// let b = array![[2.0, 1.0], [0.0, 1.0], [1.0, 1.0]];
/// let c = array![[3.0, 3.0]];
///
/// let mut out = Array2::<f64>::zeros((2, 2));
/// gram_hadamard_into(&[a.clone(), b.clone(), c], 2, &mut out).unwrap();
/// assert_eq!(out, &gram(&a.view()) * &gram(&b.view()));
/// ```
pub fn gram_hadamard_into<T>(
    factors: &[Array2<T>],
    skip_mode: usize,
    out: &mut Array2<T>,
) -> KernelResult<()>
where
    T: Float + 'static,
{
    let rank = out.nrows();
    if out.ncols() != rank {
        return Err(KernelError::dimension_mismatch(
            "gram_hadamard_into",
            vec![rank, rank],
            out.shape().to_vec(),
            "Output buffer must be square",
        ));
    }
    for (i, factor) in factors.iter().enumerate() {
        if factor.ncols() != rank {
            return Err(KernelError::rank_mismatch(
                "gram_hadamard_into",
                rank,
                factor.ncols(),
                i,
            ));
        }
    }

    out.fill(T::one());
    for (i, factor) in factors.iter().enumerate() {
        if i == skip_mode {
            continue;
        }

        let factor_gram = gram(&factor.view());
        Zip::from(&mut *out)
            .and(&factor_gram)
            .for_each(|o, &g| *o = *o * g);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::khatri_rao_list;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_gram_matrix() {
        let factor = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let g = gram(&factor.view());

        assert_eq!(g.shape(), &[2, 2]);
        // Gram[0,0] = 1² + 3² + 5² = 35
        assert!((g[[0, 0]] - 35.0).abs() < 1e-10);
        // Gram[1,1] = 2² + 4² + 6² = 56
        assert!((g[[1, 1]] - 56.0).abs() < 1e-10);
        assert_eq!(g[[0, 1]], g[[1, 0]]);
    }

    #[test]
    fn test_gram_hadamard_equals_gram_of_khatri_rao() {
        let factors = vec![
            array![[1.0, 2.0, 0.5], [0.0, 1.0, 2.0]],
            array![[3.0, 1.0, 1.0], [1.0, 0.0, 2.0], [2.0, 2.0, 0.0]],
            array![[0.5, 1.5, 1.0], [2.0, 1.0, 3.0]],
            array![[1.0, 1.0, 1.0], [4.0, 0.5, 0.25]],
        ];

        for skip in 0..factors.len() {
            let others: Vec<_> = factors
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != skip)
                .map(|(_, f)| f.view())
                .collect();
            let kr = khatri_rao_list(&others).unwrap();
            let expected = gram(&kr.view());
            let actual = gram_hadamard(&factors, skip).unwrap();

            for (a, e) in actual.iter().zip(expected.iter()) {
                assert!((a - e).abs() < 1e-9, "skip {}: {} vs {}", skip, a, e);
            }
        }
    }

    #[test]
    fn test_gram_hadamard_rejects_bad_factor_lists() {
        let empty: Vec<Array2<f64>> = Vec::new();
        assert!(matches!(
            gram_hadamard(&empty, 0),
            Err(KernelError::EmptyInput { .. })
        ));

        let factors = vec![Array2::<f64>::ones((2, 2)), Array2::ones((3, 3))];
        assert!(matches!(
            gram_hadamard(&factors, 2),
            Err(KernelError::RankMismatch { .. })
        ));
    }

    #[test]
    fn test_gram_hadamard_into_resets_buffer() {
        let factors = vec![array![[1.0], [1.0]], array![[2.0], [0.0]]];
        let mut out = Array2::from_elem((1, 1), 100.0);
        gram_hadamard_into(&factors, 0, &mut out).unwrap();
        assert_eq!(out[[0, 0]], 4.0);
        gram_hadamard_into(&factors, 1, &mut out).unwrap();
        assert_eq!(out[[0, 0]], 2.0);
    }

    #[test]
    fn test_gram_hadamard_into_rank_mismatch() {
        let factors = vec![array![[1.0, 2.0]], array![[2.0]]];
        let mut out = Array2::<f64>::zeros((2, 2));
        let err = gram_hadamard_into(&factors, 0, &mut out).unwrap_err();
        assert_eq!(err, KernelError::rank_mismatch("gram_hadamard_into", 2, 1, 1));
    }
}
