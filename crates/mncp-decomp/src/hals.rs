//! HALS column update for a single factor matrix
//!
//! With the other factors fixed, the least-squares subproblem for mode `n`
//! separates into one problem per column. Column `r` of `U` is set to
//!
//! ```text
//! U[:, r] = max((P[:, r] − U·G[:, r] + U[:, r]·G[r, r]) / G[r, r], 0)
//! ```
//!
//! where `G` is the Hadamard product of the other factors' Gram matrices and
//! `P` is the projection of the mode-`n` unfolding onto their Khatri-Rao
//! product. Columns are visited in increasing order and each one sees the
//! already-updated values of the columns before it.

use crate::error::NcpError;
use mncp_kernels::KernelError;
use scirs2_core::ndarray_ext::{Array2, ArrayView2};
use scirs2_core::numeric::Float;

/// Run one in-place HALS pass over the columns of `factor`
///
/// A column whose Gram diagonal is not finite, or is at or below
/// `degenerate_tol` times the largest finite diagonal entry, cannot be solved
/// for: it is set to zero and its index is returned. The remaining columns are
/// still updated. The threshold is relative so the outcome does not depend on
/// the scale of the data.
///
/// # Errors
///
/// [`NcpError::Kernel`] if `grams` is not `R × R` or `projection` does not
/// match the shape of `factor`.
///
/// # Examples
///
/// ```
/// use scirs2_core::ndarray_ext::array;
/// use mncp_decomp::hals_update;
///
/// let mut u = array![[1.0, 1.0], [1.0, 1.0]];
/// let grams = array![[2.0, 0.0], [0.0, 0.0]];
/// let proj = array![[4.0, 1.0], [-2.0, 1.0]];
///
/// let degenerate = hals_update(&mut u, &grams.view(), &proj.view(), 1e-12).unwrap();
/// assert_eq!(degenerate, vec![1]);
/// assert_eq!(u, array![[2.0, 0.0], [0.0, 0.0]]);
/// ```
pub fn hals_update<T>(
    factor: &mut Array2<T>,
    grams: &ArrayView2<T>,
    projection: &ArrayView2<T>,
    degenerate_tol: T,
) -> Result<Vec<usize>, NcpError>
where
    T: Float + 'static,
{
    let (rows, rank) = factor.dim();
    if grams.dim() != (rank, rank) {
        return Err(KernelError::dimension_mismatch(
            "hals_update",
            vec![rank, rank],
            grams.shape().to_vec(),
            "Gram matrix must be rank × rank",
        )
        .into());
    }
    if projection.dim() != (rows, rank) {
        return Err(KernelError::dimension_mismatch(
            "hals_update",
            vec![rows, rank],
            projection.shape().to_vec(),
            "Projection must match the factor shape",
        )
        .into());
    }

    let threshold = degenerate_tol * largest_finite_diagonal(grams);
    let mut degenerate = Vec::new();

    for r in 0..rank {
        let g_rr = grams[[r, r]];
        if !g_rr.is_finite() || g_rr <= threshold {
            factor.column_mut(r).fill(T::zero());
            degenerate.push(r);
            continue;
        }

        let g_col = grams.column(r);
        for i in 0..rows {
            let ug = factor.row(i).dot(&g_col);
            let numerator = projection[[i, r]] - ug + factor[[i, r]] * g_rr;
            let value = numerator / g_rr;
            // NaN fails the comparison and is clamped too
            factor[[i, r]] = if value > T::zero() { value } else { T::zero() };
        }
    }

    Ok(degenerate)
}

fn largest_finite_diagonal<T>(grams: &ArrayView2<T>) -> T
where
    T: Float,
{
    grams
        .diag()
        .iter()
        .filter(|g| g.is_finite())
        .fold(T::zero(), |acc, &g| acc.max(g))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mncp_kernels::gram;
    use scirs2_core::ndarray_ext::array;

    #[test]
    fn test_single_column_is_projected_least_squares() {
        // With R = 1 the update is max(P / G, 0)
        let mut u = array![[5.0], [5.0], [5.0]];
        let grams = array![[4.0]];
        let proj = array![[8.0], [-4.0], [2.0]];
        let degenerate = hals_update(&mut u, &grams.view(), &proj.view(), 1e-12).unwrap();

        assert!(degenerate.is_empty());
        assert_eq!(u, array![[2.0], [0.0], [0.5]]);
    }

    #[test]
    fn test_columns_see_earlier_updates() {
        let mut u = array![[1.0, 1.0]];
        let grams = array![[1.0, 1.0], [1.0, 2.0]];
        let proj = array![[3.0, 5.0]];
        hals_update(&mut u, &grams.view(), &proj.view(), 1e-12).unwrap();

        // Column 0: (3 - (1*1 + 1*1) + 1*1) / 1 = 2
        assert_eq!(u[[0, 0]], 2.0);
        // Column 1 uses the new column 0: (5 - (2*1 + 1*2) + 1*2) / 2 = 1.5
        assert_eq!(u[[0, 1]], 1.5);
    }

    #[test]
    fn test_exact_solution_is_a_fixed_point() {
        // When P = U·G the pass leaves U unchanged
        let k = array![[1.0, 0.5], [2.0, 1.0], [0.0, 3.0], [1.0, 1.0]];
        let g = gram(&k.view());
        let u = array![[1.0, 2.0], [0.5, 0.0], [3.0, 1.0]];
        let proj = u.dot(&g);

        let mut updated = u.clone();
        hals_update(&mut updated, &g.view(), &proj.view(), 1e-12).unwrap();
        for (a, b) in updated.iter().zip(u.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_gram_diagonal_clamps_column() {
        let mut u = array![[1.0, 7.0], [2.0, 7.0]];
        let grams = array![[1.0, 0.0], [0.0, 0.0]];
        let proj = array![[1.0, 1.0], [1.0, 1.0]];
        let degenerate = hals_update(&mut u, &grams.view(), &proj.view(), 1e-12).unwrap();

        assert_eq!(degenerate, vec![1]);
        assert!(u.column(1).iter().all(|&x| x == 0.0));
        assert!(u.iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_guard_is_relative_to_the_largest_diagonal() {
        // Tiny but well-conditioned Grams are solvable
        let mut u = array![[1.0, 1.0]];
        let grams = array![[4e-20, 0.0], [0.0, 2e-20]];
        let proj = array![[8e-20, 2e-20]];
        let degenerate = hals_update(&mut u, &grams.view(), &proj.view(), 1e-12).unwrap();
        assert!(degenerate.is_empty());
        assert!((u[[0, 0]] - 2.0).abs() < 1e-9);
        assert!((u[[0, 1]] - 1.0).abs() < 1e-9);

        // A diagonal far below its neighbour is degenerate
        let mut u = array![[1.0, 1.0]];
        let grams = array![[1e6, 0.0], [0.0, 1e-8]];
        let proj = array![[1e6, 1.0]];
        let degenerate = hals_update(&mut u, &grams.view(), &proj.view(), 1e-12).unwrap();
        assert_eq!(degenerate, vec![1]);
        assert_eq!(u[[0, 1]], 0.0);
    }

    #[test]
    fn test_non_finite_gram_diagonal_is_degenerate() {
        let mut u = array![[1.0]];
        let grams = array![[f64::NAN]];
        let proj = array![[1.0]];
        let degenerate = hals_update(&mut u, &grams.view(), &proj.view(), 1e-12).unwrap();
        assert_eq!(degenerate, vec![0]);
        assert_eq!(u[[0, 0]], 0.0);
    }

    #[test]
    fn test_result_is_nonnegative() {
        let mut u = array![[0.3, 0.1, 2.0], [1.0, 4.0, 0.2]];
        let k = array![[1.0, 0.2, 0.1], [0.5, 1.0, 0.3], [0.1, 0.4, 1.0]];
        let g = gram(&k.view());
        let proj = array![[-1.0, 2.0, -3.0], [0.5, -0.5, 4.0]];
        hals_update(&mut u, &g.view(), &proj.view(), 1e-12).unwrap();
        assert!(u.iter().all(|&x| x >= 0.0));
    }

    #[test]
    fn test_shape_mismatch() {
        let mut u = array![[1.0, 1.0]];
        let grams = array![[1.0]];
        let proj = array![[1.0, 1.0]];
        let err = hals_update(&mut u, &grams.view(), &proj.view(), 1e-12).unwrap_err();
        assert!(matches!(
            err,
            NcpError::Kernel(KernelError::DimensionMismatch { .. })
        ));
    }
}
