//! Integration tests for mncp-kernels with mncp-core
//!
//! These tests check that the kernels line up with `DenseND` unfoldings and
//! `Mask` offsets, which is what the HALS sweep relies on.

use mncp_core::{DenseND, Mask};
use mncp_kernels::{
    frobenius_norm, frobenius_norm_at, gram, gram_hadamard, khatri_rao_list, residual_norm_at,
};
use scirs2_core::ndarray_ext::{array, Array2};

/// Rank-2 tensor Σᵣ a[:,r] ∘ b[:,r] ∘ c[:,r] built entry by entry
fn cp_tensor(a: &Array2<f64>, b: &Array2<f64>, c: &Array2<f64>) -> DenseND<f64> {
    let shape = [a.nrows(), b.nrows(), c.nrows()];
    let mut tensor = DenseND::<f64>::zeros(&shape);
    for i in 0..shape[0] {
        for j in 0..shape[1] {
            for k in 0..shape[2] {
                tensor[&[i, j, k]] = (0..a.ncols())
                    .map(|r| a[[i, r]] * b[[j, r]] * c[[k, r]])
                    .sum();
            }
        }
    }
    tensor
}

#[test]
fn test_unfolding_equals_factor_times_khatri_rao() {
    let a = array![[1.0, 2.0], [0.5, 0.0]];
    let b = array![[1.0, 1.0], [2.0, 0.5], [0.0, 3.0]];
    let c = array![[1.0, 0.0], [0.0, 1.0], [2.0, 2.0], [1.0, 0.5]];
    let factors = [a.clone(), b.clone(), c.clone()];
    let tensor = cp_tensor(&a, &b, &c);

    for mode in 0..3 {
        let others: Vec<_> = factors
            .iter()
            .enumerate()
            .filter(|&(j, _)| j != mode)
            .map(|(_, f)| f.view())
            .collect();
        let kr = khatri_rao_list(&others).unwrap();
        let expected = factors[mode].dot(&kr.t());
        let unfolded = tensor.unfold(mode).unwrap();
        assert_eq!(unfolded.shape(), expected.shape());
        for (x, y) in unfolded.iter().zip(expected.iter()) {
            assert!((x - y).abs() < 1e-12, "mode {}: {} vs {}", mode, x, y);
        }
    }
}

#[test]
fn test_squared_norm_from_grams() {
    let a = array![[1.0, 2.0], [3.0, 0.5]];
    let b = array![[0.5, 1.0], [1.0, 1.0], [2.0, 0.0]];
    let c = array![[1.0, 4.0], [0.0, 1.0]];
    let tensor = cp_tensor(&a, &b, &c);

    // ‖X‖² = Σ (AᵀA ⊙ BᵀB ⊙ CᵀC), i.e. nothing skipped
    let grams = gram_hadamard(&[a.clone(), b, c], 3).unwrap();
    let expected = tensor.frobenius_norm().powi(2);
    assert!((grams.sum() - expected).abs() < 1e-9 * expected);

    let ga = gram(&a.view());
    assert_eq!(ga[[0, 1]], ga[[1, 0]]);
}

#[test]
fn test_masked_norms_use_mask_offsets() {
    let tensor = DenseND::<f64>::from_vec((0..24).map(|x| x as f64).collect(), &[2, 3, 4]).unwrap();
    let other = DenseND::<f64>::zeros(&[2, 3, 4]);
    let mask = Mask::from_fn(tensor.shape(), |idx| idx[2] == 0);
    let observed = mask.observed_indices();

    let values = tensor.as_slice_checked().unwrap();
    let expected: f64 = [0.0, 4.0, 8.0, 12.0, 16.0, 20.0]
        .iter()
        .map(|x: &f64| x * x)
        .sum::<f64>()
        .sqrt();
    assert!((frobenius_norm_at(values, &observed).unwrap() - expected).abs() < 1e-12);

    let residual =
        residual_norm_at(values, other.as_slice_checked().unwrap(), &observed).unwrap();
    assert!((residual - expected).abs() < 1e-12);

    let all = mask.inverted().observed_indices();
    let full_sq = frobenius_norm_at(values, &observed).unwrap().powi(2)
        + frobenius_norm_at(values, &all).unwrap().powi(2);
    assert!((full_sq.sqrt() - tensor.frobenius_norm()).abs() < 1e-9);

    let matrix = tensor.unfold(0).unwrap();
    assert!((frobenius_norm(&matrix.view()) - tensor.frobenius_norm()).abs() < 1e-9);
}
