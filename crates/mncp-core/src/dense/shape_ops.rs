//! Shape manipulation: reshape, permute and matricization (unfold/fold)

use super::types::DenseND;
use scirs2_core::ndarray_ext::{Array2, Ix2, IxDyn};
use scirs2_core::numeric::Num;

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Reshape the tensor to a new shape, reading elements in row-major order
    ///
    /// # Examples
    ///
    /// ```
    /// use mncp_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let reshaped = tensor.reshape(&[6, 4]).unwrap();
    /// assert_eq!(reshaped.shape(), &[6, 4]);
    /// ```
    pub fn reshape(&self, new_shape: &[usize]) -> anyhow::Result<Self> {
        let new_size: usize = new_shape.iter().product();
        let old_size = self.len();
        if new_size != old_size {
            anyhow::bail!(
                "Cannot reshape tensor of size {} into shape {:?} (size {})",
                old_size,
                new_shape,
                new_size
            );
        }
        if let Ok(reshaped) = self.data.view().into_shape_with_order(IxDyn(new_shape)) {
            Ok(Self {
                data: reshaped.to_owned(),
            })
        } else {
            let flat: Vec<T> = self.data.iter().cloned().collect();
            Self::from_vec(flat, new_shape)
        }
    }

    /// Permute (transpose) the axes of the tensor.
    ///
    /// # Errors
    ///
    /// Returns an error if `axes` is not a permutation of `0..rank`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mncp_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::zeros(&[2, 3, 4]);
    /// let permuted = tensor.permute(&[2, 0, 1]).unwrap();
    /// assert_eq!(permuted.shape(), &[4, 2, 3]);
    /// ```
    pub fn permute(&self, axes: &[usize]) -> anyhow::Result<Self> {
        if axes.len() != self.rank() {
            anyhow::bail!(
                "Permutation axes length {} does not match tensor rank {}",
                axes.len(),
                self.rank()
            );
        }
        let mut seen = vec![false; self.rank()];
        for &axis in axes {
            if axis >= self.rank() {
                anyhow::bail!("Invalid axis {} for rank {}", axis, self.rank());
            }
            if seen[axis] {
                anyhow::bail!("Duplicate axis {} in permutation", axis);
            }
            seen[axis] = true;
        }
        let permuted = self.data.clone().permuted_axes(IxDyn(axes));
        Ok(Self { data: permuted })
    }

    /// Unfold (matricize) the tensor along a specific mode.
    ///
    /// Row `i` of the result holds every entry whose `mode` index is `i`.
    /// Columns enumerate the remaining modes in increasing mode order,
    /// row-major (the last remaining mode varies fastest).
    ///
    /// # Errors
    ///
    /// Returns an error if mode is out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use mncp_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::from_vec((0..24).map(|x| x as f64).collect(), &[2, 3, 4]).unwrap();
    ///
    /// let unfolded = tensor.unfold(1).unwrap();
    /// assert_eq!(unfolded.shape(), &[3, 8]);
    /// // column 5 <-> (i0, i2) = (1, 1)
    /// assert_eq!(unfolded[[2, 5]], tensor[&[1, 2, 1]]);
    /// ```
    pub fn unfold(&self, mode: usize) -> anyhow::Result<Array2<T>> {
        if mode >= self.rank() {
            anyhow::bail!("Mode {} out of bounds for rank {}", mode, self.rank());
        }

        let shape = self.shape();
        let rows = shape[mode];
        let cols: usize = shape
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != mode)
            .map(|(_, &s)| s)
            .product();

        // Permute so that mode becomes the first axis
        let mut perm: Vec<usize> = vec![mode];
        perm.extend((0..mode).chain((mode + 1)..self.rank()));

        let permuted = self.permute(&perm)?;
        let reshaped = permuted.reshape(&[rows, cols])?;

        reshaped
            .data
            .into_dimensionality::<Ix2>()
            .map_err(|e| anyhow::anyhow!("Failed to convert to 2D: {}", e))
    }

    /// Fold (tensorize) a matrix back into a tensor.
    ///
    /// Inverse of [`unfold`](Self::unfold): `fold(unfold(x, n), shape, n) == x`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mncp_core::dense::DenseND;
    /// use scirs2_core::ndarray_ext::Array2;
    ///
    /// let matrix: Array2<f64> = Array2::zeros((2, 6));
    /// let tensor = DenseND::fold(&matrix, &[2, 3, 2], 0).unwrap();
    /// assert_eq!(tensor.shape(), &[2, 3, 2]);
    /// ```
    pub fn fold(matrix: &Array2<T>, shape: &[usize], mode: usize) -> anyhow::Result<Self> {
        if mode >= shape.len() {
            anyhow::bail!("Mode {} out of bounds for target shape {:?}", mode, shape);
        }

        let expected_rows = shape[mode];
        let expected_cols: usize = shape
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != mode)
            .map(|(_, &s)| s)
            .product();

        if matrix.shape()[0] != expected_rows || matrix.shape()[1] != expected_cols {
            anyhow::bail!(
                "Matrix shape {:?} incompatible with target shape {:?} at mode {}",
                matrix.shape(),
                shape,
                mode
            );
        }

        let mut intermediate_shape = vec![shape[mode]];
        intermediate_shape.extend(
            shape
                .iter()
                .enumerate()
                .filter(|&(i, _)| i != mode)
                .map(|(_, &s)| s),
        );

        let flat: Vec<T> = matrix.iter().cloned().collect();
        let intermediate = Self::from_vec(flat, &intermediate_shape)?;

        // Axis `mode` came first; the others keep their relative order
        let mut inverse_perm = vec![0; shape.len()];
        let mut idx = 1;
        for (i, perm_val) in inverse_perm.iter_mut().enumerate() {
            if i != mode {
                *perm_val = idx;
                idx += 1;
            }
        }

        let permuted = intermediate.permute(&inverse_perm)?;
        // Materialize in row-major order
        permuted.reshape(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iota(shape: &[usize]) -> DenseND<f64> {
        let n: usize = shape.iter().product();
        DenseND::from_vec((0..n).map(|x| x as f64).collect(), shape).unwrap()
    }

    #[test]
    fn test_unfold_mode0_is_row_major_reshape() {
        let tensor = iota(&[2, 3, 4]);
        let unfolded = tensor.unfold(0).unwrap();
        assert_eq!(unfolded.shape(), &[2, 12]);
        let flat: Vec<f64> = unfolded.iter().cloned().collect();
        assert_eq!(flat, tensor.to_vec());
    }

    #[test]
    fn test_unfold_column_order() {
        let tensor = iota(&[2, 3, 4]);

        // Mode 2: columns enumerate (i0, i1) with i1 fastest
        let unfolded = tensor.unfold(2).unwrap();
        assert_eq!(unfolded.shape(), &[4, 6]);
        for i0 in 0..2 {
            for i1 in 0..3 {
                for i2 in 0..4 {
                    assert_eq!(unfolded[[i2, i0 * 3 + i1]], tensor[&[i0, i1, i2]]);
                }
            }
        }

        // Mode 1: columns enumerate (i0, i2) with i2 fastest
        let unfolded = tensor.unfold(1).unwrap();
        for i0 in 0..2 {
            for i1 in 0..3 {
                for i2 in 0..4 {
                    assert_eq!(unfolded[[i1, i0 * 4 + i2]], tensor[&[i0, i1, i2]]);
                }
            }
        }
    }

    #[test]
    fn test_fold_inverts_unfold() {
        let tensor = iota(&[3, 2, 4, 2]);
        for mode in 0..4 {
            let unfolded = tensor.unfold(mode).unwrap();
            let folded = DenseND::fold(&unfolded, tensor.shape(), mode).unwrap();
            assert_eq!(folded, tensor);
            assert!(folded.as_slice_checked().is_ok());
        }
    }

    #[test]
    fn test_unfold_invalid_mode() {
        let tensor = iota(&[2, 3, 4]);
        assert!(tensor.unfold(3).is_err());
    }

    #[test]
    fn test_fold_shape_mismatch() {
        let matrix: Array2<f64> = Array2::zeros((3, 5));
        assert!(DenseND::fold(&matrix, &[3, 2, 2], 0).is_err());
        assert!(DenseND::fold(&matrix, &[3, 5], 2).is_err());
    }

    #[test]
    fn test_permute_rejects_bad_axes() {
        let tensor = iota(&[2, 3]);
        assert!(tensor.permute(&[0]).is_err());
        assert!(tensor.permute(&[0, 0]).is_err());
        assert!(tensor.permute(&[0, 2]).is_err());
    }
}
