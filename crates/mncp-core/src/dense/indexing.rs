//! Flat row-major slice access

use super::types::DenseND;
use scirs2_core::numeric::Num;

impl<T> DenseND<T>
where
    T: Clone + Num,
{
    /// Try to get the underlying data as a row-major slice
    ///
    /// # Returns
    ///
    /// - `Some(&[T])` if the tensor is contiguous in memory
    /// - `None` if the tensor is not contiguous
    ///
    /// # Examples
    ///
    /// ```
    /// use mncp_core::DenseND;
    ///
    /// let tensor = DenseND::<f64>::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[2, 2]).unwrap();
    /// assert_eq!(tensor.try_as_slice(), Some(&[1.0, 2.0, 3.0, 4.0][..]));
    /// ```
    pub fn try_as_slice(&self) -> Option<&[T]> {
        self.data.as_slice()
    }

    /// Try to get a mutable row-major slice of the underlying data
    ///
    /// # Examples
    ///
    /// ```
    /// use mncp_core::DenseND;
    ///
    /// let mut tensor = DenseND::<f64>::zeros(&[4]);
    /// if let Some(slice) = tensor.try_as_slice_mut() {
    ///     slice[0] = 1.0;
    ///     slice[1] = 2.0;
    /// }
    /// assert_eq!(tensor[&[0]], 1.0);
    /// assert_eq!(tensor[&[1]], 2.0);
    /// ```
    pub fn try_as_slice_mut(&mut self) -> Option<&mut [T]> {
        self.data.as_slice_mut()
    }

    /// Row-major slice, returning an error for non-contiguous tensors
    pub fn as_slice_checked(&self) -> anyhow::Result<&[T]> {
        let shape = self.shape_vec();
        self.data
            .as_slice()
            .ok_or_else(|| anyhow::anyhow!("Tensor of shape {:?} is not contiguous", shape))
    }
}
