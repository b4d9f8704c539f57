//! Reductions over all elements

use super::types::DenseND;
use scirs2_core::numeric::Float;

impl<T> DenseND<T>
where
    T: Float,
{
    /// Compute the Frobenius norm of the tensor
    ///
    /// ||X||_F = sqrt(Σᵢⱼₖ... X²ᵢⱼₖ...)
    ///
    /// # Examples
    ///
    /// ```
    /// use mncp_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::ones(&[2, 3]);
    /// let norm = tensor.frobenius_norm();
    /// assert!((norm - (6.0_f64).sqrt()).abs() < 1e-10);
    /// ```
    pub fn frobenius_norm(&self) -> T {
        self.data
            .iter()
            .fold(T::zero(), |acc, &x| acc + x * x)
            .sqrt()
    }
}
