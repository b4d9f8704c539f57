//! Random tensor creation
//!
//! Uses `scirs2_core::random` for all random number generation (never
//! `rand` directly). The `_with` variant takes an explicit generator so tests
//! and benchmarks can be made reproducible.

use super::types::DenseND;
use scirs2_core::ndarray_ext::{Array, IxDyn};
use scirs2_core::numeric::{Float, NumCast};
use scirs2_core::random::{thread_rng, Rng};

impl<T> DenseND<T>
where
    T: Float + NumCast,
{
    /// Create a tensor with values drawn uniformly from `[low, high)`
    ///
    /// # Examples
    ///
    /// ```
    /// use mncp_core::dense::DenseND;
    ///
    /// let tensor = DenseND::<f64>::random_uniform(&[2, 3], 0.0, 1.0);
    /// assert_eq!(tensor.shape(), &[2, 3]);
    /// assert!(tensor.iter().all(|&x| (0.0..1.0).contains(&x)));
    /// ```
    pub fn random_uniform(shape: &[usize], low: f64, high: f64) -> Self {
        Self::random_uniform_with(shape, low, high, &mut thread_rng())
    }

    /// Uniform random tensor drawn from a caller-supplied generator
    ///
    /// # Examples
    ///
    /// ```
    /// use mncp_core::dense::DenseND;
    /// use scirs2_core::random::{SeedableRng, StdRng};
    ///
    /// let a = DenseND::<f64>::random_uniform_with(&[3, 3], 0.0, 1.0, &mut StdRng::seed_from_u64(7));
    /// let b = DenseND::<f64>::random_uniform_with(&[3, 3], 0.0, 1.0, &mut StdRng::seed_from_u64(7));
    /// assert_eq!(a, b);
    /// ```
    pub fn random_uniform_with<R: Rng>(
        shape: &[usize],
        low: f64,
        high: f64,
        rng: &mut R,
    ) -> Self {
        let range = high - low;
        let data = Array::from_shape_simple_fn(IxDyn(shape), || {
            let sample = low + rng.random::<f64>() * range;
            T::from(sample).unwrap_or_else(T::nan)
        });
        Self { data }
    }
}
