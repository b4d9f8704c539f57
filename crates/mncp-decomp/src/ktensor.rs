//! Kruskal tensors: a CP model held as one factor matrix per mode
//!
//! A `KTensor` with factors `U₀ … U_{N-1}` (each `Iₙ × R`) represents
//!
//! ```text
//! X = Σᵣ U₀[:, r] ∘ U₁[:, r] ∘ … ∘ U_{N-1}[:, r]
//! ```
//!
//! Component weights are always absorbed into the factors.

use crate::error::NcpError;
use mncp_core::DenseND;
use mncp_kernels::{gram_hadamard, khatri_rao_list};
use scirs2_core::ndarray_ext::{Array2, ArrayView2, Axis};
use scirs2_core::numeric::Float;

/// CP model with one `(Iₙ, R)` factor matrix per mode
#[derive(Debug, Clone, PartialEq)]
pub struct KTensor<T> {
    factors: Vec<Array2<T>>,
}

impl<T> KTensor<T>
where
    T: Float + 'static,
{
    /// Build a Kruskal tensor from its factor matrices
    ///
    /// # Errors
    ///
    /// [`NcpError::InvalidRank`] if `factors` is empty, the column counts
    /// differ or the shared column count is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use scirs2_core::ndarray_ext::Array2;
    /// use mncp_decomp::KTensor;
    ///
    /// let kt = KTensor::new(vec![
    ///     Array2::<f64>::ones((2, 3)),
    ///     Array2::<f64>::ones((4, 3)),
    ///     Array2::<f64>::ones((5, 3)),
    /// ])
    /// .unwrap();
    /// assert_eq!(kt.shape(), vec![2, 4, 5]);
    /// assert_eq!(kt.rank(), 3);
    /// ```
    pub fn new(factors: Vec<Array2<T>>) -> Result<Self, NcpError> {
        let rank = match factors.first() {
            Some(f) => f.ncols(),
            None => {
                return Err(NcpError::InvalidRank(
                    "a Kruskal tensor needs at least one factor".to_string(),
                ))
            }
        };
        if rank == 0 {
            return Err(NcpError::InvalidRank(
                "factor matrices must have at least one column".to_string(),
            ));
        }
        for (mode, factor) in factors.iter().enumerate() {
            if factor.ncols() != rank {
                return Err(NcpError::InvalidRank(format!(
                    "factor {} has {} columns, expected {}",
                    mode,
                    factor.ncols(),
                    rank
                )));
            }
        }
        Ok(Self { factors })
    }

    /// Number of components
    pub fn rank(&self) -> usize {
        self.factors[0].ncols()
    }

    /// Number of modes
    pub fn ndim(&self) -> usize {
        self.factors.len()
    }

    /// Shape of the represented tensor
    pub fn shape(&self) -> Vec<usize> {
        self.factors.iter().map(|f| f.nrows()).collect()
    }

    pub fn factors(&self) -> &[Array2<T>] {
        &self.factors
    }

    /// Mutable access to the factor matrices
    ///
    /// Callers must keep every factor at the current rank and mode size.
    pub fn factors_mut(&mut self) -> &mut [Array2<T>] {
        &mut self.factors
    }

    pub fn into_factors(self) -> Vec<Array2<T>> {
        self.factors
    }

    /// Reconstruct the dense tensor
    ///
    /// Computed as `U₀ · (U₁ ⊙ … ⊙ U_{N-1})ᵀ`, which is the mode-0 unfolding
    /// of the result, then laid out row-major.
    ///
    /// # Complexity
    ///
    /// Time: O(R × ∏ᵢ Iᵢ)
    /// Space: O(R × ∏_{i>0} Iᵢ + ∏ᵢ Iᵢ)
    ///
    /// # Examples
    ///
    /// ```
    /// use scirs2_core::ndarray_ext::array;
    /// use mncp_decomp::KTensor;
    ///
    /// let kt = KTensor::new(vec![
    ///     array![[1.0], [2.0]],
    ///     array![[1.0], [3.0]],
    ///     array![[1.0], [0.5]],
    /// ])
    /// .unwrap();
    /// let x = kt.full().unwrap();
    /// assert_eq!(x.shape(), &[2, 2, 2]);
    /// assert_eq!(x[&[1, 1, 1]], 3.0);
    /// ```
    pub fn full(&self) -> anyhow::Result<DenseND<T>> {
        let shape = self.shape();
        let head = &self.factors[0];

        let mode0 = match self.factors.len() {
            1 => head.sum_axis(Axis(1)).insert_axis(Axis(1)),
            2 => head.dot(&self.factors[1].t()),
            _ => {
                let tail: Vec<ArrayView2<T>> =
                    self.factors[1..].iter().map(|f| f.view()).collect();
                let kr = khatri_rao_list(&tail)?;
                head.dot(&kr.t())
            }
        };

        // Logical iteration order is row-major whatever the memory layout
        let data: Vec<T> = mode0.iter().copied().collect();
        DenseND::from_vec(data, &shape)
    }

    /// Frobenius norm of the represented tensor, without reconstructing it
    ///
    /// `‖X‖² = Σ (U₀ᵀU₀ ⊙ … ⊙ U_{N-1}ᵀU_{N-1})`
    ///
    /// # Errors
    ///
    /// [`NcpError::Kernel`] if a factor replaced through
    /// [`factors_mut`](Self::factors_mut) no longer has the model's rank.
    pub fn norm(&self) -> Result<T, NcpError> {
        let grams = gram_hadamard(&self.factors, self.factors.len())?;
        Ok(grams.sum().abs().sqrt())
    }

    /// Multiply the represented tensor by `alpha >= 0`
    ///
    /// The factor `alpha^(1/N)` is applied to every mode so the factors stay
    /// balanced.
    pub fn scale(&mut self, alpha: T) {
        let n = T::from(self.factors.len()).unwrap_or_else(T::one);
        let per_mode = alpha.powf(T::one() / n);
        for factor in &mut self.factors {
            factor.mapv_inplace(|x| x * per_mode);
        }
    }

    /// Equalize the norm of each component across modes
    ///
    /// Column `r` of every factor is rescaled to `(Πₙ ‖Uₙ[:, r]‖)^(1/N)` so the
    /// represented tensor is unchanged. Components with a zero column in any
    /// mode contribute nothing and are zeroed in every mode.
    pub fn rebalance(&mut self) {
        let n_modes = self.factors.len();
        let inv_n = T::one() / T::from(n_modes).unwrap_or_else(T::one);

        for r in 0..self.rank() {
            let norms: Vec<T> = self
                .factors
                .iter()
                .map(|f| {
                    f.column(r)
                        .iter()
                        .fold(T::zero(), |acc, &x| acc + x * x)
                        .sqrt()
                })
                .collect();

            if norms.iter().any(|&nrm| nrm <= T::zero() || !nrm.is_finite()) {
                for factor in &mut self.factors {
                    factor.column_mut(r).fill(T::zero());
                }
                continue;
            }

            let target = norms
                .iter()
                .fold(T::one(), |acc, &nrm| acc * nrm.powf(inv_n));
            for (factor, &nrm) in self.factors.iter_mut().zip(norms.iter()) {
                let ratio = target / nrm;
                factor.column_mut(r).mapv_inplace(|x| x * ratio);
            }
        }
    }

    /// True when every factor entry is `>= 0`
    pub fn is_nonnegative(&self) -> bool {
        self.factors
            .iter()
            .all(|f| f.iter().all(|&x| x >= T::zero()))
    }
}
