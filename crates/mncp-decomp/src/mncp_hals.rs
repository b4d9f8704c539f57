//! Nonnegative CP decomposition by HALS with missing data
//!
//! Missing entries are handled by imputation. The working copy of the tensor
//! starts with every missing entry set to the norm of the observed entries.
//! After each sweep over the modes, the missing entries are overwritten with
//! the current reconstruction. The objective is the relative residual over
//! the observed entries only:
//!
//! ```text
//! obj = ‖(X − X̂)|observed‖_F / ‖X|observed‖_F
//! ```
//!
//! # References
//!
//! - Cichocki & Phan (2009), "Fast local algorithms for large scale
//!   nonnegative matrix and tensor factorizations"

use crate::convergence::{ConvergenceTracker, FitOptions, StopReason};
use crate::error::NcpError;
use crate::hals::hals_update;
use crate::init::{initial_ktensor, InitStrategy};
use crate::ktensor::KTensor;
use mncp_core::{types::row_major_strides, DenseND, Mask};
use mncp_kernels::{frobenius_norm_at, gram_hadamard_into, khatri_rao_list_into, residual_norm_at};
use scirs2_core::ndarray::linalg::general_mat_mul;
use scirs2_core::ndarray_ext::{Array2, ArrayView2};
use scirs2_core::numeric::{Float, NumCast};
use std::time::Duration;

/// A component whose Gram diagonal vanished during an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DegenerateComponent {
    /// 1-based sweep number
    pub sweep: usize,
    pub mode: usize,
    pub component: usize,
}

/// Outcome of a HALS fit
#[derive(Debug, Clone)]
pub struct NcpResult<T> {
    /// Fitted model, every entry nonnegative
    pub factors: KTensor<T>,

    /// Objective after each completed sweep
    pub obj_hist: Vec<f64>,

    /// Number of completed sweeps
    pub iterations: usize,

    pub stop_reason: StopReason,

    /// Wall-clock time spent sweeping
    pub total_time: Duration,

    /// Components clamped to zero, in the order they were hit
    pub degenerate: Vec<DegenerateComponent>,
}

impl<T> NcpResult<T> {
    /// Objective of the last sweep
    pub fn final_objective(&self) -> Option<f64> {
        self.obj_hist.last().copied()
    }

    pub fn converged(&self) -> bool {
        self.stop_reason == StopReason::Converged
    }
}

/// Fit a nonnegative CP model to the observed entries of `tensor`
///
/// `mask` marks observed entries with `true`. Values at unobserved positions
/// are ignored. Neither `tensor` nor `mask` is modified.
///
/// # Errors
///
/// All validation happens before the first sweep:
///
/// - [`NcpError::InvalidOption`] if `options` fail [`FitOptions::validate`]
/// - [`NcpError::InvalidRank`] if `rank == 0` or a warm start does not fit
/// - [`NcpError::InvalidShape`] if the tensor has fewer than three modes, an
///   empty mode, or a mask of a different shape
/// - [`NcpError::NegativeInput`] if an observed entry is negative
/// - [`NcpError::ZeroNorm`] if nothing is observed or all observed entries are zero
///
/// # Examples
///
/// ```
/// use mncp_core::{DenseND, Mask};
/// use mncp_decomp::{mncp_hals, FitOptions, InitStrategy};
///
/// let tensor = DenseND::<f64>::random_uniform(&[6, 7, 8], 0.0, 1.0);
/// let mask = Mask::from_fn(&[6, 7, 8], |idx| (idx[0] + idx[1] + idx[2]) % 5 != 0);
///
/// let options = FitOptions::default().with_max_iter(20).with_seed(3).quiet();
/// let result = mncp_hals(&tensor, &mask, 2, InitStrategy::RandomUniform, &options).unwrap();
///
/// assert_eq!(result.factors.shape(), vec![6, 7, 8]);
/// assert!(result.factors.is_nonnegative());
/// assert_eq!(result.obj_hist.len(), result.iterations);
/// ```
#[tracing::instrument(
    name = "mncp_hals",
    skip(tensor, mask, init, options),
    fields(shape = ?tensor.shape(), observed = mask.n_observed())
)]
pub fn mncp_hals<T>(
    tensor: &DenseND<T>,
    mask: &Mask,
    rank: usize,
    init: InitStrategy<T>,
    options: &FitOptions,
) -> Result<NcpResult<T>, NcpError>
where
    T: Float + NumCast + 'static,
{
    options.validate()?;
    if rank == 0 {
        return Err(NcpError::InvalidRank(
            "rank must be at least 1".to_string(),
        ));
    }

    let shape = tensor.shape().to_vec();
    if shape.len() < 3 {
        return Err(NcpError::InvalidShape(format!(
            "tensor must have at least 3 modes, got shape {:?}",
            shape
        )));
    }
    if shape.contains(&0) {
        return Err(NcpError::InvalidShape(format!(
            "every mode must be non-empty, got shape {:?}",
            shape
        )));
    }
    if mask.shape() != shape.as_slice() {
        return Err(NcpError::InvalidShape(format!(
            "mask shape {:?} does not match tensor shape {:?}",
            mask.shape(),
            shape
        )));
    }

    let values = tensor.to_vec();
    let observed = mask.observed_indices();
    let negative = observed
        .iter()
        .filter(|&&i| values[i] < T::zero())
        .count();
    if negative > 0 {
        return Err(NcpError::NegativeInput { count: negative });
    }

    let norm_x = frobenius_norm_at(&values, &observed)?;
    if observed.is_empty() || norm_x <= T::zero() {
        return Err(NcpError::ZeroNorm);
    }

    let mut work = WorkingTensor::new(values, &shape, observed, mask.missing_indices(), norm_x)?;
    let mut kt = initial_ktensor(init, &shape, rank, work.norm(), options.seed)?;
    let mut workspace = HalsWorkspace::new(&shape, rank);
    let degenerate_tol = T::from(options.degenerate_tol).unwrap_or_else(T::zero);
    let norm_x = norm_x.to_f64().unwrap_or(f64::NAN);

    tracing::debug!(
        rank,
        missing = work.missing.len(),
        norm_observed = norm_x,
        "starting HALS sweeps"
    );

    let mut degenerate = Vec::new();
    let mut tracker = ConvergenceTracker::new(options);
    tracker.start();

    let stop_reason = loop {
        let sweep = tracker.iterations() + 1;

        for mode in 0..shape.len() {
            let hits = workspace.update_mode(
                &mut kt,
                &work,
                mode,
                options.inner_iters,
                degenerate_tol,
            )?;
            for component in hits {
                tracing::warn!(sweep, mode, component, "degenerate component clamped to zero");
                degenerate.push(DegenerateComponent {
                    sweep,
                    mode,
                    component,
                });
            }
        }

        let pred = kt.full()?;
        let pred = pred.as_slice_checked()?;
        work.impute(pred);

        let residual = residual_norm_at(&work.values, pred, &work.observed)?;
        let obj = residual.to_f64().unwrap_or(f64::NAN) / norm_x;

        if let Some(reason) = tracker.update(obj) {
            break reason;
        }
    };

    let summary = tracker.finalize(stop_reason);
    Ok(NcpResult {
        factors: kt,
        obj_hist: summary.obj_hist,
        iterations: summary.iterations,
        stop_reason: summary.stop_reason,
        total_time: summary.total_time,
        degenerate,
    })
}

/// Fit a nonnegative CP model to every entry of `tensor`
///
/// Same as [`mncp_hals`] with an all-observed mask.
///
/// # Examples
///
/// ```
/// use mncp_core::DenseND;
/// use mncp_decomp::{ncp_hals, FitOptions, InitStrategy};
///
/// let tensor = DenseND::<f64>::ones(&[4, 4, 4]);
/// let options = FitOptions::default().with_seed(0).quiet();
/// let result = ncp_hals(&tensor, 1, InitStrategy::RandomUniform, &options).unwrap();
/// assert!(result.final_objective().unwrap() < 1e-3);
/// ```
pub fn ncp_hals<T>(
    tensor: &DenseND<T>,
    rank: usize,
    init: InitStrategy<T>,
    options: &FitOptions,
) -> Result<NcpResult<T>, NcpError>
where
    T: Float + NumCast + 'static,
{
    let mask = Mask::full(tensor.shape());
    mncp_hals(tensor, &mask, rank, init, options)
}

/// Working copy of the tensor with its missing entries imputed
///
/// Holds the flat row-major values and the unfolding along every mode, and
/// keeps them in sync by scattering new values only at the missing offsets.
struct WorkingTensor<T> {
    values: Vec<T>,
    unfoldings: Vec<Array2<T>>,
    observed: Vec<usize>,
    missing: Vec<usize>,
    /// `(row, col)` of each missing offset in each mode's unfolding
    missing_coords: Vec<Vec<(usize, usize)>>,
}

impl<T> WorkingTensor<T>
where
    T: Float + 'static,
{
    fn new(
        mut values: Vec<T>,
        shape: &[usize],
        observed: Vec<usize>,
        missing: Vec<usize>,
        fill: T,
    ) -> Result<Self, NcpError> {
        for &i in &missing {
            values[i] = fill;
        }

        let filled = DenseND::from_vec(values.clone(), shape)?;
        let unfoldings = (0..shape.len())
            .map(|mode| filled.unfold(mode))
            .collect::<anyhow::Result<Vec<_>>>()?;

        let strides = row_major_strides(shape);
        let missing_coords = (0..shape.len())
            .map(|mode| {
                let rest: Vec<usize> = shape
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != mode)
                    .map(|(_, &s)| s)
                    .collect();
                let rest_strides = row_major_strides(&rest);

                missing
                    .iter()
                    .map(|&offset| {
                        let mut row = 0;
                        let mut col = 0;
                        let mut k = 0;
                        for (j, &stride) in strides.iter().enumerate() {
                            let idx = (offset / stride) % shape[j];
                            if j == mode {
                                row = idx;
                            } else {
                                col += idx * rest_strides[k];
                                k += 1;
                            }
                        }
                        (row, col)
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            values,
            unfoldings,
            observed,
            missing,
            missing_coords,
        })
    }

    fn norm(&self) -> T {
        self.values
            .iter()
            .fold(T::zero(), |acc, &x| acc + x * x)
            .sqrt()
    }

    /// Overwrite every missing entry with the matching entry of `pred`
    fn impute(&mut self, pred: &[T]) {
        for (k, &offset) in self.missing.iter().enumerate() {
            let value = pred[offset];
            self.values[offset] = value;
            for (unfolding, coords) in self.unfoldings.iter_mut().zip(&self.missing_coords) {
                unfolding[coords[k]] = value;
            }
        }
    }
}

/// Scratch buffers reused by every sweep
struct HalsWorkspace<T> {
    grams: Array2<T>,
    khatri_rao: Vec<Array2<T>>,
    projection: Vec<Array2<T>>,
}

impl<T> HalsWorkspace<T>
where
    T: Float + 'static,
{
    fn new(shape: &[usize], rank: usize) -> Self {
        let total: usize = shape.iter().product();
        Self {
            grams: Array2::zeros((rank, rank)),
            khatri_rao: shape
                .iter()
                .map(|&rows| Array2::zeros((total / rows, rank)))
                .collect(),
            projection: shape
                .iter()
                .map(|&rows| Array2::zeros((rows, rank)))
                .collect(),
        }
    }

    /// Update `U[mode]` with the other factors fixed
    ///
    /// Returns the components found degenerate on the first column pass.
    fn update_mode(
        &mut self,
        kt: &mut KTensor<T>,
        work: &WorkingTensor<T>,
        mode: usize,
        inner_iters: usize,
        degenerate_tol: T,
    ) -> Result<Vec<usize>, NcpError> {
        gram_hadamard_into(kt.factors(), mode, &mut self.grams)?;

        let kr = &mut self.khatri_rao[mode];
        {
            let others: Vec<ArrayView2<T>> = kt
                .factors()
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != mode)
                .map(|(_, f)| f.view())
                .collect();
            khatri_rao_list_into(&others, kr)?;
        }

        let proj = &mut self.projection[mode];
        general_mat_mul(T::one(), &work.unfoldings[mode], &*kr, T::zero(), proj);

        let factor = &mut kt.factors_mut()[mode];
        let mut degenerate = Vec::new();
        for pass in 0..inner_iters {
            let hits = hals_update(factor, &self.grams.view(), &proj.view(), degenerate_tol)?;
            if pass == 0 {
                degenerate = hits;
            }
        }
        Ok(degenerate)
    }
}
