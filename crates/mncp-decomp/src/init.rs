//! Initial factor matrices for a fit

use crate::error::NcpError;
use crate::ktensor::KTensor;
use scirs2_core::ndarray_ext::Array2;
use scirs2_core::numeric::{Float, NumCast};
use scirs2_core::random::{
    thread_rng, Distribution, RandNormal as Normal, Rng, SeedableRng, StdRng,
};

/// Where the optimizer starts from
///
/// Random models are rescaled so that their norm equals the norm of the
/// working tensor, i.e. the data with every missing entry filled with the
/// norm of the observed entries. That is not the norm of the observed entries
/// alone. Every starting model is rebalanced before the first sweep.
#[derive(Debug, Clone)]
pub enum InitStrategy<T> {
    /// Factor entries drawn uniformly from `[0, 1)`
    RandomUniform,
    /// Factor entries drawn from N(0, 1); negatives are clamped by the first sweep
    RandomGaussian,
    /// Start from the given model
    ///
    /// The model is rebalanced but not rescaled, so a previous fit continues
    /// from exactly the tensor it reconstructs. Its rank and shape must match
    /// the problem.
    WarmStart(KTensor<T>),
}

impl<T> Default for InitStrategy<T> {
    fn default() -> Self {
        InitStrategy::RandomUniform
    }
}

/// Generator for random initialization, seeded when a seed is given
pub(crate) fn init_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => {
            let mut thread_rng_instance = thread_rng();
            StdRng::from_rng(&mut thread_rng_instance)
        }
    }
}

/// Build the starting `KTensor` for a tensor of the given shape
///
/// Random models are scaled so their norm equals `target_norm`. A warm start
/// is used as given. Either way the result is rebalanced.
///
/// # Errors
///
/// [`NcpError::InvalidRank`] if a warm start does not have `shape` and `rank`.
pub fn initial_ktensor<T>(
    init: InitStrategy<T>,
    shape: &[usize],
    rank: usize,
    target_norm: T,
    seed: Option<u64>,
) -> Result<KTensor<T>, NcpError>
where
    T: Float + NumCast + 'static,
{
    let mut kt = match init {
        InitStrategy::RandomUniform => {
            let mut rng = init_rng(seed);
            let factors = shape
                .iter()
                .map(|&rows| {
                    Array2::from_shape_simple_fn((rows, rank), || {
                        T::from(rng.random::<f64>()).unwrap_or_else(T::zero)
                    })
                })
                .collect();
            scaled(KTensor::new(factors)?, target_norm)?
        }
        InitStrategy::RandomGaussian => {
            let mut rng = init_rng(seed);
            let normal = Normal::new(0.0, 1.0).map_err(|e| {
                NcpError::InvalidOption(format!("Failed to create normal distribution: {}", e))
            })?;
            let factors = shape
                .iter()
                .map(|&rows| {
                    Array2::from_shape_simple_fn((rows, rank), || {
                        T::from(normal.sample(&mut rng)).unwrap_or_else(T::zero)
                    })
                })
                .collect();
            scaled(KTensor::new(factors)?, target_norm)?
        }
        InitStrategy::WarmStart(kt) => {
            if kt.rank() != rank {
                return Err(NcpError::InvalidRank(format!(
                    "warm start has rank {}, expected {}",
                    kt.rank(),
                    rank
                )));
            }
            if kt.shape() != shape {
                return Err(NcpError::InvalidRank(format!(
                    "warm start has shape {:?}, expected {:?}",
                    kt.shape(),
                    shape
                )));
            }
            kt
        }
    };

    kt.rebalance();
    Ok(kt)
}

fn scaled<T>(mut kt: KTensor<T>, target_norm: T) -> Result<KTensor<T>, NcpError>
where
    T: Float + NumCast + 'static,
{
    let current = kt.norm()?;
    if current > T::zero() && current.is_finite() {
        kt.scale(target_norm / current);
    }
    Ok(kt)
}
