//! # mncp-decomp - Masked Nonnegative CP Decomposition
//!
//! Fits a nonnegative CP (CANDECOMP/PARAFAC) model to a dense tensor in which
//! only some entries are observed:
//!
//! ```text
//! X ≈ Σᵣ u₀ᵣ ∘ u₁ᵣ ∘ … ∘ u_{N-1}ᵣ,   every factor entry ≥ 0
//! ```
//!
//! The solver is Hierarchical Alternating Least Squares (HALS): each sweep
//! updates the factor matrices one mode at a time, one column at a time, with
//! a closed-form nonnegative update. Missing entries are imputed from the
//! current model after every sweep.
//!
//! **Algorithms:**
//! - `mncp_hals`: HALS on the observed entries selected by a [`Mask`](mncp_core::Mask)
//! - `ncp_hals`: HALS on a fully observed tensor
//!
//! ## Quick Start
//!
//! ```
//! use mncp_core::{DenseND, Mask};
//! use mncp_decomp::{mncp_hals, FitOptions, InitStrategy};
//!
//! // 10×12×8 tensor with every seventh entry missing
//! let tensor = DenseND::<f64>::random_uniform(&[10, 12, 8], 0.0, 1.0);
//! let mask = Mask::from_fn(tensor.shape(), |idx| (idx[0] * 96 + idx[1] * 8 + idx[2]) % 7 != 0);
//!
//! let options = FitOptions::default()
//!     .with_max_iter(50)
//!     .with_seed(42)
//!     .quiet();
//! let result = mncp_hals(&tensor, &mask, 3, InitStrategy::RandomUniform, &options)?;
//!
//! println!(
//!     "Stopped after {} sweeps ({}), objective {:.4}",
//!     result.iterations,
//!     result.stop_reason,
//!     result.final_objective().unwrap_or(f64::NAN)
//! );
//! # Ok::<(), mncp_decomp::NcpError>(())
//! ```
//!
//! ## Logging
//!
//! Progress is reported through `tracing`: one event per sweep (`info` when
//! [`FitOptions::verbose`] is set, `debug` otherwise), a `warn` event for each
//! degenerate component and an `info` summary when the fit ends. Install a
//! subscriber to see them.
//!
//! ## SciRS2 Integration
//!
//! All array operations use `scirs2_core::ndarray_ext` and random numbers come
//! from `scirs2_core::random`.

#![deny(warnings)]

pub mod convergence;
pub mod error;
pub mod hals;
pub mod init;
pub mod ktensor;
pub mod mncp_hals;


// Re-exports
pub use convergence::{ConvergenceTracker, FitOptions, FitSummary, OptimizerState, StopReason};
pub use error::NcpError;
pub use hals::hals_update;
pub use init::{initial_ktensor, InitStrategy};
pub use ktensor::KTensor;
pub use mncp_hals::{mncp_hals, ncp_hals, DegenerateComponent, NcpResult};
