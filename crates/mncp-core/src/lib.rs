//! # mncp-core
//!
//! Core array types for the mncp stack: dense N-dimensional tensors,
//! observation masks and the matricization used by CP decompositions.
//!
//! - **Dense tensor representation** ([`DenseND`]) backed by `scirs2_core` arrays
//! - **Observation masks** ([`Mask`]) marking which entries of a tensor are known
//! - **Matricization** (unfold/fold) along any mode
//!
//! ## Memory Layout
//!
//! Tensors use C-contiguous (row-major) layout. The mode-n unfolding places
//! mode `n` on the rows and enumerates the remaining modes on the columns in
//! increasing mode order, last remaining mode fastest. The Khatri-Rao kernels
//! in `mncp-kernels` follow the same convention so that
//! `unfold(X, n) = U[n] · (⊙_{j≠n} U[j])ᵀ` holds for an exact CP tensor.
//!
//! ## Quick Start
//!
//! ```
//! use mncp_core::{DenseND, Mask};
//!
//! let tensor = DenseND::<f64>::ones(&[2, 3, 4]);
//! assert_eq!(tensor.rank(), 3);
//!
//! // Unfold along mode 1 (3 rows, 2 * 4 columns)
//! let unfolded = tensor.unfold(1).unwrap();
//! assert_eq!(unfolded.shape(), &[3, 8]);
//!
//! // Mark two entries as missing
//! let mut mask = Mask::full(&[2, 3, 4]);
//! mask.set(&[0, 0, 0], false).unwrap();
//! mask.set(&[1, 2, 3], false).unwrap();
//! assert_eq!(mask.n_missing(), 2);
//! ```
//!
//! ## SciRS2 Integration
//!
//! All array and random-number operations go through `scirs2_core`.
//! Direct use of `ndarray` or `rand` is not permitted.
//!
//! ## Error Handling
//!
//! Shape operations return `anyhow::Result`:
//!
//! ```
//! use mncp_core::DenseND;
//!
//! let tensor = DenseND::<f64>::zeros(&[2, 3]);
//! assert!(tensor.reshape(&[7]).is_err());
//! assert!(tensor.unfold(10).is_err());
//! ```

#![deny(warnings)]

pub mod dense;
pub mod mask;
pub mod types;


pub use mask::Mask;
pub use types::{Axis, DenseND, Rank, Shape};
