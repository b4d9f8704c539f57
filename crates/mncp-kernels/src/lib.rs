//! # mncp-kernels
//!
//! Stateless tensor-algebra kernels used by the HALS optimizer in
//! `mncp-decomp`.
//!
//! - **Khatri-Rao product** - column-wise Kronecker product of two or more matrices
//! - **Gram matrices** - `AᵀA` and the Hadamard product of Gram matrices over all but one mode
//! - **Norms** - Frobenius norm over whole arrays or over a subset of linear offsets
//!
//! ## Ordering Convention
//!
//! `khatri_rao(A, B)` places row `i_a * rows(B) + i_b` at the product of
//! `A[i_a, :]` and `B[i_b, :]`: the first matrix varies slowest. Folding this
//! over `U[j], j ≠ n` in increasing `j` matches the column order of
//! `DenseND::unfold(n)` in `mncp-core`.
//!
//! ## Quick Start
//!
//! ```rust
//! use scirs2_core::ndarray_ext::Array2;
//! use mncp_kernels::{gram_hadamard, khatri_rao_list};
//!
//! let factors = vec![
//!     Array2::<f64>::ones((3, 2)),
//!     Array2::<f64>::ones((4, 2)),
//!     Array2::<f64>::ones((5, 2)),
//! ];
//!
//! // Khatri-Rao of every factor except mode 0
//! let others: Vec<_> = factors[1..].iter().map(|f| f.view()).collect();
//! let kr = khatri_rao_list(&others).unwrap();
//! assert_eq!(kr.shape(), &[20, 2]);
//!
//! // Hadamard product of the Gram matrices of the same factors
//! let grams = gram_hadamard(&factors, 0).unwrap();
//! assert_eq!(grams[[0, 0]], 20.0);
//! ```
//!
//! ## SciRS2 Integration
//!
//! This crate uses `scirs2-core` for all array operations and numeric traits.
//! Direct use of `ndarray` or `num-traits` is not permitted.

#![deny(warnings)]

pub mod error;
pub mod gram;
pub mod khatri_rao;
pub mod utils;


// Re-exports
pub use error::{KernelError, KernelResult};
pub use gram::*;
pub use khatri_rao::*;
pub use utils::*;
