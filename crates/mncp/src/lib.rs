//! # mncp - Masked Nonnegative CP Decomposition
//!
//! Fits nonnegative CP models to dense tensors with missing entries using
//! Hierarchical Alternating Least Squares.
//!
//! This is the **meta crate** that re-exports every component for convenient access.
//!
//! ## Quick Start
//!
//! ```
//! use mncp::prelude::*;
//!
//! let tensor = DenseND::<f64>::random_uniform(&[8, 9, 10], 0.0, 1.0);
//! let mask = Mask::from_fn(tensor.shape(), |idx| idx[2] % 4 != 3);
//!
//! let options = FitOptions::default().with_max_iter(25).with_seed(1).quiet();
//! let result = mncp_hals(&tensor, &mask, 2, InitStrategy::RandomUniform, &options)?;
//! assert!(result.factors.is_nonnegative());
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Components
//!
//! ### Core Tensor Types ([`core`])
//!
//! Dense tensors, observation masks, reshape/permute, unfold/fold.
//!
//! ```
//! use mncp::core::DenseND;
//!
//! let tensor = DenseND::<f64>::ones(&[2, 3, 4]);
//! let unfolded = tensor.unfold(1).unwrap();
//! assert_eq!(unfolded.shape(), &[3, 8]);
//! ```
//!
//! ### Tensor Kernels ([`kernels`])
//!
//! Khatri-Rao products, Gram matrices and masked norms.
//!
//! ```
//! use mncp::kernels::khatri_rao;
//! use scirs2_core::ndarray_ext::Array2;
//!
//! let a = Array2::<f64>::ones((10, 5));
//! let b = Array2::<f64>::ones((8, 5));
//! let kr = khatri_rao(&a.view(), &b.view());
//! assert_eq!(kr.shape(), &[80, 5]);
//! ```
//!
//! ### Decomposition ([`decomp`])
//!
//! The HALS optimizer, its options and the `KTensor` model type.

#![deny(warnings)]

// Re-export all components
pub use mncp_core as core;
pub use mncp_decomp as decomp;
pub use mncp_kernels as kernels;

pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! # Example
    //!
    //! ```
    //! use mncp::prelude::*;
    //!
    //! let mask = Mask::full(&[4, 4, 4]);
    //! assert_eq!(mask.n_observed(), 64);
    //! ```

    // Core types
    pub use crate::core::{DenseND, Mask};

    // Decomposition
    pub use crate::decomp::{
        mncp_hals, ncp_hals, FitOptions, InitStrategy, KTensor, NcpError, NcpResult, StopReason,
    };

    // Common kernels
    pub use crate::kernels::{gram_hadamard, khatri_rao, khatri_rao_list};
}
