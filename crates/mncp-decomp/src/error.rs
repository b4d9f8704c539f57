//! Error type for the decomposition crate

use mncp_kernels::KernelError;
use thiserror::Error;

/// Errors reported by [`mncp_hals`](crate::mncp_hals) and its building blocks
///
/// Every variant is raised before the first sweep, except `Kernel` and
/// `Tensor` which wrap failures of the lower crates.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NcpError {
    #[error("Invalid shape: {0}")]
    InvalidShape(String),

    #[error("Invalid rank: {0}")]
    InvalidRank(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Input has {count} negative observed entries")]
    NegativeInput { count: usize },

    #[error("Observed entries have zero norm")]
    ZeroNorm,

    #[error("Kernel error: {0}")]
    Kernel(#[from] KernelError),

    #[error("Tensor error: {0}")]
    Tensor(String),
}

impl From<anyhow::Error> for NcpError {
    fn from(err: anyhow::Error) -> Self {
        NcpError::Tensor(err.to_string())
    }
}
