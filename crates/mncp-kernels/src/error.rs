//! Error types for tensor kernel operations

use std::fmt;

/// Error type for tensor kernel operations
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Dimension mismatch between operands
    DimensionMismatch {
        operation: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
        context: String,
    },

    /// Rank mismatch (different column counts among factor matrices)
    RankMismatch {
        operation: String,
        expected_rank: usize,
        actual_rank: usize,
        factor_index: usize,
    },

    /// Too few inputs for the operation
    EmptyInput {
        operation: String,
        parameter: String,
    },

    /// Offset outside the addressed array
    IndexOutOfBounds {
        operation: String,
        index: usize,
        len: usize,
    },
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::DimensionMismatch {
                operation,
                expected,
                actual,
                context,
            } => write!(
                f,
                "{}: dimension mismatch - expected {:?}, got {:?}. {}",
                operation, expected, actual, context
            ),

            KernelError::RankMismatch {
                operation,
                expected_rank,
                actual_rank,
                factor_index,
            } => write!(
                f,
                "{}: rank mismatch at factor {}: expected rank {}, got {}",
                operation, factor_index, expected_rank, actual_rank
            ),

            KernelError::EmptyInput {
                operation,
                parameter,
            } => write!(
                f,
                "{}: not enough inputs for parameter '{}'",
                operation, parameter
            ),

            KernelError::IndexOutOfBounds {
                operation,
                index,
                len,
            } => write!(
                f,
                "{}: offset {} out of bounds for length {}",
                operation, index, len
            ),
        }
    }
}

impl std::error::Error for KernelError {}

/// Result type for kernel operations
pub type KernelResult<T> = Result<T, KernelError>;

impl KernelError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(
        operation: impl Into<String>,
        expected: Vec<usize>,
        actual: Vec<usize>,
        context: impl Into<String>,
    ) -> Self {
        KernelError::DimensionMismatch {
            operation: operation.into(),
            expected,
            actual,
            context: context.into(),
        }
    }

    /// Create a rank mismatch error
    pub fn rank_mismatch(
        operation: impl Into<String>,
        expected_rank: usize,
        actual_rank: usize,
        factor_index: usize,
    ) -> Self {
        KernelError::RankMismatch {
            operation: operation.into(),
            expected_rank,
            actual_rank,
            factor_index,
        }
    }

    /// Create an empty input error
    pub fn empty_input(operation: impl Into<String>, parameter: impl Into<String>) -> Self {
        KernelError::EmptyInput {
            operation: operation.into(),
            parameter: parameter.into(),
        }
    }

    /// Create an out-of-bounds error
    pub fn index_out_of_bounds(operation: impl Into<String>, index: usize, len: usize) -> Self {
        KernelError::IndexOutOfBounds {
            operation: operation.into(),
            index,
            len,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_display() {
        let err = KernelError::dimension_mismatch(
            "khatri_rao_list_into",
            vec![20, 3],
            vec![20, 2],
            "Output buffer has the wrong shape",
        );

        let msg = format!("{}", err);
        assert!(msg.contains("khatri_rao_list_into"));
        assert!(msg.contains("dimension mismatch"));
        assert!(msg.contains("[20, 3]"));
        assert!(msg.contains("[20, 2]"));
    }

    #[test]
    fn test_rank_mismatch_display() {
        let err = KernelError::rank_mismatch("khatri_rao_list", 5, 3, 2);

        let msg = format!("{}", err);
        assert!(msg.contains("khatri_rao_list"));
        assert!(msg.contains("factor 2"));
        assert!(msg.contains("expected rank 5"));
        assert!(msg.contains("got 3"));
    }

    #[test]
    fn test_empty_input_display() {
        let err = KernelError::empty_input("khatri_rao_list", "matrices");

        let msg = format!("{}", err);
        assert!(msg.contains("khatri_rao_list"));
        assert!(msg.contains("matrices"));
    }

    #[test]
    fn test_index_out_of_bounds_display() {
        let err = KernelError::index_out_of_bounds("frobenius_norm_at", 12, 10);
        assert_eq!(
            err.to_string(),
            "frobenius_norm_at: offset 12 out of bounds for length 10"
        );
    }
}
