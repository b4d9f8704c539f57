//! Dense tensor implementation and operations
//!
//! The `DenseND` type is defined in [`types`]; the other modules add
//! creation, indexing, shape and reduction methods.

// Core type definition
pub mod types;

// Operation modules (organized by functionality)
mod creation;
mod elementwise;
mod indexing;
mod shape_ops;
mod statistics;

// Supporting modules
pub mod densend_traits;

// Re-export the main type
pub use types::DenseND;
