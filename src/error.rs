//! Error types for the mining core

use thiserror::Error;

/// Errors raised by lattice construction and rule derivation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MiningError {
    #[error("{name} must lie in [0, 1], got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    #[error("cannot mine an empty transaction set")]
    EmptyTransactionSet,

    #[error("lattice is inconsistent: subset {missing} of frequent itemset {itemset} is not frequent")]
    InternalInconsistency { itemset: String, missing: String },
}

/// Result type for the mining core
pub type MiningResult<T> = std::result::Result<T, MiningError>;

/// Check that a threshold is a finite value in `[0, 1]`, without clamping.
pub fn validate_threshold(name: &'static str, value: f64) -> MiningResult<f64> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(MiningError::InvalidThreshold { name, value })
    }
}
