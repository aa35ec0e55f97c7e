//! Error types for the editor core
//!
//! All core errors are local validation failures. Nothing in this crate
//! touches the network; a returned error means no state was mutated.

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Validation errors raised while assembling a rule expression
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// An expression was built with no rule fragments at all
    #[error("a rule expression requires at least one rule fragment")]
    EmptyExpression,

    /// Operator count does not line up with the fragment count
    #[error("operator count must be one less than the rule fragment count: {fragments} fragments, {operators} operators")]
    OperatorCountMismatch {
        /// Number of rule fragments supplied
        fragments: usize,
        /// Number of operators supplied
        operators: usize,
    },

    /// A connective outside the allowed set (AND, OR, XOR, NAND, NOR, XNOR)
    #[error("unknown operator: {0}")]
    UnknownOperator(String),
}
