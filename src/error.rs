//! Error taxonomy for the elastic-constants core
//!
//! Every fallible operation of the library returns [`ElasticError`]. The
//! variants map one-to-one onto the failure classes of the computation:
//!
//! | Variant            | Raised when                                              |
//! |--------------------|----------------------------------------------------------|
//! | `ShapeMismatch`    | operand dimensions disagree or a matrix is not square    |
//! | `SingularMatrix`   | the stiffness matrix cannot be inverted                  |
//! | `DegenerateInput`  | a derived formula divides by zero or turns non-finite    |
//! | `InvalidParameter` | a value that must be finite / positive is not            |
//!
//! Errors are never recovered locally: they propagate to the caller, which
//! decides whether to abort or report.

use thiserror::Error;

/// Errors raised by the inversion, averaging and estimation routines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElasticError {
    /// Operand dimensions disagree.
    #[error("Shape mismatch: expected {expected:?}, found {found:?}")]
    ShapeMismatch {
        /// Expected (rows, columns)
        expected: (usize, usize),
        /// Actual (rows, columns)
        found: (usize, usize),
    },

    /// The stiffness matrix is not invertible.
    #[error("Singular matrix: determinant {determinant:e} is indistinguishable from zero")]
    SingularMatrix {
        /// Determinant obtained from the LU factorisation
        determinant: f64,
    },

    /// A denominator of a derived formula is zero, or the result is not finite.
    #[error("Degenerate input: {0}")]
    DegenerateInput(String),

    /// A physical parameter is outside its admissible range.
    #[error("Invalid parameter `{name}`: {value} ({reason})")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Rejected value
        value: f64,
        /// Constraint that was violated
        reason: &'static str,
    },
}

impl ElasticError {
    pub(crate) fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateInput(message.into())
    }

    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter { name, value, reason }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ElasticError>;

/// Divide `numerator` by `denominator`, refusing zero or non-finite outcomes.
///
/// `what` names the quantity being computed and ends up in the error message.
pub(crate) fn checked_div(numerator: f64, denominator: f64, what: &str) -> Result<f64> {
    if denominator == 0.0 || !denominator.is_finite() {
        return Err(ElasticError::degenerate(format!(
            "{what}: denominator is {denominator}"
        )));
    }
    finite(numerator / denominator, what)
}

/// Reject NaN and infinities.
pub(crate) fn finite(value: f64, what: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ElasticError::degenerate(format!("{what} is not finite ({value})")))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
