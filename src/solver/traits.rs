//! Inversion configuration and result types
//!
//! # Design Philosophy
//!
//! The inversion routine itself is a pure function; everything that can be
//! tuned about it lives in [`InversionConfiguration`], which is validated
//! before use in the same way for every caller. The output bundles the three
//! derived quantities in [`InversionResult`].

use crate::error::{ElasticError, Result};
use crate::physics::{ComplianceMatrix, CovarianceTensor, ErrorMatrix};

// =================================================================================================
// Inversion configuration
// =================================================================================================

/// Default relative singularity threshold
///
/// A matrix is declared singular when `|det C|` falls below this fraction of
/// its Hadamard bound `Π_i ||row_i||`. The ratio is scale-invariant, so the
/// same threshold works for stiffnesses in GPa, Pa or dimensionless units.
pub const DEFAULT_SINGULAR_TOLERANCE: f64 = 1e-12;

/// Configuration for the matrix inverter
///
/// # Fields
///
/// - `singular_tolerance`: relative determinant threshold (default: 1e-12)
/// - `propagate_errors`: run the covariance propagation (default: true)
///
/// # Example
///
/// ```rust
/// use cij_rs::solver::InversionConfiguration;
///
/// let config = InversionConfiguration::default()
///     .singular_tolerance(1e-10)
///     .propagate_errors(false);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct InversionConfiguration {
    /// Relative determinant threshold below which the matrix is singular
    pub singular_tolerance: f64,

    /// Compute the covariance tensor (O(N⁶)); when false it is left at zero
    pub propagate_errors: bool,
}

impl Default for InversionConfiguration {
    fn default() -> Self {
        Self {
            singular_tolerance: DEFAULT_SINGULAR_TOLERANCE,
            propagate_errors: true,
        }
    }
}

impl InversionConfiguration {
    /// Configuration that only inverts, skipping error propagation
    pub fn values_only() -> Self {
        Self {
            propagate_errors: false,
            ..Default::default()
        }
    }

    /// Builder pattern: set singular tolerance
    pub fn singular_tolerance(mut self, tolerance: f64) -> Self {
        self.singular_tolerance = tolerance;
        self
    }

    /// Builder pattern: enable or disable covariance propagation
    pub fn propagate_errors(mut self, propagate: bool) -> Self {
        self.propagate_errors = propagate;
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let tol = self.singular_tolerance;
        if !tol.is_finite() || !(0.0..1.0).contains(&tol) {
            return Err(ElasticError::invalid(
                "singular_tolerance",
                tol,
                "must be finite and in [0, 1)",
            ));
        }
        Ok(())
    }
}

// =================================================================================================
// Inversion result
// =================================================================================================

/// Output of the matrix inverter
///
/// - `compliance`: `S = C⁻¹`
/// - `errors`: `eS[a,b] = sqrt(cov[a,b,a,b])`
/// - `covariance`: the full four-index covariance tensor
#[derive(Clone, Debug, PartialEq)]
pub struct InversionResult {
    /// Inverse matrix
    pub compliance: ComplianceMatrix,

    /// Element-wise standard uncertainties of the inverse
    pub errors: ErrorMatrix,

    /// `COV(S[a,b], S[c,d])`
    pub covariance: CovarianceTensor,
}

impl InversionResult {
    /// Split into `(S, eS, cov)`
    pub fn into_parts(self) -> (ComplianceMatrix, ErrorMatrix, CovarianceTensor) {
        (self.compliance, self.errors, self.covariance)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = InversionConfiguration::default();
        assert_eq!(config.singular_tolerance, DEFAULT_SINGULAR_TOLERANCE);
        assert!(config.propagate_errors);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_values_only() {
        assert!(!InversionConfiguration::values_only().propagate_errors);
    }

    #[test]
    fn test_invalid_tolerance() {
        for tol in [-1.0, 1.0, f64::NAN, f64::INFINITY] {
            let config = InversionConfiguration::default().singular_tolerance(tol);
            assert!(
                matches!(config.validate(), Err(ElasticError::InvalidParameter { .. })),
                "tolerance {tol} should be rejected"
            );
        }
    }

    #[test]
    fn test_zero_tolerance_is_valid() {
        assert!(InversionConfiguration::default().singular_tolerance(0.0).validate().is_ok());
    }
}
