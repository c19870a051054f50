//! Matrix inversion with error propagation
//!
//! # Algorithm
//!
//! 1. Check that the error matrix pairs with the stiffness matrix
//! 2. LU-factorise `C` (nalgebra, partial pivoting)
//! 3. Reject singular input: `|det C| <= tol · Π ||row_i(C)||`, compared
//!    in log space so tiny but well-conditioned matrices do not underflow
//! 4. Invert through the factorisation
//! 5. Propagate the element uncertainties into the covariance tensor
//!    (see [`covariance`](super::covariance)) and reject overflow
//! 6. Read the element-wise uncertainties off the diagonal slice
//!
//! Nothing is returned on failure: either all three outputs are produced
//! or an error is raised.
//!
//! # Example
//!
//! ```rust
//! use cij_rs::physics::{ElasticMatrix, ErrorMatrix};
//! use cij_rs::solver::invert_cij;
//!
//! let c = ElasticMatrix::from_row_slice(2, &[0.7, 0.2, 0.4, 0.6]).unwrap();
//! let e = ErrorMatrix::from_row_slice(2, &[0.007, 0.002, 0.004, 0.006]).unwrap();
//!
//! let (s, es, cov) = invert_cij(&c, &e).unwrap().into_parts();
//! assert!((s[(0, 0)] - 1.764_705_882).abs() < 1e-8);
//! assert!((es[(0, 0)] - 0.022_955).abs() < 1e-6);
//! assert_eq!(cov.get(0, 1, 1, 0), cov.get(1, 0, 0, 1));
//! ```

use crate::error::{ElasticError, Result};
use crate::physics::{ComplianceMatrix, CovarianceTensor, ElasticMatrix, ErrorMatrix};
use crate::solver::covariance::{diagonal_errors, propagate_covariance};
use crate::solver::{InversionConfiguration, InversionResult};

/// Relative asymmetry above which a warning is logged
const ASYMMETRY_WARNING: f64 = 1e-6;

/// Invert `C` and propagate its uncertainties with the default configuration
///
/// Costs O(N⁶) time and O(N⁴) memory.
///
/// # Errors
///
/// - `ShapeMismatch` if `errors` is not the same size as `stiffness`
/// - `SingularMatrix` if `stiffness` is not invertible
pub fn invert_cij(stiffness: &ElasticMatrix, errors: &ErrorMatrix) -> Result<InversionResult> {
    invert_cij_with(stiffness, errors, &InversionConfiguration::default())
}

/// Invert `C` and propagate its uncertainties with an explicit configuration
pub fn invert_cij_with(
    stiffness: &ElasticMatrix,
    errors: &ErrorMatrix,
    config: &InversionConfiguration,
) -> Result<InversionResult> {
    config.validate()?;
    errors.check_pairs_with(stiffness)?;

    let n = stiffness.dim();
    let asymmetry = stiffness.asymmetry();
    if asymmetry > ASYMMETRY_WARNING {
        log::warn!("stiffness matrix is not symmetric (relative asymmetry {asymmetry:.3e})");
    }

    let lu = stiffness.as_matrix().clone().lu();
    let determinant = lu.determinant();

    // ln|det C| from the pivots; the plain product underflows for tiny entries.
    let log_det: f64 = lu.u().diagonal().iter().map(|p| p.abs().ln()).sum();
    let log_bound = stiffness.log_hadamard_bound();
    log::debug!("inverting {n}x{n} matrix: ln|det| = {log_det:.3}, ln(Hadamard bound) = {log_bound:.3}");

    if log_bound == f64::NEG_INFINITY
        || log_det.is_nan()
        || log_det - log_bound <= config.singular_tolerance.ln()
    {
        return Err(ElasticError::SingularMatrix { determinant });
    }

    let inverse = lu
        .try_inverse()
        .ok_or(ElasticError::SingularMatrix { determinant })?;
    if inverse.iter().any(|v| !v.is_finite()) {
        return Err(ElasticError::SingularMatrix { determinant });
    }

    let (covariance, element_errors) = if config.propagate_errors {
        let covariance = propagate_covariance(&inverse, errors.as_matrix());
        if covariance.as_array().iter().any(|v| !v.is_finite()) {
            return Err(ElasticError::degenerate(
                "propagated covariance overflows; rescale the input matrix",
            ));
        }
        let element_errors = diagonal_errors(&covariance);
        (covariance, ErrorMatrix::from_propagated(element_errors))
    } else {
        (CovarianceTensor::zeros(n), ErrorMatrix::zeros(n))
    };

    Ok(InversionResult {
        compliance: ComplianceMatrix::from_inverse(inverse),
        errors: element_errors,
        covariance,
    })
}

// =================================================================================================
// Tests
// =================================================================================================
