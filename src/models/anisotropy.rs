//! Elastic anisotropy indices
//!
//! - **Zener ratio** `A = 2 C44 / (C11 - C12)` (Voigt indices 3,3 / 0,0 / 0,1).
//!   Unity for an isotropic crystal. For a cubic crystal `C44` and
//!   `(C11 - C12)/2` are the shear stiffnesses across the (100) and (110)
//!   planes (Zener, *Elasticity and Anelasticity of Metals*, 1948). The
//!   crystal is not checked to be cubic.
//! - **Universal index** `U = 5 G_V/G_R + B_V/B_R - 6` (Ranganathan &
//!   Ostoja-Starzewski, PRL 101, 055504 (2008)). Zero for an isotropic
//!   crystal and valid for every crystal system.

use crate::error::{checked_div, ElasticError, Result};
use crate::models::polycrystal::{poly_cij_with, PolycrystalModuli, VOIGT_DIM};
use crate::physics::{ElasticMatrix, ErrorMatrix};
use crate::solver::InversionConfiguration;

/// Relative spread in `C11, C22, C33` above which Zener usage is flagged
const CUBIC_WARNING: f64 = 1e-3;

/// Zener ratio and Universal anisotropy index
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnisotropyIndices {
    /// Zener ratio A
    pub zener: f64,
    /// Universal index U
    pub universal: f64,
}

impl AnisotropyIndices {
    /// Both indices for a stiffness matrix and its precomputed averages
    pub fn compute(stiffness: &ElasticMatrix, moduli: &PolycrystalModuli) -> Result<Self> {
        Ok(Self {
            zener: zener_aniso(stiffness)?,
            universal: universal_aniso(moduli)?,
        })
    }
}

/// Zener anisotropy ratio `2 C44 / (C11 - C12)`
///
/// # Errors
///
/// - `ShapeMismatch` unless the matrix is 6×6
/// - `DegenerateInput` when `C11 == C12`
///
/// # Example
///
/// ```rust
/// use cij_rs::models::zener_aniso;
/// use cij_rs::physics::ElasticMatrix;
/// use nalgebra::DMatrix;
///
/// let mut m = DMatrix::zeros(6, 6);
/// m[(0, 0)] = 300.0;
/// m[(0, 1)] = 100.0;
/// m[(3, 3)] = 150.0;
/// let c = ElasticMatrix::new(m).unwrap();
/// assert_eq!(zener_aniso(&c).unwrap(), 1.5);
/// ```
pub fn zener_aniso(stiffness: &ElasticMatrix) -> Result<f64> {
    if stiffness.dim() != VOIGT_DIM {
        return Err(ElasticError::ShapeMismatch {
            expected: (VOIGT_DIM, VOIGT_DIM),
            found: stiffness.as_matrix().shape(),
        });
    }
    let c = stiffness;

    let diagonal = [c[(0, 0)], c[(1, 1)], c[(2, 2)]];
    let mean = diagonal.iter().sum::<f64>() / 3.0;
    let spread = diagonal.iter().map(|v| (v - mean).abs()).fold(0.0, f64::max);
    if mean != 0.0 && spread / mean.abs() > CUBIC_WARNING {
        log::warn!("Zener ratio requested for a matrix that does not look cubic (C11, C22, C33 = {diagonal:?})");
    }

    checked_div(2.0 * c[(3, 3)], c[(0, 0)] - c[(0, 1)], "Zener ratio (C11 - C12)")
}

/// Universal anisotropy index `5 G_V/G_R + B_V/B_R - 6`
///
/// # Errors
///
/// `DegenerateInput` if `G_R` or `B_R` is zero.
pub fn universal_aniso(moduli: &PolycrystalModuli) -> Result<f64> {
    let shear_ratio = checked_div(moduli.voigt_shear.value, moduli.reuss_shear.value, "G_V / G_R")?;
    let bulk_ratio = checked_div(moduli.voigt_bulk.value, moduli.reuss_bulk.value, "B_V / B_R")?;
    Ok(5.0 * shear_ratio + bulk_ratio - 6.0)
}

/// Universal anisotropy index straight from a stiffness matrix
///
/// Runs the averaging without error propagation.
pub fn universal_aniso_cij(stiffness: &ElasticMatrix) -> Result<f64> {
    let moduli = poly_cij_with(
        stiffness,
        &ErrorMatrix::zeros(stiffness.dim()),
        &InversionConfiguration::values_only(),
    )?;
    universal_aniso(&moduli)
}

// =================================================================================================
// Tests
// =================================================================================================
