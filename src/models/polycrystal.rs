//! Voigt, Reuss and Hill averages for a random polycrystal
//!
//! The bounds use only nine of the 21 independent elastic constants and are
//! valid for every crystal system (Anderson, *Theory of the Earth*, p. 122):
//!
//! ```text
//! B_V = (C00+C11+C22)/9 + 2(C01+C02+C12)/9
//! B_R = 1 / [ (S00+S11+S22) + 2(S01+S02+S12) ]
//! G_V = (C00+C11+C22-C01-C02-C12)/15 + (C33+C44+C55)/5
//! G_R = 15 / [ 4(S00+S11+S22) - 4(S01+S02+S12) + 3(S33+S44+S55) ]
//! ```
//!
//! # Uncertainties
//!
//! - **Voigt**: linear in independent `Cij`, so the variance is the weighted
//!   sum of the element variances.
//! - **Reuss**: reciprocal of a linear combination of `Sij`; the variance of
//!   the combination includes every pairwise covariance from the tensor and
//!   is carried through the reciprocal to first order.
//! - **Hill**: half the root-sum-square of the Voigt and Reuss errors; no
//!   cross-covariance between the two bounds is tracked.
//!
//! # Example
//!
//! ```rust
//! use cij_rs::models::poly_cij;
//! use cij_rs::physics::{ElasticMatrix, ErrorMatrix};
//!
//! // Isotropic: λ = 60, μ = 40 GPa
//! let (l, m) = (60.0, 40.0);
//! let c = ElasticMatrix::from_row_slice(6, &[
//!     l + 2.0 * m, l, l, 0.0, 0.0, 0.0,
//!     l, l + 2.0 * m, l, 0.0, 0.0, 0.0,
//!     l, l, l + 2.0 * m, 0.0, 0.0, 0.0,
//!     0.0, 0.0, 0.0, m, 0.0, 0.0,
//!     0.0, 0.0, 0.0, 0.0, m, 0.0,
//!     0.0, 0.0, 0.0, 0.0, 0.0, m,
//! ]).unwrap();
//!
//! let moduli = poly_cij(&c, &ErrorMatrix::zeros(6)).unwrap();
//! assert!((moduli.hill_bulk.value - (l + 2.0 * m / 3.0)).abs() < 1e-9);
//! assert!((moduli.hill_shear.value - m).abs() < 1e-9);
//! ```

use std::fmt;

use crate::error::{checked_div, finite, ElasticError, Result};
use crate::physics::{CovarianceTensor, ElasticMatrix, ErrorMatrix, Measured};
use crate::solver::{invert_cij_with, InversionConfiguration};

/// Voigt notation order
pub const VOIGT_DIM: usize = 6;

/// Normal-normal diagonal elements (0,0), (1,1), (2,2)
const NORMAL_DIAGONAL: &[(usize, usize)] = &[(0, 0), (1, 1), (2, 2)];

/// Normal-normal off-diagonal elements (0,1), (0,2), (1,2)
const NORMAL_OFF_DIAGONAL: &[(usize, usize)] = &[(0, 1), (0, 2), (1, 2)];

/// Shear diagonal elements (3,3), (4,4), (5,5)
const SHEAR_DIAGONAL: &[(usize, usize)] = &[(3, 3), (4, 4), (5, 5)];

// =================================================================================================
// Polycrystal moduli
// =================================================================================================

/// Bounds and Hill averages of the bulk and shear moduli, with uncertainties
///
/// Units follow the stiffness input (GPa for the usual inputs).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolycrystalModuli {
    /// Voigt (uniform strain) bulk modulus
    pub voigt_bulk: Measured,
    /// Reuss (uniform stress) bulk modulus
    pub reuss_bulk: Measured,
    /// Voigt shear modulus
    pub voigt_shear: Measured,
    /// Reuss shear modulus
    pub reuss_shear: Measured,
    /// Hill bulk modulus, `(B_V + B_R) / 2`
    pub hill_bulk: Measured,
    /// Hill shear modulus, `(G_V + G_R) / 2`
    pub hill_shear: Measured,
}

impl PolycrystalModuli {
    /// `[Voigt, Reuss, Hill]` bulk moduli
    pub fn bulk(&self) -> [Measured; 3] {
        [self.voigt_bulk, self.reuss_bulk, self.hill_bulk]
    }

    /// `[Voigt, Reuss, Hill]` shear moduli
    pub fn shear(&self) -> [Measured; 3] {
        [self.voigt_shear, self.reuss_shear, self.hill_shear]
    }

    /// Flat tuple in the historical order `(B_V, B_R, G_V, G_R, B_H, G_H)`
    pub fn values(&self) -> (f64, f64, f64, f64, f64, f64) {
        (
            self.voigt_bulk.value,
            self.reuss_bulk.value,
            self.voigt_shear.value,
            self.reuss_shear.value,
            self.hill_bulk.value,
            self.hill_shear.value,
        )
    }
}

impl fmt::Display for PolycrystalModuli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = f.precision().unwrap_or(5);
        writeln!(f, "Bulk  : V {:.*}  R {:.*}  H {:.*}", p, self.voigt_bulk, p, self.reuss_bulk, p, self.hill_bulk)?;
        write!(f, "Shear : V {:.*}  R {:.*}  H {:.*}", p, self.voigt_shear, p, self.reuss_shear, p, self.hill_shear)
    }
}

// =================================================================================================
// Averaging
// =================================================================================================

/// Polycrystal averages from a 6×6 stiffness matrix and its uncertainties
///
/// # Errors
///
/// - `ShapeMismatch` if the matrices are not 6×6 or do not pair
/// - `SingularMatrix` (from the inverter) if `C` is not invertible
/// - `DegenerateInput` if a Reuss denominator is zero or a result is not finite
pub fn poly_cij(stiffness: &ElasticMatrix, errors: &ErrorMatrix) -> Result<PolycrystalModuli> {
    poly_cij_with(stiffness, errors, &InversionConfiguration::default())
}

/// Polycrystal averages with an explicit inversion configuration
pub fn poly_cij_with(
    stiffness: &ElasticMatrix,
    errors: &ErrorMatrix,
    config: &InversionConfiguration,
) -> Result<PolycrystalModuli> {
    if stiffness.dim() != VOIGT_DIM {
        return Err(ElasticError::ShapeMismatch {
            expected: (VOIGT_DIM, VOIGT_DIM),
            found: stiffness.as_matrix().shape(),
        });
    }
    let inversion = invert_cij_with(stiffness, errors, config)?;
    let s = &inversion.compliance;

    let voigt_bulk = voigt_bulk(stiffness, errors)?;
    let voigt_shear = voigt_shear(stiffness, errors)?;

    // Reuss bulk: B_R = 1 / X
    let bulk_terms = weighted(&[(1.0, NORMAL_DIAGONAL), (2.0, NORMAL_OFF_DIAGONAL)]);
    let x = linear_sum(&bulk_terms, |a, b| s[(a, b)]);
    let reuss_bulk = reciprocal(1.0, x, &bulk_terms, &inversion.covariance, "Reuss bulk modulus")?;

    // Reuss shear: G_R = 15 / Y
    let shear_terms = weighted(&[
        (4.0, NORMAL_DIAGONAL),
        (-4.0, NORMAL_OFF_DIAGONAL),
        (3.0, SHEAR_DIAGONAL),
    ]);
    let y = linear_sum(&shear_terms, |a, b| s[(a, b)]);
    let reuss_shear = reciprocal(15.0, y, &shear_terms, &inversion.covariance, "Reuss shear modulus")?;

    log::trace!("Reuss denominators: bulk {x:e}, shear {y:e}");

    Ok(PolycrystalModuli {
        voigt_bulk,
        reuss_bulk,
        voigt_shear,
        reuss_shear,
        hill_bulk: Measured::mean_of(voigt_bulk, reuss_bulk),
        hill_shear: Measured::mean_of(voigt_shear, reuss_shear),
    })
}

fn voigt_bulk(c: &ElasticMatrix, e: &ErrorMatrix) -> Result<Measured> {
    let value = (1.0 / 9.0) * sum(NORMAL_DIAGONAL, |a, b| c[(a, b)])
        + (2.0 / 9.0) * sum(NORMAL_OFF_DIAGONAL, |a, b| c[(a, b)]);
    let variance = (1.0 / 9.0_f64).powi(2) * sum(NORMAL_DIAGONAL, |a, b| e[(a, b)].powi(2))
        + (2.0 / 9.0_f64).powi(2) * sum(NORMAL_OFF_DIAGONAL, |a, b| e[(a, b)].powi(2));
    Ok(Measured::new(
        finite(value, "Voigt bulk modulus")?,
        finite(variance.sqrt(), "Voigt bulk modulus error")?,
    ))
}

fn voigt_shear(c: &ElasticMatrix, e: &ErrorMatrix) -> Result<Measured> {
    let value = (1.0 / 15.0)
        * (sum(NORMAL_DIAGONAL, |a, b| c[(a, b)]) - sum(NORMAL_OFF_DIAGONAL, |a, b| c[(a, b)]))
        + (1.0 / 5.0) * sum(SHEAR_DIAGONAL, |a, b| c[(a, b)]);
    let variance = (1.0 / 15.0_f64).powi(2)
        * (sum(NORMAL_DIAGONAL, |a, b| e[(a, b)].powi(2))
            + sum(NORMAL_OFF_DIAGONAL, |a, b| e[(a, b)].powi(2)))
        + (1.0 / 5.0_f64).powi(2) * sum(SHEAR_DIAGONAL, |a, b| e[(a, b)].powi(2));
    Ok(Measured::new(
        finite(value, "Voigt shear modulus")?,
        finite(variance.sqrt(), "Voigt shear modulus error")?,
    ))
}

/// `numerator / denominator` where the denominator is `Σ w_k S[p_k]`
///
/// `σ = |numerator| · σ_denominator / denominator²`
fn reciprocal(
    numerator: f64,
    denominator: f64,
    terms: &[(f64, (usize, usize))],
    covariance: &CovarianceTensor,
    what: &str,
) -> Result<Measured> {
    let value = checked_div(numerator, denominator, what)?;
    // Rounding can push a vanishing variance slightly below zero.
    let sigma = covariance.combination_variance(terms).max(0.0).sqrt();
    let error = finite(numerator.abs() * sigma / (denominator * denominator), what)?;
    Ok(Measured::new(value, error))
}

fn sum(indices: &[(usize, usize)], f: impl Fn(usize, usize) -> f64) -> f64 {
    indices.iter().map(|&(a, b)| f(a, b)).sum()
}

fn linear_sum(terms: &[(f64, (usize, usize))], f: impl Fn(usize, usize) -> f64) -> f64 {
    terms.iter().map(|&(w, (a, b))| w * f(a, b)).sum()
}

fn weighted(groups: &[(f64, &[(usize, usize)])]) -> Vec<(f64, (usize, usize))> {
    groups
        .iter()
        .flat_map(|&(w, indices)| indices.iter().map(move |&p| (w, p)))
        .collect()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::DMatrix;

    fn isotropic(lambda: f64, mu: f64) -> ElasticMatrix {
        let mut m = DMatrix::zeros(6, 6);
        for i in 0..3 {
            for j in 0..3 {
                m[(i, j)] = if i == j { lambda + 2.0 * mu } else { lambda };
            }
            m[(i + 3, i + 3)] = mu;
        }
        ElasticMatrix::new(m).unwrap()
    }

    /// Cubic MgO-like constants (GPa)
    fn cubic(c11: f64, c12: f64, c44: f64) -> ElasticMatrix {
        let mut m = DMatrix::zeros(6, 6);
        for i in 0..3 {
            for j in 0..3 {
                m[(i, j)] = if i == j { c11 } else { c12 };
            }
            m[(i + 3, i + 3)] = c44;
        }
        ElasticMatrix::new(m).unwrap()
    }

    #[test]
    fn test_isotropic_bounds_coincide() {
        let c = isotropic(60.0, 40.0);
        let m = poly_cij(&c, &ErrorMatrix::zeros(6)).unwrap();

        assert_relative_eq!(m.voigt_bulk.value, m.reuss_bulk.value, max_relative = 1e-12);
        assert_relative_eq!(m.voigt_shear.value, m.reuss_shear.value, max_relative = 1e-12);
        assert_relative_eq!(m.voigt_shear.value, 40.0, max_relative = 1e-12);
    }

    #[test]
    fn test_cubic_closed_form() {
        let (c11, c12, c44) = (297.0, 95.0, 156.0);
        let m = poly_cij(&cubic(c11, c12, c44), &ErrorMatrix::zeros(6)).unwrap();

        // For cubic crystals B_V = B_R = (C11 + 2 C12) / 3
        let b = (c11 + 2.0 * c12) / 3.0;
        assert_relative_eq!(m.voigt_bulk.value, b, max_relative = 1e-12);
        assert_relative_eq!(m.reuss_bulk.value, b, max_relative = 1e-10);

        let gv = (c11 - c12 + 3.0 * c44) / 5.0;
        let gr = 5.0 * (c11 - c12) * c44 / (4.0 * c44 + 3.0 * (c11 - c12));
        assert_relative_eq!(m.voigt_shear.value, gv, max_relative = 1e-12);
        assert_relative_eq!(m.reuss_shear.value, gr, max_relative = 1e-10);
        assert!(m.voigt_shear.value >= m.reuss_shear.value);
    }

    #[test]
    fn test_hill_is_exact_mean() {
        let m = poly_cij(&cubic(297.0, 95.0, 156.0), &ErrorMatrix::zeros(6)).unwrap();
        assert_eq!(m.hill_bulk.value, (m.voigt_bulk.value + m.reuss_bulk.value) / 2.0);
        assert_eq!(m.hill_shear.value, (m.voigt_shear.value + m.reuss_shear.value) / 2.0);
    }

    #[test]
    fn test_voigt_errors_closed_form() {
        let c = cubic(297.0, 95.0, 156.0);
        let e = ErrorMatrix::new(DMatrix::from_element(6, 6, 1.0)).unwrap();
        let m = poly_cij(&c, &e).unwrap();

        // 3 * (1/9)² + 3 * (2/9)² = 15/81
        assert_relative_eq!(m.voigt_bulk.error, (15.0_f64 / 81.0).sqrt(), max_relative = 1e-12);
        // 6 * (1/15)² + 3 * (1/5)² = 6/225 + 27/225
        assert_relative_eq!(m.voigt_shear.error, (33.0_f64 / 225.0).sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_exact_input_gives_zero_errors() {
        let m = poly_cij(&cubic(297.0, 95.0, 156.0), &ErrorMatrix::zeros(6)).unwrap();
        for q in m.bulk().iter().chain(m.shear().iter()) {
            assert_eq!(q.error, 0.0);
        }
    }

    #[test]
    fn test_reuss_error_single_element() {
        // Uncertainty on C44 (index 3,3) only: bulk unaffected, Reuss shear not.
        let c = cubic(297.0, 95.0, 156.0);
        let mut e = DMatrix::zeros(6, 6);
        e[(3, 3)] = 2.0;
        let m = poly_cij(&c, &ErrorMatrix::new(e).unwrap()).unwrap();

        assert_eq!(m.reuss_bulk.error, 0.0);
        assert!(m.reuss_shear.error > 0.0);

        // G_R = 15 / (... + 3/C44 + ...): dG_R/dC44 = 15 * 3 / (Y² C44²)
        let s44 = 1.0 / 156.0;
        let y = 15.0 / m.reuss_shear.value;
        let expected = 15.0 * 3.0 * s44 * s44 * 2.0 / (y * y);
        assert_relative_eq!(m.reuss_shear.error, expected, max_relative = 1e-9);
    }

    #[test]
    fn test_hill_error() {
        let c = cubic(297.0, 95.0, 156.0);
        let e = ErrorMatrix::relative(&c, 0.01).unwrap();
        let m = poly_cij(&c, &e).unwrap();
        let expected = 0.5 * m.voigt_bulk.error.hypot(m.reuss_bulk.error);
        assert_relative_eq!(m.hill_bulk.error, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_requires_voigt_dimension() {
        let c = ElasticMatrix::from_row_slice(2, &[0.7, 0.2, 0.4, 0.6]).unwrap();
        assert_eq!(
            poly_cij(&c, &ErrorMatrix::zeros(2)).unwrap_err(),
            ElasticError::ShapeMismatch { expected: (6, 6), found: (2, 2) }
        );
    }

    #[test]
    fn test_singular_propagates() {
        let mut m = DMatrix::identity(6, 6) * 100.0;
        m[(5, 5)] = 0.0;
        let c = ElasticMatrix::new(m).unwrap();
        assert!(matches!(
            poly_cij(&c, &ErrorMatrix::zeros(6)),
            Err(ElasticError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_values_tuple_order() {
        let m = poly_cij(&cubic(297.0, 95.0, 156.0), &ErrorMatrix::zeros(6)).unwrap();
        let (bv, br, gv, gr, bh, gh) = m.values();
        assert_eq!(bv, m.voigt_bulk.value);
        assert_eq!(br, m.reuss_bulk.value);
        assert_eq!(gv, m.voigt_shear.value);
        assert_eq!(gr, m.reuss_shear.value);
        assert_eq!(bh, m.hill_bulk.value);
        assert_eq!(gh, m.hill_shear.value);
    }
}
