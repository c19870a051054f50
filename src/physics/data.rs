//! Matrix and tensor containers
//!
//! This module wraps the raw numeric storage used throughout the crate in
//! small value types that enforce their invariants on construction:
//!
//! - [`ElasticMatrix`]: square, finite stiffness matrix (Voigt notation, GPa)
//! - [`ErrorMatrix`]: standard uncertainties, same shape, non-negative
//! - [`ComplianceMatrix`]: inverse of an `ElasticMatrix` (GPa⁻¹)
//! - [`CovarianceTensor`]: `COV(S[a,b], S[c,d])` for every index quadruple
//!
//! Matrices are stored as `nalgebra::DMatrix<f64>` so that any N×N input is
//! accepted; the canonical case is N = 6. The four-index covariance is an
//! `ndarray::Array4<f64>`.
//!
//! # Memory Layout
//!
//! - **ElasticMatrix[N×N]**: 8N² bytes
//! - **CovarianceTensor[N×N×N×N]**: 8N⁴ bytes (10 kB for N = 6)

use nalgebra::DMatrix;
use ndarray::Array4;
use std::fmt;

use crate::error::{ElasticError, Result};

fn check_square(matrix: &DMatrix<f64>) -> Result<()> {
    let (rows, cols) = matrix.shape();
    if rows != cols || rows == 0 {
        let n = rows.max(cols).max(1);
        return Err(ElasticError::ShapeMismatch {
            expected: (n, n),
            found: (rows, cols),
        });
    }
    Ok(())
}

fn check_finite(matrix: &DMatrix<f64>, name: &'static str) -> Result<()> {
    match matrix.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(ElasticError::invalid(name, value, "entries must be finite")),
        None => Ok(()),
    }
}

// =================================================================================================
// Elastic (stiffness) matrix
// =================================================================================================

/// Single-crystal stiffness matrix `Cij` in Voigt notation
///
/// Square and finite. Symmetry is expected physically but not enforced:
/// the inversion and propagation routines do not rely on it.
///
/// # Example
///
/// ```rust
/// use cij_rs::physics::ElasticMatrix;
///
/// let c = ElasticMatrix::from_row_slice(2, &[0.7, 0.2, 0.4, 0.6]).unwrap();
/// assert_eq!(c.dim(), 2);
/// assert_eq!(c[(1, 0)], 0.4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ElasticMatrix(DMatrix<f64>);

impl ElasticMatrix {

    // ======================================= constructors =======================================

    /// Wrap a matrix, checking that it is square and finite
    pub fn new(matrix: DMatrix<f64>) -> Result<Self> {
        check_square(&matrix)?;
        check_finite(&matrix, "stiffness")?;
        Ok(Self(matrix))
    }

    /// Build an `n`×`n` matrix from row-major values
    pub fn from_row_slice(n: usize, values: &[f64]) -> Result<Self> {
        if values.len() != n * n {
            return Err(ElasticError::ShapeMismatch {
                expected: (n, n),
                found: (values.len() / n.max(1), n),
            });
        }
        Self::new(DMatrix::from_row_slice(n, n, values))
    }

    /// Build from nested rows (e.g. the output of a text reader)
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(ElasticError::ShapeMismatch {
                expected: (n, width),
                found: (n, bad.len()),
            });
        }
        Self::new(DMatrix::from_fn(n, width, |i, j| rows[i][j]))
    }

    // ========================================= accessors ========================================

    /// Matrix order N
    pub fn dim(&self) -> usize {
        self.0.nrows()
    }

    /// Underlying storage
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.0
    }

    /// Largest relative deviation from symmetry, `max |C_ij - C_ji| / max |C|`
    pub fn asymmetry(&self) -> f64 {
        let scale = self.0.amax();
        if scale == 0.0 {
            return 0.0;
        }
        (&self.0 - self.0.transpose()).amax() / scale
    }

    /// Natural log of the product of the Euclidean row norms (Hadamard
    /// bound on `|det C|`); `-inf` when a row is zero
    pub(crate) fn log_hadamard_bound(&self) -> f64 {
        self.0.row_iter().map(|row| row.norm().ln()).sum()
    }
}

impl std::ops::Index<(usize, usize)> for ElasticMatrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.0[index]
    }
}

impl fmt::Display for ElasticMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, &self.0)
    }
}

// =================================================================================================
// Error (uncertainty) matrix
// =================================================================================================

/// Standard uncertainties on the elements of an [`ElasticMatrix`]
///
/// Each entry is treated as the standard deviation of an independent
/// random variable. Entries must be finite and non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorMatrix(DMatrix<f64>);

impl ErrorMatrix {

    // ======================================= constructors =======================================

    /// Wrap a matrix, checking that it is square, finite and non-negative
    pub fn new(matrix: DMatrix<f64>) -> Result<Self> {
        check_square(&matrix)?;
        check_finite(&matrix, "uncertainty")?;
        if let Some(&value) = matrix.iter().find(|v| **v < 0.0) {
            return Err(ElasticError::invalid("uncertainty", value, "must be non-negative"));
        }
        Ok(Self(matrix))
    }

    /// Build an `n`×`n` error matrix from row-major values
    pub fn from_row_slice(n: usize, values: &[f64]) -> Result<Self> {
        if values.len() != n * n {
            return Err(ElasticError::ShapeMismatch {
                expected: (n, n),
                found: (values.len() / n.max(1), n),
            });
        }
        Self::new(DMatrix::from_row_slice(n, n, values))
    }

    /// Build from nested rows
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self> {
        let n = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if let Some(bad) = rows.iter().find(|r| r.len() != width) {
            return Err(ElasticError::ShapeMismatch {
                expected: (n, width),
                found: (n, bad.len()),
            });
        }
        Self::new(DMatrix::from_fn(n, width, |i, j| rows[i][j]))
    }

    /// Wrap values already known to be non-negative and finite
    pub(crate) fn from_propagated(matrix: DMatrix<f64>) -> Self {
        Self(matrix)
    }

    /// Exact values: every uncertainty is zero
    pub fn zeros(n: usize) -> Self {
        Self(DMatrix::zeros(n, n))
    }

    /// Same relative uncertainty on every element: `|C_ij| * fraction`
    pub fn relative(stiffness: &ElasticMatrix, fraction: f64) -> Result<Self> {
        if !(fraction.is_finite() && fraction >= 0.0) {
            return Err(ElasticError::invalid("fraction", fraction, "must be finite and non-negative"));
        }
        Ok(Self(stiffness.as_matrix().map(|c| c.abs() * fraction)))
    }

    // ========================================= accessors ========================================

    /// Matrix order N
    pub fn dim(&self) -> usize {
        self.0.nrows()
    }

    /// Underlying storage
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.0
    }

    /// Fail with `ShapeMismatch` unless this matrix pairs with `stiffness`
    pub fn check_pairs_with(&self, stiffness: &ElasticMatrix) -> Result<()> {
        let expected = stiffness.as_matrix().shape();
        let found = self.0.shape();
        if expected != found {
            return Err(ElasticError::ShapeMismatch { expected, found });
        }
        Ok(())
    }
}

impl std::ops::Index<(usize, usize)> for ErrorMatrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.0[index]
    }
}

impl fmt::Display for ErrorMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, &self.0)
    }
}

// =================================================================================================
// Compliance matrix
// =================================================================================================

/// Inverse of a stiffness matrix, `Sij = Cij⁻¹`
///
/// Only produced by the inversion routine; there is no public constructor,
/// so a compliance matrix always corresponds to some `ElasticMatrix`.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplianceMatrix(DMatrix<f64>);

impl ComplianceMatrix {
    pub(crate) fn from_inverse(matrix: DMatrix<f64>) -> Self {
        Self(matrix)
    }

    /// Matrix order N
    pub fn dim(&self) -> usize {
        self.0.nrows()
    }

    /// Underlying storage
    pub fn as_matrix(&self) -> &DMatrix<f64> {
        &self.0
    }

    /// Invert back to a stiffness matrix (used for round-trip checks)
    pub fn to_stiffness(&self) -> Result<ElasticMatrix> {
        crate::solver::invert_cij(
            &ElasticMatrix::new(self.0.clone())?,
            &ErrorMatrix::zeros(self.dim()),
        )
        .and_then(|inv| ElasticMatrix::new(inv.compliance.0))
    }
}

impl std::ops::Index<(usize, usize)> for ComplianceMatrix {
    type Output = f64;

    fn index(&self, index: (usize, usize)) -> &f64 {
        &self.0[index]
    }
}

impl fmt::Display for ComplianceMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, &self.0)
    }
}

// =================================================================================================
// Covariance tensor
// =================================================================================================

/// Four-index covariance between elements of the compliance matrix
///
/// `tensor[[a, b, c, d]] = COV(S[a,b], S[c,d])`. The slice `(a,b) == (c,d)`
/// holds the variances of the individual compliances.
#[derive(Debug, Clone, PartialEq)]
pub struct CovarianceTensor(Array4<f64>);

impl CovarianceTensor {
    pub(crate) fn from_array(array: Array4<f64>) -> Self {
        Self(array)
    }

    /// All-zero tensor for exact inputs
    pub fn zeros(n: usize) -> Self {
        Self(Array4::zeros((n, n, n, n)))
    }

    /// Index range N of every axis
    pub fn dim(&self) -> usize {
        self.0.shape()[0]
    }

    /// `COV(S[a,b], S[c,d])`
    #[inline]
    pub fn get(&self, a: usize, b: usize, c: usize, d: usize) -> f64 {
        self.0[[a, b, c, d]]
    }

    /// `VAR(S[a,b])`
    #[inline]
    pub fn variance(&self, a: usize, b: usize) -> f64 {
        self.0[[a, b, a, b]]
    }

    /// Variance of the linear combination `Σ_k w_k S[p_k]`
    ///
    /// `terms` lists `(weight, (row, column))` pairs; every pairwise
    /// covariance is included.
    pub fn combination_variance(&self, terms: &[(f64, (usize, usize))]) -> f64 {
        let mut variance = 0.0;
        for &(wk, (a, b)) in terms {
            for &(wl, (c, d)) in terms {
                variance += wk * wl * self.get(a, b, c, d);
            }
        }
        variance
    }

    /// Underlying storage
    pub fn as_array(&self) -> &Array4<f64> {
        &self.0
    }
}

// =================================================================================================
// Formatting
// =================================================================================================

fn write_rows(f: &mut fmt::Formatter<'_>, matrix: &DMatrix<f64>) -> fmt::Result {
    let precision = f.precision().unwrap_or(3);
    for row in matrix.row_iter() {
        let cells: Vec<String> = row
            .iter()
            .map(|v| format!("{:>10.*}", precision, v))
            .collect();
        writeln!(f, "{}", cells.join(" "))?;
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
