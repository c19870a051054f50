//! Physical data model
//!
//! This module holds the value types that flow through the computation.
//! None of them has a lifecycle of its own: they are built, handed to a
//! pure function, and returned or dropped.
//!
//! # Core Concepts
//!
//! - **Stiffness** ([`ElasticMatrix`]): the single-crystal `Cij` (GPa)
//! - **Uncertainty** ([`ErrorMatrix`]): independent standard deviations on `Cij`
//! - **Compliance** ([`ComplianceMatrix`]): `Sij = Cij⁻¹` (GPa⁻¹)
//! - **Covariance** ([`CovarianceTensor`]): `COV(Sab, Scd)`, four indices
//! - **Measured**: a scalar with its propagated uncertainty
//!
//! # Example
//!
//! ```rust
//! use cij_rs::physics::{ElasticMatrix, ErrorMatrix};
//!
//! let c = ElasticMatrix::from_row_slice(2, &[0.7, 0.2, 0.4, 0.6]).unwrap();
//! let e = ErrorMatrix::from_row_slice(2, &[0.007, 0.002, 0.004, 0.006]).unwrap();
//! assert!(e.check_pairs_with(&c).is_ok());
//! ```

// module declaration
pub mod constants;
pub mod data;
pub mod measured;

// re-export commonly used types for convenience
pub use data::{
    ComplianceMatrix,
    CovarianceTensor,
    ElasticMatrix,
    ErrorMatrix, };
pub use measured::Measured;
