//! cij-rs: Polycrystal Elastic Properties from Single-Crystal Constants
//!
//! Computes the Voigt, Reuss and Hill bulk and shear moduli of a random
//! polycrystal from a single-crystal stiffness matrix, with uncertainties
//! propagated through the matrix inversion, together with anisotropy indices
//! and a Debye-temperature estimate.
//!
//! # Architecture
//!
//! cij-rs is built on two core principles:
//!
//! 1. **Separation of Data and Numerics**
//!    - Value types hold validated matrices and measured scalars ([`physics`])
//!    - The inversion with covariance propagation is the numerical core ([`solver`])
//!    - Averages and estimators are pure functions on top ([`models`])
//!
//! 2. **Uncertainty everywhere**
//!    - Every modulus is a [`physics::Measured`] value
//!    - The full covariance tensor of the compliance matrix is available
//!
//! # Quick Start
//!
//! ```rust
//! use cij_rs::prelude::*;
//!
//! # fn main() -> cij_rs::Result<()> {
//! // Cubic MgO (GPa)
//! let c = ElasticMatrix::from_row_slice(6, &[
//!     297.0,  95.0,  95.0,   0.0,   0.0,   0.0,
//!      95.0, 297.0,  95.0,   0.0,   0.0,   0.0,
//!      95.0,  95.0, 297.0,   0.0,   0.0,   0.0,
//!       0.0,   0.0,   0.0, 156.0,   0.0,   0.0,
//!       0.0,   0.0,   0.0,   0.0, 156.0,   0.0,
//!       0.0,   0.0,   0.0,   0.0,   0.0, 156.0,
//! ])?;
//! let e = ErrorMatrix::relative(&c, 0.01)?;
//!
//! // 1. Polycrystal averages
//! let moduli = poly_cij(&c, &e)?;
//! assert!(moduli.reuss_shear.value <= moduli.voigt_shear.value);
//!
//! // 2. Anisotropy
//! let indices = AnisotropyIndices::compute(&c, &moduli)?;
//! assert!(indices.universal > 0.0);
//!
//! // 3. Debye temperature
//! let sample = SampleParameters::from_cell_angstrom(3580.0, 74.7, 8)?;
//! let debye = debye_from_moduli(&sample, &moduli)?;
//! assert!(debye.debye_temperature > 800.0);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`physics`]: Matrices, covariance tensor, measured values, constants
//! - [`solver`]: Inversion with error propagation
//! - [`models`]: Polycrystal averages, anisotropy, Debye temperature
//! - [`input`]: Plain-text matrix reader
//! - [`output`]: Text report and CSV export

// Core modules
pub mod error;
pub mod physics;

pub mod models;
pub mod solver;

// I/O
pub mod input;
pub mod output;

pub use error::{ElasticError, Result};

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //!
    //! use cij_rs::prelude::*;
    //! ```
    pub use crate::error::{ElasticError, Result};
    pub use crate::models::{anderson_debye,
                            debye_from_moduli,
                            poly_cij,
                            universal_aniso,
                            zener_aniso,
                            AnisotropyIndices,
                            DebyeResult,
                            PolycrystalModuli,
                            SampleParameters};
    pub use crate::physics::{ComplianceMatrix,
                             CovarianceTensor,
                             ElasticMatrix,
                             ErrorMatrix,
                             Measured};
    pub use crate::solver::{invert_cij,
                            invert_cij_with,
                            InversionConfiguration,
                            InversionResult};
}
