//! Polycrystal models built on the inverted stiffness matrix
//!
//! Every function here is pure: it takes a stiffness matrix (and, where
//! relevant, its uncertainties or sample parameters) and returns a value
//! object. Data flows strictly upward:
//!
//! ```text
//! solver::invert_cij ──▶ poly_cij ──┬──▶ zener_aniso / universal_aniso
//!                                   └──▶ anderson_debye
//! ```
//!
//! # Available Models
//!
//! ## [`poly_cij`] — polycrystal averages
//!
//! Voigt and Reuss bounds and Hill averages of the bulk and shear moduli,
//! each with a propagated uncertainty. Valid for every crystal system.
//!
//! ## [`zener_aniso`], [`universal_aniso`] — anisotropy
//!
//! The Zener ratio (meaningful for cubic crystals) and the Universal index
//! (any symmetry).
//!
//! ## [`anderson_debye`] — sound velocities and Debye temperature
//!
//! Transverse, longitudinal and mean sound velocities from the Hill moduli,
//! then the Debye temperature for a given density and cell.

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod anisotropy;
pub mod debye;
pub mod polycrystal;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use anisotropy::{universal_aniso, universal_aniso_cij, zener_aniso, AnisotropyIndices};
pub use debye::{
    anderson_debye, debye_from_hill, debye_from_moduli, estimate, DebyeResult, SampleParameters,
};
pub use polycrystal::{poly_cij, poly_cij_with, PolycrystalModuli, VOIGT_DIM};
