//! Sound velocities and Debye temperature from Hill moduli
//!
//! Follows Anderson, J. Phys. Chem. Solids 24, 909 (1963):
//!
//! ```text
//! v_s = sqrt(G / ρ)
//! v_l = sqrt((B + 4G/3) / ρ)
//! v_m = [ (2/v_s³ + 1/v_l³) / 3 ]^(-1/3)
//! θ_D = (h / k_B) · v_m · [ 3 / (4π V_p) ]^(1/3)
//! ```
//!
//! with `V_p = V_cell / n` the volume per particle.
//!
//! # Units
//!
//! - Moduli: GPa (converted to Pa internally)
//! - Density: kg/m³
//! - Cell volume: m³ ([`SampleParameters::from_cell_angstrom`] converts from Å³)
//! - Velocities: m/s, temperature: K
//!
//! No uncertainty is propagated into this stage.

use std::f64::consts::PI;

use crate::error::{finite, ElasticError, Result};
use crate::models::polycrystal::{poly_cij_with, PolycrystalModuli};
use crate::physics::constants::{ANGSTROM3_TO_M3, BOLTZMANN, GPA_TO_PA, PLANCK};
use crate::physics::{ElasticMatrix, ErrorMatrix};
use crate::solver::InversionConfiguration;

// =================================================================================================
// Sample parameters
// =================================================================================================

/// Physical description of the sample
///
/// All three values must be strictly positive (and finite).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleParameters {
    /// Density ρ \[kg/m³\]
    density: f64,
    /// Unit-cell volume \[m³\]
    cell_volume: f64,
    /// Number of particles (atoms) in the cell
    particles: usize,
}

impl SampleParameters {
    /// Create validated sample parameters (SI units)
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if any value is non-positive or not finite.
    pub fn new(density: f64, cell_volume: f64, particles: usize) -> Result<Self> {
        if !(density.is_finite() && density > 0.0) {
            return Err(ElasticError::invalid("density", density, "must be positive"));
        }
        if !(cell_volume.is_finite() && cell_volume > 0.0) {
            return Err(ElasticError::invalid("cell_volume", cell_volume, "must be positive"));
        }
        if particles == 0 {
            return Err(ElasticError::invalid("particles", 0.0, "must be positive"));
        }
        Ok(Self { density, cell_volume, particles })
    }

    /// Same as [`new`](Self::new) with the cell volume given in Å³
    pub fn from_cell_angstrom(density: f64, cell_volume_a3: f64, particles: usize) -> Result<Self> {
        Self::new(density, cell_volume_a3 * ANGSTROM3_TO_M3, particles)
    }

    /// Density \[kg/m³\]
    pub fn density(&self) -> f64 {
        self.density
    }

    /// Cell volume \[m³\]
    pub fn cell_volume(&self) -> f64 {
        self.cell_volume
    }

    /// Particles per cell
    pub fn particles(&self) -> usize {
        self.particles
    }

    /// Volume per particle \[m³\]
    pub fn volume_per_particle(&self) -> f64 {
        self.cell_volume / self.particles as f64
    }
}

// =================================================================================================
// Debye result
// =================================================================================================

/// Sound velocities and Debye temperature
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebyeResult {
    /// Transverse (shear) velocity v_s \[m/s\]
    pub transverse_velocity: f64,
    /// Longitudinal velocity v_l \[m/s\]
    pub longitudinal_velocity: f64,
    /// Mean sound velocity v_m \[m/s\]
    pub mean_velocity: f64,
    /// Debye temperature θ_D \[K\]
    pub debye_temperature: f64,
}

// =================================================================================================
// Estimation
// =================================================================================================

/// Full pipeline: averages from `Cij`, then velocities and θ_D
///
/// # Example
///
/// ```rust
/// use cij_rs::models::estimate;
/// use cij_rs::physics::{ElasticMatrix, ErrorMatrix};
/// use nalgebra::DMatrix;
///
/// // MgO-like cubic constants (GPa)
/// let mut m = DMatrix::zeros(6, 6);
/// for i in 0..3 {
///     for j in 0..3 {
///         m[(i, j)] = if i == j { 297.0 } else { 95.0 };
///     }
///     m[(i + 3, i + 3)] = 156.0;
/// }
/// let c = ElasticMatrix::new(m).unwrap();
///
/// let debye = estimate(3580.0, 74.7e-30, 8, &c, &ErrorMatrix::zeros(6)).unwrap();
/// assert!(debye.debye_temperature > 850.0 && debye.debye_temperature < 1050.0);
/// ```
pub fn estimate(
    density: f64,
    cell_volume: f64,
    particles: usize,
    stiffness: &ElasticMatrix,
    errors: &ErrorMatrix,
) -> Result<DebyeResult> {
    let sample = SampleParameters::new(density, cell_volume, particles)?;
    anderson_debye(&sample, stiffness, errors)
}

/// Averages from `Cij` for a validated sample, then velocities and θ_D
pub fn anderson_debye(
    sample: &SampleParameters,
    stiffness: &ElasticMatrix,
    errors: &ErrorMatrix,
) -> Result<DebyeResult> {
    // Only the Hill values are used; skip the covariance kernel.
    let moduli = poly_cij_with(stiffness, errors, &InversionConfiguration::values_only())?;
    debye_from_moduli(sample, &moduli)
}

/// Velocities and θ_D from precomputed polycrystal averages
pub fn debye_from_moduli(sample: &SampleParameters, moduli: &PolycrystalModuli) -> Result<DebyeResult> {
    debye_from_hill(sample, moduli.hill_bulk.value, moduli.hill_shear.value)
}

/// Velocities and θ_D from a Hill bulk/shear pair in GPa
///
/// # Errors
///
/// `DegenerateInput` if the shear modulus or the longitudinal modulus
/// `B + 4G/3` is not positive (the velocity would be zero or imaginary).
pub fn debye_from_hill(sample: &SampleParameters, bulk_gpa: f64, shear_gpa: f64) -> Result<DebyeResult> {
    let shear = shear_gpa * GPA_TO_PA;
    let longitudinal = (bulk_gpa + 4.0 / 3.0 * shear_gpa) * GPA_TO_PA;

    if !(shear.is_finite() && shear > 0.0) {
        return Err(ElasticError::degenerate(format!(
            "Hill shear modulus must be positive for sound velocities, got {shear_gpa} GPa"
        )));
    }
    if !(longitudinal.is_finite() && longitudinal > 0.0) {
        return Err(ElasticError::degenerate(format!(
            "longitudinal modulus B + 4G/3 must be positive, got {} GPa",
            longitudinal / GPA_TO_PA
        )));
    }

    let rho = sample.density();
    let v_s = finite((shear / rho).sqrt(), "transverse velocity")?;
    let v_l = finite((longitudinal / rho).sqrt(), "longitudinal velocity")?;
    let v_m = finite(
        ((2.0 / v_s.powi(3) + 1.0 / v_l.powi(3)) / 3.0).powf(-1.0 / 3.0),
        "mean sound velocity",
    )?;

    let number_density = 3.0 / (4.0 * PI * sample.volume_per_particle());
    let theta = finite(
        PLANCK / BOLTZMANN * v_m * number_density.cbrt(),
        "Debye temperature",
    )?;

    log::debug!("v_s = {v_s:.1} m/s, v_l = {v_l:.1} m/s, v_m = {v_m:.1} m/s, θ_D = {theta:.1} K");

    Ok(DebyeResult {
        transverse_velocity: v_s,
        longitudinal_velocity: v_l,
        mean_velocity: v_m,
        debye_temperature: theta,
    })
}

// =================================================================================================
// Tests
// =================================================================================================
