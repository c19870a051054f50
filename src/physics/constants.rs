//! Physical constants and unit conversions
//!
//! Exact SI values (2019 redefinition). These are fixed facts, not tunable
//! parameters, so they are plain `const`s.

/// Planck constant h \[J·s\]
pub const PLANCK: f64 = 6.626_070_15e-34;

/// Boltzmann constant k_B \[J/K\]
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// Conversion factor from GPa (stiffness input unit) to Pa
pub const GPA_TO_PA: f64 = 1.0e9;

/// Conversion factor from Å³ (typical cell volume unit) to m³
pub const ANGSTROM3_TO_M3: f64 = 1.0e-30;

/// Conversion factor from g/cm³ to kg/m³
pub const G_CM3_TO_KG_M3: f64 = 1.0e3;
