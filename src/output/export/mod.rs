//! Export module for averaging results.
//!
//! # Architecture
//!
//! This module defines the [`Exporter`] trait that abstracts the export format.
//! Each format is an independent implementation in its own sub-module, so a
//! new format means a new file without touching existing code.
//!
//! # Available formats
//!
//! | Format  | Module          |
//! |---------|-----------------|
//! | CSV     | [`csv`]         |

pub mod csv;

pub use csv::{export_moduli_csv, write_moduli_csv, CsvConfig, CsvError, CsvExporter};

use std::path::Path;

use crate::models::PolycrystalModuli;

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so the caller
/// can react precisely to the failure without boxing.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports the bulk and shear averages with their uncertainties.
    ///
    /// # Errors
    ///
    /// Returns an error if the path cannot be written or a value is not finite.
    fn export_moduli(&self, moduli: &PolycrystalModuli, path: &Path) -> Result<(), Self::Error>;
}
