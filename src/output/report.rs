//! Fixed-width text report
//!
//! Layout of the averages table (one `{:>16} : {:>w.p} {:>w.p} {:>w.p}` row
//! per modulus):
//!
//! ```text
//!                       Voigt       Reuss        Hill
//!     Bulk Modulus :   162.33333   162.33333   162.33333
//!              +/- :     0.00000     0.00000     0.00000
//!    Shear Modulus :   134.00000   128.09816   131.04908
//!              +/- :     0.00000     0.00000     0.00000
//! ```
//!
//! The input echo, the uncertainty rows, the anisotropy block and the Debye
//! block are all optional.

use std::io::{self, Write};

use crate::models::{DebyeResult, PolycrystalModuli};
use crate::physics::{ElasticMatrix, Measured};

const LABEL_WIDTH: usize = 16;

// =================================================================================================
// Configuration
// =================================================================================================

/// Report formatting options
///
/// # Example
///
/// ```rust
/// use cij_rs::output::ReportConfig;
///
/// let config = ReportConfig::default().precision(3).show_input(false);
/// assert_eq!(config.precision, 3);
/// assert!(config.show_errors);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Decimal places (default: 5)
    pub precision: usize,
    /// Column width for each value (default: 11)
    pub width: usize,
    /// Print a `+/-` row under each modulus (default: true)
    pub show_errors: bool,
    /// Echo the input matrix before the table (default: true)
    pub show_input: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            precision: 5,
            width: 11,
            show_errors: true,
            show_input: true,
        }
    }
}

impl ReportConfig {
    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: set column width
    pub fn width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Builder pattern: toggle uncertainty rows
    pub fn show_errors(mut self, show: bool) -> Self {
        self.show_errors = show;
        self
    }

    /// Builder pattern: toggle the input echo
    pub fn show_input(mut self, show: bool) -> Self {
        self.show_input = show;
        self
    }
}

// =================================================================================================
// Report content
// =================================================================================================

/// Everything printed by [`write_report`]
///
/// `None` anisotropy indices are printed as `undefined`.
#[derive(Debug, Clone)]
pub struct Report<'a> {
    pub stiffness: &'a ElasticMatrix,
    pub moduli: &'a PolycrystalModuli,
    pub zener: Option<f64>,
    pub universal: Option<f64>,
    pub debye: Option<DebyeResult>,
}

impl<'a> Report<'a> {
    /// Report with the averages table only
    pub fn new(stiffness: &'a ElasticMatrix, moduli: &'a PolycrystalModuli) -> Self {
        Self {
            stiffness,
            moduli,
            zener: None,
            universal: None,
            debye: None,
        }
    }

    /// Attach anisotropy indices
    pub fn with_anisotropy(mut self, zener: Option<f64>, universal: Option<f64>) -> Self {
        self.zener = zener;
        self.universal = universal;
        self
    }

    /// Attach a Debye block
    pub fn with_debye(mut self, debye: DebyeResult) -> Self {
        self.debye = Some(debye);
        self
    }
}

// =================================================================================================
// Writer
// =================================================================================================

/// Write the report to any writer
pub fn write_report<W: Write>(writer: &mut W, report: &Report<'_>, config: &ReportConfig) -> io::Result<()> {
    let (w, p) = (config.width, config.precision);

    if config.show_input {
        writeln!(writer, "Input matrix:")?;
        write!(writer, "{:.*}", p.min(3), report.stiffness)?;
        writeln!(writer)?;
    }

    writeln!(writer, "{:>lw$}   {:>w$} {:>w$} {:>w$}", "", "Voigt", "Reuss", "Hill", lw = LABEL_WIDTH)?;
    write_moduli_row(writer, "Bulk Modulus", &report.moduli.bulk(), config)?;
    write_moduli_row(writer, "Shear Modulus", &report.moduli.shear(), config)?;

    if report.zener.is_some() || report.universal.is_some() {
        writeln!(writer)?;
        write_scalar(writer, "Zener ratio", report.zener, p)?;
        write_scalar(writer, "Universal index", report.universal, p)?;
    }

    if let Some(debye) = &report.debye {
        writeln!(writer)?;
        writeln!(writer, "{:>lw$} : {:>w$.1} m/s", "v_s", debye.transverse_velocity, lw = LABEL_WIDTH)?;
        writeln!(writer, "{:>lw$} : {:>w$.1} m/s", "v_l", debye.longitudinal_velocity, lw = LABEL_WIDTH)?;
        writeln!(writer, "{:>lw$} : {:>w$.1} m/s", "v_m", debye.mean_velocity, lw = LABEL_WIDTH)?;
        writeln!(writer, "{:>lw$} : {:>w$.1} K", "Debye temperature", debye.debye_temperature, lw = LABEL_WIDTH)?;
    }
    Ok(())
}

/// Render the report into a `String`
pub fn render_report(report: &Report<'_>, config: &ReportConfig) -> String {
    let mut buffer = Vec::new();
    write_report(&mut buffer, report, config).expect("writing to a Vec cannot fail");
    String::from_utf8_lossy(&buffer).into_owned()
}

fn write_moduli_row<W: Write>(
    writer: &mut W,
    label: &str,
    values: &[Measured; 3],
    config: &ReportConfig,
) -> io::Result<()> {
    let (w, p) = (config.width, config.precision);
    writeln!(
        writer,
        "{:>lw$} : {:>w$.p$} {:>w$.p$} {:>w$.p$}",
        label,
        values[0].value,
        values[1].value,
        values[2].value,
        lw = LABEL_WIDTH
    )?;
    if config.show_errors {
        writeln!(
            writer,
            "{:>lw$} : {:>w$.p$} {:>w$.p$} {:>w$.p$}",
            "+/-",
            values[0].error,
            values[1].error,
            values[2].error,
            lw = LABEL_WIDTH
        )?;
    }
    Ok(())
}

fn write_scalar<W: Write>(writer: &mut W, label: &str, value: Option<f64>, precision: usize) -> io::Result<()> {
    match value {
        Some(v) => writeln!(writer, "{:>lw$} : {:.p$}", label, v, lw = LABEL_WIDTH, p = precision),
        None => writeln!(writer, "{:>lw$} : undefined", label, lw = LABEL_WIDTH),
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (ElasticMatrix, PolycrystalModuli) {
        let c = ElasticMatrix::new(nalgebra::DMatrix::identity(6, 6) * 100.0).unwrap();
        let moduli = PolycrystalModuli {
            voigt_bulk: Measured::new(160.0, 1.5),
            reuss_bulk: Measured::new(150.0, 2.0),
            voigt_shear: Measured::new(130.0, 0.5),
            reuss_shear: Measured::new(120.0, 0.25),
            hill_bulk: Measured::new(155.0, 1.25),
            hill_shear: Measured::new(125.0, 0.28),
        };
        (c, moduli)
    }

    #[test]
    fn test_table_layout() {
        let (c, moduli) = fixture();
        let text = render_report(&Report::new(&c, &moduli), &ReportConfig::default().show_input(false));
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[1], "    Bulk Modulus :   160.00000   150.00000   155.00000");
        assert_eq!(lines[2], "             +/- :     1.50000     2.00000     1.25000");
        assert_eq!(lines[3], "   Shear Modulus :   130.00000   120.00000   125.00000");
        assert!(lines[0].trim_start().starts_with("Voigt"));
        assert!(lines[0].ends_with("Hill"));
    }

    #[test]
    fn test_without_errors() {
        let (c, moduli) = fixture();
        let config = ReportConfig::default().show_input(false).show_errors(false).precision(2);
        let text = render_report(&Report::new(&c, &moduli), &config);
        assert!(!text.contains("+/-"));
        assert!(text.contains("160.00"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_input_echo() {
        let (c, moduli) = fixture();
        let text = render_report(&Report::new(&c, &moduli), &ReportConfig::default());
        assert!(text.starts_with("Input matrix:\n"));
        assert!(text.contains("100.000"));
    }

    #[test]
    fn test_undefined_zener() {
        let (c, moduli) = fixture();
        let report = Report::new(&c, &moduli).with_anisotropy(None, Some(0.5));
        let text = render_report(&report, &ReportConfig::default().show_input(false));
        assert!(text.contains("Zener ratio : undefined"));
        assert!(text.contains("Universal index : 0.50000"));
    }

    #[test]
    fn test_debye_block() {
        let (c, moduli) = fixture();
        let debye = DebyeResult {
            transverse_velocity: 6000.0,
            longitudinal_velocity: 9000.0,
            mean_velocity: 6600.0,
            debye_temperature: 940.0,
        };
        let report = Report::new(&c, &moduli).with_debye(debye);
        let text = render_report(&report, &ReportConfig::default().show_input(false));
        assert!(text.contains("Debye temperature :       940.0 K"));
        assert!(text.contains("v_m :      6600.0 m/s"));
    }
}
