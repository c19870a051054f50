//! CSV export of polycrystal averages
//!
//! Writes one row per modulus with the Voigt, Reuss and Hill values and
//! their uncertainties, compatible with spreadsheets and pandas.
//!
//! # Quick Example
//!
//! ```rust,ignore
//! use cij_rs::output::export::{CsvConfig, CsvExporter, Exporter};
//!
//! let exporter = CsvExporter::new(CsvConfig::default().precision(3));
//! exporter.export_moduli(&moduli, "moduli.csv".as_ref())?;
//! ```
//!
//! **Output** (`moduli.csv`):
//! ```csv
//! quantity,voigt,voigt_err,reuss,reuss_err,hill,hill_err
//! bulk,162.333,0.000,162.333,0.000,162.333,0.000
//! shear,134.000,0.000,128.098,0.000,131.049,0.000
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::models::PolycrystalModuli;
use crate::output::export::Exporter;
use crate::physics::Measured;

// =============================================================================
// Errors
// =============================================================================

/// Errors raised by the CSV exporter
#[derive(Error, Debug)]
pub enum CsvError {
    /// Writing failed.
    #[error("CSV write failed: {0}")]
    Io(#[from] std::io::Error),

    /// A value to export is NaN or infinite.
    #[error("Invalid data: non-finite value in {0}")]
    NonFinite(&'static str),

    /// The delimiter would be ambiguous with the number format.
    #[error("Delimiter `{0}` clashes with the decimal separator")]
    AmbiguousDelimiter(char),
}

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: Column separator (default: ',')
/// - `decimal_separator`: Decimal point character (default: '.')
/// - `precision`: Number of decimal places (default: 6)
/// - `metadata`: Header comment lines written before the table
///
/// # Example
///
/// ```rust
/// use cij_rs::output::export::CsvConfig;
///
/// let config = CsvConfig::european().precision(3);
/// assert_eq!(config.delimiter, ';');
/// assert_eq!(config.precision, 3);
/// ```
#[derive(Clone, Debug)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// `key: value` pairs written as `# key: value` comments
    pub metadata: Vec<(String, String)>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            metadata: Vec::new(),
        }
    }
}

impl CsvConfig {
    /// Create config with European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: add a metadata comment line
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.push((key.into(), value.into()));
        self
    }

    fn validate(&self) -> Result<(), CsvError> {
        if self.delimiter == self.decimal_separator {
            return Err(CsvError::AmbiguousDelimiter(self.delimiter));
        }
        Ok(())
    }
}

// =============================================================================
// Exporter
// =============================================================================

/// CSV implementation of [`Exporter`]
#[derive(Clone, Debug, Default)]
pub struct CsvExporter {
    config: CsvConfig,
}

impl CsvExporter {
    /// Create an exporter with the given configuration
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }

    /// Current configuration
    pub fn config(&self) -> &CsvConfig {
        &self.config
    }
}

impl Exporter for CsvExporter {
    type Error = CsvError;

    fn export_moduli(&self, moduli: &PolycrystalModuli, path: &Path) -> Result<(), CsvError> {
        let mut writer = BufWriter::new(File::create(path)?);
        write_moduli_csv(&mut writer, moduli, &self.config)?;
        writer.flush()?;
        log::debug!("wrote moduli CSV to {}", path.display());
        Ok(())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    // Replace decimal separator if needed
    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn write_row<W: Write>(
    writer: &mut W,
    label: &'static str,
    values: &[Measured; 3],
    config: &CsvConfig,
) -> Result<(), CsvError> {
    if values.iter().any(|m| !m.is_finite()) {
        return Err(CsvError::NonFinite(label));
    }

    write!(writer, "{}", label)?;
    for m in values {
        write!(
            writer,
            "{d}{}{d}{}",
            format_number(m.value, config),
            format_number(m.error, config),
            d = config.delimiter
        )?;
    }
    writeln!(writer)?;
    Ok(())
}

// =============================================================================
// Export Functions
// =============================================================================

/// Write the moduli table to any writer
///
/// # Errors
///
/// - Non-finite values
/// - Delimiter equal to the decimal separator
/// - Write errors
pub fn write_moduli_csv<W: Write>(
    writer: &mut W,
    moduli: &PolycrystalModuli,
    config: &CsvConfig,
) -> Result<(), CsvError> {
    config.validate()?;

    for (key, value) in &config.metadata {
        writeln!(writer, "# {}: {}", key, value)?;
    }
    if !config.metadata.is_empty() {
        writeln!(writer, "#")?;
    }

    let header = ["quantity", "voigt", "voigt_err", "reuss", "reuss_err", "hill", "hill_err"];
    writeln!(writer, "{}", header.join(&config.delimiter.to_string()))?;

    write_row(writer, "bulk", &moduli.bulk(), config)?;
    write_row(writer, "shear", &moduli.shear(), config)?;
    Ok(())
}

/// Export the moduli table to a file with an optional configuration
pub fn export_moduli_csv(
    moduli: &PolycrystalModuli,
    output_path: impl AsRef<Path>,
    configuration: Option<&CsvConfig>,
) -> Result<(), CsvError> {
    let exporter = CsvExporter::new(configuration.cloned().unwrap_or_default());
    exporter.export_moduli(moduli, output_path.as_ref())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    fn sample_moduli() -> PolycrystalModuli {
        let vb = Measured::new(160.0, 1.0);
        let rb = Measured::new(150.0, 2.0);
        let vg = Measured::new(130.0, 0.5);
        let rg = Measured::new(120.0, 0.25);
        PolycrystalModuli {
            voigt_bulk: vb,
            reuss_bulk: rb,
            voigt_shear: vg,
            reuss_shear: rg,
            hill_bulk: Measured::mean_of(vb, rb),
            hill_shear: Measured::mean_of(vg, rg),
        }
    }

    #[test]
    fn test_default_layout() {
        let mut buffer = Vec::new();
        write_moduli_csv(&mut buffer, &sample_moduli(), &CsvConfig::default().precision(2)).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "quantity,voigt,voigt_err,reuss,reuss_err,hill,hill_err");
        assert!(lines[1].starts_with("bulk,160.00,1.00,150.00,2.00,155.00,"));
        assert!(lines[2].starts_with("shear,130.00,0.50,120.00,0.25,125.00,"));
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn test_european_format() {
        let mut buffer = Vec::new();
        write_moduli_csv(&mut buffer, &sample_moduli(), &CsvConfig::european().precision(1)).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.contains("bulk;160,0;1,0;150,0;2,0"));
    }

    #[test]
    fn test_metadata_header() {
        let config = CsvConfig::default().with_metadata("source", "mgo.txt");
        let mut buffer = Vec::new();
        write_moduli_csv(&mut buffer, &sample_moduli(), &config).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("# source: mgo.txt\n#\nquantity"));
    }

    #[test]
    fn test_ambiguous_delimiter() {
        let config = CsvConfig::default().delimiter('.');
        let mut buffer = Vec::new();
        assert!(matches!(
            write_moduli_csv(&mut buffer, &sample_moduli(), &config),
            Err(CsvError::AmbiguousDelimiter('.'))
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        let mut moduli = sample_moduli();
        moduli.reuss_shear.value = f64::NAN;
        let mut buffer = Vec::new();
        assert!(matches!(
            write_moduli_csv(&mut buffer, &moduli, &CsvConfig::default()),
            Err(CsvError::NonFinite("shear"))
        ));
    }

    #[test]
    fn test_export_to_file() {
        let file = NamedTempFile::new().unwrap();
        export_moduli_csv(&sample_moduli(), file.path(), None).unwrap();
        let content = fs::read_to_string(file.path()).unwrap();
        assert_eq!(content.lines().count(), 3);
    }
}
