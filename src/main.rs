use std::io;
use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueHint};

use cij_rs::input::{read_errors, read_matrix};
use cij_rs::models::{debye_from_moduli, poly_cij, universal_aniso, zener_aniso, SampleParameters};
use cij_rs::output::export::{export_moduli_csv, CsvConfig};
use cij_rs::output::{write_report, Report, ReportConfig};
use cij_rs::physics::ErrorMatrix;

type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
type Result<T> = std::result::Result<T, DynError>;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Voigt, Reuss and Hill moduli of a polycrystal from single-crystal elastic constants"
)]
struct Cli {
    /// Stiffness matrix Cij (GPa), whitespace-delimited rows
    #[arg(value_hint = ValueHint::FilePath)]
    stiffness: PathBuf,

    /// Matrix of standard uncertainties on Cij (same layout); zero when omitted
    #[arg(long, value_hint = ValueHint::FilePath)]
    errors: Option<PathBuf>,

    /// Decimal places in the report
    #[arg(long, default_value_t = 5)]
    precision: usize,

    /// Also write the moduli table to this CSV file
    #[arg(long, value_hint = ValueHint::FilePath)]
    csv: Option<PathBuf>,

    /// Density in kg/m³ (enables the Debye estimate)
    #[arg(long, requires_all = ["volume", "particles"])]
    density: Option<f64>,

    /// Unit-cell volume in Å³
    #[arg(long, requires_all = ["density", "particles"])]
    volume: Option<f64>,

    /// Number of atoms in the unit cell
    #[arg(long, requires_all = ["density", "volume"])]
    particles: Option<usize>,

    /// Do not echo the input matrix
    #[arg(long = "no-input", action = ArgAction::SetFalse, default_value_t = true)]
    show_input: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = try_main(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn try_main(cli: Cli) -> Result<()> {
    let stiffness = read_matrix(&cli.stiffness)?;
    let errors = match &cli.errors {
        Some(path) => read_errors(path)?,
        None => ErrorMatrix::zeros(stiffness.dim()),
    };
    log::info!("loaded {n}x{n} stiffness matrix from {}", cli.stiffness.display(), n = stiffness.dim());

    let moduli = poly_cij(&stiffness, &errors)?;

    let zener = zener_aniso(&stiffness)
        .inspect_err(|err| log::warn!("Zener ratio undefined: {err}"))
        .ok();
    let universal = universal_aniso(&moduli)
        .inspect_err(|err| log::warn!("Universal anisotropy index undefined: {err}"))
        .ok();
    let mut report = Report::new(&stiffness, &moduli).with_anisotropy(zener, universal);

    if let (Some(density), Some(volume), Some(particles)) = (cli.density, cli.volume, cli.particles) {
        let sample = SampleParameters::from_cell_angstrom(density, volume, particles)?;
        report = report.with_debye(debye_from_moduli(&sample, &moduli)?);
    }

    let config = ReportConfig::default()
        .precision(cli.precision)
        .show_errors(cli.errors.is_some())
        .show_input(cli.show_input);
    write_report(&mut io::stdout().lock(), &report, &config)?;

    if let Some(path) = &cli.csv {
        let csv = CsvConfig::default()
            .precision(cli.precision)
            .with_metadata("source", cli.stiffness.display().to_string());
        export_moduli_csv(&moduli, path, Some(&csv))?;
        log::info!("moduli written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_sample_options_require_each_other() {
        assert!(Cli::try_parse_from(["cij", "c.txt", "--density", "3580"]).is_err());
        let cli = Cli::try_parse_from([
            "cij", "c.txt", "--density", "3580", "--volume", "74.7", "--particles", "8",
        ])
        .unwrap();
        assert_eq!(cli.particles, Some(8));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from(["cij", "c.txt", "--no-input", "-vv"]).unwrap();
        assert!(!cli.show_input);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.precision, 5);
    }
}
