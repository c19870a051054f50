//! Output of averaging results
//!
//! - **Report**: fixed-width text table for the terminal
//! - **Export**: CSV data export for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── report.rs           ← Text report
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cij_rs::output::{write_report, Report, ReportConfig};
//! use cij_rs::output::export::export_moduli_csv;
//!
//! write_report(&mut std::io::stdout(), &Report::new(&c, &moduli), &ReportConfig::default())?;
//! export_moduli_csv(&moduli, "moduli.csv", None)?;
//! ```

pub mod export;
pub mod report;

pub use export::{export_moduli_csv, CsvConfig, CsvError};
pub use report::{render_report, write_report, Report, ReportConfig};
