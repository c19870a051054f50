//! Matrix input
//!
//! Reads a matrix from plain text: whitespace-delimited rows, one matrix per
//! file. Blank lines and lines starting with `#` are skipped, so annotated
//! data files load unchanged.
//!
//! ```text
//! # MgO, GPa
//! 297.0  95.0  95.0   0.0   0.0   0.0
//!  95.0 297.0  95.0   0.0   0.0   0.0
//! ...
//! ```

pub mod text;

pub use text::{parse_matrix, parse_rows, read_errors, read_matrix, InputError};
