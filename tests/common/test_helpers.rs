//! Helper functions for integration tests

use std::io::Write;

use nalgebra::DMatrix;
use tempfile::NamedTempFile;

/// Compute relative error between computed and expected values
pub fn relative_error(computed: f64, expected: f64) -> f64 {
    if expected.abs() < 1e-10 {
        computed.abs()
    } else {
        ((computed - expected) / expected).abs()
    }
}

/// Assert that two matrices agree element-wise (absolute tolerance)
pub fn assert_matrix_close(a: &DMatrix<f64>, b: &DMatrix<f64>, tolerance: f64, message: &str) {
    assert_eq!(a.shape(), b.shape(), "{}: Dimension mismatch", message);
    for (i, (&v1, &v2)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (v1 - v2).abs();
        assert!(
            diff < tolerance,
            "{}: Element {} differs by {} (tolerance {})",
            message, i, diff, tolerance
        );
    }
}

/// Write a matrix as whitespace-delimited text into a temporary file
pub fn write_temp_matrix(matrix: &DMatrix<f64>, header: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "# {}", header).unwrap();
    for row in matrix.row_iter() {
        let cells: Vec<String> = row.iter().map(|v| format!("{:.4}", v)).collect();
        writeln!(file, "{}", cells.join("  ")).unwrap();
    }
    file.flush().unwrap();
    file
}
