//! Whitespace-delimited text reader

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::error::ElasticError;
use crate::physics::{ElasticMatrix, ErrorMatrix};

/// Errors raised while reading a matrix file
#[derive(Error, Debug)]
pub enum InputError {
    /// The file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        /// Offending path
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A token is not a number.
    #[error("Line {line}: cannot parse `{token}` as a number")]
    Parse {
        /// 1-based line number
        line: usize,
        /// Offending token
        token: String,
    },

    /// A row has a different number of columns than the first one.
    #[error("Line {line}: expected {expected} columns, found {found}")]
    Ragged {
        /// 1-based line number
        line: usize,
        /// Columns in the first data row
        expected: usize,
        /// Columns in this row
        found: usize,
    },

    /// No data rows were found.
    #[error("No matrix data found")]
    Empty,

    /// The rows parsed but do not form a valid matrix.
    #[error(transparent)]
    Matrix(#[from] ElasticError),
}

/// Parse rows of numbers from text
///
/// # Example
///
/// ```rust
/// use cij_rs::input::parse_rows;
///
/// let rows = parse_rows("# comment\n1 2\n\n3 4\n").unwrap();
/// assert_eq!(rows, vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
/// ```
pub fn parse_rows(text: &str) -> Result<Vec<Vec<f64>>, InputError> {
    let mut rows: Vec<Vec<f64>> = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| InputError::Parse {
                    line: index + 1,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<f64>, _>>()?;

        if let Some(first) = rows.first()
            && first.len() != row.len()
        {
            return Err(InputError::Ragged {
                line: index + 1,
                expected: first.len(),
                found: row.len(),
            });
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(InputError::Empty);
    }
    Ok(rows)
}

/// Parse a stiffness matrix from text
pub fn parse_matrix(text: &str) -> Result<ElasticMatrix, InputError> {
    Ok(ElasticMatrix::from_rows(&parse_rows(text)?)?)
}

/// Read a stiffness matrix from a file
pub fn read_matrix(path: impl AsRef<Path>) -> Result<ElasticMatrix, InputError> {
    let text = read_text(path.as_ref())?;
    let matrix = parse_matrix(&text)?;
    log::debug!("read {n}x{n} matrix from {}", path.as_ref().display(), n = matrix.dim());
    Ok(matrix)
}

/// Read an uncertainty matrix from a file
pub fn read_errors(path: impl AsRef<Path>) -> Result<ErrorMatrix, InputError> {
    let text = read_text(path.as_ref())?;
    Ok(ErrorMatrix::from_rows(&parse_rows(&text)?)?)
}

fn read_text(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|source| InputError::Io {
        path: path.display().to_string(),
        source,
    })
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_comments_and_scientific() {
        let rows = parse_rows("  # header\n1.0e2 -3\n\t4 5.5  \n").unwrap();
        assert_eq!(rows, vec![vec![100.0, -3.0], vec![4.0, 5.5]]);
    }

    #[test]
    fn test_parse_error_reports_line() {
        match parse_rows("1 2\n3 x\n") {
            Err(InputError::Parse { line, token }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "x");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_ragged_rows() {
        assert!(matches!(
            parse_rows("1 2\n3\n"),
            Err(InputError::Ragged { line: 2, expected: 2, found: 1 })
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_rows("\n# nothing\n"), Err(InputError::Empty)));
    }

    #[test]
    fn test_non_square_matrix() {
        assert!(matches!(
            parse_matrix("1 2 3\n4 5 6\n"),
            Err(InputError::Matrix(ElasticError::ShapeMismatch { .. }))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = read_matrix("/definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, InputError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn test_read_round_trip_through_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "0.7 0.2\n0.4 0.6\n").unwrap();
        let c = read_matrix(file.path()).unwrap();
        assert_eq!(c.dim(), 2);
        assert_eq!(c[(1, 0)], 0.4);
    }

    #[test]
    fn test_negative_errors_rejected() {
        assert!(matches!(
            ErrorMatrix::from_rows(&parse_rows("0.1 -0.1\n0 0\n").unwrap()).map_err(InputError::from),
            Err(InputError::Matrix(ElasticError::InvalidParameter { .. }))
        ));
    }
}
