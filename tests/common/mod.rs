//! Common utilities for integration tests

#![allow(dead_code)]

pub mod fixtures;
pub mod test_helpers;

// Re-export commonly used items
pub use fixtures::{cubic, isotropic, lefebvre, mgo, olivine};
pub use test_helpers::{assert_matrix_close, relative_error, write_temp_matrix};
