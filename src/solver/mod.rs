//! Matrix inversion with covariance propagation
//!
//! This module provides the numerical core of the crate: inverting a square
//! stiffness matrix and carrying the independent per-element uncertainties
//! of the input through the inversion into a full four-index covariance
//! tensor of the inverse.
//!
//! # Core Concepts
//!
//! 1. **Configuration** (`InversionConfiguration`) - HOW to invert
//!    - Singularity threshold (scale-invariant)
//!    - Whether to run the O(N⁶) covariance propagation
//!
//! 2. **Inverter** (`invert_cij`, `invert_cij_with`) - the numerical method
//!    - LU factorisation and inverse via nalgebra
//!    - Covariance tensor per Lefebvre et al. (2000), eq. 9
//!
//! 3. **Result** (`InversionResult`) - the solution
//!    - `S = C⁻¹`, element-wise `eS`, covariance tensor
//!
//! # Workflow Diagram
//!
//! ```text
//! ┌────────────────┐   ┌──────────────┐
//! │ ElasticMatrix  │   │ ErrorMatrix  │
//! └───────┬────────┘   └──────┬───────┘
//!         │                   │
//!         └─────────┬─────────┘
//!                   │
//!          ┌────────▼─────────┐
//!          │ LU + singularity │ ← SingularMatrix / ShapeMismatch
//!          └────────┬─────────┘
//!                   │
//!          ┌────────▼─────────┐
//!          │ Covariance O(N⁶) │ ← optional rayon fan-out
//!          └────────┬─────────┘
//!                   │
//!          ┌────────▼─────────┐
//!          │ InversionResult  │ (S, eS, cov)
//!          └──────────────────┘
//! ```
//!
//! # Error Handling
//!
//! All entry points return [`crate::Result`]:
//!
//! ```rust
//! use cij_rs::physics::{ElasticMatrix, ErrorMatrix};
//! use cij_rs::solver::invert_cij;
//! use cij_rs::ElasticError;
//!
//! let c = ElasticMatrix::from_row_slice(2, &[1.0, 2.0, 2.0, 4.0]).unwrap();
//! match invert_cij(&c, &ErrorMatrix::zeros(2)) {
//!     Err(ElasticError::SingularMatrix { .. }) => {}
//!     other => panic!("expected a singular matrix, got {other:?}"),
//! }
//! ```

// =================================================================================================
// Module Declarations
// =================================================================================================
mod covariance;
mod inversion;
mod traits;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// The threshold is stored in an AtomicUsize so that it can be changed at
// runtime (useful in benchmarks and tests) without a mutex on every call.
// Relaxed ordering is sufficient: the value is a performance hint, not a
// synchronisation point.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

/// Default number of covariance entries (N⁴) above which the propagation
/// kernel fans out to rayon.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

/// Runtime-configurable parallel-execution threshold.
///
/// Read via [`parallel_threshold()`], written via [`set_parallel_threshold()`].
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// The covariance kernel runs sequentially when N⁴ is at most this value,
/// and on the rayon pool otherwise, but only when the crate is compiled
/// with the `parallel` feature.
///
/// # Example
///
/// ```rust
/// use cij_rs::solver::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use cij_rs::solver::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(2048);
/// assert_eq!(parallel_threshold(), 2048);
///
/// // Restore so other tests are not affected.
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Only compiled in test builds.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use inversion::{invert_cij, invert_cij_with};
pub use traits::{InversionConfiguration, InversionResult, DEFAULT_SINGULAR_TOLERANCE};

// =================================================================================================
// Tests
// =================================================================================================
