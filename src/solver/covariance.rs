//! Covariance propagation through matrix inversion
//!
//! # Mathematical Background
//!
//! Treat every element `C[i,j]` as an independent random variable with
//! standard deviation `eC[i,j]`. The first-order sensitivity of the inverse
//! is
//!
//! ```text
//! ∂S[a,b] / ∂C[i,j] = -S[a,i] · S[j,b]
//! ```
//!
//! Composing two such sensitivities and summing over the independent inputs
//! gives the covariance between any two elements of the inverse
//! (Lefebvre, Keeler, Sobie & White, NIM A 451, 520 (2000), eq. 9):
//!
//! ```text
//! COV(S[a,b], S[c,d]) = Σ_i Σ_j  S[a,i]·S[c,i] · eC[i,j]² · S[j,b]·S[j,d]
//! ```
//!
//! # Cost
//!
//! - **Time**: O(N⁶), six nested bounded loops
//! - **Memory**: O(N⁴), one `f64` per index quadruple (1296 for N = 6)
//!
//! # Parallelism
//!
//! The tensor is assembled from N independent slabs, one per outer index
//! `a`. With the `parallel` feature the slabs are computed on the rayon pool
//! when N⁴ exceeds [`parallel_threshold()`](super::parallel_threshold).
//! Each slab is computed by the same kernel in both paths, so the result is
//! bit-identical.

use nalgebra::DMatrix;
use ndarray::Array4;

use crate::physics::CovarianceTensor;

/// Compute `COV(S[a,b], S[c,d])` for all quadruples
///
/// `inverse` is `S = C⁻¹`, `errors` holds the standard deviations `eC`.
/// Both must be N×N; the caller guarantees it.
pub(crate) fn propagate_covariance(inverse: &DMatrix<f64>, errors: &DMatrix<f64>) -> CovarianceTensor {
    let n = inverse.nrows();
    let variances = errors.map(|e| e * e);

    // One slab holds cov[a, .., .., ..] flattened as (b, c, d).
    // The factor order (S[a,i]·S[c,i]) · v · (S[j,b]·S[j,d]) is the same for
    // cov[a,b,c,d] and cov[c,d,a,b], which keeps the tensor exactly symmetric.
    let slab = |a: usize| -> Vec<f64> {
        let mut out = vec![0.0; n * n * n];
        for b in 0..n {
            for c in 0..n {
                for d in 0..n {
                    let mut acc = 0.0;
                    for i in 0..n {
                        let left = inverse[(a, i)] * inverse[(c, i)];
                        for j in 0..n {
                            acc += left * variances[(i, j)] * (inverse[(j, b)] * inverse[(j, d)]);
                        }
                    }
                    out[(b * n + c) * n + d] = acc;
                }
            }
        }
        out
    };

    let slabs = if n.pow(4) > super::parallel_threshold() {
        log::debug!("covariance propagation: N = {n}, parallel path");
        collect_slabs(n, slab)
    } else {
        log::debug!("covariance propagation: N = {n}, sequential path");
        (0..n).map(slab).collect::<Vec<_>>()
    };

    let mut tensor = Array4::zeros((n, n, n, n));
    for (a, values) in slabs.iter().enumerate() {
        for b in 0..n {
            for c in 0..n {
                for d in 0..n {
                    tensor[[a, b, c, d]] = values[(b * n + c) * n + d];
                }
            }
        }
    }

    CovarianceTensor::from_array(tensor)
}

/// Element-wise uncertainties from the diagonal slice of the covariance
pub(crate) fn diagonal_errors(covariance: &CovarianceTensor) -> DMatrix<f64> {
    let n = covariance.dim();
    // Every summand of a diagonal entry is a product of squares, so the
    // variance is never negative.
    DMatrix::from_fn(n, n, |a, b| covariance.variance(a, b).sqrt())
}

#[cfg(feature = "parallel")]
fn collect_slabs<F>(n: usize, slab: F) -> Vec<Vec<f64>>
where
    F: Fn(usize) -> Vec<f64> + Sync + Send,
{
    use rayon::prelude::*;

    (0..n).into_par_iter().map(slab).collect()
}

// parallel feature not compiled in: fall through to sequential.
#[cfg(not(feature = "parallel"))]
fn collect_slabs<F>(n: usize, slab: F) -> Vec<Vec<f64>>
where
    F: Fn(usize) -> Vec<f64>,
{
    (0..n).map(slab).collect()
}

// =================================================================================================
// Tests
// =================================================================================================
