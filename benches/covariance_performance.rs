//! Performance benchmarks for the inversion with covariance propagation
//!
//! # What We're Measuring
//!
//! 1. **Covariance propagation** for N = 2..6:
//!    - O(N⁶) multiply-adds, O(N⁴) memory
//!    - Time should grow by roughly (N+1)⁶/N⁶ per step
//!
//! 2. **Values only**: the same inversion with propagation disabled,
//!    which isolates the LU cost.
//!
//! 3. **Full averaging** (`poly_cij`) on a 6×6 matrix.
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench --bench covariance_performance
//!
//! # With the rayon fan-out
//! cargo bench --bench covariance_performance --features parallel
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use cij_rs::models::poly_cij;
use cij_rs::physics::{ElasticMatrix, ErrorMatrix};
use cij_rs::solver::{invert_cij, invert_cij_with, InversionConfiguration};
use nalgebra::DMatrix;

// =================================================================================================
// Fixtures
// =================================================================================================

/// Diagonally dominant, hence well-conditioned, N×N stiffness matrix
fn stiffness(n: usize) -> ElasticMatrix {
    let m = DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            200.0 + 10.0 * i as f64
        } else {
            50.0 / (1.0 + (i + j) as f64)
        }
    });
    ElasticMatrix::new(m).unwrap()
}

// =================================================================================================
// Benchmark Functions
// =================================================================================================

fn benchmark_covariance(c: &mut Criterion) {
    let mut group = c.benchmark_group("invert_cij");

    for n in 2..=6 {
        let cij = stiffness(n);
        let eij = ErrorMatrix::relative(&cij, 0.01).unwrap();

        group.bench_with_input(BenchmarkId::new("propagated", n), &n, |b, _| {
            b.iter(|| invert_cij(black_box(&cij), black_box(&eij)).unwrap())
        });

        let config = InversionConfiguration::values_only();
        group.bench_with_input(BenchmarkId::new("values_only", n), &n, |b, _| {
            b.iter(|| invert_cij_with(black_box(&cij), black_box(&eij), &config).unwrap())
        });
    }

    group.finish();
}

fn benchmark_poly_cij(c: &mut Criterion) {
    let cij = stiffness(6);
    let eij = ErrorMatrix::relative(&cij, 0.01).unwrap();

    c.bench_function("poly_cij 6x6", |b| {
        b.iter(|| poly_cij(black_box(&cij), black_box(&eij)).unwrap())
    });
}

criterion_group!(benches, benchmark_covariance, benchmark_poly_cij);
criterion_main!(benches);
