//! Reference stiffness matrices

use cij_rs::physics::{ElasticMatrix, ErrorMatrix};
use nalgebra::DMatrix;

/// 2×2 example of Lefebvre et al. (2000)
pub fn lefebvre() -> (ElasticMatrix, ErrorMatrix) {
    (
        ElasticMatrix::from_row_slice(2, &[0.700, 0.200, 0.400, 0.600]).unwrap(),
        ErrorMatrix::from_row_slice(2, &[0.007, 0.002, 0.004, 0.006]).unwrap(),
    )
}

/// Isotropic stiffness from the Lamé parameters λ, μ
pub fn isotropic(lambda: f64, mu: f64) -> ElasticMatrix {
    cubic(lambda + 2.0 * mu, lambda, mu)
}

/// Cubic stiffness from C11, C12, C44
pub fn cubic(c11: f64, c12: f64, c44: f64) -> ElasticMatrix {
    let mut m = DMatrix::zeros(6, 6);
    for i in 0..3 {
        for j in 0..3 {
            m[(i, j)] = if i == j { c11 } else { c12 };
        }
        m[(i + 3, i + 3)] = c44;
    }
    ElasticMatrix::new(m).unwrap()
}

/// Periclase (MgO) at ambient conditions, GPa
pub fn mgo() -> ElasticMatrix {
    cubic(297.0, 95.0, 156.0)
}

/// Forsterite-like orthorhombic stiffness, GPa
pub fn olivine() -> ElasticMatrix {
    ElasticMatrix::from_row_slice(6, &[
        328.0,  69.0,  69.0,  0.0,  0.0,  0.0,
         69.0, 200.0,  73.0,  0.0,  0.0,  0.0,
         69.0,  73.0, 235.0,  0.0,  0.0,  0.0,
          0.0,   0.0,   0.0, 66.7,  0.0,  0.0,
          0.0,   0.0,   0.0,  0.0, 81.3,  0.0,
          0.0,   0.0,   0.0,  0.0,  0.0, 80.9,
    ])
    .unwrap()
}
