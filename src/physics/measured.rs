//! Values carrying a standard uncertainty
//!
//! [`Measured`] pairs a scalar with its propagated standard deviation. The
//! arithmetic provided here assumes the operands are **independent**; the
//! averaging code uses it only where that assumption holds (or is the
//! documented approximation, e.g. the Hill mean of Voigt and Reuss bounds).
//! Correlated terms are combined through the covariance tensor instead.

use std::fmt;

/// A value together with its standard uncertainty
///
/// # Example
///
/// ```rust
/// use cij_rs::physics::Measured;
///
/// let a = Measured::new(10.0, 0.3);
/// let b = Measured::new(20.0, 0.4);
/// let sum = a + b;
/// assert_eq!(sum.value, 30.0);
/// assert!((sum.error - 0.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measured {
    /// Central value
    pub value: f64,
    /// Standard uncertainty (always ≥ 0)
    pub error: f64,
}

impl Measured {
    /// Create a value with uncertainty; the sign of `error` is discarded
    pub fn new(value: f64, error: f64) -> Self {
        Self { value, error: error.abs() }
    }

    /// A value known exactly
    pub fn exact(value: f64) -> Self {
        Self { value, error: 0.0 }
    }

    /// Relative uncertainty `error / |value|` (zero for a zero value)
    pub fn relative_error(&self) -> f64 {
        if self.value == 0.0 {
            0.0
        } else {
            self.error / self.value.abs()
        }
    }

    /// Arithmetic mean of two independent values
    ///
    /// The value is exactly `(a + b) / 2`; the error is half the
    /// root-sum-square of the two errors.
    pub fn mean_of(a: Measured, b: Measured) -> Self {
        Self {
            value: (a.value + b.value) / 2.0,
            error: 0.5 * a.error.hypot(b.error),
        }
    }

    /// Both value and error are finite
    pub fn is_finite(&self) -> bool {
        self.value.is_finite() && self.error.is_finite()
    }
}

// Operator overloading for independent quantities

impl std::ops::Add for Measured {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            value: self.value + rhs.value,
            error: self.error.hypot(rhs.error),
        }
    }
}

impl std::ops::Sub for Measured {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            value: self.value - rhs.value,
            error: self.error.hypot(rhs.error),
        }
    }
}

impl std::ops::Mul<f64> for Measured {
    type Output = Self;

    fn mul(self, scalar: f64) -> Self::Output {
        Self {
            value: self.value * scalar,
            error: self.error * scalar.abs(),
        }
    }
}

impl fmt::Display for Measured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(p) => write!(f, "{:.*} ± {:.*}", p, self.value, p, self.error),
            None => write!(f, "{} ± {}", self.value, self.error),
        }
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_discards_sign() {
        let m = Measured::new(1.0, -0.1);
        assert_eq!(m.error, 0.1);
    }

    #[test]
    fn test_subtraction_adds_errors_in_quadrature() {
        let d = Measured::new(5.0, 3.0) - Measured::new(2.0, 4.0);
        assert_eq!(d.value, 3.0);
        assert_relative_eq!(d.error, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scaling() {
        let m = Measured::new(2.0, 0.2) * -3.0;
        assert_eq!(m.value, -6.0);
        assert_relative_eq!(m.error, 0.6, epsilon = 1e-12);
    }

    #[test]
    fn test_mean_is_exact() {
        let a = Measured::new(0.1, 0.03);
        let b = Measured::new(0.7, 0.04);
        let m = Measured::mean_of(a, b);
        assert_eq!(m.value, (0.1 + 0.7) / 2.0);
        assert_relative_eq!(m.error, 0.025, epsilon = 1e-12);
    }

    #[test]
    fn test_relative_error() {
        assert_eq!(Measured::new(0.0, 1.0).relative_error(), 0.0);
        assert_relative_eq!(Measured::new(-4.0, 1.0).relative_error(), 0.25);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{:.2}", Measured::new(1.0, 0.25)), "1.00 ± 0.25");
    }
}
