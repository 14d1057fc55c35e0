//! Shifted logistic curves.
//!
//! Both scoring curves have the shape `amplitude / (1 + e^(-slope * (x - center))) + 1`,
//! so they rise from just above 1 to `amplitude + 1`, crossing
//! `amplitude / 2 + 1` at `x = center`.

/// A logistic curve lifted by one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Logistic {
    pub amplitude: f64,
    pub slope: f64,
    pub center: f64,
}

impl Logistic {
    pub const fn new(amplitude: f64, slope: f64, center: f64) -> Self {
        Self {
            amplitude,
            slope,
            center,
        }
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.amplitude / (1.0 + (-self.slope * (x - self.center)).exp()) + 1.0
    }

    /// Value at the center of the curve.
    pub fn midpoint(&self) -> f64 {
        self.amplitude / 2.0 + 1.0
    }

    /// Least upper bound of the curve.
    pub fn ceiling(&self) -> f64 {
        self.amplitude + 1.0
    }
}
