//! Recursive least squares adaptive filtering.
//!
//! [`Rls`] identifies an unknown FIR system from an input stream and a
//! desired (reference) signal. Per sample it updates a gain vector, the
//! weight estimate, and the inverse correlation matrix:
//!
//! ```text
//! k = P·x / (λ + xᵀ·P·x)
//! w ← w + k·e          e = d - wᵀ·x
//! P ← (P - k·(P·x)ᵀ) / λ
//! ```
//!
//! RLS converges in tens of samples where LMS needs thousands, at
//! O(order²) cost per sample.
//!
//! # Examples
//!
//! ```
//! use sigmath::adaptive::Rls;
//!
//! let plant = [0.4, -0.2, 0.1];
//! let mut rls = Rls::new(3, 0.99, 100.0);
//! let mut delay = [0.0_f64; 3];
//! for i in 0..200 {
//!     let x = ((i * 7 + 3) % 11) as f64 - 5.0;
//!     delay.rotate_right(1);
//!     delay[0] = x;
//!     let d: f64 = plant.iter().zip(delay.iter()).map(|(h, s)| h * s).sum();
//!     rls.update(x, d);
//! }
//! assert!((rls.weights().at(0) - 0.4).abs() < 1e-6);
//! ```

use crate::matrix::Matrix;
use crate::vector::Vector;

/// Recursive least squares filter state.
#[derive(Debug, Clone)]
pub struct Rls {
    weights: Vector<f64>,
    window: Vector<f64>, // input history, newest at index 0
    p: Matrix<f64>,      // inverse correlation estimate
    lambda: f64,
}

impl Rls {
    /// Create an RLS filter of `order` taps.
    ///
    /// `lambda` is the forgetting factor, clamped into `[0.01, 1.0]`
    /// (1.0 means infinite memory; 0.95–0.999 is typical). `delta`
    /// scales the initial inverse correlation `P = δ·I`; larger values
    /// mean less confidence in the zero initial weights and faster
    /// early adaptation. A zero order is promoted to 1.
    pub fn new(order: usize, lambda: f64, delta: f64) -> Self {
        let order = order.max(1);
        Rls {
            weights: Vector::zeros(order),
            window: Vector::zeros(order),
            p: &Matrix::identity(order) * delta,
            lambda: lambda.clamp(0.01, 1.0),
        }
    }

    pub fn order(&self) -> usize {
        self.weights.len()
    }

    /// The current weight estimate (tap 0 multiplies the newest
    /// sample).
    pub fn weights(&self) -> &Vector<f64> {
        &self.weights
    }

    /// Filter output for the current window, without adapting.
    pub fn predict(&self) -> f64 {
        self.weights.dot(&self.window)
    }

    /// Feed one input/desired pair; returns the a-priori error
    /// `d - wᵀ·x` (before this sample's weight update).
    pub fn update(&mut self, x: f64, desired: f64) -> f64 {
        self.window.push_front(x);
        let error = desired - self.weights.dot(&self.window);

        // px = P·x; the denominator is the regularized input power.
        let n = self.order();
        let px = Vector::from_fn(n, |i| self.p[i].dot(&self.window));
        let denom = self.lambda + self.window.dot(&px);
        let gain = &px / denom;

        self.weights += &(&gain * error);

        // P is symmetric, so xᵀ·P = (P·x)ᵀ and the update is a rank-1
        // downdate by gain·pxᵀ.
        let outer = Matrix::from_fn(n, n, |i, j| gain[i] * px[j]);
        self.p -= &outer;
        self.p /= self.lambda;

        error
    }

    /// Forget everything: zero weights and window, reset `P` to its
    /// initial scale times the identity.
    pub fn reset(&mut self, delta: f64) {
        let n = self.order();
        self.weights = Vector::zeros(n);
        self.window = Vector::zeros(n);
        self.p = &Matrix::identity(n) * delta;
    }
}
