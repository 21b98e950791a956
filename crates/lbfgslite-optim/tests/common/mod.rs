//! Objectives shared by the integration tests.

#![allow(dead_code)]

use lbfgslite_core::{cost_function::CostFunction, types::DVector};

/// Chained Rosenbrock function; minimum 0 at (1, ..., 1). `n` must be even.
#[derive(Debug, Default)]
pub struct Rosenbrock;

impl CostFunction<f64> for Rosenbrock {
    fn cost_and_gradient(&mut self, x: &DVector<f64>, g: &mut DVector<f64>) -> f64 {
        let mut fx = 0.0;
        for i in (0..x.len()).step_by(2) {
            let t1 = 1.0 - x[i];
            let t2 = 10.0 * (x[i + 1] - x[i] * x[i]);
            g[i + 1] = 20.0 * t2;
            g[i] = -2.0 * (x[i] * g[i + 1] + t1);
            fx += t1 * t1 + t2 * t2;
        }
        fx
    }
}

/// The standard chained Rosenbrock start `(-1.2, 1, -1.2, 1, ...)`.
pub fn rosenbrock_start(n: usize) -> DVector<f64> {
    DVector::from_fn(n, |i, _| if i % 2 == 0 { -1.2 } else { 1.0 })
}

/// Reports a descent slope everywhere while every move raises the value:
/// `f(x) = 1 + |x|`, `g = (1, ..., 1)`.
#[derive(Debug, Default)]
pub struct NeverDecreasing;

impl CostFunction<f64> for NeverDecreasing {
    fn cost_and_gradient(&mut self, x: &DVector<f64>, g: &mut DVector<f64>) -> f64 {
        g.fill(1.0);
        1.0 + x.norm()
    }
}

/// One-dimensional double whose gradient grows along the first step, so the
/// first correction pair has negative curvature and the second direction
/// points uphill.
///
/// At `x = 0` it reports `(f, g) = (0, 1)`, elsewhere `(-1, 3)`. Starting from
/// 0 the first search accepts `x = -1`, giving `s = -1`, `y = 2`; the next
/// direction is `d = 1.5` with `g·d = 4.5 > 0`.
#[derive(Debug, Default)]
pub struct NegativeCurvature;

impl CostFunction<f64> for NegativeCurvature {
    fn cost_and_gradient(&mut self, x: &DVector<f64>, g: &mut DVector<f64>) -> f64 {
        if x[0] == 0.0 {
            g[0] = 1.0;
            0.0
        } else {
            g[0] = 3.0;
            -1.0
        }
    }
}

/// `f(x) = offset + Σ wᵢ (xᵢ - cᵢ)²`, bounded away from zero.
#[derive(Debug, Clone)]
pub struct ShiftedQuadratic {
    pub offset: f64,
    pub center: DVector<f64>,
    pub weights: DVector<f64>,
}

impl ShiftedQuadratic {
    pub fn new(offset: f64, center: Vec<f64>, weights: Vec<f64>) -> Self {
        Self {
            offset,
            center: DVector::from_vec(center),
            weights: DVector::from_vec(weights),
        }
    }
}

impl CostFunction<f64> for ShiftedQuadratic {
    fn cost_and_gradient(&mut self, x: &DVector<f64>, g: &mut DVector<f64>) -> f64 {
        let mut fx = self.offset;
        for i in 0..x.len() {
            let r = x[i] - self.center[i];
            fx += self.weights[i] * r * r;
            g[i] = 2.0 * self.weights[i] * r;
        }
        fx
    }
}
