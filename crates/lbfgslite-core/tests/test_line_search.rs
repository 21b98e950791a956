//! Property tests for the backtracking line search.

use approx::assert_relative_eq;
use lbfgslite_core::{
    cost_function::{CostFunction, CountingCostFunction, QuadraticCost},
    line_search::{BacktrackingLineSearch, LineSearchParams, SearchOrigin},
    types::DVector,
};
use proptest::prelude::*;

/// Separable quadratic with positive weights.
fn quadratic(weights: &[f64]) -> CountingCostFunction<QuadraticCost<f64>> {
    let n = weights.len();
    CountingCostFunction::new(QuadraticCost::new(
        DVector::zeros(n),
        DVector::from_row_slice(weights),
    ))
}

#[test]
fn test_steepest_descent_on_ill_conditioned_quadratic() {
    let mut cost = quadratic(&[1.0, 1000.0]);
    let x0 = DVector::from_vec(vec![1.0, 1.0]);
    let mut g0 = DVector::zeros(2);
    let f0 = cost.cost_and_gradient(&x0, &mut g0);
    let d = -&g0;
    let mut x = DVector::zeros(2);
    let mut g = DVector::zeros(2);

    let search = BacktrackingLineSearch::new(LineSearchParams::default());
    let origin = SearchOrigin { point: &x0, gradient: &g0, value: f0 };
    let result = search.search(&mut cost, origin, &d, 1.0, &mut x, &mut g).unwrap();

    // Unit steps along -g overshoot badly in the stiff coordinate.
    assert!(result.evaluations > 1);
    assert!(result.value < f0);
    assert_relative_eq!(result.step_size, 0.5f64.powi(result.evaluations as i32 - 1));
    assert_eq!(cost.evaluations, 1 + result.evaluations);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_accepted_step_satisfies_armijo(
        weights in prop::collection::vec(0.1f64..100.0, 1..8),
        seed in prop::collection::vec(-5.0f64..5.0, 8),
        step in 0.01f64..10.0,
    ) {
        let n = weights.len();
        let mut cost = quadratic(&weights);
        let x0 = DVector::from_fn(n, |i, _| seed[i]);
        let mut g0 = DVector::zeros(n);
        let f0 = cost.cost_and_gradient(&x0, &mut g0);
        prop_assume!(g0.norm() > 1e-9);
        let d = -&g0;

        let mut x = DVector::zeros(n);
        let mut g = DVector::zeros(n);
        let params = LineSearchParams::default();
        let search = BacktrackingLineSearch::new(params);
        let origin = SearchOrigin { point: &x0, gradient: &g0, value: f0 };
        let result = search.search(&mut cost, origin, &d, step, &mut x, &mut g).unwrap();

        let slope = g0.dot(&d);
        prop_assert!(result.value <= f0 + params.c1 * result.step_size * slope);
        prop_assert!(result.evaluations >= 1 && result.evaluations <= params.max_iterations);
        let expected_step = step * 0.5f64.powi(result.evaluations as i32 - 1);
        prop_assert!((result.step_size - expected_step).abs() <= 1e-12 * step);
        for i in 0..n {
            let expected = x0[i] + result.step_size * d[i];
            prop_assert!((x[i] - expected).abs() <= 1e-12 * (1.0 + expected.abs()));
        }
    }
}
