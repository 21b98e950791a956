//! Cost function interface for the minimizer.
//!
//! The optimizer only ever talks to the objective through [`CostFunction`]:
//! one mandatory operation that evaluates the value and fills the gradient,
//! and one optional operation that bounds the step length along a search
//! direction. Any context the objective needs lives inside the implementing
//! value; the optimizer never inspects it.
//!
//! # Design Philosophy
//!
//! - The gradient is written into a buffer owned by the optimizer, so an
//!   evaluation never has to allocate
//! - Evaluation takes `&mut self`, letting objectives keep caches or counters
//!   without interior mutability
//! - Closures can be used directly through [`FnCostFunction`]

use crate::types::{DVector, Scalar};
use std::fmt::Debug;

/// Trait for objectives minimized by the optimizer.
pub trait CostFunction<T: Scalar> {
    /// Evaluates the objective at `point`, writes its gradient into `gradient`
    /// and returns the objective value.
    ///
    /// `gradient` has the same length as `point`; its previous content is
    /// unspecified and must be fully overwritten.
    fn cost_and_gradient(&mut self, point: &DVector<T>, gradient: &mut DVector<T>) -> T;

    /// Returns an upper bound on the step multiplier along `direction`
    /// starting from `point`, or `None` to leave the configured maximum
    /// step in place.
    ///
    /// The optimizer never lets the bound exceed its own `max_step`.
    ///
    /// # Default Implementation
    ///
    /// Returns `None`.
    fn step_bound(&mut self, point: &DVector<T>, direction: &DVector<T>) -> Option<T> {
        let _ = (point, direction);
        None
    }
}

impl<T: Scalar, C: CostFunction<T> + ?Sized> CostFunction<T> for &mut C {
    fn cost_and_gradient(&mut self, point: &DVector<T>, gradient: &mut DVector<T>) -> T {
        (**self).cost_and_gradient(point, gradient)
    }

    fn step_bound(&mut self, point: &DVector<T>, direction: &DVector<T>) -> Option<T> {
        (**self).step_bound(point, direction)
    }
}

/// Adapter turning a closure into a [`CostFunction`].
///
/// # Example
///
/// ```rust
/// use lbfgslite_core::cost_function::{CostFunction, FnCostFunction};
/// use lbfgslite_core::types::DVector;
///
/// let mut sphere = FnCostFunction::new(|x: &DVector<f64>, g: &mut DVector<f64>| {
///     g.copy_from(&(x * 2.0));
///     x.norm_squared()
/// });
/// let x = DVector::from_vec(vec![1.0, 2.0]);
/// let mut g = DVector::zeros(2);
/// assert_eq!(sphere.cost_and_gradient(&x, &mut g), 5.0);
/// assert_eq!(g[1], 4.0);
/// ```
pub struct FnCostFunction<F> {
    evaluate: F,
}

impl<F> FnCostFunction<F> {
    /// Wraps `evaluate`.
    pub fn new(evaluate: F) -> Self {
        Self { evaluate }
    }

    /// Adds a step-bound closure to this objective.
    pub fn with_step_bound<B>(self, bound: B) -> BoundedFnCostFunction<F, B> {
        BoundedFnCostFunction {
            evaluate: self.evaluate,
            bound,
        }
    }
}

impl<F> Debug for FnCostFunction<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnCostFunction").finish_non_exhaustive()
    }
}

impl<T, F> CostFunction<T> for FnCostFunction<F>
where
    T: Scalar,
    F: FnMut(&DVector<T>, &mut DVector<T>) -> T,
{
    fn cost_and_gradient(&mut self, point: &DVector<T>, gradient: &mut DVector<T>) -> T {
        (self.evaluate)(point, gradient)
    }
}

/// Closure-based objective that also supplies a step bound.
pub struct BoundedFnCostFunction<F, B> {
    evaluate: F,
    bound: B,
}

impl<F, B> Debug for BoundedFnCostFunction<F, B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedFnCostFunction").finish_non_exhaustive()
    }
}

impl<T, F, B> CostFunction<T> for BoundedFnCostFunction<F, B>
where
    T: Scalar,
    F: FnMut(&DVector<T>, &mut DVector<T>) -> T,
    B: FnMut(&DVector<T>, &DVector<T>) -> T,
{
    fn cost_and_gradient(&mut self, point: &DVector<T>, gradient: &mut DVector<T>) -> T {
        (self.evaluate)(point, gradient)
    }

    fn step_bound(&mut self, point: &DVector<T>, direction: &DVector<T>) -> Option<T> {
        Some((self.bound)(point, direction))
    }
}

/// Separable quadratic `f(x) = Σ wᵢ (xᵢ - cᵢ)²`.
///
/// Its unique minimizer is `c` whenever every weight is positive.
#[derive(Debug, Clone)]
pub struct QuadraticCost<T: Scalar> {
    /// Minimizer
    pub center: DVector<T>,
    /// Per-coordinate weights
    pub weights: DVector<T>,
}

impl<T: Scalar> QuadraticCost<T> {
    /// Creates a quadratic with the given center and weights.
    pub fn new(center: DVector<T>, weights: DVector<T>) -> Self {
        Self { center, weights }
    }

    /// The unweighted sum of squares `Σ xᵢ²` in dimension `n`.
    pub fn sum_of_squares(n: usize) -> Self {
        Self::new(DVector::zeros(n), DVector::from_element(n, T::one()))
    }
}

impl<T: Scalar> CostFunction<T> for QuadraticCost<T> {
    fn cost_and_gradient(&mut self, point: &DVector<T>, gradient: &mut DVector<T>) -> T {
        let two = T::one() + T::one();
        let mut value = T::zero();
        for i in 0..point.len() {
            let r = point[i] - self.center[i];
            value += self.weights[i] * r * r;
            gradient[i] = two * self.weights[i] * r;
        }
        value
    }
}

/// Wrapper counting how often the inner objective is queried.
#[derive(Debug, Clone)]
pub struct CountingCostFunction<C> {
    /// The underlying cost function
    pub inner: C,
    /// Number of value/gradient evaluations
    pub evaluations: usize,
    /// Number of step-bound queries
    pub step_bound_queries: usize,
}

impl<C> CountingCostFunction<C> {
    /// Creates a new counting wrapper around a cost function.
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            evaluations: 0,
            step_bound_queries: 0,
        }
    }

    /// Resets all counters to zero.
    pub fn reset_counts(&mut self) {
        self.evaluations = 0;
        self.step_bound_queries = 0;
    }
}

impl<T: Scalar, C: CostFunction<T>> CostFunction<T> for CountingCostFunction<C> {
    fn cost_and_gradient(&mut self, point: &DVector<T>, gradient: &mut DVector<T>) -> T {
        self.evaluations += 1;
        self.inner.cost_and_gradient(point, gradient)
    }

    fn step_bound(&mut self, point: &DVector<T>, direction: &DVector<T>) -> Option<T> {
        self.step_bound_queries += 1;
        self.inner.step_bound(point, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_quadratic_cost() {
        let mut cost = QuadraticCost::new(
            DVector::from_vec(vec![1.0, -1.0]),
            DVector::from_vec(vec![2.0, 0.5]),
        );
        let x = DVector::from_vec(vec![2.0, 1.0]);
        let mut g = DVector::zeros(2);
        let value = cost.cost_and_gradient(&x, &mut g);
        assert_relative_eq!(value, 2.0 * 1.0 + 0.5 * 4.0);
        assert_relative_eq!(g[0], 4.0);
        assert_relative_eq!(g[1], 2.0);
        assert_eq!(cost.step_bound(&x, &g), None);
    }

    #[test]
    fn test_counting_wrapper() {
        let mut cost = CountingCostFunction::new(QuadraticCost::<f64>::sum_of_squares(3));
        let x = DVector::from_element(3, 1.0);
        let mut g = DVector::zeros(3);
        assert_relative_eq!(cost.cost_and_gradient(&x, &mut g), 3.0);
        assert_relative_eq!(cost.cost_and_gradient(&x, &mut g), 3.0);
        let _ = cost.step_bound(&x, &g);
        assert_eq!(cost.evaluations, 2);
        assert_eq!(cost.step_bound_queries, 1);
        cost.reset_counts();
        assert_eq!(cost.evaluations, 0);
    }

    #[test]
    fn test_closure_adapters() {
        let mut plain = FnCostFunction::new(|x: &DVector<f64>, g: &mut DVector<f64>| {
            g.fill(1.0);
            x.sum()
        });
        let x = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let mut g = DVector::zeros(3);
        assert_relative_eq!(plain.cost_and_gradient(&x, &mut g), 6.0);
        assert_eq!(plain.step_bound(&x, &g), None);

        let mut bounded = plain.with_step_bound(|_: &DVector<f64>, d: &DVector<f64>| 1.0 / d.norm());
        assert_relative_eq!(bounded.step_bound(&x, &g).unwrap(), 1.0 / 3.0_f64.sqrt());
    }

    #[test]
    fn test_mutable_reference_forwarding() {
        fn evaluate_once<C: CostFunction<f64>>(mut cost: C) -> f64 {
            let x = DVector::from_element(1, 2.0);
            let mut g = DVector::zeros(1);
            cost.cost_and_gradient(&x, &mut g)
        }

        let mut counting = CountingCostFunction::new(QuadraticCost::<f64>::sum_of_squares(1));
        assert_relative_eq!(evaluate_once(&mut counting), 4.0);
        assert_eq!(counting.evaluations, 1);
    }
}
