//! Limited-memory BFGS minimizer.
//!
//! L-BFGS is a quasi-Newton method that approximates the inverse Hessian
//! from the m most recent correction pairs (see
//! [`correction_history`](crate::correction_history)). Each iteration
//! computes a search direction with the two-loop recursion and moves along
//! it with an Armijo backtracking line search.
//!
//! # Algorithm Overview
//!
//! 1. Validate the parameters; nothing is evaluated if they are invalid
//! 2. Evaluate f and g at the starting point; stop with `AlreadyMinimized`
//!    if `|g| / max(1, |x|) <= g_epsilon`
//! 3. Take a steepest-descent first step of length 1
//! 4. Each iteration:
//!    - bound the trial step (optionally tightened by the objective)
//!    - run the line search; on failure restore the pre-search point and stop
//!    - report progress; the callback may cancel
//!    - run the gradient test, the relative-decrease test and the iteration cap
//!    - record the correction pair and compute the next direction with a
//!      unit trial step
//!
//! # Example
//!
//! ```rust
//! use lbfgslite_core::prelude::*;
//! use lbfgslite_optim::Lbfgs;
//!
//! let mut cost = QuadraticCost::<f64>::sum_of_squares(3);
//! let mut x = DVector::from_vec(vec![1.0, -2.0, 0.5]);
//!
//! let result = Lbfgs::new(LbfgsParameters::default())
//!     .minimize(&mut x, &mut cost)
//!     .unwrap();
//!
//! assert_eq!(result.status, Status::Convergence);
//! assert!(result.value < 1e-8);
//! ```

use lbfgslite_core::{
    compute::vector_ops,
    cost_function::{CostFunction, CountingCostFunction},
    error::{LbfgsError, Result, Status},
    line_search::{BacktrackingLineSearch, LineSearchParams, SearchOrigin},
    memory::Workspace,
    optimization::{
        callback::{CallbackInfo, NoOpCallback, ProgressCallback},
        optimizer::{OptimizationResult, Optimizer},
        parameters::LbfgsParameters,
    },
    types::{DVector, Scalar},
};
use num_traits::Float;
use std::time::Instant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::correction_history::CorrectionHistory;

/// L-BFGS optimizer.
///
/// The optimizer holds only its parameters; every working buffer is created
/// for a run and released when the run returns.
///
/// # Examples
///
/// ```rust
/// use lbfgslite_core::prelude::*;
/// use lbfgslite_optim::Lbfgs;
///
/// // Stop once the objective improved by less than 1e-10 (relative)
/// // over the last 5 iterations, or after 200 iterations.
/// let lbfgs = Lbfgs::new(
///     LbfgsParameters::<f64>::new()
///         .with_mem_size(6)
///         .with_delta_test(5, 1e-10)
///         .with_max_iterations(200),
/// );
/// assert_eq!(lbfgs.parameters().mem_size, 6);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Lbfgs<T: Scalar> {
    params: LbfgsParameters<T>,
}

impl<T: Scalar> Default for Lbfgs<T> {
    fn default() -> Self {
        Self::new(LbfgsParameters::default())
    }
}

impl<T: Scalar> Lbfgs<T> {
    /// Creates an optimizer with the given parameters.
    pub fn new(params: LbfgsParameters<T>) -> Self {
        Self { params }
    }

    /// Returns the optimizer parameters.
    pub fn parameters(&self) -> &LbfgsParameters<T> {
        &self.params
    }

    /// Returns a mutable reference to the optimizer parameters.
    pub fn parameters_mut(&mut self) -> &mut LbfgsParameters<T> {
        &mut self.params
    }

    /// Returns the optimizer name.
    pub fn name(&self) -> &str {
        "L-BFGS"
    }

    /// Minimizes `cost_fn` starting from `point` without progress reporting.
    ///
    /// # Errors
    ///
    /// See [`Lbfgs::minimize_with_callback`].
    pub fn minimize<C>(&self, point: &mut DVector<T>, cost_fn: &mut C) -> Result<OptimizationResult<T>>
    where
        C: CostFunction<T> + ?Sized,
    {
        self.minimize_with_callback(point, cost_fn, &mut NoOpCallback)
    }

    /// Minimizes `cost_fn` starting from `point`, reporting every accepted
    /// iteration to `callback`.
    ///
    /// `point` is updated in place and holds the final iterate when the call
    /// returns: the last accepted point on success, on cancellation and on
    /// hitting the iteration cap, and the pre-search point when a line search
    /// fails.
    ///
    /// # Errors
    ///
    /// Returns the matching configuration error when the parameters are
    /// invalid for `point.len()` variables. In that case the objective is
    /// never evaluated and `point` is untouched. Every other outcome,
    /// including line-search failures, is reported in
    /// [`OptimizationResult::status`].
    pub fn minimize_with_callback<C, P>(
        &self,
        point: &mut DVector<T>,
        cost_fn: &mut C,
        callback: &mut P,
    ) -> Result<OptimizationResult<T>>
    where
        C: CostFunction<T> + ?Sized,
        P: ProgressCallback<T> + ?Sized,
    {
        let n = point.len();
        self.params.validate(n)?;

        let start_time = Instant::now();
        let mut cost = CountingCostFunction::new(cost_fn);
        let mut run = Run::new(n, &self.params);

        let mut value = cost.cost_and_gradient(point, &mut run.workspace.gradient);
        callback.on_optimization_start(point, value);
        log::debug!("L-BFGS start: n = {}, m = {}, f = {}", n, self.params.mem_size, value);

        let (status, iterations) = run.iterate(point, &mut value, &mut cost, callback);

        let result = OptimizationResult::new(value, status)
            .with_iterations(iterations)
            .with_evaluations(cost.evaluations)
            .with_gradient_norm(vector_ops::norm(&run.workspace.gradient))
            .with_duration(start_time.elapsed());

        match status {
            Status::Failed(err) => log::debug!(
                "L-BFGS failed after {} iterations ({} evaluations): {}",
                iterations,
                result.evaluations,
                err
            ),
            _ => log::debug!(
                "L-BFGS finished after {} iterations ({} evaluations): {}",
                iterations,
                result.evaluations,
                status
            ),
        }
        callback.on_optimization_end(&result);
        Ok(result)
    }
}

impl<T: Scalar> Optimizer<T> for Lbfgs<T> {
    fn name(&self) -> &str {
        Lbfgs::name(self)
    }

    fn optimize<C, P>(
        &mut self,
        point: &mut DVector<T>,
        cost_fn: &mut C,
        callback: &mut P,
    ) -> Result<OptimizationResult<T>>
    where
        C: CostFunction<T> + ?Sized,
        P: ProgressCallback<T> + ?Sized,
    {
        self.minimize_with_callback(point, cost_fn, callback)
    }
}

/// Minimizes `cost_fn` from `point` with the given parameters.
///
/// Shorthand for `Lbfgs::new(params.clone()).minimize(point, cost_fn)`.
///
/// # Errors
///
/// Returns a configuration error when `params` is invalid for `point.len()`
/// variables.
pub fn minimize<T, C>(
    point: &mut DVector<T>,
    cost_fn: &mut C,
    params: &LbfgsParameters<T>,
) -> Result<OptimizationResult<T>>
where
    T: Scalar,
    C: CostFunction<T> + ?Sized,
{
    Lbfgs::new(params.clone()).minimize(point, cost_fn)
}

/// State owned by a single run.
struct Run<'p, T: Scalar> {
    params: &'p LbfgsParameters<T>,
    workspace: Workspace<T>,
    history: CorrectionHistory<T>,
}

impl<'p, T: Scalar> Run<'p, T> {
    fn new(n: usize, params: &'p LbfgsParameters<T>) -> Self {
        Self {
            params,
            workspace: Workspace::with_size(n, params.past),
            history: CorrectionHistory::new(n, params.mem_size),
        }
    }

    /// Returns true when `|g| / max(1, |x|) <= g_epsilon`.
    fn gradient_test(&self, point_norm: T, gradient_norm: T) -> bool {
        gradient_norm / Float::max(point_norm, T::one()) <= self.params.g_epsilon
    }

    /// Runs the outer loop from an evaluated starting point and returns the
    /// terminal status with the number of accepted iterations.
    fn iterate<C, P>(
        &mut self,
        point: &mut DVector<T>,
        value: &mut T,
        cost: &mut C,
        callback: &mut P,
    ) -> (Status, usize)
    where
        C: CostFunction<T>,
        P: ProgressCallback<T> + ?Sized,
    {
        let params = self.params;
        let ws = &mut self.workspace;

        if let Some(window) = ws.past_values.as_mut() {
            window.push(*value);
        }

        let point_norm = vector_ops::norm(point);
        let gradient_norm = vector_ops::norm(&ws.gradient);
        if self.gradient_test(point_norm, gradient_norm) {
            log::debug!("starting point already satisfies the gradient test");
            return (Status::AlreadyMinimized, 0);
        }

        let ws = &mut self.workspace;
        vector_ops::negate_into(&mut ws.direction, &ws.gradient);
        let mut step = vector_ops::norm_inv(&ws.direction);
        let base_search = LineSearchParams::from_parameters(params);

        let mut k = 1;
        loop {
            let ws = &mut self.workspace;

            let mut max_step = params.max_step;
            if let Some(bound) = cost.step_bound(point, &ws.direction) {
                max_step = Float::min(bound, max_step);
            }
            if step >= max_step {
                step = max_step / (T::one() + T::one());
            }

            vector_ops::copy(&mut ws.previous_point, point);
            vector_ops::copy(&mut ws.previous_gradient, &ws.gradient);

            let search = BacktrackingLineSearch::new(base_search.with_max_step_size(max_step));
            let origin = SearchOrigin {
                point: &ws.previous_point,
                gradient: &ws.previous_gradient,
                value: *value,
            };
            let outcome =
                search.search(cost, origin, &ws.direction, step, point, &mut ws.gradient);

            let line_search = match outcome {
                Ok(line_search) => line_search,
                Err(err) => {
                    vector_ops::copy(point, &ws.previous_point);
                    vector_ops::copy(&mut ws.gradient, &ws.previous_gradient);
                    log::warn!("line search failed at iteration {}: {}", k, err);
                    return (Status::Failed(err), k - 1);
                }
            };
            *value = line_search.value;
            step = line_search.step_size;

            let point_norm = vector_ops::norm(point);
            let gradient_norm = vector_ops::norm(&ws.gradient);
            log::debug!(
                "iteration {}: f = {}, |g| = {}, step = {}, {} evaluation(s)",
                k,
                *value,
                gradient_norm,
                step,
                line_search.evaluations
            );

            let info = CallbackInfo {
                point,
                gradient: &ws.gradient,
                value: *value,
                point_norm,
                gradient_norm,
                step,
                iteration: k,
                line_search_evaluations: line_search.evaluations,
            };
            if !callback.on_iteration_end(&info) {
                log::debug!("canceled by the progress callback at iteration {}", k);
                return (Status::Failed(LbfgsError::Canceled), k);
            }

            if self.gradient_test(point_norm, gradient_norm) {
                return (Status::Convergence, k);
            }

            let ws = &mut self.workspace;
            if let Some(window) = ws.past_values.as_mut() {
                if window.is_full() {
                    if let Some(&past_value) = window.oldest() {
                        let rate = (past_value - *value) / *value;
                        if Float::abs(rate) < params.delta {
                            return (Status::Stop, k);
                        }
                    }
                }
                window.push(*value);
            }

            if params.max_iterations != 0 && params.max_iterations < k + 1 {
                return (Status::Failed(LbfgsError::MaximumIteration), k);
            }

            self.history
                .update(point, &ws.previous_point, &ws.gradient, &ws.previous_gradient);
            self.history.compute_direction(&ws.gradient, &mut ws.direction);

            k += 1;
            step = T::one();
        }
    }
}
