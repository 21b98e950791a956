//! Backtracking line search enforcing the Armijo condition.
//!
//! Given a starting point x₀ with gradient g₀ and value f₀, a search
//! direction d and an initial step α, the search tries
//!
//! ```text
//! x = x₀ + α d
//! ```
//!
//! and accepts the first trial satisfying the sufficient-decrease condition
//!
//! ```text
//! f(x) ≤ f₀ + c₁ α ⟨g₀, d⟩
//! ```
//!
//! Every rejected trial halves α. No curvature (Wolfe) condition is tested
//! and no interval of uncertainty is maintained.
//!
//! # Failure Modes
//!
//! | Condition | Error |
//! |-----------|-------|
//! | α ≤ 0 on entry | [`LbfgsError::InvalidParameters`] |
//! | ⟨g₀, d⟩ ≥ 0 | [`LbfgsError::IncreaseGradient`] |
//! | rejected trial with α < `min_step` | [`LbfgsError::MinimumStep`] |
//! | rejected trial with α > `max_step` | [`LbfgsError::MaximumStep`] |
//! | `max_linesearch` trials rejected | [`LbfgsError::MaximumLineSearch`] |
//!
//! On failure `point` and `gradient` hold the last trial; restoring the
//! starting point is the caller's job.

use crate::{
    compute::vector_ops,
    cost_function::CostFunction,
    error::{LbfgsError, Result},
    optimization::parameters::LbfgsParameters,
    types::{constants, DVector, Scalar},
};

/// Outcome of a successful line search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSearchResult<T: Scalar> {
    /// The accepted step size α
    pub step_size: T,

    /// The objective value f(x₀ + α d)
    pub value: T,

    /// Number of objective evaluations performed (at least one)
    pub evaluations: usize,
}

/// Parameters consumed by the backtracking search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSearchParams<T: Scalar> {
    /// Minimum step size before declaring failure
    pub min_step_size: T,

    /// Maximum step size before declaring failure
    pub max_step_size: T,

    /// Maximum number of trials
    pub max_iterations: usize,

    /// Armijo parameter c₁ for the sufficient decrease condition
    pub c1: T,
}

impl<T: Scalar> LineSearchParams<T> {
    /// Extracts the line-search parameters from a run configuration.
    pub fn from_parameters(params: &LbfgsParameters<T>) -> Self {
        Self {
            min_step_size: params.min_step,
            max_step_size: params.max_step,
            max_iterations: params.max_linesearch,
            c1: params.f_dec_coeff,
        }
    }

    /// Replaces the maximum step size.
    pub fn with_max_step_size(mut self, max_step_size: T) -> Self {
        self.max_step_size = max_step_size;
        self
    }
}

impl<T: Scalar> Default for LineSearchParams<T> {
    fn default() -> Self {
        Self::from_parameters(&LbfgsParameters::default())
    }
}

/// Starting state of a line search: x₀, g₀ = ∇f(x₀) and f₀ = f(x₀).
#[derive(Debug, Clone, Copy)]
pub struct SearchOrigin<'a, T: Scalar> {
    /// The point x₀
    pub point: &'a DVector<T>,
    /// The gradient at x₀
    pub gradient: &'a DVector<T>,
    /// The objective value at x₀
    pub value: T,
}

/// Geometric backtracking line search.
#[derive(Debug, Clone, Copy)]
pub struct BacktrackingLineSearch<T: Scalar> {
    params: LineSearchParams<T>,
}

impl<T: Scalar> BacktrackingLineSearch<T> {
    /// Creates a line search with the given parameters.
    pub fn new(params: LineSearchParams<T>) -> Self {
        Self { params }
    }

    /// Returns the parameters of this line search.
    pub fn params(&self) -> &LineSearchParams<T> {
        &self.params
    }

    /// Searches along `direction` from `origin`, starting with `step`.
    ///
    /// `point` and `gradient` receive every trial point and its gradient; on
    /// success they hold the accepted point.
    ///
    /// # Errors
    ///
    /// See the module documentation for the failure table.
    pub fn search<C>(
        &self,
        cost_fn: &mut C,
        origin: SearchOrigin<'_, T>,
        direction: &DVector<T>,
        step: T,
        point: &mut DVector<T>,
        gradient: &mut DVector<T>,
    ) -> Result<LineSearchResult<T>>
    where
        C: CostFunction<T> + ?Sized,
    {
        if step <= T::zero() {
            return Err(LbfgsError::InvalidParameters);
        }

        let dg_init = vector_ops::dot(origin.gradient, direction);
        if dg_init >= T::zero() {
            return Err(LbfgsError::IncreaseGradient);
        }

        let dg_test = self.params.c1 * dg_init;
        let shrink = constants::backtracking_factor::<T>();
        let mut step = step;
        let mut count = 0;

        loop {
            vector_ops::copy(point, origin.point);
            vector_ops::axpy(point, step, direction);

            let value = cost_fn.cost_and_gradient(point, gradient);
            count += 1;

            if value <= origin.value + step * dg_test {
                log::trace!("line search accepted step {} after {} trial(s)", step, count);
                return Ok(LineSearchResult {
                    step_size: step,
                    value,
                    evaluations: count,
                });
            }
            log::trace!("line search rejected step {} (f = {})", step, value);

            if step < self.params.min_step_size {
                return Err(LbfgsError::MinimumStep);
            }
            if step > self.params.max_step_size {
                return Err(LbfgsError::MaximumStep);
            }
            if self.params.max_iterations <= count {
                return Err(LbfgsError::MaximumLineSearch);
            }

            step *= shrink;
        }
    }
}
