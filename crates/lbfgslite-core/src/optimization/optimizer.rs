//! Optimizer interface and run reports.
//!
//! Optimizers update the caller's point in place and describe the run with an
//! [`OptimizationResult`]. Configuration problems detected before the first
//! evaluation are returned as errors; every outcome reached afterwards,
//! failures included, is reported through [`OptimizationResult::status`].

use crate::{
    cost_function::CostFunction,
    error::{LbfgsError, Result, Status},
    optimization::callback::ProgressCallback,
    types::{DVector, Scalar},
};
use std::fmt::Debug;
use std::time::Duration;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Report of a finished optimization run.
///
/// The final point is not part of the report: it is left in the vector the
/// caller handed to the optimizer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct OptimizationResult<T: Scalar> {
    /// Objective value at the final point
    pub value: T,

    /// Why the run ended
    pub status: Status,

    /// Number of accepted iterations
    pub iterations: usize,

    /// Total number of objective evaluations
    pub evaluations: usize,

    /// Gradient norm at the final point
    pub gradient_norm: T,

    /// Wall-clock time elapsed during optimization
    pub duration: Duration,
}

impl<T: Scalar> OptimizationResult<T> {
    /// Creates a result with zero counters.
    pub fn new(value: T, status: Status) -> Self {
        Self {
            value,
            status,
            iterations: 0,
            evaluations: 0,
            gradient_norm: T::zero(),
            duration: Duration::ZERO,
        }
    }

    /// Sets the iteration count.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// Sets the evaluation count.
    pub fn with_evaluations(mut self, evaluations: usize) -> Self {
        self.evaluations = evaluations;
        self
    }

    /// Sets the gradient norm at the final point.
    pub fn with_gradient_norm(mut self, gradient_norm: T) -> Self {
        self.gradient_norm = gradient_norm;
        self
    }

    /// Sets the elapsed time.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// True if the run ended on a stopping test rather than an error.
    pub fn converged(&self) -> bool {
        self.status.is_success()
    }

    /// The error that ended the run, if any.
    pub fn error(&self) -> Option<LbfgsError> {
        self.status.error()
    }

    /// The integer status code of the run.
    pub fn code(&self) -> i32 {
        self.status.code()
    }
}

/// Trait for unconstrained minimizers over dense vectors.
pub trait Optimizer<T: Scalar>: Debug {
    /// Human-readable name of the algorithm.
    fn name(&self) -> &str;

    /// Minimizes `cost_fn` starting from `point`, which receives the final iterate.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the optimizer settings are invalid
    /// for a problem of `point.len()` variables. Nothing is evaluated and
    /// `point` is untouched in that case.
    fn optimize<C, P>(
        &mut self,
        point: &mut DVector<T>,
        cost_fn: &mut C,
        callback: &mut P,
    ) -> Result<OptimizationResult<T>>
    where
        C: CostFunction<T> + ?Sized,
        P: ProgressCallback<T> + ?Sized;
}
