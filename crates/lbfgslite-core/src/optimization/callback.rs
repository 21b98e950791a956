//! Progress callbacks.
//!
//! A progress callback is invoked once per accepted iteration with a
//! read-only view of the current iterate. Returning `false` cancels the run;
//! the optimizer then reports [`Canceled`](crate::error::LbfgsError::Canceled)
//! and leaves the point at the accepted iterate the callback was shown.
//!
//! Any `FnMut(&CallbackInfo<T>) -> bool` closure is a progress callback.

use crate::{
    optimization::optimizer::OptimizationResult,
    types::{DVector, Scalar},
};

/// Snapshot of one accepted iteration.
#[derive(Debug, Clone, Copy)]
pub struct CallbackInfo<'a, T: Scalar> {
    /// Current point
    pub point: &'a DVector<T>,

    /// Gradient at the current point
    pub gradient: &'a DVector<T>,

    /// Objective value at the current point
    pub value: T,

    /// Euclidean norm of the point
    pub point_norm: T,

    /// Euclidean norm of the gradient
    pub gradient_norm: T,

    /// Step size accepted by the line search
    pub step: T,

    /// Iteration number, starting at 1
    pub iteration: usize,

    /// Objective evaluations spent by this iteration's line search
    pub line_search_evaluations: usize,
}

impl<T: Scalar> CallbackInfo<'_, T> {
    /// Number of variables.
    pub fn dimension(&self) -> usize {
        self.point.len()
    }
}

/// Trait for progress callbacks.
pub trait ProgressCallback<T: Scalar> {
    /// Called once before the first iteration with the initial point and value.
    fn on_optimization_start(&mut self, point: &DVector<T>, value: T) {
        let _ = (point, value);
    }

    /// Called after each accepted iteration.
    ///
    /// Returns `true` to continue optimization, `false` to cancel.
    fn on_iteration_end(&mut self, info: &CallbackInfo<'_, T>) -> bool;

    /// Called once when the run ends, whatever the outcome.
    fn on_optimization_end(&mut self, result: &OptimizationResult<T>) {
        let _ = result;
    }
}

impl<T, F> ProgressCallback<T> for F
where
    T: Scalar,
    F: FnMut(&CallbackInfo<'_, T>) -> bool,
{
    fn on_iteration_end(&mut self, info: &CallbackInfo<'_, T>) -> bool {
        self(info)
    }
}

/// A callback that does nothing and never cancels.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpCallback;

impl<T: Scalar> ProgressCallback<T> for NoOpCallback {
    fn on_iteration_end(&mut self, _info: &CallbackInfo<'_, T>) -> bool {
        true
    }
}

/// A callback that reports progress through the `log` facade.
#[derive(Debug, Clone, Copy)]
pub struct LogProgressCallback {
    log_every: usize,
}

impl LogProgressCallback {
    /// Create a callback logging every `log_every` iterations (0 is treated as 1).
    pub fn new(log_every: usize) -> Self {
        Self {
            log_every: log_every.max(1),
        }
    }
}

impl Default for LogProgressCallback {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<T: Scalar> ProgressCallback<T> for LogProgressCallback {
    fn on_optimization_start(&mut self, point: &DVector<T>, value: T) {
        log::info!("starting L-BFGS on {} variables, f = {}", point.len(), value);
    }

    fn on_iteration_end(&mut self, info: &CallbackInfo<'_, T>) -> bool {
        if info.iteration % self.log_every == 0 {
            log::info!(
                "iteration {}: f = {}, |x| = {}, |g| = {}, step = {}, evaluations = {}",
                info.iteration,
                info.value,
                info.point_norm,
                info.gradient_norm,
                info.step,
                info.line_search_evaluations
            );
        }
        true
    }

    fn on_optimization_end(&mut self, result: &OptimizationResult<T>) {
        log::info!(
            "L-BFGS finished after {} iterations: {} (f = {})",
            result.iterations,
            result.status,
            result.value
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info<'a>(x: &'a DVector<f64>, g: &'a DVector<f64>, iteration: usize) -> CallbackInfo<'a, f64> {
        CallbackInfo {
            point: x,
            gradient: g,
            value: 1.0,
            point_norm: x.norm(),
            gradient_norm: g.norm(),
            step: 1.0,
            iteration,
            line_search_evaluations: 1,
        }
    }

    fn drive<C: ProgressCallback<f64>>(callback: &mut C, iterations: usize) -> usize {
        let x = DVector::from_element(2, 1.0);
        let g = DVector::from_element(2, 0.5);
        callback.on_optimization_start(&x, 1.0);
        for k in 1..=iterations {
            if !callback.on_iteration_end(&info(&x, &g, k)) {
                return k;
            }
        }
        iterations
    }

    #[test]
    fn test_closure_callback_cancels() {
        let mut seen = Vec::new();
        let mut callback = |info: &CallbackInfo<'_, f64>| {
            seen.push(info.iteration);
            info.iteration < 3
        };
        assert_eq!(drive(&mut callback, 10), 3);
        assert_eq!(seen, vec![1, 2, 3]);
    }

    #[test]
    fn test_builtin_callbacks_never_cancel() {
        assert_eq!(drive(&mut NoOpCallback, 5), 5);
        assert_eq!(drive(&mut LogProgressCallback::new(2), 5), 5);
        assert_eq!(drive(&mut LogProgressCallback::new(0), 5), 5);
    }

    #[test]
    fn test_info_dimension() {
        let x = DVector::from_element(4, 0.0);
        let g = DVector::from_element(4, 0.0);
        assert_eq!(info(&x, &g, 1).dimension(), 4);
    }
}
