//! Parameters of the L-BFGS minimizer and their validation.
//!
//! Parameters are plain data: build them with [`LbfgsParameters::default`]
//! (or `new`) and adjust individual fields through the `with_*` builders.
//! [`LbfgsParameters::validate`] runs before anything is evaluated and maps
//! each violated constraint to its dedicated error.
//!
//! | Field | Constraint | Default |
//! |-------|------------|---------|
//! | `mem_size` | `>= 1` | 8 |
//! | `g_epsilon` | `>= 0` | 1e-5 |
//! | `past` | `>= 0` (0 disables the delta test) | 0 |
//! | `delta` | `>= 0` | 1e-5 |
//! | `max_iterations` | `>= 0` (0 = unbounded) | 0 |
//! | `max_linesearch` | `>= 1` | 40 |
//! | `min_step` | `>= 0` | 1e-20 |
//! | `max_step` | `>= min_step` | 1e20 |
//! | `f_dec_coeff` | `>= 0` | 1e-4 |
//! | `s_curv_coeff` | `f_dec_coeff < s_curv_coeff < 1` | 0.9 |
//! | `xtol` | `>= 0` | 1e-16 |

use crate::{
    error::{LbfgsError, Result},
    types::Scalar,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration of an L-BFGS run.
///
/// `s_curv_coeff` and `xtol` belong to interval-based Wolfe line searches.
/// They are validated so that configurations stay portable, but the
/// backtracking search never reads them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LbfgsParameters<T: Scalar> {
    /// Number of correction pairs kept (history capacity m)
    pub mem_size: usize,

    /// Gradient test threshold: stop when `|g| / max(1, |x|) <= g_epsilon`
    pub g_epsilon: T,

    /// Window, in iterations, of the relative-decrease test (0 disables it)
    pub past: usize,

    /// Relative-decrease threshold: stop when `|f(x_{k-past}) - f(x_k)| / f(x_k) < delta`
    pub delta: T,

    /// Maximum number of iterations (0 = unbounded)
    pub max_iterations: usize,

    /// Maximum number of trials per line search
    pub max_linesearch: usize,

    /// Smallest step the line search may try
    pub min_step: T,

    /// Largest step the line search may try
    pub max_step: T,

    /// Armijo sufficient-decrease coefficient c₁
    pub f_dec_coeff: T,

    /// Curvature coefficient c₂ (validated, not used by backtracking)
    pub s_curv_coeff: T,

    /// Interval-width tolerance (validated, not used by backtracking)
    pub xtol: T,
}

impl<T: Scalar> Default for LbfgsParameters<T> {
    fn default() -> Self {
        Self {
            mem_size: 8,
            g_epsilon: <T as Scalar>::from_f64(1e-5),
            past: 0,
            delta: <T as Scalar>::from_f64(1e-5),
            max_iterations: 0,
            max_linesearch: 40,
            min_step: <T as Scalar>::from_f64(1e-20),
            max_step: <T as Scalar>::from_f64(1e20),
            f_dec_coeff: <T as Scalar>::from_f64(1e-4),
            s_curv_coeff: <T as Scalar>::from_f64(0.9),
            xtol: <T as Scalar>::from_f64(1e-16),
        }
    }
}

impl<T: Scalar> LbfgsParameters<T> {
    /// Creates parameters with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of stored correction pairs.
    pub fn with_mem_size(mut self, mem_size: usize) -> Self {
        self.mem_size = mem_size;
        self
    }

    /// Sets the gradient convergence threshold.
    pub fn with_g_epsilon(mut self, g_epsilon: T) -> Self {
        self.g_epsilon = g_epsilon;
        self
    }

    /// Enables the relative-decrease test over `past` iterations with threshold `delta`.
    pub fn with_delta_test(mut self, past: usize, delta: T) -> Self {
        self.past = past;
        self.delta = delta;
        self
    }

    /// Sets the iteration cap (0 = unbounded).
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the number of trials per line search.
    pub fn with_max_linesearch(mut self, max_linesearch: usize) -> Self {
        self.max_linesearch = max_linesearch;
        self
    }

    /// Sets the step bounds of the line search.
    pub fn with_step_bounds(mut self, min_step: T, max_step: T) -> Self {
        self.min_step = min_step;
        self.max_step = max_step;
        self
    }

    /// Sets the Armijo coefficient.
    pub fn with_f_dec_coeff(mut self, f_dec_coeff: T) -> Self {
        self.f_dec_coeff = f_dec_coeff;
        self
    }

    /// Sets the curvature coefficient.
    pub fn with_s_curv_coeff(mut self, s_curv_coeff: T) -> Self {
        self.s_curv_coeff = s_curv_coeff;
        self
    }

    /// Sets the interval-width tolerance.
    pub fn with_xtol(mut self, xtol: T) -> Self {
        self.xtol = xtol;
        self
    }

    /// Checks the parameters for a problem with `n` variables.
    ///
    /// Constraints are checked in a fixed order and the first violation is
    /// reported. NaN never satisfies a constraint.
    ///
    /// # Errors
    ///
    /// Returns the `Invalid*` error matching the first violated constraint.
    pub fn validate(&self, n: usize) -> Result<()> {
        let zero = T::zero();
        if n == 0 {
            return Err(LbfgsError::InvalidN);
        }
        if self.mem_size == 0 {
            return Err(LbfgsError::InvalidMemSize);
        }
        if !(self.g_epsilon >= zero) {
            return Err(LbfgsError::InvalidGEpsilon);
        }
        if !(self.delta >= zero) {
            return Err(LbfgsError::InvalidDelta);
        }
        if !(self.min_step >= zero) {
            return Err(LbfgsError::InvalidMinStep);
        }
        if !(self.max_step >= self.min_step) {
            return Err(LbfgsError::InvalidMaxStep);
        }
        if !(self.f_dec_coeff >= zero) {
            return Err(LbfgsError::InvalidFDecCoeff);
        }
        if !(self.s_curv_coeff > self.f_dec_coeff && self.s_curv_coeff < T::one()) {
            return Err(LbfgsError::InvalidSCurvCoeff);
        }
        if !(self.xtol >= zero) {
            return Err(LbfgsError::InvalidXTol);
        }
        if self.max_linesearch == 0 {
            return Err(LbfgsError::InvalidMaxLineSearch);
        }
        Ok(())
    }
}
