//! Error types and the status catalog of the L-BFGS minimizer.
//!
//! Every way a run can end is identified by a stable integer code. The
//! three non-negative codes describe benign terminations; the negative block
//! starting at -1024 describes errors. Errors are plain values: nothing in
//! the optimizer panics for an expected failure mode.
//!
//! # Layout
//!
//! - [`LbfgsError`]: every negative code, usable with `?`
//! - [`Status`]: the terminal state of a run (success or error)
//! - [`status_to_string`]: total lookup from any integer to a description

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Errors reported by the parameter validator, the line search and the driver.
///
/// Discriminants are the stable integer codes, each one less than the
/// previous in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(i32)]
pub enum LbfgsError {
    /// Unknown error.
    #[error("Unknown error.")]
    UnknownError = -1024,

    /// Logic error.
    #[error("Logic error.")]
    LogicError = -1023,

    /// The progress callback asked the run to stop.
    #[error("The minimization process has been canceled.")]
    Canceled = -1022,

    /// The problem has no variables.
    #[error("Invalid number of variables specified.")]
    InvalidN = -1021,

    /// `mem_size` is zero.
    #[error("Invalid parameter lbfgs_parameter_t::mem_size specified.")]
    InvalidMemSize = -1020,

    /// `g_epsilon` is negative.
    #[error("Invalid parameter lbfgs_parameter_t::g_epsilon specified.")]
    InvalidGEpsilon = -1019,

    /// `past` is negative.
    #[error("Invalid parameter lbfgs_parameter_t::past specified.")]
    InvalidTestPeriod = -1018,

    /// `delta` is negative.
    #[error("Invalid parameter lbfgs_parameter_t::delta specified.")]
    InvalidDelta = -1017,

    /// `min_step` is negative.
    #[error("Invalid parameter lbfgs_parameter_t::min_step specified.")]
    InvalidMinStep = -1016,

    /// `max_step` is smaller than `min_step`.
    #[error("Invalid parameter lbfgs_parameter_t::max_step specified.")]
    InvalidMaxStep = -1015,

    /// `f_dec_coeff` is negative.
    #[error("Invalid parameter lbfgs_parameter_t::f_dec_coeff specified.")]
    InvalidFDecCoeff = -1014,

    /// `s_curv_coeff` is outside `(f_dec_coeff, 1)`.
    #[error("Invalid parameter lbfgs_parameter_t::s_curv_coeff specified.")]
    InvalidSCurvCoeff = -1013,

    /// `xtol` is negative.
    #[error("Invalid parameter lbfgs_parameter_t::xtol specified.")]
    InvalidXTol = -1012,

    /// `max_linesearch` is zero.
    #[error("Invalid parameter lbfgs_parameter_t::max_linesearch specified.")]
    InvalidMaxLineSearch = -1011,

    /// The line-search step went out of the interval of uncertainty.
    #[error("The line-search step went out of the interval of uncertainty.")]
    OutOfInterval = -1010,

    /// The interval of uncertainty became too small.
    #[error(
        "A logic error occurred; alternatively, the interval of uncertainty became too small."
    )]
    IncorrectTMinMax = -1009,

    /// A rounding error occurred.
    #[error(
        "A rounding error occurred; alternatively, no line-search step satisfies the sufficient decrease and curvature conditions."
    )]
    RoundingError = -1008,

    /// The trial step fell below `min_step`.
    #[error("The line-search step became smaller than lbfgs_parameter_t::min_step.")]
    MinimumStep = -1007,

    /// The trial step exceeded `max_step`.
    #[error("The line-search step became larger than lbfgs_parameter_t::max_step.")]
    MaximumStep = -1006,

    /// The line search used `max_linesearch` evaluations without success.
    #[error("The line-search routine reaches the maximum number of evaluations.")]
    MaximumLineSearch = -1005,

    /// The run reached `max_iterations`.
    #[error("The algorithm routine reaches the maximum number of iterations.")]
    MaximumIteration = -1004,

    /// Relative width of the interval of uncertainty is at most `xtol`.
    #[error("Relative width of the interval of uncertainty is at most lbfgs_parameter_t::xtol.")]
    WidthTooSmall = -1003,

    /// The line search received a non-positive step.
    #[error("A logic error (negative line-search step) occurred.")]
    InvalidParameters = -1002,

    /// The search direction is not a descent direction.
    #[error("The current search direction increases the objective function value.")]
    IncreaseGradient = -1001,
}

impl LbfgsError {
    /// Every error, in declaration order.
    pub const ALL: [LbfgsError; 24] = [
        LbfgsError::UnknownError,
        LbfgsError::LogicError,
        LbfgsError::Canceled,
        LbfgsError::InvalidN,
        LbfgsError::InvalidMemSize,
        LbfgsError::InvalidGEpsilon,
        LbfgsError::InvalidTestPeriod,
        LbfgsError::InvalidDelta,
        LbfgsError::InvalidMinStep,
        LbfgsError::InvalidMaxStep,
        LbfgsError::InvalidFDecCoeff,
        LbfgsError::InvalidSCurvCoeff,
        LbfgsError::InvalidXTol,
        LbfgsError::InvalidMaxLineSearch,
        LbfgsError::OutOfInterval,
        LbfgsError::IncorrectTMinMax,
        LbfgsError::RoundingError,
        LbfgsError::MinimumStep,
        LbfgsError::MaximumStep,
        LbfgsError::MaximumLineSearch,
        LbfgsError::MaximumIteration,
        LbfgsError::WidthTooSmall,
        LbfgsError::InvalidParameters,
        LbfgsError::IncreaseGradient,
    ];

    /// Returns the stable integer code of this error.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Looks up the error with the given code.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|err| err.code() == code)
    }

    /// Returns the human-readable description of this error.
    pub fn description(self) -> &'static str {
        match self {
            LbfgsError::UnknownError => "Unknown error.",
            LbfgsError::LogicError => "Logic error.",
            LbfgsError::Canceled => "The minimization process has been canceled.",
            LbfgsError::InvalidN => "Invalid number of variables specified.",
            LbfgsError::InvalidMemSize => {
                "Invalid parameter lbfgs_parameter_t::mem_size specified."
            }
            LbfgsError::InvalidGEpsilon => {
                "Invalid parameter lbfgs_parameter_t::g_epsilon specified."
            }
            LbfgsError::InvalidTestPeriod => "Invalid parameter lbfgs_parameter_t::past specified.",
            LbfgsError::InvalidDelta => "Invalid parameter lbfgs_parameter_t::delta specified.",
            LbfgsError::InvalidMinStep => {
                "Invalid parameter lbfgs_parameter_t::min_step specified."
            }
            LbfgsError::InvalidMaxStep => {
                "Invalid parameter lbfgs_parameter_t::max_step specified."
            }
            LbfgsError::InvalidFDecCoeff => {
                "Invalid parameter lbfgs_parameter_t::f_dec_coeff specified."
            }
            LbfgsError::InvalidSCurvCoeff => {
                "Invalid parameter lbfgs_parameter_t::s_curv_coeff specified."
            }
            LbfgsError::InvalidXTol => "Invalid parameter lbfgs_parameter_t::xtol specified.",
            LbfgsError::InvalidMaxLineSearch => {
                "Invalid parameter lbfgs_parameter_t::max_linesearch specified."
            }
            LbfgsError::OutOfInterval => {
                "The line-search step went out of the interval of uncertainty."
            }
            LbfgsError::IncorrectTMinMax => {
                "A logic error occurred; alternatively, the interval of uncertainty became too small."
            }
            LbfgsError::RoundingError => {
                "A rounding error occurred; alternatively, no line-search step satisfies the sufficient decrease and curvature conditions."
            }
            LbfgsError::MinimumStep => {
                "The line-search step became smaller than lbfgs_parameter_t::min_step."
            }
            LbfgsError::MaximumStep => {
                "The line-search step became larger than lbfgs_parameter_t::max_step."
            }
            LbfgsError::MaximumLineSearch => {
                "The line-search routine reaches the maximum number of evaluations."
            }
            LbfgsError::MaximumIteration => {
                "The algorithm routine reaches the maximum number of iterations."
            }
            LbfgsError::WidthTooSmall => {
                "Relative width of the interval of uncertainty is at most lbfgs_parameter_t::xtol."
            }
            LbfgsError::InvalidParameters => "A logic error (negative line-search step) occurred.",
            LbfgsError::IncreaseGradient => {
                "The current search direction increases the objective function value."
            }
        }
    }

    /// Returns true for errors raised by the parameter validator.
    pub fn is_configuration_error(self) -> bool {
        matches!(
            self,
            LbfgsError::InvalidN
                | LbfgsError::InvalidMemSize
                | LbfgsError::InvalidGEpsilon
                | LbfgsError::InvalidTestPeriod
                | LbfgsError::InvalidDelta
                | LbfgsError::InvalidMinStep
                | LbfgsError::InvalidMaxStep
                | LbfgsError::InvalidFDecCoeff
                | LbfgsError::InvalidSCurvCoeff
                | LbfgsError::InvalidXTol
                | LbfgsError::InvalidMaxLineSearch
        )
    }

    /// Returns true for errors raised by the line search.
    pub fn is_line_search_error(self) -> bool {
        matches!(
            self,
            LbfgsError::MinimumStep
                | LbfgsError::MaximumStep
                | LbfgsError::MaximumLineSearch
                | LbfgsError::InvalidParameters
                | LbfgsError::IncreaseGradient
        )
    }
}

/// Terminal state of an optimization run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Status {
    /// The gradient test `|g| / max(1, |x|) <= g_epsilon` passed.
    Convergence,
    /// The relative decrease over `past` iterations fell below `delta`.
    Stop,
    /// The starting point already satisfied the gradient test.
    AlreadyMinimized,
    /// The run ended with an error.
    Failed(LbfgsError),
}

impl Status {
    /// Returns the stable integer code of this status.
    pub fn code(self) -> i32 {
        match self {
            Status::Convergence => 0,
            Status::Stop => 1,
            Status::AlreadyMinimized => 2,
            Status::Failed(err) => err.code(),
        }
    }

    /// Looks up the status with the given code.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Status::Convergence),
            1 => Some(Status::Stop),
            2 => Some(Status::AlreadyMinimized),
            _ => LbfgsError::from_code(code).map(Status::Failed),
        }
    }

    /// Returns the human-readable description of this status.
    pub fn description(self) -> &'static str {
        match self {
            Status::Convergence => "Success: reached convergence (g_epsilon).",
            Status::Stop => "Success: met stopping criteria (past f decrease less than delta).",
            Status::AlreadyMinimized => {
                "The initial variables already minimize the objective function."
            }
            Status::Failed(err) => err.description(),
        }
    }

    /// Returns true for the non-negative codes.
    pub fn is_success(self) -> bool {
        !matches!(self, Status::Failed(_))
    }

    /// Returns the error carried by a failed status.
    pub fn error(self) -> Option<LbfgsError> {
        match self {
            Status::Failed(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LbfgsError> for Status {
    fn from(err: LbfgsError) -> Self {
        Status::Failed(err)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.description())
    }
}

/// Maps any integer code to its description, `"(unknown)"` if unrecognized.
pub fn status_to_string(code: i32) -> &'static str {
    Status::from_code(code).map_or("(unknown)", Status::description)
}

/// Result type alias for optimizer operations.
pub type Result<T> = std::result::Result<T, LbfgsError>;
