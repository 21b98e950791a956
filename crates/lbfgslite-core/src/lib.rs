//! Core traits and types for limited-memory quasi-Newton optimization.
//!
//! This crate provides everything an L-BFGS driver needs besides the driver
//! itself: the scalar abstraction, the status and error catalog, the
//! objective interface, parameter validation, the backtracking line search
//! and the fixed-capacity storage used for the correction history.
//!
//! # Modules
//!
//! - [`cost_function`]: Objective interface and adapters
//! - [`error`]: Status codes, errors and their descriptions
//! - [`types`]: Scalar trait, vector alias and numerical constants
//! - [`compute`]: Dense vector primitives
//! - [`memory`]: Ring buffer and per-run workspace
//! - [`optimization`]: Parameters, line search, callbacks and results

pub mod compute;
pub mod core;
pub mod memory;
pub mod optimization;

pub use crate::core::{cost_function, error, types};
pub use crate::optimization::{callback, line_search, optimizer, parameters};

// Re-export commonly used items at the crate root
pub use error::{status_to_string, LbfgsError, Result, Status};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use lbfgslite_core::prelude::*;
///
/// let params = LbfgsParameters::<f64>::default();
/// assert!(params.validate(2).is_ok());
/// ```
pub mod prelude {
    pub use crate::cost_function::{
        BoundedFnCostFunction, CostFunction, CountingCostFunction, FnCostFunction, QuadraticCost,
    };
    pub use crate::error::{status_to_string, LbfgsError, Result, Status};
    pub use crate::line_search::{
        BacktrackingLineSearch, LineSearchParams, LineSearchResult, SearchOrigin,
    };
    pub use crate::memory::{RingBuffer, Workspace};
    pub use crate::optimization::{
        CallbackInfo, LbfgsParameters, LogProgressCallback, NoOpCallback, OptimizationResult,
        Optimizer, ProgressCallback,
    };
    pub use crate::types::{constants, DVector, Scalar};
}
