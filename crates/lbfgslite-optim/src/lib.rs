//! L-BFGS optimization driver.
//!
//! This crate provides the limited-memory BFGS minimizer built on the
//! traits, parameters and line search of `lbfgslite-core`.
//!
//! # Available Components
//!
//! - **Lbfgs**: the optimizer, usable directly or through the
//!   [`Optimizer`](lbfgslite_core::optimizer::Optimizer) trait
//! - **CorrectionHistory**: storage of correction pairs and the two-loop
//!   recursion
//!
//! # Examples
//!
//! ```rust
//! use lbfgslite_core::prelude::*;
//! use lbfgslite_optim::minimize;
//!
//! // f(x, y) = (x - 1)² + 4 (y + 2)²
//! let mut cost = FnCostFunction::new(|x: &DVector<f64>, g: &mut DVector<f64>| {
//!     g[0] = 2.0 * (x[0] - 1.0);
//!     g[1] = 8.0 * (x[1] + 2.0);
//!     (x[0] - 1.0).powi(2) + 4.0 * (x[1] + 2.0).powi(2)
//! });
//! let mut x = DVector::zeros(2);
//!
//! let result = minimize(&mut x, &mut cost, &LbfgsParameters::default()).unwrap();
//! assert!(result.converged());
//! assert!((x[0] - 1.0).abs() < 1e-4);
//! ```

pub mod correction_history;
pub mod lbfgs;

// Re-export main optimizer for convenience
pub use correction_history::{CorrectionHistory, CorrectionPair};
pub use lbfgs::{minimize, Lbfgs};
