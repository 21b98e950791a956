//! Embeddable limited-memory BFGS minimizer.
//!
//! `lbfgslite` bundles the building blocks of `lbfgslite-core` with the
//! driver of `lbfgslite-optim`. It minimizes a smooth function of `n` real
//! variables given a routine returning the value and the gradient, updating
//! the caller's point in place and reporting the outcome as a stable status.
//!
//! # Example
//!
//! ```rust
//! use lbfgslite::prelude::*;
//!
//! // Chained Rosenbrock function in ten variables.
//! let mut rosenbrock = FnCostFunction::new(|x: &DVector<f64>, g: &mut DVector<f64>| {
//!     let mut fx = 0.0;
//!     for i in (0..x.len()).step_by(2) {
//!         let t1 = 1.0 - x[i];
//!         let t2 = 10.0 * (x[i + 1] - x[i] * x[i]);
//!         g[i + 1] = 20.0 * t2;
//!         g[i] = -2.0 * (x[i] * g[i + 1] + t1);
//!         fx += t1 * t1 + t2 * t2;
//!     }
//!     fx
//! });
//!
//! let mut x = DVector::from_fn(10, |i, _| if i % 2 == 0 { -1.2 } else { 1.0 });
//! let result = Lbfgs::new(LbfgsParameters::default())
//!     .minimize(&mut x, &mut rosenbrock)
//!     .unwrap();
//!
//! assert_eq!(result.status, Status::Convergence);
//! assert!(x.iter().all(|xi| (xi - 1.0).abs() < 1e-3));
//! ```

pub use lbfgslite_core::{
    callback, cost_function, error, line_search, optimizer, parameters, status_to_string, types,
    LbfgsError, Status,
};
pub use lbfgslite_optim::{minimize, CorrectionHistory, Lbfgs};

// Re-export key dependencies
pub use nalgebra;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use lbfgslite_core::prelude::*;
    pub use lbfgslite_optim::{minimize, Lbfgs};
}
