//! Type definitions and aliases for quasi-Newton optimization.
//!
//! This module provides the scalar trait shared by every component of the
//! optimizer, the dense vector alias used for points and gradients, and the
//! numerical constants of the line search.

use nalgebra::{Dyn, OVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in optimization (f32 or f64).
///
/// This trait combines all the numeric traits required by the line search,
/// the two-loop recursion and the stopping tests.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails, which cannot happen for `f32` or `f64`.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }
}

impl Scalar for f32 {}

impl Scalar for f64 {}

/// Type alias for a dynamically-sized vector.
///
/// Points, gradients, search directions and correction vectors all use
/// this representation.
pub type DVector<T> = OVector<T, Dyn>;

/// Numerical constants shared by the optimizer.
pub mod constants {
    use super::Scalar;

    /// Factor applied to the trial step after every rejected backtracking trial.
    pub fn backtracking_factor<T: Scalar>() -> T {
        <T as Scalar>::from_f64(0.5)
    }
}
