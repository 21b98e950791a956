//! Dense vector primitives used by the line search and the two-loop recursion.
//!
//! All functions operate on equal-length vectors; mismatched lengths are a
//! caller bug and panic inside nalgebra. None of them allocates.

use crate::core::types::{DVector, Scalar};
use num_traits::Float;

/// Inner product `x · y`.
#[inline]
pub fn dot<T: Scalar>(x: &DVector<T>, y: &DVector<T>) -> T {
    x.dot(y)
}

/// Euclidean norm `sqrt(x · x)`.
#[inline]
pub fn norm<T: Scalar>(x: &DVector<T>) -> T {
    <T as Float>::sqrt(dot(x, x))
}

/// Reciprocal of the Euclidean norm.
///
/// Infinite for the zero vector.
#[inline]
pub fn norm_inv<T: Scalar>(x: &DVector<T>) -> T {
    T::one() / norm(x)
}

/// In-place scaling `y *= c`.
#[inline]
pub fn scale<T: Scalar>(y: &mut DVector<T>, c: T) {
    y.scale_mut(c);
}

/// In-place scaled addition `y += c * x`.
#[inline]
pub fn axpy<T: Scalar>(y: &mut DVector<T>, c: T, x: &DVector<T>) {
    y.axpy(c, x, T::one());
}

/// Copy `y = x`.
#[inline]
pub fn copy<T: Scalar>(y: &mut DVector<T>, x: &DVector<T>) {
    y.copy_from(x);
}

/// Negated copy `y = -x`.
#[inline]
pub fn negate_into<T: Scalar>(y: &mut DVector<T>, x: &DVector<T>) {
    for (yi, &xi) in y.iter_mut().zip(x.iter()) {
        *yi = -xi;
    }
}

/// Elementwise difference `z = x - y`.
#[inline]
pub fn diff_into<T: Scalar>(z: &mut DVector<T>, x: &DVector<T>, y: &DVector<T>) {
    for ((zi, &xi), &yi) in z.iter_mut().zip(x.iter()).zip(y.iter()) {
        *zi = xi - yi;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dot_and_norms() {
        let x = DVector::from_vec(vec![3.0, 4.0]);
        let y = DVector::from_vec(vec![1.0, -2.0]);
        assert_relative_eq!(dot(&x, &y), -5.0);
        assert_relative_eq!(norm(&x), 5.0);
        assert_relative_eq!(norm_inv(&x), 0.2);
        assert!(norm_inv(&DVector::<f64>::zeros(3)).is_infinite());
    }

    #[test]
    fn test_in_place_updates() {
        let x = DVector::from_vec(vec![1.0, 2.0, 3.0]);
        let mut y = DVector::from_vec(vec![1.0, 1.0, 1.0]);

        axpy(&mut y, 2.0, &x);
        assert_eq!(y.as_slice(), &[3.0, 5.0, 7.0]);

        scale(&mut y, 0.5);
        assert_eq!(y.as_slice(), &[1.5, 2.5, 3.5]);

        copy(&mut y, &x);
        assert_eq!(y, x);

        negate_into(&mut y, &x);
        assert_eq!(y.as_slice(), &[-1.0, -2.0, -3.0]);

        let mut z = DVector::zeros(3);
        diff_into(&mut z, &x, &y);
        assert_eq!(z.as_slice(), &[2.0, 4.0, 6.0]);
    }
}
