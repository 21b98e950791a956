//! Correction history and the L-BFGS two-loop recursion.
//!
//! The history keeps the m most recent correction pairs
//!
//! ```text
//! s_k = x_{k+1} - x_k
//! y_k = g_{k+1} - g_k
//! ```
//!
//! together with `ys = ⟨y, s⟩` and `yy = ⟨y, y⟩`. From them the two-loop
//! recursion computes `d = -H g`, where H is the implicit inverse-Hessian
//! approximation with initial scaling `H₀ = (ys / yy) I` taken from the most
//! recent pair:
//!
//! ```text
//! d = -g
//! for i = newest ... oldest:
//!     α_i = ⟨s_i, d⟩ / ys_i
//!     d = d - α_i y_i
//!
//! d = (ys_newest / yy_newest) d
//!
//! for i = oldest ... newest:
//!     β = ⟨y_i, d⟩ / ys_i
//!     d = d + (α_i - β) s_i
//! ```
//!
//! # References
//!
//! - Nocedal, "Updating Quasi-Newton Matrices with Limited Storage",
//!   Mathematics of Computation 35 (1980), pp. 773-782

use lbfgslite_core::{
    compute::vector_ops,
    memory::RingBuffer,
    types::{DVector, Scalar},
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One stored correction pair.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CorrectionPair<T: Scalar> {
    /// Step `x_{k+1} - x_k`
    pub s: DVector<T>,

    /// Gradient change `g_{k+1} - g_k`
    pub y: DVector<T>,

    /// `⟨y, s⟩`
    pub ys: T,

    /// `⟨y, y⟩`
    pub yy: T,

    /// Scratch coefficient of the first recursion loop
    pub alpha: T,
}

impl<T: Scalar> CorrectionPair<T> {
    /// Creates a zeroed pair for `n` variables.
    pub fn zeros(n: usize) -> Self {
        Self {
            s: DVector::zeros(n),
            y: DVector::zeros(n),
            ys: T::zero(),
            yy: T::zero(),
            alpha: T::zero(),
        }
    }
}

/// The m most recent correction pairs.
///
/// Every slot is allocated up front; recording a pair overwrites the oldest
/// slot in place once the history is full.
#[derive(Debug, Clone)]
pub struct CorrectionHistory<T: Scalar> {
    pairs: RingBuffer<CorrectionPair<T>>,
}

impl<T: Scalar> CorrectionHistory<T> {
    /// Creates an empty history holding up to `memory_size` pairs of dimension `n`.
    pub fn new(n: usize, memory_size: usize) -> Self {
        Self {
            pairs: RingBuffer::with_capacity_by(memory_size, || CorrectionPair::zeros(n)),
        }
    }

    /// Maximum number of stored pairs.
    pub fn memory_size(&self) -> usize {
        self.pairs.capacity()
    }

    /// Number of stored pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns true if no pair has been recorded.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterates over the stored pairs from oldest to newest.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &CorrectionPair<T>> {
        self.pairs.iter()
    }

    /// Records the pair for the move from (`previous_point`, `previous_gradient`)
    /// to (`point`, `gradient`) and returns its `ys`.
    pub fn update(
        &mut self,
        point: &DVector<T>,
        previous_point: &DVector<T>,
        gradient: &DVector<T>,
        previous_gradient: &DVector<T>,
    ) -> T {
        let pair = self.pairs.push_slot();
        vector_ops::diff_into(&mut pair.s, point, previous_point);
        vector_ops::diff_into(&mut pair.y, gradient, previous_gradient);
        pair.ys = vector_ops::dot(&pair.y, &pair.s);
        pair.yy = vector_ops::dot(&pair.y, &pair.y);

        if pair.ys <= T::zero() {
            log::warn!(
                "non-positive curvature ys = {}; the next direction may not be a descent direction",
                pair.ys
            );
        }
        pair.ys
    }

    /// Writes `-H g` into `direction` using the stored pairs.
    ///
    /// With an empty history this is the steepest-descent direction `-g`.
    pub fn compute_direction(&mut self, gradient: &DVector<T>, direction: &mut DVector<T>) {
        vector_ops::negate_into(direction, gradient);

        let (ys, yy) = match self.pairs.newest() {
            Some(newest) => (newest.ys, newest.yy),
            None => return,
        };

        for pair in self.pairs.iter_mut().rev() {
            pair.alpha = vector_ops::dot(&pair.s, direction) / pair.ys;
            vector_ops::axpy(direction, -pair.alpha, &pair.y);
        }

        vector_ops::scale(direction, ys / yy);

        for pair in self.pairs.iter() {
            let beta = vector_ops::dot(&pair.y, direction) / pair.ys;
            vector_ops::axpy(direction, pair.alpha - beta, &pair.s);
        }
    }
}
