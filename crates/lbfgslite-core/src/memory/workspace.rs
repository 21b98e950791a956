//! Pre-allocated workspace for one optimization run.
//!
//! The workspace owns every per-run vector the driver needs besides the
//! caller's point: the gradient, the snapshots taken before each line
//! search, the search direction and the window of past objective values.
//! It is built once for the problem size and dropped when the run ends, on
//! every exit path.

use crate::{
    memory::ring_buffer::RingBuffer,
    types::{DVector, Scalar},
};

/// Working buffers of a single run.
#[derive(Debug, Clone)]
pub struct Workspace<T: Scalar> {
    /// Gradient at the current point
    pub gradient: DVector<T>,
    /// Point before the current line search
    pub previous_point: DVector<T>,
    /// Gradient before the current line search
    pub previous_gradient: DVector<T>,
    /// Search direction
    pub direction: DVector<T>,
    /// Objective values of the last `past` iterations (absent when `past == 0`)
    pub past_values: Option<RingBuffer<T>>,
}

impl<T: Scalar> Workspace<T> {
    /// Create a workspace with pre-allocated buffers for a specific problem size.
    ///
    /// `past` is the length of the objective-value window; zero disables it.
    pub fn with_size(n: usize, past: usize) -> Self {
        let past_values = (past > 0).then(|| RingBuffer::with_capacity_by(past, T::zero));
        Self {
            gradient: DVector::zeros(n),
            previous_point: DVector::zeros(n),
            previous_gradient: DVector::zeros(n),
            direction: DVector::zeros(n),
            past_values,
        }
    }

    /// Problem dimension the buffers were sized for.
    pub fn dimension(&self) -> usize {
        self.gradient.len()
    }

    /// Get the total memory usage in bytes.
    pub fn memory_usage(&self) -> usize {
        let vector_bytes = 4 * self.dimension() * std::mem::size_of::<T>();
        let window_bytes = self
            .past_values
            .as_ref()
            .map_or(0, |values| values.capacity() * std::mem::size_of::<T>());
        vector_bytes + window_bytes
    }
}
