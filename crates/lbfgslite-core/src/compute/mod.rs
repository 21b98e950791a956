//! Computational primitives.

pub mod vector_ops;
