//! Memory management utilities for optimization runs.

pub mod ring_buffer;
pub mod workspace;

// Re-export key items
pub use ring_buffer::RingBuffer;
pub use workspace::Workspace;
