//! Optimization building blocks.

pub mod callback;
pub mod line_search;
pub mod optimizer;
pub mod parameters;

// Re-export optimization components
pub use callback::*;
pub use line_search::*;
pub use optimizer::*;
pub use parameters::*;
