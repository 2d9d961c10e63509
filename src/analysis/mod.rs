//! The dataflow analyses this crate provides: the generic solver, constant
//! propagation, and dead-code detection.

pub mod constant_propagation;
pub mod dead_code;
pub mod fixed_point;

pub use constant_propagation::ConstantPropagation;
pub use fixed_point::{solve, DataflowAnalysis, DataflowResult};
