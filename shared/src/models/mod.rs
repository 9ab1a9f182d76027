//! Domain models for the Agrovia produce tracking platform

mod batch;
mod grading;
pub mod ids;
mod order;
mod product;

pub use batch::*;
pub use grading::*;
pub use order::*;
pub use product::*;
