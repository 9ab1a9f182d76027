//! Shared types and rules for the Agrovia produce tracking platform
//!
//! This crate holds the freshness and pricing rules together with the domain
//! models used by the tracker services and, via WASM, by the browser.

pub mod freshness;
pub mod models;
pub mod pricing;
pub mod types;
pub mod validation;

pub use freshness::*;
pub use models::*;
pub use pricing::*;
pub use types::*;
pub use validation::*;
