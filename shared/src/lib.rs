//! Shared types and models for Beet Guru
//!
//! This crate contains types shared between the application core, the
//! browser (via WASM), and other components of the system.

pub mod estimation;
pub mod models;
pub mod types;
pub mod validation;

pub use estimation::*;
pub use models::*;
pub use types::*;
pub use validation::*;
