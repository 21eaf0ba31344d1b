//! Shared types and models for the Pharmacy Stock client
//!
//! This crate contains the backend wire models, the movement composer and
//! the pure validation rules shared between the native client and the
//! browser front-end (via WASM).

pub mod composer;
pub mod models;
pub mod types;
pub mod validation;

pub use composer::*;
pub use models::*;
pub use types::*;
pub use validation::*;
