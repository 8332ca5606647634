//! Aircall Common - Shared types, configuration, and errors for the
//! call-center analytics workspace.
//!
//! Every payload a public engine operation returns lives here, so the
//! engines and the CLI agree on one serializable contract.

pub mod config;
pub mod error;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
