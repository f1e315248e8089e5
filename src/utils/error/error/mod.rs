//! Error types for the access gate

#![allow(missing_docs)]

mod helpers;
mod types;

pub use types::{GateError, Result};
